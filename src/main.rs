mod config;
mod db;
mod engine;
mod export;
mod logging;
mod models;
mod run;
mod ui;

use anyhow::Result;

use crate::config::{Config, Paths};
use crate::models::{AllocationState, ProfitInputs};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let paths = Paths::resolve()?;
    let config = Config::load(&paths.config_path())?;
    logging::init(&paths.log_path(), &config.log_filter)?;
    let db = db::Database::open(&paths.db_path())?;

    match args.len() {
        1 => run::as_tui(&db, &config),
        2.. => run::as_cli(&args, &db, &config),
        _ => {
            eprintln!("Usage: spendsplit [command]");
            Ok(())
        }
    }
}

/// Saved breakdown, or a fresh one built from the config defaults.
pub(crate) fn load_allocation(store: &dyn db::StateStore, config: &Config) -> Result<AllocationState> {
    Ok(AllocationState::load(store)?.unwrap_or_else(|| {
        AllocationState::with_defaults(config.default_total_amount, config.default_currency)
    }))
}

pub(crate) fn load_profit(store: &dyn db::StateStore) -> Result<ProfitInputs> {
    Ok(ProfitInputs::load(store)?.unwrap_or_default())
}
