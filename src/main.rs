use anyhow::Result;
use crate::errors::IngesterError;
use crate::initialization::init;
use crate::scheduler::run_forever;

mod scheduler;
mod manager_weather;
mod manager_bus;
mod sink;
mod extract;
mod errors;
mod config;
mod initialization;
mod logging;
pub mod models;
mod worker;

fn main() -> Result<()> {
    // Load config and set up all managers. If initialization fails, we are pretty much out of luck
    // and can't even log.
    let (config, mgr) = match init() {
        Ok((c, m)) => (c, m),
        Err(e) => {
            return Err(IngesterError(format!("Initialization failed: {}", e)))?;
        }
    };

    // Run the ingest schedule until the process is terminated
    run_forever(&config, &mgr);

    Ok(())
}
