use log::{error, info};
use thiserror::Error;
use crate::config::{Config, PayloadKind};
use crate::extract::extract_day_night_temperatures;
use crate::initialization::Mgr;
use crate::sink::Payload;

/// Runs one ingest pass: fetch, extract, publish
///
/// A fetch or parse failure aborts the cycle. A publish failure is logged and
/// the cycle still counts as done, the data is simply dropped until the next
/// scheduled run.
///
/// # Arguments
///
/// * 'config' - configuration
/// * 'mgr' - struct with configured managers
pub fn run(config: &Config, mgr: &Mgr) -> Result<(), WorkerError> {
    let observations = mgr.weather.fetch_observations()
        .map_err(|e| WorkerError::FetchError(e.to_string()))?;

    let records = extract_day_night_temperatures(&observations.document, &config.ingest.hours_wanted);
    info!("extracted {} temperature records from {} time series entries",
        records.len(), observations.document.properties.timeseries.len());

    let payload = match config.sink.payload {
        PayloadKind::Records => Payload::Records(&records),
        PayloadKind::Raw => Payload::Raw(&observations.raw),
    };

    if let Err(e) = mgr.sink.publish(&payload) {
        error!("error publishing observations: {}", e);
    }

    Ok(())
}

/// Error depicting errors that abort one ingest cycle
///
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("error while fetching observations: {0}")]
    FetchError(String),
}
