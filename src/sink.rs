use std::fs;
use log::info;
use thiserror::Error;
use crate::config::{FileParameters, SinkKind, SinkParameters};
use crate::manager_bus::{Bus, BusError};
use crate::models::TemperatureRecord;

/// What a run hands to its sink, either the extracted records or the raw
/// payload as received from the API
pub enum Payload<'a> {
    Records(&'a [TemperatureRecord]),
    Raw(&'a str),
}

/// The configured output sink
pub enum Sink {
    Bus(Bus),
    File(FileStore),
}

impl Sink {
    /// Builds the sink selected by configuration
    ///
    /// # Arguments
    ///
    /// * 'config' - sink configuration to use
    pub fn new(config: &SinkParameters) -> Result<Sink, SinkError> {
        match config.kind {
            SinkKind::Bus => {
                let bus_config = config.bus.as_ref()
                    .ok_or(SinkError::ConfigError("sink.bus section missing".to_string()))?;
                Ok(Sink::Bus(Bus::new(bus_config)?))
            },
            SinkKind::File => {
                let file_config = config.file.as_ref()
                    .ok_or(SinkError::ConfigError("sink.file section missing".to_string()))?;
                Ok(Sink::File(FileStore::new(file_config)))
            },
        }
    }

    /// Publishes one payload to the sink
    ///
    /// # Arguments
    ///
    /// * 'payload' - the payload to publish
    pub fn publish(&self, payload: &Payload) -> Result<(), SinkError> {
        match self {
            Sink::Bus(bus) => {
                let json = match payload {
                    Payload::Records(records) => serde_json::to_string(records)
                        .map_err(|e| SinkError::SerializeError(e.to_string()))?,
                    Payload::Raw(raw) => (*raw).to_string(),
                };
                bus.publish(&json)?;

                Ok(())
            },
            Sink::File(store) => store.save(payload),
        }
    }
}

/// Sink that overwrites a fixed local file with indented JSON
pub struct FileStore {
    path: String,
}

impl FileStore {
    /// Returns a new FileStore
    ///
    /// # Arguments
    ///
    /// * 'config' - file sink configuration to use
    pub fn new(config: &FileParameters) -> FileStore {
        FileStore { path: config.path.clone() }
    }

    /// Saves one payload, replacing whatever the previous run wrote
    ///
    /// # Arguments
    ///
    /// * 'payload' - the payload to save
    fn save(&self, payload: &Payload) -> Result<(), SinkError> {
        let json = match payload {
            Payload::Records(records) => serde_json::to_string_pretty(records)
                .map_err(|e| SinkError::SerializeError(e.to_string()))?,
            Payload::Raw(raw) => (*raw).to_string(),
        };

        fs::write(&self.path, json)
            .map_err(|e| SinkError::WriteError(format!("{}: {}", self.path, e)))?;

        info!("observations saved to {}", self.path);

        Ok(())
    }
}

/// Error depicting errors that occur while publishing to a sink
///
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("ConfigError: {0}")]
    ConfigError(String),
    #[error("SerializeError: {0}")]
    SerializeError(String),
    #[error("WriteError: {0}")]
    WriteError(String),
    #[error("BusError: {0}")]
    BusError(#[from] BusError),
}
