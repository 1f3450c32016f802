use thiserror::Error;
use zenoh::{Session, Wait};
use crate::config::BusParameters;

/// Struct for managing publishing to the message bus
///
/// The session is opened once at startup and reused for every run.
pub struct Bus {
    session: Session,
    topic: String,
}

impl Bus {
    /// Opens a bus session and returns a struct ready for publishing
    ///
    /// # Arguments
    ///
    /// * 'config' - bus configuration to use
    pub fn new(config: &BusParameters) -> Result<Bus, BusError> {
        let mut zenoh_config = zenoh::Config::default();

        // Without a configured endpoint the session falls back to peer discovery
        if let Some(endpoint) = &config.endpoint {
            zenoh_config
                .insert_json5("connect/endpoints", &format!("[\"{}\"]", endpoint))
                .map_err(|e| BusError::ConfigError(e.to_string()))?;
        }

        let session = zenoh::open(zenoh_config).wait()
            .map_err(|e| BusError::SessionError(e.to_string()))?;

        Ok(Bus {
            session,
            topic: config.topic.clone(),
        })
    }

    /// Publishes a JSON payload on the configured topic
    ///
    /// # Arguments
    ///
    /// * 'payload' - JSON serialized payload to publish
    pub fn publish(&self, payload: &str) -> Result<(), BusError> {
        self.session
            .put(self.topic.as_str(), payload)
            .wait()
            .map_err(|e| BusError::PublishError(e.to_string()))?;

        Ok(())
    }
}

/// Error depicting errors that occur while publishing to the message bus
///
#[derive(Debug, Error)]
pub enum BusError {
    #[error("ConfigError: {0}")]
    ConfigError(String),
    #[error("SessionError: {0}")]
    SessionError(String),
    #[error("PublishError: {0}")]
    PublishError(String),
}
