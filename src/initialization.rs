use std::env;
use log::info;
use thiserror::Error;
use crate::config::{load_config, Config, LoadConfigurationError};
use crate::logging::{setup_logger, LoggerError};
use crate::manager_weather::{Weather, WeatherError};
use crate::sink::{Sink, SinkError};

pub struct Mgr {
    pub weather: Weather,
    pub sink: Sink,
}

/// Initializes and returns configuration and a Mgr struct holding the initialized structs
///
pub fn init() -> Result<(Config, Mgr), InitializationError> {
    let args: Vec<String> = env::args().collect();
    let config_path = args.iter()
        .find(|p| p.starts_with("--config="))
        .expect("config file argument should be present");
    let config_path = config_path
        .split_once('=')
        .expect("config file argument should be correct")
        .1;


    // Load configuration
    let config = load_config(config_path)?;

    // Setup logging
    let _ = setup_logger(&config.general.log_path, config.general.log_level, config.general.log_to_stdout)?;


    // Print version
    info!("starting weather ingester version: {}", env!("CARGO_PKG_VERSION"));


    // Instantiate structs
    let weather = Weather::new(&config.api)?;
    let sink = Sink::new(&config.sink)?;

    let mgr = Mgr {
        weather,
        sink,
    };

    Ok((config, mgr))
}

/// Error depicting errors that occur while initializing the ingester
///
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("ConfigurationError: {0}")]
    ConfigurationError(#[from] LoadConfigurationError),
    #[error("SetupLoggerError: {0}")]
    SetupLoggerError(#[from] LoggerError),
    #[error("WeatherSetupError: {0}")]
    WeatherSetupError(#[from] WeatherError),
    #[error("SinkSetupError: {0}")]
    SinkSetupError(#[from] SinkError),
}
