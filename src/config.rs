use std::fs;
use chrono::NaiveTime;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

#[derive(Deserialize)]
pub struct ApiParameters {
    pub base_api_url: String,
    pub position: (f64, f64),
    pub altitude: i32,
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

#[derive(Deserialize)]
pub struct IngestParameters {
    pub hours_wanted: Vec<String>,
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    Bus,
    File,
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    Records,
    Raw,
}

#[derive(Deserialize)]
pub struct BusParameters {
    pub endpoint: Option<String>,
    pub topic: String,
}

#[derive(Deserialize)]
pub struct FileParameters {
    pub path: String,
}

#[derive(Deserialize)]
pub struct SinkParameters {
    pub kind: SinkKind,
    pub payload: PayloadKind,
    pub bus: Option<BusParameters>,
    pub file: Option<FileParameters>,
}

#[derive(Deserialize)]
pub struct ScheduleParameters {
    pub run_times: Vec<String>,
    #[serde(skip)]
    pub ticks: Vec<NaiveTime>,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub api: ApiParameters,
    pub ingest: IngestParameters,
    pub sink: SinkParameters,
    pub schedule: ScheduleParameters,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, LoadConfigurationError> {

    let toml = fs::read_to_string(config_path)
        .map_err(|e| LoadConfigurationError::FileError(format!("{}: {}", config_path, e)))?;

    parse_config(&toml)
}

/// Parses and validates a configuration document
///
/// # Arguments
///
/// * 'toml_str' - the configuration document contents
fn parse_config(toml_str: &str) -> Result<Config, LoadConfigurationError> {
    let mut config: Config = toml::from_str(toml_str)
        .map_err(|e| LoadConfigurationError::DocumentError(e.to_string()))?;

    config.schedule.ticks = parse_run_times(&config.schedule.run_times)?;
    validate(&config)?;

    Ok(config)
}

/// Parses configured run times given as "HH:MM" strings
///
/// # Arguments
///
/// * 'run_times' - run times as given in the configuration file
fn parse_run_times(run_times: &[String]) -> Result<Vec<NaiveTime>, LoadConfigurationError> {
    if run_times.is_empty() {
        return Err(LoadConfigurationError::ValidationError("schedule.run_times must not be empty".to_string()));
    }

    let mut ticks: Vec<NaiveTime> = Vec::with_capacity(run_times.len());
    for rt in run_times {
        let tick = NaiveTime::parse_from_str(rt, "%H:%M")
            .map_err(|e| LoadConfigurationError::ValidationError(format!("schedule.run_times entry '{}': {}", rt, e)))?;
        ticks.push(tick);
    }

    Ok(ticks)
}

/// Validates the loaded configuration
///
/// Required keys that are missing fail the document parse already; this catches
/// values that parse but would misbehave at runtime.
///
/// # Arguments
///
/// * 'config' - the loaded configuration
fn validate(config: &Config) -> Result<(), LoadConfigurationError> {
    let (lat, long) = config.api.position;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(LoadConfigurationError::ValidationError(format!("api.position latitude {} out of range", lat)));
    }
    if !(-180.0..=180.0).contains(&long) {
        return Err(LoadConfigurationError::ValidationError(format!("api.position longitude {} out of range", long)));
    }
    if config.api.user_agent.trim().is_empty() {
        return Err(LoadConfigurationError::ValidationError("api.user-agent must not be empty".to_string()));
    }

    if config.ingest.hours_wanted.is_empty() {
        return Err(LoadConfigurationError::ValidationError("ingest.hours_wanted must not be empty".to_string()));
    }
    for hour in &config.ingest.hours_wanted {
        let valid = hour.len() == 2
            && hour.chars().all(|c| c.is_ascii_digit())
            && hour.as_str() <= "23";
        if !valid {
            return Err(LoadConfigurationError::ValidationError(format!("ingest.hours_wanted entry '{}' is not a two-digit hour", hour)));
        }
    }

    match config.sink.kind {
        SinkKind::Bus if config.sink.bus.is_none() => {
            Err(LoadConfigurationError::ValidationError("sink.kind is 'bus' but the sink.bus section is missing".to_string()))
        },
        SinkKind::File if config.sink.file.is_none() => {
            Err(LoadConfigurationError::ValidationError("sink.kind is 'file' but the sink.file section is missing".to_string()))
        },
        _ => Ok(()),
    }
}

/// Error depicting errors that occur while loading the configuration
///
#[derive(Debug, Error)]
pub enum LoadConfigurationError {
    #[error("FileError: {0}")]
    FileError(String),
    #[error("DocumentError: {0}")]
    DocumentError(String),
    #[error("ValidationError: {0}")]
    ValidationError(String),
}
