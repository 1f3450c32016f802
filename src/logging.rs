use log::LevelFilter;
use log4rs::Handle;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::threshold::ThresholdFilter;
use thiserror::Error;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

/// Sets up logging with two severity partitioned log files, one that records
/// everything at the configured level and one that records errors only.
/// Optionally everything is echoed to stdout as well.
///
/// # Arguments
///
/// * 'log_path' - directory where log files are written
/// * 'log_level' - level filter for the informational log
/// * 'log_to_stdout' - whether to also log to stdout
pub fn setup_logger(log_path: &str, log_level: LevelFilter, log_to_stdout: bool) -> Result<Handle, LoggerError> {
    let info_file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(format!("{}info.log", log_path))
        .map_err(|e| LoggerError::AppenderError(format!("info log: {}", e)))?;

    let error_file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(format!("{}error.log", log_path))
        .map_err(|e| LoggerError::AppenderError(format!("error log: {}", e)))?;

    let mut config_builder = Config::builder()
        .appender(Appender::builder()
            .build("info_file", Box::new(info_file)))
        .appender(Appender::builder()
            .filter(Box::new(ThresholdFilter::new(LevelFilter::Error)))
            .build("error_file", Box::new(error_file)));

    let mut root_builder = Root::builder()
        .appender("info_file")
        .appender("error_file");

    if log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        config_builder = config_builder
            .appender(Appender::builder().build("stdout", Box::new(stdout)));
        root_builder = root_builder.appender("stdout");
    }

    let config = config_builder
        .build(root_builder.build(log_level))
        .map_err(|e| LoggerError::ConfigError(e.to_string()))?;

    let handle = log4rs::init_config(config)
        .map_err(|e| LoggerError::InitError(e.to_string()))?;

    Ok(handle)
}

/// Error depicting errors that occur while setting up logging
///
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("AppenderError: {0}")]
    AppenderError(String),
    #[error("ConfigError: {0}")]
    ConfigError(String),
    #[error("InitError: {0}")]
    InitError(String),
}
