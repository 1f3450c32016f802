pub mod models;

use std::time::Duration;
use log::warn;
use reqwest::blocking::Client;
use thiserror::Error;
use crate::config::ApiParameters;
use crate::manager_weather::models::WeatherDocument;

/// Struct for managing retrieval of weather observations
pub struct Weather {
    client: Client,
    url: String,
    lat: f64,
    long: f64,
    altitude: i32,
}

/// A successfully fetched response, both as typed document and as the raw body
pub struct Observations {
    pub document: WeatherDocument,
    pub raw: String,
}

impl Weather {
    /// Returns a weather struct ready for fetching observations
    ///
    /// # Arguments
    ///
    /// * 'config' - API configuration to use
    pub fn new(config: &ApiParameters) -> Result<Weather, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Weather {
            client,
            url: config.base_api_url.clone(),
            lat: config.position.0,
            long: config.position.1,
            altitude: config.altitude,
        })
    }

    /// Retrieves the observation time series for the configured position
    ///
    pub fn fetch_observations(&self) -> Result<Observations, WeatherError> {
        let lat = self.lat.to_string();
        let lon = self.long.to_string();
        let altitude = self.altitude.to_string();

        let response = self.client
            .get(&self.url)
            .query(&vec![("lat", lat.as_str()), ("lon", lon.as_str()), ("altitude", altitude.as_str())])
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;

        observations_from_response(status, &body)
    }
}

/// Turns an HTTP status and body into parsed observations.
///
/// Status 203 means the API version in use is deprecated; the body is still
/// valid and processed, but a warning is logged. Any status of 400 and above
/// fails the fetch.
///
/// # Arguments
///
/// * 'status' - the HTTP response status
/// * 'body' - the HTTP response body
fn observations_from_response(status: u16, body: &str) -> Result<Observations, WeatherError> {
    if status >= 400 {
        return Err(WeatherError::StatusError(status));
    }
    if status == 203 {
        warn!("weather API responded with status 203, the API version in use is deprecated");
    }

    let document: WeatherDocument = serde_json::from_str(body)
        .map_err(|e| WeatherError::DocumentError(e.to_string()))?;

    Ok(Observations { document, raw: body.to_string() })
}

/// Error depicting errors that occur while fetching observations
///
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("StatusError: weather API responded with status {0}")]
    StatusError(u16),
    #[error("DocumentError: {0}")]
    DocumentError(String),
    #[error("NetworkError: {0}")]
    NetworkError(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "type": "Feature",
        "properties": {
            "timeseries": [
                {
                    "time": "2024-11-24T06:00:00Z",
                    "data": {
                        "instant": {
                            "details": {
                                "air_temperature": 1.5,
                                "relative_humidity": 93.0
                            }
                        }
                    }
                }
            ]
        }
    }"#;

    #[test]
    fn ok_response_parses_document_and_keeps_raw_body() {
        let observations = observations_from_response(200, BODY).unwrap();

        let entries = &observations.document.properties.timeseries;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].time, "2024-11-24T06:00:00Z");
        assert_eq!(entries[0].data.instant.details.as_ref().unwrap().air_temperature, Some(1.5));
        assert_eq!(observations.raw, BODY);
    }

    #[test]
    fn deprecation_status_is_still_processed() {
        let observations = observations_from_response(203, BODY).unwrap();

        assert_eq!(observations.document.properties.timeseries.len(), 1);
    }

    #[test]
    fn error_status_aborts_before_parsing() {
        for status in [400, 403, 404, 500] {
            let result = observations_from_response(status, BODY);

            assert!(matches!(result, Err(WeatherError::StatusError(s)) if s == status));
        }
    }

    #[test]
    fn invalid_json_is_a_document_error() {
        let result = observations_from_response(200, "<html>not json</html>");

        assert!(matches!(result, Err(WeatherError::DocumentError(_))));
    }

    #[test]
    fn entry_without_details_still_parses() {
        let body = r#"{"properties": {"timeseries": [
            {"time": "2024-11-24T06:00:00Z", "data": {"instant": {}}}
        ]}}"#;

        let observations = observations_from_response(200, body).unwrap();

        assert!(observations.document.properties.timeseries[0].data.instant.details.is_none());
    }
}
