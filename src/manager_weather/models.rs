use serde::Deserialize;

/// Top level document as returned by the weather API
#[derive(Deserialize, Debug)]
pub struct WeatherDocument {
    pub properties: Properties,
}

#[derive(Deserialize, Debug)]
pub struct Properties {
    pub timeseries: Vec<TimeSeriesEntry>,
}

/// One timestamped observation record from the weather API
#[derive(Deserialize, Debug)]
pub struct TimeSeriesEntry {
    pub time: String,
    pub data: EntryData,
}

#[derive(Deserialize, Debug)]
pub struct EntryData {
    pub instant: InstantValues,
}

/// The details object is optional so that one incomplete entry cannot fail
/// parsing of the whole document
#[derive(Deserialize, Debug)]
pub struct InstantValues {
    pub details: Option<InstantDetails>,
}

#[derive(Deserialize, Debug)]
pub struct InstantDetails {
    pub air_temperature: Option<f64>,
}
