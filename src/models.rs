use serde::Serialize;

/// One extracted observation, day reformatted to DD-MM-YYYY and the hour kept
/// as the two-digit string it was matched on
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct TemperatureRecord {
    pub day: String,
    pub hour: String,
    pub temp: f64,
}
