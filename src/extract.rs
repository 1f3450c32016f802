use chrono::NaiveDateTime;
use log::error;
use crate::manager_weather::models::WeatherDocument;
use crate::models::TemperatureRecord;

/// Timestamp format used by the weather API
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Walks the observation time series and returns one record per entry whose
/// hour of day is in the wanted list, in time series order.
///
/// Entries that cannot be used (unparseable timestamp, missing temperature)
/// are logged and skipped, they never fail the batch.
///
/// # Arguments
///
/// * 'document' - the parsed observation document
/// * 'hours_wanted' - two-digit hour strings marking the sampling times of interest
pub fn extract_day_night_temperatures(document: &WeatherDocument, hours_wanted: &[String]) -> Vec<TemperatureRecord> {
    let mut records: Vec<TemperatureRecord> = Vec::new();

    for entry in &document.properties.timeseries {
        let date_time = match NaiveDateTime::parse_from_str(&entry.time, TIME_FORMAT) {
            Ok(dt) => dt,
            Err(e) => {
                error!("skipping entry with unparseable time '{}': {}", entry.time, e);
                continue;
            }
        };

        let hour = date_time.format("%H").to_string();
        if !hours_wanted.contains(&hour) {
            continue;
        }

        let temp = entry.data.instant.details.as_ref().and_then(|d| d.air_temperature);
        let Some(temp) = temp else {
            error!("skipping entry at {}: air_temperature missing", entry.time);
            continue;
        };

        records.push(TemperatureRecord {
            day: date_time.format("%d-%m-%Y").to_string(),
            hour,
            temp,
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(wanted: &[&str]) -> Vec<String> {
        wanted.iter().map(|h| h.to_string()).collect()
    }

    fn document(entries: &[(&str, Option<f64>)]) -> WeatherDocument {
        let timeseries: Vec<serde_json::Value> = entries.iter().map(|(time, temp)| {
            let details = match temp {
                Some(t) => serde_json::json!({"air_temperature": t}),
                None => serde_json::json!({}),
            };
            serde_json::json!({"time": time, "data": {"instant": {"details": details}}})
        }).collect();

        serde_json::from_value(serde_json::json!({"properties": {"timeseries": timeseries}})).unwrap()
    }

    #[test]
    fn matching_hours_give_one_record_each_in_order() {
        let document = document(&[
            ("2024-11-24T00:00:00Z", Some(0.8)),
            ("2024-11-24T06:00:00Z", Some(1.5)),
            ("2024-11-24T12:00:00Z", Some(4.5)),
            ("2024-11-24T18:00:00Z", Some(2.1)),
            ("2024-11-25T06:00:00Z", Some(4.3)),
        ]);

        let records = extract_day_night_temperatures(&document, &hours(&["06", "12"]));

        assert_eq!(records, vec![
            TemperatureRecord { day: "24-11-2024".to_string(), hour: "06".to_string(), temp: 1.5 },
            TemperatureRecord { day: "24-11-2024".to_string(), hour: "12".to_string(), temp: 4.5 },
            TemperatureRecord { day: "25-11-2024".to_string(), hour: "06".to_string(), temp: 4.3 },
        ]);
    }

    #[test]
    fn non_matching_hours_give_nothing() {
        let document = document(&[
            ("2024-11-24T03:00:00Z", Some(0.8)),
            ("2024-11-24T18:00:00Z", Some(2.1)),
        ]);

        let records = extract_day_night_temperatures(&document, &hours(&["06", "12"]));

        assert!(records.is_empty());
    }

    #[test]
    fn missing_temperature_is_skipped_not_fatal() {
        let document = document(&[
            ("2024-11-24T06:00:00Z", None),
            ("2024-11-24T12:00:00Z", Some(4.5)),
        ]);

        let records = extract_day_night_temperatures(&document, &hours(&["06", "12"]));

        assert_eq!(records, vec![
            TemperatureRecord { day: "24-11-2024".to_string(), hour: "12".to_string(), temp: 4.5 },
        ]);
    }

    #[test]
    fn unparseable_time_is_skipped_and_the_scan_continues() {
        let document = document(&[
            ("24/11/2024 06:00", Some(1.5)),
            ("2024-11-24T06:00:00+01:00", Some(9.9)),
            ("2024-11-24T12:00:00Z", Some(4.5)),
        ]);

        let records = extract_day_night_temperatures(&document, &hours(&["06", "12"]));

        assert_eq!(records, vec![
            TemperatureRecord { day: "24-11-2024".to_string(), hour: "12".to_string(), temp: 4.5 },
        ]);
    }

    #[test]
    fn sample_payload_yields_the_expected_day_night_records() {
        let document: WeatherDocument =
            serde_json::from_str(include_str!("../tests/data/weather_data.json")).unwrap();

        let records = extract_day_night_temperatures(&document, &hours(&["06", "12"]));

        let expected: Vec<TemperatureRecord> = [
            ("24-11-2024", "06", 1.5), ("24-11-2024", "12", 4.5),
            ("25-11-2024", "06", 4.3), ("25-11-2024", "12", 10.6),
            ("26-11-2024", "06", 5.0), ("26-11-2024", "12", 7.8),
            ("27-11-2024", "06", 3.5), ("27-11-2024", "12", 5.9),
            ("28-11-2024", "06", 4.9), ("28-11-2024", "12", 8.3),
            ("29-11-2024", "06", 3.8), ("29-11-2024", "12", 3.4),
            ("30-11-2024", "06", 0.5), ("30-11-2024", "12", 3.2),
            ("01-12-2024", "06", 1.7), ("01-12-2024", "12", 3.9),
            ("02-12-2024", "06", -2.0), ("02-12-2024", "12", 4.1),
        ].iter().map(|(day, hour, temp)| TemperatureRecord {
            day: day.to_string(),
            hour: hour.to_string(),
            temp: *temp,
        }).collect();

        assert_eq!(records, expected);
    }

    #[test]
    fn hour_match_is_exact_string_equality() {
        // "6" in the wanted list must not match the extracted "06"
        let document = document(&[("2024-11-24T06:00:00Z", Some(1.5))]);

        let records = extract_day_night_temperatures(&document, &hours(&["6"]));

        assert!(records.is_empty());
    }
}
