// src/io/dataset.rs

use super::invalid_data;
use crate::model::aggregate::{self, RawByYear};
use crate::model::Dataset;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Loads the capacity dataset. Accepts either the pre-aggregated document
/// (recognized by its top-level "years" key) or a raw year -> plants map,
/// which gets aggregated on the fly.
pub fn load(path: &Path) -> io::Result<Dataset> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let value: serde_json::Value = serde_json::from_reader(reader).map_err(invalid_data)?;

    if value.get("years").is_some() {
        let dataset: Dataset = serde_json::from_value(value).map_err(invalid_data)?;
        if dataset.years.is_empty() {
            return Err(invalid_data("dataset has no years"));
        }
        log::info!(
            "Dataset loaded: {} years, {} countries, {} plants",
            dataset.years.len(),
            dataset.country_summary.len(),
            dataset.plants_latest.len()
        );
        Ok(dataset)
    } else {
        let raw: RawByYear = serde_json::from_value(value).map_err(invalid_data)?;
        if raw.is_empty() {
            return Err(invalid_data("raw plant file has no years"));
        }
        log::info!("Raw plant data detected, aggregating {} years", raw.len());
        Ok(aggregate::build_dataset(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_processed() {
        let path = write_temp(
            "capview_test_processed.json",
            r#"{"years": ["2020"], "fuel_types": [], "global_summary": {},
                "country_summary": {}, "country_growth_delta": {}, "plants_latest": []}"#,
        );
        let ds = load(&path).unwrap();
        assert_eq!(ds.years, vec!["2020"]);
    }

    #[test]
    fn test_load_raw_aggregates() {
        let path = write_temp(
            "capview_test_raw.json",
            r#"{"2020": [{"country": "Atlantis", "primary_fuel": "Wind",
                          "capacity_mw": 50.0, "latitude": 1.0, "longitude": 2.0}]}"#,
        );
        let ds = load(&path).unwrap();
        assert_eq!(ds.years, vec!["2020"]);
        assert_eq!(ds.country_capacity("Atlantis"), 50.0);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let path = write_temp("capview_test_garbage.json", "not json at all");
        assert!(load(&path).is_err());
    }

    #[test]
    fn test_load_rejects_empty_years() {
        let path = write_temp("capview_test_empty.json", r#"{"years": []}"#);
        assert!(load(&path).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(load(Path::new("/no/such/file.json")).is_err());
    }
}
