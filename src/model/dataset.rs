// src/model/dataset.rs
//
// The pre-aggregated capacity dataset. Deserialized once at startup and
// treated as read-only afterwards; every accessor substitutes zero/empty for
// missing entries so the views can degrade instead of failing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key used inside `global_summary` year maps for the all-fuels total.
pub const TOTAL_CAPACITY_KEY: &str = "total_capacity";

/// Pseudo-fuel key in `country_growth_delta` for the total-capacity delta.
pub const TOTAL_FUEL_KEY: &str = "_total";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryYear {
    #[serde(default)]
    pub total_capacity: f64,
    #[serde(default)]
    pub green_capacity: f64,
    #[serde(default)]
    pub green_perc: f64,
    #[serde(default)]
    pub renewable_capacity: f64,
    #[serde(default)]
    pub renewable_perc: f64,
    #[serde(default)]
    pub fuels: BTreeMap<String, f64>,
}

/// Latest-year plant snapshot for the distribution map. Coordinates may be
/// null upstream; such plants are skipped at render time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub fuel: Option<String>,
    #[serde(default)]
    pub cap: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub years: Vec<String>,
    #[serde(default)]
    pub fuel_types: Vec<String>,
    /// year -> { fuel | "total_capacity" -> MW }
    #[serde(default)]
    pub global_summary: BTreeMap<String, BTreeMap<String, f64>>,
    /// country -> year -> stats
    #[serde(default)]
    pub country_summary: BTreeMap<String, BTreeMap<String, CountryYear>>,
    /// country -> fuel | "_total" -> signed MW delta
    #[serde(default)]
    pub country_growth_delta: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    pub plants_latest: Vec<Plant>,
}

impl Dataset {
    pub fn latest_year(&self) -> Option<&str> {
        self.years.last().map(String::as_str)
    }

    pub fn global_total(&self, year: &str) -> f64 {
        self.global_summary
            .get(year)
            .and_then(|m| m.get(TOTAL_CAPACITY_KEY))
            .copied()
            .unwrap_or(0.0)
    }

    /// Per-fuel slices of a year's global summary, total excluded.
    pub fn global_fuel_mix(&self, year: &str) -> Vec<(String, f64)> {
        match self.global_summary.get(year) {
            Some(map) => map
                .iter()
                .filter(|(key, _)| key.as_str() != TOTAL_CAPACITY_KEY)
                .map(|(fuel, cap)| (fuel.clone(), *cap))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn country_year(&self, country: &str, year: &str) -> Option<&CountryYear> {
        self.country_summary.get(country).and_then(|y| y.get(year))
    }

    pub fn country_latest(&self, country: &str) -> Option<&CountryYear> {
        self.country_year(country, self.latest_year()?)
    }

    /// Latest-year total capacity, zero when the country is absent.
    pub fn country_capacity(&self, country: &str) -> f64 {
        self.country_latest(country)
            .map(|c| c.total_capacity)
            .unwrap_or(0.0)
    }

    /// Growth delta for a country and fuel key (`"_total"` for the total).
    /// Absent countries and fuels count as zero.
    pub fn growth_delta(&self, country: &str, fuel_key: &str) -> f64 {
        self.country_growth_delta
            .get(country)
            .and_then(|m| m.get(fuel_key))
            .copied()
            .unwrap_or(0.0)
    }

    /// One value per year for a fuel's global capacity.
    pub fn fuel_series(&self, fuel: &str) -> Vec<f64> {
        self.years
            .iter()
            .map(|year| {
                self.global_summary
                    .get(year)
                    .and_then(|m| m.get(fuel))
                    .copied()
                    .unwrap_or(0.0)
            })
            .collect()
    }

    pub fn total_series(&self) -> Vec<f64> {
        self.years.iter().map(|y| self.global_total(y)).collect()
    }

    /// A country's total capacity per year, zero-filled.
    pub fn country_total_series(&self, country: &str) -> Vec<f64> {
        self.years
            .iter()
            .map(|year| {
                self.country_year(country, year)
                    .map(|c| c.total_capacity)
                    .unwrap_or(0.0)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        serde_json::from_str(
            r#"{
                "years": ["2014", "2020"],
                "fuel_types": ["Coal", "Solar"],
                "global_summary": {
                    "2014": {"total_capacity": 1000.0, "Coal": 900.0, "Solar": 100.0},
                    "2020": {"total_capacity": 1600.0, "Coal": 800.0, "Solar": 800.0}
                },
                "country_summary": {
                    "Atlantis": {
                        "2020": {
                            "total_capacity": 1600.0,
                            "green_capacity": 800.0,
                            "green_perc": 50.0,
                            "renewable_capacity": 800.0,
                            "renewable_perc": 50.0,
                            "fuels": {"Coal": 800.0, "Solar": 800.0}
                        }
                    }
                },
                "country_growth_delta": {
                    "Atlantis": {"_total": 600.0, "Solar": 700.0, "Coal": -100.0}
                },
                "plants_latest": [
                    {"country": "Atlantis", "lat": 10.0, "lon": 20.0, "fuel": "Solar", "cap": 800.0},
                    {"country": "Atlantis", "lat": null, "lon": null, "fuel": "Coal", "cap": 800.0}
                ]
            }"#,
        )
        .expect("sample dataset parses")
    }

    #[test]
    fn test_latest_year() {
        assert_eq!(sample().latest_year(), Some("2020"));
        assert_eq!(Dataset::default().latest_year(), None);
    }

    #[test]
    fn test_global_accessors() {
        let ds = sample();
        assert_eq!(ds.global_total("2020"), 1600.0);
        assert_eq!(ds.global_total("1999"), 0.0);

        let mix = ds.global_fuel_mix("2020");
        assert_eq!(mix.len(), 2);
        assert!(mix.iter().all(|(fuel, _)| fuel != TOTAL_CAPACITY_KEY));
    }

    #[test]
    fn test_missing_country_defaults() {
        let ds = sample();
        assert!(ds.country_latest("Nowhere").is_none());
        assert_eq!(ds.country_capacity("Nowhere"), 0.0);
        assert_eq!(ds.growth_delta("Nowhere", TOTAL_FUEL_KEY), 0.0);
        assert_eq!(ds.growth_delta("Atlantis", "Gas"), 0.0);
    }

    #[test]
    fn test_series() {
        let ds = sample();
        assert_eq!(ds.fuel_series("Solar"), vec![100.0, 800.0]);
        assert_eq!(ds.total_series(), vec![1000.0, 1600.0]);
        // Atlantis has no 2014 entry; it zero-fills
        assert_eq!(ds.country_total_series("Atlantis"), vec![0.0, 1600.0]);
    }

    #[test]
    fn test_nullable_plant_fields() {
        let ds = sample();
        assert_eq!(ds.plants_latest.len(), 2);
        assert!(ds.plants_latest[1].lat.is_none());
        assert_eq!(ds.plants_latest[0].cap, Some(800.0));
    }
}
