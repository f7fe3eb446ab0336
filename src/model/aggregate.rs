// src/model/aggregate.rs
//
// Rebuilds the dashboard dataset from raw per-year plant records, producing
// the same shape the pre-aggregated JSON carries. Plants without a country or
// fuel label are left out of the grouping, matching the upstream pipeline.

use crate::model::dataset::{CountryYear, Dataset, Plant, TOTAL_CAPACITY_KEY, TOTAL_FUEL_KEY};
use crate::model::fuels;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Deserialize)]
pub struct RawPlant {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub primary_fuel: Option<String>,
    #[serde(default)]
    pub capacity_mw: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// year -> plants commissioned-and-running in that year.
pub type RawByYear = BTreeMap<String, Vec<RawPlant>>;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

/// Aggregate stats over one bucket of plants (one country-year, or a whole
/// year for the global summary).
fn stats_for(plants: &[&RawPlant]) -> CountryYear {
    let mut stats = CountryYear::default();
    for plant in plants {
        let fuel = non_empty(&plant.primary_fuel).unwrap_or("Unknown");
        let cap = plant.capacity_mw.unwrap_or(0.0);
        stats.total_capacity += cap;
        *stats.fuels.entry(fuel.to_string()).or_insert(0.0) += cap;
        if fuels::is_green(fuel) {
            stats.green_capacity += cap;
        }
        if fuels::is_renewable(fuel) {
            stats.renewable_capacity += cap;
        }
    }
    if stats.total_capacity > 0.0 {
        stats.green_perc = round1(stats.green_capacity / stats.total_capacity * 100.0);
        stats.renewable_perc = round1(stats.renewable_capacity / stats.total_capacity * 100.0);
    }
    stats
}

pub fn build_dataset(raw: &RawByYear) -> Dataset {
    let years: Vec<String> = raw.keys().cloned().collect();
    let mut dataset = Dataset {
        years: years.clone(),
        ..Default::default()
    };
    let (Some(start_year), Some(latest_year)) = (years.first(), years.last()) else {
        return dataset;
    };

    let mut fuel_types: BTreeSet<String> = BTreeSet::new();
    let mut by_year: BTreeMap<&str, Vec<&RawPlant>> = BTreeMap::new();
    let mut by_country_year: BTreeMap<&str, BTreeMap<&str, Vec<&RawPlant>>> = BTreeMap::new();

    for (year, plants) in raw {
        for plant in plants {
            let (Some(country), Some(fuel)) =
                (non_empty(&plant.country), non_empty(&plant.primary_fuel))
            else {
                continue;
            };
            fuel_types.insert(fuel.to_string());
            by_year.entry(year.as_str()).or_default().push(plant);
            by_country_year
                .entry(country)
                .or_default()
                .entry(year.as_str())
                .or_default()
                .push(plant);

            if year == latest_year {
                dataset.plants_latest.push(Plant {
                    country: Some(country.to_string()),
                    lat: plant.latitude,
                    lon: plant.longitude,
                    fuel: Some(fuel.to_string()),
                    cap: plant.capacity_mw,
                });
            }
        }
    }
    dataset.fuel_types = fuel_types.into_iter().collect();

    // Yearly summaries, global and per country. Every known country gets an
    // entry for every year, zero-filled where it had no plants.
    for year in &years {
        let global = stats_for(by_year.get(year.as_str()).map_or(&[][..], Vec::as_slice));
        let year_map = dataset.global_summary.entry(year.clone()).or_default();
        year_map.insert(TOTAL_CAPACITY_KEY.to_string(), global.total_capacity);
        for (fuel, cap) in &global.fuels {
            year_map.insert(fuel.clone(), *cap);
        }

        for (country, per_year) in &by_country_year {
            let stats = stats_for(per_year.get(year.as_str()).map_or(&[][..], Vec::as_slice));
            dataset
                .country_summary
                .entry(country.to_string())
                .or_default()
                .insert(year.clone(), stats);
        }
    }

    // Growth deltas between the first and last year, per fuel plus a total.
    for &country in by_country_year.keys() {
        let start = dataset.country_year(country, start_year).cloned().unwrap_or_default();
        let latest = dataset.country_year(country, latest_year).cloned().unwrap_or_default();

        let mut deltas: BTreeMap<String, f64> = BTreeMap::new();
        deltas.insert(
            TOTAL_FUEL_KEY.to_string(),
            latest.total_capacity - start.total_capacity,
        );

        let fuels_union: BTreeSet<&String> = start.fuels.keys().chain(latest.fuels.keys()).collect();
        for fuel in fuels_union {
            let from = start.fuels.get(fuel).copied().unwrap_or(0.0);
            let to = latest.fuels.get(fuel).copied().unwrap_or(0.0);
            deltas.insert(fuel.clone(), to - from);
        }

        dataset
            .country_growth_delta
            .insert(country.to_string(), deltas);
    }

    dataset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant(country: &str, fuel: &str, cap: f64) -> RawPlant {
        RawPlant {
            country: Some(country.to_string()),
            primary_fuel: Some(fuel.to_string()),
            capacity_mw: Some(cap),
            latitude: Some(1.0),
            longitude: Some(2.0),
        }
    }

    fn sample_raw() -> RawByYear {
        let mut raw = RawByYear::new();
        raw.insert(
            "2014".to_string(),
            vec![
                plant("Atlantis", "Coal", 900.0),
                plant("Atlantis", "Solar", 100.0),
                plant("Lemuria", "Hydro", 400.0),
            ],
        );
        raw.insert(
            "2020".to_string(),
            vec![
                plant("Atlantis", "Coal", 800.0),
                plant("Atlantis", "Solar", 800.0),
                plant("Lemuria", "Hydro", 300.0),
                plant("Lemuria", "Nuclear", 100.0),
            ],
        );
        raw
    }

    #[test]
    fn test_year_ordering_and_fuels() {
        let ds = build_dataset(&sample_raw());
        assert_eq!(ds.years, vec!["2014", "2020"]);
        assert_eq!(ds.fuel_types, vec!["Coal", "Hydro", "Nuclear", "Solar"]);
    }

    #[test]
    fn test_global_summary() {
        let ds = build_dataset(&sample_raw());
        assert_eq!(ds.global_total("2014"), 1400.0);
        assert_eq!(ds.global_total("2020"), 2000.0);
        let mix = ds.global_fuel_mix("2020");
        assert!(mix.contains(&("Solar".to_string(), 800.0)));
    }

    #[test]
    fn test_country_shares() {
        let ds = build_dataset(&sample_raw());
        let atlantis = ds.country_year("Atlantis", "2020").unwrap();
        assert_eq!(atlantis.total_capacity, 1600.0);
        // Solar is both green and renewable; Coal is neither
        assert_eq!(atlantis.green_capacity, 800.0);
        assert_eq!(atlantis.green_perc, 50.0);
        assert_eq!(atlantis.renewable_perc, 50.0);

        let lemuria = ds.country_year("Lemuria", "2020").unwrap();
        // Nuclear counts green but not renewable
        assert_eq!(lemuria.green_perc, 100.0);
        assert_eq!(lemuria.renewable_perc, 75.0);
    }

    #[test]
    fn test_percentage_rounding() {
        let mut raw = RawByYear::new();
        raw.insert(
            "2020".to_string(),
            vec![plant("X", "Wind", 1.0), plant("X", "Coal", 2.0)],
        );
        let ds = build_dataset(&raw);
        let x = ds.country_year("X", "2020").unwrap();
        assert_eq!(x.green_perc, 33.3);
    }

    #[test]
    fn test_growth_deltas() {
        let ds = build_dataset(&sample_raw());
        assert_eq!(ds.growth_delta("Atlantis", TOTAL_FUEL_KEY), 600.0);
        assert_eq!(ds.growth_delta("Atlantis", "Solar"), 700.0);
        assert_eq!(ds.growth_delta("Atlantis", "Coal"), -100.0);
        // Nuclear only exists in the latest year; baseline is zero
        assert_eq!(ds.growth_delta("Lemuria", "Nuclear"), 100.0);
        assert_eq!(ds.growth_delta("Lemuria", TOTAL_FUEL_KEY), 0.0);
    }

    #[test]
    fn test_plants_latest_snapshot() {
        let ds = build_dataset(&sample_raw());
        assert_eq!(ds.plants_latest.len(), 4);
        assert!(ds
            .plants_latest
            .iter()
            .all(|p| p.country.is_some() && p.fuel.is_some()));
    }

    #[test]
    fn test_unlabeled_plants_skipped() {
        let mut raw = sample_raw();
        raw.get_mut("2020").unwrap().push(RawPlant {
            country: None,
            primary_fuel: Some("Gas".to_string()),
            capacity_mw: Some(1e6),
            latitude: None,
            longitude: None,
        });
        let ds = build_dataset(&raw);
        assert_eq!(ds.global_total("2020"), 2000.0);
        assert!(!ds.fuel_types.contains(&"Gas".to_string()));
    }

    #[test]
    fn test_zero_capacity_country_has_zero_percs() {
        let mut raw = RawByYear::new();
        raw.insert("2020".to_string(), vec![plant("Empty", "Coal", 0.0)]);
        let ds = build_dataset(&raw);
        let c = ds.country_year("Empty", "2020").unwrap();
        assert_eq!(c.green_perc, 0.0);
        assert_eq!(c.renewable_perc, 0.0);
    }

    #[test]
    fn test_empty_input() {
        let ds = build_dataset(&RawByYear::new());
        assert!(ds.years.is_empty());
        assert!(ds.country_summary.is_empty());
    }
}
