// src/io/boundaries.rs
//
// Country boundary loading: a configured local file wins, then the on-disk
// cache, then a single HTTP GET that populates the cache. No retries; a
// failed fetch surfaces as a Failed load phase upstream.

use super::invalid_data;
use crate::model::WorldMap;
use geojson::GeoJson;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

pub const DEFAULT_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/datasets/geo-countries/master/data/countries.geojson";

pub fn load_file(path: &Path) -> io::Result<WorldMap> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let geojson = GeoJson::from_reader(reader).map_err(invalid_data)?;
    let world = WorldMap::from_geojson(&geojson);
    if world.countries.is_empty() {
        return Err(invalid_data(format!(
            "no usable country polygons in {:?}",
            path
        )));
    }
    log::info!("Boundaries loaded: {} countries", world.countries.len());
    Ok(world)
}

/// Resolve boundaries from local file / cache / network, in that order.
pub fn load(local: Option<&Path>, url: &str, cache: &Path) -> io::Result<WorldMap> {
    if let Some(path) = local {
        return load_file(path);
    }
    if cache.exists() {
        match load_file(cache) {
            Ok(world) => return Ok(world),
            Err(e) => log::warn!("Boundary cache unreadable ({}), refetching", e),
        }
    }
    fetch(url, cache)
}

/// One GET, streamed straight into the cache file, then parsed from disk.
/// The boundary file is ~20 MB, too big for an in-memory string fetch.
fn fetch(url: &str, cache: &Path) -> io::Result<WorldMap> {
    log::info!("Fetching boundaries from {}", url);
    let response = ureq::get(url)
        .call()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    if let Some(parent) = cache.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut reader = response.into_reader();
    let mut out = File::create(cache)?;
    io::copy(&mut reader, &mut out)?;

    load_file(cache)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join("capview_test_boundaries.json");
        let mut f = File::create(&path).unwrap();
        f.write_all(
            br#"{"type": "FeatureCollection", "features": [{
                "type": "Feature",
                "properties": {"ADMIN": "Atlantis"},
                "geometry": {"type": "Polygon",
                             "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]}
            }]}"#,
        )
        .unwrap();

        let world = load_file(&path).unwrap();
        assert_eq!(world.countries.len(), 1);
        assert_eq!(world.countries[0].name, "Atlantis");
    }

    #[test]
    fn test_load_file_rejects_empty_collection() {
        let path = std::env::temp_dir().join("capview_test_boundaries_empty.json");
        let mut f = File::create(&path).unwrap();
        f.write_all(br#"{"type": "FeatureCollection", "features": []}"#)
            .unwrap();
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn test_local_file_preferred() {
        // A bogus URL must never be touched when a local file is given
        let path = std::env::temp_dir().join("capview_test_boundaries_local.json");
        let mut f = File::create(&path).unwrap();
        f.write_all(
            br#"{"type": "FeatureCollection", "features": [{
                "type": "Feature",
                "properties": {"name": "Mu"},
                "geometry": {"type": "Polygon",
                             "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]}
            }]}"#,
        )
        .unwrap();

        let world = load(
            Some(path.as_path()),
            "http://invalid.invalid/none.geojson",
            Path::new("/nonexistent/cache.geojson"),
        )
        .unwrap();
        assert_eq!(world.countries[0].name, "Mu");
    }
}
