// src/model/world.rs
//
// Country boundary polygons, flattened out of the upstream GeoJSON into ring
// lists with a precomputed bounding box per country. The bbox makes the
// per-click hit test cheap enough to run over ~250 countries without a
// spatial index.

use crate::utils::geometry::{point_in_rings, BoundingBox, LonLat};
use geojson::{GeoJson, Value};

#[derive(Debug, Clone)]
pub struct CountryShape {
    pub name: String,
    /// Exterior and hole rings of every polygon, lon/lat degrees. Even-odd
    /// parity over the whole set decides containment.
    pub rings: Vec<Vec<LonLat>>,
    pub bbox: BoundingBox,
}

impl CountryShape {
    pub fn contains(&self, point: LonLat) -> bool {
        self.bbox.contains(point) && point_in_rings(point, &self.rings)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WorldMap {
    pub countries: Vec<CountryShape>,
}

fn ring_to_points(ring: &[Vec<f64>]) -> Vec<LonLat> {
    ring.iter()
        .filter(|pos| pos.len() >= 2)
        .map(|pos| (pos[0], pos[1]))
        .collect()
}

fn feature_name(feature: &geojson::Feature) -> Option<String> {
    let props = feature.properties.as_ref()?;
    // The geo-countries dataset labels features with ADMIN; other boundary
    // files tend to use a plain "name".
    for key in ["ADMIN", "name"] {
        if let Some(name) = props.get(key).and_then(|v| v.as_str()) {
            return Some(name.to_string());
        }
    }
    None
}

impl WorldMap {
    /// Flattens a parsed FeatureCollection. Features without a usable name or
    /// polygon geometry are dropped.
    pub fn from_geojson(geojson: &GeoJson) -> WorldMap {
        let mut countries = Vec::new();

        let GeoJson::FeatureCollection(collection) = geojson else {
            return WorldMap { countries };
        };

        for feature in &collection.features {
            let Some(name) = feature_name(feature) else {
                continue;
            };
            let Some(geometry) = feature.geometry.as_ref() else {
                continue;
            };

            let mut rings: Vec<Vec<LonLat>> = Vec::new();
            match &geometry.value {
                Value::Polygon(polygon) => {
                    rings.extend(polygon.iter().map(|r| ring_to_points(r)));
                }
                Value::MultiPolygon(polygons) => {
                    for polygon in polygons {
                        rings.extend(polygon.iter().map(|r| ring_to_points(r)));
                    }
                }
                _ => continue,
            }
            rings.retain(|r| r.len() >= 3);
            if rings.is_empty() {
                continue;
            }

            let mut bbox = BoundingBox::empty();
            for ring in &rings {
                for &point in ring {
                    bbox.include(point);
                }
            }

            countries.push(CountryShape { name, rings, bbox });
        }

        WorldMap { countries }
    }

    /// Topmost country under a geographic point. Later features sit on top,
    /// mirroring the paint order.
    pub fn hit_test(&self, point: LonLat) -> Option<&CountryShape> {
        self.countries.iter().rev().find(|c| c.contains(point))
    }

    pub fn find(&self, name: &str) -> Option<&CountryShape> {
        self.countries.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_world() -> WorldMap {
        let geojson: GeoJson = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"ADMIN": "Atlantis"},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {"name": "Lemuria"},
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [
                            [[[20,0],[30,0],[30,10],[20,10],[20,0]]],
                            [[[40,0],[45,0],[45,5],[40,5],[40,0]]]
                        ]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[50,0],[60,0],[60,10],[50,10],[50,0]]]
                    }
                }
            ]
        }"#
        .parse()
        .expect("sample geojson parses");
        WorldMap::from_geojson(&geojson)
    }

    #[test]
    fn test_named_features_kept() {
        let world = sample_world();
        assert_eq!(world.countries.len(), 2, "nameless feature dropped");
        assert!(world.find("Atlantis").is_some());
        assert!(world.find("Lemuria").is_some(), "falls back to name property");
    }

    #[test]
    fn test_multipolygon_flattened() {
        let world = sample_world();
        let lemuria = world.find("Lemuria").unwrap();
        assert_eq!(lemuria.rings.len(), 2);
        assert!(lemuria.contains((25.0, 5.0)));
        assert!(lemuria.contains((42.0, 2.0)), "second island");
        assert!(!lemuria.contains((35.0, 5.0)), "between islands");
    }

    #[test]
    fn test_hit_test() {
        let world = sample_world();
        assert_eq!(world.hit_test((5.0, 5.0)).map(|c| c.name.as_str()), Some("Atlantis"));
        assert!(world.hit_test((-5.0, 5.0)).is_none());
    }

    #[test]
    fn test_bbox_covers_all_parts() {
        let world = sample_world();
        let lemuria = world.find("Lemuria").unwrap();
        assert!(lemuria.bbox.contains((44.0, 4.0)));
        assert!(lemuria.bbox.contains((21.0, 9.0)));
    }

    #[test]
    fn test_non_collection_input() {
        let geojson: GeoJson = r#"{"type": "Point", "coordinates": [0, 0]}"#.parse().unwrap();
        assert!(WorldMap::from_geojson(&geojson).countries.is_empty());
    }
}
