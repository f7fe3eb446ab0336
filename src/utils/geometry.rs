// src/utils/geometry.rs

/// Longitude/latitude pair in degrees.
pub type LonLat = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn empty() -> Self {
        Self {
            min_lon: f64::INFINITY,
            min_lat: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
            max_lat: f64::NEG_INFINITY,
        }
    }

    pub fn include(&mut self, (lon, lat): LonLat) {
        self.min_lon = self.min_lon.min(lon);
        self.min_lat = self.min_lat.min(lat);
        self.max_lon = self.max_lon.max(lon);
        self.max_lat = self.max_lat.max(lat);
    }

    pub fn contains(&self, (lon, lat): LonLat) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    pub fn is_empty(&self) -> bool {
        self.min_lon > self.max_lon
    }
}

/// Ray-cast point-in-ring test. The ring does not need an explicit closing
/// vertex; the last segment wraps to the first.
pub fn point_in_ring(point: LonLat, ring: &[LonLat]) -> bool {
    let (px, py) = point;
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Even-odd test over a shape's full ring set (exteriors and holes alike):
/// a point inside an odd number of rings is inside the shape.
pub fn point_in_rings(point: LonLat, rings: &[Vec<LonLat>]) -> bool {
    let mut crossings = 0usize;
    for ring in rings {
        if point_in_ring(point, ring) {
            crossings += 1;
        }
    }
    crossings % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(cx: f64, cy: f64, half: f64) -> Vec<LonLat> {
        vec![
            (cx - half, cy - half),
            (cx + half, cy - half),
            (cx + half, cy + half),
            (cx - half, cy + half),
        ]
    }

    #[test]
    fn test_point_in_square() {
        let ring = square(0.0, 0.0, 10.0);
        assert!(point_in_ring((0.0, 0.0), &ring));
        assert!(point_in_ring((9.9, -9.9), &ring));
        assert!(!point_in_ring((10.5, 0.0), &ring));
        assert!(!point_in_ring((0.0, -11.0), &ring));
    }

    #[test]
    fn test_degenerate_ring() {
        assert!(!point_in_ring((0.0, 0.0), &[]));
        assert!(!point_in_ring((0.0, 0.0), &[(1.0, 1.0), (2.0, 2.0)]));
    }

    #[test]
    fn test_concave_ring() {
        // A "C" shape open to the right
        let ring = vec![
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 2.0),
            (2.0, 2.0),
            (2.0, 8.0),
            (10.0, 8.0),
            (10.0, 10.0),
            (0.0, 10.0),
        ];
        assert!(point_in_ring((1.0, 5.0), &ring));
        assert!(!point_in_ring((5.0, 5.0), &ring), "notch is outside");
        assert!(point_in_ring((5.0, 1.0), &ring));
    }

    #[test]
    fn test_hole_excluded() {
        let rings = vec![square(0.0, 0.0, 10.0), square(0.0, 0.0, 3.0)];
        assert!(!point_in_rings((0.0, 0.0), &rings), "inside the hole");
        assert!(point_in_rings((5.0, 5.0), &rings), "between hole and exterior");
        assert!(!point_in_rings((20.0, 0.0), &rings));
    }

    #[test]
    fn test_multipolygon_rings() {
        // Two disjoint islands in one ring set
        let rings = vec![square(0.0, 0.0, 1.0), square(100.0, 0.0, 1.0)];
        assert!(point_in_rings((0.0, 0.0), &rings));
        assert!(point_in_rings((100.0, 0.5), &rings));
        assert!(!point_in_rings((50.0, 0.0), &rings));
    }

    #[test]
    fn test_bounding_box() {
        let mut bbox = BoundingBox::empty();
        assert!(bbox.is_empty());
        bbox.include((-10.0, 5.0));
        bbox.include((20.0, -8.0));
        assert!(!bbox.is_empty());
        assert!(bbox.contains((0.0, 0.0)));
        assert!(bbox.contains((20.0, 5.0)));
        assert!(!bbox.contains((21.0, 0.0)));
        assert!(!bbox.contains((0.0, 6.0)));
    }
}
