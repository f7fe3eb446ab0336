// src/rendering/projection.rs
//
// Equirectangular map camera. Each tab keeps its own Viewport so pan/zoom in
// one view never disturbs the others.

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 12.0;

/// Degrees of latitude beyond which panning is clamped. Keeps the poles from
/// scrolling the world off-canvas.
const LAT_LIMIT: f64 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center_lon: f64,
    pub center_lat: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        // Same opening view as the dashboard has always used: mid-latitudes,
        // whole world visible.
        Self {
            center_lon: 0.0,
            center_lat: 20.0,
            zoom: 2.0,
        }
    }
}

impl Viewport {
    /// Pixels per degree at the current zoom. A 256px world tile doubled per
    /// zoom level, spread over 360 degrees of longitude.
    pub fn scale(&self) -> f64 {
        256.0 * self.zoom.exp2() / 360.0
    }

    /// Geographic -> canvas coordinates for a canvas of `w` x `h` pixels.
    pub fn project(&self, lon: f64, lat: f64, w: f64, h: f64) -> (f64, f64) {
        let s = self.scale();
        (
            w / 2.0 + (lon - self.center_lon) * s,
            h / 2.0 - (lat - self.center_lat) * s,
        )
    }

    /// Canvas -> geographic coordinates. Inverse of `project`.
    pub fn unproject(&self, x: f64, y: f64, w: f64, h: f64) -> (f64, f64) {
        let s = self.scale();
        (
            self.center_lon + (x - w / 2.0) / s,
            self.center_lat - (y - h / 2.0) / s,
        )
    }

    /// Shift the camera by a pixel delta (drag gesture).
    pub fn pan_pixels(&mut self, dx: f64, dy: f64) {
        let s = self.scale();
        self.center_lon -= dx / s;
        self.center_lat = (self.center_lat + dy / s).clamp(-LAT_LIMIT, LAT_LIMIT);
    }

    /// Change zoom by `steps`, keeping the geographic point under the cursor
    /// `(x, y)` fixed on screen.
    pub fn zoom_about(&mut self, steps: f64, x: f64, y: f64, w: f64, h: f64) {
        let (anchor_lon, anchor_lat) = self.unproject(x, y, w, h);
        self.zoom = (self.zoom + steps).clamp(MIN_ZOOM, MAX_ZOOM);
        let s = self.scale();
        self.center_lon = anchor_lon - (x - w / 2.0) / s;
        self.center_lat = (anchor_lat + (y - h / 2.0) / s).clamp(-LAT_LIMIT, LAT_LIMIT);
    }
}
