// src/ui/mod.rs
pub mod charts;
pub mod interactions;
pub mod tabs;

// Re-exports
pub use interactions::{setup_map, MapHandlers};

use gtk4::prelude::*;
use gtk4::DrawingArea;

/// Standard map canvas: expands in both directions, draw func installed by
/// the owning tab.
pub fn map_canvas() -> DrawingArea {
    let area = DrawingArea::new();
    area.set_hexpand(true);
    area.set_vexpand(true);
    area.set_content_width(520);
    area.set_content_height(360);
    area
}
