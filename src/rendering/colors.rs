// src/rendering/colors.rs
//
// Color scales for the three map views. The capacity ladder and the diverging
// growth scale are the load-bearing pieces; everything else is conversion
// plumbing between cairo (f64 channels) and plotters (u8 channels).

use plotters::style::RGBColor;

/// 8-bit RGB, the common currency between cairo fills and plotters styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(v: u32) -> Self {
        Rgb(
            ((v >> 16) & 0xff) as u8,
            ((v >> 8) & 0xff) as u8,
            (v & 0xff) as u8,
        )
    }

    pub fn to_cairo(self) -> (f64, f64, f64) {
        (
            self.0 as f64 / 255.0,
            self.1 as f64 / 255.0,
            self.2 as f64 / 255.0,
        )
    }

    pub fn to_plotters(self) -> RGBColor {
        RGBColor(self.0, self.1, self.2)
    }
}

/// Fill for countries with no recorded capacity.
pub const NO_CAPACITY: Rgb = Rgb::hex(0xd3d3d3);

/// Threshold ladder for the summary map, highest severity first.
/// A country gets the color of the first breakpoint its capacity exceeds.
pub const CAPACITY_LADDER: [(f64, Rgb); 4] = [
    (1000.0, Rgb::hex(0xbd0026)),
    (500.0, Rgb::hex(0xf03b20)),
    (100.0, Rgb::hex(0xfd8d3c)),
    (0.0, Rgb::hex(0xfecc5c)),
];

pub fn capacity_fill(capacity_mw: f64) -> Rgb {
    for &(threshold, color) in CAPACITY_LADDER.iter() {
        if capacity_mw > threshold {
            return color;
        }
    }
    NO_CAPACITY
}

/// Diverging fill for the growth map: white at zero, red saturating at
/// `max_positive`, blue saturating at `|max_negative|`. The falling channels
/// decrease linearly with the clamped intensity.
pub fn growth_fill(delta_mw: f64, max_positive: f64, max_negative: f64) -> Rgb {
    if delta_mw > 0.0 {
        let span = if max_positive > 0.0 { max_positive } else { 1.0 };
        let intensity = (delta_mw / span).min(1.0);
        let falling = (255.0 * (1.0 - intensity)).round() as u8;
        Rgb(255, falling, falling)
    } else if delta_mw < 0.0 {
        let span = if max_negative.abs() > 0.0 {
            max_negative.abs()
        } else {
            1.0
        };
        let intensity = (delta_mw.abs() / span).min(1.0);
        let falling = (255.0 * (1.0 - intensity)).round() as u8;
        Rgb(falling, falling, 255)
    } else {
        Rgb(255, 255, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder_rank(color: Rgb) -> usize {
        // 0 = no capacity, higher = more severe
        if color == NO_CAPACITY {
            return 0;
        }
        CAPACITY_LADDER
            .iter()
            .position(|&(_, c)| c == color)
            .map(|i| CAPACITY_LADDER.len() - i)
            .expect("color not in ladder")
    }

    #[test]
    fn test_ladder_examples() {
        assert_eq!(capacity_fill(1500.0), Rgb::hex(0xbd0026));
        assert_eq!(capacity_fill(750.0), Rgb::hex(0xf03b20));
        assert_eq!(capacity_fill(200.0), Rgb::hex(0xfd8d3c));
        assert_eq!(capacity_fill(50.0), Rgb::hex(0xfecc5c));
        assert_eq!(capacity_fill(0.0), Rgb::hex(0xd3d3d3));
    }

    #[test]
    fn test_ladder_monotonic() {
        let capacities = [0.0, 0.5, 1.0, 99.0, 100.0, 101.0, 500.0, 501.0, 999.0, 1001.0, 1e6];
        let mut previous = 0;
        for cap in capacities {
            let rank = ladder_rank(capacity_fill(cap));
            assert!(
                rank >= previous,
                "severity dropped at {} MW: {} < {}",
                cap,
                rank,
                previous
            );
            previous = rank;
        }
    }

    #[test]
    fn test_ladder_boundaries_exclusive() {
        // Breakpoints use strict "greater than"
        assert_eq!(capacity_fill(1000.0), Rgb::hex(0xf03b20));
        assert_eq!(capacity_fill(500.0), Rgb::hex(0xfd8d3c));
        assert_eq!(capacity_fill(100.0), Rgb::hex(0xfecc5c));
    }

    #[test]
    fn test_growth_anchor_points() {
        assert_eq!(growth_fill(0.0, 1000.0, -500.0), Rgb(255, 255, 255));
        assert_eq!(growth_fill(1000.0, 1000.0, -500.0), Rgb(255, 0, 0));
        assert_eq!(growth_fill(-500.0, 1000.0, -500.0), Rgb(0, 0, 255));
    }

    #[test]
    fn test_growth_clamps_past_scale() {
        assert_eq!(growth_fill(5000.0, 1000.0, -500.0), Rgb(255, 0, 0));
        assert_eq!(growth_fill(-9000.0, 1000.0, -500.0), Rgb(0, 0, 255));
    }

    #[test]
    fn test_growth_channels_monotonic() {
        let mut previous = 255u8;
        for delta in [1.0, 100.0, 250.0, 500.0, 750.0, 1000.0] {
            let Rgb(r, g, b) = growth_fill(delta, 1000.0, -500.0);
            assert_eq!(r, 255);
            assert_eq!(g, b);
            assert!(g <= previous, "green channel rose at delta {}", delta);
            previous = g;
        }
        let mut previous = 255u8;
        for delta in [-1.0, -50.0, -125.0, -250.0, -400.0, -500.0] {
            let Rgb(r, g, b) = growth_fill(delta, 1000.0, -500.0);
            assert_eq!(b, 255);
            assert_eq!(r, g);
            assert!(r <= previous, "red channel rose at delta {}", delta);
            previous = r;
        }
    }

    #[test]
    fn test_growth_zero_scale_does_not_divide() {
        // Degenerate config: scale of zero falls back to a span of 1
        assert_eq!(growth_fill(10.0, 0.0, 0.0), Rgb(255, 0, 0));
        assert_eq!(growth_fill(-10.0, 0.0, 0.0), Rgb(0, 0, 255));
    }
}
