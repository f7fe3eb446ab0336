// src/model/fuels.rs

use crate::rendering::colors::Rgb;

/// Fixed palette keyed by the upstream dataset's fuel labels. Anything not
/// listed renders with the Unknown color.
pub const FUEL_COLORS: [(&str, Rgb); 10] = [
    ("Solar", Rgb::hex(0xf9d71c)),
    ("Wind", Rgb::hex(0xadd8e6)),
    ("Hydro", Rgb::hex(0x4682b4)),
    ("Gas", Rgb::hex(0xffa500)),
    ("Coal", Rgb::hex(0x808080)),
    ("Nuclear", Rgb::hex(0xff69b4)),
    ("Oil", Rgb::hex(0xa52a2a)),
    ("Biomass", Rgb::hex(0x228b22)),
    ("Geothermal", Rgb::hex(0xdc143c)),
    ("Unknown", Rgb::hex(0xd3d3d3)),
];

pub const UNKNOWN_FUEL_COLOR: Rgb = Rgb::hex(0xd3d3d3);

pub fn fuel_color(fuel: &str) -> Rgb {
    FUEL_COLORS
        .iter()
        .find(|(name, _)| *name == fuel)
        .map(|(_, color)| *color)
        .unwrap_or(UNKNOWN_FUEL_COLOR)
}

/// Fuels counted as green. Nuclear is green but not renewable.
pub const GREEN_FUELS: [&str; 6] = ["Solar", "Wind", "Hydro", "Nuclear", "Geothermal", "Biomass"];

pub const RENEWABLE_FUELS: [&str; 5] = ["Solar", "Wind", "Hydro", "Geothermal", "Biomass"];

pub fn is_green(fuel: &str) -> bool {
    GREEN_FUELS.contains(&fuel)
}

pub fn is_renewable(fuel: &str) -> bool {
    RENEWABLE_FUELS.contains(&fuel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_fuel_color() {
        assert_eq!(fuel_color("Solar"), Rgb::hex(0xf9d71c));
        assert_eq!(fuel_color("Coal"), Rgb::hex(0x808080));
    }

    #[test]
    fn test_unknown_fuel_falls_back() {
        assert_eq!(fuel_color("Antimatter"), UNKNOWN_FUEL_COLOR);
        assert_eq!(fuel_color(""), UNKNOWN_FUEL_COLOR);
    }

    #[test]
    fn test_nuclear_green_not_renewable() {
        assert!(is_green("Nuclear"));
        assert!(!is_renewable("Nuclear"));
        assert!(is_renewable("Wind"));
        assert!(!is_green("Coal"));
    }
}
