// src/panels/mod.rs
pub mod country_info;

pub use country_info::CountryInfoPanel;
