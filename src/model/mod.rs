//src/model/mod.rs
pub mod aggregate;
pub mod dataset;
pub mod fuels;
pub mod world;

// Re-exports for cleaner imports
pub use dataset::{CountryYear, Dataset, Plant, TOTAL_CAPACITY_KEY, TOTAL_FUEL_KEY};
pub use world::{CountryShape, WorldMap};
