// src/config.rs

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

// --- Growth color scale ---
// Saturation magnitudes for the diverging growth map, in MW.

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthScale {
  pub max_positive: f64,
  pub max_negative: f64,
}

impl Default for GrowthScale {
  fn default() -> Self {
    Self {
      max_positive: 1000.0,
      max_negative: -500.0,
    }
  }
}

// --- MapStyle ---

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapStyle {
  pub ocean_color: (f64, f64, f64),
  pub fill_opacity: f64,
  pub selected_fill_opacity: f64,
}

impl Default for MapStyle {
  fn default() -> Self {
    Self {
      ocean_color: (0.68, 0.85, 0.90),
      fill_opacity: 0.7,
      selected_fill_opacity: 0.9,
    }
  }
}

// --- Main Config Struct ---

fn default_boundaries_url() -> String {
  crate::io::boundaries::DEFAULT_BOUNDARIES_URL.to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
  /// Pre-aggregated (or raw) dataset. None falls back to data/processed_data.json.
  #[serde(default)]
  pub dataset_path: Option<PathBuf>,

  /// Local boundary file; skips both the cache and the network when set.
  #[serde(default)]
  pub boundaries_file: Option<PathBuf>,

  #[serde(default = "default_boundaries_url")]
  pub boundaries_url: String,

  #[serde(default)]
  pub growth_scale: GrowthScale,

  #[serde(default)]
  pub style: MapStyle,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      dataset_path: None,
      boundaries_file: None,
      boundaries_url: default_boundaries_url(),
      growth_scale: GrowthScale::default(),
      style: MapStyle::default(),
    }
  }
}

impl Config {
  /// Loads config from standard OS location (e.g., ~/.config/capview/settings.json)
  pub fn load() -> (Self, String) {
    let path = Self::get_path();
    if path.exists() {
      match File::open(&path) {
        Ok(file) => {
          let reader = BufReader::new(file);
          match serde_json::from_reader(reader) {
            Ok(cfg) => (cfg, format!("Config loaded from {:?}", path)),
            Err(e) => (Self::default(), format!("Error parsing config: {}", e)),
          }
        }
        Err(e) => (Self::default(), format!("Error opening config: {}", e)),
      }
    } else {
      (
        Self::default(),
        "No config found. Using defaults.".to_string(),
      )
    }
  }

  /// Saves config to standard OS location
  pub fn save(&self) -> String {
    let path = Self::get_path();
    if let Some(parent) = path.parent() {
      let _ = fs::create_dir_all(parent);
    }

    match File::create(&path) {
      Ok(file) => {
        let writer = BufWriter::new(file);
        match serde_json::to_writer_pretty(writer, self) {
          Ok(_) => format!("Config saved to {:?}", path),
          Err(e) => format!("Failed to save config: {}", e),
        }
      }
      Err(e) => format!("Could not create config file: {}", e),
    }
  }

  pub fn effective_dataset_path(&self) -> PathBuf {
    self
      .dataset_path
      .clone()
      .unwrap_or_else(|| PathBuf::from("data/processed_data.json"))
  }

  /// On-disk cache for the fetched boundary file.
  pub fn boundary_cache_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "mavensgroup", "capview") {
      proj.cache_dir().join("countries.geojson")
    } else {
      PathBuf::from("countries.geojson")
    }
  }

  fn get_path() -> PathBuf {
    // "org.mavensgroup.capview" should match the Application ID in main.rs
    if let Some(proj) = ProjectDirs::from("org", "mavensgroup", "capview") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}
