// src/state.rs

use crate::config::Config;
use crate::model::{Dataset, WorldMap, TOTAL_FUEL_KEY};
use crate::rendering::projection::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Summary,
    Distribution,
    Growth,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Summary, Tab::Distribution, Tab::Growth];

    /// Notebook page index -> tab. Pages are appended in ALL order.
    pub fn from_page(page: u32) -> Tab {
        match page {
            0 => Tab::Summary,
            1 => Tab::Distribution,
            _ => Tab::Growth,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Summary => "Summary",
            Tab::Distribution => "Plant Distribution",
            Tab::Growth => "Power Growth",
        }
    }
}

/// Explicit startup state, shown in the status line. The dashboard used to
/// hang silently on a failed fetch; now it lands in Failed with a reason.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Failed(String),
}

/// Everything one map tab owns: its camera, its highlighted country, and
/// whether its widgets have been populated for the current dataset.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub viewport: Viewport,
    pub selected: Option<String>,
    pub initialized: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::default(),
            selected: None,
            initialized: false,
        }
    }

    /// Replace the selection, returning the previously highlighted country so
    /// the caller can refresh whatever displayed it. At most one country is
    /// ever highlighted per tab.
    pub fn select(&mut self, country: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.selected, country)
    }
}

pub struct AppState {
    pub dataset: Option<Dataset>,
    pub world: Option<WorldMap>,
    pub phase: LoadPhase,
    pub active_tab: Tab,
    pub summary: ViewState,
    pub distribution: ViewState,
    pub growth: ViewState,
    /// Fuel key driving the growth map ("_total" or a fuel name).
    pub growth_fuel: String,
    pub config: Config,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            dataset: None,
            world: None,
            phase: LoadPhase::Loading,
            active_tab: Tab::Summary,
            summary: ViewState::new(),
            distribution: ViewState::new(),
            growth: ViewState::new(),
            growth_fuel: TOTAL_FUEL_KEY.to_string(),
            config: Config::default(),
        }
    }

    pub fn load_config(&mut self) -> String {
        let (config, message) = Config::load();
        self.config = config;
        message
    }

    pub fn view(&self, tab: Tab) -> &ViewState {
        match tab {
            Tab::Summary => &self.summary,
            Tab::Distribution => &self.distribution,
            Tab::Growth => &self.growth,
        }
    }

    pub fn view_mut(&mut self, tab: Tab) -> &mut ViewState {
        match tab {
            Tab::Summary => &mut self.summary,
            Tab::Distribution => &mut self.distribution,
            Tab::Growth => &mut self.growth,
        }
    }

    pub fn ready(&self) -> bool {
        self.dataset.is_some() && self.world.is_some()
    }

    /// Adopt a freshly loaded dataset + boundary set. Per-tab state is reset
    /// so every view rebuilds against the new data on its next activation.
    pub fn install_data(&mut self, dataset: Dataset, world: WorldMap) {
        let unmatched = dataset
            .country_summary
            .keys()
            .filter(|name| world.find(name).is_none())
            .count();
        if unmatched > 0 {
            // The name join is exact-match; mismatches stay visible in the log
            // instead of silently rendering as empty countries.
            log::warn!(
                "{} dataset countries have no boundary match and will not be clickable",
                unmatched
            );
        }

        for tab in Tab::ALL {
            let view = self.view_mut(tab);
            view.initialized = false;
            view.selected = None;
        }
        self.growth_fuel = TOTAL_FUEL_KEY.to_string();
        self.dataset = Some(dataset);
        self.world = Some(world);
        self.phase = LoadPhase::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_returns_previous() {
        let mut view = ViewState::new();
        assert_eq!(view.select(Some("France".to_string())), None);
        assert_eq!(
            view.select(Some("Chile".to_string())),
            Some("France".to_string())
        );
        assert_eq!(view.select(None), Some("Chile".to_string()));
        assert_eq!(view.selected, None);
    }

    #[test]
    fn test_tab_page_mapping() {
        assert_eq!(Tab::from_page(0), Tab::Summary);
        assert_eq!(Tab::from_page(1), Tab::Distribution);
        assert_eq!(Tab::from_page(2), Tab::Growth);
        for (i, tab) in Tab::ALL.iter().enumerate() {
            assert_eq!(Tab::from_page(i as u32), *tab);
        }
    }

    #[test]
    fn test_install_data_resets_views() {
        let mut state = AppState::new();
        state.distribution.select(Some("Peru".to_string()));
        state.distribution.initialized = true;
        state.growth_fuel = "Solar".to_string();

        state.install_data(Dataset::default(), WorldMap::default());

        assert_eq!(state.phase, LoadPhase::Ready);
        assert!(state.ready());
        assert_eq!(state.distribution.selected, None);
        assert!(!state.distribution.initialized);
        assert_eq!(state.growth_fuel, TOTAL_FUEL_KEY);
    }
}
