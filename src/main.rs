use gtk4::glib;
use gtk4::prelude::*;
use gtk4::Box as GtkBox;
use gtk4::{
    Application, ApplicationWindow, Frame, Label, Notebook, Orientation, Revealer,
    RevealerTransitionType, ScrolledWindow, TextView,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::TryRecvError;
use std::time::Duration;

pub mod config;
pub mod io;
pub mod menu;
pub mod model;
pub mod panels;
pub mod rendering;
pub mod state;
pub mod ui;
pub mod utils;

use io::loader::{self, LoadMessage};
use model::{Dataset, WorldMap};
use state::{AppState, LoadPhase, Tab};
use ui::tabs::{DistributionTab, GrowthTab, SummaryTab};

fn main() {
    let app = Application::builder()
        .application_id("org.mavensgroup.capview")
        .build();

    app.connect_activate(build_ui);
    app.run();
}

/// The fixed widget set the load/tab logic needs to reach. One instance,
/// shared via Rc by the menu actions and the loader poll.
struct Dashboard {
    notebook: Notebook,
    status: Label,
    summary: SummaryTab,
    distribution: DistributionTab,
    growth: GrowthTab,
}

impl Dashboard {
    fn activate_current(&self, state: &Rc<RefCell<AppState>>) {
        match Tab::from_page(self.notebook.current_page().unwrap_or(0)) {
            Tab::Summary => self.summary.activate(state),
            Tab::Distribution => self.distribution.activate(state),
            Tab::Growth => self.growth.activate(state),
        }
    }
}

fn build_ui(app: &Application) {
    let mut initial_state = AppState::new();
    let config_msg = initial_state.load_config();
    let state = Rc::new(RefCell::new(initial_state));

    let window = ApplicationWindow::builder()
        .application(app)
        .title("CapView - Global Power Capacity Dashboard")
        .default_width(1280)
        .default_height(860)
        .build();

    // 1. TOP LEVEL: Vertical Box (Menu, Tabs, Status, Console)
    let root_vbox = GtkBox::new(Orientation::Vertical, 0);
    window.set_child(Some(&root_vbox));

    // Console at the bottom; the logger writes here, F9 hides it
    let console_view = TextView::builder()
        .editable(false)
        .cursor_visible(false)
        .monospace(true)
        .left_margin(10)
        .right_margin(10)
        .top_margin(10)
        .bottom_margin(10)
        .build();
    let console_scroll = ScrolledWindow::builder()
        .min_content_height(120)
        .child(&console_view)
        .build();
    let console_frame = Frame::new(None);
    console_frame.set_child(Some(&console_scroll));
    let console_revealer = Revealer::builder()
        .transition_type(RevealerTransitionType::SlideUp)
        .child(&console_frame)
        .reveal_child(true)
        .build();

    if let Err(e) = utils::logger::init(&console_view) {
        eprintln!("Logger init failed: {}", e);
    }
    log::info!("{}", config_msg);

    // 2. The three views as notebook pages
    let notebook = Notebook::new();
    notebook.set_vexpand(true);
    let summary = SummaryTab::build(state.clone());
    let distribution = DistributionTab::build(state.clone());
    let growth = GrowthTab::build(state.clone());
    notebook.append_page(&summary.root, Some(&Label::new(Some(Tab::Summary.title()))));
    notebook.append_page(
        &distribution.root,
        Some(&Label::new(Some(Tab::Distribution.title()))),
    );
    notebook.append_page(&growth.root, Some(&Label::new(Some(Tab::Growth.title()))));

    // 3. Status line: loading / ready / failed
    let status = Label::new(Some("Loading dataset and boundaries..."));
    status.set_halign(gtk4::Align::Start);
    status.set_margin_start(10);
    status.set_margin_top(4);
    status.set_margin_bottom(4);

    let dashboard = Rc::new(Dashboard {
        notebook: notebook.clone(),
        status: status.clone(),
        summary,
        distribution,
        growth,
    });

    // 4. Tab Controller: every switch re-activates the target view
    {
        let state = state.clone();
        let dashboard = dashboard.clone();
        notebook.connect_switch_page(move |_, _, page| match Tab::from_page(page) {
            Tab::Summary => dashboard.summary.activate(&state),
            Tab::Distribution => dashboard.distribution.activate(&state),
            Tab::Growth => dashboard.growth.activate(&state),
        });
    }

    let reload: Rc<dyn Fn()> = {
        let state = state.clone();
        let dashboard = dashboard.clone();
        Rc::new(move || start_loading(state.clone(), dashboard.clone()))
    };

    // 5. Menu Bar
    let menu_bar = menu::build_menu_and_actions(
        app,
        &window,
        state.clone(),
        reload.clone(),
        &console_revealer,
    );

    // Assemble Root
    root_vbox.append(&menu_bar);
    root_vbox.append(&notebook);
    root_vbox.append(&status);
    root_vbox.append(&console_revealer);

    reload();
    window.present();
}

/// Kick off the two background loads and poll the channel until both halves
/// arrive. Runs again for File -> Reload and after config changes.
fn start_loading(state: Rc<RefCell<AppState>>, dashboard: Rc<Dashboard>) {
    {
        let mut st = state.borrow_mut();
        st.phase = LoadPhase::Loading;
        st.dataset = None;
        st.world = None;
    }
    dashboard.status.set_text("Loading dataset and boundaries...");
    dashboard.growth.reset_fuels();

    let request = {
        let st = state.borrow();
        loader::LoadRequest {
            dataset_path: st.config.effective_dataset_path(),
            boundaries_file: st.config.boundaries_file.clone(),
            boundaries_url: st.config.boundaries_url.clone(),
            cache_path: config::Config::boundary_cache_path(),
        }
    };
    let rx = loader::spawn(request);

    let mut dataset_slot: Option<Result<Dataset, String>> = None;
    let mut world_slot: Option<Result<WorldMap, String>> = None;

    glib::timeout_add_local(Duration::from_millis(100), move || {
        loop {
            match rx.try_recv() {
                Ok(LoadMessage::Dataset(result)) => dataset_slot = Some(result),
                Ok(LoadMessage::Boundaries(result)) => world_slot = Some(result),
                Err(TryRecvError::Empty) => return glib::ControlFlow::Continue,
                Err(TryRecvError::Disconnected) => break,
            }
            if dataset_slot.is_some() && world_slot.is_some() {
                break;
            }
        }

        finish_loading(&state, &dashboard, dataset_slot.take(), world_slot.take());
        glib::ControlFlow::Break
    });
}

fn finish_loading(
    state: &Rc<RefCell<AppState>>,
    dashboard: &Rc<Dashboard>,
    dataset: Option<Result<Dataset, String>>,
    world: Option<Result<WorldMap, String>>,
) {
    let dataset = dataset.unwrap_or_else(|| Err("dataset loader stopped unexpectedly".into()));
    let world = world.unwrap_or_else(|| Err("boundary loader stopped unexpectedly".into()));

    match (dataset, world) {
        (Ok(dataset), Ok(world)) => {
            let summary = format!(
                "Ready: {} countries, {} plants, {} - {}",
                dataset.country_summary.len(),
                dataset.plants_latest.len(),
                dataset.years.first().map(String::as_str).unwrap_or("?"),
                dataset.years.last().map(String::as_str).unwrap_or("?")
            );
            state.borrow_mut().install_data(dataset, world);
            log::info!("{}", summary);
            dashboard.status.set_text(&summary);
            dashboard.activate_current(state);
        }
        (dataset, world) => {
            let mut reasons = Vec::new();
            if let Err(e) = dataset {
                reasons.push(e);
            }
            if let Err(e) = world {
                reasons.push(e);
            }
            let reason = reasons.join("; ");
            log::error!("Data load failed: {}", reason);
            state.borrow_mut().phase = LoadPhase::Failed(reason.clone());
            dashboard
                .status
                .set_text(&format!("Load failed: {}", reason));
            dashboard.activate_current(state);
        }
    }
}
