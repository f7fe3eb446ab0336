// src/menu/mod.rs

use crate::config::Config;
use crate::state::AppState;
use gtk4::gio;
use gtk4::prelude::*;
use gtk4::{
  Application, ApplicationWindow, FileChooserAction, FileChooserDialog, PopoverMenuBar, Revealer,
  ResponseType,
};
use std::cell::RefCell;
use std::rc::Rc;

pub fn build_menu_and_actions(
  app: &Application,
  window: &ApplicationWindow,
  state: Rc<RefCell<AppState>>,
  reload: Rc<dyn Fn()>,
  console_revealer: &Revealer,
) -> PopoverMenuBar {
  // Register Actions

  // Open Dataset: pick a processed (or raw) JSON, remember it, reload
  let open_action = gio::SimpleAction::new("open_dataset", None);
  {
    let window = window.clone();
    let state = state.clone();
    let reload = reload.clone();
    open_action.connect_activate(move |_, _| {
      let dialog = FileChooserDialog::new(
        Some("Open Capacity Dataset"),
        Some(&window),
        FileChooserAction::Open,
        &[
          ("Cancel", ResponseType::Cancel),
          ("Open", ResponseType::Accept),
        ],
      );

      let state = state.clone();
      let reload = reload.clone();
      dialog.connect_response(move |d, response| {
        if response == ResponseType::Accept {
          if let Some(path) = d.file().and_then(|f| f.path()) {
            {
              let mut st = state.borrow_mut();
              st.config.dataset_path = Some(path);
              let msg = st.config.save();
              log::info!("{}", msg);
            }
            reload();
          }
        }
        d.destroy();
      });

      dialog.present();
    });
  }
  app.add_action(&open_action);

  // Reload both resources with the current config
  let reload_action = gio::SimpleAction::new("reload", None);
  {
    let reload = reload.clone();
    reload_action.connect_activate(move |_, _| reload());
  }
  app.add_action(&reload_action);

  // Drop the boundary cache and fetch fresh
  let refetch_action = gio::SimpleAction::new("refetch_boundaries", None);
  {
    let reload = reload.clone();
    refetch_action.connect_activate(move |_, _| {
      let cache = Config::boundary_cache_path();
      if cache.exists() {
        match std::fs::remove_file(&cache) {
          Ok(()) => log::info!("Boundary cache removed"),
          Err(e) => log::warn!("Could not remove boundary cache: {}", e),
        }
      }
      reload();
    });
  }
  app.add_action(&refetch_action);

  // Toggle the console at the bottom
  let toggle_action = gio::SimpleAction::new("toggle_console", None);
  let rev_weak = console_revealer.downgrade();
  toggle_action.connect_activate(move |_, _| {
    if let Some(rev) = rev_weak.upgrade() {
      rev.set_reveal_child(!rev.reveals_child());
    }
  });
  app.add_action(&toggle_action);

  let about_action = gio::SimpleAction::new("about", None);
  {
    let window = window.clone();
    about_action.connect_activate(move |_, _| {
      let dialog = gtk4::AboutDialog::builder()
        .transient_for(&window)
        .program_name("CapView")
        .version(env!("CARGO_PKG_VERSION"))
        .comments("Global power capacity dashboard: summary, plant distribution and growth views.")
        .build();
      dialog.present();
    });
  }
  app.add_action(&about_action);

  let quit_action = gio::SimpleAction::new("quit", None);
  {
    let app = app.clone();
    quit_action.connect_activate(move |_, _| app.quit());
  }
  app.add_action(&quit_action);

  // Keyboard Shortcuts
  app.set_accels_for_action("app.open_dataset", &["<Primary>o"]);
  app.set_accels_for_action("app.reload", &["<Primary>r"]);
  app.set_accels_for_action("app.toggle_console", &["F9"]);
  app.set_accels_for_action("app.quit", &["<Primary>q"]);

  // --- MENU MODEL ---
  let root_model = gio::Menu::new();

  let file_menu = gio::Menu::new();
  file_menu.append(Some("Open Dataset..."), Some("app.open_dataset"));
  file_menu.append(Some("Reload Data"), Some("app.reload"));
  file_menu.append(Some("Refetch Boundaries"), Some("app.refetch_boundaries"));
  file_menu.append(Some("Quit"), Some("app.quit"));
  root_model.append_submenu(Some("File"), &file_menu);

  let view_menu = gio::Menu::new();
  view_menu.append(Some("Toggle Console"), Some("app.toggle_console"));
  root_model.append_submenu(Some("View"), &view_menu);

  let help_menu = gio::Menu::new();
  help_menu.append(Some("About CapView"), Some("app.about"));
  root_model.append_submenu(Some("Help"), &help_menu);

  PopoverMenuBar::from_model(Some(&root_model))
}
