// src/utils/logger.rs
//
// Routes the `log` facade into the console TextView at the bottom of the
// window. Log calls can come from the loader threads, so the record is
// formatted up front and the buffer append is bounced onto the main context.

use gtk4::prelude::*;
use gtk4::{glib, TextView};
use log::{Level, Metadata, Record, SetLoggerError};
use std::sync::OnceLock;

static LOG_VIEW: OnceLock<glib::SendWeakRef<TextView>> = OnceLock::new();
static LOGGER: ConsoleLogger = ConsoleLogger;

struct ConsoleLogger;

fn add_tag(view: &TextView, name: &str, color: &str, bold: bool) {
  let tag_table = view.buffer().tag_table();
  if tag_table.lookup(name).is_none() {
    let tag = gtk4::TextTag::new(Some(name));
    tag.set_property("foreground", color);
    if bold {
      tag.set_property("weight", 700);
    }
    tag_table.add(&tag);
  }
}

pub fn init(view: &TextView) -> Result<(), SetLoggerError> {
  add_tag(view, "error", "#cc3333", true);
  add_tag(view, "warn", "#b8860b", false);
  add_tag(view, "info", "#2a6db2", false);
  add_tag(view, "debug", "#888888", false);

  let _ = LOG_VIEW.set(view.downgrade().into());
  log::set_logger(&LOGGER).map(|()| log::set_max_level(log::LevelFilter::Debug))
}

impl log::Log for ConsoleLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= Level::Debug
  }

  fn log(&self, record: &Record) {
    if !self.enabled(record.metadata()) {
      return;
    }

    let tag_name = match record.level() {
      Level::Error => "error",
      Level::Warn => "warn",
      Level::Info => "info",
      Level::Debug | Level::Trace => "debug",
    };
    let msg = format!("[{:<5}] {}\n", record.level(), record.args());

    glib::MainContext::default().invoke(move || {
      if let Some(weak_ref) = LOG_VIEW.get() {
        if let Some(view) = weak_ref.upgrade() {
          let buffer = view.buffer();
          let mut end = buffer.end_iter();
          buffer.insert_with_tags_by_name(&mut end, &msg, &[tag_name]);

          // Keep the newest entry visible
          let mark = buffer.create_mark(None, &buffer.end_iter(), false);
          view.scroll_to_mark(&mark, 0.0, true, 0.0, 1.0);
          buffer.delete_mark(&mark);
        }
      }
    });
  }

  fn flush(&self) {}
}
