//! treasury-tui - A terminal console for municipal treasury records
//!
//! Browses budget lines, disbursement vouchers, and collection receipts
//! with search, sorting, pagination, and per-record actions. It uses the
//! Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod table;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyModifiers};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

fn main() -> Result<()> {
    let log_path = match logging::init() {
        Ok(path) => Some(path),
        Err(e) => {
            eprintln!("Logging disabled: {:#}", e);
            None
        }
    };

    let config = Config::load().unwrap_or_else(|| {
        let config = Config::default();
        if let Err(e) = config.save() {
            log::warn!("could not write default config: {:#}", e);
        }
        config
    });

    // First argument overrides the configured data directory
    let data_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&config.data_dir));
    log::info!("treasury-tui starting, data dir {}", data_dir.display());

    let mut app = App::new(&config, data_dir)?;
    app.load_all();

    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        log::error!("exiting after error: {:#}", err);
        eprintln!("Error: {:?}", err);
        if let Some(path) = log_path {
            eprintln!("See {} for details", path.display());
        }
        std::process::exit(1);
    }

    log::info!("treasury-tui stopped");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        let mut draw_result = Ok(());
        tui.draw(|frame| {
            draw_result = app.draw(frame, frame.area());
        })?;
        draw_result?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key)
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    Some(Action::ForceQuit)
                }
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // An action may produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                log::trace!("dispatch {}", a);
                current_action = app.update(a)?;
            }
        } else {
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
