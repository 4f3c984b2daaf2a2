//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the header and
//! the active screen, and translates keyboard events into core `Action`s.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event flow
//!
//! ```text
//! key press → TuiEvent → Scene::handle_event → Action ─┐
//! Esc/Backspace (hardware back) → Action::Pop ─────────┤
//!                                                      ▼
//!                                   Controller::dispatch → redraw
//! ```
//!
//! The loop only redraws after an event; navigation never animates.

mod component;
pub mod components;
pub mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;

use crate::core::config::ResolvedConfig;
use crate::core::{BarOverride, Controller};
use crate::tui::components::{Catalog, CatalogScene};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

pub use component::{Component, Scene};

/// TUI-specific presentation state (not part of core navigation logic)
pub struct TuiState {
    pub scene: CatalogScene,
    /// Header title for routes without one
    pub title: String,
    pub centre_text: Option<String>,
    /// App-level trailing bar; a route's own override wins
    pub right_component: Option<BarOverride>,
    pub status_message: String,
}

impl TuiState {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            scene: CatalogScene::new(Catalog::new(config.screens.clone())),
            title: config.title.clone(),
            centre_text: config.centre_text.clone(),
            right_component: config
                .right_text
                .clone()
                .map(|text| BarOverride::new(move || text.clone())),
            status_message: String::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), Hide)?;
        info!("Terminal modes enabled (cursor hidden)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// What the loop should do after one event.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Route one event to the controller or the scene.
fn handle_event(event: TuiEvent, nav: &mut Controller, tui: &mut TuiState) -> Flow {
    match event {
        TuiEvent::Quit => return Flow::Quit,
        TuiEvent::Resize => {}
        TuiEvent::Back => {
            tui.status_message = if nav.back() {
                String::new()
            } else {
                "Already at the first screen".to_string()
            };
        }
        other => {
            let action = tui
                .scene
                .handle_event(&other, nav.state(), nav.generation());
            if let Some(action) = action {
                let kind = action.kind();
                tui.status_message = match nav.try_dispatch(action) {
                    Ok(true) => String::new(),
                    Ok(false) => format!("{kind}: screen already open"),
                    Err(e) => e.to_string(),
                };
            }
        }
    }
    Flow::Continue
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut tui = TuiState::new(&config);
    let mut nav = Controller::new(tui.scene.catalog().root_seed());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    'outer: loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &nav, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain everything pending so actions apply in arrival order
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            debug!("Event loop received: {:?}", event);
            if handle_event(event, &mut nav, &mut tui) == Flow::Quit {
                break 'outer;
            }
        }
    }

    info!(
        "Leaving with {} screen(s) open, active {:?}",
        nav.state().len(),
        nav.state().active().key
    );
    ratatui::restore();
    Ok(())
}
