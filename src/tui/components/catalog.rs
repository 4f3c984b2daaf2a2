//! # Catalog Scene
//!
//! Renders screens described in the config file (`[[screens]]`): a body
//! paragraph plus a list of links to other screens.
//!
//! | Key        | Action                                   |
//! |------------|------------------------------------------|
//! | Enter / →  | push the selected link                   |
//! | r          | replace the current screen with it       |
//! | p          | replace the previous screen and pop to it |
//!
//! Back is not handled here; the event loop treats it as the hardware back
//! button for every scene.

use std::collections::HashSet;

use log::{debug, warn};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};

use crate::core::config::ScreenEntry;
use crate::core::{Action, ActiveRoute, BarOverride, ROOT_KEY, Route, RouteSeed, StackState};
use crate::tui::component::Scene;
use crate::tui::event::TuiEvent;

/// Screen definitions, looked up by route key.
#[derive(Debug, Clone)]
pub struct Catalog {
    screens: Vec<ScreenEntry>,
}

impl Catalog {
    /// Build a catalog, dropping repeated keys (first one wins). A root
    /// screen linking to everything is added if none is configured.
    pub fn new(entries: Vec<ScreenEntry>) -> Self {
        let mut seen = HashSet::new();
        let mut screens = Vec::with_capacity(entries.len());
        for entry in entries {
            if seen.insert(entry.key.clone()) {
                screens.push(entry);
            } else {
                warn!("Ignoring repeated screen key {:?}", entry.key);
            }
        }

        if !seen.contains(ROOT_KEY) {
            warn!("No screen with key \"root\", generating one");
            let links = screens.iter().map(|s| s.key.clone()).collect();
            screens.insert(
                0,
                ScreenEntry {
                    key: ROOT_KEY.to_string(),
                    title: None,
                    body: None,
                    right_text: None,
                    links,
                },
            );
        }

        for screen in &screens {
            for link in &screen.links {
                if !seen.contains(link) && link != ROOT_KEY {
                    warn!("Screen {:?} links to unknown screen {:?}", screen.key, link);
                }
            }
        }

        Self { screens }
    }

    pub fn get(&self, key: &str) -> Option<&ScreenEntry> {
        self.screens.iter().find(|s| s.key == key)
    }

    pub fn links(&self, key: &str) -> &[String] {
        self.get(key).map(|s| s.links.as_slice()).unwrap_or(&[])
    }

    /// Route for the screen `key`, remembering which screen opened it.
    pub fn route(&self, key: &str, opened_from: &str) -> Route {
        let seed = self.seed(key);
        let mut route = seed.into_route(key);
        route
            .props
            .insert("opened_from".to_string(), opened_from.into());
        route
    }

    /// Everything the root route carries.
    pub fn root_seed(&self) -> RouteSeed {
        self.seed(ROOT_KEY)
    }

    fn seed(&self, key: &str) -> RouteSeed {
        let Some(screen) = self.get(key) else {
            return RouteSeed::default();
        };
        RouteSeed {
            title: screen.title.clone(),
            right_component: screen.right_text.clone().map(|text| BarOverride::new(move || text.clone())),
            ..RouteSeed::default()
        }
    }
}

/// Scene showing catalog screens. Keeps the link selection between frames.
pub struct CatalogScene {
    catalog: Catalog,
    selected: usize,
    list_state: ListState,
    seen_generation: Option<u64>,
}

impl CatalogScene {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            selected: 0,
            list_state: ListState::default(),
            seen_generation: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn selected_link(&self, stack: &StackState) -> Option<&str> {
        self.catalog
            .links(&stack.active().key)
            .get(self.selected)
            .map(String::as_str)
    }

    fn link_route(&self, stack: &StackState) -> Option<Route> {
        let from = &stack.active().key;
        self.selected_link(stack)
            .map(|link| self.catalog.route(link, from))
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.list_state.select(Some(index));
    }

    /// A new view starts with its first link selected.
    fn sync_generation(&mut self, key: &str, generation: u64) {
        if self.seen_generation != Some(generation) {
            debug!("Fresh view of {key:?} (generation {generation})");
            self.seen_generation = Some(generation);
            self.select(0);
        }
    }
}

impl Scene for CatalogScene {
    fn render(&mut self, frame: &mut Frame, area: Rect, active: ActiveRoute<'_>) {
        self.sync_generation(&active.route.key, active.generation);

        let key = active.route.key.as_str();
        let body = self
            .catalog
            .get(key)
            .and_then(|s| s.body.as_deref())
            .unwrap_or("");
        let links = self.catalog.links(key);

        let body_height = if body.is_empty() { 0 } else { 3 };
        let [body_area, links_area] =
            Layout::vertical([Constraint::Length(body_height), Constraint::Min(0)]).areas(area);

        frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: true }), body_area);

        let items: Vec<ListItem> = links
            .iter()
            .map(|link| {
                let label = self
                    .catalog
                    .get(link)
                    .and_then(|s| s.title.as_deref())
                    .unwrap_or(link);
                ListItem::new(Line::from(label.to_string()))
            })
            .collect();

        let list = List::new(items)
            .block(Block::bordered().title(" Open "))
            .highlight_style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            );
        frame.render_stateful_widget(list, links_area, &mut self.list_state);
    }

    fn handle_event(
        &mut self,
        event: &TuiEvent,
        stack: &StackState,
        generation: u64,
    ) -> Option<Action> {
        self.sync_generation(&stack.active().key, generation);
        let link_count = self.catalog.links(&stack.active().key).len();

        match event {
            TuiEvent::CursorUp => {
                if link_count > 0 {
                    self.select(self.selected.saturating_sub(1));
                }
                None
            }
            TuiEvent::CursorDown => {
                if link_count > 0 {
                    self.select((self.selected + 1).min(link_count - 1));
                }
                None
            }
            TuiEvent::Submit => self.link_route(stack).map(Action::Push),
            TuiEvent::InputChar('r') => self.link_route(stack).map(Action::Replace),
            // Only offered when a previous screen exists
            TuiEvent::InputChar('p') if stack.can_go_back() => {
                self.link_route(stack).map(Action::ReplacePreviousAndPop)
            }
            _ => None,
        }
    }
}
