//! # Header Component
//!
//! Single-line bar above the active screen.
//!
//! ```text
//! ‹ Customers            Main store                 Online
//! └─ back marker + title └─ centre (middle half)    └─ right
//! ```
//!
//! ## Props
//!
//! - `title`: active route title, already resolved against the app title
//! - `can_go_back`: shows the `‹` marker when a route lies beneath this one
//! - `centre`: optional text centred over the middle half of the bar
//! - `right`: optional trailing text, already resolved against the route's
//!   own override
//!
//! The header doesn't care where these come from; `ui::draw_ui` asks the
//! controller for them each frame.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::Component;

const BACK_MARKER: &str = "‹ ";

pub struct Header {
    pub title: String,
    pub can_go_back: bool,
    pub centre: Option<String>,
    pub right: Option<String>,
}

impl Header {
    pub fn new(
        title: String,
        can_go_back: bool,
        centre: Option<String>,
        right: Option<String>,
    ) -> Self {
        Self {
            title,
            can_go_back,
            centre,
            right,
        }
    }

    fn left_text(&self) -> String {
        if self.can_go_back {
            format!("{BACK_MARKER}{}", self.title)
        } else {
            self.title.clone()
        }
    }
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min, Percentage};

        let right = self.right.as_deref().unwrap_or("");
        let right_width = (right.width() as u16).min(area.width);
        let [left_area, right_area] = Layout::horizontal([Min(0), Length(right_width)]).areas(area);

        // Centre first so the title wins where they overlap
        if let Some(centre) = &self.centre {
            let [_, middle, _] =
                Layout::horizontal([Percentage(25), Percentage(50), Percentage(25)]).areas(area);
            let text = truncate_to_width(centre, middle.width as usize);
            frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), middle);
        }

        let left = truncate_to_width(&self.left_text(), left_area.width as usize);
        frame.render_widget(
            Span::styled(left, Style::default().add_modifier(Modifier::BOLD)),
            left_area,
        );

        if !right.is_empty() {
            frame.render_widget(Span::raw(right), right_area);
        }
    }
}

/// Cut `s` to at most `max_width` terminal columns, ending in `…` if cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
