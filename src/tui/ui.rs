use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::Controller;
use crate::tui::TuiState;
use crate::tui::component::{Component, Scene};
use crate::tui::components::Header;

const KEY_HINTS: &str = "Enter open · r replace · p replace previous · Esc back · q quit";

pub fn draw_ui(frame: &mut Frame, nav: &Controller, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [header_area, scene_area, footer_area] = layout.areas(frame.area());

    let mut header = Header::new(
        nav.title(Some(tui.title.as_str())).to_string(),
        nav.state().can_go_back(),
        tui.centre_text.clone(),
        nav.right_component(tui.right_component.as_ref()),
    );
    header.render(frame, header_area);

    tui.scene.render(frame, scene_area, nav.active());

    let footer = if tui.status_message.is_empty() {
        KEY_HINTS.to_string()
    } else {
        format!("{} | {}", tui.status_message, KEY_HINTS)
    };
    frame.render_widget(
        Span::styled(footer, Style::default().fg(Color::DarkGray)),
        footer_area,
    );
}
