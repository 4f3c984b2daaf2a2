use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Navigation (turned into core actions)
    Back, // Esc, Backspace, Left: the hardware back button
    Submit,
    InputChar(char),

    // TUI-local events
    Quit,
    CursorUp,
    CursorDown,
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).ok()? {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key_event) => {
            // Kitty protocol terminals also report releases
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            map_key(key_event.modifiers, key_event.code)
        }
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn map_key(modifiers: KeyModifiers, code: KeyCode) -> Option<TuiEvent> {
    // Chords like Ctrl+r are not typed characters
    let plain = modifiers.difference(KeyModifiers::SHIFT).is_empty();

    match (modifiers, code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
        (_, KeyCode::Char('q')) if plain => Some(TuiEvent::Quit),
        (_, KeyCode::Char(c)) if plain => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Esc) | (_, KeyCode::Backspace) | (_, KeyCode::Left) => Some(TuiEvent::Back),
        (_, KeyCode::Enter) | (_, KeyCode::Right) => Some(TuiEvent::Submit),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        _ => None,
    }
}
