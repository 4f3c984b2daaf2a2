use ratatui::Frame;
use ratatui::layout::Rect;

use crate::core::{Action, ActiveRoute, StackState};

/// A reusable UI component.
///
/// Components in this architecture follow the React pattern:
/// - They receive data via props (struct fields).
/// - They render to a `Frame` within a given `Rect`.
///
/// The `render` method takes `&mut self` so components can keep caches or
/// presentation state between frames.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// The body of whatever screen is on top of the stack.
///
/// A scene never touches the stack directly. It asks for a transition by
/// returning an `Action` from `handle_event`, which the event loop
/// dispatches to the controller.
pub trait Scene {
    /// Render the active route's body.
    ///
    /// `active.generation` changes whenever a different route view becomes
    /// active, even when the route itself compares equal to an older one.
    fn render(&mut self, frame: &mut Frame, area: Rect, active: ActiveRoute<'_>);

    /// Handle a low-level `TuiEvent` and optionally request a transition.
    ///
    /// Events can arrive in a batch with no render in between, so
    /// `generation` is passed here as well as to `render`.
    fn handle_event(
        &mut self,
        event: &super::event::TuiEvent,
        stack: &StackState,
        generation: u64,
    ) -> Option<Action>;
}
