//! # Controller
//!
//! Owns the current `StackState` and is its only writer. Every event
//! (key press, hardware back, a screen asking to navigate) arrives here as
//! an `Action`, goes through `transition()`, and the result replaces the
//! stored state wholesale.
//!
//! ## Render generation
//!
//! Renderers that diff by value would not notice when a route identical to
//! an earlier top route becomes top again. The controller counts changed
//! transitions and hands the count out with the active route as
//! `ActiveRoute`; two views are equal only if the generation matches too.
//! The generation is never written into `StackState`.

use log::{debug, warn};

use crate::core::action::{
    Action, ActionError, RawAction, Transition, TransitionError, initial, transition,
};
use crate::core::route::{BarOverride, Route, RouteSeed};
use crate::core::state::StackState;

/// The active route as handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveRoute<'a> {
    pub route: &'a Route,
    pub generation: u64,
}

#[derive(Debug)]
pub struct Controller {
    state: StackState,
    generation: u64,
}

impl Controller {
    /// Start from the `initial` transition with `seed` as the root route.
    pub fn new(seed: RouteSeed) -> Self {
        let state = initial(seed);
        debug!("initial -> root {:?}", state.active().title);
        Self {
            state,
            generation: 0,
        }
    }

    /// Apply an action. Returns true if the stack changed.
    ///
    /// Rejected actions are logged and leave the state as it was.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let kind = action.kind();
        match self.try_dispatch(action) {
            Ok(changed) => changed,
            Err(e) => {
                warn!("Rejected {kind} action: {e}");
                false
            }
        }
    }

    /// Like `dispatch`, but hands precondition errors back to the caller.
    pub fn try_dispatch(&mut self, action: Action) -> Result<bool, TransitionError> {
        let kind = action.kind();
        let key = action.key().map(str::to_owned);

        match transition(Some(&self.state), action)? {
            Transition::Changed(next) => {
                self.state = next;
                self.generation += 1;
                debug!(
                    "{kind} {:?} -> depth {}, active {:?}, generation {}",
                    key,
                    self.state.len(),
                    self.state.active().key,
                    self.generation
                );
                Ok(true)
            }
            Transition::Unchanged => {
                debug!("{kind} {:?} left the stack unchanged", key);
                Ok(false)
            }
        }
    }

    /// Parse and apply a loosely typed action.
    pub fn dispatch_raw(&mut self, raw: RawAction) -> Result<bool, ActionError> {
        let action = Action::try_from(raw)?;
        Ok(self.dispatch(action))
    }

    /// Hardware back button.
    pub fn back(&mut self) -> bool {
        self.dispatch(Action::Pop)
    }

    pub fn state(&self) -> &StackState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn active(&self) -> ActiveRoute<'_> {
        ActiveRoute {
            route: self.state.active(),
            generation: self.generation,
        }
    }

    /// Header title: the active route's title, then `fallback`, then empty.
    pub fn title<'a>(&'a self, fallback: Option<&'a str>) -> &'a str {
        self.state
            .active()
            .title
            .as_deref()
            .or(fallback)
            .unwrap_or("")
    }

    /// Trailing bar text. A route's own override wins over `fallback`.
    pub fn right_component(&self, fallback: Option<&BarOverride>) -> Option<String> {
        self.state
            .active()
            .right_component
            .as_ref()
            .or(fallback)
            .map(BarOverride::render)
    }
}
