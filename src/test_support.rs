//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::action::{Action, transition};
use crate::core::route::{Route, RouteSeed};
use crate::core::state::StackState;

/// A fresh stack holding only the root route.
pub fn initial() -> StackState {
    transition(None, Action::Initial(RouteSeed::default()))
        .unwrap()
        .into_changed()
        .unwrap()
}

pub fn push_action(key: &str) -> Action {
    Action::Push(Route::new(key))
}

/// Apply an action that is expected to change the state.
pub fn apply(state: &StackState, action: Action) -> StackState {
    transition(Some(state), action)
        .unwrap()
        .into_changed()
        .expect("action should change the state")
}

/// Root plus one pushed route per key.
pub fn stack_of(keys: &[&str]) -> StackState {
    keys.iter()
        .fold(initial(), |state, key| apply(&state, push_action(key)))
}
