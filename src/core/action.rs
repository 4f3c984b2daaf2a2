//! # Actions
//!
//! Everything that can happen to the stack becomes an `Action`.
//! User opens a screen? That's `Action::Push(route)`.
//! Hardware back button? That's `Action::Pop`.
//!
//! `transition()` takes the current state and an action, then returns the
//! outcome. No side effects here; the controller decides what to do with it.
//!
//! ```text
//! StackState + Action  →  transition()  →  Unchanged | Changed(StackState)
//! ```
//!
//! Two cases are deliberate no-ops rather than errors:
//! pushing a key that is already on the stack (double taps), and popping
//! at the root. Only misuse that cannot be given a meaning is an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::core::route::{Props, Route, RouteSeed};
use crate::core::state::{ROOT_KEY, StackState};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Build a fresh single-route stack. Ignores any current state.
    Initial(RouteSeed),
    Push(Route),
    /// Also the hardware back button.
    Pop,
    /// Swap the active route without growing the stack.
    Replace(Route),
    /// Swap the route below the active one, then pop to it.
    ReplacePreviousAndPop(Route),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Initial,
    Push,
    Pop,
    Replace,
    ReplacePreviousAndPop,
}

impl ActionKind {
    /// Maps a type tag to its kind. Missing or unknown tags are pushes.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("initial") => ActionKind::Initial,
            Some("pop") | Some("back") => ActionKind::Pop,
            Some("replace") => ActionKind::Replace,
            Some("replacePreviousAndPop") => ActionKind::ReplacePreviousAndPop,
            _ => ActionKind::Push,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Initial => "initial",
            ActionKind::Push => "push",
            ActionKind::Pop => "pop",
            ActionKind::Replace => "replace",
            ActionKind::ReplacePreviousAndPop => "replacePreviousAndPop",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Initial(_) => ActionKind::Initial,
            Action::Push(_) => ActionKind::Push,
            Action::Pop => ActionKind::Pop,
            Action::Replace(_) => ActionKind::Replace,
            Action::ReplacePreviousAndPop(_) => ActionKind::ReplacePreviousAndPop,
        }
    }

    /// Key of the route this action introduces, if it introduces one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Action::Push(route)
            | Action::Replace(route)
            | Action::ReplacePreviousAndPop(route) => Some(route.key.as_str()),
            Action::Initial(_) => Some(ROOT_KEY),
            Action::Pop => None,
        }
    }
}

// ============================================================================
// Raw (tagged) form
// ============================================================================

/// Loosely typed action as it arrives from config files or scripts:
/// `{ "type": "push", "key": "orders", "title": "Orders", ...extra }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(flatten)]
    pub extra: Props,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ActionError {
    MissingKey(ActionKind),
    InvalidField { name: String, expected: &'static str },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::MissingKey(kind) => write!(f, "{kind} action needs a key"),
            ActionError::InvalidField { name, expected } => {
                write!(f, "field `{name}` must be {expected}")
            }
        }
    }
}

impl std::error::Error for ActionError {}

impl TryFrom<RawAction> for Action {
    type Error = ActionError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        let kind = ActionKind::from_tag(raw.kind.as_deref());
        let mut seed = RouteSeed {
            props: raw.extra,
            ..RouteSeed::default()
        };
        seed.title = match seed.props.remove("title") {
            None | Some(Value::Null) => None,
            Some(Value::String(title)) => Some(title),
            Some(_) => {
                return Err(ActionError::InvalidField {
                    name: "title".to_string(),
                    expected: "a string",
                });
            }
        };

        let route = |key: Option<String>, seed: RouteSeed| {
            key.map(|k| seed.into_route(k))
                .ok_or(ActionError::MissingKey(kind))
        };

        Ok(match kind {
            ActionKind::Initial => Action::Initial(seed),
            ActionKind::Pop => Action::Pop,
            ActionKind::Push => Action::Push(route(raw.key, seed)?),
            ActionKind::Replace => Action::Replace(route(raw.key, seed)?),
            ActionKind::ReplacePreviousAndPop => {
                Action::ReplacePreviousAndPop(route(raw.key, seed)?)
            }
        })
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Result of applying an action to a state.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The action was a no-op; keep the current state.
    Unchanged,
    Changed(StackState),
}

impl Transition {
    pub fn is_changed(&self) -> bool {
        matches!(self, Transition::Changed(_))
    }

    pub fn into_changed(self) -> Option<StackState> {
        match self {
            Transition::Changed(state) => Some(state),
            Transition::Unchanged => None,
        }
    }
}

/// Preconditions an action can violate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// `replacePreviousAndPop` at the root: there is no previous route.
    NoPreviousRoute,
    /// Anything but `initial` with no current state.
    Uninitialized(ActionKind),
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::NoPreviousRoute => {
                write!(f, "replacePreviousAndPop needs a route below the active one")
            }
            TransitionError::Uninitialized(kind) => {
                write!(f, "{kind} action applied before the stack was initialized")
            }
        }
    }
}

impl std::error::Error for TransitionError {}

/// Compute the next stack state.
///
/// Never edits `current`. A returned `Transition::Unchanged` means the
/// caller should keep what it has.
pub fn transition(
    current: Option<&StackState>,
    action: Action,
) -> Result<Transition, TransitionError> {
    let kind = action.kind();

    match action {
        Action::Initial(seed) => Ok(Transition::Changed(initial(seed))),
        Action::Push(route) => Ok(push(require(current, kind)?, route)),
        Action::Pop => Ok(pop(require(current, kind)?)),
        Action::Replace(route) => Ok(replace(require(current, kind)?, route)),
        Action::ReplacePreviousAndPop(route) => {
            replace_previous_and_pop(require(current, kind)?, route)
        }
    }
}

/// The state `initial` produces. Cannot fail and never depends on a
/// current state, so the controller starts from it directly.
pub(crate) fn initial(seed: RouteSeed) -> StackState {
    StackState::root(seed.into_route(ROOT_KEY))
}

fn require(
    current: Option<&StackState>,
    kind: ActionKind,
) -> Result<&StackState, TransitionError> {
    current.ok_or(TransitionError::Uninitialized(kind))
}

fn push(state: &StackState, route: Route) -> Transition {
    // Two pushes of the same screen happen when a trigger is double tapped
    if state.contains(&route.key) {
        return Transition::Unchanged;
    }
    let mut routes = state.routes().to_vec();
    routes.push(route);
    Transition::Changed(state.with_routes(routes))
}

fn pop(state: &StackState) -> Transition {
    if !state.can_go_back() {
        return Transition::Unchanged;
    }
    let routes = state.routes()[..state.index()].to_vec();
    Transition::Changed(state.with_routes(routes))
}

fn replace(state: &StackState, route: Route) -> Transition {
    let index = state.index();
    if key_taken(&state.routes()[..index], &route.key) {
        return Transition::Unchanged;
    }
    let mut routes = state.routes().to_vec();
    routes[index] = route;
    Transition::Changed(state.with_routes(routes))
}

fn replace_previous_and_pop(
    state: &StackState,
    route: Route,
) -> Result<Transition, TransitionError> {
    let Some(previous) = state.index().checked_sub(1) else {
        return Err(TransitionError::NoPreviousRoute);
    };
    if key_taken(&state.routes()[..previous], &route.key) {
        return Ok(Transition::Unchanged);
    }
    let mut routes = state.routes()[..=previous].to_vec();
    routes[previous] = route;
    Ok(Transition::Changed(state.with_routes(routes)))
}

/// True if a route that survives the transition already uses `key`.
fn key_taken(survivors: &[Route], key: &str) -> bool {
    survivors.iter().any(|r| r.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{apply, initial, push_action, stack_of};
    use serde_json::json;

    fn keys(state: &StackState) -> Vec<&str> {
        state.keys().collect()
    }

    #[test]
    fn test_initial_produces_singleton_root() {
        let state = initial();
        assert_eq!(state.index(), 0);
        assert_eq!(state.key(), "root");
        assert_eq!(keys(&state), vec!["root"]);
    }

    #[test]
    fn test_initial_ignores_current_state() {
        let deep = stack_of(&["a", "b"]);
        let seed = RouteSeed::default().with_title("Home");
        let next = transition(Some(&deep), Action::Initial(seed))
            .unwrap()
            .into_changed()
            .unwrap();
        assert_eq!(keys(&next), vec!["root"]);
        assert_eq!(next.active().title.as_deref(), Some("Home"));
    }

    #[test]
    fn test_push_appends_and_activates() {
        let state = stack_of(&["a"]);
        let next = apply(&state, push_action("b"));
        assert_eq!(next.len(), state.len() + 1);
        assert_eq!(next.index(), state.index() + 1);
        assert_eq!(next.active().key, "b");
        // The old top is still beneath the new one
        assert_eq!(next.routes()[1], state.routes()[1]);
    }

    #[test]
    fn test_duplicate_push_is_unchanged() {
        let state = stack_of(&["a", "b"]);
        for key in ["root", "a", "b"] {
            let outcome = transition(Some(&state), push_action(key)).unwrap();
            assert_eq!(outcome, Transition::Unchanged, "push of {key}");
        }
    }

    #[test]
    fn test_pop_at_root_is_unchanged() {
        let state = initial();
        let outcome = transition(Some(&state), Action::Pop).unwrap();
        assert_eq!(outcome, Transition::Unchanged);
    }

    #[test]
    fn test_push_then_pop_restores_depth() {
        let state = stack_of(&["a"]);
        let pushed = apply(&state, push_action("b"));
        let popped = apply(&pushed, Action::Pop);
        assert_eq!(popped.len(), state.len());
        assert_eq!(popped.index(), state.index());
        assert_eq!(popped.active().key, "a");
    }

    #[test]
    fn test_replace_keeps_depth_and_index() {
        let state = stack_of(&["a", "b"]);
        let next = apply(&state, Action::Replace(Route::new("c")));
        assert_eq!(next.len(), state.len());
        assert_eq!(next.index(), state.index());
        assert_eq!(keys(&next), vec!["root", "a", "c"]);
    }

    #[test]
    fn test_replace_at_root() {
        let next = apply(&initial(), Action::Replace(Route::new("home")));
        assert_eq!(keys(&next), vec!["home"]);
        assert_eq!(next.index(), 0);
    }

    #[test]
    fn test_replace_with_own_key_refreshes_route() {
        let state = stack_of(&["a"]);
        let fresh = Route::new("a").with_prop("page", 2);
        let next = apply(&state, Action::Replace(fresh.clone()));
        assert_eq!(next.active(), &fresh);
    }

    #[test]
    fn test_replace_with_key_lower_in_stack_is_unchanged() {
        let state = stack_of(&["a", "b"]);
        let outcome = transition(Some(&state), Action::Replace(Route::new("a"))).unwrap();
        assert_eq!(outcome, Transition::Unchanged);
    }

    #[test]
    fn test_replace_previous_and_pop() {
        let state = stack_of(&["a", "b"]);
        let next = apply(&state, Action::ReplacePreviousAndPop(Route::new("x")));
        assert_eq!(keys(&next), vec!["root", "x"]);
        assert_eq!(next.index(), 1);
    }

    #[test]
    fn test_replace_previous_may_reuse_popped_key() {
        let state = stack_of(&["a", "b"]);
        let next = apply(&state, Action::ReplacePreviousAndPop(Route::new("b")));
        assert_eq!(keys(&next), vec!["root", "b"]);
    }

    #[test]
    fn test_replace_previous_with_surviving_key_is_unchanged() {
        let state = stack_of(&["a", "b"]);
        let outcome =
            transition(Some(&state), Action::ReplacePreviousAndPop(Route::new("root"))).unwrap();
        assert_eq!(outcome, Transition::Unchanged);
    }

    #[test]
    fn test_replace_previous_at_root_is_an_error() {
        let err = transition(Some(&initial()), Action::ReplacePreviousAndPop(Route::new("x")))
            .unwrap_err();
        assert_eq!(err, TransitionError::NoPreviousRoute);
    }

    #[test]
    fn test_actions_before_initial_are_errors() {
        let err = transition(None, Action::Pop).unwrap_err();
        assert_eq!(err, TransitionError::Uninitialized(ActionKind::Pop));
        assert!(transition(None, Action::Initial(RouteSeed::default())).is_ok());
    }

    #[test]
    fn test_transition_does_not_touch_input() {
        let state = stack_of(&["a"]);
        let snapshot = state.clone();
        let _ = transition(Some(&state), push_action("b")).unwrap();
        let _ = transition(Some(&state), Action::Pop).unwrap();
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_extra_fields_pass_through() {
        let route = Route::new("detail")
            .with_title("Detail")
            .with_prop("item", json!({ "id": 7, "tags": ["x"] }));
        let next = apply(&initial(), Action::Push(route.clone()));
        assert_eq!(next.active(), &route);
    }

    #[test]
    fn test_raw_action_tags() {
        let cases = [
            ("initial", ActionKind::Initial),
            ("push", ActionKind::Push),
            ("pop", ActionKind::Pop),
            ("back", ActionKind::Pop),
            ("replace", ActionKind::Replace),
            ("replacePreviousAndPop", ActionKind::ReplacePreviousAndPop),
            ("jump", ActionKind::Push),
        ];
        for (tag, kind) in cases {
            assert_eq!(ActionKind::from_tag(Some(tag)), kind, "tag {tag}");
        }
        assert_eq!(ActionKind::from_tag(None), ActionKind::Push);
    }

    #[test]
    fn test_raw_action_parses_extras_into_route() {
        let raw: RawAction = serde_json::from_value(json!({
            "type": "somethingElse",
            "key": "stocktake",
            "title": "Stocktake",
            "stocktake_id": "abc"
        }))
        .unwrap();
        let action = Action::try_from(raw).unwrap();

        let Action::Push(route) = action else {
            panic!("unknown type should push");
        };
        assert_eq!(route.key, "stocktake");
        assert_eq!(route.title.as_deref(), Some("Stocktake"));
        assert_eq!(route.prop("stocktake_id"), Some(&json!("abc")));
        assert!(route.prop("title").is_none());
    }

    #[test]
    fn test_raw_action_errors() {
        let raw = RawAction {
            kind: Some("replace".to_string()),
            ..RawAction::default()
        };
        assert_eq!(
            Action::try_from(raw).unwrap_err(),
            ActionError::MissingKey(ActionKind::Replace)
        );

        let raw: RawAction =
            serde_json::from_value(json!({ "key": "a", "title": 12 })).unwrap();
        assert!(matches!(
            Action::try_from(raw),
            Err(ActionError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_raw_pop_needs_no_key() {
        let raw: RawAction = serde_json::from_value(json!({ "type": "back" })).unwrap();
        assert_eq!(Action::try_from(raw).unwrap(), Action::Pop);
    }

    #[test]
    fn test_action_key() {
        assert_eq!(push_action("a").key(), Some("a"));
        assert_eq!(Action::Pop.key(), None);
        assert_eq!(Action::Initial(RouteSeed::default()).key(), Some("root"));
    }
}
