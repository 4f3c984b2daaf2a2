use std::collections::HashSet;

use navstack::core::{
    Action, Controller, RawAction, Route, RouteSeed, StackState, Transition, TransitionError,
    transition,
};
use serde_json::json;

// ============================================================================
// Helper Functions
// ============================================================================

fn keys(state: &StackState) -> Vec<&str> {
    state.keys().collect()
}

fn step(state: &StackState, action: Action) -> StackState {
    match transition(Some(state), action).unwrap() {
        Transition::Changed(next) => next,
        Transition::Unchanged => panic!("expected a change"),
    }
}

fn assert_invariants(state: &StackState) {
    assert!(!state.routes().is_empty());
    assert!(state.index() < state.len());
    assert_eq!(state.key(), "root");
    let unique: HashSet<&str> = state.keys().collect();
    assert_eq!(unique.len(), state.len(), "duplicate keys in {:?}", keys(state));
}

// ============================================================================
// Reducer scenarios
// ============================================================================

#[test]
fn test_push_pop_replace_walkthrough() {
    let s0 = transition(None, Action::Initial(RouteSeed::default()))
        .unwrap()
        .into_changed()
        .unwrap();
    assert_eq!(keys(&s0), vec!["root"]);
    assert_eq!(s0.index(), 0);

    let s1 = step(&s0, Action::Push(Route::new("a")));
    assert_eq!(keys(&s1), vec!["root", "a"]);
    assert_eq!(s1.index(), 1);

    let s2 = step(&s1, Action::Push(Route::new("b")));
    assert_eq!(keys(&s2), vec!["root", "a", "b"]);
    assert_eq!(s2.index(), 2);

    let s3 = step(&s2, Action::Pop);
    assert_eq!(keys(&s3), vec!["root", "a"]);
    assert_eq!(s3.index(), 1);

    let s4 = step(&s3, Action::Replace(Route::new("c")));
    assert_eq!(keys(&s4), vec!["root", "c"]);
    assert_eq!(s4.index(), 1);

    let s5 = step(&s4, Action::ReplacePreviousAndPop(Route::new("d")));
    assert_eq!(keys(&s5), vec!["d"]);
    assert_eq!(s5.index(), 0);

    // Earlier snapshots are untouched
    assert_eq!(keys(&s2), vec!["root", "a", "b"]);
}

#[test]
fn test_no_ops_at_the_boundaries() {
    let s0 = transition(None, Action::Initial(RouteSeed::default()))
        .unwrap()
        .into_changed()
        .unwrap();
    assert_eq!(
        transition(Some(&s0), Action::Pop).unwrap(),
        Transition::Unchanged
    );
    assert_eq!(
        transition(Some(&s0), Action::Push(Route::new("root"))).unwrap(),
        Transition::Unchanged
    );
    assert_eq!(
        transition(Some(&s0), Action::ReplacePreviousAndPop(Route::new("x"))).unwrap_err(),
        TransitionError::NoPreviousRoute
    );
}

#[test]
fn test_keys_stay_unique_across_action_sequences() {
    let pool = ["root", "a", "b", "c"];
    let make = |n: usize| -> Action {
        let key = pool[n / 4 % pool.len()];
        match n % 4 {
            0 => Action::Push(Route::new(key)),
            1 => Action::Pop,
            2 => Action::Replace(Route::new(key)),
            _ => Action::ReplacePreviousAndPop(Route::new(key)),
        }
    };

    // Every sequence of three actions drawn from 16 candidates
    for x in 0..16 {
        for y in 0..16 {
            for z in 0..16 {
                let mut nav = Controller::new(RouteSeed::default());
                for n in [x, y, z] {
                    let before = nav.state().clone();
                    let changed = nav.dispatch(make(n));
                    if !changed {
                        assert_eq!(nav.state(), &before);
                    }
                    assert_invariants(nav.state());
                }
            }
        }
    }
}

// ============================================================================
// Controller
// ============================================================================

#[test]
fn test_scripted_raw_actions() {
    let script = json!([
        { "type": "push", "key": "customers", "title": "Customers" },
        { "key": "invoice", "invoice_id": 1042 },
        { "key": "invoice" },
        { "type": "replacePreviousAndPop", "key": "stock", "title": "Stock" },
        { "type": "back" },
        { "type": "back" }
    ]);
    let actions: Vec<RawAction> = serde_json::from_value(script).unwrap();

    let mut nav = Controller::new(RouteSeed::default().with_title("Menu"));
    let outcomes: Vec<bool> = actions
        .into_iter()
        .map(|raw| nav.dispatch_raw(raw).unwrap())
        .collect();

    assert_eq!(outcomes, vec![true, true, false, true, true, false]);
    assert_eq!(keys(nav.state()), vec!["root"]);
    assert_eq!(nav.title(None), "Menu");
    assert_eq!(nav.generation(), 4);
}

#[test]
fn test_props_reach_the_active_route() {
    let mut nav = Controller::new(RouteSeed::default());
    let raw: RawAction = serde_json::from_value(json!({
        "key": "invoice",
        "invoice_id": 1042,
        "lines": [{ "item": "amoxicillin", "qty": 20 }]
    }))
    .unwrap();
    nav.dispatch_raw(raw).unwrap();

    let active = nav.active();
    assert_eq!(active.route.prop("invoice_id"), Some(&json!(1042)));
    assert_eq!(
        active.route.prop("lines"),
        Some(&json!([{ "item": "amoxicillin", "qty": 20 }]))
    );
}
