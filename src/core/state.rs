//! # Stack State
//!
//! The whole navigation state at one instant.
//!
//! ```text
//! StackState
//! ├── key: "root"           // stack identity, never changes
//! ├── index: usize          // active route, always the last one
//! └── routes: Vec<Route>    // bottom → top, never empty, unique keys
//! ```
//!
//! Fields are private. New values come out of `transition()` in action.rs;
//! nothing edits a state in place, so any copy held for comparison stays a
//! valid snapshot.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::core::route::Route;

/// Key of the stack itself and of the route created by `initial`.
pub const ROOT_KEY: &str = "root";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStackState")]
pub struct StackState {
    index: usize,
    key: String,
    routes: Vec<Route>,
}

impl StackState {
    /// Single-route stack with `route` at the bottom.
    pub(crate) fn root(route: Route) -> Self {
        Self {
            index: 0,
            key: ROOT_KEY.to_string(),
            routes: vec![route],
        }
    }

    /// Derive a sibling state with a different route list. The top route
    /// becomes active.
    pub(crate) fn with_routes(&self, routes: Vec<Route>) -> Self {
        debug_assert!(!routes.is_empty());
        Self {
            index: routes.len() - 1,
            key: self.key.clone(),
            routes,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// The route at `index`.
    pub fn active(&self) -> &Route {
        &self.routes[self.index]
    }

    /// The route directly beneath the active one, if any.
    pub fn previous(&self) -> Option<&Route> {
        self.index.checked_sub(1).map(|i| &self.routes[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.routes.iter().any(|r| r.key == key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.routes.iter().position(|r| r.key == key)
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.key.as_str())
    }
}

// ============================================================================
// Validation on deserialize
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
pub enum StackError {
    Empty,
    WrongStackKey(String),
    IndexOutOfBounds { index: usize, len: usize },
    DuplicateKey(String),
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackError::Empty => write!(f, "stack has no routes"),
            StackError::WrongStackKey(key) => {
                write!(f, "stack key must be {ROOT_KEY:?}, got {key:?}")
            }
            StackError::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for {len} routes")
            }
            StackError::DuplicateKey(key) => write!(f, "duplicate route key: {key}"),
        }
    }
}

impl std::error::Error for StackError {}

#[derive(Deserialize)]
struct RawStackState {
    index: usize,
    key: String,
    routes: Vec<Route>,
}

impl TryFrom<RawStackState> for StackState {
    type Error = StackError;

    fn try_from(raw: RawStackState) -> Result<Self, Self::Error> {
        if raw.routes.is_empty() {
            return Err(StackError::Empty);
        }
        if raw.key != ROOT_KEY {
            return Err(StackError::WrongStackKey(raw.key));
        }
        // Transitions always keep the top route active
        if raw.index != raw.routes.len() - 1 {
            return Err(StackError::IndexOutOfBounds {
                index: raw.index,
                len: raw.routes.len(),
            });
        }
        let mut seen = HashSet::new();
        for route in &raw.routes {
            if !seen.insert(route.key.as_str()) {
                return Err(StackError::DuplicateKey(route.key.clone()));
            }
        }
        Ok(Self {
            index: raw.index,
            key: raw.key,
            routes: raw.routes,
        })
    }
}
