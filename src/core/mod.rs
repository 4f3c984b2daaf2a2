//! # Core Navigation Logic
//!
//! The route stack and the reducer that moves it.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • StackState (routes)  │
//!                    │  • Action (events)      │
//!                    │  • transition()         │
//!                    │  • Controller           │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Scripts   │      │   Other    │
//!     │  Adapter   │      │ (RawAction │      │  shells    │
//!     │ (ratatui)  │      │   JSON)    │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`route`]: `Route`, one screen plus its opaque props
//! - [`state`]: `StackState`, the ordered routes and the active index
//! - [`action`]: `Action` and the `transition()` reducer
//! - [`controller`]: owns the state, dispatches actions, render generation
//! - [`config`]: settings and the screen catalog

pub mod action;
pub mod config;
pub mod controller;
pub mod route;
pub mod state;

pub use action::{Action, ActionKind, RawAction, Transition, TransitionError, transition};
pub use controller::{ActiveRoute, Controller};
pub use route::{BarOverride, Props, Route, RouteSeed};
pub use state::{ROOT_KEY, StackState};
