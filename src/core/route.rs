//! # Routes
//!
//! A `Route` is one screen on the stack. The reducer only ever looks at
//! `key`; everything else is carried along for the renderer.
//!
//! ```text
//! Route
//! ├── key: String                      // identity while on the stack
//! ├── title: Option<String>            // header label
//! ├── right_component: Option<...>     // trailing-bar override
//! └── props: Map<String, Value>        // caller data, passed through verbatim
//! ```
//!
//! Serialized, `props` stays a nested object so a prop can use any name,
//! including `key` or `title`:
//!
//! ```text
//! { "key": "orders", "title": "Orders", "props": { "customer_id": 42 } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Opaque caller-supplied fields attached to a route.
pub type Props = Map<String, Value>;

/// Renders the trailing (right) part of the header bar for one route.
///
/// Compared by pointer: two overrides are equal only if they share the
/// same closure.
#[derive(Clone)]
pub struct BarOverride(Arc<dyn Fn() -> String + Send + Sync>);

impl BarOverride {
    pub fn new(render: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(render))
    }

    pub fn render(&self) -> String {
        (self.0)()
    }
}

impl fmt::Debug for BarOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BarOverride(..)")
    }
}

impl PartialEq for BarOverride {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip)]
    pub right_component: Option<BarOverride>,
    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub props: Props,
}

impl Route {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: None,
            right_component: None,
            props: Props::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn with_right_component(mut self, component: BarOverride) -> Self {
        self.right_component = Some(component);
        self
    }

    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }
}

/// Everything a route carries except its key.
///
/// Used by the `initial` action, whose route key is always fixed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSeed {
    pub title: Option<String>,
    pub right_component: Option<BarOverride>,
    pub props: Props,
}

impl RouteSeed {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_right_component(mut self, component: BarOverride) -> Self {
        self.right_component = Some(component);
        self
    }

    pub fn into_route(self, key: impl Into<String>) -> Route {
        Route {
            key: key.into(),
            title: self.title,
            right_component: self.right_component,
            props: self.props,
        }
    }
}
