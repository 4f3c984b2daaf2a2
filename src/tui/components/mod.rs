//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `Header`: back marker, title, centre and right bar text
//!
//! ### Scenes (Event-Driven)
//!
//! - `CatalogScene`: config-driven screens with a list of links
//!
//! Components receive external data as "props" (struct fields or render
//! arguments), not by reaching into the controller. The event loop owns
//! the controller and passes down what each component needs.
//!
//! ```text
//! components/
//! ├── mod.rs       (this file)
//! ├── header.rs    (top bar)
//! └── catalog.rs   (screen bodies from config)
//! ```

pub mod catalog;
mod header;

pub use catalog::{Catalog, CatalogScene};
pub use header::Header;
