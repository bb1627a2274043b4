//! Interactive map of Swiss dialects.
//!
//! A static [`catalog::Catalog`] of dialect records feeds a
//! [`view::ViewStateMachine`] that tracks selection, sample category, map
//! coloring and a simulated playback progress bar. The [`runtime`] module runs
//! the machine on its own thread for the egui front end in [`ui`].

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod runtime;
pub mod ui;
pub mod view;

pub use catalog::{Catalog, Category, DialectRecord, Language};
pub use error::{CatalogError, RuntimeError};
pub use view::{MapMode, ViewEvent, ViewState, ViewStateMachine};
