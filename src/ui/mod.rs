//! UI components for SnapAsk
//!
//! This module contains all user interface components built with Dioxus.

pub mod components;
pub mod overlay;
pub mod query;
pub mod settings;

pub use overlay::SelectionOverlay;
pub use query::QueryView;
