//! Shared UI components

pub mod dialog;

pub use dialog::{Notice, NoticeDialog};
