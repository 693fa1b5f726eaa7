//! SnapAsk Library
//!
//! Core library for the SnapAsk desktop application.

pub mod app;
pub mod capture;
pub mod chat;
pub mod hotkey;
pub mod ocr;
pub mod storage;
pub mod types;
pub mod ui;
