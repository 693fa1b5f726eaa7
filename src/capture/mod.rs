//! Screen capture
//!
//! Grabs the pixels of a user-selected screen region and encodes them
//! as PNG for the recognition backend.

pub mod screen;

pub use screen::capture_region_png;

use thiserror::Error;

/// Capture errors
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("selected region has no area")]
    EmptyRegion,
    #[error("no monitor available for capture")]
    NoMonitor,
    #[error("selected region is outside the visible screen")]
    OutOfBounds,
    #[error("screen capture failed: {0}")]
    Screen(#[from] xcap::XCapError),
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("capture task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
