//! Screen region types
//!
//! The rectangle recorded by the capture overlay. A drag can go in any
//! direction, so construction normalizes the corners.

use serde::{Deserialize, Serialize};

/// A rectangular screen region, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Horizontal extent
    pub width: u32,
    /// Vertical extent
    pub height: u32,
}

impl Region {
    /// Build a region from two drag corners given in any order.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x: x1.min(x2).round() as i32,
            y: y1.min(y2).round() as i32,
            width: (x1 - x2).abs().round() as u32,
            height: (y1 - y2).abs().round() as u32,
        }
    }

    /// True when the region has no area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Convert logical (CSS) coordinates to physical pixels.
    ///
    /// The overlay records positions in the window's logical space; the
    /// screenshot backend works in physical pixels.
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            x: (self.x as f64 * factor).round() as i32,
            y: (self.y as f64 * factor).round() as i32,
            width: (self.width as f64 * factor).round() as u32,
            height: (self.height as f64 * factor).round() as u32,
        }
    }

    /// Shift the region into global screen coordinates.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes_any_drag_direction() {
        let expected = Region {
            x: 10,
            y: 20,
            width: 30,
            height: 40,
        };

        assert_eq!(Region::from_corners(10.0, 20.0, 40.0, 60.0), expected);
        assert_eq!(Region::from_corners(40.0, 20.0, 10.0, 60.0), expected);
        assert_eq!(Region::from_corners(10.0, 60.0, 40.0, 20.0), expected);
        assert_eq!(Region::from_corners(40.0, 60.0, 10.0, 20.0), expected);
    }

    #[test]
    fn test_from_corners_rounds_fractional_positions() {
        let region = Region::from_corners(10.4, 19.6, 40.1, 60.2);
        assert_eq!(region.x, 10);
        assert_eq!(region.y, 20);
        assert_eq!(region.width, 30);
        assert_eq!(region.height, 41);
    }

    #[test]
    fn test_is_empty() {
        assert!(Region::from_corners(5.0, 5.0, 5.0, 50.0).is_empty());
        assert!(Region::from_corners(5.0, 5.0, 50.0, 5.0).is_empty());
        assert!(!Region::from_corners(5.0, 5.0, 6.0, 6.0).is_empty());
    }

    #[test]
    fn test_scale_to_physical_pixels() {
        let region = Region {
            x: 10,
            y: 20,
            width: 30,
            height: 40,
        };

        let scaled = region.scale(2.0);
        assert_eq!(
            scaled,
            Region {
                x: 20,
                y: 40,
                width: 60,
                height: 80,
            }
        );

        assert_eq!(region.scale(1.0), region);
    }

    #[test]
    fn test_translate_moves_origin_only() {
        let region = Region {
            x: 10,
            y: 20,
            width: 30,
            height: 40,
        };

        let moved = region.translate(1920, -5);
        assert_eq!(moved.x, 1930);
        assert_eq!(moved.y, 15);
        assert_eq!(moved.width, 30);
        assert_eq!(moved.height, 40);
    }
}
