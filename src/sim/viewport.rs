//! Viewport and axis-aligned bounds
//!
//! Screen space: origin at the top-left corner, y grows downward, units are
//! CSS pixels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Visible drawing area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build from the fractional sizes browsers report
    pub fn from_inner_size(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0).floor() as u32,
            height: height.max(0.0).floor() as u32,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * 0.5
    }

    /// Bounds region covering the whole viewport
    pub fn bounds(&self) -> Aabb {
        Aabb::new(0.0, 0.0, self.width as f32, self.height as f32)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            min: Vec2::new(x0.min(x1), y0.min(y1)),
            max: Vec2::new(x0.max(x1), y0.max(y1)),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_match_viewport() {
        let vp = Viewport::new(800, 600);
        let b = vp.bounds();
        assert_eq!(b.min, Vec2::ZERO);
        assert_eq!(b.width(), 800.0);
        assert_eq!(b.height(), 600.0);
    }

    #[test]
    fn test_from_inner_size_floors() {
        let vp = Viewport::from_inner_size(1023.7, 767.2);
        assert_eq!(vp, Viewport::new(1023, 767));
        assert_eq!(Viewport::from_inner_size(-4.0, 10.0).width, 0);
    }

    #[test]
    fn test_aabb_normalizes_corners() {
        let b = Aabb::new(10.0, 20.0, 0.0, 5.0);
        assert_eq!(b.min, Vec2::new(0.0, 5.0));
        assert_eq!(b.max, Vec2::new(10.0, 20.0));
        assert!(b.contains(Vec2::new(5.0, 10.0)));
        assert!(!b.contains(Vec2::new(11.0, 10.0)));
    }
}
