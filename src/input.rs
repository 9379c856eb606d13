//! Host input translated into simulation terms
//!
//! Browser events are flattened into [`InputEvent`] so the session can
//! dispatch them without touching any DOM types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Event kinds the session can register a handler for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    MouseMove,
    DeviceOrientation,
}

/// A host event, already reduced to the values the demo uses
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// New window inner size in pixels
    Resize { width: u32, height: u32 },
    /// Pointer position in page coordinates
    MouseMove { x: f32, y: f32 },
    DeviceOrientation(OrientationReading),
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Resize { .. } => EventKind::Resize,
            InputEvent::MouseMove { .. } => EventKind::MouseMove,
            InputEvent::DeviceOrientation(_) => EventKind::DeviceOrientation,
        }
    }
}

/// Raw device orientation angles in degrees. Browsers report `null` for
/// axes they cannot measure.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationReading {
    /// Compass heading
    pub alpha: Option<f64>,
    /// Front-back tilt
    pub beta: Option<f64>,
    /// Left-right tilt
    pub gamma: Option<f64>,
}

impl OrientationReading {
    pub fn new(alpha: Option<f64>, beta: Option<f64>, gamma: Option<f64>) -> Self {
        Self { alpha, beta, gamma }
    }
}

/// Tilt in whole degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tilt {
    /// Left-right (gamma)
    pub lr: i32,
    /// Front-back (beta)
    pub fb: i32,
}

impl Tilt {
    /// Floor both axes; missing axes read as level
    pub fn from_reading(reading: &OrientationReading) -> Self {
        let floor = |v: Option<f64>| v.filter(|v| v.is_finite()).map_or(0, |v| v.floor() as i32);
        Self {
            lr: floor(reading.gamma),
            fb: floor(reading.beta),
        }
    }

    /// Zero a left-right tilt strictly inside `(-half_width, half_width)`
    pub fn with_dead_zone(self, half_width: i32) -> Self {
        if self.lr > -half_width && self.lr < half_width {
            Self { lr: 0, ..self }
        } else {
            self
        }
    }

    /// True when both axes floor to zero
    pub fn is_level(&self) -> bool {
        self.lr == 0 && self.fb == 0
    }

    /// Bounded pseudo-acceleration: `sin(radians(deg) / divisor)` per axis
    pub fn to_acceleration(&self, divisor: f32) -> Vec2 {
        let axis = |deg: i32| ((deg as f32).to_radians() / divisor).sin();
        Vec2::new(axis(self.lr), axis(self.fb))
    }
}

/// How a tilt vector reaches the bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpulseKind {
    /// One-shot force integrated over the next step
    ApplyForce,
    /// Immediate velocity change
    Accelerate,
}

impl ImpulseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpulseKind::ApplyForce => "apply-force",
            ImpulseKind::Accelerate => "accelerate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(beta: f64, gamma: f64) -> OrientationReading {
        OrientationReading::new(Some(0.0), Some(beta), Some(gamma))
    }

    #[test]
    fn test_tilt_floors_toward_negative_infinity() {
        let t = Tilt::from_reading(&reading(0.99, -0.2));
        assert_eq!(t, Tilt { lr: -1, fb: 0 });
        assert!(!t.is_level());

        let t = Tilt::from_reading(&reading(0.4, 0.7));
        assert!(t.is_level());
    }

    #[test]
    fn test_missing_axes_are_level() {
        let t = Tilt::from_reading(&OrientationReading::default());
        assert!(t.is_level());
        let t = Tilt::from_reading(&OrientationReading::new(None, Some(f64::NAN), None));
        assert!(t.is_level());
    }

    #[test]
    fn test_dead_zone_is_symmetric_and_exclusive() {
        for lr in -4..=4 {
            assert_eq!(Tilt { lr, fb: 9 }.with_dead_zone(5), Tilt { lr: 0, fb: 9 });
        }
        assert_eq!(Tilt { lr: 5, fb: 0 }.with_dead_zone(5).lr, 5);
        assert_eq!(Tilt { lr: -5, fb: 0 }.with_dead_zone(5).lr, -5);
        // front-back is never dead-zoned
        assert_eq!(Tilt { lr: 0, fb: 3 }.with_dead_zone(5).fb, 3);
    }

    #[test]
    fn test_acceleration_for_thirty_degrees() {
        let acc = Tilt { lr: 30, fb: 0 }.to_acceleration(50.0);
        let expected = (30.0_f32.to_radians() / 50.0).sin();
        assert!((acc.x - expected).abs() < 1e-7);
        assert!((acc.x - 0.010472).abs() < 1e-5);
        assert_eq!(acc.y, 0.0);
    }

    #[test]
    fn test_acceleration_is_bounded() {
        let acc = Tilt { lr: 180, fb: -180 }.to_acceleration(1.0);
        assert!(acc.x.abs() <= 1.0 && acc.y.abs() <= 1.0);
        let acc = Tilt { lr: -90, fb: 45 }.to_acceleration(10000.0);
        assert!(acc.x < 0.0 && acc.y > 0.0);
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(InputEvent::Resize { width: 1, height: 1 }.kind(), EventKind::Resize);
        assert_eq!(InputEvent::MouseMove { x: 0.0, y: 0.0 }.kind(), EventKind::MouseMove);
        assert_eq!(
            InputEvent::DeviceOrientation(OrientationReading::default()).kind(),
            EventKind::DeviceOrientation
        );
    }
}
