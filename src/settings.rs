//! Demo variants and tunable parameters
//!
//! The browser build picks a variant from the `demo` query parameter and
//! lets a JSON blob in LocalStorage override any field.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_BODIES;
use crate::error::SetupError;
use crate::input::ImpulseKind;

/// Built-in demo configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DemoVariant {
    /// A single small body rolled around by tilting the device
    #[default]
    Tilt,
    /// Forty bodies chasing the mouse until a tilting device is detected
    Swarm,
    /// Forty bodies pulling on each other
    Gravity,
}

impl DemoVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoVariant::Tilt => "tilt",
            DemoVariant::Swarm => "swarm",
            DemoVariant::Gravity => "gravity",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "tilt" | "rolii" => Some(DemoVariant::Tilt),
            "swarm" | "mouse" => Some(DemoVariant::Swarm),
            "gravity" | "newtonian" => Some(DemoVariant::Gravity),
            _ => None,
        }
    }
}

/// Point attraction toward the pointer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttractorSettings {
    pub strength: f32,
    /// 1 = linear falloff, 2 = inverse square
    pub order: f32,
}

/// Mutual attraction between bodies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravitySettings {
    pub strength: f32,
    /// Pairs closer than this exert no force
    pub min_distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationSettings {
    /// Empirical scale applied to tilt radians before the sine
    pub divisor: f32,
    pub impulse: ImpulseKind,
    /// Left-right readings strictly inside ±this many degrees count as level
    pub dead_zone: Option<i32>,
    /// Swap out mouse attraction once a real tilt is seen
    pub adaptive: bool,
}

/// Full demo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: DemoVariant,
    pub body_count: usize,
    /// Radius of every body in pixels
    pub body_radius: f32,
    /// Edge bounciness (0 = dead stop, 1 = elastic)
    pub restitution: f32,
    /// Edge friction coefficient
    pub cof: f32,
    pub attractor: Option<AttractorSettings>,
    pub gravity: Option<GravitySettings>,
    pub orientation: OrientationSettings,
    /// RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::preset(DemoVariant::default())
    }
}

impl Settings {
    /// Settings for a built-in variant
    pub fn preset(variant: DemoVariant) -> Self {
        match variant {
            DemoVariant::Tilt => Self {
                variant,
                body_count: 1,
                body_radius: 10.0,
                restitution: 0.1,
                cof: 0.8,
                attractor: None,
                gravity: None,
                orientation: OrientationSettings {
                    divisor: 10000.0,
                    impulse: ImpulseKind::ApplyForce,
                    dead_zone: Some(5),
                    adaptive: false,
                },
                seed: None,
            },
            DemoVariant::Swarm => Self {
                variant,
                body_count: 40,
                body_radius: 20.0,
                restitution: 0.99,
                cof: 0.8,
                attractor: Some(AttractorSettings {
                    strength: 0.1,
                    order: 1.0,
                }),
                gravity: None,
                orientation: OrientationSettings {
                    divisor: 50.0,
                    impulse: ImpulseKind::Accelerate,
                    dead_zone: None,
                    adaptive: true,
                },
                seed: None,
            },
            DemoVariant::Gravity => Self {
                variant,
                body_count: 40,
                body_radius: 20.0,
                restitution: 0.99,
                cof: 0.8,
                attractor: None,
                gravity: Some(GravitySettings {
                    strength: 0.005,
                    min_distance: 10.0,
                }),
                orientation: OrientationSettings {
                    divisor: 50.0,
                    impulse: ImpulseKind::Accelerate,
                    dead_zone: None,
                    adaptive: false,
                },
                seed: None,
            },
        }
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), SetupError> {
        fn invalid(name: &'static str, reason: String) -> Result<(), SetupError> {
            Err(SetupError::InvalidSetting { name, reason })
        }

        if !(0.0..=1.0).contains(&self.restitution) {
            return invalid("restitution", format!("{} is outside [0, 1]", self.restitution));
        }
        if !(0.0..=1.0).contains(&self.cof) {
            return invalid("cof", format!("{} is outside [0, 1]", self.cof));
        }
        if !(self.body_radius > 0.0) {
            return invalid("body_radius", format!("{} must be positive", self.body_radius));
        }
        if self.body_count > MAX_BODIES {
            return invalid(
                "body_count",
                format!("{} exceeds the limit of {}", self.body_count, MAX_BODIES),
            );
        }
        if !(self.orientation.divisor > 0.0) {
            return invalid(
                "orientation.divisor",
                format!("{} must be positive", self.orientation.divisor),
            );
        }
        if let Some(dz) = self.orientation.dead_zone {
            if dz < 0 {
                return invalid("orientation.dead_zone", format!("{} is negative", dz));
            }
        }
        if let Some(a) = self.attractor {
            if !(a.order > 0.0) {
                return invalid("attractor.order", format!("{} must be positive", a.order));
            }
        }
        if let Some(g) = self.gravity {
            if g.min_distance < 0.0 {
                return invalid(
                    "gravity.min_distance",
                    format!("{} is negative", g.min_distance),
                );
            }
        }
        Ok(())
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rolii_settings";

    /// Pick a preset from a URL query string (`?demo=swarm&seed=7`)
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "demo" => match DemoVariant::from_str(value) {
                    Some(variant) => {
                        let seed = settings.seed;
                        settings = Self::preset(variant);
                        settings.seed = seed;
                    }
                    None => log::warn!("Unknown demo '{}', using {}", value, settings.variant.as_str()),
                },
                "seed" => settings.seed = value.parse().ok(),
                _ => {}
            }
        }
        settings
    }

    /// Query-selected preset, overridden by LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let window = web_sys::window();
        let query = window
            .as_ref()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let settings = Self::from_query(&query);

        let storage = window.and_then(|w| w.local_storage().ok()).flatten();
        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Settings>(&json) {
                    Ok(stored) => {
                        log::info!("Loaded settings override from LocalStorage");
                        return stored;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using {} preset", settings.variant.as_str());
        settings
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for variant in [DemoVariant::Tilt, DemoVariant::Swarm, DemoVariant::Gravity] {
            let s = Settings::preset(variant);
            assert_eq!(s.variant, variant);
            assert!(s.validate().is_ok(), "{:?} preset invalid", variant);
        }
    }

    #[test]
    fn test_preset_shapes() {
        let tilt = Settings::preset(DemoVariant::Tilt);
        assert_eq!((tilt.body_count, tilt.body_radius), (1, 10.0));
        assert_eq!(tilt.orientation.impulse, ImpulseKind::ApplyForce);

        let swarm = Settings::preset(DemoVariant::Swarm);
        assert_eq!((swarm.body_count, swarm.body_radius), (40, 20.0));
        assert!(swarm.orientation.adaptive);
        assert!(swarm.attractor.is_some());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut s = Settings::default();
        s.restitution = 1.5;
        assert!(matches!(
            s.validate(),
            Err(SetupError::InvalidSetting { name: "restitution", .. })
        ));

        let mut s = Settings::default();
        s.orientation.divisor = 0.0;
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.body_radius = f32::NAN;
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.body_count = MAX_BODIES + 1;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_zero_bodies_is_valid() {
        let mut s = Settings::default();
        s.body_count = 0;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_from_query() {
        let s = Settings::from_query("?seed=42&demo=swarm");
        assert_eq!(s.variant, DemoVariant::Swarm);
        assert_eq!(s.seed, Some(42));

        let s = Settings::from_query("?demo=bogus");
        assert_eq!(s.variant, DemoVariant::Tilt);
        assert_eq!(Settings::from_query(""), Settings::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"body_count": 3}"#).unwrap();
        assert_eq!(s.body_count, 3);
        assert_eq!(s.body_radius, Settings::default().body_radius);
    }
}
