//! The active behavior set and its orientation-driven transition
//!
//! Edge containment and impulse response are always active. Mouse
//! attraction is present only until a real tilting device shows up; after
//! that, tilt forces take over and the attractor is dropped for good.

use serde::{Deserialize, Serialize};

use super::behavior::Behavior;
use super::viewport::Viewport;
use super::world::{BehaviorId, World};
use crate::settings::Settings;

/// Whether a device has proven it reports orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrientationState {
    /// Initial: desktop-style behaviors active
    NoOrientation,
    /// Terminal: a non-level tilt was seen
    OrientationActive,
}

/// Where bodies are being pulled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttractionMode {
    /// Attractor follows the pointer
    MouseDriven { attractor: BehaviorId },
    Absent,
}

#[derive(Debug, Clone)]
pub struct BehaviorSet {
    pub edge: BehaviorId,
    pub impulse: BehaviorId,
    pub gravity: Option<BehaviorId>,
    attraction: AttractionMode,
    /// `None` for variants that never swap sets
    orientation: Option<OrientationState>,
}

impl BehaviorSet {
    /// Register every configured behavior and activate the initial subset
    pub fn attach(world: &mut World, settings: &Settings, viewport: Viewport) -> Self {
        let edge = world.register(Behavior::edge_collision(
            viewport.bounds(),
            settings.restitution,
            settings.cof,
        ));
        let impulse = world.register(Behavior::impulse_response());
        let gravity = settings
            .gravity
            .map(|g| world.register(Behavior::newtonian_gravity(g.strength, g.min_distance)));
        let attraction = match settings.attractor {
            Some(a) => AttractionMode::MouseDriven {
                attractor: world.register(Behavior::attractor(viewport.center(), a.strength, a.order)),
            },
            None => AttractionMode::Absent,
        };
        let orientation = settings
            .orientation
            .adaptive
            .then_some(OrientationState::NoOrientation);

        let set = Self {
            edge,
            impulse,
            gravity,
            attraction,
            orientation,
        };
        world.add_behaviors(&set.active_ids());
        set
    }

    /// Ids that should be active in the current state
    pub fn active_ids(&self) -> Vec<BehaviorId> {
        let mut ids = vec![self.impulse, self.edge];
        ids.extend(self.gravity);
        if let AttractionMode::MouseDriven { attractor } = self.attraction {
            ids.push(attractor);
        }
        ids
    }

    pub fn attraction(&self) -> AttractionMode {
        self.attraction
    }

    pub fn attractor(&self) -> Option<BehaviorId> {
        match self.attraction {
            AttractionMode::MouseDriven { attractor } => Some(attractor),
            AttractionMode::Absent => None,
        }
    }

    pub fn orientation(&self) -> Option<OrientationState> {
        self.orientation
    }

    /// Switch to the orientation subset. Returns true only on the one call
    /// that actually performs the transition.
    pub fn activate_orientation(&mut self, world: &mut World) -> bool {
        if self.orientation != Some(OrientationState::NoOrientation) {
            return false;
        }
        let previous = self.active_ids();
        self.attraction = AttractionMode::Absent;
        self.orientation = Some(OrientationState::OrientationActive);
        world.swap_behaviors(&previous, &self.active_ids());
        log::info!("Orientation detected, mouse attraction disabled");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DemoVariant;

    #[test]
    fn test_swarm_starts_with_mouse_attraction() {
        let mut world = World::new();
        let settings = Settings::preset(DemoVariant::Swarm);
        let set = BehaviorSet::attach(&mut world, &settings, Viewport::new(800, 600));

        let attractor = set.attractor().expect("swarm has an attractor");
        assert_eq!(world.active_behaviors(), &[set.impulse, set.edge, attractor]);
        assert_eq!(set.orientation(), Some(OrientationState::NoOrientation));
        match world.behavior(attractor) {
            Some(Behavior::Attractor { position, .. }) => {
                assert_eq!(*position, glam::Vec2::new(400.0, 300.0));
            }
            other => panic!("unexpected behavior {:?}", other),
        }
    }

    #[test]
    fn test_transition_happens_once() {
        let mut world = World::new();
        let settings = Settings::preset(DemoVariant::Swarm);
        let mut set = BehaviorSet::attach(&mut world, &settings, Viewport::new(800, 600));

        assert!(set.activate_orientation(&mut world));
        assert_eq!(set.attraction(), AttractionMode::Absent);
        assert_eq!(world.active_behaviors(), &[set.impulse, set.edge]);
        assert_eq!(set.orientation(), Some(OrientationState::OrientationActive));

        assert!(!set.activate_orientation(&mut world));
        assert_eq!(world.active_behaviors(), &[set.impulse, set.edge]);
    }

    #[test]
    fn test_non_adaptive_variant_never_transitions() {
        let mut world = World::new();
        let settings = Settings::preset(DemoVariant::Tilt);
        let mut set = BehaviorSet::attach(&mut world, &settings, Viewport::new(800, 600));

        assert_eq!(set.orientation(), None);
        assert!(!set.activate_orientation(&mut world));
        assert_eq!(world.active_behaviors(), &[set.impulse, set.edge]);
    }

    #[test]
    fn test_gravity_variant_activates_newtonian() {
        let mut world = World::new();
        let settings = Settings::preset(DemoVariant::Gravity);
        let set = BehaviorSet::attach(&mut world, &settings, Viewport::new(800, 600));

        let gravity = set.gravity.expect("gravity registered");
        assert!(world.is_active(gravity));
        assert_eq!(set.attraction(), AttractionMode::Absent);
    }
}
