//! Simulation module
//!
//! A small 2D engine for circles: fixed timestep, forces accumulated by
//! behaviors, edge and pair contacts resolved by impulse response.
//! No rendering or platform dependencies.

pub mod behavior;
pub mod behavior_set;
pub mod body;
pub mod color;
pub mod viewport;
pub mod world;

pub use behavior::{Behavior, Contact};
pub use behavior_set::{AttractionMode, BehaviorSet, OrientationState};
pub use body::{Body, spawn_bodies};
pub use color::Color;
pub use viewport::{Aabb, Viewport};
pub use world::{BehaviorId, World};
