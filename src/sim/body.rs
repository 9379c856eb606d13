//! Circular bodies and the batch factory that populates a world

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::viewport::Viewport;
use crate::random_int;

/// Default body restitution (perfectly elastic on its own side)
pub const BODY_RESTITUTION: f32 = 1.0;
/// Default body coefficient of friction
pub const BODY_COF: f32 = 0.8;

/// A circular rigid body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Assigned by the world on insertion
    pub id: u32,
    pub pos: Vec2,
    /// Velocity in px/ms
    pub vel: Vec2,
    /// Acceleration accumulator in px/ms², cleared after every step
    pub acc: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub restitution: f32,
    pub cof: f32,
    /// Fill color, fixed at creation
    pub color: Color,
}

impl Body {
    pub fn circle(radius: f32, pos: Vec2, color: Color) -> Self {
        Self {
            id: 0,
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            radius,
            mass: 1.0,
            restitution: BODY_RESTITUTION,
            cof: BODY_COF,
            color,
        }
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        if self.mass > 0.0 { 1.0 / self.mass } else { 0.0 }
    }

    /// One-shot force: integrated during the next step, then discarded
    pub fn apply_force(&mut self, force: Vec2) {
        self.acc += force * self.inv_mass();
    }

    /// Direct velocity change, independent of mass and timestep
    pub fn accelerate(&mut self, accel: Vec2) {
        self.vel += accel;
    }
}

/// Generate `count` circles at uniformly random integer positions inside
/// the viewport (both edges inclusive), each with a random light color.
///
/// Overlapping positions and repeated colors are allowed.
pub fn spawn_bodies<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    radius: f32,
    viewport: Viewport,
) -> Vec<Body> {
    let max_x = i32::try_from(viewport.width).unwrap_or(i32::MAX);
    let max_y = i32::try_from(viewport.height).unwrap_or(i32::MAX);

    (0..count)
        .map(|_| {
            let x = random_int(rng, 0, max_x);
            let y = random_int(rng, 0, max_y);
            Body::circle(radius, Vec2::new(x as f32, y as f32), Color::random_light(rng))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_zero_bodies() {
        let mut rng = Pcg32::seed_from_u64(1);
        let bodies = spawn_bodies(&mut rng, 0, 10.0, Viewport::new(640, 480));
        assert!(bodies.is_empty());
    }

    #[test]
    fn test_spawn_uses_fixed_radius() {
        let mut rng = Pcg32::seed_from_u64(1);
        let bodies = spawn_bodies(&mut rng, 40, 20.0, Viewport::new(640, 480));
        assert_eq!(bodies.len(), 40);
        assert!(bodies.iter().all(|b| b.radius == 20.0 && b.vel == Vec2::ZERO));
    }

    #[test]
    fn test_zero_sized_viewport_spawns_at_origin() {
        let mut rng = Pcg32::seed_from_u64(3);
        let bodies = spawn_bodies(&mut rng, 5, 10.0, Viewport::new(0, 0));
        assert!(bodies.iter().all(|b| b.pos == Vec2::ZERO));
    }

    #[test]
    fn test_apply_force_scales_by_mass() {
        let mut body = Body::circle(10.0, Vec2::ZERO, Color::new(255, 255, 255));
        body.mass = 2.0;
        body.apply_force(Vec2::new(4.0, -2.0));
        assert_eq!(body.acc, Vec2::new(2.0, -1.0));
        assert_eq!(body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_accelerate_changes_velocity_directly() {
        let mut body = Body::circle(10.0, Vec2::ZERO, Color::new(255, 255, 255));
        body.accelerate(Vec2::new(0.5, 0.25));
        body.accelerate(Vec2::new(0.5, 0.25));
        assert_eq!(body.vel, Vec2::new(1.0, 0.5));
        assert_eq!(body.acc, Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_spawned_bodies_inside_viewport(
            count in 0usize..64,
            width in 0u32..4000,
            height in 0u32..4000,
            seed in any::<u64>(),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let bodies = spawn_bodies(&mut rng, count, 10.0, Viewport::new(width, height));
            prop_assert_eq!(bodies.len(), count);
            for b in &bodies {
                prop_assert!(b.pos.x >= 0.0 && b.pos.x <= width as f32);
                prop_assert!(b.pos.y >= 0.0 && b.pos.y <= height as f32);
                prop_assert_eq!(b.pos.x.fract(), 0.0);
            }
        }
    }
}
