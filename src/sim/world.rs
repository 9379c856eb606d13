//! Simulation world: body storage, behavior registry and the step loop
//!
//! Units are pixels and milliseconds. Behaviors live in a registry for the
//! whole session so their ids stay valid; only the *active* list changes.

use serde::{Deserialize, Serialize};

use super::behavior::{Behavior, Contact, detect_body_pairs, resolve_contacts};
use super::body::Body;

/// Handle to a registered behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BehaviorId(usize);

#[derive(Debug, Default)]
pub struct World {
    bodies: Vec<Body>,
    registry: Vec<Behavior>,
    /// Active behaviors in application order
    active: Vec<BehaviorId>,
    /// Scratch buffer reused across steps
    contacts: Vec<Contact>,
    /// Simulated time in milliseconds
    pub time_ms: f64,
    /// Steps taken since creation
    pub steps: u64,
    next_body_id: u32,
}

impl World {
    pub fn new() -> Self {
        Self {
            next_body_id: 1,
            ..Default::default()
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Insert a whole batch at once; an empty batch does nothing
    pub fn add_bodies(&mut self, batch: Vec<Body>) {
        if batch.is_empty() {
            log::debug!("No bodies to add");
            return;
        }
        let count = batch.len();
        for mut body in batch {
            body.id = self.next_body_id;
            self.next_body_id += 1;
            self.bodies.push(body);
        }
        log::debug!("Added {} bodies ({} total)", count, self.bodies.len());
    }

    /// Store a behavior without activating it
    pub fn register(&mut self, behavior: Behavior) -> BehaviorId {
        self.registry.push(behavior);
        BehaviorId(self.registry.len() - 1)
    }

    pub fn behavior(&self, id: BehaviorId) -> Option<&Behavior> {
        self.registry.get(id.0)
    }

    /// Mutable access for in-place reconfiguration
    pub fn behavior_mut(&mut self, id: BehaviorId) -> Option<&mut Behavior> {
        self.registry.get_mut(id.0)
    }

    /// Edge contacts found during the last step
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn active_behaviors(&self) -> &[BehaviorId] {
        &self.active
    }

    pub fn is_active(&self, id: BehaviorId) -> bool {
        self.active.contains(&id)
    }

    /// Activate behaviors; already active or unknown ids are skipped
    pub fn add_behaviors(&mut self, ids: &[BehaviorId]) {
        for &id in ids {
            if id.0 < self.registry.len() && !self.active.contains(&id) {
                self.active.push(id);
            }
        }
    }

    pub fn remove_behaviors(&mut self, ids: &[BehaviorId]) {
        self.active.retain(|id| !ids.contains(id));
    }

    /// Replace one active subset with another between two steps
    pub fn swap_behaviors(&mut self, remove: &[BehaviorId], add: &[BehaviorId]) {
        self.remove_behaviors(remove);
        self.add_behaviors(add);
        log::debug!(
            "Active behaviors: [{}]",
            self.active
                .iter()
                .filter_map(|id| self.behavior(*id).map(Behavior::name))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    /// Advance the simulation by `dt` milliseconds
    pub fn step(&mut self, dt: f32) {
        let World {
            bodies,
            registry,
            active,
            contacts,
            ..
        } = self;

        for id in active.iter() {
            registry[id.0].apply_forces(bodies);
        }

        // Semi-implicit Euler; the accumulator is consumed here
        for body in bodies.iter_mut() {
            body.vel += body.acc * dt;
            body.pos += body.vel * dt;
            body.acc = glam::Vec2::ZERO;
        }

        let resolves = active
            .iter()
            .any(|id| matches!(registry[id.0], Behavior::ImpulseResponse));

        // Pairs first so the edge pass has the final say on position
        contacts.clear();
        if resolves {
            detect_body_pairs(bodies, contacts);
            resolve_contacts(bodies, contacts);
            contacts.clear();
        }
        for id in active.iter() {
            registry[id.0].detect(bodies, contacts);
        }
        if resolves {
            resolve_contacts(bodies, contacts);
        }

        self.time_ms += dt as f64;
        self.steps += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::color::Color;
    use crate::sim::viewport::Aabb;
    use glam::Vec2;

    fn ball(x: f32, y: f32) -> Body {
        Body::circle(10.0, Vec2::new(x, y), Color::new(255, 255, 255))
    }

    #[test]
    fn test_add_bodies_assigns_sequential_ids() {
        let mut world = World::new();
        world.add_bodies(vec![ball(0.0, 0.0), ball(1.0, 1.0)]);
        world.add_bodies(vec![ball(2.0, 2.0)]);
        let ids: Vec<u32> = world.bodies().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_add_empty_batch_is_noop() {
        let mut world = World::new();
        world.add_bodies(Vec::new());
        assert!(world.bodies().is_empty());
    }

    #[test]
    fn test_swap_keeps_shared_ids_and_registry() {
        let mut world = World::new();
        let edge = world.register(Behavior::edge_collision(Aabb::new(0.0, 0.0, 1.0, 1.0), 0.1, 0.8));
        let impulse = world.register(Behavior::impulse_response());
        let attractor = world.register(Behavior::attractor(Vec2::ZERO, 0.1, 1.0));
        world.add_behaviors(&[impulse, edge, attractor]);
        world.add_behaviors(&[edge]);
        assert_eq!(world.active_behaviors().len(), 3);

        world.swap_behaviors(&[impulse, edge, attractor], &[impulse, edge]);
        assert_eq!(world.active_behaviors(), &[impulse, edge]);
        assert!(!world.is_active(attractor));
        assert!(world.behavior(attractor).is_some());
    }

    #[test]
    fn test_force_is_consumed_after_one_step() {
        let mut world = World::new();
        world.add_bodies(vec![ball(50.0, 50.0)]);
        world.bodies_mut()[0].apply_force(Vec2::new(0.01, 0.0));
        world.step(10.0);
        let after_first = world.bodies()[0].vel;
        assert!((after_first.x - 0.1).abs() < 1e-6);
        world.step(10.0);
        assert_eq!(world.bodies()[0].vel, after_first);
        assert_eq!(world.steps, 2);
        assert!((world.time_ms - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_bodies_stay_inside_edges_with_impulse_response() {
        let mut world = World::new();
        let edge = world.register(Behavior::edge_collision(Aabb::new(0.0, 0.0, 200.0, 100.0), 0.9, 0.0));
        let impulse = world.register(Behavior::impulse_response());
        world.add_behaviors(&[impulse, edge]);
        let mut b = ball(100.0, 50.0);
        b.vel = Vec2::new(1.3, -0.7);
        world.add_bodies(vec![b]);

        for _ in 0..2000 {
            world.step(6.0);
            let p = world.bodies()[0].pos;
            assert!(p.x >= 9.99 && p.x <= 190.01, "x escaped: {}", p.x);
            assert!(p.y >= 9.99 && p.y <= 90.01, "y escaped: {}", p.y);
        }
    }

    #[test]
    fn test_edges_without_impulse_response_do_not_resolve() {
        let mut world = World::new();
        let edge = world.register(Behavior::edge_collision(Aabb::new(0.0, 0.0, 100.0, 100.0), 1.0, 0.0));
        world.add_behaviors(&[edge]);
        let mut b = ball(95.0, 50.0);
        b.vel = Vec2::new(1.0, 0.0);
        world.add_bodies(vec![b]);
        world.step(10.0);
        assert!((world.bodies()[0].pos.x - 105.0).abs() < 1e-4);
        assert_eq!(world.contacts().len(), 1);
    }

    #[test]
    fn test_in_place_mutation_affects_next_step() {
        let mut world = World::new();
        let attractor = world.register(Behavior::attractor(Vec2::new(-100.0, 0.0), 1.0, 1.0));
        world.add_behaviors(&[attractor]);
        world.add_bodies(vec![ball(0.0, 0.0)]);

        if let Some(b) = world.behavior_mut(attractor) {
            b.set_position(Vec2::new(100.0, 0.0));
        }
        world.step(1.0);
        assert!(world.bodies()[0].vel.x > 0.0);
    }
}
