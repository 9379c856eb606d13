//! Per-step behaviors: forces, edge containment and collision response
//!
//! Force behaviors write into each body's acceleration accumulator before
//! integration. Detection behaviors emit [`Contact`]s after integration;
//! [`Behavior::ImpulseResponse`] is the only one that resolves them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::viewport::Aabb;

/// Attractor ignores bodies closer than this by default
pub const DEFAULT_ATTRACTOR_MIN_DISTANCE: f32 = 10.0;

/// A force or constraint rule applied every step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Keep bodies inside `bounds`
    EdgeCollision {
        bounds: Aabb,
        restitution: f32,
        cof: f32,
    },
    /// Pull every body toward `position` with `strength / d^order`
    Attractor {
        position: Vec2,
        strength: f32,
        order: f32,
        min_distance: f32,
    },
    /// Mutual attraction between all bodies
    NewtonianGravity { strength: f32, min_distance: f32 },
    /// Resolve body/body overlaps and every contact found this step
    ImpulseResponse,
}

impl Behavior {
    pub fn edge_collision(bounds: Aabb, restitution: f32, cof: f32) -> Self {
        Behavior::EdgeCollision {
            bounds,
            restitution,
            cof,
        }
    }

    pub fn attractor(position: Vec2, strength: f32, order: f32) -> Self {
        Behavior::Attractor {
            position,
            strength,
            order,
            min_distance: DEFAULT_ATTRACTOR_MIN_DISTANCE,
        }
    }

    pub fn newtonian_gravity(strength: f32, min_distance: f32) -> Self {
        Behavior::NewtonianGravity {
            strength,
            min_distance,
        }
    }

    pub fn impulse_response() -> Self {
        Behavior::ImpulseResponse
    }

    pub fn name(&self) -> &'static str {
        match self {
            Behavior::EdgeCollision { .. } => "edge-collision",
            Behavior::Attractor { .. } => "attractor",
            Behavior::NewtonianGravity { .. } => "newtonian-gravity",
            Behavior::ImpulseResponse => "impulse-response",
        }
    }

    /// Replace the bounds of an edge behavior in place
    pub fn set_bounds(&mut self, new_bounds: Aabb) {
        if let Behavior::EdgeCollision { bounds, .. } = self {
            *bounds = new_bounds;
        }
    }

    /// Move an attractor's target in place
    pub fn set_position(&mut self, target: Vec2) {
        if let Behavior::Attractor { position, .. } = self {
            *position = target;
        }
    }

    /// Accumulate this behavior's forces into `bodies[..].acc`
    pub fn apply_forces(&self, bodies: &mut [Body]) {
        match *self {
            Behavior::Attractor {
                position,
                strength,
                order,
                min_distance,
            } => {
                for body in bodies.iter_mut() {
                    let offset = position - body.pos;
                    let dist = offset.length();
                    if dist > min_distance {
                        let g = strength / dist.powf(order);
                        body.acc += offset / dist * g;
                    }
                }
            }
            Behavior::NewtonianGravity {
                strength,
                min_distance,
            } => {
                let min_sq = min_distance * min_distance;
                let n = bodies.len();
                for i in 0..n {
                    for j in (i + 1)..n {
                        let offset = bodies[j].pos - bodies[i].pos;
                        let dist_sq = offset.length_squared();
                        if dist_sq <= min_sq || dist_sq == 0.0 {
                            continue;
                        }
                        let dir = offset / dist_sq.sqrt();
                        let (mi, mj) = (bodies[i].mass, bodies[j].mass);
                        bodies[i].acc += dir * (strength * mj / dist_sq);
                        bodies[j].acc -= dir * (strength * mi / dist_sq);
                    }
                }
            }
            Behavior::EdgeCollision { .. } | Behavior::ImpulseResponse => {}
        }
    }

    /// Emit edge contacts for bodies crossing the bounds
    pub fn detect(&self, bodies: &[Body], contacts: &mut Vec<Contact>) {
        let Behavior::EdgeCollision {
            bounds,
            restitution,
            cof,
        } = *self
        else {
            return;
        };

        for (index, body) in bodies.iter().enumerate() {
            let r = body.radius;
            let mut push = |normal: Vec2, overlap: f32| {
                contacts.push(Contact {
                    a: index,
                    b: None,
                    normal,
                    overlap,
                    restitution: restitution * body.restitution,
                    cof: cof * body.cof,
                });
            };

            let left = bounds.min.x - (body.pos.x - r);
            if left > 0.0 {
                push(Vec2::NEG_X, left);
            }
            let right = (body.pos.x + r) - bounds.max.x;
            if right > 0.0 {
                push(Vec2::X, right);
            }
            let top = bounds.min.y - (body.pos.y - r);
            if top > 0.0 {
                push(Vec2::NEG_Y, top);
            }
            let bottom = (body.pos.y + r) - bounds.max.y;
            if bottom > 0.0 {
                push(Vec2::Y, bottom);
            }
        }
    }
}

/// A single collision found during a step
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    /// Index of the first body
    pub a: usize,
    /// Index of the second body, `None` for a static edge
    pub b: Option<usize>,
    /// Unit normal pointing from `a` toward `b` (or toward the edge)
    pub normal: Vec2,
    /// Penetration depth in pixels
    pub overlap: f32,
    pub restitution: f32,
    pub cof: f32,
}

/// Find overlapping body pairs
pub fn detect_body_pairs(bodies: &[Body], contacts: &mut Vec<Contact>) {
    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (&bodies[i], &bodies[j]);
            let offset = b.pos - a.pos;
            let reach = a.radius + b.radius;
            let dist_sq = offset.length_squared();
            if dist_sq >= reach * reach {
                continue;
            }
            let dist = dist_sq.sqrt();
            // Coincident centers: separate along x
            let normal = if dist > 1e-6 { offset / dist } else { Vec2::X };
            contacts.push(Contact {
                a: i,
                b: Some(j),
                normal,
                overlap: reach - dist,
                restitution: a.restitution * b.restitution,
                cof: a.cof * b.cof,
            });
        }
    }
}

/// Positional correction, restitution impulse and friction for each contact
pub fn resolve_contacts(bodies: &mut [Body], contacts: &[Contact]) {
    for c in contacts {
        match c.b {
            None => resolve_edge(&mut bodies[c.a], c),
            Some(b) => {
                let (lo, hi) = (c.a.min(b), c.a.max(b));
                let (head, tail) = bodies.split_at_mut(hi);
                let (first, second) = (&mut head[lo], &mut tail[0]);
                if c.a < b {
                    resolve_pair(first, second, c);
                } else {
                    resolve_pair(second, first, c);
                }
            }
        }
    }
}

fn resolve_edge(body: &mut Body, c: &Contact) {
    body.pos -= c.normal * c.overlap;

    let vn = body.vel.dot(c.normal);
    if vn <= 0.0 {
        return; // already leaving the edge
    }
    let normal_change = (1.0 + c.restitution) * vn;
    body.vel -= c.normal * normal_change;
    apply_friction(&mut body.vel, c.normal, c.cof * normal_change);
}

fn resolve_pair(a: &mut Body, b: &mut Body, c: &Contact) {
    let (inv_a, inv_b) = (a.inv_mass(), b.inv_mass());
    let inv_sum = inv_a + inv_b;
    if inv_sum == 0.0 {
        return;
    }

    a.pos -= c.normal * (c.overlap * inv_a / inv_sum);
    b.pos += c.normal * (c.overlap * inv_b / inv_sum);

    let rel = b.vel - a.vel;
    let vn = rel.dot(c.normal);
    if vn >= 0.0 {
        return; // separating
    }
    let j = -(1.0 + c.restitution) * vn / inv_sum;
    a.vel -= c.normal * (j * inv_a);
    b.vel += c.normal * (j * inv_b);

    let rel = b.vel - a.vel;
    let tangent = rel - c.normal * rel.dot(c.normal);
    let slip = tangent.length();
    if slip > 1e-6 {
        let jt = (c.cof * j).min(slip / inv_sum);
        let t = tangent / slip;
        a.vel += t * (jt * inv_a);
        b.vel -= t * (jt * inv_b);
    }
}

/// Reduce the tangential part of `vel` by at most `limit`
fn apply_friction(vel: &mut Vec2, normal: Vec2, limit: f32) {
    let tangent = *vel - normal * vel.dot(normal);
    let slip = tangent.length();
    if slip > 1e-6 {
        *vel -= tangent / slip * limit.min(slip);
    }
}
