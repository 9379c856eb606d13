//! Triangle generation for bodies

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Body;

/// Fewest segments used for a circle outline
const MIN_SEGMENTS: u32 = 12;
/// Most segments used for a circle outline
const MAX_SEGMENTS: u32 = 48;

/// Outline resolution for a circle of the given pixel radius
pub fn segments_for_radius(radius: f32) -> u32 {
    ((radius * 1.5) as u32).clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// All bodies as one triangle list, in pixel coordinates
pub fn bodies(bodies: &[Body]) -> Vec<Vertex> {
    bodies
        .iter()
        .flat_map(|b| {
            circle(
                b.pos,
                b.radius,
                b.color.to_linear_rgba(),
                segments_for_radius(b.radius),
            )
        })
        .collect()
}
