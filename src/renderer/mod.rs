//! Rendering module
//!
//! Bodies are drawn as filled circles by a WebGPU triangle pipeline.
//! Anything implementing [`Surface`] can stand in for it (tests, native runs).

pub mod headless;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use headless::Headless;
pub use pipeline::RenderState;

use crate::sim::Body;

/// Where a session draws its bodies
pub trait Surface {
    /// Resize the drawable area (pixels)
    fn resize(&mut self, width: u32, height: u32);
    /// Current drawable size (pixels)
    fn size(&self) -> (u32, u32);
    /// Draw one frame
    fn draw(&mut self, bodies: &[Body]);
}
