//! Rolii - tilt-steered bouncing circles
//!
//! Core modules:
//! - `sim`: Physics world, bodies and behaviors (edge bounce, attraction, impulses)
//! - `input`: Device orientation and pointer input translation
//! - `session`: Explicit demo context and event dispatch table
//! - `renderer`: WebGPU circle renderer and headless surface
//! - `board`: Sketch board bootstrapper
//! - `settings`: Demo variants and tunable parameters

pub mod board;
pub mod error;
pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::SetupError;
pub use session::Session;
pub use settings::{DemoVariant, Settings};

use rand::Rng;

/// Demo configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds
    pub const TIMESTEP_MS: f32 = 6.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the ticker will try to catch up on
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Host element ids
    pub const VIEWPORT_ELEMENT_ID: &str = "viewport";
    pub const BOARD_ELEMENT_ID: &str = "simple-board";
    pub const TILT_LR_ELEMENT_ID: &str = "tiltLR";
    pub const TILT_FB_ELEMENT_ID: &str = "tiltFB";

    /// Upper bound accepted for a spawned batch
    pub const MAX_BODIES: usize = 1000;
}

/// Random integer in `[min, max]`, both bounds inclusive
#[inline]
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}
