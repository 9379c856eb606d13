//! Surface that draws nothing and just counts frames

use super::Surface;
use crate::sim::Body;

#[derive(Debug, Clone, Default)]
pub struct Headless {
    pub size: (u32, u32),
    /// Frames drawn so far
    pub frames: u64,
    /// Body count in the most recent frame
    pub last_body_count: usize,
}

impl Headless {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Default::default()
        }
    }
}

impl Surface for Headless {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn draw(&mut self, bodies: &[Body]) {
        self.frames += 1;
        self.last_body_count = bodies.len();
    }
}
