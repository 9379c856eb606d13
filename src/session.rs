//! Demo session: the one object that owns all simulation state
//!
//! Host events are routed through a dispatch table of plain function
//! pointers. Handlers run to completion on the caller's thread.

use std::collections::HashMap;

use glam::Vec2;
use rand::Rng;

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, TIMESTEP_MS};
use crate::error::SetupError;
use crate::input::{EventKind, ImpulseKind, InputEvent, OrientationReading, Tilt};
use crate::renderer::Surface;
use crate::settings::Settings;
use crate::sim::{AttractionMode, BehaviorSet, OrientationState, Viewport, World, spawn_bodies};

/// Event handler stored in the dispatch table
pub type Handler = fn(&mut Session, &InputEvent);

pub struct Session {
    settings: Settings,
    viewport: Viewport,
    world: World,
    behaviors: BehaviorSet,
    surface: Box<dyn Surface>,
    handlers: HashMap<EventKind, Handler>,
    accumulator: f32,
    last_tilt: Option<Tilt>,
    /// Last pointer position received (page coordinates)
    last_pointer: Option<Vec2>,
}

impl Session {
    /// Build the world, size the surface, spawn bodies and attach behaviors
    pub fn new<R: Rng + ?Sized>(
        settings: Settings,
        viewport: Viewport,
        mut surface: Box<dyn Surface>,
        rng: &mut R,
    ) -> Result<Self, SetupError> {
        settings.validate()?;

        surface.resize(viewport.width, viewport.height);

        let mut world = World::new();
        let bodies = spawn_bodies(rng, settings.body_count, settings.body_radius, viewport);
        world.add_bodies(bodies);
        log::debug!(
            "Body colors: {}",
            world
                .bodies()
                .iter()
                .map(|b| b.color.to_css())
                .collect::<Vec<_>>()
                .join(" ")
        );
        let behaviors = BehaviorSet::attach(&mut world, &settings, viewport);

        let mut session = Self {
            settings,
            viewport,
            world,
            behaviors,
            surface,
            handlers: HashMap::new(),
            accumulator: 0.0,
            last_tilt: None,
            last_pointer: None,
        };

        session.register(EventKind::Resize, Session::on_resize);
        if matches!(session.behaviors.attraction(), AttractionMode::MouseDriven { .. }) {
            session.register(EventKind::MouseMove, Session::on_mouse_move);
        }

        log::info!(
            "Session ready: {} preset, {} bodies, {}x{}",
            session.settings.variant.as_str(),
            session.world.bodies().len(),
            viewport.width,
            viewport.height
        );
        Ok(session)
    }

    /// Install (or replace) the handler for an event kind
    pub fn register(&mut self, kind: EventKind, handler: Handler) {
        self.handlers.insert(kind, handler);
    }

    /// Listen for orientation events; only call when the host supports them
    pub fn enable_orientation(&mut self) {
        self.register(EventKind::DeviceOrientation, Session::on_orientation);
        log::info!(
            "Orientation input enabled ({}, divisor {})",
            self.settings.orientation.impulse.as_str(),
            self.settings.orientation.divisor
        );
    }

    pub fn handles(&self, kind: EventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Route an event to its handler. Returns false when nothing is registered.
    pub fn dispatch(&mut self, event: &InputEvent) -> bool {
        match self.handlers.get(&event.kind()).copied() {
            Some(handler) => {
                handler(self, event);
                true
            }
            None => {
                log::trace!("Unhandled {:?}", event.kind());
                false
            }
        }
    }

    /// Run as many fixed steps as `elapsed_ms` allows, then redraw if the
    /// world moved
    pub fn advance(&mut self, elapsed_ms: f32) -> u32 {
        if !elapsed_ms.is_finite() {
            log::warn!("Ignoring non-finite frame delta {}", elapsed_ms);
            return 0;
        }
        self.accumulator += elapsed_ms.clamp(0.0, MAX_FRAME_MS);

        let mut substeps = 0;
        while self.accumulator >= TIMESTEP_MS && substeps < MAX_SUBSTEPS {
            self.world.step(TIMESTEP_MS);
            self.accumulator -= TIMESTEP_MS;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop whatever we could not catch up on
            self.accumulator = self.accumulator.min(TIMESTEP_MS);
        }

        if substeps > 0 {
            self.surface.draw(self.world.bodies());
        }
        substeps
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn behaviors(&self) -> &BehaviorSet {
        &self.behaviors
    }

    pub fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }

    pub fn last_tilt(&self) -> Option<Tilt> {
        self.last_tilt
    }

    pub fn last_pointer(&self) -> Option<Vec2> {
        self.last_pointer
    }

    pub fn orientation_state(&self) -> Option<OrientationState> {
        self.behaviors.orientation()
    }

    /// Viewport changed: resize the surface and move the edges in place
    fn on_resize(session: &mut Session, event: &InputEvent) {
        let InputEvent::Resize { width, height } = *event else {
            return;
        };
        let viewport = Viewport::new(width, height);
        session.viewport = viewport;
        session.surface.resize(width, height);
        if let Some(edge) = session.world.behavior_mut(session.behaviors.edge) {
            edge.set_bounds(viewport.bounds());
        }
        log::debug!("Resized to {}x{}", width, height);
    }

    /// Attractor follows the pointer
    fn on_mouse_move(session: &mut Session, event: &InputEvent) {
        let InputEvent::MouseMove { x, y } = *event else {
            return;
        };
        let target = Vec2::new(x, y);
        session.last_pointer = Some(target);
        if let Some(id) = session.behaviors.attractor() {
            if let Some(attractor) = session.world.behavior_mut(id) {
                attractor.set_position(target);
            }
        }
    }

    fn on_orientation(session: &mut Session, event: &InputEvent) {
        let InputEvent::DeviceOrientation(reading) = *event else {
            return;
        };
        session.apply_orientation(&reading);
    }

    /// Floor, maybe dead-zone, convert to an acceleration and push every body
    fn apply_orientation(&mut self, reading: &OrientationReading) {
        let raw = Tilt::from_reading(reading);
        if !raw.is_level() {
            self.behaviors.activate_orientation(&mut self.world);
        }

        let orientation = self.settings.orientation;
        let tilt = match orientation.dead_zone {
            Some(width) => raw.with_dead_zone(width),
            None => raw,
        };
        self.last_tilt = Some(tilt);

        let accel = tilt.to_acceleration(orientation.divisor);
        for body in self.world.bodies_mut() {
            match orientation.impulse {
                ImpulseKind::ApplyForce => body.apply_force(accel),
                ImpulseKind::Accelerate => body.accelerate(accel),
            }
        }
    }
}
