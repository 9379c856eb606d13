//! Rolii entry point
//!
//! Browser: picks the physics demo or the sketch board depending on which
//! host element the page provides, wires DOM events and runs the ticker.
//! Native: runs a short headless simulation and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_demo {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{DeviceOrientationEvent, HtmlCanvasElement, MouseEvent};

    use rolii::board::BoardLayout;
    use rolii::consts::*;
    use rolii::input::{EventKind, InputEvent, OrientationReading};
    use rolii::renderer::RenderState;
    use rolii::sim::Viewport;
    use rolii::{Session, SetupError, Settings};

    // Feature detection for orientation events
    #[wasm_bindgen(inline_js = "
        export function orientation_supported() {
            return typeof window !== 'undefined' && 'DeviceOrientationEvent' in window;
        }
    ")]
    extern "C" {
        fn orientation_supported() -> bool;
    }

    /// Session plus frame timing for the animation-frame ticker
    struct Demo {
        session: Session,
        last_time: f64,
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Rolii starting...");

        if let Err(e) = start().await {
            log::error!("Startup failed: {}", e);
            wasm_bindgen::throw_str(&e.to_string());
        }
    }

    fn inner_viewport(window: &web_sys::Window) -> Viewport {
        let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport::from_inner_size(read(window.inner_width()), read(window.inner_height()))
    }

    async fn start() -> Result<(), SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoWindow)?;
        let viewport = inner_viewport(&window);

        // Board page: nothing else to do
        if document.get_element_by_id(BOARD_ELEMENT_ID).is_some() {
            return rolii::board::mount(&BoardLayout::for_viewport(BOARD_ELEMENT_ID, viewport));
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(VIEWPORT_ELEMENT_ID)
            .ok_or_else(|| SetupError::MissingElement {
                id: VIEWPORT_ELEMENT_ID.to_string(),
            })?
            .dyn_into()
            .map_err(|_| SetupError::WrongElementType {
                id: VIEWPORT_ELEMENT_ID.to_string(),
                expected: "canvas",
            })?;
        canvas.set_width(viewport.width);
        canvas.set_height(viewport.height);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let mut rng = Pcg32::seed_from_u64(seed);
        log::info!("Seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| SetupError::Renderer(e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| SetupError::Renderer(e.to_string()))?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, viewport.width, viewport.height).await?;

        let mut session = Session::new(settings, viewport, Box::new(render_state), &mut rng)?;
        if orientation_supported() {
            session.enable_orientation();
        } else {
            log::info!("Device orientation not supported, skipping");
        }

        let demo = Rc::new(RefCell::new(Demo {
            session,
            last_time: 0.0,
        }));
        setup_input_handlers(&window, &canvas, demo.clone());

        request_animation_frame(demo);

        log::info!("Rolii running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        demo: Rc<RefCell<Demo>>,
    ) {
        // Resize: canvas element first, then the session resizes surface and edges
        {
            let demo = demo.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let viewport = inner_viewport(&window);
                canvas.set_width(viewport.width);
                canvas.set_height(viewport.height);
                demo.borrow_mut().session.dispatch(&InputEvent::Resize {
                    width: viewport.width,
                    height: viewport.height,
                });
            });
            let _ = window.add_event_listener_with_callback_and_bool(
                "resize",
                closure.as_ref().unchecked_ref(),
                true,
            );
            closure.forget();
        }

        // Mouse move: only when the attractor follows the pointer
        if demo.borrow().session.handles(EventKind::MouseMove) {
            let demo = demo.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                demo.borrow_mut().session.dispatch(&InputEvent::MouseMove {
                    x: event.page_x() as f32,
                    y: event.page_y() as f32,
                });
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Device orientation
        if demo.borrow().session.handles(EventKind::DeviceOrientation) {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceOrientationEvent| {
                let reading = OrientationReading::new(event.alpha(), event.beta(), event.gamma());
                let mut d = demo.borrow_mut();
                d.session.dispatch(&InputEvent::DeviceOrientation(reading));
                if let Some(tilt) = d.session.last_tilt() {
                    update_tilt_readout(tilt.lr, tilt.fb);
                }
            });
            let _ = window.add_event_listener_with_callback(
                "deviceorientation",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }
    }

    /// Mirror the current tilt into optional page elements
    fn update_tilt_readout(lr: i32, fb: i32) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id(TILT_LR_ELEMENT_ID) {
            el.set_text_content(Some(&lr.to_string()));
        }
        if let Some(el) = document.get_element_by_id(TILT_FB_ELEMENT_ID) {
            el.set_text_content(Some(&fb.to_string()));
        }
    }

    fn request_animation_frame(demo: Rc<RefCell<Demo>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(demo, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(demo: Rc<RefCell<Demo>>, time: f64) {
        {
            let mut d = demo.borrow_mut();
            let dt = if d.last_time > 0.0 {
                (time - d.last_time) as f32
            } else {
                TIMESTEP_MS
            };
            d.last_time = time;
            d.session.advance(dt);
        }

        request_animation_frame(demo);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_demo::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use rolii::input::{InputEvent, OrientationReading};
    use rolii::renderer::Headless;
    use rolii::sim::Viewport;
    use rolii::{DemoVariant, Session, Settings};

    env_logger::init();
    log::info!("Rolii (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let settings = Settings::preset(DemoVariant::Swarm);
    let mut rng = Pcg32::seed_from_u64(settings.seed.unwrap_or(2024));
    let mut session = match Session::new(
        settings,
        Viewport::new(1280, 720),
        Box::new(Headless::new(1280, 720)),
        &mut rng,
    ) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };
    session.enable_orientation();

    // Two seconds of a pointer sweeping across the screen
    for frame in 0..120u32 {
        let x = frame as f32 / 120.0 * 1280.0;
        session.dispatch(&InputEvent::MouseMove { x, y: 360.0 });
        session.advance(1000.0 / 60.0);
    }

    session.dispatch(&InputEvent::Resize {
        width: 1024,
        height: 768,
    });

    // A phone shows up, tilted right
    for _ in 0..120 {
        session.dispatch(&InputEvent::DeviceOrientation(OrientationReading::new(
            Some(0.0),
            Some(2.0),
            Some(25.0),
        )));
        session.advance(1000.0 / 60.0);
    }

    let bodies = session.world().bodies();
    let mean_x = bodies.iter().map(|b| b.pos.x).sum::<f32>() / bodies.len().max(1) as f32;
    let bounds = session.viewport().bounds();
    let in_view = bodies.iter().filter(|b| bounds.contains(b.pos)).count();
    log::info!(
        "Simulated {:.0} ms in {} steps, orientation state {:?}, mean x {:.1}",
        session.world().time_ms,
        session.world().steps,
        session.orientation_state(),
        mean_x
    );
    log::info!(
        "{}/{} bodies in view, {} touching an edge",
        in_view,
        bodies.len(),
        session.world().contacts().len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
