//! Drift Field entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{MediaQueryListEvent, MouseEvent};

    use drift_field::Settings;
    use drift_field::consts::*;
    use drift_field::render::{self, DomTarget, RenderTarget};
    use drift_field::sim::{
        Domain, FieldState, FrameInput, apply_radial_impulse, redistribute, tick,
    };

    /// App instance holding all state
    struct App {
        state: FieldState,
        target: DomTarget,
        input: FrameInput,
        settings: Settings,
        /// Host prefers-reduced-motion
        host_reduced_motion: bool,
        last_time: f64,
        is_mobile: bool,
    }

    impl App {
        /// One display frame: step the field, expire bursts, publish
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                MAX_FRAME_DT
            };
            self.last_time = time;

            self.input.cursor_attraction = self.settings.cursor_attraction;
            self.input.reduced_motion = self
                .settings
                .effective_reduced_motion(self.host_reduced_motion);

            tick(&mut self.state, &self.input, dt);

            for handle in self.state.step_bursts(dt) {
                self.target.remove(handle);
            }

            // Late-spawned bursts mount here
            render::mount(&mut self.state, &mut self.target);
            render::publish(&self.state, &mut self.target);
        }

        fn reduced_motion(&self) -> bool {
            self.settings
                .effective_reduced_motion(self.host_reduced_motion)
        }

        /// Breakpoint-crossing blast: kick the field outward from the
        /// viewport center and flash a burst there
        fn blast(&mut self) {
            if self.reduced_motion() {
                return;
            }
            let center = self.state.domain.center();
            apply_radial_impulse(&mut self.state, center, KICK_FORCE);
            if self.settings.bursts {
                self.state.spawn_burst(center);
            }
        }
    }

    fn viewport_domain(window: &web_sys::Window) -> Domain {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1.0) as f32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1.0) as f32;
        Domain::new(width, height)
    }

    fn media_matches(window: &web_sys::Window, query: &str) -> bool {
        window
            .match_media(query)
            .ok()
            .flatten()
            .map(|mq| mq.matches())
            .unwrap_or(false)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Drift Field starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // No wrapper element means no background field; degrade quietly
        let Some(mut target) = DomTarget::new(&document, "bgWrap") else {
            log::warn!("No #bgWrap element found, background field disabled");
            return;
        };

        let settings = Settings::load();
        let host_reduced_motion = media_matches(&window, "(prefers-reduced-motion: reduce)");
        let is_mobile = media_matches(&window, &format!("(max-width: {BREAKPOINT_PX}px)"));

        let seed = js_sys::Date::now() as u64;
        let domain = viewport_domain(&window);
        let mut state = FieldState::new(seed, settings.shape_count, domain, settings.mode);

        render::mount(&mut state, &mut target);

        let input = FrameInput {
            pointer: domain.center(),
            cursor_attraction: settings.cursor_attraction,
            ..FrameInput::default()
        };

        log::info!(
            "Field initialized: seed {}, {} shapes, {}x{}",
            seed,
            state.shapes.len(),
            domain.width,
            domain.height
        );

        let app = Rc::new(RefCell::new(App {
            state,
            target,
            input,
            settings,
            host_reduced_motion,
            last_time: 0.0,
            is_mobile,
        }));

        setup_pointer_tracking(app.clone());
        setup_resize(app.clone());
        setup_breakpoint_blast(app.clone());

        request_animation_frame(app);

        log::info!("Drift Field running!");
    }

    fn setup_pointer_tracking(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut a = app.borrow_mut();
            a.input.pointer = Vec2::new(event.client_x() as f32, event.client_y() as f32);
        });
        let _ = window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let win = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let domain = viewport_domain(&win);
            app.borrow_mut().state.set_domain(domain);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Blast when the layout crosses the mobile breakpoint; on the
    /// mobile-to-desktop crossing, also scatter the field across the wider
    /// viewport
    fn setup_breakpoint_blast(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let Ok(Some(mq)) = window.match_media(&format!("(max-width: {BREAKPOINT_PX}px)")) else {
            return;
        };

        let win = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MediaQueryListEvent| {
            let mut a = app.borrow_mut();
            let is_mobile = event.matches();
            if is_mobile == a.is_mobile {
                return;
            }

            a.blast();
            if !is_mobile && !a.reduced_motion() {
                let domain = viewport_domain(&win);
                redistribute(&mut a.state, domain);
            }
            a.is_mobile = is_mobile;
            log::info!("Breakpoint crossed (mobile: {is_mobile})");
        });
        let _ = mq.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;

    use drift_field::consts::{KICK_FORCE, SHAPE_COUNT};
    use drift_field::render::{self, RecordingTarget, RenderTarget};
    use drift_field::sim::{BoundsMode, Domain, FieldState, FrameInput, apply_radial_impulse, tick};

    env_logger::init();
    log::info!("Drift Field (native) starting headless smoke run...");

    let domain = Domain::new(800.0, 600.0);
    let mut state = FieldState::new(42, SHAPE_COUNT, domain, BoundsMode::Bounce);
    let mut target = RecordingTarget::default();
    render::mount(&mut state, &mut target);

    let input = FrameInput {
        pointer: domain.center(),
        ..FrameInput::default()
    };

    for frame in 0..600 {
        tick(&mut state, &input, 1.0 / 60.0);

        if frame == 300 {
            apply_radial_impulse(&mut state, domain.center(), KICK_FORCE);
            state.spawn_burst(domain.center());
            log::info!("Injected kick and burst at frame {frame}");
        }

        for handle in state.step_bursts(1.0 / 60.0) {
            target.remove(handle);
        }
        render::mount(&mut state, &mut target);
        render::publish(&state, &mut target);
    }

    log::info!(
        "Smoke run complete: {} shapes, {} visuals created, {} transform writes",
        state.shapes.len(),
        target.created.len(),
        target.writes
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
