//! Sine Hop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use glam::Vec2;
    use sine_hop::consts::*;
    use sine_hop::renderer::RenderState;
    use sine_hop::sim::{GamePhase, GameState, RawInput, provider_for, tick};
    use sine_hop::{ControlScheme, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        settings: Settings,
        raw_input: RawInput,
        accumulator: f32,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Track phase transition for the win overlay
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed),
                render_state: None,
                settings,
                raw_input: RawInput::default(),
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_phase: GamePhase::Playing,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let provider = provider_for(self.settings.control_scheme);
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let intent = provider.intent(&self.raw_input);
                tick(&mut self.state, &intent, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            if self.settings.reduced_motion {
                self.state.camera = self.state.player.pos + CAMERA_OFFSET;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if self.settings.show_fps {
                if let Some(el) = document.get_element_by_id("hud-fps") {
                    el.set_text_content(Some(&self.fps.to_string()));
                }
            }

            // Win overlay on the Playing -> Cleared transition
            if self.state.phase != self.last_phase {
                if self.state.phase == GamePhase::Cleared {
                    log::info!(
                        "Goal reached after {:.1}s",
                        self.state.elapsed_secs()
                    );
                    if let Some(el) = document.get_element_by_id("goal-overlay") {
                        let _ = el.set_attribute("class", "");
                    }
                }
                self.last_phase = self.state.phase;
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sine Hop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game; ?controls=buttons|joystick overrides the stored scheme
        let mut settings = Settings::load();
        if let Ok(search) = window.location().search() {
            if let Some(value) = search.strip_prefix("?controls=") {
                if let Some(scheme) = ControlScheme::from_str(value) {
                    settings.control_scheme = scheme;
                    settings.save();
                }
            }
        }
        let scheme = settings.control_scheme;
        log::info!("Control scheme: {}", scheme.as_str());
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        log::info!("Session initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        // Set up input
        setup_keyboard(game.clone());
        setup_touch_controls(&document, game.clone(), scheme);
        setup_scheme_button(&document);
        setup_restart_button(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Sine Hop running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // keydown sets flags, keyup clears them; the sim's jump latch does
        // the edge detection, so both are plain level signals
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let keys = &mut g.raw_input.keys;
                match event.code().as_str() {
                    "KeyW" | "ArrowUp" => keys.forward = pressed,
                    "KeyS" | "ArrowDown" => keys.backward = pressed,
                    "KeyA" | "ArrowLeft" => keys.left = pressed,
                    "KeyD" | "ArrowRight" => keys.right = pressed,
                    "Space" => {
                        event.prevent_default();
                        keys.jump = pressed;
                    }
                    _ => return,
                }
                event.prevent_default();
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_controls(
        document: &web_sys::Document,
        game: Rc<RefCell<Game>>,
        scheme: ControlScheme,
    ) {
        // Show the overlay matching the configured scheme
        let (show_id, hide_id) = match scheme {
            ControlScheme::Buttons => ("touch-buttons", "touch-joystick"),
            ControlScheme::Joystick => ("touch-joystick", "touch-buttons"),
        };
        if let Some(el) = document.get_element_by_id(show_id) {
            let _ = el.set_attribute("class", "touch-overlay");
        }
        if let Some(el) = document.get_element_by_id(hide_id) {
            let _ = el.set_attribute("class", "touch-overlay hidden");
        }

        // Jump pad is shared by both schemes
        setup_touch_flag(document, "btn-jump", game.clone(), |raw, pressed| {
            raw.touch.jump = pressed;
        });

        match scheme {
            ControlScheme::Buttons => {
                setup_touch_flag(document, "pad-up", game.clone(), |raw, pressed| {
                    raw.touch.forward = pressed;
                });
                setup_touch_flag(document, "pad-down", game.clone(), |raw, pressed| {
                    raw.touch.backward = pressed;
                });
                setup_touch_flag(document, "pad-left", game.clone(), |raw, pressed| {
                    raw.touch.left = pressed;
                });
                setup_touch_flag(document, "pad-right", game.clone(), |raw, pressed| {
                    raw.touch.right = pressed;
                });
            }
            ControlScheme::Joystick => setup_joystick(document, game),
        }
    }

    /// Wire touchstart/touchend on an element to a boolean in RawInput
    fn setup_touch_flag(
        document: &web_sys::Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        apply: fn(&mut RawInput, bool),
    ) {
        let Some(el) = document.get_element_by_id(id) else {
            return; // Overlay not present in this page; skip silently
        };

        for (event_name, pressed) in [("touchstart", true), ("touchend", false), ("touchcancel", false)]
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                apply(&mut game.borrow_mut().raw_input, pressed);
            });
            let _ =
                el.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Joystick widget: the touch position relative to the widget center,
    /// scaled by its radius and clamped to the unit disk
    fn setup_joystick(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        let Some(el) = document.get_element_by_id("joystick") else {
            return;
        };

        for event_name in ["touchstart", "touchmove"] {
            let game = game.clone();
            let el_clone = el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = el_clone.get_bounding_client_rect();
                    let radius = (rect.width() / 2.0).max(1.0);
                    let cx = rect.left() + rect.width() / 2.0;
                    let cy = rect.top() + rect.height() / 2.0;
                    let mut dir = Vec2::new(
                        ((touch.client_x() as f64 - cx) / radius) as f32,
                        ((touch.client_y() as f64 - cy) / radius) as f32,
                    );
                    if dir.length_squared() > 1.0 {
                        dir = dir.normalize();
                    }
                    game.borrow_mut().raw_input.touch.stick = Some(dir);
                }
            });
            let _ =
                el.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for event_name in ["touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().raw_input.touch.stick = None;
            });
            let _ =
                el.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Toggle between the two touch schemes; persists and reloads so the
    /// overlay and provider are rebuilt from scratch
    fn setup_scheme_button(document: &web_sys::Document) {
        if let Some(btn) = document.get_element_by_id("controls-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut settings = Settings::load();
                settings.control_scheme = match settings.control_scheme {
                    ControlScheme::Buttons => ControlScheme::Joystick,
                    ControlScheme::Joystick => ControlScheme::Buttons,
                };
                settings.save();
                log::info!("Control scheme set to {}", settings.control_scheme.as_str());
                if let Some(window) = web_sys::window() {
                    let _ = window.location().reload();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                let mut g = game.borrow_mut();
                let render_state = g.render_state.take();
                let settings = g.settings.clone();
                *g = Game::new(seed, settings);
                g.render_state = render_state;

                let document = web_sys::window().unwrap().document().unwrap();
                if let Some(el) = document.get_element_by_id("goal-overlay") {
                    let _ = el.set_attribute("class", "hidden");
                }
                log::info!("Session restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sine Hop (native) starting...");
    log::info!("Native mode has no windowing - run with `trunk serve` for the web version");

    // Headless sanity run: settle, walk forward for two seconds
    use glam::Vec2;
    use sine_hop::consts::SIM_DT;
    use sine_hop::sim::{GameState, Intent, tick};

    let mut state = GameState::new(0xC0FFEE);
    let idle = Intent::default();
    for _ in 0..(3.0 / SIM_DT) as usize {
        tick(&mut state, &idle, SIM_DT);
    }
    let forward = Intent {
        dir: Vec2::new(0.0, -1.0),
        jump: false,
    };
    for _ in 0..(2.0 / SIM_DT) as usize {
        tick(&mut state, &forward, SIM_DT);
    }
    println!(
        "player at ({:.2}, {:.2}, {:.2}) after walking forward",
        state.player.pos.x, state.player.pos.y, state.player.pos.z
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
