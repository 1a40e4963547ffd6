//! Neon Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use neon_snake::consts::*;
    use neon_snake::input::InputState;
    use neon_snake::platform::{canvas_to_world, map_key};
    use neon_snake::renderer::{RenderState, build_scene};
    use neon_snake::settings::Settings;
    use neon_snake::sim::{GameState, Screen, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        settings: Settings,
        input: InputState,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed).expect("valid game configuration"),
                render_state: None,
                settings: Settings::load(),
                input: InputState::new(),
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one simulation step with wall-clock dt
        fn update(&mut self, dt: f32, time: f64) {
            let head = self.state.snake.head();
            let head_center = head.pos + head.size / 2.0;
            let input = self.input.gather(self.state.screen, head_center);
            tick(&mut self.state, &input, dt);

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
            let vertices = build_scene(&self.state, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
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
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-lives .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.lives.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-level .hud-value").ok().flatten() {
                el.set_text_content(Some(&(self.state.level + 1).to_string()));
            }
            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                let text = if self.settings.show_fps {
                    self.fps.to_string()
                } else {
                    String::new()
                };
                el.set_text_content(Some(&text));
            }

            // Menu with level select
            if let Some(el) = document.get_element_by_id("menu") {
                if self.state.screen == Screen::Menu {
                    let _ = el.set_attribute("class", "");
                    if let Some(level_el) = document.get_element_by_id("menu-level") {
                        level_el.set_text_content(Some(&(self.state.level + 1).to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Unpause prompt while the snake waits
            if let Some(el) = document.get_element_by_id("start-prompt") {
                if self.state.screen == Screen::Active && self.state.snake.paused {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Win splash
            if let Some(el) = document.get_element_by_id("win-screen") {
                if self.state.screen == Screen::Win {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Snake starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

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
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        log::info!("Game initialized with seed: {}", seed);

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

        setup_input_handlers(&canvas, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Neon Snake running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = map_key(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().input.key_down(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard release
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = map_key(&event.key()) {
                    game.borrow_mut().input.key_up(key);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click steers toward the clicked world point
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let w = canvas_clone.client_width() as f32;
                let h = canvas_clone.client_height() as f32;
                let world =
                    canvas_to_world(event.offset_x() as f32, event.offset_y() as f32, w, h);
                game.borrow_mut().input.mouse_click(world);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
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

            let elapsed = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                MIN_FRAME_DT
            };

            // Frame gate: below the threshold, skip without consuming time so
            // fast displays still tick at wall-clock rate
            if elapsed >= MIN_FRAME_DT {
                g.last_time = time;
                let dt = elapsed.min(MAX_FRAME_DT);
                g.update(dt, time);
                g.render();
                g.update_hud();
            }
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
    use neon_snake::consts::*;
    use neon_snake::sim::{GameState, Screen, TickInput, tick};

    env_logger::init();
    log::info!("Neon Snake (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let mut state = match GameState::new(42) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Bad game configuration: {e}");
            std::process::exit(1);
        }
    };

    // Drive a short headless session: start, unpause, steer in a square
    let start = TickInput {
        start: true,
        ..TickInput::default()
    };
    tick(&mut state, &start, MIN_FRAME_DT);
    tick(&mut state, &start, MIN_FRAME_DT);

    let headings = [
        glam::Vec2::new(1.0, 0.0),
        glam::Vec2::new(0.0, 1.0),
        glam::Vec2::new(-1.0, 0.0),
        glam::Vec2::new(0.0, -1.0),
    ];
    for (i, heading) in headings.iter().cycle().take(16).enumerate() {
        let input = TickInput {
            steer: Some(*heading),
            ..TickInput::default()
        };
        for _ in 0..30 {
            tick(&mut state, &input, MIN_FRAME_DT);
            if state.screen != Screen::Active {
                break;
            }
        }
        if i % 4 == 3 {
            log::info!(
                "tick {}: head at {:?}, score {}, lives {}",
                state.time_ticks,
                state.snake.head().pos,
                state.score,
                state.lives
            );
        }
    }

    println!(
        "Demo finished: {} ticks, score {}, snake length {}",
        state.time_ticks,
        state.score,
        state.snake.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
