//! Pong Rally entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement, KeyboardEvent,
        MouseEvent, TouchEvent,
    };

    use pong_rally::audio::AudioManager;
    use pong_rally::consts::*;
    use pong_rally::platform::{self, Persistence};
    use pong_rally::renderer::RenderState;
    use pong_rally::sim::{
        Board, Difficulty, Key, MatchContext, MatchState, Side, Snapshot, pointer_to_board_y,
    };
    use pong_rally::{GameError, HighScoreStore, Settings};

    /// Game instance holding all state
    struct Game {
        ctx: MatchContext,
        render_state: RenderState,
        audio: AudioManager,
        store: HighScoreStore,
        settings: Settings,
        /// Latest frame timestamp; DOM commands are stamped with it
        now: f64,
    }

    impl Game {
        /// Update, notify and render one frame
        fn frame(&mut self, time: f64) -> Result<(), GameError> {
            self.now = time;
            platform::run_frame(
                &mut self.ctx,
                time,
                &mut self.audio,
                &mut self.store,
                &mut self.render_state,
            )?;
            Ok(())
        }

        /// Board-space y for a client-space pointer position
        fn pointer_y(&self, canvas: &HtmlCanvasElement, client_y: i32) -> f32 {
            let rect = canvas.get_bounding_client_rect();
            pointer_to_board_y(
                client_y as f32,
                (rect.top() as f32, rect.width() as f32, rect.height() as f32),
                self.ctx.board(),
            )
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let snapshot = self.ctx.snapshot(self.now);

            set_text(document, "player-score", &snapshot.score_label(Side::Player));
            set_text(document, "ai-score", &snapshot.score_label(Side::Opponent));
            set_text(
                document,
                "high-score",
                &format!("High Score: {}", snapshot.high_score),
            );

            match snapshot.countdown_label() {
                Some(label) => {
                    set_text(document, "countdown", &label);
                    set_visible(document, "countdown", true);
                }
                None => set_visible(document, "countdown", false),
            }

            set_visible(
                document,
                "welcome-screen",
                snapshot.state == MatchState::Welcome,
            );
            self.update_game_over(document, &snapshot);
            self.update_pause_button(document, &snapshot);
        }

        fn update_game_over(&self, document: &Document, snapshot: &Snapshot) {
            set_visible(document, "game-over", snapshot.show_game_over);
            if let Some(banner) = snapshot.winner_banner() {
                set_text(document, "game-over-message", &banner);
            }
        }

        fn update_pause_button(&self, document: &Document, snapshot: &Snapshot) {
            let Some(btn) = document.get_element_by_id("pause-btn") else {
                return;
            };
            let label = if snapshot.state.is_paused() {
                "Resume"
            } else {
                "Pause"
            };
            if btn.text_content().as_deref() != Some(label) {
                btn.set_text_content(Some(label));
            }
            // Pausing is not allowed while counting down
            if snapshot.state.is_counting_down() {
                let _ = btn.set_attribute("disabled", "");
            } else {
                let _ = btn.remove_attribute("disabled");
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn log_rejected(result: Result<(), GameError>) {
        if let Err(e) = result {
            log::debug!("Command ignored: {}", e);
        }
    }

    fn document() -> Option<Document> {
        web_sys::window().and_then(|w| w.document())
    }

    pub async fn run() -> Result<(), GameError> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::warn!("Logger already initialized");
        }

        log::info!("Pong Rally starting...");

        let window = web_sys::window()
            .ok_or_else(|| GameError::SurfaceUnavailable("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| GameError::SurfaceUnavailable("no document".to_string()))?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| GameError::SurfaceUnavailable("no #canvas element".to_string()))?
            .dyn_into()
            .map_err(|_| GameError::SurfaceUnavailable("#canvas is not a canvas".to_string()))?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let store = HighScoreStore::load();
        let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT)?;

        let seed = js_sys::Date::now() as u64;
        let mut ctx = MatchContext::new(board, settings.difficulty, seed)
            .with_high_score(store.load_high_score());
        ctx.set_serve_mode(settings.serve_mode);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| GameError::SurfaceUnavailable(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GameError::SurfaceUnavailable(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, board).await?;

        if let Some(select) = document
            .get_element_by_id("difficulty-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(settings.difficulty.as_str());
        }

        let game = Rc::new(RefCell::new(Game {
            ctx,
            render_state,
            audio: AudioManager::from_settings(&settings),
            store,
            settings,
            now: 0.0,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Pong Rally running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - paddle centre follows the pointer
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let y = g.pointer_y(&canvas_clone, event.client_y());
                g.ctx.pointer_moved(y);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let y = g.pointer_y(&canvas_clone, touch.client_y());
                    g.ctx.pointer_moved(y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let now = g.now;
                match event.key().as_str() {
                    "Escape" | "p" | "P" => log_rejected(g.ctx.toggle_pause(now)),
                    key => {
                        let key = Key::from_dom(key);
                        if key != Key::Other {
                            event.prevent_default();
                        }
                        g.ctx.key_down(key);
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().ctx.key_up(Key::from_dom(&event.key()));
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("Missing #{} button", id);
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        // Start
        {
            let game = game.clone();
            let document_clone = document.clone();
            on_click(document, "start-btn", move || {
                let name = document_clone
                    .get_element_by_id("player-name-input")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                let now = g.now;
                log_rejected(g.ctx.start(&name, now));
            });
        }

        // Pause / resume
        {
            let game = game.clone();
            on_click(document, "pause-btn", move || {
                let mut g = game.borrow_mut();
                let now = g.now;
                log_rejected(g.ctx.toggle_pause(now));
            });
        }

        // Play again
        {
            let game = game.clone();
            on_click(document, "play-again-btn", move || {
                let mut g = game.borrow_mut();
                g.audio.resume();
                let now = g.now;
                log_rejected(g.ctx.play_again(now));
            });
        }

        // Exit to welcome
        {
            let game = game.clone();
            on_click(document, "exit-btn", move || {
                game.borrow_mut().ctx.exit();
            });
        }

        // Difficulty
        if let Some(select) = document
            .get_element_by_id("difficulty-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            let select_clone = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let difficulty = Difficulty::parse_or_default(&select_clone.value());
                let mut g = game.borrow_mut();
                let now = g.now;
                g.ctx.set_difficulty(difficulty, now);
                g.settings.difficulty = difficulty;
                g.settings.save();
            });
            let _ =
                select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            if let Err(e) = g.frame(time) {
                if e.is_fatal() {
                    log::error!("Stopping game loop: {}", e);
                    return;
                }
                log::warn!("Frame error: {}", e);
            }
            if let Some(document) = document() {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.settings.pause_on_blur && g.ctx.focus_lost() {
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.pause_on_blur && g.ctx.focus_lost() {
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {}", e);
    }
}

/// Simulated time cap for the headless demo
#[cfg(not(target_arch = "wasm32"))]
const DEMO_LIMIT_MS: f64 = 10.0 * 60.0 * 1000.0;

#[cfg(not(target_arch = "wasm32"))]
const DEMO_SEED: u64 = 0x5eed;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pong Rally (native) starting...");
    log::info!("Native mode runs a headless autopilot match - use `trunk serve` to play");

    if let Err(e) = run_headless() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Autopilot vs AI on a simulated 60 Hz clock
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> Result<(), pong_rally::GameError> {
    use pong_rally::consts::*;
    use pong_rally::platform::{self, LogSink, Persistence};
    use pong_rally::sim::{Board, MatchContext, MatchState};
    use pong_rally::{HighScoreStore, Settings};

    let settings = Settings::load();
    let mut store = HighScoreStore::load();
    let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT)?;

    let mut ctx = MatchContext::new(board, settings.difficulty, DEMO_SEED)
        .with_high_score(store.load_high_score());
    ctx.set_serve_mode(settings.serve_mode);
    ctx.set_autopilot(true);
    ctx.start(DEFAULT_PLAYER_NAME, 0.0)?;

    let mut notifications = LogSink::new();
    let mut presenter = LogSink::new();
    let mut now = 0.0;

    while now <= DEMO_LIMIT_MS {
        platform::run_frame(&mut ctx, now, &mut notifications, &mut store, &mut presenter)?;
        if let MatchState::GameOver { .. } = ctx.state() {
            break;
        }
        now += TICK_MS;
    }

    let snapshot = ctx.snapshot(now);
    match snapshot.winner_banner() {
        Some(banner) => log::info!("{} ({} frames)", banner, presenter.frames()),
        None => log::info!("No winner after {:.0}s of play", now / 1000.0),
    }
    log::info!("High score: {}", store.load_high_score());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
