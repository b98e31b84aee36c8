//! Roast Runner entry point
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
        CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, PointerEvent,
    };

    use roast_runner::platform::storage::LocalStore;
    use roast_runner::platform::{FrameClock, JumpKeys, SuspendGate, input};
    use roast_runner::sim::parallax::SceneryKind;
    use roast_runner::sim::{
        GameEvent, GamePhase, GameState, ObstacleKind, PowerUpKind, Summary, TickInput, Viewport,
        tick,
    };
    use roast_runner::ui::{self, HudSnapshot, ToastQueue};
    use roast_runner::{BestScore, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        clock: FrameClock,
        keys: JumpKeys,
        gate: SuspendGate,
        settings: Settings,
        store: LocalStore,
        best: BestScore,
        toasts: ToastQueue,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        touch: bool,
        last_hud: Option<HudSnapshot>,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
            let mut store = LocalStore::open();
            let settings = Settings::load_or_init(&mut store);
            let best = BestScore::load(&store);
            let viewport = Viewport::from_width(canvas.client_width() as f32);

            let mut state = GameState::with_config(seed, Tuning::load(), viewport);
            state.best = best.value();

            let touch = web_sys::window()
                .map(|w| w.navigator().max_touch_points() > 0)
                .unwrap_or(false);

            Self {
                state,
                input: TickInput::default(),
                clock: FrameClock::new(),
                keys: JumpKeys::new(settings.hold_to_flap),
                gate: SuspendGate::from_settings(&settings),
                settings,
                store,
                best,
                toasts: ToastQueue::default(),
                canvas,
                ctx,
                touch,
                last_hud: None,
            }
        }

        /// Play button: refuse to start while the device is held sideways
        fn request_start(&mut self) {
            let (width, height) = window_size().unwrap_or((0.0, 0.0));
            if self.gate.orientation_ok(width, height, self.touch) {
                self.input.start = true;
            } else {
                let toast = ui::rotate_notice(self.settings.toast_ms);
                self.toasts.show(toast, js_sys::Date::now());
            }
        }

        /// Match the canvas backing store to the playfield
        fn sync_canvas_size(&self) {
            let viewport = self.state.viewport;
            self.canvas.set_width(viewport.width as u32);
            self.canvas.set_height(viewport.height as u32);
        }

        /// Flat-colour scene: sky, scenery, ground, pickups, obstacles, player
        fn paint(&self) {
            let ctx = &self.ctx;
            let state = &self.state;
            let (w, h) = (state.viewport.width as f64, state.viewport.height as f64);
            let ground_y = state.ground_y() as f64;

            ctx.set_fill_style_str("#2a1d33");
            ctx.fill_rect(0.0, 0.0, w, h);

            let layer_colors = ["#3a2a47", "#2f5d3a", "#4b3659"];
            for (layer, color) in state.parallax.layers.iter().zip(layer_colors) {
                ctx.set_fill_style_str(color);
                for item in &layer.items {
                    let (x, y) = (item.pos.x as f64, item.pos.y as f64);
                    let (iw, ih) = (item.size.x as f64, item.size.y as f64);
                    match item.kind {
                        SceneryKind::Building => ctx.fill_rect(x, y, iw, ih),
                        SceneryKind::Palm => {
                            ctx.fill_rect(x + iw * 0.45, y, iw * 0.1, ih);
                            fill_circle(ctx, x + iw * 0.5, y, iw * 0.5);
                        }
                    }
                }
            }

            ctx.set_fill_style_str("#5b3b24");
            ctx.fill_rect(0.0, ground_y, w, h - ground_y);

            ctx.set_fill_style_str("#ffd34d");
            for coin in state.coins.iter().filter(|c| !c.taken) {
                fill_circle(ctx, coin.pos.x as f64, coin.pos.y as f64, coin.radius as f64);
            }

            for pickup in state.pickups.iter().filter(|p| !p.taken) {
                ctx.set_fill_style_str(match pickup.kind {
                    PowerUpKind::Wings => "#7fd8ff",
                    PowerUpKind::Ghost => "#d9c8ff",
                });
                fill_circle(ctx, pickup.pos.x as f64, pickup.pos.y as f64, pickup.radius as f64);
            }

            for obstacle in &state.obstacles {
                ctx.set_fill_style_str(match obstacle.kind {
                    ObstacleKind::Grill => "#444444",
                    ObstacleKind::Cone => "#ff7a1a",
                });
                ctx.fill_rect(
                    obstacle.pos.x as f64,
                    obstacle.pos.y as f64,
                    obstacle.size.x as f64,
                    obstacle.size.y as f64,
                );
            }

            let player = &state.player;
            ctx.set_fill_style_str(match state.power.kind() {
                Some(PowerUpKind::Ghost) => "rgba(255,160,190,0.5)",
                _ => "#ffa0be",
            });
            ctx.fill_rect(
                player.pos.x as f64,
                player.pos.y as f64,
                player.size.x as f64,
                player.size.y as f64,
            );
        }

        /// Playfield size from the canvas layout width
        fn viewport(&self) -> Viewport {
            Viewport::from_width(self.canvas.client_width() as f32)
        }

        /// Run one simulation tick
        fn update(&mut self, now: f64) {
            let viewport = self.viewport();
            if viewport != self.state.viewport {
                self.state.resize(viewport);
                self.sync_canvas_size();
            }

            // Only live phases accumulate wall-clock time
            let dt = match self.state.phase {
                GamePhase::Running | GamePhase::GameOver => self.clock.delta(now),
                GamePhase::Idle | GamePhase::Paused => {
                    self.clock.resync(now);
                    0.0
                }
            };

            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input, dt);

            for event in self.state.drain_events() {
                self.handle_event(&event, now);
            }
        }

        fn handle_event(&mut self, event: &GameEvent, now: f64) {
            match event {
                GameEvent::Started => show_overlay(false),
                GameEvent::NewBest(score) => {
                    if let Err(e) = self.best.record(&mut self.store, *score) {
                        log::error!("Could not save best score: {e}");
                    }
                }
                GameEvent::GameOver { .. } => self.keys.clear(),
                GameEvent::ShowSummary(summary) => show_summary(summary),
                _ => {}
            }

            if self.settings.toasts {
                if let Some(toast) = ui::toast_for(event, self.settings.toast_ms) {
                    self.toasts.show(toast, now);
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, now: f64) {
            let Some(document) = document() else {
                return;
            };

            let hud = HudSnapshot::from_state(&self.state);
            if self.last_hud.as_ref() != Some(&hud) {
                set_text(&document, "score", &hud.score);
                set_text(&document, "best", &hud.best);
                set_text(&document, "level", &hud.level);
                set_text(&document, "coins", &hud.coins);
                set_text(&document, "powerName", &hud.power_name);
                set_text(&document, "powerTime", &hud.power_time);
                self.last_hud = Some(hud);
            }

            let pause_label = if self.state.phase == GamePhase::Paused {
                "Resume"
            } else {
                "Pause"
            };
            set_text(&document, "pauseBtn", pause_label);

            if let Some(el) = document.get_element_by_id("toast") {
                match self.toasts.visible(now) {
                    Some(toast) => {
                        el.set_text_content(Some(&toast.text));
                        let _ = el.class_list().add_1("show");
                    }
                    None => {
                        let _ = el.class_list().remove_1("show");
                    }
                }
            }
        }

        fn show_error(&mut self, message: &str) {
            log::error!("{message}");
            let now = js_sys::Date::now();
            self.toasts.show(ui::error_toast(message), now);
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn window_size() -> Option<(f32, f32)> {
        let window = web_sys::window()?;
        let width = window.inner_width().ok()?.as_f64()?;
        let height = window.inner_height().ok()?.as_f64()?;
        Some((width as f32, height as f32))
    }

    fn fill_circle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, r: f64) {
        ctx.begin_path();
        if ctx.arc(x, y, r, 0.0, std::f64::consts::TAU).is_ok() {
            ctx.fill();
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn show_overlay(show: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id("overlay")) {
            let classes = el.class_list();
            let _ = if show {
                classes.add_1("show")
            } else {
                classes.remove_1("show")
            };
        }
    }

    fn show_summary(summary: &Summary) {
        if let Some(document) = document() {
            set_text(&document, "overlayTitle", "Game Over!");
            set_text(&document, "overlayText", &ui::summary_line(summary));
            set_text(&document, "playBtn", "Play Again");
        }
        show_overlay(true);
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Roast Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, canvas.clone(), ctx)));
        game.borrow().sync_canvas_size();
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone())?;
        setup_buttons(&document, game.clone())?;
        setup_auto_pause(game.clone())?;
        setup_error_toast(game.clone())?;

        show_overlay(true);
        request_animation_frame(game);

        log::info!("Roast Runner running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Tap / click on the playfield
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                game.borrow_mut().input.jump = true;
            });
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let code = event.code();
                if input::is_jump_key(&code) {
                    event.prevent_default();
                    let wings = g.state.power.wings();
                    if g.keys.key_down(&code, event.repeat(), wings) {
                        g.input.jump = true;
                    }
                } else if input::is_pause_key(&event.key()) {
                    g.input.pause = true;
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.code());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let buttons: [(&str, fn(&mut Game)); 4] = [
            ("playBtn", Game::request_start),
            ("howBtn", |g| {
                let toast = ui::how_to_play(g.settings.toast_ms);
                g.toasts.show(toast, js_sys::Date::now());
            }),
            ("jumpBtn", |g| g.input.jump = true),
            ("pauseBtn", |g| g.input.pause = true),
        ];


        for (id, apply) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{id}");
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                apply(&mut game.borrow_mut());
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                let mut g = game.borrow_mut();
                if let Some(reason) = g.gate.visibility(hidden) {
                    g.input.suspend = Some(reason);
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if let Some(reason) = g.gate.blur() {
                    g.input.suspend = Some(reason);
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Rotation / resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some((width, height)) = window_size() else {
                    return;
                };
                let mut g = game.borrow_mut();
                let touch = g.touch;
                if let Some(reason) = g.gate.orientation(width, height, touch) {
                    g.input.suspend = Some(reason);
                }
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Surface uncaught script errors as a toast instead of a dead page
    fn setup_error_toast(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::ErrorEvent| {
            if let Ok(mut g) = game.try_borrow_mut() {
                g.show_error(&event.message());
            } else {
                log::error!("{}", event.message());
            }
        });
        window.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
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
            g.update(time);
            g.update_hud(time);
            g.paint();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use roast_runner::BestScore;
    use roast_runner::platform::MemoryStore;
    use roast_runner::sim::{GameEvent, GamePhase, GameState, TickInput, autopilot, tick};

    env_logger::init();
    log::info!("Roast Runner (native) starting...");
    log::info!("The browser build runs with `trunk serve`; native runs a headless demo");

    const DT: f32 = 1.0 / 60.0;
    const MAX_TICKS: u32 = 60 * 120;
    const RUNS: u32 = 3;

    let mut store = MemoryStore::new();
    let mut best = BestScore::load(&store);
    let mut state = GameState::new(0x5EED);
    state.best = best.value();

    for run in 1..=RUNS {
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, 0.0);

        let mut ticks = 0;
        while state.is_running() && ticks < MAX_TICKS {
            let input = TickInput {
                jump: autopilot::wants_jump(&state),
                ..Default::default()
            };
            tick(&mut state, &input, DT);
            ticks += 1;

            for event in state.drain_events() {
                match event {
                    GameEvent::NewBest(score) => {
                        if let Err(e) = best.record(&mut store, score) {
                            log::error!("Could not save best score: {e}");
                        }
                    }
                    GameEvent::LevelUp(level) => log::info!("Run {run}: level {level}"),
                    _ => {}
                }
            }
        }

        println!(
            "Run {run}: score {} coins {} level {} ({:.1}s)",
            state.score, state.coins_collected, state.level, state.time
        );

        if state.is_running() {
            log::info!("Run {run} survived the time limit");
            break;
        }

        // Let the overlay delay elapse so the next run can start
        while state.phase != GamePhase::Idle {
            tick(&mut state, &TickInput::default(), DT);
        }
        state.drain_events();
    }

    println!("Best: {}", best.value());
}
