//! Dragon Skirmish entry point
//!
//! Handles platform-specific initialization and runs the battle loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use dragon_skirmish::consts::*;
    use dragon_skirmish::renderer::canvas::CanvasPainter;
    use dragon_skirmish::renderer::{BattleView, DisplayList};
    use dragon_skirmish::sim::{
        ActorId, BattleEvent, BattleState, InputEvent, Side, TickInput, tick,
    };
    use dragon_skirmish::{CombatTuning, Settings};

    /// Battle instance holding all state
    struct Game {
        state: BattleState,
        settings: Settings,
        view: BattleView,
        display: DisplayList,
        painter: CanvasPainter,
        canvas: HtmlCanvasElement,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Marker currently held by the pointer
        dragging: Option<ActorId>,
        announced_winner: bool,
    }

    impl Game {
        fn new(state: BattleState, painter: CanvasPainter, canvas: HtmlCanvasElement) -> Self {
            Self {
                state,
                settings: Settings::load(),
                view: BattleView::new(),
                display: DisplayList::new(),
                painter,
                canvas,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                dragging: None,
                announced_winner: false,
            }
        }

        fn restart(&mut self, seed: u64) {
            match BattleState::new(seed, self.state.tuning().clone()) {
                Ok(mut state) => {
                    state.spawn_skirmish();
                    self.state = state;
                    self.view = BattleView::new();
                    self.display = DisplayList::new();
                    self.input = TickInput::default();
                    self.dragging = None;
                    self.announced_winner = false;
                    log::info!("Battle restarted with seed: {}", seed);
                }
                Err(e) => log::error!("Restart failed: {}", e),
            }
        }

        /// Map a pointer position in CSS pixels into arena coordinates
        fn to_arena(&self, event: &PointerEvent) -> Vec2 {
            let w = self.canvas.client_width().max(1) as f32;
            let h = self.canvas.client_height().max(1) as f32;
            Vec2::new(
                event.offset_x() as f32 * ARENA_WIDTH / w,
                event.offset_y() as f32 * ARENA_HEIGHT / h,
            )
        }

        fn pointer_down(&mut self, at: Vec2) {
            if let Some(actor) = self.state.marker_at(at, Side::Player) {
                self.dragging = Some(actor);
                self.input.events.push(InputEvent::DragStart { actor, at });
            } else if let Some(actor) = self.state.actor_at(at) {
                self.input.events.push(InputEvent::PointerDown { actor });
            }
        }

        fn pointer_move(&mut self, at: Vec2) {
            if let Some(actor) = self.dragging {
                self.input.events.push(InputEvent::Drag { actor, at });
            }
        }

        fn pointer_up(&mut self, at: Vec2) {
            if let Some(actor) = self.dragging.take() {
                self.input.events.push(InputEvent::DragEnd { actor, at });
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                // Buffered input belongs to the first substep only
                let input = std::mem::take(&mut self.input);
                for event in tick(&mut self.state, &input) {
                    log_event(&event);
                }
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            if !self.announced_winner {
                if let Some(side) = self.state.winner() {
                    log::info!("{:?} side wins after {} ticks", side, self.state.time_ticks);
                    self.announced_winner = true;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            self.view.sync(&mut self.display, &self.state, &self.settings);
            if let Err(e) = self.painter.paint(&self.display) {
                log::warn!("Render error: {:?}", e);
            }
        }
    }

    fn log_event(event: &BattleEvent) {
        match event {
            BattleEvent::ActorDefeated { actor, by } => {
                log::info!("actor {} defeated by {}", actor.0, by.0)
            }
            other => log::debug!("{:?}", other),
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Dragon Skirmish starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // The backing store is arena-sized; CSS scales it to the page
        canvas.set_width(ARENA_WIDTH as u32);
        canvas.set_height(ARENA_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;
        let painter = CanvasPainter::new(ctx, ARENA_WIDTH as f64, ARENA_HEIGHT as f64);

        let seed = js_sys::Date::now() as u64;
        let mut state = BattleState::new(seed, CombatTuning::default())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        state.spawn_skirmish();
        log::info!("Battle initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game::new(state, painter, canvas.clone())));

        setup_input_handlers(&canvas, game.clone())?;

        request_animation_frame(game);

        log::info!("Dragon Skirmish running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Pointer down - grab a marker or click a dragon
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let at = g.to_arena(&event);
                g.pointer_down(at);
            });
            canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer move - drag the held marker
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let at = g.to_arena(&event);
                g.pointer_move(at);
            });
            canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer up/leave - release the marker
        for name in ["pointerup", "pointerleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let at = g.to_arena(&event);
                g.pointer_up(at);
            });
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "Escape" | "p" | "P" => g.input.pause = true,
                    "f" | "F" => {
                        g.settings.toggle_overlays();
                        g.settings.save();
                        log::info!("Overlays: {}", g.settings.show_field_of_view);
                    }
                    "r" | "R" => g.restart(js_sys::Date::now() as u64),
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
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
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use dragon_skirmish::CombatTuning;
    use dragon_skirmish::sim::{BattleEvent, BattleState, TickInput, tick};

    env_logger::init();
    log::info!("Dragon Skirmish (native) starting...");
    log::info!("Native mode runs a headless battle - run with `trunk serve` for the web version");

    // Usage: dragon-skirmish [seed] [ticks] [tuning.json]
    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(1);
    let ticks: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(3600);
    let tuning = match args.next() {
        Some(path) => CombatTuning::from_json(&std::fs::read_to_string(path)?)?,
        None => CombatTuning::default(),
    };

    let mut state = BattleState::new(seed, tuning)?;
    let (player, enemy) = state.spawn_skirmish();
    log::info!("seed {}: player {} vs enemy {}", seed, player.0, enemy.0);

    let input = TickInput::default();
    for _ in 0..ticks {
        for event in tick(&mut state, &input) {
            match event {
                BattleEvent::ActorDefeated { actor, by } => {
                    log::info!("tick {}: actor {} defeated by {}", state.time_ticks, actor.0, by.0)
                }
                other => log::debug!("tick {}: {:?}", state.time_ticks, other),
            }
        }
        if let Some(side) = state.winner() {
            log::info!("{:?} side wins after {} ticks", side, state.time_ticks);
            return Ok(());
        }
    }

    log::info!("No winner after {} ticks", state.time_ticks);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
