//! Asteroid Drone entry point
//!
//! The browser build wires DOM events and requestAnimationFrame into the
//! game. The native build runs a headless autopilot for quick balance checks.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_host {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use asteroid_drone::audio::WebAudio;
    use asteroid_drone::consts::*;
    use asteroid_drone::persistence::LocalStorageStore;
    use asteroid_drone::platform::{Orientation, apply_key, client_to_playfield_y};
    use asteroid_drone::renderer::CanvasRenderer;
    use asteroid_drone::{Game, Phase, Settings, Tuning};

    type Shared = Rc<RefCell<Host>>;

    thread_local! {
        static INPUTS_ATTACHED: Cell<bool> = const { Cell::new(false) };
    }

    struct Host {
        game: Game,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        document: Document,
        /// A requestAnimationFrame callback is outstanding
        frame_requested: bool,
        shown_phase: Option<Phase>,
    }

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn missing(what: &str) -> JsValue {
        JsValue::from_str(&format!("missing {}", what))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        }
        log::info!("Asteroid Drone starting...");

        let window = web_sys::window().ok_or_else(|| missing("window"))?;
        let document = window.document().ok_or_else(|| missing("document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| missing("#gameCanvas"))?
            .dyn_into()?;
        let renderer = CanvasRenderer::new(&canvas).ok_or_else(|| missing("2d context"))?;

        let mut store = LocalStorageStore::new();
        let settings = Settings::load(&mut store);
        let audio = WebAudio::new(&settings);

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(Box::new(store), Box::new(audio), Tuning::default(), seed);
        log::info!("Game initialized with seed: {}", seed);

        let host = Rc::new(RefCell::new(Host {
            game,
            renderer,
            canvas,
            document,
            frame_requested: false,
            shown_phase: None,
        }));

        attach_inputs(&host)?;
        check_orientation(&host);
        after_command(&host);
        Ok(())
    }

    /// Refresh overlays and make sure a frame is pending if the loop is armed
    fn after_command(host: &Shared) {
        let needs_frame = {
            let mut h = host.borrow_mut();
            sync_ui(&mut h);
            h.game.is_loop_running() && !h.frame_requested
        };
        if needs_frame {
            request_frame(host.clone());
        }
    }

    fn request_frame(host: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        host.borrow_mut().frame_requested = true;
        let callback_host = host.clone();
        let closure = Closure::once(move |time: f64| on_frame(callback_host, time));
        if window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::error!("requestAnimationFrame failed");
            host.borrow_mut().frame_requested = false;
        }
        closure.forget();
    }

    fn on_frame(host: Shared, time: f64) {
        let running = {
            let mut h = host.borrow_mut();
            h.frame_requested = false;
            h.game.pump_timers(time);
            let Host { game, renderer, .. } = &mut *h;
            let running = game.frame(time, renderer);
            if h.shown_phase != Some(h.game.phase()) {
                sync_ui(&mut h);
            }
            running
        };
        if running {
            request_frame(host);
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.toggle_attribute_with_force("hidden", !visible);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Show the overlay that matches the current phase
    fn sync_ui(h: &mut Host) {
        let phase = h.game.phase();
        let doc = &h.document;

        set_visible(doc, "mainMenu", phase == Phase::Menu);
        set_visible(
            doc,
            "replayStoryBtn",
            phase == Phase::Menu && h.game.story_played(),
        );
        set_visible(doc, "storyScreen", phase == Phase::Story);
        set_visible(doc, "pauseModal", phase == Phase::Paused);
        set_visible(doc, "missionModal", phase == Phase::MissionEnd);

        if let Some(story) = h.game.story() {
            set_text(doc, "storyText", story.current_text());
            set_text(doc, "storyNextBtn", story.next_label());
            set_visible(doc, "storySkipBtn", story.can_skip());
        }

        if let Some(report) = h.game.report() {
            set_text(doc, "missionScore", &format!("Score: {}", report.score));
            set_text(
                doc,
                "missionHighScore",
                &format!("High score: {}", report.high_score),
            );
            set_visible(doc, "missionNewHigh", report.new_high_score);
        }

        h.shown_phase = Some(phase);
    }

    fn check_orientation(host: &Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let width = window.inner_width().ok().and_then(|v| v.as_f64());
        let height = window.inner_height().ok().and_then(|v| v.as_f64());
        let (Some(width), Some(height)) = (width, height) else {
            return;
        };
        let compatible = Orientation::from_viewport(width, height).is_compatible();
        {
            let mut h = host.borrow_mut();
            set_visible(&h.document, "rotate-prompt", !compatible);
            h.game.set_orientation(compatible, now());
        }
        after_command(host);
    }

    /// Register a click handler that runs a game command
    fn on_click(host: &Shared, id: &str, command: fn(&mut Game, f64)) {
        let Some(el) = host.borrow().document.get_element_by_id(id) else {
            log::warn!("Button #{} not found", id);
            return;
        };
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            command(&mut host.borrow_mut().game, now());
            after_command(&host);
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Playfield y of the first touch point
    fn touch_y(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<(f32, f32)> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 {
            return None;
        }
        let scale = canvas.width() as f64 / rect.width();
        let x = ((touch.client_x() as f64 - rect.left()) * scale) as f32;
        let y = client_to_playfield_y(touch.client_y() as f64, rect.top(), scale);
        Some((x, y))
    }

    fn in_hud(x: f32, y: f32) -> bool {
        x <= HEALTH_BAR_MARGIN + HEALTH_BAR_WIDTH && y <= HEALTH_BAR_MARGIN + HEALTH_BAR_HEIGHT
    }

    fn attach_inputs(host: &Shared) -> Result<(), JsValue> {
        if INPUTS_ATTACHED.with(|flag| flag.replace(true)) {
            return Ok(());
        }
        let window = web_sys::window().ok_or_else(|| missing("window"))?;
        let document = host.borrow().document.clone();
        let canvas = host.borrow().canvas.clone();

        // Keyboard
        for (kind, pressed) in [("keydown", true), ("keyup", false)] {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let handled = apply_key(&mut host.borrow_mut().game, &event.code(), pressed, now());
                if handled {
                    event.prevent_default();
                    after_command(&host);
                }
            });
            window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch: hold to fire, drag to steer
        {
            let host = host.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some((x, y)) = touch_y(&canvas_clone, &event) else {
                    return;
                };
                if !in_hud(x, y) {
                    host.borrow_mut().game.set_firing(true);
                }
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let host = host.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some((_, y)) = touch_y(&canvas_clone, &event) {
                    host.borrow_mut().game.touch_move(y);
                }
            });
            canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                host.borrow_mut().game.set_firing(false);
            });
            canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Auto-pause when the tab is hidden or the window loses focus
        {
            let host = host.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    host.borrow_mut().game.visibility_lost(now());
                    after_command(&host);
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                host.borrow_mut().game.visibility_lost(now());
                after_command(&host);
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                check_orientation(&host);
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        on_click(host, "playBtn", |game, now| game.play(now));
        on_click(host, "replayStoryBtn", |game, _| {
            game.replay_story();
        });
        on_click(host, "storyNextBtn", |game, now| game.story_next(now));
        on_click(host, "storySkipBtn", |game, now| game.story_skip(now));
        on_click(host, "resumeBtn", |game, now| {
            game.resume(now);
        });
        on_click(host, "exitBtn", |game, _| game.exit_to_menu());
        on_click(host, "playAgainBtn", |game, now| game.play_again(now));
        on_click(host, "exitMissionBtn", |game, _| game.exit_to_menu());

        log::info!("Input handlers attached");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    web_host::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Asteroid Drone (native) starting...");
    log::info!("Browser build: wasm-pack build --target web. Running headless autopilot.");

    let tuning = match std::env::args().nth(1) {
        Some(path) => native::load_tuning(&path),
        None => asteroid_drone::Tuning::default(),
    };
    native::autopilot(tuning);
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use asteroid_drone::audio::NullAudio;
    use asteroid_drone::persistence::{MemoryStore, keys};
    use asteroid_drone::renderer::HeadlessRenderer;
    use asteroid_drone::{Game, Phase, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    pub fn load_tuning(path: &str) -> Tuning {
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
        match parsed {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("Invalid tuning file {}: {} - using defaults", path, e);
                Tuning::default()
            }
        }
    }

    /// Steer toward the nearest incoming asteroid and hold fire
    fn steer(game: &mut Game) {
        let ship = &game.state().ship;
        let ship_center = ship.pos.y + ship.size.y / 2.0;
        let target = game
            .state()
            .asteroids
            .iter()
            .filter(|a| !a.destroyed && a.pos.x > ship.pos.x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
            .map(|a| a.pos.y + a.size.y / 2.0);

        let dy = target.map_or(0.0, |y| y - ship_center);
        game.set_move_up(dy < -4.0);
        game.set_move_down(dy > 4.0);
    }

    pub fn autopilot(tuning: Tuning) {
        let store = MemoryStore::new().with(keys::STORY_PLAYED, "true");
        let mut game = Game::new(Box::new(store), Box::new(NullAudio), tuning, 42);
        let mut renderer = HeadlessRenderer::new();

        let mut now = 0.0;
        game.play(now);
        game.set_firing(true);

        for _ in 0..MAX_FRAMES {
            now += FRAME_MS;
            game.pump_timers(now);
            if game.phase() == Phase::Playing {
                steer(&mut game);
            }
            if !game.frame(now, &mut renderer) {
                break;
            }
        }

        match game.report() {
            Some(report) => log::info!(
                "Autopilot survived {:.1}s: score {}, {} frames rendered",
                game.elapsed_secs(now),
                report.score,
                renderer.frames()
            ),
            None => log::info!(
                "Autopilot still alive after {:.1}s with score {}",
                game.elapsed_secs(now),
                game.state().score
            ),
        }
    }
}
