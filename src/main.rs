//! Stopwatch application using Yew.
//! Wires UI components, the timing engine, and side-effect feedback.

use std::rc::Rc;

use gloo_timers::callback::Interval;
use lapwatch::{Clock, LapRecord, Stopwatch, StopwatchPhase, SystemClock};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

mod audio;
mod components;
mod config;

use components::{render_laps, LapStats, TimeDisplay};
use config::{LIGHT_THEME_CLASS, TICK_INTERVAL_MS};

/// Every control input (button or key) maps onto one of these commands, so
/// the input adapters stay outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Pause,
    Reset,
    Lap,
    ToggleTheme,
}

/// Primary application component owning the engine, the display refresh
/// ticker, and the render state derived from both.
#[function_component(Main)]
fn main_component() -> Html {
    // The engine lives outside render state: ticks read it without
    // re-rendering, and the keyboard listener reads its phase directly.
    let engine = use_mut_ref(Stopwatch::new);
    let display_ms = use_state(|| 0u64);
    let phase = use_state(|| StopwatchPhase::Reset);
    let laps = use_state(|| Rc::new(Vec::<LapRecord>::new()));
    let light_theme = use_state(|| false);
    // At most one ticker: replacing the handle drops (and cancels) the old one,
    // and the engine refuses a second start() while running.
    let ticker = use_state(|| None::<Interval>);

    let dispatch = {
        let engine = engine.clone();
        let display_ms = display_ms.clone();
        let phase = phase.clone();
        let laps = laps.clone();
        let light_theme = light_theme.clone();
        let ticker = ticker.clone();
        Callback::from(move |command: Command| {
            let now = SystemClock.now_ms();
            match command {
                Command::Start => {
                    let event = engine.borrow_mut().start(now);
                    if let Some(event) = event {
                        let engine = engine.clone();
                        let display_ms = display_ms.clone();
                        let handle = Interval::new(TICK_INTERVAL_MS, move || {
                            let now = SystemClock.now_ms();
                            display_ms.set(engine.borrow().elapsed_ms(now));
                        });
                        ticker.set(Some(handle));
                        phase.set(StopwatchPhase::Running);
                        audio::notify(&event);
                    }
                }
                Command::Pause => {
                    let event = engine.borrow_mut().pause(now);
                    if let Some(event) = event {
                        ticker.set(None);
                        display_ms.set(engine.borrow().elapsed_ms(now));
                        phase.set(StopwatchPhase::Paused);
                        audio::notify(&event);
                    }
                }
                Command::Reset => {
                    let event = engine.borrow_mut().reset();
                    ticker.set(None);
                    display_ms.set(0);
                    laps.set(Rc::new(Vec::new()));
                    phase.set(StopwatchPhase::Reset);
                    audio::notify(&event);
                }
                Command::Lap => {
                    let event = engine.borrow_mut().lap(now);
                    if let Some(event) = event {
                        laps.set(Rc::new(engine.borrow().laps().to_vec()));
                        audio::notify(&event);
                    }
                }
                Command::ToggleTheme => {
                    let _ = gloo_utils::body().class_list().toggle(LIGHT_THEME_CLASS);
                    light_theme.set(!*light_theme);
                }
            }
        })
    };

    // Global keyboard shortcuts: Space toggles, L laps, R resets. Registered
    // on the document once; the effect destructor removes the listener.
    {
        let dispatch = dispatch.clone();
        let engine = engine.clone();
        use_effect_with((), move |_| {
            let listener = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        let command = if engine.borrow().is_running() {
                            Command::Pause
                        } else {
                            Command::Start
                        };
                        dispatch.emit(command);
                    }
                    "KeyL" => dispatch.emit(Command::Lap),
                    "KeyR" => dispatch.emit(Command::Reset),
                    _ => {}
                }
            });
            let _ = gloo_utils::document()
                .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
            move || {
                let _ = gloo_utils::document().remove_event_listener_with_callback(
                    "keydown",
                    listener.as_ref().unchecked_ref(),
                );
            }
        });
    }

    let on_toggle = {
        let dispatch = dispatch.clone();
        let engine = engine.clone();
        Callback::from(move |_: MouseEvent| {
            let command = if engine.borrow().is_running() {
                Command::Pause
            } else {
                Command::Start
            };
            dispatch.emit(command);
        })
    };

    let toggle_label = if *phase == StopwatchPhase::Running {
        "Pause"
    } else {
        "Start"
    };
    let theme_glyph = if *light_theme { "☀️" } else { "🌙" };
    let (fastest, slowest) = {
        let engine = engine.borrow();
        (engine.fastest_lap(), engine.slowest_lap())
    };

    html! {
        <div class="container">
            <button class="theme-toggle"
                title="Toggle theme"
                onclick={dispatch.reform(|_: MouseEvent| Command::ToggleTheme)}
            >
                { theme_glyph }
            </button>

            <h1>{ "Stopwatch" }</h1>

            <TimeDisplay elapsed_ms={*display_ms} />

            <div class="controls">
                <button class="btn-primary" onclick={on_toggle}>{ toggle_label }</button>
                <button class="btn-secondary"
                    onclick={dispatch.reform(|_: MouseEvent| Command::Lap)}
                >
                    { "Lap" }
                </button>
                <button class="btn-secondary"
                    onclick={dispatch.reform(|_: MouseEvent| Command::Reset)}
                >
                    { "Reset" }
                </button>
            </div>

            <LapStats fastest={fastest} slowest={slowest} />

            { render_laps(laps.as_slice()) }
        </div>
    }
}

/// Entry point: initializes the panic hook and the Yew renderer.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<Main>::new().render();
}
