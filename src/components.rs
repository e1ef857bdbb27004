//! Pure Yew view components for the stopwatch UI.
//!
//! This module contains stateless components that render based on props,
//! keeping the event wiring in `main.rs`.

use crate::config::NO_LAPS_PLACEHOLDER;
use lapwatch::{format_elapsed, lap_label, LapRecord};
use yew::prelude::*;

/// Renders the recorded laps as an ordered list, insertion order preserved.
pub fn render_laps(laps: &[LapRecord]) -> Html {
    html! {
        <ul class="laps">
            { laps.iter().map(|record| {
                html! { <li key={record.index.to_string()}>{ lap_label(record) }</li> }
            }).collect::<Html>() }
        </ul>
    }
}

fn stat_text(value: Option<u64>) -> String {
    value
        .map(format_elapsed)
        .unwrap_or_else(|| NO_LAPS_PLACEHOLDER.to_string())
}

/// Fastest/slowest summary derived from the lap ledger.
#[derive(Properties, PartialEq)]
pub struct LapStatsProps {
    pub fastest: Option<u64>,
    pub slowest: Option<u64>,
}

#[function_component(LapStats)]
pub fn lap_stats(props: &LapStatsProps) -> Html {
    html! {
        <div class="lap-stats">
            <span class="fastest-lap">{ format!("Fastest: {}", stat_text(props.fastest)) }</span>
            <span class="slowest-lap">{ format!("Slowest: {}", stat_text(props.slowest)) }</span>
        </div>
    }
}

/// The large elapsed-time readout.
#[derive(Properties, PartialEq)]
pub struct TimeDisplayProps {
    pub elapsed_ms: u64,
}

#[function_component(TimeDisplay)]
pub fn time_display(props: &TimeDisplayProps) -> Html {
    html! {
        <div class="display">{ format_elapsed(props.elapsed_ms) }</div>
    }
}
