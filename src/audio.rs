//! Best-effort audio feedback via the Web Audio API.
//!
//! A single `AudioContext` is created lazily and reused across beeps; the
//! continuous running tone keeps its oscillator and gain nodes here between
//! start and stop. Every call swallows Web Audio failures so a missing or
//! broken audio subsystem can never disturb the timing state machine.

use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use lapwatch::StopwatchEvent;
use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use crate::config::{
    BEEP_GAIN, LAP_TONE, PAUSE_TONE, RESET_TONE, RUNNING_TONE_GAIN, RUNNING_TONE_HZ, START_TONE,
};

thread_local! {
    // Survives component re-renders; thread-local is free in WASM.
    static FEEDBACK: RefCell<AudioFeedback> = RefCell::new(AudioFeedback::default());
}

#[derive(Default)]
struct AudioFeedback {
    ctx: Option<AudioContext>,
    running_osc: Option<OscillatorNode>,
    running_gain: Option<GainNode>,
}

impl AudioFeedback {
    /// Reusable context, recreated if the browser closed the previous one.
    fn context(&mut self) -> Option<AudioContext> {
        let stale = match &self.ctx {
            Some(ctx) => ctx.state() == AudioContextState::Closed,
            None => true,
        };
        if stale {
            self.ctx = AudioContext::new().ok();
        }
        self.ctx.clone()
    }

    /// Play a short sine beep, stopping the oscillator after `duration_ms`.
    fn beep(&mut self, freq: f32, duration_ms: u32) {
        let Some(ctx) = self.context() else { return };
        let Ok(osc) = ctx.create_oscillator() else {
            return;
        };
        let Ok(gain) = ctx.create_gain() else { return };

        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(freq);
        gain.gain().set_value(BEEP_GAIN);
        let _ = osc.connect_with_audio_node(&gain);
        let _ = gain.connect_with_audio_node(&ctx.destination());
        let _ = osc.start();

        Timeout::new(duration_ms, move || {
            let _ = osc.stop();
        })
        .forget();
    }

    fn start_running_tone(&mut self) {
        if self.running_osc.is_some() {
            // already humming
            return;
        }
        let Some(ctx) = self.context() else { return };
        let Ok(osc) = ctx.create_oscillator() else {
            return;
        };
        let Ok(gain) = ctx.create_gain() else { return };

        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(RUNNING_TONE_HZ);
        gain.gain().set_value(RUNNING_TONE_GAIN);
        let _ = osc.connect_with_audio_node(&gain);
        let _ = gain.connect_with_audio_node(&ctx.destination());
        if osc.start().is_ok() {
            self.running_osc = Some(osc);
            self.running_gain = Some(gain);
        }
    }

    fn stop_running_tone(&mut self) {
        if let Some(osc) = self.running_osc.take() {
            let _ = osc.stop();
            let _ = osc.disconnect();
        }
        if let Some(gain) = self.running_gain.take() {
            let _ = gain.disconnect();
        }
    }
}

/// Map an engine event onto its audible feedback.
pub fn notify(event: &StopwatchEvent) {
    FEEDBACK.with(|feedback| {
        let mut feedback = feedback.borrow_mut();
        match event {
            StopwatchEvent::Started => {
                feedback.beep(START_TONE.0, START_TONE.1);
                feedback.start_running_tone();
            }
            StopwatchEvent::Paused => {
                feedback.beep(PAUSE_TONE.0, PAUSE_TONE.1);
                feedback.stop_running_tone();
            }
            StopwatchEvent::Reset => {
                feedback.beep(RESET_TONE.0, RESET_TONE.1);
                feedback.stop_running_tone();
            }
            StopwatchEvent::LapRecorded(_) => {
                feedback.beep(LAP_TONE.0, LAP_TONE.1);
            }
        }
    });
}
