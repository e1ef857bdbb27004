//! Core timing logic for the stopwatch: clock source, time formatting,
//! lap ledger, and the start/pause/reset state machine.
//!
//! Everything here is pure Rust over millisecond timestamps passed in by the
//! caller, so the whole module is testable on the host without a browser.

use log::{debug, info};
#[cfg(not(target_arch = "wasm32"))]
use once_cell::sync::Lazy;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Millisecond time source for the engine.
pub trait Clock {
    /// Current wall-clock reading in milliseconds.
    fn now_ms(&self) -> u64;
}

/// Platform clock. On wasm32 this reads `Date.now()`; on the host it reads
/// a process-relative monotonic instant so tests and tools can use it too.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[cfg(target_arch = "wasm32")]
impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

#[cfg(not(target_arch = "wasm32"))]
static PROCESS_START: Lazy<Instant> = Lazy::new(Instant::now);

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        PROCESS_START.elapsed().as_millis() as u64
    }
}

/// Format an elapsed duration as `HH:MM:SS.mmm`.
///
/// Fields are zero-padded to widths 2/2/2/3. The hours field is not clamped:
/// past 100 hours it simply grows wider.
pub fn format_elapsed(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// The display line for a recorded lap, e.g. `Lap 3: 00:01:12.480`.
pub fn lap_label(record: &LapRecord) -> String {
    format!("Lap {}: {}", record.index, format_elapsed(record.duration_ms))
}

/// One recorded lap: the elapsed value at the moment of the lap, paired with
/// its 1-based position in the ledger. Insertion order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LapRecord {
    pub index: usize,
    pub duration_ms: u64,
}

/// Append-only list of recorded laps with derived fastest/slowest stats.
///
/// Records are never reordered or removed individually; the only way to drop
/// them is [`LapLedger::clear`]. The stats are computed from the records on
/// demand, so they can never disagree with the list contents.
#[derive(Debug, Default, Clone)]
pub struct LapLedger {
    records: Vec<LapRecord>,
}

impl LapLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lap with the next sequential index and return it.
    pub fn record(&mut self, duration_ms: u64) -> LapRecord {
        let record = LapRecord {
            index: self.records.len() + 1,
            duration_ms,
        };
        self.records.push(record);
        record
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Recorded laps in insertion order.
    pub fn records(&self) -> &[LapRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Minimum recorded duration, `None` while the ledger is empty.
    pub fn fastest(&self) -> Option<u64> {
        self.records.iter().map(|r| r.duration_ms).min()
    }

    /// Maximum recorded duration, `None` while the ledger is empty.
    pub fn slowest(&self) -> Option<u64> {
        self.records.iter().map(|r| r.duration_ms).max()
    }
}

/// Engine state: `Reset` is the initial zeroed state, `Paused` keeps the
/// accumulated elapsed time frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchPhase {
    Reset,
    Running,
    Paused,
}

/// Event emitted by a successful engine transition. Feedback sinks consume
/// these; the engine itself does not care whether anyone listens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchEvent {
    Started,
    Paused,
    Reset,
    LapRecorded(LapRecord),
}

/// The stopwatch state machine. Owns the phase, the elapsed-time accumulator,
/// and the lap ledger; all operations take the current clock reading and are
/// total over the three phases (invalid transitions are silent no-ops).
///
/// While running, elapsed time is always recomputed as `now - start_reference`
/// rather than accumulated tick by tick, so display-refresh jitter can never
/// make it drift.
#[derive(Debug)]
pub struct Stopwatch {
    phase: StopwatchPhase,
    elapsed_ms: u64,
    start_reference_ms: u64,
    ledger: LapLedger,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            phase: StopwatchPhase::Reset,
            elapsed_ms: 0,
            start_reference_ms: 0,
            ledger: LapLedger::new(),
        }
    }

    pub fn phase(&self) -> StopwatchPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == StopwatchPhase::Running
    }

    /// Start or resume. Carries any previously accumulated elapsed time over
    /// by backdating the start reference. No-op while already running, which
    /// is what guarantees at most one display ticker ever gets spawned.
    pub fn start(&mut self, now_ms: u64) -> Option<StopwatchEvent> {
        if self.phase == StopwatchPhase::Running {
            return None;
        }
        self.start_reference_ms = now_ms.saturating_sub(self.elapsed_ms);
        self.phase = StopwatchPhase::Running;
        debug!(
            "started at {} ms with {} ms carried over",
            now_ms, self.elapsed_ms
        );
        Some(StopwatchEvent::Started)
    }

    /// Freeze the elapsed value. No-op unless running.
    pub fn pause(&mut self, now_ms: u64) -> Option<StopwatchEvent> {
        if self.phase != StopwatchPhase::Running {
            return None;
        }
        self.elapsed_ms = now_ms.saturating_sub(self.start_reference_ms);
        self.phase = StopwatchPhase::Paused;
        debug!("paused at {} ms elapsed", self.elapsed_ms);
        Some(StopwatchEvent::Paused)
    }

    /// Record the current elapsed value into the ledger without touching the
    /// timing state. No-op unless running.
    pub fn lap(&mut self, now_ms: u64) -> Option<StopwatchEvent> {
        if self.phase != StopwatchPhase::Running {
            return None;
        }
        let record = self.ledger.record(self.elapsed_ms(now_ms));
        debug!("lap {} recorded at {} ms", record.index, record.duration_ms);
        Some(StopwatchEvent::LapRecorded(record))
    }

    /// Zero the elapsed time and clear the ledger. Valid from any phase,
    /// including `Reset` itself.
    pub fn reset(&mut self) -> StopwatchEvent {
        self.elapsed_ms = 0;
        self.start_reference_ms = 0;
        self.phase = StopwatchPhase::Reset;
        self.ledger.clear();
        info!("stopwatch reset");
        StopwatchEvent::Reset
    }

    /// Elapsed milliseconds at the given clock reading.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.phase {
            StopwatchPhase::Running => now_ms.saturating_sub(self.start_reference_ms),
            _ => self.elapsed_ms,
        }
    }

    pub fn laps(&self) -> &[LapRecord] {
        self.ledger.records()
    }

    pub fn fastest_lap(&self) -> Option<u64> {
        self.ledger.fastest()
    }

    pub fn slowest_lap(&self) -> Option<u64> {
        self.ledger.slowest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero_and_padded_fields() {
        assert_eq!(format_elapsed(0), "00:00:00.000");
        assert_eq!(format_elapsed(999), "00:00:00.999");
        assert_eq!(format_elapsed(3_661_001), "01:01:01.001");
    }

    #[test]
    fn hours_widen_past_two_digits() {
        // 100 hours exactly
        assert_eq!(format_elapsed(360_000_000), "100:00:00.000");
        assert_eq!(format_elapsed(360_000_000 + 59_999), "100:00:59.999");
    }

    #[test]
    fn lap_label_uses_one_based_index() {
        let mut ledger = LapLedger::new();
        let rec = ledger.record(500);
        assert_eq!(lap_label(&rec), "Lap 1: 00:00:00.500");
    }

    #[test]
    fn basic_run_pause_resume() {
        let mut sw = Stopwatch::new();
        assert_eq!(sw.phase(), StopwatchPhase::Reset);
        assert_eq!(sw.elapsed_ms(0), 0);

        assert_eq!(sw.start(0), Some(StopwatchEvent::Started));
        assert_eq!(sw.elapsed_ms(0), 0);
        assert_eq!(sw.elapsed_ms(5_000), 5_000);

        assert_eq!(sw.pause(5_000), Some(StopwatchEvent::Paused));
        // Frozen regardless of further time passing.
        assert_eq!(sw.elapsed_ms(7_500), 5_000);

        assert_eq!(sw.start(8_000), Some(StopwatchEvent::Started));
        assert_eq!(sw.elapsed_ms(9_000), 6_000);
    }

    #[test]
    fn immediate_pause_resume_does_not_drift() {
        let mut sw = Stopwatch::new();
        sw.start(1_000);
        sw.pause(3_000);
        assert_eq!(sw.elapsed_ms(3_000), 2_000);

        // Start/pause repeatedly with no real time in between.
        for _ in 0..50 {
            sw.start(10_000);
            sw.pause(10_000);
        }
        assert_eq!(sw.elapsed_ms(99_999), 2_000);
    }

    #[test]
    fn start_while_running_is_a_noop() {
        let mut sw = Stopwatch::new();
        assert!(sw.start(0).is_some());
        // A second start must not move the reference.
        assert_eq!(sw.start(4_000), None);
        assert_eq!(sw.elapsed_ms(4_000), 4_000);
    }

    #[test]
    fn pause_and_lap_rejected_outside_running() {
        let mut sw = Stopwatch::new();
        assert_eq!(sw.pause(100), None);
        assert_eq!(sw.lap(100), None);
        assert!(sw.laps().is_empty());

        sw.start(0);
        sw.pause(500);
        assert_eq!(sw.lap(600), None);
        assert!(sw.laps().is_empty());
        assert_eq!(sw.fastest_lap(), None);
        assert_eq!(sw.slowest_lap(), None);
    }

    #[test]
    fn ledger_keeps_insertion_order_and_stats() {
        let mut ledger = LapLedger::new();
        for d in [500, 1_500, 300] {
            ledger.record(d);
        }
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.fastest(), Some(300));
        assert_eq!(ledger.slowest(), Some(1_500));
        let labels: Vec<String> = ledger.records().iter().map(lap_label).collect();
        assert_eq!(
            labels,
            vec![
                "Lap 1: 00:00:00.500",
                "Lap 2: 00:00:01.500",
                "Lap 3: 00:00:00.300",
            ]
        );
    }

    #[test]
    fn tied_laps_share_the_displayed_extreme() {
        let mut ledger = LapLedger::new();
        ledger.record(700);
        ledger.record(700);
        assert_eq!(ledger.fastest(), Some(700));
        assert_eq!(ledger.slowest(), Some(700));
    }

    #[test]
    fn reset_clears_everything_from_any_phase() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.lap(250);
        sw.lap(900);
        assert_eq!(sw.laps().len(), 2);

        assert_eq!(sw.reset(), StopwatchEvent::Reset);
        assert_eq!(sw.phase(), StopwatchPhase::Reset);
        assert_eq!(sw.elapsed_ms(5_000), 0);
        assert!(sw.laps().is_empty());
        assert_eq!(sw.fastest_lap(), None);
        assert_eq!(sw.slowest_lap(), None);

        // Idempotent: reset from Reset is fine.
        assert_eq!(sw.reset(), StopwatchEvent::Reset);
        assert_eq!(sw.elapsed_ms(0), 0);
    }

    #[test]
    fn elapsed_is_recomputed_from_the_reference() {
        let mut sw = Stopwatch::new();
        sw.start(100);
        // Irregular "tick" timings all agree because elapsed is not a sum of
        // deltas but a recomputation from the absolute reference.
        assert_eq!(sw.elapsed_ms(110), 10);
        assert_eq!(sw.elapsed_ms(173), 73);
        assert_eq!(sw.elapsed_ms(5_100), 5_000);
    }

    #[test]
    fn lap_records_current_elapsed_without_altering_timing() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        let event = sw.lap(2_000);
        assert_eq!(
            event,
            Some(StopwatchEvent::LapRecorded(LapRecord {
                index: 1,
                duration_ms: 2_000,
            }))
        );
        // Timing state untouched: elapsed keeps counting from the same start.
        assert_eq!(sw.elapsed_ms(3_000), 3_000);
    }

    #[test]
    fn system_clock_is_non_decreasing() {
        let clock = SystemClock;
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
