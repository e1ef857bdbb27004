//! Application-level configuration constants.

// Display refresh period while the stopwatch is running
pub const TICK_INTERVAL_MS: u32 = 10;

// Feedback tones as (frequency Hz, duration ms) pairs
pub const START_TONE: (f32, u32) = (700.0, 100);
pub const PAUSE_TONE: (f32, u32) = (400.0, 100);
pub const RESET_TONE: (f32, u32) = (200.0, 120);
pub const LAP_TONE: (f32, u32) = (900.0, 80);
pub const BEEP_GAIN: f32 = 0.08;

// Continuous soft tone while running: G4, quiet enough not to grate
pub const RUNNING_TONE_HZ: f32 = 392.0;
pub const RUNNING_TONE_GAIN: f32 = 0.025;

// UI strings
pub const NO_LAPS_PLACEHOLDER: &str = "--";
pub const LIGHT_THEME_CLASS: &str = "light";
