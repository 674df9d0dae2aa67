//! Shared mutable context threaded through every FSM handler.
//!
//! `MonitorContext` is the single struct that state handlers read from and
//! write to.  It contains the latest environmental reading, the alarm
//! scheduler, timing information, and configuration.  Think of it as the
//! "blackboard" in a blackboard architecture.

use crate::alarm::AlarmScheduler;
use crate::clock::Instant;
use crate::config::MonitorConfig;

// ---------------------------------------------------------------------------
// Environmental reading (read-only to state handlers; written per tick)
// ---------------------------------------------------------------------------

/// One humidity/temperature reading.  Produced once per tick, consumed and
/// discarded — no history is retained.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentalSample {
    /// Relative humidity, 0–100 %.
    pub humidity_pct: f32,
    /// Temperature in Celsius.
    pub temperature_c: f32,
    /// When the reading was taken (wrapping monotonic milliseconds).
    pub at: Instant,
}

// ---------------------------------------------------------------------------
// MonitorContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct MonitorContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,
    /// Current instant on the wrapping millisecond timeline.  Updated
    /// before each FSM tick.
    pub now: Instant,

    // -- Sensor data --
    /// Latest reading.  Updated before each FSM tick.
    pub sample: EnvironmentalSample,

    // -- Alarm --
    /// The escalating pulse-count alarm.  State entry/exit actions arm and
    /// reset it; the orchestrator steps it after the FSM tick.
    pub alarm: AlarmScheduler,

    // -- Configuration --
    /// System configuration (compiled-in thresholds).
    pub config: MonitorConfig,
}

impl MonitorContext {
    /// Create a new context with the given configuration.
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            now: Instant::default(),
            sample: EnvironmentalSample::default(),
            alarm: AlarmScheduler::new(&config),
            config,
        }
    }
}
