//! Escalating pulse-count alarm.
//!
//! Two cooperating timers:
//!
//! 1. An **escalation interval** armed while a shower runs.  Each time it
//!    elapses the pending pulse count is rearmed to the new, larger interval
//!    count — a shower running N intervals long produces a burst of N pulses.
//! 2. A **tone sub-state machine** that drains the pending burst, one
//!    on/off half-cycle per `pulse_half_period_ms`:
//!
//! ```text
//!             interval fires (pulses := count)
//!   Silent ──────────────────────────────────▶ ToneOn ◀──┐
//!      ▲                                         │       │ deadline,
//!      │ pulses == 0                    deadline,│       │ pulses > 0
//!      │                                pulses-- ▼       │
//!      └────────────────────────────────────── ToneOff ──┘
//! ```
//!
//! The tone machine is stepped every tick regardless of shower state, so a
//! burst already queued keeps draining after the shower ends.  Ending the
//! shower resets only the escalation count.
//!
//! [`step_tone`](AlarmScheduler::step_tone) returns the actuation for the
//! phase *as of entry* and advances afterwards; the orchestrator evaluates
//! the interval timer after the tone step.  A burst scheduled this tick is
//! therefore first audible on the next tick — accepted latency for a
//! human-scale alarm.

use log::{debug, info};

use crate::clock::Instant;
use crate::config::MonitorConfig;

// ---------------------------------------------------------------------------
// Tone phases
// ---------------------------------------------------------------------------

/// Phase of the tone sub-state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TonePhase {
    /// No burst pending; actuator off.
    #[default]
    Silent,
    /// First half of a pulse; actuator on.
    ToneOn,
    /// Second half of a pulse; actuator off.
    ToneOff,
}

/// Actuator levels for one tick, derived from the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToneOutputs {
    /// Buzzer on.
    pub tone: bool,
    /// Debug indicator A — mirrors the ToneOn half.
    pub indicator_a: bool,
    /// Debug indicator B — mirrors the ToneOff half.
    pub indicator_b: bool,
}

impl ToneOutputs {
    fn for_phase(phase: TonePhase) -> Self {
        match phase {
            TonePhase::Silent => Self::default(),
            TonePhase::ToneOn => Self {
                tone: true,
                indicator_a: true,
                indicator_b: false,
            },
            TonePhase::ToneOff => Self {
                tone: false,
                indicator_a: false,
                indicator_b: true,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// The escalating alarm scheduler.
///
/// Owned by the FSM context and mutated in place once per tick; all timing
/// is wrap-safe via [`Instant`].
#[derive(Debug)]
pub struct AlarmScheduler {
    phase: TonePhase,
    /// Completed on/off cycles still owed to the listener.
    /// Decremented only on the ToneOn→ToneOff edge.
    pulses_remaining: u8,
    /// Escalation intervals elapsed during the current shower.
    interval_count: u8,
    phase_deadline: Instant,
    next_interval_deadline: Instant,
    interval_ms: u32,
    half_period_ms: u32,
}

impl AlarmScheduler {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            phase: TonePhase::Silent,
            pulses_remaining: 0,
            interval_count: 0,
            phase_deadline: Instant::default(),
            next_interval_deadline: Instant::default(),
            interval_ms: config.alarm_interval_ms,
            half_period_ms: config.pulse_half_period_ms,
        }
    }

    /// Schedule the first escalation.  Called on the Idle→Showering entry.
    pub fn arm(&mut self, now: Instant) {
        self.next_interval_deadline = now.plus_millis(self.interval_ms);
        debug!(
            "alarm: armed, first escalation in {}ms",
            self.interval_ms
        );
    }

    /// The shower ended.  Resets the escalation count so the next shower
    /// starts over at one pulse; a burst still draining is left alone.
    pub fn end_shower(&mut self) {
        self.interval_count = 0;
    }

    /// Drive the tone machine for one tick.
    ///
    /// Returns the actuation for the phase at entry, then performs any
    /// deadline-driven phase transition.
    pub fn step_tone(&mut self, now: Instant) -> ToneOutputs {
        let outputs = ToneOutputs::for_phase(self.phase);

        match self.phase {
            TonePhase::Silent => {}

            TonePhase::ToneOn => {
                if self.phase_deadline.has_elapsed(now) {
                    self.pulses_remaining = self.pulses_remaining.saturating_sub(1);
                    self.phase_deadline = now.plus_millis(self.half_period_ms);
                    self.phase = TonePhase::ToneOff;
                }
            }

            TonePhase::ToneOff => {
                if self.pulses_remaining == 0 {
                    self.phase = TonePhase::Silent;
                    debug!("alarm: burst drained");
                } else if self.phase_deadline.has_elapsed(now) {
                    self.phase_deadline = now.plus_millis(self.half_period_ms);
                    self.phase = TonePhase::ToneOn;
                }
            }
        }

        outputs
    }

    /// Evaluate the escalation interval.  Only fires while showering.
    ///
    /// On fire: the interval count goes up by one, the pending burst is
    /// rearmed to the new count (overwriting any partial drain), the tone
    /// machine is kicked into `ToneOn`, and the interval is rescheduled.
    /// Returns the new burst size when it fired.
    pub fn evaluate_interval(&mut self, now: Instant, showering: bool) -> Option<u8> {
        if !showering {
            return None;
        }
        if !self.next_interval_deadline.has_elapsed(now) {
            return None;
        }

        self.interval_count = self.interval_count.saturating_add(1);
        self.pulses_remaining = self.interval_count;
        self.phase = TonePhase::ToneOn;
        self.phase_deadline = now.plus_millis(self.half_period_ms);
        self.next_interval_deadline = now.plus_millis(self.interval_ms);

        info!(
            "alarm: escalation {} — {} pulse(s) queued",
            self.interval_count, self.pulses_remaining
        );
        Some(self.pulses_remaining)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn phase(&self) -> TonePhase {
        self.phase
    }

    pub fn pulses_remaining(&self) -> u8 {
        self.pulses_remaining
    }

    pub fn interval_count(&self) -> u8 {
        self.interval_count
    }

    /// True while a burst is pending or mid-drain.
    pub fn is_sounding(&self) -> bool {
        self.phase != TonePhase::Silent
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
