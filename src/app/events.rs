//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them — log to serial, forward over the network,
//! etc.

use crate::fsm::StateId;
use crate::risk::RiskLevel;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The shower detector transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// The escalation interval elapsed; a burst of `pulses` is queued.
    AlarmEscalated { pulses: u8 },

    /// The mold-risk classification changed.
    RiskChanged { from: RiskLevel, to: RiskLevel },

    /// The application service has started (carries initial state).
    Started(StateId),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub state: StateId,
    pub risk: RiskLevel,
    pub humidity_pct: f32,
    pub temperature_c: f32,
    pub interval_count: u8,
    pub pulses_remaining: u8,
    pub tone_on: bool,
}
