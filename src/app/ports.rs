//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensor, buzzer, display, telemetry, event sinks)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::clock::Instant;
use crate::error::CommsError;
use crate::fsm::context::EnvironmentalSample;
use crate::risk::RiskLevel;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per tick to obtain the
/// latest humidity/temperature reading.
///
/// Implementations must be infallible per tick: a transient bus error
/// retains the previous good reading rather than surfacing an error into
/// the control path.  Sensor *absence* is detected once at startup, before
/// the tick loop, and is fatal there.
pub trait SensorPort {
    /// Take one reading, stamped with the caller's `now`.
    fn sample(&mut self, now: Instant) -> EnvironmentalSample;
}

// ───────────────────────────────────────────────────────────────
// Tone port (driven adapter: domain → buzzer)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the alarm actuator.  Fire-and-forget: writes carry
/// no feedback and cannot fail.
pub trait TonePort {
    /// Drive the buzzer output.
    fn set_tone(&mut self, on: bool);

    /// Mirror the tone phase on the paired debug indicator pins
    /// (`a` follows the on-half, `b` the off-half).
    fn set_phase_indicators(&mut self, a: bool, b: bool);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → status panel)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the status panel: background colour keyed by risk
/// level plus the two numeric readouts.
pub trait DisplayPort {
    fn render(&mut self, risk: RiskLevel, humidity: i32, temperature: i32);
}

// ───────────────────────────────────────────────────────────────
// Telemetry port (driven adapter: domain → remote sink)
// ───────────────────────────────────────────────────────────────

/// Best-effort push of one reading to the remote sink.
///
/// Implementations must bound the call to a hard time budget well under
/// one control tick — a dead network is allowed to cost the budget, never
/// to stall alarm timing beyond it.  Errors are recoverable: the caller
/// logs and drops the sample, and the next tick's fresh sample is the de
/// facto retry.
pub trait TelemetryPort {
    fn report(&mut self, humidity: i32, temperature: i32) -> Result<(), CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, network,
/// etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
