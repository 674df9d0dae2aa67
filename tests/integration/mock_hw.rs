//! Mock hardware adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO/PWM registers.

use mistwatch::app::events::AppEvent;
use mistwatch::app::ports::{DisplayPort, EventSink, SensorPort, TelemetryPort, TonePort};
use mistwatch::clock::Instant;
use mistwatch::fsm::context::EnvironmentalSample;
use mistwatch::risk::RiskLevel;
use mistwatch::CommsError;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorCall {
    SetTone(bool),
    SetIndicators { a: bool, b: bool },
    Render {
        risk: RiskLevel,
        humidity: i32,
        temperature: i32,
    },
}

// ── MockHardware ──────────────────────────────────────────────

/// Sensor values are plain fields — tests set them between ticks.
pub struct MockHardware {
    pub humidity_pct: f32,
    pub temperature_c: f32,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            humidity_pct: 45.0,
            temperature_c: 21.0,
            calls: Vec::new(),
        }
    }

    /// Latest buzzer level.
    pub fn tone_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetTone(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Latest frame pushed to the panel.
    pub fn last_render(&self) -> Option<ActuatorCall> {
        self.calls
            .iter()
            .rev()
            .find(|c| matches!(c, ActuatorCall::Render { .. }))
            .copied()
    }

    /// Number of ticks on which the buzzer was driven high.
    pub fn tone_on_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::SetTone(true)))
            .count()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn sample(&mut self, now: Instant) -> EnvironmentalSample {
        EnvironmentalSample {
            humidity_pct: self.humidity_pct,
            temperature_c: self.temperature_c,
            at: now,
        }
    }
}

impl TonePort for MockHardware {
    fn set_tone(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetTone(on));
    }

    fn set_phase_indicators(&mut self, a: bool, b: bool) {
        self.calls.push(ActuatorCall::SetIndicators { a, b });
    }
}

impl DisplayPort for MockHardware {
    fn render(&mut self, risk: RiskLevel, humidity: i32, temperature: i32) {
        self.calls.push(ActuatorCall::Render {
            risk,
            humidity,
            temperature,
        });
    }
}

// ── RecordingTelemetry ────────────────────────────────────────

/// TelemetryPort mock: records pushes, optionally failing every call.
pub struct RecordingTelemetry {
    pub fail_with: Option<CommsError>,
    pub reports: Vec<(i32, i32)>,
}

#[allow(dead_code)]
impl RecordingTelemetry {
    pub fn new() -> Self {
        Self {
            fail_with: None,
            reports: Vec::new(),
        }
    }

    pub fn failing(err: CommsError) -> Self {
        Self {
            fail_with: Some(err),
            reports: Vec::new(),
        }
    }
}

impl Default for RecordingTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryPort for RecordingTelemetry {
    fn report(&mut self, humidity: i32, temperature: i32) -> Result<(), CommsError> {
        if let Some(err) = self.fail_with {
            return Err(err);
        }
        self.reports.push((humidity, temperature));
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn escalations(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::AlarmEscalated { pulses } => Some(*pulses),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
