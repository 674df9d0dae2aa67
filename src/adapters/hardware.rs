//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the sensor and actuator drivers, exposing them through
//! [`SensorPort`], [`TonePort`] and [`DisplayPort`].  This is the only
//! module in the system that touches actual hardware.  On non-espidf
//! targets, the underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{DisplayPort, SensorPort, TonePort};
use crate::clock::Instant;
use crate::drivers::buzzer::BuzzerDriver;
use crate::drivers::display::DisplayDriver;
use crate::fsm::context::EnvironmentalSample;
use crate::risk::RiskLevel;
use crate::sensors::aht20::Aht20Sensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor: Aht20Sensor,
    buzzer: BuzzerDriver,
    display: DisplayDriver,
}

impl HardwareAdapter {
    pub fn new(sensor: Aht20Sensor, buzzer: BuzzerDriver, display: DisplayDriver) -> Self {
        Self {
            sensor,
            buzzer,
            display,
        }
    }

    /// Silence the buzzer and clear the indicators — safe shutdown.
    pub fn all_off(&mut self) {
        self.buzzer.off();
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn sample(&mut self, now: Instant) -> EnvironmentalSample {
        let r = self.sensor.read();
        EnvironmentalSample {
            humidity_pct: r.humidity_pct,
            temperature_c: r.temperature_c,
            at: now,
        }
    }
}

// ── TonePort implementation ───────────────────────────────────

impl TonePort for HardwareAdapter {
    fn set_tone(&mut self, on: bool) {
        self.buzzer.set_tone(on);
    }

    fn set_phase_indicators(&mut self, a: bool, b: bool) {
        self.buzzer.set_indicators(a, b);
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl DisplayPort for HardwareAdapter {
    fn render(&mut self, risk: RiskLevel, humidity: i32, temperature: i32) {
        self.display.render(risk, humidity, temperature);
    }
}
