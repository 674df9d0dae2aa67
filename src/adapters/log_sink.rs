//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future network sink would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | state={:?} | risk={:?} | RH={:.1}% | T={:.1}\u{00b0}C | \
                     intervals={} pulses={} | tone={}",
                    t.state,
                    t.risk,
                    t.humidity_pct,
                    t.temperature_c,
                    t.interval_count,
                    t.pulses_remaining,
                    if t.tone_on { "ON" } else { "off" },
                );
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::AlarmEscalated { pulses } => {
                warn!("ALARM | escalated, burst of {} pulse(s)", pulses);
            }
            AppEvent::RiskChanged { from, to } => {
                info!("RISK  | {:?} -> {:?}", from, to);
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}
