//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the shower-detector FSM, the alarm scheduler, and the
//! shared context.  It exposes a clean, hardware-agnostic API.  All I/O
//! flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │          AppService          │ ──▶ TelemetryPort
//!    TonePort ◀───│  Detector · Alarm · Risk     │
//!  DisplayPort ◀──└──────────────────────────────┘
//! ```

use log::{info, warn};

use crate::clock::Instant;
use crate::config::MonitorConfig;
use crate::fsm::context::MonitorContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::risk::{classify, RiskLevel};

use super::events::{AppEvent, TelemetryData};
use super::ports::{DisplayPort, EventSink, SensorPort, TelemetryPort, TonePort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: MonitorContext,
    risk: RiskLevel,
    tone_on: bool,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: MonitorConfig) -> Self {
        let ctx = MonitorContext::new(config);
        let state_table = build_state_table();
        let fsm = Fsm::new(state_table, StateId::Idle);

        Self {
            fsm,
            ctx,
            risk: RiskLevel::None,
            tone_on: false,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in its initial state (Idle).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle:
    /// sample → telemetry → detect → classify → alarm → render.
    ///
    /// The `hw` parameter satisfies [`SensorPort`], [`TonePort`] **and**
    /// [`DisplayPort`] — this avoids a triple mutable borrow while keeping
    /// the port boundary explicit.  Telemetry is a separate adapter because
    /// it lives on the network side.
    pub fn tick(
        &mut self,
        now: Instant,
        hw: &mut (impl SensorPort + TonePort + DisplayPort),
        telemetry: &mut impl TelemetryPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        let prev_state = self.fsm.current_state();

        // 1. Read the sensor via SensorPort
        let sample = hw.sample(now);
        self.ctx.sample = sample;
        self.ctx.now = now;

        let humidity = sample.humidity_pct as i32;
        let temperature = sample.temperature_c as i32;

        // 2. Best-effort telemetry push.  The adapter enforces a hard time
        //    budget; any failure costs this sample only.
        if let Err(e) = telemetry.report(humidity, temperature) {
            warn!("telemetry: {e} — sample dropped");
        }

        // 3. Shower detection (pure state logic)
        self.fsm.tick(&mut self.ctx);
        let state = self.fsm.current_state();

        // 4. Mold-risk classification with the post-transition state
        let risk = classify(state, sample.humidity_pct, sample.temperature_c, &self.ctx.config);

        // 5. Alarm: actuate the tone machine for the phase decided up to
        //    the previous tick, then evaluate the escalation interval.  A
        //    burst queued here becomes audible on the next tick.
        let out = self.ctx.alarm.step_tone(now);
        hw.set_tone(out.tone);
        hw.set_phase_indicators(out.indicator_a, out.indicator_b);
        self.tone_on = out.tone;

        if let Some(pulses) = self
            .ctx
            .alarm
            .evaluate_interval(now, state == StateId::Showering)
        {
            sink.emit(&AppEvent::AlarmEscalated { pulses });
        }

        // 6. Render the status panel
        hw.render(risk, humidity, temperature);

        // Emit edges after the full cycle so listeners see settled state.
        if state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: state,
            });
        }
        if risk != self.risk {
            sink.emit(&AppEvent::RiskChanged {
                from: self.risk,
                to: risk,
            });
            self.risk = risk;
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current context.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            state: self.fsm.current_state(),
            risk: self.risk,
            humidity_pct: self.ctx.sample.humidity_pct,
            temperature_c: self.ctx.sample.temperature_c,
            interval_count: self.ctx.alarm.interval_count(),
            pulses_remaining: self.ctx.alarm.pulses_remaining(),
            tone_on: self.tone_on,
        }
    }

    /// Current shower-detector state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Most recent mold-risk classification.
    pub fn risk(&self) -> RiskLevel {
        self.risk
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Clone of the live configuration.
    pub fn config(&self) -> MonitorConfig {
        self.ctx.config.clone()
    }
}
