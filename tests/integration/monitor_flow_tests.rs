//! End-to-end tick scenarios for the monitor pipeline.
//!
//! These run on the host (x86_64) and verify the full chain from a
//! humidity reading down to buzzer and panel commands, including the
//! cross-component timing the components cannot test alone.

use crate::mock_hw::{ActuatorCall, MockHardware, RecordingSink, RecordingTelemetry};

use mistwatch::app::events::AppEvent;
use mistwatch::app::service::AppService;
use mistwatch::clock::Instant;
use mistwatch::config::MonitorConfig;
use mistwatch::fsm::StateId;
use mistwatch::risk::RiskLevel;
use mistwatch::CommsError;

const TICK_MS: u32 = 1_000;

/// One app service wired to recording mocks, advanced a tick at a time.
struct Harness {
    app: AppService,
    hw: MockHardware,
    telemetry: RecordingTelemetry,
    sink: RecordingSink,
    t_ms: u32,
}

impl Harness {
    fn new() -> Self {
        Self::with_telemetry(RecordingTelemetry::new())
    }

    fn with_telemetry(telemetry: RecordingTelemetry) -> Self {
        let mut app = AppService::new(MonitorConfig::default());
        let mut sink = RecordingSink::new();
        app.start(&mut sink);
        Self {
            app,
            hw: MockHardware::new(),
            telemetry,
            sink,
            t_ms: 0,
        }
    }

    fn tick(&mut self) {
        self.t_ms += TICK_MS;
        self.app.tick(
            Instant::from_millis(self.t_ms),
            &mut self.hw,
            &mut self.telemetry,
            &mut self.sink,
        );
    }

    /// Tick until the simulated clock reaches `ms` (inclusive).
    fn tick_until(&mut self, ms: u32) {
        while self.t_ms < ms {
            self.tick();
        }
    }
}

fn interval_ms() -> u32 {
    MonitorConfig::default().alarm_interval_ms
}

// ── Shower detection → first escalation → single pulse ────────

#[test]
fn shower_start_first_interval_plays_exactly_one_pulse() {
    let mut h = Harness::new();

    // Ambient: stays idle and silent.
    h.hw.humidity_pct = 55.0;
    h.tick();
    assert_eq!(h.app.state(), StateId::Idle);

    // Steam rises; the detector trips at the next tick.
    h.hw.humidity_pct = 65.0;
    let shower_start = h.t_ms + TICK_MS;
    h.tick();
    assert_eq!(h.app.state(), StateId::Showering);

    // Nothing audible until one full interval has passed.
    let first_fire = shower_start + interval_ms();
    h.tick_until(first_fire - TICK_MS);
    assert_eq!(h.hw.tone_on_count(), 0);
    assert_eq!(h.sink.escalations(), Vec::<u8>::new());

    // The interval elapses: burst queued, not yet audible this tick.
    h.tick();
    assert_eq!(h.t_ms, first_fire);
    assert_eq!(h.sink.escalations(), vec![1]);
    assert!(!h.hw.tone_on(), "escalation tick itself stays silent");

    // Next tick: the single pulse sounds.  Then it drains and all stays
    // quiet through the rest of the interval.
    h.tick();
    assert!(h.hw.tone_on());
    h.tick();
    assert!(!h.hw.tone_on());

    let before = h.hw.tone_on_count();
    h.tick_until(first_fire + interval_ms() - TICK_MS);
    assert_eq!(h.hw.tone_on_count(), before, "one pulse means one on-tick");
}

// ── Escalation: second interval queues two pulses ─────────────

#[test]
fn second_interval_escalates_to_two_pulses() {
    let mut h = Harness::new();
    h.hw.humidity_pct = 65.0;
    h.tick(); // Idle -> Showering at t=1000

    let start = h.t_ms;
    h.tick_until(start + 2 * interval_ms() + 6 * TICK_MS);

    assert_eq!(h.sink.escalations(), vec![1, 2]);
    // One on-tick from the first burst, two from the second.
    assert_eq!(h.hw.tone_on_count(), 3);
}

// ── Post-shower drain ─────────────────────────────────────────

#[test]
fn pending_burst_drains_after_shower_ends() {
    let mut h = Harness::new();
    h.hw.humidity_pct = 65.0;
    h.tick(); // Showering at t=1000

    let fire = h.t_ms + interval_ms();
    h.tick_until(fire);
    assert_eq!(h.sink.escalations(), vec![1]);

    // Humidity collapses before the pulse has played.
    h.hw.humidity_pct = 52.0;
    h.tick();
    assert_eq!(h.app.state(), StateId::Idle, "detector resets immediately");
    assert!(
        h.hw.tone_on(),
        "in-flight pulse still sounds after the shower ends"
    );

    // Drain completes, then the system is permanently silent.
    h.tick();
    assert!(!h.hw.tone_on());
    let on_ticks = h.hw.tone_on_count();
    h.tick_until(h.t_ms + 3 * interval_ms());
    assert_eq!(h.hw.tone_on_count(), on_ticks, "no escalation while idle");
    assert_eq!(h.sink.escalations(), vec![1]);
}

// ── Telemetry isolation ───────────────────────────────────────

#[test]
fn telemetry_failures_never_perturb_detection_or_alarm() {
    let mut good = Harness::new();
    let mut bad = Harness::with_telemetry(RecordingTelemetry::failing(CommsError::Timeout));

    for h in [&mut good, &mut bad] {
        h.hw.humidity_pct = 68.0;
        h.hw.temperature_c = 26.0;
        let end = interval_ms() + 8 * TICK_MS;
        h.tick_until(end);
        h.hw.humidity_pct = 50.0;
        h.tick_until(end + 5 * TICK_MS);
    }

    assert!(bad.telemetry.reports.is_empty());
    assert!(!good.telemetry.reports.is_empty());

    // Identical behavior on every safety-relevant axis.
    assert_eq!(good.app.state(), bad.app.state());
    assert_eq!(good.sink.escalations(), bad.sink.escalations());
    assert_eq!(good.hw.calls, bad.hw.calls);
}

// ── Per-tick reporting ────────────────────────────────────────

#[test]
fn every_tick_pushes_one_integer_reading() {
    let mut h = Harness::new();
    h.hw.humidity_pct = 61.7;
    h.hw.temperature_c = 24.9;

    for _ in 0..5 {
        h.tick();
    }

    assert_eq!(h.telemetry.reports.len(), 5);
    assert!(h.telemetry.reports.iter().all(|&r| r == (61, 24)));
}

// ── Risk rendering ────────────────────────────────────────────

#[test]
fn panel_follows_risk_classification() {
    let mut h = Harness::new();

    // Idle: no risk.
    h.hw.humidity_pct = 45.0;
    h.hw.temperature_c = 21.0;
    h.tick();
    assert_eq!(
        h.hw.last_render(),
        Some(ActuatorCall::Render {
            risk: RiskLevel::None,
            humidity: 45,
            temperature: 21
        })
    );

    // Shower running, below the mold envelope: warning.
    h.hw.humidity_pct = 65.0;
    h.tick();
    assert_eq!(
        h.hw.last_render(),
        Some(ActuatorCall::Render {
            risk: RiskLevel::Low,
            humidity: 65,
            temperature: 21
        })
    );

    // Hot and saturated: danger.
    h.hw.humidity_pct = 74.0;
    h.hw.temperature_c = 27.0;
    h.tick();
    assert_eq!(
        h.hw.last_render(),
        Some(ActuatorCall::Render {
            risk: RiskLevel::High,
            humidity: 74,
            temperature: 27
        })
    );

    // Shower over: back to no risk on the same tick as the transition.
    h.hw.humidity_pct = 50.0;
    h.tick();
    assert_eq!(
        h.hw.last_render(),
        Some(ActuatorCall::Render {
            risk: RiskLevel::None,
            humidity: 50,
            temperature: 27
        })
    );
}

// ── Event stream ──────────────────────────────────────────────

#[test]
fn state_and_risk_edges_are_emitted_once() {
    let mut h = Harness::new();

    h.hw.humidity_pct = 65.0;
    h.tick();
    h.tick();
    h.hw.humidity_pct = 50.0;
    h.tick();
    h.tick();

    let state_changes: Vec<(StateId, StateId)> = h
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::StateChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        state_changes,
        vec![
            (StateId::Idle, StateId::Showering),
            (StateId::Showering, StateId::Idle),
        ]
    );

    let risk_changes: Vec<(RiskLevel, RiskLevel)> = h
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::RiskChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        risk_changes,
        vec![
            (RiskLevel::None, RiskLevel::Low),
            (RiskLevel::Low, RiskLevel::None),
        ]
    );
}
