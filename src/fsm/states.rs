//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap.  This is the classic embedded C FSM pattern expressed
//! in safe Rust.
//!
//! ```text
//!  IDLE ──[humidity ≥ begin]──▶ SHOWERING
//!    ▲                              │
//!    └───[humidity < stop]──────────┘
//! ```
//!
//! The gap between the stop and begin thresholds is the hysteresis band:
//! readings inside (stop, begin) never move the state in either direction,
//! so steam drifting around a single threshold cannot chatter the detector.

use super::context::MonitorContext;
use super::{StateDescriptor, StateId};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1 — Showering
        StateDescriptor {
            id: StateId::Showering,
            name: "Showering",
            on_enter: Some(showering_enter),
            on_exit: Some(showering_exit),
            on_update: showering_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut MonitorContext) {
    info!(
        "IDLE: ambient monitoring, humidity {:.0}%",
        ctx.sample.humidity_pct
    );
}

fn idle_update(ctx: &mut MonitorContext) -> Option<StateId> {
    // Trigger: humidity at or above the shower-begin threshold.
    if ctx.sample.humidity_pct >= ctx.config.begin_threshold_pct {
        return Some(StateId::Showering);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  SHOWERING state
// ═══════════════════════════════════════════════════════════════════════════

fn showering_enter(ctx: &mut MonitorContext) {
    // Start the escalation clock: the first alarm burst is due one full
    // interval from now.
    ctx.alarm.arm(ctx.now);
    info!(
        "SHOWERING: humidity {:.0}%, escalation armed",
        ctx.sample.humidity_pct
    );
}

fn showering_exit(ctx: &mut MonitorContext) {
    // Reset the escalation count so the next shower starts back at one
    // pulse.  A burst still draining is deliberately left to finish.
    ctx.alarm.end_shower();
    info!("SHOWERING: over, escalation count reset");
}

fn showering_update(ctx: &mut MonitorContext) -> Option<StateId> {
    // The shower is over only once humidity falls below the stop
    // threshold, strictly under the begin threshold.
    if ctx.sample.humidity_pct < ctx.config.stop_threshold_pct {
        return Some(StateId::Idle);
    }

    None
}
