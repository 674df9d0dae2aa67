//! Mold-risk classification.
//!
//! A pure function of the current shower state and the latest reading —
//! deliberately memoryless, so the display can never show a stale risk level.

use crate::config::MonitorConfig;
use crate::fsm::StateId;

/// Mold-growth risk shown on the status panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    /// No shower in progress — ambient conditions.
    None,
    /// Shower in progress, conditions below the mold envelope.
    Low,
    /// Shower in progress with sustained heat and humidity — prime mold
    /// conditions.
    High,
}

/// Classify the current tick.  Risk exists only while a shower is running;
/// it escalates to `High` when both humidity and temperature sit inside the
/// mold-growth envelope.
pub fn classify(
    state: StateId,
    humidity_pct: f32,
    temperature_c: f32,
    config: &MonitorConfig,
) -> RiskLevel {
    match state {
        StateId::Idle => RiskLevel::None,
        StateId::Showering => {
            if humidity_pct >= config.mold_humidity_pct
                && temperature_c >= config.mold_temperature_c
            {
                RiskLevel::High
            } else {
                RiskLevel::Low
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> MonitorConfig {
        MonitorConfig::default()
    }

    #[test]
    fn idle_is_always_none() {
        let c = cfg();
        assert_eq!(classify(StateId::Idle, 99.0, 40.0, &c), RiskLevel::None);
        assert_eq!(classify(StateId::Idle, 0.0, -10.0, &c), RiskLevel::None);
    }

    #[test]
    fn showering_below_envelope_is_low() {
        let c = cfg();
        assert_eq!(classify(StateId::Showering, 65.0, 30.0, &c), RiskLevel::Low);
        assert_eq!(classify(StateId::Showering, 80.0, 20.0, &c), RiskLevel::Low);
    }

    #[test]
    fn showering_inside_envelope_is_high() {
        let c = cfg();
        assert_eq!(classify(StateId::Showering, 70.0, 25.0, &c), RiskLevel::High);
        assert_eq!(classify(StateId::Showering, 95.0, 32.0, &c), RiskLevel::High);
    }

    #[test]
    fn classification_has_no_memory() {
        let c = cfg();
        let first = classify(StateId::Showering, 72.0, 26.0, &c);
        // Interleave unrelated calls; identical inputs must stay identical.
        let _ = classify(StateId::Idle, 10.0, 5.0, &c);
        let _ = classify(StateId::Showering, 55.0, 18.0, &c);
        let again = classify(StateId::Showering, 72.0, 26.0, &c);
        assert_eq!(first, again);
    }
}
