//! System configuration parameters
//!
//! All tunable parameters for the MistWatch monitor.  Values are compiled in;
//! there is no runtime mutation or persistence.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Shower detection ---
    /// Relative humidity (%) at which a shower is considered started.
    pub begin_threshold_pct: f32,
    /// Relative humidity (%) below which a shower is considered over.
    /// Must be strictly below `begin_threshold_pct` — the gap is the
    /// hysteresis band that keeps noisy readings from toggling state.
    pub stop_threshold_pct: f32,

    // --- Mold risk ---
    /// Relative humidity (%) above which mold growth becomes likely.
    pub mold_humidity_pct: f32,
    /// Temperature (Celsius) above which mold growth becomes likely.
    pub mold_temperature_c: f32,

    // --- Alarm ---
    /// Escalation interval (milliseconds): each time this elapses during a
    /// shower, the pending pulse count is rearmed one higher.
    pub alarm_interval_ms: u32,
    /// Half-period of one alarm pulse (milliseconds): tone-on time, and
    /// equally tone-off time.
    pub pulse_half_period_ms: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds).
    pub control_loop_interval_ms: u32,
    /// Structured telemetry log snapshot cadence (seconds).
    pub telemetry_log_interval_secs: u32,

    // --- Telemetry sink ---
    /// Remote sink IPv4 address.
    pub telemetry_host: [u8; 4],
    /// Remote sink TCP port.
    pub telemetry_port: u16,
    /// Hard ceiling on one telemetry push (milliseconds).  Kept well under
    /// one control tick so a dead network can never stall alarm timing.
    pub telemetry_timeout_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            // Shower detection
            begin_threshold_pct: 60.0,
            stop_threshold_pct: 53.0,

            // Mold risk
            mold_humidity_pct: 70.0,
            mold_temperature_c: 25.0,

            // Alarm
            alarm_interval_ms: 20_000, // 20 s per escalation step
            pulse_half_period_ms: 1_000,

            // Timing
            control_loop_interval_ms: 1_000, // 1 Hz
            telemetry_log_interval_secs: 60, // 1/min

            // Telemetry sink
            telemetry_host: [50, 18, 39, 245],
            telemetry_port: 5000,
            telemetry_timeout_ms: 700,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = MonitorConfig::default();
        assert!(c.begin_threshold_pct > 0.0 && c.begin_threshold_pct <= 100.0);
        assert!(c.mold_humidity_pct > c.begin_threshold_pct);
        assert!(c.alarm_interval_ms > 0);
        assert!(c.pulse_half_period_ms > 0);
        assert!(c.control_loop_interval_ms > 0);
    }

    #[test]
    fn hysteresis_band_is_non_degenerate() {
        let c = MonitorConfig::default();
        assert!(
            c.stop_threshold_pct < c.begin_threshold_pct,
            "stop threshold must be below begin threshold to prevent oscillation"
        );
    }

    #[test]
    fn telemetry_budget_fits_inside_one_tick() {
        let c = MonitorConfig::default();
        assert!(
            c.telemetry_timeout_ms < c.control_loop_interval_ms,
            "telemetry push must never stall the control loop for a full tick"
        );
    }

    #[test]
    fn pulse_fits_inside_escalation_interval() {
        let c = MonitorConfig::default();
        assert!(
            2 * c.pulse_half_period_ms < c.alarm_interval_ms,
            "one full pulse must complete before the next escalation"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let c = MonitorConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: MonitorConfig = serde_json::from_str(&json).unwrap();
        assert!((c.begin_threshold_pct - c2.begin_threshold_pct).abs() < 0.001);
        assert_eq!(c.alarm_interval_ms, c2.alarm_interval_ms);
        assert_eq!(c.telemetry_host, c2.telemetry_host);
        assert_eq!(c.telemetry_port, c2.telemetry_port);
    }
}
