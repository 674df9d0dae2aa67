//! HTTP telemetry adapter.
//!
//! Implements [`TelemetryPort`] with a single GET per reading:
//!
//! ```text
//!   GET http://<host>:<port>/?h=<humidity>&t=<temperature>
//! ```
//!
//! The request is bounded by a hard timeout well under one control tick,
//! set on the esp_http_client handle — a dead or slow sink costs at most
//! the budget and can never stall alarm timing.  When the WiFi link is
//! down the adapter fails fast without touching the network at all.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: raw `esp_http_client` sys calls.
//! On host/test: counts pushes in-memory.

use core::fmt::Write as _;

use log::debug;

use crate::app::ports::TelemetryPort;
use crate::config::MonitorConfig;
use crate::error::CommsError;

/// `http://255.255.255.255:65535/?h=-2147483648&t=-2147483648` plus NUL.
const URL_CAP: usize = 64;

pub struct HttpTelemetry {
    host: [u8; 4],
    port: u16,
    timeout_ms: u32,
    /// Mirrors the WiFi adapter's link state; refreshed by the main loop
    /// each tick.  Down link → fail fast, no socket work.
    link_up: bool,
    /// Successful pushes since boot (sim introspection / diagnostics).
    sent: u32,
}

impl HttpTelemetry {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            host: config.telemetry_host,
            port: config.telemetry_port,
            timeout_ms: config.telemetry_timeout_ms,
            link_up: false,
            sent: 0,
        }
    }

    /// Refresh the cached link state from the connectivity adapter.
    pub fn set_link_up(&mut self, up: bool) {
        self.link_up = up;
    }

    pub fn sent_count(&self) -> u32 {
        self.sent
    }

    fn format_url(&self, humidity: i32, temperature: i32) -> heapless::String<URL_CAP> {
        let mut url = heapless::String::new();
        let [a, b, c, d] = self.host;
        // Capacity is sized for the worst case; a formatting overflow would
        // only truncate the query, so the write result is ignored.
        let _ = write!(
            url,
            "http://{a}.{b}.{c}.{d}:{}/?h={humidity}&t={temperature}",
            self.port
        );
        url
    }

    #[cfg(target_os = "espidf")]
    fn push(&mut self, url: &str) -> Result<(), CommsError> {
        use esp_idf_svc::sys::*;

        // esp_http_client wants a NUL-terminated URL.
        let mut c_url = heapless::Vec::<u8, { URL_CAP + 1 }>::new();
        if c_url.extend_from_slice(url.as_bytes()).is_err() || c_url.push(0).is_err() {
            return Err(CommsError::ConnectFailed);
        }

        let cfg = esp_http_client_config_t {
            url: c_url.as_ptr().cast(),
            method: esp_http_client_method_t_HTTP_METHOD_GET,
            timeout_ms: self.timeout_ms as i32,
            ..Default::default()
        };

        // SAFETY: cfg and the URL buffer outlive the client; init/perform/
        // cleanup is the documented esp_http_client lifecycle.
        unsafe {
            let client = esp_http_client_init(&cfg);
            if client.is_null() {
                return Err(CommsError::ConnectFailed);
            }

            let err = esp_http_client_perform(client);
            let status = esp_http_client_get_status_code(client);
            esp_http_client_cleanup(client);

            if err == ESP_ERR_HTTP_CONNECT as i32 {
                return Err(CommsError::ConnectFailed);
            }
            if err != ESP_OK as i32 {
                // perform() folds socket timeouts into a generic failure;
                // with our budget set, that is the overwhelmingly likely cause.
                return Err(CommsError::Timeout);
            }
            if !(200..300).contains(&status) {
                return Err(CommsError::BadStatus(status as u16));
            }
        }
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn push(&mut self, url: &str) -> Result<(), CommsError> {
        debug!("telemetry(sim): GET {url}");
        Ok(())
    }
}

impl TelemetryPort for HttpTelemetry {
    fn report(&mut self, humidity: i32, temperature: i32) -> Result<(), CommsError> {
        if !self.link_up {
            return Err(CommsError::WifiDisconnected);
        }

        let url = self.format_url(humidity, temperature);
        self.push(url.as_str())?;
        self.sent = self.sent.wrapping_add(1);
        debug!("telemetry: pushed h={humidity} t={temperature}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_matches_sink_format() {
        let t = HttpTelemetry::new(&MonitorConfig::default());
        let url = t.format_url(64, 25);
        assert_eq!(url.as_str(), "http://50.18.39.245:5000/?h=64&t=25");
    }

    #[test]
    fn report_fails_fast_when_link_down() {
        let mut t = HttpTelemetry::new(&MonitorConfig::default());
        assert_eq!(t.report(60, 24), Err(CommsError::WifiDisconnected));
        assert_eq!(t.sent_count(), 0);
    }

    #[cfg(not(target_os = "espidf"))]
    #[test]
    fn report_counts_pushes_when_link_up() {
        let mut t = HttpTelemetry::new(&MonitorConfig::default());
        t.set_link_up(true);
        assert!(t.report(60, 24).is_ok());
        assert!(t.report(61, 24).is_ok());
        assert_eq!(t.sent_count(), 2);
    }
}
