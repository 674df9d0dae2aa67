//! MistWatch Firmware — Main Entry Point
//!
//! Hexagonal architecture around a fixed-cadence control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HardwareAdapter        HttpTelemetry      LogEventSink      │
//! │  (Sensor+Tone+Display)  (TelemetryPort)    (EventSink)       │
//! │  WifiAdapter            Esp32TimeAdapter                     │
//! │  (Connectivity)         (monotonic ms)                       │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │             AppService (pure logic)                │      │
//! │  │  Shower detector · Alarm scheduler · Mold risk     │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use mistwatch::adapters::hardware::HardwareAdapter;
use mistwatch::adapters::log_sink::LogEventSink;
use mistwatch::adapters::telemetry::HttpTelemetry;
use mistwatch::adapters::time::Esp32TimeAdapter;
use mistwatch::adapters::wifi::{ConnectivityPort, WifiAdapter};
use mistwatch::app::events::AppEvent;
use mistwatch::app::ports::EventSink;
use mistwatch::app::service::AppService;
use mistwatch::config::MonitorConfig;
use mistwatch::drivers::buzzer::BuzzerDriver;
use mistwatch::drivers::display::DisplayDriver;
use mistwatch::drivers::hw_init;
use mistwatch::sensors::aht20::Aht20Sensor;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init().map_err(|e| anyhow::anyhow!("logger init: {e:?}"))?;

    info!("╔══════════════════════════════════════╗");
    info!("║  MistWatch v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = MonitorConfig::default();

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Probe the environmental sensor ─────────────────────
    // The one fatal error in the system: without a sensor the monitor
    // would run blind, so it never enters the control loop.
    let mut sensor = Aht20Sensor::new();
    if let Err(e) = sensor.probe() {
        log::error!("sensor probe failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    info!("AHT20 found and calibrated");

    // ── 4. WiFi association ───────────────────────────────────
    // Best-effort: a dead network degrades telemetry only; poll() keeps
    // retrying with backoff from the control loop.
    let mut wifi = WifiAdapter::new();
    if let Err(e) = wifi.connect() {
        warn!("WiFi association failed ({}), telemetry deferred", e);
    }

    // ── 5. Construct adapters and the app service ─────────────
    let mut hw = HardwareAdapter::new(sensor, BuzzerDriver::new(), DisplayDriver::new());
    let mut telemetry = HttpTelemetry::new(&config);
    let mut log_sink = LogEventSink::new();
    let time_adapter = Esp32TimeAdapter::new();

    let mut app = AppService::new(config.clone());
    app.start(&mut log_sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    let tick_ms = config.control_loop_interval_ms as u64;
    let mut telemetry_log_counter: u64 = 0;

    loop {
        std::thread::sleep(std::time::Duration::from_millis(tick_ms));

        // Telemetry gating mirrors the link state each tick.
        telemetry.set_link_up(wifi.is_connected());

        let now = time_adapter.now();
        app.tick(now, &mut hw, &mut telemetry, &mut log_sink);

        // WiFi reconnection poll (exponential backoff).
        wifi.poll();

        // Periodic structured snapshot for the serial log.
        telemetry_log_counter += 1;
        if telemetry_log_counter >= config.telemetry_log_interval_secs as u64 {
            log_sink.emit(&AppEvent::Telemetry(app.build_telemetry()));
            telemetry_log_counter = 0;
        }
    }
}
