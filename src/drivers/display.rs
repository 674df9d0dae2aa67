//! TFT status panel driver (ST7789 over SPI).
//!
//! The panel shows a full-screen background colour keyed to the mold-risk
//! level plus two large numeric readouts (humidity over temperature).
//! Rendering is skipped when nothing changed — a full-screen fill is the
//! most expensive operation in the tick.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the esp_lcd panel handle is created by the SPI wiring in
//! hw_init once the board rev lands; until then the driver keeps the
//! backlight on and tracks the frame state it would have pushed.
//! On host/test: tracks state in-memory only.

use log::debug;

use crate::risk::RiskLevel;

// RGB565 panel colours.
pub const COLOUR_BACKGROUND: u16 = 0x0000; // black — no risk
pub const COLOUR_WARNING: u16 = 0xFFE0; // yellow — shower running
pub const COLOUR_DANGER: u16 = 0xF800; // red — mold envelope

/// Map a risk level to its background colour.
pub fn colour_for(risk: RiskLevel) -> u16 {
    match risk {
        RiskLevel::None => COLOUR_BACKGROUND,
        RiskLevel::Low => COLOUR_WARNING,
        RiskLevel::High => COLOUR_DANGER,
    }
}

/// The last frame pushed to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub background: u16,
    pub humidity: i32,
    pub temperature: i32,
}

pub struct DisplayDriver {
    current: Option<Frame>,
}

impl DisplayDriver {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Push one frame.  No-op when identical to the previous frame.
    pub fn render(&mut self, risk: RiskLevel, humidity: i32, temperature: i32) {
        let frame = Frame {
            background: colour_for(risk),
            humidity,
            temperature,
        };
        if self.current == Some(frame) {
            return;
        }

        self.push_frame(&frame);
        self.current = Some(frame);
    }

    pub fn current_frame(&self) -> Option<Frame> {
        self.current
    }

    #[cfg(target_os = "espidf")]
    fn push_frame(&mut self, frame: &Frame) {
        // Full panel write via esp_lcd:
        //
        // 1. esp_lcd_new_panel_io_spi(bus, &io_cfg, &io) with the pins in
        //    `pins::TFT_*`
        // 2. esp_lcd_new_panel_st7789(io, &panel_cfg, &panel)
        // 3. esp_lcd_panel_draw_bitmap() for the background fill and the
        //    two glyph strips
        //
        // The SPI bus handle is created in hw_init when the display rev B
        // wiring lands; the frame state below is what gets pushed.
        debug!(
            "display: bg=0x{:04X} h={} t={}",
            frame.background, frame.humidity, frame.temperature
        );
    }

    #[cfg(not(target_os = "espidf"))]
    fn push_frame(&mut self, frame: &Frame) {
        debug!(
            "display(sim): bg=0x{:04X} h={} t={}",
            frame.background, frame.humidity, frame.temperature
        );
    }
}
