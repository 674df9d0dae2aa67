//! Piezo buzzer driver.
//!
//! A 1 kHz LEDC square wave at 50 % duty when sounding, 0 % when silent.
//! Two spare GPIOs mirror the alarm's tone phase so a scope or LED pair can
//! show the pulse train without audible output.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the LEDC channel and debug GPIOs via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

/// 50 % of the 8-bit duty range — loudest square wave for a passive piezo.
const TONE_DUTY: u8 = 128;

pub struct BuzzerDriver {
    sounding: bool,
    indicators: (bool, bool),
}

impl BuzzerDriver {
    pub fn new() -> Self {
        Self {
            sounding: false,
            indicators: (false, false),
        }
    }

    pub fn set_tone(&mut self, on: bool) {
        hw_init::ledc_set(hw_init::LEDC_CH_BUZZER, if on { TONE_DUTY } else { 0 });
        self.sounding = on;
    }

    /// Drive the phase-indicator pair (`a` = tone-on half, `b` = tone-off half).
    pub fn set_indicators(&mut self, a: bool, b: bool) {
        hw_init::gpio_write(pins::DEBUG_A_GPIO, a);
        hw_init::gpio_write(pins::DEBUG_B_GPIO, b);
        self.indicators = (a, b);
    }

    pub fn off(&mut self) {
        self.set_tone(false);
        self.set_indicators(false, false);
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    pub fn indicators(&self) -> (bool, bool) {
        self.indicators
    }
}
