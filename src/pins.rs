//! GPIO / peripheral pin assignments for the MistWatch main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Buzzer (piezo via LEDC tone channel)
// ---------------------------------------------------------------------------

/// LEDC PWM output driving the piezo buzzer.
pub const BUZZER_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// Debug indicators (mirror the alarm tone phase for scope/LED diagnostics)
// ---------------------------------------------------------------------------

/// Digital output: HIGH during the tone-on half of a pulse.
pub const DEBUG_A_GPIO: i32 = 2;
/// Digital output: HIGH during the tone-off half of a pulse.
pub const DEBUG_B_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// I2C bus (AHT20 humidity/temperature sensor)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
/// Standard-mode bus clock; the AHT20 tops out at 400 kHz.
pub const I2C_FREQ_HZ: u32 = 100_000;

// ---------------------------------------------------------------------------
// TFT status panel (SPI, ST7789 controller)
// ---------------------------------------------------------------------------

pub const TFT_MOSI_GPIO: i32 = 19;
pub const TFT_SCLK_GPIO: i32 = 18;
pub const TFT_CS_GPIO: i32 = 5;
pub const TFT_DC_GPIO: i32 = 16;
pub const TFT_RST_GPIO: i32 = 23;
pub const TFT_BACKLIGHT_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// Buzzer tone frequency (1 kHz square wave).
pub const BUZZER_FREQ_HZ: u32 = 1_000;
