//! AHT20 combined humidity/temperature sensor (I2C, address 0x38).
//!
//! One triggered measurement per control tick: send the measure command,
//! wait out the conversion, read the 6-byte result, and convert the two
//! 20-bit raw fields.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: talks to the real sensor over the I2C bus (initialised by
//! hw_init).  On host/test: reads from static atomics for injection.
//!
//! ## Failure policy
//!
//! [`probe`](Aht20Sensor::probe) runs once at startup and is the only
//! fatal path in the system.  Per-tick read failures are logged and the
//! previous good reading is retained — a single flaky transaction must not
//! disturb the control loop.

use core::sync::atomic::AtomicU32;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

use log::warn;

use crate::error::SensorError;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

// Host-side injection points (f32 bit patterns).
static SIM_HUMIDITY: AtomicU32 = AtomicU32::new(0x4233_3333); // 44.8 %
static SIM_TEMPERATURE: AtomicU32 = AtomicU32::new(0x41A8_0000); // 21.0 C

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_humidity(pct: f32) {
    SIM_HUMIDITY.store(pct.to_bits(), Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_temperature(celsius: f32) {
    SIM_TEMPERATURE.store(celsius.to_bits(), Ordering::Relaxed);
}

#[cfg(target_os = "espidf")]
const I2C_ADDR: u8 = 0x38;
#[cfg(target_os = "espidf")]
const CMD_INIT: [u8; 3] = [0xBE, 0x08, 0x00];
#[cfg(target_os = "espidf")]
const CMD_MEASURE: [u8; 3] = [0xAC, 0x33, 0x00];
#[cfg(target_os = "espidf")]
const STATUS_BUSY: u8 = 0x80;
#[cfg(target_os = "espidf")]
const STATUS_CALIBRATED: u8 = 0x08;
/// Conversion time per the datasheet, with margin.
#[cfg(target_os = "espidf")]
const MEASURE_DELAY_MS: u64 = 80;

/// One converted reading.
#[derive(Debug, Clone, Copy)]
pub struct Aht20Reading {
    pub humidity_pct: f32,
    pub temperature_c: f32,
}

pub struct Aht20Sensor {
    /// Previous good reading, returned when a transaction fails.
    last_good: Aht20Reading,
}

impl Aht20Sensor {
    pub fn new() -> Self {
        Self {
            last_good: Aht20Reading {
                humidity_pct: 0.0,
                temperature_c: 0.0,
            },
        }
    }

    /// Verify the sensor is present and calibrated.  Called once at
    /// startup; failure here is fatal — the monitor must not run against
    /// an unknown environment.
    #[cfg(target_os = "espidf")]
    pub fn probe(&mut self) -> Result<(), SensorError> {
        let mut status = [0u8; 1];
        hw_init::i2c_read(I2C_ADDR, &mut status).map_err(|_| SensorError::NotResponding)?;

        if status[0] & STATUS_CALIBRATED == 0 {
            // Factory-fresh parts need the init/calibrate command once.
            hw_init::i2c_write(I2C_ADDR, &CMD_INIT).map_err(|_| SensorError::NotResponding)?;
            std::thread::sleep(std::time::Duration::from_millis(10));
            hw_init::i2c_read(I2C_ADDR, &mut status).map_err(|_| SensorError::NotResponding)?;
            if status[0] & STATUS_CALIBRATED == 0 {
                return Err(SensorError::NotCalibrated);
            }
        }
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn probe(&mut self) -> Result<(), SensorError> {
        Ok(())
    }

    /// Take one measurement.  Retains the previous good reading on any
    /// transaction failure or implausible result.
    pub fn read(&mut self) -> Aht20Reading {
        match self.read_raw() {
            Ok(reading) if plausible(&reading) => {
                self.last_good = reading;
                reading
            }
            Ok(reading) => {
                warn!(
                    "AHT20: {} (h={:.1} t={:.1}), keeping last good",
                    SensorError::OutOfRange,
                    reading.humidity_pct,
                    reading.temperature_c
                );
                self.last_good
            }
            Err(e) => {
                warn!("AHT20: {e}, keeping last good");
                self.last_good
            }
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_raw(&mut self) -> Result<Aht20Reading, SensorError> {
        hw_init::i2c_write(I2C_ADDR, &CMD_MEASURE).map_err(|_| SensorError::BusReadFailed)?;
        std::thread::sleep(std::time::Duration::from_millis(MEASURE_DELAY_MS));

        let mut buf = [0u8; 6];
        hw_init::i2c_read(I2C_ADDR, &mut buf).map_err(|_| SensorError::BusReadFailed)?;
        if buf[0] & STATUS_BUSY != 0 {
            return Err(SensorError::BusReadFailed);
        }

        Ok(convert(&buf))
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_raw(&mut self) -> Result<Aht20Reading, SensorError> {
        Ok(Aht20Reading {
            humidity_pct: f32::from_bits(SIM_HUMIDITY.load(Ordering::Relaxed)),
            temperature_c: f32::from_bits(SIM_TEMPERATURE.load(Ordering::Relaxed)),
        })
    }
}

/// Unpack the two 20-bit raw fields from a 6-byte measurement frame.
#[cfg(target_os = "espidf")]
fn convert(buf: &[u8; 6]) -> Aht20Reading {
    let hum_raw =
        ((buf[1] as u32) << 12) | ((buf[2] as u32) << 4) | ((buf[3] as u32) >> 4);
    let temp_raw =
        (((buf[3] as u32) & 0x0F) << 16) | ((buf[4] as u32) << 8) | (buf[5] as u32);

    const FULL_SCALE: f32 = (1u32 << 20) as f32;
    Aht20Reading {
        humidity_pct: hum_raw as f32 / FULL_SCALE * 100.0,
        temperature_c: temp_raw as f32 / FULL_SCALE * 200.0 - 50.0,
    }
}

/// Datasheet operating envelope, with a little slack.
fn plausible(r: &Aht20Reading) -> bool {
    (0.0..=100.0).contains(&r.humidity_pct) && (-40.0..=85.0).contains(&r.temperature_c)
}
