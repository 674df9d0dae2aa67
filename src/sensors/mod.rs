//! Sensor subsystem.
//!
//! A single AHT20 combined humidity/temperature sensor on the I2C bus; the
//! [`adapters::hardware`](crate::adapters::hardware) adapter owns the driver
//! and surfaces it through [`SensorPort`](crate::app::ports::SensorPort).

pub mod aht20;
