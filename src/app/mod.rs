//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the MistWatch monitor:
//! shower detection, mold-risk classification, and alarm scheduling, tied
//! together by the per-tick orchestration in [`service`].  All interaction
//! with hardware and the network happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
