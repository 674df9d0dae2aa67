//! Host-side integration test binary.
//!
//! Drives the full AppService → FSM → alarm → actuator pipeline through
//! mock port adapters, one simulated second per tick.

mod mock_hw;
mod monitor_flow_tests;
