//! Simulation port driver.
//!
//! Software-emulated HC-05 module for development and testing without
//! physical hardware. Time is virtual: delays advance a clock instead of
//! sleeping, so a full bring-up runs in microseconds under test.

mod module;
mod port;

pub use module::{SIM_BOOT_MS, SimulatedModule};
pub use port::SimulationPort;

use prisma_common::bt::driver::BtPort;

/// Factory function to create a simulation port instance.
pub fn create_port() -> Box<dyn BtPort> {
    Box::new(SimulationPort::new())
}
