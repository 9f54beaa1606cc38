//! Port driver implementations.
//!
//! This module contains all port driver implementations:
//!
//! - [`simulation`] - Software-simulated module for development and testing
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `ports/`
//! 2. Implement the `BtPort` trait from `prisma_common::bt::driver`
//! 3. Register the driver in [`register_all_ports`]
//! 4. Add export and documentation

pub mod simulation;

use crate::port_registry::PortRegistry;

/// Register all built-in port drivers.
///
/// Call once at startup before any ports are requested.
pub fn register_all_ports(registry: &mut PortRegistry) {
    registry.register("simulation", simulation::create_port);

    // Future drivers will be registered here:
    // registry.register("uart", uart::create_port);
}
