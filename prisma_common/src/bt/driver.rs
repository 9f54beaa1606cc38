//! Port driver trait and error types.
//!
//! This module defines:
//! - `BtPort` trait - Interface for pluggable port drivers
//! - `BtError` enum - Error types for Bluetooth link operations
//! - `PortFactory` type alias - Factory function type
//! - `ModeLine` enum - Level of the module's mode-select line

use crate::bt::config::BtConfig;
use thiserror::Error;

/// Error types for Bluetooth link operations.
#[derive(Debug, Clone, Error)]
pub enum BtError {
    /// Operation attempted before a successful bring-up
    #[error("Bluetooth link not initialized")]
    NotInitialized,

    /// No line terminator received within the receive budget
    #[error("Timed out waiting for module reply")]
    Timeout,

    /// Module did not acknowledge the liveness probe
    #[error("Module not responding: {0}")]
    CommunicationFailure(String),

    /// An AT set command was not acknowledged
    #[error("Module configuration step failed: {0}")]
    ConfigurationFailure(String),

    /// Configuration file or validation error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Port driver not found
    #[error("Port driver not found: {0}")]
    PortNotFound(String),
}

/// Level of the module's mode-select control line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeLine {
    /// Normal operation; the serial link carries application payload.
    Data,
    /// AT command session.
    Command,
}

/// Factory function type for creating port instances.
pub type PortFactory = fn() -> Box<dyn BtPort>;

/// Trait defining the interface to the module's physical attachment.
///
/// A port bundles the three collaborators the controller needs: the
/// byte-level serial channel, the two discrete control lines (mode-select
/// and power-enable) and a millisecond delay primitive. Bundling the
/// delay with the port lets a simulated port advance a virtual clock
/// instead of sleeping, which makes every timeout deterministic under
/// test.
///
/// # Contracts
///
/// | Operation | Behavior |
/// |-----------|----------|
/// | `put_byte` | Blocking write of one byte |
/// | `poll_byte` | Non-blocking read; `None` when no byte is pending |
/// | `set_baud` | Reconfigures the host side of the serial channel |
/// | `set_mode_line` / `set_power` | Drive the discrete control lines |
/// | `delay_ms` | Blocks (or advances simulated time) for `ms` |
pub trait BtPort: Send {
    /// Returns the port driver's unique identifier (e.g., "simulation").
    fn name(&self) -> &'static str;

    /// Returns the port driver's semantic version.
    fn version(&self) -> &'static str;

    /// Apply driver-specific configuration before first use.
    ///
    /// Drivers pick their section out of `config.driver_config` by name.
    /// Default implementation does nothing.
    ///
    /// # Errors
    /// Returns `BtError::ConfigError` if the driver section is invalid.
    fn configure(&mut self, _config: &BtConfig) -> Result<(), BtError> {
        Ok(())
    }

    /// Write one byte to the serial channel.
    fn put_byte(&mut self, byte: u8);

    /// Read one byte from the serial channel, or `None` if none is pending.
    fn poll_byte(&mut self) -> Option<u8>;

    /// Set the host-side baud rate of the serial channel.
    fn set_baud(&mut self, baud: u32);

    /// Drive the mode-select line.
    fn set_mode_line(&mut self, line: ModeLine);

    /// Drive the power-enable line. `true` powers the module.
    fn set_power(&mut self, on: bool);

    /// Wait for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}
