//! Module mode transitions.
//!
//! The HC-05 pairs each mode with its own baud rate, so the mode-select
//! line and the host baud rate must be switched in lock-step, with settle
//! delays after every hardware state change. The mode controller is the
//! only component allowed to drive the control lines or the baud rate.
//!
//! Both transitions are safe to repeat; each call re-incurs its delays.

use prisma_common::bt::consts::{COMMAND_BAUD, SETTLE_BOOT_MS, SETTLE_MODE_MS, SETTLE_POWER_MS};
use prisma_common::bt::driver::{BtPort, ModeLine};
use tracing::debug;

/// Drives the control lines and baud rate for mode transitions.
pub struct ModeController<'a> {
    port: &'a mut dyn BtPort,
    data_baud: u32,
}

impl<'a> ModeController<'a> {
    /// Create a mode controller over `port`.
    pub fn new(port: &'a mut dyn BtPort, data_baud: u32) -> Self {
        Self { port, data_baud }
    }

    /// Power-cycle the module into data mode at the data-channel baud
    /// rate.
    ///
    /// The brief power drop discards any half-finished command session;
    /// power is asserted before the mode line is finalized.
    pub fn enter_data_mode(&mut self) {
        debug!("entering data mode at {} baud", self.data_baud);
        self.port.set_baud(self.data_baud);
        self.port.set_power(false);
        self.port.set_power(true);
        self.port.delay_ms(SETTLE_POWER_MS);
        self.port.set_mode_line(ModeLine::Data);
        self.port.delay_ms(SETTLE_MODE_MS);
    }

    /// Power-cycle the module into its AT command session.
    ///
    /// The long final delay lets the command interpreter boot before the
    /// first probe.
    pub fn enter_command_mode(&mut self) {
        debug!("entering command mode at {} baud", COMMAND_BAUD);
        self.port.set_power(false);
        self.port.set_baud(COMMAND_BAUD);
        self.port.delay_ms(SETTLE_MODE_MS);
        self.port.set_mode_line(ModeLine::Command);
        self.port.delay_ms(SETTLE_POWER_MS);
        self.port.set_power(true);
        self.port.delay_ms(SETTLE_BOOT_MS);
    }
}
