//! Module reprogramming sequence.
//!
//! Runs only when the identity check reports a mismatch. The module is
//! power-cycled into its AT command session and walked through a fixed
//! four-step sequence: liveness probe, name set, baud-rate set, reset.
//! The first unexpected reply aborts the remaining steps.

use crate::line::LineChannel;
use crate::mode::ModeController;
use prisma_common::bt::consts::{
    CMD_LIVENESS, CMD_NAME_SET_PREFIX, CMD_RESET, CMD_UART_SET_PREFIX, CRLF, LIVENESS_SETTLE_MS,
    OK_PREFIX, REPLY_BUF_CAPACITY,
};
use prisma_common::bt::driver::{BtError, BtPort};
use prisma_common::bt::types::{DeviceName, LinkState, RecvBuf};
use tracing::{debug, info, warn};

/// Drives the AT reprogramming sequence.
pub struct Programmer<'a> {
    port: &'a mut dyn BtPort,
    data_baud: u32,
}

impl<'a> Programmer<'a> {
    /// Create a programmer over `port`.
    pub fn new(port: &'a mut dyn BtPort, data_baud: u32) -> Self {
        Self { port, data_baud }
    }

    /// Program the composed name and the data-channel baud rate.
    ///
    /// Returns the programmed name; it becomes authoritative only when
    /// the whole sequence succeeds. Restores data mode afterwards.
    ///
    /// # Errors
    /// - `BtError::CommunicationFailure` if the liveness probe is not
    ///   acknowledged
    /// - `BtError::ConfigurationFailure` if the name or baud-rate set is
    ///   not acknowledged
    pub fn program(&mut self, base: &str) -> Result<DeviceName, BtError> {
        info!("module needs parameter update");
        let name = DeviceName::compose(base)?;

        ModeController::new(&mut *self.port, self.data_baud).enter_command_mode();

        // Step 1: check that the command interpreter answers at all.
        let reply = self.exchange(CMD_LIVENESS, LIVENESS_SETTLE_MS)?;
        debug!("program step 1 reply: {}", reply.as_str().trim_end());
        if !acked(&reply) {
            warn!(
                "module not responding to liveness probe ({})",
                reply.as_str().trim_end()
            );
            return Err(BtError::CommunicationFailure(
                "liveness probe not acknowledged".to_string(),
            ));
        }

        // Step 2: program the composed name.
        let cmd = format!("{CMD_NAME_SET_PREFIX}{name}{CRLF}");
        let reply = self.exchange(&cmd, 0)?;
        debug!("program step 2 reply: {}", reply.as_str().trim_end());
        if !acked(&reply) {
            warn!("setting module name failed ({})", reply.as_str().trim_end());
            return Err(BtError::ConfigurationFailure(
                "name not acknowledged".to_string(),
            ));
        }

        // Step 3: program the data-channel baud rate, 1 stop bit, no parity.
        let cmd = format!("{}{},0,0{}", CMD_UART_SET_PREFIX, self.data_baud, CRLF);
        let reply = self.exchange(&cmd, 0)?;
        debug!("program step 3 reply: {}", reply.as_str().trim_end());
        if !acked(&reply) {
            warn!(
                "setting module baud rate failed ({})",
                reply.as_str().trim_end()
            );
            return Err(BtError::ConfigurationFailure(
                "baud rate not acknowledged".to_string(),
            ));
        }

        // Step 4: reset. The module reboots without acknowledging, so a
        // reply and a timeout are both tolerated here.
        if let Ok(reply) = self.exchange(CMD_RESET, 0) {
            debug!("program step 4 reply: {}", reply.as_str().trim_end());
        }

        ModeController::new(&mut *self.port, self.data_baud).enter_data_mode();
        Ok(name)
    }

    /// Send one command and collect its reply line.
    ///
    /// A receive timeout leaves the reply empty; the caller judges the
    /// acknowledgement.
    fn exchange(
        &mut self,
        cmd: &str,
        settle_ms: u32,
    ) -> Result<RecvBuf<REPLY_BUF_CAPACITY>, BtError> {
        LineChannel::new(&mut *self.port, LinkState::Initializing).send(cmd)?;
        if settle_ms > 0 {
            self.port.delay_ms(settle_ms);
        }

        let mut reply = RecvBuf::new();
        if LineChannel::new(&mut *self.port, LinkState::Initializing)
            .receive(&mut reply)
            .is_err()
        {
            debug!("no reply to {}", cmd.trim_end());
        }
        Ok(reply)
    }
}

/// `true` if the reply begins with the two acknowledgement characters.
fn acked(reply: &RecvBuf<REPLY_BUF_CAPACITY>) -> bool {
    reply.as_bytes().starts_with(OK_PREFIX.as_bytes())
}
