//! Module identity check.
//!
//! Queries the currently programmed name while the module runs in data
//! mode (the module still answers AT queries there; the command session
//! is only opened when reprogramming is needed) and applies the suffix
//! convention: a correctly provisioned module's name ends with the fixed
//! marker. Any timeout or malformed reply degrades to "needs
//! reprogramming" - the identity check never fails the bring-up itself.

use crate::line::LineChannel;
use crate::mode::ModeController;
use prisma_common::bt::consts::{
    CMD_NAME_QUERY, NAME_QUERY_SETTLE_MS, NAME_SUFFIX, REPLY_BUF_CAPACITY, REPLY_TERMINATOR_LEN,
};
use prisma_common::bt::driver::BtPort;
use prisma_common::bt::types::{DeviceName, LinkState, RecvBuf};
use tracing::debug;

/// Result of an identity check.
pub enum IdentityOutcome {
    /// The reported name carries the suffix; holds the extracted name.
    Match(DeviceName),
    /// No usable reply or wrong suffix; the module must be reprogrammed.
    Mismatch,
}

/// Queries and verifies the module's programmed name.
pub struct IdentityChecker<'a> {
    port: &'a mut dyn BtPort,
    data_baud: u32,
}

impl<'a> IdentityChecker<'a> {
    /// Create an identity checker over `port`.
    pub fn new(port: &'a mut dyn BtPort, data_baud: u32) -> Self {
        Self { port, data_baud }
    }

    /// Run the name query and suffix check.
    pub fn check(&mut self) -> IdentityOutcome {
        ModeController::new(&mut *self.port, self.data_baud).enter_data_mode();

        if LineChannel::new(&mut *self.port, LinkState::Initializing)
            .send(CMD_NAME_QUERY)
            .is_err()
        {
            return IdentityOutcome::Mismatch;
        }
        self.port.delay_ms(NAME_QUERY_SETTLE_MS);

        let mut reply = RecvBuf::<REPLY_BUF_CAPACITY>::new();
        if LineChannel::new(&mut *self.port, LinkState::Initializing)
            .receive(&mut reply)
            .is_err()
        {
            debug!("no answer to name query; module needs provisioning");
            return IdentityOutcome::Mismatch;
        }
        debug!("name reply: {}", reply.as_str().trim_end());

        match provisioned_name(reply.as_bytes()) {
            Some(name) => IdentityOutcome::Match(name),
            None => IdentityOutcome::Mismatch,
        }
    }
}

/// Apply the suffix convention to a raw name reply and extract the name.
///
/// The reply is `<prefix><name>\r\n`; the suffix window sits two bytes
/// before the very end to skip the terminator, which is assumed present
/// and counted in the reply length (wire-format contract of the module
/// family).
fn provisioned_name(reply: &[u8]) -> Option<DeviceName> {
    let suffix = NAME_SUFFIX.as_bytes();
    let len = reply.len();

    if len < suffix.len() + 5 {
        return None;
    }

    let window = &reply[len - suffix.len() - REPLY_TERMINATOR_LEN..len - REPLY_TERMINATOR_LEN];
    if window != suffix {
        return None;
    }

    Some(DeviceName::from_reply(&reply[..len - REPLY_TERMINATOR_LEN]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::simulation::SimulationPort;

    #[test]
    fn provisioned_reply_matches_and_extracts() {
        let name = provisioned_name(b"+NAME:PRISMA4_Zumo\r\n").expect("match");
        assert_eq!(name.as_str(), "PRISMA4_Zumo");
    }

    #[test]
    fn wrong_suffix_is_mismatch() {
        assert!(provisioned_name(b"+NAME:PRISMA4_Else\r\n").is_none());
    }

    #[test]
    fn short_reply_is_mismatch() {
        // Shorter than suffix length + 5; must not read past the bound.
        assert!(provisioned_name(b"OK\r\n").is_none());
        assert!(provisioned_name(b"").is_none());
        assert!(provisioned_name(b"_Zumo\r\n").is_none());
    }

    #[test]
    fn suffix_window_skips_terminator() {
        // Suffix at the very end (no terminator offset) must not match.
        assert!(provisioned_name(b"+NAME:PRISMA4_Zumo").is_none());
    }

    #[test]
    fn extracted_name_is_bounded() {
        let name = provisioned_name(b"+NAME:ABCDEFGHIJK_Zumo\r\n").expect("match");
        assert!(name.len() <= 16);
        assert_eq!(name.as_str(), "ABCDEFGHIJK_Zumo");
    }

    #[test]
    fn check_matches_provisioned_module() {
        let mut port = SimulationPort::new();
        port.module_mut().set_name("PRISMA4_Zumo");
        port.module_mut().set_uart_baud(115_200);

        match IdentityChecker::new(&mut port, 115_200).check() {
            IdentityOutcome::Match(name) => assert_eq!(name.as_str(), "PRISMA4_Zumo"),
            IdentityOutcome::Mismatch => panic!("expected match"),
        }
    }

    #[test]
    fn check_mismatches_factory_module() {
        // Factory name, but reachable at the data baud rate.
        let mut port = SimulationPort::new();
        port.module_mut().set_uart_baud(115_200);

        assert!(matches!(
            IdentityChecker::new(&mut port, 115_200).check(),
            IdentityOutcome::Mismatch
        ));
    }

    #[test]
    fn check_mismatches_on_wrong_baud() {
        // Module at factory 9600 baud never hears the query; the receive
        // times out and degrades to a mismatch.
        let mut port = SimulationPort::new();

        assert!(matches!(
            IdentityChecker::new(&mut port, 115_200).check(),
            IdentityOutcome::Mismatch
        ));
    }
}
