//! CRLF line channel over the byte transport.
//!
//! Synchronous send/receive of line-oriented ASCII over a `BtPort`, with
//! bounded blocking: receive polls for one byte at a time and gives up
//! once its idle budget is spent.

use prisma_common::bt::consts::{RECV_POLL_BUDGET, RECV_POLL_INTERVAL_MS, SEND_MAX_CHARS};
use prisma_common::bt::driver::{BtError, BtPort};
use prisma_common::bt::poll::IdleBudget;
use prisma_common::bt::types::{LinkState, RecvBuf};
use tracing::warn;

/// Line-oriented channel over a port.
///
/// Borrowed transiently around each exchange; carries the link state it
/// must guard on.
pub struct LineChannel<'a> {
    port: &'a mut dyn BtPort,
    state: LinkState,
}

impl<'a> LineChannel<'a> {
    /// Create a channel over `port`, guarding on `state`.
    pub fn new(port: &'a mut dyn BtPort, state: LinkState) -> Self {
        Self { port, state }
    }

    /// Write `text` to the transport, character by character.
    ///
    /// At most [`SEND_MAX_CHARS`] characters are written.
    ///
    /// # Errors
    /// Returns `BtError::NotInitialized` if the link has no successful
    /// bring-up; nothing is written in that case.
    pub fn send(&mut self, text: &str) -> Result<(), BtError> {
        if self.state == LinkState::NotInitialized {
            warn!("send rejected: link not initialized");
            return Err(BtError::NotInitialized);
        }

        for byte in text.bytes().take(SEND_MAX_CHARS) {
            self.port.put_byte(byte);
        }
        Ok(())
    }

    /// Receive one `\n`-terminated line into `buf`.
    ///
    /// Polls the transport for one byte at a time; every empty poll burns
    /// one interval of the idle budget (200 polls of 5 ms). The budget is
    /// a ceiling on total idle time - a received byte does not refill it.
    /// The terminator is stored, subject to the buffer's
    /// overwrite-at-capacity policy.
    ///
    /// # Errors
    /// - `BtError::NotInitialized` if the link has no successful bring-up
    /// - `BtError::Timeout` once the idle budget is spent; `buf` is
    ///   cleared in that case
    pub fn receive<const N: usize>(&mut self, buf: &mut RecvBuf<N>) -> Result<(), BtError> {
        if self.state == LinkState::NotInitialized {
            warn!("receive rejected: link not initialized");
            return Err(BtError::NotInitialized);
        }

        buf.clear();
        let mut budget = IdleBudget::new(RECV_POLL_BUDGET, RECV_POLL_INTERVAL_MS);

        loop {
            let byte = loop {
                if let Some(byte) = self.port.poll_byte() {
                    break byte;
                }
                if !budget.tick(&mut *self.port) {
                    buf.clear();
                    return Err(BtError::Timeout);
                }
            };

            buf.push_lossy(byte);
            if byte == b'\n' {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prisma_common::bt::driver::ModeLine;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct MockPort {
        rx: VecDeque<u8>,
        sent: Vec<u8>,
        delay_calls: u32,
        delayed_ms: u32,
    }

    impl MockPort {
        fn with_rx(bytes: &[u8]) -> Self {
            Self {
                rx: bytes.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl BtPort for MockPort {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn version(&self) -> &'static str {
            "0.1.0"
        }

        fn put_byte(&mut self, byte: u8) {
            self.sent.push(byte);
        }

        fn poll_byte(&mut self) -> Option<u8> {
            self.rx.pop_front()
        }

        fn set_baud(&mut self, _baud: u32) {}

        fn set_mode_line(&mut self, _line: ModeLine) {}

        fn set_power(&mut self, _on: bool) {}

        fn delay_ms(&mut self, ms: u32) {
            self.delay_calls += 1;
            self.delayed_ms += ms;
        }
    }

    #[test]
    fn receive_reads_one_line_with_terminator() {
        let mut port = MockPort::with_rx(b"OK\r\nextra");
        let mut buf = RecvBuf::<16>::new();
        LineChannel::new(&mut port, LinkState::Ready)
            .receive(&mut buf)
            .expect("line");
        assert_eq!(buf.as_bytes(), b"OK\r\n");
        // Bytes after the terminator stay on the wire.
        assert_eq!(port.rx.len(), 5);
    }

    #[test]
    fn receive_timeout_consumes_exact_budget() {
        let mut port = MockPort::default();
        let mut buf = RecvBuf::<16>::new();
        let result = LineChannel::new(&mut port, LinkState::Ready).receive(&mut buf);
        assert!(matches!(result, Err(BtError::Timeout)));
        assert_eq!(port.delay_calls, RECV_POLL_BUDGET);
        assert_eq!(port.delayed_ms, RECV_POLL_BUDGET * RECV_POLL_INTERVAL_MS);
    }

    #[test]
    fn receive_does_not_refill_budget_on_bytes() {
        // A partial line followed by silence: the bytes read must not
        // extend the idle ceiling, and the buffer is cleared on timeout.
        let mut port = MockPort::with_rx(b"AB");
        let mut buf = RecvBuf::<16>::new();
        let result = LineChannel::new(&mut port, LinkState::Ready).receive(&mut buf);
        assert!(matches!(result, Err(BtError::Timeout)));
        assert!(buf.is_empty());
        assert_eq!(port.delayed_ms, RECV_POLL_BUDGET * RECV_POLL_INTERVAL_MS);
    }

    #[test]
    fn receive_overwrites_last_byte_at_capacity() {
        let mut port = MockPort::with_rx(b"0123456789\n");
        let mut buf = RecvBuf::<8>::new();
        LineChannel::new(&mut port, LinkState::Ready)
            .receive(&mut buf)
            .expect("line");
        assert_eq!(buf.as_bytes(), b"0123456\n");
    }

    #[test]
    fn send_caps_at_255_characters() {
        let mut port = MockPort::default();
        let text = "x".repeat(300);
        LineChannel::new(&mut port, LinkState::Ready)
            .send(&text)
            .expect("send");
        assert_eq!(port.sent.len(), SEND_MAX_CHARS);
    }

    #[test]
    fn send_rejected_when_not_initialized() {
        let mut port = MockPort::default();
        let result = LineChannel::new(&mut port, LinkState::NotInitialized).send("hello");
        assert!(matches!(result, Err(BtError::NotInitialized)));
        assert!(port.sent.is_empty());
    }

    #[test]
    fn receive_rejected_when_not_initialized() {
        let mut port = MockPort::with_rx(b"OK\r\n");
        let mut buf = RecvBuf::<16>::new();
        let result = LineChannel::new(&mut port, LinkState::NotInitialized).receive(&mut buf);
        assert!(matches!(result, Err(BtError::NotInitialized)));
        // No polling happened.
        assert_eq!(port.rx.len(), 4);
    }
}
