//! Bluetooth link data types.
//!
//! This module defines the link state machine value and the bounded text
//! types used on the wire:
//! - `LinkState` - readiness state owned by the link controller
//! - `DeviceName` - bounded module name (max 16 characters)
//! - `RecvBuf` - bounded line buffer with overwrite-at-capacity policy

use crate::bt::consts::{DEVICE_NAME_MAX, NAME_REPLY_PREFIX_LEN, NAME_SUFFIX};
use crate::bt::driver::BtError;
use core::fmt;

/// Readiness state of the Bluetooth link.
///
/// Owned by the link controller and passed by value to anything that
/// needs to guard on it; there is no ambient global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    /// No successful bring-up yet; the transport is not safe to use.
    #[default]
    NotInitialized,
    /// A bring-up sequence is running.
    Initializing,
    /// Bring-up completed; send/receive are available.
    Ready,
}

/// Module name, bounded to [`DEVICE_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceName(heapless::String<DEVICE_NAME_MAX>);

impl DeviceName {
    /// Create an empty name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose `<base><suffix>` where the suffix is the fixed
    /// provisioning marker [`NAME_SUFFIX`].
    ///
    /// # Errors
    /// Returns `BtError::ConfigError` if the composed name would exceed
    /// the storage bound.
    pub fn compose(base: &str) -> Result<Self, BtError> {
        let mut name = heapless::String::new();
        if name.push_str(base).is_err() || name.push_str(NAME_SUFFIX).is_err() {
            return Err(BtError::ConfigError(format!(
                "composed name '{base}{NAME_SUFFIX}' exceeds {DEVICE_NAME_MAX} characters"
            )));
        }
        Ok(Self(name))
    }

    /// Extract the name from a terminator-stripped name reply.
    ///
    /// The reply format is `<prefix><name>` with a fixed prefix of
    /// [`NAME_REPLY_PREFIX_LEN`] characters. Copies up to
    /// [`DEVICE_NAME_MAX`] characters, stopping at a NUL byte.
    pub fn from_reply(payload: &[u8]) -> Self {
        let mut name = heapless::String::new();
        for &byte in payload.iter().skip(NAME_REPLY_PREFIX_LEN).take(DEVICE_NAME_MAX) {
            if byte == 0 {
                break;
            }
            if name.push(byte as char).is_err() {
                break;
            }
        }
        Self(name)
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Number of characters in the name.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if no name is stored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DeviceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounded line buffer for one CRLF-terminated reply.
///
/// Once capacity is reached, further bytes overwrite the last stored
/// byte instead of being appended; the line is still consumed in full
/// from the wire, only truncated in the buffer. Terminator bytes pass
/// through the same path as payload bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecvBuf<const N: usize> {
    buf: heapless::Vec<u8, N>,
}

impl<const N: usize> RecvBuf<N> {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            buf: heapless::Vec::new(),
        }
    }

    /// Discard all stored bytes.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Append a byte, overwriting the last stored byte at capacity.
    pub fn push_lossy(&mut self, byte: u8) {
        if self.buf.len() < N {
            let _ = self.buf.push(byte);
        } else if let Some(last) = self.buf.last_mut() {
            *last = byte;
        }
    }

    /// Number of stored bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// `true` if no bytes are stored.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The stored bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// The stored bytes as a string slice (replies are ASCII; invalid
    /// UTF-8 yields an empty slice rather than a panic).
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_state_default_is_not_initialized() {
        assert_eq!(LinkState::default(), LinkState::NotInitialized);
    }

    #[test]
    fn device_name_compose() {
        let name = DeviceName::compose("PRISMA4").expect("should fit");
        assert_eq!(name.as_str(), "PRISMA4_Zumo");
        assert_eq!(name.len(), 12);
    }

    #[test]
    fn device_name_compose_overflow() {
        let result = DeviceName::compose("WAYTOOLONGBASE");
        assert!(matches!(result, Err(BtError::ConfigError(_))));
    }

    #[test]
    fn device_name_from_reply_skips_prefix() {
        let name = DeviceName::from_reply(b"+NAME:PRISMA4_Zumo");
        assert_eq!(name.as_str(), "PRISMA4_Zumo");
    }

    #[test]
    fn device_name_from_reply_truncates_at_bound() {
        let name = DeviceName::from_reply(b"+NAME:ABCDEFGHIJKLMNOPQRSTUV");
        assert_eq!(name.len(), DEVICE_NAME_MAX);
        assert_eq!(name.as_str(), "ABCDEFGHIJKLMNOP");
    }

    #[test]
    fn device_name_from_reply_stops_at_nul() {
        let name = DeviceName::from_reply(b"+NAME:ABC\0DEF");
        assert_eq!(name.as_str(), "ABC");
    }

    #[test]
    fn recv_buf_appends_until_capacity() {
        let mut buf = RecvBuf::<4>::new();
        for &b in b"ab" {
            buf.push_lossy(b);
        }
        assert_eq!(buf.as_bytes(), b"ab");
    }

    #[test]
    fn recv_buf_overwrites_last_at_capacity() {
        let mut buf = RecvBuf::<4>::new();
        for &b in b"abcdef\n" {
            buf.push_lossy(b);
        }
        // d, e, f are each overwritten in place by their successor.
        assert_eq!(buf.as_bytes(), b"abc\n");
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn recv_buf_clear() {
        let mut buf = RecvBuf::<8>::new();
        buf.push_lossy(b'x');
        buf.clear();
        assert!(buf.is_empty());
    }
}
