//! Idle-time budget for bounded polling loops.
//!
//! Receive loops poll the port for one byte at a time and burn a fixed
//! interval of idle time on every empty poll. `IdleBudget` holds the
//! remaining number of intervals; because the delay goes through the
//! port, a simulated port advances a virtual clock and the whole loop
//! becomes deterministic under test.

use crate::bt::driver::BtPort;

/// Countdown of idle polling intervals.
///
/// The budget is a ceiling on total idle time: a successfully read byte
/// does not refill it.
#[derive(Debug)]
pub struct IdleBudget {
    remaining: u32,
    interval_ms: u32,
}

impl IdleBudget {
    /// Create a budget of `polls` intervals of `interval_ms` each.
    pub fn new(polls: u32, interval_ms: u32) -> Self {
        Self {
            remaining: polls,
            interval_ms,
        }
    }

    /// Burn one idle interval on the port.
    ///
    /// Returns `false` once the budget is exhausted; the final interval
    /// is still waited out, matching the module's reply timing window.
    pub fn tick(&mut self, port: &mut dyn BtPort) -> bool {
        if self.remaining == 0 {
            return false;
        }
        port.delay_ms(self.interval_ms);
        self.remaining -= 1;
        self.remaining != 0
    }

    /// Remaining idle intervals.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}
