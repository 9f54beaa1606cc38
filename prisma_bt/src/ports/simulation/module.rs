//! Behavior model of an HC-05 class module.
//!
//! Models the pieces the controller interacts with: the AT command
//! parser, the per-mode baud rates, the power/boot gating and the
//! programmed parameters. Factory state is a fresh module: name "HC-05",
//! data channel at 9600 baud, so a default run exercises the full
//! reprogramming path.

use prisma_common::bt::consts::COMMAND_BAUD;
use prisma_common::bt::driver::ModeLine;
use std::collections::VecDeque;

/// Virtual boot time after power-up (ms). Shorter than the mode
/// controller's settle window, so a properly sequenced transition always
/// finds the module ready.
pub const SIM_BOOT_MS: u64 = 250;

/// Factory-fresh module name.
const FACTORY_NAME: &str = "HC-05";

/// Factory-fresh data-channel baud rate.
const FACTORY_UART_BAUD: u32 = 9600;

/// Simulated HC-05 module state.
pub struct SimulatedModule {
    name: String,
    uart_baud: u32,
    powered: bool,
    mode_line: ModeLine,
    ready_at_ms: u64,
    fail_liveness: bool,
    fail_name_set: bool,
    fail_uart_set: bool,
    rx: Vec<u8>,
    tx: VecDeque<u8>,
}

impl SimulatedModule {
    /// Create a factory-fresh module.
    pub fn new() -> Self {
        Self {
            name: FACTORY_NAME.to_string(),
            uart_baud: FACTORY_UART_BAUD,
            powered: false,
            mode_line: ModeLine::Data,
            ready_at_ms: 0,
            fail_liveness: false,
            fail_name_set: false,
            fail_uart_set: false,
            rx: Vec::new(),
            tx: VecDeque::new(),
        }
    }

    /// The currently programmed name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Overwrite the programmed name (test/scenario setup).
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// The programmed data-channel baud rate.
    pub fn uart_baud(&self) -> u32 {
        self.uart_baud
    }

    /// Overwrite the programmed baud rate (test/scenario setup).
    pub fn set_uart_baud(&mut self, baud: u32) {
        self.uart_baud = baud;
    }

    /// Make the module answer the liveness probe with an error.
    pub fn set_fail_liveness(&mut self, fail: bool) {
        self.fail_liveness = fail;
    }

    /// Make the module refuse the name-set command.
    pub fn set_fail_name_set(&mut self, fail: bool) {
        self.fail_name_set = fail;
    }

    /// Make the module refuse the baud-rate-set command.
    pub fn set_fail_uart_set(&mut self, fail: bool) {
        self.fail_uart_set = fail;
    }

    /// Drive the power-enable line. Powering up starts a boot window;
    /// powering down drops all buffered traffic.
    pub fn on_power(&mut self, on: bool, now_ms: u64) {
        if on && !self.powered {
            self.powered = true;
            self.ready_at_ms = now_ms + SIM_BOOT_MS;
            self.rx.clear();
            self.tx.clear();
        } else if !on && self.powered {
            self.powered = false;
            self.rx.clear();
            self.tx.clear();
        }
    }

    /// Drive the mode-select line.
    pub fn set_mode_line(&mut self, line: ModeLine) {
        self.mode_line = line;
    }

    /// Feed one byte from the host.
    ///
    /// Ignored while powered down, still booting, or when the host baud
    /// rate does not match the rate of the current mode.
    pub fn feed(&mut self, byte: u8, host_baud: u32, now_ms: u64) {
        if !self.powered || now_ms < self.ready_at_ms || host_baud != self.expected_baud() {
            return;
        }

        self.rx.push(byte);
        if byte == b'\n' {
            let line = String::from_utf8_lossy(&self.rx).into_owned();
            self.rx.clear();
            self.execute(line.trim_end_matches(['\r', '\n']), now_ms);
        }
    }

    /// Pop one reply byte, if any.
    pub fn take_byte(&mut self) -> Option<u8> {
        if !self.powered {
            return None;
        }
        self.tx.pop_front()
    }

    /// Baud rate the module listens at in its current mode.
    fn expected_baud(&self) -> u32 {
        match self.mode_line {
            ModeLine::Command => COMMAND_BAUD,
            ModeLine::Data => self.uart_baud,
        }
    }

    /// Execute one AT command line.
    fn execute(&mut self, line: &str, now_ms: u64) {
        match line {
            "AT" => {
                if self.fail_liveness {
                    self.respond("ERROR:(0)\r\n");
                } else {
                    self.respond("OK\r\n");
                }
            }
            "AT+NAME?" => {
                let reply = format!("+NAME:{}\r\n", self.name);
                self.respond(&reply);
            }
            "AT+RESET" => {
                self.respond("OK\r\n");
                self.ready_at_ms = now_ms + SIM_BOOT_MS;
            }
            _ => {
                if let Some(name) = line.strip_prefix("AT+NAME=") {
                    if self.fail_name_set {
                        self.respond("ERROR:(0)\r\n");
                    } else {
                        self.name = name.to_string();
                        self.respond("OK\r\n");
                    }
                } else if let Some(params) = line.strip_prefix("AT+UART=") {
                    match params.split(',').next().and_then(|b| b.parse::<u32>().ok()) {
                        Some(baud) if !self.fail_uart_set => {
                            self.uart_baud = baud;
                            self.respond("OK\r\n");
                        }
                        _ => self.respond("ERROR:(0)\r\n"),
                    }
                } else {
                    self.respond("ERROR:(0)\r\n");
                }
            }
        }
    }

    fn respond(&mut self, text: &str) {
        self.tx.extend(text.bytes());
    }
}

impl Default for SimulatedModule {
    fn default() -> Self {
        Self::new()
    }
}
