//! Bluetooth link protocol constants.
//!
//! The HC-05 module family speaks a line-oriented AT dialect. The reply
//! offsets and the name suffix below are a fixed wire-format contract of
//! that family; they are protocol constants, never derived at runtime.

/// Maximum number of characters a module name may carry.
pub const DEVICE_NAME_MAX: usize = 16;

/// Trailing marker a correctly provisioned module's name must carry.
/// The leading character doubles as the separator between the requested
/// base name and the suffix when a name is composed.
pub const NAME_SUFFIX: &str = "_Zumo";

/// Length of the fixed prefix in the module's name reply (`+NAME:`).
pub const NAME_REPLY_PREFIX_LEN: usize = 6;

/// Number of terminator bytes (CRLF) counted in a reply's length.
pub const REPLY_TERMINATOR_LEN: usize = 2;

/// Leading characters of every acknowledged module reply.
pub const OK_PREFIX: &str = "OK";

/// Line terminator for outgoing AT commands.
pub const CRLF: &str = "\r\n";

/// Bare liveness probe.
pub const CMD_LIVENESS: &str = "AT\r\n";

/// Name query, answered as `+NAME:<name>\r\n`.
pub const CMD_NAME_QUERY: &str = "AT+NAME?\r\n";

/// Prefix of the name-set command (`AT+NAME=<name>\r\n`).
pub const CMD_NAME_SET_PREFIX: &str = "AT+NAME=";

/// Prefix of the baud-rate-set command (`AT+UART=<baud>,0,0\r\n`).
pub const CMD_UART_SET_PREFIX: &str = "AT+UART=";

/// Reset command. Sent without a terminator; the module reboots without
/// acknowledging it.
pub const CMD_RESET: &str = "AT+RESET";

/// Baud rate of the module's AT command session.
pub const COMMAND_BAUD: u32 = 38_400;

/// Default data-channel baud rate.
pub const DEFAULT_DATA_BAUD: u32 = 115_200;

/// Default port driver name.
pub const DEFAULT_PORT: &str = "simulation";

/// Default requested base name.
pub const DEFAULT_DEVICE_NAME: &str = "PRISMA4";

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "bt.toml";

/// Settle delay after toggling the power line (ms).
pub const SETTLE_POWER_MS: u32 = 100;

/// Settle delay after toggling the mode line (ms).
pub const SETTLE_MODE_MS: u32 = 200;

/// Settle delay for the command interpreter to boot after power-up (ms).
pub const SETTLE_BOOT_MS: u32 = 1000;

/// Settle delay between the name query and reading its reply (ms).
pub const NAME_QUERY_SETTLE_MS: u32 = 300;

/// Settle delay between the liveness probe and reading its reply (ms).
pub const LIVENESS_SETTLE_MS: u32 = 300;

/// Polling interval while waiting for an incoming byte (ms).
pub const RECV_POLL_INTERVAL_MS: u32 = 5;

/// Number of empty polls before a receive times out (200 * 5ms = 1s).
pub const RECV_POLL_BUDGET: u32 = 200;

/// Maximum number of characters written by a single send.
pub const SEND_MAX_CHARS: usize = 255;

/// Capacity of the internal buffer used for AT reply lines.
pub const REPLY_BUF_CAPACITY: usize = 32;
