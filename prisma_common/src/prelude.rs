//! Common re-exports for the Prisma4 workspace.

pub use crate::bt::config::BtConfig;
pub use crate::bt::driver::{BtError, BtPort, ModeLine, PortFactory};
pub use crate::bt::types::{DeviceName, LinkState, RecvBuf};
