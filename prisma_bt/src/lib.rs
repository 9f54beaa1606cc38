//! # Prisma4 Bluetooth Link Controller
//!
//! Controller for an HC-05 class serial Bluetooth module with a pluggable
//! port-driver architecture. On every power-up the module is verified
//! against the provisioning suffix convention and, when it does not match,
//! reprogrammed in a mode-switched AT command session before the link is
//! declared ready.
//!
//! Port drivers implement the `BtPort` trait defined in
//! `prisma_common::bt::driver`.
//!
//! # Module Structure
//!
//! - [`core`] - `BtCore` state machine and bring-up orchestration
//! - [`line`] - CRLF line channel over the byte transport
//! - [`mode`] - data/command mode transitions and settle delays
//! - [`identity`] - name query and suffix check
//! - [`program`] - AT reprogramming sequence
//! - [`port_registry`] - Port driver factory registration
//! - [`ports`] - Port driver implementations
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                  prisma_bt (single crate)                 │
//! │  ┌──────────┐   ┌───────────────────┐   ┌──────────────┐  │
//! │  │  BtCore  │──►│ identity/program  │   │ PortRegistry │  │
//! │  │ (states) │   │ (bring-up logic)  │   └──────┬───────┘  │
//! │  └────┬─────┘   └─────────┬─────────┘          │          │
//! │       │                   ▼                    ▼          │
//! │       │            ┌────────────┐      ┌────────────┐     │
//! │       └───────────►│ line/mode  │─────►│   BtPort   │     │
//! │                    └────────────┘      │ (trait obj)│     │
//! │                                        └────────────┘     │
//! └───────────────────────────────────────────────────────────┘
//! ```

#![deny(warnings)]
#![deny(missing_docs)]

pub mod core;
pub mod identity;
pub mod line;
pub mod mode;
pub mod port_registry;
pub mod ports;
pub mod program;

// Re-export key types for convenience
pub use crate::core::BtCore;
pub use crate::port_registry::PortRegistry;
pub use crate::ports::register_all_ports;
