//! Prisma4 Common Library
//!
//! This crate provides the shared types, protocol constants and configuration
//! loading utilities used by the Prisma4 workspace crates.
//!
//! # Module Structure
//!
//! - [`bt`] - Bluetooth link constants, types, port trait and configuration
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use prisma_common::prelude::*;
//! use prisma_common::bt::consts::COMMAND_BAUD;
//! ```

#![deny(warnings)]
#![deny(missing_docs)]

pub mod bt;
pub mod prelude;
