//! Bluetooth link constants, types and configuration.
//!
//! This module contains everything the Bluetooth link controller shares
//! across the workspace: the port driver trait, the wire-protocol
//! constants of the HC-05 module family, the bounded text types and the
//! TOML configuration.

pub mod config;
pub mod consts;
pub mod driver;
pub mod poll;
pub mod types;
