//! `BtCore` struct and bring-up orchestration.
//!
//! `BtCore` is the main entry point for link operations. It owns the
//! port, the link state and the device name, and sequences the bring-up:
//! identity check, conditional reprogramming, data-mode restore.

use crate::identity::{IdentityChecker, IdentityOutcome};
use crate::line::LineChannel;
use crate::mode::ModeController;
use crate::port_registry::PortRegistry;
use crate::program::Programmer;
use prisma_common::bt::config::BtConfig;
use prisma_common::bt::driver::{BtError, BtPort};
use prisma_common::bt::types::{DeviceName, LinkState, RecvBuf};
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Bluetooth link controller.
///
/// Single-threaded and cooperative-by-blocking: every operation runs to
/// completion on the calling context. A full bring-up takes about two
/// seconds of module time, longer when reprogramming occurs.
pub struct BtCore {
    /// Link configuration
    config: BtConfig,
    /// Active port instance
    port: Option<Box<dyn BtPort>>,
    /// Readiness state
    state: LinkState,
    /// Name reported by (or programmed into) the module
    name: DeviceName,
}

impl BtCore {
    /// Create a new BtCore instance with the given configuration.
    ///
    /// # Errors
    /// Returns error if configuration validation fails.
    pub fn new(config: BtConfig) -> Result<Self, BtError> {
        config.validate()?;

        info!(
            "BtCore created (port driver '{}', requested name '{}', {} baud)",
            config.port, config.device_name, config.data_baud
        );

        Ok(Self {
            config,
            port: None,
            state: LinkState::NotInitialized,
            name: DeviceName::new(),
        })
    }

    /// Load link configuration from a TOML file.
    ///
    /// # Errors
    /// Returns `BtError::ConfigError` if the file cannot be read or parsed.
    pub fn load_config(config_path: &Path) -> Result<BtConfig, BtError> {
        info!("Loading configuration from {:?}", config_path);

        let content = fs::read_to_string(config_path).map_err(|e| {
            BtError::ConfigError(format!("Failed to read config file {config_path:?}: {e}"))
        })?;

        BtConfig::from_toml(&content)
    }

    /// Create the configured port and run the full bring-up.
    ///
    /// # Errors
    /// Returns error if the port cannot be created or the module cannot
    /// be brought into a known state.
    pub fn init(&mut self, registry: &PortRegistry) -> Result<(), BtError> {
        let mut port = registry.create_port(&self.config.port)?;
        info!("Created port driver: {} v{}", port.name(), port.version());

        port.configure(&self.config)?;
        self.port = Some(port);

        self.bring_up()
    }

    /// Re-run the bring-up on the existing port.
    ///
    /// This is the only sanctioned way back from `Ready` to
    /// `Initializing`.
    ///
    /// # Errors
    /// Returns `BtError::NotInitialized` if no port was ever created.
    pub fn reinit(&mut self) -> Result<(), BtError> {
        if self.port.is_none() {
            return Err(BtError::NotInitialized);
        }
        self.bring_up()
    }

    /// Verify the module and reprogram it if needed.
    fn bring_up(&mut self) -> Result<(), BtError> {
        self.state = LinkState::Initializing;
        info!("powering up bluetooth module");

        let data_baud = self.config.data_baud;
        let result = {
            let port = self.port.as_mut().ok_or(BtError::NotInitialized)?;
            match IdentityChecker::new(port.as_mut(), data_baud).check() {
                IdentityOutcome::Match(name) => Ok(name),
                IdentityOutcome::Mismatch => {
                    Programmer::new(port.as_mut(), data_baud).program(&self.config.device_name)
                }
            }
        };

        match result {
            Ok(name) => {
                self.name = name;
                let port = self.port.as_mut().ok_or(BtError::NotInitialized)?;
                ModeController::new(port.as_mut(), data_baud).enter_data_mode();
                self.state = LinkState::Ready;
                info!(
                    "bluetooth name: {}, baudrate: {},8,N,1",
                    self.name, data_baud
                );
                Ok(())
            }
            Err(e) => {
                self.state = LinkState::NotInitialized;
                error!("bluetooth bring-up failed: {e}");
                Err(e)
            }
        }
    }

    /// Send a string over the link.
    ///
    /// # Errors
    /// Returns `BtError::NotInitialized` before a successful bring-up.
    pub fn send(&mut self, text: &str) -> Result<(), BtError> {
        let state = self.state;
        let port = self.port.as_mut().ok_or(BtError::NotInitialized)?;
        LineChannel::new(port.as_mut(), state).send(text)
    }

    /// Receive one `\n`-terminated line from the link.
    ///
    /// # Errors
    /// Returns `BtError::NotInitialized` before a successful bring-up,
    /// `BtError::Timeout` when no line arrives within the receive budget.
    pub fn receive<const N: usize>(&mut self) -> Result<RecvBuf<N>, BtError> {
        let state = self.state;
        let port = self.port.as_mut().ok_or(BtError::NotInitialized)?;
        let mut buf = RecvBuf::new();
        LineChannel::new(port.as_mut(), state).receive(&mut buf)?;
        Ok(buf)
    }

    /// The current device name.
    ///
    /// May be stale or empty before a successful bring-up.
    pub fn name(&self) -> &DeviceName {
        &self.name
    }

    /// The current link state.
    pub fn state(&self) -> LinkState {
        self.state
    }
}
