//! Bluetooth link configuration.
//!
//! `BtConfig` is loaded from `bt.toml`. Every field has a default, so an
//! empty file (or no file at all) yields a usable simulation setup.

use crate::bt::consts::{
    DEFAULT_DATA_BAUD, DEFAULT_DEVICE_NAME, DEFAULT_PORT, DEVICE_NAME_MAX, NAME_SUFFIX,
};
use crate::bt::driver::BtError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default function for port
fn default_port() -> String {
    DEFAULT_PORT.to_string()
}

/// Default function for device_name
fn default_device_name() -> String {
    DEFAULT_DEVICE_NAME.to_string()
}

/// Default function for data_baud
fn default_data_baud() -> u32 {
    DEFAULT_DATA_BAUD
}

/// Main configuration loaded from `bt.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BtConfig {
    /// Port driver to attach the module through (e.g., "simulation").
    #[serde(default = "default_port")]
    pub port: String,

    /// Requested base name. The fixed provisioning suffix is appended
    /// when the module is programmed.
    #[serde(default = "default_device_name")]
    pub device_name: String,

    /// Data-channel baud rate. The command-session rate is fixed by the
    /// module family and not configurable.
    #[serde(default = "default_data_baud")]
    pub data_baud: u32,

    /// Per-driver configuration sections.
    /// Key = port driver name, Value = driver-specific TOML table.
    #[serde(default)]
    pub driver_config: HashMap<String, toml::Value>,
}

impl Default for BtConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            device_name: default_device_name(),
            data_baud: default_data_baud(),
            driver_config: HashMap::new(),
        }
    }
}

impl BtConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    /// Returns `BtError::ConfigError` if the text is not valid TOML.
    pub fn from_toml(content: &str) -> Result<Self, BtError> {
        toml::from_str(content)
            .map_err(|e| BtError::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Validate the configuration.
    ///
    /// # Validation Rules
    /// 1. `device_name` is non-empty ASCII
    /// 2. `device_name` plus the fixed suffix fits the name bound
    /// 3. `data_baud` > 0
    pub fn validate(&self) -> Result<(), BtError> {
        if self.device_name.is_empty() {
            return Err(BtError::ConfigError(
                "device_name must not be empty".to_string(),
            ));
        }

        if !self.device_name.is_ascii() {
            return Err(BtError::ConfigError(format!(
                "device_name '{}' must be ASCII",
                self.device_name
            )));
        }

        let composed_len = self.device_name.len() + NAME_SUFFIX.len();
        if composed_len > DEVICE_NAME_MAX {
            return Err(BtError::ConfigError(format!(
                "device_name '{}' too long: {} characters with suffix (max {})",
                self.device_name, composed_len, DEVICE_NAME_MAX
            )));
        }

        if self.data_baud == 0 {
            return Err(BtError::ConfigError(
                "data_baud must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_toml() {
        let config = BtConfig::from_toml("").expect("empty config");
        assert_eq!(config.port, "simulation");
        assert_eq!(config.device_name, "PRISMA4");
        assert_eq!(config.data_baud, DEFAULT_DATA_BAUD);
        assert!(config.driver_config.is_empty());
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn parses_driver_config_section() {
        let config = BtConfig::from_toml(
            r#"
            device_name = "ROBOT1"

            [driver_config.simulation]
            name = "HC-05"
            uart_baud = 9600
            "#,
        )
        .expect("config");
        assert_eq!(config.device_name, "ROBOT1");
        let sim = config.driver_config.get("simulation").expect("section");
        assert_eq!(sim.get("uart_baud").and_then(|v| v.as_integer()), Some(9600));
    }

    #[test]
    fn rejects_empty_name() {
        let mut config = BtConfig::default();
        config.device_name = String::new();
        assert!(matches!(config.validate(), Err(BtError::ConfigError(_))));
    }

    #[test]
    fn rejects_name_that_overflows_with_suffix() {
        let mut config = BtConfig::default();
        // 12 + 5 suffix characters > 16
        config.device_name = "TWELVECHARSX".to_string();
        assert!(matches!(config.validate(), Err(BtError::ConfigError(_))));
    }

    #[test]
    fn rejects_non_ascii_name() {
        let mut config = BtConfig::default();
        config.device_name = "Zümo".to_string();
        assert!(matches!(config.validate(), Err(BtError::ConfigError(_))));
    }

    #[test]
    fn rejects_zero_baud() {
        let mut config = BtConfig::default();
        config.data_baud = 0;
        assert!(matches!(config.validate(), Err(BtError::ConfigError(_))));
    }

    #[test]
    fn invalid_toml_is_config_error() {
        assert!(matches!(
            BtConfig::from_toml("port = ["),
            Err(BtError::ConfigError(_))
        ));
    }
}
