//! Registry for port drivers.
//!
//! Provides a `PortRegistry` struct for registering and retrieving port
//! driver factories. Constructor-injection rather than global state:
//! the registry is built at startup, populated via `register()`, and
//! passed to `BtCore` by reference. Testable in isolation.

use prisma_common::bt::driver::{BtError, BtPort, PortFactory};
use std::collections::HashMap;

/// Registry of available port drivers.
pub struct PortRegistry {
    factories: HashMap<&'static str, PortFactory>,
}

impl PortRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a port driver factory.
    ///
    /// # Panics
    /// Panics if a driver with the same name is already registered.
    pub fn register(&mut self, name: &'static str, factory: PortFactory) {
        if self.factories.contains_key(name) {
            panic!("Port driver '{name}' is already registered");
        }
        self.factories.insert(name, factory);
    }

    /// Get a port driver factory by name.
    pub fn get_factory(&self, name: &str) -> Option<PortFactory> {
        self.factories.get(name).copied()
    }

    /// Create a port instance by name.
    ///
    /// # Errors
    /// Returns `BtError::PortNotFound` if no driver with the given name
    /// is registered.
    pub fn create_port(&self, name: &str) -> Result<Box<dyn BtPort>, BtError> {
        let factory = self
            .get_factory(name)
            .ok_or_else(|| BtError::PortNotFound(name.to_string()))?;
        Ok(factory())
    }

    /// List all registered driver names.
    pub fn list_ports(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

impl Default for PortRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prisma_common::bt::driver::ModeLine;

    struct TestPort;

    impl BtPort for TestPort {
        fn name(&self) -> &'static str {
            "test"
        }

        fn version(&self) -> &'static str {
            "0.1.0"
        }

        fn put_byte(&mut self, _byte: u8) {}

        fn poll_byte(&mut self) -> Option<u8> {
            None
        }

        fn set_baud(&mut self, _baud: u32) {}

        fn set_mode_line(&mut self, _line: ModeLine) {}

        fn set_power(&mut self, _on: bool) {}

        fn delay_ms(&mut self, _ms: u32) {}
    }

    fn create_test_port() -> Box<dyn BtPort> {
        Box::new(TestPort)
    }

    #[test]
    fn registry_register_and_create() {
        let mut reg = PortRegistry::new();
        reg.register("test_port", create_test_port);

        let port = reg.create_port("test_port").expect("should create");
        assert_eq!(port.name(), "test");
    }

    #[test]
    fn registry_port_not_found() {
        let reg = PortRegistry::new();
        let result = reg.create_port("nonexistent");
        assert!(matches!(result, Err(BtError::PortNotFound(_))));
    }

    #[test]
    fn registry_list_ports() {
        let mut reg = PortRegistry::new();
        reg.register("alpha", create_test_port);
        reg.register("beta", create_test_port);

        let mut names = reg.list_ports();
        names.sort();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn registry_duplicate_panics() {
        let mut reg = PortRegistry::new();
        reg.register("dup", create_test_port);
        reg.register("dup", create_test_port);
    }
}
