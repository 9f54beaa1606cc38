//! `BtPort` implementation backed by the simulated module.

use super::module::SimulatedModule;
use prisma_common::bt::config::BtConfig;
use prisma_common::bt::consts::DEFAULT_DATA_BAUD;
use prisma_common::bt::driver::{BtError, BtPort, ModeLine};
use tracing::debug;

/// Simulation port implementing the `BtPort` trait.
///
/// Holds a [`SimulatedModule`] and a virtual millisecond clock; every
/// `delay_ms` advances the clock instead of sleeping.
pub struct SimulationPort {
    module: SimulatedModule,
    clock_ms: u64,
    host_baud: u32,
}

impl SimulationPort {
    /// Driver name in the port registry.
    pub const NAME: &'static str = "simulation";

    /// Create a port attached to a factory-fresh module.
    pub fn new() -> Self {
        Self {
            module: SimulatedModule::new(),
            clock_ms: 0,
            host_baud: DEFAULT_DATA_BAUD,
        }
    }

    /// The simulated module.
    pub fn module(&self) -> &SimulatedModule {
        &self.module
    }

    /// Mutable access to the simulated module (scenario setup).
    pub fn module_mut(&mut self) -> &mut SimulatedModule {
        &mut self.module
    }

    /// Current virtual time in milliseconds.
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }
}

impl Default for SimulationPort {
    fn default() -> Self {
        Self::new()
    }
}

impl BtPort for SimulationPort {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn configure(&mut self, config: &BtConfig) -> Result<(), BtError> {
        let Some(section) = config.driver_config.get(Self::NAME) else {
            return Ok(());
        };

        if let Some(value) = section.get("name") {
            let name = value.as_str().ok_or_else(|| {
                BtError::ConfigError("simulation.name must be a string".to_string())
            })?;
            self.module.set_name(name);
        }

        if let Some(value) = section.get("uart_baud") {
            let baud = value
                .as_integer()
                .and_then(|b| u32::try_from(b).ok())
                .ok_or_else(|| {
                    BtError::ConfigError("simulation.uart_baud must be a baud rate".to_string())
                })?;
            self.module.set_uart_baud(baud);
        }

        if let Some(value) = section.get("fail_liveness") {
            let fail = value.as_bool().ok_or_else(|| {
                BtError::ConfigError("simulation.fail_liveness must be a boolean".to_string())
            })?;
            self.module.set_fail_liveness(fail);
        }

        debug!(
            "simulation module configured: name '{}', {} baud",
            self.module.name(),
            self.module.uart_baud()
        );
        Ok(())
    }

    fn put_byte(&mut self, byte: u8) {
        self.module.feed(byte, self.host_baud, self.clock_ms);
    }

    fn poll_byte(&mut self) -> Option<u8> {
        self.module.take_byte()
    }

    fn set_baud(&mut self, baud: u32) {
        self.host_baud = baud;
    }

    fn set_mode_line(&mut self, line: ModeLine) {
        self.module.set_mode_line(line);
    }

    fn set_power(&mut self, on: bool) {
        self.module.on_power(on, self.clock_ms);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock_ms += u64::from(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_advances_virtual_clock() {
        let mut port = SimulationPort::new();
        port.delay_ms(100);
        port.delay_ms(250);
        assert_eq!(port.clock_ms(), 350);
    }

    #[test]
    fn bytes_flow_through_after_boot() {
        let mut port = SimulationPort::new();
        port.set_baud(9600);
        port.set_power(true);
        port.delay_ms(300);
        for byte in b"AT+NAME?\r\n" {
            port.put_byte(*byte);
        }

        let mut reply = Vec::new();
        while let Some(byte) = port.poll_byte() {
            reply.push(byte);
        }
        assert_eq!(reply, b"+NAME:HC-05\r\n");
    }

    #[test]
    fn configure_applies_driver_section() {
        let config = BtConfig::from_toml(
            r#"
            [driver_config.simulation]
            name = "PRISMA4_Zumo"
            uart_baud = 115200
            fail_liveness = true
            "#,
        )
        .expect("config");

        let mut port = SimulationPort::new();
        port.configure(&config).expect("configure");
        assert_eq!(port.module().name(), "PRISMA4_Zumo");
        assert_eq!(port.module().uart_baud(), 115_200);
    }

    #[test]
    fn configure_rejects_wrong_types() {
        let config = BtConfig::from_toml(
            r#"
            [driver_config.simulation]
            uart_baud = "fast"
            "#,
        )
        .expect("config");

        let mut port = SimulationPort::new();
        assert!(matches!(
            port.configure(&config),
            Err(BtError::ConfigError(_))
        ));
    }
}
