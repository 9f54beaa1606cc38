//! # Prisma4 Bluetooth Link Binary
//!
//! Brings the Bluetooth module into a known operating state: verifies the
//! programmed name against the provisioning suffix and reprograms the
//! module when it does not match.
//!
//! # Usage
//!
//! ```bash
//! # Bring-up against the simulated module
//! prisma_bt --simulate
//!
//! # Bring-up with a config file and a specific port driver
//! prisma_bt --config config/bt.toml --port uart
//!
//! # Verbose logging
//! prisma_bt -s -v
//! ```

#![deny(warnings)]

use clap::Parser;
use prisma_bt::core::BtCore;
use prisma_bt::port_registry::PortRegistry;
use prisma_bt::ports::register_all_ports;
use prisma_common::bt::config::BtConfig;
use prisma_common::bt::consts::DEFAULT_CONFIG_PATH;
use std::path::PathBuf;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Prisma4 Bluetooth link controller
#[derive(Parser, Debug)]
#[command(name = "prisma_bt")]
#[command(author = "Prisma4")]
#[command(version)]
#[command(about = "Bluetooth link controller with pluggable port drivers")]
#[command(long_about = None)]
struct Args {
    /// Path to link configuration file (bt.toml)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Force the simulation port driver
    #[arg(short = 's', long)]
    simulate: bool,

    /// Attach through a specific port driver
    #[arg(short, long)]
    port: Option<String>,

    /// Override the requested base name
    #[arg(short, long)]
    name: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        error!("Bluetooth bring-up failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing
    setup_tracing(&args);

    info!("Prisma4 BT v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = if args.config.exists() {
        BtCore::load_config(&args.config)?
    } else {
        warn!(
            "No config file at {:?}, using built-in defaults",
            args.config
        );
        BtConfig::default()
    };

    if args.simulate {
        info!("Simulation mode enabled");
        config.port = "simulation".to_string();
    } else if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(name) = args.name {
        config.device_name = name;
    }

    let mut registry = PortRegistry::new();
    register_all_ports(&mut registry);

    let mut core = BtCore::new(config)?;
    core.init(&registry)?;

    info!("Link ready, module answers as '{}'", core.name());
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
