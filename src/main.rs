use anyhow::{Context, Result};
use clap::Parser;
use ina219_battery::config::AppConfig;
use ina219_battery::core::{HaltHandle, PollingLoop};
use ina219_battery::sinks::{format_status_line, LogSink, PercentageFile};
use ina219_battery_core::{BatterySensor, StatusEvent};
use ina219_battery_sources::{Ina219, WordTransport};
use log::{error, info, warn};
use std::path::PathBuf;

/// ina219-battery - battery state-of-charge monitor for INA219 sensors
#[derive(Parser, Debug, Clone)]
#[command(name = "ina219-battery")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file to load instead of the default location
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// I2C device address, e.g. 0x41 (overrides the config file)
    #[arg(short = 'a', long = "address", value_name = "ADDR", value_parser = parse_address)]
    address: Option<u8>,

    /// I2C bus number, opened as /dev/i2c-N (overrides the config file)
    #[arg(short = 'b', long = "bus", value_name = "N")]
    bus: Option<u8>,

    /// Milliseconds between polls (overrides the config file)
    #[arg(short = 'i', long = "interval-ms", value_name = "MS")]
    interval_ms: Option<u64>,

    /// Take a single sample, print it and exit
    #[arg(long = "once")]
    once: bool,

    /// Write the default configuration to the config location and exit
    #[arg(long = "write-default-config")]
    write_default_config: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

/// Parse a decimal or 0x-prefixed hexadecimal address
fn parse_address(s: &str) -> Result<u8, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    let address = parsed.map_err(|e| format!("Invalid I2C address '{}': {}", s, e))?;
    if address > 0x7F {
        return Err(format!("I2C address {:#04x} is not a 7-bit address", address));
    }
    Ok(address)
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(address) = self.address {
            config.sensor.i2c_address = address;
        }
        if let Some(bus) = self.bus {
            config.sensor.bus_id = bus;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.poll_interval_ms = interval_ms;
        }
    }
}

fn load_config(cli: &Cli) -> AppConfig {
    let loaded = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config file '{}'", path.display())),
        None => AppConfig::load(),
    };

    match loaded {
        Ok(config) => config,
        Err(e) => {
            warn!("{:#}; using defaults", e);
            AppConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting ina219-battery v{}", env!("CARGO_PKG_VERSION"));

    if cli.write_default_config {
        let path = AppConfig::config_path()?;
        AppConfig::default().save_to_path(&path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let mut config = load_config(&cli);
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    let transport = open_transport(config.sensor.bus_id)?;
    run(&cli, &config, transport).await
}

#[cfg(target_os = "linux")]
fn open_transport(bus_id: u8) -> Result<Box<dyn WordTransport + Send>> {
    Ok(Box::new(ina219_battery_sources::open_i2c_bus(bus_id)?))
}

#[cfg(not(target_os = "linux"))]
fn open_transport(_bus_id: u8) -> Result<Box<dyn WordTransport + Send>> {
    anyhow::bail!("INA219 access needs the Linux i2c-dev interface")
}

async fn run(cli: &Cli, config: &AppConfig, transport: Box<dyn WordTransport + Send>) -> Result<()> {
    let policy = config.status_policy()?;
    let mut sensor = Ina219::from_config(transport, &config.sensor)
        .context("Failed to initialise INA219")?;

    if cli.once {
        let event = match sensor.sample() {
            Ok(reading) => StatusEvent::Measured(policy.evaluate(reading.bus_voltage_volts)),
            Err(e) => {
                error!("INA219 read error: {}", e);
                StatusEvent::ReadFailed
            }
        };
        println!("{}", format_status_line(&event, chrono::Local::now()));
        return Ok(());
    }

    let halt = HaltHandle::new();
    let mut polling = PollingLoop::new(sensor, policy, config.poll_interval(), halt.clone())?
        .with_sink(LogSink::new());
    if config.percentage_file.enabled {
        polling = polling.with_percentage_sink(PercentageFile::from_config(&config.percentage_file));
    }

    let task = tokio::spawn(polling.run());

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Interrupt received, stopping"),
        Err(e) => error!("Failed to listen for interrupt: {}", e),
    }
    halt.request_halt();

    let stats = task.await.context("Polling task failed")?;
    warn!(
        "Stopped after {} polls ({} failed reads)",
        stats.ticks, stats.failed_reads
    );
    Ok(())
}
