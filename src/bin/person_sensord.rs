//! person_sensord - poll a person sensor and print its readings.
//!
//! This daemon:
//! 1. Loads the deployment file (cameras, vision services, sensor attributes)
//! 2. Resolves the sensor's camera and vision service by name
//! 3. Takes a reading every poll interval and prints it as a JSON line
//!
//! Failed readings are logged and polling continues. With `--once` a single
//! reading is taken and its error, if any, becomes the exit status.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};

use person_sensor::config;
use person_sensor::deployment::DeploymentConfig;
use person_sensor::{PersonSensor, Readings, Sensor};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Report person presence from an external vision service"
)]
struct Args {
    /// Path to the deployment file (JSON).
    #[arg(long, env = "PERSON_SENSOR_CONFIG")]
    config: Option<PathBuf>,

    /// Take a single reading and exit.
    #[arg(long)]
    once: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let cfg = DeploymentConfig::load_from(args.config.as_deref())?;

    let implicit = config::validate(&cfg.sensor)
        .with_context(|| format!("invalid sensor config for {}", cfg.sensor.name))?;
    log::info!("{} depends on {}", cfg.sensor.name, implicit.join(", "));

    let deps = cfg.dependencies()?;
    let sensor = PersonSensor::new(&cfg.sensor, &deps)?;

    if args.once {
        let readings = sensor.readings()?;
        print_readings(&readings)?;
        return Ok(());
    }

    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })
    .map_err(|e| anyhow!("error setting Ctrl-C handler: {}", e))?;

    log::info!(
        "person_sensord running. polling {} every {} ms",
        sensor.name(),
        cfg.poll_interval.as_millis()
    );

    loop {
        match sensor.readings() {
            Ok(readings) => print_readings(&readings)?,
            Err(e) => log::warn!("reading failed: {:#}", e),
        }

        match rx.recv_timeout(cfg.poll_interval) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }

    log::info!("shutdown signal received, stopping");
    Ok(())
}

fn print_readings(readings: &Readings) -> Result<()> {
    let line = serde_json::to_string(readings).context("serialize readings")?;
    println!("{}", line);
    Ok(())
}
