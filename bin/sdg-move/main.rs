use clap::{Parser, Subcommand};
use crossbeam_channel::unbounded;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use siglent_sdg::{
    config::load_config, Actuator, Journal, SdgActuator, SettingValue, StatusChannel, StatusEvent,
};

/// Drive a Siglent SDG waveform generator as a one-axis actuator.
#[derive(Parser, Debug)]
#[command(name = "sdg-move")]
#[command(about = "Move the amplitude or phase axis of a Siglent SDG generator", long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// Append status events to this JSONL journal
    #[arg(short, long, value_name = "FILE")]
    journal: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current value of the selected axis
    Value,
    /// Move the selected axis to an absolute target
    Abs { target: f64 },
    /// Move the selected axis by a relative amount
    Rel { delta: f64 },
    /// Go to the home position (amplitude 2 V, phase 0°)
    Home,
    /// Force the channel output off
    Stop,
    /// Change a named device setting (frequency, offset, delay, cycles,
    /// wavetype, file, axis)
    Set { name: String, value: String },
}

fn parse_setting_value(raw: &str) -> SettingValue {
    if let Ok(int) = raw.parse::<i64>() {
        SettingValue::Int(int)
    } else if let Ok(float) = raw.parse::<f64>() {
        SettingValue::Float(float)
    } else {
        SettingValue::Text(raw.to_string())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.clone())).init();

    let config = load_config(args.config.as_deref())?;
    info!(
        "Using SDG at {}:{}, axis {}",
        config.connection.host, config.connection.port, config.actuator.axis
    );

    let (tx, rx) = unbounded();
    let mut actuator = SdgActuator::new(config);
    actuator.set_status_channel(StatusChannel::new(tx));

    let info = actuator.initialize()?;
    println!("{info}");

    match args.command {
        Command::Value => {
            let value = actuator.actuator_value()?;
            println!("{value} {}", actuator.units());
        }
        Command::Abs { target } => {
            actuator.move_abs(target)?;
            println!("moved to {} {}", actuator.actuator_value()?, actuator.units());
        }
        Command::Rel { delta } => {
            actuator.move_rel(delta)?;
            println!("moved to {} {}", actuator.actuator_value()?, actuator.units());
        }
        Command::Home => actuator.move_home()?,
        Command::Stop => actuator.stop_motion()?,
        Command::Set { name, value } => {
            actuator.commit_setting(&name, parse_setting_value(&value))?;
        }
    }

    actuator.close()?;
    drop(actuator);

    if let Some(path) = args.journal {
        let mut journal: Journal<StatusEvent> = Journal::new(path, 64);
        for event in rx.try_iter() {
            journal.add(event)?;
        }
        journal.flush()?;
    }

    Ok(())
}
