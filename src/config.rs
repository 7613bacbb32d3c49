use config::{Config, Environment, File};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::bus::{DEFAULT_HOST, DEFAULT_PORT};
use crate::error::SdgError;
use crate::types::Axis;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    pub connection: ConnectionSettings,
    pub actuator: ActuatorSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub connect_timeout_ms: u64,
    pub write_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ActuatorSettings {
    /// Quantity the generic move operations act on.
    pub axis: Axis,
    /// Tolerance the host uses to decide a target was reached. Stored and
    /// exposed only; this driver assumes completion on write.
    pub epsilon: f64,
    pub bounds: BoundsSettings,
    pub scaling: ScalingSettings,
}

/// User-configured travel limits, in scaled units.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BoundsSettings {
    pub enabled: bool,
    pub min: f64,
    pub max: f64,
}

/// Linear transform between device units and user units:
/// `user = device * scaling + offset`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScalingSettings {
    pub use_scaling: bool,
    pub scaling: f64,
    pub offset: f64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout_ms: 5000,
            write_timeout_ms: 5000,
        }
    }
}

impl Default for ActuatorSettings {
    fn default() -> Self {
        Self {
            axis: Axis::Amplitude,
            epsilon: 0.1,
            bounds: BoundsSettings::default(),
            scaling: ScalingSettings::default(),
        }
    }
}

impl Default for BoundsSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            min: 0.0,
            max: 10.0,
        }
    }
}

impl Default for ScalingSettings {
    fn default() -> Self {
        Self {
            use_scaling: false,
            scaling: 1.0,
            offset: 0.0,
        }
    }
}

/// Load configuration with layered fallbacks: built-in defaults, then the
/// optional TOML file, then `SDG_*` environment overrides.
pub fn load_config(config_path: Option<&Path>) -> Result<AppConfig, SdgError> {
    let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

    if let Some(path) = config_path {
        if path.exists() {
            builder = builder.add_source(File::from(path));
        } else {
            warn!("Config file {} not found, using defaults", path.display());
        }
    }

    builder = builder.add_source(Environment::with_prefix("SDG").separator("__"));

    let config = builder.build()?.try_deserialize()?;
    Ok(config)
}
