//! Generic actuator contract consumed by the acquisition host.
//!
//! The host drives any hardware-controllable scalar through the same small
//! set of lifecycle and motion callbacks. This trait spells out every
//! operation the host may invoke, so a driver is a concrete type rather than
//! a duck-typed controller object, and tests can work against the trait.

use chrono::{DateTime, Utc};
use crossbeam_channel::Sender;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::SdgError;

/// Value of a named configuration field pushed down by the host UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    Float(f64),
    Int(i64),
    Text(String),
}

impl SettingValue {
    /// Numeric value; integers widen to float.
    pub fn as_f64(&self) -> Result<f64, SdgError> {
        match self {
            SettingValue::Float(v) => Ok(*v),
            SettingValue::Int(v) => Ok(*v as f64),
            SettingValue::Text(s) => Err(SdgError::Type(format!("expected number, got \"{s}\""))),
        }
    }

    pub fn as_i64(&self) -> Result<i64, SdgError> {
        match self {
            SettingValue::Int(v) => Ok(*v),
            other => Err(SdgError::Type(format!("expected integer, got {other:?}"))),
        }
    }

    pub fn as_str(&self) -> Result<&str, SdgError> {
        match self {
            SettingValue::Text(s) => Ok(s),
            other => Err(SdgError::Type(format!("expected text, got {other:?}"))),
        }
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Float(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

/// Human-readable status notification sent back to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEvent {
    pub time: DateTime<Utc>,
    pub message: String,
}

impl StatusEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            time: Utc::now(),
            message: message.into(),
        }
    }
}

/// Channel endpoint a driver publishes status messages on.
///
/// A driver without a subscriber just logs; send failures (receiver gone)
/// are ignored.
#[derive(Clone, Default)]
pub struct StatusChannel {
    tx: Option<Sender<StatusEvent>>,
}

impl StatusChannel {
    pub fn new(tx: Sender<StatusEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn emit(&self, message: impl Into<String>) {
        let event = StatusEvent::new(message);
        info!("{}", event.message);
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}

/// Lifecycle and motion callbacks of a host-controlled actuator.
///
/// All writes are synchronous and fire-and-forget: when a move call returns
/// `Ok`, the command has been written to the bus, and completion is assumed —
/// no hardware read-back confirms the target was reached.
pub trait Actuator {
    /// Open the instrument connection and bring it into its default state.
    /// Returns a human-readable status line for the host to display.
    fn initialize(&mut self) -> Result<String, SdgError>;

    /// Terminate the instrument connection.
    fn close(&mut self) -> Result<(), SdgError>;

    /// Current value of the selected axis, scaling applied.
    fn actuator_value(&mut self) -> Result<f64, SdgError>;

    /// Move to an absolute target, clamped to the configured bounds.
    fn move_abs(&mut self, value: f64) -> Result<(), SdgError>;

    /// Move by a relative amount; the resulting target is clamped to the
    /// configured bounds.
    fn move_rel(&mut self, delta: f64) -> Result<(), SdgError>;

    /// Return to the device-defined home position.
    fn move_home(&mut self) -> Result<(), SdgError>;

    /// Stop: drivers without motion to abort put the hardware in a safe
    /// state instead.
    fn stop_motion(&mut self) -> Result<(), SdgError>;

    /// Apply a change of a named configuration field from the host UI.
    /// Names the driver does not expose are ignored.
    fn commit_setting(&mut self, name: &str, value: SettingValue) -> Result<(), SdgError>;

    /// Unit string of the controlled quantity.
    fn units(&self) -> &str;
}
