use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SdgError;

/// Output channel of the generator. Every command is prefixed with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Ch1,
    Ch2,
}

impl Default for Channel {
    fn default() -> Self {
        Channel::Ch1
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Ch1 => write!(f, "C1"),
            Channel::Ch2 => write!(f, "C2"),
        }
    }
}

/// Basic wave shape (`BSWV WVTP`).
///
/// `Arb` selects an arbitrary waveform previously uploaded to the device
/// (e.g. via EasyWaveX); the file itself cannot originate from this driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveType {
    Sine,
    Square,
    Ramp,
    Dc,
    Arb,
}

impl fmt::Display for WaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            WaveType::Sine => "SINE",
            WaveType::Square => "SQUARE",
            WaveType::Ramp => "RAMP",
            WaveType::Dc => "DC",
            WaveType::Arb => "ARB",
        };
        write!(f, "{token}")
    }
}

impl FromStr for WaveType {
    type Err = SdgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SINE" => Ok(WaveType::Sine),
            "SQUARE" => Ok(WaveType::Square),
            "RAMP" => Ok(WaveType::Ramp),
            "DC" => Ok(WaveType::Dc),
            "ARB" => Ok(WaveType::Arb),
            other => Err(SdgError::Type(format!("unknown wave type: {other}"))),
        }
    }
}

/// Burst trigger source (`BTWV TRSR`). Only meaningful while burst is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerSource {
    External,
    Internal,
    Manual,
}

impl fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            TriggerSource::External => "EXT",
            TriggerSource::Internal => "INT",
            TriggerSource::Manual => "MAN",
        };
        write!(f, "{token}")
    }
}

impl FromStr for TriggerSource {
    type Err = SdgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EXT" => Ok(TriggerSource::External),
            "INT" => Ok(TriggerSource::Internal),
            "MAN" => Ok(TriggerSource::Manual),
            other => Err(SdgError::Type(format!("unknown trigger source: {other}"))),
        }
    }
}

/// Two-state switch used for both burst state and channel output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Switch {
    On,
    Off,
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Switch::On => write!(f, "ON"),
            Switch::Off => write!(f, "OFF"),
        }
    }
}

/// Output impedance load (`OUTP LOAD`): 50 to 100000 Ohm, or high impedance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Load {
    Ohms(u32),
    HighZ,
}

impl fmt::Display for Load {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Load::Ohms(ohms) => write!(f, "{ohms}"),
            Load::HighZ => write!(f, "HZ"),
        }
    }
}

/// The physical quantity generic move operations apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Amplitude,
    Phase,
}

impl Default for Axis {
    fn default() -> Self {
        Axis::Amplitude
    }
}

impl Axis {
    /// Unit of the quantity behind this axis.
    pub fn units(&self) -> &'static str {
        match self {
            Axis::Amplitude => "V",
            Axis::Phase => "°",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Amplitude => write!(f, "Amplitude"),
            Axis::Phase => write!(f, "Phase"),
        }
    }
}

impl FromStr for Axis {
    type Err = SdgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Amplitude" => Ok(Axis::Amplitude),
            "Phase" => Ok(Axis::Phase),
            other => Err(SdgError::Type(format!("unknown axis: {other}"))),
        }
    }
}
