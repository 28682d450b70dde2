// Audio device switcher library
pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod host;
pub mod lists;
pub mod presenter;
pub mod pulseaudio;
pub mod rotation;
pub mod selector;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::str::FromStr;

pub use error::SwitchError;

/// Whether a device is considered as a capture (input) or playback (output) device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Direction {
    Input,
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => write!(f, "input"),
            Direction::Output => write!(f, "output"),
        }
    }
}

/// Host-assigned device identifier (a PulseAudio sink or source index).
///
/// Only stable for the lifetime of the audio server session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(pub u32);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DeviceId {
    type Err = SwitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .map(DeviceId)
            .map_err(|_| SwitchError::InvalidArgument {
                reason: format!("invalid device id: {:?}", s),
            })
    }
}

// Types used across modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub name: String,
    pub id: DeviceId,
}

impl Device {
    pub fn new(name: impl Into<String>, id: DeviceId) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}
