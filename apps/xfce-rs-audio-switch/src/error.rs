use thiserror::Error;

/// Error types for device switching operations
#[derive(Error, Debug)]
pub enum SwitchError {
    #[error("Audio hardware query failed ({operation}): {reason}")]
    HardwareQuery { operation: String, reason: String },

    #[error("Device not found: {name}")]
    DeviceNotFound { name: String },

    #[error("Index {index} is out of range for a list of {len} devices")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("No devices in favorites list")]
    EmptyFavorites,

    #[error("No available devices found")]
    NoAvailableDevice,

    #[error("Switched to {device} but failed to move sound effects output: {reason}")]
    SoundEffectsSync { device: String, reason: String },
}

impl SwitchError {
    pub fn hardware(operation: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        SwitchError::HardwareQuery {
            operation: operation.into(),
            reason: reason.to_string(),
        }
    }
}
