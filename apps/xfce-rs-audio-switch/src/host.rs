//! Capability interface onto the host audio server.
//!
//! Everything above this trait is host-agnostic; the PulseAudio backend lives
//! in [`crate::pulseaudio`] and tests use an in-memory fake.

use crate::{DeviceId, Direction, SwitchError};

pub trait AudioHost {
    /// Candidate device ids for `direction`, in enumeration order.
    fn device_ids(&mut self, direction: Direction) -> Result<Vec<DeviceId>, SwitchError>;

    /// Whether the device exposes at least one stream in `direction`.
    fn has_streams(&mut self, id: DeviceId, direction: Direction) -> bool;

    /// Display name, or `None` if the host cannot resolve one.
    fn device_name(&mut self, id: DeviceId, direction: Direction) -> Option<String>;

    fn default_device_id(&mut self, direction: Direction) -> Result<DeviceId, SwitchError>;

    fn set_default_device(&mut self, direction: Direction, id: DeviceId) -> Result<(), SwitchError>;

    /// Point the system sound-effects (event) output at `id`.
    fn set_sound_effects_device(&mut self, id: DeviceId) -> Result<(), SwitchError>;
}
