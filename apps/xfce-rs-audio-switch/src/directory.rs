// Device directory: direction-scoped view over the host audio server
use tracing::{debug, info, warn};

use crate::config::{SoundEffectsPolicy, SwitcherConfig};
use crate::host::AudioHost;
use crate::{Device, DeviceId, Direction, SwitchError};

/// Whether and how an output switch is mirrored onto the sound-effects device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoundEffectsSync {
    pub enabled: bool,
    pub policy: SoundEffectsPolicy,
}

impl SoundEffectsSync {
    pub fn from_config(config: &SwitcherConfig) -> Self {
        Self {
            enabled: config.sync_sound_effects_output,
            policy: config.sound_effects_policy,
        }
    }
}

pub struct DeviceDirectory<H: AudioHost> {
    host: H,
    direction: Direction,
    sound_effects: SoundEffectsSync,
}

impl<H: AudioHost> DeviceDirectory<H> {
    pub fn new(host: H, direction: Direction) -> Self {
        Self {
            host,
            direction,
            sound_effects: SoundEffectsSync::default(),
        }
    }

    pub fn with_sound_effects(mut self, sound_effects: SoundEffectsSync) -> Self {
        self.sound_effects = sound_effects;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Devices with at least one stream in this direction, in host order.
    ///
    /// Devices whose name cannot be resolved are skipped.
    pub fn list_devices(&mut self) -> Result<Vec<Device>, SwitchError> {
        let direction = self.direction;
        let ids = self.host.device_ids(direction)?;

        let mut devices = Vec::with_capacity(ids.len());
        for id in ids {
            if !self.host.has_streams(id, direction) {
                continue;
            }
            match self.host.device_name(id, direction) {
                Some(name) => devices.push(Device::new(name, id)),
                None => debug!("Skipping {} device {} without a name", direction, id),
            }
        }

        debug!("Found {} {} devices", devices.len(), direction);
        Ok(devices)
    }

    pub fn default_device(&mut self) -> Result<Device, SwitchError> {
        let direction = self.direction;
        let id = self.host.default_device_id(direction)?;
        let name = self.host.device_name(id, direction).ok_or_else(|| {
            SwitchError::hardware(
                format!("get default {} device", direction),
                format!("no name for device {}", id),
            )
        })?;
        Ok(Device::new(name, id))
    }

    /// Make `id` the default device and return it with its current name.
    pub fn set_default(&mut self, id: DeviceId) -> Result<Device, SwitchError> {
        let direction = self.direction;
        self.host.set_default_device(direction, id)?;

        let name = self.host.device_name(id, direction).ok_or_else(|| {
            SwitchError::hardware(
                format!("set default {} device", direction),
                format!("no name for device {}", id),
            )
        })?;
        info!("Default {} set to {} ({})", direction, name, id);

        if direction == Direction::Output && self.sound_effects.enabled {
            self.sync_sound_effects(id, &name)?;
        }

        Ok(Device::new(name, id))
    }

    fn sync_sound_effects(&mut self, id: DeviceId, name: &str) -> Result<(), SwitchError> {
        match self.host.set_sound_effects_device(id) {
            Ok(()) => {
                debug!("Sound effects output moved to {}", name);
                Ok(())
            }
            Err(e) => match self.sound_effects.policy {
                SoundEffectsPolicy::Abort => Err(SwitchError::SoundEffectsSync {
                    device: name.to_string(),
                    reason: e.to_string(),
                }),
                SoundEffectsPolicy::BestEffort => {
                    warn!("Failed to move sound effects output to {}: {}", name, e);
                    Ok(())
                }
            },
        }
    }
}
