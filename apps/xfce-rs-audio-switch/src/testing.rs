// In-memory audio host for unit tests
use std::collections::HashSet;

use crate::host::AudioHost;
use crate::{Device, DeviceId, Direction, SwitchError};

#[derive(Debug, Clone)]
pub struct FakeDevice {
    pub id: DeviceId,
    pub name: Option<String>,
    pub directions: Vec<Direction>,
}

#[derive(Debug, Default)]
pub struct FakeHost {
    pub devices: Vec<FakeDevice>,
    pub default_input: Option<DeviceId>,
    pub default_output: Option<DeviceId>,
    pub sound_effects: Option<DeviceId>,
    /// Ids the host refuses to make default
    pub rejected: HashSet<DeviceId>,
    pub fail_enumeration: bool,
    pub fail_sound_effects: bool,
    /// Every successful primary switch, in order
    pub switches: Vec<(Direction, DeviceId)>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, id: u32, name: &str, directions: &[Direction]) -> Self {
        self.devices.push(FakeDevice {
            id: DeviceId(id),
            name: Some(name.to_string()),
            directions: directions.to_vec(),
        });
        self
    }

    pub fn with_output(self, id: u32, name: &str) -> Self {
        self.with_device(id, name, &[Direction::Output])
    }

    pub fn with_input(self, id: u32, name: &str) -> Self {
        self.with_device(id, name, &[Direction::Input])
    }

    pub fn with_unnamed(mut self, id: u32, direction: Direction) -> Self {
        self.devices.push(FakeDevice {
            id: DeviceId(id),
            name: None,
            directions: vec![direction],
        });
        self
    }

    pub fn with_default(mut self, direction: Direction, id: u32) -> Self {
        match direction {
            Direction::Input => self.default_input = Some(DeviceId(id)),
            Direction::Output => self.default_output = Some(DeviceId(id)),
        }
        self
    }

    pub fn rejecting(mut self, id: u32) -> Self {
        self.rejected.insert(DeviceId(id));
        self
    }

    fn find(&self, id: DeviceId) -> Option<&FakeDevice> {
        self.devices.iter().find(|device| device.id == id)
    }
}

pub fn device(id: u32, name: &str) -> Device {
    Device::new(name, DeviceId(id))
}

impl AudioHost for FakeHost {
    fn device_ids(&mut self, _direction: Direction) -> Result<Vec<DeviceId>, SwitchError> {
        if self.fail_enumeration {
            return Err(SwitchError::hardware("enumerate devices", "fake failure"));
        }
        Ok(self.devices.iter().map(|device| device.id).collect())
    }

    fn has_streams(&mut self, id: DeviceId, direction: Direction) -> bool {
        self.find(id)
            .map(|device| device.directions.contains(&direction))
            .unwrap_or(false)
    }

    fn device_name(&mut self, id: DeviceId, _direction: Direction) -> Option<String> {
        self.find(id).and_then(|device| device.name.clone())
    }

    fn default_device_id(&mut self, direction: Direction) -> Result<DeviceId, SwitchError> {
        let default = match direction {
            Direction::Input => self.default_input,
            Direction::Output => self.default_output,
        };
        default.ok_or_else(|| SwitchError::hardware("get default device", "no default device"))
    }

    fn set_default_device(&mut self, direction: Direction, id: DeviceId) -> Result<(), SwitchError> {
        if self.rejected.contains(&id) || self.find(id).is_none() {
            return Err(SwitchError::hardware("set default device", format!("rejected {}", id)));
        }
        match direction {
            Direction::Input => self.default_input = Some(id),
            Direction::Output => self.default_output = Some(id),
        }
        self.switches.push((direction, id));
        Ok(())
    }

    fn set_sound_effects_device(&mut self, id: DeviceId) -> Result<(), SwitchError> {
        if self.fail_sound_effects {
            return Err(SwitchError::hardware("set sound effects device", "fake failure"));
        }
        self.sound_effects = Some(id);
        Ok(())
    }
}
