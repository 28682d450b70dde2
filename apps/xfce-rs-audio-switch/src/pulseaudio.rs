// PulseAudio backend for the device switcher, using pulsectl-rs
//
// Output devices are sinks, input devices are sources. Sinks and sources have
// separate index spaces, which is why every query carries a direction.
use std::borrow::Cow;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use libpulse_binding::channelmap::Map;
use libpulse_binding::context::ext_stream_restore::Info as RestoreRule;
use libpulse_binding::proplist::UpdateMode;
use libpulse_binding::volume::ChannelVolumes;
use pulsectl::controllers::types::DeviceInfo;
use pulsectl::controllers::{DeviceControl, SinkController, SourceController};
use tracing::{debug, error, info};

use crate::host::AudioHost;
use crate::{DeviceId, Direction, SwitchError};

/// stream-restore rule applied to event sounds (bells, notifications)
const EVENT_ROLE_RULE: &str = "sink-input-by-media-role:event";

#[derive(Debug, Clone)]
struct PulseDevice {
    name: String,
    description: Option<String>,
}

impl PulseDevice {
    fn from_info(device: &DeviceInfo) -> Self {
        Self {
            name: device.name.clone().unwrap_or_default(),
            description: device.description.clone(),
        }
    }

    /// Monitor sources only mirror a sink's playback
    fn is_monitor(&self) -> bool {
        self.name.ends_with(".monitor")
    }
}

enum Controller {
    Sink(SinkController),
    Source(SourceController),
}

impl Controller {
    fn create(direction: Direction) -> Result<Self, SwitchError> {
        match direction {
            Direction::Output => SinkController::create()
                .map(Controller::Sink)
                .map_err(|e| SwitchError::hardware("create SinkController", e)),
            Direction::Input => SourceController::create()
                .map(Controller::Source)
                .map_err(|e| SwitchError::hardware("create SourceController", e)),
        }
    }

    fn list_devices(&mut self) -> Result<Vec<DeviceInfo>, SwitchError> {
        match self {
            Controller::Sink(c) => c.list_devices().map_err(|e| SwitchError::hardware("list sinks", e)),
            Controller::Source(c) => c.list_devices().map_err(|e| SwitchError::hardware("list sources", e)),
        }
    }

    fn device_by_index(&mut self, index: u32) -> Result<DeviceInfo, SwitchError> {
        let result = match self {
            Controller::Sink(c) => c.get_device_by_index(index),
            Controller::Source(c) => c.get_device_by_index(index),
        };
        result.map_err(|e| SwitchError::hardware(format!("get device {}", index), e))
    }

    fn device_by_name(&mut self, name: &str) -> Result<DeviceInfo, SwitchError> {
        let result = match self {
            Controller::Sink(c) => c.get_device_by_name(name),
            Controller::Source(c) => c.get_device_by_name(name),
        };
        result.map_err(|e| SwitchError::hardware(format!("get device {}", name), e))
    }

    fn default_device_name(&mut self) -> Result<Option<String>, SwitchError> {
        match self {
            Controller::Sink(c) => c
                .get_server_info()
                .map(|info| info.default_sink_name)
                .map_err(|e| SwitchError::hardware("get server info", e)),
            Controller::Source(c) => c
                .get_server_info()
                .map(|info| info.default_source_name)
                .map_err(|e| SwitchError::hardware("get server info", e)),
        }
    }

    fn set_default_device(&mut self, name: &str) -> Result<bool, SwitchError> {
        let result = match self {
            Controller::Sink(c) => c.set_default_device(name),
            Controller::Source(c) => c.set_default_device(name),
        };
        result.map_err(|e| SwitchError::hardware(format!("set default device {}", name), e))
    }
}

/// [`AudioHost`] backed by the running PulseAudio (or pipewire-pulse) server.
#[derive(Default)]
pub struct PulseAudioHost {
    // Last enumeration per direction, keyed by index
    devices: HashMap<(Direction, u32), PulseDevice>,
}

impl PulseAudioHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn lookup(&mut self, id: DeviceId, direction: Direction) -> Option<PulseDevice> {
        if let Some(device) = self.devices.get(&(direction, id.0)) {
            return Some(device.clone());
        }

        let device = Controller::create(direction)
            .and_then(|mut controller| controller.device_by_index(id.0))
            .map(|info| PulseDevice::from_info(&info));
        match device {
            Ok(device) => {
                self.devices.insert((direction, id.0), device.clone());
                Some(device)
            }
            Err(e) => {
                debug!("Lookup of {} device {} failed: {}", direction, id, e);
                None
            }
        }
    }
}

impl AudioHost for PulseAudioHost {
    fn device_ids(&mut self, direction: Direction) -> Result<Vec<DeviceId>, SwitchError> {
        let mut controller = Controller::create(direction)?;
        let devices = controller.list_devices()?;

        self.devices.retain(|(d, _), _| *d != direction);
        let mut ids = Vec::with_capacity(devices.len());
        for device in &devices {
            self.devices
                .insert((direction, device.index), PulseDevice::from_info(device));
            ids.push(DeviceId(device.index));
        }

        debug!("PulseAudio reported {} {} devices", ids.len(), direction);
        Ok(ids)
    }

    fn has_streams(&mut self, id: DeviceId, direction: Direction) -> bool {
        match self.lookup(id, direction) {
            Some(device) => direction == Direction::Output || !device.is_monitor(),
            None => false,
        }
    }

    fn device_name(&mut self, id: DeviceId, direction: Direction) -> Option<String> {
        self.lookup(id, direction).and_then(|device| device.description)
    }

    fn default_device_id(&mut self, direction: Direction) -> Result<DeviceId, SwitchError> {
        let mut controller = Controller::create(direction)?;
        let name = controller.default_device_name()?.ok_or_else(|| {
            SwitchError::hardware(format!("get default {} device", direction), "server reports no default")
        })?;

        let device = controller.device_by_name(&name)?;
        self.devices
            .insert((direction, device.index), PulseDevice::from_info(&device));
        Ok(DeviceId(device.index))
    }

    fn set_default_device(&mut self, direction: Direction, id: DeviceId) -> Result<(), SwitchError> {
        let mut controller = Controller::create(direction)?;
        let device = controller.device_by_index(id.0)?;
        let name = device.name.ok_or_else(|| {
            SwitchError::hardware(format!("set default {} device", direction), format!("device {} has no name", id))
        })?;

        if !controller.set_default_device(&name)? {
            error!("PulseAudio rejected {} as default {}", name, direction);
            return Err(SwitchError::hardware(
                format!("set default {} device", direction),
                format!("server rejected {}", name),
            ));
        }

        info!("Default {} set to {}", direction, name);
        Ok(())
    }

    fn set_sound_effects_device(&mut self, id: DeviceId) -> Result<(), SwitchError> {
        let mut controller = SinkController::create()
            .map_err(|e| SwitchError::hardware("create SinkController", e))?;
        let sink = controller
            .get_device_by_index(id.0)
            .map_err(|e| SwitchError::hardware(format!("get sink {}", id), e))?;
        let sink_name = sink.name.ok_or_else(|| {
            SwitchError::hardware("set sound effects device", format!("sink {} has no name", id))
        })?;

        // Volume is left invalid so the rule only carries the device
        let rule = RestoreRule {
            name: Some(Cow::Borrowed(EVENT_ROLE_RULE)),
            channel_map: Map::default(),
            volume: ChannelVolumes::default(),
            device: Some(Cow::Borrowed(sink_name.as_str())),
            mute: false,
        };

        let succeeded = Rc::new(Cell::new(false));
        let flag = Rc::clone(&succeeded);
        let op = controller
            .handler
            .context
            .borrow_mut()
            .stream_restore()
            .write(UpdateMode::Replace, &[&rule], true, move |ok| flag.set(ok));
        controller
            .handler
            .wait_for_operation(op)
            .map_err(|e| SwitchError::hardware("write stream-restore rule", e))?;

        if !succeeded.get() {
            return Err(SwitchError::hardware(
                "write stream-restore rule",
                "module-stream-restore rejected the rule",
            ));
        }

        debug!("Event sounds routed to {}", sink_name);
        Ok(())
    }
}
