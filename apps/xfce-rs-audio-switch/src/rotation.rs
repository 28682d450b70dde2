//! Round-robin rotation through the favorites list.
//!
//! Starting after the current default, each favorite is tried in turn
//! (wrapping once) until one is present in the live device list and the
//! host accepts it as the new default.

use tracing::{debug, warn};

use crate::directory::DeviceDirectory;
use crate::host::AudioHost;
use crate::selector::resolve_by_name;
use crate::{Device, SwitchError};

pub struct Rotation<'a> {
    favorites: &'a [String],
}

impl<'a> Rotation<'a> {
    pub fn new(favorites: &'a [String]) -> Self {
        Self { favorites }
    }

    /// Index of the first candidate: one past the current default, or 0
    /// when the default is unknown or not a favorite.
    pub fn start_index(&self, current: Option<&Device>) -> usize {
        current
            .and_then(|device| self.favorites.iter().position(|name| *name == device.name))
            .map(|index| index + 1)
            .unwrap_or(0)
    }

    /// Switch to the next available favorite and return it.
    pub fn rotate<H: AudioHost>(
        &self,
        directory: &mut DeviceDirectory<H>,
        current: Option<&Device>,
    ) -> Result<Device, SwitchError> {
        if self.favorites.is_empty() {
            return Err(SwitchError::EmptyFavorites);
        }

        let count = self.favorites.len();
        let start = self.start_index(current);
        let live = directory.list_devices()?;

        for offset in 0..count {
            let candidate = &self.favorites[(start + offset) % count];

            let device = match resolve_by_name(&live, candidate) {
                Ok(device) => device,
                Err(_) => {
                    debug!("Favorite {:?} is not available, skipping", candidate);
                    continue;
                }
            };

            match directory.set_default(device.id) {
                Ok(selected) => return Ok(selected),
                Err(e @ SwitchError::SoundEffectsSync { .. }) => return Err(e),
                Err(e) => warn!("Could not switch to {:?}: {}", candidate, e),
            }
        }

        Err(SwitchError::NoAvailableDevice)
    }
}
