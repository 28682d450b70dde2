// Device selection: blocklist filtering, friendly names, lookups
use crate::lists::{Blocklist, Favorites};
use crate::{Device, DeviceId, SwitchError};

/// A device ready for presentation to the launcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationItem {
    pub display_title: String,
    pub raw_name: String,
    pub device_id: DeviceId,
    pub is_default: bool,
}

pub struct Selector<'a> {
    blocklist: &'a Blocklist,
    favorites: &'a Favorites,
}

impl<'a> Selector<'a> {
    pub fn new(blocklist: &'a Blocklist, favorites: &'a Favorites) -> Self {
        Self {
            blocklist,
            favorites,
        }
    }

    /// Drop blocklisted devices and annotate the rest, keeping host order.
    pub fn presentation_set(
        &self,
        devices: &[Device],
        default: Option<&Device>,
    ) -> Vec<PresentationItem> {
        devices
            .iter()
            .filter(|device| !self.blocklist.contains(&device.name))
            .map(|device| PresentationItem {
                display_title: self.favorites.display_title(&device.name).to_string(),
                raw_name: device.name.clone(),
                device_id: device.id,
                is_default: default.is_some_and(|d| d.id == device.id),
            })
            .collect()
    }
}

pub fn resolve_by_name<'d>(devices: &'d [Device], name: &str) -> Result<&'d Device, SwitchError> {
    devices
        .iter()
        .find(|device| device.name == name)
        .ok_or_else(|| SwitchError::DeviceNotFound {
            name: name.to_string(),
        })
}

pub fn resolve_by_index(names: &[String], index: usize) -> Result<&str, SwitchError> {
    names
        .get(index)
        .map(String::as_str)
        .ok_or(SwitchError::IndexOutOfRange {
            index,
            len: names.len(),
        })
}
