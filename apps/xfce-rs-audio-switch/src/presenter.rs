// Launcher (script filter) records for device lists
use serde::{Deserialize, Serialize};

use crate::selector::PresentationItem;
use crate::Direction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationRecord {
    pub title: String,
    pub uid: String,
    pub autocomplete: String,
    pub arg: String,
    pub icon: Icon,
}

/// Top-level document: `{"items": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemList {
    pub items: Vec<PresentationRecord>,
}

pub fn icon_path(direction: Direction, is_default: bool) -> String {
    if is_default {
        format!("./icons/{}_selected.png", direction)
    } else {
        format!("./icons/{}.png", direction)
    }
}

pub fn to_presentation_record(item: &PresentationItem, direction: Direction) -> PresentationRecord {
    PresentationRecord {
        title: item.display_title.clone(),
        uid: item.raw_name.clone(),
        autocomplete: item.display_title.clone(),
        arg: item.device_id.to_string(),
        icon: Icon {
            path: icon_path(direction, item.is_default),
        },
    }
}

impl ItemList {
    pub fn from_items(items: &[PresentationItem], direction: Direction) -> Self {
        Self {
            items: items
                .iter()
                .map(|item| to_presentation_record(item, direction))
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
