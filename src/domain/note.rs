// src/domain/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// A captioned picture.
///
/// The image itself lives in the blob store; `image_path` only holds its
/// filename. Identity is the `id` alone, so two notes compare equal when
/// they share an id even if one of them has been edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoNote {
    pub id: Uuid,
    pub caption: String,
    pub image_path: String,
    pub date_created: DateTime<Utc>,
}

impl PhotoNote {
    pub fn new(caption: impl Into<String>, image_path: impl Into<String>) -> Self {
        Self::created_at(caption, image_path, Utc::now())
    }

    pub fn created_at(
        caption: impl Into<String>,
        image_path: impl Into<String>,
        date_created: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            caption: caption.into(),
            image_path: image_path.into(),
            date_created,
        }
    }

    pub fn has_image(&self) -> bool {
        !self.image_path.is_empty()
    }
}

impl PartialEq for PhotoNote {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PhotoNote {}

impl Hash for PhotoNote {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
