use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An uploaded file, as returned by `POST /medias/upload`.
///
/// `storage_object_id` is what post payloads reference in
/// `image_object_ids`, `video_object_id` and `gif_object_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: String,
    pub name: String,
    pub extension: String,
    pub storage_object_id: String,
}

/// A media reference inside a scheduled post result.
///
/// Depending on the server revision this is either a bare storage object id
/// or an object describing the stored file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaRef {
    Id(String),
    Object(Map<String, Value>),
}

impl MediaRef {
    /// The storage object id, looking inside object references when needed.
    pub fn object_id(&self) -> Option<&str> {
        match self {
            MediaRef::Id(id) => Some(id),
            MediaRef::Object(map) => ["storage_object_id", "id"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str)),
        }
    }
}

impl From<&MediaRecord> for MediaRef {
    fn from(media: &MediaRecord) -> Self {
        MediaRef::Id(media.storage_object_id.clone())
    }
}
