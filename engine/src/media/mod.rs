//! Media registry.
//!
//! The dashboard plays back camera footage from two sources: a fixed set of
//! public clips and files the operator uploaded. Uploads are remembered in a
//! key/value store under [`UPLOADED_MEDIA_KEY`] as a JSON array.

pub mod registry;
pub mod store;

use serde::{Deserialize, Serialize};

pub use registry::{MediaRegistry, public_media};
pub use store::{FileKvStore, KeyValueStore, MemoryKvStore};

pub const UPLOADED_MEDIA_KEY: &str = "uploaded_media";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Uploaded,
    Public,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub id: String,
    pub name: String,
    pub path: String,
    pub kind: MediaKind,
}
