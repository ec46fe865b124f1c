use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::store::KeyValueStore;
use super::{MediaDescriptor, MediaKind, UPLOADED_MEDIA_KEY};
use crate::error::EngineError;

const PUBLIC_MEDIA: [(&str, &str, &str); 2] = [
    (
        "public-1",
        "Curb Zone Camera 1 (4K 60fps)",
        "/videos/13348446_3840_2160_60fps.mp4",
    ),
    (
        "public-2",
        "Curb Zone Camera 2 (HD 30fps)",
        "/videos/3611605-hd_1920_1080_30fps.mp4",
    ),
];

/// Clips that ship with the dashboard.
pub fn public_media() -> Vec<MediaDescriptor> {
    PUBLIC_MEDIA
        .iter()
        .map(|&(id, name, path)| MediaDescriptor {
            id: id.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            kind: MediaKind::Public,
        })
        .collect()
}

/// Uploaded media list, cached in memory and persisted through a
/// [`KeyValueStore`].
pub struct MediaRegistry {
    store: Arc<dyn KeyValueStore>,
    uploads: Mutex<Vec<MediaDescriptor>>,
}

impl MediaRegistry {
    /// Reads the persisted uploads.
    ///
    /// A missing key, an unreadable store or a corrupt value all yield an
    /// empty registry; the failure is logged and never returned.
    #[instrument(skip(store), target = "media")]
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let uploads = match store.get(UPLOADED_MEDIA_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<MediaDescriptor>>(&raw) {
                Ok(list) => list,
                Err(e) => {
                    warn!(error = %e, "stored media list is corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = ?e, "media store unavailable, starting empty");
                Vec::new()
            }
        };

        info!(uploads = uploads.len(), "media registry loaded");

        Self {
            store,
            uploads: Mutex::new(uploads),
        }
    }

    /// Records an upload and persists the whole list.
    ///
    /// The in-memory list only changes once the write succeeded.
    pub async fn add(
        &self,
        name: impl Into<String>,
        path: impl Into<String>,
    ) -> Result<MediaDescriptor> {
        let descriptor = MediaDescriptor {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            path: path.into(),
            kind: MediaKind::Uploaded,
        };

        let mut uploads = self.uploads.lock().await;
        let mut next = uploads.clone();
        next.push(descriptor.clone());

        let raw = serde_json::to_string(&next).map_err(EngineError::from)?;
        self.store.set(UPLOADED_MEDIA_KEY, &raw).await?;
        *uploads = next;

        info!(id = %descriptor.id, name = %descriptor.name, "media uploaded");
        Ok(descriptor)
    }

    pub async fn uploads(&self) -> Vec<MediaDescriptor> {
        self.uploads.lock().await.clone()
    }

    /// Public clips first, then uploads in the order they were added.
    pub async fn catalog(&self) -> Vec<MediaDescriptor> {
        let mut all = public_media();
        all.extend(self.uploads.lock().await.iter().cloned());
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::store::{FileKvStore, MemoryKvStore};
    use async_trait::async_trait;
    use tracing_test::traced_test;

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _: &str) -> Result<Option<String>> {
            Err(anyhow::anyhow!("disk on fire"))
        }

        async fn set(&self, _: &str, _: &str) -> Result<()> {
            Err(anyhow::anyhow!("disk on fire"))
        }
    }

    #[tokio::test]
    async fn empty_store_lists_public_media_only() {
        let registry = MediaRegistry::load(Arc::new(MemoryKvStore::new())).await;

        let catalog = registry.catalog().await;
        assert_eq!(catalog.len(), 2);
        assert!(catalog.iter().all(|m| m.kind == MediaKind::Public));
        assert_eq!(catalog[0].name, "Curb Zone Camera 1 (4K 60fps)");
    }

    #[tokio::test]
    async fn uploads_follow_public_media_and_persist() {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn KeyValueStore> = Arc::new(FileKvStore::new(dir.path()));

        let registry = MediaRegistry::load(Arc::clone(&store)).await;
        let a = registry.add("north lot", "/uploads/a.mp4").await.unwrap();
        let b = registry.add("south lot", "/uploads/b.mp4").await.unwrap();

        let reloaded = MediaRegistry::load(store).await;
        let catalog = reloaded.catalog().await;

        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog[2], a);
        assert_eq!(catalog[3], b);
        assert_eq!(catalog[3].kind, MediaKind::Uploaded);
    }

    #[traced_test]
    #[tokio::test]
    async fn corrupt_list_falls_back_to_empty() {
        let store = Arc::new(MemoryKvStore::new());
        store.set(UPLOADED_MEDIA_KEY, "{not json").await.unwrap();

        let registry = MediaRegistry::load(store).await;

        assert!(registry.uploads().await.is_empty());
        assert!(logs_contain("stored media list is corrupt"));
    }

    #[traced_test]
    #[tokio::test]
    async fn unreadable_store_falls_back_to_empty() {
        let registry = MediaRegistry::load(Arc::new(BrokenStore)).await;

        assert_eq!(registry.catalog().await.len(), 2);
        assert!(logs_contain("media store unavailable"));
    }

    #[tokio::test]
    async fn failed_write_leaves_list_unchanged() {
        let registry = MediaRegistry::load(Arc::new(BrokenStore)).await;

        let err = registry.add("clip", "/uploads/c.mp4").await.unwrap_err();

        assert!(format!("{err:?}").contains("disk on fire"));
        assert!(registry.uploads().await.is_empty());
    }
}
