//! Local filesystem storage backend

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::debug;

use crate::{Storage, alternative_name, random_suffix};

/// Filesystem-backed storage rooted at a directory
pub struct LocalStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: &str) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name.trim_start_matches('/'))
    }
}

#[async_trait::async_trait]
impl Storage for LocalStorage {
    async fn save(&self, name: &str, content: Bytes, _content_type: &str) -> anyhow::Result<String> {
        let mut name = name.to_string();
        while self.exists(&name).await? {
            name = alternative_name(&name, &random_suffix());
        }

        let path = self.path_for(&name);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &content).await?;

        debug!(name = %name, "saved local file");
        Ok(name)
    }

    async fn open(&self, name: &str) -> anyhow::Result<Bytes> {
        let content = tokio::fs::read(self.path_for(name)).await?;
        Ok(Bytes::from(content))
    }

    async fn exists(&self, name: &str) -> anyhow::Result<bool> {
        Ok(Path::exists(&self.path_for(name)))
    }

    async fn delete(&self, name: &str) -> anyhow::Result<()> {
        tokio::fs::remove_file(self.path_for(name)).await?;
        Ok(())
    }

    fn url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_open_delete_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let storage = LocalStorage::new(dir.path(), "/media/");

        let name = storage
            .save("avatars/ada.png", Bytes::from_static(b"png-bytes"), "image/png")
            .await
            .expect("save");
        assert_eq!(name, "avatars/ada.png");
        assert!(storage.exists(&name).await.expect("exists"));

        let content = storage.open(&name).await.expect("open");
        assert_eq!(content, Bytes::from_static(b"png-bytes"));

        storage.delete(&name).await.expect("delete");
        assert!(!storage.exists(&name).await.expect("exists"));
    }

    #[tokio::test]
    async fn test_save_never_overwrites() {
        let dir = tempfile::tempdir().expect("temp dir");
        let storage = LocalStorage::new(dir.path(), "/media");

        let first = storage
            .save("doc.txt", Bytes::from_static(b"one"), "text/plain")
            .await
            .expect("save");
        let second = storage
            .save("doc.txt", Bytes::from_static(b"two"), "text/plain")
            .await
            .expect("save");

        assert_eq!(first, "doc.txt");
        assert_ne!(second, "doc.txt");
        assert!(second.starts_with("doc_") && second.ends_with(".txt"));

        // The original content is untouched
        let content = storage.open("doc.txt").await.expect("open");
        assert_eq!(content, Bytes::from_static(b"one"));
    }

    #[tokio::test]
    async fn test_url_joins_base() {
        let storage = LocalStorage::new("/srv/media", "/media/");
        assert_eq!(storage.url("avatars/ada.png"), "/media/avatars/ada.png");
    }
}
