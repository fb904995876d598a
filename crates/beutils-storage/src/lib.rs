//! File storage backends for beutils
//!
//! A `Storage` trait with two backends: the local filesystem for development
//! and S3 for deployed environments. Static and media files use separate
//! buckets, prefixes, and overwrite behavior.

pub mod local;
pub mod s3;

use bytes::Bytes;
use rand::RngCore;

pub use local::LocalStorage;
pub use s3::{S3Storage, S3StorageConfig};

/// A file storage backend
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Store content under a name, returning the name actually used
    /// (backends that never overwrite may pick an alternative)
    async fn save(&self, name: &str, content: Bytes, content_type: &str) -> anyhow::Result<String>;

    /// Read stored content
    async fn open(&self, name: &str) -> anyhow::Result<Bytes>;

    /// Whether a name is taken
    async fn exists(&self, name: &str) -> anyhow::Result<bool>;

    /// Remove stored content
    async fn delete(&self, name: &str) -> anyhow::Result<()>;

    /// Public URL of a stored file
    fn url(&self, name: &str) -> String;
}

/// Derive an alternative file name by appending a suffix before the
/// extension, e.g. `report.pdf` -> `report_3fa9c1d.pdf`.
pub fn alternative_name(name: &str, suffix: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => format!("{stem}_{suffix}.{extension}"),
        _ => format!("{name}_{suffix}"),
    }
}

/// Short random suffix for alternative file names
pub fn random_suffix() -> String {
    let mut bytes = [0u8; 4];
    rand::rng().fill_bytes(&mut bytes);
    const_hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternative_name_keeps_extension() {
        assert_eq!(alternative_name("report.pdf", "abc"), "report_abc.pdf");
        assert_eq!(
            alternative_name("archive.tar.gz", "abc"),
            "archive.tar_abc.gz"
        );
    }

    #[test]
    fn test_alternative_name_without_extension() {
        assert_eq!(alternative_name("README", "abc"), "README_abc");
        assert_eq!(alternative_name(".env", "abc"), ".env_abc");
    }

    #[test]
    fn test_random_suffix_shape() {
        let suffix = random_suffix();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(random_suffix(), random_suffix());
    }
}
