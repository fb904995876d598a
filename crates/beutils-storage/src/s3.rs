//! S3 storage backend
//!
//! Two configurations are used in practice: static files (overwrite on,
//! public-read) and media files (overwrite off, bucket-default ACL). Both
//! serve from a bucket-specific domain and set a one-day cache header.

use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use bytes::Bytes;
use tracing::debug;

use crate::{Storage, alternative_name, random_suffix};

const CACHE_CONTROL: &str = "max-age=86400";

/// Configuration for an S3 storage backend
#[derive(Clone, Debug)]
pub struct S3StorageConfig {
    /// Bucket name
    pub bucket: String,
    /// Key prefix inside the bucket, e.g. "static" or "media"
    pub location: String,
    /// Domain the files are served from, e.g. "bucket.s3.amazonaws.com"
    pub custom_domain: String,
    /// Whether saving an existing name replaces the object
    pub file_overwrite: bool,
    /// Canned ACL applied to uploaded objects
    pub default_acl: Option<ObjectCannedAcl>,
}

impl S3StorageConfig {
    /// Static file storage: overwriting, publicly readable
    pub fn static_files(bucket: &str, custom_domain: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            location: "static".to_string(),
            custom_domain: custom_domain.to_string(),
            file_overwrite: true,
            default_acl: Some(ObjectCannedAcl::PublicRead),
        }
    }

    /// Media file storage: never overwrites, bucket-default ACL
    pub fn media(bucket: &str, custom_domain: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            location: "media".to_string(),
            custom_domain: custom_domain.to_string(),
            file_overwrite: false,
            default_acl: None,
        }
    }
}

/// S3-backed storage
pub struct S3Storage {
    client: Client,
    config: S3StorageConfig,
}

impl S3Storage {
    pub fn new(client: Client, config: S3StorageConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &S3StorageConfig {
        &self.config
    }

    fn key_for(&self, name: &str) -> String {
        let name = name.trim_start_matches('/');
        if self.config.location.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.config.location.trim_matches('/'), name)
        }
    }
}

#[async_trait::async_trait]
impl Storage for S3Storage {
    async fn save(&self, name: &str, content: Bytes, content_type: &str) -> anyhow::Result<String> {
        let mut name = name.to_string();
        if !self.config.file_overwrite {
            while self.exists(&name).await? {
                name = alternative_name(&name, &random_suffix());
            }
        }

        let mut request = self
            .client
            .put_object()
            .bucket(&self.config.bucket)
            .key(self.key_for(&name))
            .body(ByteStream::from(content))
            .content_type(content_type)
            .cache_control(CACHE_CONTROL);
        if let Some(acl) = &self.config.default_acl {
            request = request.acl(acl.clone());
        }
        request.send().await?;

        debug!(bucket = %self.config.bucket, name = %name, "saved object");
        Ok(name)
    }

    async fn open(&self, name: &str) -> anyhow::Result<Bytes> {
        let object = self
            .client
            .get_object()
            .bucket(&self.config.bucket)
            .key(self.key_for(name))
            .send()
            .await?;
        let content = object.body.collect().await?;
        Ok(content.into_bytes())
    }

    async fn exists(&self, name: &str) -> anyhow::Result<bool> {
        let result = self
            .client
            .head_object()
            .bucket(&self.config.bucket)
            .key(self.key_for(name))
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(service_err.into())
                }
            }
        }
    }

    async fn delete(&self, name: &str) -> anyhow::Result<()> {
        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(self.key_for(name))
            .send()
            .await?;
        Ok(())
    }

    fn url(&self, name: &str) -> String {
        format!(
            "https://{}/{}",
            self.config.custom_domain,
            self.key_for(name)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_config() {
        let config = S3StorageConfig::static_files("assets", "assets.s3.amazonaws.com");
        assert!(config.file_overwrite);
        assert_eq!(config.default_acl, Some(ObjectCannedAcl::PublicRead));
        assert_eq!(config.location, "static");
    }

    #[test]
    fn test_media_config() {
        let config = S3StorageConfig::media("uploads", "uploads.s3.amazonaws.com");
        assert!(!config.file_overwrite);
        assert!(config.default_acl.is_none());
        assert_eq!(config.location, "media");
    }

    #[test]
    fn test_key_prefixing_and_url() {
        let config = S3StorageConfig::media("uploads", "uploads.s3.amazonaws.com");
        let storage = S3Storage::new(test_client(), config);

        assert_eq!(storage.key_for("/avatars/ada.png"), "media/avatars/ada.png");
        assert_eq!(
            storage.url("avatars/ada.png"),
            "https://uploads.s3.amazonaws.com/media/avatars/ada.png"
        );
    }

    fn test_client() -> Client {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .build();
        Client::from_conf(config)
    }
}
