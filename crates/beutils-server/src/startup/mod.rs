//! Server startup: logging, storage selection, HTTP wiring

pub mod http;
pub mod logging;

use std::sync::Arc;

use beutils_storage::{LocalStorage, S3Storage, S3StorageConfig, Storage};

use crate::settings::Settings;

pub use logging::init_logging;

/// Build the static and media storage backends from the settings
pub async fn build_storages(
    settings: &Settings,
) -> anyhow::Result<(Arc<dyn Storage>, Arc<dyn Storage>)> {
    if settings.use_local_storage() {
        let static_storage =
            LocalStorage::new(settings.static_root(), &settings.static_url());
        let media_storage = LocalStorage::new(settings.media_root(), &settings.media_url());
        return Ok((Arc::new(static_storage), Arc::new(media_storage)));
    }

    // Credentials and region resolve from the usual AWS environment
    let aws = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_s3::Client::new(&aws);

    let static_storage = S3Storage::new(
        client.clone(),
        S3StorageConfig::static_files(
            &settings.aws_static_bucket_name(),
            &settings.aws_s3_static_domain(),
        ),
    );
    let media_storage = S3Storage::new(
        client,
        S3StorageConfig::media(
            &settings.aws_storage_bucket_name(),
            &settings.aws_s3_storage_domain(),
        ),
    );

    Ok((Arc::new(static_storage), Arc::new(media_storage)))
}
