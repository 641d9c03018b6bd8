use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::config::Settings;
use crate::enumerate::local_files;
use crate::store::S3Store;
use crate::upload::upload_all;

/// CLI for oss-upload: push a local file or directory tree into a bucket.
///
/// Every flag falls back to an environment variable; the flag wins when both
/// are set.
#[derive(Parser, Debug)]
#[clap(
    name = "oss-upload",
    version,
    about = "Upload a local file or directory tree to an object-storage bucket"
)]
pub struct Cli {
    /// Storage service endpoint URL
    #[clap(long, env = "OSS_ENDPOINT")]
    pub endpoint: String,

    /// Credential ID
    #[clap(long, env = "OSS_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: String,

    /// Credential secret
    #[clap(long, env = "OSS_ACCESS_KEY_SECRET", hide_env_values = true)]
    pub access_key_secret: String,

    /// Target bucket
    #[clap(long, env = "OSS_BUCKET_NAME")]
    pub bucket_name: String,

    /// Remote prefix under which uploaded objects are placed
    #[clap(long, env = "OSS_TARGET_PATH")]
    pub target_path: String,

    /// Local file or directory to upload
    #[clap(long, env = "OSS_LOCAL_PATH")]
    pub local_path: String,
}

impl Cli {
    pub fn into_settings(self) -> Result<Settings> {
        Settings::new(
            self.endpoint,
            self.access_key_id,
            self.access_key_secret,
            self.bucket_name,
            self.target_path,
            self.local_path,
        )
    }
}

/// Extracted async entrypoint shared by main() and integration tests.
///
/// Only setup failures (invalid configuration, client construction, stat of
/// the local path) propagate as errors; per-file upload failures are logged
/// by the loop and leave the result `Ok`.
pub async fn run(cli: Cli) -> Result<()> {
    let settings = cli.into_settings()?;
    let store = S3Store::connect(&settings)?;

    let files = local_files(Path::new(&settings.local_path))?;
    info!(
        count = files.len(),
        local_path = %settings.local_path,
        "enumerated local files"
    );

    let report = upload_all(&store, &settings, &files).await;
    info!(
        uploaded = report.uploaded(),
        skipped = report.skipped(),
        failed = report.failed(),
        "upload run complete"
    );
    Ok(())
}
