use anyhow::{bail, Result};

/// Resolved, validated configuration for one upload run.
///
/// Built once at startup from flags and environment, then passed by reference
/// into enumeration and upload; nothing downstream reads the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Storage service endpoint URL.
    pub endpoint: String,
    pub access_key_id: String,
    pub access_key_secret: String,
    pub bucket_name: String,
    /// Remote prefix under which every uploaded object is placed.
    pub target_path: String,
    /// Local file or directory to upload.
    pub local_path: String,
}

impl Settings {
    pub fn new(
        endpoint: String,
        access_key_id: String,
        access_key_secret: String,
        bucket_name: String,
        target_path: String,
        local_path: String,
    ) -> Result<Self> {
        let settings = Settings {
            endpoint,
            access_key_id,
            access_key_secret,
            bucket_name,
            target_path,
            local_path,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// All six values are required; an empty string is as fatal as a missing
    /// one, since clap only rejects the latter.
    fn validate(&self) -> Result<()> {
        let fields = [
            ("endpoint", &self.endpoint),
            ("access-key-id", &self.access_key_id),
            ("access-key-secret", &self.access_key_secret),
            ("bucket-name", &self.bucket_name),
            ("target-path", &self.target_path),
            ("local-path", &self.local_path),
        ];
        for (name, value) in fields {
            if value.is_empty() {
                bail!("configuration value {name} must not be empty");
            }
        }
        Ok(())
    }
}
