//! Sequential upload loop with a per-file continue-on-error policy.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::Settings;
use crate::store::ObjectStore;

/// Outcome of a single file's trip through the upload loop. A file that
/// vanished between enumeration and upload is `Skipped`; a store error is
/// `Failed`. Neither stops the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Uploaded { key: String },
    Skipped { reason: String },
    Failed { reason: String },
}

/// Per-file results for one run, in enumeration order. Observability only:
/// the report never influences the process exit code.
#[derive(Debug, Default)]
pub struct UploadReport {
    pub files: Vec<(PathBuf, FileOutcome)>,
}

impl UploadReport {
    pub fn uploaded(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Uploaded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Remote key for a file: the configured prefix, a slash, and the file's base
/// name. Directory structure is never reflected, so files sharing a base name
/// map to the same key and the later upload overwrites the earlier object.
pub fn remote_key(target_path: &str, file_name: &str) -> String {
    format!("{target_path}/{file_name}")
}

/// Stdout line emitted for each successful upload. This exact format is the
/// program's output contract.
fn success_line(path: &Path, key: &str) -> String {
    format!("File: {} -> Uploaded to: {}", path.display(), key)
}

/// Upload one file. Re-stats the file first, since it may have been removed
/// between enumeration and upload. Every failure mode is folded into the
/// returned outcome; this function never errors.
pub async fn upload_file<S: ObjectStore + ?Sized>(
    store: &S,
    settings: &Settings,
    path: &Path,
) -> FileOutcome {
    if let Err(e) = std::fs::metadata(path) {
        return FileOutcome::Skipped {
            reason: format!("failed to stat file: {e}"),
        };
    }

    let file_name = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => {
            return FileOutcome::Skipped {
                reason: "path has no final component".to_string(),
            }
        }
    };

    let key = remote_key(&settings.target_path, &file_name);
    match store.put_file(&key, path).await {
        Ok(()) => FileOutcome::Uploaded { key },
        Err(e) => FileOutcome::Failed {
            reason: format!("upload failed: {e}"),
        },
    }
}

/// Upload every enumerated file, strictly in order, each exactly once. One
/// file's failure never affects another. The loop owns all user-visible
/// reporting: successes go to stdout in a fixed format, skips and failures to
/// the log.
pub async fn upload_all<S: ObjectStore + ?Sized>(
    store: &S,
    settings: &Settings,
    files: &[PathBuf],
) -> UploadReport {
    let mut report = UploadReport::default();
    for path in files {
        let outcome = upload_file(store, settings, path).await;
        match &outcome {
            FileOutcome::Uploaded { key } => {
                println!("{}", success_line(path, key));
            }
            FileOutcome::Skipped { reason } => {
                warn!(
                    path = %path.display(),
                    reason = %reason,
                    "skipping file, continuing with next"
                );
            }
            FileOutcome::Failed { reason } => {
                warn!(
                    path = %path.display(),
                    reason = %reason,
                    "upload failed, continuing with next"
                );
            }
        }
        report.files.push((path.clone(), outcome));
    }
    report
}
