//! oss-upload: batch uploader for S3-compatible object storage.
//!
//! Resolves configuration from flags and environment, enumerates a local file
//! or directory tree, and uploads every file under a configured remote prefix,
//! one at a time, continuing past per-file failures.

pub mod cli;
pub mod config;
pub mod enumerate;
pub mod store;
pub mod upload;
