//! Installer artifacts: checksum validation and on-demand download.

pub mod checksum;
pub mod fetch;

pub use checksum::{md5_file, validate_artifact};
pub use fetch::{FetchOutcome, HttpFetcher, RemoteSource};
