//! Requirement detection.
//!
//! This module provides tools for detecting whether the external programs
//! the installer drives are present, whether they are recent enough, and
//! whether the runtime has the helper packages the client needs.
//!
//! # Modules
//!
//! - [`checker`] - Checks required tools and reports everything missing
//! - [`packages`] - Helper-package listing and installation
//! - [`version`] - Version extraction and comparison

pub mod checker;
pub mod packages;
pub mod version;

pub use checker::{DependencyChecker, DependencyReport, FoundTool};
pub use packages::{InstalledPackageSet, PackageInstaller};
pub use version::{compare_versions, extract_release_date, extract_version, VersionOrdering};
