//! Installer checksum validation.

use md5::{Digest, Md5};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use crate::error::{InstallError, Result};

/// Compute the lowercase hex MD5 digest of a file's full contents.
pub fn md5_file(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Md5::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Check that `path` exists and its digest is one of `accepted`.
///
/// Returns the matching digest. Accepted values are compared
/// case-insensitively.
pub fn validate_artifact(path: &Path, accepted: &[String]) -> Result<String> {
    if !path.is_file() {
        return Err(InstallError::ArtifactMissing {
            path: path.to_path_buf(),
        });
    }

    let digest = md5_file(path)?;
    tracing::debug!("{} has MD5 {}", path.display(), digest);

    if accepted.iter().any(|a| a.eq_ignore_ascii_case(&digest)) {
        Ok(digest)
    } else {
        Err(InstallError::ChecksumMismatch {
            path: path.to_path_buf(),
            actual: digest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // MD5 of "hello world"
    const HELLO_MD5: &str = "5eb63bbbe01eeed093cb22bb8f5acdc3";

    #[test]
    fn md5_of_known_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hello.bin");
        fs::write(&path, "hello world").unwrap();

        assert_eq!(md5_file(&path).unwrap(), HELLO_MD5);
    }

    #[test]
    fn matching_digest_passes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("EQ_setup.exe");
        fs::write(&path, "hello world").unwrap();

        let accepted = vec!["00000000000000000000000000000000".to_string(), HELLO_MD5.to_uppercase()];
        assert_eq!(validate_artifact(&path, &accepted).unwrap(), HELLO_MD5);
    }

    #[test]
    fn wrong_digest_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("EQ_setup.exe");
        fs::write(&path, "corrupted").unwrap();

        let err = validate_artifact(&path, &[HELLO_MD5.to_string()]).unwrap_err();
        assert!(matches!(err, InstallError::ChecksumMismatch { .. }));
    }

    #[test]
    fn missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let err =
            validate_artifact(&temp.path().join("EQ_setup.exe"), &[HELLO_MD5.to_string()])
                .unwrap_err();
        assert!(matches!(err, InstallError::ArtifactMissing { .. }));
    }
}
