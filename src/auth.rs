//! Password gate
//!
//! The password is the first line of a plain text file. This is an access
//! gate for a shared counter terminal, not a security boundary.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::errors::ErrorKind;

/// Errors raised while loading the password file.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The password file could not be read.
    #[error("cannot open password file {}", path.display())]
    Unreadable {
        /// Password file path
        path: PathBuf,

        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// The first line of the password file is empty.
    #[error("password file {} is empty", .0.display())]
    Empty(PathBuf),
}

impl AuthError {
    /// Error category for callers that only need the broad kind.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Storage
    }
}

/// Password loaded from disk.
pub struct PasswordFile {
    password: String,
}

impl PasswordFile {
    /// Reads the password from the first line of `path`.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Unreadable`]: the file cannot be read.
    /// - [`AuthError::Empty`]: the first line is empty.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|source| AuthError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let password = contents.lines().next().unwrap_or_default().trim();

        if password.is_empty() {
            return Err(AuthError::Empty(path.to_path_buf()));
        }

        Ok(Self {
            password: password.to_string(),
        })
    }

    /// Whether the entered text matches the password, ignoring surrounding whitespace.
    pub fn verify(&self, candidate: &str) -> bool {
        candidate.trim() == self.password
    }
}

impl fmt::Debug for PasswordFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordFile")
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn verifies_first_line() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("pass.txt");
        fs::write(&path, "s3cret\r\nignored\n")?;

        let gate = PasswordFile::load(&path)?;

        assert!(gate.verify("s3cret"));
        assert!(gate.verify("  s3cret\n"));
        assert!(!gate.verify("ignored"));
        assert!(!gate.verify(""));

        Ok(())
    }

    #[test]
    fn missing_file_is_unreadable() -> TestResult {
        let dir = tempfile::tempdir()?;

        let result = PasswordFile::load(dir.path().join("nope.txt"));

        assert!(matches!(result, Err(AuthError::Unreadable { .. })));

        Ok(())
    }

    #[test]
    fn empty_file_is_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("pass.txt");
        fs::write(&path, "\n")?;

        assert!(matches!(PasswordFile::load(&path), Err(AuthError::Empty(_))));

        Ok(())
    }

    #[test]
    fn debug_hides_password() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("pass.txt");
        fs::write(&path, "hunter2")?;

        let gate = PasswordFile::load(&path)?;

        assert!(!format!("{gate:?}").contains("hunter2"));

        Ok(())
    }
}
