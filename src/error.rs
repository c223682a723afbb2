//! Crate-level error types.

use std::fmt;
use std::path::{Path, PathBuf};

/// Errors produced by the surfpatch crate.
#[derive(Debug)]
pub enum SurfpatchError {
    /// No available loader recognises the file's extension or content.
    UnsupportedFormat {
        /// File that was being loaded.
        path: PathBuf,
        /// What was not recognised.
        reason: String,
    },
    /// Parsing started but the header/vertex/face invariants do not hold.
    MalformedFile {
        /// File that was being parsed.
        path: PathBuf,
        /// 1-based line number of the offending line, 0 when not
        /// attributable to a single line.
        line: usize,
        /// Description, including expected vs. actual counts.
        reason: String,
    },
    /// The requested attribute is not defined on the mesh.
    UnknownAttribute(String),
    /// A residue name has no one-letter amino acid code.
    UnknownResidue(String),
    /// I/O failure while reading a mesh file.
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// The structure host rejected an operation.
    Host(String),
}

impl SurfpatchError {
    /// Malformed-file error at a 1-based line.
    pub fn malformed(
        path: &Path,
        line: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedFile {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }

    /// Unsupported-format error for `path`.
    pub fn unsupported(path: &Path, reason: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// I/O error tagged with the file it occurred on.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for SurfpatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { path, reason } => {
                write!(f, "unsupported mesh format {}: {reason}", path.display())
            }
            Self::MalformedFile { path, line, reason } => {
                if *line == 0 {
                    write!(f, "malformed mesh {}: {reason}", path.display())
                } else {
                    write!(
                        f,
                        "malformed mesh {} (line {line}): {reason}",
                        path.display()
                    )
                }
            }
            Self::UnknownAttribute(name) => {
                write!(f, "unknown mesh attribute: {name}")
            }
            Self::UnknownResidue(name) => {
                write!(f, "unknown residue name: {name}")
            }
            Self::Io { path, source } => {
                write!(f, "I/O error on {}: {source}", path.display())
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Host(msg) => write!(f, "structure host error: {msg}"),
        }
    }
}

impl std::error::Error for SurfpatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SurfpatchError {
    /// I/O failure with no file attached; prefer [`SurfpatchError::io`]
    /// when the path is known.
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display_carries_path_and_line() {
        let err = SurfpatchError::malformed(
            Path::new("surf.ply"),
            12,
            "expected 5 vertex lines, found 4",
        );
        assert_eq!(
            err.to_string(),
            "malformed mesh surf.ply (line 12): expected 5 vertex lines, \
             found 4"
        );
    }

    #[test]
    fn io_error_exposes_source() {
        use std::error::Error;
        let err = SurfpatchError::io(
            Path::new("missing.ply"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.source().is_some());
        assert!(SurfpatchError::UnknownAttribute("vertex_q".to_owned())
            .source()
            .is_none());
    }

    #[test]
    fn bare_io_error_converts() {
        fn open() -> Result<(), SurfpatchError> {
            let failed: Result<(), std::io::Error> =
                Err(std::io::Error::other("boom"));
            failed?;
            Ok(())
        }
        match open() {
            Err(SurfpatchError::Io { path, source }) => {
                assert!(path.as_os_str().is_empty());
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
