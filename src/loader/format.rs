//! Mesh file format detection from extensions and content.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::SurfpatchError;

/// Number of leading lines inspected when sniffing content.
const SNIFF_LINES: usize = 10;

/// Mesh file formats known to at least one backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// Stanford polygon file (`.ply`).
    Ply,
    /// Wavefront object file (`.obj`).
    Obj,
}

impl MeshFormat {
    /// Format implied by a file extension (case-insensitive).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "ply" => Some(Self::Ply),
            "obj" => Some(Self::Obj),
            _ => None,
        }
    }

    /// Format implied by a path's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
    }

    /// Human-readable format name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ply => "PLY",
            Self::Obj => "OBJ",
        }
    }
}

/// Guess a format from the first few lines of content.
///
/// A first line of `ply` marks PLY; any `v ` vertex record marks OBJ.
pub(crate) fn sniff_lines<'a>(
    lines: impl IntoIterator<Item = &'a str>,
) -> Option<MeshFormat> {
    for (i, line) in lines.into_iter().take(SNIFF_LINES).enumerate() {
        let trimmed = line.trim();
        if i == 0 && trimmed == "ply" {
            return Some(MeshFormat::Ply);
        }
        if trimmed.starts_with("v ") {
            return Some(MeshFormat::Obj);
        }
    }
    None
}

/// Detect the format of a file: extension first, then content.
pub(crate) fn detect(path: &Path) -> Result<MeshFormat, SurfpatchError> {
    if let Some(format) = MeshFormat::from_path(path) {
        return Ok(format);
    }

    let file = File::open(path).map_err(|e| SurfpatchError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut head = Vec::with_capacity(SNIFF_LINES);
    for _ in 0..SNIFF_LINES {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => head.push(line),
            // Binary payloads are not valid UTF-8; stop sniffing there.
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => break,
            Err(e) => return Err(SurfpatchError::io(path, e)),
        }
    }

    sniff_lines(head.iter().map(String::as_str)).ok_or_else(|| {
        SurfpatchError::unsupported(
            path,
            "extension and content match no known mesh format",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(MeshFormat::from_extension("PLY"), Some(MeshFormat::Ply));
        assert_eq!(
            MeshFormat::from_path(Path::new("a/b/surface.obj")),
            Some(MeshFormat::Obj)
        );
        assert_eq!(MeshFormat::from_path(Path::new("surface.xyz")), None);
        assert_eq!(MeshFormat::from_path(Path::new("surface")), None);
    }

    #[test]
    fn sniffs_ply_magic_and_obj_vertices() {
        assert_eq!(
            sniff_lines(["ply", "format ascii 1.0"]),
            Some(MeshFormat::Ply)
        );
        assert_eq!(
            sniff_lines(["# exported", "o surface", "v 0 0 0"]),
            Some(MeshFormat::Obj)
        );
        assert_eq!(sniff_lines(["HEADER    PROTEIN"]), None);
        // The PLY magic only counts on the first line.
        assert_eq!(sniff_lines(["# comment", "ply"]), None);
    }

    #[test]
    fn detect_falls_back_to_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("surface.mesh");
        std::fs::write(&path, "ply\nformat ascii 1.0\nend_header\n").unwrap();
        assert_eq!(detect(&path).unwrap(), MeshFormat::Ply);

        let other = dir.path().join("notes.txt");
        std::fs::write(&other, "nothing to see\n").unwrap();
        assert!(matches!(
            detect(&other),
            Err(SurfpatchError::UnsupportedFormat { .. })
        ));
    }
}
