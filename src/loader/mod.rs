//! Format-polymorphic mesh loading.
//!
//! Three backends can read meshes: the `ply-rs` backend (cargo feature
//! `ply-rs`), the `tobj` backend (cargo feature `obj`), and the built-in
//! ASCII PLY reader, which is always present. Which backends are usable is
//! probed once per process; every [`load`] then dispatches to the first
//! usable backend, in [`MeshBackend::PREFERENCE`] order, that reads the
//! file's format.

mod format;
#[cfg(feature = "obj")]
mod obj;
mod ply;
#[cfg(feature = "ply-rs")]
mod ply_rs;

use std::path::Path;
use std::sync::OnceLock;

pub use self::format::MeshFormat;
use crate::error::SurfpatchError;
use crate::mesh::Mesh;
use crate::options::LoaderOptions;

/// A mesh-reading strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshBackend {
    /// `ply-rs-bw`: ASCII and binary PLY with arbitrary properties.
    PlyRs,
    /// `tobj`: Wavefront OBJ.
    Tobj,
    /// Built-in ASCII PLY reader.
    Builtin,
}

impl MeshBackend {
    /// Fixed dispatch order: richer libraries first, built-in reader last.
    pub const PREFERENCE: [Self; 3] = [Self::PlyRs, Self::Tobj, Self::Builtin];

    /// Whether this backend was compiled into the crate.
    #[must_use]
    pub fn is_compiled(self) -> bool {
        match self {
            Self::PlyRs => cfg!(feature = "ply-rs"),
            Self::Tobj => cfg!(feature = "obj"),
            Self::Builtin => true,
        }
    }

    /// Whether this backend reads `format`.
    #[must_use]
    pub fn supports(self, format: MeshFormat) -> bool {
        matches!(
            (self, format),
            (Self::PlyRs | Self::Builtin, MeshFormat::Ply)
                | (Self::Tobj, MeshFormat::Obj)
        )
    }

    /// Short backend name for logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::PlyRs => "ply-rs",
            Self::Tobj => "tobj",
            Self::Builtin => "builtin",
        }
    }

    fn read(self, path: &Path) -> Result<Mesh, SurfpatchError> {
        match self {
            #[cfg(feature = "ply-rs")]
            Self::PlyRs => ply_rs::read_file(path),
            #[cfg(feature = "obj")]
            Self::Tobj => obj::read_file(path),
            Self::Builtin => ply::read_file(path),
            #[allow(unreachable_patterns)]
            other => Err(SurfpatchError::unsupported(
                path,
                format!("backend {} is not compiled in", other.name()),
            )),
        }
    }
}

/// Backends usable in this process, in preference order.
///
/// Computed on first call and never re-probed.
pub fn available_backends() -> &'static [MeshBackend] {
    static BACKENDS: OnceLock<Vec<MeshBackend>> = OnceLock::new();
    BACKENDS.get_or_init(|| {
        let backends: Vec<MeshBackend> = MeshBackend::PREFERENCE
            .into_iter()
            .filter(|b| b.is_compiled())
            .collect();
        log::debug!(
            "mesh backends: {}",
            backends
                .iter()
                .map(|b| b.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        backends
    })
}

/// Load a mesh with default loader options.
pub fn load(path: impl AsRef<Path>) -> Result<Mesh, SurfpatchError> {
    load_with_options(path, &LoaderOptions::default())
}

/// Load a mesh, dispatching on the detected format.
pub fn load_with_options(
    path: impl AsRef<Path>,
    options: &LoaderOptions,
) -> Result<Mesh, SurfpatchError> {
    let path = path.as_ref();
    let format = format::detect(path)?;

    let backend = if options.prefer_builtin
        && MeshBackend::Builtin.supports(format)
    {
        Some(MeshBackend::Builtin)
    } else {
        available_backends()
            .iter()
            .copied()
            .find(|b| b.supports(format))
    };
    let Some(backend) = backend else {
        return Err(SurfpatchError::unsupported(
            path,
            format!("no available backend reads {}", format.name()),
        ));
    };

    log::debug!(
        "loading {} as {} with {}",
        path.display(),
        format.name(),
        backend.name()
    );
    backend.read(path)
}

/// Load a mesh with one specific backend.
pub fn load_with(
    backend: MeshBackend,
    path: impl AsRef<Path>,
) -> Result<Mesh, SurfpatchError> {
    let path = path.as_ref();
    if !backend.is_compiled() {
        return Err(SurfpatchError::unsupported(
            path,
            format!("backend {} is not compiled in", backend.name()),
        ));
    }
    let format = format::detect(path)?;
    if !backend.supports(format) {
        return Err(SurfpatchError::unsupported(
            path,
            format!("backend {} does not read {}", backend.name(), format.name()),
        ));
    }
    backend.read(path)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    const TETRAHEDRON: &str = "\
ply
format ascii 1.0
element vertex 4
property float x
property float y
property float z
property float nx
property float ny
property float nz
element face 4
property list uchar int vertex_indices
end_header
0 0 0 -1 -1 -1
1 0 0 1 0 0
0 1 0 0 1 0
0 0 1 0 0 1
3 0 2 1
3 0 1 3
3 1 2 3
3 2 0 3
";

    fn write(dir: &tempfile::TempDir, name: &str, text: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn probe_is_stable_and_ends_with_builtin() {
        let first = available_backends();
        let second = available_backends();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.last(), Some(&MeshBackend::Builtin));
        assert_eq!(
            first.contains(&MeshBackend::PlyRs),
            cfg!(feature = "ply-rs")
        );
    }

    #[test]
    fn every_available_backend_reproduces_the_tetrahedron() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "tetra.ply", TETRAHEDRON);

        for &backend in available_backends() {
            if !backend.supports(MeshFormat::Ply) {
                continue;
            }
            let mesh = load_with(backend, &path).unwrap();
            assert_eq!(
                mesh.vertices(),
                [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
                "{}",
                backend.name()
            );
            assert_eq!(
                mesh.faces(),
                [[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]]
            );
            assert_eq!(mesh.attribute("vertex_x").unwrap().len(), 4);
            assert_eq!(mesh.vertex_normals().unwrap()[1], Vec3::X);
        }
    }

    fn assert_every_backend_rejects(text: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "bad.ply", text);

        let err = load(&path).unwrap_err();
        assert!(
            matches!(err, SurfpatchError::MalformedFile { .. }),
            "load: {err}"
        );
        for &backend in available_backends() {
            if !backend.supports(MeshFormat::Ply) {
                continue;
            }
            let err = load_with(backend, &path).unwrap_err();
            assert!(
                matches!(err, SurfpatchError::MalformedFile { .. }),
                "{}: {err}",
                backend.name()
            );
        }
    }

    #[test]
    fn short_vertex_block_is_malformed_for_every_backend() {
        // Five vertices declared, four data lines before the faces.
        assert_every_backend_rejects(
            &TETRAHEDRON.replace("element vertex 4", "element vertex 5"),
        );
    }

    #[test]
    fn out_of_range_face_is_malformed_for_every_backend() {
        assert_every_backend_rejects(&TETRAHEDRON.replace("3 2 0 3", "3 2 0 4"));
    }

    #[test]
    fn two_vertex_face_is_malformed_for_every_backend() {
        assert_every_backend_rejects(&TETRAHEDRON.replace("3 2 0 3", "2 2 0"));
    }

    #[test]
    fn load_detects_ply_by_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "surface.dat", TETRAHEDRON);
        assert_eq!(load(&path).unwrap().face_count(), 4);
    }

    #[test]
    fn prefer_builtin_uses_fallback_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "tetra.ply", TETRAHEDRON);
        let options = LoaderOptions {
            prefer_builtin: true,
        };
        let mesh = load_with_options(&path, &options).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn unknown_format_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "notes.txt", "not a mesh\n");
        assert!(matches!(
            load(&path),
            Err(SurfpatchError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn builtin_refuses_obj() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "tri.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert!(matches!(
            load_with(MeshBackend::Builtin, &path),
            Err(SurfpatchError::UnsupportedFormat { .. })
        ));
        // Without the OBJ backend nothing reads the file.
        if !cfg!(feature = "obj") {
            assert!(matches!(
                load(&path),
                Err(SurfpatchError::UnsupportedFormat { .. })
            ));
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(dir.path().join("absent.ply")),
            Err(SurfpatchError::Io { .. })
        ));
    }
}
