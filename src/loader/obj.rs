//! Wavefront OBJ backend on top of `tobj`.

use std::path::Path;

use glam::Vec3;

use crate::error::SurfpatchError;
use crate::mesh::Mesh;

pub(crate) fn read_file(path: &Path) -> Result<Mesh, SurfpatchError> {
    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, _materials) =
        tobj::load_obj(path, &options).map_err(|e| match e {
            tobj::LoadError::OpenFileFailed => SurfpatchError::io(
                path,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "cannot open OBJ file",
                ),
            ),
            other => SurfpatchError::malformed(path, 0, other.to_string()),
        })?;

    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    let mut normals = Vec::new();
    let mut texcoords = Vec::new();
    let all_normals = models
        .iter()
        .all(|m| m.mesh.normals.len() == m.mesh.positions.len());
    let all_texcoords = models
        .iter()
        .all(|m| m.mesh.texcoords.len() / 2 == m.mesh.positions.len() / 3);

    for model in &models {
        let mesh = &model.mesh;
        let offset = vertices.len() as u32;
        vertices.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );
        faces.extend(
            mesh.indices
                .chunks_exact(3)
                .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
        );
        if all_normals {
            normals.extend(mesh.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]));
        }
        if all_texcoords {
            texcoords.extend(mesh.texcoords.chunks_exact(2).map(|t| [t[0], t[1]]));
        }
    }

    log::debug!(
        "tobj read {}: {} models, {} vertices, {} triangles",
        path.display(),
        models.len(),
        vertices.len(),
        faces.len()
    );

    let mut attributes = Vec::new();
    if all_normals && !normals.is_empty() {
        for (axis, name) in ["vertex_nx", "vertex_ny", "vertex_nz"]
            .into_iter()
            .enumerate()
        {
            attributes
                .push((name.to_owned(), normals.iter().map(|n| n[axis]).collect()));
        }
    }
    if all_texcoords && !texcoords.is_empty() {
        for (axis, name) in ["vertex_u", "vertex_v"].into_iter().enumerate() {
            attributes.push((
                name.to_owned(),
                texcoords.iter().map(|t| t[axis]).collect(),
            ));
        }
    }

    Mesh::new(vertices, faces, attributes)
        .map_err(|e| SurfpatchError::malformed(path, 0, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_models_and_triangulates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two.obj");
        std::fs::write(
            &path,
            "o first\nv 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n\
             o second\nv 5 5 5\nv 6 5 5\nv 5 6 5\nf 5 6 7\n",
        )
        .unwrap();

        let mesh = read_file(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 7);
        assert_eq!(mesh.face_count(), 3);
        assert!(mesh
            .faces()
            .iter()
            .all(|f| f.iter().all(|&i| (i as usize) < mesh.vertex_count())));
        assert!(mesh.vertex_normals().is_none());
    }
}
