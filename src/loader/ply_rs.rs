//! PLY backend on top of `ply-rs-bw`: ASCII and binary encodings, any
//! scalar property type, polygonal faces.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use glam::Vec3;
use ply_rs_bw::parser::Parser;
use ply_rs_bw::ply::{DefaultElement, Property};

use crate::error::SurfpatchError;
use crate::mesh::{Mesh, FACE_PREFIX, VERTEX_PREFIX};

/// Face list property names used by common exporters.
const INDEX_PROPERTIES: [&str; 2] = ["vertex_indices", "vertex_index"];

pub(crate) fn read_file(path: &Path) -> Result<Mesh, SurfpatchError> {
    let file = File::open(path).map_err(|e| SurfpatchError::io(path, e))?;
    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(&mut BufReader::new(file))
        .map_err(|e| SurfpatchError::malformed(path, 0, e.to_string()))?;

    let empty = Vec::new();
    let vertex_payload = ply.payload.get("vertex").ok_or_else(|| {
        SurfpatchError::malformed(path, 0, "no vertex element")
    })?;
    let face_payload = ply.payload.get("face").unwrap_or(&empty);

    let vertex_names = scalar_names(vertex_payload.first());
    let mut vertex_columns: Vec<Vec<f32>> = vertex_names
        .iter()
        .map(|_| Vec::with_capacity(vertex_payload.len()))
        .collect();
    let mut vertices = Vec::with_capacity(vertex_payload.len());

    for (i, v) in vertex_payload.iter().enumerate() {
        let coord = |axis: &str| {
            v.get(axis).and_then(scalar).ok_or_else(|| {
                SurfpatchError::malformed(
                    path,
                    0,
                    format!("vertex {i} has no numeric `{axis}`"),
                )
            })
        };
        vertices.push(Vec3::new(coord("x")?, coord("y")?, coord("z")?));
        for (column, name) in vertex_columns.iter_mut().zip(&vertex_names) {
            column.push(v.get(name.as_str()).and_then(scalar).unwrap_or(0.0));
        }
    }

    let face_names = scalar_names(face_payload.first());
    let mut face_columns: Vec<Vec<f32>> =
        face_names.iter().map(|_| Vec::new()).collect();
    let mut faces = Vec::with_capacity(face_payload.len());
    let vertex_count = vertices.len();

    for (i, face) in face_payload.iter().enumerate() {
        let indices = face_indices(face, i, vertex_count, path)?;

        // Fan-triangulate polygons; each triangle inherits the face values.
        for k in 1..indices.len() - 1 {
            faces.push([
                indices[0] as u32,
                indices[k] as u32,
                indices[k + 1] as u32,
            ]);
            for (column, name) in face_columns.iter_mut().zip(&face_names) {
                column.push(
                    face.get(name.as_str()).and_then(scalar).unwrap_or(0.0),
                );
            }
        }
    }

    log::debug!(
        "ply-rs read {}: {} vertices, {} triangles",
        path.display(),
        vertices.len(),
        faces.len()
    );

    let attributes = vertex_names
        .iter()
        .zip(vertex_columns)
        .map(|(name, values)| (format!("{VERTEX_PREFIX}{name}"), values))
        .chain(
            face_names
                .iter()
                .zip(face_columns)
                .map(|(name, values)| (format!("{FACE_PREFIX}{name}"), values)),
        )
        .collect();

    Mesh::new(vertices, faces, attributes)
        .map_err(|e| SurfpatchError::malformed(path, 0, e.to_string()))
}

/// Validated vertex indices of face `i`: present, non-negative, at least
/// three, all in range.
fn face_indices(
    face: &DefaultElement,
    i: usize,
    vertex_count: usize,
    path: &Path,
) -> Result<Vec<usize>, SurfpatchError> {
    let malformed = |reason: String| SurfpatchError::malformed(path, 0, reason);

    let list = INDEX_PROPERTIES
        .iter()
        .find_map(|name| face.get(*name))
        .ok_or_else(|| malformed(format!("face {i} has no vertex index list")))?;
    let indices = index_list(list).ok_or_else(|| {
        malformed(format!("face {i} has a negative or non-integer vertex index"))
    })?;
    if indices.len() < 3 {
        return Err(malformed(format!(
            "face {i} has {} vertices",
            indices.len()
        )));
    }
    if let Some(&bad) = indices.iter().find(|&&ix| ix >= vertex_count) {
        return Err(malformed(format!(
            "face {i} references vertex {bad}, but the mesh has \
             {vertex_count} vertices"
        )));
    }
    Ok(indices)
}

/// Names of the scalar properties of an element, in declaration order.
fn scalar_names(element: Option<&DefaultElement>) -> Vec<String> {
    element.map_or_else(Vec::new, |e| {
        e.iter()
            .filter(|(_, prop)| scalar(prop).is_some())
            .map(|(name, _)| name.clone())
            .collect()
    })
}

fn scalar(prop: &Property) -> Option<f32> {
    match prop {
        Property::Float(v) => Some(*v),
        Property::Double(v) => Some(*v as f32),
        Property::Int(v) => Some(*v as f32),
        Property::UInt(v) => Some(*v as f32),
        Property::Short(v) => Some(f32::from(*v)),
        Property::UShort(v) => Some(f32::from(*v)),
        Property::Char(v) => Some(f32::from(*v)),
        Property::UChar(v) => Some(f32::from(*v)),
        _ => None,
    }
}

fn index_list(prop: &Property) -> Option<Vec<usize>> {
    fn to_indices<T: Copy + TryInto<usize>>(v: &[T]) -> Option<Vec<usize>> {
        v.iter().map(|&x| x.try_into().ok()).collect()
    }
    match prop {
        Property::ListInt(v) => to_indices(v),
        Property::ListUInt(v) => to_indices(v),
        Property::ListShort(v) => to_indices(v),
        Property::ListUShort(v) => to_indices(v),
        Property::ListChar(v) => to_indices(v),
        Property::ListUChar(v) => to_indices(v),
        _ => None,
    }
}
