//! Triangulated surface mesh with named per-vertex and per-face attributes.
//!
//! A [`Mesh`] is built once, either by a loader in [`crate::loader`] or by
//! [`Mesh::new`], and is read-only afterwards. Attribute names carry a
//! `vertex_` or `face_` prefix that fixes their length: one value per vertex
//! or one value per face.

mod attributes;

use std::fmt;

use glam::Vec3;

use self::attributes::{Attribute, AttributeStore};
pub use self::attributes::{AttributeDomain, FACE_PREFIX, VERTEX_PREFIX};
use crate::error::SurfpatchError;

/// Reason a set of vertices, faces and attributes does not form a mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidMesh {
    /// A face references a vertex that does not exist.
    FaceIndexOutOfRange {
        /// Index of the offending face.
        face: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
    /// An attribute has the wrong number of values for its domain.
    AttributeLength {
        /// Attribute name.
        name: String,
        /// Vertex or face count the attribute must match.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
    /// An attribute name lacks the `vertex_`/`face_` prefix.
    AttributePrefix(String),
    /// Two attributes share a name.
    DuplicateAttribute(String),
}

impl fmt::Display for InvalidMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FaceIndexOutOfRange {
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "face {face} references vertex {index}, but the mesh has \
                 {vertex_count} vertices"
            ),
            Self::AttributeLength {
                name,
                expected,
                actual,
            } => write!(
                f,
                "attribute {name} has {actual} values, expected {expected}"
            ),
            Self::AttributePrefix(name) => write!(
                f,
                "attribute {name} must start with `{VERTEX_PREFIX}` or \
                 `{FACE_PREFIX}`"
            ),
            Self::DuplicateAttribute(name) => {
                write!(f, "attribute {name} is defined twice")
            }
        }
    }
}

impl std::error::Error for InvalidMesh {}

/// Triangulated surface: vertex positions, triangles, named attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<[u32; 3]>,
    attributes: AttributeStore,
}

impl Mesh {
    /// Build a mesh, checking that every face index is in range and that
    /// every attribute matches the length of its domain.
    pub fn new(
        vertices: Vec<Vec3>,
        faces: Vec<[u32; 3]>,
        attributes: Vec<(String, Vec<f32>)>,
    ) -> Result<Self, InvalidMesh> {
        let vertex_count = vertices.len();
        for (face, tri) in faces.iter().enumerate() {
            if let Some(&index) =
                tri.iter().find(|&&i| i as usize >= vertex_count)
            {
                return Err(InvalidMesh::FaceIndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }

        let mut entries = Vec::with_capacity(attributes.len());
        for (name, values) in attributes {
            let Some(domain) = AttributeDomain::of(&name) else {
                return Err(InvalidMesh::AttributePrefix(name));
            };
            let expected = match domain {
                AttributeDomain::Vertex => vertex_count,
                AttributeDomain::Face => faces.len(),
            };
            if values.len() != expected {
                return Err(InvalidMesh::AttributeLength {
                    name,
                    expected,
                    actual: values.len(),
                });
            }
            entries.push(Attribute {
                name,
                domain,
                values,
            });
        }

        let attributes = AttributeStore::from_entries(entries)
            .map_err(InvalidMesh::DuplicateAttribute)?;

        Ok(Self {
            vertices,
            faces,
            attributes,
        })
    }

    /// Vertex positions; the slice index is the vertex identity.
    #[must_use]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Triangles as triples of indices into [`Self::vertices`].
    #[must_use]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangular faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// All attribute names, vertex attributes first, each group in
    /// declaration order. Every call starts a fresh iteration.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.attributes.names()
    }

    /// Whether an attribute with this exact (prefixed) name exists.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.get(name).is_some()
    }

    /// Owned copy of the named attribute's values.
    pub fn attribute(&self, name: &str) -> Result<Vec<f32>, SurfpatchError> {
        self.attributes
            .get(name)
            .map(|a| a.values.clone())
            .ok_or_else(|| SurfpatchError::UnknownAttribute(name.to_owned()))
    }

    /// Per-vertex normals assembled from `vertex_nx`, `vertex_ny` and
    /// `vertex_nz`, or `None` unless all three are present.
    #[must_use]
    pub fn vertex_normals(&self) -> Option<Vec<Vec3>> {
        let nx = self.attributes.get("vertex_nx")?;
        let ny = self.attributes.get("vertex_ny")?;
        let nz = self.attributes.get("vertex_nz")?;
        Some(
            nx.values
                .iter()
                .zip(&ny.values)
                .zip(&nz.values)
                .map(|((&x, &y), &z)| Vec3::new(x, y, z))
                .collect(),
        )
    }

    /// Edges outlining the region where a vertex attribute is positive.
    ///
    /// For each face and each edge `(a, b)` with opposite vertex `c`, the
    /// edge is reported when `attr[a] > 0`, `attr[b] > 0` and
    /// `attr[c] == 0`. Edges come out in face order; within a face the order
    /// is `(0, 1)`, `(0, 2)`, `(1, 2)`.
    pub fn boundary_edges(
        &self,
        attribute: &str,
    ) -> Result<Vec<[u32; 2]>, SurfpatchError> {
        let values = match self.attributes.get(attribute) {
            Some(a) if a.domain == AttributeDomain::Vertex => &a.values,
            _ => {
                return Err(SurfpatchError::UnknownAttribute(
                    attribute.to_owned(),
                ))
            }
        };

        let mut edges = Vec::new();
        for &[v0, v1, v2] in &self.faces {
            for (a, b, c) in [(v0, v1, v2), (v0, v2, v1), (v1, v2, v0)] {
                let inside = |v: u32| values[v as usize] > 0.0;
                if inside(a) && inside(b) && values[c as usize] == 0.0 {
                    edges.push([a, b]);
                }
            }
        }
        Ok(edges)
    }
}
