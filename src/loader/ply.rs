//! Built-in ASCII PLY reader.
//!
//! Handles the plain-text layout written by surface generators: a header
//! closed by `end_header`, one line per vertex holding one value per
//! declared vertex property, then one line per face holding the vertex
//! count followed by 0-based vertex indices (plus any scalar face
//! properties). Only triangles are accepted. Binary PLY is left to the
//! `ply-rs` backend.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Lines};
use std::path::Path;

use glam::Vec3;

use crate::error::SurfpatchError;
use crate::mesh::{Mesh, FACE_PREFIX, VERTEX_PREFIX};

/// One declared property of the face element.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FaceProperty {
    /// The vertex index list.
    Indices,
    /// A scalar stored as a `face_` attribute.
    Scalar(String),
}

/// Element currently receiving `property` lines in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Vertex,
    Face,
}

/// Parsed PLY header.
#[derive(Debug, Default)]
struct Header {
    vertex_count: usize,
    face_count: usize,
    has_vertex_element: bool,
    vertex_properties: Vec<String>,
    face_properties: Vec<FaceProperty>,
}

/// Line source that tracks 1-based line numbers for error messages.
struct LineCursor<'p, R> {
    lines: Lines<R>,
    line_no: usize,
    path: &'p Path,
}

impl<'p, R: BufRead> LineCursor<'p, R> {
    fn new(reader: R, path: &'p Path) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            path,
        }
    }

    /// Next line, or `MalformedFile` built from `missing` at end of input.
    fn next_line(
        &mut self,
        missing: impl FnOnce() -> String,
    ) -> Result<String, SurfpatchError> {
        match self.lines.next() {
            Some(Ok(line)) => {
                self.line_no += 1;
                Ok(line)
            }
            Some(Err(e)) if e.kind() == ErrorKind::InvalidData => {
                Err(SurfpatchError::malformed(
                    self.path,
                    self.line_no + 1,
                    "line is not valid UTF-8 text",
                ))
            }
            Some(Err(e)) => Err(SurfpatchError::io(self.path, e)),
            None => Err(SurfpatchError::malformed(
                self.path,
                self.line_no + 1,
                missing(),
            )),
        }
    }

    fn malformed(&self, reason: impl Into<String>) -> SurfpatchError {
        SurfpatchError::malformed(self.path, self.line_no, reason)
    }
}

/// Read an ASCII PLY file from disk.
pub(crate) fn read_file(path: &Path) -> Result<Mesh, SurfpatchError> {
    let file = File::open(path).map_err(|e| SurfpatchError::io(path, e))?;
    read(BufReader::new(file), path)
}

/// Read ASCII PLY from any buffered source. `path` is only used to label
/// errors.
pub(crate) fn read<R: BufRead>(
    reader: R,
    path: &Path,
) -> Result<Mesh, SurfpatchError> {
    let mut cursor = LineCursor::new(reader, path);
    let header = read_header(&mut cursor)?;
    let (vertices, vertex_columns) = read_vertices(&mut cursor, &header)?;
    let (faces, face_columns) = read_faces(&mut cursor, &header)?;

    log::debug!(
        "parsed {}: {} vertices, {} faces, {} vertex properties",
        path.display(),
        vertices.len(),
        faces.len(),
        header.vertex_properties.len()
    );

    let vertex_attrs = header
        .vertex_properties
        .iter()
        .zip(vertex_columns)
        .map(|(name, values)| (format!("{VERTEX_PREFIX}{name}"), values));
    let face_attrs = header
        .face_properties
        .iter()
        .filter_map(|p| match p {
            FaceProperty::Scalar(name) => Some(name),
            FaceProperty::Indices => None,
        })
        .zip(face_columns)
        .map(|(name, values)| (format!("{FACE_PREFIX}{name}"), values));

    Mesh::new(vertices, faces, vertex_attrs.chain(face_attrs).collect())
        .map_err(|e| SurfpatchError::malformed(path, 0, e.to_string()))
}

fn read_header<R: BufRead>(
    cursor: &mut LineCursor<'_, R>,
) -> Result<Header, SurfpatchError> {
    let magic = cursor.next_line(|| "empty file".to_owned())?;
    if magic.trim() != "ply" {
        return Err(SurfpatchError::unsupported(
            cursor.path,
            "missing `ply` magic line",
        ));
    }

    let mut header = Header::default();
    let mut section = Section::None;
    loop {
        let line =
            cursor.next_line(|| "header has no `end_header`".to_owned())?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            ["end_header"] => break,
            [] | ["comment" | "obj_info", ..] => {}
            ["format", "ascii", ..] => {}
            ["format", other, ..] => {
                return Err(SurfpatchError::unsupported(
                    cursor.path,
                    format!("PLY format `{other}` is not ASCII"),
                ));
            }
            ["element", name, count] => {
                let count: usize = count.parse().map_err(|_| {
                    cursor.malformed(format!("invalid element count `{count}`"))
                })?;
                section = match *name {
                    "vertex" => {
                        header.vertex_count = count;
                        header.has_vertex_element = true;
                        Section::Vertex
                    }
                    "face" => {
                        header.face_count = count;
                        Section::Face
                    }
                    _ if count == 0 => Section::None,
                    _ => {
                        return Err(SurfpatchError::unsupported(
                            cursor.path,
                            format!("element `{name}` is not supported"),
                        ));
                    }
                };
            }
            ["property", "list", _, _, _] if section == Section::Face => {
                if header.face_properties.contains(&FaceProperty::Indices) {
                    return Err(cursor.malformed("face declares two index lists"));
                }
                header.face_properties.push(FaceProperty::Indices);
            }
            ["property", "list", ..] => {
                return Err(SurfpatchError::unsupported(
                    cursor.path,
                    "list properties are only supported on faces",
                ));
            }
            ["property", _ty, name] => match section {
                Section::Vertex => {
                    header.vertex_properties.push((*name).to_owned());
                }
                Section::Face => header
                    .face_properties
                    .push(FaceProperty::Scalar((*name).to_owned())),
                Section::None => {}
            },
            _ => {
                return Err(cursor.malformed(format!(
                    "unrecognised header line `{}`",
                    line.trim()
                )));
            }
        }
    }

    if !header.has_vertex_element {
        return Err(cursor.malformed("header declares no vertex element"));
    }
    for axis in ["x", "y", "z"] {
        if !header.vertex_properties.iter().any(|p| p == axis) {
            return Err(cursor.malformed(format!(
                "vertex element has no `{axis}` property"
            )));
        }
    }
    if header.face_count > 0
        && !header.face_properties.contains(&FaceProperty::Indices)
    {
        return Err(cursor.malformed("face element has no index list"));
    }
    Ok(header)
}

/// Parse one whitespace-separated float, labelling failures with the line.
fn parse_value<R: BufRead>(
    cursor: &LineCursor<'_, R>,
    token: &str,
) -> Result<f32, SurfpatchError> {
    token
        .parse()
        .map_err(|_| cursor.malformed(format!("invalid number `{token}`")))
}

fn read_vertices<R: BufRead>(
    cursor: &mut LineCursor<'_, R>,
    header: &Header,
) -> Result<(Vec<Vec3>, Vec<Vec<f32>>), SurfpatchError> {
    let n = header.vertex_count;
    let props = &header.vertex_properties;
    let column_of = |axis: &str| props.iter().position(|p| p == axis);
    let (Some(ix), Some(iy), Some(iz)) =
        (column_of("x"), column_of("y"), column_of("z"))
    else {
        return Err(cursor.malformed("vertex element lacks x/y/z"));
    };

    let mut columns: Vec<Vec<f32>> =
        props.iter().map(|_| Vec::with_capacity(n)).collect();
    let mut vertices = Vec::with_capacity(n);
    let mut row = Vec::with_capacity(props.len());

    for read in 0..n {
        let line = cursor.next_line(|| {
            format!("expected {n} vertex lines, found {read}")
        })?;
        row.clear();
        for token in line.split_whitespace() {
            row.push(parse_value(cursor, token)?);
        }
        if row.len() != props.len() {
            return Err(cursor.malformed(format!(
                "expected {} vertex values, found {}",
                props.len(),
                row.len()
            )));
        }
        vertices.push(Vec3::new(row[ix], row[iy], row[iz]));
        for (column, &value) in columns.iter_mut().zip(&row) {
            column.push(value);
        }
    }
    Ok((vertices, columns))
}

fn read_faces<R: BufRead>(
    cursor: &mut LineCursor<'_, R>,
    header: &Header,
) -> Result<(Vec<[u32; 3]>, Vec<Vec<f32>>), SurfpatchError> {
    let m = header.face_count;
    let n = header.vertex_count;
    let scalar_count = header
        .face_properties
        .iter()
        .filter(|p| matches!(p, FaceProperty::Scalar(_)))
        .count();
    let mut columns: Vec<Vec<f32>> =
        (0..scalar_count).map(|_| Vec::with_capacity(m)).collect();
    let mut faces = Vec::with_capacity(m);

    for read in 0..m {
        let line = cursor
            .next_line(|| format!("expected {m} face lines, found {read}"))?;
        let mut tokens = line.split_whitespace();
        let mut scalars = columns.iter_mut();

        for prop in &header.face_properties {
            match prop {
                FaceProperty::Scalar(name) => {
                    let token = tokens.next().ok_or_else(|| {
                        cursor.malformed(format!("face is missing `{name}`"))
                    })?;
                    let value = parse_value(cursor, token)?;
                    if let Some(column) = scalars.next() {
                        column.push(value);
                    }
                }
                FaceProperty::Indices => {
                    faces.push(read_triangle(cursor, &mut tokens, n)?);
                }
            }
        }
        if tokens.next().is_some() {
            return Err(cursor.malformed("trailing values on face line"));
        }
    }
    Ok((faces, columns))
}

fn read_triangle<'t, R: BufRead>(
    cursor: &LineCursor<'_, R>,
    tokens: &mut impl Iterator<Item = &'t str>,
    vertex_count: usize,
) -> Result<[u32; 3], SurfpatchError> {
    let arity = tokens
        .next()
        .ok_or_else(|| cursor.malformed("empty face line"))?;
    if arity != "3" {
        return Err(cursor.malformed(format!(
            "face has {arity} vertices; only triangles are supported"
        )));
    }

    let mut tri = [0u32; 3];
    for slot in &mut tri {
        let token = tokens
            .next()
            .ok_or_else(|| cursor.malformed("face has fewer than 3 indices"))?;
        let index: u32 = token.parse().map_err(|_| {
            cursor.malformed(format!("invalid vertex index `{token}`"))
        })?;
        if index as usize >= vertex_count {
            return Err(cursor.malformed(format!(
                "vertex index {index} out of range for {vertex_count} vertices"
            )));
        }
        *slot = index;
    }
    Ok(tri)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const TETRAHEDRON: &str = "\
ply
format ascii 1.0
comment unit tetrahedron
element vertex 4
property float x
property float y
property float z
property float charge
element face 4
property list uchar int vertex_indices
end_header
0 0 0 -1.0
1 0 0 0.5
0 1 0 0.25
0 0 1 1.0
3 0 2 1
3 0 1 3
3 1 2 3
3 2 0 3
";

    fn parse(text: &str) -> Result<Mesh, SurfpatchError> {
        read(Cursor::new(text), Path::new("test.ply"))
    }

    #[test]
    fn tetrahedron_round_trips() {
        let mesh = parse(TETRAHEDRON).unwrap();
        assert_eq!(
            mesh.vertices(),
            [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z]
        );
        assert_eq!(mesh.faces(), [[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]]);
        assert_eq!(
            mesh.attribute("vertex_charge").unwrap(),
            [-1.0, 0.5, 0.25, 1.0]
        );
    }

    #[test]
    fn coordinates_are_exposed_as_attributes() {
        let mesh = parse(TETRAHEDRON).unwrap();
        let names: Vec<&str> = mesh.attribute_names().collect();
        assert_eq!(
            names,
            ["vertex_x", "vertex_y", "vertex_z", "vertex_charge"]
        );
        for axis in ["vertex_x", "vertex_y", "vertex_z"] {
            assert_eq!(mesh.attribute(axis).unwrap().len(), 4);
        }
        assert_eq!(mesh.attribute("vertex_y").unwrap(), [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let bytes: &[u8] = b"ply\nformat ascii 1.0\n\xff\xfe element\n";
        let err = read(Cursor::new(bytes), Path::new("test.ply")).unwrap_err();
        match err {
            SurfpatchError::MalformedFile { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_vertex_block_is_malformed() {
        // Five vertices declared, four lines present before the faces.
        let text = TETRAHEDRON.replace("element vertex 4", "element vertex 5");
        let err = parse(&text).unwrap_err();
        assert!(
            matches!(err, SurfpatchError::MalformedFile { .. }),
            "{err}"
        );
    }

    #[test]
    fn truncated_face_block_reports_counts() {
        let text = TETRAHEDRON.replace("element face 4", "element face 5");
        let err = parse(&text).unwrap_err();
        match err {
            SurfpatchError::MalformedFile { line, reason, .. } => {
                assert_eq!(line, 20);
                assert_eq!(reason, "expected 5 face lines, found 4");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_face_index_is_malformed() {
        let text = TETRAHEDRON.replace("3 2 0 3", "3 2 0 4");
        let err = parse(&text).unwrap_err();
        match err {
            SurfpatchError::MalformedFile { line, reason, .. } => {
                assert_eq!(line, 19);
                assert!(reason.contains("vertex index 4 out of range"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn quads_are_rejected() {
        let text = TETRAHEDRON.replace("3 2 0 3", "4 2 0 3 1");
        assert!(matches!(
            parse(&text),
            Err(SurfpatchError::MalformedFile { .. })
        ));
    }

    #[test]
    fn binary_ply_is_unsupported() {
        let text = TETRAHEDRON
            .replace("format ascii 1.0", "format binary_little_endian 1.0");
        assert!(matches!(
            parse(&text),
            Err(SurfpatchError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn missing_end_header_is_malformed() {
        let text = "ply\nformat ascii 1.0\nelement vertex 0\n";
        assert!(matches!(
            parse(text),
            Err(SurfpatchError::MalformedFile { .. })
        ));
    }

    #[test]
    fn scalar_face_properties_become_face_attributes() {
        let text = "\
ply
format ascii 1.0
element vertex 3
property double x
property double y
property double z
element face 1
property list uchar int vertex_indices
property float area
end_header
0 0 0
1 0 0
0 1 0
3 0 1 2 0.5
";
        let mesh = parse(text).unwrap();
        assert_eq!(mesh.faces(), [[0, 1, 2]]);
        assert_eq!(mesh.attribute("face_area").unwrap(), [0.5]);
    }

    #[test]
    fn wrong_vertex_width_is_malformed() {
        let text = TETRAHEDRON.replace("1 0 0 0.5", "1 0 0");
        assert!(matches!(
            parse(&text),
            Err(SurfpatchError::MalformedFile { line: 13, .. })
        ));
    }
}
