//! ASCII OFF reader and writer.
//!
//! # Supported format
//! - `OFF` header, then `nv nf ne`, then `nv` vertex lines and `nf` faces.
//! - Only triangular faces (`3 a b c`).
//! - `#` comments and blank lines are skipped.
//!
//! Vertex attributes are not part of the format and are neither read nor
//! written.

use crate::io::{MeshReader, MeshWriter};
use crate::mesh_error::MeshSurferError;
use crate::topology::trimesh::{Face, TriMesh};
use itertools::Itertools;
use std::io::{Read, Write};

/// OFF reader. `dim` selects the dimensionality of the returned mesh; for
/// 2D meshes the z column is read and discarded.
#[derive(Debug, Clone, Copy)]
pub struct OffReader {
    pub dim: u8,
}

impl Default for OffReader {
    fn default() -> Self {
        Self { dim: 3 }
    }
}

impl OffReader {
    fn parse_count(raw: Option<&str>, what: &str) -> Result<usize, MeshSurferError> {
        let raw = raw.ok_or_else(|| MeshSurferError::MeshIoParse(format!("missing {what}")))?;
        raw.parse::<usize>()
            .map_err(|_| MeshSurferError::MeshIoParse(format!("invalid {what}: {raw}")))
    }

    fn parse_coord(raw: &str) -> Result<f64, MeshSurferError> {
        raw.parse::<f64>()
            .map_err(|_| MeshSurferError::MeshIoParse(format!("invalid coordinate: {raw}")))
    }
}

impl MeshReader for OffReader {
    fn read<R: Read>(&self, mut reader: R) -> Result<TriMesh, MeshSurferError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        let mut lines = contents
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'));

        match lines.next() {
            Some("OFF") => {}
            other => {
                return Err(MeshSurferError::MeshIoParse(format!(
                    "expected OFF header, found {other:?}"
                )));
            }
        }

        let counts = lines
            .next()
            .ok_or_else(|| MeshSurferError::MeshIoParse("missing element counts".into()))?;
        let mut parts = counts.split_whitespace();
        let nv = Self::parse_count(parts.next(), "vertex count")?;
        let nf = Self::parse_count(parts.next(), "face count")?;

        let mut vertices = Vec::with_capacity(nv);
        for i in 0..nv {
            let line = lines
                .next()
                .ok_or_else(|| MeshSurferError::MeshIoParse(format!("missing vertex {i}")))?;
            let (x, y, z) = line
                .split_whitespace()
                .map(Self::parse_coord)
                .collect_tuple()
                .ok_or_else(|| {
                    MeshSurferError::MeshIoParse(format!("vertex {i} needs three coordinates"))
                })?;
            vertices.push([x?, y?, if self.dim == 2 { 0.0 } else { z? }]);
        }

        let mut faces: Vec<Face> = Vec::with_capacity(nf);
        for i in 0..nf {
            let line = lines
                .next()
                .ok_or_else(|| MeshSurferError::MeshIoParse(format!("missing face {i}")))?;
            let ids = line
                .split_whitespace()
                .map(|raw| {
                    raw.parse::<usize>().map_err(|_| {
                        MeshSurferError::MeshIoParse(format!("invalid index in face {i}: {raw}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            match ids.as_slice() {
                [3, a, b, c] => faces.push([*a, *b, *c]),
                [n, ..] => {
                    return Err(MeshSurferError::MeshIoParse(format!(
                        "face {i} has {n} vertices, only triangles are supported"
                    )));
                }
                [] => {
                    return Err(MeshSurferError::MeshIoParse(format!("face {i} is empty")));
                }
            }
        }

        log::debug!("read OFF mesh with {nv} vertices and {nf} faces");
        TriMesh::from_parts(self.dim, vertices, faces)
    }
}

/// OFF writer. 2D meshes are written with a zero z column.
#[derive(Debug, Default, Clone, Copy)]
pub struct OffWriter;

impl MeshWriter for OffWriter {
    fn write<W: Write>(&self, mut writer: W, mesh: &TriMesh) -> Result<(), MeshSurferError> {
        writeln!(writer, "OFF")?;
        writeln!(writer, "{} {} 0", mesh.num_vertices(), mesh.num_faces())?;
        for v in mesh.vertices() {
            writeln!(writer, "{} {} {}", v[0], v[1], v[2])?;
        }
        for f in mesh.faces() {
            writeln!(writer, "3 {} {} {}", f[0], f[1], f[2])?;
        }
        Ok(())
    }
}
