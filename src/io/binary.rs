//! Streaming binary token format.
//!
//! Layout (all multi-byte values little-endian):
//!
//! ```text
//! header : index_size:u32 scalar_size:u32 1:u32 1:u32 1:u32
//! per face, in face order:
//!   for each corner first referenced by this face:
//!     'v' index x y z field_0 .. field_k      (fields in name order)
//!   'e' c0 c1   'e' c1 c2   'e' c2 c0         (directed, never deduplicated)
//!   for each corner whose last incident face this is:
//!     'f' index
//! ```
//!
//! A reader can finalize a vertex's fan as soon as its `'f'` token arrives,
//! without holding the whole mesh in memory.

use crate::io::MeshWriter;
use crate::mesh_error::MeshSurferError;
use crate::topology::trimesh::TriMesh;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::Write;

pub const TOKEN_VERTEX: u8 = b'v';
pub const TOKEN_EDGE: u8 = b'e';
pub const TOKEN_FINAL: u8 = b'f';

/// Reserved dimension words written after the sizes.
pub const DUMMY_DIMENSIONS: [u32; 3] = [1, 1, 1];

/// Width of vertex indices on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum IndexWidth {
    #[default]
    U32,
    U64,
}

impl IndexWidth {
    #[inline]
    pub fn size(self) -> u32 {
        match self {
            IndexWidth::U32 => 4,
            IndexWidth::U64 => 8,
        }
    }
}

/// Width of positions and field values on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScalarWidth {
    #[default]
    F32,
    F64,
}

impl ScalarWidth {
    #[inline]
    pub fn size(self) -> u32 {
        match self {
            ScalarWidth::F32 => 4,
            ScalarWidth::F64 => 8,
        }
    }
}

/// Encoding options. The default (`u32` indices, `f32` scalars) matches the
/// layout expected by existing consumers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BinaryOptions {
    pub index_width: IndexWidth,
    pub scalar_width: ScalarWidth,
}

/// Writer for the streaming binary format.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryWriter {
    pub options: BinaryOptions,
}

impl BinaryWriter {
    pub fn new(options: BinaryOptions) -> Self {
        Self { options }
    }

    fn put_index(&self, buf: &mut BytesMut, index: usize) {
        match self.options.index_width {
            IndexWidth::U32 => buf.put_u32_le(index as u32),
            IndexWidth::U64 => buf.put_u64_le(index as u64),
        }
    }

    fn put_scalar(&self, buf: &mut BytesMut, value: f64) {
        match self.options.scalar_width {
            ScalarWidth::F32 => buf.put_f32_le(value as f32),
            ScalarWidth::F64 => buf.put_f64_le(value),
        }
    }

    /// Encode the whole mesh into one buffer.
    pub fn encode(&self, mesh: &TriMesh) -> Result<Bytes, MeshSurferError> {
        let nv = mesh.num_vertices();
        if self.options.index_width == IndexWidth::U32 && nv > u32::MAX as usize {
            return Err(MeshSurferError::MeshIoParse(format!(
                "{nv} vertices do not fit 32-bit indices"
            )));
        }
        let faces = mesh.faces();
        let fields: Vec<&[f64]> = mesh.fields().iter().map(|(_, values)| values).collect();

        // remaining incident faces and first referencing face of each vertex
        let mut remaining = vec![0u32; nv];
        let mut first = vec![usize::MAX; nv];
        for (fi, f) in faces.iter().enumerate() {
            for &v in f {
                remaining[v] += 1;
                first[v] = first[v].min(fi);
            }
        }

        let mut buf = BytesMut::new();
        buf.put_u32_le(self.options.index_width.size());
        buf.put_u32_le(self.options.scalar_width.size());
        for d in DUMMY_DIMENSIONS {
            buf.put_u32_le(d);
        }

        for (fi, face) in faces.iter().enumerate() {
            for &v in face {
                if first[v] == fi {
                    buf.put_u8(TOKEN_VERTEX);
                    self.put_index(&mut buf, v);
                    for x in mesh.vertices()[v] {
                        self.put_scalar(&mut buf, x);
                    }
                    for values in &fields {
                        self.put_scalar(&mut buf, values[v]);
                    }
                }
            }

            for k in 0..3 {
                buf.put_u8(TOKEN_EDGE);
                self.put_index(&mut buf, face[k]);
                self.put_index(&mut buf, face[(k + 1) % 3]);
            }

            for &v in face {
                remaining[v] -= 1;
                if remaining[v] == 0 {
                    buf.put_u8(TOKEN_FINAL);
                    self.put_index(&mut buf, v);
                }
            }
        }
        Ok(buf.freeze())
    }
}

impl MeshWriter for BinaryWriter {
    fn write<W: Write>(&self, mut writer: W, mesh: &TriMesh) -> Result<(), MeshSurferError> {
        let bytes = self.encode(mesh)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        log::info!(
            "wrote {} vertices, {} faces, and {} fields [{}]",
            mesh.num_vertices(),
            mesh.num_faces(),
            mesh.fields().len(),
            mesh.fields().names().collect::<Vec<_>>().join(", ")
        );
        Ok(())
    }
}

/// Decoded stream header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinaryHeader {
    pub index_size: u32,
    pub scalar_size: u32,
    pub dimensions: [u32; 3],
}

/// One decoded token.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Vertex {
        index: usize,
        position: [f64; 3],
        fields: Vec<f64>,
    },
    Edge([usize; 2]),
    Final(usize),
}

fn need(buf: &[u8], n: usize, what: &str) -> Result<(), MeshSurferError> {
    if buf.remaining() < n {
        return Err(MeshSurferError::MeshIoParse(format!(
            "truncated stream while reading {what}: need {n} bytes, {} left",
            buf.remaining()
        )));
    }
    Ok(())
}

fn get_index(buf: &mut &[u8], size: u32) -> Result<usize, MeshSurferError> {
    need(buf, size as usize, "index")?;
    Ok(match size {
        4 => buf.get_u32_le() as usize,
        _ => buf.get_u64_le() as usize,
    })
}

fn get_scalar(buf: &mut &[u8], size: u32) -> Result<f64, MeshSurferError> {
    need(buf, size as usize, "scalar")?;
    Ok(match size {
        4 => f64::from(buf.get_f32_le()),
        _ => buf.get_f64_le(),
    })
}

/// Decode a complete stream. `field_count` must match the number of fields
/// the writer emitted, since the format does not record it.
pub fn decode_tokens(
    mut buf: &[u8],
    field_count: usize,
) -> Result<(BinaryHeader, Vec<Token>), MeshSurferError> {
    need(buf, 20, "header")?;
    let index_size = buf.get_u32_le();
    let scalar_size = buf.get_u32_le();
    let dimensions = [buf.get_u32_le(), buf.get_u32_le(), buf.get_u32_le()];
    if !matches!(index_size, 4 | 8) || !matches!(scalar_size, 4 | 8) {
        return Err(MeshSurferError::MeshIoParse(format!(
            "unsupported sizes: index {index_size}, scalar {scalar_size}"
        )));
    }
    let header = BinaryHeader {
        index_size,
        scalar_size,
        dimensions,
    };

    let mut tokens = Vec::new();
    while buf.has_remaining() {
        let token = match buf.get_u8() {
            TOKEN_VERTEX => {
                let index = get_index(&mut buf, index_size)?;
                let mut position = [0.0; 3];
                for x in &mut position {
                    *x = get_scalar(&mut buf, scalar_size)?;
                }
                let fields = (0..field_count)
                    .map(|_| get_scalar(&mut buf, scalar_size))
                    .collect::<Result<Vec<_>, _>>()?;
                Token::Vertex {
                    index,
                    position,
                    fields,
                }
            }
            TOKEN_EDGE => {
                let a = get_index(&mut buf, index_size)?;
                let b = get_index(&mut buf, index_size)?;
                Token::Edge([a, b])
            }
            TOKEN_FINAL => Token::Final(get_index(&mut buf, index_size)?),
            other => {
                return Err(MeshSurferError::MeshIoParse(format!(
                    "unknown token byte {other:#04x}"
                )));
            }
        };
        tokens.push(token);
    }
    Ok((header, tokens))
}
