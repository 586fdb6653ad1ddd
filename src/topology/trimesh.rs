//! Triangle mesh store: flat vertex/face arrays plus named scalar fields.
//!
//! Vertices are always stored as `[f64; 3]`; for 2D meshes the third
//! coordinate is kept at zero. Faces are ordered index triples and their
//! winding is significant (boundary orientation, normal sign).
//!
//! Connectivity and attribute tables are derived lazily from this store and
//! cached on the mesh, see [`crate::topology::connectivity`] and
//! [`crate::geometry::attributes`].

use crate::data::fields::{FieldSet, POINT_AREAS_FIELD};
use crate::mesh_error::MeshSurferError;
use crate::topology::cache::{DerivedCache, InvalidateCache};

/// An ordered triple of vertex indices.
pub type Face = [usize; 3];

/// Dimensionality of the mesh vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum Dimension {
    Two = 2,
    Three = 3,
}

impl Dimension {
    #[inline]
    pub fn get(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Dimension {
    type Error = MeshSurferError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Dimension::Two),
            3 => Ok(Dimension::Three),
            other => Err(MeshSurferError::InvalidDimensionality(other)),
        }
    }
}

/// Triangle mesh with cached derived structures.
#[derive(Clone, Debug)]
pub struct TriMesh {
    pub(crate) dim: Dimension,
    pub(crate) vertices: Vec<[f64; 3]>,
    pub(crate) faces: Vec<Face>,
    pub(crate) fields: FieldSet,
    pub(crate) cache: DerivedCache,
}

impl TriMesh {
    /// Create an empty mesh of the given dimensionality (2 or 3).
    pub fn new(dim: u8) -> Result<Self, MeshSurferError> {
        Ok(Self {
            dim: Dimension::try_from(dim)?,
            vertices: Vec::new(),
            faces: Vec::new(),
            fields: FieldSet::new(),
            cache: DerivedCache::default(),
        })
    }

    /// Build a mesh from vertices and faces, validating every face index.
    pub fn from_parts(
        dim: u8,
        vertices: Vec<[f64; 3]>,
        faces: Vec<Face>,
    ) -> Result<Self, MeshSurferError> {
        let mut mesh = Self::new(dim)?;
        mesh.set_vertices(vertices);
        mesh.set_faces(faces)?;
        Ok(mesh)
    }

    /// Build a mesh from flat buffers: `dim` coordinates per vertex and three
    /// indices per face.
    pub fn from_flat(dim: u8, coords: &[f64], faces: &[usize]) -> Result<Self, MeshSurferError> {
        let d = Dimension::try_from(dim)?.get() as usize;
        if coords.len() % d != 0 {
            return Err(MeshSurferError::InvalidBufferLength {
                what: "vertex",
                len: coords.len(),
                stride: d,
            });
        }
        if faces.len() % 3 != 0 {
            return Err(MeshSurferError::InvalidBufferLength {
                what: "face",
                len: faces.len(),
                stride: 3,
            });
        }
        let vertices = coords
            .chunks_exact(d)
            .map(|c| [c[0], c[1], if d == 3 { c[2] } else { 0.0 }])
            .collect();
        let faces = faces.chunks_exact(3).map(|f| [f[0], f[1], f[2]]).collect();
        Self::from_parts(dim, vertices, faces)
    }

    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    /// Change the dimensionality tag. Switching to 2D zeroes the z coordinates.
    pub fn set_dimensionality(&mut self, dim: u8) -> Result<(), MeshSurferError> {
        self.dim = Dimension::try_from(dim)?;
        if self.dim == Dimension::Two {
            for v in &mut self.vertices {
                v[2] = 0.0;
            }
        }
        self.invalidate_cache();
        Ok(())
    }

    #[inline]
    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Replace the vertex array. Fields are dropped since their length no
    /// longer matches.
    pub fn set_vertices(&mut self, mut vertices: Vec<[f64; 3]>) {
        if self.dim == Dimension::Two {
            for v in &mut vertices {
                v[2] = 0.0;
            }
        }
        self.vertices = vertices;
        self.fields.clear();
        self.invalidate_cache();
    }

    /// Replace the face array after checking every index.
    pub fn set_faces(&mut self, faces: Vec<Face>) -> Result<(), MeshSurferError> {
        validate_faces(&faces, self.vertices.len())?;
        self.faces = faces;
        self.invalidate_cache();
        Ok(())
    }

    /// Register (or replace) a named per-vertex scalar field.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), MeshSurferError> {
        self.fields.insert(name, values, self.vertices.len())
    }

    pub fn field(&self, name: &str) -> Option<&[f64]> {
        self.fields.get(name)
    }

    /// Vertex coordinates flattened to `dim` values per vertex.
    pub fn vertices_flat(&self) -> Vec<f64> {
        let d = self.dim.get() as usize;
        self.vertices
            .iter()
            .flat_map(|v| v[..d].iter().copied())
            .collect()
    }

    pub fn faces_flat(&self) -> Vec<usize> {
        self.faces.iter().flat_map(|f| f.iter().copied()).collect()
    }
}

impl InvalidateCache for TriMesh {
    fn invalidate_cache(&mut self) {
        self.cache.clear();
        self.fields.remove(POINT_AREAS_FIELD);
    }
}

pub(crate) fn validate_faces(faces: &[Face], num_vertices: usize) -> Result<(), MeshSurferError> {
    for (fi, face) in faces.iter().enumerate() {
        if let Some(&vertex) = face.iter().find(|&&v| v >= num_vertices) {
            return Err(MeshSurferError::VertexOutOfRange {
                face: fi,
                vertex,
                num_vertices,
            });
        }
    }
    Ok(())
}
