//! Periodic-domain handling for surfaces in a wrapped simulation box.
//!
//! This module provides:
//! - [`PeriodicBox`], the axis-aligned fundamental domain and coordinate wrapping.
//! - [`PeriodicTriMesh`], which unwraps the output of a periodic triangulation
//!   (9-sheeted covering) into a finite, non-periodic mesh.
//!
//! Faces of the covering are classified by how many corners lie in the
//! fundamental domain (offset `(0, 0)`). Faces with no such corner are ghost
//! copies and are dropped, faces with three are kept as-is, and the rest are
//! rewritten so that each out-of-domain corner points at a duplicate vertex
//! appended after the original ones. Duplicates are keyed by
//! `(original vertex, offset)`, so each periodic image is created once.

use crate::geometry::metrics::Vec3;
use crate::mesh_error::MeshSurferError;
use crate::topology::cache::InvalidateCache;
use crate::topology::trimesh::{Dimension, Face, TriMesh};
use std::collections::BTreeMap;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Axis-aligned periodic box `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PeriodicBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl PeriodicBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Parse a box from `dim` values (max corner, origin at zero) or `2·dim`
    /// values (min corner followed by max corner).
    pub fn from_values(values: &[f64], dim: Dimension) -> Result<Self, MeshSurferError> {
        let d = dim.get() as usize;
        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        if values.len() == d {
            max[..d].copy_from_slice(values);
        } else if values.len() == 2 * d {
            min[..d].copy_from_slice(&values[..d]);
            max[..d].copy_from_slice(&values[d..]);
        } else {
            return Err(MeshSurferError::InvalidBoundingBox {
                count: values.len(),
                dim: dim.get(),
            });
        }
        Ok(Self { min, max })
    }

    /// Box width along each axis.
    #[inline]
    pub fn extent(&self) -> Vec3 {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Shift `p` by one box width along each of the first `axes` axes if it
    /// lies outside. Points further than one width away stay outside.
    #[inline]
    pub fn wrap(&self, p: &mut Vec3, axes: usize) {
        let w = self.extent();
        for d in 0..axes.min(3) {
            if p[d] < self.min[d] {
                p[d] += w[d];
            }
            if p[d] >= self.max[d] {
                p[d] -= w[d];
            }
        }
    }
}

/// One face of a periodic triangulation.
///
/// `offsets[c]` is the raw sheet of corner `c` along the two periodic axes, as
/// reported by a 9-sheeted covering: `0` is the fundamental domain, `1` the
/// next box, `2` the previous one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodicFace {
    pub vertices: Face,
    pub offsets: [[u8; 2]; 3],
}

impl PeriodicFace {
    /// A face whose corners all lie in the fundamental domain.
    pub fn interior(vertices: Face) -> Self {
        Self {
            vertices,
            offsets: [[0; 2]; 3],
        }
    }
}

/// Raw output of a periodic triangulation service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PeriodicTriangulation {
    pub faces: Vec<PeriodicFace>,
}

/// Key identifying one periodic image of an original vertex.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct DuplicateVertex {
    pub original: usize,
    /// Box offsets along axes 0 and 1, each in `{-1, 0, 1}`.
    pub offset: [i8; 2],
}

/// Map a raw covering sheet to a signed box offset.
#[inline]
pub fn normalize_offset(raw: u8) -> Option<i8> {
    match raw {
        0 => Some(0),
        1 => Some(1),
        2 => Some(-1),
        _ => None,
    }
}

/// Face counts produced by [`PeriodicTriMesh::reconstruct`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconstructionSummary {
    pub interior_faces: usize,
    pub periodic_faces: usize,
    pub discarded_faces: usize,
    pub duplicate_vertices: usize,
}

/// Positions of the duplicate vertices: each original translated by its offset
/// times the box extent. Empty when there is nothing to synthesize.
pub fn duplicate_positions(
    originals: &[Vec3],
    duplicates: &[DuplicateVertex],
    bbox: Option<&PeriodicBox>,
) -> Vec<Vec3> {
    let Some(bbox) = bbox else {
        return Vec::new();
    };
    if originals.is_empty() || duplicates.is_empty() {
        return Vec::new();
    }
    let w = bbox.extent();
    duplicates
        .iter()
        .map(|dup| {
            let mut p = originals[dup.original];
            for axis in 0..2 {
                if dup.offset[axis] != 0 {
                    p[axis] += f64::from(dup.offset[axis]) * w[axis];
                }
            }
            p
        })
        .collect()
}

/// A triangle mesh living in a periodic box.
///
/// After [`reconstruct`](Self::reconstruct) the wrapped mesh holds the
/// original vertices followed by the duplicate vertices, and the interior
/// faces followed by the trimmed faces.
#[derive(Clone, Debug)]
pub struct PeriodicTriMesh {
    mesh: TriMesh,
    bbox: Option<PeriodicBox>,
    original_count: usize,
    periodic_faces: Vec<Face>,
    trimmed_faces: Vec<Face>,
    duplicates: Vec<DuplicateVertex>,
}

impl PeriodicTriMesh {
    pub fn new(dim: u8) -> Result<Self, MeshSurferError> {
        Ok(Self::from_mesh(TriMesh::new(dim)?))
    }

    pub fn from_mesh(mesh: TriMesh) -> Self {
        Self {
            original_count: mesh.num_vertices(),
            mesh,
            bbox: None,
            periodic_faces: Vec::new(),
            trimmed_faces: Vec::new(),
            duplicates: Vec::new(),
        }
    }

    #[inline]
    pub fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    pub fn into_mesh(self) -> TriMesh {
        self.mesh
    }

    /// Mutable access for derived attributes that are cached as fields
    /// (e.g. [`TriMesh::point_areas`]).
    pub fn point_areas(&mut self) -> &[f64] {
        self.mesh.point_areas()
    }

    /// Replace the original vertices, dropping any previous reconstruction.
    pub fn set_vertices(&mut self, vertices: Vec<Vec3>) {
        self.duplicates.clear();
        self.periodic_faces.clear();
        self.trimmed_faces.clear();
        self.mesh.faces.clear();
        self.mesh.set_vertices(vertices);
        self.original_count = self.mesh.num_vertices();
    }

    pub fn set_bounding_box(&mut self, values: &[f64]) -> Result<(), MeshSurferError> {
        self.bbox = Some(PeriodicBox::from_values(values, self.mesh.dim)?);
        Ok(())
    }

    pub fn bounding_box(&self) -> Option<&PeriodicBox> {
        self.bbox.as_ref()
    }

    /// Number of vertices excluding synthesized duplicates.
    pub fn original_vertex_count(&self) -> usize {
        if self.duplicates.is_empty() {
            self.mesh.num_vertices()
        } else {
            self.original_count
        }
    }

    /// Raw faces that straddled the domain boundary, before trimming.
    pub fn periodic_faces(&self) -> &[Face] {
        &self.periodic_faces
    }

    /// Straddling faces rewritten onto duplicate vertices.
    pub fn trimmed_faces(&self) -> &[Face] {
        &self.trimmed_faces
    }

    /// Duplicate records; record `i` is vertex `original_vertex_count() + i`.
    pub fn duplicate_vertices(&self) -> &[DuplicateVertex] {
        &self.duplicates
    }

    /// Wrap the original vertices into the box along the first `dim` axes.
    pub fn wrap_vertices(&mut self, dim: u8) -> Result<(), MeshSurferError> {
        if dim == 0 || dim > self.mesh.dim.get() {
            return Err(MeshSurferError::InvalidWrapDimension {
                requested: dim,
                dim: self.mesh.dim.get(),
            });
        }
        let bbox = self.bbox.ok_or(MeshSurferError::BoundingBoxUnavailable)?;
        let axes = dim as usize;
        let n = self.original_vertex_count();
        let originals = &mut self.mesh.vertices[..n];

        #[cfg(feature = "rayon")]
        originals.par_iter_mut().for_each(|p| bbox.wrap(p, axes));
        #[cfg(not(feature = "rayon"))]
        originals.iter_mut().for_each(|p| bbox.wrap(p, axes));

        self.mesh.invalidate_cache();
        Ok(())
    }

    fn reset_reconstruction(&mut self) {
        if !self.duplicates.is_empty() {
            let n = self.original_count;
            self.mesh.vertices.truncate(n);
            for values in self.mesh.fields.values_mut() {
                values.truncate(n);
            }
            self.duplicates.clear();
        }
        self.original_count = self.mesh.num_vertices();
        self.periodic_faces.clear();
        self.trimmed_faces.clear();
    }

    /// Unwrap a periodic triangulation of the original vertices.
    ///
    /// Requires a bounding box. Any previous reconstruction is discarded first.
    pub fn reconstruct(
        &mut self,
        triangulation: &PeriodicTriangulation,
    ) -> Result<ReconstructionSummary, MeshSurferError> {
        let bbox = self.bbox.ok_or(MeshSurferError::BoundingBoxUnavailable)?;
        self.reset_reconstruction();
        let norig = self.original_count;

        let mut faces: Vec<Face> = Vec::new();
        let mut periodic_faces: Vec<Face> = Vec::new();
        let mut trimmed_faces: Vec<Face> = Vec::new();
        let mut duplicates: Vec<DuplicateVertex> = Vec::new();
        let mut lookup: BTreeMap<DuplicateVertex, usize> = BTreeMap::new();
        let mut discarded = 0usize;

        for (fi, pf) in triangulation.faces.iter().enumerate() {
            if let Some(&vertex) = pf.vertices.iter().find(|&&v| v >= norig) {
                return Err(MeshSurferError::VertexOutOfRange {
                    face: fi,
                    vertex,
                    num_vertices: norig,
                });
            }
            let mut offsets = [[0i8; 2]; 3];
            for (corner, raw) in pf.offsets.iter().enumerate() {
                for axis in 0..2 {
                    offsets[corner][axis] = normalize_offset(raw[axis]).ok_or(
                        MeshSurferError::InvalidPeriodicOffset {
                            face: fi,
                            offset: raw[axis],
                        },
                    )?;
                }
            }

            match offsets.iter().filter(|o| **o == [0, 0]).count() {
                // entirely inside a ghost copy
                0 => discarded += 1,
                3 => faces.push(pf.vertices),
                _ => {
                    periodic_faces.push(pf.vertices);
                    let mut face = pf.vertices;
                    for corner in 0..3 {
                        if offsets[corner] == [0, 0] {
                            continue;
                        }
                        let key = DuplicateVertex {
                            original: face[corner],
                            offset: offsets[corner],
                        };
                        face[corner] = *lookup.entry(key).or_insert_with(|| {
                            duplicates.push(key);
                            norig + duplicates.len() - 1
                        });
                    }
                    trimmed_faces.push(face);
                }
            }
        }

        let summary = ReconstructionSummary {
            interior_faces: faces.len(),
            periodic_faces: periodic_faces.len(),
            discarded_faces: discarded,
            duplicate_vertices: duplicates.len(),
        };
        log::debug!(
            "periodic reconstruction: [{}, {}, {}] faces, {} discarded, {} duplicated vertices",
            summary.interior_faces,
            summary.periodic_faces,
            trimmed_faces.len(),
            summary.discarded_faces,
            summary.duplicate_vertices
        );

        let positions = duplicate_positions(&self.mesh.vertices[..norig], &duplicates, Some(&bbox));
        self.mesh.vertices.extend(positions);
        // duplicates inherit the field values of their originals
        for values in self.mesh.fields.values_mut() {
            let inherited: Vec<f64> = duplicates.iter().map(|d| values[d.original]).collect();
            values.extend(inherited);
        }

        faces.extend_from_slice(&trimmed_faces);
        self.mesh.faces = faces;
        self.periodic_faces = periodic_faces;
        self.trimmed_faces = trimmed_faces;
        self.duplicates = duplicates;
        self.mesh.invalidate_cache();
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_from_two_or_four_values_in_2d() {
        let b = PeriodicBox::from_values(&[2.0, 3.0], Dimension::Two).unwrap();
        assert_eq!(b.min, [0.0; 3]);
        assert_eq!(b.max, [2.0, 3.0, 0.0]);

        let b = PeriodicBox::from_values(&[-1.0, -1.0, 1.0, 2.0], Dimension::Two).unwrap();
        assert_eq!(b.min, [-1.0, -1.0, 0.0]);
        assert_eq!(b.extent(), [2.0, 3.0, 0.0]);
    }

    #[test]
    fn box_value_count_checked() {
        let err = PeriodicBox::from_values(&[1.0, 2.0, 3.0], Dimension::Two).unwrap_err();
        assert_eq!(err, MeshSurferError::InvalidBoundingBox { count: 3, dim: 2 });
        assert!(PeriodicBox::from_values(&[1.0; 6], Dimension::Three).is_ok());
        assert!(PeriodicBox::from_values(&[1.0; 4], Dimension::Three).is_err());
    }

    #[test]
    fn wrap_is_single_step() {
        let b = PeriodicBox::new([0.0; 3], [1.0, 1.0, 1.0]);
        let mut p = [-0.25, 1.0, 0.5];
        b.wrap(&mut p, 2);
        assert_eq!(p, [0.75, 0.0, 0.5]);
        let mut far = [2.5, 0.5, 0.5];
        b.wrap(&mut far, 1);
        assert_eq!(far[0], 1.5);
    }

    #[test]
    fn offsets_normalize() {
        assert_eq!(normalize_offset(0), Some(0));
        assert_eq!(normalize_offset(1), Some(1));
        assert_eq!(normalize_offset(2), Some(-1));
        assert_eq!(normalize_offset(3), None);
    }

    #[test]
    fn wrap_requires_box_and_valid_dim() {
        let mut pm = PeriodicTriMesh::new(2).unwrap();
        assert_eq!(
            pm.wrap_vertices(1).unwrap_err(),
            MeshSurferError::BoundingBoxUnavailable
        );
        pm.set_bounding_box(&[1.0, 1.0]).unwrap();
        assert_eq!(
            pm.wrap_vertices(3).unwrap_err(),
            MeshSurferError::InvalidWrapDimension {
                requested: 3,
                dim: 2
            }
        );
        assert!(pm.wrap_vertices(0).is_err());
        assert!(pm.wrap_vertices(2).is_ok());
    }

    #[test]
    fn duplicate_positions_noop_cases() {
        let dup = [DuplicateVertex {
            original: 0,
            offset: [1, 0],
        }];
        let b = PeriodicBox::new([0.0; 3], [1.0; 3]);
        assert!(duplicate_positions(&[[0.0; 3]], &dup, None).is_empty());
        assert!(duplicate_positions(&[], &dup, Some(&b)).is_empty());
        assert!(duplicate_positions(&[[0.0; 3]], &[], Some(&b)).is_empty());
        assert_eq!(
            duplicate_positions(&[[0.5, 0.5, 0.0]], &dup, Some(&b)),
            vec![[1.5, 0.5, 0.0]]
        );
    }

    #[test]
    fn reconstruct_rejects_bad_offsets() {
        let mut pm = PeriodicTriMesh::from_mesh(
            TriMesh::from_parts(2, vec![[0.1, 0.1, 0.0]; 3], vec![]).unwrap(),
        );
        pm.set_bounding_box(&[1.0, 1.0]).unwrap();
        let tri = PeriodicTriangulation {
            faces: vec![PeriodicFace {
                vertices: [0, 1, 2],
                offsets: [[0, 0], [3, 0], [0, 0]],
            }],
        };
        assert_eq!(
            pm.reconstruct(&tri).unwrap_err(),
            MeshSurferError::InvalidPeriodicOffset { face: 0, offset: 3 }
        );
    }
}
