//! Delaunay triangulation through pluggable services.
//!
//! The solvers themselves live outside this crate. A planar service returns
//! faces over the input point indices; a periodic service returns faces of the
//! 9-sheeted covering with per-corner sheet offsets, which
//! [`PeriodicTriMesh::reconstruct`] turns into a non-periodic mesh.

use crate::mesh_error::MeshSurferError;
use crate::topology::cache::InvalidateCache;
use crate::topology::periodic::{PeriodicBox, PeriodicTriMesh, PeriodicTriangulation};
use crate::topology::trimesh::{Dimension, Face, TriMesh, validate_faces};

/// Planar Delaunay triangulation of a point set.
pub trait PlanarTriangulator {
    fn triangulate(&self, points: &[[f64; 2]]) -> Result<Vec<Face>, MeshSurferError>;
}

/// Periodic Delaunay triangulation of a point set inside `bbox`.
pub trait PeriodicTriangulator {
    fn triangulate_periodic(
        &self,
        points: &[[f64; 2]],
        bbox: &PeriodicBox,
    ) -> Result<PeriodicTriangulation, MeshSurferError>;
}

fn require_2d(mesh: &TriMesh, operation: &'static str) -> Result<(), MeshSurferError> {
    if mesh.dimension() != Dimension::Two {
        return Err(MeshSurferError::UnsupportedDimension {
            operation,
            required: 2,
            found: mesh.dimension().get(),
        });
    }
    Ok(())
}

fn xy_points(vertices: &[[f64; 3]]) -> Vec<[f64; 2]> {
    vertices.iter().map(|v| [v[0], v[1]]).collect()
}

impl TriMesh {
    /// Replace the faces with a planar Delaunay triangulation of the vertices.
    pub fn delaunay<T: PlanarTriangulator + ?Sized>(
        &mut self,
        triangulator: &T,
    ) -> Result<&[Face], MeshSurferError> {
        require_2d(self, "delaunay")?;
        let faces = triangulator.triangulate(&xy_points(&self.vertices))?;
        validate_faces(&faces, self.vertices.len())?;
        log::debug!(
            "delaunay: created {} triangles using {} vertices",
            faces.len(),
            self.vertices.len()
        );
        self.faces = faces;
        self.invalidate_cache();
        Ok(&self.faces)
    }
}

impl PeriodicTriMesh {
    /// Wrap the vertices into the box, triangulate periodically and unwrap the
    /// result. Returns the final face set.
    pub fn delaunay<T: PeriodicTriangulator + ?Sized>(
        &mut self,
        triangulator: &T,
    ) -> Result<&[Face], MeshSurferError> {
        require_2d(self.mesh(), "periodic delaunay")?;
        self.wrap_vertices(2)?;
        let bbox = *self
            .bounding_box()
            .ok_or(MeshSurferError::BoundingBoxUnavailable)?;
        let n = self.original_vertex_count();
        let points = xy_points(&self.mesh().vertices()[..n]);
        let triangulation = triangulator.triangulate_periodic(&points, &bbox)?;
        self.reconstruct(&triangulation)?;
        Ok(self.mesh().faces())
    }
}
