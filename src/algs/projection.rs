//! Projection of points onto a 3D surface.
//!
//! The closest-triangle search is an external capability; this module turns
//! its answer into a face id plus barycentric coordinates.

use crate::geometry::metrics::{Vec3, point_to_barycentric};
use crate::mesh_error::MeshSurferError;
use crate::topology::trimesh::{Dimension, TriMesh};

/// Closest-point query against a triangle soup.
pub trait NearestSurfacePoint {
    /// For each query, the index of the closest triangle and the closest point
    /// on it.
    fn closest(
        &self,
        triangles: &[[Vec3; 3]],
        queries: &[Vec3],
    ) -> Result<Vec<(usize, Vec3)>, MeshSurferError>;
}

/// Location of a projected point on the mesh surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceProjection {
    pub face: usize,
    pub barycentric: Vec3,
}

impl TriMesh {
    /// Project `points` (three coordinates per point) onto the surface.
    pub fn project_on_surface<Q: NearestSurfacePoint + ?Sized>(
        &self,
        points: &[f64],
        query: &Q,
    ) -> Result<Vec<SurfaceProjection>, MeshSurferError> {
        if self.dim != Dimension::Three {
            return Err(MeshSurferError::UnsupportedDimension {
                operation: "project_on_surface",
                required: 3,
                found: self.dim.get(),
            });
        }
        if points.len() % 3 != 0 {
            return Err(MeshSurferError::InvalidBufferLength {
                what: "query point",
                len: points.len(),
                stride: 3,
            });
        }
        log::debug!("projecting {} points on the surface", points.len() / 3);

        let triangles: Vec<[Vec3; 3]> = self
            .faces
            .iter()
            .map(|f| [self.vertices[f[0]], self.vertices[f[1]], self.vertices[f[2]]])
            .collect();
        let queries: Vec<Vec3> = points.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();

        let hits = query.closest(&triangles, &queries)?;
        if hits.len() != queries.len() {
            return Err(MeshSurferError::ServiceFailure(format!(
                "expected {} closest points, got {}",
                queries.len(),
                hits.len()
            )));
        }
        hits.into_iter()
            .map(|(face, p)| -> Result<SurfaceProjection, MeshSurferError> {
                let [a, b, c] = triangles.get(face).copied().ok_or_else(|| {
                    MeshSurferError::ServiceFailure(format!("closest face {face} out of range"))
                })?;
                Ok(SurfaceProjection {
                    face,
                    barycentric: point_to_barycentric(p, a, b, c),
                })
            })
            .collect()
    }
}
