//! Planar parameterization of open surfaces.
//!
//! The interior solve is delegated to a [`Parameterizer`]. Border vertices are
//! not mapped to a unit square or circle: each one is pinned to its own
//! `(x, y)` projection, so the parameterized patch keeps the footprint of the
//! membrane in the simulation box.

use crate::mesh_error::MeshSurferError;
use crate::topology::trimesh::TriMesh;

/// Minimum number of boundary edges a border mapping needs.
pub const MIN_BORDER_EDGES: usize = 4;

/// A border vertex fixed to a uv position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderPin {
    pub vertex: usize,
    pub uv: [f64; 2],
}

/// Discrete surface parameterization with a fixed border.
pub trait Parameterizer {
    /// Return one uv coordinate per mesh vertex. Pinned vertices must keep
    /// their pinned position.
    fn parameterize(
        &self,
        mesh: &TriMesh,
        border: &[BorderPin],
    ) -> Result<Vec<[f64; 2]>, MeshSurferError>;
}

impl TriMesh {
    /// Every vertex projected onto the xy plane.
    pub fn parameterize_xy(&self) -> Vec<[f64; 2]> {
        self.vertices.iter().map(|v| [v[0], v[1]]).collect()
    }

    /// Pin each boundary vertex to its `(x, y)`, in boundary order.
    pub fn xy_border(&self) -> Result<Vec<BorderPin>, MeshSurferError> {
        let boundary = self.boundary();
        if boundary.len() < MIN_BORDER_EDGES {
            return Err(MeshSurferError::BorderTooShort(boundary.len()));
        }
        Ok(boundary
            .edges
            .iter()
            .map(|e| {
                let v = self.vertices[e[0]];
                BorderPin {
                    vertex: e[0],
                    uv: [v[0], v[1]],
                }
            })
            .collect())
    }

    /// Parameterize the surface with its border pinned to the xy projection.
    pub fn parameterize<P: Parameterizer + ?Sized>(
        &self,
        parameterizer: &P,
    ) -> Result<Vec<[f64; 2]>, MeshSurferError> {
        let border = self.xy_border()?;
        log::debug!(
            "parameterizing {} vertices with {} border pins",
            self.num_vertices(),
            border.len()
        );
        let uv = parameterizer.parameterize(self, &border)?;
        if uv.len() != self.num_vertices() {
            return Err(MeshSurferError::ServiceFailure(format!(
                "parameterizer returned {} coordinates for {} vertices",
                uv.len(),
                self.num_vertices()
            )));
        }
        Ok(uv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Places interior vertices at the average of the pins.
    struct Centroid;

    impl Parameterizer for Centroid {
        fn parameterize(
            &self,
            mesh: &TriMesh,
            border: &[BorderPin],
        ) -> Result<Vec<[f64; 2]>, MeshSurferError> {
            let n = border.len() as f64;
            let c = border
                .iter()
                .fold([0.0, 0.0], |acc, p| [acc[0] + p.uv[0] / n, acc[1] + p.uv[1] / n]);
            let mut uv = vec![c; mesh.num_vertices()];
            for pin in border {
                uv[pin.vertex] = pin.uv;
            }
            Ok(uv)
        }
    }

    fn fan() -> TriMesh {
        // centre vertex 4 surrounded by a square
        TriMesh::from_parts(
            3,
            vec![
                [0.0, 0.0, 0.1],
                [2.0, 0.0, 0.2],
                [2.0, 2.0, 0.3],
                [0.0, 2.0, 0.4],
                [1.0, 1.0, 1.0],
            ],
            vec![[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]],
        )
        .unwrap()
    }

    #[test]
    fn xy_projection_drops_z() {
        assert_eq!(fan().parameterize_xy()[4], [1.0, 1.0]);
    }

    #[test]
    fn border_pins_follow_boundary() {
        let mesh = fan();
        let border = mesh.xy_border().unwrap();
        assert_eq!(border.len(), 4);
        assert!(border.iter().all(|p| p.vertex != 4));
        let uv = mesh.parameterize(&Centroid).unwrap();
        assert_eq!(uv[4], [1.0, 1.0]);
        assert_eq!(uv[2], [2.0, 2.0]);
    }

    #[test]
    fn short_border_rejected() {
        let mesh = TriMesh::from_parts(3, vec![[0.0; 3]; 3], vec![[0, 1, 2]]).unwrap();
        assert_eq!(
            mesh.xy_border().unwrap_err(),
            MeshSurferError::BorderTooShort(3)
        );
    }
}
