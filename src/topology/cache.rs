//! Cache invalidation utilities shared across mesh structures.

use crate::geometry::attributes::Normals;
use crate::topology::connectivity::Boundary;
use once_cell::sync::OnceCell;

/// Anything that caches derived topology (neighbours, across-edge tables,
/// normals, …) should implement this.
pub trait InvalidateCache {
    /// Invalidate *all* internal caches so future queries recompute correctly.
    fn invalidate_cache(&mut self);
}

// Blanket impl for Box<T>
impl<T: InvalidateCache + ?Sized> InvalidateCache for Box<T> {
    #[inline]
    fn invalidate_cache(&mut self) {
        (**self).invalidate_cache();
    }
}

/// Lazily built connectivity and attribute tables of a [`TriMesh`](crate::topology::trimesh::TriMesh).
///
/// Each slot is filled on first request and lives until [`DerivedCache::clear`].
#[derive(Clone, Debug, Default)]
pub struct DerivedCache {
    pub(crate) neighbors: OnceCell<Vec<Vec<usize>>>,
    pub(crate) adjacent_faces: OnceCell<Vec<Vec<usize>>>,
    pub(crate) across_edge: OnceCell<Vec<[Option<usize>; 3]>>,
    pub(crate) boundary: OnceCell<Boundary>,
    pub(crate) normals: OnceCell<Normals>,
}

impl DerivedCache {
    pub fn clear(&mut self) {
        self.neighbors.take();
        self.adjacent_faces.take();
        self.across_edge.take();
        self.boundary.take();
        self.normals.take();
    }

    /// `true` if nothing has been computed yet.
    pub fn is_empty(&self) -> bool {
        self.neighbors.get().is_none()
            && self.adjacent_faces.get().is_none()
            && self.across_edge.get().is_none()
            && self.boundary.get().is_none()
            && self.normals.get().is_none()
    }
}
