#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-surfer
//!
//! mesh-surfer builds and analyzes triangle meshes of membrane surfaces sampled
//! from molecular simulations. It stores vertices, faces and named per-vertex
//! scalar fields, derives connectivity and differential attributes on demand,
//! and handles the periodic images produced by triangulating inside a
//! periodic simulation box.
//!
//! ## Features
//! - Lazily cached connectivity: vertex neighbors, incident faces, across-edge
//!   table and an ordered boundary
//! - Vertex and face normals, corner (Voronoi) areas and point areas
//! - Periodic reconstruction: wrap vertices into the box, then rebuild a
//!   conforming mesh with duplicate vertices for faces that cross the box
//! - Pluggable geometry services (Delaunay, closest point, parameterization)
//!   supplied through traits
//! - A streaming binary token format and ASCII OFF files
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! mesh-surfer = "0.1"
//! # Optional features:
//! # features = ["rayon"]
//! ```
//!
//! With the `rayon` feature, normal accumulation runs in parallel.

pub mod algs;
pub mod data;
pub mod geometry;
pub mod io;
pub mod mesh_error;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::parameterize::{BorderPin, Parameterizer};
    pub use crate::algs::projection::{NearestSurfacePoint, SurfaceProjection};
    pub use crate::algs::triangulation::{PeriodicTriangulator, PlanarTriangulator};
    pub use crate::data::fields::{FieldSet, POINT_AREAS_FIELD};
    pub use crate::geometry::attributes::Normals;
    pub use crate::io::binary::{BinaryOptions, BinaryWriter, IndexWidth, ScalarWidth};
    pub use crate::io::off::{OffReader, OffWriter};
    pub use crate::io::{MeshReader, MeshWriter};
    pub use crate::mesh_error::MeshSurferError;
    pub use crate::topology::cache::InvalidateCache;
    pub use crate::topology::connectivity::Boundary;
    pub use crate::topology::periodic::{
        DuplicateVertex, PeriodicBox, PeriodicFace, PeriodicTriMesh, PeriodicTriangulation,
    };
    pub use crate::topology::trimesh::{Dimension, Face, TriMesh};
}
