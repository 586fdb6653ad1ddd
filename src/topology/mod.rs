//! Top-level module for mesh topology.
//!
//! This module provides the triangle mesh store and everything derived from
//! its face list:
//! - [`trimesh::TriMesh`], the vertex/face/field store
//! - lazily cached connectivity tables and the ordered boundary
//! - periodic reconstruction of meshes built inside a simulation box

pub mod cache;
pub mod connectivity;
pub mod periodic;
pub mod trimesh;

pub use cache::InvalidateCache;
pub use trimesh::{Dimension, Face, TriMesh};
