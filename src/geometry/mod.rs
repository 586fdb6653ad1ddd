//! Geometry utilities for mesh-surfer.
//!
//! This module provides vector helpers and the per-vertex differential
//! attributes (normals, point areas) of triangle meshes.

pub mod attributes;
pub mod metrics;
