//! Operations backed by external geometry services.
//!
//! Triangulation, closest-point search and parameterization solvers are
//! supplied by the caller through the traits defined here; the crate only
//! validates and post-processes their output.

pub mod parameterize;
pub mod projection;
pub mod triangulation;
