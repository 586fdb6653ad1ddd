//! Data module: per-vertex fields and accumulation helpers.

pub mod atomic;
pub mod fields;

pub use fields::FieldSet;
