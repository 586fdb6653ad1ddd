//! Mesh I/O helpers.
//!
//! This module provides trait-based readers and writers for loading and
//! saving [`TriMesh`] data:
//!
//! - [`binary`]: the streaming token format used for export to analysis tools.
//! - [`off`]: plain-text OFF meshes.

pub mod binary;
pub mod off;

use crate::mesh_error::MeshSurferError;
use crate::topology::trimesh::TriMesh;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Trait for mesh readers.
pub trait MeshReader {
    /// Parse a mesh from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<TriMesh, MeshSurferError>;

    /// Parse a mesh from a file.
    fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<TriMesh, MeshSurferError> {
        let file = File::open(path.as_ref())?;
        log::debug!("reading mesh from {}", path.as_ref().display());
        self.read(BufReader::new(file))
    }
}

/// Trait for mesh writers.
pub trait MeshWriter {
    /// Write a mesh to a writer.
    fn write<W: Write>(&self, writer: W, mesh: &TriMesh) -> Result<(), MeshSurferError>;

    /// Write a mesh to a file. The file handle is released on every exit path.
    fn write_file<P: AsRef<Path>>(&self, path: P, mesh: &TriMesh) -> Result<(), MeshSurferError> {
        let file = File::create(path.as_ref())?;
        log::debug!("writing mesh to {}", path.as_ref().display());
        let mut writer = BufWriter::new(file);
        self.write(&mut writer, mesh)?;
        writer.flush()?;
        Ok(())
    }
}
