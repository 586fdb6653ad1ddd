//! Derived connectivity for triangle meshes.
//!
//! All tables are built on first request and cached on the [`TriMesh`]:
//!
//! * [`TriMesh::neighbors`]: distinct vertices sharing a face with each vertex,
//! * [`TriMesh::adjacent_faces`]: faces incident on each vertex,
//! * [`TriMesh::across_edge`]: for each face and local edge `j` (the edge
//!   `f[(j+1)%3] → f[(j+2)%3]`), the face on the other side, `None` on the
//!   boundary,
//! * [`TriMesh::boundary`]: oriented boundary edges, greedily chained into
//!   loops.

use crate::topology::trimesh::{Face, TriMesh};
use itertools::Itertools;

/// Oriented boundary edges of a mesh.
///
/// Edge endpoints follow the face winding, so for a consistently wound mesh
/// the loops run counter-clockwise. `chained` is `false` when greedy chaining
/// could not link every edge; the edges are then only partially ordered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Boundary {
    pub edges: Vec<[usize; 2]>,
    pub chained: bool,
}

impl Boundary {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Split the ordered edge list into runs of consecutively linked edges.
    ///
    /// For a fully chained boundary every run is a closed loop.
    pub fn loops(&self) -> Vec<&[[usize; 2]]> {
        let mut runs = Vec::new();
        let mut start = 0;
        for (i, (a, b)) in self.edges.iter().tuple_windows().enumerate() {
            if a[1] != b[0] {
                runs.push(&self.edges[start..=i]);
                start = i + 1;
            }
        }
        if start < self.edges.len() {
            runs.push(&self.edges[start..]);
        }
        runs
    }
}

impl TriMesh {
    /// Distinct neighbouring vertices of each vertex.
    pub fn neighbors(&self) -> &[Vec<usize>] {
        self.cache.neighbors.get_or_init(|| {
            log::debug!("building vertex neighbours for {} vertices", self.num_vertices());
            build_neighbors(self.num_vertices(), &self.faces)
        })
    }

    /// Faces incident on each vertex, in face order.
    pub fn adjacent_faces(&self) -> &[Vec<usize>] {
        self.cache.adjacent_faces.get_or_init(|| {
            log::debug!("building adjacent faces for {} vertices", self.num_vertices());
            build_adjacent_faces(self.num_vertices(), &self.faces)
        })
    }

    /// Face across each local edge of each face.
    pub fn across_edge(&self) -> &[[Option<usize>; 3]] {
        self.cache.across_edge.get_or_init(|| {
            let adjacent = self.adjacent_faces();
            log::debug!("building across-edge table for {} faces", self.num_faces());
            build_across_edge(&self.faces, adjacent)
        })
    }

    /// Oriented boundary edges in best-effort chained order.
    pub fn boundary(&self) -> &Boundary {
        self.cache.boundary.get_or_init(|| {
            let across = self.across_edge();
            log::debug!("collecting boundary edges");
            build_boundary(&self.faces, across)
        })
    }

    /// Start vertex of each boundary edge, in chained order.
    pub fn boundary_vertices(&self) -> Vec<usize> {
        self.boundary().edges.iter().map(|e| e[0]).collect()
    }
}

fn incidence_counts(num_vertices: usize, faces: &[Face]) -> Vec<usize> {
    let mut counts = vec![0usize; num_vertices];
    for f in faces {
        for &v in f {
            counts[v] += 1;
        }
    }
    counts
}

pub(crate) fn build_neighbors(num_vertices: usize, faces: &[Face]) -> Vec<Vec<usize>> {
    let counts = incidence_counts(num_vertices, faces);
    // +2 slop for boundary vertices
    let mut neighbors: Vec<Vec<usize>> = counts.iter().map(|&c| Vec::with_capacity(c + 2)).collect();
    for f in faces {
        for j in 0..3 {
            let me = &mut neighbors[f[j]];
            for n in [f[(j + 1) % 3], f[(j + 2) % 3]] {
                if !me.contains(&n) {
                    me.push(n);
                }
            }
        }
    }
    neighbors
}

pub(crate) fn build_adjacent_faces(num_vertices: usize, faces: &[Face]) -> Vec<Vec<usize>> {
    let counts = incidence_counts(num_vertices, faces);
    let mut adjacent: Vec<Vec<usize>> = counts.iter().map(|&c| Vec::with_capacity(c)).collect();
    for (fi, f) in faces.iter().enumerate() {
        for &v in f {
            adjacent[v].push(fi);
        }
    }
    adjacent
}

pub(crate) fn build_across_edge(
    faces: &[Face],
    adjacent: &[Vec<usize>],
) -> Vec<[Option<usize>; 3]> {
    let mut across = vec![[None; 3]; faces.len()];
    for i in 0..faces.len() {
        for j in 0..3 {
            if across[i][j].is_some() {
                continue;
            }
            let v1 = faces[i][(j + 1) % 3];
            let v2 = faces[i][(j + 2) % 3];
            let a2 = &adjacent[v2];

            for &other in &adjacent[v1] {
                if other == i || !a2.contains(&other) {
                    continue;
                }
                let Some(k) = faces[other].iter().position(|&v| v == v1) else {
                    continue;
                };
                // the matching edge of `other` must run v2 -> v1
                let ind = (k + 1) % 3;
                if faces[other][(ind + 1) % 3] != v2 {
                    continue;
                }
                across[i][j] = Some(other);
                across[other][ind] = Some(i);
                break;
            }
        }
    }
    across
}

pub(crate) fn build_boundary(faces: &[Face], across: &[[Option<usize>; 3]]) -> Boundary {
    let mut edges: Vec<[usize; 2]> = faces
        .iter()
        .zip(across)
        .flat_map(|(f, a)| {
            (0..3)
                .filter(move |&j| a[j].is_none())
                .map(move |j| [f[(j + 1) % 3], f[(j + 2) % 3]])
        })
        .collect();

    let chained = chain_edges(&mut edges);
    Boundary { edges, chained }
}

/// Greedily reorder `edges` so that consecutive edges share an endpoint.
///
/// A run that returns to the start of the very first edge is accepted as a
/// closed loop and chaining continues with the next edge. Any other break
/// stops the reordering and returns `false`.
fn chain_edges(edges: &mut [[usize; 2]]) -> bool {
    let n = edges.len();
    for i in 0..n.saturating_sub(1) {
        let end = edges[i][1];
        if let Some(j) = (i + 1..n).find(|&j| edges[j][0] == end) {
            edges.swap(i + 1, j);
        } else if end == edges[0][0] {
            continue;
        } else {
            log::warn!(
                "could not orient boundary edges after {} of {}; returning partially ordered edges (does the boundary have multiple components?)",
                i + 1,
                n
            );
            return false;
        }
    }
    true
}
