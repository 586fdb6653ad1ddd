#![allow(dead_code)]
use mesh_surfer::topology::trimesh::TriMesh;

/// `n × n` unit-cell grid in the z = 0 plane, each cell split along its
/// `(i, j) → (i+1, j+1)` diagonal, wound counter-clockwise.
pub fn grid(n: usize) -> TriMesh {
    let idx = |i: usize, j: usize| i + j * (n + 1);
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            vertices.push([i as f64, j as f64, 0.0]);
        }
    }
    let mut faces = Vec::with_capacity(2 * n * n);
    for j in 0..n {
        for i in 0..n {
            let (a, b, c, d) = (idx(i, j), idx(i + 1, j), idx(i + 1, j + 1), idx(i, j + 1));
            faces.push([a, b, c]);
            faces.push([a, c, d]);
        }
    }
    TriMesh::from_parts(3, vertices, faces).unwrap()
}

/// Outward-wound tetrahedron.
pub fn tetrahedron() -> TriMesh {
    TriMesh::from_parts(
        3,
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ],
        vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
    )
    .unwrap()
}

/// Outward-wound regular octahedron with vertices on the unit axes.
pub fn octahedron() -> TriMesh {
    TriMesh::from_parts(
        3,
        vec![
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ],
        vec![
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ],
    )
    .unwrap()
}

/// Signed area enclosed by a chain of boundary vertices (positive when CCW).
pub fn shoelace(mesh: &TriMesh, ring: &[usize]) -> f64 {
    let v = mesh.vertices();
    0.5 * ring
        .iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(&a, &b)| v[a][0] * v[b][1] - v[b][0] * v[a][1])
        .sum::<f64>()
}

pub fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}
