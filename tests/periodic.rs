mod util;
use mesh_surfer::prelude::*;
use util::*;

fn unit_square_points() -> PeriodicTriMesh {
    let mesh = TriMesh::from_parts(
        2,
        vec![
            [0.1, 0.1, 0.0],
            [0.9, 0.1, 0.0],
            [0.9, 0.9, 0.0],
            [0.1, 0.9, 0.0],
        ],
        vec![],
    )
    .unwrap();
    let mut pm = PeriodicTriMesh::from_mesh(mesh);
    pm.set_bounding_box(&[1.0, 1.0]).unwrap();
    pm
}

fn covering() -> PeriodicTriangulation {
    PeriodicTriangulation {
        faces: vec![
            PeriodicFace::interior([0, 1, 2]),
            PeriodicFace::interior([0, 2, 3]),
            PeriodicFace {
                vertices: [1, 0, 2],
                offsets: [[0, 0], [1, 0], [0, 0]],
            },
            // ghost copy in the next box
            PeriodicFace {
                vertices: [0, 1, 2],
                offsets: [[1, 0], [1, 0], [1, 0]],
            },
        ],
    }
}

#[test]
fn unwraps_straddling_face_onto_duplicate() {
    let mut pm = unit_square_points();
    let summary = pm.reconstruct(&covering()).unwrap();
    assert_eq!(summary.interior_faces, 2);
    assert_eq!(summary.periodic_faces, 1);
    assert_eq!(summary.discarded_faces, 1);
    assert_eq!(summary.duplicate_vertices, 1);

    let mesh = pm.mesh();
    assert_eq!(mesh.num_vertices(), 5);
    let dup = mesh.vertices()[4];
    assert!(approx(dup[0], 1.1, 1e-12) && approx(dup[1], 0.1, 1e-12) && dup[2] == 0.0);
    assert_eq!(mesh.faces(), &[[0, 1, 2], [0, 2, 3], [1, 4, 2]]);

    assert_eq!(pm.original_vertex_count(), 4);
    assert_eq!(pm.periodic_faces(), &[[1, 0, 2]]);
    assert_eq!(pm.trimmed_faces(), &[[1, 4, 2]]);
    assert_eq!(
        pm.duplicate_vertices(),
        &[DuplicateVertex {
            original: 0,
            offset: [1, 0]
        }]
    );
}

#[test]
fn duplicates_are_shared_and_signed() {
    let mut pm = unit_square_points();
    let tri = PeriodicTriangulation {
        faces: vec![
            PeriodicFace {
                vertices: [0, 1, 3],
                offsets: [[0, 0], [2, 0], [0, 0]],
            },
            PeriodicFace {
                vertices: [1, 2, 3],
                offsets: [[2, 0], [2, 0], [0, 0]],
            },
        ],
    };
    pm.reconstruct(&tri).unwrap();
    // vertex 1 at offset (-1, 0) is created once and reused
    assert_eq!(pm.duplicate_vertices().len(), 2);
    assert_eq!(pm.mesh().faces(), &[[0, 4, 3], [4, 5, 3]]);
    let n = pm.mesh().num_vertices();
    assert!(pm.mesh().faces().iter().flatten().all(|&v| v < n));
    let mut keys = pm.duplicate_vertices().to_vec();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 2);
    let v = pm.mesh().vertices();
    assert!(approx(v[4][0], -0.1, 1e-12));
    assert!(approx(v[5][0], -0.1, 1e-12) && approx(v[5][1], 0.9, 1e-12));
}

#[test]
fn duplicates_inherit_fields_and_rerun_is_stable() {
    let mut pm = unit_square_points();
    let mut mesh = pm.clone().into_mesh();
    mesh.add_field("thickness", vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let mut pm2 = PeriodicTriMesh::from_mesh(mesh);
    pm2.set_bounding_box(&[1.0, 1.0]).unwrap();

    pm2.reconstruct(&covering()).unwrap();
    assert_eq!(
        pm2.mesh().field("thickness").unwrap(),
        &[1.0, 2.0, 3.0, 4.0, 1.0]
    );

    // a second pass starts again from the original vertices
    pm2.reconstruct(&covering()).unwrap();
    assert_eq!(pm2.mesh().num_vertices(), 5);
    assert_eq!(pm2.mesh().field("thickness").unwrap().len(), 5);

    pm.reconstruct(&PeriodicTriangulation::default()).unwrap();
    assert_eq!(pm.mesh().num_faces(), 0);
    assert_eq!(pm.original_vertex_count(), 4);
}

#[test]
fn reconstruct_requires_bounding_box() {
    let mut pm = PeriodicTriMesh::new(2).unwrap();
    assert_eq!(
        pm.reconstruct(&covering()).unwrap_err(),
        MeshSurferError::BoundingBoxUnavailable
    );
}

#[test]
fn reconstruct_rejects_unknown_vertices() {
    let mut pm = unit_square_points();
    let tri = PeriodicTriangulation {
        faces: vec![PeriodicFace::interior([0, 1, 9])],
    };
    assert!(matches!(
        pm.reconstruct(&tri).unwrap_err(),
        MeshSurferError::VertexOutOfRange { vertex: 9, .. }
    ));
}

#[test]
fn reconstructed_mesh_has_open_boundary() {
    let mut pm = unit_square_points();
    pm.reconstruct(&covering()).unwrap();
    let total: f64 = pm.point_areas().iter().sum();
    // square 0.64 plus the sliver 0.5 * 0.2 * 0.8
    assert!(approx(total, 0.64 + 0.08, 1e-12));
    assert!(pm.mesh().boundary().chained);
}

#[test]
fn wrapping_moves_only_original_vertices() {
    let mesh = TriMesh::from_parts(
        2,
        vec![[1.5, -0.25, 0.0], [0.5, 0.5, 0.0]],
        vec![],
    )
    .unwrap();
    let mut pm = PeriodicTriMesh::from_mesh(mesh);
    pm.set_bounding_box(&[0.0, 0.0, 1.0, 1.0]).unwrap();
    pm.wrap_vertices(1).unwrap();
    assert_eq!(pm.mesh().vertices()[0], [0.5, -0.25, 0.0]);
    pm.wrap_vertices(2).unwrap();
    assert_eq!(pm.mesh().vertices()[0], [0.5, 0.75, 0.0]);
    assert_eq!(pm.mesh().vertices()[1], [0.5, 0.5, 0.0]);
}
