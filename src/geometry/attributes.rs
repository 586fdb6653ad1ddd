//! Per-vertex differential attributes: normals and tributary (point) areas.
//!
//! Both passes iterate over faces and scatter into per-vertex accumulators.
//! With the `rayon` feature the face loop runs in parallel and the scatter uses
//! [`AtomicF64`] adds, so face order only affects rounding.

use crate::data::atomic::{self, AtomicF64};
use crate::data::fields::POINT_AREAS_FIELD;
use crate::geometry::metrics::{Vec3, cross, dot, norm, norm2, normalize, sub};
use crate::topology::trimesh::{Face, TriMesh};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Per-vertex unit normals and the unnormalized face normals they came from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Normals {
    pub vertex: Vec<Vec3>,
    pub face: Vec<Vec3>,
}

impl TriMesh {
    /// Unit normal of each vertex (zero for vertices with no valid face).
    pub fn normals(&self) -> &[Vec3] {
        &self.normal_cache().vertex
    }

    /// Unnormalized normal `(p0-p1) × (p1-p2)` of each face (zero if degenerate).
    pub fn face_normals(&self) -> &[Vec3] {
        &self.normal_cache().face
    }

    fn normal_cache(&self) -> &Normals {
        self.cache.normals.get_or_init(|| {
            log::debug!("computing normals for {} vertices", self.num_vertices());
            compute_normals(&self.vertices, &self.faces)
        })
    }

    /// Mixed Voronoi area attributed to each vertex.
    ///
    /// The result is cached as the `"point_areas"` field.
    pub fn point_areas(&mut self) -> &[f64] {
        if !self.fields.contains(POINT_AREAS_FIELD) {
            log::debug!("computing point areas for {} vertices", self.num_vertices());
            let areas = compute_point_areas(&self.vertices, &self.faces);
            let n = self.vertices.len();
            // length matches by construction
            let _ = self.fields.insert(POINT_AREAS_FIELD, areas, n);
        }
        self.fields.get(POINT_AREAS_FIELD).unwrap_or_default()
    }

    /// Share of face `face`'s area assigned to each of its corners.
    pub fn corner_areas(&self, face: usize) -> Option<Vec3> {
        let f = self.faces.get(face)?;
        Some(corner_areas(&self.vertices, f))
    }
}

pub(crate) fn compute_normals(vertices: &[Vec3], faces: &[Face]) -> Normals {
    let acc = atomic::zeroed3(vertices.len());

    let face_normal = |f: &Face| -> Vec3 {
        let (p0, p1, p2) = (vertices[f[0]], vertices[f[1]], vertices[f[2]]);
        let a = sub(p0, p1);
        let b = sub(p1, p2);
        let c = sub(p2, p0);
        let (l2a, l2b, l2c) = (norm2(a), norm2(b), norm2(c));
        if l2a == 0.0 || l2b == 0.0 || l2c == 0.0 {
            return [0.0; 3];
        }
        let n = cross(a, b);
        // inverse squared lengths of the two edges meeting at each corner
        let weights = [1.0 / (l2a * l2c), 1.0 / (l2b * l2a), 1.0 / (l2c * l2b)];
        for (corner, w) in f.iter().zip(weights) {
            for (slot, x) in acc[*corner].iter().zip(n) {
                slot.fetch_add(x * w);
            }
        }
        n
    };

    #[cfg(feature = "rayon")]
    let face: Vec<Vec3> = faces.par_iter().map(face_normal).collect();
    #[cfg(not(feature = "rayon"))]
    let face: Vec<Vec3> = faces.iter().map(face_normal).collect();

    let mut vertex: Vec<Vec3> = acc
        .into_iter()
        .map(|[x, y, z]| [x.into_inner(), y.into_inner(), z.into_inner()])
        .collect();

    #[cfg(feature = "rayon")]
    vertex.par_iter_mut().for_each(|n| *n = normalize(*n));
    #[cfg(not(feature = "rayon"))]
    vertex.iter_mut().for_each(|n| *n = normalize(*n));

    Normals { vertex, face }
}

/// Split a face's area among its corners.
///
/// Acute triangles use the Voronoi (circumcentric) split. When a corner is
/// non-acute its edge weight is non-positive; the two other corners then get
/// their quarter-diamond share and the obtuse corner takes the remainder, so
/// no corner area is negative and the three always sum to the face area.
pub(crate) fn corner_areas(vertices: &[Vec3], f: &Face) -> Vec3 {
    let e = [
        sub(vertices[f[2]], vertices[f[1]]),
        sub(vertices[f[0]], vertices[f[2]]),
        sub(vertices[f[1]], vertices[f[0]]),
    ];
    let area = 0.5 * norm(cross(e[0], e[1]));
    if area == 0.0 {
        return [0.0; 3];
    }
    let l2 = [norm2(e[0]), norm2(e[1]), norm2(e[2])];
    let ew = [
        l2[0] * (l2[1] + l2[2] - l2[0]),
        l2[1] * (l2[2] + l2[0] - l2[1]),
        l2[2] * (l2[0] + l2[1] - l2[2]),
    ];

    let mut c = [0.0; 3];
    if let Some(k) = (0..3).find(|&k| ew[k] <= 0.0) {
        let (k1, k2) = ((k + 1) % 3, (k + 2) % 3);
        c[k1] = -0.25 * l2[k2] * area / dot(e[k], e[k2]);
        c[k2] = -0.25 * l2[k1] * area / dot(e[k], e[k1]);
        c[k] = area - c[k1] - c[k2];
    } else {
        let ewscale = 0.5 * area / (ew[0] + ew[1] + ew[2]);
        for j in 0..3 {
            c[j] = ewscale * (ew[(j + 1) % 3] + ew[(j + 2) % 3]);
        }
    }
    c
}

pub(crate) fn compute_point_areas(vertices: &[Vec3], faces: &[Face]) -> Vec<f64> {
    let acc: Vec<AtomicF64> = atomic::zeroed(vertices.len());

    let scatter = |f: &Face| {
        let c = corner_areas(vertices, f);
        for (corner, a) in f.iter().zip(c) {
            acc[*corner].fetch_add(a);
        }
    };

    #[cfg(feature = "rayon")]
    faces.par_iter().for_each(scatter);
    #[cfg(not(feature = "rayon"))]
    faces.iter().for_each(scatter);

    acc.into_iter().map(AtomicF64::into_inner).collect()
}
