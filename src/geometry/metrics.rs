//! Small fixed-size vector helpers and barycentric conversions.
//!
//! Everything works on plain `[f64; 3]` arrays, the same representation the
//! mesh store uses for vertex positions.

pub type Vec3 = [f64; 3];

#[inline]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn scale(a: Vec3, s: f64) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Squared length.
#[inline]
pub fn norm2(a: Vec3) -> f64 {
    dot(a, a)
}

#[inline]
pub fn norm(a: Vec3) -> f64 {
    norm2(a).sqrt()
}

/// Unit vector along `a`; the zero vector is returned unchanged.
#[inline]
pub fn normalize(a: Vec3) -> Vec3 {
    let len = norm(a);
    if len == 0.0 { a } else { scale(a, 1.0 / len) }
}

/// Area of the triangle `(a, b, c)`.
#[inline]
pub fn triangle_area(a: Vec3, b: Vec3, c: Vec3) -> f64 {
    0.5 * norm(cross(sub(b, a), sub(c, a)))
}

/// Barycentric coordinates `(u, v, w)` of `p` with respect to `(a, b, c)`.
///
/// Solves the 2×2 normal equations built from the edge vectors `b - a` and
/// `c - a`, so `p` need not lie exactly in the triangle's plane. Degenerate
/// triangles produce non-finite coordinates.
pub fn point_to_barycentric(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let v0 = sub(b, a);
    let v1 = sub(c, a);
    let v2 = sub(p, a);
    let d00 = dot(v0, v0);
    let d01 = dot(v0, v1);
    let d11 = dot(v1, v1);
    let d20 = dot(v2, v0);
    let d21 = dot(v2, v1);
    let denom = d00 * d11 - d01 * d01;

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    [1.0 - v - w, v, w]
}

/// Planar point with barycentric coordinates `bary` in triangle `(a, b, c)`.
pub fn barycentric_to_point(bary: Vec3, a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> [f64; 2] {
    [
        bary[0] * a[0] + bary[1] * b[0] + bary[2] * c[0],
        bary[0] * a[1] + bary[1] * b[1] + bary[2] * c[1],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn cross_follows_right_hand_rule() {
        assert_eq!(cross([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn normalize_keeps_zero() {
        assert_eq!(normalize([0.0; 3]), [0.0; 3]);
        let n = normalize([3.0, 4.0, 0.0]);
        assert!((norm(n) - 1.0).abs() < EPS);
    }

    #[test]
    fn barycentric_of_corners_and_centroid() {
        let (a, b, c) = ([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
        let bary = point_to_barycentric(b, a, b, c);
        assert!((bary[0]).abs() < EPS && (bary[1] - 1.0).abs() < EPS && bary[2].abs() < EPS);

        let centroid = scale(add(add(a, b), c), 1.0 / 3.0);
        let bary = point_to_barycentric(centroid, a, b, c);
        for x in bary {
            assert!((x - 1.0 / 3.0).abs() < EPS);
        }
    }

    #[test]
    fn barycentric_round_trip_into_plane() {
        let (a, b, c) = ([1.0, 1.0, 0.0], [3.0, 1.0, 0.5], [1.0, 4.0, -0.5]);
        let p = [1.5, 2.0, 0.0];
        let bary = point_to_barycentric(p, a, b, c);
        assert!((bary.iter().sum::<f64>() - 1.0).abs() < EPS);
        let q = barycentric_to_point(bary, [0.0, 0.0], [1.0, 0.0], [0.0, 1.0]);
        assert!((q[0] - bary[1]).abs() < EPS && (q[1] - bary[2]).abs() < EPS);
    }
}
