//! Small vector helpers over `[f64; 3]` positions.
//!
//! Z is up, -Y is forward, +X is the character's left.

pub type Vec3 = [f64; 3];

pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn offset_x(p: Vec3, dx: f64) -> Vec3 {
    [p[0] + dx, p[1], p[2]]
}

pub fn offset_y(p: Vec3, dy: f64) -> Vec3 {
    [p[0], p[1] + dy, p[2]]
}

pub fn offset_z(p: Vec3, dz: f64) -> Vec3 {
    [p[0], p[1], p[2] + dz]
}

pub fn length(v: Vec3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

pub fn distance(a: Vec3, b: Vec3) -> f64 {
    length(sub(b, a))
}

/// Reflects a point across the YZ plane.
pub fn mirror_x(p: Vec3) -> Vec3 {
    [-p[0], p[1], p[2]]
}

/// Rotates `p` around the vertical axis through `pivot`.
///
/// Positive angles turn counter-clockwise seen from above (+X toward +Y).
pub fn rotate_z_about(p: Vec3, pivot: Vec3, degrees: f64) -> Vec3 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let d = sub(p, pivot);
    [
        pivot[0] + d[0] * cos - d[1] * sin,
        pivot[1] + d[0] * sin + d[1] * cos,
        pivot[2] + d[2],
    ]
}

/// Returns true if every component is within `eps` of the other point.
pub fn approx_eq(a: Vec3, b: Vec3, eps: f64) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= eps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_quarter_turn() {
        let p = rotate_z_about([2.0, 1.0, 5.0], [1.0, 1.0, 0.0], 90.0);
        assert!(approx_eq(p, [1.0, 2.0, 5.0], 1e-12));
    }

    #[test]
    fn test_rotation_keeps_distance_to_pivot() {
        let pivot = [0.3, -0.2, 1.1];
        let p = [0.7, -0.25, 1.1];
        let q = rotate_z_about(p, pivot, -45.0);
        assert!((distance(pivot, p) - distance(pivot, q)).abs() < 1e-12);
    }

    #[test]
    fn test_mirror_and_offsets() {
        assert_eq!(mirror_x([0.5, -0.1, 2.0]), [-0.5, -0.1, 2.0]);
        assert_eq!(offset_y(offset_x([0.0; 3], 1.0), 2.0), [1.0, 2.0, 0.0]);
        assert_eq!(offset_z([1.0, 1.0, 1.0], -1.0), [1.0, 1.0, 0.0]);
        assert_eq!(distance([0.0; 3], [3.0, 4.0, 0.0]), 5.0);
    }
}
