//! Math type aliases and camera matrix helpers.
//!
//! All rendering math is f32. Matrix conventions follow wgpu/Vulkan:
//! right-handed, camera looking down -Z, clip depth in [0, 1].

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Quaternion (f32). Stored as `[x, y, z, w]` in memory.
pub type Quat = nalgebra::Quaternion<f32>;

/// Build a right-handed perspective projection with depth range [0, 1].
pub fn perspective_rh(yfov: f32, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
    let f = 1.0 / (yfov / 2.0).tan();
    let nf = 1.0 / (znear - zfar);
    #[rustfmt::skip]
    let result = Mat4::new(
        f / aspect, 0.0,  0.0,              0.0,
        0.0,        f,    0.0,              0.0,
        0.0,        0.0,  zfar * nf,        znear * zfar * nf,
        0.0,        0.0,  -1.0,             0.0,
    );
    result
}

/// Build a right-handed orthographic projection with depth range [0, 1].
pub fn orthographic_rh(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let rml = right - left;
    let tmb = top - bottom;
    let fmn = far - near;
    #[rustfmt::skip]
    let result = Mat4::new(
        2.0 / rml, 0.0,       0.0,         -(right + left) / rml,
        0.0,       2.0 / tmb, 0.0,         -(top + bottom) / tmb,
        0.0,       0.0,       -1.0 / fmn,  -near / fmn,
        0.0,       0.0,       0.0,          1.0,
    );
    result
}

/// Right-handed look-at view matrix.
pub fn look_at_rh(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4 {
    look_at_isometry(eye, target, up).to_homogeneous()
}

/// Right-handed look-at as an isometry, so callers can also take the exact
/// inverse (camera-to-world) without a general 4x4 inversion.
pub fn look_at_isometry(eye: &Vec3, target: &Vec3, up: &Vec3) -> nalgebra::Isometry3<f32> {
    let eye_point = nalgebra::Point3::from(*eye);
    let target_point = nalgebra::Point3::from(*target);
    nalgebra::Isometry3::look_at_rh(&eye_point, &target_point, up)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perspective_maps_near_and_far_to_unit_depth() {
        let proj = perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);

        let near = proj * Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);

        let far = proj * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_look_at_isometry_inverse_restores_eye() {
        let eye = Vec3::new(3.0, 4.0, 5.0);
        let iso = look_at_isometry(&eye, &Vec3::zeros(), &Vec3::y());

        // View maps the eye to the origin; the inverse maps it back.
        let at_origin = iso * nalgebra::Point3::from(eye);
        assert!(at_origin.coords.norm() < 1e-5);
        let restored = iso.inverse() * nalgebra::Point3::origin();
        assert!((restored.coords - eye).norm() < 1e-5);
    }
}
