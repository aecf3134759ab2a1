//! Math utilities and types

pub use nalgebra::{Matrix4, Vector2, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 4D vector type, used for RGBA colors
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Width divided by height
///
/// A zero height yields `1.0` so a degenerate window never poisons the
/// projection with infinities.
pub fn aspect(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

/// OpenGL-style orthographic projection (clip space z in -1..1)
pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    Mat4::new_orthographic(left, right, bottom, top, near, far)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn aspect_of_common_sizes() {
        assert_relative_eq!(aspect(1280, 720), 16.0 / 9.0);
        assert_relative_eq!(aspect(100, 100), 1.0);
        assert_relative_eq!(aspect(100, 0), 1.0);
    }

    #[test]
    fn orthographic_maps_bounds_to_clip_space() {
        let projection = orthographic(-1.0, 1.0, -0.5, 0.5, -100.0, 100.0);
        let corner = projection * Vec4::new(1.0, 0.5, 0.0, 1.0);
        assert_relative_eq!(corner.x, 1.0);
        assert_relative_eq!(corner.y, 1.0);
        assert_relative_eq!(corner.w, 1.0);
    }
}
