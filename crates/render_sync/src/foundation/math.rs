//! Math utilities and types
//!
//! Provides the fundamental math types used by the state tree and the
//! coordinate-space flip.

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Math utility functions
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians.to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_deg_rad_round_trip() {
        assert_relative_eq!(utils::deg_to_rad(180.0), std::f32::consts::PI);
        assert_relative_eq!(utils::rad_to_deg(utils::deg_to_rad(37.5)), 37.5);
    }

    #[test]
    fn test_quat_identity() {
        let q = Quat::identity();
        assert_relative_eq!(q.w, 1.0);
        assert_relative_eq!(q.i, 0.0);
    }
}
