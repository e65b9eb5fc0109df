//! Camera section of the state tree
//!
//! The camera pose is coordinate-convention-dependent: controllers write it
//! in CAD space and the flip in [`crate::coordinates`] relabels it into
//! render space before it reaches the renderer.

use crate::foundation::math::{Quat, Vec3};

/// Camera projection kind with its projection parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraKind {
    /// Perspective projection with vertical field of view in degrees
    Pinhole {
        /// Vertical field of view in degrees
        fov: f32,
    },
    /// Orthographic projection with view height in scene units
    Orthographic {
        /// View height in scene units
        field: f32,
    },
}

/// Camera projection parameters and pose
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    /// Projection kind and parameter
    pub kind: CameraKind,

    /// Camera position
    pub position: Vec3,

    /// Camera orientation
    pub rotation: Quat,

    /// Optional orbit pivot point; `None` for free-fly cameras
    pub pivot: Option<Vec3>,

    /// Distance to the near clipping plane
    pub near: f32,

    /// Distance to the far clipping plane
    pub far: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            kind: CameraKind::Pinhole { fov: 45.0 },
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            pivot: None,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Partial update for the camera section
///
/// `pivot` is an optional leaf: the outer `Option` distinguishes "leave
/// unchanged" (`None`) from "explicitly clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraChanges {
    /// New projection kind
    pub kind: Option<CameraKind>,

    /// New camera position
    pub position: Option<Vec3>,

    /// New camera orientation
    pub rotation: Option<Quat>,

    /// New orbit pivot; `Some(None)` clears it
    pub pivot: Option<Option<Vec3>>,

    /// New near-plane distance
    pub near: Option<f32>,

    /// New far-plane distance
    pub far: Option<f32>,
}

impl CameraChanges {
    /// Partial update setting only the camera position
    pub fn moved_to(position: Vec3) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Fold a later update over this one; later leaves win
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            kind: later.kind.or(self.kind),
            position: later.position.or(self.position),
            rotation: later.rotation.or(self.rotation),
            pivot: later.pivot.or(self.pivot),
            near: later.near.or(self.near),
            far: later.far.or(self.far),
        }
    }

    /// Produce a new section value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &CameraState) -> CameraState {
        let mut next = base.clone();
        if let Some(kind) = self.kind {
            next.kind = kind;
        }
        if let Some(position) = self.position {
            next.position = position;
        }
        if let Some(rotation) = self.rotation {
            next.rotation = rotation;
        }
        if let Some(pivot) = self.pivot {
            next.pivot = pivot;
        }
        if let Some(near) = self.near {
            next.near = near;
        }
        if let Some(far) = self.far {
            next.far = far;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_pivot_is_no_change() {
        let base = CameraState {
            pivot: Some(Vec3::new(1.0, 2.0, 3.0)),
            ..CameraState::default()
        };
        let next = CameraChanges::moved_to(Vec3::new(5.0, 0.0, 0.0)).applied_to(&base);
        assert_eq!(next.pivot, base.pivot);
        assert_eq!(next.position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_explicit_clear_removes_pivot() {
        let base = CameraState {
            pivot: Some(Vec3::new(1.0, 2.0, 3.0)),
            ..CameraState::default()
        };
        let changes = CameraChanges {
            pivot: Some(None),
            ..CameraChanges::default()
        };
        assert_eq!(changes.applied_to(&base).pivot, None);
    }

    #[test]
    fn test_kind_replaces_wholesale() {
        let base = CameraState::default();
        let changes = CameraChanges {
            kind: Some(CameraKind::Orthographic { field: 20.0 }),
            ..CameraChanges::default()
        };
        assert_eq!(
            changes.applied_to(&base).kind,
            CameraKind::Orthographic { field: 20.0 }
        );
    }
}
