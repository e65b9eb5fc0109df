//! Clipping-plane section of the state tree
//!
//! Plane normals are coordinate-convention-dependent; offsets are not,
//! since the flip is a pure rotation.

use crate::foundation::math::{Vec3, Vec4};

/// How multiple clipping planes combine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClippingMode {
    /// Keep geometry inside every plane
    Intersection,
    /// Keep geometry inside at least one plane
    Union,
}

/// One clipping plane, `normal · p + offset = 0`
#[derive(Debug, Clone, PartialEq)]
pub struct ClippingPlane {
    /// Plane normal
    pub normal: Vec3,

    /// Plane offset along the normal
    pub offset: f32,

    /// Optional visualization color for the plane outline
    pub color: Option<Vec4>,
}

impl ClippingPlane {
    /// Create an uncolored plane from a normal and offset
    pub fn new(normal: Vec3, offset: f32) -> Self {
        Self {
            normal,
            offset,
            color: None,
        }
    }
}

/// Clipping configuration: an ordered plane list plus a combine mode
#[derive(Debug, Clone, PartialEq)]
pub struct ClippingState {
    /// Whether clipping is applied
    pub enabled: bool,

    /// Whether plane outlines are drawn
    pub draw: bool,

    /// How the planes combine
    pub mode: ClippingMode,

    /// Ordered plane equations
    pub planes: Vec<ClippingPlane>,
}

impl Default for ClippingState {
    fn default() -> Self {
        Self {
            enabled: false,
            draw: false,
            mode: ClippingMode::Intersection,
            planes: Vec::new(),
        }
    }
}

/// Partial update for the clipping section
///
/// The plane list is an array leaf: when present it replaces the previous
/// list wholesale, it is never merged element-wise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClippingChanges {
    /// Toggle clipping
    pub enabled: Option<bool>,

    /// Toggle plane outline drawing
    pub draw: Option<bool>,

    /// New combine mode
    pub mode: Option<ClippingMode>,

    /// Replacement plane list
    pub planes: Option<Vec<ClippingPlane>>,
}

impl ClippingChanges {
    /// Fold a later update over this one; later leaves win
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            enabled: later.enabled.or(self.enabled),
            draw: later.draw.or(self.draw),
            mode: later.mode.or(self.mode),
            planes: later.planes.or(self.planes),
        }
    }

    /// Produce a new section value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &ClippingState) -> ClippingState {
        let mut next = base.clone();
        if let Some(enabled) = self.enabled {
            next.enabled = enabled;
        }
        if let Some(draw) = self.draw {
            next.draw = draw;
        }
        if let Some(mode) = self.mode {
            next.mode = mode;
        }
        if let Some(planes) = &self.planes {
            next.planes = planes.clone();
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_list_replaces_wholesale() {
        let base = ClippingState {
            planes: vec![
                ClippingPlane::new(Vec3::new(1.0, 0.0, 0.0), 2.0),
                ClippingPlane::new(Vec3::new(0.0, 1.0, 0.0), -1.0),
            ],
            ..ClippingState::default()
        };
        let changes = ClippingChanges {
            planes: Some(vec![ClippingPlane::new(Vec3::new(0.0, 0.0, 1.0), 0.5)]),
            ..ClippingChanges::default()
        };
        let next = changes.applied_to(&base);
        assert_eq!(next.planes.len(), 1);
        assert_eq!(next.planes[0].offset, 0.5);
    }

    #[test]
    fn test_mode_change_keeps_planes() {
        let base = ClippingState {
            planes: vec![ClippingPlane::new(Vec3::new(1.0, 0.0, 0.0), 2.0)],
            ..ClippingState::default()
        };
        let changes = ClippingChanges {
            mode: Some(ClippingMode::Union),
            ..ClippingChanges::default()
        };
        let next = changes.applied_to(&base);
        assert_eq!(next.mode, ClippingMode::Union);
        assert_eq!(next.planes, base.planes);
    }
}
