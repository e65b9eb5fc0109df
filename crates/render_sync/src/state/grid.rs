//! Reference-grid section of the state tree
//!
//! The grid origin and axes are coordinate-convention-dependent and take
//! part in the coordinate-space flip.

use crate::foundation::math::Vec3;

/// Reference grid drawn in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    /// Whether the grid is drawn
    pub enabled: bool,

    /// Grid origin point
    pub origin: Vec3,

    /// First in-plane grid axis
    pub axis_x: Vec3,

    /// Second in-plane grid axis
    pub axis_y: Vec3,

    /// Minor cell size in scene units
    pub size1: f32,

    /// Major cell size in scene units
    pub size2: f32,

    /// Minor line color
    pub color1: Vec3,

    /// Major line color
    pub color2: Vec3,

    /// Fade-out distance from the camera
    pub distance: f32,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            enabled: false,
            origin: Vec3::zeros(),
            axis_x: Vec3::new(1.0, 0.0, 0.0),
            axis_y: Vec3::new(0.0, 1.0, 0.0),
            size1: 1.0,
            size2: 10.0,
            color1: Vec3::new(0.65, 0.65, 0.65),
            color2: Vec3::new(0.3, 0.3, 0.3),
            distance: 500.0,
        }
    }
}

/// Partial update for the grid section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridChanges {
    /// Toggle grid drawing
    pub enabled: Option<bool>,

    /// New grid origin
    pub origin: Option<Vec3>,

    /// New first in-plane axis
    pub axis_x: Option<Vec3>,

    /// New second in-plane axis
    pub axis_y: Option<Vec3>,

    /// New minor cell size
    pub size1: Option<f32>,

    /// New major cell size
    pub size2: Option<f32>,

    /// New minor line color
    pub color1: Option<Vec3>,

    /// New major line color
    pub color2: Option<Vec3>,

    /// New fade-out distance
    pub distance: Option<f32>,
}

impl GridChanges {
    /// Fold a later update over this one; later leaves win
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            enabled: later.enabled.or(self.enabled),
            origin: later.origin.or(self.origin),
            axis_x: later.axis_x.or(self.axis_x),
            axis_y: later.axis_y.or(self.axis_y),
            size1: later.size1.or(self.size1),
            size2: later.size2.or(self.size2),
            color1: later.color1.or(self.color1),
            color2: later.color2.or(self.color2),
            distance: later.distance.or(self.distance),
        }
    }

    /// Produce a new section value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &GridState) -> GridState {
        let mut next = base.clone();
        if let Some(enabled) = self.enabled {
            next.enabled = enabled;
        }
        if let Some(origin) = self.origin {
            next.origin = origin;
        }
        if let Some(axis_x) = self.axis_x {
            next.axis_x = axis_x;
        }
        if let Some(axis_y) = self.axis_y {
            next.axis_y = axis_y;
        }
        if let Some(size1) = self.size1 {
            next.size1 = size1;
        }
        if let Some(size2) = self.size2 {
            next.size2 = size2;
        }
        if let Some(color1) = self.color1 {
            next.color1 = color1;
        }
        if let Some(color2) = self.color2 {
            next.color2 = color2;
        }
        if let Some(distance) = self.distance {
            next.distance = distance;
        }
        next
    }
}
