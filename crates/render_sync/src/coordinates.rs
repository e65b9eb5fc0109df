//! Coordinate-space conversion between CAD and render conventions
//!
//! Interaction logic works in Z-up right-handed CAD space; the renderer
//! consumes Y-up render space. The conversion is a quarter turn about X,
//! which on raw components is a signed permutation: it is exact in floating
//! point, and the two directions undo each other bit for bit.
//!
//! Only the coordinate-sensitive fields take part: camera position,
//! rotation, and pivot; clipping-plane normals; grid origin and axes. All
//! other sections pass through untouched, so new sections can be added to
//! the state tree without touching this module.

use crate::foundation::math::{Quat, Quaternion, Unit, Vec3};
use crate::state::{
    CameraChanges, CameraState, ClippingChanges, ClippingState, GridChanges, GridState,
    RenderState, StateChanges,
};
use std::sync::Arc;

/// Direction of a coordinate-space flip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipDirection {
    /// Z-up CAD space into Y-up render space: `(x, y, z) → (x, z, −y)`
    CadToRender,
    /// Y-up render space back into Z-up CAD space: `(x, y, z) → (x, −z, y)`
    RenderToCad,
}

impl FlipDirection {
    /// The direction undoing this one
    pub fn inverse(self) -> Self {
        match self {
            Self::CadToRender => Self::RenderToCad,
            Self::RenderToCad => Self::CadToRender,
        }
    }

    /// Relabel a vector's components into the other convention
    pub fn flip_vec3(self, v: Vec3) -> Vec3 {
        match self {
            Self::CadToRender => Vec3::new(v.x, v.z, -v.y),
            Self::RenderToCad => Vec3::new(v.x, -v.z, v.y),
        }
    }

    /// Relabel a rotation into the other convention
    ///
    /// Conjugating by the quarter turn about X applies the same signed
    /// permutation to the quaternion's vector part and leaves the scalar
    /// part alone, so rotations round-trip bit for bit like vectors do.
    pub fn flip_quat(self, q: Quat) -> Quat {
        let v = self.flip_vec3(Vec3::new(q.i, q.j, q.k));
        Unit::new_unchecked(Quaternion::new(q.w, v.x, v.y, v.z))
    }
}

/// Flip the coordinate-sensitive fields of a sparse delta in place
///
/// Fields absent from the delta are skipped; a delta touching only the
/// camera leaves clipping and grid patches untouched because they are not
/// there to flip.
pub fn flip_changes(changes: &mut StateChanges, direction: FlipDirection) {
    if let Some(camera) = &mut changes.camera {
        flip_camera_changes(camera, direction);
    }
    if let Some(clipping) = &mut changes.clipping {
        flip_clipping_changes(clipping, direction);
    }
    if let Some(grid) = &mut changes.grid {
        flip_grid_changes(grid, direction);
    }
}

/// Produce a full tree relabeled into the other convention
///
/// Used when seeding both trees from one set of defaults. Non-coordinate
/// sections are shared with the input by reference.
#[must_use]
pub fn flipped_state(state: &RenderState, direction: FlipDirection) -> RenderState {
    let mut next = state.clone();
    next.camera = Arc::new(flipped_camera(&state.camera, direction));
    next.clipping = Arc::new(flipped_clipping(&state.clipping, direction));
    next.grid = Arc::new(flipped_grid(&state.grid, direction));
    next
}

fn flip_camera_changes(camera: &mut CameraChanges, direction: FlipDirection) {
    if let Some(position) = &mut camera.position {
        *position = direction.flip_vec3(*position);
    }
    if let Some(rotation) = &mut camera.rotation {
        *rotation = direction.flip_quat(*rotation);
    }
    if let Some(Some(pivot)) = &mut camera.pivot {
        *pivot = direction.flip_vec3(*pivot);
    }
}

fn flip_clipping_changes(clipping: &mut ClippingChanges, direction: FlipDirection) {
    if let Some(planes) = &mut clipping.planes {
        for plane in planes {
            // The flip is a pure rotation, so the offset is unchanged.
            plane.normal = direction.flip_vec3(plane.normal);
        }
    }
}

fn flip_grid_changes(grid: &mut GridChanges, direction: FlipDirection) {
    if let Some(origin) = &mut grid.origin {
        *origin = direction.flip_vec3(*origin);
    }
    if let Some(axis_x) = &mut grid.axis_x {
        *axis_x = direction.flip_vec3(*axis_x);
    }
    if let Some(axis_y) = &mut grid.axis_y {
        *axis_y = direction.flip_vec3(*axis_y);
    }
}

fn flipped_camera(camera: &CameraState, direction: FlipDirection) -> CameraState {
    CameraState {
        position: direction.flip_vec3(camera.position),
        rotation: direction.flip_quat(camera.rotation),
        pivot: camera.pivot.map(|pivot| direction.flip_vec3(pivot)),
        ..camera.clone()
    }
}

fn flipped_clipping(clipping: &ClippingState, direction: FlipDirection) -> ClippingState {
    let mut next = clipping.clone();
    for plane in &mut next.planes {
        plane.normal = direction.flip_vec3(plane.normal);
    }
    next
}

fn flipped_grid(grid: &GridState, direction: FlipDirection) -> GridState {
    GridState {
        origin: direction.flip_vec3(grid.origin),
        axis_x: direction.flip_vec3(grid.axis_x),
        axis_y: direction.flip_vec3(grid.axis_y),
        ..grid.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ClippingPlane, GridChanges};

    fn assert_vec_bits_eq(a: Vec3, b: Vec3) {
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
        assert_eq!(a.z.to_bits(), b.z.to_bits());
    }

    #[test]
    fn test_vector_mapping_is_fixed() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(
            FlipDirection::CadToRender.flip_vec3(v),
            Vec3::new(1.0, 3.0, -2.0)
        );
        assert_eq!(
            FlipDirection::RenderToCad.flip_vec3(v),
            Vec3::new(1.0, -3.0, 2.0)
        );
    }

    #[test]
    fn test_directions_are_mutual_inverses() {
        assert_eq!(
            FlipDirection::CadToRender.inverse(),
            FlipDirection::RenderToCad
        );
        assert_eq!(
            FlipDirection::RenderToCad.inverse(),
            FlipDirection::CadToRender
        );
    }

    #[test]
    fn test_vector_involution_is_bit_exact() {
        // Include awkward values: negative zero, subnormals, extremes.
        let cases = [
            Vec3::new(0.0, -0.0, 0.0),
            Vec3::new(1.5e-42, -7.25, f32::MAX),
            Vec3::new(-3.0, 0.125, -1.0e-30),
        ];
        for direction in [FlipDirection::CadToRender, FlipDirection::RenderToCad] {
            for v in cases {
                let there = direction.flip_vec3(v);
                let back = direction.inverse().flip_vec3(there);
                assert_vec_bits_eq(back, v);
            }
        }
    }

    #[test]
    fn test_quat_flip_permutes_vector_part() {
        let q = Unit::new_unchecked(Quaternion::new(0.5, 0.5, 0.5, 0.5));
        let flipped = FlipDirection::CadToRender.flip_quat(q);
        assert_eq!(flipped.w, 0.5);
        assert_eq!(flipped.i, 0.5);
        assert_eq!(flipped.j, 0.5);
        assert_eq!(flipped.k, -0.5);

        let back = FlipDirection::CadToRender.inverse().flip_quat(flipped);
        assert_eq!(back.i.to_bits(), q.i.to_bits());
        assert_eq!(back.j.to_bits(), q.j.to_bits());
        assert_eq!(back.k.to_bits(), q.k.to_bits());
        assert_eq!(back.w.to_bits(), q.w.to_bits());
    }

    #[test]
    fn test_partial_delta_skips_absent_sections() {
        let mut changes = StateChanges::camera(CameraChanges::moved_to(Vec3::new(0.0, 1.0, 0.0)));
        flip_changes(&mut changes, FlipDirection::CadToRender);
        assert_eq!(
            changes.camera.as_ref().unwrap().position,
            Some(Vec3::new(0.0, 0.0, -1.0))
        );
        assert!(changes.clipping.is_none());
        assert!(changes.grid.is_none());
    }

    #[test]
    fn test_plane_offset_untouched() {
        let mut changes = StateChanges {
            clipping: Some(crate::state::ClippingChanges {
                planes: Some(vec![ClippingPlane::new(Vec3::new(0.0, 0.0, 1.0), 4.5)]),
                ..Default::default()
            }),
            ..Default::default()
        };
        flip_changes(&mut changes, FlipDirection::CadToRender);
        let planes = changes.clipping.unwrap().planes.unwrap();
        assert_eq!(planes[0].normal, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(planes[0].offset, 4.5);
    }

    #[test]
    fn test_grid_axes_flip() {
        let mut changes = StateChanges {
            grid: Some(GridChanges {
                axis_x: Some(Vec3::new(1.0, 0.0, 0.0)),
                axis_y: Some(Vec3::new(0.0, 1.0, 0.0)),
                ..Default::default()
            }),
            ..Default::default()
        };
        flip_changes(&mut changes, FlipDirection::CadToRender);
        let grid = changes.grid.unwrap();
        assert_eq!(grid.axis_x, Some(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(grid.axis_y, Some(Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_full_state_flip_round_trip() {
        let mut state = RenderState::default();
        state.camera = Arc::new(CameraState {
            position: Vec3::new(2.0, -3.0, 7.0),
            pivot: Some(Vec3::new(0.0, 1.0, 0.0)),
            ..CameraState::default()
        });
        let there = flipped_state(&state, FlipDirection::CadToRender);
        let back = flipped_state(&there, FlipDirection::RenderToCad);
        assert_eq!(back, state);
        // Non-coordinate sections are shared, not copied.
        assert!(Arc::ptr_eq(&state.tonemapping, &there.tonemapping));
        assert!(Arc::ptr_eq(&state.output, &there.output));
    }
}
