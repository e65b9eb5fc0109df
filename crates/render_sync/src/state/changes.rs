//! Sparse change trees and their merge semantics
//!
//! A [`StateChanges`] describes what must change, not what must exist: any
//! subset of the state tree's sections, each a patch of optional leaves.
//! Two deltas combine with [`StateChanges::merged`] (later wins per leaf,
//! composites merge recursively, lists replace wholesale), and a delta is
//! applied to a full tree with [`RenderState::modified`].

use super::{
    BackgroundChanges, CameraChanges, ClippingChanges, CubeChanges, DebugChanges, DynamicChanges,
    GridChanges, HighlightChanges, OutlineChanges, OutputChanges, PickChanges, PointsChanges,
    RenderState, SceneChanges, TerrainChanges, TonemappingChanges, ToonOutlineChanges,
};
use std::sync::Arc;

/// Sparse partial update covering any subset of the state tree
///
/// Absent sections and absent leaves mean "no change". Explicit clearing of
/// optional leaves is expressed inside the section patches (`Some(None)`),
/// never by a section being present-but-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateChanges {
    /// Output section patch
    pub output: Option<OutputChanges>,

    /// Camera section patch
    pub camera: Option<CameraChanges>,

    /// Grid section patch
    pub grid: Option<GridChanges>,

    /// Cube section patch
    pub cube: Option<CubeChanges>,

    /// Clipping section patch
    pub clipping: Option<ClippingChanges>,

    /// Outlines section patch
    pub outlines: Option<OutlineChanges>,

    /// Highlights section patch
    pub highlights: Option<HighlightChanges>,

    /// Tone-mapping section patch
    pub tonemapping: Option<TonemappingChanges>,

    /// Points section patch
    pub points: Option<PointsChanges>,

    /// Toon-outline section patch
    pub toon_outline: Option<ToonOutlineChanges>,

    /// Pick section patch
    pub pick: Option<PickChanges>,

    /// Dynamic-geometry section patch
    pub dynamic: Option<DynamicChanges>,

    /// Scene section patch
    pub scene: Option<SceneChanges>,

    /// Terrain section patch
    pub terrain: Option<TerrainChanges>,

    /// Debug section patch
    pub debug: Option<DebugChanges>,

    /// Background section patch
    pub background: Option<BackgroundChanges>,
}

/// Combine two optional section patches, merging when both are present
fn fold<T>(earlier: Option<T>, later: Option<T>, merge: impl FnOnce(T, T) -> T) -> Option<T> {
    match (earlier, later) {
        (Some(a), Some(b)) => Some(merge(a, b)),
        (a, None) => a,
        (None, b) => b,
    }
}

impl StateChanges {
    /// Delta touching only the camera section
    pub fn camera(camera: CameraChanges) -> Self {
        Self {
            camera: Some(camera),
            ..Self::default()
        }
    }

    /// Delta touching only the output section
    pub fn output(output: OutputChanges) -> Self {
        Self {
            output: Some(output),
            ..Self::default()
        }
    }

    /// Whether this delta touches nothing
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Fold a later delta over this one
    ///
    /// Later leaves win; section patches present in both merge recursively;
    /// list-valued leaves replace wholesale. Folding with an empty delta is
    /// the identity.
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            output: fold(self.output, later.output, OutputChanges::merged),
            camera: fold(self.camera, later.camera, CameraChanges::merged),
            grid: fold(self.grid, later.grid, GridChanges::merged),
            cube: fold(self.cube, later.cube, CubeChanges::merged),
            clipping: fold(self.clipping, later.clipping, ClippingChanges::merged),
            outlines: fold(self.outlines, later.outlines, OutlineChanges::merged),
            highlights: fold(self.highlights, later.highlights, HighlightChanges::merged),
            tonemapping: fold(self.tonemapping, later.tonemapping, TonemappingChanges::merged),
            points: fold(self.points, later.points, PointsChanges::merged),
            toon_outline: fold(self.toon_outline, later.toon_outline, ToonOutlineChanges::merged),
            pick: fold(self.pick, later.pick, PickChanges::merged),
            dynamic: fold(self.dynamic, later.dynamic, DynamicChanges::merged),
            scene: fold(self.scene, later.scene, SceneChanges::merged),
            terrain: fold(self.terrain, later.terrain, TerrainChanges::merged),
            debug: fold(self.debug, later.debug, DebugChanges::merged),
            background: fold(self.background, later.background, BackgroundChanges::merged),
        }
    }
}

/// Apply one section patch, preserving the old `Arc` when nothing changed
fn apply_section<S, C>(
    base: &Arc<S>,
    patch: Option<&C>,
    apply: impl FnOnce(&C, &S) -> S,
    dirty: &mut bool,
) -> Arc<S>
where
    S: PartialEq,
{
    match patch {
        None => Arc::clone(base),
        Some(patch) => {
            let next = apply(patch, base);
            if next == **base {
                Arc::clone(base)
            } else {
                *dirty = true;
                Arc::new(next)
            }
        }
    }
}

impl RenderState {
    /// Apply a sparse delta, producing a new full tree
    ///
    /// Neither input is mutated. Sections the delta does not touch are
    /// carried through by reference; a touched section whose resulting
    /// value equals the old one also keeps its old reference. The returned
    /// `Arc` is the input `Arc` itself iff no section changed, so reference
    /// identity is a valid change signal at both the tree and section
    /// level.
    #[must_use]
    pub fn modified(base: &Arc<Self>, changes: &StateChanges) -> Arc<Self> {
        let mut dirty = false;
        let next = Self {
            output: apply_section(
                &base.output,
                changes.output.as_ref(),
                OutputChanges::applied_to,
                &mut dirty,
            ),
            camera: apply_section(
                &base.camera,
                changes.camera.as_ref(),
                CameraChanges::applied_to,
                &mut dirty,
            ),
            grid: apply_section(
                &base.grid,
                changes.grid.as_ref(),
                GridChanges::applied_to,
                &mut dirty,
            ),
            cube: apply_section(
                &base.cube,
                changes.cube.as_ref(),
                CubeChanges::applied_to,
                &mut dirty,
            ),
            clipping: apply_section(
                &base.clipping,
                changes.clipping.as_ref(),
                ClippingChanges::applied_to,
                &mut dirty,
            ),
            outlines: apply_section(
                &base.outlines,
                changes.outlines.as_ref(),
                OutlineChanges::applied_to,
                &mut dirty,
            ),
            highlights: apply_section(
                &base.highlights,
                changes.highlights.as_ref(),
                HighlightChanges::applied_to,
                &mut dirty,
            ),
            tonemapping: apply_section(
                &base.tonemapping,
                changes.tonemapping.as_ref(),
                TonemappingChanges::applied_to,
                &mut dirty,
            ),
            points: apply_section(
                &base.points,
                changes.points.as_ref(),
                PointsChanges::applied_to,
                &mut dirty,
            ),
            toon_outline: apply_section(
                &base.toon_outline,
                changes.toon_outline.as_ref(),
                ToonOutlineChanges::applied_to,
                &mut dirty,
            ),
            pick: apply_section(
                &base.pick,
                changes.pick.as_ref(),
                PickChanges::applied_to,
                &mut dirty,
            ),
            dynamic: apply_section(
                &base.dynamic,
                changes.dynamic.as_ref(),
                DynamicChanges::applied_to,
                &mut dirty,
            ),
            scene: apply_section(
                &base.scene,
                changes.scene.as_ref(),
                SceneChanges::applied_to,
                &mut dirty,
            ),
            terrain: apply_section(
                &base.terrain,
                changes.terrain.as_ref(),
                TerrainChanges::applied_to,
                &mut dirty,
            ),
            debug: apply_section(
                &base.debug,
                changes.debug.as_ref(),
                DebugChanges::applied_to,
                &mut dirty,
            ),
            background: apply_section(
                &base.background,
                changes.background.as_ref(),
                BackgroundChanges::applied_to,
                &mut dirty,
            ),
        };
        if dirty {
            Arc::new(next)
        } else {
            Arc::clone(base)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::state::{CameraChanges, GridChanges, OutputChanges};

    fn camera_delta(x: f32) -> StateChanges {
        StateChanges::camera(CameraChanges::moved_to(Vec3::new(x, 0.0, 0.0)))
    }

    #[test]
    fn test_merge_identity_keeps_reference() {
        let state = Arc::new(RenderState::default());
        let next = RenderState::modified(&state, &StateChanges::default());
        assert!(Arc::ptr_eq(&state, &next));
    }

    #[test]
    fn test_noop_delta_keeps_reference() {
        // A present patch that reproduces the current value is not a change.
        let state = Arc::new(RenderState::default());
        let noop = StateChanges::camera(CameraChanges::moved_to(state.camera.position));
        let next = RenderState::modified(&state, &noop);
        assert!(Arc::ptr_eq(&state, &next));
    }

    #[test]
    fn test_merge_idempotence() {
        let state = Arc::new(RenderState::default());
        let delta = camera_delta(3.0);
        let once = RenderState::modified(&state, &delta);
        let twice = RenderState::modified(&once, &delta);
        assert_eq!(*once, *twice);
        // Second application changes nothing, so the reference survives too.
        assert!(Arc::ptr_eq(&once, &twice));
    }

    #[test]
    fn test_untouched_sections_shared_by_reference() {
        let state = Arc::new(RenderState::default());
        let next = RenderState::modified(&state, &camera_delta(1.0));
        assert!(!Arc::ptr_eq(&state, &next));
        assert!(!Arc::ptr_eq(&state.camera, &next.camera));
        assert!(Arc::ptr_eq(&state.grid, &next.grid));
        assert!(Arc::ptr_eq(&state.output, &next.output));
        assert!(Arc::ptr_eq(&state.dynamic, &next.dynamic));
    }

    #[test]
    fn test_inputs_not_mutated() {
        let state = Arc::new(RenderState::default());
        let delta = camera_delta(2.0);
        let before = (*state).clone();
        let _ = RenderState::modified(&state, &delta);
        assert_eq!(*state, before);
        assert_eq!(delta, camera_delta(2.0));
    }

    #[test]
    fn test_fold_later_wins_per_leaf() {
        let earlier = StateChanges {
            camera: Some(CameraChanges {
                position: Some(Vec3::new(1.0, 0.0, 0.0)),
                near: Some(0.5),
                ..CameraChanges::default()
            }),
            grid: Some(GridChanges {
                enabled: Some(true),
                ..GridChanges::default()
            }),
            ..StateChanges::default()
        };
        let later = StateChanges::camera(CameraChanges::moved_to(Vec3::new(9.0, 0.0, 0.0)));
        let merged = earlier.merged(later);

        let camera = merged.camera.unwrap();
        assert_eq!(camera.position, Some(Vec3::new(9.0, 0.0, 0.0)));
        // Leaves only the earlier delta touched survive.
        assert_eq!(camera.near, Some(0.5));
        assert_eq!(merged.grid.unwrap().enabled, Some(true));
    }

    #[test]
    fn test_fold_with_empty_is_identity() {
        let delta = camera_delta(4.0);
        assert_eq!(delta.clone().merged(StateChanges::default()), delta);
        assert_eq!(StateChanges::default().merged(delta.clone()), delta);
    }

    #[test]
    fn test_multi_section_delta() {
        let state = Arc::new(RenderState::default());
        let delta = StateChanges {
            camera: Some(CameraChanges::moved_to(Vec3::new(0.0, 5.0, 0.0))),
            output: Some(OutputChanges::resize(800, 600)),
            ..StateChanges::default()
        };
        let next = RenderState::modified(&state, &delta);
        assert_eq!(next.camera.position, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!((next.output.width, next.output.height), (800, 600));
        assert!(Arc::ptr_eq(&state.clipping, &next.clipping));
    }
}
