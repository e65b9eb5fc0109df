//! # Scene State Tree
//!
//! The authoritative, per-frame description of what the renderer should
//! draw, split into independently replaceable sections. Two structurally
//! identical trees exist at runtime: one in the CAD interaction convention
//! and one in the render convention; see [`crate::coordinates`] for the
//! mapping between them.
//!
//! ## Immutability
//!
//! A [`RenderState`] is never mutated once produced. Updates go through
//! [`RenderState::modified`], which returns a new tree sharing every
//! untouched section by [`Arc`] reference. Because of that sharing,
//! "did this frame change" is a pointer comparison, not a deep diff.

mod camera;
mod changes;
mod clipping;
mod dynamic;
mod effects;
mod grid;
mod output;
mod scene;

pub use camera::{CameraChanges, CameraKind, CameraState};
pub use changes::StateChanges;
pub use clipping::{ClippingChanges, ClippingMode, ClippingPlane, ClippingState};
pub use dynamic::{
    DynamicChanges, DynamicMaterial, DynamicMesh, DynamicObject, DynamicState, PrimitiveKind,
};
pub use effects::{
    BackgroundChanges, BackgroundState, CubeChanges, CubeState, DebugChanges, DebugState,
    HighlightAction, HighlightChanges, HighlightGroup, HighlightState, OutlineChanges,
    OutlineState, PickChanges, PickState, PointSizeChanges, PointSizeState, PointsChanges,
    PointsState, TonemappingChanges, TonemappingMode, TonemappingState, ToonOutlineChanges,
    ToonOutlineState,
};
pub use grid::{GridChanges, GridState};
pub use output::{OutputChanges, OutputFlags, OutputState};
pub use scene::{SceneChanges, SceneState, TerrainChanges, TerrainState};

use crate::core::config::GraphicsApi;
use std::sync::Arc;

/// Full scene state for one frame, one `Arc` per section
///
/// Every section is independently replaceable; fields not mentioned in an
/// update retain their prior value. Cloning is cheap (reference counts
/// only).
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    /// Output surface dimensions and backend flags
    pub output: Arc<OutputState>,

    /// Camera projection and pose
    pub camera: Arc<CameraState>,

    /// Reference grid
    pub grid: Arc<GridState>,

    /// Orientation-cube gizmo
    pub cube: Arc<CubeState>,

    /// Clipping planes
    pub clipping: Arc<ClippingState>,

    /// Intersection outlines
    pub outlines: Arc<OutlineState>,

    /// Object highlighting
    pub highlights: Arc<HighlightState>,

    /// Tone mapping
    pub tonemapping: Arc<TonemappingState>,

    /// Point-cloud rendering
    pub points: Arc<PointsState>,

    /// Toon outline pass
    pub toon_outline: Arc<ToonOutlineState>,

    /// Pick pass
    pub pick: Arc<PickState>,

    /// Dynamic geometry groups
    pub dynamic: Arc<DynamicState>,

    /// Loaded scene
    pub scene: Arc<SceneState>,

    /// Terrain rendering
    pub terrain: Arc<TerrainState>,

    /// Debug visualization
    pub debug: Arc<DebugState>,

    /// Background
    pub background: Arc<BackgroundState>,
}

/// The state tree in the CAD interaction convention
///
/// Structurally identical to [`RenderState`]; which convention a given tree
/// is in is tracked by its owner, not its type. Controllers read and write
/// against this flavor.
pub type CadState = RenderState;

impl RenderState {
    /// Default full state for the given graphics API flavor
    ///
    /// Both flavors have the same section shape; only backend-specific
    /// output defaults differ. No range validation happens here; consumers
    /// reject out-of-range values when they act on the state.
    pub fn default_for(api: GraphicsApi) -> Self {
        Self {
            output: Arc::new(OutputState::default_for(api)),
            camera: Arc::default(),
            grid: Arc::default(),
            cube: Arc::default(),
            clipping: Arc::default(),
            outlines: Arc::default(),
            highlights: Arc::default(),
            tonemapping: Arc::default(),
            points: Arc::default(),
            toon_outline: Arc::default(),
            pick: Arc::default(),
            dynamic: Arc::default(),
            scene: Arc::default(),
            terrain: Arc::default(),
            debug: Arc::default(),
            background: Arc::default(),
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::default_for(GraphicsApi::default())
    }
}
