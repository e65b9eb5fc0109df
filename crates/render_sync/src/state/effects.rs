//! Smaller display sections of the state tree
//!
//! Cube gizmo, outlines, highlights, tone mapping, point rendering, toon
//! outlines, picking, debug visualization, and background. None of these
//! carry coordinate-convention-dependent geometry; they pass through the
//! coordinate flip untouched.

use crate::foundation::math::{Vec3, Vec4};

/// Orientation-cube gizmo
#[derive(Debug, Clone, PartialEq)]
pub struct CubeState {
    /// Whether the cube is drawn
    pub enabled: bool,

    /// Cube center position
    pub position: Vec3,

    /// Uniform cube scale
    pub scale: f32,
}

impl Default for CubeState {
    fn default() -> Self {
        Self {
            enabled: false,
            position: Vec3::zeros(),
            scale: 1.0,
        }
    }
}

/// Partial update for the cube section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CubeChanges {
    /// Toggle cube drawing
    pub enabled: Option<bool>,

    /// New cube center
    pub position: Option<Vec3>,

    /// New uniform scale
    pub scale: Option<f32>,
}

impl CubeChanges {
    /// Fold a later update over this one; later leaves win
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            enabled: later.enabled.or(self.enabled),
            position: later.position.or(self.position),
            scale: later.scale.or(self.scale),
        }
    }

    /// Produce a new section value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &CubeState) -> CubeState {
        let mut next = base.clone();
        if let Some(enabled) = self.enabled {
            next.enabled = enabled;
        }
        if let Some(position) = self.position {
            next.position = position;
        }
        if let Some(scale) = self.scale {
            next.scale = scale;
        }
        next
    }
}

/// Intersection-outline rendering
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineState {
    /// Whether outlines are drawn
    pub enabled: bool,

    /// Outline color
    pub color: Vec3,
}

impl Default for OutlineState {
    fn default() -> Self {
        Self {
            enabled: false,
            color: Vec3::new(2.0, 2.0, 2.0),
        }
    }
}

/// Partial update for the outlines section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlineChanges {
    /// Toggle outline drawing
    pub enabled: Option<bool>,

    /// New outline color
    pub color: Option<Vec3>,
}

impl OutlineChanges {
    /// Fold a later update over this one; later leaves win
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            enabled: later.enabled.or(self.enabled),
            color: later.color.or(self.color),
        }
    }

    /// Produce a new section value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &OutlineState) -> OutlineState {
        let mut next = base.clone();
        if let Some(enabled) = self.enabled {
            next.enabled = enabled;
        }
        if let Some(color) = self.color {
            next.color = color;
        }
        next
    }
}

/// What a highlight group does to its objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightAction {
    /// Leave objects as-is
    Neutral,
    /// Hide objects entirely
    Hide,
    /// Render objects only in pick/filter passes
    Filter,
}

/// A set of objects sharing a highlight action
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightGroup {
    /// Action applied to every object in the group
    pub action: HighlightAction,

    /// Object ids in the group
    pub object_ids: Vec<u32>,
}

/// Object highlighting configuration
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightState {
    /// Action for objects in no group
    pub default_action: HighlightAction,

    /// Highlight groups, applied in order
    pub groups: Vec<HighlightGroup>,
}

impl Default for HighlightState {
    fn default() -> Self {
        Self {
            default_action: HighlightAction::Neutral,
            groups: Vec::new(),
        }
    }
}

/// Partial update for the highlights section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightChanges {
    /// New default action
    pub default_action: Option<HighlightAction>,

    /// Replacement group list
    pub groups: Option<Vec<HighlightGroup>>,
}

impl HighlightChanges {
    /// Fold a later update over this one; later leaves win
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            default_action: later.default_action.or(self.default_action),
            groups: later.groups.or(self.groups),
        }
    }

    /// Produce a new section value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &HighlightState) -> HighlightState {
        let mut next = base.clone();
        if let Some(default_action) = self.default_action {
            next.default_action = default_action;
        }
        if let Some(groups) = &self.groups {
            next.groups = groups.clone();
        }
        next
    }
}

/// What the tone-mapping pass outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TonemappingMode {
    /// Shaded color output
    Color,
    /// World-space normals, for debugging
    Normal,
    /// Linearized depth, for debugging
    Depth,
    /// Object ids as colors, for debugging
    ObjectId,
}

/// Tone-mapping configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TonemappingState {
    /// Exposure adjustment in stops
    pub exposure: f32,

    /// Output mode
    pub mode: TonemappingMode,
}

impl Default for TonemappingState {
    fn default() -> Self {
        Self {
            exposure: 0.5,
            mode: TonemappingMode::Color,
        }
    }
}

/// Partial update for the tone-mapping section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TonemappingChanges {
    /// New exposure
    pub exposure: Option<f32>,

    /// New output mode
    pub mode: Option<TonemappingMode>,
}

impl TonemappingChanges {
    /// Fold a later update over this one; later leaves win
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            exposure: later.exposure.or(self.exposure),
            mode: later.mode.or(self.mode),
        }
    }

    /// Produce a new section value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &TonemappingState) -> TonemappingState {
        let mut next = base.clone();
        if let Some(exposure) = self.exposure {
            next.exposure = exposure;
        }
        if let Some(mode) = self.mode {
            next.mode = mode;
        }
        next
    }
}

/// Point sizing, a nested composite inside the points section
#[derive(Debug, Clone, PartialEq)]
pub struct PointSizeState {
    /// Fixed size in pixels
    pub pixel: f32,

    /// Optional upper bound in pixels for metric sizing
    pub max_pixel: Option<f32>,

    /// Size in scene units; `0` disables metric sizing
    pub metric: f32,

    /// How aggressively tolerance scales point size
    pub tolerance_factor: f32,
}

impl Default for PointSizeState {
    fn default() -> Self {
        Self {
            pixel: 1.0,
            max_pixel: None,
            metric: 0.0,
            tolerance_factor: 0.0,
        }
    }
}

/// Partial update for point sizing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSizeChanges {
    /// New fixed pixel size
    pub pixel: Option<f32>,

    /// New pixel upper bound; `Some(None)` removes the bound
    pub max_pixel: Option<Option<f32>>,

    /// New metric size
    pub metric: Option<f32>,

    /// New tolerance factor
    pub tolerance_factor: Option<f32>,
}

impl PointSizeChanges {
    /// Fold a later update over this one; later leaves win
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            pixel: later.pixel.or(self.pixel),
            max_pixel: later.max_pixel.or(self.max_pixel),
            metric: later.metric.or(self.metric),
            tolerance_factor: later.tolerance_factor.or(self.tolerance_factor),
        }
    }

    /// Produce a new composite value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &PointSizeState) -> PointSizeState {
        let mut next = base.clone();
        if let Some(pixel) = self.pixel {
            next.pixel = pixel;
        }
        if let Some(max_pixel) = self.max_pixel {
            next.max_pixel = max_pixel;
        }
        if let Some(metric) = self.metric {
            next.metric = metric;
        }
        if let Some(tolerance_factor) = self.tolerance_factor {
            next.tolerance_factor = tolerance_factor;
        }
        next
    }
}

/// Point-cloud rendering configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointsState {
    /// Point sizing parameters
    pub size: PointSizeState,
}

/// Partial update for the points section
///
/// `size` is a composite, so a present patch merges into the existing
/// composite field-by-field rather than replacing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointsChanges {
    /// Nested sizing update
    pub size: Option<PointSizeChanges>,
}

impl PointsChanges {
    /// Fold a later update over this one; nested composites merge recursively
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            size: match (self.size, later.size) {
                (Some(earlier), Some(later)) => Some(earlier.merged(later)),
                (earlier, None) => earlier,
                (None, later) => later,
            },
        }
    }

    /// Produce a new section value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &PointsState) -> PointsState {
        PointsState {
            size: match &self.size {
                Some(size) => size.applied_to(&base.size),
                None => base.size.clone(),
            },
        }
    }
}

/// Toon-style outline pass
#[derive(Debug, Clone, PartialEq)]
pub struct ToonOutlineState {
    /// Whether toon outlines are drawn
    pub enabled: bool,

    /// Outline color
    pub color: Vec3,

    /// Only draw when the camera is at rest
    pub only_on_idle: bool,
}

impl Default for ToonOutlineState {
    fn default() -> Self {
        Self {
            enabled: false,
            color: Vec3::zeros(),
            only_on_idle: true,
        }
    }
}

/// Partial update for the toon-outline section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToonOutlineChanges {
    /// Toggle toon outlines
    pub enabled: Option<bool>,

    /// New outline color
    pub color: Option<Vec3>,

    /// New idle-only behavior
    pub only_on_idle: Option<bool>,
}

impl ToonOutlineChanges {
    /// Fold a later update over this one; later leaves win
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            enabled: later.enabled.or(self.enabled),
            color: later.color.or(self.color),
            only_on_idle: later.only_on_idle.or(self.only_on_idle),
        }
    }

    /// Produce a new section value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &ToonOutlineState) -> ToonOutlineState {
        let mut next = base.clone();
        if let Some(enabled) = self.enabled {
            next.enabled = enabled;
        }
        if let Some(color) = self.color {
            next.color = color;
        }
        if let Some(only_on_idle) = self.only_on_idle {
            next.only_on_idle = only_on_idle;
        }
        next
    }
}

/// Pick-pass configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PickState {
    /// Minimum opacity for a surface to be pickable
    pub opacity_threshold: f32,
}

impl Default for PickState {
    fn default() -> Self {
        Self {
            opacity_threshold: 1.0,
        }
    }
}

/// Partial update for the pick section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickChanges {
    /// New opacity threshold
    pub opacity_threshold: Option<f32>,
}

impl PickChanges {
    /// Fold a later update over this one; later leaves win
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            opacity_threshold: later.opacity_threshold.or(self.opacity_threshold),
        }
    }

    /// Produce a new section value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &PickState) -> PickState {
        PickState {
            opacity_threshold: self.opacity_threshold.unwrap_or(base.opacity_threshold),
        }
    }
}

/// Debug visualization toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugState {
    /// Draw octree/node bounds
    pub show_node_bounds: bool,

    /// Render geometry as wireframe
    pub wireframe: bool,
}

/// Partial update for the debug section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugChanges {
    /// Toggle node-bound drawing
    pub show_node_bounds: Option<bool>,

    /// Toggle wireframe rendering
    pub wireframe: Option<bool>,
}

impl DebugChanges {
    /// Fold a later update over this one; later leaves win
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            show_node_bounds: later.show_node_bounds.or(self.show_node_bounds),
            wireframe: later.wireframe.or(self.wireframe),
        }
    }

    /// Produce a new section value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &DebugState) -> DebugState {
        DebugState {
            show_node_bounds: self.show_node_bounds.unwrap_or(base.show_node_bounds),
            wireframe: self.wireframe.unwrap_or(base.wireframe),
        }
    }
}

/// Background configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundState {
    /// Clear color when no environment is set
    pub color: Vec4,

    /// Blur factor for environment backgrounds, `0` = sharp
    pub blur: f32,

    /// Optional environment-map location
    pub url: Option<String>,
}

impl Default for BackgroundState {
    fn default() -> Self {
        Self {
            color: Vec4::new(0.33, 0.33, 0.33, 1.0),
            blur: 0.0,
            url: None,
        }
    }
}

/// Partial update for the background section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackgroundChanges {
    /// New clear color
    pub color: Option<Vec4>,

    /// New blur factor
    pub blur: Option<f32>,

    /// New environment location; `Some(None)` removes the environment
    pub url: Option<Option<String>>,
}

impl BackgroundChanges {
    /// Fold a later update over this one; later leaves win
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            color: later.color.or(self.color),
            blur: later.blur.or(self.blur),
            url: later.url.or(self.url),
        }
    }

    /// Produce a new section value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &BackgroundState) -> BackgroundState {
        let mut next = base.clone();
        if let Some(color) = self.color {
            next.color = color;
        }
        if let Some(blur) = self.blur {
            next.blur = blur;
        }
        if let Some(url) = &self.url {
            next.url = url.clone();
        }
        next
    }
}
