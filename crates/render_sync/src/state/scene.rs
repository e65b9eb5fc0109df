//! Scene and terrain sections of the state tree

/// Loaded-scene configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    /// Location of the scene asset; `None` when no scene is loaded
    pub url: Option<String>,

    /// Geometry detail bias applied on top of the device profile
    pub detail_bias: f32,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            url: None,
            detail_bias: 1.0,
        }
    }
}

/// Partial update for the scene section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneChanges {
    /// New scene location; `Some(None)` unloads the scene
    pub url: Option<Option<String>>,

    /// New detail bias
    pub detail_bias: Option<f32>,
}

impl SceneChanges {
    /// Fold a later update over this one; later leaves win
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            url: later.url.or(self.url),
            detail_bias: later.detail_bias.or(self.detail_bias),
        }
    }

    /// Produce a new section value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &SceneState) -> SceneState {
        let mut next = base.clone();
        if let Some(url) = &self.url {
            next.url = url.clone();
        }
        if let Some(detail_bias) = self.detail_bias {
            next.detail_bias = detail_bias;
        }
        next
    }
}

/// Terrain rendering configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainState {
    /// Render terrain behind all other geometry
    pub as_background: bool,

    /// Lower bound of the elevation gradient
    pub min_elevation: f32,

    /// Upper bound of the elevation gradient
    pub max_elevation: f32,
}

impl Default for TerrainState {
    fn default() -> Self {
        Self {
            as_background: false,
            min_elevation: 0.0,
            max_elevation: 100.0,
        }
    }
}

/// Partial update for the terrain section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainChanges {
    /// Toggle background rendering
    pub as_background: Option<bool>,

    /// New gradient lower bound
    pub min_elevation: Option<f32>,

    /// New gradient upper bound
    pub max_elevation: Option<f32>,
}

impl TerrainChanges {
    /// Fold a later update over this one; later leaves win
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            as_background: later.as_background.or(self.as_background),
            min_elevation: later.min_elevation.or(self.min_elevation),
            max_elevation: later.max_elevation.or(self.max_elevation),
        }
    }

    /// Produce a new section value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &TerrainState) -> TerrainState {
        let mut next = base.clone();
        if let Some(as_background) = self.as_background {
            next.as_background = as_background;
        }
        if let Some(min_elevation) = self.min_elevation {
            next.min_elevation = min_elevation;
        }
        if let Some(max_elevation) = self.max_elevation {
            next.max_elevation = max_elevation;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_url_clear_vs_absent() {
        let base = SceneState {
            url: Some("scenes/plant.ron".to_string()),
            detail_bias: 1.0,
        };

        // Absent leaf: no change.
        let untouched = SceneChanges {
            detail_bias: Some(2.0),
            ..SceneChanges::default()
        }
        .applied_to(&base);
        assert_eq!(untouched.url.as_deref(), Some("scenes/plant.ron"));

        // Explicit clear: unloads.
        let cleared = SceneChanges {
            url: Some(None),
            ..SceneChanges::default()
        }
        .applied_to(&base);
        assert_eq!(cleared.url, None);
    }
}
