//! Output-surface section of the state tree

use crate::core::config::GraphicsApi;
use bitflags::bitflags;

bitflags! {
    /// Backend-specific output-surface capabilities
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OutputFlags: u32 {
        /// Surface stores colors in sRGB encoding
        const SRGB_SURFACE = 1;
        /// Surface contents are preserved across presents
        const PRESERVE_BUFFER = 1 << 1;
        /// Backend supports multisampled output
        const MSAA_SUPPORTED = 1 << 2;
    }
}

/// Output surface dimensions and backend flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputState {
    /// Surface width in physical pixels
    pub width: u32,

    /// Surface height in physical pixels
    pub height: u32,

    /// MSAA sample count for the output surface
    pub samples: u32,

    /// Backend-specific surface flags
    pub flags: OutputFlags,
}

impl OutputState {
    /// Default output state for the given graphics API flavor
    ///
    /// The section shape is identical across flavors; only sample count and
    /// surface flags differ.
    pub fn default_for(api: GraphicsApi) -> Self {
        match api {
            GraphicsApi::Vulkan => Self {
                width: 512,
                height: 256,
                samples: 4,
                flags: OutputFlags::MSAA_SUPPORTED,
            },
            GraphicsApi::OpenGl => Self {
                width: 512,
                height: 256,
                samples: 1,
                flags: OutputFlags::SRGB_SURFACE | OutputFlags::PRESERVE_BUFFER,
            },
        }
    }
}

impl Default for OutputState {
    fn default() -> Self {
        Self::default_for(GraphicsApi::default())
    }
}

/// Partial update for the output section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputChanges {
    /// New surface width
    pub width: Option<u32>,

    /// New surface height
    pub height: Option<u32>,

    /// New MSAA sample count
    pub samples: Option<u32>,

    /// New surface flags
    pub flags: Option<OutputFlags>,
}

impl OutputChanges {
    /// Partial update setting only the surface dimensions
    pub fn resize(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Fold a later update over this one; later leaves win
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            width: later.width.or(self.width),
            height: later.height.or(self.height),
            samples: later.samples.or(self.samples),
            flags: later.flags.or(self.flags),
        }
    }

    /// Produce a new section value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &OutputState) -> OutputState {
        let mut next = base.clone();
        if let Some(width) = self.width {
            next.width = width;
        }
        if let Some(height) = self.height {
            next.height = height;
        }
        if let Some(samples) = self.samples {
            next.samples = samples;
        }
        if let Some(flags) = self.flags {
            next.flags = flags;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_flavors_share_shape() {
        let vulkan = OutputState::default_for(GraphicsApi::Vulkan);
        let gl = OutputState::default_for(GraphicsApi::OpenGl);
        assert_eq!((vulkan.width, vulkan.height), (gl.width, gl.height));
        assert_ne!(vulkan.samples, gl.samples);
        assert_ne!(vulkan.flags, gl.flags);
    }

    #[test]
    fn test_resize_leaves_samples_untouched() {
        let base = OutputState::default_for(GraphicsApi::Vulkan);
        let next = OutputChanges::resize(1920, 1080).applied_to(&base);
        assert_eq!((next.width, next.height), (1920, 1080));
        assert_eq!(next.samples, base.samples);
    }

    #[test]
    fn test_later_update_wins() {
        let merged = OutputChanges::resize(100, 100).merged(OutputChanges::resize(200, 150));
        assert_eq!(merged.width, Some(200));
        assert_eq!(merged.height, Some(150));
    }
}
