//! # Render Sync
//!
//! A per-frame synchronization engine between CAD-space interaction state
//! and a device-space renderer.
//!
//! ## Features
//!
//! - **Immutable State Trees**: Persistent render state with structural
//!   sharing; reference identity doubles as change detection
//! - **Partial Merge**: Sparse deltas fold together (later wins) and apply
//!   without mutating their inputs
//! - **Coordinate Flip**: Bit-exact relabeling between Z-up CAD space and
//!   Y-up render space
//! - **Dirty-Tracking Scheduler**: At most one submission per display tick,
//!   and only when the render-facing tree actually changed
//! - **Context-Loss Supervision**: Device loss suspends scheduling; restore
//!   force-resubmits the full state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use render_sync::prelude::*;
//!
//! # fn collaborators() -> (Box<dyn FrameClock>, Box<dyn RenderContext>,
//! #     Box<dyn Controller>, Box<dyn Surface>) { unimplemented!() }
//! fn main() -> Result<(), SchedulerError> {
//!     let config = ViewConfig::default();
//!     let (clock, context, controller, surface) = collaborators();
//!     let mut scheduler = FrameScheduler::new(&config, clock, context, controller, surface)?;
//!     scheduler.run()
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod api;
pub mod coordinates;
pub mod core;
pub mod foundation;
pub mod scheduler;
pub mod state;

pub use api::{Controller, FrameClock, RenderContext, RenderStats, SubmissionError, Surface};
pub use scheduler::{
    ContextLifecycle, ContextSupervisor, FrameScheduler, FrameStatistics, SchedulerError,
    TickOutcome,
};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        api::{ContextResult, Controller, FrameClock, RenderContext, RenderStats, SubmissionError, Surface},
        coordinates::{flip_changes, flipped_state, FlipDirection},
        core::config::{Config, DeviceProfile, GpuTier, GraphicsApi, ViewConfig},
        foundation::math::{Mat4, Quat, Vec3, Vec4},
        scheduler::{
            ContextLifecycle, FrameScheduler, FrameStatistics, SchedulerError, TickOutcome,
        },
        state::{CadState, CameraChanges, CameraState, OutputChanges, RenderState, StateChanges},
    };
}
