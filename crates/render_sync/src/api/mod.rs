//! Collaborator contracts for the synchronization engine
//!
//! The renderer, input translation, and presentation timing are external
//! collaborators. These traits are the exact surface the engine requires of
//! each; everything behind them (GPU devices, windowing, picking) is out of
//! scope.

use crate::state::{CameraState, RenderState, StateChanges};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for render-context operations
pub type ContextResult<T> = Result<T, SubmissionError>;

/// Statistics reported by the render context for one completed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    /// Wall time between this frame's completion and the previous one
    pub frame_interval: Duration,

    /// CPU time the context spent encoding the frame
    pub cpu_time: Duration,
}

/// Errors raised by render-context operations
///
/// Device loss is deliberately not represented here: it is a lifecycle
/// transition handled by the scheduler, not a failure.
#[derive(Error, Debug)]
pub enum SubmissionError {
    /// The device failed beyond simple context loss
    #[error("device failure: {0}")]
    DeviceFailure(String),

    /// The backend dropped the statistics channel before completing a frame
    #[error("submission completion channel disconnected")]
    Disconnected,
}

/// Frame clock: blocks until the host's next presentation opportunity
///
/// One call per tick. Timestamps are monotonically increasing and measured
/// from an arbitrary epoch.
pub trait FrameClock {
    /// Wait for the next frame boundary and return its timestamp
    fn next_frame(&mut self) -> Duration;
}

/// Render context: the submission side of an external renderer
///
/// The scheduler calls `poll` exactly once per healthy tick before its
/// dirty check, reads `changed` at most once per tick, and calls `submit`
/// at most once per tick.
pub trait RenderContext {
    /// One-time initialization before the first frame
    fn init(&mut self) -> ContextResult<()>;

    /// Whether the underlying device/surface is currently lost
    fn is_lost(&self) -> bool;

    /// Edge-triggered external change flag
    ///
    /// Set by the context when an asynchronous resource became ready or
    /// some other external cause requires a redraw of an otherwise
    /// unchanged state. Implementations clear it when a frame is submitted.
    fn changed(&self) -> bool;

    /// Drive internal asynchronous readiness forward
    fn poll(&mut self);

    /// Whether submissions must complete before the next tick proceeds
    ///
    /// Backends that permit overlapping submissions return `false`; their
    /// statistics arrive on the returned channel whenever the frame
    /// finishes.
    fn serializes_frames(&self) -> bool;

    /// Submit a frame for rendering
    ///
    /// The receiver yields the frame's statistics on completion. Failure
    /// here indicates a fatal device condition beyond simple loss and is
    /// propagated by the scheduler.
    fn submit(&mut self, state: &Arc<RenderState>) -> ContextResult<Receiver<RenderStats>>;

    /// Lifecycle hook: the supervisor observed the context becoming lost
    fn notify_lost(&mut self);

    /// Lifecycle hook: the supervisor observed the context restored
    fn notify_restored(&mut self) -> ContextResult<()>;
}

/// Controller: translates accumulated input into per-tick state deltas
///
/// Called once per healthy tick. `None` means no input this tick, which is
/// the common case. The controller reads the CAD-space camera; it never
/// writes the state trees directly.
pub trait Controller {
    /// Compute this tick's delta given the current CAD-space camera pose
    /// and the time elapsed since the previous tick
    fn compute_delta(&mut self, camera: &CameraState, elapsed: Duration) -> Option<StateChanges>;
}

/// Output surface, polled (not pushed) for its size once per tick
pub trait Surface {
    /// Current physical pixel dimensions as `(width, height)`
    fn physical_size(&self) -> (u32, u32);
}
