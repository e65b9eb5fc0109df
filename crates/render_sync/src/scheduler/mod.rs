//! Dirty-tracking frame scheduler
//!
//! The central control loop, one iteration per display-refresh tick: wait
//! for the frame boundary, collect a delta from the controller, fold it
//! into any pending delta, apply it to the CAD-space tree as-is and to the
//! render-space tree through the coordinate flip, then submit at most one
//! render if and only if the render-facing tree actually changed.
//!
//! Change detection is a reference comparison: applying a delta yields a
//! new tree reference iff content changed (see [`RenderState::modified`]),
//! so "dirty" is `!Arc::ptr_eq(last_submitted, render_state)` plus the
//! context's own edge-triggered `changed` flag.

mod supervisor;

pub use supervisor::{ContextLifecycle, ContextSupervisor, LifecycleEvent};

use crate::api::{Controller, FrameClock, RenderContext, RenderStats, SubmissionError, Surface};
use crate::coordinates::{flip_changes, flipped_state, FlipDirection};
use crate::core::config::{DeviceProfile, ViewConfig};
use crate::foundation::time::FrameTimer;
use crate::state::{CadState, OutputChanges, RenderState, StateChanges};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use thiserror::Error;

/// Scheduler-level errors
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Frame submission failed; likely a fatal device condition
    #[error("frame submission failed: {0}")]
    Submission(#[from] SubmissionError),
}

/// What one scheduler tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Context lost; everything but tick-waiting was suspended
    Suspended,
    /// Nothing changed and nothing was submitted
    Idle,
    /// A frame was submitted
    Submitted,
}

/// Per-frame statistics derived from submission completions
///
/// A read-only side channel: never fed back into the merge pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStatistics {
    /// Statistics reported by the render context
    pub render: RenderStats,

    /// Resolution modifier from the device profile
    pub resolution_modifier: f32,

    /// Effective detail bias (device profile x scene bias)
    pub detail_bias: f32,

    /// Frames per second implied by the frame interval, if nonzero
    pub fps: Option<f32>,
}

/// The per-view frame scheduler
///
/// Owns both state trees and the "last submitted" marker; collaborators
/// produce deltas and consume submissions but never write the trees
/// directly, so the trees need no synchronization.
pub struct FrameScheduler {
    clock: Box<dyn FrameClock>,
    context: Box<dyn RenderContext>,
    controller: Box<dyn Controller>,
    surface: Box<dyn Surface>,
    supervisor: ContextSupervisor,
    profile: DeviceProfile,
    /// Authoritative tree in the CAD interaction convention
    cad_state: Arc<CadState>,
    /// The same scene in the render convention
    render_state: Arc<RenderState>,
    /// Render-space tree the context last received
    last_submitted: Option<Arc<RenderState>>,
    /// Delta folded but not yet applied
    pending: Option<StateChanges>,
    timer: FrameTimer,
    /// Completion channels of overlapping (non-serialized) submissions
    in_flight: Vec<Receiver<RenderStats>>,
    statistics: Option<FrameStatistics>,
}

impl FrameScheduler {
    /// Create a scheduler and initialize the render context
    ///
    /// Both trees are seeded from the backend-flavored defaults: the CAD
    /// tree directly, the render tree through the coordinate flip.
    pub fn new(
        config: &ViewConfig,
        clock: Box<dyn FrameClock>,
        mut context: Box<dyn RenderContext>,
        controller: Box<dyn Controller>,
        surface: Box<dyn Surface>,
    ) -> Result<Self, SchedulerError> {
        log::info!("initializing frame scheduler for {:?} backend", config.api);
        context.init()?;

        let cad_state = Arc::new(CadState::default_for(config.api));
        let render_state = Arc::new(flipped_state(&cad_state, FlipDirection::CadToRender));

        Ok(Self {
            clock,
            context,
            controller,
            surface,
            supervisor: ContextSupervisor::new(),
            profile: config.device_profile(),
            cad_state,
            render_state,
            last_submitted: None,
            pending: None,
            timer: FrameTimer::new(),
            in_flight: Vec::new(),
            statistics: None,
        })
    }

    /// The authoritative CAD-space state tree
    pub fn cad_state(&self) -> &Arc<CadState> {
        &self.cad_state
    }

    /// The render-space state tree
    pub fn render_state(&self) -> &Arc<RenderState> {
        &self.render_state
    }

    /// Statistics from the most recently completed submission
    pub fn statistics(&self) -> Option<&FrameStatistics> {
        self.statistics.as_ref()
    }

    /// Current context lifecycle state
    pub fn lifecycle(&self) -> ContextLifecycle {
        self.supervisor.state()
    }

    /// Queue an externally produced CAD-space delta for the next tick
    ///
    /// Folded with any delta already pending; applied on the next healthy
    /// tick exactly like controller deltas.
    pub fn push_changes(&mut self, changes: StateChanges) {
        self.queue(changes);
    }

    /// Run the loop until an error occurs
    ///
    /// There is no cancellation signal by design; termination happens with
    /// view teardown, which drops the scheduler.
    pub fn run(&mut self) -> Result<(), SchedulerError> {
        loop {
            self.tick()?;
        }
    }

    /// Execute one scheduler tick
    pub fn tick(&mut self) -> Result<TickOutcome, SchedulerError> {
        // 1. Frame boundary: the sole per-tick suspension point.
        let timestamp = self.clock.next_frame();
        let elapsed = self.timer.advance(timestamp);

        // 2. Context-loss gate. While lost, the stale marker stays cleared
        // so the first healthy tick resubmits in full.
        self.supervisor.poll(self.context.as_mut())?;
        if self.supervisor.is_lost() {
            self.last_submitted = None;
            return Ok(TickOutcome::Suspended);
        }

        self.drain_in_flight();
        self.context.poll();

        // 3–4. Collect this tick's controller delta and fold it into any
        // carried-over pending delta.
        if let Some(delta) = self.controller.compute_delta(&self.cad_state.camera, elapsed) {
            self.queue(delta);
        }

        // 5. Surface size is polled, not pushed; a change synthesizes an
        // output delta independent of the controller.
        let (width, height) = self.surface.physical_size();
        if (width, height) != (self.cad_state.output.width, self.cad_state.output.height) {
            log::debug!("surface resized to {}x{}", width, height);
            self.queue(StateChanges::output(OutputChanges::resize(width, height)));
        }

        // 6. Dual application: the CAD tree takes the delta unflipped, the
        // render tree takes a flipped copy of the same delta.
        if let Some(changes) = self.pending.take() {
            self.cad_state = CadState::modified(&self.cad_state, &changes);
            let mut flipped = changes;
            flip_changes(&mut flipped, FlipDirection::CadToRender);
            self.render_state = RenderState::modified(&self.render_state, &flipped);
        }

        // 7. Dirty gate: reference inequality against the last submission,
        // or the context's own changed flag.
        let reference_dirty = self
            .last_submitted
            .as_ref()
            .map_or(true, |prev| !Arc::ptr_eq(prev, &self.render_state));
        if !reference_dirty && !self.context.changed() {
            return Ok(TickOutcome::Idle);
        }

        // 8. Submit and record the new marker. Serializing backends are
        // awaited here; others complete on a later tick.
        let completion = self.context.submit(&self.render_state)?;
        self.last_submitted = Some(Arc::clone(&self.render_state));
        log::trace!("frame {} submitted", self.timer.frame_count());

        if self.context.serializes_frames() {
            let stats = completion.recv().map_err(|_| SubmissionError::Disconnected)?;
            self.record_statistics(stats);
        } else {
            self.in_flight.push(completion);
        }

        Ok(TickOutcome::Submitted)
    }

    fn queue(&mut self, changes: StateChanges) {
        self.pending = Some(match self.pending.take() {
            Some(pending) => pending.merged(changes),
            None => changes,
        });
    }

    /// Collect completions of earlier fire-and-forget submissions
    fn drain_in_flight(&mut self) {
        let mut completed = Vec::new();
        self.in_flight.retain(|rx| match rx.try_recv() {
            Ok(stats) => {
                completed.push(stats);
                false
            }
            Err(TryRecvError::Empty) => true,
            // A context dropped mid-frame during loss; nothing to record.
            Err(TryRecvError::Disconnected) => false,
        });
        for stats in completed {
            self.record_statistics(stats);
        }
    }

    fn record_statistics(&mut self, render: RenderStats) {
        let secs = render.frame_interval.as_secs_f32();
        self.statistics = Some(FrameStatistics {
            render,
            resolution_modifier: self.profile.resolution_modifier,
            detail_bias: self.profile.detail_bias * self.cad_state.scene.detail_bias,
            fps: (secs > 0.0).then(|| 1.0 / secs),
        });
    }
}
