//! Context-loss and recovery supervision
//!
//! Device/context loss is a lifecycle transition, not an error: while the
//! context is lost the scheduler only waits for ticks and polls for
//! restoration, and the first healthy tick afterwards force-resubmits.

use crate::api::{RenderContext, SubmissionError};

/// Lifecycle of the underlying render context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextLifecycle {
    /// Device and surface usable, frames may be submitted
    #[default]
    Active,
    /// Device or surface lost; scheduling is suspended
    Lost,
}

/// Edge event produced by one lifecycle poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// No transition this tick
    Unchanged,
    /// The context just became lost
    BecameLost,
    /// The context was just restored
    Restored,
}

/// Watches the render context for device loss and restoration
#[derive(Debug, Default)]
pub struct ContextSupervisor {
    state: ContextLifecycle,
}

impl ContextSupervisor {
    /// Create a supervisor assuming an active context
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state
    pub fn state(&self) -> ContextLifecycle {
        self.state
    }

    /// Whether the context is currently lost
    pub fn is_lost(&self) -> bool {
        self.state == ContextLifecycle::Lost
    }

    /// Poll the context once and fire lifecycle hooks on transitions
    pub fn poll(
        &mut self,
        context: &mut dyn RenderContext,
    ) -> Result<LifecycleEvent, SubmissionError> {
        let lost = context.is_lost();
        match (self.state, lost) {
            (ContextLifecycle::Active, true) => {
                self.state = ContextLifecycle::Lost;
                log::warn!("render context lost; suspending frame scheduling");
                context.notify_lost();
                Ok(LifecycleEvent::BecameLost)
            }
            (ContextLifecycle::Lost, false) => {
                self.state = ContextLifecycle::Active;
                context.notify_restored()?;
                log::info!("render context restored; next frame will resubmit in full");
                Ok(LifecycleEvent::Restored)
            }
            _ => Ok(LifecycleEvent::Unchanged),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ContextResult, RenderStats};
    use crate::state::RenderState;
    use std::sync::mpsc::Receiver;
    use std::sync::Arc;

    #[derive(Default)]
    struct ProbeContext {
        lost: bool,
        lost_notifications: u32,
        restored_notifications: u32,
    }

    impl RenderContext for ProbeContext {
        fn init(&mut self) -> ContextResult<()> {
            Ok(())
        }
        fn is_lost(&self) -> bool {
            self.lost
        }
        fn changed(&self) -> bool {
            false
        }
        fn poll(&mut self) {}
        fn serializes_frames(&self) -> bool {
            true
        }
        fn submit(&mut self, _state: &Arc<RenderState>) -> ContextResult<Receiver<RenderStats>> {
            unreachable!("supervisor never submits")
        }
        fn notify_lost(&mut self) {
            self.lost_notifications += 1;
        }
        fn notify_restored(&mut self) -> ContextResult<()> {
            self.restored_notifications += 1;
            Ok(())
        }
    }

    #[test]
    fn test_loss_and_restore_are_edges() {
        let mut context = ProbeContext::default();
        let mut supervisor = ContextSupervisor::new();

        assert_eq!(
            supervisor.poll(&mut context).unwrap(),
            LifecycleEvent::Unchanged
        );

        context.lost = true;
        assert_eq!(
            supervisor.poll(&mut context).unwrap(),
            LifecycleEvent::BecameLost
        );
        assert_eq!(
            supervisor.poll(&mut context).unwrap(),
            LifecycleEvent::Unchanged
        );
        assert!(supervisor.is_lost());
        assert_eq!(context.lost_notifications, 1);

        context.lost = false;
        assert_eq!(
            supervisor.poll(&mut context).unwrap(),
            LifecycleEvent::Restored
        );
        assert!(!supervisor.is_lost());
        assert_eq!(context.restored_notifications, 1);
    }
}
