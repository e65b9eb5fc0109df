//! Orbit demo application
//!
//! Drives the synchronization engine with an orbiting camera and a render
//! context that logs every submission instead of drawing. A scripted
//! context-loss window partway through exercises suspension and the forced
//! full resubmission on restore.

use nalgebra::UnitQuaternion;
use render_sync::prelude::*;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Fixed-period clock standing in for a display's refresh signal
struct IntervalClock {
    start: Instant,
    period: Duration,
}

impl IntervalClock {
    fn new(period: Duration) -> Self {
        Self {
            start: Instant::now(),
            period,
        }
    }
}

impl FrameClock for IntervalClock {
    fn next_frame(&mut self) -> Duration {
        thread::sleep(self.period);
        self.start.elapsed()
    }
}

/// Logging render context with a scripted loss window
struct TraceContext {
    start: Instant,
    lost_window: std::ops::Range<Duration>,
    last_submit: Option<Instant>,
    submissions: u64,
}

impl TraceContext {
    fn new(lost_window: std::ops::Range<Duration>) -> Self {
        Self {
            start: Instant::now(),
            lost_window,
            last_submit: None,
            submissions: 0,
        }
    }
}

impl RenderContext for TraceContext {
    fn init(&mut self) -> ContextResult<()> {
        log::info!("trace context initialized");
        Ok(())
    }

    fn is_lost(&self) -> bool {
        self.lost_window.contains(&self.start.elapsed())
    }

    fn changed(&self) -> bool {
        false
    }

    fn poll(&mut self) {}

    fn serializes_frames(&self) -> bool {
        true
    }

    fn submit(&mut self, state: &Arc<RenderState>) -> ContextResult<Receiver<RenderStats>> {
        let now = Instant::now();
        let encode_start = now;
        self.submissions += 1;
        log::debug!(
            "submission {}: camera at {:?}, output {}x{}",
            self.submissions,
            state.camera.position,
            state.output.width,
            state.output.height,
        );

        let frame_interval = self
            .last_submit
            .map_or(Duration::ZERO, |prev| now.duration_since(prev));
        self.last_submit = Some(now);

        let (tx, rx) = channel();
        let _ = tx.send(RenderStats {
            frame_interval,
            cpu_time: encode_start.elapsed(),
        });
        Ok(rx)
    }

    fn notify_lost(&mut self) {
        log::warn!("trace context reports loss");
    }

    fn notify_restored(&mut self) -> ContextResult<()> {
        log::info!("trace context restored after {} submissions", self.submissions);
        Ok(())
    }
}

/// Circles the camera around the scene origin in the Z-up convention
struct OrbitController {
    radius: f32,
    height: f32,
    angular_speed: f32,
    angle: f32,
}

impl OrbitController {
    fn new(radius: f32, height: f32, angular_speed: f32) -> Self {
        Self {
            radius,
            height,
            angular_speed,
            angle: 0.0,
        }
    }
}

impl Controller for OrbitController {
    fn compute_delta(&mut self, _camera: &CameraState, elapsed: Duration) -> Option<StateChanges> {
        if elapsed.is_zero() {
            return None;
        }
        self.angle += self.angular_speed * elapsed.as_secs_f32();

        let position = Vec3::new(
            self.radius * self.angle.cos(),
            self.radius * self.angle.sin(),
            self.height,
        );
        // Keep the camera facing the origin: yaw with the orbit angle.
        let rotation = UnitQuaternion::from_axis_angle(
            &Vec3::z_axis(),
            self.angle + std::f32::consts::FRAC_PI_2,
        );

        Some(StateChanges::camera(CameraChanges {
            position: Some(position),
            rotation: Some(rotation),
            ..CameraChanges::default()
        }))
    }
}

/// A surface whose size never changes
struct FixedSurface {
    width: u32,
    height: u32,
}

impl Surface for FixedSurface {
    fn physical_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn main() -> Result<(), SchedulerError> {
    render_sync::foundation::logging::init();

    let config = ViewConfig::new(GraphicsApi::Vulkan).with_tier(GpuTier::High);
    log::info!(
        "starting orbit demo, device profile {:?}",
        config.device_profile()
    );

    let mut scheduler = FrameScheduler::new(
        &config,
        Box::new(IntervalClock::new(Duration::from_millis(16))),
        Box::new(TraceContext::new(
            Duration::from_secs(2)..Duration::from_secs(3),
        )),
        Box::new(OrbitController::new(10.0, 3.0, 0.8)),
        Box::new(FixedSurface {
            width: 1280,
            height: 720,
        }),
    )?;

    let mut submitted = 0u64;
    let mut idle = 0u64;
    let mut suspended = 0u64;
    for frame in 0..300 {
        match scheduler.tick()? {
            TickOutcome::Submitted => submitted += 1,
            TickOutcome::Idle => idle += 1,
            TickOutcome::Suspended => suspended += 1,
        }

        if frame % 60 == 59 {
            if let Some(stats) = scheduler.statistics() {
                log::info!(
                    "frame {}: {:.1} fps, cpu {:?}, detail bias {:.2}",
                    frame + 1,
                    stats.fps.unwrap_or(0.0),
                    stats.render.cpu_time,
                    stats.detail_bias,
                );
            }
        }
    }

    log::info!(
        "orbit demo finished: {} submitted, {} idle, {} suspended",
        submitted,
        idle,
        suspended,
    );
    Ok(())
}
