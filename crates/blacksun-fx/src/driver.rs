//! Frame driver: once per rendered frame, snapshot clock, pointer and viewport
//! into the sun shader's uniforms.

use crate::listeners::{Channel, Listeners, Owner};
use crate::pointer::PointerState;
use crate::shader::ShaderUniforms;
use crate::viewport::ViewportSize;

/// Receiver of the per-frame uniform snapshot.
///
/// Implemented by the background pass; `is_ready` is false until its GPU
/// resources exist.
pub trait UniformTarget {
    fn is_ready(&self) -> bool;
    fn write_uniforms(&mut self, uniforms: &ShaderUniforms);
}

/// Session clock: seconds since the driver's first tick.
///
/// Follows the host's elapsed time but never moves backwards.
#[derive(Debug, Default, Clone)]
pub struct Clock {
    origin: Option<f64>,
    elapsed: f64,
}

impl Clock {
    /// Samples the clock against the host's elapsed time.
    pub fn sample(&mut self, host_elapsed: f64) -> f64 {
        let origin = *self.origin.get_or_insert(host_elapsed);
        self.elapsed = self.elapsed.max(host_elapsed - origin);
        self.elapsed
    }

    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DriverState {
    Idle,
    Attached,
    /// Terminal.
    Detached,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NotReady {
    /// No positive viewport size has been published.
    Viewport,
    /// The uniform target has no GPU resources yet.
    Target,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TickOutcome {
    /// One snapshot was written.
    Wrote(ShaderUniforms),
    /// Skipped silently; the next tick retries.
    NotReady(NotReady),
    /// The driver is not attached (idle or torn down); nothing happened.
    Inactive,
}

#[derive(Debug)]
pub struct FrameDriver {
    state: DriverState,
    clock: Option<Clock>,
    frames_written: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            state: DriverState::Idle,
            clock: None,
            frames_written: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Number of snapshots written since attach.
    #[inline]
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Seconds on the session clock, or `None` before attach / after detach.
    pub fn elapsed(&self) -> Option<f64> {
        self.clock.as_ref().map(Clock::elapsed)
    }

    /// Idle → Attached. Returns `false` (and does nothing) from any other state.
    pub fn attach(&mut self, listeners: &mut Listeners) -> bool {
        if self.state != DriverState::Idle {
            log::warn!("frame driver attach ignored in state {:?}", self.state);
            return false;
        }
        listeners.subscribe(Owner::FrameDriver, Channel::Frame);
        self.clock = Some(Clock::default());
        self.state = DriverState::Attached;
        log::debug!("frame driver attached");
        true
    }

    /// Moves to the terminal state and drops the frame subscription. Idempotent.
    pub fn detach(&mut self, listeners: &mut Listeners) {
        listeners.unsubscribe_all(Owner::FrameDriver);
        if self.state != DriverState::Detached {
            log::debug!("frame driver detached after {} frames", self.frames_written);
        }
        self.clock = None;
        self.state = DriverState::Detached;
    }

    /// Runs one frame: sample clock, read pointer, read viewport, write uniforms.
    ///
    /// Last value wins; a skipped frame is never replayed.
    pub fn tick(
        &mut self,
        host_elapsed: f64,
        pointer: PointerState,
        viewport: Option<ViewportSize>,
        target: &mut dyn UniformTarget,
    ) -> TickOutcome {
        let Some(clock) = self.clock.as_mut() else {
            return TickOutcome::Inactive;
        };
        if self.state != DriverState::Attached {
            return TickOutcome::Inactive;
        }

        let time = clock.sample(host_elapsed) as f32;

        let Some(resolution) = viewport else {
            log::trace!("tick skipped: viewport not ready");
            return TickOutcome::NotReady(NotReady::Viewport);
        };
        if !target.is_ready() {
            log::trace!("tick skipped: uniform target not ready");
            return TickOutcome::NotReady(NotReady::Target);
        }

        let uniforms = ShaderUniforms {
            time,
            mouse: pointer,
            resolution,
        };
        target.write_uniforms(&uniforms);
        self.frames_written += 1;

        TickOutcome::Wrote(uniforms)
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory uniform target recording every write.
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub ready: bool,
        pub writes: Vec<ShaderUniforms>,
    }

    impl UniformTarget for Recorder {
        fn is_ready(&self) -> bool {
            self.ready
        }
        fn write_uniforms(&mut self, uniforms: &ShaderUniforms) {
            self.writes.push(*uniforms);
        }
    }

    fn vp() -> Option<ViewportSize> {
        ViewportSize::new(800, 600)
    }

    fn attached() -> (FrameDriver, Listeners) {
        let mut listeners = Listeners::new();
        let mut driver = FrameDriver::new();
        assert!(driver.attach(&mut listeners));
        (driver, listeners)
    }

    #[test]
    fn idle_driver_does_nothing() {
        let mut driver = FrameDriver::new();
        let mut target = Recorder { ready: true, ..Default::default() };
        assert_eq!(driver.tick(1.0, PointerState::CENTER, vp(), &mut target), TickOutcome::Inactive);
        assert!(target.writes.is_empty());
    }

    #[test]
    fn one_write_per_tick() {
        let (mut driver, _l) = attached();
        let mut target = Recorder { ready: true, ..Default::default() };
        for i in 0..5 {
            driver.tick(i as f64 / 60.0, PointerState::CENTER, vp(), &mut target);
        }
        assert_eq!(target.writes.len(), 5);
        assert_eq!(driver.frames_written(), 5);
    }

    #[test]
    fn clock_starts_at_first_tick_and_is_monotonic() {
        let (mut driver, _l) = attached();
        let mut target = Recorder { ready: true, ..Default::default() };
        driver.tick(10.0, PointerState::CENTER, vp(), &mut target);
        driver.tick(11.5, PointerState::CENTER, vp(), &mut target);
        driver.tick(11.0, PointerState::CENTER, vp(), &mut target);
        let times: Vec<f32> = target.writes.iter().map(|u| u.time).collect();
        assert_eq!(times, vec![0.0, 1.5, 1.5]);
    }

    #[test]
    fn unready_target_is_silent_and_retried() {
        let (mut driver, _l) = attached();
        let mut target = Recorder::default();
        assert_eq!(
            driver.tick(0.0, PointerState::CENTER, vp(), &mut target),
            TickOutcome::NotReady(NotReady::Target)
        );
        target.ready = true;
        assert!(matches!(
            driver.tick(0.1, PointerState::CENTER, vp(), &mut target),
            TickOutcome::Wrote(_)
        ));
        assert_eq!(target.writes.len(), 1);
    }

    #[test]
    fn missing_viewport_defers() {
        let (mut driver, _l) = attached();
        let mut target = Recorder { ready: true, ..Default::default() };
        assert_eq!(
            driver.tick(0.0, PointerState::CENTER, None, &mut target),
            TickOutcome::NotReady(NotReady::Viewport)
        );
        assert!(target.writes.is_empty());
    }

    #[test]
    fn snapshot_carries_latest_pointer() {
        let (mut driver, _l) = attached();
        let mut target = Recorder { ready: true, ..Default::default() };
        let p = PointerState::new(0.2, 0.9);
        let TickOutcome::Wrote(u) = driver.tick(0.0, p, vp(), &mut target) else {
            panic!("expected a write");
        };
        assert_eq!(u.mouse, p);
        assert_eq!(u.resolution, vp().unwrap());
    }

    #[test]
    fn detach_is_terminal() {
        let (mut driver, mut listeners) = attached();
        assert_eq!(listeners.active(), 1);
        driver.detach(&mut listeners);
        driver.detach(&mut listeners);
        assert_eq!(listeners.active(), 0);
        assert!(!driver.attach(&mut listeners));
        let mut target = Recorder { ready: true, ..Default::default() };
        assert_eq!(driver.tick(1.0, PointerState::CENTER, vp(), &mut target), TickOutcome::Inactive);
        assert_eq!(driver.elapsed(), None);
    }
}
