//! One mounted visual session.
//!
//! Owns every stateful piece of the effect and wires them together with an
//! explicit lifecycle. Nothing here touches the GPU: the render side is
//! reached only through a [`UniformTarget`] handed to [`Session::tick`].

use blacksun_engine::coords::Viewport;
use blacksun_engine::input::{InputEvent, InputResponse};

use crate::camera::{CameraController, OrthoCamera};
use crate::config::EffectConfig;
use crate::driver::{DriverState, FrameDriver, TickOutcome, UniformTarget};
use crate::intro::IntroTimeline;
use crate::listeners::{Listeners, Owner};
use crate::particles::ParticleField;
use crate::pointer::{PointerState, PointerTracker};
use crate::viewport::{ResizeOutcome, ViewportMonitor, ViewportSize};

#[derive(Debug)]
pub struct Session {
    listeners: Listeners,
    tracker: PointerTracker,
    monitor: ViewportMonitor,
    driver: FrameDriver,
    camera: CameraController,
    particles: ParticleField,
    intro: IntroTimeline,
}

impl Session {
    pub fn new(config: &EffectConfig) -> Self {
        Self {
            listeners: Listeners::new(),
            tracker: PointerTracker::new(config.initial_pointer),
            monitor: ViewportMonitor::new(),
            driver: FrameDriver::new(),
            camera: CameraController::new(config.camera.clone()),
            particles: ParticleField::new(&config.particles),
            intro: IntroTimeline::new(&config.intro),
        }
    }

    /// Subscribes every component and starts the frame driver.
    ///
    /// Returns `false` if the session was already attached or has been torn down.
    pub fn attach(&mut self) -> bool {
        if self.driver.state() != DriverState::Idle {
            return false;
        }
        self.tracker.attach(&mut self.listeners);
        self.camera.attach(&mut self.listeners);
        self.driver.attach(&mut self.listeners);
        log::info!("session attached ({} listeners)", self.listeners.active());
        true
    }

    /// Tears the session down: input listeners first, then the frame driver.
    ///
    /// After this no tick mutates anything. Idempotent.
    pub fn detach(&mut self) {
        if self.driver.state() == DriverState::Detached {
            return;
        }
        self.tracker.detach(&mut self.listeners);
        self.camera.detach(&mut self.listeners);
        self.driver.detach(&mut self.listeners);
        log::info!(
            "session detached after {} frames",
            self.driver.frames_written()
        );
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.driver.state() == DriverState::Attached
    }

    /// Live subscriptions; zero after [`Session::detach`].
    #[inline]
    pub fn active_listeners(&self) -> usize {
        self.listeners.active()
    }

    /// Delivers an input event to its subscribers.
    ///
    /// `viewport` is the logical window size the event coordinates are in.
    /// The pointer tracker always sees the event before the camera, and the
    /// camera never consumes it.
    pub fn handle_input(&mut self, event: &InputEvent, viewport: Viewport) -> InputResponse {
        if !self.is_attached() {
            return InputResponse::IGNORED;
        }

        let mut response = InputResponse::IGNORED;
        if self.listeners.wants(Owner::PointerTracker, event) {
            response = response.merge(self.tracker.handle(event, viewport));
        }
        if self.listeners.wants(Owner::CameraController, event) {
            self.camera.handle(event);
        }
        response
    }

    /// Publishes the render surface size in physical pixels.
    pub fn resize(&mut self, width: u32, height: u32) -> ResizeOutcome {
        self.monitor.on_resize(width, height)
    }

    /// Runs one frame tick against `target` and advances the intro overlay.
    pub fn tick(&mut self, host_elapsed: f64, target: &mut dyn UniformTarget) -> TickOutcome {
        let outcome = self.driver.tick(
            host_elapsed,
            self.tracker.state(),
            self.monitor.current(),
            target,
        );
        if let Some(elapsed) = self.driver.elapsed() {
            self.intro.advance(elapsed);
        }
        outcome
    }

    #[inline]
    pub fn pointer(&self) -> PointerState {
        self.tracker.state()
    }

    #[inline]
    pub fn viewport(&self) -> Option<ViewportSize> {
        self.monitor.current()
    }

    #[inline]
    pub fn camera(&self) -> OrthoCamera {
        self.camera.camera()
    }

    #[inline]
    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    #[inline]
    pub fn intro(&self) -> &IntroTimeline {
        &self.intro
    }

    /// Session clock in seconds, `0.0` before the first tick.
    pub fn elapsed(&self) -> f64 {
        self.driver.elapsed().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::tests::Recorder;
    use blacksun_engine::input::{
        Modifiers, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent, TouchEvent,
        TouchPhase,
    };

    const LOGICAL: Viewport = Viewport::new(800.0, 600.0);

    fn session() -> Session {
        let mut s = Session::new(&EffectConfig::default());
        assert!(s.attach());
        s.resize(800, 600);
        s
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    #[test]
    fn attach_subscribes_everything() {
        let s = session();
        // 4 pointer + 5 camera + 1 frame.
        assert_eq!(s.active_listeners(), 10);
    }

    #[test]
    fn teardown_with_pending_tick_leaves_no_listeners() {
        let mut s = session();
        let mut target = Recorder { ready: true, ..Default::default() };
        s.tick(0.0, &mut target);
        s.detach();
        assert_eq!(s.active_listeners(), 0);
        // The tick that was scheduled before teardown runs and does nothing.
        assert_eq!(s.tick(0.016, &mut target), TickOutcome::Inactive);
        assert_eq!(target.writes.len(), 1);
        s.detach();
        assert!(!s.attach());
    }

    #[test]
    fn input_after_teardown_is_ignored() {
        let mut s = session();
        s.detach();
        s.handle_input(&moved(0.0, 0.0), LOGICAL);
        assert_eq!(s.pointer(), PointerState::CENTER);
    }

    #[test]
    fn touch_start_scenario() {
        let mut s = session();
        s.handle_input(&moved(0.0, 0.0), LOGICAL);
        let response = s.handle_input(
            &InputEvent::Touch(TouchEvent { id: 3, phase: TouchPhase::Started, x: 400.0, y: 300.0 }),
            LOGICAL,
        );
        assert_eq!(s.pointer(), PointerState::new(0.5, 0.5));
        assert!(response.suppress_default);
    }

    fn left_press() -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x: 400.0,
            y: 300.0,
            modifiers: Modifiers::default(),
        })
    }

    #[test]
    fn focus_loss_ends_drag_while_attached() {
        let mut s = session();
        s.handle_input(&left_press(), LOGICAL);
        assert!(s.camera.is_dragging());
        s.handle_input(&InputEvent::Focused(false), LOGICAL);
        assert!(!s.camera.is_dragging());

        s.handle_input(&left_press(), LOGICAL);
        s.handle_input(&InputEvent::PointerLeft, LOGICAL);
        assert!(!s.camera.is_dragging());
    }

    #[test]
    fn focus_loss_after_teardown_is_ignored() {
        let mut s = session();
        s.handle_input(&left_press(), LOGICAL);
        s.detach();
        s.handle_input(&InputEvent::Focused(false), LOGICAL);
        assert!(s.camera.is_dragging());
    }

    #[test]
    fn camera_drag_does_not_hide_pointer_moves() {
        let mut s = session();
        s.handle_input(&left_press(), LOGICAL);
        s.handle_input(&moved(200.0, 150.0), LOGICAL);
        assert_eq!(s.pointer(), PointerState::new(0.25, 0.75));
        assert_ne!(s.camera(), OrthoCamera::IDENTITY);
    }

    #[test]
    fn same_size_twice_does_not_change_uniforms() {
        let mut s = session();
        let mut target = Recorder { ready: true, ..Default::default() };
        s.tick(1.0, &mut target);
        assert!(matches!(s.resize(800, 600), ResizeOutcome::Unchanged(_)));
        s.tick(1.0, &mut target);
        assert_eq!(target.writes[0], target.writes[1]);
    }

    #[test]
    fn zero_size_defers_until_positive() {
        let mut s = session();
        let mut target = Recorder { ready: true, ..Default::default() };
        s.resize(0, 600);
        assert!(matches!(s.tick(0.0, &mut target), TickOutcome::NotReady(_)));
        s.resize(1024, 768);
        let TickOutcome::Wrote(u) = s.tick(0.1, &mut target) else {
            panic!("expected a write");
        };
        assert_eq!(u.resolution.as_f32(), [1024.0, 768.0]);
    }

    #[test]
    fn pointer_moves_coalesce_into_next_tick() {
        let mut s = session();
        let mut target = Recorder { ready: true, ..Default::default() };
        s.handle_input(&moved(0.0, 0.0), LOGICAL);
        s.handle_input(&moved(800.0, 600.0), LOGICAL);
        s.tick(0.0, &mut target);
        assert_eq!(target.writes.len(), 1);
        assert_eq!(target.writes[0].mouse, PointerState::new(1.0, 0.0));
    }
}
