//! Orthographic camera for the foreground layer.

use blacksun_engine::coords::Viewport;
use blacksun_engine::input::{
    InputEvent, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
    PIXELS_PER_LINE,
};
use glam::{Mat4, Vec2};

use crate::config::CameraConfig;
use crate::listeners::{Channel, Listeners, Owner};

/// World units are logical pixels at zoom 1, Y up, origin at the screen centre.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrthoCamera {
    pub center: Vec2,
    pub zoom: f32,
}

impl OrthoCamera {
    pub const IDENTITY: Self = Self {
        center: Vec2::ZERO,
        zoom: 1.0,
    };

    /// World → clip transform for `viewport` (logical px).
    pub fn view_proj(&self, viewport: Viewport) -> Mat4 {
        let zoom = self.zoom.max(f32::EPSILON);
        let half_w = viewport.width.max(1.0) * 0.5 / zoom;
        let half_h = viewport.height.max(1.0) * 0.5 / zoom;
        Mat4::orthographic_rh(
            self.center.x - half_w,
            self.center.x + half_w,
            self.center.y - half_h,
            self.center.y + half_h,
            -1.0,
            1.0,
        )
    }

    /// Screen-space (logical px, Y down) delta to world-space delta.
    pub fn screen_delta_to_world(&self, dx: f32, dy: f32) -> Vec2 {
        Vec2::new(dx, -dy) / self.zoom.max(f32::EPSILON)
    }
}

impl Default for OrthoCamera {
    fn default() -> Self {
        Self::IDENTITY
    }
}

const CHANNELS: [Channel; 5] = [
    Channel::PointerButton,
    Channel::PointerMove,
    Channel::Wheel,
    Channel::Key,
    Channel::Focus,
];

/// Left-drag pans, wheel zooms, `R` resets.
///
/// Never suppresses or consumes events: the pointer tracker sees the same
/// moves while a drag is in progress.
#[derive(Debug)]
pub struct CameraController {
    camera: OrthoCamera,
    config: CameraConfig,
    drag_from: Option<Vec2>,
}

impl CameraController {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            camera: OrthoCamera::IDENTITY,
            config,
            drag_from: None,
        }
    }

    #[inline]
    pub fn camera(&self) -> OrthoCamera {
        self.camera
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn attach(&self, listeners: &mut Listeners) {
        for channel in CHANNELS {
            listeners.subscribe(Owner::CameraController, channel);
        }
    }

    pub fn detach(&mut self, listeners: &mut Listeners) {
        listeners.unsubscribe_all(Owner::CameraController);
        self.drag_from = None;
    }

    /// Moves the camera by a screen-space drag delta.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.camera.center -= self.camera.screen_delta_to_world(dx, dy);
    }

    /// Multiplies zoom by `zoom_step^lines`, clamped to the configured range.
    pub fn zoom_by(&mut self, lines: f32) {
        if !lines.is_finite() || lines == 0.0 {
            return;
        }
        let next = self.camera.zoom * self.config.zoom_step.powf(lines);
        self.camera.zoom = next.clamp(self.config.min_zoom, self.config.max_zoom);
    }

    pub fn reset(&mut self) {
        self.camera = OrthoCamera::IDENTITY;
        self.drag_from = None;
    }

    pub fn handle(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state,
                x,
                y,
                ..
            }) => match state {
                MouseButtonState::Pressed => self.drag_from = Some(Vec2::new(*x, *y)),
                MouseButtonState::Released => self.drag_from = None,
            },
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                if let Some(from) = self.drag_from {
                    let p = Vec2::new(*x, *y);
                    let d = p - from;
                    self.pan(d.x, d.y);
                    self.drag_from = Some(p);
                }
            }
            InputEvent::MouseWheel { delta, .. } => self.zoom_by(delta.lines_y(PIXELS_PER_LINE)),
            InputEvent::Key {
                key: Key::R,
                state: KeyState::Pressed,
                repeat: false,
                ..
            } => {
                log::debug!("camera reset");
                self.reset();
            }
            InputEvent::PointerLeft | InputEvent::Focused(false) => self.drag_from = None,
            _ => {}
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blacksun_engine::input::{Modifiers, MouseWheelDelta};
    use glam::Vec4;

    fn button(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x,
            y,
            modifiers: Modifiers::default(),
        })
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    fn wheel(lines: f32) -> InputEvent {
        InputEvent::MouseWheel {
            delta: MouseWheelDelta::Line { x: 0.0, y: lines },
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn identity_maps_screen_edges_to_clip_edges() {
        let m = OrthoCamera::IDENTITY.view_proj(Viewport::new(800.0, 600.0));
        let right_top = m * Vec4::new(400.0, 300.0, 0.0, 1.0);
        assert!((right_top.x - 1.0).abs() < 1e-6);
        assert!((right_top.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn drag_pans_opposite_to_motion_in_x() {
        let mut c = CameraController::default();
        c.handle(&button(MouseButtonState::Pressed, 100.0, 100.0));
        c.handle(&moved(150.0, 120.0));
        assert_eq!(c.camera().center, Vec2::new(-50.0, 20.0));
        c.handle(&button(MouseButtonState::Released, 150.0, 120.0));
        c.handle(&moved(300.0, 300.0));
        assert_eq!(c.camera().center, Vec2::new(-50.0, 20.0));
    }

    #[test]
    fn pan_scales_with_zoom() {
        let mut c = CameraController::default();
        c.camera.zoom = 2.0;
        c.pan(10.0, 0.0);
        assert_eq!(c.camera().center, Vec2::new(-5.0, 0.0));
    }

    #[test]
    fn moves_without_button_do_not_pan() {
        let mut c = CameraController::default();
        c.handle(&moved(10.0, 10.0));
        c.handle(&moved(90.0, 40.0));
        assert_eq!(c.camera(), OrthoCamera::IDENTITY);
    }

    #[test]
    fn wheel_zoom_is_clamped() {
        let mut c = CameraController::default();
        c.handle(&wheel(1.0));
        assert!((c.camera().zoom - 1.1).abs() < 1e-6);
        c.handle(&wheel(1000.0));
        assert_eq!(c.camera().zoom, 8.0);
        c.handle(&wheel(-1000.0));
        assert_eq!(c.camera().zoom, 0.25);
    }

    #[test]
    fn pixel_wheel_uses_line_height() {
        let mut c = CameraController::default();
        c.handle(&InputEvent::MouseWheel {
            delta: MouseWheelDelta::Pixel { x: 0.0, y: 100.0 },
            modifiers: Modifiers::default(),
        });
        assert!((c.camera().zoom - 1.1).abs() < 1e-6);
    }

    #[test]
    fn r_resets() {
        let mut c = CameraController::default();
        c.pan(30.0, 30.0);
        c.zoom_by(3.0);
        c.handle(&InputEvent::Key {
            key: Key::R,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat: false,
        });
        assert_eq!(c.camera(), OrthoCamera::IDENTITY);
    }

    #[test]
    fn focus_loss_ends_drag() {
        let mut c = CameraController::default();
        c.handle(&button(MouseButtonState::Pressed, 0.0, 0.0));
        assert!(c.is_dragging());
        c.handle(&InputEvent::Focused(false));
        assert!(!c.is_dragging());
    }
}
