use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    InputResponse,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Pixel wheel deltas are folded into line units at this rate.
pub const PIXELS_PER_LINE: f32 = 100.0;

/// Current input state for a single window.
///
/// Holds "is down" information and the current pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,

    /// Whether the app asked to suppress the platform's default scroll/gesture
    /// handling for the last input event.
    ///
    /// Desktop winit has no default touch gesture to cancel, so this is
    /// recorded for diagnostics only; there it has no effect on the platform.
    pub gesture_suppressed: bool,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss, clear "down" sets to avoid stuck keys/buttons.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        self.keys_down.remove(key);
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
                modifiers,
            }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;

                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }

            InputEvent::MouseWheel { modifiers, .. } => {
                self.modifiers = *modifiers;
            }

            InputEvent::Touch(_) => {}
        }

        frame.push_event(ev);
    }

    /// Stores the app's response to an input event; returns `true` when the
    /// suppression request changed.
    pub fn record_response(&mut self, response: InputResponse) -> bool {
        let changed = self.gesture_suppressed != response.suppress_default;
        self.gesture_suppressed = response.suppress_default;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseWheelDelta, TouchEvent, TouchPhase};

    fn touch(id: u64, phase: TouchPhase) -> InputEvent {
        InputEvent::Touch(TouchEvent { id, phase, x: 10.0, y: 20.0 })
    }

    #[test]
    fn button_transitions_recorded_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let press = InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x: 1.0,
            y: 2.0,
            modifiers: Modifiers::default(),
        });
        state.apply_event(&mut frame, press.clone());
        state.apply_event(&mut frame, press);
        assert!(state.buttons_down.contains(&MouseButton::Left));
        assert_eq!(frame.buttons_pressed.len(), 1);
        assert_eq!(frame.events.len(), 2);
        assert_eq!(state.pointer_pos, Some((1.0, 2.0)));
    }

    #[test]
    fn wheel_updates_modifiers_and_queues_event() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let m = Modifiers { shift: true, ..Modifiers::default() };
        let delta = MouseWheelDelta::Pixel { x: 0.0, y: 50.0 };
        state.apply_event(&mut frame, InputEvent::MouseWheel { delta, modifiers: m });
        assert_eq!(state.modifiers, m);
        assert!((delta.lines_y(PIXELS_PER_LINE) - 0.5).abs() < 1e-6);
        assert_eq!(frame.events.len(), 1);
        frame.clear();
        assert!(frame.events.is_empty());
    }

    #[test]
    fn touch_is_queued_without_held_state() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, touch(7, TouchPhase::Started));
        state.apply_event(&mut frame, touch(7, TouchPhase::Ended));
        assert_eq!(frame.events.len(), 2);
        assert!(state.buttons_down.is_empty());
    }

    #[test]
    fn gesture_response_reports_changes_only() {
        let mut state = InputState::default();
        assert!(!state.record_response(InputResponse::IGNORED));
        assert!(state.record_response(InputResponse::suppress_default()));
        assert!(state.gesture_suppressed);
        assert!(!state.record_response(InputResponse::suppress_default()));
        assert!(state.record_response(InputResponse::IGNORED));
        assert!(!state.gesture_suppressed);
    }

    #[test]
    fn focus_loss_clears_held_state() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::Key {
            key: Key::Space,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat: false,
        });
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.keys_down.contains(&Key::Space));
        assert!(!state.focused);
    }
}
