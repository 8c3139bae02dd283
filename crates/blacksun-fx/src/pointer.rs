//! Pointer tracking.
//!
//! Raw window coordinates (logical px, origin top-left) become a normalized
//! coordinate with origin bottom-left, the convention the sun shader uses.

use blacksun_engine::coords::Viewport;
use blacksun_engine::input::{InputEvent, InputResponse, PointerMoveEvent, TouchEvent, TouchPhase};

use crate::listeners::{Channel, Listeners, Owner};

/// Normalized pointer position.
///
/// Nominally in `[0, 1]²` but deliberately unclamped: a pointer outside the
/// surface yields values beyond the range and the shader falls off smoothly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Maps client coordinates to a normalized, Y-up coordinate.
///
/// Returns `None` for a viewport without positive finite extent.
pub fn normalize(client_x: f32, client_y: f32, viewport: Viewport) -> Option<PointerState> {
    if !viewport.is_valid() {
        return None;
    }
    Some(PointerState {
        x: client_x / viewport.width,
        y: 1.0 - client_y / viewport.height,
    })
}

const CHANNELS: [Channel; 4] = [
    Channel::PointerMove,
    Channel::TouchStart,
    Channel::TouchMove,
    Channel::TouchEnd,
];

/// Sole writer of [`PointerState`].
///
/// Mouse moves and the primary touch point go through the same normalization.
/// The first touch to start while none is primary becomes primary; other
/// fingers are ignored until it lifts.
#[derive(Debug)]
pub struct PointerTracker {
    state: PointerState,
    primary_touch: Option<u64>,
}

impl PointerTracker {
    pub fn new(initial: PointerState) -> Self {
        Self {
            state: initial,
            primary_touch: None,
        }
    }

    /// Current normalized position.
    #[inline]
    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn attach(&self, listeners: &mut Listeners) {
        for channel in CHANNELS {
            listeners.subscribe(Owner::PointerTracker, channel);
        }
    }

    pub fn detach(&mut self, listeners: &mut Listeners) {
        listeners.unsubscribe_all(Owner::PointerTracker);
        self.primary_touch = None;
    }

    /// Normalizes a raw position against `viewport` and stores it.
    ///
    /// A viewport that is not ready leaves the state untouched.
    pub fn on_pointer_raw(&mut self, client_x: f32, client_y: f32, viewport: Viewport) -> PointerState {
        if let Some(next) = normalize(client_x, client_y, viewport) {
            self.state = next;
        }
        self.state
    }

    /// Applies one touch update; returns whether default gestures must be suppressed.
    pub fn on_touch(&mut self, touch: &TouchEvent, viewport: Viewport) -> InputResponse {
        match touch.phase {
            TouchPhase::Started => {
                if self.primary_touch.is_none() {
                    self.primary_touch = Some(touch.id);
                }
            }
            TouchPhase::Moved => {}
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.primary_touch == Some(touch.id) {
                    self.primary_touch = None;
                }
                return InputResponse::IGNORED;
            }
        }

        if self.primary_touch != Some(touch.id) {
            return InputResponse::IGNORED;
        }

        self.on_pointer_raw(touch.x, touch.y, viewport);
        InputResponse::suppress_default()
    }

    /// Routes an engine input event; events the tracker does not use are ignored.
    pub fn handle(&mut self, event: &InputEvent, viewport: Viewport) -> InputResponse {
        match event {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.on_pointer_raw(*x, *y, viewport);
                InputResponse::IGNORED
            }
            InputEvent::Touch(touch) => self.on_touch(touch, viewport),
            _ => InputResponse::IGNORED,
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(PointerState::CENTER)
    }
}
