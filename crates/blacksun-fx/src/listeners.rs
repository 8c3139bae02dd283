//! Explicit listener registry.
//!
//! Components subscribe to the input channels (and the frame channel) they
//! consume; the session only delivers an event to owners subscribed to its
//! channel. Teardown is observable: `active()` is zero once everything detached.

use blacksun_engine::input::{InputEvent, TouchPhase};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Channel {
    PointerMove,
    PointerButton,
    Wheel,
    TouchStart,
    TouchMove,
    TouchEnd,
    Key,
    /// Pointer leaving the window and focus changes.
    Focus,
    Frame,
}

impl Channel {
    /// Channel an input event is delivered on, if any.
    pub fn of(event: &InputEvent) -> Option<Channel> {
        match event {
            InputEvent::PointerMoved(_) => Some(Channel::PointerMove),
            InputEvent::PointerButton(_) => Some(Channel::PointerButton),
            InputEvent::MouseWheel { .. } => Some(Channel::Wheel),
            InputEvent::Touch(t) => Some(match t.phase {
                TouchPhase::Started => Channel::TouchStart,
                TouchPhase::Moved => Channel::TouchMove,
                TouchPhase::Ended | TouchPhase::Cancelled => Channel::TouchEnd,
            }),
            InputEvent::Key { .. } => Some(Channel::Key),
            InputEvent::PointerLeft | InputEvent::Focused(_) => Some(Channel::Focus),
            InputEvent::ModifiersChanged(_) => None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Owner {
    PointerTracker,
    CameraController,
    FrameDriver,
}

#[derive(Debug, Default)]
pub struct Listeners {
    subs: Vec<(Owner, Channel)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the subscription already existed.
    pub fn subscribe(&mut self, owner: Owner, channel: Channel) -> bool {
        if self.is_subscribed(owner, channel) {
            return false;
        }
        self.subs.push((owner, channel));
        true
    }

    /// Removes every subscription held by `owner`; returns how many were removed.
    pub fn unsubscribe_all(&mut self, owner: Owner) -> usize {
        let before = self.subs.len();
        self.subs.retain(|(o, _)| *o != owner);
        before - self.subs.len()
    }

    pub fn is_subscribed(&self, owner: Owner, channel: Channel) -> bool {
        self.subs.contains(&(owner, channel))
    }

    /// Whether `owner` should receive `event`.
    pub fn wants(&self, owner: Owner, event: &InputEvent) -> bool {
        Channel::of(event).is_some_and(|c| self.is_subscribed(owner, c))
    }

    /// Number of live subscriptions.
    pub fn active(&self) -> usize {
        self.subs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blacksun_engine::input::{PointerMoveEvent, TouchEvent};

    #[test]
    fn duplicate_subscription_is_rejected() {
        let mut l = Listeners::new();
        assert!(l.subscribe(Owner::FrameDriver, Channel::Frame));
        assert!(!l.subscribe(Owner::FrameDriver, Channel::Frame));
        assert_eq!(l.active(), 1);
    }

    #[test]
    fn unsubscribe_all_only_touches_owner() {
        let mut l = Listeners::new();
        l.subscribe(Owner::PointerTracker, Channel::PointerMove);
        l.subscribe(Owner::PointerTracker, Channel::TouchMove);
        l.subscribe(Owner::CameraController, Channel::PointerMove);
        assert_eq!(l.unsubscribe_all(Owner::PointerTracker), 2);
        assert_eq!(l.active(), 1);
        assert!(l.is_subscribed(Owner::CameraController, Channel::PointerMove));
    }

    #[test]
    fn wants_routes_by_channel() {
        let mut l = Listeners::new();
        l.subscribe(Owner::PointerTracker, Channel::TouchStart);
        let start = InputEvent::Touch(TouchEvent { id: 0, phase: TouchPhase::Started, x: 0.0, y: 0.0 });
        let moved = InputEvent::PointerMoved(PointerMoveEvent { x: 0.0, y: 0.0 });
        assert!(l.wants(Owner::PointerTracker, &start));
        assert!(!l.wants(Owner::PointerTracker, &moved));
        assert!(!l.wants(Owner::PointerTracker, &InputEvent::Focused(true)));
    }

    #[test]
    fn leave_and_focus_share_a_channel() {
        assert_eq!(Channel::of(&InputEvent::PointerLeft), Some(Channel::Focus));
        assert_eq!(Channel::of(&InputEvent::Focused(false)), Some(Channel::Focus));
        assert_eq!(Channel::of(&InputEvent::Focused(true)), Some(Channel::Focus));
        assert_eq!(Channel::of(&InputEvent::ModifiersChanged(Default::default())), None);

        let mut l = Listeners::new();
        l.subscribe(Owner::CameraController, Channel::Focus);
        assert!(l.wants(Owner::CameraController, &InputEvent::PointerLeft));
        assert!(!l.wants(Owner::PointerTracker, &InputEvent::PointerLeft));
    }
}
