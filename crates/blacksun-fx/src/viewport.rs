//! Viewport monitoring.
//!
//! Tracks the drawable surface size in device pixels. A zero-sized surface is
//! "not ready" and is never published downstream.

use std::num::NonZeroU32;

/// Drawable size in device pixels; both components are positive by construction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ViewportSize {
    width: NonZeroU32,
    height: NonZeroU32,
}

impl ViewportSize {
    /// Returns `None` if either component is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }

    #[inline]
    pub fn width(self) -> u32 {
        self.width.get()
    }

    #[inline]
    pub fn height(self) -> u32 {
        self.height.get()
    }

    #[inline]
    pub fn aspect(self) -> f32 {
        self.width() as f32 / self.height() as f32
    }

    #[inline]
    pub fn as_f32(self) -> [f32; 2] {
        [self.width() as f32, self.height() as f32]
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResizeOutcome {
    /// A new size was published.
    Changed(ViewportSize),
    /// Same size as the one already published; nothing downstream changes.
    Unchanged(ViewportSize),
    /// Zero-sized surface; the previous size is withdrawn until a positive one arrives.
    NotReady,
}

#[derive(Debug, Default)]
pub struct ViewportMonitor {
    current: Option<ViewportSize>,
    revision: u64,
}

impl ViewportMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a new surface size.
    pub fn on_resize(&mut self, width: u32, height: u32) -> ResizeOutcome {
        let Some(size) = ViewportSize::new(width, height) else {
            if self.current.take().is_some() {
                self.revision += 1;
                log::debug!("viewport not ready ({width}x{height})");
            }
            return ResizeOutcome::NotReady;
        };

        if self.current == Some(size) {
            return ResizeOutcome::Unchanged(size);
        }

        self.current = Some(size);
        self.revision += 1;
        log::debug!("viewport {}x{}", size.width(), size.height());
        ResizeOutcome::Changed(size)
    }

    /// Last published size, or `None` while not ready.
    #[inline]
    pub fn current(&self) -> Option<ViewportSize> {
        self.current
    }

    /// Incremented on every published change.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_component_is_rejected() {
        assert!(ViewportSize::new(0, 600).is_none());
        assert!(ViewportSize::new(800, 0).is_none());
    }

    #[test]
    fn starts_not_ready() {
        assert_eq!(ViewportMonitor::new().current(), None);
    }

    #[test]
    fn repeated_size_is_unchanged() {
        let mut m = ViewportMonitor::new();
        assert!(matches!(m.on_resize(800, 600), ResizeOutcome::Changed(_)));
        let rev = m.revision();
        assert!(matches!(m.on_resize(800, 600), ResizeOutcome::Unchanged(_)));
        assert_eq!(m.revision(), rev);
    }

    #[test]
    fn zero_size_withdraws_until_positive() {
        let mut m = ViewportMonitor::new();
        m.on_resize(800, 600);
        assert_eq!(m.on_resize(0, 0), ResizeOutcome::NotReady);
        assert_eq!(m.current(), None);
        assert!(matches!(m.on_resize(800, 600), ResizeOutcome::Changed(_)));
    }
}
