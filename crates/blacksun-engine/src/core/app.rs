use winit::dpi::PhysicalSize;
use winit::window::WindowId;

use crate::input::{InputEvent, InputResponse};

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Lifecycle per window: `on_attach` once after the GPU context exists, then any
/// interleaving of `on_input` / `on_resize` / `on_frame`, then `on_detach` once
/// before the window and its GPU context are dropped. No callback for a window
/// follows its `on_detach`.
pub trait App {
    /// Called once when a window and its GPU context are ready.
    fn on_attach(&mut self, window: &WindowCtx<'_>) {
        let _ = window;
    }

    /// Called for every translated input event, as it arrives (between frames).
    fn on_input(&mut self, window: &WindowCtx<'_>, event: &InputEvent) -> InputResponse {
        let _ = (window, event);
        InputResponse::IGNORED
    }

    /// Called when the drawable (physical) size of a window changes.
    fn on_resize(&mut self, window_id: WindowId, size: PhysicalSize<u32>) {
        let _ = (window_id, size);
    }

    /// Called once per rendered frame per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once before a window is torn down.
    fn on_detach(&mut self, window_id: WindowId) {
        let _ = window_id;
    }
}
