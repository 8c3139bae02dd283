//! Application entry point.
//!
//! # Example
//!
//! ```rust,ignore
//! BlackSun::new()
//!     .title("black sun")
//!     .intro_text("WELCOME")
//!     .run()?;
//! ```

use anyhow::Result;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::window::WindowId;

use blacksun_engine::coords::Viewport;
use blacksun_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use blacksun_engine::device::GpuInit;
use blacksun_engine::input::{InputEvent, InputResponse, Key};
use blacksun_engine::paint::Color;
use blacksun_engine::window::{Runtime, RuntimeConfig};

use crate::compositor::{Compositor, ForegroundFrame};
use crate::config::EffectConfig;
use crate::driver::TickOutcome;
use crate::intro::IntroPhase;
use crate::session::Session;
use crate::viewport::ResizeOutcome;

/// Builder for the effect window.
pub struct BlackSun {
    title: String,
    width: f64,
    height: f64,
    config: EffectConfig,
    gpu: GpuInit,
}

impl BlackSun {
    pub fn new() -> Self {
        Self {
            title: "blacksun".to_string(),
            width: 1280.0,
            height: 720.0,
            config: EffectConfig::default(),
            gpu: GpuInit::default(),
        }
    }

    /// Set the window title. The intro text, while shown, is appended to it.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn config(mut self, config: EffectConfig) -> Self {
        self.config = config;
        self
    }

    /// Text revealed letter by letter at startup.
    pub fn intro_text(mut self, text: impl Into<String>) -> Self {
        self.config.intro.text = text.into();
        self
    }

    pub fn gpu(mut self, gpu: GpuInit) -> Self {
        self.gpu = gpu;
        self
    }

    /// Opens the window and runs until it is closed or Escape is pressed.
    pub fn run(self) -> Result<()> {
        let runtime = RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        };
        let gpu = self.gpu.clone();
        Runtime::run(runtime, gpu, EffectApp::new(self))
    }
}

impl Default for BlackSun {
    fn default() -> Self {
        Self::new()
    }
}

// ── EffectApp ─────────────────────────────────────────────────────────────

/// Engine-facing side of [`BlackSun`]. One session per window.
struct EffectApp {
    title: String,
    background: Color,
    session: Session,
    compositor: Compositor,
    /// Intro state the current window title reflects.
    shown: (IntroPhase, usize),
}

impl EffectApp {
    fn new(app: BlackSun) -> Self {
        let session = Session::new(&app.config);
        let shown = (session.intro().phase(), session.intro().visible());
        Self {
            session,
            compositor: Compositor::new(&app.config),
            background: app.config.background,
            title: app.title,
            shown,
        }
    }

    /// The new window title, if the intro overlay changed since the last call.
    fn title_update(&mut self) -> Option<String> {
        let intro = self.session.intro();
        let current = (intro.phase(), intro.visible());
        if current == self.shown {
            return None;
        }
        self.shown = current;
        if intro.phase() == IntroPhase::Done || intro.visible() == 0 {
            return Some(self.title.clone());
        }
        Some(format!("{} · {}", self.title, intro.revealed()))
    }

    fn publish_size(&mut self, size: PhysicalSize<u32>) {
        match self.session.resize(size.width, size.height) {
            ResizeOutcome::Changed(s) => log::debug!("surface {}x{}", s.width(), s.height()),
            ResizeOutcome::Unchanged(_) => {}
            ResizeOutcome::NotReady => log::debug!("surface not ready; deferring frames"),
        }
    }
}

impl App for EffectApp {
    fn on_attach(&mut self, window: &WindowCtx<'_>) {
        self.session.attach();
        self.publish_size(window.physical_size());
    }

    fn on_input(&mut self, window: &WindowCtx<'_>, event: &InputEvent) -> InputResponse {
        let (w, h) = window.logical_size();
        self.session.handle_input(event, Viewport::new(w, h))
    }

    fn on_resize(&mut self, _window_id: WindowId, size: PhysicalSize<u32>) {
        self.publish_size(size);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.keys_pressed.contains(&Key::Escape) {
            log::info!("escape pressed; exiting");
            ctx.runtime.exit();
            return AppControl::Continue;
        }

        let host_elapsed = ctx.time.elapsed;
        let session = &mut self.session;
        let compositor = &mut self.compositor;

        let control = ctx.render(self.background, |rctx, target| {
            compositor.prepare(rctx);

            let outcome = session.tick(host_elapsed, compositor.uniform_target());
            if let TickOutcome::NotReady(reason) = outcome {
                log::trace!("uniforms not written: {reason:?}");
            }

            let foreground = ForegroundFrame {
                field: session.particles(),
                camera: session.camera(),
                time: session.elapsed() as f32,
            };
            compositor.render(rctx, target, &foreground);
        });

        if let Some(title) = self.title_update() {
            ctx.window.window.set_title(&title);
        }

        control
    }

    fn on_detach(&mut self, window_id: WindowId) {
        log::debug!("detaching session from {window_id:?}");
        self.session.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::tests::Recorder;

    #[test]
    fn title_is_rebuilt_only_when_intro_changes() {
        let mut app = EffectApp::new(BlackSun::new().intro_text("AB"));
        assert_eq!(app.title_update(), None);

        app.session.attach();
        app.session.resize(800, 600);
        let mut target = Recorder { ready: true, ..Default::default() };
        app.session.tick(0.0, &mut target);
        assert_eq!(app.title_update().as_deref(), Some("blacksun · A"));
        assert_eq!(app.title_update(), None);

        app.session.tick(0.05, &mut target);
        assert_eq!(app.title_update(), None);
        app.session.tick(0.15, &mut target);
        assert_eq!(app.title_update().as_deref(), Some("blacksun · AB"));
    }
}
