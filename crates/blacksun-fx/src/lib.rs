//! Dithered black-sun effect.
//!
//! A full-screen shader draws a pulsing, ordered-dithered disc with a halo that
//! follows the pointer. A camera-controllable particle field composites on top.
//!
//! Data flows one way: input → [`pointer::PointerTracker`] →
//! [`driver::FrameDriver`] → sun uniforms → frame. The surface size reaches the
//! driver through [`viewport::ViewportMonitor`].

pub mod camera;
pub mod compositor;
pub mod config;
pub mod driver;
pub mod intro;
pub mod listeners;
pub mod particles;
pub mod pointer;
pub mod session;
pub mod shader;
pub mod viewport;

mod app;
mod passes;

pub use app::BlackSun;
pub use config::{CameraConfig, EffectConfig, HaloConfig, IntroConfig, ParticleConfig, SunConfig};
pub use passes::{ParticlePass, SunPass};
pub use pointer::PointerState;
pub use session::Session;
