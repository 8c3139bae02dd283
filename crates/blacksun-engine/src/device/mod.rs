//! GPU device and window surface.
//!
//! A zero-sized surface is never configured; resizes report what they did
//! through [`ResizeAction`] and acquire failures map to [`SurfaceErrorAction`].

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
pub use surface::ResizeAction;
