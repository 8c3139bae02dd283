//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and record passes
//! into the frame encoder supplied through `RenderTarget`.
//!
//! Convention:
//! - CPU geometry is in logical pixels unless a renderer documents otherwise.
//! - Shaders receive the physical surface size when they work per pixel.

mod common;
mod ctx;

pub use common::{
    premul_alpha_blend, uniform_min_binding_size, QuadVertex, QUAD_INDICES, QUAD_VERTICES,
};
pub use ctx::{RenderCtx, RenderTarget};
