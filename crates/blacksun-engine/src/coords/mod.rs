//! Coordinate and geometry types shared across the engine and the effect layer.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Renderers convert to NDC in shaders using a viewport uniform.

mod viewport;

pub use viewport::Viewport;
