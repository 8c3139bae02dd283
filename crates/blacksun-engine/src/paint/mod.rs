//! Paint model shared between the effect layer and renderers.

pub mod color;

pub use color::Color;
