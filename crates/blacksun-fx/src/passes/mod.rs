//! GPU passes, drawn back to front by the compositor.

mod particles;
mod sun;

pub use particles::ParticlePass;
pub use sun::SunPass;
