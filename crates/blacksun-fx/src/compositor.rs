//! Layer stack: the sun fills the background, particles draw on top.

use blacksun_engine::render::{RenderCtx, RenderTarget};

use crate::camera::OrthoCamera;
use crate::config::EffectConfig;
use crate::driver::UniformTarget;
use crate::particles::ParticleField;
use crate::passes::{ParticlePass, SunPass};
use crate::shader::SunParams;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Layer {
    Background,
    Foreground,
}

impl Layer {
    /// Back to front.
    pub const PAINT_ORDER: [Layer; 2] = [Layer::Background, Layer::Foreground];
}

/// What the foreground needs for one frame.
pub struct ForegroundFrame<'a> {
    pub field: &'a ParticleField,
    pub camera: OrthoCamera,
    pub time: f32,
}

pub struct Compositor {
    sun: SunPass,
    particles: ParticlePass,
}

impl Compositor {
    pub fn new(config: &EffectConfig) -> Self {
        Self {
            sun: SunPass::new(SunParams::new(&config.sun, &config.halo)),
            particles: ParticlePass::new(config.particles.color),
        }
    }

    /// Ensures every layer has its GPU resources for the current surface format.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>) {
        self.sun.prepare(ctx);
        self.particles.prepare(ctx);
    }

    /// The background layer's uniform sink, handed to the frame driver.
    pub fn uniform_target(&mut self) -> &mut dyn UniformTarget {
        &mut self.sun
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        foreground: &ForegroundFrame<'_>,
    ) {
        for layer in Layer::PAINT_ORDER {
            match layer {
                Layer::Background => self.sun.render(ctx, target),
                Layer::Foreground => self.particles.render(
                    ctx,
                    target,
                    foreground.field,
                    &foreground.camera,
                    foreground.time,
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_paints_first() {
        assert_eq!(Layer::PAINT_ORDER, [Layer::Background, Layer::Foreground]);
    }

    #[test]
    fn target_not_ready_before_prepare() {
        let mut c = Compositor::new(&EffectConfig::default());
        assert!(!c.uniform_target().is_ready());
    }
}
