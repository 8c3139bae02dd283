//! Drifting particle field drawn over the sun.
//!
//! Every particle orbits its own base point; the motion is a pure function of
//! time so a frame can be reproduced from `(seed, t)` alone.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::config::ParticleConfig;

/// Per-particle constants, drawn once from the seed.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Particle {
    base: Vec2,
    phase: f32,
    amplitude: f32,
    /// Horizontal frequency multiplier; the vertical axis runs at 1.
    wobble: f32,
}

/// One particle at a point in time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParticleSample {
    /// World position (logical px at zoom 1, Y up).
    pub position: Vec2,
    pub opacity: f32,
}

pub const MIN_OPACITY: f32 = 0.25;
pub const MAX_OPACITY: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    speed: f32,
    size: f32,
}

impl ParticleField {
    pub fn new(config: &ParticleConfig) -> Self {
        let mut rng = fastrand::Rng::with_seed(config.seed);
        let half = config.scale.max(0.0) * 0.5;
        let max_amp = config.scale.max(0.0) * 0.05;

        let particles = (0..config.count)
            .map(|_| Particle {
                base: Vec2::new(
                    (rng.f32() * 2.0 - 1.0) * half,
                    (rng.f32() * 2.0 - 1.0) * half,
                ),
                phase: rng.f32() * TAU,
                amplitude: rng.f32() * max_amp,
                wobble: 0.5 + rng.f32(),
            })
            .collect();

        Self {
            particles,
            speed: config.speed,
            size: config.size,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Sprite diameter in logical pixels.
    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Positions and opacities at `time` seconds.
    ///
    /// Opacity twinkles at twice the drift rate, between [`MIN_OPACITY`] and
    /// [`MAX_OPACITY`].
    pub fn sample(&self, time: f32) -> impl Iterator<Item = ParticleSample> + '_ {
        let t = time * self.speed;
        self.particles.iter().map(move |p| ParticleSample {
            position: Vec2::new(
                p.base.x + (t * p.wobble + p.phase).sin() * p.amplitude,
                p.base.y + (t + p.phase).cos() * p.amplitude,
            ),
            opacity: twinkle((t * 2.0 + p.phase).sin()),
        })
    }
}

#[inline]
fn twinkle(wave: f32) -> f32 {
    let unit = 0.5 + 0.5 * wave;
    MIN_OPACITY + unit * (MAX_OPACITY - MIN_OPACITY)
}
