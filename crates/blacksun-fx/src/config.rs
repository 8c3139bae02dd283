//! Effect configuration.
//!
//! Every knob has the default the effect ships with; `EffectConfig::default()`
//! reproduces the stock look.

use std::time::Duration;

use blacksun_engine::paint::Color;

use crate::pointer::PointerState;

/// Disc geometry and dithering.
#[derive(Debug, Clone, PartialEq)]
pub struct SunConfig {
    /// Radius in centred, aspect-corrected units (screen height spans 2.0).
    pub base_radius: f32,
    pub pulse_amplitude: f32,
    /// Radians per second.
    pub pulse_frequency: f32,
    /// How far the 4x4 threshold pulls the edge inwards at its maximum.
    pub dither_spread: f32,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            base_radius: 0.5,
            pulse_amplitude: 0.03,
            pulse_frequency: 1.0,
            dither_spread: 0.09,
        }
    }
}

/// Pointer halo falloff.
///
/// The halo contributes `smoothstep(inner, outer, falloff - d)` where `d` is the
/// aspect-corrected uv distance to the pointer times `distance_scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct HaloConfig {
    pub inner: f32,
    pub outer: f32,
    pub falloff: f32,
    pub distance_scale: f32,
}

impl Default for HaloConfig {
    fn default() -> Self {
        Self {
            inner: 0.1,
            outer: 0.2,
            falloff: 0.3,
            distance_scale: 0.5,
        }
    }
}

/// Foreground particle field.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    /// Side of the square the particles are scattered over, in world units
    /// (logical pixels at zoom 1).
    pub scale: f32,
    /// Sprite diameter in logical pixels.
    pub size: f32,
    pub speed: f32,
    pub color: Color,
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 200,
            scale: 300.0,
            size: 6.0,
            speed: 0.5,
            color: Color::from_u8(0xf5, 0xee, 0xdc, 0xff),
            seed: 0x5eed_b1ac_5017,
        }
    }
}

/// Foreground camera controls.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Zoom multiplier per wheel line.
    pub zoom_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.25,
            max_zoom: 8.0,
            zoom_step: 1.1,
        }
    }
}

/// Letter-by-letter intro overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct IntroConfig {
    pub text: String,
    pub letter_delay: Duration,
    /// Overlay lifetime measured from session start.
    pub timeout: Duration,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            letter_delay: Duration::from_millis(100),
            timeout: Duration::from_millis(20_000),
        }
    }
}

/// Complete effect configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectConfig {
    pub initial_pointer: PointerState,
    pub background: Color,
    pub sun: SunConfig,
    pub halo: HaloConfig,
    pub particles: ParticleConfig,
    pub camera: CameraConfig,
    pub intro: IntroConfig,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            initial_pointer: PointerState::CENTER,
            background: Color::BLACK,
            sun: SunConfig::default(),
            halo: HaloConfig::default(),
            particles: ParticleConfig::default(),
            camera: CameraConfig::default(),
            intro: IntroConfig::default(),
        }
    }
}
