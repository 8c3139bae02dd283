//! The sun shader: a dithered disc with a pointer halo.
//!
//! `sun.wgsl` is what runs on the GPU. The functions here are a CPU
//! reference of the same per-pixel math, step for step, used to pin down
//! the visual contract in tests.

use bytemuck::{Pod, Zeroable};

use glam::Vec2;

use crate::config::{HaloConfig, SunConfig};
use crate::pointer::PointerState;
use crate::viewport::ViewportSize;

pub const SUN_WGSL: &str = include_str!("sun.wgsl");

/// Side of the ordered-dither cell, in pixels.
pub const DITHER_SIZE: usize = 4;

/// Bayer thresholds, row-major, in sixteenths.
const BAYER_4X4: [f32; DITHER_SIZE * DITHER_SIZE] = [
    0.0, 8.0, 2.0, 10.0,
    12.0, 4.0, 14.0, 6.0,
    3.0, 11.0, 1.0, 9.0,
    15.0, 7.0, 13.0, 5.0,
];

/// Per-frame shader inputs. Written only by the frame driver.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShaderUniforms {
    /// Seconds since the driver's first tick.
    pub time: f32,
    pub mouse: PointerState,
    pub resolution: ViewportSize,
}

/// Shape constants that stay fixed for the lifetime of a session.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SunParams {
    pub base_radius: f32,
    pub pulse_amplitude: f32,
    pub pulse_frequency: f32,
    pub dither_spread: f32,
    pub halo_inner: f32,
    pub halo_outer: f32,
    pub halo_falloff: f32,
    pub halo_scale: f32,
}

impl SunParams {
    pub fn new(sun: &SunConfig, halo: &HaloConfig) -> Self {
        let mut halo_outer = halo.outer;
        if halo_outer <= halo.inner {
            // smoothstep needs a non-empty band.
            halo_outer = halo.inner + 1e-4;
            log::warn!(
                "halo outer radius {} not above inner {}; using {halo_outer}",
                halo.outer,
                halo.inner
            );
        }
        Self {
            base_radius: sun.base_radius,
            pulse_amplitude: sun.pulse_amplitude,
            pulse_frequency: sun.pulse_frequency,
            dither_spread: sun.dither_spread,
            halo_inner: halo.inner,
            halo_outer,
            halo_falloff: halo.falloff,
            halo_scale: halo.distance_scale,
        }
    }

    /// Disc radius at `time` seconds.
    #[inline]
    pub fn radius_at(&self, time: f32) -> f32 {
        self.base_radius + self.pulse_amplitude * (time * self.pulse_frequency).sin()
    }
}

impl Default for SunParams {
    fn default() -> Self {
        Self::new(&SunConfig::default(), &HaloConfig::default())
    }
}

/// GPU layout of the sun uniform block (128 bytes, matches `SunUniforms` in `sun.wgsl`).
///
///  offset   0  view_proj       mat4x4
///  offset  64  quad_size       vec2
///  offset  72  mouse           vec2
///  offset  80  resolution      vec2
///  offset  88  time + 9 scalars
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct SunUniformBlock {
    pub view_proj: [[f32; 4]; 4],
    pub quad_size: [f32; 2],
    pub mouse: [f32; 2],
    pub resolution: [f32; 2],
    pub time: f32,
    pub base_radius: f32,
    pub pulse_amplitude: f32,
    pub pulse_frequency: f32,
    pub dither_spread: f32,
    pub halo_inner: f32,
    pub halo_outer: f32,
    pub halo_falloff: f32,
    pub halo_scale: f32,
    pub _pad: f32,
}

impl SunUniformBlock {
    pub fn new(
        uniforms: &ShaderUniforms,
        params: &SunParams,
        view_proj: glam::Mat4,
        quad_size: [f32; 2],
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            quad_size,
            mouse: [uniforms.mouse.x, uniforms.mouse.y],
            resolution: uniforms.resolution.as_f32(),
            time: uniforms.time,
            base_radius: params.base_radius,
            pulse_amplitude: params.pulse_amplitude,
            pulse_frequency: params.pulse_frequency,
            dither_spread: params.dither_spread,
            halo_inner: params.halo_inner,
            halo_outer: params.halo_outer,
            halo_falloff: params.halo_falloff,
            halo_scale: params.halo_scale,
            _pad: 0.0,
        }
    }
}

// ── reference math ────────────────────────────────────────────────────────

#[inline]
pub fn step(edge: f32, x: f32) -> f32 {
    if x < edge { 0.0 } else { 1.0 }
}

/// Hermite ramp from 0 at `edge0` to 1 at `edge1`; requires `edge0 < edge1`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Ordered-dither threshold in `[0, 15/16]` for a pixel coordinate.
///
/// Periodic with period 4 on both axes; negative coordinates wrap.
pub fn dither4x4(x: f32, y: f32) -> f32 {
    let size = DITHER_SIZE as f32;
    let ix = x.rem_euclid(size) as usize % DITHER_SIZE;
    let iy = y.rem_euclid(size) as usize % DITHER_SIZE;
    BAYER_4X4[ix + iy * DITHER_SIZE] / 16.0
}

/// Centred, aspect-corrected distance from the screen centre.
pub fn center_distance(uv: Vec2, resolution: ViewportSize) -> f32 {
    let c = uv * 2.0 - Vec2::new(1.0, 1.0);
    Vec2::new(c.x * resolution.aspect(), c.y).length()
}

/// Scaled, aspect-corrected distance from the pointer.
pub fn mouse_distance(uv: Vec2, mouse: PointerState, resolution: ViewportSize, params: &SunParams) -> f32 {
    let m = uv - Vec2::new(mouse.x, mouse.y);
    Vec2::new(m.x * resolution.aspect(), m.y).length() * params.halo_scale
}

/// Halo contribution for a scaled pointer distance.
#[inline]
pub fn halo(mouse_dist: f32, params: &SunParams) -> f32 {
    smoothstep(params.halo_inner, params.halo_outer, params.halo_falloff - mouse_dist)
}

/// Shades one pixel.
///
/// `uv` spans the quad with origin bottom-left; `frag` is the pixel
/// coordinate with the same origin. Output is `(sun, sun, sun, 1)`, where
/// `sun` may exceed 1 under the halo.
pub fn shade(uv: Vec2, frag: Vec2, uniforms: &ShaderUniforms, params: &SunParams) -> [f32; 4] {
    let radius = params.radius_at(uniforms.time);
    let dist = center_distance(uv, uniforms.resolution);
    let dither = dither4x4(frag.x, frag.y);

    let mut sun = step(radius - dither * params.dither_spread, dist);
    sun += halo(mouse_distance(uv, uniforms.mouse, uniforms.resolution, params), params);

    [sun, sun, sun, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    fn uniforms(time: f32, mouse: PointerState) -> ShaderUniforms {
        ShaderUniforms {
            time,
            mouse,
            resolution: ViewportSize::new(800, 600).unwrap(),
        }
    }

    /// uv and GL-style pixel coordinate for the centre of pixel `(px, py)` (bottom-left origin).
    fn pixel(px: u32, py: u32) -> (Vec2, Vec2) {
        let frag = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
        (Vec2::new(frag.x / 800.0, frag.y / 600.0), frag)
    }

    // Pointer parked far off-screen so the halo is out of reach.
    const FAR: PointerState = PointerState { x: 10.0, y: 10.0 };

    #[test]
    fn bayer_table_matches_thresholds() {
        let expected = [0, 8, 2, 10, 12, 4, 14, 6, 3, 11, 1, 9, 15, 7, 13, 5];
        for (i, e) in expected.iter().enumerate() {
            let (x, y) = ((i % 4) as f32, (i / 4) as f32);
            assert_eq!(dither4x4(x, y), *e as f32 / 16.0);
        }
    }

    #[test]
    fn dither_is_periodic() {
        for y in -8..8 {
            for x in -8..8 {
                let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
                let d = dither4x4(fx, fy);
                assert_eq!(d, dither4x4(fx + 4.0, fy));
                assert_eq!(d, dither4x4(fx, fy + 4.0));
                assert!((0.0..=15.0 / 16.0).contains(&d));
            }
        }
    }

    #[test]
    fn pixels_well_outside_disc_are_white_without_halo() {
        let u = uniforms(1.3, FAR);
        let p = SunParams::default();
        let r = p.radius_at(u.time);
        let mut checked = 0;
        for py in (0..600).step_by(7) {
            for px in (0..800).step_by(7) {
                let (uv, frag) = pixel(px, py);
                if center_distance(uv, u.resolution) > r + p.dither_spread {
                    assert!(mouse_distance(uv, FAR, u.resolution, &p) >= 0.3);
                    assert_eq!(shade(uv, frag, &u, &p), WHITE);
                    checked += 1;
                }
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn pixels_well_inside_disc_are_black_without_halo() {
        let u = uniforms(2.1, FAR);
        let p = SunParams::default();
        let r = p.radius_at(u.time);
        let mut checked = 0;
        for py in (0..600).step_by(5) {
            for px in (0..800).step_by(5) {
                let (uv, frag) = pixel(px, py);
                if center_distance(uv, u.resolution) < r - p.dither_spread {
                    assert_eq!(shade(uv, frag, &u, &p), BLACK);
                    checked += 1;
                }
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn edge_band_is_dithered_not_smooth() {
        let u = uniforms(0.0, FAR);
        let p = SunParams::default();
        let mut seen = [false; 2];
        for py in 0..600 {
            for px in 0..800 {
                let (uv, frag) = pixel(px, py);
                let d = center_distance(uv, u.resolution);
                if d > 0.5 - 0.08 && d < 0.5 {
                    let v = shade(uv, frag, &u, &p)[0];
                    assert!(v == 0.0 || v == 1.0);
                    seen[v as usize] = true;
                }
            }
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn halo_is_monotone_and_vanishes() {
        let p = SunParams::default();
        assert_eq!(halo(0.0, &p), 1.0);
        let mut prev = halo(0.1, &p);
        assert!((prev - 1.0).abs() < 1e-5);
        for i in 1..=200 {
            let d = 0.1 + 0.2 * i as f32 / 200.0;
            let h = halo(d, &p);
            assert!(h <= prev + 1e-6, "halo increased at {d}");
            prev = h;
        }
        for d in [0.3, 0.31, 0.5, 2.0, 100.0] {
            assert_eq!(halo(d, &p), 0.0);
        }
    }

    #[test]
    fn halo_adds_on_top_of_background() {
        let u = uniforms(0.0, PointerState::new(0.05, 0.05));
        let p = SunParams::default();
        let (uv, frag) = pixel(40, 30);
        assert_eq!(shade(uv, frag, &u, &p)[0], 2.0);
    }

    #[test]
    fn centre_scenario_at_time_zero() {
        let u = uniforms(0.0, PointerState::CENTER);
        let p = SunParams::default();
        assert_eq!(p.radius_at(0.0), 0.5);

        let centre = Vec2::new(0.5, 0.5);
        assert_eq!(mouse_distance(centre, u.mouse, u.resolution, &p), 0.0);
        assert_eq!(halo(0.0, &p), 1.0);
        // Disc interior is 0, so the centre pixel is the halo alone.
        assert_eq!(shade(centre, Vec2::new(400.5, 300.5), &u, &p), WHITE);
    }

    #[test]
    fn out_of_range_pointer_is_tolerated() {
        let p = SunParams::default();
        for mouse in [PointerState::new(-3.0, 7.0), PointerState::new(f32::MAX, 0.0)] {
            let u = uniforms(0.0, mouse);
            let (uv, frag) = pixel(10, 10);
            let out = shade(uv, frag, &u, &p);
            assert!(out.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn shading_is_referentially_transparent() {
        let u = uniforms(4.2, PointerState::new(0.3, 0.6));
        let p = SunParams::default();
        let (uv, frag) = pixel(321, 123);
        assert_eq!(shade(uv, frag, &u, &p), shade(uv, frag, &u, &p));
    }

    #[test]
    fn empty_halo_band_is_widened() {
        let halo = HaloConfig { inner: 0.2, outer: 0.2, ..HaloConfig::default() };
        let p = SunParams::new(&SunConfig::default(), &halo);
        assert!(p.halo_outer > p.halo_inner);
    }

    #[test]
    fn uniform_block_is_16_byte_multiple() {
        assert_eq!(std::mem::size_of::<SunUniformBlock>(), 128);
    }

    #[test]
    fn wgsl_validates_and_uniform_block_matches_layout() {
        let module = naga::front::wgsl::parse_str(SUN_WGSL).expect("sun.wgsl parses");
        naga::valid::Validator::new(naga::valid::ValidationFlags::all(), naga::valid::Capabilities::all())
            .validate(&module)
            .expect("sun.wgsl validates");

        let span = module
            .types
            .iter()
            .find_map(|(_, ty)| match ty.inner {
                naga::TypeInner::Struct { span, .. } if ty.name.as_deref() == Some("SunUniforms") => Some(span),
                _ => None,
            })
            .expect("SunUniforms struct");
        assert_eq!(span as usize, std::mem::size_of::<SunUniformBlock>());
    }
}
