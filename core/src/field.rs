//! Background point-cloud generation.
//!
//! Three policies, each a pure function of an RNG stream and a
//! parameter set:
//!   - Starfield: uniform in a cube.
//!   - Disc: uniform polar radius and angle in a thin disc, with
//!     optional random color blend and size per point.
//!   - Spiral: logarithmic-looking arms from a branch + spin formula
//!     with power-law jitter that concentrates points on each arm.
//!
//! The field is decorative. It is never hit-tested and its points are
//! never touched after generation; animation only rotates the layer.

use crate::{
    color::Rgb,
    config::{DiscParams, FieldConfig, SpiralParams, StarfieldParams},
    rng::StreamRng,
};
use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

/// A generated point buffer. Colors and sizes are per point when present.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPoints {
    pub policy: &'static str,
    pub positions: Vec<Vec3>,
    pub colors: Option<Vec<Rgb>>,
    pub sizes: Option<Vec<f32>>,
    /// Point size used when `sizes` is absent.
    pub uniform_size: f32,
}

impl FieldPoints {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// `[x0, y0, z0, x1, ...]`, the layout vertex buffers expect.
    pub fn position_buffer(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| p.to_array()).collect()
    }

    /// `[r0, g0, b0, r1, ...]` in [0, 1], when colors were generated.
    pub fn color_buffer(&self) -> Option<Vec<f32>> {
        self.colors
            .as_ref()
            .map(|colors| colors.iter().flat_map(|c| c.to_unit()).collect())
    }
}

/// Generate the background field described by `config`.
pub fn generate(config: &FieldConfig, rng: &mut StreamRng) -> FieldPoints {
    let points = match config {
        FieldConfig::Starfield(p) => starfield(p, rng),
        FieldConfig::Disc(p) => disc(p, rng),
        FieldConfig::Spiral(p) => spiral(p, rng),
    };
    log::info!(
        "generated {} field: {} points (stream={})",
        points.policy,
        points.len(),
        rng.name
    );
    points
}

pub fn starfield(params: &StarfieldParams, rng: &mut StreamRng) -> FieldPoints {
    let positions = (0..params.count)
        .map(|_| {
            Vec3::new(
                rng.spread(params.spread),
                rng.spread(params.spread),
                rng.spread(params.spread),
            )
        })
        .collect();

    FieldPoints {
        policy: "starfield",
        positions,
        colors: None,
        sizes: None,
        uniform_size: params.size,
    }
}

pub fn disc(params: &DiscParams, rng: &mut StreamRng) -> FieldPoints {
    let blend = params.color_a.zip(params.color_b);
    let mut positions = Vec::with_capacity(params.count);
    let mut colors = blend.map(|_| Vec::with_capacity(params.count));
    let mut sizes = params.size_range.map(|_| Vec::with_capacity(params.count));

    for _ in 0..params.count {
        let r = rng.range(0.0, params.radius);
        let theta = rng.range(0.0, TAU);
        let y = rng.spread(params.thickness);
        positions.push(Vec3::new(theta.cos() * r, y, theta.sin() * r));

        if let (Some((a, b)), Some(colors)) = (blend, colors.as_mut()) {
            colors.push(a.lerp(b, rng.next_f32()));
        }
        if let (Some((min, max)), Some(sizes)) = (params.size_range, sizes.as_mut()) {
            sizes.push(rng.range(min, max));
        }
    }

    FieldPoints {
        policy: "disc",
        positions,
        colors,
        sizes,
        uniform_size: params.size_range.map(|(min, _)| min).unwrap_or(0.1),
    }
}

/// Angle of branch `index mod branches`, in radians.
///
/// Assigning branches round-robin rather than at random keeps every arm
/// equally populated.
pub fn branch_angle(index: usize, branches: u32) -> f32 {
    let branches = branches.max(1) as usize;
    (index % branches) as f32 / branches as f32 * TAU
}

/// Power-law jitter: `±1 · u^power · randomness · scale`.
pub fn jitter(rng: &mut StreamRng, power: f32, randomness: f32, scale: f32) -> f32 {
    let sign = rng.sign();
    sign * rng.next_f32().powf(power) * randomness * scale
}

pub fn spiral(params: &SpiralParams, rng: &mut StreamRng) -> FieldPoints {
    let palette = params.inside_color.zip(params.outside_color);
    let mut positions = Vec::with_capacity(params.count);
    let mut colors = palette.map(|_| Vec::with_capacity(params.count));

    for i in 0..params.count {
        let r = rng.range(0.0, params.radius);
        let angle = branch_angle(i, params.branches) + r * params.spin;

        let jx = jitter(rng, params.randomness_power, params.randomness, r);
        let jy = jitter(rng, params.randomness_power, params.randomness, params.vertical_scale);
        let jz = jitter(rng, params.randomness_power, params.randomness, r);

        let mut position = Vec3::new(angle.cos() * r + jx, jy, angle.sin() * r + jz);
        clamp_horizontal(&mut position, params.radius);
        positions.push(position);

        if let (Some((inside, outside)), Some(colors)) = (palette, colors.as_mut()) {
            colors.push(inside.lerp(outside, r / params.radius));
        }
    }

    FieldPoints {
        policy: "spiral",
        positions,
        colors,
        sizes: None,
        uniform_size: params.size,
    }
}

/// Pull a point back inside the vertical cylinder of `max_radius`.
fn clamp_horizontal(position: &mut Vec3, max_radius: f32) {
    let horizontal = (position.x * position.x + position.z * position.z).sqrt();
    if horizontal > max_radius {
        let k = max_radius / horizontal;
        position.x *= k;
        position.z *= k;
    }
}

/// The generated field plus its current spin about +Y.
#[derive(Debug, Clone)]
pub struct FieldLayer {
    points: FieldPoints,
    pub rotation_y: f32,
}

impl FieldLayer {
    pub fn new(points: FieldPoints) -> Self {
        Self { points, rotation_y: 0.0 }
    }

    pub fn points(&self) -> &FieldPoints {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Model matrix the render host applies to the whole buffer.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }
}
