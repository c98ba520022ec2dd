//! Achievement star placement.
//!
//! One star per DayRecord. Starfield and disc fields scatter stars
//! uniformly through a cube; a spiral field embeds them along its arms
//! using the same branch + spin formula with an inner exclusion zone
//! and fewer branches. Stars are separate geometry from the field
//! buffer and placement never reads or writes that buffer.

use crate::{
    config::{FieldConfig, PlacementConfig, SpiralParams},
    field::{branch_angle, jitter},
    journey::DayRecord,
    rng::StreamRng,
    types::StarId,
};
use glam::Vec3;
use std::sync::Arc;

/// An interactive star bound to one day of the journey.
#[derive(Debug, Clone)]
pub struct AchievementStar {
    pub id: StarId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub base_scale: f32,
    /// Current uniform scale, rewritten every frame by the pulse system.
    pub scale: f32,
    payload: Arc<DayRecord>,
}

impl AchievementStar {
    pub fn new(id: StarId, position: Vec3, velocity: Vec3, base_scale: f32, payload: Arc<DayRecord>) -> Self {
        Self { id, position, velocity, base_scale, scale: base_scale, payload }
    }

    pub fn payload(&self) -> &Arc<DayRecord> {
        &self.payload
    }

    pub fn day(&self) -> i64 {
        self.payload.day
    }
}

/// Placement policy, chosen by the field the stars live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementPolicy {
    Uniform,
    ArmEmbedded,
}

impl PlacementPolicy {
    pub fn for_field(field: &FieldConfig) -> Self {
        match field {
            FieldConfig::Spiral(_) => Self::ArmEmbedded,
            FieldConfig::Starfield(_) | FieldConfig::Disc(_) => Self::Uniform,
        }
    }
}

/// Create one star per record, in record order.
///
/// `position_rng` drives where stars go; `velocity_rng` drives their
/// drift, so changing one never perturbs the other.
pub fn place(
    records: &[Arc<DayRecord>],
    field: &FieldConfig,
    config: &PlacementConfig,
    position_rng: &mut StreamRng,
    velocity_rng: &mut StreamRng,
) -> Vec<AchievementStar> {
    let policy = PlacementPolicy::for_field(field);

    let stars: Vec<AchievementStar> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let position = match (policy, field) {
                (PlacementPolicy::ArmEmbedded, FieldConfig::Spiral(spiral)) => {
                    arm_position(index, spiral, config, position_rng)
                }
                _ => uniform_position(config, position_rng),
            };
            let velocity = Vec3::new(
                velocity_rng.spread(config.max_speed),
                velocity_rng.spread(config.max_speed),
                velocity_rng.spread(config.max_speed),
            );
            AchievementStar::new(
                index as StarId,
                position,
                velocity,
                config.base_scale,
                Arc::clone(record),
            )
        })
        .collect();

    log::info!("placed {} achievement star(s) ({policy:?})", stars.len());
    stars
}

fn uniform_position(config: &PlacementConfig, rng: &mut StreamRng) -> Vec3 {
    let h = config.uniform_half_width;
    Vec3::new(rng.spread(h), rng.spread(h), rng.spread(h))
}

fn arm_position(index: usize, spiral: &SpiralParams, config: &PlacementConfig, rng: &mut StreamRng) -> Vec3 {
    let inner = spiral.radius * config.arm_inner_fraction;
    let r = rng.range(inner, spiral.radius);
    let angle = branch_angle(index, config.arm_branches) + r * spiral.spin;

    let jx = jitter(rng, spiral.randomness_power, 1.0, config.arm_jitter);
    let jy = jitter(rng, spiral.randomness_power, 1.0, config.arm_jitter * 0.5);
    let jz = jitter(rng, spiral.randomness_power, 1.0, config.arm_jitter);

    Vec3::new(angle.cos() * r + jx, jy, angle.sin() * r + jz)
}
