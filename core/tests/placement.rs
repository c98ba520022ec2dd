//! Achievement placement: one star per day record.

use starjourney_core::{
    color::Rgb,
    config::{FieldConfig, PlacementConfig, SceneConfig, SpiralParams, StarfieldParams},
    journey::{DayRecord, Difficulty, ProblemRecord},
    placement::{place, PlacementPolicy},
    rng::{RngBank, StreamSlot},
};
use std::sync::Arc;

fn records(n: usize) -> Vec<Arc<DayRecord>> {
    (0..n)
        .map(|i| {
            Arc::new(DayRecord {
                day: i as i64 + 1,
                color: Rgb::new(40, (i % 256) as u8, 200),
                problems: vec![ProblemRecord {
                    name: format!("Problem {i}"),
                    link: format!("https://example.com/p/{i}"),
                    twitter_post_link: format!("https://x.com/p/{i}"),
                    emojis: vec!["⭐".into()],
                    difficulty: Difficulty::Medium,
                }],
            })
        })
        .collect()
}

fn place_with(field: &FieldConfig, records: &[Arc<DayRecord>], seed: u64) -> Vec<starjourney_core::placement::AchievementStar> {
    let bank = RngBank::new(seed);
    place(
        records,
        field,
        &PlacementConfig::default(),
        &mut bank.for_stream(StreamSlot::Placement),
        &mut bank.for_stream(StreamSlot::Velocity),
    )
}

#[test]
fn star_count_matches_record_count() {
    let field = FieldConfig::Starfield(StarfieldParams::default());
    for n in [0, 1, 50] {
        let recs = records(n);
        let stars = place_with(&field, &recs, 11);
        assert_eq!(stars.len(), n, "n={n}");
        for (i, star) in stars.iter().enumerate() {
            assert_eq!(star.id as usize, i);
            assert_eq!(star.day(), i as i64 + 1);
        }
    }
}

#[test]
fn stars_share_payload_with_loaded_records() {
    let recs = records(3);
    let stars = place_with(&FieldConfig::default(), &recs, 12);
    for (star, record) in stars.iter().zip(&recs) {
        assert!(Arc::ptr_eq(star.payload(), record));
    }
}

#[test]
fn uniform_placement_stays_in_cube_with_bounded_velocity() {
    let config = PlacementConfig::default();
    let stars = place_with(&FieldConfig::default(), &records(200), 13);
    for star in &stars {
        assert!(star.position.abs().max_element() <= config.uniform_half_width);
        assert!(star.velocity.abs().max_element() <= config.max_speed);
        assert_eq!(star.scale, config.base_scale);
    }
}

#[test]
fn spiral_field_embeds_stars_on_arms_outside_core() {
    let spiral = SpiralParams::default();
    let field = FieldConfig::Spiral(spiral.clone());
    assert_eq!(PlacementPolicy::for_field(&field), PlacementPolicy::ArmEmbedded);

    let config = PlacementConfig::default();
    let stars = place_with(&field, &records(100), 14);
    let inner = spiral.radius * config.arm_inner_fraction;
    for star in &stars {
        let p = star.position;
        let horizontal = (p.x * p.x + p.z * p.z).sqrt();
        // Jitter can move a star at most `arm_jitter` per horizontal axis.
        let slack = config.arm_jitter * std::f32::consts::SQRT_2 + 1e-3;
        assert!(horizontal >= inner - slack, "star inside the core: r={horizontal}");
        assert!(horizontal <= spiral.radius + slack, "star beyond the disc: r={horizontal}");
        assert!(p.y.abs() <= config.arm_jitter * 0.5 + 1e-6);
    }
}

#[test]
fn velocities_do_not_depend_on_field_policy() {
    let recs = records(20);
    let starfield = place_with(&SceneConfig::default_test().field, &recs, 15);
    let spiral = place_with(&SceneConfig::default_test_spiral().field, &recs, 15);
    for (a, b) in starfield.iter().zip(&spiral) {
        assert_eq!(a.velocity, b.velocity);
    }
}
