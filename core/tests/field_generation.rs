//! Background field generation: starfield, disc and spiral policies.

use starjourney_core::{
    color::Rgb,
    config::{DiscParams, FieldConfig, SpiralParams, StarfieldParams},
    field,
    rng::{RngBank, StreamSlot},
};
use std::f32::consts::TAU;

fn field_rng(seed: u64) -> starjourney_core::rng::StreamRng {
    RngBank::new(seed).for_stream(StreamSlot::Field)
}

#[test]
fn starfield_fills_cube_with_requested_count() {
    let params = StarfieldParams { count: 10_000, spread: 100.0, size: 0.1 };
    let points = field::starfield(&params, &mut field_rng(1));

    assert_eq!(points.len(), 10_000);
    assert_eq!(points.policy, "starfield");
    assert!(points.colors.is_none());
    for p in &points.positions {
        assert!(p.abs().max_element() <= 100.0, "point outside cube: {p:?}");
    }
    assert_eq!(points.position_buffer().len(), 30_000);
}

#[test]
fn disc_points_stay_in_thin_disc_with_blended_colors() {
    let a = Rgb::new(255, 0, 0);
    let b = Rgb::new(0, 0, 255);
    let params = DiscParams {
        count: 4_000,
        radius: 80.0,
        thickness: 2.0,
        color_a: Some(a),
        color_b: Some(b),
        size_range: Some((0.05, 0.25)),
    };
    let points = field::disc(&params, &mut field_rng(2));

    assert_eq!(points.len(), 4_000);
    for p in &points.positions {
        assert!((p.x * p.x + p.z * p.z).sqrt() <= 80.0 + 1e-3);
        assert!(p.y.abs() <= 2.0);
    }

    let colors = points.colors.as_ref().expect("colors generated");
    assert_eq!(colors.len(), 4_000);
    // Red-to-blue blend never touches green.
    assert!(colors.iter().all(|c| c.g == 0));

    let sizes = points.sizes.as_ref().expect("sizes generated");
    assert!(sizes.iter().all(|s| (0.05..=0.25).contains(s)));
    assert_eq!(points.color_buffer().map(|b| b.len()), Some(12_000));
}

#[test]
fn disc_without_palette_has_no_color_attribute() {
    let params = DiscParams { count: 100, color_a: None, size_range: None, ..DiscParams::default() };
    let points = field::disc(&params, &mut field_rng(3));
    assert!(points.colors.is_none());
    assert!(points.sizes.is_none());
    assert!(points.color_buffer().is_none());
}

#[test]
fn spiral_points_never_exceed_configured_radius() {
    let params = SpiralParams { count: 20_000, randomness: 1.0, randomness_power: 1.0, ..SpiralParams::default() };
    let points = field::spiral(&params, &mut field_rng(4));

    assert_eq!(points.len(), 20_000);
    for p in &points.positions {
        let horizontal = (p.x * p.x + p.z * p.z).sqrt();
        assert!(horizontal <= params.radius + 1e-3, "horizontal radius {horizontal}");
    }
}

#[test]
fn spiral_without_randomness_has_branch_periodicity() {
    let params = SpiralParams {
        count: 600,
        branches: 5,
        randomness: 0.0,
        ..SpiralParams::default()
    };
    let points = field::spiral(&params, &mut field_rng(5));

    for (i, p) in points.positions.iter().enumerate() {
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert_eq!(p.y, 0.0);
        if r < 1e-3 {
            continue;
        }
        // Undo the spin; what remains must be the branch angle.
        let unspun = (p.z.atan2(p.x) - r * params.spin).rem_euclid(TAU);
        let expected = field::branch_angle(i, params.branches);
        let diff = (unspun - expected).rem_euclid(TAU);
        let diff = diff.min(TAU - diff);
        assert!(diff < 1e-3, "point {i}: off its arm by {diff} rad");
    }
}

#[test]
fn spiral_colors_blend_inside_to_outside() {
    let params = SpiralParams { count: 500, ..SpiralParams::default() };
    let points = field::spiral(&params, &mut field_rng(6));
    assert_eq!(points.colors.map(|c| c.len()), Some(500));
}

#[test]
fn generate_dispatches_on_policy() {
    let mut rng = field_rng(7);
    let spiral = field::generate(&FieldConfig::Spiral(SpiralParams { count: 10, ..Default::default() }), &mut rng);
    assert_eq!(spiral.policy, "spiral");
    let disc = field::generate(&FieldConfig::Disc(DiscParams { count: 10, ..Default::default() }), &mut rng);
    assert_eq!(disc.policy, "disc");
    assert_eq!(disc.len(), 10);
}

#[test]
fn same_seed_same_field() {
    let config = FieldConfig::Spiral(SpiralParams { count: 2_000, ..Default::default() });
    let a = field::generate(&config, &mut field_rng(99));
    let b = field::generate(&config, &mut field_rng(99));
    let c = field::generate(&config, &mut field_rng(100));
    assert_eq!(a, b);
    assert_ne!(a.positions, c.positions);
}
