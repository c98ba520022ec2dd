//! Per-frame animation systems.
//!
//! EXECUTION ORDER (registered by SceneEngine::build):
//!   1. PulseSystem        scale from time and position
//!   2. DriftSystem        Euler step + containment
//!   3. FieldSpinSystem    rotate the background layer
//!   4. CameraOrbitSystem  scripted camera path (optional)
//!
//! Pulse reads position before drift moves it, so a star's scale for a
//! frame matches where it was drawn last frame.

use crate::{
    clock::FrameTime,
    config::{AnimationConfig, OrbitPathConfig, StepMode},
    event::SceneEvent,
    placement::AchievementStar,
    scene::SceneState,
    system::FrameSystem,
};
use glam::Vec3;
use std::any::Any;
use std::f32::consts::TAU;

/// How many "ticks" of motion this frame represents.
pub fn step_scale(mode: StepMode, frame: &FrameTime) -> f32 {
    match mode {
        StepMode::PerFrame => 1.0,
        StepMode::DeltaTime { reference_fps } => (frame.delta * reference_fps as f64) as f32,
    }
}

/// `base · (1 + sin(t + x) · amplitude)`, computed in f64 so large
/// host timestamps keep their precision.
pub fn pulse_scale(base_scale: f32, time: f64, x: f32, amplitude: f32) -> f32 {
    let wave = (time + x as f64).sin() as f32;
    base_scale * (1.0 + wave * amplitude)
}

/// Reflect a star that left the containment sphere.
///
/// The position is negated and damped; if that still lies outside
/// (damping close to 1 and the star well past the edge) it is pulled
/// onto the sphere. Returns the distance before containment when the
/// star was reflected.
pub fn contain(star: &mut AchievementStar, radius: f32, damping: f32) -> Option<f32> {
    let distance = star.position.length();
    if distance <= radius {
        return None;
    }
    let mut reflected = -star.position * damping;
    if reflected.length() > radius {
        reflected = reflected.normalize_or_zero() * radius;
    }
    star.position = reflected;
    Some(distance)
}

pub struct PulseSystem {
    amplitude: f32,
}

impl PulseSystem {
    pub fn new(config: &AnimationConfig) -> Self {
        Self { amplitude: config.pulse_amplitude }
    }
}

impl FrameSystem for PulseSystem {
    fn name(&self) -> &'static str { "pulse" }

    fn update(
        &mut self,
        frame: &FrameTime,
        scene: &mut SceneState,
        _events_in: &[SceneEvent],
    ) -> Vec<SceneEvent> {
        for star in &mut scene.stars {
            star.scale = pulse_scale(star.base_scale, frame.time, star.position.x, self.amplitude);
        }
        vec![]
    }

    fn as_any(&self) -> &dyn Any { self }
}

pub struct DriftSystem {
    containment_radius: f32,
    damping: f32,
    step_mode: StepMode,
}

impl DriftSystem {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            containment_radius: config.containment_radius,
            damping: config.reflect_damping.clamp(0.0, 1.0),
            step_mode: config.step_mode,
        }
    }
}

impl FrameSystem for DriftSystem {
    fn name(&self) -> &'static str { "drift" }

    fn update(
        &mut self,
        frame: &FrameTime,
        scene: &mut SceneState,
        _events_in: &[SceneEvent],
    ) -> Vec<SceneEvent> {
        let step = step_scale(self.step_mode, frame);
        let mut events = Vec::new();

        for star in &mut scene.stars {
            star.position += star.velocity * step;
            if let Some(distance) = contain(star, self.containment_radius, self.damping) {
                log::debug!(
                    "frame={} star {} reflected at distance {distance:.2}",
                    frame.index,
                    star.id
                );
                events.push(SceneEvent::StarReflected {
                    frame: frame.index,
                    star_id: star.id,
                    distance,
                });
            }
        }
        events
    }

    fn as_any(&self) -> &dyn Any { self }
}

pub struct FieldSpinSystem {
    radians_per_frame: f32,
    step_mode: StepMode,
}

impl FieldSpinSystem {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            radians_per_frame: config.field_spin_per_frame,
            step_mode: config.step_mode,
        }
    }
}

impl FrameSystem for FieldSpinSystem {
    fn name(&self) -> &'static str { "field_spin" }

    fn update(
        &mut self,
        frame: &FrameTime,
        scene: &mut SceneState,
        _events_in: &[SceneEvent],
    ) -> Vec<SceneEvent> {
        let step = step_scale(self.step_mode, frame);
        scene.field.rotation_y = (scene.field.rotation_y + self.radians_per_frame * step).rem_euclid(TAU);
        vec![]
    }

    fn as_any(&self) -> &dyn Any { self }
}

/// Drives the camera along a horizontal circle looking at the origin
/// until the first manual camera input; after that the manual
/// controller owns the camera for the rest of the session.
pub struct CameraOrbitSystem {
    path: OrbitPathConfig,
    active: bool,
}

impl CameraOrbitSystem {
    pub fn new(path: OrbitPathConfig) -> Self {
        Self { path, active: true }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position_at(&self, time: f64) -> Vec3 {
        let angle = (time * self.path.angular_speed as f64) as f32;
        Vec3::new(angle.cos() * self.path.radius, self.path.height, angle.sin() * self.path.radius)
    }
}

impl FrameSystem for CameraOrbitSystem {
    fn name(&self) -> &'static str { "camera_orbit" }

    fn update(
        &mut self,
        frame: &FrameTime,
        scene: &mut SceneState,
        events_in: &[SceneEvent],
    ) -> Vec<SceneEvent> {
        if !self.active {
            return vec![];
        }

        let manual = events_in
            .iter()
            .any(|e| matches!(e, SceneEvent::ManualCameraInput { .. }));
        if manual {
            self.active = false;
            log::info!("frame={} manual camera input; scripted orbit disabled", frame.index);
            return vec![SceneEvent::CameraControlHandedOver { frame: frame.index }];
        }

        scene.camera.position = self.position_at(frame.time);
        scene.camera.look_at(Vec3::ZERO);
        vec![]
    }

    fn as_any(&self) -> &dyn Any { self }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::DayRecord;
    use crate::color::Rgb;
    use std::sync::Arc;

    fn star(position: Vec3) -> AchievementStar {
        let record = Arc::new(DayRecord { day: 1, color: Rgb::WHITE, problems: vec![] });
        AchievementStar::new(0, position, Vec3::ZERO, 1.0, record)
    }

    #[test]
    fn pulse_matches_formula() {
        let s = pulse_scale(1.0, 2.0, 0.5, 0.1);
        assert!((s - (1.0 + (2.5f64).sin() as f32 * 0.1)).abs() < 1e-6);
        assert_eq!(pulse_scale(2.0, 0.0, 0.0, 0.1), 2.0);
    }

    #[test]
    fn contain_leaves_inside_stars_alone() {
        let mut s = star(Vec3::new(3.0, 4.0, 0.0));
        assert!(contain(&mut s, 10.0, 0.9).is_none());
        assert_eq!(s.position, Vec3::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn contain_reflects_through_origin_with_damping() {
        let mut s = star(Vec3::new(11.0, 0.0, 0.0));
        let d = contain(&mut s, 10.0, 0.5).unwrap();
        assert_eq!(d, 11.0);
        assert_eq!(s.position, Vec3::new(-5.5, 0.0, 0.0));
    }

    #[test]
    fn contain_pulls_undamped_reflection_onto_sphere() {
        let mut s = star(Vec3::new(0.0, 12.0, 0.0));
        contain(&mut s, 10.0, 1.0).unwrap();
        assert!((s.position - Vec3::new(0.0, -10.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn delta_time_mode_scales_by_reference_fps() {
        let frame = FrameTime { index: 2, time: 1.0, delta: 1.0 / 30.0 };
        let step = step_scale(StepMode::DeltaTime { reference_fps: 60.0 }, &frame);
        assert!((step - 2.0).abs() < 1e-5);
        assert_eq!(step_scale(StepMode::PerFrame, &frame), 1.0);
    }
}
