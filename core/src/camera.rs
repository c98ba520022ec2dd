//! Perspective camera, viewport mapping and manual orbit control.
//!
//! Conventions match a right-handed, Y-up scene with OpenGL-style clip
//! space (NDC z in [-1, 1]). Viewport pixels have their origin in the
//! top-left corner with Y growing downwards.

use crate::{
    config::CameraConfig,
    error::{SceneError, SceneResult},
};
use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> SceneResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(SceneError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Pixel coordinates to normalized device coordinates, Y inverted.
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x / self.width * 2.0 - 1.0, -(y / self.height) * 2.0 + 1.0)
    }

    /// Inverse of `to_ndc`.
    pub fn from_ndc(&self, ndc: Vec2) -> Vec2 {
        Vec2::new((ndc.x + 1.0) * 0.5 * self.width, (1.0 - ndc.y) * 0.5 * self.height)
    }
}

/// A ray with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction: direction.normalize_or_zero() }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_radians: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn from_config(config: &CameraConfig, viewport: Viewport) -> Self {
        Self {
            position: Vec3::from_array(config.position),
            target: Vec3::from_array(config.target),
            up: Vec3::Y,
            fov_y_radians: config.fov_degrees.to_radians(),
            aspect: viewport.aspect(),
            near: config.near.max(1e-4),
            far: config.far.max(config.near + 1.0),
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_radians, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Ray from the camera position through an NDC point. The direction
    /// comes from unprojecting the point at mid clip depth.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let world = inverse * Vec4::new(ndc.x, ndc.y, 0.5, 1.0);
        let through = world.truncate() / world.w;
        Ray::new(self.position, through - self.position)
    }

    pub fn ray_from_viewport(&self, viewport: &Viewport, x: f32, y: f32) -> Ray {
        self.ray_from_ndc(viewport.to_ndc(x, y))
    }

    /// Project a world point to NDC; `None` when behind the camera.
    pub fn project_ndc(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !ndc.x.is_finite() || !ndc.y.is_finite() {
            return None;
        }
        Some(Vec2::new(ndc.x, ndc.y))
    }

    /// Project a world point to viewport pixels.
    pub fn project(&self, viewport: &Viewport, world: Vec3) -> Option<Vec2> {
        self.project_ndc(world).map(|ndc| viewport.from_ndc(ndc))
    }
}

/// Manual orbit control around the camera target: azimuth about +Y,
/// elevation from the horizontal plane, and distance.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControl {
    pub azimuth: f32,
    pub elevation: f32,
    pub distance: f32,
    min_distance: f32,
    max_distance: f32,
}

impl OrbitControl {
    const MAX_ELEVATION: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

    /// Take over from wherever the camera currently is.
    pub fn from_camera(camera: &Camera, min_distance: f32, max_distance: f32) -> Self {
        let offset = camera.position - camera.target;
        let distance = offset.length().max(min_distance);
        let elevation = if distance > 0.0 { (offset.y / distance).clamp(-1.0, 1.0).asin() } else { 0.0 };
        Self {
            azimuth: offset.x.atan2(offset.z),
            elevation,
            distance: distance.clamp(min_distance, max_distance),
            min_distance,
            max_distance,
        }
    }

    /// Apply one input: angle deltas in radians and a multiplicative zoom.
    pub fn apply(&mut self, d_azimuth: f32, d_elevation: f32, zoom: f32) {
        self.azimuth += d_azimuth;
        self.elevation = (self.elevation + d_elevation).clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
        if zoom.is_finite() && zoom > 0.0 {
            self.distance = (self.distance * zoom).clamp(self.min_distance, self.max_distance);
        }
    }

    /// Write the orbit pose into the camera.
    pub fn drive(&self, camera: &mut Camera) {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let offset = Vec3::new(sin_az * cos_el, sin_el, cos_az * cos_el) * self.distance;
        camera.position = camera.target + offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> (Camera, Viewport) {
        let viewport = Viewport::new(800.0, 600.0).unwrap();
        (Camera::from_config(&CameraConfig::default(), viewport), viewport)
    }

    #[test]
    fn ndc_maps_corners_and_inverts_y() {
        let vp = Viewport::new(200.0, 100.0).unwrap();
        assert_eq!(vp.to_ndc(0.0, 0.0), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.to_ndc(200.0, 100.0), Vec2::new(1.0, -1.0));
        assert_eq!(vp.to_ndc(100.0, 50.0), Vec2::new(0.0, 0.0));
        let back = vp.from_ndc(vp.to_ndc(30.0, 70.0));
        assert!((back - Vec2::new(30.0, 70.0)).length() < 1e-3, "{back:?}");
    }

    #[test]
    fn rejects_degenerate_viewport() {
        assert!(Viewport::new(0.0, 10.0).is_err());
        assert!(Viewport::new(10.0, -1.0).is_err());
        assert!(Viewport::new(f32::NAN, 10.0).is_err());
    }

    #[test]
    fn center_ray_points_at_target() {
        let (cam, vp) = camera();
        let ray = cam.ray_from_viewport(&vp, 400.0, 300.0);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4, "{:?}", ray.direction);
        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 30.0));
    }

    #[test]
    fn projection_round_trips_through_ray() {
        let (cam, vp) = camera();
        let world = Vec3::new(4.0, -3.0, 2.0);
        let pixel = cam.project(&vp, world).unwrap();
        let ray = cam.ray_from_viewport(&vp, pixel.x, pixel.y);
        let to_point = world - ray.origin;
        let closest = ray.at(to_point.dot(ray.direction));
        assert!((closest - world).length() < 1e-2, "miss by {}", (closest - world).length());
    }

    #[test]
    fn points_behind_camera_do_not_project() {
        let (cam, vp) = camera();
        assert!(cam.project(&vp, Vec3::new(0.0, 0.0, 60.0)).is_none());
    }

    #[test]
    fn orbit_control_keeps_distance_and_clamps_zoom() {
        let (mut cam, _) = camera();
        let mut orbit = OrbitControl::from_camera(&cam, 2.0, 100.0);
        assert!((orbit.distance - 30.0).abs() < 1e-4);
        orbit.apply(0.5, 0.2, 1.0);
        orbit.drive(&mut cam);
        assert!(((cam.position - cam.target).length() - 30.0).abs() < 1e-3);
        orbit.apply(0.0, 0.0, 100.0);
        assert_eq!(orbit.distance, 100.0);
        orbit.apply(0.0, 10.0, 1.0);
        assert!(orbit.elevation < std::f32::consts::FRAC_PI_2);
    }
}
