//! Click picking against achievement stars.
//!
//! Only achievement stars are hit-test targets; the background field is
//! decorative and never intercepts a click. Each star is a sphere of
//! `star_radius · scale` around its current position.
//!
//! Selection is click-driven and edge-triggered:
//!   - hit a different star  → Selected(star), notify
//!   - hit the selected star → nothing
//!   - hit nothing           → Idle, notify (even when already Idle)

use crate::{camera::Ray, placement::AchievementStar, types::StarId};
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "star_id", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Idle,
    Selected(StarId),
}

impl SelectionState {
    pub fn selected(&self) -> Option<StarId> {
        match self {
            Self::Idle => None,
            Self::Selected(id) => Some(*id),
        }
    }
}

/// A notification produced by a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(StarId),
    Deselected,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub star_id: StarId,
    pub distance: f32,
}

/// Distance along `ray` to the first intersection with the sphere, if any.
/// A ray starting inside the sphere reports the exit point.
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

/// Nearest star hit by `ray`. Ties keep the earlier star.
pub fn hit_test(ray: &Ray, stars: &[AchievementStar], star_radius: f32) -> Option<Hit> {
    stars
        .iter()
        .filter_map(|star| {
            intersect_sphere(ray, star.position, star_radius * star.scale)
                .map(|distance| Hit { star_id: star.id, distance })
        })
        .fold(None, |best: Option<Hit>, hit| match best {
            Some(b) if b.distance <= hit.distance => Some(b),
            _ => Some(hit),
        })
}

/// Owns the selection state. Nothing else writes it.
#[derive(Debug)]
pub struct Picker {
    state: SelectionState,
    star_radius: f32,
}

impl Picker {
    pub fn new(star_radius: f32) -> Self {
        Self { state: SelectionState::Idle, star_radius }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Resolve a click ray and transition. Returns the notification to
    /// emit, or `None` when the selected star was clicked again.
    pub fn click(&mut self, ray: &Ray, stars: &[AchievementStar]) -> Option<SelectionChange> {
        match hit_test(ray, stars, self.star_radius) {
            Some(hit) if self.state == SelectionState::Selected(hit.star_id) => {
                log::debug!("star {} clicked again; selection unchanged", hit.star_id);
                None
            }
            Some(hit) => {
                log::debug!("star {} selected at distance {:.2}", hit.star_id, hit.distance);
                self.state = SelectionState::Selected(hit.star_id);
                Some(SelectionChange::Selected(hit.star_id))
            }
            None => {
                self.state = SelectionState::Idle;
                Some(SelectionChange::Deselected)
            }
        }
    }
}
