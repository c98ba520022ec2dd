//! The scene context passed explicitly to frame systems and picking.

use crate::{
    camera::{Camera, Viewport},
    field::FieldLayer,
    placement::AchievementStar,
    types::StarId,
};

pub struct SceneState {
    pub field:    FieldLayer,
    pub stars:    Vec<AchievementStar>,
    pub camera:   Camera,
    pub viewport: Viewport,
}

impl SceneState {
    pub fn star(&self, id: StarId) -> Option<&AchievementStar> {
        // Ids are record indices, so the direct slot is almost always it.
        match self.stars.get(id as usize) {
            Some(star) if star.id == id => Some(star),
            _ => self.stars.iter().find(|s| s.id == id),
        }
    }
}
