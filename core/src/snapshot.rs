//! Per-frame snapshot handed to the render host.
//!
//! A snapshot is everything the host needs to draw one frame: the field
//! transform, camera pose, every star instance and the overlay panel.
//! The field's point buffer itself is not repeated here; hosts upload it
//! once from `SceneEngine::state().field`.

use crate::{
    color::Rgb,
    engine::LoadStatus,
    overlay::OverlayPanel,
    picking::SelectionState,
    types::{FrameIndex, Seconds, StarId},
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub frame:       FrameIndex,
    pub time:        Seconds,
    pub paused:      bool,
    pub load_status: LoadStatus,
    /// Human-readable loading indicator.
    pub indicator:   String,
    pub field:       FieldSnapshot,
    pub camera:      CameraSnapshot,
    pub stars:       Vec<StarInstance>,
    pub selection:   SelectionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay:     Option<OverlayPanel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSnapshot {
    pub policy:     &'static str,
    pub points:     usize,
    pub rotation_y: f32,
    /// Column-major model matrix for the point buffer.
    pub model:      [f32; 16],
}

#[derive(Debug, Clone, Serialize)]
pub struct CameraSnapshot {
    pub position: [f32; 3],
    pub target:   [f32; 3],
    pub fov_y:    f32,
    pub aspect:   f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StarInstance {
    pub id:       StarId,
    pub day:      i64,
    pub position: [f32; 3],
    pub scale:    f32,
    pub color:    Rgb,
}
