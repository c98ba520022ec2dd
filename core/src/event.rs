//! The scene event bus.
//!
//! RULE: Frame systems communicate ONLY through events.
//! A system never calls another system's functions directly.
//! Host input that arrives between frames is queued by the engine and
//! delivered at the start of the next frame.

use crate::types::{FrameIndex, StarId};
use serde::{Deserialize, Serialize};

/// Every event the scene core emits.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneEvent {
    // ── Frame events ───────────────────────────────
    FrameStarted {
        frame: FrameIndex,
    },
    FrameCompleted {
        frame: FrameIndex,
    },
    Paused,
    Resumed,

    // ── Startup ────────────────────────────────────
    FieldGenerated {
        policy: String,
        points: usize,
    },
    JourneyLoaded {
        records: usize,
    },
    JourneyLoadFailed {
        reason: String,
    },
    StarsPlaced {
        count: usize,
    },

    // ── Selection ──────────────────────────────────
    StarSelected {
        star_id: StarId,
        day: i64,
    },
    StarDeselected,

    // ── Animation ──────────────────────────────────
    StarReflected {
        frame: FrameIndex,
        star_id: StarId,
        distance: f32,
    },

    // ── Host input ─────────────────────────────────
    ViewportResized {
        width: f32,
        height: f32,
    },
    ManualCameraInput {
        d_azimuth: f32,
        d_elevation: f32,
        zoom: f32,
    },
    CameraControlHandedOver {
        frame: FrameIndex,
    },
}

impl SceneEvent {
    /// Stable string name of the variant, used for logs and summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FrameStarted { .. }            => "frame_started",
            Self::FrameCompleted { .. }          => "frame_completed",
            Self::Paused                         => "paused",
            Self::Resumed                        => "resumed",
            Self::FieldGenerated { .. }          => "field_generated",
            Self::JourneyLoaded { .. }           => "journey_loaded",
            Self::JourneyLoadFailed { .. }       => "journey_load_failed",
            Self::StarsPlaced { .. }             => "stars_placed",
            Self::StarSelected { .. }            => "star_selected",
            Self::StarDeselected                 => "star_deselected",
            Self::StarReflected { .. }           => "star_reflected",
            Self::ViewportResized { .. }         => "viewport_resized",
            Self::ManualCameraInput { .. }       => "manual_camera_input",
            Self::CameraControlHandedOver { .. } => "camera_control_handed_over",
        }
    }
}
