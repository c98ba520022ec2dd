use serde::{Deserialize, Serialize};

/// Input the render host forwards to the scene core.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum HostCommand {
    // ── Pointer ───────────────────────────────────
    /// Viewport pixel coordinates, origin top-left.
    Click { x: f32, y: f32 },

    // ── Surface ───────────────────────────────────
    Resize { width: f32, height: f32 },

    // ── Camera ────────────────────────────────────
    /// Radians of orbit plus a multiplicative zoom (1.0 = unchanged).
    CameraInput {
        d_azimuth:   f32,
        d_elevation: f32,
        #[serde(default = "unit_zoom")]
        zoom:        f32,
    },

    // ── Clock control ─────────────────────────────
    Pause,
    Resume,
}

fn unit_zoom() -> f32 { 1.0 }
