//! Shared primitive types used across the scene core.

/// Index of a rendered frame. Frame 0 is the state before the first step.
pub type FrameIndex = u64;

/// Stable identifier of an achievement star.
/// Equal to the index of its DayRecord in the loaded journey.
pub type StarId = u32;

/// Wall-clock seconds since an arbitrary epoch chosen by the host.
pub type Seconds = f64;
