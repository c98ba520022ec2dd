//! Frame system trait.
//!
//! RULE: Every per-frame stage implements FrameSystem.
//! The engine calls update() on each registered system in
//! registration order, once per frame.
//! Execution order is fixed and documented in engine.rs.

use crate::{clock::FrameTime, event::SceneEvent, scene::SceneState};
use std::any::Any;

/// The contract every per-frame stage must fulfill.
pub trait FrameSystem {
    /// Unique stable name for this system.
    fn name(&self) -> &'static str;

    /// Called once per frame by the engine.
    ///
    /// - `frame`:     the sampled time for this frame
    /// - `scene`:     the scene context (field, stars, camera)
    /// - `events_in`: events emitted so far this frame, including host
    ///                input queued since the previous frame
    ///
    /// Returns new events to append to the frame's event list.
    fn update(
        &mut self,
        frame: &FrameTime,
        scene: &mut SceneState,
        events_in: &[SceneEvent],
    ) -> Vec<SceneEvent>;

    /// For downcasting in tests and tooling only.
    fn as_any(&self) -> &dyn Any;
}
