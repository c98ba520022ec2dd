//! The scene engine: the explicit context every host talks to.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. PulseSystem
//!   2. DriftSystem
//!   3. FieldSpinSystem
//!   4. CameraOrbitSystem   (only when the config has an orbit path)
//!
//! RULES:
//!   - Systems execute in registration order, once per frame.
//!   - Every system sees the same sampled FrameTime.
//!   - Host input between frames is queued and delivered as events at
//!     the start of the next frame.
//!   - All randomness flows through the RngBank.
//!   - Selection is written only by the Picker.

use crate::{
    animation::{CameraOrbitSystem, DriftSystem, FieldSpinSystem, PulseSystem},
    camera::{Camera, OrbitControl, Ray, Viewport},
    clock::{FrameClock, FrameTime},
    command::HostCommand,
    config::SceneConfig,
    error::{LoadError, SceneError, SceneResult},
    event::SceneEvent,
    field::{self, FieldLayer},
    journey::DayRecord,
    overlay::OverlayPresenter,
    picking::{Picker, SelectionChange, SelectionState},
    placement,
    rng::{RngBank, StreamSlot},
    scene::SceneState,
    snapshot::{CameraSnapshot, FieldSnapshot, FrameSnapshot, StarInstance},
    system::FrameSystem,
    types::StarId,
};
use serde::Serialize;
use std::sync::Arc;

/// Where the journey data stands. Stars exist only in `Ready`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadStatus {
    Loading,
    Ready { stars: usize },
    Failed { reason: String },
}

impl LoadStatus {
    pub fn indicator(&self) -> String {
        match self {
            Self::Loading => "Loading journey...".to_string(),
            Self::Ready { stars: 0 } => "Journey loaded: no days recorded yet".to_string(),
            Self::Ready { stars } => format!("Journey loaded: {stars} day(s)"),
            Self::Failed { reason } => format!("Journey unavailable: {reason}"),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

pub struct SceneEngine {
    pub clock:     FrameClock,
    pub rng_bank:  RngBank,
    config:        SceneConfig,
    state:         SceneState,
    systems:       Vec<Box<dyn FrameSystem>>,
    picker:        Picker,
    overlay:       OverlayPresenter,
    manual_camera: Option<OrbitControl>,
    load_status:   LoadStatus,
    last_frame:    Option<FrameTime>,
    pending:       Vec<SceneEvent>,
}

impl SceneEngine {
    /// Generate the field and set up the camera. No systems are
    /// registered and no stars exist until a journey is attached.
    pub fn new(config: SceneConfig, seed: u64, viewport: Viewport) -> SceneResult<Self> {
        config.validate()?;

        let rng_bank = RngBank::new(seed);
        let mut field_rng = rng_bank.for_stream(StreamSlot::Field);
        let points = field::generate(&config.field, &mut field_rng);
        let generated = SceneEvent::FieldGenerated {
            policy: points.policy.to_string(),
            points: points.len(),
        };

        let state = SceneState {
            field:    FieldLayer::new(points),
            stars:    Vec::new(),
            camera:   Camera::from_config(&config.camera, viewport),
            viewport,
        };

        Ok(Self {
            clock:         FrameClock::new(),
            rng_bank,
            picker:        Picker::new(config.placement.star_radius),
            overlay:       OverlayPresenter::new(),
            manual_camera: None,
            load_status:   LoadStatus::Loading,
            last_frame:    None,
            pending:       vec![generated],
            systems:       Vec::new(),
            state,
            config,
        })
    }

    /// Build a fully wired engine with all systems registered.
    /// Call this instead of new() + manual register() calls.
    pub fn build(config: SceneConfig, seed: u64, viewport: Viewport) -> SceneResult<Self> {
        let mut engine = SceneEngine::new(config, seed, viewport)?;

        // EXECUTION ORDER: fixed, documented, never reordered.
        let animation = engine.config.animation.clone();
        engine.register(Box::new(PulseSystem::new(&animation)));
        engine.register(Box::new(DriftSystem::new(&animation)));
        engine.register(Box::new(FieldSpinSystem::new(&animation)));
        if let Some(path) = engine.config.camera.orbit.clone() {
            engine.register(Box::new(CameraOrbitSystem::new(path)));
        }
        Ok(engine)
    }

    /// `SceneConfig::default_test()` on an 800×600 viewport.
    pub fn build_test(seed: u64) -> SceneResult<Self> {
        Self::build(SceneConfig::default_test(), seed, Viewport::new(800.0, 600.0)?)
    }

    /// Register a system. Call in the documented execution order.
    pub fn register(&mut self, system: Box<dyn FrameSystem>) {
        self.systems.push(system);
    }

    // ── Journey ─────────────────────────────────────────────────────

    /// Place one star per record. Allowed once per engine.
    pub fn attach_journey(&mut self, records: Vec<DayRecord>) -> SceneResult<usize> {
        if let LoadStatus::Ready { stars } = self.load_status {
            return Err(SceneError::AlreadyLoaded { stars });
        }

        let records: Vec<Arc<DayRecord>> = records.into_iter().map(Arc::new).collect();
        let mut position_rng = self.rng_bank.for_stream(StreamSlot::Placement);
        let mut velocity_rng = self.rng_bank.for_stream(StreamSlot::Velocity);
        self.state.stars = placement::place(
            &records,
            &self.config.field,
            &self.config.placement,
            &mut position_rng,
            &mut velocity_rng,
        );

        let count = self.state.stars.len();
        log::info!("journey attached: {} record(s)", records.len());
        self.load_status = LoadStatus::Ready { stars: count };
        self.pending.push(SceneEvent::JourneyLoaded { records: records.len() });
        self.pending.push(SceneEvent::StarsPlaced { count });
        Ok(count)
    }

    /// Record a load failure. The field and camera keep running.
    pub fn fail_journey(&mut self, error: &LoadError) {
        if self.load_status.is_ready() {
            log::warn!("ignoring load failure after journey attached: {error}");
            return;
        }
        log::warn!("journey load failed: {error}");
        self.load_status = LoadStatus::Failed { reason: error.to_string() };
        self.pending.push(SceneEvent::JourneyLoadFailed { reason: error.to_string() });
    }

    pub fn apply_load_result(&mut self, result: Result<Vec<DayRecord>, LoadError>) -> SceneResult<()> {
        match result {
            Ok(records) => self.attach_journey(records).map(|_| ()),
            Err(e) => {
                self.fail_journey(&e);
                Ok(())
            }
        }
    }

    // ── Frame loop ──────────────────────────────────────────────────

    /// Advance one frame at host time `now` (seconds).
    /// Returns no events while paused; the host keeps calling this.
    pub fn frame(&mut self, now: f64) -> Vec<SceneEvent> {
        if self.clock.paused {
            return vec![];
        }

        let frame = self.clock.advance(now);
        let mut frame_events = vec![SceneEvent::FrameStarted { frame: frame.index }];
        frame_events.append(&mut self.pending);

        // Each system sees all events emitted so far this frame.
        for system in &mut self.systems {
            let new_events = system.update(&frame, &mut self.state, &frame_events);
            frame_events.extend(new_events);
        }

        frame_events.push(SceneEvent::FrameCompleted { frame: frame.index });
        self.last_frame = Some(frame);
        frame_events
    }

    /// Advance `n` frames spaced `1 / fps` seconds apart, starting right
    /// after the last frame. Used for testing and fast-forward.
    pub fn run_frames(&mut self, n: u64, fps: f64) -> Vec<SceneEvent> {
        let step = if fps > 0.0 { 1.0 / fps } else { 0.0 };
        let mut now = self.last_frame.map(|f| f.time + step).unwrap_or(0.0);
        let mut events = Vec::new();
        for _ in 0..n {
            events.extend(self.frame(now));
            now += step;
        }
        events
    }

    // ── Host input ──────────────────────────────────────────────────

    pub fn handle(&mut self, command: HostCommand) -> SceneResult<()> {
        match command {
            HostCommand::Click { x, y } => {
                self.click(x, y);
            }
            HostCommand::Resize { width, height } => self.resize(width, height)?,
            HostCommand::CameraInput { d_azimuth, d_elevation, zoom } => {
                self.camera_input(d_azimuth, d_elevation, zoom)
            }
            HostCommand::Pause => self.pause(),
            HostCommand::Resume => self.resume(),
        }
        Ok(())
    }

    /// Pick at viewport pixel `(x, y)` against the stars' current positions.
    pub fn click(&mut self, x: f32, y: f32) -> Option<SelectionChange> {
        let ray = self.state.camera.ray_from_viewport(&self.state.viewport, x, y);
        self.pick(&ray)
    }

    /// Click through the center of star `id`, as a pointer on its
    /// projected position would.
    pub fn click_star(&mut self, id: StarId) -> SceneResult<Option<SelectionChange>> {
        let target = self
            .state
            .star(id)
            .map(|s| s.position)
            .ok_or(SceneError::StarNotFound { id })?;
        let origin = self.state.camera.position;
        Ok(self.pick(&Ray::new(origin, target - origin)))
    }

    fn pick(&mut self, ray: &Ray) -> Option<SelectionChange> {
        let change = self.picker.click(ray, &self.state.stars)?;
        match change {
            SelectionChange::Selected(id) => {
                if let Some(star) = self.state.star(id) {
                    let payload = Arc::clone(star.payload());
                    self.overlay.show(&payload);
                    self.pending.push(SceneEvent::StarSelected { star_id: id, day: payload.day });
                }
            }
            SelectionChange::Deselected => {
                self.overlay.hide();
                self.pending.push(SceneEvent::StarDeselected);
            }
        }
        Some(change)
    }

    pub fn resize(&mut self, width: f32, height: f32) -> SceneResult<()> {
        let viewport = Viewport::new(width, height)?;
        self.state.viewport = viewport;
        self.state.camera.set_viewport(viewport);
        self.pending.push(SceneEvent::ViewportResized { width, height });
        Ok(())
    }

    /// Manual orbit input. The first call takes the camera over from
    /// the scripted orbit for the rest of the session.
    pub fn camera_input(&mut self, d_azimuth: f32, d_elevation: f32, zoom: f32) {
        let camera = &mut self.state.camera;
        let control = self.manual_camera.get_or_insert_with(|| {
            log::info!("manual camera control engaged");
            OrbitControl::from_camera(
                camera,
                self.config.camera.min_distance,
                self.config.camera.max_distance,
            )
        });
        control.apply(d_azimuth, d_elevation, zoom);
        control.drive(camera);
        self.pending.push(SceneEvent::ManualCameraInput { d_azimuth, d_elevation, zoom });
    }

    pub fn pause(&mut self) {
        if !self.clock.paused {
            self.clock.pause();
            self.pending.push(SceneEvent::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.clock.paused {
            self.clock.resume();
            self.pending.push(SceneEvent::Resumed);
        }
    }

    // ── Queries ─────────────────────────────────────────────────────

    pub fn snapshot(&self) -> FrameSnapshot {
        let camera = &self.state.camera;
        FrameSnapshot {
            frame:       self.clock.current_frame,
            time:        self.last_frame.map(|f| f.time).unwrap_or(0.0),
            paused:      self.clock.paused,
            load_status: self.load_status.clone(),
            indicator:   self.load_status.indicator(),
            field: FieldSnapshot {
                policy:     self.state.field.points().policy,
                points:     self.state.field.len(),
                rotation_y: self.state.field.rotation_y,
                model:      self.state.field.model_matrix().to_cols_array(),
            },
            camera: CameraSnapshot {
                position: camera.position.to_array(),
                target:   camera.target.to_array(),
                fov_y:    camera.fov_y_radians,
                aspect:   camera.aspect,
            },
            stars: self
                .state
                .stars
                .iter()
                .map(|s| StarInstance {
                    id:       s.id,
                    day:      s.day(),
                    position: s.position.to_array(),
                    scale:    s.scale,
                    color:    s.payload().color,
                })
                .collect(),
            selection: self.picker.state(),
            overlay:   self.overlay.panel().cloned(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng_bank.seed()
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    /// Direct scene access for hosts that reposition objects and for tests.
    pub fn state_mut(&mut self) -> &mut SceneState {
        &mut self.state
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn selection(&self) -> SelectionState {
        self.picker.state()
    }

    pub fn overlay(&self) -> &OverlayPresenter {
        &self.overlay
    }

    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Whether the scripted orbit still owns the camera.
    pub fn camera_orbit_active(&self) -> bool {
        self.systems.iter().any(|s| {
            s.as_any()
                .downcast_ref::<CameraOrbitSystem>()
                .is_some_and(CameraOrbitSystem::is_active)
        })
    }
}
