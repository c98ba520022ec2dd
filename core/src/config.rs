use crate::color::Rgb;
use glam::Vec3;
use serde::{Deserialize, Serialize};

// ── Field generation ───────────────────────────────────────────────

/// Which background point cloud to generate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum FieldConfig {
    Starfield(StarfieldParams),
    Disc(DiscParams),
    Spiral(SpiralParams),
}

impl FieldConfig {
    pub fn count(&self) -> usize {
        match self {
            Self::Starfield(p) => p.count,
            Self::Disc(p) => p.count,
            Self::Spiral(p) => p.count,
        }
    }

    pub fn policy_name(&self) -> &'static str {
        match self {
            Self::Starfield(_) => "starfield",
            Self::Disc(_) => "disc",
            Self::Spiral(_) => "spiral",
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::Starfield(StarfieldParams::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarfieldParams {
    pub count: usize,
    /// Half the side of the cube the points fill.
    pub spread: f32,
    pub size: f32,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self { count: 10_000, spread: 100.0, size: 0.1 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiscParams {
    pub count: usize,
    pub radius: f32,
    /// Maximum distance above or below the disc plane.
    pub thickness: f32,
    /// Per-point colors are `lerp(color_a, color_b, u)` with a random `u`.
    /// Both must be set for colors to be generated.
    pub color_a: Option<Rgb>,
    pub color_b: Option<Rgb>,
    /// Per-point sizes are uniform in [min, max] when set.
    pub size_range: Option<(f32, f32)>,
}

impl Default for DiscParams {
    fn default() -> Self {
        Self {
            count: 20_000,
            radius: 80.0,
            thickness: 2.0,
            color_a: Some(Rgb::new(0xff, 0xe6, 0xb3)),
            color_b: Some(Rgb::new(0x6c, 0x8c, 0xff)),
            size_range: Some((0.05, 0.25)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpiralParams {
    pub count: usize,
    pub radius: f32,
    pub branches: u32,
    /// Radians of twist per world unit of radius.
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    /// Jitter scale along Y; keeps the arms thin.
    pub vertical_scale: f32,
    pub inside_color: Option<Rgb>,
    pub outside_color: Option<Rgb>,
    pub size: f32,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            count: 30_000,
            radius: 60.0,
            branches: 5,
            spin: 0.05,
            randomness: 0.25,
            randomness_power: 3.0,
            vertical_scale: 4.0,
            inside_color: Some(Rgb::new(0xff, 0x60, 0x30)),
            outside_color: Some(Rgb::new(0x1b, 0x39, 0x84)),
            size: 0.12,
        }
    }
}

// ── Achievement placement ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlacementConfig {
    /// Half-width of the cube used by uniform placement.
    pub uniform_half_width: f32,
    /// Stars on spiral arms keep out of the inner `fraction · radius`.
    pub arm_inner_fraction: f32,
    pub arm_branches: u32,
    /// Jitter amplitude (world units) around the arm centerline.
    pub arm_jitter: f32,
    /// Each velocity axis is uniform in [-max_speed, max_speed].
    pub max_speed: f32,
    pub base_scale: f32,
    /// Radius of a star's clickable sphere at scale 1.
    pub star_radius: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            uniform_half_width: 50.0,
            arm_inner_fraction: 0.3,
            arm_branches: 3,
            arm_jitter: 1.5,
            max_speed: 0.02,
            base_scale: 1.0,
            star_radius: 0.55,
        }
    }
}

// ── Animation ──────────────────────────────────────────────────────

/// How drift is integrated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StepMode {
    /// One velocity step per rendered frame.
    PerFrame,
    /// Scale each step by `dt · reference_fps`.
    DeltaTime { reference_fps: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    pub pulse_amplitude: f32,
    /// Stars farther than this from the origin are reflected back.
    pub containment_radius: f32,
    /// Multiplier (<= 1) applied to a reflected position.
    pub reflect_damping: f32,
    /// Radians per frame about +Y.
    pub field_spin_per_frame: f32,
    pub step_mode: StepMode,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            pulse_amplitude: 0.1,
            containment_radius: 90.0,
            reflect_damping: 0.9,
            field_spin_per_frame: 0.0005,
            step_mode: StepMode::PerFrame,
        }
    }
}

// ── Camera ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Scripted circular path; `None` leaves the camera where it is.
    pub orbit: Option<OrbitPathConfig>,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 0.0, 30.0],
            target: [0.0, 0.0, 0.0],
            orbit: None,
            min_distance: 2.0,
            max_distance: 400.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitPathConfig {
    pub radius: f32,
    pub height: f32,
    /// Radians per second.
    pub angular_speed: f32,
}

impl Default for OrbitPathConfig {
    fn default() -> Self {
        Self { radius: 45.0, height: 12.0, angular_speed: 0.05 }
    }
}

// ── Loader ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoaderConfig {
    pub url: String,
    pub timeout_ms: u64,
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_ms: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5000/api/journey-data".into(),
            timeout_ms: 5_000,
            max_attempts: 4,
            initial_backoff_ms: 250,
            backoff_multiplier: 2.0,
            max_backoff_ms: 4_000,
        }
    }
}

// ── Scene ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub field: FieldConfig,
    pub placement: PlacementConfig,
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
    pub loader: LoaderConfig,
}

impl SceneConfig {
    /// Load from a JSON file. Missing sections fall back to defaults.
    /// In tests, use SceneConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SceneConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter sets the generators cannot honor.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let FieldConfig::Spiral(p) = &self.field {
            anyhow::ensure!(p.branches > 0, "spiral needs at least one branch");
            anyhow::ensure!(p.radius > 0.0, "spiral radius must be positive");
            anyhow::ensure!(
                p.randomness_power > 0.0,
                "spiral randomness_power must be positive"
            );
        }
        anyhow::ensure!(
            self.placement.arm_branches > 0,
            "arm placement needs at least one branch"
        );
        anyhow::ensure!(
            (0.0..1.0).contains(&self.placement.arm_inner_fraction),
            "arm_inner_fraction must be in [0, 1)"
        );
        anyhow::ensure!(
            self.animation.containment_radius > 0.0,
            "containment_radius must be positive"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.animation.reflect_damping),
            "reflect_damping must be in [0, 1]"
        );
        self.validate_camera()?;
        anyhow::ensure!(
            self.loader.max_attempts > 0,
            "loader needs at least one attempt"
        );
        anyhow::ensure!(self.loader.timeout_ms > 0, "loader timeout_ms must be positive");
        Ok(())
    }

    /// A view direction that is zero or parallel to +Y has no basis, so
    /// no ray can be cast through the screen.
    fn validate_camera(&self) -> anyhow::Result<()> {
        let camera = &self.camera;
        anyhow::ensure!(
            camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0,
            "camera fov_degrees must be in (0, 180)"
        );
        anyhow::ensure!(
            camera.near > 0.0 && camera.far > camera.near,
            "camera needs 0 < near < far"
        );

        let forward = Vec3::from(camera.target) - Vec3::from(camera.position);
        anyhow::ensure!(
            forward.length_squared() > f32::EPSILON,
            "camera position must differ from its target"
        );
        anyhow::ensure!(
            forward.normalize().cross(Vec3::Y).length_squared() > f32::EPSILON,
            "camera must not look straight along the vertical axis"
        );

        if let Some(orbit) = &camera.orbit {
            // The orbit always looks at the origin from (r·cos, h, r·sin).
            anyhow::ensure!(
                orbit.radius > 0.0,
                "camera orbit radius must be positive (radius {}, height {})",
                orbit.radius,
                orbit.height
            );
        }
        Ok(())
    }

    /// Small, fast config for unit and integration tests.
    pub fn default_test() -> Self {
        Self {
            field: FieldConfig::Starfield(StarfieldParams {
                count: 2_000,
                spread: 100.0,
                size: 0.1,
            }),
            loader: LoaderConfig {
                url: "http://127.0.0.1:9/api/journey-data".into(),
                timeout_ms: 200,
                max_attempts: 3,
                initial_backoff_ms: 1,
                backoff_multiplier: 2.0,
                max_backoff_ms: 4,
            },
            ..Self::default()
        }
    }

    /// Test config with a spiral field and arm-embedded placement.
    pub fn default_test_spiral() -> Self {
        Self {
            field: FieldConfig::Spiral(SpiralParams {
                count: 3_000,
                ..SpiralParams::default()
            }),
            ..Self::default_test()
        }
    }
}
