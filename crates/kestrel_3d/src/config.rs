//! Scene configuration file handling
//!
//! A scene file is TOML. Every table is optional and falls back to the
//! built-in demo layout:
//!
//! ```toml
//! [viewport]
//! width = 1280
//! height = 720
//!
//! [camera]
//! fov_degrees = 67.0
//! position = [0.0, 1.0, 6.0]
//!
//! [picking]
//! formula = "geometric"   # or "legacy"
//!
//! [[spheres]]
//! position = [0.0, 0.0, 1.0]
//! color = [1.0, 0.0, 0.0]
//! ```

use crate::error::{Result, SceneError};
use crate::picking::{SphereFormula, DEFAULT_SPHERE_RADIUS};
use crate::scene::{PerspectiveCamera, Viewport};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Full scene configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SceneConfig {
    /// Spin rate of the sphere group about world up, degrees per second
    #[serde(default = "default_group_spin")]
    pub group_spin: f32,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default)]
    pub picking: PickingConfig,
    #[serde(default = "default_spheres")]
    pub spheres: Vec<SphereConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            group_spin: default_group_spin(),
            viewport: ViewportConfig::default(),
            camera: CameraConfig::default(),
            controls: ControlsConfig::default(),
            picking: PickingConfig::default(),
            spheres: default_spheres(),
        }
    }
}

fn default_group_spin() -> f32 {
    10.0
}

fn default_spheres() -> Vec<SphereConfig> {
    vec![
        SphereConfig::new([0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        SphereConfig::new([2.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        SphereConfig::new([-2.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        SphereConfig::new([-2.0, 0.0, -2.0], [1.0, 1.0, 0.0]),
    ]
}

/// Render target size
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl ViewportConfig {
    pub fn to_viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

/// Perspective camera settings and starting position
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: default_fov(),
            near: default_near(),
            far: default_far(),
            position: default_camera_position(),
        }
    }
}

impl CameraConfig {
    /// Build a camera whose aspect ratio matches `viewport`
    pub fn to_camera(&self, viewport: Viewport) -> PerspectiveCamera {
        PerspectiveCamera::from_degrees(self.fov_degrees, viewport.aspect(), self.near, self.far)
    }
}

fn default_fov() -> f32 {
    67.0
}

fn default_near() -> f32 {
    0.1
}

fn default_far() -> f32 {
    1000.0
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 1.0, 6.0]
}

/// Fly controller tuning
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ControlsConfig {
    /// Units per second
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_yaw_speed")]
    pub yaw_speed: f32,
    #[serde(default = "default_pitch_speed")]
    pub pitch_speed: f32,
    #[serde(default = "default_pitch_limit")]
    pub pitch_limit: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            yaw_speed: default_yaw_speed(),
            pitch_speed: default_pitch_speed(),
            pitch_limit: default_pitch_limit(),
        }
    }
}

fn default_speed() -> f32 {
    7.0
}

fn default_yaw_speed() -> f32 {
    20.0
}

fn default_pitch_speed() -> f32 {
    10.0
}

fn default_pitch_limit() -> f32 {
    80.0
}

/// Picking settings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PickingConfig {
    #[serde(default)]
    pub formula: SphereFormula,
    #[serde(default = "default_sphere_radius")]
    pub sphere_radius: f32,
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            formula: SphereFormula::default(),
            sphere_radius: default_sphere_radius(),
        }
    }
}

fn default_sphere_radius() -> f32 {
    DEFAULT_SPHERE_RADIUS
}

/// One pickable sphere, positioned relative to the spinning group
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SphereConfig {
    pub position: [f32; 3],
    #[serde(default = "default_color")]
    pub color: [f32; 3],
}

impl SphereConfig {
    pub fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

fn default_color() -> [f32; 3] {
    [0.8, 0.8, 0.8]
}

impl SceneConfig {
    /// Load and validate a scene file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), spheres = config.spheres.len(), "scene config loaded");
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SceneError::Config(e.to_string()))
    }

    /// Reject values that would make the projection or picking degenerate
    pub fn validate(&self) -> Result<()> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(SceneError::Config(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return Err(SceneError::Config(format!(
                "camera.fov_degrees must be in (0, 180), got {}",
                self.camera.fov_degrees
            )));
        }
        if !(self.camera.near > 0.0 && self.camera.near < self.camera.far) {
            return Err(SceneError::Config(format!(
                "camera planes need 0 < near < far, got near={} far={}",
                self.camera.near, self.camera.far
            )));
        }
        let radius = self.picking.sphere_radius;
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(SceneError::Config(format!(
                "picking.sphere_radius must be positive, got {}",
                self.picking.sphere_radius
            )));
        }
        let limit = self.controls.pitch_limit;
        if !(0.0..=90.0).contains(&limit) {
            return Err(SceneError::Config(format!(
                "controls.pitch_limit must be in [0, 90], got {limit}"
            )));
        }
        let rates = [
            ("group_spin", self.group_spin),
            ("controls.speed", self.controls.speed),
            ("controls.yaw_speed", self.controls.yaw_speed),
            ("controls.pitch_speed", self.controls.pitch_speed),
        ];
        if let Some((key, value)) = rates.iter().find(|(_, value)| !value.is_finite()) {
            return Err(SceneError::Config(format!("{key} must be finite, got {value}")));
        }
        Ok(())
    }
}
