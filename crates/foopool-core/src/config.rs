use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable pointing at a TOML config file.
pub const CONFIG_ENV_VAR: &str = "FOOPOOL_CONFIG";
/// Fallback config path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/foopool.toml";

/// Data-driven configuration for a pool simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub field: FieldConfig,
    pub ball: BallConfig,
    pub motion: MotionConfig,
    pub timing: TimingConfig,
}

/// Static bounds and surface of the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    /// Dimensionless coefficient of the velocity-proportional opposing force.
    pub friction_factor: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            friction_factor: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    /// Physical radius; a press inside it grabs the ball by its centre.
    pub radius: f32,
    /// Radius of the interactive zone around the ball.
    pub hover_radius: f32,
    /// Mass in kg.
    pub weight: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            hover_radius: 40.0,
            weight: 0.21,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Scale from drag length (field units) to force.
    pub force_scale: f32,
    /// Speed and acceleration below this on both axes count as stopped.
    pub stop_epsilon: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            force_scale: 8.0,
            stop_epsilon: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub draw_period_ms: u64,
    pub update_period_ms: u64,
    /// A drag with no pointer movement for this long is cancelled.
    pub drag_timeout_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            draw_period_ms: 33,
            update_period_ms: 33,
            drag_timeout_ms: 750,
        }
    }
}

impl TimingConfig {
    /// Physics timestep in seconds.
    pub fn dt(&self) -> f32 {
        self.update_period_ms as f32 / 1000.0
    }

    pub fn draw_period(&self) -> Duration {
        Duration::from_millis(self.draw_period_ms)
    }

    pub fn update_period(&self) -> Duration {
        Duration::from_millis(self.update_period_ms)
    }

    pub fn drag_timeout(&self) -> Duration {
        Duration::from_millis(self.drag_timeout_ms)
    }
}

impl PoolConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
            && let Ok(contents) = std::fs::read_to_string(&path)
        {
            match Self::from_toml_str(&contents) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(%path, error = %e, "Ignoring config file"),
            }
        }
        if let Ok(contents) = std::fs::read_to_string(DEFAULT_CONFIG_PATH) {
            match Self::from_toml_str(&contents) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = DEFAULT_CONFIG_PATH, error = %e, "Ignoring config file")
                },
            }
        }
        Self::default()
    }

    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the simulation relies on (positive mass, a hover
    /// ring outside the ball, a friction step that decays).
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field.width", self.field.width)?;
        positive("field.height", self.field.height)?;
        positive("field.friction_factor", self.field.friction_factor)?;
        positive("ball.radius", self.ball.radius)?;
        positive("ball.hover_radius", self.ball.hover_radius)?;
        positive("ball.weight", self.ball.weight)?;
        positive("motion.force_scale", self.motion.force_scale)?;
        positive("motion.stop_epsilon", self.motion.stop_epsilon)?;
        positive("timing.draw_period_ms", self.timing.draw_period_ms as f32)?;
        positive("timing.update_period_ms", self.timing.update_period_ms as f32)?;
        positive("timing.drag_timeout_ms", self.timing.drag_timeout_ms as f32)?;

        if self.ball.hover_radius <= self.ball.radius {
            return Err(ConfigError::HoverInsideBall {
                radius: self.ball.radius,
                hover_radius: self.ball.hover_radius,
            });
        }

        let ratio = self.field.friction_factor * self.timing.dt() / self.ball.weight;
        if ratio >= 1.0 {
            return Err(ConfigError::UnstableFriction { ratio });
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN fails this comparison too.
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
