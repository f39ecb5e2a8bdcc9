/// Engine settings, loaded from TOML
use serde::Deserialize;
use std::path::Path;

use crate::geometry::Mesh;
use crate::surface::{Color, PixelStyle, RenderMode};

/// Errors that can occur when loading settings.
#[derive(Debug)]
pub enum ConfigError {
    /// Settings file could not be read.
    Io(std::io::Error),
    /// Settings file is not valid TOML for these settings.
    Parse(toml::de::Error),
    /// A value is outside the range the renderer can use.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid setting: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub projection: ProjectionSettings,
    pub animation: AnimationSettings,
    pub render: RenderSettings,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ProjectionSettings {
    pub near: f32,
    pub far: f32,
    pub fov_degrees: f32,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 1000.0,
            fov_degrees: 90.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct AnimationSettings {
    /// Radians per second about Z.
    pub spin_rate: f32,
    /// X-axis speed relative to Z.
    pub x_axis_ratio: f32,
    /// Distance the model is pushed along +z before projection.
    pub z_offset: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            spin_rate: 1.0,
            x_axis_ratio: 0.5,
            z_offset: 3.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct RenderSettings {
    pub mode: RenderMode,
    pub style: PixelStyle,
    pub foreground: Color,
    pub background: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::Filled,
            style: PixelStyle::Solid,
            foreground: Color::White,
            background: Color::Black,
        }
    }
}

impl EngineConfig {
    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.projection;
        if p.near.is_nan() || p.near <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "projection.near must be positive, got {}",
                p.near
            )));
        }
        // The depth scale near / (far - near) stays below 1 only past 2 * near
        if !p.far.is_finite() || p.far <= 2.0 * p.near {
            return Err(ConfigError::Invalid(format!(
                "projection.far must be finite and more than twice near ({}), got {}",
                p.near, p.far
            )));
        }
        if p.fov_degrees.is_nan() || p.fov_degrees <= 0.0 || p.fov_degrees >= 180.0 {
            return Err(ConfigError::Invalid(format!(
                "projection.fov_degrees must be in (0, 180), got {}",
                p.fov_degrees
            )));
        }

        let a = &self.animation;
        for (name, value) in [
            ("spin_rate", a.spin_rate),
            ("x_axis_ratio", a.x_axis_ratio),
            ("z_offset", a.z_offset),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "animation.{} must be finite, got {}",
                    name, value
                )));
            }
        }

        // Every corner must stay in front of the eye at any angle, or w
        // approaches zero and the screen coordinates blow up
        let radius = Mesh::cube().bounding_radius();
        if a.z_offset <= radius {
            return Err(ConfigError::Invalid(format!(
                "animation.z_offset must be greater than {} so the cube stays in front of the eye, got {}",
                radius, a.z_offset
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.projection.near, 0.1);
        assert_eq!(config.projection.far, 1000.0);
        assert_eq!(config.projection.fov_degrees, 90.0);
        assert_eq!(config.animation.z_offset, 3.0);
        assert_eq!(config.render.mode, RenderMode::Filled);
    }

    #[test]
    fn test_partial_document() {
        let config = EngineConfig::from_toml_str(
            r#"
            [projection]
            fov_degrees = 60.0

            [render]
            mode = "wireframe"
            foreground = "cyan"
            style = "half"
            "#,
        )
        .unwrap();
        assert_eq!(config.projection.fov_degrees, 60.0);
        assert_eq!(config.projection.near, 0.1);
        assert_eq!(config.render.mode, RenderMode::Wireframe);
        assert_eq!(config.render.foreground, Color::Cyan);
        assert_eq!(config.render.style, PixelStyle::Half);
        assert_eq!(config.render.background, Color::Black);
    }

    #[test]
    fn test_rejects_inverted_planes() {
        let err = EngineConfig::from_toml_str("[projection]\nnear = 5.0\nfar = 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_far_must_exceed_twice_near() {
        for (near, far) in [(1.0, 1.5), (1.0, 2.0), (0.1, f32::INFINITY)] {
            let config = EngineConfig {
                projection: ProjectionSettings {
                    near,
                    far,
                    ..Default::default()
                },
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }
        assert!(EngineConfig::from_toml_str("[projection]\nnear = 1.0\nfar = 2.5\n").is_ok());
    }

    #[test]
    fn test_rejects_nan_projection() {
        let mut config = EngineConfig::default();
        config.projection.near = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.projection.fov_degrees = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_z_offset_keeps_cube_in_front() {
        let radius = 3f32.sqrt();
        for z_offset in [0.0, 1.0, -3.0, radius] {
            let mut config = EngineConfig::default();
            config.animation.z_offset = z_offset;
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "z_offset = {}",
                z_offset
            );
        }

        let mut config = EngineConfig::default();
        config.animation.z_offset = f32::from_bits(radius.to_bits() + 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_fov() {
        for fov in ["0.0", "180.0", "-10.0"] {
            let text = format!("[projection]\nfov_degrees = {}\n", fov);
            assert!(matches!(
                EngineConfig::from_toml_str(&text),
                Err(ConfigError::Invalid(_))
            ));
        }
    }

    #[test]
    fn test_rejects_non_finite_animation() {
        let text = "[animation]\nspin_rate = inf\n";
        assert!(matches!(
            EngineConfig::from_toml_str(text),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_unknown_color_is_parse_error() {
        let err = EngineConfig::from_toml_str("[render]\nforeground = \"chartreuse\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EngineConfig::load("/nonexistent/cube3d.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
