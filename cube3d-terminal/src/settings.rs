/// Settings file for the terminal host
use cube3d_core::{ConfigError, EngineConfig};
use serde::Deserialize;
use std::path::Path;

/// Everything the terminal host reads from its settings file.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Settings {
    #[serde(flatten)]
    pub engine: EngineConfig,
    pub screen: ScreenSettings,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ScreenSettings {
    /// Columns to render; 0 follows the terminal.
    pub width: u16,
    /// Rows to render; 0 follows the terminal.
    pub height: u16,
    pub target_fps: u32,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            target_fps: 30,
        }
    }
}

impl ScreenSettings {
    /// Render size for a terminal of `columns` x `rows`. One row is kept
    /// back for the title line.
    pub fn resolve(&self, columns: u16, rows: u16) -> (u16, u16) {
        let width = if self.width == 0 { columns } else { self.width.min(columns) };
        let available = rows.saturating_sub(1);
        let height = if self.height == 0 { available } else { self.height.min(available) };
        (width, height)
    }
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(text)?;
        settings.engine.validate()?;
        if settings.screen.target_fps == 0 {
            return Err(ConfigError::Invalid(
                "screen.target_fps must be at least 1".to_string(),
            ));
        }
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube3d_core::{Color, RenderMode};

    #[test]
    fn test_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.screen.target_fps, 30);
    }

    #[test]
    fn test_engine_tables_sit_at_top_level() {
        let settings = Settings::from_toml_str(
            r#"
            [render]
            mode = "wireframe"
            background = "dark_blue"

            [screen]
            width = 120
            target_fps = 60
            "#,
        )
        .unwrap();
        assert_eq!(settings.engine.render.mode, RenderMode::Wireframe);
        assert_eq!(settings.engine.render.background, Color::DarkBlue);
        assert_eq!(settings.screen.width, 120);
        assert_eq!(settings.screen.height, 0);
        assert_eq!(settings.screen.target_fps, 60);
    }

    #[test]
    fn test_invalid_engine_settings_rejected() {
        let result = Settings::from_toml_str("[projection]\nnear = -1.0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_fps_rejected() {
        let result = Settings::from_toml_str("[screen]\ntarget_fps = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_resolve_screen_size() {
        let auto = ScreenSettings::default();
        assert_eq!(auto.resolve(80, 24), (80, 23));

        let fixed = ScreenSettings {
            width: 256,
            height: 240,
            target_fps: 30,
        };
        assert_eq!(fixed.resolve(300, 300), (256, 240));
        assert_eq!(fixed.resolve(100, 50), (100, 49));
        assert_eq!(auto.resolve(10, 0), (10, 0));
    }
}
