use pixelbonsai::{BonsaiError, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub garden: GardenSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct GardenSettings {
    pub grid: Option<i32>,        // Square grid side, 8-256
    pub step_delay: Option<f32>,  // Seconds between growth steps
    pub leaf: Option<char>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StoreSettings {
    pub dir: Option<PathBuf>,     // Where minted trees are kept
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportSettings {
    pub png_scale: Option<u32>,   // Image pixels per grid cell
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        let parsed = fs::read_to_string(&path)
            .map_err(BonsaiError::from)
            .and_then(|content| Self::parse(&content));
        match parsed {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pixelbonsai")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_settings() {
        let settings = Settings::parse(
            r#"
            [garden]
            grid = 64
            leaf = "*"

            [export]
            png_scale = 8
            "#,
        )
        .unwrap();
        assert_eq!(settings.garden.grid, Some(64));
        assert_eq!(settings.garden.leaf, Some('*'));
        assert_eq!(settings.garden.step_delay, None);
        assert_eq!(settings.export.png_scale, Some(8));
        assert!(settings.store.dir.is_none());
    }

    #[test]
    fn empty_settings_are_default() {
        let settings = Settings::parse("").unwrap();
        assert!(settings.garden.grid.is_none());
    }

    #[test]
    fn malformed_settings_error() {
        assert!(Settings::parse("[garden]\ngrid = \"big\"").is_err());
    }
}
