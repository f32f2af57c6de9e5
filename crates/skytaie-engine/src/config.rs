//! Engine configuration.
//!
//! Plain struct with defaults and builder-style setters. Can also be read from a JSON
//! file; any field missing from the file keeps its default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::frame_loop::LoopConfig;
use crate::paint::Color;
use crate::render::RenderStyle;

/// Default project folder created under the save root.
pub const DEFAULT_PROJECT_FOLDER: &str = "skytaie";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Sleep between frame-loop iterations.
    pub tick_interval_ms: u64,
    pub project_folder: String,
    pub shape_color: Color,
    pub sprite_color: Color,
    /// Background fill before each repaint. `None` leaves the previous frame in place.
    pub clear_color: Option<Color>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "New Game".to_string(),
            width: 1080,
            height: 768,
            tick_interval_ms: 1,
            project_folder: DEFAULT_PROJECT_FOLDER.to_string(),
            shape_color: Color::RED,
            sprite_color: Color::BLUE,
            clear_color: None,
        }
    }
}

impl EngineConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval_ms = interval.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    pub fn project_folder(mut self, folder: impl Into<String>) -> Self {
        self.project_folder = folder.into();
        self
    }

    pub fn clear_color(mut self, color: Option<Color>) -> Self {
        self.clear_color = color;
        self
    }

    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            ..LoopConfig::default()
        }
    }

    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            shape_color: self.shape_color,
            sprite_color: self.sprite_color,
            clear_color: self.clear_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = EngineConfig::default();
        assert_eq!((cfg.width, cfg.height), (1080, 768));
        assert_eq!(cfg.project_folder, "skytaie");
        assert_eq!(cfg.loop_config().tick_interval, Duration::from_millis(1));
        assert_eq!(cfg.render_style().clear_color, None);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EngineConfig::from_json(r#"{ "title": "Demo", "tick_interval_ms": 16 }"#).unwrap();
        assert_eq!(cfg.title, "Demo");
        assert_eq!(cfg.tick_interval_ms, 16);
        assert_eq!(cfg.shape_color, Color::RED);
        assert_eq!(cfg.width, 1080);
    }

    #[test]
    fn clear_color_from_json() {
        let cfg = EngineConfig::from_json(r#"{ "clear_color": { "r": 255, "g": 255, "b": 255 } }"#)
            .unwrap();
        assert_eq!(cfg.clear_color, Some(Color::WHITE));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EngineConfig::from_file("/definitely/not/here/skytaie.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn builder_setters() {
        let cfg = EngineConfig::default()
            .title("x")
            .size(320, 200)
            .tick_interval(Duration::from_millis(5))
            .project_folder("proj");
        assert_eq!(cfg.title, "x");
        assert_eq!((cfg.width, cfg.height), (320, 200));
        assert_eq!(cfg.tick_interval_ms, 5);
        assert_eq!(cfg.project_folder, "proj");
    }
}
