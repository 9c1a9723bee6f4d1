//! Scene configuration.
//!
//! Loaded from TOML (usually `vector-scene.toml`) with environment
//! variable overrides layered on top.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default config file looked up by [`SceneConfig::load_or_default`].
pub const DEFAULT_CONFIG_FILE: &str = "vector-scene.toml";

/// Settings a [`Scene`](crate::scene::Scene) is created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Refit the viewport after every change. Off means the caller
    /// refits explicitly.
    pub auto_draw: bool,
    /// Recompute the viewport from every shape on each refit so it can
    /// shrink. Off means only queued shapes are visited and the viewport
    /// only grows.
    pub resize_down: bool,
    /// Initial surface width. With a non-zero `height` this seeds the
    /// viewport with `(0, 0, width, height)`.
    pub width: f64,
    /// Initial surface height.
    pub height: f64,
    /// Prefix for generated shape ids.
    pub id_prefix: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            auto_draw: true,
            resize_down: false,
            width: 0.0,
            height: 0.0,
            id_prefix: "shape".to_string(),
        }
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl SceneConfig {
    /// Parse configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load [`DEFAULT_CONFIG_FILE`] from the current directory, or the
    /// defaults when it is missing or unreadable.
    pub fn load_or_default() -> Self {
        match Self::load_from_file(DEFAULT_CONFIG_FILE) {
            Ok(config) => config,
            Err(ConfigError::Io(_)) => Self::default(),
            Err(e) => {
                log::warn!("ignoring {}: {}", DEFAULT_CONFIG_FILE, e);
                Self::default()
            }
        }
    }

    /// Apply overrides from the process environment.
    ///
    /// `VECTOR_SCENE_RESIZE_DOWN` and `VECTOR_SCENE_AUTO_DRAW` accept `1`
    /// or `true` (any case); anything else turns the flag off.
    pub fn merge_with_env(&mut self) {
        self.merge_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn merge_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("VECTOR_SCENE_RESIZE_DOWN") {
            self.resize_down = parse_flag(&val);
        }
        if let Some(val) = lookup("VECTOR_SCENE_AUTO_DRAW") {
            self.auto_draw = parse_flag(&val);
        }
    }

    /// Load from the default file, then apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }

    /// The configured initial extent, when both sides are non-zero.
    pub fn initial_extent(&self) -> Option<(f64, f64)> {
        if self.width != 0.0 && self.height != 0.0 {
            Some((self.width, self.height))
        } else {
            None
        }
    }
}
