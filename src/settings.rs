use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::editor::Camera;
use crate::model::DefaultStyle;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings io error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse settings {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("could not encode settings: {0}")]
    Encode(String),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorSettings {
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_step: f32,
    pub wheel_zoom_sensitivity: f32,
    pub default_camera: Camera,
    pub page_width: f32,
    pub page_height: f32,
    pub page_gap: f32,
    pub history_limit: usize,
    pub marquee_threshold: f32,
    pub hit_tolerance: f32,
    pub bound_text_padding: f32,
    pub edge_label_padding: f32,
    pub min_container_size: f32,
    pub default_style: DefaultStyle,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 5.0,
            zoom_step: 1.1,
            wheel_zoom_sensitivity: 0.005,
            default_camera: Camera::new(50.0, 50.0, 0.8),
            page_width: 595.0,
            page_height: 842.0,
            page_gap: 30.0,
            history_limit: 200,
            marquee_threshold: 5.0,
            hit_tolerance: 4.0,
            bound_text_padding: 12.0,
            edge_label_padding: 6.0,
            min_container_size: 40.0,
            default_style: DefaultStyle::default(),
        }
    }
}

impl EditorSettings {
    /// Usable `(min, max)` zoom bounds. Non-positive or non-finite bounds
    /// fall back to the defaults and inverted bounds are swapped.
    pub fn zoom_bounds(&self) -> (f32, f32) {
        let usable = |z: f32, fallback: f32| {
            if z.is_finite() && z > 0.0 { z } else { fallback }
        };
        let defaults = Self::default();
        let lo = usable(self.min_zoom, defaults.min_zoom);
        let hi = usable(self.max_zoom, defaults.max_zoom);
        (lo.min(hi), lo.max(hi))
    }

    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        let (lo, hi) = self.zoom_bounds();
        zoom.clamp(lo, hi)
    }

    fn validate(&self) -> Result<(), String> {
        let positive = |z: f32| z.is_finite() && z > 0.0;
        if !positive(self.min_zoom) || !positive(self.max_zoom) {
            return Err(format!(
                "zoom bounds must be positive numbers, got {}..{}",
                self.min_zoom, self.max_zoom
            ));
        }
        if self.min_zoom > self.max_zoom {
            return Err(format!(
                "min_zoom {} is above max_zoom {}",
                self.min_zoom, self.max_zoom
            ));
        }
        if !positive(self.zoom_step) {
            return Err(format!("zoom_step must be positive, got {}", self.zoom_step));
        }
        Ok(())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

/// Reads settings from `path`. `.toml` files are parsed as TOML first and
/// everything else as JSON first; the other format is tried as a fallback.
pub fn load_settings(path: impl AsRef<Path>) -> Result<EditorSettings, SettingsError> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = if is_toml(path) {
        toml::from_str::<EditorSettings>(&s)
            .map_err(|e| e.to_string())
            .or_else(|first| serde_json::from_str::<EditorSettings>(&s).map_err(|_| first))
    } else {
        serde_json::from_str::<EditorSettings>(&s)
            .map_err(|e| e.to_string())
            .or_else(|first| toml::from_str::<EditorSettings>(&s).map_err(|_| first))
    };
    let settings = parsed
        .and_then(|settings| settings.validate().map(|()| settings))
        .map_err(|message| SettingsError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
    log::debug!("loaded settings from {}", path.display());
    Ok(settings)
}

pub fn save_settings(path: impl AsRef<Path>, settings: &EditorSettings) -> Result<(), SettingsError> {
    let path = path.as_ref();
    let body = if is_toml(path) {
        toml::to_string_pretty(settings).map_err(|e| SettingsError::Encode(e.to_string()))?
    } else {
        serde_json::to_string_pretty(settings).map_err(|e| SettingsError::Encode(e.to_string()))?
    };
    std::fs::write(path, body).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
