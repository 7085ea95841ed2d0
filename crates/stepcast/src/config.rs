use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "stepcast";

pub const VALID_KEYS: &[&str] = &[
    "defaults.theme",
    "defaults.animation_ms",
    "defaults.windowed",
    "defaults.cursor_size",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Length of an animation whose action carries no duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,

    /// Cursor arrow height in logical pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_size: Option<f32>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `stepcast config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# stepcast configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let defaults = self.defaults.get_or_insert_with(DefaultsConfig::default);
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                defaults.theme = Some(value.to_string());
            }
            "defaults.animation_ms" => {
                let ms = value.parse::<u64>().ok().filter(|ms| *ms > 0).ok_or_else(|| {
                    anyhow::anyhow!("Invalid animation_ms: {value}. Must be a positive integer.")
                })?;
                defaults.animation_ms = Some(ms);
            }
            "defaults.windowed" => {
                let windowed = value.parse::<bool>().map_err(|_| {
                    anyhow::anyhow!("Invalid windowed: {value}. Must be 'true' or 'false'.")
                })?;
                defaults.windowed = Some(windowed);
            }
            "defaults.cursor_size" => {
                let size = value
                    .parse::<f32>()
                    .ok()
                    .filter(|s| s.is_finite() && *s > 0.0)
                    .ok_or_else(|| {
                        anyhow::anyhow!("Invalid cursor_size: {value}. Must be a positive number.")
                    })?;
                defaults.cursor_size = Some(size);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: {}",
                VALID_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    pub fn theme(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .unwrap_or("dark")
    }

    pub fn animation_ms(&self) -> u64 {
        self.defaults
            .as_ref()
            .and_then(|d| d.animation_ms)
            .unwrap_or(600)
    }

    pub fn windowed(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.windowed)
            .unwrap_or(false)
    }

    pub fn cursor_size(&self) -> f32 {
        self.defaults
            .as_ref()
            .and_then(|d| d.cursor_size)
            .unwrap_or(28.0)
    }
}
