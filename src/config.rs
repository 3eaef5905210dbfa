use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::classify::PlatformProfile;
use crate::PlatformFamily;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".to_string(),
            timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "PlatformProfile::youtube")]
    pub youtube: PlatformProfile,
    #[serde(default = "PlatformProfile::tiktok")]
    pub tiktok: PlatformProfile,
    #[serde(default = "PlatformProfile::instagram")]
    pub instagram: PlatformProfile,
    #[serde(default)]
    pub backend: BackendConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            youtube: PlatformProfile::youtube(),
            tiktok: PlatformProfile::tiktok(),
            instagram: PlatformProfile::instagram(),
            backend: BackendConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                EngineConfig::default()
            }
        } else {
            EngineConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload).map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    pub fn profile_for(&self, family: PlatformFamily) -> &PlatformProfile {
        match family {
            PlatformFamily::Youtube => &self.youtube,
            PlatformFamily::Tiktok => &self.tiktok,
            PlatformFamily::Instagram => &self.instagram,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("DENSITY_CAP") {
            if let Ok(cap) = value.parse::<usize>() {
                for profile in self.profiles_mut() {
                    profile.density_cap = cap;
                }
            }
        }
        if let Ok(value) = env::var("SUPER_VIRAL_THRESHOLD") {
            if let Ok(threshold) = value.parse::<f64>() {
                for profile in self.profiles_mut() {
                    profile.super_viral_threshold = threshold;
                }
            }
        }
        if let Ok(value) = env::var("NOISE_FLOOR_VIEWS") {
            if let Ok(floor) = value.parse::<f64>() {
                for profile in self.profiles_mut() {
                    profile.noise_floor_views = floor;
                }
            }
        }
        if let Ok(endpoint) = env::var("BACKEND_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.backend.endpoint = endpoint;
            }
        }
        if let Ok(timeout) = env::var("BACKEND_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.backend.timeout_ms = value;
            }
        }
    }

    fn profiles_mut(&mut self) -> [&mut PlatformProfile; 3] {
        [&mut self.youtube, &mut self.tiktok, &mut self.instagram]
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("MATRIX_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/matrix.toml")))
}
