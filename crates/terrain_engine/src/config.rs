//! Configuration system
//!
//! Serde-backed configuration with TOML/RON file support. Defaults encode the
//! viewer's fixed asset paths and camera speeds so the binary runs without a
//! config file present.

use serde::{Deserialize, Serialize};

/// Configuration trait with file loading for supported formats
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Vulkan Terrain".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Shader binary paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShaderConfig {
    /// Path to the vertex shader SPIR-V file
    pub vertex_shader_path: String,
    /// Path to the fragment shader SPIR-V file
    pub fragment_shader_path: String,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            vertex_shader_path: "data/shaders/render.vert.spv".to_string(),
            fragment_shader_path: "data/shaders/render.frag.spv".to_string(),
        }
    }
}

/// Texture image paths for the two terrain layers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureConfig {
    /// Dirt texture path
    pub dirt_path: String,
    /// Grass texture path
    pub grass_path: String,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            dirt_path: "data/textures/dirt.png".to_string(),
            grass_path: "data/textures/grass.png".to_string(),
        }
    }
}

/// Camera movement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Base movement speed in world units per second
    pub move_speed: f32,
    /// Movement speed while the sprint modifier is held
    pub sprint_speed: f32,
    /// Whether mouse vertical look is applied
    pub pitch_enabled: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            move_speed: 50.0,
            sprint_speed: 100.0,
            pitch_enabled: true,
        }
    }
}

/// Terrain grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Number of vertices along each grid edge
    pub grid_size: u32,
    /// World-space distance between adjacent vertices
    pub spacing: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            grid_size: 128,
            spacing: 1.0,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Shader paths
    pub shaders: ShaderConfig,
    /// Texture paths
    pub textures: TextureConfig,
    /// Camera behavior
    pub camera: CameraConfig,
    /// Terrain grid shape
    pub terrain: TerrainConfig,
    /// Framebuffer clear color (RGBA)
    pub clear_color: [f32; 4],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            shaders: ShaderConfig::default(),
            textures: TextureConfig::default(),
            camera: CameraConfig::default(),
            terrain: TerrainConfig::default(),
            clear_color: [0.025, 0.025, 0.025, 1.0],
        }
    }
}

impl Config for AppConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_paths_and_speeds() {
        let config = AppConfig::default();

        assert_eq!(config.camera.move_speed, 50.0);
        assert_eq!(config.camera.sprint_speed, 100.0);
        assert!(config.camera.pitch_enabled);
        assert_eq!(config.textures.dirt_path, "data/textures/dirt.png");
        assert_eq!(config.textures.grass_path, "data/textures/grass.png");
        assert_eq!(config.shaders.vertex_shader_path, "data/shaders/render.vert.spv");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml).unwrap();

        assert_eq!(parsed.window.width, config.window.width);
        assert_eq!(parsed.camera.move_speed, config.camera.move_speed);
        assert_eq!(parsed.terrain.grid_size, config.terrain.grid_size);
    }

    #[test]
    fn test_unsupported_format_rejected() {
        let result = AppConfig::load_from_file("settings.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
