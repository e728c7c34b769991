use anyhow::Context;
use backend::audio::AudioSettings;
use backend::system::WindowSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "starter.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        let w = WindowSettings::default();
        WindowConfig {
            title: w.title,
            width: w.width,
            height: w.height,
            vsync: w.vsync,
        }
    }
}

/// Asset file names, relative to the executable's directory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetConfig {
    /// Sub-directory holding the shader sources; empty means the base path.
    pub shader_dir: PathBuf,
    pub font: PathBuf,
    pub image: PathBuf,
    pub music: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        AssetConfig {
            shader_dir: PathBuf::new(),
            font: PathBuf::from("Inter-VariableFont.ttf"),
            image: PathBuf::from("logo.png"),
            music: PathBuf::from("the_entertainer.ogg"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    pub message: String,
    pub point_size: u16,
}

impl Default for TextConfig {
    fn default() -> Self {
        TextConfig {
            message: "Hello SDL!".to_string(),
            point_size: 36,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    pub volume: i32,
    pub fade_out_ms: i32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        let a = AudioSettings::default();
        AudioConfig {
            volume: a.volume,
            fade_out_ms: a.fade_out_ms,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub assets: AssetConfig,
    pub text: TextConfig,
    pub audio: AudioConfig,
}

impl AppConfig {
    /// Reads `starter.toml` from `base`. A missing file yields the defaults;
    /// a malformed one is an error.
    pub fn load(base: &Path) -> anyhow::Result<AppConfig> {
        let path = base.join(CONFIG_FILE);
        if !path.is_file() {
            log::debug!("no {:?}, using built-in defaults", path);
            return Ok(AppConfig::default());
        }
        let raw = fs::read_to_string(&path).with_context(|| format!("reading {path:?}"))?;
        let config = Self::parse(&raw).with_context(|| format!("parsing {path:?}"))?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<AppConfig, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn window_settings(&self) -> WindowSettings {
        WindowSettings {
            title: self.window.title.clone(),
            width: self.window.width,
            height: self.window.height,
            vsync: self.window.vsync,
        }
    }

    pub fn audio_settings(&self) -> AudioSettings {
        AudioSettings {
            volume: self.audio.volume,
            fade_out_ms: self.audio.fade_out_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let c = AppConfig::parse("").unwrap();
        assert_eq!(c, AppConfig::default());
        assert_eq!(c.window.title, "SDL Minimal Sample");
        assert_eq!((c.window.width, c.window.height), (400, 400));
        assert_eq!(c.assets.font, Path::new("Inter-VariableFont.ttf"));
        assert_eq!(c.assets.image, Path::new("logo.png"));
        assert_eq!(c.assets.music, Path::new("the_entertainer.ogg"));
        assert_eq!(c.text.message, "Hello SDL!");
        assert_eq!(c.text.point_size, 36);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let c = AppConfig::parse(
            r#"
            [window]
            width = 1280

            [audio]
            volume = 32
            "#,
        )
        .unwrap();
        assert_eq!(c.window.width, 1280);
        assert_eq!(c.window.height, 400);
        assert_eq!(c.audio.volume, 32);
        assert_eq!(c.audio.fade_out_ms, 1000);
        assert_eq!(c.text, TextConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AppConfig::parse("[window]\nfullscreen = true\n").is_err());
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(AppConfig::parse("[text]\npoint_size = \"big\"\n").is_err());
    }

    #[test]
    fn shipped_sample_matches_defaults() {
        let c = AppConfig::parse(include_str!("../assets/starter.toml")).unwrap();
        assert_eq!(c, AppConfig::default());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = std::env::temp_dir().join("sdl-starter-no-config-here");
        let c = AppConfig::load(&dir).unwrap();
        assert_eq!(c, AppConfig::default());
    }

    #[test]
    fn settings_conversions() {
        let c = AppConfig::parse("[window]\ntitle = \"demo\"\nvsync = false\n").unwrap();
        let w = c.window_settings();
        assert_eq!(w.title, "demo");
        assert!(!w.vsync);
        assert_eq!(c.audio_settings().volume, 128);
    }
}
