//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock Xbox One setup. The file is located through
//! [`Config::resolve_path`]: `$PAD_OVERLAY_CONFIG` if set, otherwise
//! `config/default.toml` when it exists.
//!
//! Relative file paths (`config/default.toml`, `window.image_path`) are looked
//! up next to the executable first and in the working directory second, see
//! [`locate`].

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PadOverlayError, Result};
use crate::layout::ControllerProfile;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "PAD_OVERLAY_CONFIG";

/// Configuration file used when the environment variable is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub haptic: HapticConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub profile: ControllerProfile,
}

/// Window configuration
#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: u32,

    #[serde(default = "default_window_height")]
    pub height: u32,

    #[serde(default = "default_window_title")]
    pub title: String,

    #[serde(default = "default_image_path")]
    pub image_path: PathBuf,

    #[serde(default = "default_frame_rate_hz")]
    pub frame_rate_hz: u32,
}

/// Controller configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ControllerConfig {
    /// Empty means auto-detect
    #[serde(default)]
    pub device_path: String,
}

/// Haptic configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HapticConfig {
    #[serde(default = "default_haptic_enabled")]
    pub enabled: bool,

    #[serde(default = "default_haptic_device_path")]
    pub device_path: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also write logs to `<log_dir>/pad-overlay.log` when set
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

// Default value functions
fn default_window_width() -> u32 { 640 }
fn default_window_height() -> u32 { 640 }
fn default_window_title() -> String { "Xbox Controller Visualizer + 3 Rumble Buttons".to_string() }
fn default_image_path() -> PathBuf { PathBuf::from("assets/xbox_controller.png") }
fn default_frame_rate_hz() -> u32 { 30 }

fn default_haptic_enabled() -> bool { true }
fn default_haptic_device_path() -> String { "/dev/input/event7".to_string() }

fn default_log_level() -> String { "info".to_string() }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            title: default_window_title(),
            image_path: default_image_path(),
            frame_rate_hz: default_frame_rate_hz(),
        }
    }
}

impl Default for HapticConfig {
    fn default() -> Self {
        Self {
            enabled: default_haptic_enabled(),
            device_path: default_haptic_device_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: None,
        }
    }
}

impl WindowConfig {
    /// Window size in logical pixels.
    #[must_use]
    pub fn size(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }

    /// Time between two rendered frames.
    #[must_use]
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(1000 / u64::from(self.frame_rate_hz.max(1)))
    }

    /// `image_path` resolved with [`locate`] against the program directory.
    #[must_use]
    pub fn resolved_image_path(&self) -> PathBuf {
        locate(&self.image_path, program_dir().as_deref())
    }
}

impl ControllerConfig {
    /// Configured device node, or `None` to auto-detect.
    #[must_use]
    pub fn device_path(&self) -> Option<&Path> {
        if self.device_path.is_empty() {
            None
        } else {
            Some(Path::new(&self.device_path))
        }
    }
}

/// Directory holding the running executable, symlinks resolved.
#[must_use]
pub fn program_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent().map(Path::to_path_buf)
}

/// Finds a file named by a possibly relative path.
///
/// Absolute paths are returned as they are. A relative path is tried under
/// `program_dir` first, then against the working directory. When neither
/// exists the program-relative path is returned so errors name it.
///
/// ```
/// use std::path::Path;
/// use pad_overlay::config::locate;
///
/// let path = locate(Path::new("/etc/pad.toml"), Some(Path::new("/opt/pad")));
/// assert_eq!(path, Path::new("/etc/pad.toml"));
///
/// let path = locate(Path::new("no/such/file.png"), Some(Path::new("/opt/pad")));
/// assert_eq!(path, Path::new("/opt/pad/no/such/file.png"));
/// ```
#[must_use]
pub fn locate(path: &Path, program_dir: Option<&Path>) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Some(dir) = program_dir {
        let candidate = dir.join(path);
        if candidate.exists() {
            return candidate;
        }
    }

    if path.exists() {
        return path.to_path_buf();
    }

    match program_dir {
        Some(dir) => dir.join(path),
        None => path.to_path_buf(),
    }
}

fn invalid(message: impl std::fmt::Display) -> PadOverlayError {
    PadOverlayError::Config(toml::de::Error::custom(message))
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pad_overlay::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Which file to load, if any.
    ///
    /// `env_value` is the value of [`CONFIG_ENV_VAR`]. An explicitly named
    /// file is returned whether or not it exists, so a typo fails loudly;
    /// the fallback file is only used when present.
    #[must_use]
    pub fn resolve_path(env_value: Option<String>, fallback: &Path) -> Option<PathBuf> {
        match env_value {
            Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ if fallback.is_file() => Some(fallback.to_path_buf()),
            _ => None,
        }
    }

    /// Load the configuration the tools run with
    ///
    /// # Errors
    ///
    /// Returns error if a configuration file was found but could not be
    /// loaded.
    pub fn load_from_env() -> Result<(Self, Option<PathBuf>)> {
        let fallback = locate(Path::new(DEFAULT_CONFIG_PATH), program_dir().as_deref());
        let path = Self::resolve_path(std::env::var(CONFIG_ENV_VAR).ok(), &fallback);
        match path {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        // Validate window configuration
        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window width and height must be greater than 0"));
        }

        if self.window.frame_rate_hz == 0 || self.window.frame_rate_hz > 240 {
            return Err(invalid("frame_rate_hz must be between 1 and 240"));
        }

        if self.window.image_path.as_os_str().is_empty() {
            return Err(invalid("image_path cannot be empty"));
        }

        // Controller device_path can be empty (auto-detect)

        if self.haptic.enabled && self.haptic.device_path.is_empty() {
            return Err(invalid("haptic device_path cannot be empty when enabled"));
        }

        if self.logging.level.is_empty() {
            return Err(invalid("logging level cannot be empty"));
        }

        self.profile.check().map_err(invalid)?;

        Ok(())
    }
}
