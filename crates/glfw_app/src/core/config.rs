//! # Application Configuration
//!
//! Everything the harness needs to know before the window exists: requested
//! geometry, the OpenGL context it asks for, how often FPS is sampled and
//! where screenshots go. Geometry is fixed once the application is
//! constructed; changing the config afterwards has no effect on a running
//! window.

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};

/// # Window Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title bar text
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Screen X of the top-left corner
    pub x: i32,
    /// Screen Y of the top-left corner
    pub y: i32,
}

impl WindowConfig {
    /// Create a window configuration with the given title and default geometry
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the client area size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the screen position
    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "glfw_app".to_string(),
            width: 1280,
            height: 720,
            x: 100,
            y: 100,
        }
    }
}

/// # OpenGL Context Configuration
///
/// These are the values [`WindowHints::default`](crate::render::window::WindowHints)
/// starts from; an [`AppHandler`](crate::AppHandler) can still rewrite the
/// hints before the window is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Requested OpenGL major version
    pub major: u32,
    /// Requested OpenGL minor version
    pub minor: u32,
    /// Depth buffer precision in bits
    pub depth_bits: u32,
    /// Request a debug context. `None` picks it from the build type.
    pub debug_context: Option<bool>,
    /// Lock buffer swaps to the display refresh
    pub vsync: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            major: 3,
            minor: 3,
            depth_bits: 16,
            debug_context: None,
            vsync: true,
        }
    }
}

impl ContextConfig {
    /// Debug context setting with the build-type fallback applied
    pub fn debug_context(&self) -> bool {
        self.debug_context.unwrap_or(cfg!(debug_assertions))
    }
}

/// # Frame Timing Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Length of one FPS measurement window in milliseconds
    pub fps_sample_window_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fps_sample_window_ms: 2000,
        }
    }
}

/// # Screenshot Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    /// Directory screenshots are written into
    pub directory: String,
    /// File name prefix, followed by a zero-padded sequence number
    pub prefix: String,
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            prefix: "screenshot".to_string(),
        }
    }
}

/// # Complete Application Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Window geometry and title
    pub window: WindowConfig,
    /// OpenGL context request
    pub context: ContextConfig,
    /// FPS sampling
    pub timing: TimingConfig,
    /// Screenshot output
    pub screenshot: ScreenshotConfig,
}

impl AppConfig {
    /// Create a configuration with defaults and the given window title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            window: WindowConfig::new(title),
            ..Self::default()
        }
    }

    /// Replace the window configuration
    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    /// Replace the context configuration
    pub fn with_context(mut self, context: ContextConfig) -> Self {
        self.context = context;
        self
    }

    /// Set the FPS measurement window
    pub fn with_fps_sample_window(mut self, millis: u64) -> Self {
        self.timing.fps_sample_window_ms = millis;
        self
    }

    /// Set the log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Reject values the harness cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.title.is_empty() {
            return Err(ConfigError::Invalid("window title cannot be empty".to_string()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.context.major < 2 {
            return Err(ConfigError::Invalid(format!(
                "OpenGL {}.{} is not supported",
                self.context.major, self.context.minor
            )));
        }
        if self.timing.fps_sample_window_ms == 0 {
            return Err(ConfigError::Invalid(
                "FPS sample window must be at least 1 ms".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            window: WindowConfig::default(),
            context: ContextConfig::default(),
            timing: TimingConfig::default(),
            screenshot: ScreenshotConfig::default(),
        }
    }
}

impl Config for AppConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timing.fps_sample_window_ms, 2000);
        assert_eq!((config.context.major, config.context.minor), (3, 3));
        assert_eq!(config.context.depth_bits, 16);
    }

    #[test]
    fn zero_sized_window_is_rejected() {
        let window = WindowConfig::new("zero").with_size(0, 600);
        let config = AppConfig::new("zero").with_window(window);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            log_level = "debug"

            [window]
            title = "From file"
            width = 640
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.window.title, "From file");
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, WindowConfig::default().height);
        assert_eq!(config.screenshot, ScreenshotConfig::default());
    }

    #[test]
    fn saves_and_loads_ron() {
        let path = std::env::temp_dir().join(format!("glfw_app_config_{}.ron", std::process::id()));
        let path = path.to_string_lossy().into_owned();

        let config = AppConfig::new("ron").with_fps_sample_window(500);
        config.save_to_file(&path).unwrap();
        let loaded = AppConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let result = AppConfig::load_or_default("definitely/not/here.yaml");
        assert!(result.is_ok());

        let name = format!("glfw_app_config_{}.yaml", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, "title: nope").unwrap();
        let result = AppConfig::load_from_file(&path.to_string_lossy());
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
