use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Enable toast notifications in the UI.
    #[serde(default = "default_toasts")]
    pub enable_toasts: bool,
    /// Duration of toast notifications in seconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration: f32,
    /// Seconds between simulated detections while recognition is active.
    #[serde(default = "default_detection_interval")]
    pub detection_interval: f32,
    /// Pixels the mapping list scrolls per simulated Scroll Up/Down.
    #[serde(default = "default_scroll_step")]
    pub scroll_step: f32,
    /// Last known window size. If absent, a default size is used.
    #[serde(default)]
    pub window_size: Option<(i32, i32)>,
    /// Endpoint the suggestion prompt is POSTed to. The `GF_SUGGEST_URL`
    /// environment variable takes precedence.
    pub suggestion_endpoint: Option<String>,
}

fn default_toasts() -> bool {
    true
}

fn default_toast_duration() -> f32 {
    3.0
}

fn default_detection_interval() -> f32 {
    3.0
}

fn default_scroll_step() -> f32 {
    100.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            enable_toasts: true,
            toast_duration: default_toast_duration(),
            detection_interval: default_detection_interval(),
            scroll_step: default_scroll_step(),
            window_size: Some((760, 560)),
            suggestion_endpoint: None,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn detection_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f32(self.detection_interval.max(0.1))
    }
}
