use std::env;
use std::path::PathBuf;

/// Overrides the directory the mouse and arrow images are read from.
pub const ASSET_DIR_ENV: &str = "INPUT_OVERLAY_ASSETS";
/// Set to `1` or `true` to enable debug logging.
pub const DEBUG_ENV: &str = "INPUT_OVERLAY_DEBUG";

const DEFAULT_ASSET_DIR: &str = "Img";

/// Window placement and drawing positions, in window-local points unless noted.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    pub asset_dir: PathBuf,
    pub debug: bool,
    /// Initial top-left corner on screen.
    pub window_pos: [f32; 2],
    pub window_size: [f32; 2],
    /// Pivot the arrow image rotates around.
    pub arrow_anchor: [f32; 2],
    pub mouse_icon_pos: [f32; 2],
    /// The mouse image is scaled to fit this box, keeping its aspect ratio.
    pub mouse_icon_size: [f32; 2],
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            debug: false,
            window_pos: [100.0, 100.0],
            window_size: [800.0, 600.0],
            arrow_anchor: [520.0, 50.0],
            mouse_icon_pos: [550.0, 80.0],
            mouse_icon_size: [220.0, 220.0],
        }
    }
}

impl OverlayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup(ASSET_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            config.asset_dir = PathBuf::from(dir);
        }

        if let Some(flag) = lookup(DEBUG_ENV) {
            config.debug = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true");
        }

        config
    }
}
