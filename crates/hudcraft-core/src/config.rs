//! Editor configuration.

use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};

use crate::history::MAX_UNDO_HISTORY;

/// Section holding the positionable HUD modules.
pub const DEFAULT_HUD_SECTION: &str = "mod_menu_config@gc.pnl";

/// Tunables for an [`Editor`](crate::Editor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Section scanned for HUD modules.
    pub hud_section: String,
    /// Maximum number of undo steps.
    pub history_limit: usize,
    /// Drag surface width in pixels.
    pub surface_width: f64,
    /// Drag surface height in pixels.
    pub surface_height: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            hud_section: DEFAULT_HUD_SECTION.to_string(),
            history_limit: MAX_UNDO_HISTORY,
            surface_width: 1280.0,
            surface_height: 720.0,
        }
    }
}

impl EditorConfig {
    pub fn surface_size(&self) -> Size {
        Size::new(self.surface_width, self.surface_height)
    }

    /// Surface bounding box with its origin at (0, 0).
    pub fn surface_rect(&self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), self.surface_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"hud_section": "sec"}"#).unwrap();
        assert_eq!(config.hud_section, "sec");
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.surface_rect(), Rect::new(0.0, 0.0, 1280.0, 720.0));
    }
}
