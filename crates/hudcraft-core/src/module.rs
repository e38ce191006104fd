//! Positionable HUD modules derived from a configuration section.

use kurbo::{Rect, Size};
use serde::Serialize;

use crate::anchor::{AnchorType, Offset, element_rect};
use crate::document::{Section, Value};

/// Presentation size and icon for a known module id.
struct ModuleStyle {
    id: &'static str,
    width: f64,
    height: f64,
    icon: &'static str,
}

const DEFAULT_STYLE: ModuleStyle = ModuleStyle {
    id: "",
    width: 64.0,
    height: 32.0,
    icon: "fa-cube",
};

const MODULE_STYLES: &[ModuleStyle] = &[
    ModuleStyle { id: "coordinates", width: 120.0, height: 48.0, icon: "fa-location-dot" },
    ModuleStyle { id: "clockcompass", width: 48.0, height: 48.0, icon: "fa-compass" },
    ModuleStyle { id: "fps", width: 64.0, height: 24.0, icon: "fa-gauge" },
    ModuleStyle { id: "cps", width: 64.0, height: 24.0, icon: "fa-computer-mouse" },
    ModuleStyle { id: "ping", width: 64.0, height: 24.0, icon: "fa-signal" },
    ModuleStyle { id: "armorhud", width: 40.0, height: 96.0, icon: "fa-shield-halved" },
    ModuleStyle { id: "mainhandhud", width: 40.0, height: 40.0, icon: "fa-hand-fist" },
    ModuleStyle { id: "potionhud", width: 96.0, height: 64.0, icon: "fa-flask" },
    ModuleStyle { id: "keystrokes", width: 96.0, height: 96.0, icon: "fa-keyboard" },
    ModuleStyle { id: "chunkmap", width: 96.0, height: 96.0, icon: "fa-map" },
    ModuleStyle { id: "playerlist", width: 120.0, height: 80.0, icon: "fa-users" },
    ModuleStyle { id: "debughud", width: 140.0, height: 100.0, icon: "fa-bug" },
];

fn style_for(id: &str) -> &'static ModuleStyle {
    MODULE_STYLES
        .iter()
        .find(|style| style.id == id)
        .unwrap_or(&DEFAULT_STYLE)
}

/// One positionable overlay element.
///
/// Derived from the document on every read; the values it points at are
/// owned by the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudModule {
    /// Base name of the toggle key (without `$`).
    pub id: String,
    pub toggle_key: String,
    pub anchor_key: String,
    pub offset_key: String,
    pub width: f64,
    pub height: f64,
    pub icon: &'static str,
}

impl HudModule {
    /// Discover modules in a section, in section order.
    ///
    /// A module exists for every `$name` boolean (no `_` in the key) that has
    /// both `$name_anchor|default` and `$name_offset|default` siblings.
    pub fn discover(section: &Section) -> Vec<HudModule> {
        section
            .iter()
            .filter(|(key, value)| {
                key.starts_with('$') && !key.contains('_') && matches!(value, Value::Bool(_))
            })
            .filter_map(|(key, _)| {
                let id = &key[1..];
                let anchor_key = format!("${id}_anchor|default");
                let offset_key = format!("${id}_offset|default");
                if !section.contains_key(&anchor_key) || !section.contains_key(&offset_key) {
                    return None;
                }
                let style = style_for(id);
                Some(HudModule {
                    id: id.to_string(),
                    toggle_key: key.clone(),
                    anchor_key,
                    offset_key,
                    width: style.width,
                    height: style.height,
                    icon: style.icon,
                })
            })
            .collect()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether the module's toggle is on.
    pub fn is_visible(&self, section: &Section) -> bool {
        section.get(&self.toggle_key).and_then(Value::as_bool) == Some(true)
    }

    /// Current anchor, falling back to `TopLeft` for unexpected values.
    pub fn anchor(&self, section: &Section) -> AnchorType {
        AnchorType::from_value(section.get(&self.anchor_key))
    }

    /// Current offset, falling back to zero for unexpected values.
    pub fn offset(&self, section: &Section) -> Offset {
        Offset::from_value(section.get(&self.offset_key))
    }

    /// Rectangle of the module on a surface of the given size.
    pub fn rect(&self, section: &Section, surface: Size) -> Rect {
        element_rect(
            self.anchor(section),
            self.offset(section),
            surface,
            self.size(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn section() -> Section {
        let doc = Document::from_json(
            r#"{"sec": {
                "$fps": true,
                "$fps_anchor|default": "bottom_right",
                "$fps_offset|default": [-4, -4],
                "$hud": false,
                "$hud_anchor|default": "top_left",
                "$hud_offset|default": [0, 0],
                "$orphan": true,
                "$orphan_anchor|default": "middle",
                "$show_fps": true,
                "$label": "x"
            }}"#,
        )
        .unwrap();
        doc.section("sec").unwrap().clone()
    }

    #[test]
    fn test_discover_modules() {
        let modules = HudModule::discover(&section());
        let ids: Vec<_> = modules.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["fps", "hud"]);

        let fps = &modules[0];
        assert_eq!(fps.toggle_key, "$fps");
        assert_eq!(fps.anchor_key, "$fps_anchor|default");
        assert_eq!(fps.offset_key, "$fps_offset|default");
        assert_eq!(fps.icon, "fa-gauge");

        let hud = &modules[1];
        assert_eq!(hud.size(), Size::new(64.0, 32.0));
        assert_eq!(hud.icon, "fa-cube");
    }

    #[test]
    fn test_module_state_reads() {
        let section = section();
        let modules = HudModule::discover(&section);
        let fps = &modules[0];
        assert!(fps.is_visible(&section));
        assert!(!modules[1].is_visible(&section));
        assert_eq!(fps.anchor(&section), AnchorType::BottomRight);
        assert_eq!(fps.offset(&section), Offset::new(-4, -4));

        let rect = fps.rect(&section, Size::new(300.0, 150.0));
        assert_eq!(rect, Rect::new(232.0, 122.0, 296.0, 146.0));
    }
}
