//! Form control descriptors for section fields.
//!
//! A front end renders one control per field; the control kind is chosen
//! from the key and the value's kind.

use serde::Serialize;

use crate::document::Value;

/// Which input widget edits a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldControl {
    /// Two numeric inputs.
    Pair { labels: [&'static str; 2] },
    Toggle,
    /// A 0..1 slider shown as a percentage.
    Slider { min: f64, max: f64, step: f64 },
    Number,
    Text,
    /// Sections are edited through their own view, never inline.
    Unsupported,
}

impl FieldControl {
    pub fn for_field(key: &str, value: &Value) -> Self {
        match value {
            Value::Pair(_) if key.contains("size") => FieldControl::Pair {
                labels: ["W", "H"],
            },
            Value::Pair(_) => FieldControl::Pair {
                labels: ["X", "Y"],
            },
            Value::Bool(_) => FieldControl::Toggle,
            Value::Number(_) if key.contains("opacity") => FieldControl::Slider {
                min: 0.0,
                max: 1.0,
                step: 0.01,
            },
            Value::Number(_) => FieldControl::Number,
            Value::Text(_) => FieldControl::Text,
            Value::Section(_) => FieldControl::Unsupported,
        }
    }

    /// Text shown next to the control for `value`.
    pub fn display(&self, value: &Value) -> Option<String> {
        match self {
            FieldControl::Slider { .. } => value
                .as_f64()
                .map(|v| format!("{}%", (v * 100.0).round() as i64)),
            _ => None,
        }
    }
}

/// Human-readable label for a field key.
pub fn field_label(key: &str) -> String {
    let key = key.strip_prefix('$').unwrap_or(key);
    key.replace("|default", " ").replace('_', " ").trim().to_string()
}

/// Human-readable label for a section name.
pub fn section_label(name: &str) -> String {
    const KNOWN: &[(&str, &str)] = &[
        ("mod_menu", "Mod Menu"),
        ("start_screen", "Start Screen"),
        ("pause_menu", "Pause Menu"),
        ("container", "Container"),
    ];

    if let Some((_, label)) = KNOWN.iter().find(|(needle, _)| name.contains(needle)) {
        return label.to_string();
    }
    name.split('_').next().unwrap_or(name).to_string()
}
