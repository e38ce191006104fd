//! The editor: owner of the document, its history and the interaction state.
//!
//! Every change to the document goes through one of two doors:
//! [`Editor::apply_tracked`] records an undo step, [`Editor::apply_silent`]
//! does not and is folded into the next recorded step.

use kurbo::{Point, Rect};

use crate::anchor::AnchorType;
use crate::classify::{Classification, classify};
use crate::config::EditorConfig;
use crate::defaults::ConfigVersion;
use crate::document::{Document, DocumentError, Section, Value};
use crate::drag::{DragController, DragTarget};
use crate::form;
use crate::history::History;
use crate::input::{MouseButton, PointerEvent};
use crate::module::HudModule;
use crate::snap::{self, AnchorTarget, SnapResult};

pub struct Editor {
    config: EditorConfig,
    version: ConfigVersion,
    history: History<Document>,
    active_section: Option<String>,
    drag: DragController,
}

impl Editor {
    /// Create an editor on the built-in default document of `version`.
    pub fn new(config: EditorConfig, version: ConfigVersion) -> Result<Self, DocumentError> {
        let document = version.default_document()?;
        Ok(Self::with_document(config, version, document))
    }

    /// Create an editor on an existing document.
    pub fn with_document(config: EditorConfig, version: ConfigVersion, document: Document) -> Self {
        let active_section = document.section_names().into_iter().next();
        let drag = DragController::new(config.surface_rect());
        Self {
            history: History::with_limit(document, config.history_limit),
            config,
            version,
            active_section,
            drag,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn version(&self) -> ConfigVersion {
        self.version
    }

    pub fn document(&self) -> &Document {
        self.history.present()
    }

    pub fn history(&self) -> &History<Document> {
        &self.history
    }

    // --- Updates ---

    /// Set the value at `path` and record an undo step.
    pub fn apply_tracked(&mut self, path: &[&str], value: Value) -> Result<(), DocumentError> {
        let mut next = self.history.present().clone();
        next.set(path, value)?;
        self.history.commit(next);
        Ok(())
    }

    /// Set the value at `path` without recording an undo step.
    pub fn apply_silent(&mut self, path: &[&str], value: Value) -> Result<(), DocumentError> {
        self.history.present_mut().set(path, value)
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo();
        if undone {
            self.ensure_active_section();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo();
        if redone {
            self.ensure_active_section();
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Import / export ---

    /// Replace the document with parsed JSON text as one undo step.
    ///
    /// On failure the document and history are left untouched.
    pub fn import_json(&mut self, text: &str) -> Result<(), DocumentError> {
        match Document::from_json(text) {
            Ok(document) => {
                log::info!("Imported document with {} sections", document.sections().count());
                self.history.commit(document);
                self.ensure_active_section();
                Ok(())
            }
            Err(e) => {
                log::warn!("Import rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Pretty-printed JSON of the document.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        self.document().to_json_pretty()
    }

    /// Replace the document from raw JSON edits without recording a step.
    pub fn replace_from_raw(&mut self, text: &str) -> Result<(), DocumentError> {
        let document = Document::from_json(text)?;
        self.history.commit_silent(document);
        self.ensure_active_section();
        Ok(())
    }

    /// Switch to another configuration version, loading its defaults.
    ///
    /// History, selection and any drag in progress are dropped.
    pub fn set_version(&mut self, version: ConfigVersion) -> Result<(), DocumentError> {
        let document = version.default_document()?;
        log::info!("Switched to config version {}", version);
        self.active_section = document.section_names().into_iter().next();
        self.history.reset(document);
        self.version = version;
        self.drag.end();
        self.drag.clear_selection();
        Ok(())
    }

    /// Restore the active section from the version defaults as one undo step.
    ///
    /// Returns false if there is no active section or the defaults lack it.
    pub fn reset_section(&mut self) -> Result<bool, DocumentError> {
        let Some(name) = self.active_section.clone() else {
            return Ok(false);
        };
        let defaults = self.version.default_document()?;
        let Some(section) = defaults.section(&name) else {
            return Ok(false);
        };
        self.apply_tracked(&[name.as_str()], Value::Section(section.clone()))?;
        Ok(true)
    }

    // --- Sections ---

    pub fn sections(&self) -> Vec<String> {
        self.document().section_names()
    }

    pub fn section_label(&self, name: &str) -> String {
        form::section_label(name)
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    /// Make `name` the active section. Returns false if no such section exists.
    pub fn set_active_section(&mut self, name: &str) -> bool {
        if self.document().section(name).is_none() {
            return false;
        }
        self.active_section = Some(name.to_string());
        true
    }

    fn ensure_active_section(&mut self) {
        let valid = self
            .active_section
            .as_deref()
            .is_some_and(|name| self.document().section(name).is_some());
        if !valid {
            self.active_section = self.sections().into_iter().next();
        }
    }

    /// Classify the keys of a section.
    pub fn classification(&self, section: &str) -> Option<Classification> {
        self.document().section(section).map(classify)
    }

    // --- HUD modules ---

    fn hud_section(&self) -> Option<&Section> {
        self.document().section(&self.config.hud_section)
    }

    /// Positionable modules of the HUD section.
    pub fn modules(&self) -> Vec<HudModule> {
        self.hud_section().map(HudModule::discover).unwrap_or_default()
    }

    /// Topmost visible module under a client-space point.
    pub fn module_at(&self, position: Point) -> Option<String> {
        let section = self.hud_section()?;
        let surface = self.drag.surface();
        let local = Point::new(position.x - surface.x0, position.y - surface.y0);
        self.modules()
            .into_iter()
            .rev()
            .filter(|module| module.is_visible(section))
            .find(|module| module.rect(section, surface.size()).contains(local))
            .map(|module| module.id)
    }

    pub fn selection(&self) -> Option<&str> {
        self.drag.selection()
    }

    pub fn select(&mut self, id: &str) {
        self.drag.select(id);
    }

    pub fn clear_selection(&mut self) {
        self.drag.clear_selection();
    }

    /// Drag surface bounding box in client coordinates.
    pub fn surface(&self) -> Rect {
        self.drag.surface()
    }

    pub fn set_surface(&mut self, surface: Rect) {
        self.drag.set_surface(surface);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn captures_pointer(&self) -> bool {
        self.drag.captures_pointer()
    }

    // --- Dragging ---

    /// Start dragging a module. Returns false for unknown ids.
    pub fn begin_drag(&mut self, id: &str) -> bool {
        if !self.modules().iter().any(|module| module.id == id) {
            return false;
        }
        self.drag.begin(id);
        true
    }

    /// Move the dragged module to follow the pointer.
    pub fn drag_to(&mut self, position: Point) -> Option<DragTarget> {
        let target = self.drag.track(position)?;
        let id = self.drag.dragging()?;
        let Some(module) = self.modules().into_iter().find(|module| module.id == id) else {
            log::debug!("Dragged module {} no longer exists", id);
            return None;
        };

        let section = self.config.hud_section.clone();
        self.apply_silent(&[section.as_str(), module.anchor_key.as_str()], target.anchor.into())
            .ok()?;
        self.apply_silent(&[section.as_str(), module.offset_key.as_str()], target.offset.into())
            .ok()?;
        Some(target)
    }

    /// Finish the drag, recording the whole gesture as one undo step.
    ///
    /// Returns true if a step was recorded.
    pub fn end_drag(&mut self) -> bool {
        if self.drag.end().is_none() {
            return false;
        }
        self.history.commit_pending()
    }

    /// Route a pointer event. Returns true if the event was consumed.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> bool {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => self.press(*position),
            PointerEvent::TouchStart { touches } => match touches.first() {
                Some(position) => self.press(*position),
                None => false,
            },
            PointerEvent::Move { .. } | PointerEvent::TouchMove { .. } => {
                if !self.drag.captures_pointer() {
                    return false;
                }
                match event.position() {
                    Some(position) => self.drag_to(position).is_some(),
                    None => false,
                }
            }
            _ if event.is_release() => {
                if !self.drag.is_dragging() {
                    return false;
                }
                self.end_drag();
                true
            }
            _ => false,
        }
    }

    fn press(&mut self, position: Point) -> bool {
        match self.module_at(position) {
            Some(id) => self.begin_drag(&id),
            None => {
                if !self.drag.is_dragging() {
                    self.drag.clear_selection();
                }
                false
            }
        }
    }

    // --- Snapping ---

    /// Whether the snap overlay should be shown.
    pub fn overlay_visible(&self) -> bool {
        self.drag.selection().is_some() && !self.drag.is_dragging()
    }

    pub fn anchor_targets(&self) -> Vec<AnchorTarget> {
        snap::anchor_targets(self.drag.surface().size())
    }

    /// Snap the selected module to the overlay cell under a client-space
    /// point. Returns false if the overlay is hidden or the point is outside
    /// the surface.
    pub fn snap_at(&mut self, position: Point) -> Result<bool, DocumentError> {
        if !self.overlay_visible() {
            return Ok(false);
        }
        let surface = self.drag.surface();
        let local = Point::new(position.x - surface.x0, position.y - surface.y0);
        match snap::target_at(surface.size(), local) {
            Some(target) => self.snap_to_anchor(target.anchor),
            None => Ok(false),
        }
    }

    /// Pin the selected module to `anchor` with a zero offset.
    ///
    /// The anchor and the offset are recorded as two undo steps. Returns
    /// false if nothing known is selected.
    pub fn snap_to_anchor(&mut self, anchor: AnchorType) -> Result<bool, DocumentError> {
        let modules = self.modules();
        let Some(SnapResult {
            anchor_key,
            offset_key,
            anchor,
            offset,
            ..
        }) = snap::snap_to_anchor(self.drag.selection(), &modules, anchor)
        else {
            return Ok(false);
        };

        let section = self.config.hud_section.clone();
        self.apply_tracked(&[section.as_str(), anchor_key.as_str()], anchor.into())?;
        self.apply_tracked(&[section.as_str(), offset_key.as_str()], offset.into())?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::Offset;

    const DOC: &str = r#"{
        "namespace": "test",
        "sec": {
            "$hud": true,
            "$hud_anchor|default": "middle",
            "$hud_offset|default": [0, 0],
            "$hidden": false,
            "$hidden_anchor|default": "top_left",
            "$hidden_offset|default": [0, 0],
            "$title": "hello"
        },
        "other": {
            "$flag": true
        }
    }"#;

    fn editor() -> Editor {
        let config = EditorConfig {
            hud_section: "sec".to_string(),
            surface_width: 300.0,
            surface_height: 150.0,
            ..EditorConfig::default()
        };
        let document = Document::from_json(DOC).unwrap();
        Editor::with_document(config, ConfigVersion::V6, document)
    }

    fn placement(editor: &Editor) -> (String, Offset) {
        let doc = editor.document();
        let anchor = doc
            .field("sec", "$hud_anchor|default")
            .and_then(Value::as_str)
            .unwrap()
            .to_string();
        let offset = Offset::from_value(doc.field("sec", "$hud_offset|default"));
        (anchor, offset)
    }

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn mv(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    fn up() -> PointerEvent {
        PointerEvent::Up {
            position: Point::ZERO,
            button: MouseButton::Left,
        }
    }

    #[test]
    fn test_drag_to_corners() {
        let mut editor = editor();
        assert!(editor.handle_pointer_event(&down(150.0, 75.0)));
        assert!(editor.captures_pointer());

        assert!(editor.handle_pointer_event(&mv(5.0, 5.0)));
        assert_eq!(placement(&editor), ("top_left".to_string(), Offset::new(5, 5)));

        assert!(editor.handle_pointer_event(&mv(295.0, 145.0)));
        assert_eq!(
            placement(&editor),
            ("bottom_right".to_string(), Offset::new(-5, -5))
        );

        assert!(editor.handle_pointer_event(&up()));
        assert!(!editor.captures_pointer());
        assert_eq!(editor.selection(), Some("hud"));
    }

    #[test]
    fn test_whole_drag_is_one_undo_step() {
        let mut editor = editor();
        editor.handle_pointer_event(&down(150.0, 75.0));
        for x in [100.0, 60.0, 20.0, 5.0] {
            editor.handle_pointer_event(&mv(x, 5.0));
        }
        editor.handle_pointer_event(&up());
        assert_eq!(editor.history().past_len(), 1);

        assert!(editor.undo());
        assert_eq!(placement(&editor), ("middle".to_string(), Offset::ZERO));
        assert!(!editor.can_undo());

        assert!(editor.redo());
        assert_eq!(placement(&editor), ("top_left".to_string(), Offset::new(5, 5)));
    }

    #[test]
    fn test_drag_without_movement_records_nothing() {
        let mut editor = editor();
        editor.handle_pointer_event(&down(150.0, 75.0));
        editor.handle_pointer_event(&up());
        assert!(!editor.can_undo());
        assert_eq!(editor.selection(), Some("hud"));
    }

    #[test]
    fn test_silent_edits_fold_into_next_tracked_edit() {
        let mut editor = editor();
        let before = editor.document().clone();
        editor.apply_silent(&["sec", "$title"], Value::from("a")).unwrap();
        editor.apply_silent(&["sec", "$title"], Value::from("b")).unwrap();
        editor.apply_tracked(&["sec", "$hud"], Value::Bool(false)).unwrap();

        assert!(editor.undo());
        assert_eq!(editor.document(), &before);
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_tracked_edits_are_bounded() {
        let mut editor = editor();
        for i in 0..25_i64 {
            editor.apply_tracked(&["sec", "$count"], Value::from(i)).unwrap();
        }
        assert_eq!(editor.history().past_len(), 20);
        let mut undone = 0;
        while editor.undo() {
            undone += 1;
        }
        assert_eq!(undone, 20);
        assert_eq!(
            editor.document().field("sec", "$count"),
            Some(&Value::from(4_i64))
        );
    }

    #[test]
    fn test_apply_rejects_empty_path() {
        let mut editor = editor();
        assert!(matches!(
            editor.apply_tracked(&[], Value::Bool(true)),
            Err(DocumentError::EmptyPath)
        ));
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_apply_creates_missing_section() {
        let mut editor = editor();
        editor.apply_tracked(&["fresh", "$on"], Value::Bool(true)).unwrap();
        assert_eq!(
            editor.document().field("fresh", "$on"),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn test_invalid_import_leaves_state_untouched() {
        let mut editor = editor();
        editor.apply_tracked(&["sec", "$title"], Value::from("x")).unwrap();
        let before = editor.document().clone();

        assert!(editor.import_json("not valid json").is_err());
        assert!(editor.import_json("[1, 2]").is_err());
        assert_eq!(editor.document(), &before);
        assert_eq!(editor.history().past_len(), 1);
    }

    #[test]
    fn test_import_is_one_undo_step() {
        let mut editor = editor();
        let before = editor.document().clone();
        editor
            .import_json(r#"{"namespace": "n", "fresh": {"$x": 1}}"#)
            .unwrap();
        assert_eq!(editor.sections(), vec!["fresh".to_string()]);
        assert_eq!(editor.active_section(), Some("fresh"));

        assert!(editor.undo());
        assert_eq!(editor.document(), &before);
    }

    #[test]
    fn test_export_round_trips() {
        let mut editor = editor();
        let json = editor.export_json().unwrap();
        editor.import_json(&json).unwrap();
        assert_eq!(editor.export_json().unwrap(), json);
    }

    #[test]
    fn test_replace_from_raw_is_silent() {
        let mut editor = editor();
        editor
            .replace_from_raw(r#"{"sec": {"$hud": false}}"#)
            .unwrap();
        assert!(!editor.can_undo());
        assert_eq!(
            editor.document().field("sec", "$hud"),
            Some(&Value::Bool(false))
        );
        assert!(editor.replace_from_raw("{").is_err());
    }

    #[test]
    fn test_snap_after_drag() {
        let mut editor = editor();
        editor.handle_pointer_event(&down(150.0, 75.0));
        editor.handle_pointer_event(&mv(5.0, 5.0));
        editor.handle_pointer_event(&up());
        assert!(editor.overlay_visible());

        assert!(editor.snap_to_anchor(AnchorType::BottomMiddle).unwrap());
        assert_eq!(
            placement(&editor),
            ("bottom_middle".to_string(), Offset::ZERO)
        );
        // drag + anchor + offset
        assert_eq!(editor.history().past_len(), 3);

        assert!(editor.undo());
        assert_eq!(
            placement(&editor),
            ("bottom_middle".to_string(), Offset::new(5, 5))
        );
    }

    #[test]
    fn test_snap_at_overlay_cell() {
        let mut editor = editor();
        editor.set_surface(Rect::new(100.0, 100.0, 400.0, 250.0));
        assert!(!editor.snap_at(Point::new(390.0, 110.0)).unwrap());

        editor.select("hud");
        assert!(!editor.snap_at(Point::new(50.0, 50.0)).unwrap());
        assert!(editor.snap_at(Point::new(390.0, 110.0)).unwrap());
        assert_eq!(placement(&editor), ("top_right".to_string(), Offset::ZERO));
    }

    #[test]
    fn test_snap_without_selection_is_noop() {
        let mut editor = editor();
        assert!(!editor.snap_to_anchor(AnchorType::Middle).unwrap());
        editor.select("ghost");
        assert!(!editor.snap_to_anchor(AnchorType::Middle).unwrap());
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_background_click_clears_selection() {
        let mut editor = editor();
        editor.select("hud");
        assert!(!editor.handle_pointer_event(&down(290.0, 10.0)));
        assert_eq!(editor.selection(), None);
        assert!(!editor.overlay_visible());
    }

    #[test]
    fn test_hidden_modules_are_not_hit() {
        let editor = editor();
        // `$hidden` sits at top_left but is toggled off
        assert_eq!(editor.module_at(Point::new(2.0, 2.0)), None);
        assert_eq!(editor.module_at(Point::new(150.0, 75.0)), Some("hud".to_string()));
    }

    #[test]
    fn test_surface_origin_offsets_hit_testing() {
        let mut editor = editor();
        editor.set_surface(Rect::new(100.0, 100.0, 400.0, 250.0));
        assert_eq!(editor.module_at(Point::new(250.0, 175.0)), Some("hud".to_string()));
        assert_eq!(editor.module_at(Point::new(150.0, 75.0)), None);
    }

    #[test]
    fn test_move_after_module_vanished_is_noop() {
        let mut editor = editor();
        assert!(editor.begin_drag("hud"));
        editor
            .replace_from_raw(r#"{"sec": {"$other": true}}"#)
            .unwrap();
        assert!(editor.drag_to(Point::new(5.0, 5.0)).is_none());
        assert!(editor.document().field("sec", "$hud_anchor|default").is_none());
        assert!(editor.handle_pointer_event(&up()));
        assert!(!editor.is_dragging());
    }

    #[test]
    fn test_touch_drag() {
        let mut editor = editor();
        let touch = |x, y| vec![Point::new(x, y)];
        assert!(editor.handle_pointer_event(&PointerEvent::TouchStart {
            touches: touch(150.0, 75.0)
        }));
        assert!(!editor.handle_pointer_event(&PointerEvent::TouchMove { touches: vec![] }));
        assert!(editor.handle_pointer_event(&PointerEvent::TouchMove {
            touches: touch(295.0, 145.0)
        }));
        assert!(editor.handle_pointer_event(&PointerEvent::TouchEnd));
        assert_eq!(
            placement(&editor),
            ("bottom_right".to_string(), Offset::new(-5, -5))
        );
        assert_eq!(editor.history().past_len(), 1);
    }

    #[test]
    fn test_right_button_does_not_start_drag() {
        let mut editor = editor();
        let press = PointerEvent::Down {
            position: Point::new(150.0, 75.0),
            button: MouseButton::Right,
        };
        assert!(!editor.handle_pointer_event(&press));
        assert!(!editor.is_dragging());
    }

    #[test]
    fn test_moves_ignored_when_idle() {
        let mut editor = editor();
        assert!(!editor.handle_pointer_event(&mv(5.0, 5.0)));
        assert!(!editor.handle_pointer_event(&up()));
        assert_eq!(placement(&editor), ("middle".to_string(), Offset::ZERO));
    }

    #[test]
    fn test_classification_of_section() {
        let editor = editor();
        let classification = editor.classification("sec").unwrap();
        assert!(classification.group("hud").is_some());
        assert_eq!(classification.standalones, vec!["$title".to_string()]);
        assert!(editor.classification("missing").is_none());
    }

    #[test]
    fn test_set_version_resets_state() {
        let mut editor = editor();
        editor.apply_tracked(&["sec", "$title"], Value::from("x")).unwrap();
        editor.select("hud");

        editor.set_version(ConfigVersion::V4).unwrap();
        assert_eq!(editor.version(), ConfigVersion::V4);
        assert!(!editor.can_undo());
        assert_eq!(editor.selection(), None);
        assert_eq!(editor.active_section(), Some("mod_menu_config@gc.pnl"));
    }

    #[test]
    fn test_reset_section() {
        let mut editor = Editor::new(EditorConfig::default(), ConfigVersion::V6).unwrap();
        let defaults = editor.document().clone();
        let name = editor.active_section().unwrap().to_string();
        editor.apply_tracked(&[name.as_str(), "$fps"], Value::Bool(false)).unwrap();

        assert!(editor.reset_section().unwrap());
        assert_eq!(editor.document(), &defaults);
        assert_eq!(editor.history().past_len(), 2);

        editor.import_json(r#"{"custom": {"$x": true}}"#).unwrap();
        assert!(!editor.reset_section().unwrap());
    }

    #[test]
    fn test_active_section() {
        let mut editor = editor();
        assert_eq!(editor.active_section(), Some("sec"));
        assert!(editor.set_active_section("other"));
        assert!(!editor.set_active_section("namespace"));
        assert_eq!(editor.active_section(), Some("other"));
        assert_eq!(editor.section_label("mod_menu_config@gc.pnl"), "Mod Menu");
    }
}
