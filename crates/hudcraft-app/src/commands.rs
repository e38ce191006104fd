//! Subcommand implementations.
//!
//! Each command returns the text to print so it can be tested without a
//! terminal.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result, bail};
use hudcraft_core::{AnchorType, ConfigVersion, Editor, PointerEvent, form};
use kurbo::Point;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::file_ops::{read_document, to_json, write_output};

/// Run a parsed subcommand.
pub fn run(command: Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Defaults { version, output } => {
            let text = defaults(version, config)?;
            write_output(output.as_deref(), &text)
        }
        Command::Groups {
            file,
            section,
            search,
        } => {
            let editor = open(&file, config)?;
            let text = groups(&editor, section.as_deref(), search.as_deref())?;
            write_output(None, &text)
        }
        Command::Modules { file } => {
            let editor = open(&file, config)?;
            write_output(None, &modules(&editor))
        }
        Command::Drag {
            file,
            id,
            x,
            y,
            output,
        } => {
            let mut editor = open(&file, config)?;
            drag(&mut editor, &id, Point::new(x, y))?;
            save(&editor, config, output.as_deref())
        }
        Command::Snap {
            file,
            id,
            anchor,
            output,
        } => {
            let mut editor = open(&file, config)?;
            snap(&mut editor, &id, anchor)?;
            save(&editor, config, output.as_deref())
        }
        Command::Replay {
            file,
            script,
            output,
        } => {
            let mut editor = open(&file, config)?;
            let text = std::fs::read_to_string(&script)
                .with_context(|| format!("Failed to read {}", script.display()))?;
            let events: Vec<PointerEvent> = serde_json::from_str(&text)
                .with_context(|| format!("Invalid pointer events in {}", script.display()))?;
            replay(&mut editor, &events);
            save(&editor, config, output.as_deref())
        }
        Command::Check { file } => {
            let text = check(&file, config)?;
            write_output(None, &text)
        }
    }
}

fn open(path: &Path, config: &AppConfig) -> Result<Editor> {
    let document = read_document(path)?;
    Ok(Editor::with_document(
        config.editor.clone(),
        config.version,
        document,
    ))
}

fn save(editor: &Editor, config: &AppConfig, output: Option<&Path>) -> Result<()> {
    let text = to_json(editor.document(), config.pretty_indent)?;
    write_output(output, &text)
}

pub fn defaults(version: ConfigVersion, config: &AppConfig) -> Result<String> {
    let document = version
        .default_document()
        .with_context(|| format!("Built-in {} defaults are invalid", version))?;
    to_json(&document, config.pretty_indent)
}

/// Render the groups and standalone settings of a section.
pub fn groups(editor: &Editor, section: Option<&str>, search: Option<&str>) -> Result<String> {
    let Some(name) = section.or(editor.active_section()) else {
        bail!("Document has no sections");
    };
    let Some(classification) = editor.classification(name) else {
        bail!("No section named `{}`", name);
    };
    let Some(fields) = editor.document().section(name) else {
        bail!("No section named `{}`", name);
    };
    let term = search.unwrap_or("");

    let mut out = String::new();
    writeln!(out, "{} ({})", editor.section_label(name), name)?;
    for group in classification.groups.iter().filter(|g| g.matches(term)) {
        let state = if group.is_enabled(fields) { "on" } else { "off" };
        writeln!(out, "\n[{}] {}", group.title(), state)?;
        for child in &group.children {
            writeln!(out, "  {}", form::field_label(child))?;
        }
    }

    let standalones: Vec<&str> = classification.visible_standalones(term).collect();
    if !standalones.is_empty() {
        writeln!(out, "\n[other]")?;
        for key in standalones {
            writeln!(out, "  {}", form::field_label(key))?;
        }
    }
    Ok(out.trim_end().to_string())
}

/// One line per module: id, anchor, offset, rectangle and visibility.
pub fn modules(editor: &Editor) -> String {
    let Some(section) = editor.document().section(&editor.config().hud_section) else {
        return format!("No section named `{}`", editor.config().hud_section);
    };
    let surface = editor.surface().size();

    editor
        .modules()
        .iter()
        .map(|module| {
            let offset = module.offset(section);
            let rect = module.rect(section, surface);
            format!(
                "{:<14} {:<14} [{}, {}]  at ({}, {}) {}x{}  {}",
                module.id,
                module.anchor(section),
                offset.dx,
                offset.dy,
                rect.x0,
                rect.y0,
                rect.width(),
                rect.height(),
                if module.is_visible(section) { "shown" } else { "hidden" },
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drag a module to a surface position as a single gesture.
pub fn drag(editor: &mut Editor, id: &str, position: Point) -> Result<()> {
    if !editor.begin_drag(id) {
        bail!("No module named `{}`", id);
    }
    let target = editor.drag_to(position);
    editor.end_drag();
    match target {
        Some(target) => log::info!(
            "Moved {} to {} [{}, {}]",
            id,
            target.anchor,
            target.offset.dx,
            target.offset.dy
        ),
        None => log::warn!("Drag of {} had no effect", id),
    }
    Ok(())
}

pub fn snap(editor: &mut Editor, id: &str, anchor: AnchorType) -> Result<()> {
    editor.select(id);
    if !editor.snap_to_anchor(anchor)? {
        bail!("No module named `{}`", id);
    }
    log::info!("Snapped {} to {}", id, anchor);
    Ok(())
}

pub fn replay(editor: &mut Editor, events: &[PointerEvent]) {
    let consumed = events
        .iter()
        .filter(|event| editor.handle_pointer_event(event))
        .count();
    log::info!("Replayed {} events ({} consumed)", events.len(), consumed);
}

/// Validate a document and summarize it.
pub fn check(path: &Path, config: &AppConfig) -> Result<String> {
    let editor = open(path, config)?;
    let sections = editor.sections();
    let modules = editor.modules();
    Ok(format!(
        "{}: ok ({} sections, {} modules)",
        path.display(),
        sections.len(),
        modules.len()
    ))
}
