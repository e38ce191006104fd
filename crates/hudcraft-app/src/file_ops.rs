//! Reading and writing documents on disk.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use hudcraft_core::Document;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Load and validate a document.
pub fn read_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document = Document::from_json(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    log::info!("Loaded document from: {}", path.display());
    Ok(document)
}

/// Pretty-print a document with `indent` spaces per level.
pub fn to_json(document: &Document, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    document
        .serialize(&mut serializer)
        .context("Failed to serialize document")?;
    String::from_utf8(buf).context("Serialized document is not UTF-8")
}

/// Write `text` to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Saved document to: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", text).context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
