//! SVG backend.
//!
//! A diagram becomes one standalone document: the canvas size as width,
//! height and viewBox, the style sheet in a `<style>` element, then every
//! primitive in stacking order.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};
use tempfile::NamedTempFile;

use chordgram_core::draw::Drawable;

use crate::{diagram::Diagram, export};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Builds the SVG document of a diagram.
///
/// # Errors
///
/// Returns [`export::Error::Render`] if the canvas is empty or not finite.
pub fn render_document(diagram: &Diagram) -> Result<Document, export::Error> {
    let canvas = diagram.canvas();
    let (width, height) = (canvas.width(), canvas.height());
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(export::Error::Render(format!(
            "invalid canvas size {width}x{height}"
        )));
    }

    let style = svg_element::Style::new(diagram.style().to_css()).set("type", "text/css");
    let doc = Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", format!("0 0 {width} {height}"))
        .add(style);

    let doc = diagram
        .primitives()
        .iter()
        .fold(doc, |doc, primitive| doc.add(primitive.render_to_svg()));

    debug!(primitives = diagram.primitives().len(); "SVG document rendered");
    Ok(doc)
}

/// Renders a diagram to SVG text, XML declaration included.
pub fn to_svg_string(diagram: &Diagram) -> Result<String, export::Error> {
    let doc = render_document(diagram)?;
    Ok(format!("{XML_DECLARATION}\n{doc}\n"))
}

/// SVG file exporter.
///
/// The file is written next to its destination and moved into place once
/// complete, so a failed export never leaves a truncated file behind.
#[derive(Debug)]
pub struct Svg {
    file_name: PathBuf,
}

impl Svg {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    /// Writes `content` to the exporter's file.
    pub fn write_content(&self, content: &str) -> Result<(), export::Error> {
        let file_name = self.file_name.display();
        info!(file_name:% = file_name; "Creating SVG file");

        let dir = match self.file_name.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(|err| {
            error!(file_name:% = file_name, err:err; "Failed to create SVG file");
            export::Error::Io(err)
        })?;

        if let Err(err) = temp.write_all(content.as_bytes()) {
            error!(file_name:% = file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        temp.persist(&self.file_name).map_err(|err| {
            error!(file_name:% = file_name, err:% = err.error; "Failed to persist SVG file");
            export::Error::Io(err.error)
        })?;

        Ok(())
    }
}

impl export::Exporter for Svg {
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<(), export::Error> {
        let content = to_svg_string(diagram)?;
        self.write_content(&content)
    }
}
