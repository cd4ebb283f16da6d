//! Plain-text to PDF rendering using printpdf's builtin fonts.
//!
//! Layout is intentionally minimal: one column of wrapped lines, page breaks
//! when the column runs out. Document quality lives in the completion text,
//! not here.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const FONT_SIZE_PT: f32 = 11.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const MAX_LINE_CHARS: usize = 90;

/// Filename for the minutes document of a given calendar day.
///
/// Keyed only by date: a second generation on the same day overwrites the
/// first. Documented service behavior.
pub fn minutes_filename(date: NaiveDate) -> String {
    format!("meeting_minutes_{}.pdf", date.format("%Y-%m-%d"))
}

/// Render minutes text to a PDF file at the given path.
pub fn render_minutes(text: &str, path: &Path) -> Result<()> {
    let (doc, page, layer) = PdfDocument::new(
        "Meeting minutes",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "minutes",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .context("Failed to load builtin PDF font")?;

    let mut current_layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    for line in wrap_lines(text, MAX_LINE_CHARS) {
        if y < MARGIN_MM {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "minutes");
            current_layer = doc.get_page(page).get_layer(layer);
            y = PAGE_HEIGHT_MM - MARGIN_MM;
        }

        if !line.is_empty() {
            current_layer.use_text(line, FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
        }
        y -= LINE_HEIGHT_MM;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create PDF file: {}", path.display()))?;
    doc.save(&mut BufWriter::new(file))
        .context("Failed to write PDF document")?;

    Ok(())
}

/// Word-wrap text to a maximum line width, preserving blank lines.
fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in text.lines() {
        if raw.chars().count() <= width {
            lines.push(raw.to_string());
            continue;
        }

        let mut current = String::new();
        for word in raw.split_whitespace() {
            if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
