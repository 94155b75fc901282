//! Batch rendering of chord books.
//!
//! Every entry is written to its explicit `file` or to `<name>.svg`, then an
//! HTML page listing all diagrams in book order is written next to them.

use std::{
    collections::HashSet,
    fs, io, iter,
    path::{Path, PathBuf},
};

use log::{debug, error, info};

use chordgram::{ChordgramError, DiagramBuilder, chord::BookEntry};

/// File name used for chords without a usable name.
const FALLBACK_STEM: &str = "chord";

/// Makes a chord name safe to use as a file stem.
///
/// Letters, digits and `- _ + # .` are kept; anything else (path
/// separators, spaces, quotes) becomes `_`. A leading `.` is replaced so the
/// file is never hidden, and an empty name falls back to `chord`.
pub fn sanitize_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .enumerate()
        .map(|(i, c)| match c {
            '.' if i == 0 => '_',
            c if c.is_alphanumeric() || matches!(c, '-' | '_' | '+' | '#' | '.') => c,
            _ => '_',
        })
        .collect();

    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}

/// Default output file of a single chord.
pub fn default_file_name(name: &str) -> String {
    format!("{}.svg", sanitize_stem(name))
}

/// Picks the output file of every entry.
///
/// The index name and explicit file names are reserved first; derived names
/// that collide with a reserved or earlier name get a numeric suffix
/// (`B.svg`, `B_2.svg`).
pub fn assign_file_names(entries: &[BookEntry], index_name: &str) -> Vec<String> {
    let mut taken: HashSet<String> = entries
        .iter()
        .filter_map(|entry| entry.file_name().map(str::to_string))
        .chain(iter::once(index_name.to_string()))
        .collect();

    entries
        .iter()
        .map(|entry| {
            if let Some(file) = entry.file_name() {
                return file.to_string();
            }

            let stem = sanitize_stem(entry.chord().name());
            let mut candidate = format!("{stem}.svg");
            let mut n = 2;
            while taken.contains(&candidate) {
                candidate = format!("{stem}_{n}.svg");
                n += 1;
            }
            taken.insert(candidate.clone());
            candidate
        })
        .collect()
}

/// Escapes a file name for use inside a single-quoted `src` attribute.
fn encode_src(file: &str) -> String {
    let mut encoded = String::with_capacity(file.len());
    for c in file.chars() {
        match c {
            '%' => encoded.push_str("%25"),
            '#' => encoded.push_str("%23"),
            '?' => encoded.push_str("%3F"),
            ' ' => encoded.push_str("%20"),
            '\'' => encoded.push_str("%27"),
            '"' => encoded.push_str("%22"),
            '&' => encoded.push_str("&amp;"),
            '<' => encoded.push_str("%3C"),
            '>' => encoded.push_str("%3E"),
            c => encoded.push(c),
        }
    }
    encoded
}

/// The HTML index: a wrapping flex row with one numbered image per diagram.
pub fn render_index(files: &[String]) -> String {
    let mut html = String::from("<div style='display:flex; flex-wrap:wrap'>\n");
    for (i, file) in files.iter().enumerate() {
        html.push_str(&format!("<div>{i}: <img src='{}'/></div>\n", encode_src(file)));
    }
    html.push_str("</div>");
    html
}

/// Renders every entry into `out_dir` and writes the index as `index_name`.
///
/// Returns the paths of the written diagrams in book order. The first
/// failure aborts the batch, and an entry whose `file` is the index name
/// fails it before anything is written.
pub fn render_book(
    builder: &DiagramBuilder,
    entries: &[BookEntry],
    out_dir: &Path,
    index_name: &str,
) -> Result<Vec<PathBuf>, ChordgramError> {
    if let Some(entry) = entries
        .iter()
        .find(|entry| entry.file_name() == Some(index_name))
    {
        error!(chord:% = entry.chord(), index = index_name; "Chord file collides with the index");
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!(
                "chord `{}` is written to `{index_name}`, which is the index file",
                entry.chord().name()
            ),
        )
        .into());
    }

    fs::create_dir_all(out_dir)?;

    let files = assign_file_names(entries, index_name);
    let mut written = Vec::with_capacity(entries.len());

    for (entry, file) in entries.iter().zip(&files) {
        let path = out_dir.join(file);
        builder.write_svg(entry.chord(), &path)?;
        debug!(chord:% = entry.chord(), file = file.as_str(); "Chord written");
        written.push(path);
    }

    let index_path = out_dir.join(index_name);
    fs::write(&index_path, render_index(&files))?;
    info!(
        diagrams = written.len(),
        index:% = index_path.display();
        "Chord book rendered"
    );

    Ok(written)
}
