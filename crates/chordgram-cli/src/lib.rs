//! Chordgram CLI library
//!
//! This module contains the core CLI logic: loading the configuration and
//! dispatching the `chord` and `book` commands to the [`DiagramBuilder`].

pub mod batch;
pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, BookArgs, ChordArgs, Command};

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;

use chordgram::{ChordgramError, DiagramBuilder};

/// Run the chordgram CLI application
///
/// # Errors
///
/// Returns `ChordgramError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Chords that cannot be drawn
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), ChordgramError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = DiagramBuilder::new(app_config);

    match &args.command {
        Command::Chord(chord_args) => run_chord(&builder, chord_args),
        Command::Book(book_args) => run_book(&builder, book_args),
    }
}

fn run_chord(builder: &DiagramBuilder, args: &ChordArgs) -> Result<(), ChordgramError> {
    let frets = args.frets.join(" ");
    info!(frets = frets.as_str(), name = args.name.as_str(); "Processing chord");

    let mut chord = builder
        .parse_chord(&frets)?
        .with_name(args.name.as_str())
        .with_capo(args.capo)
        .with_cut(args.cut);
    if let Some(hand) = args.hand {
        chord = chord.with_hand(hand);
    }
    if let Some(scale) = args.scale {
        chord = chord.with_scale(scale);
    }

    let output = args
        .output
        .clone()
        .map_or_else(|| PathBuf::from(batch::default_file_name(&args.name)), PathBuf::from);
    builder.write_svg(&chord, &output)?;

    info!(output_file:% = output.display(); "SVG exported successfully");
    Ok(())
}

fn run_book(builder: &DiagramBuilder, args: &BookArgs) -> Result<(), ChordgramError> {
    info!(
        input_path = args.input.as_str(),
        out_dir = args.out_dir.as_str();
        "Processing chord book"
    );

    let source = fs::read_to_string(&args.input)?;
    let entries = builder.parse_book(&source)?;
    let written = batch::render_book(builder, &entries, Path::new(&args.out_dir), &args.index)?;

    info!(diagrams = written.len(); "Chord book exported successfully");
    Ok(())
}
