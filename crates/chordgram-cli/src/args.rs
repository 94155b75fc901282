//! Command-line argument definitions for the chordgram CLI.
//!
//! [`Args`] holds the global options (configuration file, log level) and one
//! [`Command`]: `chord` renders a single fret list, `book` renders every
//! entry of a chord book plus an HTML index.

use clap::{Parser, Subcommand};

use chordgram::chord::Hand;

/// Command-line arguments for the chordgram diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one chord given as a fret list
    Chord(ChordArgs),
    /// Render every chord of a chord book and write an HTML index
    Book(BookArgs),
}

#[derive(clap::Args, Debug)]
pub struct ChordArgs {
    /// Fret positions, low E first: `x 0 2 2 1 0` or `X,0,2,2,1,0`
    #[arg(required = true, num_args = 1..)]
    pub frets: Vec<String>,

    /// Chord name drawn above the diagram
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Capo fret, 0 for none
    #[arg(long, default_value_t = 0)]
    pub capo: u32,

    /// Fret at which the fretboard is cut, 0 for none
    #[arg(long, default_value_t = 0)]
    pub cut: u32,

    /// Handedness (left, right); defaults to the configured hand
    #[arg(long)]
    pub hand: Option<Hand>,

    /// Scale factor; defaults to the configured scale
    #[arg(long)]
    pub scale: Option<f32>,

    /// Path to the output SVG file; defaults to `<name>.svg`
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct BookArgs {
    /// Path to the chord book
    #[arg(help = "Path to the chord book")]
    pub input: String,

    /// Directory receiving the SVG files and the index
    #[arg(short = 'd', long, default_value = ".")]
    pub out_dir: String,

    /// File name of the HTML index
    #[arg(long, default_value = "Chords.html")]
    pub index: String,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_chord_arguments() {
        let args = Args::try_parse_from([
            "chordgram", "chord", "x", "x", "4", "4", "4", "7", "--name", "B", "--cut", "3",
            "--hand", "left",
        ])
        .unwrap();

        let Command::Chord(chord) = args.command else {
            panic!("expected chord command");
        };
        assert_eq!(chord.frets, ["x", "x", "4", "4", "4", "7"]);
        assert_eq!(chord.name, "B");
        assert_eq!(chord.cut, 3);
        assert_eq!(chord.hand, Some(Hand::Left));
        assert_eq!(chord.output, None);
    }

    #[test]
    fn test_book_defaults_and_global_options() {
        let args =
            Args::try_parse_from(["chordgram", "book", "songs.chords", "--log-level", "debug"])
                .unwrap();

        assert_eq!(args.log_level, "debug");
        let Command::Book(book) = args.command else {
            panic!("expected book command");
        };
        assert_eq!(book.input, "songs.chords");
        assert_eq!(book.out_dir, ".");
        assert_eq!(book.index, "Chords.html");
    }

    #[test]
    fn test_invalid_hand_is_rejected() {
        let result = Args::try_parse_from(["chordgram", "chord", "0", "--hand", "up"]);
        assert!(result.is_err());
    }
}
