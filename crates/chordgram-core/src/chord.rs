//! The chord model: what each string does plus the display options.
//!
//! A [`ChordShape`] is the only input of the layout engine. It always holds
//! exactly [`STRING_COUNT`] string states; anything else is rejected when the
//! shape is built, before any layout starts.
//!
//! # Example
//!
//! ```
//! use chordgram_core::chord::{ChordShape, Hand, StringState};
//!
//! let frets = [
//!     StringState::Muted,
//!     StringState::Muted,
//!     StringState::Fretted(4),
//!     StringState::Fretted(4),
//!     StringState::Fretted(4),
//!     StringState::Fretted(7),
//! ];
//! let chord = ChordShape::new(&frets)
//!     .unwrap()
//!     .with_name("B")
//!     .with_cut(3)
//!     .with_hand(Hand::Left);
//!
//! assert!(chord.validate().is_ok());
//! assert!(!chord.is_barre());
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// Number of strings on the instrument.
pub const STRING_COUNT: usize = 6;

/// Default scale factor applied to every dimension of a diagram.
pub const DEFAULT_SCALE: f32 = 2.0;

/// Highest fret, capo or cut position a chord may use.
pub const MAX_FRET: u32 = 36;

/// Errors raised for structurally invalid chord descriptions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChordError {
    #[error("expected {expected} string positions, found {found}")]
    StringCount { expected: usize, found: usize },

    #[error("string {string} has negative fret {fret}")]
    NegativeFret { string: usize, fret: i64 },

    #[error("fret {fret} on string {string} is out of range (at most {max})", max = MAX_FRET)]
    FretOutOfRange { string: usize, fret: i64 },

    #[error("capo {0} is out of range (at most {max})", max = MAX_FRET)]
    CapoOutOfRange(u32),

    #[error("cut {0} is out of range (at most {max})", max = MAX_FRET)]
    CutOutOfRange(u32),

    #[error("fret {fret} on string {string} lies below the capo at fret {capo}")]
    FretBelowCapo { string: usize, fret: u32, capo: u32 },

    #[error("string {string} is fretted at 0; open strings must be marked as open")]
    ZeroFret { string: usize },

    #[error("scale must be a positive finite number, got {0}")]
    InvalidScale(f32),
}

/// What a single string does in a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringState {
    /// Not played, drawn as `x` above the nut.
    Muted,
    /// Played without fretting, drawn as `o` above the nut.
    Open,
    /// Pressed at the given fret (always at least 1 for a valid shape).
    Fretted(u32),
}

impl StringState {
    /// Converts a numeric fret into a string state.
    ///
    /// Fret `0` is an open string; negative frets and frets above
    /// [`MAX_FRET`] are rejected. `string` is only used to report which
    /// position was wrong.
    pub fn from_fret(string: usize, fret: i64) -> Result<Self, ChordError> {
        match fret {
            f if f < 0 => Err(ChordError::NegativeFret { string, fret }),
            0 => Ok(Self::Open),
            f => u32::try_from(f)
                .ok()
                .filter(|f| *f <= MAX_FRET)
                .map(Self::Fretted)
                .ok_or(ChordError::FretOutOfRange { string, fret }),
        }
    }

    /// Returns the fret if the string is fretted.
    pub fn fret(self) -> Option<u32> {
        match self {
            Self::Fretted(fret) => Some(fret),
            Self::Muted | Self::Open => None,
        }
    }

    /// Returns true for strings that are not fretted (muted or open).
    pub fn is_unfretted(self) -> bool {
        self.fret().is_none()
    }

    /// The glyph drawn above the nut for an unfretted string.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            Self::Muted => Some("x"),
            Self::Open => Some("o"),
            Self::Fretted(_) => None,
        }
    }
}

impl fmt::Display for StringState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Muted => write!(f, "x"),
            Self::Open => write!(f, "0"),
            Self::Fretted(fret) => write!(f, "{fret}"),
        }
    }
}

/// Handedness of the player the diagram is drawn for.
///
/// Right-handed diagrams put string 0 on the left edge; left-handed diagrams
/// mirror the string order horizontally.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    #[default]
    Right,
}

impl FromStr for Hand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(Self::Left),
            "r" | "right" => Ok(Self::Right),
            _ => Err(format!("invalid hand `{s}`, valid values: left, right")),
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// A chord fingering plus the options that affect how it is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordShape {
    name: String,
    frets: [StringState; STRING_COUNT],
    capo: u32,
    cut: u32,
    hand: Hand,
    scale: f32,
}

impl ChordShape {
    /// Creates a chord from per-string states with default options
    /// (no name, no capo, no cut, right-handed, default scale).
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::StringCount`] unless exactly [`STRING_COUNT`]
    /// states are given.
    pub fn new(frets: &[StringState]) -> Result<Self, ChordError> {
        let frets: [StringState; STRING_COUNT] =
            frets.try_into().map_err(|_| ChordError::StringCount {
                expected: STRING_COUNT,
                found: frets.len(),
            })?;

        Ok(Self {
            name: String::new(),
            frets,
            capo: 0,
            cut: 0,
            hand: Hand::default(),
            scale: DEFAULT_SCALE,
        })
    }

    /// Creates a chord from numeric frets where `0` means open and `None`
    /// means muted.
    pub fn from_frets(frets: &[Option<i64>]) -> Result<Self, ChordError> {
        let states = frets
            .iter()
            .enumerate()
            .map(|(string, fret)| match fret {
                Some(fret) => StringState::from_fret(string, *fret),
                None => Ok(StringState::Muted),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&states)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_capo(mut self, capo: u32) -> Self {
        self.capo = capo;
        self
    }

    pub fn with_cut(mut self, cut: u32) -> Self {
        self.cut = cut;
        self
    }

    pub fn with_hand(mut self, hand: Hand) -> Self {
        self.hand = hand;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Checks the invariants the layout engine relies on.
    ///
    /// # Errors
    ///
    /// - [`ChordError::ZeroFret`] if a string is `Fretted(0)`
    /// - [`ChordError::FretOutOfRange`], [`ChordError::CapoOutOfRange`] or
    ///   [`ChordError::CutOutOfRange`] for positions above [`MAX_FRET`]
    /// - [`ChordError::FretBelowCapo`] if, without a cut, a string is
    ///   fretted below the capo
    /// - [`ChordError::InvalidScale`] if the scale is not a positive finite number
    pub fn validate(&self) -> Result<(), ChordError> {
        for (string, fret) in self.fretted() {
            if fret == 0 {
                return Err(ChordError::ZeroFret { string });
            }
            if fret > MAX_FRET {
                return Err(ChordError::FretOutOfRange {
                    string,
                    fret: i64::from(fret),
                });
            }
        }

        if self.capo > MAX_FRET {
            return Err(ChordError::CapoOutOfRange(self.capo));
        }
        if self.cut > MAX_FRET {
            return Err(ChordError::CutOutOfRange(self.cut));
        }

        // Rows on a cut fretboard are never negative.
        if self.cut == 0 {
            if let Some((string, fret)) = self.fretted().find(|(_, fret)| *fret < self.capo) {
                return Err(ChordError::FretBelowCapo {
                    string,
                    fret,
                    capo: self.capo,
                });
            }
        }

        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ChordError::InvalidScale(self.scale));
        }

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frets(&self) -> &[StringState; STRING_COUNT] {
        &self.frets
    }

    pub fn capo(&self) -> u32 {
        self.capo
    }

    pub fn cut(&self) -> u32 {
        self.cut
    }

    pub fn hand(&self) -> Hand {
        self.hand
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// String indices and frets of the fretted strings.
    fn fretted(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.frets
            .iter()
            .enumerate()
            .filter_map(|(string, state)| state.fret().map(|fret| (string, fret)))
    }

    /// A chord is a barre chord when every string is fretted.
    pub fn is_barre(&self) -> bool {
        self.frets.iter().all(|state| !state.is_unfretted())
    }

    /// The lowest fretted position, if any string is fretted.
    pub fn lowest_fret(&self) -> Option<u32> {
        self.frets.iter().filter_map(|state| state.fret()).min()
    }
}

impl fmt::Display for ChordShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frets: Vec<String> = self.frets.iter().map(ToString::to_string).collect();
        write!(f, "{} [{}]", self.name, frets.join(" "))
    }
}

/// One entry of a chord book: the chord plus an optional output file name.
#[derive(Debug, Clone, PartialEq)]
pub struct BookEntry {
    chord: ChordShape,
    file_name: Option<String>,
}

impl BookEntry {
    pub fn new(chord: ChordShape, file_name: Option<String>) -> Self {
        Self { chord, file_name }
    }

    pub fn chord(&self) -> &ChordShape {
        &self.chord
    }

    /// The explicit output file name given in the book, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use StringState::{Fretted, Muted, Open};

    #[test]
    fn test_new_rejects_wrong_string_count() {
        let err = ChordShape::new(&[Open, Open, Open]).unwrap_err();
        assert_eq!(
            err,
            ChordError::StringCount {
                expected: 6,
                found: 3
            }
        );

        let seven = [Open; 7];
        assert!(ChordShape::new(&seven).is_err());
    }

    #[test]
    fn test_new_defaults() {
        let chord = ChordShape::new(&[Open; 6]).unwrap();
        assert_eq!(chord.name(), "");
        assert_eq!(chord.capo(), 0);
        assert_eq!(chord.cut(), 0);
        assert_eq!(chord.hand(), Hand::Right);
        assert_eq!(chord.scale(), DEFAULT_SCALE);
    }

    #[test]
    fn test_from_fret() {
        assert_eq!(StringState::from_fret(0, 0), Ok(Open));
        assert_eq!(StringState::from_fret(0, 5), Ok(Fretted(5)));
        assert_eq!(
            StringState::from_fret(3, -1),
            Err(ChordError::NegativeFret { string: 3, fret: -1 })
        );
    }

    #[test]
    fn test_from_fret_rejects_frets_past_the_fretboard() {
        assert_eq!(StringState::from_fret(1, 36), Ok(Fretted(MAX_FRET)));
        assert_eq!(
            StringState::from_fret(1, 37),
            Err(ChordError::FretOutOfRange { string: 1, fret: 37 })
        );
        assert_eq!(
            StringState::from_fret(0, 3_000_000_000),
            Err(ChordError::FretOutOfRange {
                string: 0,
                fret: 3_000_000_000
            })
        );
    }

    #[test]
    fn test_from_frets_maps_none_to_muted() {
        let chord =
            ChordShape::from_frets(&[None, None, Some(4), Some(4), Some(4), Some(7)]).unwrap();
        assert_eq!(chord.frets()[0], Muted);
        assert_eq!(chord.frets()[5], Fretted(7));
    }

    #[test]
    fn test_validate_rejects_fretted_zero() {
        let chord = ChordShape::new(&[Fretted(0), Open, Open, Open, Open, Open]).unwrap();
        assert_eq!(chord.validate(), Err(ChordError::ZeroFret { string: 0 }));
    }

    #[test]
    fn test_validate_bounds_positions() {
        let high = ChordShape::new(&[Fretted(2_000_000), Muted, Muted, Muted, Muted, Muted]).unwrap();
        assert_eq!(
            high.validate(),
            Err(ChordError::FretOutOfRange {
                string: 0,
                fret: 2_000_000
            })
        );

        let chord = ChordShape::new(&[Muted, Fretted(3), Fretted(5), Open, Open, Open]).unwrap();
        assert!(chord.clone().with_capo(MAX_FRET).with_cut(2).validate().is_ok());
        assert_eq!(
            chord.clone().with_capo(40).validate(),
            Err(ChordError::CapoOutOfRange(40))
        );
        assert_eq!(
            chord.with_cut(u32::MAX).validate(),
            Err(ChordError::CutOutOfRange(u32::MAX))
        );
    }

    #[test]
    fn test_validate_rejects_frets_below_capo() {
        let chord = ChordShape::new(&[Muted, Fretted(1), Fretted(3), Fretted(3), Fretted(3), Muted])
            .unwrap()
            .with_capo(3);
        assert_eq!(
            chord.validate(),
            Err(ChordError::FretBelowCapo {
                string: 1,
                fret: 1,
                capo: 3
            })
        );

        // Frets at the capo sit on the capo bar; a cut draws low frets raw.
        assert!(chord.clone().with_capo(1).validate().is_ok());
        assert!(chord.with_cut(2).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_scale() {
        let chord = ChordShape::new(&[Open; 6]).unwrap();
        assert!(chord.clone().with_scale(0.0).validate().is_err());
        assert!(chord.clone().with_scale(-1.5).validate().is_err());
        assert!(chord.clone().with_scale(f32::NAN).validate().is_err());
        assert!(chord.with_scale(0.5).validate().is_ok());
    }

    #[test]
    fn test_barre_detection() {
        let barre = ChordShape::new(&[
            Fretted(5),
            Fretted(7),
            Fretted(7),
            Fretted(6),
            Fretted(5),
            Fretted(5),
        ])
        .unwrap();
        assert!(barre.is_barre());
        assert_eq!(barre.lowest_fret(), Some(5));

        let open = ChordShape::new(&[Open, Fretted(2), Fretted(2), Fretted(1), Open, Open]).unwrap();
        assert!(!open.is_barre());
        assert_eq!(open.lowest_fret(), Some(1));

        let silent = ChordShape::new(&[Muted; 6]).unwrap();
        assert!(!silent.is_barre());
        assert_eq!(silent.lowest_fret(), None);
    }

    #[test]
    fn test_hand_from_str() {
        assert_eq!("L".parse::<Hand>(), Ok(Hand::Left));
        assert_eq!("right".parse::<Hand>(), Ok(Hand::Right));
        assert!("middle".parse::<Hand>().is_err());
    }

    #[test]
    fn test_markers() {
        assert_eq!(Muted.marker(), Some("x"));
        assert_eq!(Open.marker(), Some("o"));
        assert_eq!(Fretted(3).marker(), None);
    }
}
