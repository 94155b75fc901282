//! Turns parsed statements into validated chord-book entries.

use std::collections::HashMap;

use log::{debug, trace};

use chordgram_core::chord::{
    BookEntry, ChordShape, DEFAULT_SCALE, Hand, MAX_FRET, STRING_COUNT, StringState,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::{Span, Spanned},
    syntax::{RawAttribute, RawEntry},
};

const KNOWN_ATTRIBUTES: &str = "capo, cut, hand, scale, file";

/// Defaults applied to entries that do not set an option themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElaborateConfig {
    /// Scale of entries without a `scale` attribute
    pub scale: f32,
    /// Handedness of entries without a `hand` attribute
    pub hand: Hand,
}

impl ElaborateConfig {
    pub fn new(scale: f32, hand: Hand) -> Self {
        Self { scale, hand }
    }
}

impl Default for ElaborateConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            hand: Hand::default(),
        }
    }
}

/// Options read from one statement's attribute list.
#[derive(Debug, Default)]
struct EntryOptions {
    capo: Option<u32>,
    cut: Option<u32>,
    hand: Option<Hand>,
    scale: Option<f32>,
    file: Option<Spanned<String>>,
}

pub(crate) struct Builder {
    cfg: ElaborateConfig,
    diagnostics: DiagnosticCollector,
    files: HashMap<String, Span>,
}

impl Builder {
    pub fn new(cfg: ElaborateConfig) -> Self {
        Self {
            cfg,
            diagnostics: DiagnosticCollector::new(),
            files: HashMap::new(),
        }
    }

    pub fn build(mut self, raw_entries: &[RawEntry<'_>]) -> Result<Vec<BookEntry>, ParseError> {
        debug!(statements = raw_entries.len(); "Elaborating chord book");

        let entries: Vec<BookEntry> = raw_entries
            .iter()
            .filter_map(|raw| self.entry(raw))
            .collect();

        self.diagnostics.finish()?;
        debug!(entries = entries.len(); "Chord book elaborated");
        Ok(entries)
    }

    /// Elaborates one statement; problems are emitted and yield `None`.
    fn entry(&mut self, raw: &RawEntry<'_>) -> Option<BookEntry> {
        let frets = match fret_states(&raw.frets, raw.frets_span) {
            Ok(frets) => Some(frets),
            Err(diagnostics) => {
                diagnostics.into_iter().for_each(|d| self.diagnostics.emit(d));
                None
            }
        };
        let options = self.options(&raw.attributes);
        let frets = frets?;

        let chord = ChordShape::new(&frets)
            .map(|chord| {
                chord
                    .with_name(*raw.name.inner())
                    .with_capo(options.capo.unwrap_or(0))
                    .with_cut(options.cut.unwrap_or(0))
                    .with_hand(options.hand.unwrap_or(self.cfg.hand))
                    .with_scale(options.scale.unwrap_or(self.cfg.scale))
            })
            .and_then(|chord| chord.validate().map(|()| chord));

        let chord = match chord {
            Ok(chord) => chord,
            Err(err) => {
                self.diagnostics.emit(
                    Diagnostic::error(err.to_string())
                        .with_code(ErrorCode::E302)
                        .with_label(raw.span, "this chord cannot be drawn"),
                );
                return None;
            }
        };

        trace!(chord:% = chord; "Elaborated entry");
        Some(BookEntry::new(chord, options.file.map(Spanned::into_inner)))
    }

    fn options(&mut self, attributes: &[RawAttribute<'_>]) -> EntryOptions {
        let mut options = EntryOptions::default();
        let mut seen: Vec<Spanned<&str>> = Vec::new();

        for attribute in attributes {
            let key = *attribute.key.inner();
            if let Some(first) = seen.iter().find(|s| *s.inner() == key) {
                self.diagnostics.emit(
                    Diagnostic::error(format!("attribute `{key}` is given twice"))
                        .with_code(ErrorCode::E301)
                        .with_label(attribute.key.span(), "duplicate attribute")
                        .with_secondary_label(first.span(), "first given here")
                        .with_help("remove one of the two values"),
                );
                continue;
            }
            seen.push(attribute.key);

            match key {
                "capo" => options.capo = self.whole_number(attribute),
                "cut" => options.cut = self.whole_number(attribute),
                "hand" => options.hand = self.hand(attribute),
                "scale" => options.scale = self.scale(attribute),
                "file" => options.file = self.file(attribute),
                other => self.diagnostics.emit(
                    Diagnostic::error(format!("unknown attribute `{other}`"))
                        .with_code(ErrorCode::E300)
                        .with_label(attribute.key.span(), ErrorCode::E300.description())
                        .with_help(format!("known attributes: {KNOWN_ATTRIBUTES}")),
                ),
            }
        }

        options
    }

    fn invalid_value(&mut self, attribute: &RawAttribute<'_>, expected: &str, help: &str) {
        let key = attribute.key.inner();
        let text = attribute.value.inner().text();
        self.diagnostics.emit(
            Diagnostic::error(format!("invalid value `{text}` for `{key}`"))
                .with_code(ErrorCode::E302)
                .with_label(attribute.value.span(), expected)
                .with_help(help),
        );
    }

    fn whole_number(&mut self, attribute: &RawAttribute<'_>) -> Option<u32> {
        let parsed = attribute
            .value
            .inner()
            .text()
            .parse::<u32>()
            .ok()
            .filter(|n| *n <= MAX_FRET);
        if parsed.is_none() {
            self.invalid_value(
                attribute,
                &format!("expected a fret number from 0 to {MAX_FRET}"),
                "fret numbers are non-negative integers, `0` meaning none",
            );
        }
        parsed
    }

    fn hand(&mut self, attribute: &RawAttribute<'_>) -> Option<Hand> {
        let parsed = attribute.value.inner().text().parse::<Hand>().ok();
        if parsed.is_none() {
            self.invalid_value(attribute, "expected `left` or `right`", "use `hand=left` or `hand=right`");
        }
        parsed
    }

    fn scale(&mut self, attribute: &RawAttribute<'_>) -> Option<f32> {
        let parsed = attribute
            .value
            .inner()
            .text()
            .parse::<f32>()
            .ok()
            .filter(|scale| scale.is_finite() && *scale > 0.0);
        if parsed.is_none() {
            self.invalid_value(
                attribute,
                "expected a positive number",
                "scale 1 draws an 80x75 diagram, scale 2 doubles it",
            );
        }
        parsed
    }

    fn file(&mut self, attribute: &RawAttribute<'_>) -> Option<Spanned<String>> {
        let text = attribute.value.inner().text();
        if text.is_empty() || text.contains(['/', '\\']) || text == "." || text == ".." {
            self.invalid_value(
                attribute,
                "expected a plain file name",
                "files are written to the output directory, e.g. `file=\"Am.svg\"`",
            );
            return None;
        }

        let span = attribute.value.span();
        if let Some(first) = self.files.get(text) {
            self.diagnostics.emit(
                Diagnostic::error(format!("output file `{text}` is used twice"))
                    .with_code(ErrorCode::E303)
                    .with_label(span, "used again here")
                    .with_secondary_label(*first, "first used here")
                    .with_help("give each entry its own `file`"),
            );
            return None;
        }
        self.files.insert(text.to_string(), span);

        Some(Spanned::new(text.to_string(), span))
    }
}

/// Maps one fret token to a string state.
fn fret_state(token: &Spanned<&str>, string: usize) -> Result<StringState, Diagnostic> {
    let text = *token.inner();
    match text {
        "x" | "X" => Ok(StringState::Muted),
        "o" | "O" => Ok(StringState::Open),
        _ => {
            let fret = text.parse::<i64>().map_err(|_| {
                Diagnostic::error(format!("invalid fret `{text}`"))
                    .with_code(ErrorCode::E201)
                    .with_label(token.span(), "expected `x`, `o` or a fret number")
                    .with_help("mark muted strings with `x` and open strings with `o` or `0`")
            })?;
            StringState::from_fret(string, fret).map_err(|err| {
                Diagnostic::error(err.to_string())
                    .with_code(ErrorCode::E201)
                    .with_label(token.span(), ErrorCode::E201.description())
                    .with_help(format!(
                        "frets are counted from 1 to {MAX_FRET}; use `0` or `o` for an open string"
                    ))
            })
        }
    }
}

/// Checks a whole fret list, reporting every bad token and a wrong count.
pub(crate) fn fret_states(
    tokens: &[Spanned<&str>],
    list_span: Span,
) -> Result<[StringState; STRING_COUNT], Vec<Diagnostic>> {
    let mut diagnostics = Vec::new();
    let mut states = Vec::with_capacity(tokens.len());

    for (string, token) in tokens.iter().enumerate() {
        match fret_state(token, string) {
            Ok(state) => states.push(state),
            Err(diagnostic) => diagnostics.push(diagnostic),
        }
    }

    if tokens.len() != STRING_COUNT {
        diagnostics.push(
            Diagnostic::error(format!(
                "expected {STRING_COUNT} fret positions, found {}",
                tokens.len()
            ))
            .with_code(ErrorCode::E200)
            .with_label(list_span, ErrorCode::E200.description())
            .with_help("list one position per string, low E first"),
        );
    }

    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    states.try_into().map_err(|states: Vec<StringState>| {
        vec![
            Diagnostic::error(format!(
                "expected {STRING_COUNT} fret positions, found {}",
                states.len()
            ))
            .with_code(ErrorCode::E200)
            .with_label(list_span, ErrorCode::E200.description()),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax;

    fn build(source: &str) -> Result<Vec<BookEntry>, ParseError> {
        let raw = syntax::statements(source)?;
        Builder::new(ElaborateConfig::default()).build(&raw)
    }

    fn codes(err: &ParseError) -> Vec<ErrorCode> {
        err.diagnostics().iter().filter_map(|d| d.code()).collect()
    }

    #[test]
    fn test_defaults_come_from_config() {
        let raw = syntax::statements("Em: 0 2 2 0 0 0;").unwrap();
        let entries = Builder::new(ElaborateConfig::new(1.5, Hand::Left))
            .build(&raw)
            .unwrap();

        let chord = entries[0].chord();
        assert_eq!(chord.name(), "Em");
        assert_eq!(chord.scale(), 1.5);
        assert_eq!(chord.hand(), Hand::Left);
        assert_eq!(chord.capo(), 0);
        assert_eq!(entries[0].file_name(), None);
    }

    #[test]
    fn test_attributes_override_defaults() {
        let entries = build(r#"A: 5 7 7 6 5 5 [capo=2, cut=4, hand=l, scale=1, file="Acapo2.svg"];"#)
            .unwrap();
        let chord = entries[0].chord();
        assert_eq!(chord.capo(), 2);
        assert_eq!(chord.cut(), 4);
        assert_eq!(chord.hand(), Hand::Left);
        assert_eq!(chord.scale(), 1.0);
        assert_eq!(entries[0].file_name(), Some("Acapo2.svg"));
    }

    #[test]
    fn test_fret_tokens_map_to_states() {
        let entries = build("B: X x 4 O o 0;").unwrap();
        assert_eq!(
            entries[0].chord().frets(),
            &[
                StringState::Muted,
                StringState::Muted,
                StringState::Fretted(4),
                StringState::Open,
                StringState::Open,
                StringState::Open,
            ]
        );
    }

    #[test]
    fn test_all_semantic_errors_are_reported() {
        let source = "D: x x 0 2 3;\nE: 0 2 q 1 0 -1;\nF: 1 3 3 2 1 1 [capo=two, size=3];";
        let err = build(source).unwrap_err();
        assert_eq!(
            codes(&err),
            [
                ErrorCode::E200,
                ErrorCode::E201,
                ErrorCode::E201,
                ErrorCode::E302,
                ErrorCode::E300,
            ]
        );
    }

    #[test]
    fn test_wrong_count_labels_whole_list() {
        let source = "D: x x 0 2 3;";
        let err = build(source).unwrap_err();
        let span = err.diagnostics()[0].primary_span().unwrap();
        assert_eq!(&source[span.start()..span.end()], "x x 0 2 3");
    }

    #[test]
    fn test_duplicate_attribute_has_secondary_label() {
        let err = build("G: 3 2 0 0 0 3 [capo=1, capo=2];").unwrap_err();
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E301));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[1].is_secondary());
    }

    #[test]
    fn test_duplicate_output_file() {
        let source = "A: x 0 2 2 2 0 [file=a.svg];\nAm: x 0 2 2 1 0 [file=\"a.svg\"];";
        let err = build(source).unwrap_err();
        assert_eq!(codes(&err), [ErrorCode::E303]);
    }

    #[test]
    fn test_invalid_values() {
        let err = build("C: x 3 2 0 1 0 [hand=up, scale=0, file=\"../x.svg\"];").unwrap_err();
        assert_eq!(codes(&err), [ErrorCode::E302, ErrorCode::E302, ErrorCode::E302]);
    }

    #[test]
    fn test_positions_past_the_fretboard() {
        let err = build("E: 2000000000 x x x x x;\nA: x 0 2 2 2 0 [capo=37, cut=99999];").unwrap_err();
        assert_eq!(codes(&err), [ErrorCode::E201, ErrorCode::E302, ErrorCode::E302]);

        let entries = build("A: x 36 x x x x [capo=36];").unwrap();
        assert_eq!(entries[0].chord().capo(), MAX_FRET);
    }

    #[test]
    fn test_fret_below_capo_is_reported() {
        let source = "G: 3 2 0 0 3 3 [capo=3];";
        let err = build(source).unwrap_err();
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E302));
        assert_eq!(diag.primary_span(), Some(Span::new(0..source.len())));

        assert!(build("G: 3 2 0 0 3 3 [capo=3, cut=2];").is_ok());
    }

    #[test]
    fn test_invalid_config_scale_is_reported() {
        let raw = syntax::statements("Em: 0 2 2 0 0 0;").unwrap();
        let err = Builder::new(ElaborateConfig::new(-1.0, Hand::Right))
            .build(&raw)
            .unwrap_err();
        assert_eq!(codes(&err), [ErrorCode::E302]);
    }
}
