//! Surface syntax of fret lists and chord books.
//!
//! The grammar is deliberately loose: fret tokens and attribute values are
//! kept as spanned text and only checked during elaboration, so a book with
//! several bad values reports all of them at once. Syntax errors recover at
//! the next `;`.
//!
//! ```text
//! book      = { trivia statement } trivia
//! statement = name ":" frets [ "[" attr { "," attr } "]" ] ";"
//! name      = STRING | BARE
//! frets     = FRET { ( " " | "," ) FRET }
//! attr      = IDENT "=" ( STRING | VALUE )
//! trivia    = whitespace | "#" comment-to-end-of-line
//! ```

use winnow::{
    Parser,
    ascii::multispace1,
    combinator::{alt, cut_err, eof, opt, preceded, repeat, separated, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{one_of, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::{Span, Spanned},
};

type Input<'a> = LocatingSlice<&'a str>;
type PResult<O> = ModalResult<O, ContextError<SyntaxDiagnostic>>;

/// Diagnostic details attached to winnow errors with `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SyntaxDiagnostic {
    code: ErrorCode,
    message: &'static str,
    label: &'static str,
    help: Option<&'static str>,
    /// Start of a construct the error spans (an unterminated string).
    /// Without it the error points at the offending character.
    start: Option<usize>,
}

impl SyntaxDiagnostic {
    fn expected(message: &'static str, label: &'static str, help: Option<&'static str>) -> Self {
        Self {
            code: ErrorCode::E100,
            message,
            label,
            help,
            start: None,
        }
    }

    fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = code;
        self
    }
}

/// One chord statement as written, before any value is checked.
#[derive(Debug, Clone)]
pub(crate) struct RawEntry<'a> {
    pub name: Spanned<&'a str>,
    pub frets: Vec<Spanned<&'a str>>,
    pub frets_span: Span,
    pub attributes: Vec<RawAttribute<'a>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub(crate) struct RawAttribute<'a> {
    pub key: Spanned<&'a str>,
    pub value: Spanned<RawValue<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawValue<'a> {
    Quoted(&'a str),
    Bare(&'a str),
}

impl<'a> RawValue<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Self::Quoted(text) | Self::Bare(text) => text,
        }
    }
}

fn spanned<'a, O, P>(parser: P) -> impl Parser<Input<'a>, Spanned<O>, ErrMode<ContextError<SyntaxDiagnostic>>>
where
    P: Parser<Input<'a>, O, ErrMode<ContextError<SyntaxDiagnostic>>>,
{
    parser
        .with_span()
        .map(|(value, range)| Spanned::new(value, Span::new(range)))
}

fn comment(input: &mut Input<'_>) -> PResult<()> {
    ('#', take_while(0.., |c: char| c != '\n'))
        .void()
        .parse_next(input)
}

fn trivia(input: &mut Input<'_>) -> PResult<()> {
    repeat(0.., alt((multispace1.void(), comment))).parse_next(input)
}

fn string_literal<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    let start = input.current_token_start();
    '"'.parse_next(input)?;
    cut_err(terminated(take_while(0.., |c: char| c != '"' && c != '\n'), '"'))
        .context(SyntaxDiagnostic {
            code: ErrorCode::E001,
            message: "unterminated string literal",
            label: "string starts here",
            help: Some("add the closing `\"` on the same line"),
            start: Some(start),
        })
        .parse_next(input)
}

fn is_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, ':' | ';' | '[' | ']' | '"' | ',')
}

/// A bare chord name. `#` may appear after the first character (`F#m`).
fn bare_name<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    (
        one_of(|c: char| is_name_char(c) && c != '#'),
        take_while(0.., is_name_char),
    )
        .take()
        .parse_next(input)
}

fn fret_token<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.')
    })
    .parse_next(input)
}

fn fret_gap<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    take_while(0.., |c: char| c.is_whitespace() || c == ',').parse_next(input)
}

fn fret_list<'a>(input: &mut Input<'a>) -> PResult<Vec<Spanned<&'a str>>> {
    cut_err(repeat(1.., terminated(spanned(fret_token), fret_gap)))
        .context(SyntaxDiagnostic::expected(
            "expected fret positions",
            "expected `x`, `o` or a fret number here",
            Some("list one position per string, low E first: `x 3 2 0 1 0`"),
        ))
        .parse_next(input)
}

fn identifier<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        .parse_next(input)
}

fn attribute_value<'a>(input: &mut Input<'a>) -> PResult<RawValue<'a>> {
    alt((
        string_literal.map(RawValue::Quoted),
        take_while(1.., |c: char| {
            c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+' | '_')
        })
        .map(RawValue::Bare),
    ))
    .parse_next(input)
}

fn attribute<'a>(input: &mut Input<'a>) -> PResult<RawAttribute<'a>> {
    let key = spanned(identifier).parse_next(input)?;
    trivia(input)?;
    cut_err('=')
        .context(SyntaxDiagnostic::expected(
            "expected `=` after the attribute name",
            "expected `=`",
            Some("attributes look like `capo=2`"),
        ))
        .parse_next(input)?;
    trivia(input)?;
    let value = cut_err(spanned(attribute_value))
        .context(SyntaxDiagnostic::expected(
            "expected an attribute value",
            "expected a number, a word or a quoted string",
            None,
        ))
        .parse_next(input)?;

    Ok(RawAttribute { key, value })
}

fn attribute_list<'a>(input: &mut Input<'a>) -> PResult<Vec<RawAttribute<'a>>> {
    preceded(
        ('[', trivia),
        terminated(
            separated(0.., attribute, (trivia, ',', trivia)),
            (
                trivia,
                cut_err(']').context(SyntaxDiagnostic::expected(
                    "expected `,` or `]` in the attribute list",
                    "expected `,` or `]`",
                    Some("separate attributes with commas: `[capo=2, cut=3]`"),
                )),
            ),
        ),
    )
    .parse_next(input)
}

fn statement<'a>(input: &mut Input<'a>) -> PResult<RawEntry<'a>> {
    let start = input.current_token_start();

    let name = spanned(alt((string_literal, bare_name)))
        .context(SyntaxDiagnostic::expected(
            "expected a chord name",
            "expected a name",
            Some("statements look like `E: 0 2 2 1 0 0;`"),
        ))
        .parse_next(input)?;
    trivia(input)?;
    cut_err(':')
        .context(SyntaxDiagnostic::expected(
            "expected `:` after the chord name",
            "expected `:`",
            Some("statements look like `E: 0 2 2 1 0 0;`"),
        ))
        .parse_next(input)?;
    trivia(input)?;

    let frets = fret_list(input)?;
    let frets_span = match (frets.first(), frets.last()) {
        (Some(first), Some(last)) => first.span().union(last.span()),
        _ => Span::new(start..input.current_token_start()),
    };

    let attributes = opt(attribute_list).parse_next(input)?.unwrap_or_default();
    trivia(input)?;
    cut_err(';')
        .context(
            SyntaxDiagnostic::expected(
                "expected `;` at the end of the statement",
                "expected `;`",
                Some("terminate every chord with `;`"),
            )
            .with_code(ErrorCode::E101),
        )
        .parse_next(input)?;

    Ok(RawEntry {
        name,
        frets,
        frets_span,
        attributes,
        span: Span::new(start..input.current_token_start()),
    })
}

/// Converts a failed parse at byte `pos` of `source` into a diagnostic.
fn to_diagnostic(
    err: ErrMode<ContextError<SyntaxDiagnostic>>,
    pos: usize,
    source: &str,
) -> Diagnostic {
    let context = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    let char_len = source
        .get(pos..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    let at_pos = Span::new(pos..pos + char_len);

    match context.context().next() {
        Some(found) => {
            let span = match found.start {
                Some(start) => Span::new(start..pos),
                None => at_pos,
            };
            let mut diagnostic = Diagnostic::error(found.message)
                .with_code(found.code)
                .with_label(span.clamp_to(source.len()), found.label);
            if let Some(help) = found.help {
                diagnostic = diagnostic.with_help(help);
            }
            diagnostic
        }
        None => Diagnostic::error("unexpected character")
            .with_code(ErrorCode::E002)
            .with_label(at_pos, ErrorCode::E002.description()),
    }
}

/// Skips past the next `;` so parsing can resume at the following statement.
fn skip_statement(input: &mut Input<'_>) {
    let skip = match input.offset_for(|c| c == ';') {
        Some(offset) => offset + 1,
        None => input.eof_offset(),
    };
    let _ = input.next_slice(skip);
}

/// Parses every statement of a chord book, collecting syntax errors.
pub(crate) fn statements(source: &str) -> Result<Vec<RawEntry<'_>>, ParseError> {
    let mut input = LocatingSlice::new(source);
    let mut entries = Vec::new();
    let mut diagnostics = DiagnosticCollector::new();

    loop {
        if trivia(&mut input).is_err() || input.is_empty() {
            break;
        }
        match statement(&mut input) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                let pos = input.current_token_start();
                diagnostics.emit(to_diagnostic(err, pos, source));
                skip_statement(&mut input);
            }
        }
    }

    diagnostics.finish()?;
    Ok(entries)
}

/// Parses a standalone fret list such as `x x 4 4 4 7` or `X,X,4,4,4,7`.
pub(crate) fn fret_tokens(source: &str) -> Result<Vec<Spanned<&str>>, ParseError> {
    let mut input = LocatingSlice::new(source);
    preceded(
        fret_gap,
        terminated(
            fret_list,
            cut_err(eof).context(SyntaxDiagnostic::expected(
                "unexpected text after the fret positions",
                "not a fret position",
                Some("separate positions with spaces or commas"),
            )),
        ),
    )
    .parse_next(&mut input)
    .map_err(|err| {
        let pos = input.current_token_start();
        to_diagnostic(err, pos, source).into()
    })
}
