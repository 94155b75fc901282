//! Integration tests for the DiagramBuilder API

use chordgram::{
    ChordgramError, DiagramBuilder,
    chord::Hand,
    config::{AppConfig, DiagramConfig, StyleConfig},
};

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
}

#[test]
fn test_parse_chord_applies_defaults() {
    let config = AppConfig::new(DiagramConfig::new(1.5, Hand::Left), StyleConfig::default());
    let builder = DiagramBuilder::new(config);

    let chord = builder.parse_chord("x 0 2 2 1 0").expect("Failed to parse");
    assert_eq!(chord.scale(), 1.5);
    assert_eq!(chord.hand(), Hand::Left);
    assert_eq!(chord.name(), "");
}

#[test]
fn test_render_simple_chord() {
    let builder = DiagramBuilder::default();
    let chord = builder
        .parse_chord("0 2 2 1 0 0")
        .expect("Failed to parse")
        .with_name("E");

    let svg = builder.render_svg(&chord).expect("Failed to render");
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
}

#[test]
fn test_parse_invalid_frets_returns_error() {
    let builder = DiagramBuilder::default();
    let result = builder.parse_chord("x 0 2 2 1");
    match result {
        Err(ChordgramError::Parse { src, err }) => {
            assert_eq!(src, "x 0 2 2 1");
            assert!(!err.diagnostics().is_empty());
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_book_entries_render() {
    let source = r#"
        # two open chords
        E: 0 2 2 1 0 0;
        "A capo": 5 7 7 6 5 5 [capo=2, file="Acapo2.svg"];
    "#;

    let builder = DiagramBuilder::default();
    let entries = builder.parse_book(source).expect("Failed to parse book");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].file_name(), Some("Acapo2.svg"));

    for entry in &entries {
        let svg = builder.render_svg(entry.chord()).expect("Failed to render");
        assert!(svg.contains(entry.chord().name()));
    }
}

#[test]
fn test_invalid_style_color_is_config_error() {
    let config = AppConfig::new(
        DiagramConfig::default(),
        StyleConfig::new(Some("nope".to_string()), None),
    );
    let builder = DiagramBuilder::new(config);
    let chord = builder.parse_chord("0 2 2 1 0 0").unwrap();

    assert!(matches!(
        builder.render_svg(&chord),
        Err(ChordgramError::Config(_))
    ));
}

#[test]
fn test_write_svg_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Am.svg");

    let builder = DiagramBuilder::default();
    let chord = builder.parse_chord("x 0 2 2 1 0").unwrap().with_name("Am");
    builder.write_svg(&chord, &path).expect("Failed to write");

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, builder.render_svg(&chord).unwrap());
}

#[test]
fn test_builder_reusability() {
    let builder = DiagramBuilder::default();

    let first = builder.parse_chord("3 2 0 0 0 3").unwrap().with_name("G");
    let second = builder.parse_chord("x 3 2 0 1 0").unwrap().with_name("C");

    let svg1 = builder.render_svg(&first).unwrap();
    let svg2 = builder.render_svg(&second).unwrap();
    assert_ne!(svg1, svg2);
    assert_eq!(svg1, builder.render_svg(&first).unwrap());
}
