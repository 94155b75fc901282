//! Layout tests over whole chords: primitive inventories for known shapes
//! and geometric properties over generated ones.

use float_cmp::approx_eq;
use proptest::prelude::*;

use chordgram::{
    Diagram,
    chord::{ChordError, ChordShape, Hand},
    draw::{Drawable, Primitive},
    layout::{BASE_FRET_COUNT, Barre, Metrics, display_row, plan},
    style::{Palette, StyleClass},
};

fn chord(frets: &[Option<i64>]) -> ChordShape {
    ChordShape::from_frets(frets).unwrap()
}

fn planned(chord: &ChordShape) -> Diagram {
    plan(chord, &Palette::default()).unwrap()
}

fn count(diagram: &Diagram, class: StyleClass) -> usize {
    diagram
        .primitives()
        .iter()
        .filter(|p| p.class() == class)
        .count()
}

fn texts(diagram: &Diagram, class: StyleClass) -> Vec<String> {
    diagram
        .primitives()
        .iter()
        .filter_map(|p| match p {
            Primitive::Label(label) if label.class() == class => Some(label.content().to_string()),
            _ => None,
        })
        .collect()
}

fn dot_xs(diagram: &Diagram) -> Vec<f32> {
    diagram
        .primitives()
        .iter()
        .filter_map(|p| match p {
            Primitive::Circle(circle) => Some(circle.center().x()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_open_e_major() {
    let diagram = planned(&chord(&[Some(0), Some(2), Some(2), Some(1), Some(0), Some(0)]).with_name("E"));

    assert_eq!(texts(&diagram, StyleClass::ChordName), ["E"]);
    assert_eq!(count(&diagram, StyleClass::Finger), 3);
    assert_eq!(texts(&diagram, StyleClass::Unplayed), ["o", "o", "o"]);
    assert_eq!(count(&diagram, StyleClass::Barre), 0);
    assert_eq!(count(&diagram, StyleClass::Nut), 1);
    assert_eq!(count(&diagram, StyleClass::String), 6);
    assert_eq!(count(&diagram, StyleClass::Fret), 6);
    assert_eq!(count(&diagram, StyleClass::CapoMark), 0);
    assert_eq!(diagram.fret_count(), BASE_FRET_COUNT);

    let canvas = diagram.canvas();
    assert!(approx_eq!(f32, canvas.width(), 160.0));
    assert!(approx_eq!(f32, canvas.height(), 150.0));
}

#[test]
fn test_barre_chord() {
    let diagram = planned(&chord(&[Some(5), Some(7), Some(7), Some(6), Some(5), Some(5)]).with_name("A"));

    assert_eq!(diagram.barre(), Some(Barre { fret: 5, row: 5 }));
    assert_eq!(count(&diagram, StyleClass::Barre), 1);
    assert_eq!(count(&diagram, StyleClass::Finger), 6);
    assert_eq!(count(&diagram, StyleClass::Unplayed), 0);
    assert_eq!(diagram.fret_count(), 8);
    assert_eq!(texts(&diagram, StyleClass::FretNumber), ["5fr", "7fr"]);
}

#[test]
fn test_cut_fretboard() {
    let diagram = planned(
        &chord(&[None, None, Some(4), Some(4), Some(4), Some(7)])
            .with_name("B")
            .with_cut(3),
    );

    assert_eq!(texts(&diagram, StyleClass::Unplayed), ["x", "x"]);
    assert_eq!(count(&diagram, StyleClass::Cut), 2);
    assert_eq!(diagram.fret_count(), 7);
    assert_eq!(count(&diagram, StyleClass::Fret), 6);
    assert_eq!(texts(&diagram, StyleClass::FretNumber), ["3"]);
    assert_eq!(count(&diagram, StyleClass::String), 12);
    assert_eq!(count(&diagram, StyleClass::CapoMark), 0);

    let zigzags: Vec<_> = diagram
        .primitives()
        .iter()
        .filter_map(|p| match p {
            Primitive::Polyline(polyline) => Some(polyline.points().len()),
            _ => None,
        })
        .collect();
    assert_eq!(zigzags, [6, 6]);
}

#[test]
fn test_cut_barre_label_uses_barre_fret() {
    let shape = chord(&[Some(7), Some(9), Some(9), Some(8), Some(7), Some(7)]).with_cut(5);
    let diagram = planned(&shape);

    let barre = diagram.barre().unwrap();
    assert_eq!(barre, Barre { fret: 7, row: 4 });
    assert_eq!(texts(&diagram, StyleClass::FretNumber), ["7"]);

    let m = Metrics::new(shape.scale());
    let label_y = diagram
        .primitives()
        .iter()
        .find_map(|p| match p {
            Primitive::Label(label) if label.class() == StyleClass::FretNumber => {
                Some(label.position().y())
            }
            _ => None,
        })
        .unwrap();
    assert!(approx_eq!(f32, label_y, m.label_y(4)));
}

#[test]
fn test_capo_label_hidden_on_cut_fretboards() {
    let capo_only = planned(&chord(&[None, Some(3), Some(5), Some(5), Some(5), Some(3)]).with_capo(3));
    assert_eq!(texts(&capo_only, StyleClass::CapoMark), ["3"]);

    let with_cut = planned(
        &chord(&[None, Some(3), Some(5), Some(5), Some(5), Some(3)])
            .with_capo(3)
            .with_cut(4),
    );
    assert_eq!(count(&with_cut, StyleClass::CapoMark), 0);
}

#[test]
fn test_scale_changes_every_dimension() {
    let shape = chord(&[Some(0), Some(2), Some(2), Some(1), Some(0), Some(0)]);
    let small = planned(&shape.clone().with_scale(1.0));
    let large = planned(&shape.with_scale(4.0));

    assert!(small.canvas().width() < large.canvas().width());
    assert!(small.canvas().height() < large.canvas().height());
    assert_eq!(small.primitives().len(), large.primitives().len());
}

fn string_state() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![Just(None), (0i64..=20).prop_map(Some)]
}

fn frets() -> impl Strategy<Value = Vec<Option<i64>>> {
    prop::collection::vec(string_state(), 6)
}

/// A capo with frets at or past it; `Some(0)` stays an open string.
fn capo_and_frets() -> impl Strategy<Value = (u32, Vec<Option<i64>>)> {
    (0u32..=5).prop_flat_map(|capo| {
        let low = i64::from(capo.max(1));
        let state = prop_oneof![Just(None), Just(Some(0)), (low..=20).prop_map(Some)];
        (Just(capo), prop::collection::vec(state, 6))
    })
}

proptest! {
    #[test]
    fn barre_only_when_every_string_is_fretted(frets in frets()) {
        let shape = chord(&frets);
        let diagram = planned(&shape);

        let all_fretted = frets.iter().all(|f| matches!(f, Some(n) if *n > 0));
        prop_assert_eq!(diagram.barre().is_some(), all_fretted);
        prop_assert_eq!(count(&diagram, StyleClass::Barre), usize::from(all_fretted));
    }

    #[test]
    fn barre_row_matches_lowest_fret(
        frets in prop::collection::vec(4i64..=15, 6),
        capo in 0u32..=3,
        cut in prop_oneof![Just(0u32), 2u32..=8],
    ) {
        let states: Vec<_> = frets.iter().map(|f| Some(*f)).collect();
        let shape = chord(&states).with_capo(capo).with_cut(cut);
        let diagram = planned(&shape);

        let lowest = *frets.iter().min().unwrap() as u32;
        prop_assert_eq!(
            diagram.barre(),
            Some(Barre { fret: lowest, row: display_row(lowest, capo, cut) })
        );
    }

    #[test]
    fn content_fits_the_canvas(
        (capo, frets) in capo_and_frets(),
        cut in prop_oneof![Just(0u32), 2u32..=8],
    ) {
        let shape = chord(&frets).with_capo(capo).with_cut(cut);
        let diagram = planned(&shape);
        let height = diagram.canvas().height();

        for primitive in diagram.primitives() {
            let bounds = primitive.bounds();
            prop_assert!(bounds.max_y() <= height, "{primitive:?} exceeds {height}");
            if let Primitive::Circle(_) = primitive {
                prop_assert!(bounds.min_y() >= 0.0, "{primitive:?} is above the canvas");
            }
        }
        prop_assert!(diagram.content_bounds().max_y() <= height);
    }

    #[test]
    fn frets_below_the_capo_need_a_cut(
        capo in 2u32..=8,
        below in 1i64..=7,
        cut in 2u32..=8,
    ) {
        prop_assume!(below < i64::from(capo));
        let frets = [None, Some(below), Some(i64::from(capo)), None, None, None];

        let plain = chord(&frets).with_capo(capo);
        prop_assert!(
            matches!(
                plan(&plain, &Palette::default()),
                Err(ChordError::FretBelowCapo { string: 1, .. })
            ),
            "fret below the capo was drawn"
        );
        prop_assert!(plan(&plain.with_cut(cut), &Palette::default()).is_ok());
    }

    #[test]
    fn canvas_grows_one_fret_spacing_per_fret(frets in frets(), scale in 0.5f32..4.0) {
        let shape = chord(&frets).with_scale(scale);
        let diagram = planned(&shape);
        let m = Metrics::new(scale);

        let added = diagram.fret_count() - BASE_FRET_COUNT;
        let expected = m.initial_canvas().height() + added as f32 * m.fret_spacing;
        prop_assert!(approx_eq!(f32, diagram.canvas().height(), expected, epsilon = 0.01));
        prop_assert!(approx_eq!(f32, diagram.canvas().width(), m.initial_canvas().width()));
    }

    #[test]
    fn display_row_arithmetic(fret in 1u32..=24, capo in 0u32..=5, cut in 0u32..=12) {
        let row = display_row(fret, capo, cut);
        let (f, c, k) = (fret as i32, capo as i32, cut as i32);
        let expected = match (cut, capo) {
            (0, 0) => f,
            (0, _) => f - c,
            (_, _) if fret < cut => f,
            (_, 0) => f - k + 2,
            _ => f - k + c,
        };
        prop_assert_eq!(row, expected);
    }

    #[test]
    fn left_hand_mirrors_dots(frets in frets()) {
        let right = chord(&frets);
        let left = right.clone().with_hand(Hand::Left);
        let m = Metrics::new(right.scale());

        let right_xs = dot_xs(&planned(&right));
        let left_xs = dot_xs(&planned(&left));
        prop_assert_eq!(right_xs.len(), left_xs.len());
        for (r, l) in right_xs.iter().zip(&left_xs) {
            prop_assert!(approx_eq!(f32, r + l, m.nut_x1 + m.nut_x2, epsilon = 0.001));
        }
    }
}
