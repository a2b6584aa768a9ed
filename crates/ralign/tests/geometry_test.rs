use approx::assert_relative_eq;
use proptest::prelude::*;
use ralign::format::{format_bearing, round_coordinate};
use ralign::geometry::{CircularCurve, SpiralGeometry, SpiralRole};
use ralign::*;
use std::f64::consts::PI;

#[test]
fn test_quarter_circle_textbook_values() {
    let curve = CircularCurve::new(500.0, PI / 2.0 * 500.0).expect("Failed to build curve");
    assert_relative_eq!(curve.delta, PI / 2.0, epsilon = 1e-12);
    assert_relative_eq!(curve.chord, 500.0 * 2f64.sqrt(), epsilon = 1e-9);
}

#[test]
fn test_station_examples() {
    assert_eq!(format_station(1234.56), "12+34.56");
    assert_eq!(format_station(99.995), "1+00.00");
    assert_eq!(Station::new(0.004).to_string(), "0+00.00");
}

#[test]
fn test_spiral_role_from_radii() {
    assert_eq!(SpiralRole::from_radii(0.0, 500.0), SpiralRole::Entry);
    assert_eq!(SpiralRole::from_radii(500.0, 0.0), SpiralRole::Exit);
}

#[test]
fn test_bearing_quadrants() {
    assert_eq!(format_bearing(PI / 4.0), "N 45°00'00.00\" E");
    assert_eq!(format_bearing(3.0 * PI / 4.0), "S 45°00'00.00\" E");
    assert_eq!(format_bearing(5.0 * PI / 4.0), "S 45°00'00.00\" W");
    assert_eq!(format_bearing(7.0 * PI / 4.0), "N 45°00'00.00\" W");
}

proptest! {
    #[test]
    fn prop_rounding_is_idempotent(x in -1.0e7f64..1.0e7) {
        let once = round_coordinate(x, 4);
        prop_assert_eq!(round_coordinate(once, 4), once);
    }

    #[test]
    fn prop_curve_tangent_and_chord(radius in 1.0f64..10_000.0, fraction in 0.001f64..0.999) {
        let length = fraction * 2.0 * PI * radius;
        let curve = CircularCurve::new(radius, length).expect("valid curve");
        prop_assert!(curve.chord <= length + 1e-9);
        let expected = radius * (curve.delta / 2.0).tan();
        prop_assert!((curve.tangent - expected).abs() <= 1e-9 * expected.abs().max(1.0));
    }

    #[test]
    fn prop_spiral_outputs_are_finite(radius in 50.0f64..1.0e9, ratio in 0.001f64..1.0) {
        // theta = L / 2R stays at or below 0.5 rad.
        let length = ratio * radius;
        let geometry = SpiralGeometry::clothoid(length, radius).expect("valid spiral");
        prop_assert!(geometry.long_tangent.is_finite());
        prop_assert!(geometry.short_tangent.is_finite());
        prop_assert!(geometry.long_tangent >= geometry.short_tangent);
        prop_assert!(geometry.long_chord <= length + 1e-9);
    }

    #[test]
    fn prop_shared_points_agree(kinds in prop::collection::vec(0u8..4, 1..12)) {
        let kinds: Vec<ElementKind> = kinds
            .into_iter()
            .map(|k| match k {
                0 => ElementKind::Line,
                1 => ElementKind::Arc,
                2 => ElementKind::Spiral,
                _ => ElementKind::Unsupported,
            })
            .collect();
        prop_assert_eq!(element_labels(&kinds, 0).start, PointLabel::Pob);
        prop_assert_eq!(element_labels(&kinds, kinds.len() - 1).end, PointLabel::Poe);
        for i in 0..kinds.len() - 1 {
            prop_assert_eq!(element_labels(&kinds, i).end, element_labels(&kinds, i + 1).start);
        }
    }
}

#[test]
fn test_spiral_before_arc_changes_pc_to_sc() {
    let plain = [ElementKind::Line, ElementKind::Arc, ElementKind::Line];
    assert_eq!(element_labels(&plain, 1).start, PointLabel::Pc);
    assert_eq!(element_labels(&plain, 1).end, PointLabel::Pt);

    let spiraled = [
        ElementKind::Line,
        ElementKind::Spiral,
        ElementKind::Arc,
        ElementKind::Line,
    ];
    assert_eq!(element_labels(&spiraled, 2).start, PointLabel::Sc);
}
