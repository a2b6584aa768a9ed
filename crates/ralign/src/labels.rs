//! Station point labels in the InRoads convention.
//!
//! A label names the point shared by two consecutive elements, so it depends only
//! on the element kinds on either side of that point. The first point of an
//! alignment is always `POB` and the last is always `POE`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::SpiralRole;
use crate::types::{ElementKind, HorizontalElement, VerticalElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointLabel {
    Pob,
    Poe,
    Pi,
    Pc,
    Pt,
    Cc,
    Ts,
    Sc,
    Cs,
    St,
    Ss,
    Spi,
    Pvc,
    Pvi,
    Pvt,
}

impl PointLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            PointLabel::Pob => "POB",
            PointLabel::Poe => "POE",
            PointLabel::Pi => "PI",
            PointLabel::Pc => "PC",
            PointLabel::Pt => "PT",
            PointLabel::Cc => "CC",
            PointLabel::Ts => "TS",
            PointLabel::Sc => "SC",
            PointLabel::Cs => "CS",
            PointLabel::St => "ST",
            PointLabel::Ss => "SS",
            PointLabel::Spi => "SPI",
            PointLabel::Pvc => "PVC",
            PointLabel::Pvi => "PVI",
            PointLabel::Pvt => "PVT",
        }
    }
}

impl fmt::Display for PointLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Start and end labels of one horizontal element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementLabels {
    pub start: PointLabel,
    pub end: PointLabel,
}

/// Label of the point where `previous` ends and `current` begins.
pub fn shared_point_label(previous: ElementKind, current: ElementKind) -> PointLabel {
    match (current, previous) {
        (ElementKind::Line, ElementKind::Spiral) => PointLabel::St,
        (ElementKind::Line, ElementKind::Arc) => PointLabel::Pt,
        (ElementKind::Line, _) => PointLabel::Pi,
        (ElementKind::Arc, ElementKind::Spiral) => PointLabel::Sc,
        (ElementKind::Arc, _) => PointLabel::Pc,
        (ElementKind::Spiral, ElementKind::Arc) => PointLabel::Cs,
        (ElementKind::Spiral, ElementKind::Spiral) => PointLabel::Ss,
        (ElementKind::Spiral, _) => PointLabel::Ts,
        (ElementKind::Unsupported, _) => PointLabel::Pi,
    }
}

/// Labels for the element at `index` of `kinds`.
///
/// Panics if `index` is out of bounds.
pub fn element_labels(kinds: &[ElementKind], index: usize) -> ElementLabels {
    let current = kinds[index];
    let start = match index.checked_sub(1).map(|i| kinds[i]) {
        None => PointLabel::Pob,
        Some(previous) => shared_point_label(previous, current),
    };
    let end = match kinds.get(index + 1) {
        None => PointLabel::Poe,
        Some(&next) => shared_point_label(current, next),
    };
    ElementLabels { start, end }
}

/// Labels for every element of a horizontal alignment.
pub fn label_horizontal(elements: &[HorizontalElement]) -> Vec<ElementLabels> {
    let kinds: Vec<ElementKind> = elements.iter().map(HorizontalElement::kind).collect();
    (0..kinds.len())
        .map(|index| element_labels(&kinds, index))
        .collect()
}

/// Entry/exit role of the spiral at `index`, `None` when it is not a spiral.
///
/// Neighbors decide first: a spiral followed by an arc leads into it, a spiral
/// preceded by an arc leads out of it. When both or neither neighbor is an arc the
/// radii decide (see [`SpiralRole::from_radii`]).
pub fn spiral_role(elements: &[HorizontalElement], index: usize) -> Option<SpiralRole> {
    let HorizontalElement::Spiral(spiral) = elements.get(index)? else {
        return None;
    };
    let is_arc = |i: Option<usize>| {
        i.and_then(|i| elements.get(i))
            .is_some_and(|e| e.kind() == ElementKind::Arc)
    };
    let previous_arc = is_arc(index.checked_sub(1));
    let next_arc = is_arc(Some(index + 1));

    Some(match (previous_arc, next_arc) {
        (false, true) => SpiralRole::Entry,
        (true, false) => SpiralRole::Exit,
        _ => SpiralRole::from_radii(spiral.radius_in, spiral.radius_out),
    })
}

/// Labels of one vertical element. `vertex` is only set for curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalLabels {
    pub start: PointLabel,
    pub vertex: Option<PointLabel>,
    pub end: PointLabel,
}

/// Labels for every profile element; decided by element type alone.
pub fn label_vertical(elements: &[VerticalElement]) -> Vec<VerticalLabels> {
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| match element {
            VerticalElement::Tangent(_) => VerticalLabels {
                start: if index == 0 {
                    PointLabel::Pob
                } else {
                    PointLabel::Pvi
                },
                vertex: None,
                end: PointLabel::Pvi,
            },
            VerticalElement::Circular(_) => VerticalLabels {
                start: PointLabel::Pvc,
                vertex: Some(PointLabel::Pvi),
                end: PointLabel::Pvt,
            },
            VerticalElement::Unsupported => VerticalLabels {
                start: if index == 0 {
                    PointLabel::Pob
                } else {
                    PointLabel::Pvi
                },
                vertex: None,
                end: PointLabel::Pvi,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ArcElement, Coordinate, LineElement, SpiralElement, SpiralType, TurnDirection,
        VerticalCurve, VerticalTangent,
    };
    use ElementKind::*;

    #[test]
    fn test_single_element() {
        let labels = element_labels(&[Line], 0);
        assert_eq!(labels.start, PointLabel::Pob);
        assert_eq!(labels.end, PointLabel::Poe);
    }

    #[test]
    fn test_line_arc_line() {
        let kinds = [Line, Arc, Line];
        assert_eq!(element_labels(&kinds, 0).end, PointLabel::Pc);
        assert_eq!(
            element_labels(&kinds, 1),
            ElementLabels {
                start: PointLabel::Pc,
                end: PointLabel::Pt
            }
        );
        assert_eq!(element_labels(&kinds, 2).start, PointLabel::Pt);
    }

    #[test]
    fn test_spiral_curve_spiral() {
        let kinds = [Line, Spiral, Arc, Spiral, Line];
        let labels: Vec<_> = (0..kinds.len()).map(|i| element_labels(&kinds, i)).collect();
        assert_eq!(labels[0].end, PointLabel::Ts);
        assert_eq!(labels[1].start, PointLabel::Ts);
        assert_eq!(labels[1].end, PointLabel::Sc);
        assert_eq!(labels[2].start, PointLabel::Sc);
        assert_eq!(labels[2].end, PointLabel::Cs);
        assert_eq!(labels[3].start, PointLabel::Cs);
        assert_eq!(labels[3].end, PointLabel::St);
        assert_eq!(labels[4].start, PointLabel::St);
        assert_eq!(labels[4].end, PointLabel::Poe);
    }

    #[test]
    fn test_shared_points_agree() {
        let kinds = [Line, Arc, Arc, Spiral, Spiral, Line, Unsupported, Line];
        for i in 0..kinds.len() - 1 {
            assert_eq!(
                element_labels(&kinds, i).end,
                element_labels(&kinds, i + 1).start,
                "shared point between {i} and {}",
                i + 1
            );
        }
    }

    #[test]
    fn test_tangent_to_tangent_is_pi() {
        assert_eq!(shared_point_label(Line, Line), PointLabel::Pi);
        assert_eq!(shared_point_label(Arc, Arc), PointLabel::Pc);
        assert_eq!(shared_point_label(Spiral, Spiral), PointLabel::Ss);
    }

    fn origin() -> Coordinate {
        Coordinate::new(0.0, 0.0)
    }

    fn line() -> HorizontalElement {
        HorizontalElement::Line(LineElement {
            start_station: 0.0,
            end_station: 100.0,
            start: origin(),
            end: origin(),
            direction: None,
        })
    }

    fn arc() -> HorizontalElement {
        HorizontalElement::Arc(ArcElement {
            start_station: 0.0,
            end_station: 100.0,
            start: origin(),
            end: origin(),
            radius: 500.0,
            length: 100.0,
            turn: TurnDirection::Clockwise,
            start_direction: None,
            pi_point: None,
            center_point: None,
        })
    }

    fn spiral(radius_in: f64, radius_out: f64) -> HorizontalElement {
        HorizontalElement::Spiral(SpiralElement {
            start_station: 0.0,
            end_station: 100.0,
            start: origin(),
            end: origin(),
            radius_in,
            radius_out,
            length: 100.0,
            turn: TurnDirection::Clockwise,
            spiral_type: SpiralType::Clothoid,
            start_direction: None,
            end_direction: None,
            spi_point: None,
        })
    }

    #[test]
    fn test_spiral_role_from_neighbors() {
        let elements = [line(), spiral(500.0, 0.0), arc()];
        assert_eq!(spiral_role(&elements, 1), Some(SpiralRole::Entry));
        let elements = [arc(), spiral(0.0, 500.0), line()];
        assert_eq!(spiral_role(&elements, 1), Some(SpiralRole::Exit));
        assert_eq!(spiral_role(&elements, 0), None);
    }

    #[test]
    fn test_spiral_role_without_arc_neighbor() {
        let elements = [line(), spiral(0.0, 500.0), line()];
        assert_eq!(spiral_role(&elements, 1), Some(SpiralRole::Entry));
        let elements = [line(), spiral(500.0, 0.0), line()];
        assert_eq!(spiral_role(&elements, 1), Some(SpiralRole::Exit));
        // Alone in the alignment.
        let elements = [spiral(0.0, 800.0)];
        assert_eq!(spiral_role(&elements, 0), Some(SpiralRole::Entry));
    }

    #[test]
    fn test_spiral_role_between_arcs() {
        // Compound transition: the sharper end is the curve end.
        let elements = [arc(), spiral(1000.0, 500.0), arc()];
        assert_eq!(spiral_role(&elements, 1), Some(SpiralRole::Entry));
        let elements = [arc(), spiral(500.0, 1000.0), arc()];
        assert_eq!(spiral_role(&elements, 1), Some(SpiralRole::Exit));
    }

    #[test]
    fn test_vertical_labels() {
        let tangent = || {
            VerticalElement::Tangent(VerticalTangent {
                start_station: 0.0,
                end_station: 100.0,
                start_elevation: 0.0,
                end_elevation: 1.0,
                grade: None,
            })
        };
        let curve = VerticalElement::Circular(VerticalCurve {
            start_station: 100.0,
            end_station: 300.0,
            start_elevation: 1.0,
            end_elevation: 1.0,
            grade_in: 0.01,
            grade_out: -0.01,
            pvi_station: None,
            pvi_elevation: None,
        });
        let labels = label_vertical(&[tangent(), curve, tangent()]);
        assert_eq!(labels[0].start, PointLabel::Pob);
        assert_eq!(labels[0].end, PointLabel::Pvi);
        assert_eq!(
            labels[1],
            VerticalLabels {
                start: PointLabel::Pvc,
                vertex: Some(PointLabel::Pvi),
                end: PointLabel::Pvt,
            }
        );
        assert_eq!(labels[2].start, PointLabel::Pvi);
        assert_eq!(labels[2].vertex, None);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(PointLabel::Pvc.to_string(), "PVC");
        assert_eq!(PointLabel::Spi.to_string(), "SPI");
    }
}
