use super::*;

#[test]
fn validate_accepts_regions_inside_the_board() {
    let region = RegionBounds { x1: 0, y1: 0, x2: 2, y2: 2 };
    assert_eq!(region.validate(19, 19), Ok(()));

    let full = RegionBounds { x1: 0, y1: 0, x2: 18, y2: 18 };
    assert_eq!(full.validate(19, 19), Ok(()));
}

#[test]
fn validate_rejects_inverted_axes_with_the_wire_message() {
    let region = RegionBounds { x1: 5, y1: 5, x2: 2, y2: 2 };
    let err = region.validate(19, 19).unwrap_err();
    assert_eq!(err, RegionError::XInverted);
    assert_eq!(err.to_string(), "x1 must be <= x2");

    let region = RegionBounds { x1: 2, y1: 5, x2: 2, y2: 2 };
    let err = region.validate(19, 19).unwrap_err();
    assert_eq!(err, RegionError::YInverted);
    assert_eq!(err.to_string(), "y1 must be <= y2");
}

#[test]
fn validate_rejects_out_of_board_corners() {
    let region = RegionBounds { x1: 0, y1: 0, x2: 19, y2: 2 };
    assert!(matches!(
        region.validate(19, 19),
        Err(RegionError::OutOfBoard { .. })
    ));

    let region = RegionBounds { x1: -1, y1: 0, x2: 2, y2: 2 };
    assert!(matches!(
        region.validate(19, 19),
        Err(RegionError::OutOfBoard { .. })
    ));

    // The same rectangle is fine on a bigger board.
    let region = RegionBounds { x1: 10, y1: 10, x2: 20, y2: 20 };
    assert!(region.validate(19, 19).is_err());
    assert_eq!(region.validate(25, 25), Ok(()));
}

#[test]
fn to_bounds_maps_y_to_rows_and_x_to_cols() {
    let region = RegionBounds { x1: 3, y1: 2, x2: 8, y2: 5 };
    let bounds = region.to_bounds();
    assert_eq!(bounds, AnalysisBounds::new(2, 3, 5, 8));
    assert!(bounds.contains(2, 3));
    assert!(!bounds.contains(2, 2));
}

#[test]
fn contains_vertex_checks_points_and_always_allows_pass() {
    let region = RegionBounds { x1: 0, y1: 0, x2: 2, y2: 2 };
    assert!(region.contains_vertex(Vertex::Pass));
    assert!(region.contains_vertex(Vertex::Point { x: 0, y: 0 }));
    assert!(region.contains_vertex(Vertex::Point { x: 2, y: 2 }));
    assert!(!region.contains_vertex(Vertex::Point { x: 3, y: 2 }));
    assert!(!region.contains_vertex(Vertex::Point { x: 2, y: 3 }));
}

#[test]
fn region_round_trips_through_json() {
    let region: RegionBounds =
        serde_json::from_str(r#"{"x1": 0, "y1": 0, "x2": 5, "y2": 5}"#).unwrap();
    assert_eq!(region, RegionBounds { x1: 0, y1: 0, x2: 5, y2: 5 });
    let value = serde_json::to_value(region).unwrap();
    assert_eq!(value["x2"], 5);
}
