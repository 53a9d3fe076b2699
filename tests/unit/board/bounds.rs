use super::*;

#[test]
fn contains_includes_all_four_corners() {
    let bounds = AnalysisBounds::new(2, 3, 5, 8);
    assert!(bounds.contains(2, 3));
    assert!(bounds.contains(5, 8));
    assert!(bounds.contains(2, 8));
    assert!(bounds.contains(5, 3));
}

#[test]
fn contains_includes_interior_points() {
    let bounds = AnalysisBounds::new(2, 3, 5, 8);
    assert!(bounds.contains(3, 5));
    assert!(bounds.contains(4, 7));
}

#[test]
fn contains_rejects_one_past_each_edge() {
    let bounds = AnalysisBounds::new(2, 3, 5, 8);
    assert!(!bounds.contains(1, 3));
    assert!(!bounds.contains(2, 2));
    assert!(!bounds.contains(6, 8));
    assert!(!bounds.contains(5, 9));
}

#[test]
fn contains_accepts_any_integer_input() {
    let bounds = AnalysisBounds::new(2, 3, 5, 8);
    assert!(!bounds.contains(-4, 5));
    assert!(!bounds.contains(3, -1));
    assert!(!bounds.contains(i32::MAX, i32::MIN));
}

#[test]
fn contains_loc_decodes_row_major() {
    let bounds = AnalysisBounds::new(2, 3, 5, 8);
    let x_size = 19;

    // 3 * 19 + 5 = 62, an interior point.
    assert_eq!(Loc::from_coords(3, 5, x_size), Loc(62));
    assert!(bounds.contains_loc(Loc::from_coords(3, 5, x_size), x_size));
    assert!(!bounds.contains_loc(Loc::from_coords(1, 3, x_size), x_size));
    assert!(bounds.contains_loc(Loc::from_coords(2, 3, x_size), x_size));
    assert!(bounds.contains_loc(Loc::from_coords(5, 8, x_size), x_size));
}

#[test]
fn contains_loc_agrees_with_coordinate_form() {
    let bounds = AnalysisBounds::new(2, 3, 5, 8);
    let x_size = 19;
    for row in 0..8 {
        for col in 0..x_size {
            assert_eq!(
                bounds.contains_loc(Loc::from_coords(row, col, x_size), x_size),
                bounds.contains(row, col),
                "disagreement at ({}, {})",
                row,
                col,
            );
        }
    }
}

#[test]
fn contains_loc_never_faults_on_nonsense() {
    let bounds = AnalysisBounds::new(2, 3, 5, 8);
    assert!(!bounds.contains_loc(Loc(-1), 19));
    assert!(!bounds.contains_loc(Loc(62), 0));
    assert!(!bounds.contains_loc(Loc(62), -19));
}

#[test]
fn inverted_region_contains_nothing() {
    let bounds = AnalysisBounds::new(5, 8, 2, 3);
    assert!(!bounds.contains(5, 8));
    assert!(!bounds.contains(2, 3));
    assert!(!bounds.contains(3, 5));
}

#[test]
fn single_point_region_contains_exactly_itself() {
    let bounds = AnalysisBounds::new(4, 4, 4, 4);
    assert!(bounds.contains(4, 4));
    assert!(!bounds.contains(4, 5));
    assert!(!bounds.contains(3, 4));
}
