use super::*;

#[test]
fn loc_round_trips_coordinates() {
    let x_size = 19;
    for row in [0, 1, 7, 18] {
        for col in [0, 5, 18] {
            let loc = Loc::from_coords(row, col, x_size);
            assert_eq!(loc.row(x_size), row);
            assert_eq!(loc.col(x_size), col);
        }
    }
}

#[test]
fn loc_encoding_is_row_major() {
    assert_eq!(Loc::from_coords(0, 0, 19), Loc(0));
    assert_eq!(Loc::from_coords(0, 18, 19), Loc(18));
    assert_eq!(Loc::from_coords(1, 0, 19), Loc(19));
    assert_eq!(Loc::from_coords(3, 5, 19), Loc(62));
}

#[test]
fn vertex_parse_maps_corners() {
    // A19 is the top-left intersection of a 19x19 board.
    assert_eq!(Vertex::parse("A19", 19), Some(Vertex::Point { x: 0, y: 0 }));
    assert_eq!(Vertex::parse("T1", 19), Some(Vertex::Point { x: 18, y: 18 }));
}

#[test]
fn vertex_parse_skips_the_letter_i() {
    // H is column 7, J is column 8.
    assert_eq!(Vertex::parse("H3", 19), Some(Vertex::Point { x: 7, y: 16 }));
    assert_eq!(Vertex::parse("J3", 19), Some(Vertex::Point { x: 8, y: 16 }));
    assert_eq!(Vertex::parse("I3", 19), None);
}

#[test]
fn vertex_parse_is_case_insensitive_and_accepts_pass() {
    assert_eq!(Vertex::parse("pass", 19), Some(Vertex::Pass));
    assert_eq!(Vertex::parse("PASS", 19), Some(Vertex::Pass));
    assert_eq!(Vertex::parse("q4", 19), Vertex::parse("Q4", 19));
}

#[test]
fn vertex_parse_rejects_malformed_input() {
    assert_eq!(Vertex::parse("", 19), None);
    assert_eq!(Vertex::parse("Q", 19), None);
    assert_eq!(Vertex::parse("5Q", 19), None);
    assert_eq!(Vertex::parse("Q0", 19), None);
    assert_eq!(Vertex::parse("Q20", 19), None);
    assert_eq!(Vertex::parse("Q-1", 19), None);
}

#[test]
fn vertex_formats_back_to_gtp() {
    let vertex = Vertex::parse("Q4", 19).unwrap();
    assert_eq!(vertex.to_gtp(19).unwrap(), "Q4");
    assert_eq!(Vertex::Pass.to_gtp(19).unwrap(), "pass");
    assert_eq!(
        Vertex::Point { x: 0, y: 0 }.to_gtp(19).unwrap(),
        "A19"
    );
    assert!(Vertex::Point { x: 25, y: 0 }.to_gtp(19).is_none());
    assert!(Vertex::Point { x: -1, y: 0 }.to_gtp(19).is_none());
}
