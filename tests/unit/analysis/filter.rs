use super::*;
use crate::analysis::{MoveInfo, RootInfo};

const Y_SIZE: i32 = 19;

// 3x3 region in the top-left corner: columns A..C, rows 17..19.
fn region() -> RegionBounds {
    RegionBounds { x1: 0, y1: 0, x2: 2, y2: 2 }
}

fn info(mv: &str, pv: &[&str]) -> MoveInfo {
    MoveInfo {
        mv: mv.into(),
        pv: pv.iter().map(|m| (*m).into()).collect(),
        ..MoveInfo::default()
    }
}

fn response(move_infos: Vec<MoveInfo>, suggested: Option<&str>) -> AnalysisResponse {
    AnalysisResponse {
        id: "r1".into(),
        move_infos,
        root_info: Some(RootInfo {
            suggested_move: suggested.map(Into::into),
            ..RootInfo::default()
        }),
        ..AnalysisResponse::default()
    }
}

#[test]
fn out_of_region_moves_reports_every_offender() {
    let response = response(
        vec![
            info("A19", &["B18", "Q16"]),
            info("Q4", &["C17"]),
        ],
        Some("D15"),
    );

    let outside = out_of_region_moves(&response, &region(), Y_SIZE);
    assert_eq!(outside, vec!["Q16", "Q4", "D15"]);
}

#[test]
fn out_of_region_moves_is_empty_for_a_clean_response() {
    let response = response(vec![info("A19", &["B18", "pass", "C17"])], Some("B18"));
    assert!(out_of_region_moves(&response, &region(), Y_SIZE).is_empty());
}

#[test]
fn unparseable_moves_count_as_out_of_region() {
    let response = response(vec![info("ZZ99", &[])], None);
    assert_eq!(out_of_region_moves(&response, &region(), Y_SIZE), vec!["ZZ99"]);
}

#[test]
fn retain_drops_out_of_region_candidates() {
    let mut response = response(vec![info("A19", &[]), info("Q4", &[])], None);
    retain_region_moves(&mut response, &region(), Y_SIZE);
    assert_eq!(response.move_infos.len(), 1);
    assert_eq!(response.move_infos[0].mv, "A19");
}

#[test]
fn retain_truncates_pvs_at_the_first_offender() {
    let mut response = response(vec![info("A19", &["B18", "Q16", "C17"])], None);
    retain_region_moves(&mut response, &region(), Y_SIZE);
    let pv = &response.move_infos[0].pv;
    assert_eq!(pv.as_slice(), ["B18"]);
}

#[test]
fn retain_clears_an_out_of_region_root_suggestion() {
    {
        let mut response = response(vec![info("A19", &[])], Some("Q16"));
        retain_region_moves(&mut response, &region(), Y_SIZE);
        assert_eq!(response.root_info.unwrap().suggested_move, None);
    }

    let mut response = response(vec![info("A19", &[])], Some("B18"));
    retain_region_moves(&mut response, &region(), Y_SIZE);
    assert_eq!(
        response.root_info.unwrap().suggested_move.as_deref(),
        Some("B18")
    );
}

#[test]
fn pass_survives_region_filtering() {
    let mut response = response(vec![info("pass", &[])], None);
    retain_region_moves(&mut response, &region(), Y_SIZE);
    assert_eq!(response.move_infos.len(), 1);
}
