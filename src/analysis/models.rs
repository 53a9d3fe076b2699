//! Wire model for the engine's analysis protocol.
//!
//! One JSON object per line in each direction; field names are camelCase on
//! the wire. Engine versions differ in which response fields they emit, so
//! everything deserializes with defaults and unknown fields are ignored.

use crate::board::RegionBounds;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisRequest {
    pub id: CompactString,
    /// `(player, vertex)` pairs, e.g. `("B", "Q4")`, in play order.
    pub moves: Vec<(CompactString, CompactString)>,
    pub initial_stones: Vec<(CompactString, CompactString)>,
    pub rules: CompactString,
    pub komi: f64,
    pub board_x_size: i32,
    pub board_y_size: i32,
    pub include_policy: bool,
    pub include_ownership: bool,
    pub priority: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_visits: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_bounds: Option<RegionBounds>,
    /// Multitenancy tags, passed through to the engine untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<CompactString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<CompactString>,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            id: CompactString::default(),
            moves: Vec::new(),
            initial_stones: Vec::new(),
            rules: CompactString::const_new("Chinese"),
            komi: 7.5,
            board_x_size: 19,
            board_y_size: 19,
            include_policy: false,
            include_ownership: false,
            priority: 0,
            max_visits: None,
            region_bounds: None,
            game_id: None,
            user_id: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoveInfo {
    #[serde(rename = "move")]
    pub mv: CompactString,
    pub visits: i64,
    pub winrate: f64,
    pub score_lead: f64,
    pub score_selfplay: f64,
    pub utility: f64,
    pub prior: f64,
    pub order: i32,
    pub pv: Vec<CompactString>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RootInfo {
    pub winrate: f64,
    pub score_lead: f64,
    pub visits: i64,
    pub utility: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_player: Option<CompactString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_move: Option<CompactString>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResponse {
    pub id: CompactString,
    pub move_infos: Vec<MoveInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_info: Option<RootInfo>,
    pub is_during_search: bool,
    pub turn_number: i32,
    /// An error response carries only `id` and `error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResponse {
    pub fn error(id: impl Into<CompactString>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            error: Some(message.into()),
            ..Self::default()
        }
    }
}
