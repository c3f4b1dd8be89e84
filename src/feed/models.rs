use serde::{Deserialize, Serialize};

/// One complete data aggregate as served by the IPL data endpoint.
///
/// A snapshot is replaced wholesale on every successful fetch; nothing in the
/// application mutates one after it has been stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// The currently notable match. The shape of this record varies with the
    /// upstream feed and nothing in the core inspects it, so it stays opaque
    /// and is passed straight through to the dashboard.
    #[serde(default)]
    pub featured_match: Option<serde_json::Value>,
    #[serde(default)]
    pub points_table: Vec<StandingsEntry>,
    #[serde(default)]
    pub schedule: Vec<ScheduleDay>,
    #[serde(default)]
    pub match_notes: Vec<MatchNote>,
}

/// A timestamped commentary event for the featured match ("FOUR!", "WICKET!",
/// end-of-over summaries, ...). The identity fields are what the novelty
/// detector fingerprints; the display fields are what notifications render.
///
/// The upstream feed serves every field as a string and omits fields freely,
/// so everything defaults to empty rather than failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchNote {
    #[serde(rename = "MatchID", default)]
    pub match_id: String,
    #[serde(rename = "InningsNo", default)]
    pub innings_no: String,
    #[serde(rename = "OverNo", default)]
    pub over_no: String,
    #[serde(rename = "BallNo", default)]
    pub ball_no: String,
    #[serde(rename = "TeamID", default)]
    pub team_id: String,
    #[serde(rename = "TeamCode", default)]
    pub team_code: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Date", default)]
    pub date: String,
}

/// One row of the tournament points table, as served by the feed (numeric
/// fields arrive as strings and are displayed verbatim).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandingsEntry {
    #[serde(rename = "OrderNo", default)]
    pub order_no: String,
    #[serde(rename = "TeamID", default)]
    pub team_id: String,
    #[serde(rename = "TeamCode", default)]
    pub team_code: String,
    #[serde(rename = "TeamName", default)]
    pub team_name: String,
    #[serde(rename = "Matches", default)]
    pub matches: String,
    #[serde(rename = "Wins", default)]
    pub wins: String,
    #[serde(rename = "Loss", default)]
    pub loss: String,
    #[serde(rename = "NoResult", default)]
    pub no_result: String,
    #[serde(rename = "Points", default)]
    pub points: String,
    #[serde(rename = "NetRunRate", default)]
    pub net_run_rate: String,
    /// Recent form, e.g. "W,W,L,W"
    #[serde(rename = "Performance", default)]
    pub performance: String,
}

/// All matches scheduled on one calendar date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleDay {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub matches: Vec<ScheduleMatch>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMatch {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub venue: String,
    /// e.g. "Post", "In Progress", "Upcoming"
    #[serde(default)]
    pub match_status: String,
    #[serde(default)]
    pub match_name: String,
    #[serde(default)]
    pub team1_code: String,
    #[serde(default)]
    pub team2_code: String,
}
