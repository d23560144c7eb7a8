use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::run_types::RunType;

/// One provider row: a player's off-ball run counts for a single
/// (player, competition, team, position) grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRecord {
    pub player_id: Option<u64>,
    pub player_name: String,
    pub team_id: Option<u64>,
    pub team_name: String,
    pub competition_id: Option<u64>,
    pub competition_name: String,
    pub season_name: String,
    pub position: String,
    pub count_match: Option<u32>,
    pub minutes_played_per_match: f64,
    pub counts_per_match: [Option<f64>; RunType::COUNT],
}

impl AggregatedRecord {
    pub fn new(
        player_name: &str,
        team_name: &str,
        position: &str,
        minutes_played_per_match: f64,
    ) -> Self {
        Self {
            player_id: None,
            player_name: player_name.to_string(),
            team_id: None,
            team_name: team_name.to_string(),
            competition_id: None,
            competition_name: String::new(),
            season_name: String::new(),
            position: position.to_string(),
            count_match: None,
            minutes_played_per_match,
            counts_per_match: [None; RunType::COUNT],
        }
    }

    pub fn with_count(mut self, run_type: RunType, per_match: f64) -> Self {
        self.counts_per_match[run_type.index()] = Some(per_match);
        self
    }

    pub fn with_competition(mut self, competition_id: u64, competition_name: &str) -> Self {
        self.competition_id = Some(competition_id);
        self.competition_name = competition_name.to_string();
        self
    }

    pub fn count_per_match(&self, run_type: RunType) -> Option<f64> {
        self.counts_per_match[run_type.index()]
    }

    pub fn matches(&self, player_name: &str, team_name: &str, position: &str) -> bool {
        self.player_name == player_name && self.team_name == team_name && self.position == position
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRunRow {
    #[serde(default)]
    player_id: Option<u64>,
    #[serde(default)]
    player_name: Option<String>,
    #[serde(default)]
    team_id: Option<u64>,
    #[serde(default)]
    team_name: Option<String>,
    #[serde(default)]
    competition_id: Option<u64>,
    #[serde(default)]
    competition_name: Option<String>,
    #[serde(default)]
    season_name: Option<String>,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    count_match: Option<f64>,
    #[serde(default)]
    minutes_played_per_match: Option<f64>,
    #[serde(flatten)]
    columns: HashMap<String, Value>,
}

impl From<RawRunRow> for AggregatedRecord {
    fn from(raw: RawRunRow) -> Self {
        let mut counts_per_match = [None; RunType::COUNT];
        for run_type in RunType::ALL {
            counts_per_match[run_type.index()] = raw
                .columns
                .get(&run_type.per_match_column())
                .and_then(value_as_f64);
        }
        Self {
            player_id: raw.player_id,
            player_name: raw.player_name.unwrap_or_default(),
            team_id: raw.team_id,
            team_name: raw.team_name.unwrap_or_default(),
            competition_id: raw.competition_id,
            competition_name: raw.competition_name.unwrap_or_default(),
            season_name: raw.season_name.unwrap_or_default(),
            position: raw.position.unwrap_or_default(),
            count_match: raw
                .count_match
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.round() as u32),
            minutes_played_per_match: raw.minutes_played_per_match.unwrap_or(0.0),
            counts_per_match,
        }
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
