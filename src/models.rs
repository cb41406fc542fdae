use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Season statistics for a starting goalie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalieStats {
    pub wins: u32,
    pub losses: u32,
    pub otl: u32,
    /// Always "{wins}-{losses}-{otl}"
    pub record: String,
    /// Goals-against average
    pub gaa: f64,
    /// Save percentage as a fraction (0.0–1.0)
    pub save_pct: f64,
    pub shutouts: u32,
}

impl GoalieStats {
    pub fn new(wins: u32, losses: u32, otl: u32, gaa: f64, save_pct: f64, shutouts: u32) -> Self {
        GoalieStats {
            wins,
            losses,
            otl,
            record: format!("{}-{}-{}", wins, losses, otl),
            gaa,
            save_pct,
            shutouts,
        }
    }
}

/// A (projected or confirmed) starting goalie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goalie {
    pub id: String,
    pub name: String,
    pub number: u32,
    pub confirmed: bool,
    /// Free text, e.g. "Confirmed", "Likely", "Unconfirmed"
    pub status: String,
    pub headshot: String,
    pub stats: GoalieStats,
}

/// One side (away or home) of a matchup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSide {
    pub team: String,
    pub team_abbrev: String,
    pub team_logo: String,
    pub goalie: Option<Goalie>,
}

/// A normalized game record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_id: String,
    pub game_date: String,
    pub game_time: String,
    pub venue: String,
    pub status: String,
    pub away: TeamSide,
    pub home: TeamSide,
}

impl Game {
    /// "AWAY @ HOME" using team abbreviations
    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away.team_abbrev, self.home.team_abbrev)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetType {
    #[serde(rename = "AWAY ML")]
    AwayMl,
    #[serde(rename = "UNDER")]
    Under,
    #[serde(rename = "OVER")]
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EdgeStrength {
    High,
    Medium,
}

/// A heuristic wager signal derived from the goalie matchup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BettingEdge {
    pub game: String,
    pub bet_type: BetType,
    pub edge: EdgeStrength,
    pub reason: String,
    /// 1–10
    pub confidence: u8,
}

/// The document written to disk on every successful run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDocument {
    pub timestamp: DateTime<Utc>,
    pub games: Vec<Game>,
    pub betting_edges: Vec<BettingEdge>,
}

impl OutputDocument {
    pub fn new(timestamp: DateTime<Utc>, games: Vec<Game>, betting_edges: Vec<BettingEdge>) -> Self {
        OutputDocument {
            timestamp,
            games,
            betting_edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_derived() {
        let stats = GoalieStats::new(21, 9, 4, 2.41, 0.917, 3);
        assert_eq!(stats.record, "21-9-4");
    }

    #[test]
    fn test_bet_type_wire_names() {
        assert_eq!(serde_json::to_value(BetType::AwayMl).unwrap(), "AWAY ML");
        assert_eq!(serde_json::to_value(BetType::Under).unwrap(), "UNDER");
        assert_eq!(serde_json::to_value(EdgeStrength::Medium).unwrap(), "MEDIUM");
    }

    #[test]
    fn test_camel_case_keys() {
        let stats = serde_json::to_value(GoalieStats::new(1, 2, 3, 2.5, 0.9, 0)).unwrap();
        assert!(stats.get("savePct").is_some());
        assert!(stats.get("save_pct").is_none());
    }

    #[test]
    fn test_document_key_order() {
        let doc = OutputDocument::new(Utc::now(), vec![], vec![]);
        let json = serde_json::to_string(&doc).unwrap();
        let ts = json.find("\"timestamp\"").unwrap();
        let games = json.find("\"games\"").unwrap();
        let edges = json.find("\"bettingEdges\"").unwrap();
        assert!(ts < games && games < edges);
    }
}
