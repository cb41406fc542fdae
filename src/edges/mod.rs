//! Goalie-matchup betting edges.
//!
//! Two independent checks run on every game where both starters are known:
//!
//!   * moneyline: strong away goalie vs weak home goalie
//!   * totals: the average save percentage of the two starters, high → UNDER,
//!     low → OVER
//!
//! All threshold comparisons are strict.
use tracing::debug;

use crate::models::{BetType, BettingEdge, EdgeStrength, Game};

pub const AWAY_ML_MIN_AWAY_SV: f64 = 0.920;
pub const AWAY_ML_MAX_HOME_SV: f64 = 0.900;
pub const UNDER_MIN_AVG_SV: f64 = 0.925;
pub const OVER_MAX_AVG_SV: f64 = 0.890;

pub const AWAY_ML_CONFIDENCE: u8 = 8;
pub const TOTALS_CONFIDENCE: u8 = 7;

/// Derive every edge for the given games, highest confidence first.
///
/// The sort is stable, so edges with equal confidence keep game order.
pub fn calculate_edges(games: &[Game]) -> Vec<BettingEdge> {
    let mut edges: Vec<BettingEdge> = games.iter().flat_map(edges_for_game).collect();
    edges.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    debug!("{} betting edge(s) across {} games", edges.len(), games.len());
    edges
}

/// Zero, one or two edges for a single game.
pub fn edges_for_game(game: &Game) -> Vec<BettingEdge> {
    let (away, home) = match (&game.away.goalie, &game.home.goalie) {
        (Some(a), Some(h)) => (a, h),
        _ => return Vec::new(),
    };

    let away_sv = away.stats.save_pct;
    let home_sv = home.stats.save_pct;
    let matchup = game.matchup();
    let mut edges = Vec::with_capacity(2);

    if away_sv > AWAY_ML_MIN_AWAY_SV && home_sv < AWAY_ML_MAX_HOME_SV {
        edges.push(BettingEdge {
            game: matchup.clone(),
            bet_type: BetType::AwayMl,
            edge: EdgeStrength::High,
            reason: format!(
                "{} ({:.3} SV%) has a significant edge over {} ({:.3} SV%)",
                away.name, away_sv, home.name, home_sv
            ),
            confidence: AWAY_ML_CONFIDENCE,
        });
    }

    let avg_sv = (away_sv + home_sv) / 2.0;
    let totals = if avg_sv > UNDER_MIN_AVG_SV {
        Some((BetType::Under, "Two elite goalies", "low-scoring game expected"))
    } else if avg_sv < OVER_MAX_AVG_SV {
        Some((BetType::Over, "Two struggling goalies", "high-scoring game expected"))
    } else {
        None
    };
    if let Some((bet_type, who, outlook)) = totals {
        edges.push(BettingEdge {
            game: matchup,
            bet_type,
            edge: EdgeStrength::Medium,
            reason: format!("{} (avg {:.3} SV%), {}", who, avg_sv, outlook),
            confidence: TOTALS_CONFIDENCE,
        });
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Goalie, GoalieStats, TeamSide};

    fn goalie(name: &str, save_pct: f64) -> Goalie {
        Goalie {
            id: String::new(),
            name: name.into(),
            number: 0,
            confirmed: true,
            status: "Confirmed".into(),
            headshot: String::new(),
            stats: GoalieStats::new(0, 0, 0, 0.0, save_pct, 0),
        }
    }

    fn side(abbrev: &str, goalie: Option<Goalie>) -> TeamSide {
        TeamSide {
            team: abbrev.into(),
            team_abbrev: abbrev.into(),
            team_logo: String::new(),
            goalie,
        }
    }

    fn game(id: &str, away_sv: Option<f64>, home_sv: Option<f64>) -> Game {
        Game {
            game_id: id.into(),
            game_date: "2025-01-14".into(),
            game_time: "TBD".into(),
            venue: "Unknown".into(),
            status: "Scheduled".into(),
            away: side("NYR", away_sv.map(|sv| goalie("Igor Shesterkin", sv))),
            home: side("PHI", home_sv.map(|sv| goalie("Samuel Ersson", sv))),
        }
    }

    fn kinds(edges: &[BettingEdge]) -> Vec<(BetType, EdgeStrength, u8)> {
        edges.iter().map(|e| (e.bet_type, e.edge, e.confidence)).collect()
    }

    #[test]
    fn test_away_ml_only() {
        // avg 0.905 sits between the totals thresholds
        let edges = edges_for_game(&game("1", Some(0.930), Some(0.880)));
        assert_eq!(kinds(&edges), vec![(BetType::AwayMl, EdgeStrength::High, 8)]);
        assert_eq!(edges[0].game, "NYR @ PHI");
        assert_eq!(
            edges[0].reason,
            "Igor Shesterkin (0.930 SV%) has a significant edge over Samuel Ersson (0.880 SV%)"
        );
    }

    #[test]
    fn test_under_without_ml() {
        let edges = edges_for_game(&game("1", Some(0.930), Some(0.925)));
        assert_eq!(kinds(&edges), vec![(BetType::Under, EdgeStrength::Medium, 7)]);
        assert!(edges[0].reason.contains("0.927") || edges[0].reason.contains("0.928"));
    }

    #[test]
    fn test_ml_and_over_together() {
        let edges = edges_for_game(&game("1", Some(0.925), Some(0.800)));
        assert_eq!(
            kinds(&edges),
            vec![
                (BetType::AwayMl, EdgeStrength::High, 8),
                (BetType::Over, EdgeStrength::Medium, 7)
            ]
        );
    }

    #[test]
    fn test_over_for_weak_pair() {
        let edges = edges_for_game(&game("1", Some(0.880), Some(0.885)));
        assert_eq!(kinds(&edges), vec![(BetType::Over, EdgeStrength::Medium, 7)]);
        assert!(edges[0].reason.contains("avg 0.882") || edges[0].reason.contains("avg 0.883"));
    }

    #[test]
    fn test_boundaries_are_strict() {
        // avg exactly at each threshold
        assert!(edges_for_game(&game("1", Some(0.890), Some(0.890))).is_empty());
        assert!(edges_for_game(&game("1", Some(0.925), Some(0.925))).is_empty());
        // away exactly 0.920 does not qualify for the moneyline
        let edges = edges_for_game(&game("1", Some(0.920), Some(0.850)));
        assert_eq!(kinds(&edges), vec![(BetType::Over, EdgeStrength::Medium, 7)]);
        // home exactly 0.900 does not qualify either
        assert!(edges_for_game(&game("1", Some(0.921), Some(0.900))).is_empty());
    }

    #[test]
    fn test_missing_goalie_skips_game() {
        assert!(edges_for_game(&game("1", Some(0.950), None)).is_empty());
        assert!(edges_for_game(&game("1", None, Some(0.850))).is_empty());
    }

    #[test]
    fn test_default_zero_save_pct_reads_as_over() {
        let edges = edges_for_game(&game("1", Some(0.0), Some(0.0)));
        assert_eq!(kinds(&edges), vec![(BetType::Over, EdgeStrength::Medium, 7)]);
    }

    #[test]
    fn test_sorted_by_confidence_stable() {
        let games = vec![
            game("under", Some(0.930), Some(0.930)),
            game("over", Some(0.880), Some(0.880)),
            game("ml", Some(0.930), Some(0.880)),
            game("none", None, None),
        ];
        let edges = calculate_edges(&games);
        assert_eq!(
            edges.iter().map(|e| e.bet_type).collect::<Vec<_>>(),
            vec![BetType::AwayMl, BetType::Under, BetType::Over]
        );
        assert!(edges.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    }
}
