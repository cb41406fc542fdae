//! Maps heterogeneous upstream game records onto the canonical [`Game`] shape.
//!
//! Upstreams disagree on key names and nesting, so each canonical field is
//! resolved through an ordered alias list and then defaulted explicitly.
//! Failures are isolated per record: one malformed game is logged and
//! skipped, the rest of the batch goes through.

pub mod fields;
pub mod teams;

use chrono::NaiveDate;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Game, Goalie, GoalieStats, TeamSide};
use fields::{
    bool_field, f64_field, kind_of, parse_record, str_field, u32_field, value_as_string, Object,
};

/// Asset CDN used for team logos and player headshots.
pub const CDN_BASE: &str = "https://public-ds.static.dobbersports.com";

pub const DEFAULT_GAME_ID: &str = "unknown";
pub const DEFAULT_GAME_TIME: &str = "TBD";
pub const DEFAULT_VENUE: &str = "Unknown";
pub const DEFAULT_GAME_STATUS: &str = "Scheduled";
pub const DEFAULT_TEAM: &str = "Unknown";
pub const DEFAULT_TEAM_ABBREV: &str = "UNK";
pub const DEFAULT_GOALIE_NAME: &str = "TBD";

pub fn team_logo_url(team_id: &str) -> String {
    format!("{}/team-logo/dark/{}.png", CDN_BASE, team_id)
}

pub fn headshot_url(player_id: &str) -> String {
    format!("{}/player-headshot/{}.png", CDN_BASE, player_id)
}

/// Why a single raw game could not be normalized.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("game record is a {0}, expected an object")]
    NotAnObject(&'static str),
    #[error("{side} side under '{key}' is a {found}, expected an object")]
    MalformedSide {
        side: &'static str,
        key: &'static str,
        found: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Away,
    Home,
}

impl Side {
    fn label(self) -> &'static str {
        match self {
            Side::Away => "away",
            Side::Home => "home",
        }
    }

    /// Keys under which the side's own object may live.
    fn object_keys(self) -> &'static [&'static str] {
        match self {
            Side::Away => &["away", "awayTeam"],
            Side::Home => &["home", "homeTeam"],
        }
    }

    /// Flat game-level keys used by the scraped card shape.
    fn flat_team_key(self) -> &'static str {
        match self {
            Side::Away => "away_team",
            Side::Home => "home_team",
        }
    }

    fn flat_abbrev_key(self) -> &'static str {
        match self {
            Side::Away => "away_abbr",
            Side::Home => "home_abbr",
        }
    }
}

/// The goalie slot as upstreams deliver it: missing, one record, or a list
/// of candidates (first one is the projected starter).
#[derive(Debug, Clone, Copy)]
pub enum GoalieField<'a> {
    Absent,
    Record(&'a Object),
    Records(&'a [Value]),
    Unsupported(&'a Value),
}

impl<'a> GoalieField<'a> {
    pub fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => GoalieField::Absent,
            Some(Value::Object(map)) => GoalieField::Record(map),
            Some(Value::Array(items)) => GoalieField::Records(items),
            Some(other) => GoalieField::Unsupported(other),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, GoalieField::Absent)
    }

    /// The record to normalize, if this slot holds a usable one.
    pub fn record(self) -> Option<&'a Object> {
        match self {
            GoalieField::Record(map) => Some(map),
            GoalieField::Records(items) => items.first().and_then(Value::as_object),
            GoalieField::Absent | GoalieField::Unsupported(_) => None,
        }
    }
}

/// Stateless apart from the run date used when a game carries no date.
#[derive(Debug, Clone)]
pub struct Normalizer {
    run_date: String,
}

impl Normalizer {
    pub fn new(run_date: NaiveDate) -> Self {
        Normalizer {
            run_date: run_date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Normalize every record, skipping (and logging) the ones that fail.
    pub fn normalize_batch(&self, raw_games: &[Value]) -> Vec<Game> {
        let games: Vec<Game> = raw_games
            .iter()
            .enumerate()
            .filter_map(|(idx, raw)| match self.normalize_game(raw) {
                Ok(game) => Some(game),
                Err(e) => {
                    warn!("Skipping game #{}: {}", idx, e);
                    None
                }
            })
            .collect();
        debug!("Normalized {}/{} games", games.len(), raw_games.len());
        games
    }

    pub fn normalize_game(&self, raw: &Value) -> Result<Game, NormalizeError> {
        let game = raw
            .as_object()
            .ok_or_else(|| NormalizeError::NotAnObject(kind_of(raw)))?;

        // Resolve both sides before building anything so a malformed side
        // rejects the whole record.
        let away = self.normalize_side(game, Side::Away)?;
        let home = self.normalize_side(game, Side::Home)?;

        Ok(Game {
            game_id: str_field(game, &["gameId", "id"]).unwrap_or_else(|| DEFAULT_GAME_ID.into()),
            game_date: str_field(game, &["gameDate", "date"])
                .unwrap_or_else(|| self.run_date.clone()),
            game_time: str_field(game, &["gameTime", "game_time", "startTime"])
                .unwrap_or_else(|| DEFAULT_GAME_TIME.into()),
            venue: venue_name(game).unwrap_or_else(|| DEFAULT_VENUE.into()),
            status: str_field(game, &["status", "gameState"])
                .unwrap_or_else(|| DEFAULT_GAME_STATUS.into()),
            away,
            home,
        })
    }

    fn normalize_side(&self, game: &Object, side: Side) -> Result<TeamSide, NormalizeError> {
        let empty = Map::new();
        let side_obj = side_object(game, side)?.unwrap_or(&empty);

        let team_abbrev = str_field(side_obj, &["teamAbbrev", "abbrev", "abbreviation", "triCode"])
            .or_else(|| str_field(game, &[side.flat_abbrev_key()]));
        let team = str_field(side_obj, &["team", "name", "teamName", "commonName"])
            .or_else(|| str_field(game, &[side.flat_team_key()]))
            .or_else(|| {
                team_abbrev
                    .as_deref()
                    .and_then(teams::team_name)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| DEFAULT_TEAM.into());
        let team_id = str_field(side_obj, &["teamId", "id"]).unwrap_or_default();

        let slot = goalie_field(game, side_obj, side);
        if let GoalieField::Unsupported(value) = slot {
            debug!("Ignoring {} goalie value on {} side", kind_of(value), side.label());
        }
        let goalie = slot.record().map(normalize_goalie);

        Ok(TeamSide {
            team,
            team_abbrev: team_abbrev.unwrap_or_else(|| DEFAULT_TEAM_ABBREV.into()),
            team_logo: team_logo_url(&team_id),
            goalie,
        })
    }
}

fn side_object<'a>(game: &'a Object, side: Side) -> Result<Option<&'a Object>, NormalizeError> {
    for &key in side.object_keys() {
        match game.get(key) {
            None | Some(Value::Null) => continue,
            Some(Value::Object(map)) => return Ok(Some(map)),
            Some(other) => {
                return Err(NormalizeError::MalformedSide {
                    side: side.label(),
                    key,
                    found: kind_of(other),
                })
            }
        }
    }
    Ok(None)
}

/// Side-level `goalie`, then side-level `goalies`, then game-level
/// `goalies.<side>`; the first one present wins.
fn goalie_field<'a>(game: &'a Object, side_obj: &'a Object, side: Side) -> GoalieField<'a> {
    let candidates = [
        side_obj.get("goalie"),
        side_obj.get("goalies"),
        game.get("goalies")
            .and_then(Value::as_object)
            .and_then(|g| g.get(side.label())),
    ];
    candidates
        .into_iter()
        .map(GoalieField::from_value)
        .find(|f| !f.is_absent())
        .unwrap_or(GoalieField::Absent)
}

// Stats may sit in a nested `stats` object, directly on the goalie, or be
// split between the two; the nested object wins per field.
fn stat_u32(stats: &Object, record: &Object, keys: &[&str]) -> Option<u32> {
    u32_field(stats, keys).or_else(|| u32_field(record, keys))
}

fn stat_f64(stats: &Object, record: &Object, keys: &[&str]) -> Option<f64> {
    f64_field(stats, keys).or_else(|| f64_field(record, keys))
}

/// Venue as a plain string, or an object carrying `default` or `name`.
fn venue_name(game: &Object) -> Option<String> {
    match game.get("venue")? {
        Value::Object(venue) => str_field(venue, &["default", "name"]),
        other => value_as_string(other),
    }
}

fn normalize_goalie(record: &Object) -> Goalie {
    let stats = record
        .get("stats")
        .and_then(Value::as_object)
        .unwrap_or(record);

    let parsed_record = str_field(stats, &["record"])
        .or_else(|| str_field(record, &["record"]))
        .and_then(|r| parse_record(&r));
    let (rec_w, rec_l, rec_otl) = parsed_record.unwrap_or((0, 0, 0));

    let wins = stat_u32(stats, record, &["wins", "w"]).unwrap_or(rec_w);
    let losses = stat_u32(stats, record, &["losses", "l"]).unwrap_or(rec_l);
    let otl = stat_u32(stats, record, &["otl", "otLosses", "ot"]).unwrap_or(rec_otl);
    let gaa = stat_f64(stats, record, &["gaa", "goalsAgainstAverage"]).unwrap_or(0.0);
    let save_pct =
        stat_f64(stats, record, &["savePct", "sv_pct", "svPct", "savePctg"]).unwrap_or(0.0);
    let shutouts = stat_u32(stats, record, &["shutouts", "so"]).unwrap_or(0);

    let id = str_field(record, &["id", "playerId"]).unwrap_or_default();
    let name = str_field(record, &["name", "fullName", "goalieName"])
        .or_else(|| {
            let first = str_field(record, &["firstName"]);
            let last = str_field(record, &["lastName"]);
            match (first, last) {
                (Some(f), Some(l)) => Some(format!("{} {}", f, l)),
                (f, l) => f.or(l),
            }
        })
        .unwrap_or_else(|| DEFAULT_GOALIE_NAME.into());
    let confirmed = bool_field(record, &["confirmed", "isConfirmed"]).unwrap_or(false);
    let status = str_field(record, &["status"]).unwrap_or_else(|| {
        let label = if confirmed { "Confirmed" } else { "Unconfirmed" };
        label.to_string()
    });

    Goalie {
        headshot: headshot_url(&id),
        id,
        name,
        number: u32_field(record, &["number", "sweaterNumber", "jersey"]).unwrap_or(0),
        confirmed,
        status,
        stats: GoalieStats::new(wins, losses, otl, gaa, save_pct, shutouts),
    }
}
