use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An upcoming NFL game as returned by The Odds API, with whatever
/// bookmaker data the API attached to it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OddsEvent {
    pub id: String,
    pub commence_time: Option<DateTime<Utc>>,
    pub home_team: String,
    pub away_team: String,
    pub bookmakers: Vec<Bookmaker>,
}

/// Odds posted by a single sportsbook for one game
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Bookmaker {
    pub key: String,
    pub title: String,
    pub markets: Vec<Market>,
}

/// One market offered by a bookmaker ("spreads", "totals", ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Market {
    pub key: String,
    pub outcomes: Vec<Outcome>,
}

/// A single outcome within a market. `point` carries the spread or total
/// line, `price` the American odds; either can be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Outcome {
    pub name: String,
    pub point: Option<f64>,
    pub price: Option<f64>,
}

/// One flattened row per game: the home spread and the over/under,
/// tagged with the betting week they were observed in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLine {
    pub week: u32,
    pub home_team: String,
    pub away_team: String,
    pub spread: Option<f64>,
    pub total: Option<f64>,
    pub observed_at: DateTime<Utc>,
}

impl GameLine {
    pub fn format(&self) -> String {
        format!(
            "Week {} | {} @ {} | Spread: {} | O/U: {}",
            self.week,
            self.away_team,
            self.home_team,
            format_point(self.spread),
            format_point(self.total),
        )
    }
}

fn format_point(point: Option<f64>) -> String {
    match point {
        Some(p) => format!("{:+.1}", p),
        None => "n/a".to_string(),
    }
}
