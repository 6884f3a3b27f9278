use crate::models::{GameLine, OddsEvent};
use chrono::{DateTime, Utc};

const SPREADS_MARKET: &str = "spreads";
const TOTALS_MARKET: &str = "totals";
const OVER_OUTCOME: &str = "Over";

/// Flatten raw events into one line row per game, in input order.
///
/// Every bookmaker is visited; a spreads market carrying an outcome named
/// after the home team overwrites `spread` with that outcome's point, and a
/// totals market carrying an "Over" outcome overwrites `total` the same way.
/// The row therefore ends up holding the last book in API order, and a game
/// with no usable market keeps `None` in that column.
pub fn extract_lines(
    events: &[OddsEvent],
    week: u32,
    observed_at: DateTime<Utc>,
) -> Vec<GameLine> {
    events
        .iter()
        .map(|event| {
            let mut spread = None;
            let mut total = None;

            for bookmaker in &event.bookmakers {
                for market in &bookmaker.markets {
                    match market.key.as_str() {
                        SPREADS_MARKET => {
                            if let Some(outcome) = market
                                .outcomes
                                .iter()
                                .find(|o| o.name == event.home_team)
                            {
                                spread = outcome.point;
                            }
                        }
                        TOTALS_MARKET => {
                            if let Some(outcome) =
                                market.outcomes.iter().find(|o| o.name == OVER_OUTCOME)
                            {
                                total = outcome.point;
                            }
                        }
                        _ => {}
                    }
                }
            }

            GameLine {
                week,
                home_team: event.home_team.clone(),
                away_team: event.away_team.clone(),
                spread,
                total,
                observed_at,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bookmaker, Market, Outcome};
    use chrono::TimeZone;

    fn observed() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 8, 12, 0, 0).unwrap()
    }

    fn outcome(name: &str, point: Option<f64>) -> Outcome {
        Outcome {
            name: name.to_string(),
            point,
            price: Some(-110.0),
        }
    }

    fn book(markets: Vec<Market>) -> Bookmaker {
        Bookmaker {
            key: "book".to_string(),
            title: "Book".to_string(),
            markets,
        }
    }

    fn event(home: &str, away: &str, bookmakers: Vec<Bookmaker>) -> OddsEvent {
        OddsEvent {
            id: format!("{}-{}", home, away),
            commence_time: None,
            home_team: home.to_string(),
            away_team: away.to_string(),
            bookmakers,
        }
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(extract_lines(&[], 1, observed()).is_empty());
    }

    #[test]
    fn test_extracts_spread_and_total() {
        let events = vec![event(
            "A",
            "B",
            vec![book(vec![
                Market {
                    key: "spreads".to_string(),
                    outcomes: vec![outcome("A", Some(-3.5))],
                },
                Market {
                    key: "totals".to_string(),
                    outcomes: vec![outcome("Over", Some(44.5)), outcome("Under", Some(44.5))],
                },
            ])],
        )];

        let lines = extract_lines(&events, 2, observed());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].week, 2);
        assert_eq!(lines[0].home_team, "A");
        assert_eq!(lines[0].away_team, "B");
        assert_eq!(lines[0].spread, Some(-3.5));
        assert_eq!(lines[0].total, Some(44.5));
        assert_eq!(lines[0].observed_at, observed());
    }

    #[test]
    fn test_fields_extract_independently() {
        // Spreads market only lists the away side, so the spread stays empty
        // while the total still comes through
        let events = vec![event(
            "Chicago Bears",
            "Green Bay Packers",
            vec![book(vec![
                Market {
                    key: "spreads".to_string(),
                    outcomes: vec![outcome("Green Bay Packers", Some(3.5))],
                },
                Market {
                    key: "totals".to_string(),
                    outcomes: vec![outcome("Over", Some(41.0))],
                },
            ])],
        )];

        let lines = extract_lines(&events, 1, observed());
        assert_eq!(lines[0].spread, None);
        assert_eq!(lines[0].total, Some(41.0));
    }

    #[test]
    fn test_no_bookmakers_leaves_both_empty() {
        let lines = extract_lines(&[event("A", "B", vec![])], 1, observed());
        assert_eq!(lines[0].spread, None);
        assert_eq!(lines[0].total, None);
    }

    #[test]
    fn test_last_bookmaker_in_order_wins() {
        let events = vec![event(
            "A",
            "B",
            vec![
                book(vec![Market {
                    key: "spreads".to_string(),
                    outcomes: vec![outcome("A", Some(-3.0))],
                }]),
                book(vec![Market {
                    key: "spreads".to_string(),
                    outcomes: vec![outcome("A", Some(-2.5))],
                }]),
            ],
        )];

        let lines = extract_lines(&events, 1, observed());
        assert_eq!(lines[0].spread, Some(-2.5));
    }

    #[test]
    fn test_matched_outcome_without_point_overwrites_with_none() {
        // A later book that lists the home team but omits the point still
        // overwrites the earlier value
        let events = vec![event(
            "A",
            "B",
            vec![
                book(vec![Market {
                    key: "spreads".to_string(),
                    outcomes: vec![outcome("A", Some(-3.0))],
                }]),
                book(vec![Market {
                    key: "spreads".to_string(),
                    outcomes: vec![outcome("A", None)],
                }]),
            ],
        )];

        let lines = extract_lines(&events, 1, observed());
        assert_eq!(lines[0].spread, None);
    }

    #[test]
    fn test_output_preserves_input_order() {
        let events: Vec<OddsEvent> = [("A", "B"), ("C", "D"), ("E", "F"), ("G", "H")]
            .iter()
            .map(|(home, away)| event(home, away, vec![]))
            .collect();

        let lines = extract_lines(&events, 1, observed());
        assert_eq!(lines.len(), events.len());
        for (line, ev) in lines.iter().zip(&events) {
            assert_eq!(line.home_team, ev.home_team);
            assert_eq!(line.away_team, ev.away_team);
        }
    }

    #[test]
    fn test_unrelated_markets_are_ignored() {
        let events = vec![event(
            "A",
            "B",
            vec![book(vec![Market {
                key: "h2h".to_string(),
                outcomes: vec![outcome("A", Some(1.0))],
            }])],
        )];

        let lines = extract_lines(&events, 1, observed());
        assert_eq!(lines[0].spread, None);
        assert_eq!(lines[0].total, None);
    }
}
