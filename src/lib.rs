pub mod api;
pub mod models;
pub mod utils;

pub use api::*;
pub use models::*;
pub use utils::*;

use anyhow::{Context, Result};
use api::odds_api::OddsApiClient;
use chrono::{DateTime, TimeZone, Utc};
use models::GameLine;
use std::path::Path;
use utils::betting_week::{query_window, week_number, WeekAnchors};
use utils::data::{append_lines_to_csv, load_odds_from_cache, save_odds_to_cache};
use utils::lines::extract_lines;

const ODDS_CACHE_FILE: &str = "cache/odds_cache.json";

/// One refresh pass: compute the current query window, pull this week's NFL
/// games (or reuse the cached payload), flatten them, and append one row per
/// game to the data file. Returns the appended rows for display.
pub async fn refresh_lines<Tz: TimeZone>(
    client: &OddsApiClient,
    data_file: &str,
    use_cache: bool,
    now: DateTime<Tz>,
) -> Result<Vec<GameLine>> {
    let anchors = WeekAnchors::default();

    let window = query_window(&now, &anchors);
    tracing::info!(
        "Querying odds from {} to {}",
        window.from_param(),
        window.to_param()
    );

    let events = if use_cache && Path::new(ODDS_CACHE_FILE).exists() {
        tracing::info!("Loading odds from cache file: {}", ODDS_CACHE_FILE);
        load_odds_from_cache(ODDS_CACHE_FILE)?
    } else {
        let events = client.fetch_events(&window).await?;
        save_odds_to_cache(&events, ODDS_CACHE_FILE)?;
        events
    };

    let week = week_number(&now, &anchors);
    let lines = extract_lines(&events, week, now.with_timezone(&Utc));
    tracing::info!("Flattened {} games for week {}", lines.len(), week);

    append_lines_to_csv(&lines, data_file).context("Failed to append rows to data file")?;

    Ok(lines)
}
