use crate::models::{GameLine, OddsEvent};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;

const CSV_HEADER: [&str; 6] = [
    "week",
    "home_team",
    "away_team",
    "spread",
    "total",
    "observed_at",
];

/// Append one CSV row per line record, creating the file (and its header)
/// on first use. Rows go out in the order given; an absent spread or total
/// becomes an empty cell.
pub fn append_lines_to_csv(lines: &[GameLine], data_file: &str) -> Result<()> {
    let path = Path::new(data_file);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).context("Failed to create data directory")?;
        }
    }

    let is_new = !path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("Failed to open data file")?;

    let mut writer = csv::Writer::from_writer(file);

    if is_new {
        writer
            .write_record(CSV_HEADER)
            .context("Failed to write CSV header")?;
    }

    for line in lines {
        writer
            .write_record([
                line.week.to_string(),
                line.home_team.clone(),
                line.away_team.clone(),
                line.spread.map(|p| p.to_string()).unwrap_or_default(),
                line.total.map(|p| p.to_string()).unwrap_or_default(),
                line.observed_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            ])
            .context("Failed to write CSV row")?;
    }

    writer.flush().context("Failed to flush data file")?;
    Ok(())
}

/// Save a raw odds payload to a JSON cache file
pub fn save_odds_to_cache(events: &[OddsEvent], odds_cache_file: &str) -> Result<()> {
    if let Some(parent) = Path::new(odds_cache_file).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).context("Failed to create cache directory")?;
        }
    }
    let json = serde_json::to_string_pretty(events).context("Failed to serialize odds data")?;
    std::fs::write(odds_cache_file, json).context("Failed to write cache file")?;
    Ok(())
}

/// Load a raw odds payload from a JSON cache file
pub fn load_odds_from_cache(odds_cache_file: &str) -> Result<Vec<OddsEvent>> {
    let json = std::fs::read_to_string(odds_cache_file).context("Failed to read cache file")?;
    let events: Vec<OddsEvent> =
        serde_json::from_str(&json).context("Failed to deserialize odds data")?;
    Ok(events)
}
