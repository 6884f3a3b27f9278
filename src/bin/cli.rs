use anyhow::{Context, Result};
use nfl_lines::odds_api::OddsApiClient;
use nfl_lines::refresh_lines;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("NFL Weekly Lines Tracker\n");
    println!("Fetching this week's spreads and totals...\n");

    // Get API key from environment
    let api_key = std::env::var("ODDS_API_KEY").expect("ODDS_API_KEY not set in .env file");
    let data_file = std::env::var("DATA_FILE").unwrap_or_else(|_| "data/lines.csv".to_string());
    let use_cache = std::env::var("USE_CACHE").unwrap_or_default() == "1";

    let client = OddsApiClient::new(api_key);

    let lines = refresh_lines(&client, &data_file, use_cache, chrono::Local::now())
        .await
        .context("Failed to refresh lines")?;

    if lines.is_empty() {
        println!("No games found in the current window.");
    } else {
        println!("Appended {} games to {}:\n", lines.len(), data_file);
        for (i, line) in lines.iter().enumerate() {
            println!("{}. {}", i + 1, line.format());
        }
    }

    // Check API usage
    println!();
    client.check_usage().await?;

    Ok(())
}
