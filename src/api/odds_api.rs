use crate::models::OddsEvent;
use crate::utils::betting_week::TimeWindow;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

const ODDS_API_BASE_URL: &str = "https://api.the-odds-api.com/v4";
const SPORT_KEY: &str = "americanfootball_nfl";
const REGIONS: &str = "us";
const MARKETS: &str = "totals,spreads";
const ODDS_FORMAT: &str = "american";

/// Errors surfaced by The Odds API that the caller has to act on. Any other
/// response code degrades to an empty event list instead.
#[derive(Debug, Error)]
pub enum OddsApiError {
    #[error("too many requests at once. wait a moment and retry")]
    RateLimited,
    #[error("odds api server error: {0}")]
    Upstream(String),
    #[error("odds api request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to parse odds api response: {0}")]
    Payload(#[from] serde_json::Error),
}

pub struct OddsApiClient {
    api_key: String,
    client: reqwest::Client,
}

impl OddsApiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Fetch NFL games commencing inside `window`, with spreads and totals
    /// from every US bookmaker the API covers.
    pub async fn fetch_events(&self, window: &TimeWindow) -> Result<Vec<OddsEvent>, OddsApiError> {
        let url = format!("{}/sports/{}/odds", ODDS_API_BASE_URL, SPORT_KEY);
        let from = window.from_param();
        let to = window.to_param();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("regions", REGIONS),
                ("markets", MARKETS),
                ("oddsFormat", ODDS_FORMAT),
                ("commenceTimeFrom", from.as_str()),
                ("commenceTimeTo", to.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        parse_response(status, &body)
    }

    /// Check how many API requests you have remaining
    pub async fn check_usage(&self) -> Result<(), OddsApiError> {
        let url = format!("{}/sports", ODDS_API_BASE_URL);

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        if let Some(remaining) = response.headers().get("x-requests-remaining") {
            println!("API requests remaining: {:?}", remaining);
        }

        if let Some(used) = response.headers().get("x-requests-used") {
            println!("API requests used: {:?}", used);
        }

        Ok(())
    }
}

/// Map the API's response codes onto outcomes: 200 parses the payload, 429
/// and 500 are hard errors, anything else means no data.
fn parse_response(status: StatusCode, body: &str) -> Result<Vec<OddsEvent>, OddsApiError> {
    match status {
        StatusCode::OK => {
            let payload: Value = serde_json::from_str(body)?;
            collect_events(payload)
        }
        StatusCode::TOO_MANY_REQUESTS => Err(OddsApiError::RateLimited),
        StatusCode::INTERNAL_SERVER_ERROR => Err(OddsApiError::Upstream(body.to_string())),
        _ => Ok(Vec::new()),
    }
}

/// The payload is normally a JSON array, but a keyed object works too;
/// either way its values are the matchups.
fn collect_events(payload: Value) -> Result<Vec<OddsEvent>, OddsApiError> {
    let values: Vec<Value> = match payload {
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        _ => Vec::new(),
    };

    values
        .into_iter()
        .map(|value| serde_json::from_value(value).map_err(OddsApiError::from))
        .collect()
}
