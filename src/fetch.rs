//! GitHub GraphQL contributions fetch: the one networked edge. Bounded retry
//! with linear backoff; transient GraphQL failures retry, everything else
//! fails with context.

use std::time::Duration;

use anyhow::Context as _;
use chrono::{Datelike, SecondsFormat, Utc};

use crate::{
    calendar::{Calendar, Day},
    error::{EmberfarmError, EmberfarmResult},
};

const ENDPOINT: &str = "https://api.github.com/graphql";
const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(800);

const QUERY: &str = r#"
  query ($from: DateTime!, $to: DateTime!) {
    viewer {
      contributionsCollection(from: $from, to: $to) {
        contributionCalendar {
          weeks {
            contributionDays {
              date
              contributionCount
            }
          }
        }
      }
    }
  }
"#;

#[derive(Debug, serde::Deserialize)]
struct GraphqlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, serde::Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, serde::Deserialize)]
struct ResponseData {
    viewer: Viewer,
}

#[derive(Debug, serde::Deserialize)]
struct Viewer {
    #[serde(rename = "contributionsCollection")]
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, serde::Deserialize)]
struct ContributionsCollection {
    #[serde(rename = "contributionCalendar")]
    contribution_calendar: ContributionCalendar,
}

#[derive(Debug, serde::Deserialize)]
struct ContributionCalendar {
    weeks: Vec<ApiWeek>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiWeek {
    #[serde(rename = "contributionDays")]
    contribution_days: Vec<ApiDay>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiDay {
    date: String,
    #[serde(rename = "contributionCount")]
    contribution_count: u32,
}

fn is_transient(errors: &[GraphqlError]) -> bool {
    errors.iter().any(|err| {
        err.message
            .to_ascii_lowercase()
            .contains("something went wrong while executing your query")
    })
}

// Malformed dates become dateless days: they keep contributing to totals but
// the normalizer and streak scans skip them.
fn calendar_from_api(weeks: Vec<ApiWeek>) -> Calendar {
    Calendar::new(
        weeks
            .into_iter()
            .map(|week| {
                week.contribution_days
                    .into_iter()
                    .map(|day| Day {
                        date: day.date.parse().ok(),
                        count: day.contribution_count,
                    })
                    .collect()
            })
            .collect(),
    )
}

/// Fetch the viewer's contribution calendar for the current UTC year.
pub async fn fetch_contributions(
    client: &reqwest::Client,
    token: &str,
) -> EmberfarmResult<Calendar> {
    let now = Utc::now();
    let from = format!("{}-01-01T00:00:00Z", now.year());
    let to = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    let body = serde_json::json!({
        "query": QUERY,
        "variables": { "from": from, "to": to },
    });

    for attempt in 1..=MAX_RETRIES {
        let response = client
            .post(ENDPOINT)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .context("send contributions query")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if attempt < MAX_RETRIES {
                tracing::warn!(%status, attempt, "contributions query failed, retrying");
                tokio::time::sleep(RETRY_DELAY * attempt).await;
                continue;
            }
            return Err(EmberfarmError::fetch(format!(
                "GitHub API error {status}: {text}"
            )));
        }

        let payload: GraphqlResponse = response
            .json()
            .await
            .context("parse contributions response")?;

        if !payload.errors.is_empty() {
            let message = payload
                .errors
                .iter()
                .map(|err| err.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            if is_transient(&payload.errors) && attempt < MAX_RETRIES {
                tracing::warn!(attempt, "transient GraphQL error, retrying");
                tokio::time::sleep(RETRY_DELAY * attempt).await;
                continue;
            }
            return Err(EmberfarmError::fetch(format!(
                "GitHub GraphQL error: {message}"
            )));
        }

        let weeks = payload
            .data
            .map(|data| {
                data.viewer
                    .contributions_collection
                    .contribution_calendar
                    .weeks
            })
            .ok_or_else(|| {
                EmberfarmError::fetch("unexpected response shape from GitHub GraphQL API")
            })?;

        return Ok(calendar_from_api(weeks));
    }

    Err(EmberfarmError::fetch(
        "failed to fetch contributions after retries",
    ))
}

/// Synchronous wrapper for the CLI: spins up a runtime and blocks.
pub fn fetch_contributions_blocking(token: &str) -> EmberfarmResult<Calendar> {
    let runtime = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    let client = reqwest::Client::new();
    runtime.block_on(fetch_contributions(&client, token))
}
