use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::http_client::http_client;
use crate::records::{AggregatedRecord, RawRunRow};
use crate::run_types::request_run_types;

pub const GROUP_BY: &str = "player,competition,team,position";
const OFF_BALL_RUNS_PATH: &str = "/api/in_possession/off_ball_runs/";
const MAX_PAGES: usize = 500;

/// Filter for one competition's aggregated off-ball runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffBallRunQuery {
    pub season_id: u32,
    pub competition_id: u32,
    pub min_minutes: u32,
    pub min_matches: u32,
}

impl OffBallRunQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("season", self.season_id.to_string()),
            ("competition", self.competition_id.to_string()),
            ("playing_time__gte", self.min_minutes.to_string()),
            ("count_match__gte", self.min_matches.to_string()),
            ("run_type", request_run_types()),
            ("group_by", GROUP_BY.to_string()),
        ]
    }
}

/// Source of aggregated off-ball run rows.
pub trait StatsProvider {
    fn off_ball_runs(&self, query: &OffBallRunQuery) -> Result<Vec<AggregatedRecord>>;
}

impl<P: StatsProvider + ?Sized> StatsProvider for &P {
    fn off_ball_runs(&self, query: &OffBallRunQuery) -> Result<Vec<AggregatedRecord>> {
        (**self).off_ball_runs(query)
    }
}

#[derive(Debug, Clone, Default)]
pub struct OffBallRunsPage {
    pub rows: Vec<AggregatedRecord>,
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OffBallRunsResponse {
    Paged {
        results: Vec<RawRunRow>,
        #[serde(default)]
        next: Option<String>,
    },
    Rows(Vec<RawRunRow>),
}

pub fn parse_off_ball_runs_json(raw: &str) -> Result<OffBallRunsPage> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(OffBallRunsPage::default());
    }

    let parsed: OffBallRunsResponse =
        serde_json::from_str(trimmed).context("invalid off-ball runs json")?;
    let (rows, next) = match parsed {
        OffBallRunsResponse::Paged { results, next } => (results, next),
        OffBallRunsResponse::Rows(rows) => (rows, None),
    };
    Ok(OffBallRunsPage {
        rows: rows.into_iter().map(AggregatedRecord::from).collect(),
        next: next.filter(|n| !n.trim().is_empty()),
    })
}

/// SkillCorner API client. Credentials are held for the lifetime of the client
/// and sent as basic auth on every request.
pub struct SkillcornerClient {
    client: &'static Client,
    base_url: String,
    username: String,
    password: String,
    page_limit: u32,
}

impl SkillcornerClient {
    pub fn new(cfg: &ProviderConfig) -> Result<Self> {
        let (username, password) = cfg.credentials()?;
        Ok(Self {
            client: http_client()?,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
            page_limit: cfg.page_limit,
        })
    }

    fn get_page(&self, url: &str, params: &[(&str, String)]) -> Result<OffBallRunsPage> {
        debug!(url, "requesting off-ball runs page");
        let resp = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .query(params)
            .send()
            .context("request failed")?;
        let status = resp.status();
        let body = resp.text().context("failed reading body")?;
        if !status.is_success() {
            return Err(anyhow!("http {}: {}", status, body));
        }
        parse_off_ball_runs_json(&body)
    }
}

impl StatsProvider for SkillcornerClient {
    fn off_ball_runs(&self, query: &OffBallRunQuery) -> Result<Vec<AggregatedRecord>> {
        let url = format!("{}{}", self.base_url, OFF_BALL_RUNS_PATH);
        let mut params = query.params();
        params.push(("limit", self.page_limit.to_string()));

        let first = self
            .get_page(&url, &params)
            .with_context(|| format!("off-ball runs for competition {}", query.competition_id))?;
        // `next` links already carry the full query string.
        let rows = follow_pages(first, MAX_PAGES, |next_url| self.get_page(next_url, &[]))
            .with_context(|| format!("off-ball runs for competition {}", query.competition_id))?;
        Ok(rows)
    }
}

/// Concatenate `first` with every page reached through `next` links.
///
/// Fails when a page links to itself or more than `max_pages` pages would be read.
pub fn follow_pages<F>(
    first: OffBallRunsPage,
    max_pages: usize,
    mut fetch: F,
) -> Result<Vec<AggregatedRecord>>
where
    F: FnMut(&str) -> Result<OffBallRunsPage>,
{
    let mut rows = first.rows;
    let mut next = first.next;
    let mut pages = 1usize;

    while let Some(next_url) = next.take() {
        if pages >= max_pages {
            return Err(anyhow!("pagination exceeded {max_pages} pages"));
        }
        let page = fetch(&next_url).with_context(|| format!("off-ball runs page {}", pages + 1))?;
        if page.next.as_deref() == Some(next_url.as_str()) {
            return Err(anyhow!("pagination loop at {next_url}"));
        }
        rows.extend(page.rows);
        next = page.next;
        pages += 1;
    }

    debug!(pages, rows = rows.len(), "off-ball runs fetched");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_carry_filters_and_grouping() {
        let query = OffBallRunQuery {
            season_id: 28,
            competition_id: 1,
            min_minutes: 60,
            min_matches: 5,
        };
        let params = query.params();
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };
        assert_eq!(get("season"), "28");
        assert_eq!(get("competition"), "1");
        assert_eq!(get("playing_time__gte"), "60");
        assert_eq!(get("count_match__gte"), "5");
        assert_eq!(get("group_by"), "player,competition,team,position");
        assert_eq!(get("run_type").split(',').count(), 10);
    }

    #[test]
    fn blank_next_link_ends_pagination() {
        let page = parse_off_ball_runs_json(r#"{"results":[],"next":""}"#).unwrap();
        assert!(page.rows.is_empty());
        assert!(page.next.is_none());
    }
}
