use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use log::debug;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Deserialize;

use crate::config::Config;
use crate::error::RetrievalError;
use crate::period::ReportPeriod;
use crate::time_entry::{parse_day, TimeEntry};

/// Toggl Reports API `details`のレスポンスをデシリアライズするための構造体。
#[derive(Debug, Deserialize)]
struct TogglDetailsPage {
    data: Vec<TogglDetailEntry>,
}

/// `details`に含まれる1件分のタイムエントリー。
#[derive(Debug, Deserialize)]
struct TogglDetailEntry {
    client: Option<String>,
    project: Option<String>,
    start: Option<String>,
    dur: Option<i64>,
    description: Option<String>,
}

impl TogglDetailEntry {
    /// 必須項目を検証して`TimeEntry`に変換する。
    fn into_time_entry(self, page: u32) -> Result<TimeEntry, RetrievalError> {
        let malformed = |reason: String| RetrievalError::MalformedEntry { page, reason };

        let start = self
            .start
            .ok_or_else(|| malformed("missing field `start`".to_string()))?;
        let day = parse_day(&start)
            .ok_or_else(|| malformed(format!("unrecognized start timestamp {:?}", start)))?;
        let duration_ms = self
            .dur
            .ok_or_else(|| malformed("missing field `dur`".to_string()))?;

        Ok(TimeEntry {
            client: self.client.unwrap_or_default(),
            project: self.project.unwrap_or_default(),
            day,
            duration_ms,
            description: self.description.unwrap_or_default(),
        })
    }
}

/// タイムエントリーをページ単位で取得するためのリポジトリ。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TogglRepository {
    /// 指定された期間のタイムエントリーを1ページ分取得する。
    ///
    /// ページの範囲を超えた場合は空のリストを返す。
    ///
    /// # Arguments
    ///
    /// * `period` - 取得するタイムエントリーの期間
    /// * `page` - 1から始まるページ番号
    async fn read_page(
        &self,
        period: &ReportPeriod,
        page: u32,
    ) -> Result<Vec<TimeEntry>, RetrievalError>;
}

/// Toggl Reports APIと通信するためのクライアント。
///
/// # Examples
///
/// ```
/// let config = Config::from_env().unwrap();
/// let client = TogglClient::new(&config);
/// let time_entries = client.read_page(&period, 1).await.unwrap();
/// ```
pub struct TogglClient {
    client: Client,
    api_url: String,
    api_token: String,
    workspace_id: String,
    user_agent: String,
}

impl TogglClient {
    /// 新しい`TogglClient`を返す。
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
            workspace_id: config.workspace_id.clone(),
            user_agent: config.user_agent(),
        }
    }
}

#[async_trait]
impl TogglRepository for TogglClient {
    async fn read_page(
        &self,
        period: &ReportPeriod,
        page: u32,
    ) -> Result<Vec<TimeEntry>, RetrievalError> {
        let response = self
            .client
            .get(format!("{}/details", self.api_url))
            .basic_auth(&self.api_token, Some("api_token"))
            .header(CONTENT_TYPE, "application/json")
            .query(&[
                ("user_agent", self.user_agent.clone()),
                ("workspace_id", self.workspace_id.clone()),
                ("since", period.since().to_string()),
                ("until", period.until().to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await
            .map_err(|source| RetrievalError::Transport { page, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Status { page, status });
        }

        let details = response
            .json::<TogglDetailsPage>()
            .await
            .map_err(|source| RetrievalError::MalformedBody { page, source })?;
        debug!("page {}: {} time entries", page, details.data.len());

        details
            .data
            .into_iter()
            .map(|entry| entry.into_time_entry(page))
            .collect()
    }
}
