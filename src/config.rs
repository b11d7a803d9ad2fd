use std::env;

use crate::error::ConfigError;

const DEFAULT_API_URL: &str = "https://api.track.toggl.com/reports/api/v2";

/// Toggl Reports APIへ接続するための設定。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_token: String,
    pub workspace_id: String,
    pub user_agent_email: String,
    pub api_url: String,
}

impl Config {
    /// 環境変数から設定を読み込む。
    ///
    /// - `TOGGL_API_TOKEN`: APIトークン(必須)
    /// - `TOGGL_WORKSPACE_ID`: ワークスペースID(必須、数値)
    /// - `USER_AGENT_EMAIL`: API側で利用者を識別するための連絡先(必須)
    /// - `TOGGL_REPORTS_API_URL`: APIのURL(省略時はToggl本番環境)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `lookup`で取得した値から設定を作成する。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let api_token = required("TOGGL_API_TOKEN")?;

        let workspace_id = required("TOGGL_WORKSPACE_ID")?;
        if workspace_id.parse::<u64>().is_err() {
            return Err(ConfigError::Invalid {
                key: "TOGGL_WORKSPACE_ID",
                value: workspace_id,
                reason: "expected a numeric workspace id",
            });
        }

        let user_agent_email = required("USER_AGENT_EMAIL")?;
        if !user_agent_email.contains('@') {
            return Err(ConfigError::Invalid {
                key: "USER_AGENT_EMAIL",
                value: user_agent_email,
                reason: "expected an email address",
            });
        }

        let api_url = lookup("TOGGL_REPORTS_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            api_token,
            workspace_id,
            user_agent_email,
            api_url,
        })
    }

    /// リクエストに付与する`user_agent`パラメータ。
    pub fn user_agent(&self) -> String {
        format!(
            "{}/{}; {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            self.user_agent_email
        )
    }
}
