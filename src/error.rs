use reqwest::StatusCode;
use thiserror::Error;

/// 環境変数から設定を読み込む際のエラー。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid ({reason}): {value:?}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Toggl APIからタイムエントリーを取得する際のエラー。
///
/// いずれも取得処理全体を中断させる。
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("failed to send request for page {page}")]
    Transport {
        page: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("page {page} returned an error status: {status}")]
    Status { page: u32, status: StatusCode },

    #[error("failed to deserialize page {page}")]
    MalformedBody {
        page: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed time entry on page {page}: {reason}")]
    MalformedEntry { page: u32, reason: String },
}
