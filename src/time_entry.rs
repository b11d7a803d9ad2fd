use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Toggl APIから取得したタイムエントリー。
///
/// 開始日時は集計に利用する日付だけを保持する。
#[derive(Clone, Debug, PartialEq)]
pub struct TimeEntry {
    pub client: String,
    pub project: String,
    pub day: NaiveDate,
    pub duration_ms: i64,
    pub description: String,
}

/// 開始日時の文字列から日付部分を取得する。
///
/// タイムゾーンの変換は行わず、文字列に記載された日付をそのまま利用する。
/// RFC 3339、オフセットなしの`YYYY-MM-DDTHH:MM:SS`、`YYYY-MM-DD`に対応する。
pub fn parse_day(start: &str) -> Option<NaiveDate> {
    let start = start.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(start) {
        return Some(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(start, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(datetime.date());
    }
    NaiveDate::parse_from_str(start, "%Y-%m-%d").ok()
}
