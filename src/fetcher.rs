use log::debug;

use crate::error::RetrievalError;
use crate::period::ReportPeriod;
use crate::time_entry::TimeEntry;
use crate::toggl::TogglRepository;

/// 取得するページ数の上限。
pub const MAX_PAGES: u32 = 99;

/// ページングして取得したタイムエントリー。
#[derive(Debug)]
pub struct FetchedEntries {
    pub entries: Vec<TimeEntry>,
    /// 発行したリクエストの数。
    pub requests: u32,
    /// 空のページに到達する前に上限で打ち切った場合は`true`。
    pub truncated: bool,
}

/// 指定された期間のタイムエントリーを全ページ分取得する。
///
/// 1ページ目から順に取得し、空のページが返された時点で終了する。
/// `MAX_PAGES`ページ取得しても終わらない場合はそこで打ち切り、`truncated`を立てて返す。
/// いずれかのページでエラーが発生した場合は、再試行せずにそのエラーを返す。
///
/// # Arguments
///
/// * `toggl_client` - Toggl APIと通信するためのリポジトリ
/// * `period` - 取得するタイムエントリーの期間
pub async fn fetch_entries<T: TogglRepository + Sync>(
    toggl_client: &T,
    period: &ReportPeriod,
) -> Result<FetchedEntries, RetrievalError> {
    let mut entries = Vec::new();

    for page in 1..=MAX_PAGES {
        let time_entries = toggl_client.read_page(period, page).await?;
        if time_entries.is_empty() {
            return Ok(FetchedEntries {
                entries,
                requests: page,
                truncated: false,
            });
        }

        debug!(
            "page {}: accumulated {} entries",
            page,
            entries.len() + time_entries.len()
        );
        entries.extend(time_entries);
    }

    Ok(FetchedEntries {
        entries,
        requests: MAX_PAGES,
        truncated: true,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use reqwest::StatusCode;
    use rstest::rstest;

    use super::{fetch_entries, MAX_PAGES};
    use crate::error::RetrievalError;
    use crate::period::ReportPeriod;
    use crate::time_entry::TimeEntry;
    use crate::toggl::MockTogglRepository;

    fn period() -> ReportPeriod {
        ReportPeriod::containing(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap())
    }

    /// ページ番号ごとに異なるダミーのエントリーを作成する。
    fn page_entries(page: u32) -> Vec<TimeEntry> {
        (0..2)
            .map(|index| TimeEntry {
                client: "client".to_string(),
                project: "project".to_string(),
                day: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                duration_ms: 1000,
                description: format!("page{}-{}", page, index),
            })
            .collect()
    }

    /// N個の空でないページの後に空のページがあれば、N+1回で取得を終える。
    #[rstest]
    #[case::no_entries(0)]
    #[case::single_page(1)]
    #[case::several_pages(5)]
    #[tokio::test]
    async fn test_fetch_entries_until_empty_page(#[case] pages: u32) {
        let mut toggl = MockTogglRepository::new();
        toggl
            .expect_read_page()
            .times(pages as usize + 1)
            .returning(move |_, page| {
                if page <= pages {
                    Ok(page_entries(page))
                } else {
                    Ok(vec![])
                }
            });

        let fetched = fetch_entries(&toggl, &period()).await.unwrap();

        let expected: Vec<TimeEntry> = (1..=pages).flat_map(page_entries).collect();
        assert_eq!(fetched.entries, expected);
        assert_eq!(fetched.requests, pages + 1);
        assert!(!fetched.truncated);
    }

    /// 空のページが返らない場合は上限のページ数で打ち切る。
    #[tokio::test]
    async fn test_fetch_entries_safety_limit() {
        let mut toggl = MockTogglRepository::new();
        toggl
            .expect_read_page()
            .times(MAX_PAGES as usize)
            .returning(|_, page| Ok(page_entries(page)));

        let fetched = fetch_entries(&toggl, &period()).await.unwrap();

        assert_eq!(fetched.entries.len(), MAX_PAGES as usize * 2);
        assert_eq!(fetched.entries.last().unwrap().description, "page99-1");
        assert_eq!(fetched.requests, MAX_PAGES);
        assert!(fetched.truncated);
    }

    /// 途中のページでエラーになった場合は、それ以降を取得せずにエラーを返す。
    #[tokio::test]
    async fn test_fetch_entries_error_aborts() {
        let mut toggl = MockTogglRepository::new();
        toggl
            .expect_read_page()
            .times(2)
            .returning(|_, page| match page {
                1 => Ok(page_entries(1)),
                _ => Err(RetrievalError::Status {
                    page,
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                }),
            });

        let result = fetch_entries(&toggl, &period()).await;

        assert!(matches!(
            result,
            Err(RetrievalError::Status { page: 2, .. })
        ));
    }

    /// 期間がそのままリポジトリに渡されることを確認する。
    #[tokio::test]
    async fn test_fetch_entries_passes_period() {
        let mut toggl = MockTogglRepository::new();
        toggl
            .expect_read_page()
            .withf(|period, page| {
                period.since() == NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    && period.until() == NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()
                    && *page == 1
            })
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let fetched = fetch_entries(&toggl, &period()).await.unwrap();

        assert!(fetched.entries.is_empty());
    }
}
