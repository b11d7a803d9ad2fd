use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::cube::Cube;
use crate::export::write_report;
use crate::fetcher::{fetch_entries, MAX_PAGES};
use crate::period::ReportPeriod;
use crate::report::{render, ReportFormat};
use crate::toggl::TogglRepository;

/// 週毎のレポートを出力するためのサブコマンド。
#[derive(Debug, clap::Args)]
pub struct WeeklyArgs {
    #[clap(
        short = 'd',
        long = "date",
        help = "Reports the week containing this date, in the format YYYY-MM-DD",
        parse(try_from_str = parse_date),
    )]
    date: Option<NaiveDate>,

    #[clap(
        short = 'f',
        long = "format",
        arg_enum,
        default_value = "rounded",
        help = "Report format"
    )]
    format: ReportFormat,

    #[clap(
        short = 'o',
        long = "output-dir",
        default_value = ".",
        help = "Directory to write the report to"
    )]
    output_dir: PathBuf,
}

pub struct WeeklyCommand<'a, T: TogglRepository> {
    toggl_client: &'a T,
}

impl<'a, T: TogglRepository + Sync> WeeklyCommand<'a, T> {
    /// 新しい`WeeklyCommand`を返す。
    ///
    /// # Arguments
    /// * `toggl_client` - Toggl APIと通信するためのリポジトリ
    pub fn new(toggl_client: &'a T) -> Self {
        Self { toggl_client }
    }

    /// `weekly`サブコマンドの処理を行う。
    ///
    /// 指定された日付を含む週(月曜日から日曜日)のタイムエントリーを取得して
    /// client, project, 日付ごとに集計し、レポートをファイルに書き出す。
    /// 日付が指定されていない場合は、Localタイムゾーンで今週を利用する。
    /// 取得に失敗した場合はファイルを書き出さない。
    ///
    /// # Arguments
    ///
    /// * `weekly` - `weekly`サブコマンドの引数
    pub async fn run(&self, weekly: WeeklyArgs) -> Result<PathBuf> {
        let period = weekly
            .date
            .map(ReportPeriod::containing)
            .unwrap_or_else(ReportPeriod::current);
        info!("Retrieving all entries from {}", period);

        let fetched = fetch_entries(self.toggl_client, &period)
            .await
            .context("Failed to retrieve time entries")?;
        if fetched.truncated {
            warn!(
                "Stopped after {} pages without reaching an empty page; the report may be incomplete",
                MAX_PAGES
            );
        }
        info!(
            "Got {} entries in {} requests",
            fetched.entries.len(),
            fetched.requests
        );

        let cube = Cube::build(&fetched.entries);
        if cube.is_empty() {
            warn!("No time entries found for {}", period);
        }
        debug!(
            "Aggregated {} clients into {} client/project/day rows, {} ms in total",
            cube.clients().count(),
            cube.leaves().count(),
            cube.total_duration_ms()
        );
        let report = render(&cube, weekly.format).context("Failed to render report")?;
        let path = write_report(&weekly.output_dir, &period, &report)?;
        info!("Results output to {}", path.display());

        Ok(path)
    }
}

/// 日付をパースする。
fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Failed to parse date: {}", s))
}
