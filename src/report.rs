use std::io::Write;

use anyhow::{Context, Result};

use crate::cube::{Cube, CubeLeaf, LeafKey};
use crate::rounding::round_quarter_hours;

const TOTAL_LABEL: &str = "Totaal uren: ";

/// レポートの形式。
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ArgEnum)]
pub enum ReportFormat {
    /// 15分単位に丸めた時間と合計を出力する。
    Rounded,
    /// 丸めずにHH:MM形式で出力する。合計は出力しない。
    Clock,
}

/// 集計結果1件ごとの行の書式を決めるためのtrait。
pub trait ReportStyle {
    /// 集計結果1件分の行を返す。末尾の改行は含まない。
    fn leaf_line(&mut self, key: &LeafKey<'_>, leaf: &CubeLeaf) -> String;

    /// projectごとに空行を挟む場合は`true`。
    fn separates_projects(&self) -> bool {
        false
    }

    /// 最後に出力する行。
    fn footer(&self) -> Option<String> {
        None
    }
}

/// 15分単位に丸めた時間と、重複を除いた説明を出力する。
#[derive(Debug, Default)]
pub struct RoundedHours {
    total_hours: f64,
}

impl ReportStyle for RoundedHours {
    fn leaf_line(&mut self, key: &LeafKey<'_>, leaf: &CubeLeaf) -> String {
        let hours = round_quarter_hours(leaf.total_duration_ms());
        self.total_hours += hours;
        format!(
            "{} - {} - {} [{:.2}] {}",
            key.client,
            key.project,
            key.day,
            hours,
            leaf.unique_descriptions().join(", ")
        )
    }

    fn separates_projects(&self) -> bool {
        true
    }

    // 合計は丸めた後の時間を足し合わせたもの
    fn footer(&self) -> Option<String> {
        Some(format!("{}{}", TOTAL_LABEL, self.total_hours))
    }
}

/// 丸めずにHH:MM形式の時間と、すべての説明を出力する。
#[derive(Debug, Default)]
pub struct ClockTime;

impl ReportStyle for ClockTime {
    fn leaf_line(&mut self, key: &LeafKey<'_>, leaf: &CubeLeaf) -> String {
        format!(
            "{} - {} - {}: {} {}",
            key.client,
            key.project,
            key.day,
            format_clock(leaf.total_duration_ms()),
            leaf.descriptions().join(", ")
        )
    }
}

/// ミリ秒をHH:MM形式にする。秒以下は切り捨てる。
fn format_clock(duration_ms: i64) -> String {
    let sign = if duration_ms < 0 { "-" } else { "" };
    let minutes = duration_ms.unsigned_abs() / 60_000;
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

/// 集計結果をレポートとして書き出す。
pub struct ReportWriter<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> ReportWriter<'a, W> {
    /// 新しい`ReportWriter`を返す。
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }

    /// 集計結果をclient, project, 日付の昇順で1件1行として書き出す。
    ///
    /// # Arguments
    ///
    /// * `cube` - 書き出す集計結果
    /// * `style` - 行の書式
    pub fn write_cube<S: ReportStyle>(&mut self, cube: &Cube, style: &mut S) -> Result<()> {
        for group in cube.projects() {
            for (day, leaf) in group.days {
                let key = LeafKey {
                    client: group.client,
                    project: group.project,
                    day: *day,
                };
                writeln!(self.writer, "{}", style.leaf_line(&key, leaf))
                    .with_context(|| format!("Failed to write report line: {:?}", key))?;
            }
            if style.separates_projects() {
                writeln!(self.writer).context("Failed to write project separator")?;
            }
        }

        if let Some(footer) = style.footer() {
            writeln!(self.writer, "{}", footer).context("Failed to write report footer")?;
        }

        Ok(())
    }
}

/// 指定された形式でレポート全体を作成する。
pub fn render(cube: &Cube, format: ReportFormat) -> Result<String> {
    let mut buffer = Vec::new();
    let mut writer = ReportWriter::new(&mut buffer);
    match format {
        ReportFormat::Rounded => writer.write_cube(cube, &mut RoundedHours::default())?,
        ReportFormat::Clock => writer.write_cube(cube, &mut ClockTime)?,
    }

    String::from_utf8(buffer).context("Report is not valid UTF-8")
}
