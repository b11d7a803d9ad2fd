use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::period::ReportPeriod;

/// レポートのファイル名を返す。
pub fn report_file_name(period: &ReportPeriod) -> String {
    format!("toggl entries {} {}.txt", period.since(), period.until())
}

/// レポートを指定されたディレクトリに書き出し、書き出したファイルのパスを返す。
///
/// 同名のファイルが存在する場合は上書きする。
///
/// # Arguments
///
/// * `dir` - 出力先のディレクトリ
/// * `period` - レポートの期間
/// * `report` - レポートの本文
pub fn write_report(dir: &Path, period: &ReportPeriod, report: &str) -> Result<PathBuf> {
    let path = dir.join(report_file_name(period));
    fs::write(&path, report)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    Ok(path)
}
