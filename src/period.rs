use std::fmt;

use chrono::{NaiveDate, Weekday};

use crate::datetime;

/// 集計対象とする1週間(月曜日から日曜日まで、両端を含む)。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportPeriod {
    since: NaiveDate,
    until: NaiveDate,
}

impl ReportPeriod {
    /// 指定された日付を含む週を返す。
    ///
    /// # Arguments
    ///
    /// * `date` - 週に含まれる任意の日付
    pub fn containing(date: NaiveDate) -> Self {
        let week = date.week(Weekday::Mon);
        Self {
            since: week.first_day(),
            until: week.last_day(),
        }
    }

    /// Localタイムゾーンでの今週を返す。
    pub fn current() -> Self {
        Self::containing(datetime::today())
    }

    /// 週の初日。
    pub fn since(&self) -> NaiveDate {
        self.since
    }

    /// 週の最終日。
    pub fn until(&self) -> NaiveDate {
        self.until
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} until {}", self.since, self.until)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::ReportPeriod;
    use crate::datetime::mock_datetime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// 週のどの曜日を指定しても月曜日から日曜日になることを確認する。
    #[rstest]
    #[case::monday(date(2024, 1, 1), date(2024, 1, 1), date(2024, 1, 7))]
    #[case::wednesday(date(2024, 1, 3), date(2024, 1, 1), date(2024, 1, 7))]
    #[case::sunday(date(2024, 1, 7), date(2024, 1, 1), date(2024, 1, 7))]
    #[case::across_month(date(2024, 3, 1), date(2024, 2, 26), date(2024, 3, 3))]
    #[case::across_year(date(2025, 1, 1), date(2024, 12, 30), date(2025, 1, 5))]
    fn test_containing(
        #[case] target: NaiveDate,
        #[case] since: NaiveDate,
        #[case] until: NaiveDate,
    ) {
        let period = ReportPeriod::containing(target);

        assert_eq!(period.since(), since);
        assert_eq!(period.until(), until);
    }

    /// 今日の日付から今週が計算されることを確認する。
    #[test]
    fn test_current() {
        mock_datetime::set_mock_date(date(2024, 5, 16));

        let period = ReportPeriod::current();
        mock_datetime::clear_mock_date();

        assert_eq!(period.since(), date(2024, 5, 13));
        assert_eq!(period.until(), date(2024, 5, 19));
    }

    /// 日付はYYYY-MM-DD形式で表示される。
    #[test]
    fn test_display() {
        let period = ReportPeriod::containing(date(2024, 1, 3));

        assert_eq!(period.to_string(), "2024-01-01 until 2024-01-07");
        assert_eq!(period.since().to_string(), "2024-01-01");
    }
}
