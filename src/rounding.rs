/// 15分(秒)。
const QUARTER_SECS: i64 = 900;

/// 切り上げに転じる15分区切り内の経過時間(秒)。
const ROUND_UP_SECS: i64 = 300;

/// ミリ秒の作業時間を15分単位の時間数に丸める。
///
/// 15分区切りを5分以上過ぎていれば切り上げ、そうでなければ切り捨てる。
/// 19:59は0.25時間、20:00は0.5時間になる。
/// 15分未満の場合は0にはせず、常に0.25時間を返す。
///
/// # Arguments
///
/// * `duration_ms` - 作業時間(ミリ秒)
///
/// # Examples
///
/// ```
/// assert_eq!(round_quarter_hours(1_200_000), 0.5);
/// ```
pub fn round_quarter_hours(duration_ms: i64) -> f64 {
    let seconds = duration_ms / 1000;
    if seconds < QUARTER_SECS {
        return 0.25;
    }

    let remainder = seconds % QUARTER_SECS;
    let hours = seconds as f64 / 3600.0;
    if remainder < ROUND_UP_SECS {
        (hours * 4.0).floor() / 4.0
    } else {
        (hours * 4.0).ceil() / 4.0
    }
}
