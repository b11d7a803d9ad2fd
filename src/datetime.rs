use chrono::{Local, NaiveDate};

#[cfg(not(test))]
/// Localタイムゾーンでの今日の日付を取得する。
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// テスト時に利用するモック日付を取得する。
#[cfg(test)]
pub mod mock_datetime {
    use std::cell::RefCell;

    use super::Local;
    use super::NaiveDate;

    thread_local! {
        static MOCK_DATE: RefCell<Option<NaiveDate>> = RefCell::new(None);
    }

    /// モック日付を取得する。
    pub fn today() -> NaiveDate {
        MOCK_DATE.with(|cell| {
            cell.borrow()
                .as_ref()
                .cloned()
                .unwrap_or_else(|| Local::now().date_naive())
        })
    }

    /// モック日付を設定する。
    pub fn set_mock_date(date: NaiveDate) {
        MOCK_DATE.with(|cell| *cell.borrow_mut() = Some(date));
    }

    // 設定したモック日付をクリアする。
    pub fn clear_mock_date() {
        MOCK_DATE.with(|cell| *cell.borrow_mut() = None);
    }
}

#[cfg(test)]
pub use mock_datetime::today;
