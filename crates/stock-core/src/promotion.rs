//! 促銷期間模型

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// 促銷期間
///
/// 只有旗標開啟且結束日期未早於今天時，促銷才算有效。
/// 結束日期當天仍然有效（日為單位比較）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionWindow {
    /// 促銷旗標
    pub active: bool,

    /// 促銷結束日期（None 表示無期限）
    pub end_date: Option<NaiveDate>,
}

impl PromotionWindow {
    /// 創建新的促銷期間
    pub fn new(active: bool, end_date: Option<NaiveDate>) -> Self {
        Self { active, end_date }
    }

    /// 無期限的有效促銷
    pub fn open_ended() -> Self {
        Self::new(true, None)
    }

    /// 檢查促銷在指定日期是否有效
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        if !self.active {
            return false;
        }
        match self.end_date {
            Some(end) => end >= today,
            None => true,
        }
    }

    /// 檢查促銷在今天（本地日期）是否有效
    pub fn is_active_today(&self) -> bool {
        self.is_active_on(today())
    }

    /// 檢查促銷是否已過期（旗標開啟但結束日期早於今天）
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.active && !self.is_active_on(today)
    }
}

/// 本地日曆日期（時分秒歸零）
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// 可接受的促銷結束日期範圍：十年前的一月一日到十年後的十二月三十一日
pub fn accepted_end_date_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let year = today.year();
    let min = NaiveDate::from_ymd_opt(year - 10, 1, 1).unwrap_or(NaiveDate::MIN);
    let max = NaiveDate::from_ymd_opt(year + 10, 12, 31).unwrap_or(NaiveDate::MAX);
    (min, max)
}
