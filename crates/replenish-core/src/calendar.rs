//! 月曆月份與在地化月份標籤編解碼
//!
//! 月份標籤格式為 `ABBR-YYYY`，其中 `ABBR` 為西班牙文三字母縮寫（`ENE`, `FEB`, ..., `DIC`）。
//! 同一張表同時提供英文縮寫，確保標籤與 [`CalendarMonth`] 之間的往返轉換由構造保證。

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{ReplenishError, Result};

/// 月份（1-12）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

/// 月份對照表：(月份, 在地化縮寫, 英文縮寫)
const MONTH_TABLE: [(Month, &str, &str); 12] = [
    (Month::January, "ENE", "Jan"),
    (Month::February, "FEB", "Feb"),
    (Month::March, "MAR", "Mar"),
    (Month::April, "ABR", "Apr"),
    (Month::May, "MAY", "May"),
    (Month::June, "JUN", "Jun"),
    (Month::July, "JUL", "Jul"),
    (Month::August, "AGO", "Aug"),
    (Month::September, "SEP", "Sep"),
    (Month::October, "OCT", "Oct"),
    (Month::November, "NOV", "Nov"),
    (Month::December, "DIC", "Dec"),
];

impl Month {
    /// 全部月份（依日曆順序）
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// 月份序號（1-12）
    pub fn number(self) -> u32 {
        self as u32
    }

    /// 由序號取得月份
    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1..=12 => Some(Self::ALL[(number - 1) as usize]),
            _ => None,
        }
    }

    /// 在地化縮寫（標籤使用）
    pub fn abbreviation(self) -> &'static str {
        MONTH_TABLE[self as usize - 1].1
    }

    /// 英文縮寫
    pub fn english_abbreviation(self) -> &'static str {
        MONTH_TABLE[self as usize - 1].2
    }

    /// 由在地化縮寫取得月份（不分大小寫）
    pub fn from_abbreviation(abbr: &str) -> Option<Self> {
        MONTH_TABLE
            .iter()
            .find(|(_, local, _)| local.eq_ignore_ascii_case(abbr))
            .map(|(month, _, _)| *month)
    }

    /// 由英文縮寫取得月份（不分大小寫）
    pub fn from_english_abbreviation(abbr: &str) -> Option<Self> {
        MONTH_TABLE
            .iter()
            .find(|(_, _, english)| english.eq_ignore_ascii_case(abbr))
            .map(|(month, _, _)| *month)
    }
}

/// 月曆月份（年, 月）
///
/// 可比較、可排序的不可變值類型。序列化時使用 `ABBR-YYYY` 標籤。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarMonth {
    year: i32,
    month: Month,
}

impl CalendarMonth {
    /// 創建月曆月份
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let month = Month::from_number(month)
            .ok_or_else(|| ReplenishError::InvalidMonthLabel(format!("{}-{}", month, year)))?;
        Ok(Self { year, month })
    }

    /// 由月份列舉創建
    pub fn from_parts(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// 取得日期所在月份
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: Month::ALL[date.month0() as usize],
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// 月份序號（1-12）
    pub fn month_number(&self) -> u32 {
        self.month.number()
    }

    /// 該月第一天
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.number(), 1)
    }

    /// 下一個月
    pub fn succ(&self) -> Self {
        self.add_months(1)
    }

    /// 往後推算 n 個月
    pub fn add_months(&self, months: u32) -> Self {
        let index = self.year as i64 * 12 + (self.month.number() as i64 - 1) + months as i64;
        Self {
            year: index.div_euclid(12) as i32,
            month: Month::ALL[index.rem_euclid(12) as usize],
        }
    }

    /// 解析在地化標籤（寬鬆格式）
    ///
    /// 前 3 個字元（去空白、不分大小寫）為月份縮寫，第 5 個字元起（去空白）為 4 位數年份。
    /// 例如 `ENE 2024`、`ene-2024`、`FEB/2023` 皆可接受。
    pub fn decode(label: &str) -> Result<Self> {
        let abbr: String = label.chars().take(3).collect();
        let year: String = label.chars().skip(4).collect();

        let month = Month::from_abbreviation(abbr.trim())
            .ok_or_else(|| ReplenishError::InvalidMonthLabel(label.to_string()))?;
        let year = parse_year(year.trim())
            .ok_or_else(|| ReplenishError::InvalidMonthLabel(label.to_string()))?;

        Ok(Self { year, month })
    }

    /// 解析嚴格格式 `ABBR-YYYY` 標籤（採購單使用）
    pub fn decode_strict(label: &str) -> Result<Self> {
        let invalid = || ReplenishError::InvalidMonthLabel(label.to_string());

        let (abbr, year) = label.trim().split_once('-').ok_or_else(invalid)?;
        if abbr.chars().count() != 3 {
            return Err(invalid());
        }

        let month = Month::from_abbreviation(abbr).ok_or_else(invalid)?;
        let year = parse_year(year).ok_or_else(invalid)?;

        Ok(Self { year, month })
    }

    /// 輸出標準標籤 `ABBR-YYYY`
    pub fn encode(&self) -> String {
        format!("{}-{:04}", self.month.abbreviation(), self.year)
    }
}

/// 4 位數年份
fn parse_year(s: &str) -> Option<i32> {
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for CalendarMonth {
    type Err = ReplenishError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl TryFrom<String> for CalendarMonth {
    type Error = ReplenishError;

    fn try_from(value: String) -> Result<Self> {
        Self::decode(&value)
    }
}

impl From<CalendarMonth> for String {
    fn from(value: CalendarMonth) -> Self {
        value.encode()
    }
}
