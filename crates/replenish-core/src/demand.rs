//! 需求模型：歷史消耗與需求預測點

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarMonth;

/// 歷史月消耗
///
/// 由在地化月份標籤解析而來；無法解析的標籤直接捨棄（歷史資料允許雜訊），
/// 同一月份的重複標籤數量相加。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsumptionHistory {
    /// 月份 → 消耗量（依日曆順序）
    series: BTreeMap<CalendarMonth, Decimal>,

    /// 被捨棄的原始標籤
    discarded: Vec<String>,
}

impl ConsumptionHistory {
    /// 創建空的歷史
    pub fn new() -> Self {
        Self::default()
    }

    /// 由「標籤 → 消耗量」解析歷史
    pub fn from_labels<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: AsRef<str>,
    {
        let mut history = Self::new();
        for (label, quantity) in entries {
            let label = label.as_ref();
            match CalendarMonth::decode(label) {
                Ok(month) => history.add(month, quantity),
                Err(_) => history.discarded.push(label.to_string()),
            }
        }
        history
    }

    /// 建構器模式：添加一個月份
    pub fn with_month(mut self, month: CalendarMonth, quantity: Decimal) -> Self {
        self.add(month, quantity);
        self
    }

    /// 添加消耗（同月份累加，超出範圍時飽和）
    pub fn add(&mut self, month: CalendarMonth, quantity: Decimal) {
        let entry = self.series.entry(month).or_insert(Decimal::ZERO);
        *entry = entry.saturating_add(quantity);
    }

    /// 最後一個有效消耗月份
    pub fn last_month(&self) -> Option<CalendarMonth> {
        self.series.keys().next_back().copied()
    }

    /// 依日曆順序的 (月份, 消耗量)
    pub fn points(&self) -> Vec<(CalendarMonth, Decimal)> {
        self.series.iter().map(|(m, q)| (*m, *q)).collect()
    }

    /// 取得某月消耗
    pub fn get(&self, month: CalendarMonth) -> Option<Decimal> {
        self.series.get(&month).copied()
    }

    /// 被捨棄的標籤
    pub fn discarded_labels(&self) -> &[String] {
        &self.discarded
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// 需求預測點（外部預測模型輸出）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// 預測月份
    pub month: CalendarMonth,

    /// 預測需求（可能為負，使用前需截斷）
    pub predicted_demand: Decimal,
}

impl ForecastPoint {
    pub fn new(month: CalendarMonth, predicted_demand: Decimal) -> Self {
        Self {
            month,
            predicted_demand,
        }
    }

    /// 截斷為非負需求（需求不可為負）
    pub fn clamped_demand(&self) -> Decimal {
        self.predicted_demand.max(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month: u32) -> CalendarMonth {
        CalendarMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_history_discards_malformed_labels() {
        let history = ConsumptionHistory::from_labels(vec![
            ("ENE 2024", Decimal::from(100)),
            ("FEB 2024", Decimal::from(15)),
            ("BAD 2024", Decimal::from(7)),
            ("MAR", Decimal::from(9)),
        ]);

        assert_eq!(history.len(), 2);
        assert_eq!(history.discarded_labels().len(), 2);
        assert_eq!(history.last_month(), Some(month(2024, 2)));
    }

    #[test]
    fn test_history_sum_saturates() {
        let history = ConsumptionHistory::new()
            .with_month(month(2024, 1), Decimal::MAX)
            .with_month(month(2024, 1), Decimal::MAX);

        assert_eq!(history.get(month(2024, 1)), Some(Decimal::MAX));
    }

    #[test]
    fn test_history_sums_duplicate_months() {
        let history = ConsumptionHistory::from_labels(vec![
            ("ENE 2024", Decimal::from(100)),
            ("ene-2024", Decimal::from(20)),
        ]);

        assert_eq!(history.len(), 1);
        assert_eq!(history.get(month(2024, 1)), Some(Decimal::from(120)));
    }

    #[test]
    fn test_history_points_are_chronological() {
        let history = ConsumptionHistory::new()
            .with_month(month(2024, 3), Decimal::from(3))
            .with_month(month(2023, 12), Decimal::from(1))
            .with_month(month(2024, 1), Decimal::from(2));

        let months: Vec<_> = history.points().into_iter().map(|(m, _)| m).collect();
        assert_eq!(months, vec![month(2023, 12), month(2024, 1), month(2024, 3)]);
    }

    #[test]
    fn test_empty_history() {
        let history = ConsumptionHistory::from_labels(Vec::<(String, Decimal)>::new());
        assert!(history.is_empty());
        assert_eq!(history.last_month(), None);
    }

    #[test]
    fn test_forecast_point_clamps_negative() {
        let point = ForecastPoint::new(month(2025, 1), Decimal::from(-5));
        assert_eq!(point.clamped_demand(), Decimal::ZERO);

        let point = ForecastPoint::new(month(2025, 1), Decimal::from(12));
        assert_eq!(point.clamped_demand(), Decimal::from(12));
    }
}
