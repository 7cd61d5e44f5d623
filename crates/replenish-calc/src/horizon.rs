//! 預測時界

use chrono::NaiveDate;
use replenish_core::{
    CalendarMonth, ConsumptionHistory, ForecastPoint, ReplenishError, Result, HORIZON_MONTHS,
};

use crate::forecast::DemandForecaster;

/// 已解析的時界：參考月份與依日曆順序的預測點
#[derive(Debug, Clone)]
pub struct Horizon {
    /// 參考月份
    pub reference_month: CalendarMonth,

    /// 要求的月份（連續、遞增）
    pub requested: Vec<CalendarMonth>,

    /// 落在時界內的預測點（依時界順序，可能少於要求月數）
    pub points: Vec<ForecastPoint>,
}

impl Horizon {
    /// 預測月份數不足時界
    pub fn is_truncated(&self) -> bool {
        self.points.len() < self.requested.len()
    }

    /// 缺少預測的月份
    pub fn missing_months(&self) -> Vec<CalendarMonth> {
        self.requested
            .iter()
            .filter(|m| !self.points.iter().any(|p| p.month == **m))
            .copied()
            .collect()
    }
}

/// 時界建構器
#[derive(Debug, Clone, Copy)]
pub struct HorizonBuilder {
    months: u32,
}

impl HorizonBuilder {
    pub fn new(months: u32) -> Self {
        Self { months }
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    /// 參考月份：最後一個有效消耗月份；沒有時使用今天所在月份
    pub fn reference_month(history: &ConsumptionHistory, today: NaiveDate) -> CalendarMonth {
        history
            .last_month()
            .unwrap_or_else(|| CalendarMonth::from_date(today))
    }

    /// 參考月份之後連續的 N 個月
    pub fn months_after(&self, reference: CalendarMonth) -> Vec<CalendarMonth> {
        (1..=self.months).map(|i| reference.add_months(i)).collect()
    }

    /// 解析時界並向預測協作者批次取得預測
    ///
    /// 只保留落在時界內的預測點，依時界順序；同一月份重複時取第一筆。
    /// 完全沒有可用預測點時回傳 [`ReplenishError::ForecastUnavailable`]。
    pub fn resolve<F>(
        &self,
        history: &ConsumptionHistory,
        today: NaiveDate,
        forecaster: &F,
    ) -> Result<Horizon>
    where
        F: DemandForecaster + ?Sized,
    {
        let reference_month = Self::reference_month(history, today);
        let requested = self.months_after(reference_month);

        tracing::debug!(
            "參考月份 {}, 時界 {} ~ {}",
            reference_month,
            requested.first().map(|m| m.encode()).unwrap_or_default(),
            requested.last().map(|m| m.encode()).unwrap_or_default()
        );

        let forecast = forecaster.forecast(history, &requested)?;
        tracing::debug!("預測模型 {} 回傳 {} 筆", forecaster.name(), forecast.len());

        let points: Vec<ForecastPoint> = requested
            .iter()
            .filter_map(|month| forecast.iter().find(|p| p.month == *month).cloned())
            .collect();

        if points.is_empty() && !requested.is_empty() {
            return Err(ReplenishError::ForecastUnavailable(format!(
                "預測模型 {} 沒有涵蓋 {} 之後的任何月份",
                forecaster.name(),
                reference_month
            )));
        }

        Ok(Horizon {
            reference_month,
            requested,
            points,
        })
    }
}

impl Default for HorizonBuilder {
    fn default() -> Self {
        Self::new(HORIZON_MONTHS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{ConstantForecaster, TableForecaster};
    use rust_decimal::Decimal;

    fn month(year: i32, month: u32) -> CalendarMonth {
        CalendarMonth::new(year, month).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn test_reference_month_is_latest_history() {
        let history = ConsumptionHistory::from_labels(vec![
            ("MAR 2024", Decimal::from(1)),
            ("ENE 2025", Decimal::from(1)),
            ("JUL 2024", Decimal::from(1)),
        ]);

        assert_eq!(HorizonBuilder::reference_month(&history, today()), month(2025, 1));
    }

    #[test]
    fn test_reference_month_falls_back_to_today() {
        let history = ConsumptionHistory::from_labels(vec![
            ("garbage", Decimal::from(1)),
            ("XXX 2024", Decimal::from(1)),
        ]);

        assert_eq!(HorizonBuilder::reference_month(&history, today()), month(2026, 10));
    }

    #[test]
    fn test_months_after_crosses_year() {
        let months = HorizonBuilder::default().months_after(month(2024, 10));

        assert_eq!(
            months,
            vec![
                month(2024, 11),
                month(2024, 12),
                month(2025, 1),
                month(2025, 2),
                month(2025, 3),
                month(2025, 4),
            ]
        );
    }

    #[test]
    fn test_resolve_filters_to_horizon() {
        let history = ConsumptionHistory::new().with_month(month(2024, 12), Decimal::from(10));

        // 預測序列涵蓋過去與更遠的未來，只取時界內 6 個月
        let mut forecaster = TableForecaster::new("table");
        for i in 0..18 {
            forecaster = forecaster.with_point(month(2024, 6).add_months(i), Decimal::from(i));
        }

        let horizon = HorizonBuilder::default()
            .resolve(&history, today(), &forecaster)
            .unwrap();

        assert_eq!(horizon.reference_month, month(2024, 12));
        assert_eq!(horizon.points.len(), 6);
        assert_eq!(horizon.points[0].month, month(2025, 1));
        assert_eq!(horizon.points[5].month, month(2025, 6));
        assert!(!horizon.is_truncated());
    }

    #[test]
    fn test_resolve_truncates_when_forecast_is_short() {
        let history = ConsumptionHistory::new().with_month(month(2024, 12), Decimal::from(10));
        let forecaster = TableForecaster::new("short")
            .with_point(month(2025, 1), Decimal::from(5))
            .with_point(month(2025, 2), Decimal::from(5));

        let horizon = HorizonBuilder::default()
            .resolve(&history, today(), &forecaster)
            .unwrap();

        assert_eq!(horizon.points.len(), 2);
        assert!(horizon.is_truncated());
        assert_eq!(horizon.missing_months().len(), 4);
        assert_eq!(horizon.missing_months()[0], month(2025, 3));
    }

    #[test]
    fn test_resolve_without_overlap_is_unavailable() {
        let history = ConsumptionHistory::new().with_month(month(2024, 12), Decimal::from(10));
        let forecaster = TableForecaster::new("stale").with_point(month(2023, 1), Decimal::from(5));

        let err = HorizonBuilder::default()
            .resolve(&history, today(), &forecaster)
            .unwrap_err();
        assert!(matches!(err, ReplenishError::ForecastUnavailable(_)));
    }

    #[test]
    fn test_resolve_with_malformed_history_uses_today() {
        let history = ConsumptionHistory::from_labels(vec![("??? ????", Decimal::from(3))]);
        let forecaster = ConstantForecaster::new(Decimal::from(44));

        let horizon = HorizonBuilder::default()
            .resolve(&history, today(), &forecaster)
            .unwrap();

        assert_eq!(horizon.reference_month, month(2026, 10));
        assert_eq!(horizon.points.len(), 6);
        assert_eq!(horizon.points[0].month, month(2026, 11));
    }
}
