//! 需求預測介面
//!
//! 預測模型本身屬於外部協作者；核心只依賴 [`DemandForecaster`]。
//! 每次執行只呼叫一次，回傳的月份可多於或少於時界，由時界建構器篩選。

use std::collections::BTreeMap;

use replenish_core::{CalendarMonth, ConsumptionHistory, ForecastPoint, ReplenishError, Result};
use rust_decimal::Decimal;

/// 需求預測能力
pub trait DemandForecaster {
    /// 模型名稱（輸出參數回顯使用）
    fn name(&self) -> &str;

    /// 批次預測
    ///
    /// # 參數
    /// * `history` - 依日曆順序的歷史消耗
    /// * `horizon` - 需要預測的月份（依日曆順序）
    fn forecast(
        &self,
        history: &ConsumptionHistory,
        horizon: &[CalendarMonth],
    ) -> Result<Vec<ForecastPoint>>;
}

impl<T: DemandForecaster + ?Sized> DemandForecaster for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn forecast(
        &self,
        history: &ConsumptionHistory,
        horizon: &[CalendarMonth],
    ) -> Result<Vec<ForecastPoint>> {
        (**self).forecast(history, horizon)
    }
}

impl<T: DemandForecaster + ?Sized> DemandForecaster for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn forecast(
        &self,
        history: &ConsumptionHistory,
        horizon: &[CalendarMonth],
    ) -> Result<Vec<ForecastPoint>> {
        (**self).forecast(history, horizon)
    }
}

/// 預先計算的預測序列（例如外部模型匯出的結果）
///
/// 序列涵蓋的月份與時界無關，原樣回傳。
#[derive(Debug, Clone)]
pub struct TableForecaster {
    name: String,
    series: BTreeMap<CalendarMonth, Decimal>,
}

impl TableForecaster {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            series: BTreeMap::new(),
        }
    }

    /// 由「標籤 → 預測值」建立，無法解析的標籤略過
    pub fn from_labels<I, K>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: AsRef<str>,
    {
        let mut forecaster = Self::new(name);
        for (label, demand) in entries {
            match CalendarMonth::decode(label.as_ref()) {
                Ok(month) => {
                    forecaster.series.insert(month, demand);
                }
                Err(_) => tracing::debug!("略過無效的預測標籤: {}", label.as_ref()),
            }
        }
        forecaster
    }

    /// 建構器模式：設置某月預測
    pub fn with_point(mut self, month: CalendarMonth, demand: Decimal) -> Self {
        self.series.insert(month, demand);
        self
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl DemandForecaster for TableForecaster {
    fn name(&self) -> &str {
        &self.name
    }

    fn forecast(
        &self,
        _history: &ConsumptionHistory,
        _horizon: &[CalendarMonth],
    ) -> Result<Vec<ForecastPoint>> {
        if self.series.is_empty() {
            return Err(ReplenishError::ForecastUnavailable(format!(
                "預測序列 {} 為空",
                self.name
            )));
        }

        Ok(self
            .series
            .iter()
            .map(|(month, demand)| ForecastPoint::new(*month, *demand))
            .collect())
    }
}

/// 固定需求預測（每個時界月份相同）
#[derive(Debug, Clone)]
pub struct ConstantForecaster {
    demand: Decimal,
}

impl ConstantForecaster {
    pub fn new(demand: Decimal) -> Self {
        Self { demand }
    }
}

impl DemandForecaster for ConstantForecaster {
    fn name(&self) -> &str {
        "constant"
    }

    fn forecast(
        &self,
        _history: &ConsumptionHistory,
        horizon: &[CalendarMonth],
    ) -> Result<Vec<ForecastPoint>> {
        Ok(horizon
            .iter()
            .map(|month| ForecastPoint::new(*month, self.demand))
            .collect())
    }
}

/// 移動平均預測
///
/// 取最後 `window` 個歷史月份的平均值，平鋪到整個時界。
#[derive(Debug, Clone)]
pub struct MovingAverageForecaster {
    window: usize,
}

impl MovingAverageForecaster {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for MovingAverageForecaster {
    fn default() -> Self {
        Self::new(3)
    }
}

impl DemandForecaster for MovingAverageForecaster {
    fn name(&self) -> &str {
        "moving-average"
    }

    fn forecast(
        &self,
        history: &ConsumptionHistory,
        horizon: &[CalendarMonth],
    ) -> Result<Vec<ForecastPoint>> {
        if self.window == 0 {
            return Err(ReplenishError::ForecastUnavailable(
                "移動平均視窗必須大於 0".to_string(),
            ));
        }

        let points = history.points();
        if points.is_empty() {
            return Err(ReplenishError::ForecastUnavailable(
                "沒有可用的歷史消耗".to_string(),
            ));
        }

        let recent = &points[points.len().saturating_sub(self.window)..];
        let total = recent
            .iter()
            .try_fold(Decimal::ZERO, |acc, (_, q)| acc.checked_add(*q))
            .ok_or_else(|| {
                ReplenishError::CalculationError("歷史消耗合計超出可表示範圍".to_string())
            })?;
        let average = total / Decimal::from(recent.len());

        tracing::debug!(
            "移動平均: 視窗 {}, 實際取 {} 個月, 平均 {}",
            self.window,
            recent.len(),
            average
        );

        Ok(horizon
            .iter()
            .map(|month| ForecastPoint::new(*month, average))
            .collect())
    }
}
