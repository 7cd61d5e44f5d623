//! 庫存模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ReplenishError, Result};

/// 已驗證的物料庫存狀態
///
/// 只能透過 [`StockPosition::new`] 建立：每箱單位數必須大於 0，現有庫存不可為負。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockPosition {
    /// 物料代碼
    sku: String,

    /// 現有總庫存（單位）
    on_hand: Decimal,

    /// 每箱單位數
    units_per_case: Decimal,
}

impl StockPosition {
    /// 創建並驗證庫存狀態
    pub fn new(sku: impl Into<String>, on_hand: Decimal, units_per_case: Decimal) -> Result<Self> {
        if units_per_case <= Decimal::ZERO {
            return Err(ReplenishError::InvalidUnitsPerCase(units_per_case));
        }
        if on_hand < Decimal::ZERO {
            return Err(ReplenishError::NegativeStock(on_hand));
        }

        Ok(Self {
            sku: sku.into(),
            on_hand,
            units_per_case,
        })
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn on_hand(&self) -> Decimal {
        self.on_hand
    }

    pub fn units_per_case(&self) -> Decimal {
        self.units_per_case
    }

    /// 箱數換算為單位數
    pub fn cases_to_units(&self, cases: u32) -> Result<Decimal> {
        Decimal::from(cases)
            .checked_mul(self.units_per_case)
            .ok_or_else(|| {
                ReplenishError::CalculationError(format!(
                    "{} 箱 × {} 單位超出可表示範圍",
                    cases, self.units_per_case
                ))
            })
    }
}

impl<'de> Deserialize<'de> for StockPosition {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            sku: String,
            on_hand: Decimal,
            units_per_case: Decimal,
        }

        let raw = Raw::deserialize(deserializer)?;
        StockPosition::new(raw.sku, raw.on_hand, raw.units_per_case)
            .map_err(serde::de::Error::custom)
    }
}
