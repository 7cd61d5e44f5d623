//! 安全庫存與訂購量規則

use replenish_core::config::{business_days_per_month, safety_coverage_days, DISPLAY_DECIMALS};
use replenish_core::{ReplenishError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// 補貨規則計算器
pub struct ReorderCalculator;

impl ReorderCalculator {
    /// 日均消耗 = 月消耗 / 每月工作日
    pub fn daily_rate(consumption: Decimal) -> Decimal {
        consumption / business_days_per_month()
    }

    /// 安全庫存 = 日均消耗 × 涵蓋天數
    pub fn safety_stock(consumption: Decimal) -> Result<Decimal> {
        Self::daily_rate(consumption)
            .checked_mul(safety_coverage_days())
            .ok_or_else(|| overflow("安全庫存", consumption))
    }

    /// 最低需求庫存 = 月消耗 + 安全庫存
    pub fn minimum_required(consumption: Decimal) -> Result<Decimal> {
        consumption
            .checked_add(Self::safety_stock(consumption)?)
            .ok_or_else(|| overflow("最低需求庫存", consumption))
    }

    /// 缺口（不小於 0）
    pub fn shortfall(minimum: Decimal, projected: Decimal) -> Result<Decimal> {
        minimum
            .checked_sub(projected)
            .map(|gap| gap.max(Decimal::ZERO))
            .ok_or_else(|| overflow("缺口", minimum))
    }

    /// 月末庫存 = 期初 - 消耗 + 收貨，截斷為 0
    pub fn closing_stock(opening: Decimal, consumption: Decimal, received: Decimal) -> Result<Decimal> {
        opening
            .checked_sub(consumption)
            .and_then(|rest| rest.checked_add(received))
            .map(|stock| stock.max(Decimal::ZERO))
            .ok_or_else(|| overflow("月末庫存", opening))
    }

    /// 建議訂購箱數：缺口換算箱數後無條件進位
    pub fn reorder_cases(shortfall: Decimal, units_per_case: Decimal) -> Result<u64> {
        if units_per_case <= Decimal::ZERO {
            return Err(ReplenishError::InvalidUnitsPerCase(units_per_case));
        }
        if shortfall <= Decimal::ZERO {
            return Ok(0);
        }

        let cases = shortfall
            .checked_div(units_per_case)
            .ok_or_else(|| overflow("訂購箱數", shortfall))?
            .ceil();
        cases.to_u64().ok_or_else(|| {
            ReplenishError::CalculationError(format!("訂購箱數超出範圍: {}", cases))
        })
    }

    /// 顯示用數量（2 位小數，中點取偶）
    pub fn round_display(value: Decimal) -> Decimal {
        value.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointNearestEven)
    }
}

fn overflow(what: &str, input: Decimal) -> ReplenishError {
    ReplenishError::CalculationError(format!("{}超出可表示範圍（輸入 {}）", what, input))
}
