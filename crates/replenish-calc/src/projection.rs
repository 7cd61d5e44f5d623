//! 庫存滾動預測

use replenish_core::{ForecastPoint, ProjectionRecord, Result, ScheduledReceipts, StockPosition};
use rust_decimal::Decimal;

use crate::reorder::ReorderCalculator;

/// 單月滾動結果（未四捨五入）
#[derive(Debug, Clone)]
pub struct MonthStep {
    /// 月末庫存（已截斷為非負）
    pub closing_stock: Decimal,
    /// 預測消耗（已截斷為非負）
    pub consumption: Decimal,
    /// 收貨箱數
    pub received_cases: u32,
    /// 收貨單位數
    pub received_units: Decimal,
    pub safety_stock: Decimal,
    pub minimum_required: Decimal,
    pub reorder_cases: u64,
}

impl MonthStep {
    /// 是否低於最低需求（以月末庫存判斷）
    pub fn below_minimum(&self) -> bool {
        self.closing_stock < self.minimum_required
    }
}

/// 庫存滾動預測引擎
///
/// 依時界順序逐月折疊：第 i 月的月末庫存即第 i+1 月的期初庫存。
/// 任一月份失敗即中止整次預測，不輸出部分結果。
pub struct ProjectionEngine;

impl ProjectionEngine {
    /// 計算單月
    ///
    /// 消耗與收貨同時作用於當月月末庫存，結果截斷為 0（缺貨不遞延為負庫存）。
    pub fn step(
        opening_stock: Decimal,
        point: &ForecastPoint,
        received_cases: u32,
        position: &StockPosition,
    ) -> Result<MonthStep> {
        let consumption = point.clamped_demand();
        let received_units = position.cases_to_units(received_cases)?;

        let safety_stock = ReorderCalculator::safety_stock(consumption)?;
        let minimum_required = ReorderCalculator::minimum_required(consumption)?;

        let closing_stock =
            ReorderCalculator::closing_stock(opening_stock, consumption, received_units)?;

        let shortfall = ReorderCalculator::shortfall(minimum_required, closing_stock)?;
        let reorder_cases =
            ReorderCalculator::reorder_cases(shortfall, position.units_per_case())?;

        Ok(MonthStep {
            closing_stock,
            consumption,
            received_cases,
            received_units,
            safety_stock,
            minimum_required,
            reorder_cases,
        })
    }

    /// 滾動預測整個時界
    pub fn project(
        position: &StockPosition,
        points: &[ForecastPoint],
        receipts: &ScheduledReceipts,
    ) -> Result<Vec<ProjectionRecord>> {
        let mut records = Vec::with_capacity(points.len());
        let mut stock_balance = position.on_hand();

        for point in points {
            let received_cases = receipts.cases_for_label(&point.month.encode());
            let step = Self::step(stock_balance, point, received_cases, position)?;

            tracing::debug!(
                "{}: 消耗 {}, 收貨 {} 箱 ({} 單位), 庫存 {} -> {}, 建議訂購 {} 箱",
                point.month,
                step.consumption,
                step.received_cases,
                step.received_units,
                stock_balance,
                step.closing_stock,
                step.reorder_cases
            );

            stock_balance = step.closing_stock;
            records.push(Self::to_record(point, &step));
        }

        Ok(records)
    }

    /// 轉為輸出紀錄（顯示數量四捨五入到 2 位小數）
    fn to_record(point: &ForecastPoint, step: &MonthStep) -> ProjectionRecord {
        ProjectionRecord {
            month: point.month,
            projected_stock: ReorderCalculator::round_display(step.closing_stock),
            safety_stock: ReorderCalculator::round_display(step.safety_stock),
            forecast_consumption: ReorderCalculator::round_display(step.consumption),
            received_cases: step.received_cases,
            minimum_required_stock: ReorderCalculator::round_display(step.minimum_required),
            reorder_cases: step.reorder_cases,
            below_minimum: step.below_minimum(),
        }
    }
}
