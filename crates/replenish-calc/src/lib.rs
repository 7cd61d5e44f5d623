//! # Replenishment Calculation Engine
//!
//! 核心補貨預測計算引擎

pub mod alerts;
pub mod calculator;
pub mod forecast;
pub mod horizon;
pub mod projection;
pub mod reorder;

// Re-export 主要類型
pub use alerts::{AlertSeverity, ShortageAlert, ShortageLine};
pub use calculator::ReplenishmentPlanner;
pub use forecast::{ConstantForecaster, DemandForecaster, MovingAverageForecaster, TableForecaster};
pub use horizon::{Horizon, HorizonBuilder};
pub use projection::ProjectionEngine;
pub use reorder::ReorderCalculator;

use replenish_core::{ConsumptionHistory, ScheduledReceipts};
use rust_decimal::Decimal;

/// 單一物料的預測請求（未驗證）
#[derive(Debug, Clone)]
pub struct ProjectionRequest {
    /// 物料代碼
    pub sku: String,

    /// 現有總庫存
    pub on_hand: Decimal,

    /// 每箱單位數
    pub units_per_case: Decimal,

    /// 歷史消耗
    pub history: ConsumptionHistory,

    /// 預計收貨（箱）
    pub receipts: ScheduledReceipts,
}

impl ProjectionRequest {
    /// 創建新的預測請求
    pub fn new(sku: impl Into<String>, on_hand: Decimal, units_per_case: Decimal) -> Self {
        Self {
            sku: sku.into(),
            on_hand,
            units_per_case,
            history: ConsumptionHistory::new(),
            receipts: ScheduledReceipts::new(),
        }
    }

    /// 建構器模式：設置歷史消耗
    pub fn with_history(mut self, history: ConsumptionHistory) -> Self {
        self.history = history;
        self
    }

    /// 建構器模式：設置預計收貨
    pub fn with_receipts(mut self, receipts: ScheduledReceipts) -> Self {
        self.receipts = receipts;
        self
    }
}
