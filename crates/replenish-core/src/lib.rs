//! # Replenish Core
//!
//! 核心資料模型與類型定義

pub mod calendar;
pub mod config;
pub mod demand;
pub mod inventory;
pub mod plan;
pub mod supply;

// Re-export 主要類型
pub use calendar::{CalendarMonth, Month};
pub use config::{BUSINESS_DAYS_PER_MONTH, HORIZON_MONTHS, SAFETY_COVERAGE_DAYS};
pub use demand::{ConsumptionHistory, ForecastPoint};
pub use inventory::StockPosition;
pub use plan::{ProjectionRecord, ProjectionRun, ProjectionWarning, WarningKind, WarningSeverity};
pub use supply::{PurchaseOrder, PurchaseOrderStatus, ScheduledReceipts};

use rust_decimal::Decimal;

/// 補貨預測錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ReplenishError {
    #[error("每箱單位數必須大於 0: {0}")]
    InvalidUnitsPerCase(Decimal),

    #[error("現有庫存不可為負數: {0}")]
    NegativeStock(Decimal),

    #[error("無效的月份標籤: {0}")]
    InvalidMonthLabel(String),

    #[error("無法取得需求預測: {0}")]
    ForecastUnavailable(String),

    #[error("採購單驗收數量超過訂購數量: 驗收 {received}, 訂購 {ordered}")]
    OverReceived { received: u32, ordered: u32 },

    #[error("計算錯誤: {0}")]
    CalculationError(String),
}

impl ReplenishError {
    /// 是否為輸入驗證錯誤（在任何月份計算前即中止）
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ReplenishError::InvalidUnitsPerCase(_)
                | ReplenishError::NegativeStock(_)
                | ReplenishError::OverReceived { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ReplenishError>;
