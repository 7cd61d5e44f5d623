//! 庫存預測結果模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarMonth;
use crate::config::horizon_description;

/// 單月庫存預測紀錄
///
/// `minimum_required_stock = forecast_consumption + safety_stock`，
/// `reorder_cases = ceil(max(minimum_required_stock - projected_stock, 0) / 每箱單位數)`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    /// 月份（序列化為 `ABBR-YYYY`）
    pub month: CalendarMonth,

    /// 月末預計庫存（≥ 0）
    pub projected_stock: Decimal,

    /// 安全庫存
    pub safety_stock: Decimal,

    /// 預測消耗
    pub forecast_consumption: Decimal,

    /// 當月預計收貨箱數（原樣回顯）
    pub received_cases: u32,

    /// 最低需求庫存
    pub minimum_required_stock: Decimal,

    /// 建議訂購箱數
    pub reorder_cases: u64,

    /// 是否低於最低需求庫存
    pub below_minimum: bool,
}

impl ProjectionRecord {
    /// 月份標籤
    pub fn label(&self) -> String {
        self.month.encode()
    }

    /// 缺口（最低需求 - 預計庫存，不小於 0）
    pub fn shortfall(&self) -> Decimal {
        (self.minimum_required_stock - self.projected_stock).max(Decimal::ZERO)
    }
}

/// 預測執行警告類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// 歷史消耗標籤無法解析
    DiscardedHistoryLabel,
    /// 採購單標籤無法解析
    DiscardedReceiptLabel,
    /// 預測月份不足，時界被截短
    TruncatedHorizon,
    /// 預測值為負，已截斷為 0
    NegativeForecast,
}

/// 警告嚴重度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    Info,
    Warning,
}

/// 預測執行警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionWarning {
    pub kind: WarningKind,
    pub message: String,
    pub severity: WarningSeverity,
}

impl ProjectionWarning {
    pub fn new(kind: WarningKind, message: String, severity: WarningSeverity) -> Self {
        Self {
            kind,
            message,
            severity,
        }
    }

    pub fn info(kind: WarningKind, message: String) -> Self {
        Self::new(kind, message, WarningSeverity::Info)
    }

    pub fn warning(kind: WarningKind, message: String) -> Self {
        Self::new(kind, message, WarningSeverity::Warning)
    }
}

/// 單一物料的完整預測結果
///
/// 每次執行建立一次，建立後不再修改。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionRun {
    /// 物料代碼
    pub sku: String,

    /// 預測模型名稱
    pub model: String,

    /// 初始庫存
    pub initial_stock: Decimal,

    /// 每箱單位數
    pub units_per_case: Decimal,

    /// 參考月份（最後一個有效消耗月份，或當月）
    pub reference_month: CalendarMonth,

    /// 要求的時界月數
    pub horizon_months: u32,

    /// 預測紀錄（依日曆順序）
    pub records: Vec<ProjectionRecord>,

    /// 警告
    pub warnings: Vec<ProjectionWarning>,
}

impl ProjectionRun {
    /// 時界描述
    pub fn horizon_description(&self) -> String {
        horizon_description(self.horizon_months)
    }

    /// 低於最低需求的月份
    pub fn shortage_months(&self) -> impl Iterator<Item = &ProjectionRecord> {
        self.records.iter().filter(|r| r.below_minimum)
    }

    /// 是否有任何月份低於最低需求
    pub fn has_shortage(&self) -> bool {
        self.records.iter().any(|r| r.below_minimum)
    }

    /// 時界是否被截短
    pub fn is_truncated(&self) -> bool {
        (self.records.len() as u32) < self.horizon_months
    }

    /// 建議訂購箱數合計
    pub fn total_reorder_cases(&self) -> u64 {
        self.records
            .iter()
            .fold(0u64, |total, r| total.saturating_add(r.reorder_cases))
    }
}
