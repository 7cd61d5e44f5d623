//! 補貨預測固定參數
//!
//! 這些參數屬於補貨政策本身，不提供執行期設定。

use rust_decimal::Decimal;

/// 預測時界（月）
pub const HORIZON_MONTHS: u32 = 6;

/// 每月工作日數
pub const BUSINESS_DAYS_PER_MONTH: u32 = 22;

/// 安全庫存涵蓋天數
pub const SAFETY_COVERAGE_DAYS: u32 = 19;

/// 顯示數量的小數位數
pub const DISPLAY_DECIMALS: u32 = 2;

/// 未提供物料代碼時使用的預設值
pub const UNKNOWN_SKU: &str = "DESCONOCIDO";

/// 時界描述（輸出參數回顯使用）
pub fn horizon_description(months: u32) -> String {
    format!("{} meses", months)
}

/// 每月工作日數（Decimal）
pub fn business_days_per_month() -> Decimal {
    Decimal::from(BUSINESS_DAYS_PER_MONTH)
}

/// 安全庫存涵蓋天數（Decimal）
pub fn safety_coverage_days() -> Decimal {
    Decimal::from(SAFETY_COVERAGE_DAYS)
}
