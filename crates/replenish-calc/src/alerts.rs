//! 缺貨警示

use replenish_core::{ProjectionRun, ReplenishError, Result};
use rust_decimal::Decimal;
use serde::Serialize;

/// 警示嚴重度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

/// 單月缺貨明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortageLine {
    pub month: String,
    pub projected_stock: Decimal,
    pub minimum_required_stock: Decimal,
    pub reorder_cases: u64,
    pub reorder_units: Decimal,
}

/// 缺貨警示（僅組裝內容，不負責寄送或保存）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortageAlert {
    pub sku: String,
    pub severity: AlertSeverity,
    pub lines: Vec<ShortageLine>,
}

impl ShortageAlert {
    /// 由預測結果產生警示；沒有任何月份低於最低需求時回傳 None
    pub fn from_run(run: &ProjectionRun) -> Result<Option<Self>> {
        let lines = run
            .shortage_months()
            .map(|r| {
                let reorder_units = Decimal::from(r.reorder_cases)
                    .checked_mul(run.units_per_case)
                    .ok_or_else(|| {
                        ReplenishError::CalculationError(format!(
                            "{} 訂購單位數超出可表示範圍",
                            r.label()
                        ))
                    })?;

                Ok(ShortageLine {
                    month: r.label(),
                    projected_stock: r.projected_stock,
                    minimum_required_stock: r.minimum_required_stock,
                    reorder_cases: r.reorder_cases,
                    reorder_units,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if lines.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            sku: run.sku.clone(),
            severity: AlertSeverity::High,
            lines,
        }))
    }

    /// 純文字摘要
    pub fn message(&self) -> String {
        let mut out = format!("物料 {} 共 {} 個月低於最低需求庫存", self.sku, self.lines.len());
        for line in &self.lines {
            out.push_str(&format!(
                "\n{}: 預計庫存 {} 單位, 最低需求 {} 單位, 需訂購 {} 箱 ({} 單位)",
                line.month,
                line.projected_stock,
                line.minimum_required_stock,
                line.reorder_cases,
                line.reorder_units
            ));
        }
        out
    }
}
