//! 請求與回應文件格式
//!
//! 請求欄位同時接受原系統的大寫鍵名（`CODIGO`, `STOCK_TOTAL`, `UNID_CAJA`, `consumos`）。

use std::collections::BTreeMap;

use replenish_calc::{ProjectionRequest, ShortageAlert};
use replenish_core::{
    ConsumptionHistory, ProjectionRecord, ProjectionRun, ProjectionWarning, ReplenishError,
    ScheduledReceipts,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 預測請求文件
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestDocument {
    /// 物料代碼
    #[serde(default, alias = "CODIGO")]
    pub sku: Option<String>,

    /// 現有總庫存（預設 0）
    #[serde(default, alias = "STOCK_TOTAL")]
    pub on_hand: Option<Decimal>,

    /// 每箱單位數（預設 1）
    #[serde(default, alias = "UNID_CAJA")]
    pub units_per_case: Option<Decimal>,

    /// 月份標籤 → 歷史消耗
    #[serde(default, alias = "consumos")]
    pub consumption: BTreeMap<String, Decimal>,

    /// `ABBR-YYYY` → 預計收貨箱數
    #[serde(default)]
    pub purchase_orders: BTreeMap<String, u32>,

    /// 外部模型匯出的預測（月份標籤 → 需求）
    #[serde(default)]
    pub forecast: Option<BTreeMap<String, Decimal>>,

    /// 外部模型名稱
    #[serde(default)]
    pub model: Option<String>,
}

impl RequestDocument {
    /// 轉為計算請求
    pub fn to_request(&self, default_sku: &str) -> ProjectionRequest {
        let sku = self
            .sku
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| default_sku.to_string());

        ProjectionRequest::new(
            sku,
            self.on_hand.unwrap_or(Decimal::ZERO),
            self.units_per_case.unwrap_or(Decimal::ONE),
        )
        .with_history(ConsumptionHistory::from_labels(
            self.consumption.iter().map(|(k, v)| (k.as_str(), *v)),
        ))
        .with_receipts(ScheduledReceipts::from_labels(
            self.purchase_orders.iter().map(|(k, v)| (k.as_str(), *v)),
        ))
    }
}

/// 參數回顯
#[derive(Debug, Clone, Serialize)]
pub struct BaseParameters {
    pub model: String,
    pub initial_stock: Decimal,
    pub units_per_case: Decimal,
    pub horizon: String,
    pub reference_month: String,
}

/// 成功回應
#[derive(Debug, Clone, Serialize)]
pub struct ResponseDocument {
    pub sku: String,
    pub base_parameters: BaseParameters,
    pub projections: Vec<ProjectionRecord>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ProjectionWarning>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<ShortageAlert>,
}

impl TryFrom<ProjectionRun> for ResponseDocument {
    type Error = ReplenishError;

    fn try_from(run: ProjectionRun) -> Result<Self, Self::Error> {
        let alert = ShortageAlert::from_run(&run)?;
        Ok(Self {
            base_parameters: BaseParameters {
                model: run.model.clone(),
                initial_stock: run.initial_stock,
                units_per_case: run.units_per_case,
                horizon: run.horizon_description(),
                reference_month: run.reference_month.encode(),
            },
            sku: run.sku,
            projections: run.records,
            warnings: run.warnings,
            alert,
        })
    }
}

/// 失敗回應
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDocument {
    pub error: String,
}

impl ErrorDocument {
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}
