//! 補貨預測主計算器

use chrono::NaiveDate;
use replenish_core::{
    ProjectionRun, ProjectionWarning, Result, StockPosition, WarningKind,
};
use rust_decimal::Decimal;

use crate::forecast::DemandForecaster;
use crate::horizon::HorizonBuilder;
use crate::projection::ProjectionEngine;
use crate::ProjectionRequest;

/// 補貨預測計算器
///
/// 流程：驗證輸入 → 解析時界並批次取得預測 → 逐月滾動庫存 → 組裝結果。
pub struct ReplenishmentPlanner<F> {
    /// 需求預測協作者
    forecaster: F,

    /// 時界建構器
    horizon: HorizonBuilder,
}

impl<F: DemandForecaster> ReplenishmentPlanner<F> {
    /// 創建新的計算器（預設 6 個月時界）
    pub fn new(forecaster: F) -> Self {
        Self {
            forecaster,
            horizon: HorizonBuilder::default(),
        }
    }

    /// 建構器模式：設置時界建構器
    pub fn with_horizon(mut self, horizon: HorizonBuilder) -> Self {
        self.horizon = horizon;
        self
    }

    /// 主計算入口
    ///
    /// 任一步驟失敗即回傳錯誤，不產生部分結果。
    pub fn plan(&self, request: &ProjectionRequest, today: NaiveDate) -> Result<ProjectionRun> {
        tracing::info!(
            "開始補貨預測：物料 {}，歷史 {} 個月，預計收貨 {} 個月",
            request.sku,
            request.history.len(),
            request.receipts.len()
        );

        let start_time = std::time::Instant::now();

        // Step 1: 輸入驗證
        tracing::debug!("Step 1: 輸入驗證");
        let position =
            StockPosition::new(request.sku.clone(), request.on_hand, request.units_per_case)?;

        let mut warnings = Self::input_warnings(request);

        // Step 2: 時界與預測
        tracing::debug!("Step 2: 解析時界，預測模型 {}", self.forecaster.name());
        let horizon = self.horizon.resolve(&request.history, today, &self.forecaster)?;

        if horizon.is_truncated() {
            let missing: Vec<String> = horizon.missing_months().iter().map(|m| m.encode()).collect();
            tracing::warn!(
                "預測只涵蓋 {}/{} 個月，缺少: {}",
                horizon.points.len(),
                horizon.requested.len(),
                missing.join(", ")
            );
            warnings.push(ProjectionWarning::warning(
                WarningKind::TruncatedHorizon,
                format!(
                    "預測只涵蓋 {}/{} 個月，缺少 {}",
                    horizon.points.len(),
                    horizon.requested.len(),
                    missing.join(", ")
                ),
            ));
        }

        for point in horizon.points.iter().filter(|p| p.predicted_demand < Decimal::ZERO) {
            warnings.push(ProjectionWarning::info(
                WarningKind::NegativeForecast,
                format!("{} 預測值 {} 為負，以 0 計算", point.month, point.predicted_demand),
            ));
        }

        // Step 3: 逐月滾動
        tracing::debug!("Step 3: 逐月滾動庫存");
        let records = ProjectionEngine::project(&position, &horizon.points, &request.receipts)?;

        let run = ProjectionRun {
            sku: position.sku().to_string(),
            model: self.forecaster.name().to_string(),
            initial_stock: position.on_hand(),
            units_per_case: position.units_per_case(),
            reference_month: horizon.reference_month,
            horizon_months: self.horizon.months(),
            records,
            warnings,
        };

        tracing::info!("補貨預測完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "預測月份 {}，低於最低需求 {} 個月，建議訂購合計 {} 箱",
            run.records.len(),
            run.shortage_months().count(),
            run.total_reorder_cases()
        );

        Ok(run)
    }

    /// 輸入解析階段被捨棄的標籤
    fn input_warnings(request: &ProjectionRequest) -> Vec<ProjectionWarning> {
        let mut warnings = Vec::new();

        for label in request.history.discarded_labels() {
            tracing::debug!("捨棄無效的歷史消耗標籤: {}", label);
            warnings.push(ProjectionWarning::info(
                WarningKind::DiscardedHistoryLabel,
                format!("歷史消耗標籤無法解析，已略過: {}", label),
            ));
        }

        for label in request.receipts.discarded_labels() {
            tracing::warn!("捨棄無效的採購單標籤: {}", label);
            warnings.push(ProjectionWarning::warning(
                WarningKind::DiscardedReceiptLabel,
                format!("採購單標籤必須為 ABBR-YYYY，已略過: {}", label),
            ));
        }

        warnings
    }
}
