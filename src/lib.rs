//! # Replenish
//!
//! 單一物料六個月庫存預測與補貨建議：請求解析、預測模型選擇與結果輸出

pub mod io;
pub mod logging;
pub mod settings;

use chrono::NaiveDate;
use replenish_calc::{
    DemandForecaster, MovingAverageForecaster, ReplenishmentPlanner, TableForecaster,
};
use replenish_core::Result;

pub use io::{ErrorDocument, RequestDocument, ResponseDocument};
pub use settings::Settings;

/// 依請求選擇預測模型
///
/// 請求附帶預測序列時直接使用；否則以歷史消耗做移動平均。
pub fn select_forecaster(doc: &RequestDocument, settings: &Settings) -> Box<dyn DemandForecaster> {
    match &doc.forecast {
        Some(series) => {
            let name = doc.model.clone().unwrap_or_else(|| "table".to_string());
            Box::new(TableForecaster::from_labels(
                name,
                series.iter().map(|(k, v)| (k.as_str(), *v)),
            ))
        }
        None => Box::new(MovingAverageForecaster::new(
            settings.forecast.moving_average_window,
        )),
    }
}

/// 執行一次預測
pub fn run(doc: &RequestDocument, settings: &Settings, today: NaiveDate) -> Result<ResponseDocument> {
    let request = doc.to_request(&settings.default_sku);
    let planner = ReplenishmentPlanner::new(select_forecaster(doc, settings));
    let projection = planner.plan(&request, today)?;
    ResponseDocument::try_from(projection)
}
