//! 執行設定
//!
//! 設定載入順序：
//! 1. 程式內預設值
//! 2. 工作目錄下的 `replenish.toml`（可選）
//! 3. 環境變數 `REPLENISH__*`（例如 `REPLENISH__LOG__JSON=true`）

use config::{ConfigError, Environment, File};
use replenish_core::config::UNKNOWN_SKU;
use serde::Deserialize;

/// 應用設定
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// 日誌設定
    pub log: LogSettings,

    /// 預測設定
    pub forecast: ForecastSettings,

    /// 請求未提供物料代碼時使用的代碼
    pub default_sku: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    /// 日誌過濾器（RUST_LOG 優先）
    pub filter: String,

    /// 是否輸出 JSON 格式日誌
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastSettings {
    /// 移動平均視窗（月）
    pub moving_average_window: usize,
}

impl Settings {
    /// 從設定檔與環境變數載入
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("replenish")
    }

    /// 從指定設定檔（不含副檔名）與環境變數載入
    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .set_default("log.filter", "info")?
            .set_default("log.json", false)?
            .set_default("forecast.moving_average_window", 3)?
            .set_default("default_sku", UNKNOWN_SKU)?
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix("REPLENISH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log: LogSettings {
                filter: "info".to_string(),
                json: false,
            },
            forecast: ForecastSettings {
                moving_average_window: 3,
            },
            default_sku: UNKNOWN_SKU.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load_from("does-not-exist/replenish").unwrap();

        assert_eq!(settings.forecast.moving_average_window, 3);
        assert_eq!(settings.default_sku, "DESCONOCIDO");
        assert!(!settings.log.json);
    }
}
