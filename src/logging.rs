//! 日誌系統初始化
//!
//! 日誌一律寫到 stderr，stdout 只輸出 JSON 結果。

use tracing_subscriber::{fmt, EnvFilter};

use crate::settings::LogSettings;

/// 初始化日誌系統
///
/// # 環境變數
/// - RUST_LOG: 日誌級別過濾器（優先於設定檔）
///   例如: RUST_LOG=debug 或 RUST_LOG=replenish_calc=trace
pub fn init(settings: &LogSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    let result = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("日誌系統初始化失敗: {}", e);
    }
}

/// 初始化測試環境的日誌系統
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
