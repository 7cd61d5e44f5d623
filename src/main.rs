//! 補貨預測命令列入口
//!
//! 從 stdin 讀取一份 JSON 請求，輸出一份 JSON 結果到 stdout。
//! 成功時結束碼為 0，失敗時輸出 `{"error": "..."}` 並以 1 結束。

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use replenish::{logging, ErrorDocument, RequestDocument, Settings};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    match execute() {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("補貨預測失敗: {:#}", e);
            let doc = ErrorDocument::new(format!("{:#}", e));
            match serde_json::to_string(&doc) {
                Ok(json) => println!("{}", json),
                Err(_) => println!(r#"{{"error":"unknown"}}"#),
            }
            ExitCode::FAILURE
        }
    }
}

fn execute() -> anyhow::Result<String> {
    let settings = Settings::load().context("讀取設定失敗")?;
    logging::init(&settings.log);

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("讀取 stdin 失敗")?;

    let doc: RequestDocument = if input.trim().is_empty() {
        RequestDocument::default()
    } else {
        serde_json::from_str(&input).context("請求 JSON 格式錯誤")?
    };

    let today = chrono::Local::now().date_naive();
    let response = replenish::run(&doc, &settings, today)?;

    Ok(serde_json::to_string(&response)?)
}
