//! 供應模型：採購單與預計收貨

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::CalendarMonth;
use crate::{ReplenishError, Result};

/// 採購單狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    /// 待收貨
    Pending,
    /// 部分收貨
    Partial,
    /// 已完成
    Completed,
    /// 已取消
    Cancelled,
}

impl PurchaseOrderStatus {
    /// 是否仍為未結訂單（計入預計收貨）
    pub fn is_open(self) -> bool {
        matches!(self, PurchaseOrderStatus::Pending | PurchaseOrderStatus::Partial)
    }
}

/// 採購單（以箱為單位）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// 採購單ID
    pub id: Uuid,

    /// 物料代碼
    pub sku: String,

    /// 到貨月份
    pub month: CalendarMonth,

    /// 訂購箱數
    pub cases: u32,

    /// 已驗收箱數
    pub received_cases: u32,

    /// 狀態
    pub status: PurchaseOrderStatus,
}

impl PurchaseOrder {
    /// 創建新的採購單（待收貨）
    pub fn new(sku: impl Into<String>, month: CalendarMonth, cases: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            sku: sku.into(),
            month,
            cases,
            received_cases: 0,
            status: PurchaseOrderStatus::Pending,
        }
    }

    /// 建構器模式：登錄已驗收箱數，並依驗收數量更新狀態
    pub fn with_received(mut self, received_cases: u32) -> Result<Self> {
        self.receive(received_cases)?;
        Ok(self)
    }

    /// 登錄已驗收箱數
    pub fn receive(&mut self, received_cases: u32) -> Result<()> {
        if received_cases > self.cases {
            return Err(ReplenishError::OverReceived {
                received: received_cases,
                ordered: self.cases,
            });
        }
        self.received_cases = received_cases;
        self.status = if received_cases == self.cases {
            PurchaseOrderStatus::Completed
        } else if received_cases > 0 {
            PurchaseOrderStatus::Partial
        } else {
            PurchaseOrderStatus::Pending
        };
        Ok(())
    }

    /// 取消採購單
    pub fn cancel(&mut self) {
        self.status = PurchaseOrderStatus::Cancelled;
    }

    /// 到貨月份標籤
    pub fn label(&self) -> String {
        self.month.encode()
    }
}

/// 預計收貨（月份標籤 → 箱數）
///
/// 鍵一律為標準標籤 `ABBR-YYYY`，預測引擎以編碼後的月份標籤查找。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledReceipts {
    cases_by_label: BTreeMap<String, u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    discarded: Vec<String>,
}

impl ScheduledReceipts {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由「標籤 → 箱數」建立
    ///
    /// 鍵會去空白並轉大寫，以嚴格格式 `ABBR-YYYY` 解析；`DEC` 視為 `DIC`。
    /// 無法解析的鍵不可能對應任何月份，直接捨棄並記錄。
    pub fn from_labels<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: AsRef<str>,
    {
        let mut receipts = Self::new();
        for (label, cases) in entries {
            let raw = label.as_ref();
            let normalized = raw.trim().to_uppercase().replacen("DEC-", "DIC-", 1);
            match CalendarMonth::decode_strict(&normalized) {
                Ok(month) => receipts.add(month, cases),
                Err(_) => receipts.discarded.push(raw.to_string()),
            }
        }
        receipts
    }

    /// 由採購單彙總（只計入指定物料的未結訂單）
    pub fn from_orders(sku: &str, orders: &[PurchaseOrder]) -> Self {
        let mut receipts = Self::new();
        for order in orders
            .iter()
            .filter(|o| o.sku == sku && o.status.is_open())
        {
            receipts.add(order.month, order.cases);
        }
        receipts
    }

    /// 建構器模式：添加收貨
    pub fn with_receipt(mut self, month: CalendarMonth, cases: u32) -> Self {
        self.add(month, cases);
        self
    }

    /// 添加收貨（同月份累加）
    pub fn add(&mut self, month: CalendarMonth, cases: u32) {
        let entry = self.cases_by_label.entry(month.encode()).or_insert(0);
        *entry = entry.saturating_add(cases);
    }

    /// 依標籤查詢箱數，缺少時為 0
    pub fn cases_for_label(&self, label: &str) -> u32 {
        self.cases_by_label.get(label).copied().unwrap_or(0)
    }

    /// 依月份查詢箱數，缺少時為 0
    pub fn cases_for(&self, month: CalendarMonth) -> u32 {
        self.cases_for_label(&month.encode())
    }

    /// 被捨棄的標籤
    pub fn discarded_labels(&self) -> &[String] {
        &self.discarded
    }

    pub fn len(&self) -> usize {
        self.cases_by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases_by_label.is_empty()
    }
}
