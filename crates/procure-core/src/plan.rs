//! 採購計劃模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::supplier::SupplierQuote;

/// 訂購決策（僅針對可採購且訂購量大於 0 的物料）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDecision {
    /// 物料代碼
    pub item_code: String,

    /// 訂購數量
    pub order_quantity: Decimal,

    /// 需求數量
    pub required_quantity: Decimal,

    /// 目前庫存
    pub current_stock: Decimal,

    /// 再訂購點
    pub reorder_level: Decimal,
}

impl OrderDecision {
    /// 訂購量中超出需求的部分（補貨批量或最小訂購量墊高）
    pub fn surplus(&self) -> Decimal {
        (self.order_quantity - self.required_quantity).max(Decimal::ZERO)
    }
}

/// 已決定供應商的訂購行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLine {
    pub item_code: String,
    pub quantity: Decimal,
    pub quote: SupplierQuote,
}

impl ResolvedLine {
    pub fn new(item_code: impl Into<String>, quantity: Decimal, quote: SupplierQuote) -> Self {
        Self {
            item_code: item_code.into(),
            quantity,
            quote,
        }
    }
}

/// 供應商批次中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchLine {
    pub item_code: String,
    pub quantity: Decimal,
    pub rate: Decimal,
}

impl BatchLine {
    /// 行金額（超出範圍時取極值）
    pub fn amount(&self) -> Decimal {
        self.quantity.saturating_mul(self.rate)
    }
}

/// 供應商批次（一張採購單）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierBatch {
    /// 供應商
    pub supplier: String,

    /// 明細（依出現順序）
    pub lines: Vec<BatchLine>,
}

impl SupplierBatch {
    pub fn new(supplier: impl Into<String>) -> Self {
        Self {
            supplier: supplier.into(),
            lines: Vec::new(),
        }
    }

    /// 添加明細
    pub fn add_line(&mut self, item_code: impl Into<String>, quantity: Decimal, rate: Decimal) {
        self.lines.push(BatchLine {
            item_code: item_code.into(),
            quantity,
            rate,
        });
    }

    /// 批次總金額
    pub fn total_amount(&self) -> Decimal {
        self.lines
            .iter()
            .map(BatchLine::amount)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

/// 無法決定供應商的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnresolvedReason {
    /// 物料主檔沒有設定任何供應商
    NoSupplierConfigured,
    /// 所有報價層級都沒有結果
    NoPurchaseHistory,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::NoSupplierConfigured => write!(f, "no supplier"),
            UnresolvedReason::NoPurchaseHistory => write!(f, "no purchase history"),
        }
    }
}

/// 無法下單的物料
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnresolvedItem {
    pub item_code: String,
    pub reason: UnresolvedReason,
}

impl UnresolvedItem {
    pub fn new(item_code: impl Into<String>, reason: UnresolvedReason) -> Self {
        Self {
            item_code: item_code.into(),
            reason,
        }
    }
}

impl fmt::Display for UnresolvedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.item_code, self.reason)
    }
}

/// 交給外部系統建立採購單的請求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderRequest {
    /// 供應商
    pub supplier: String,

    /// 公司
    pub company: String,

    /// 收貨倉庫
    pub warehouse: String,

    /// 來源銷售訂單
    pub sales_order: String,

    /// 交易日期
    pub transaction_date: NaiveDate,

    /// 預計交貨日期
    pub schedule_date: NaiveDate,

    /// 明細
    pub lines: Vec<BatchLine>,
}
