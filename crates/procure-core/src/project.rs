//! 專案主檔與生產計劃物料模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 專案主檔中的成品列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    /// 專案列參照
    pub reference: String,

    /// 成品代碼
    pub item_code: String,

    /// 成品 BOM
    pub bom_reference: Option<String>,

    /// 每單位專案的計劃數量
    pub planned_qty: Decimal,

    pub description: Option<String>,
}

impl ProjectItem {
    pub fn new(reference: impl Into<String>, item_code: impl Into<String>, planned_qty: Decimal) -> Self {
        Self {
            reference: reference.into(),
            item_code: item_code.into(),
            bom_reference: None,
            planned_qty,
            description: None,
        }
    }

    /// 建構器模式：設置成品 BOM
    pub fn with_bom(mut self, bom: impl Into<String>) -> Self {
        self.bom_reference = Some(bom.into());
        self
    }

    /// 建構器模式：設置說明
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// 已提交採購單中關聯到銷售訂單的明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedOrderLine {
    pub purchase_order: String,
    pub item_code: String,
    pub quantity: Decimal,
}

impl LinkedOrderLine {
    pub fn new(purchase_order: impl Into<String>, item_code: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            purchase_order: purchase_order.into(),
            item_code: item_code.into(),
            quantity,
        }
    }
}

/// 生產計劃的物料需求列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRequestRow {
    /// 物料代碼
    pub item_code: String,

    /// 請購數量（扣除已下單後）
    pub quantity: Decimal,

    /// BOM 需求數量
    pub required_bom_qty: Decimal,

    /// 已下單數量
    pub ordered_qty: Decimal,
}

impl MaterialRequestRow {
    pub fn new(item_code: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            item_code: item_code.into(),
            quantity,
            required_bom_qty: quantity,
            ordered_qty: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置 BOM 需求數量
    pub fn with_required_bom_qty(mut self, qty: Decimal) -> Self {
        self.required_bom_qty = qty;
        self
    }
}

/// 改為自製的半成品列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubAssemblyRow {
    pub production_item: String,
    pub quantity: Decimal,
    pub parent_item_code: String,
    pub schedule_date: NaiveDate,
}
