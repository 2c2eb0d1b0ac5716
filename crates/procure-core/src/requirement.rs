//! 需求模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 訂單明細（銷售訂單行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// 物料代碼
    pub item_code: String,

    /// 訂購數量
    pub quantity: Decimal,

    /// BOM 編號（無 BOM 時為 None）
    pub bom_reference: Option<String>,
}

impl OrderLine {
    /// 創建新的訂單明細
    pub fn new(item_code: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            item_code: item_code.into(),
            quantity,
            bom_reference: None,
        }
    }

    /// 建構器模式：設置 BOM 編號
    pub fn with_bom(mut self, bom_reference: impl Into<String>) -> Self {
        self.bom_reference = Some(bom_reference.into());
        self
    }

    /// 有效的 BOM 編號（空白視為未指定）
    pub fn bom(&self) -> Option<&str> {
        self.bom_reference
            .as_deref()
            .filter(|bom| !bom.trim().is_empty())
    }

    /// 檢查是否需要 BOM 展開
    pub fn has_bom(&self) -> bool {
        self.bom().is_some()
    }
}

/// BOM 展開後的子件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomComponent {
    /// 子件代碼
    pub item_code: String,

    /// 子件數量（已按父件數量放大）
    pub quantity: Decimal,
}

impl BomComponent {
    pub fn new(item_code: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            item_code: item_code.into(),
            quantity,
        }
    }
}

/// 物料需求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredItem {
    /// 物料代碼
    pub item_code: String,

    /// 需求數量
    pub quantity: Decimal,
}

/// 物料需求表
///
/// 每個物料代碼只有一筆，數量累加；保留首次出現的順序。
#[derive(Debug, Clone, Default)]
pub struct RequiredItems {
    entries: Vec<RequiredItem>,
    index: HashMap<String, usize>,
}

impl RequiredItems {
    /// 創建空的需求表
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加需求數量
    pub fn add(&mut self, item_code: &str, quantity: Decimal) -> crate::Result<()> {
        match self.index.get(item_code) {
            Some(&pos) => {
                let entry = &mut self.entries[pos];
                entry.quantity = entry
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| crate::ProcureError::QuantityOverflow(item_code.to_string()))?;
            }
            None => {
                self.index.insert(item_code.to_string(), self.entries.len());
                self.entries.push(RequiredItem {
                    item_code: item_code.to_string(),
                    quantity,
                });
            }
        }
        Ok(())
    }

    /// 查詢物料需求數量
    pub fn get(&self, item_code: &str) -> Option<Decimal> {
        self.index
            .get(item_code)
            .map(|&pos| self.entries[pos].quantity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RequiredItem> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
