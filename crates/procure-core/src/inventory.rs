//! 庫存與再訂購政策模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 庫存快照（外部事實，規劃流程只讀）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLevel {
    /// 物料代碼
    pub item_code: String,

    /// 倉庫
    pub warehouse: String,

    /// 現有庫存
    pub on_hand_quantity: Decimal,
}

impl StockLevel {
    pub fn new(item_code: impl Into<String>, warehouse: impl Into<String>, on_hand: Decimal) -> Self {
        Self {
            item_code: item_code.into(),
            warehouse: warehouse.into(),
            on_hand_quantity: on_hand,
        }
    }
}

/// 倉庫再訂購政策
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderPolicy {
    /// 倉庫
    pub warehouse: String,

    /// 再訂購點
    pub reorder_level: Decimal,

    /// 再訂購批量
    pub reorder_quantity: Decimal,
}

impl ReorderPolicy {
    /// 創建新的再訂購政策（負值視為 0）
    pub fn new(warehouse: impl Into<String>, reorder_level: Decimal, reorder_quantity: Decimal) -> Self {
        Self {
            warehouse: warehouse.into(),
            reorder_level: reorder_level.max(Decimal::ZERO),
            reorder_quantity: reorder_quantity.max(Decimal::ZERO),
        }
    }

    /// 沒有設定政策時的預設值（0 / 0）
    pub fn none(warehouse: impl Into<String>) -> Self {
        Self::new(warehouse, Decimal::ZERO, Decimal::ZERO)
    }

    /// 檢查庫存是否低於再訂購點
    pub fn is_triggered_by(&self, on_hand: Decimal) -> bool {
        on_hand < self.reorder_level
    }

    /// 補貨批量
    ///
    /// 觸發時加上固定的再訂購批量，而不是實際缺口。
    pub fn replenishment_for(&self, on_hand: Decimal) -> Decimal {
        if self.is_triggered_by(on_hand) {
            self.reorder_quantity
        } else {
            Decimal::ZERO
        }
    }
}
