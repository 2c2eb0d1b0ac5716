//! # Procure Core
//!
//! 採購規劃核心資料模型、外部協作介面與錯誤類型

pub mod config;
pub mod inventory;
pub mod memory;
pub mod plan;
pub mod project;
pub mod requirement;
pub mod source;
pub mod supplier;

// Re-export 主要類型
pub use config::ProcurementConfig;
pub use inventory::{ReorderPolicy, StockLevel};
pub use memory::{CatalogItem, InMemoryCatalog};
pub use plan::{
    BatchLine, OrderDecision, PurchaseOrderRequest, ResolvedLine, SupplierBatch,
    UnresolvedItem, UnresolvedReason,
};
pub use project::{LinkedOrderLine, MaterialRequestRow, ProjectItem, SubAssemblyRow};
pub use requirement::{BomComponent, OrderLine, RequiredItem, RequiredItems};
pub use source::{
    BomSource, ItemMaster, OrderGateway, OrderSource, PendingQuantityLedger, ProductionPlanSource,
    ProjectMasterSource, PurchaseHistory, StockLedger, SupplierDirectory, WarehouseDirectory,
};
pub use supplier::{PriceListEntry, PurchaseRecord, QuoteSource, SupplierProfile, SupplierQuote};

use rust_decimal::Decimal;

/// 採購規劃錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ProcureError {
    #[error("BOM 展開錯誤: {bom} ({reason})")]
    BomExplosion { bom: String, reason: String },

    #[error("找不到訂單: {0}")]
    OrderNotFound(String),

    #[error("採購單建立失敗，供應商 {supplier}: {reason}")]
    OrderCreation { supplier: String, reason: String },

    #[error("採購單提交失敗 {order_id}: {reason}")]
    OrderSubmission { order_id: String, reason: String },

    #[error("採購單通知發送失敗 {order_id}: {reason}")]
    Notification { order_id: String, reason: String },

    #[error("供應商 {0} 沒有可用的聯絡郵件")]
    MissingRecipient(String),

    #[error("配置錯誤: {0}")]
    InvalidConfig(String),

    #[error("找不到關聯的專案待處理列: {0}")]
    PendingRowNotFound(String),

    #[error("專案數量 ({project_qty}) 不可超過待處理數量 ({pending_qty})")]
    ProjectQtyExceedsPending {
        project_qty: Decimal,
        pending_qty: Decimal,
    },

    #[error("找不到專案主檔: {0}")]
    ProjectNotFound(String),

    #[error("專案主檔 {0} 沒有成品列")]
    EmptyProject(String),

    #[error("物料 {0} 數量超出可表示範圍")]
    QuantityOverflow(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ProcureError>;
