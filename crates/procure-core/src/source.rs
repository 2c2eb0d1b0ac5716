//! 外部協作介面
//!
//! 規劃流程只透過這些 trait 讀取 ERP 資料或建立單據，本身不做任何儲存。

use rust_decimal::Decimal;

use crate::inventory::ReorderPolicy;
use crate::plan::PurchaseOrderRequest;
use crate::project::{LinkedOrderLine, ProjectItem};
use crate::requirement::{BomComponent, OrderLine};
use crate::supplier::{PriceListEntry, PurchaseRecord, SupplierProfile};
use crate::Result;

/// 訂單來源
pub trait OrderSource {
    /// 讀取訂單明細
    fn order_lines(&self, order_id: &str) -> Result<Vec<OrderLine>>;
}

/// BOM 服務
pub trait BomSource {
    /// 物料的預設 BOM
    fn resolve_default_bom(&self, item_code: &str) -> Option<String>;

    /// 展開 BOM（多層攤平），子件數量已乘上 `quantity`
    fn explode_bom(&self, bom: &str, company: &str, quantity: Decimal) -> Result<Vec<BomComponent>>;
}

/// 物料主檔
pub trait ItemMaster {
    /// 是否為可採購物料
    fn is_purchasable(&self, item_code: &str) -> bool;

    /// 倉庫再訂購政策
    fn reorder_policy(&self, item_code: &str, warehouse: &str) -> Option<ReorderPolicy>;

    /// 最小訂購量
    fn minimum_order_quantity(&self, item_code: &str) -> Decimal;

    /// 是否設定了任何供應商
    fn has_configured_suppliers(&self, item_code: &str) -> bool;

    /// 第一個設定的供應商
    fn default_supplier(&self, item_code: &str) -> Option<String>;
}

/// 庫存帳
pub trait StockLedger {
    /// 現有庫存（沒有紀錄時為 0）
    fn stock_level(&self, item_code: &str, warehouse: &str) -> Decimal;
}

/// 採購歷史
pub trait PurchaseHistory {
    /// 最近的已提交採購紀錄（交易日期遞減，最多 `limit` 筆）
    fn recent_purchases(&self, item_code: &str, limit: usize) -> Vec<PurchaseRecord>;

    /// 全部已提交採購紀錄
    fn all_purchases(&self, item_code: &str) -> Vec<PurchaseRecord>;

    /// 最低的採購價目表價格
    fn lowest_buying_price(&self, item_code: &str) -> Option<PriceListEntry>;
}

/// 倉庫目錄
pub trait WarehouseDirectory {
    /// 全域預設倉庫
    fn default_warehouse(&self) -> Option<String>;

    /// 公司第一個啟用中的非群組倉庫
    fn first_active_warehouse(&self, company: &str) -> Option<String>;
}

/// 供應商目錄
pub trait SupplierDirectory {
    fn supplier_profile(&self, supplier: &str) -> Option<SupplierProfile>;
}

/// 採購單建立與通知
pub trait OrderGateway {
    /// 建立採購單，回傳單號
    fn create_purchase_order(&mut self, request: &PurchaseOrderRequest) -> Result<String>;

    /// 提交採購單
    fn submit_order(&mut self, order_id: &str) -> Result<()>;

    /// 發送採購單通知
    fn send_order_notification(&mut self, order_id: &str, recipient: &str) -> Result<()>;

    /// 回寫無法下單的物料
    fn report_unresolved(&mut self, sales_order: &str, text: &str) -> Result<()>;

    /// 提交本次執行的所有變更
    fn commit(&mut self) -> Result<()> {
        Ok(())
    }
}

/// 銷售訂單專案待處理數量
pub trait PendingQuantityLedger {
    fn pending_qty(&self, reference: &str) -> Option<Decimal>;

    fn set_pending_qty(&mut self, reference: &str, quantity: Decimal) -> Result<()>;
}

/// 專案主檔
pub trait ProjectMasterSource {
    /// 專案的成品列（專案不存在時回傳 `ProjectNotFound`）
    fn project_items(&self, project_master: &str) -> Result<Vec<ProjectItem>>;

    /// BOM 對應的原物料成本（沒有 BOM 設計資料時為 None）
    fn bom_raw_material_cost(&self, bom: &str) -> Option<Decimal>;
}

/// 生產計劃相關查詢
pub trait ProductionPlanSource {
    /// 已提交採購單中關聯到銷售訂單的明細
    fn linked_order_lines(&self, sales_order: &str) -> Vec<LinkedOrderLine>;

    /// 物料在成品 BOM 中為可自製半成品時，回傳其上層成品
    fn sub_assembly_parent(&self, bom: &str, item_code: &str) -> Option<String>;
}
