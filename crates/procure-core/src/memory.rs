//! 記憶體內資料目錄
//!
//! 以 HashMap 實作全部查詢介面，用於單機計算與測試。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::inventory::ReorderPolicy;
use crate::project::{LinkedOrderLine, ProjectItem};
use crate::requirement::{BomComponent, OrderLine};
use crate::source::{
    BomSource, ItemMaster, OrderSource, PendingQuantityLedger, ProductionPlanSource,
    ProjectMasterSource, PurchaseHistory, StockLedger, SupplierDirectory, WarehouseDirectory,
};
use crate::supplier::{PriceListEntry, PurchaseRecord, SupplierProfile};
use crate::{ProcureError, Result};

/// 物料主檔資料
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    /// 物料代碼
    pub item_code: String,

    /// 是否可採購
    pub is_purchase_item: bool,

    /// 最小訂購量
    pub min_order_qty: Decimal,

    /// 預設 BOM
    pub default_bom: Option<String>,

    /// 設定的供應商（依序）
    pub suppliers: Vec<String>,

    /// 各倉庫再訂購政策
    pub reorder_levels: Vec<ReorderPolicy>,
}

impl CatalogItem {
    /// 創建可採購物料
    pub fn new(item_code: impl Into<String>) -> Self {
        Self {
            item_code: item_code.into(),
            is_purchase_item: true,
            min_order_qty: Decimal::ZERO,
            default_bom: None,
            suppliers: Vec::new(),
            reorder_levels: Vec::new(),
        }
    }

    /// 建構器模式：設為不可採購
    pub fn not_purchasable(mut self) -> Self {
        self.is_purchase_item = false;
        self
    }

    /// 建構器模式：設置最小訂購量
    pub fn with_min_order_qty(mut self, qty: Decimal) -> Self {
        self.min_order_qty = qty;
        self
    }

    /// 建構器模式：設置預設 BOM
    pub fn with_default_bom(mut self, bom: impl Into<String>) -> Self {
        self.default_bom = Some(bom.into());
        self
    }

    /// 建構器模式：添加供應商
    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.suppliers.push(supplier.into());
        self
    }

    /// 建構器模式：添加再訂購政策
    pub fn with_reorder_policy(mut self, policy: ReorderPolicy) -> Self {
        self.reorder_levels.push(policy);
        self
    }
}

/// 記憶體內資料目錄
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    orders: HashMap<String, Vec<OrderLine>>,
    items: HashMap<String, CatalogItem>,
    boms: HashMap<String, Vec<BomComponent>>,
    stock: HashMap<(String, String), Decimal>,
    purchases: HashMap<String, Vec<PurchaseRecord>>,
    price_lists: HashMap<String, Vec<PriceListEntry>>,
    default_warehouse: Option<String>,
    company_warehouses: HashMap<String, Vec<String>>,
    suppliers: HashMap<String, SupplierProfile>,
    pending: HashMap<String, Decimal>,
    projects: HashMap<String, Vec<ProjectItem>>,
    bom_costs: HashMap<String, Decimal>,
    linked_orders: HashMap<String, Vec<LinkedOrderLine>>,
    sub_assemblies: HashMap<(String, String), String>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加訂單
    pub fn add_order(&mut self, order_id: impl Into<String>, lines: Vec<OrderLine>) {
        self.orders.insert(order_id.into(), lines);
    }

    /// 添加物料
    pub fn add_item(&mut self, item: CatalogItem) {
        self.items.insert(item.item_code.clone(), item);
    }

    /// 添加 BOM（子件為單位用量）
    pub fn add_bom(&mut self, bom: impl Into<String>, components: Vec<BomComponent>) {
        self.boms.insert(bom.into(), components);
    }

    /// 設置庫存
    pub fn set_stock(&mut self, item_code: &str, warehouse: &str, quantity: Decimal) {
        self.stock
            .insert((item_code.to_string(), warehouse.to_string()), quantity);
    }

    /// 添加已提交採購紀錄
    pub fn add_purchase(&mut self, item_code: &str, record: PurchaseRecord) {
        self.purchases
            .entry(item_code.to_string())
            .or_default()
            .push(record);
    }

    /// 添加採購價目
    pub fn add_price(&mut self, item_code: &str, entry: PriceListEntry) {
        self.price_lists
            .entry(item_code.to_string())
            .or_default()
            .push(entry);
    }

    /// 設置全域預設倉庫
    pub fn set_default_warehouse(&mut self, warehouse: impl Into<String>) {
        self.default_warehouse = Some(warehouse.into());
    }

    /// 添加公司倉庫（依建立順序）
    pub fn add_company_warehouse(&mut self, company: &str, warehouse: impl Into<String>) {
        self.company_warehouses
            .entry(company.to_string())
            .or_default()
            .push(warehouse.into());
    }

    /// 添加供應商設定
    pub fn add_supplier(&mut self, profile: SupplierProfile) {
        self.suppliers.insert(profile.supplier.clone(), profile);
    }

    /// 設置專案待處理數量
    pub fn set_pending(&mut self, reference: impl Into<String>, quantity: Decimal) {
        self.pending.insert(reference.into(), quantity);
    }

    /// 添加專案主檔
    pub fn add_project(&mut self, project_master: impl Into<String>, items: Vec<ProjectItem>) {
        self.projects.insert(project_master.into(), items);
    }

    /// 設置 BOM 原物料成本
    pub fn set_bom_cost(&mut self, bom: impl Into<String>, cost: Decimal) {
        self.bom_costs.insert(bom.into(), cost);
    }

    /// 添加關聯到銷售訂單的已提交採購明細
    pub fn add_linked_order_line(&mut self, sales_order: &str, line: LinkedOrderLine) {
        self.linked_orders
            .entry(sales_order.to_string())
            .or_default()
            .push(line);
    }

    /// 標記成品 BOM 中可自製的半成品
    pub fn add_sub_assembly(&mut self, bom: &str, item_code: &str, parent_item_code: impl Into<String>) {
        self.sub_assemblies.insert(
            (bom.to_string(), item_code.to_string()),
            parent_item_code.into(),
        );
    }

    fn item(&self, item_code: &str) -> Option<&CatalogItem> {
        self.items.get(item_code)
    }
}

impl OrderSource for InMemoryCatalog {
    fn order_lines(&self, order_id: &str) -> Result<Vec<OrderLine>> {
        self.orders
            .get(order_id)
            .cloned()
            .ok_or_else(|| ProcureError::OrderNotFound(order_id.to_string()))
    }
}

impl BomSource for InMemoryCatalog {
    fn resolve_default_bom(&self, item_code: &str) -> Option<String> {
        self.item(item_code).and_then(|i| i.default_bom.clone())
    }

    fn explode_bom(&self, bom: &str, _company: &str, quantity: Decimal) -> Result<Vec<BomComponent>> {
        let components = self.boms.get(bom).ok_or_else(|| ProcureError::BomExplosion {
            bom: bom.to_string(),
            reason: "BOM 不存在".to_string(),
        })?;

        Ok(components
            .iter()
            .map(|c| BomComponent::new(c.item_code.clone(), c.quantity * quantity))
            .collect())
    }
}

impl ItemMaster for InMemoryCatalog {
    fn is_purchasable(&self, item_code: &str) -> bool {
        self.item(item_code)
            .map(|i| i.is_purchase_item)
            .unwrap_or(false)
    }

    fn reorder_policy(&self, item_code: &str, warehouse: &str) -> Option<ReorderPolicy> {
        self.item(item_code)?
            .reorder_levels
            .iter()
            .find(|p| p.warehouse == warehouse)
            .cloned()
    }

    fn minimum_order_quantity(&self, item_code: &str) -> Decimal {
        self.item(item_code)
            .map(|i| i.min_order_qty)
            .unwrap_or(Decimal::ZERO)
    }

    fn has_configured_suppliers(&self, item_code: &str) -> bool {
        self.item(item_code)
            .map(|i| !i.suppliers.is_empty())
            .unwrap_or(false)
    }

    fn default_supplier(&self, item_code: &str) -> Option<String> {
        self.item(item_code)?.suppliers.first().cloned()
    }
}

impl StockLedger for InMemoryCatalog {
    fn stock_level(&self, item_code: &str, warehouse: &str) -> Decimal {
        self.stock
            .get(&(item_code.to_string(), warehouse.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

impl PurchaseHistory for InMemoryCatalog {
    fn recent_purchases(&self, item_code: &str, limit: usize) -> Vec<PurchaseRecord> {
        let mut records = self.all_purchases(item_code);
        records.sort_by(|a, b| {
            b.effective_date()
                .cmp(&a.effective_date())
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        records.truncate(limit);
        records
    }

    fn all_purchases(&self, item_code: &str) -> Vec<PurchaseRecord> {
        self.purchases.get(item_code).cloned().unwrap_or_default()
    }

    fn lowest_buying_price(&self, item_code: &str) -> Option<PriceListEntry> {
        self.price_lists
            .get(item_code)?
            .iter()
            .min_by(|a, b| a.rate.cmp(&b.rate).then_with(|| a.supplier.cmp(&b.supplier)))
            .cloned()
    }
}

impl WarehouseDirectory for InMemoryCatalog {
    fn default_warehouse(&self) -> Option<String> {
        self.default_warehouse.clone()
    }

    fn first_active_warehouse(&self, company: &str) -> Option<String> {
        self.company_warehouses.get(company)?.first().cloned()
    }
}

impl SupplierDirectory for InMemoryCatalog {
    fn supplier_profile(&self, supplier: &str) -> Option<SupplierProfile> {
        self.suppliers.get(supplier).cloned()
    }
}

impl PendingQuantityLedger for InMemoryCatalog {
    fn pending_qty(&self, reference: &str) -> Option<Decimal> {
        self.pending.get(reference).copied()
    }

    fn set_pending_qty(&mut self, reference: &str, quantity: Decimal) -> Result<()> {
        match self.pending.get_mut(reference) {
            Some(pending) => {
                *pending = quantity;
                Ok(())
            }
            None => Err(ProcureError::PendingRowNotFound(reference.to_string())),
        }
    }
}

impl ProjectMasterSource for InMemoryCatalog {
    fn project_items(&self, project_master: &str) -> Result<Vec<ProjectItem>> {
        self.projects
            .get(project_master)
            .cloned()
            .ok_or_else(|| ProcureError::ProjectNotFound(project_master.to_string()))
    }

    fn bom_raw_material_cost(&self, bom: &str) -> Option<Decimal> {
        self.bom_costs.get(bom).copied()
    }
}

impl ProductionPlanSource for InMemoryCatalog {
    fn linked_order_lines(&self, sales_order: &str) -> Vec<LinkedOrderLine> {
        self.linked_orders
            .get(sales_order)
            .cloned()
            .unwrap_or_default()
    }

    fn sub_assembly_parent(&self, bom: &str, item_code: &str) -> Option<String> {
        self.sub_assemblies
            .get(&(bom.to_string(), item_code.to_string()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_explode_bom_scales_quantity() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_bom(
            "BOM-BIKE",
            vec![
                BomComponent::new("WHEEL-001", Decimal::from(2)),
                BomComponent::new("FRAME-001", Decimal::ONE),
            ],
        );

        let exploded = catalog.explode_bom("BOM-BIKE", "ACME", Decimal::from(4)).unwrap();
        assert_eq!(exploded[0].quantity, Decimal::from(8));
        assert_eq!(exploded[1].quantity, Decimal::from(4));

        assert!(matches!(
            catalog.explode_bom("BOM-MISSING", "ACME", Decimal::ONE),
            Err(ProcureError::BomExplosion { .. })
        ));
    }

    #[test]
    fn test_recent_purchases_ordering() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_purchase("WHEEL-001", PurchaseRecord::new("PO-1", "VENDOR-A", Decimal::from(10), at(1)));
        catalog.add_purchase(
            "WHEEL-001",
            PurchaseRecord::new("PO-2", "VENDOR-B", Decimal::from(9), at(20)).with_transaction_date(None),
        );
        catalog.add_purchase("WHEEL-001", PurchaseRecord::new("PO-3", "VENDOR-A", Decimal::from(11), at(10)));

        let recent = catalog.recent_purchases("WHEEL-001", 2);
        assert_eq!(recent.len(), 2);
        // 交易日期為空時以建立時間排序
        assert_eq!(recent[0].purchase_order, "PO-2");
        assert_eq!(recent[1].purchase_order, "PO-3");
    }

    #[test]
    fn test_item_master_defaults() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_item(
            CatalogItem::new("WHEEL-001")
                .with_supplier("VENDOR-A")
                .with_supplier("VENDOR-B")
                .with_reorder_policy(ReorderPolicy::new("WH-1", Decimal::from(5), Decimal::from(20))),
        );

        assert!(catalog.is_purchasable("WHEEL-001"));
        assert!(!catalog.is_purchasable("UNKNOWN"));
        assert_eq!(catalog.default_supplier("WHEEL-001"), Some("VENDOR-A".to_string()));
        assert!(catalog.reorder_policy("WHEEL-001", "WH-1").is_some());
        assert!(catalog.reorder_policy("WHEEL-001", "WH-2").is_none());
        assert_eq!(catalog.stock_level("WHEEL-001", "WH-1"), Decimal::ZERO);
    }

    #[test]
    fn test_pending_ledger() {
        let mut catalog = InMemoryCatalog::new();
        catalog.set_pending("SOPM-0001", Decimal::from(10));

        catalog.set_pending_qty("SOPM-0001", Decimal::from(4)).unwrap();
        assert_eq!(catalog.pending_qty("SOPM-0001"), Some(Decimal::from(4)));
        assert!(catalog.set_pending_qty("SOPM-0404", Decimal::ONE).is_err());
    }
}
