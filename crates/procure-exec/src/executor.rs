//! 採購單執行
//!
//! 每個供應商批次獨立處理：某個供應商失敗只會被記錄，不影響其他供應商。

use chrono::{Days, NaiveDate};
use procure_core::{
    OrderGateway, PurchaseOrderRequest, SupplierBatch, SupplierDirectory, SupplierProfile,
};
use serde::{Deserialize, Serialize};

use crate::notification;

/// 已建立的採購單
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub supplier: String,
    pub order_id: String,
    pub schedule_date: NaiveDate,
    pub submitted: bool,
    /// 通知收件人（未通知時為 None）
    pub notified: Option<String>,
    pub warnings: Vec<String>,
}

/// 失敗的供應商批次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedOrder {
    pub supplier: String,
    /// 已建立但後續步驟失敗時的單號
    pub order_id: Option<String>,
    pub reason: String,
}

/// 執行結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub created: Vec<CreatedOrder>,
    pub failed: Vec<FailedOrder>,
}

impl ExecutionReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn created_for(&self, supplier: &str) -> Option<&CreatedOrder> {
        self.created.iter().find(|o| o.supplier == supplier)
    }
}

/// 採購單執行器
pub struct OrderExecutor<'a> {
    suppliers: &'a dyn SupplierDirectory,
    company: &'a str,
    warehouse: &'a str,
    sales_order: &'a str,
    run_date: NaiveDate,
}

impl<'a> OrderExecutor<'a> {
    pub fn new(
        suppliers: &'a dyn SupplierDirectory,
        company: &'a str,
        warehouse: &'a str,
        sales_order: &'a str,
        run_date: NaiveDate,
    ) -> Self {
        Self {
            suppliers,
            company,
            warehouse,
            sales_order,
            run_date,
        }
    }

    /// 逐供應商建立採購單，全部處理完後提交並回寫無法下單清單
    pub fn execute(
        &self,
        batches: &[SupplierBatch],
        unresolved_report: &str,
        gateway: &mut dyn OrderGateway,
    ) -> procure_core::Result<ExecutionReport> {
        let mut report = ExecutionReport::default();

        for batch in batches {
            match self.execute_batch(batch, gateway) {
                Ok(created) => {
                    tracing::info!(
                        supplier = %created.supplier,
                        order_id = %created.order_id,
                        lines = batch.lines.len(),
                        amount = %batch.total_amount(),
                        "採購單已建立"
                    );
                    report.created.push(created);
                }
                Err(failed) => {
                    tracing::warn!(
                        supplier = %failed.supplier,
                        reason = %failed.reason,
                        "供應商採購單處理失敗，繼續下一個供應商"
                    );
                    report.failed.push(failed);
                }
            }
        }

        gateway.commit()?;
        gateway.report_unresolved(self.sales_order, unresolved_report)?;

        tracing::info!(
            sales_order = self.sales_order,
            created = report.created.len(),
            failed = report.failed.len(),
            "採購單執行完成"
        );

        Ok(report)
    }

    /// 單一供應商批次
    fn execute_batch(
        &self,
        batch: &SupplierBatch,
        gateway: &mut dyn OrderGateway,
    ) -> Result<CreatedOrder, FailedOrder> {
        let profile = self
            .suppliers
            .supplier_profile(&batch.supplier)
            .unwrap_or_else(|| SupplierProfile::new(batch.supplier.clone()));
        let request = self.build_request(batch, &profile);

        let order_id = gateway
            .create_purchase_order(&request)
            .map_err(|e| FailedOrder {
                supplier: batch.supplier.clone(),
                order_id: None,
                reason: e.to_string(),
            })?;

        let mut created = CreatedOrder {
            supplier: batch.supplier.clone(),
            order_id,
            schedule_date: request.schedule_date,
            submitted: false,
            notified: None,
            warnings: Vec::new(),
        };

        if profile.auto_submit {
            gateway
                .submit_order(&created.order_id)
                .map_err(|e| FailedOrder {
                    supplier: batch.supplier.clone(),
                    order_id: Some(created.order_id.clone()),
                    reason: e.to_string(),
                })?;
            created.submitted = true;
        }

        if profile.auto_notify {
            match notification::notify(gateway, &created.order_id, &profile) {
                Ok(recipient) => created.notified = Some(recipient),
                Err(e) => {
                    tracing::warn!(order_id = %created.order_id, error = %e, "採購單通知失敗");
                    created.warnings.push(e.to_string());
                }
            }
        }

        Ok(created)
    }

    /// 組裝採購單請求
    pub fn build_request(&self, batch: &SupplierBatch, profile: &SupplierProfile) -> PurchaseOrderRequest {
        let schedule_date = self
            .run_date
            .checked_add_days(Days::new(u64::from(profile.required_days)))
            .unwrap_or(self.run_date);

        PurchaseOrderRequest {
            supplier: batch.supplier.clone(),
            company: self.company.to_string(),
            warehouse: self.warehouse.to_string(),
            sales_order: self.sales_order.to_string(),
            transaction_date: self.run_date,
            schedule_date,
            lines: batch.lines.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryOrderGateway;
    use procure_core::InMemoryCatalog;
    use rust_decimal::Decimal;

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    }

    fn batch(supplier: &str, item: &str) -> SupplierBatch {
        let mut batch = SupplierBatch::new(supplier);
        batch.add_line(item, Decimal::from(10), Decimal::from(5));
        batch
    }

    #[test]
    fn test_failure_isolated_per_supplier() {
        let catalog = InMemoryCatalog::new();
        let mut gateway = InMemoryOrderGateway::new().rejecting_supplier("VENDOR-A");
        let executor = OrderExecutor::new(&catalog, "ACME", "Stores - ACME", "SO-0001", run_date());

        let batches = vec![batch("VENDOR-A", "WHEEL-001"), batch("VENDOR-B", "FRAME-001")];
        let report = executor.execute(&batches, "", &mut gateway).unwrap();

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].supplier, "VENDOR-A");
        assert!(report.created_for("VENDOR-B").is_some());
        assert!(gateway.order_for("VENDOR-B").is_some());
        assert!(gateway.order_for("VENDOR-A").is_none());
        assert!(!report.is_clean());
    }

    #[test]
    fn test_schedule_date_uses_required_days() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_supplier(SupplierProfile::new("VENDOR-A").with_required_days(7));
        let executor = OrderExecutor::new(&catalog, "ACME", "Stores - ACME", "SO-0001", run_date());

        let request = executor.build_request(
            &batch("VENDOR-A", "WHEEL-001"),
            &SupplierProfile::new("VENDOR-A").with_required_days(7),
        );
        assert_eq!(request.transaction_date, run_date());
        assert_eq!(request.schedule_date, NaiveDate::from_ymd_opt(2025, 11, 10).unwrap());
        assert_eq!(request.warehouse, "Stores - ACME");
        assert_eq!(request.sales_order, "SO-0001");
    }

    #[test]
    fn test_auto_submit_and_notify() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_supplier(
            SupplierProfile::new("VENDOR-A")
                .with_auto_submit(true)
                .with_auto_notify(true)
                .with_contact_email("buyer@vendor-a.test"),
        );
        let mut gateway = InMemoryOrderGateway::new();
        let executor = OrderExecutor::new(&catalog, "ACME", "Stores - ACME", "SO-0001", run_date());

        let report = executor
            .execute(&[batch("VENDOR-A", "WHEEL-001")], "BOLT-M8 (no supplier)", &mut gateway)
            .unwrap();

        let created = report.created_for("VENDOR-A").unwrap();
        assert!(created.submitted);
        assert_eq!(created.notified.as_deref(), Some("buyer@vendor-a.test"));
        assert!(gateway.is_submitted(&created.order_id));
        assert_eq!(gateway.notifications().len(), 1);
        assert_eq!(gateway.unresolved_report("SO-0001"), Some("BOLT-M8 (no supplier)"));
    }

    #[test]
    fn test_notification_failure_keeps_order() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_supplier(SupplierProfile::new("VENDOR-A").with_auto_notify(true));
        let mut gateway = InMemoryOrderGateway::new();
        let executor = OrderExecutor::new(&catalog, "ACME", "Stores - ACME", "SO-0001", run_date());

        let report = executor
            .execute(&[batch("VENDOR-A", "WHEEL-001")], "", &mut gateway)
            .unwrap();

        assert!(report.is_clean());
        let created = report.created_for("VENDOR-A").unwrap();
        assert_eq!(created.notified, None);
        assert_eq!(created.warnings.len(), 1);
        assert_eq!(gateway.orders().len(), 1);
    }

    #[test]
    fn test_notification_service_down_is_warning() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_supplier(
            SupplierProfile::new("VENDOR-A")
                .with_auto_notify(true)
                .with_email("sales@vendor-a.test"),
        );
        let mut gateway = InMemoryOrderGateway::new().with_notifications_down();
        let executor = OrderExecutor::new(&catalog, "ACME", "Stores - ACME", "SO-0001", run_date());

        let report = executor
            .execute(&[batch("VENDOR-A", "WHEEL-001")], "", &mut gateway)
            .unwrap();

        let created = report.created_for("VENDOR-A").unwrap();
        assert_eq!(created.notified, None);
        assert_eq!(created.warnings.len(), 1);
        assert!(gateway.notifications().is_empty());
        assert!(gateway.order_for("VENDOR-A").is_some());
    }

    #[test]
    fn test_submit_failure_recorded_with_order_id() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_supplier(SupplierProfile::new("VENDOR-A").with_auto_submit(true));
        let mut gateway = InMemoryOrderGateway::new().rejecting_submission_for("VENDOR-A");
        let executor = OrderExecutor::new(&catalog, "ACME", "Stores - ACME", "SO-0001", run_date());

        let report = executor
            .execute(&[batch("VENDOR-A", "WHEEL-001")], "", &mut gateway)
            .unwrap();

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].order_id.as_deref(), Some("PUR-ORD-00001"));
        assert_eq!(gateway.unresolved_report("SO-0001"), Some(""));
    }
}
