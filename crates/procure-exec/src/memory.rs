//! 記憶體內採購單閘道

use procure_core::{OrderGateway, ProcureError, PurchaseOrderRequest};
use std::collections::{HashMap, HashSet};

/// 記憶體內採購單閘道
///
/// 變更先暫存，`commit()` 後才會出現在 `orders()`。
#[derive(Debug, Default)]
pub struct InMemoryOrderGateway {
    staged: Vec<(String, PurchaseOrderRequest)>,
    committed: Vec<(String, PurchaseOrderRequest)>,
    submitted: HashSet<String>,
    notifications: Vec<(String, String)>,
    unresolved: HashMap<String, String>,
    rejected_suppliers: HashSet<String>,
    rejected_submissions: HashSet<String>,
    notifications_down: bool,
    sequence: u32,
}

impl InMemoryOrderGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：拒絕指定供應商的採購單
    pub fn rejecting_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.rejected_suppliers.insert(supplier.into());
        self
    }

    /// 建構器模式：拒絕提交指定供應商的採購單
    pub fn rejecting_submission_for(mut self, supplier: impl Into<String>) -> Self {
        self.rejected_submissions.insert(supplier.into());
        self
    }

    /// 建構器模式：通知服務不可用
    pub fn with_notifications_down(mut self) -> Self {
        self.notifications_down = true;
        self
    }

    /// 已提交（commit）的採購單
    pub fn orders(&self) -> &[(String, PurchaseOrderRequest)] {
        &self.committed
    }

    /// 供應商的採購單
    pub fn order_for(&self, supplier: &str) -> Option<&PurchaseOrderRequest> {
        self.committed
            .iter()
            .find(|(_, request)| request.supplier == supplier)
            .map(|(_, request)| request)
    }

    pub fn is_submitted(&self, order_id: &str) -> bool {
        self.submitted.contains(order_id)
    }

    /// 已發送的通知（單號, 收件人）
    pub fn notifications(&self) -> &[(String, String)] {
        &self.notifications
    }

    /// 回寫到銷售訂單的無法下單清單
    pub fn unresolved_report(&self, sales_order: &str) -> Option<&str> {
        self.unresolved.get(sales_order).map(String::as_str)
    }

    fn supplier_of(&self, order_id: &str) -> Option<&str> {
        self.staged
            .iter()
            .chain(self.committed.iter())
            .find(|(id, _)| id == order_id)
            .map(|(_, request)| request.supplier.as_str())
    }
}

impl OrderGateway for InMemoryOrderGateway {
    fn create_purchase_order(&mut self, request: &PurchaseOrderRequest) -> procure_core::Result<String> {
        if self.rejected_suppliers.contains(&request.supplier) {
            return Err(ProcureError::OrderCreation {
                supplier: request.supplier.clone(),
                reason: "供應商已停用".to_string(),
            });
        }

        self.sequence += 1;
        let order_id = format!("PUR-ORD-{:05}", self.sequence);
        self.staged.push((order_id.clone(), request.clone()));
        Ok(order_id)
    }

    fn submit_order(&mut self, order_id: &str) -> procure_core::Result<()> {
        let supplier = self
            .supplier_of(order_id)
            .ok_or_else(|| ProcureError::OrderNotFound(order_id.to_string()))?;

        if self.rejected_submissions.contains(supplier) {
            return Err(ProcureError::OrderSubmission {
                order_id: order_id.to_string(),
                reason: "驗證失敗".to_string(),
            });
        }

        self.submitted.insert(order_id.to_string());
        Ok(())
    }

    fn send_order_notification(&mut self, order_id: &str, recipient: &str) -> procure_core::Result<()> {
        if self.notifications_down {
            return Err(ProcureError::Other("郵件服務不可用".to_string()));
        }

        self.notifications
            .push((order_id.to_string(), recipient.to_string()));
        Ok(())
    }

    fn report_unresolved(&mut self, sales_order: &str, text: &str) -> procure_core::Result<()> {
        self.unresolved
            .insert(sales_order.to_string(), text.to_string());
        Ok(())
    }

    fn commit(&mut self) -> procure_core::Result<()> {
        self.committed.append(&mut self.staged);
        Ok(())
    }
}
