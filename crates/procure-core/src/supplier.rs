//! 供應商模型

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 報價來源層級（依優先順序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteSource {
    /// 最近 N 筆已提交採購紀錄
    RecentHistory,
    /// 全部已提交採購紀錄
    FullHistory,
    /// 採購價目表
    PriceList,
    /// 物料主檔預設供應商
    ItemMasterDefault,
}

impl QuoteSource {
    /// 預設的回退鏈順序
    pub fn default_chain() -> Vec<QuoteSource> {
        vec![
            QuoteSource::RecentHistory,
            QuoteSource::FullHistory,
            QuoteSource::PriceList,
            QuoteSource::ItemMasterDefault,
        ]
    }
}

/// 選定的供應商報價
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierQuote {
    /// 供應商
    pub supplier: String,

    /// 單價
    pub rate: Decimal,

    /// 報價日期
    pub as_of_date: NaiveDate,

    /// 來源層級
    pub source: QuoteSource,
}

impl SupplierQuote {
    pub fn new(
        supplier: impl Into<String>,
        rate: Decimal,
        as_of_date: NaiveDate,
        source: QuoteSource,
    ) -> Self {
        Self {
            supplier: supplier.into(),
            rate,
            as_of_date,
            source,
        }
    }
}

/// 已提交採購單的明細紀錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// 採購單號
    pub purchase_order: String,

    /// 供應商
    pub supplier: String,

    /// 單價
    pub rate: Decimal,

    /// 數量
    pub quantity: Decimal,

    /// 交易日期（可能為空）
    pub transaction_date: Option<NaiveDate>,

    /// 建立時間
    pub created_at: NaiveDateTime,
}

impl PurchaseRecord {
    /// 創建新的採購紀錄（交易日期取建立日期）
    pub fn new(
        purchase_order: impl Into<String>,
        supplier: impl Into<String>,
        rate: Decimal,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            purchase_order: purchase_order.into(),
            supplier: supplier.into(),
            rate,
            quantity: Decimal::ONE,
            transaction_date: Some(created_at.date()),
            created_at,
        }
    }

    /// 建構器模式：設置數量
    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = quantity;
        self
    }

    /// 建構器模式：設置交易日期
    pub fn with_transaction_date(mut self, date: Option<NaiveDate>) -> Self {
        self.transaction_date = date;
        self
    }

    /// 有效日期：交易日期為空時退回建立日期
    pub fn effective_date(&self) -> NaiveDate {
        self.transaction_date
            .unwrap_or_else(|| self.created_at.date())
    }
}

/// 採購價目表項目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceListEntry {
    pub supplier: String,
    pub rate: Decimal,
    pub valid_from: Option<NaiveDate>,
}

impl PriceListEntry {
    pub fn new(supplier: impl Into<String>, rate: Decimal) -> Self {
        Self {
            supplier: supplier.into(),
            rate,
            valid_from: None,
        }
    }

    pub fn with_valid_from(mut self, date: NaiveDate) -> Self {
        self.valid_from = Some(date);
        self
    }
}

/// 供應商設定
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SupplierProfile {
    /// 供應商
    pub supplier: String,

    /// 所需交貨天數
    pub required_days: u32,

    /// 建立後自動提交採購單
    pub auto_submit: bool,

    /// 建立後自動發送通知
    pub auto_notify: bool,

    /// 主要聯絡郵件
    pub email: Option<String>,

    /// 聯絡人郵件（依序）
    pub contact_emails: Vec<String>,
}

impl SupplierProfile {
    /// 創建新的供應商設定
    pub fn new(supplier: impl Into<String>) -> Self {
        Self {
            supplier: supplier.into(),
            ..Self::default()
        }
    }

    /// 建構器模式：設置交貨天數
    pub fn with_required_days(mut self, days: u32) -> Self {
        self.required_days = days;
        self
    }

    /// 建構器模式：自動提交
    pub fn with_auto_submit(mut self, enabled: bool) -> Self {
        self.auto_submit = enabled;
        self
    }

    /// 建構器模式：自動通知
    pub fn with_auto_notify(mut self, enabled: bool) -> Self {
        self.auto_notify = enabled;
        self
    }

    /// 建構器模式：設置主要郵件
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// 建構器模式：添加聯絡人郵件
    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_emails.push(email.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chain_order() {
        let chain = QuoteSource::default_chain();

        assert_eq!(chain.len(), 4);
        assert_eq!(chain[0], QuoteSource::RecentHistory);
        assert_eq!(chain[3], QuoteSource::ItemMasterDefault);
    }

    #[test]
    fn test_effective_date_falls_back_to_creation() {
        let created = NaiveDate::from_ymd_opt(2025, 9, 3)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let record = PurchaseRecord::new("PUR-ORD-0001", "VENDOR-A", Decimal::from(12), created)
            .with_transaction_date(None);

        assert_eq!(record.effective_date(), NaiveDate::from_ymd_opt(2025, 9, 3).unwrap());

        let dated = record.with_transaction_date(NaiveDate::from_ymd_opt(2025, 9, 1));
        assert_eq!(dated.effective_date(), NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
    }

    #[test]
    fn test_supplier_profile_builder() {
        let profile = SupplierProfile::new("VENDOR-A")
            .with_required_days(7)
            .with_auto_submit(true)
            .with_contact_email("buyer@vendor-a.test");

        assert_eq!(profile.supplier, "VENDOR-A");
        assert_eq!(profile.required_days, 7);
        assert!(profile.auto_submit);
        assert!(!profile.auto_notify);
        assert_eq!(profile.email, None);
        assert_eq!(profile.contact_emails.len(), 1);
    }
}
