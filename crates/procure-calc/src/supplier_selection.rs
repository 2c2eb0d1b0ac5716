//! 供應商選擇
//!
//! 依配置的報價層級順序逐一嘗試，前一層沒有結果才會查詢下一層。

use chrono::NaiveDate;
use procure_core::{
    ItemMaster, ProcurementConfig, PurchaseHistory, PurchaseRecord, QuoteSource, SupplierQuote,
    UnresolvedItem, UnresolvedReason,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// 供應商選擇結果
#[derive(Debug, Clone, PartialEq)]
pub enum SupplierResolution {
    Resolved(SupplierQuote),
    Unresolved(UnresolvedItem),
}

/// 供應商選擇器
pub struct SupplierSelector {
    /// 報價回退鏈
    tiers: Vec<QuoteSource>,

    /// 最近紀錄筆數
    history_limit: usize,

    /// 規劃日期
    as_of: NaiveDate,
}

impl SupplierSelector {
    /// 創建新的選擇器
    pub fn new(config: &ProcurementConfig, as_of: NaiveDate) -> Self {
        Self {
            tiers: config.supplier_tiers.clone(),
            history_limit: config.history_limit,
            as_of,
        }
    }

    /// 選擇物料的供應商與單價
    pub fn select(
        &self,
        item_code: &str,
        items: &dyn ItemMaster,
        history: &dyn PurchaseHistory,
    ) -> SupplierResolution {
        if !items.has_configured_suppliers(item_code) {
            return SupplierResolution::Unresolved(UnresolvedItem::new(
                item_code,
                UnresolvedReason::NoSupplierConfigured,
            ));
        }

        for &tier in &self.tiers {
            if let Some(quote) = self.resolve_tier(tier, item_code, items, history) {
                tracing::debug!(
                    item_code,
                    supplier = %quote.supplier,
                    rate = %quote.rate,
                    tier = ?tier,
                    "選定供應商"
                );
                return SupplierResolution::Resolved(quote);
            }
            tracing::trace!(item_code, tier = ?tier, "報價層級無結果");
        }

        SupplierResolution::Unresolved(UnresolvedItem::new(
            item_code,
            UnresolvedReason::NoPurchaseHistory,
        ))
    }

    /// 單一報價層級
    fn resolve_tier(
        &self,
        tier: QuoteSource,
        item_code: &str,
        items: &dyn ItemMaster,
        history: &dyn PurchaseHistory,
    ) -> Option<SupplierQuote> {
        match tier {
            QuoteSource::RecentHistory => self.recent_history(item_code, history),
            QuoteSource::FullHistory => self.full_history(item_code, history),
            QuoteSource::PriceList => self.price_list(item_code, history),
            QuoteSource::ItemMasterDefault => self.item_master_default(item_code, items),
        }
    }

    /// 最近 N 筆採購紀錄中的最低價供應商
    fn recent_history(&self, item_code: &str, history: &dyn PurchaseHistory) -> Option<SupplierQuote> {
        let mut records = history.recent_purchases(item_code, self.history_limit);
        records.sort_by(|a, b| b.effective_date().cmp(&a.effective_date()));
        records.truncate(self.history_limit);

        let (supplier, rate) = Self::lowest_rate_supplier(&records)?;
        let as_of_date = records
            .iter()
            .filter(|r| r.supplier == supplier)
            .map(PurchaseRecord::effective_date)
            .max()
            .unwrap_or(self.as_of);

        Some(SupplierQuote::new(supplier, rate, as_of_date, QuoteSource::RecentHistory))
    }

    /// 全部採購紀錄中的最低價供應商
    fn full_history(&self, item_code: &str, history: &dyn PurchaseHistory) -> Option<SupplierQuote> {
        let records = history.all_purchases(item_code);
        let (supplier, rate) = Self::lowest_rate_supplier(&records)?;

        Some(SupplierQuote::new(supplier, rate, self.as_of, QuoteSource::FullHistory))
    }

    /// 採購價目表最低價
    fn price_list(&self, item_code: &str, history: &dyn PurchaseHistory) -> Option<SupplierQuote> {
        let entry = history.lowest_buying_price(item_code)?;

        Some(SupplierQuote::new(
            entry.supplier,
            entry.rate,
            entry.valid_from.unwrap_or(self.as_of),
            QuoteSource::PriceList,
        ))
    }

    /// 物料主檔第一個供應商，單價 0
    fn item_master_default(&self, item_code: &str, items: &dyn ItemMaster) -> Option<SupplierQuote> {
        let supplier = items.default_supplier(item_code)?;

        Some(SupplierQuote::new(
            supplier,
            Decimal::ZERO,
            self.as_of,
            QuoteSource::ItemMasterDefault,
        ))
    }

    /// 按供應商取最低單價，再取全域最低
    ///
    /// 最低價相同時取供應商名稱字典序最小者。
    pub fn lowest_rate_supplier(records: &[PurchaseRecord]) -> Option<(String, Decimal)> {
        let mut min_rates: HashMap<&str, Decimal> = HashMap::new();
        for record in records {
            min_rates
                .entry(record.supplier.as_str())
                .and_modify(|rate| *rate = (*rate).min(record.rate))
                .or_insert(record.rate);
        }

        min_rates
            .into_iter()
            .min_by(|(sa, ra), (sb, rb)| ra.cmp(rb).then_with(|| sa.cmp(sb)))
            .map(|(supplier, rate)| (supplier.to_string(), rate))
    }
}
