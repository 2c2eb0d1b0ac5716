//! 無法下單物料報告

use procure_core::UnresolvedItem;
use std::collections::BTreeSet;

/// 結果報告器
pub struct OutcomeReporter;

impl OutcomeReporter {
    /// 去重並依物料代碼排序
    pub fn collect(items: impl IntoIterator<Item = UnresolvedItem>) -> Vec<UnresolvedItem> {
        items.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
    }

    /// 產生回寫到訂單上的清單文字，沒有項目時為空字串
    pub fn render(items: &[UnresolvedItem], separator: &str) -> String {
        items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procure_core::UnresolvedReason;

    #[test]
    fn test_dedup_and_sort() {
        let items = vec![
            UnresolvedItem::new("NUT-M8", UnresolvedReason::NoPurchaseHistory),
            UnresolvedItem::new("BOLT-M8", UnresolvedReason::NoSupplierConfigured),
            UnresolvedItem::new("NUT-M8", UnresolvedReason::NoPurchaseHistory),
        ];

        let collected = OutcomeReporter::collect(items);
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].item_code, "BOLT-M8");

        assert_eq!(
            OutcomeReporter::render(&collected, ", "),
            "BOLT-M8 (no supplier), NUT-M8 (no purchase history)"
        );
    }

    #[test]
    fn test_empty_report() {
        let collected = OutcomeReporter::collect(Vec::new());
        assert_eq!(OutcomeReporter::render(&collected, ", "), "");
    }
}
