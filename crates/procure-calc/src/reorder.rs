//! 再訂購評估

use procure_core::{
    ItemMaster, OrderDecision, ProcureError, ReorderPolicy, RequiredItems, StockLedger, StockLevel,
};
use rust_decimal::Decimal;

/// 再訂購評估器
pub struct ReorderEvaluator;

impl ReorderEvaluator {
    /// 評估所有需求物料，產生訂購決策
    pub fn evaluate(
        required: &RequiredItems,
        warehouse: &str,
        items: &dyn ItemMaster,
        stock: &dyn StockLedger,
    ) -> procure_core::Result<Vec<OrderDecision>> {
        let mut decisions = Vec::new();

        for requirement in required.iter() {
            let item_code = requirement.item_code.as_str();

            if !items.is_purchasable(item_code) {
                tracing::debug!(item_code, "非採購物料，跳過");
                continue;
            }

            let policy = items
                .reorder_policy(item_code, warehouse)
                .unwrap_or_else(|| ReorderPolicy::none(warehouse));
            let level = StockLevel::new(item_code, warehouse, stock.stock_level(item_code, warehouse));
            let minimum_order_qty = items.minimum_order_quantity(item_code);

            match Self::decide(requirement.quantity, &level, &policy, minimum_order_qty)? {
                Some(decision) => {
                    tracing::debug!(
                        item_code,
                        required = %decision.required_quantity,
                        stock = %decision.current_stock,
                        order = %decision.order_quantity,
                        surplus = %decision.surplus(),
                        "訂購決策"
                    );
                    decisions.push(decision);
                }
                None => tracing::debug!(item_code, "訂購量為 0，不下單"),
            }
        }

        Ok(decisions)
    }

    /// 單物料訂購量計算
    ///
    /// 庫存低於再訂購點時加上政策的固定補貨批量，再以最小訂購量墊底。
    /// 需求為 0 但有最小訂購量時仍會產生決策。
    pub fn decide(
        required_quantity: Decimal,
        stock: &StockLevel,
        policy: &ReorderPolicy,
        minimum_order_qty: Decimal,
    ) -> procure_core::Result<Option<OrderDecision>> {
        let order_quantity = required_quantity
            .checked_add(policy.replenishment_for(stock.on_hand_quantity))
            .ok_or_else(|| ProcureError::QuantityOverflow(stock.item_code.clone()))?
            .max(minimum_order_qty);

        if order_quantity <= Decimal::ZERO {
            return Ok(None);
        }

        Ok(Some(OrderDecision {
            item_code: stock.item_code.clone(),
            order_quantity,
            required_quantity,
            current_stock: stock.on_hand_quantity,
            reorder_level: policy.reorder_level,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procure_core::memory::CatalogItem;
    use procure_core::InMemoryCatalog;
    use rstest::rstest;

    const WH: &str = "Stores - ACME";

    #[rstest]
    #[case::floor_dominates_zero_requirement(0, 0, 0, 0, 5, Some(5))]
    #[case::stock_trigger_adds_fixed_batch(10, 2, 5, 20, 0, Some(30))]
    #[case::stock_at_level_no_trigger(10, 5, 5, 20, 0, Some(10))]
    #[case::floor_below_requirement(10, 100, 0, 0, 4, Some(10))]
    #[case::nothing_needed(0, 100, 5, 20, 0, None)]
    #[case::trigger_without_requirement(0, 1, 5, 20, 0, Some(20))]
    fn test_decide(
        #[case] required: i64,
        #[case] on_hand: i64,
        #[case] level: i64,
        #[case] reorder_qty: i64,
        #[case] min_qty: i64,
        #[case] expected: Option<i64>,
    ) {
        let stock = StockLevel::new("WHEEL-001", WH, Decimal::from(on_hand));
        let policy = ReorderPolicy::new(WH, Decimal::from(level), Decimal::from(reorder_qty));

        let decision = ReorderEvaluator::decide(Decimal::from(required), &stock, &policy, Decimal::from(min_qty)).unwrap();
        assert_eq!(decision.map(|d| d.order_quantity), expected.map(Decimal::from));
    }

    #[test]
    fn test_evaluate_skips_non_purchasable() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_item(CatalogItem::new("WHEEL-001"));
        catalog.add_item(CatalogItem::new("PAINT-001").not_purchasable());

        let mut required = RequiredItems::new();
        required.add("WHEEL-001", Decimal::from(10)).unwrap();
        required.add("PAINT-001", Decimal::from(3)).unwrap();

        let decisions = ReorderEvaluator::evaluate(&required, WH, &catalog, &catalog).unwrap();
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].item_code, "WHEEL-001");
    }

    #[test]
    fn test_evaluate_uses_warehouse_policy() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_item(
            CatalogItem::new("WHEEL-001")
                .with_reorder_policy(ReorderPolicy::new("OTHER-WH", Decimal::from(50), Decimal::from(100)))
                .with_reorder_policy(ReorderPolicy::new(WH, Decimal::from(5), Decimal::from(20))),
        );
        catalog.set_stock("WHEEL-001", WH, Decimal::from(2));

        let mut required = RequiredItems::new();
        required.add("WHEEL-001", Decimal::from(10)).unwrap();

        let decisions = ReorderEvaluator::evaluate(&required, WH, &catalog, &catalog).unwrap();
        assert_eq!(decisions[0].order_quantity, Decimal::from(30));
        assert_eq!(decisions[0].current_stock, Decimal::from(2));
        assert_eq!(decisions[0].reorder_level, Decimal::from(5));
    }

    #[test]
    fn test_decide_overflow_is_error() {
        let stock = StockLevel::new("WHEEL-001", WH, Decimal::ZERO);
        let policy = ReorderPolicy::new(WH, Decimal::from(5), Decimal::from(20));

        let result = ReorderEvaluator::decide(Decimal::MAX, &stock, &policy, Decimal::ZERO);
        assert!(matches!(result, Err(ProcureError::QuantityOverflow(code)) if code == "WHEEL-001"));
    }
}
