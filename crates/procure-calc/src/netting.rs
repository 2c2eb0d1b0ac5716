//! 生產計劃物料需求沖減
//!
//! 物料需求扣除銷售訂單已提交採購單的數量；成品 BOM 中可自製的半成品改列為自製。

use chrono::NaiveDate;
use procure_core::{
    LinkedOrderLine, MaterialRequestRow, ProcureError, ProductionPlanSource, SubAssemblyRow,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// 沖減結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NettingOutcome {
    /// 仍需請購的物料
    pub material_requests: Vec<MaterialRequestRow>,

    /// 改為自製的半成品
    pub sub_assemblies: Vec<SubAssemblyRow>,
}

/// 物料需求沖減器
pub struct MaterialRequestNetter;

impl MaterialRequestNetter {
    /// 依物料彙總已下單數量
    pub fn ordered_quantities(
        lines: &[LinkedOrderLine],
    ) -> procure_core::Result<HashMap<String, Decimal>> {
        let mut ordered: HashMap<String, Decimal> = HashMap::new();
        for line in lines {
            let total = ordered.entry(line.item_code.clone()).or_default();
            *total = total
                .checked_add(line.quantity)
                .ok_or_else(|| ProcureError::QuantityOverflow(line.item_code.clone()))?;
        }
        Ok(ordered)
    }

    /// 扣除已下單數量，結果不小於 0
    pub fn net(
        rows: &[MaterialRequestRow],
        ordered: &HashMap<String, Decimal>,
    ) -> Vec<MaterialRequestRow> {
        rows.iter()
            .map(|row| {
                let ordered_qty = ordered.get(&row.item_code).copied().unwrap_or(Decimal::ZERO);
                MaterialRequestRow {
                    quantity: (row.quantity - ordered_qty).max(Decimal::ZERO),
                    ordered_qty,
                    ..row.clone()
                }
            })
            .collect()
    }

    /// 沖減並拆出自製半成品
    ///
    /// `finished_boms` 為生產計劃成品列的 BOM，空白者略過。
    pub fn apply(
        sales_order: Option<&str>,
        finished_boms: &[String],
        rows: &[MaterialRequestRow],
        posting_date: NaiveDate,
        source: &dyn ProductionPlanSource,
    ) -> procure_core::Result<NettingOutcome> {
        let linked = sales_order
            .filter(|so| !so.trim().is_empty())
            .map(|so| source.linked_order_lines(so))
            .unwrap_or_default();
        let ordered = Self::ordered_quantities(&linked)?;

        let boms: Vec<&str> = finished_boms
            .iter()
            .map(String::as_str)
            .filter(|bom| !bom.trim().is_empty())
            .collect();

        let mut outcome = NettingOutcome::default();
        for row in Self::net(rows, &ordered) {
            let parent = boms
                .iter()
                .find_map(|bom| source.sub_assembly_parent(bom, &row.item_code));

            match parent {
                Some(parent_item_code) => {
                    tracing::debug!(item_code = %row.item_code, parent = %parent_item_code, "改列自製半成品");
                    outcome.sub_assemblies.push(SubAssemblyRow {
                        production_item: row.item_code.clone(),
                        quantity: row.required_bom_qty,
                        parent_item_code,
                        schedule_date: posting_date,
                    });
                }
                None => outcome.material_requests.push(row),
            }
        }

        tracing::info!(
            linked_lines = linked.len(),
            material_requests = outcome.material_requests.len(),
            sub_assemblies = outcome.sub_assemblies.len(),
            "物料需求沖減完成"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procure_core::InMemoryCatalog;
    use rstest::rstest;

    fn posting_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    }

    #[rstest]
    #[case::partially_ordered(10, 4, 6)]
    #[case::fully_ordered(10, 10, 0)]
    #[case::over_ordered(10, 15, 0)]
    #[case::nothing_ordered(10, 0, 10)]
    fn test_net_quantity(#[case] requested: i64, #[case] ordered: i64, #[case] expected: i64) {
        let mut ordered_map = HashMap::new();
        if ordered > 0 {
            ordered_map.insert("STEEL-001".to_string(), Decimal::from(ordered));
        }

        let rows = vec![MaterialRequestRow::new("STEEL-001", Decimal::from(requested))];
        let netted = MaterialRequestNetter::net(&rows, &ordered_map);

        assert_eq!(netted[0].quantity, Decimal::from(expected));
        assert_eq!(netted[0].ordered_qty, Decimal::from(ordered));
    }

    #[test]
    fn test_ordered_quantities_sum_per_item() {
        let lines = vec![
            LinkedOrderLine::new("PUR-ORD-00001", "STEEL-001", Decimal::from(3)),
            LinkedOrderLine::new("PUR-ORD-00002", "STEEL-001", Decimal::from(2)),
            LinkedOrderLine::new("PUR-ORD-00002", "BOLT-M8", Decimal::from(50)),
        ];

        let ordered = MaterialRequestNetter::ordered_quantities(&lines).unwrap();
        assert_eq!(ordered.get("STEEL-001"), Some(&Decimal::from(5)));
        assert_eq!(ordered.get("BOLT-M8"), Some(&Decimal::from(50)));
    }

    #[test]
    fn test_apply_splits_sub_assemblies() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_linked_order_line(
            "SO-0001",
            LinkedOrderLine::new("PUR-ORD-00001", "STEEL-001", Decimal::from(4)),
        );
        catalog.add_sub_assembly("BOM-BIKE", "FRAME-ASSY", "BIKE-001");

        let rows = vec![
            MaterialRequestRow::new("STEEL-001", Decimal::from(10)),
            MaterialRequestRow::new("FRAME-ASSY", Decimal::from(2)).with_required_bom_qty(Decimal::from(3)),
        ];
        let boms = vec![String::new(), "BOM-BIKE".to_string()];

        let outcome =
            MaterialRequestNetter::apply(Some("SO-0001"), &boms, &rows, posting_date(), &catalog)
                .unwrap();

        assert_eq!(outcome.material_requests.len(), 1);
        assert_eq!(outcome.material_requests[0].item_code, "STEEL-001");
        assert_eq!(outcome.material_requests[0].quantity, Decimal::from(6));
        assert_eq!(outcome.material_requests[0].ordered_qty, Decimal::from(4));

        assert_eq!(
            outcome.sub_assemblies,
            vec![SubAssemblyRow {
                production_item: "FRAME-ASSY".to_string(),
                quantity: Decimal::from(3),
                parent_item_code: "BIKE-001".to_string(),
                schedule_date: posting_date(),
            }]
        );
    }

    #[test]
    fn test_apply_without_sales_order_keeps_quantities() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_linked_order_line(
            "SO-0001",
            LinkedOrderLine::new("PUR-ORD-00001", "STEEL-001", Decimal::from(4)),
        );
        let rows = vec![MaterialRequestRow::new("STEEL-001", Decimal::from(10))];

        let outcome = MaterialRequestNetter::apply(None, &[], &rows, posting_date(), &catalog).unwrap();

        assert_eq!(outcome.material_requests[0].quantity, Decimal::from(10));
        assert_eq!(outcome.material_requests[0].ordered_qty, Decimal::ZERO);
        assert!(outcome.sub_assemblies.is_empty());
    }
}
