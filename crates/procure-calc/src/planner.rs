//! 採購規劃主流程

use chrono::NaiveDate;
use procure_core::{
    BomSource, ItemMaster, OrderLine, ProcurementConfig, PurchaseHistory, QuoteSource,
    ResolvedLine, StockLedger,
};

use crate::aggregation::RequirementAggregator;
use crate::grouping::OrderGrouper;
use crate::reorder::ReorderEvaluator;
use crate::reporting::OutcomeReporter;
use crate::supplier_selection::{SupplierResolution, SupplierSelector};
use crate::{PlanWarning, ProcurementPlan};

/// 規劃所需的外部資料來源
#[derive(Clone, Copy)]
pub struct PlanningSources<'a> {
    pub boms: &'a dyn BomSource,
    pub items: &'a dyn ItemMaster,
    pub stock: &'a dyn StockLedger,
    pub history: &'a dyn PurchaseHistory,
}

impl<'a> PlanningSources<'a> {
    /// 由同一個資料來源提供全部查詢
    pub fn from_source<S>(source: &'a S) -> Self
    where
        S: BomSource + ItemMaster + StockLedger + PurchaseHistory,
    {
        Self {
            boms: source,
            items: source,
            stock: source,
            history: source,
        }
    }
}

/// 採購規劃器
pub struct ProcurementPlanner {
    config: ProcurementConfig,
}

impl ProcurementPlanner {
    /// 創建新的規劃器
    pub fn new(config: ProcurementConfig) -> procure_core::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 主規劃入口
    ///
    /// 依序執行五個階段，任一 BOM 展開失敗即中止，不產生任何批次。
    pub fn plan(
        &self,
        lines: &[OrderLine],
        company: &str,
        warehouse: &str,
        as_of: NaiveDate,
        sources: &PlanningSources<'_>,
    ) -> procure_core::Result<ProcurementPlan> {
        tracing::info!(
            lines = lines.len(),
            company,
            warehouse,
            "開始採購規劃"
        );

        let mut plan = ProcurementPlan::empty(warehouse);

        // Step 1: 需求彙總
        let lines = Self::resolve_default_boms(lines, sources.boms);
        let required = RequirementAggregator::aggregate(&lines, |bom, quantity| {
            sources.boms.explode_bom(bom, company, quantity)
        })?;
        tracing::debug!(items = required.len(), "Step 1: 需求彙總完成");

        // Step 2: 再訂購評估
        let decisions =
            ReorderEvaluator::evaluate(&required, warehouse, sources.items, sources.stock)?;
        tracing::debug!(decisions = decisions.len(), "Step 2: 再訂購評估完成");

        // Step 3: 供應商選擇
        let selector = SupplierSelector::new(&self.config, as_of);
        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();

        for decision in &decisions {
            match selector.select(&decision.item_code, sources.items, sources.history) {
                SupplierResolution::Resolved(quote) => {
                    if quote.source == QuoteSource::ItemMasterDefault {
                        plan.add_warning(PlanWarning::info(
                            decision.item_code.clone(),
                            format!("無歷史價格，使用預設供應商 {}，單價 0", quote.supplier),
                        ));
                    }
                    resolved.push(ResolvedLine::new(
                        decision.item_code.clone(),
                        decision.order_quantity,
                        quote,
                    ));
                }
                SupplierResolution::Unresolved(item) => {
                    tracing::warn!(item_code = %item.item_code, reason = %item.reason, "無法決定供應商");
                    plan.add_warning(PlanWarning::warning(
                        item.item_code.clone(),
                        format!("無法決定供應商: {}", item.reason),
                    ));
                    unresolved.push(item);
                }
            }
        }
        plan.decisions = decisions;
        tracing::debug!(
            resolved = resolved.len(),
            unresolved = unresolved.len(),
            "Step 3: 供應商選擇完成"
        );

        // Step 4: 按供應商分組
        plan.batches = OrderGrouper::group(&resolved);
        tracing::debug!(batches = plan.batches.len(), "Step 4: 供應商分組完成");

        // Step 5: 結果報告
        plan.unresolved = OutcomeReporter::collect(unresolved);
        plan.unresolved_report =
            OutcomeReporter::render(&plan.unresolved, &self.config.report_separator);

        tracing::info!(
            run_id = %plan.run_id,
            batches = plan.batches.len(),
            unresolved = plan.unresolved.len(),
            "採購規劃完成"
        );

        Ok(plan)
    }

    /// 沒有指定 BOM（或 BOM 為空白）的明細使用物料預設 BOM
    fn resolve_default_boms(lines: &[OrderLine], boms: &dyn BomSource) -> Vec<OrderLine> {
        lines
            .iter()
            .map(|line| {
                let mut line = line.clone();
                line.bom_reference = line
                    .bom_reference
                    .take()
                    .filter(|bom| !bom.trim().is_empty())
                    .or_else(|| {
                        boms.resolve_default_bom(&line.item_code)
                            .filter(|bom| !bom.trim().is_empty())
                    });
                line
            })
            .collect()
    }

    /// 獲取配置引用
    pub fn config(&self) -> &ProcurementConfig {
        &self.config
    }
}
