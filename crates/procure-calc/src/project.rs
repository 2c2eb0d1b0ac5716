//! 專案成品展開
//!
//! 把專案主檔的成品列轉成銷售訂單明細：數量 = 專案數量 × 計劃數量，
//! 單價取 BOM 設計的原物料成本，沒有成本時為 0。

use procure_core::{OrderLine, ProcureError, ProjectItem, ProjectMasterSource};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 由專案成品產生的訂單明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectOrderLine {
    pub line: OrderLine,

    /// 專案主檔
    pub project_master: String,

    /// 專案列參照
    pub project_item_reference: String,

    /// 每單位專案的計劃數量
    pub planned_qty: Decimal,

    /// 成本單價
    pub rate: Decimal,

    pub amount: Decimal,

    pub description: Option<String>,
}

/// 專案成品展開器
pub struct ProjectExpander;

impl ProjectExpander {
    /// 展開專案主檔
    pub fn expand(
        project_master: &str,
        project_qty: Decimal,
        source: &dyn ProjectMasterSource,
    ) -> procure_core::Result<Vec<ProjectOrderLine>> {
        let items = source.project_items(project_master)?;
        if items.is_empty() {
            return Err(ProcureError::EmptyProject(project_master.to_string()));
        }

        let lines = items
            .iter()
            .map(|item| Self::expand_item(project_master, project_qty, item, source))
            .collect::<procure_core::Result<Vec<_>>>()?;

        tracing::info!(project_master, %project_qty, lines = lines.len(), "專案成品展開完成");
        Ok(lines)
    }

    fn expand_item(
        project_master: &str,
        project_qty: Decimal,
        item: &ProjectItem,
        source: &dyn ProjectMasterSource,
    ) -> procure_core::Result<ProjectOrderLine> {
        let overflow = || ProcureError::QuantityOverflow(item.item_code.clone());

        let quantity = project_qty.checked_mul(item.planned_qty).ok_or_else(overflow)?;
        let rate = item
            .bom_reference
            .as_deref()
            .filter(|bom| !bom.trim().is_empty())
            .and_then(|bom| source.bom_raw_material_cost(bom))
            .unwrap_or(Decimal::ZERO);
        let amount = rate.checked_mul(quantity).ok_or_else(overflow)?;

        let mut line = OrderLine::new(item.item_code.clone(), quantity);
        line.bom_reference = item.bom_reference.clone();

        Ok(ProjectOrderLine {
            line,
            project_master: project_master.to_string(),
            project_item_reference: item.reference.clone(),
            planned_qty: item.planned_qty,
            rate,
            amount,
            description: item.description.clone(),
        })
    }
}
