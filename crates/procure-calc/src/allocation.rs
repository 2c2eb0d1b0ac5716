//! 生產計劃專案數量扣減
//!
//! 生產計劃提交時，把選定專案列的數量從銷售訂單的專案待處理數量中扣除。

use procure_core::{PendingQuantityLedger, ProcureError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 生產計劃上的專案列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRow {
    /// 列序號
    pub idx: u32,

    /// 專案主檔
    pub project_master: String,

    /// 本次專案數量
    pub project_qty: Decimal,

    /// 待處理數量
    pub pending_qty: Decimal,

    /// 對應的銷售訂單專案列
    pub sales_order_row: Option<String>,
}

impl ProjectRow {
    pub fn new(idx: u32, project_master: impl Into<String>, project_qty: Decimal) -> Self {
        Self {
            idx,
            project_master: project_master.into(),
            project_qty,
            pending_qty: project_qty,
            sales_order_row: None,
        }
    }

    /// 建構器模式：設置對應的銷售訂單專案列
    pub fn with_sales_order_row(mut self, reference: impl Into<String>) -> Self {
        self.sales_order_row = Some(reference.into());
        self
    }

    /// 目前狀態
    pub fn status(&self) -> ProjectStatus {
        ProjectStatus::from_quantities(self.project_qty, self.pending_qty)
    }
}

/// 專案狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Completed,
    PartiallyCompleted,
    Pending,
}

impl ProjectStatus {
    pub fn from_quantities(project_qty: Decimal, pending_qty: Decimal) -> Self {
        if pending_qty <= Decimal::ZERO {
            ProjectStatus::Completed
        } else if pending_qty < project_qty {
            ProjectStatus::PartiallyCompleted
        } else {
            ProjectStatus::Pending
        }
    }
}

/// 生產計劃提交內容
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductionPlanSubmission {
    /// 來源銷售訂單
    pub sales_order: Option<String>,

    /// 選定的專案列序號
    pub selected_project: Option<u32>,

    /// 專案列
    pub rows: Vec<ProjectRow>,
}

/// 扣減結果
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationOutcome {
    /// 不需處理
    Skipped(String),

    /// 已更新待處理數量
    Updated {
        reference: String,
        previous: Decimal,
        remaining: Decimal,
    },
}

/// 專案數量扣減器
pub struct ProjectAllocator<'a> {
    rows: &'a [ProjectRow],
    by_idx: HashMap<u32, usize>,
}

impl<'a> ProjectAllocator<'a> {
    /// 建立列序號索引
    pub fn new(rows: &'a [ProjectRow]) -> Self {
        let by_idx = rows
            .iter()
            .enumerate()
            .map(|(pos, row)| (row.idx, pos))
            .collect();
        Self { rows, by_idx }
    }

    /// 依序號查找專案列
    pub fn row(&self, idx: u32) -> Option<&'a ProjectRow> {
        self.by_idx.get(&idx).map(|&pos| &self.rows[pos])
    }

    /// 執行扣減
    pub fn allocate(
        submission: &ProductionPlanSubmission,
        ledger: &mut dyn PendingQuantityLedger,
    ) -> procure_core::Result<AllocationOutcome> {
        if submission.sales_order.is_none() {
            return Ok(AllocationOutcome::Skipped("沒有來源銷售訂單".to_string()));
        }

        let Some(selected) = submission.selected_project else {
            return Ok(AllocationOutcome::Skipped("沒有選定專案".to_string()));
        };

        let allocator = ProjectAllocator::new(&submission.rows);
        let Some(row) = allocator.row(selected) else {
            return Ok(AllocationOutcome::Skipped(format!("找不到專案列 {}", selected)));
        };

        let Some(reference) = row.sales_order_row.as_deref() else {
            return Ok(AllocationOutcome::Skipped(format!(
                "專案 {} 沒有對應的銷售訂單專案列",
                row.project_master
            )));
        };

        let previous = ledger
            .pending_qty(reference)
            .ok_or_else(|| ProcureError::PendingRowNotFound(reference.to_string()))?;

        if row.project_qty > previous {
            return Err(ProcureError::ProjectQtyExceedsPending {
                project_qty: row.project_qty,
                pending_qty: previous,
            });
        }

        let remaining = (previous - row.project_qty).max(Decimal::ZERO);
        ledger.set_pending_qty(reference, remaining)?;

        tracing::info!(reference, %previous, %remaining, "更新專案待處理數量");

        Ok(AllocationOutcome::Updated {
            reference: reference.to_string(),
            previous,
            remaining,
        })
    }
}
