//! # Procurement Planning Engine
//!
//! 採購規劃計算：需求彙總 → 再訂購評估 → 供應商選擇 → 供應商分組 → 結果報告

pub mod aggregation;
pub mod allocation;
pub mod grouping;
pub mod netting;
pub mod planner;
pub mod project;
pub mod reorder;
pub mod reporting;
pub mod supplier_selection;
pub mod warehouse;

// Re-export 主要類型
pub use aggregation::RequirementAggregator;
pub use allocation::{
    AllocationOutcome, ProductionPlanSubmission, ProjectAllocator, ProjectRow, ProjectStatus,
};
pub use grouping::OrderGrouper;
pub use netting::{MaterialRequestNetter, NettingOutcome};
pub use planner::{PlanningSources, ProcurementPlanner};
pub use project::{ProjectExpander, ProjectOrderLine};
pub use reorder::ReorderEvaluator;
pub use reporting::OutcomeReporter;
pub use supplier_selection::{SupplierResolution, SupplierSelector};
pub use warehouse::WarehouseResolver;

use procure_core::{OrderDecision, SupplierBatch, UnresolvedItem};

/// 採購規劃結果
#[derive(Debug, Clone)]
pub struct ProcurementPlan {
    /// 本次規劃 ID
    pub run_id: uuid::Uuid,

    /// 目標倉庫
    pub warehouse: String,

    /// 訂購決策
    pub decisions: Vec<OrderDecision>,

    /// 供應商批次
    pub batches: Vec<SupplierBatch>,

    /// 無法下單的物料（已去重、排序）
    pub unresolved: Vec<UnresolvedItem>,

    /// 無法下單物料清單文字
    pub unresolved_report: String,

    /// 警告信息
    pub warnings: Vec<PlanWarning>,
}

impl ProcurementPlan {
    /// 創建空的規劃結果
    pub fn empty(warehouse: impl Into<String>) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4(),
            warehouse: warehouse.into(),
            decisions: Vec::new(),
            batches: Vec::new(),
            unresolved: Vec::new(),
            unresolved_report: String::new(),
            warnings: Vec::new(),
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: PlanWarning) {
        self.warnings.push(warning);
    }

    /// 是否有需要建立的採購單
    pub fn has_orders(&self) -> bool {
        !self.batches.is_empty()
    }
}

/// 規劃警告
#[derive(Debug, Clone)]
pub struct PlanWarning {
    pub item_code: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl PlanWarning {
    pub fn new(item_code: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            item_code,
            message,
            severity,
        }
    }

    pub fn info(item_code: String, message: String) -> Self {
        Self::new(item_code, message, WarningSeverity::Info)
    }

    pub fn warning(item_code: String, message: String) -> Self {
        Self::new(item_code, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
}
