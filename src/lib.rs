//! # Procure
//!
//! 銷售訂單驅動的採購規劃：需求彙總、再訂購評估、供應商選擇與採購單建立

pub mod logging;

pub use procure_calc;
pub use procure_core;
pub use procure_exec;

pub use procure_calc::{PlanningSources, ProcurementPlan, ProcurementPlanner};
pub use procure_core::{ProcureError, ProcurementConfig, Result};
pub use procure_exec::{JobOutcome, JobSources, ProcurementJob, SalesOrderContext};
