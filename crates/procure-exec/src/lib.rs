//! # Procure Exec
//!
//! 採購單執行：逐供應商建立、提交、通知，以及單一訂單的完整作業流程

pub mod executor;
pub mod job;
pub mod memory;
pub mod notification;

// Re-export 主要類型
pub use executor::{CreatedOrder, ExecutionReport, FailedOrder, OrderExecutor};
pub use job::{JobOutcome, JobSources, ProcurementJob, SalesOrderContext};
pub use memory::InMemoryOrderGateway;
pub use notification::resolve_recipient;
