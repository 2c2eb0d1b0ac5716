//! 銷售訂單採購作業
//!
//! 每張銷售訂單提交後排入一個作業，依序完成規劃與採購單建立。

use chrono::NaiveDate;
use procure_calc::{PlanningSources, ProcurementPlan, ProcurementPlanner, WarehouseResolver};
use procure_core::{
    BomSource, ItemMaster, OrderGateway, OrderSource, ProcurementConfig, PurchaseHistory,
    StockLedger, SupplierDirectory, WarehouseDirectory,
};

use crate::executor::{ExecutionReport, OrderExecutor};

/// 觸發作業的銷售訂單
#[derive(Debug, Clone)]
pub struct SalesOrderContext {
    /// 銷售訂單號
    pub order_id: String,

    /// 公司
    pub company: String,

    /// 訂單指定倉庫
    pub set_warehouse: Option<String>,

    /// 作業日期
    pub run_date: NaiveDate,
}

impl SalesOrderContext {
    pub fn new(order_id: impl Into<String>, company: impl Into<String>, run_date: NaiveDate) -> Self {
        Self {
            order_id: order_id.into(),
            company: company.into(),
            set_warehouse: None,
            run_date,
        }
    }

    /// 建構器模式：設置指定倉庫
    pub fn with_warehouse(mut self, warehouse: impl Into<String>) -> Self {
        self.set_warehouse = Some(warehouse.into());
        self
    }
}

/// 作業所需的外部資料來源
#[derive(Clone, Copy)]
pub struct JobSources<'a> {
    pub orders: &'a dyn OrderSource,
    pub warehouses: &'a dyn WarehouseDirectory,
    pub suppliers: &'a dyn SupplierDirectory,
    pub planning: PlanningSources<'a>,
}

impl<'a> JobSources<'a> {
    /// 由同一個資料來源提供全部查詢
    pub fn from_source<S>(source: &'a S) -> Self
    where
        S: OrderSource
            + WarehouseDirectory
            + SupplierDirectory
            + BomSource
            + ItemMaster
            + StockLedger
            + PurchaseHistory,
    {
        Self {
            orders: source,
            warehouses: source,
            suppliers: source,
            planning: PlanningSources::from_source(source),
        }
    }
}

/// 作業結果
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub plan: ProcurementPlan,
    pub execution: ExecutionReport,
}

/// 採購作業
pub struct ProcurementJob {
    planner: ProcurementPlanner,
}

impl ProcurementJob {
    pub fn new(config: ProcurementConfig) -> procure_core::Result<Self> {
        Ok(Self {
            planner: ProcurementPlanner::new(config)?,
        })
    }

    /// 執行作業
    ///
    /// 規劃階段失敗時不會呼叫任何閘道操作，錯誤直接回傳給作業執行者。
    pub fn run(
        &self,
        order: &SalesOrderContext,
        sources: &JobSources<'_>,
        gateway: &mut dyn OrderGateway,
    ) -> procure_core::Result<JobOutcome> {
        tracing::info!(sales_order = %order.order_id, company = %order.company, "採購作業開始");

        let plan = self.plan(order, sources).map_err(|e| {
            tracing::error!(sales_order = %order.order_id, error = %e, "採購規劃失敗，作業中止");
            e
        })?;

        if !plan.has_orders() {
            tracing::info!(sales_order = %order.order_id, "沒有需要建立的採購單");
        }

        let executor = OrderExecutor::new(
            sources.suppliers,
            &order.company,
            &plan.warehouse,
            &order.order_id,
            order.run_date,
        );
        let execution = executor.execute(&plan.batches, &plan.unresolved_report, gateway)?;

        Ok(JobOutcome { plan, execution })
    }

    fn plan(
        &self,
        order: &SalesOrderContext,
        sources: &JobSources<'_>,
    ) -> procure_core::Result<ProcurementPlan> {
        let lines = sources.orders.order_lines(&order.order_id)?;
        let warehouse = WarehouseResolver::resolve(
            order.set_warehouse.as_deref(),
            &order.company,
            sources.warehouses,
            self.planner.config(),
        );

        self.planner.plan(
            &lines,
            &order.company,
            &warehouse,
            order.run_date,
            &sources.planning,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryOrderGateway;
    use procure_core::memory::CatalogItem;
    use procure_core::{InMemoryCatalog, OrderLine, ProcureError};
    use rust_decimal::Decimal;

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    }

    #[test]
    fn test_missing_order_aborts_without_gateway_calls() {
        let catalog = InMemoryCatalog::new();
        let mut gateway = InMemoryOrderGateway::new();
        let job = ProcurementJob::new(ProcurementConfig::new()).unwrap();

        let result = job.run(
            &SalesOrderContext::new("SO-404", "ACME", run_date()),
            &JobSources::from_source(&catalog),
            &mut gateway,
        );

        assert!(matches!(result, Err(ProcureError::OrderNotFound(_))));
        assert_eq!(gateway.unresolved_report("SO-404"), None);
    }

    #[test]
    fn test_bom_failure_creates_no_orders() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_item(CatalogItem::new("WHEEL-001").with_supplier("VENDOR-A"));
        catalog.add_order(
            "SO-0002",
            vec![
                OrderLine::new("WHEEL-001", Decimal::from(2)),
                OrderLine::new("CAR-001", Decimal::ONE).with_bom("BOM-CAR"),
            ],
        );
        let mut gateway = InMemoryOrderGateway::new();
        let job = ProcurementJob::new(ProcurementConfig::new()).unwrap();

        let result = job.run(
            &SalesOrderContext::new("SO-0002", "ACME", run_date()),
            &JobSources::from_source(&catalog),
            &mut gateway,
        );

        assert!(matches!(result, Err(ProcureError::BomExplosion { .. })));
        assert!(gateway.orders().is_empty());
    }

    #[test]
    fn test_warehouse_fallback_applied() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_item(CatalogItem::new("WHEEL-001").with_supplier("VENDOR-A"));
        catalog.add_order("SO-0003", vec![OrderLine::new("WHEEL-001", Decimal::from(2))]);
        let mut gateway = InMemoryOrderGateway::new();
        let job = ProcurementJob::new(ProcurementConfig::new()).unwrap();

        let outcome = job
            .run(
                &SalesOrderContext::new("SO-0003", "ACME", run_date()),
                &JobSources::from_source(&catalog),
                &mut gateway,
            )
            .unwrap();

        assert_eq!(outcome.plan.warehouse, "Stores - ACME");
        let request = gateway.order_for("VENDOR-A").unwrap();
        assert_eq!(request.warehouse, "Stores - ACME");
        assert_eq!(request.lines[0].rate, Decimal::ZERO);
    }
}
