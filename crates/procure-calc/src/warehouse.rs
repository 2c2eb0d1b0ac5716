//! 目標倉庫決定

use procure_core::{ProcurementConfig, WarehouseDirectory};

/// 倉庫決定器
pub struct WarehouseResolver;

impl WarehouseResolver {
    /// 依序：訂單指定倉庫 → 全域預設倉庫 → 公司第一個啟用倉庫 → "{prefix} - {company}"
    pub fn resolve(
        explicit: Option<&str>,
        company: &str,
        directory: &dyn WarehouseDirectory,
        config: &ProcurementConfig,
    ) -> String {
        explicit
            .map(str::to_string)
            .filter(|w| !w.trim().is_empty())
            .or_else(|| directory.default_warehouse().filter(|w| !w.trim().is_empty()))
            .or_else(|| {
                directory
                    .first_active_warehouse(company)
                    .filter(|w| !w.trim().is_empty())
            })
            .unwrap_or_else(|| config.fallback_warehouse(company))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procure_core::InMemoryCatalog;

    #[test]
    fn test_resolution_chain() {
        let config = ProcurementConfig::new();
        let mut catalog = InMemoryCatalog::new();

        assert_eq!(
            WarehouseResolver::resolve(None, "ACME", &catalog, &config),
            "Stores - ACME"
        );

        catalog.add_company_warehouse("ACME", "Main - ACME");
        catalog.add_company_warehouse("ACME", "Spare - ACME");
        assert_eq!(
            WarehouseResolver::resolve(Some(""), "ACME", &catalog, &config),
            "Main - ACME"
        );

        catalog.set_default_warehouse("Central");
        assert_eq!(
            WarehouseResolver::resolve(None, "ACME", &catalog, &config),
            "Central"
        );

        assert_eq!(
            WarehouseResolver::resolve(Some("Line-1 - ACME"), "ACME", &catalog, &config),
            "Line-1 - ACME"
        );
    }

    #[test]
    fn test_blank_directory_entries_skipped() {
        let config = ProcurementConfig::new();
        let mut catalog = InMemoryCatalog::new();
        catalog.set_default_warehouse("");
        catalog.add_company_warehouse("ACME", " ");

        assert_eq!(
            WarehouseResolver::resolve(None, "ACME", &catalog, &config),
            "Stores - ACME"
        );
    }
}
