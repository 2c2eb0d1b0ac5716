//! 採購規劃配置

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::supplier::QuoteSource;
use crate::{ProcureError, Result};

/// 採購規劃參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcurementConfig {
    /// 最近採購紀錄筆數
    pub history_limit: usize,

    /// 供應商報價回退鏈（依序嘗試）
    pub supplier_tiers: Vec<QuoteSource>,

    /// 找不到倉庫時的名稱前綴（"{prefix} - {company}"）
    pub fallback_warehouse_prefix: String,

    /// 無法下單物料清單的分隔符
    pub report_separator: String,
}

impl Default for ProcurementConfig {
    fn default() -> Self {
        Self {
            history_limit: 10,
            supplier_tiers: QuoteSource::default_chain(),
            fallback_warehouse_prefix: "Stores".to_string(),
            report_separator: ", ".to_string(),
        }
    }
}

impl ProcurementConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 字串載入
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ProcureError::InvalidConfig(format!("JSON 解析失敗: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 從 JSON 檔案載入
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProcureError::InvalidConfig(format!("無法讀取 {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// 建構器模式：設置最近紀錄筆數
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// 建構器模式：設置報價回退鏈
    pub fn with_supplier_tiers(mut self, tiers: Vec<QuoteSource>) -> Self {
        self.supplier_tiers = tiers;
        self
    }

    /// 建構器模式：設置備用倉庫前綴
    pub fn with_fallback_warehouse_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.fallback_warehouse_prefix = prefix.into();
        self
    }

    /// 建構器模式：設置清單分隔符
    pub fn with_report_separator(mut self, separator: impl Into<String>) -> Self {
        self.report_separator = separator.into();
        self
    }

    /// 檢查配置
    pub fn validate(&self) -> Result<()> {
        if self.history_limit == 0 {
            return Err(ProcureError::InvalidConfig(
                "history_limit 必須大於 0".to_string(),
            ));
        }

        if self.supplier_tiers.is_empty() {
            return Err(ProcureError::InvalidConfig(
                "supplier_tiers 不可為空".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for tier in &self.supplier_tiers {
            if !seen.insert(tier) {
                return Err(ProcureError::InvalidConfig(format!(
                    "supplier_tiers 重複: {:?}",
                    tier
                )));
            }
        }

        Ok(())
    }

    /// 備用倉庫名稱
    pub fn fallback_warehouse(&self, company: &str) -> String {
        format!("{} - {}", self.fallback_warehouse_prefix, company)
    }
}
