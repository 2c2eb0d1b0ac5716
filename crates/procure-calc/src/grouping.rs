//! 按供應商分組

use procure_core::{ResolvedLine, SupplierBatch};
use std::collections::HashMap;

/// 供應商分組器
pub struct OrderGrouper;

impl OrderGrouper {
    /// 每個供應商一個批次，批次與明細都保留出現順序
    pub fn group(lines: &[ResolvedLine]) -> Vec<SupplierBatch> {
        let mut batches: Vec<SupplierBatch> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for line in lines {
            let supplier = line.quote.supplier.as_str();
            let pos = *index.entry(supplier).or_insert_with(|| {
                batches.push(SupplierBatch::new(supplier));
                batches.len() - 1
            });
            batches[pos].add_line(line.item_code.clone(), line.quantity, line.quote.rate);
        }

        batches
    }
}
