//! 需求彙總

use procure_core::{OrderLine, RequiredItems};
use rust_decimal::Decimal;

/// 需求彙總器
pub struct RequirementAggregator;

impl RequirementAggregator {
    /// 彙總訂單明細與 BOM 展開結果
    ///
    /// 沒有 BOM 的明細直接累加數量；有 BOM 的明細呼叫 `explode` 並累加各子件數量。
    /// 任一展開失敗時整體失敗，不回傳部分結果。
    pub fn aggregate<F>(lines: &[OrderLine], mut explode: F) -> procure_core::Result<RequiredItems>
    where
        F: FnMut(&str, Decimal) -> procure_core::Result<Vec<procure_core::BomComponent>>,
    {
        let mut required = RequiredItems::new();

        for line in lines {
            match line.bom() {
                None => required.add(&line.item_code, line.quantity)?,
                Some(bom) => {
                    let components = explode(bom, line.quantity)?;
                    tracing::debug!(
                        item_code = %line.item_code,
                        bom = %bom,
                        components = components.len(),
                        "BOM 展開"
                    );
                    for component in components {
                        required.add(&component.item_code, component.quantity)?;
                    }
                }
            }
        }

        Ok(required)
    }
}
