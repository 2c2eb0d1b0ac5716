//! 日誌初始化

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日誌系統
///
/// 以 `RUST_LOG` 設定過濾條件，未設定時為 `info`。
///
/// ```no_run
/// procure::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

/// 測試用日誌（debug 等級，輸出到測試擷取）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
