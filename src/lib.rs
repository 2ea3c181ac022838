pub mod api;
pub mod core;

use once_cell::sync::OnceCell;

static LOG_INIT: OnceCell<()> = OnceCell::new();

/// 初始化日志，可重复调用
pub fn init_logging() {
    LOG_INIT.get_or_init(|| {
        let _ = env_logger::Builder::from_default_env().try_init();
    });
}
