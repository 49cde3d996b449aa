/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则 verbose 时为 debug，默认 info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 库存/索赔客户端");
    info!("🌐 服务地址: {}", config.base_url);
    info!("💾 索赔存储: {}", config.claim_store_path);
    info!("{}", "=".repeat(60));
}

/// 记录页面数据加载信息
///
/// # 参数
/// - `page`: 页面路由
/// - `fetched`: 接口返回的物品数
/// - `shown`: 过滤后显示的物品数
pub fn log_page_loaded(page: &str, fetched: usize, shown: usize) {
    info!("✓ [{}] 获取 {} 个物品，过滤后显示 {} 个", page, fetched, shown);
}

/// 记录操作完成及跳转
pub fn log_navigation(from: &str, to: &str) {
    info!("➡️  {} → {}", from, to);
}

/// 截断长文本用于显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a long description", 6), "a long...");
        assert_eq!(truncate_text("沙发和电视", 2), "沙发...");
    }
}
