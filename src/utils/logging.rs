//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use anyhow::Result;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化 tracing 输出
///
/// 过滤级别取 `RUST_LOG`，未设置时为 `info`；`verbose` 为真时默认 `debug`。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n题目抽取日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题目抽取模式");
    if config.launch_headless {
        info!("🌐 浏览器: 无头模式");
    } else {
        info!("🌐 浏览器: 调试端口 {}", config.browser_debug_port);
    }
    info!("📁 任务文件: {}", config.jobs_file);
    info!("📂 输出目录: {}", config.output_dir);
    info!("🔁 最大重试次数: {}", config.max_retries);
    info!(
        "✨ 润色: {}",
        if config.openai_api_key.is_some() {
            config.polish_model_name.as_str()
        } else {
            "未配置"
        }
    );
    info!("{}", "=".repeat(60));
}

/// 记录任务开始
///
/// # 参数
/// - `index`: 任务编号（1-based）
/// - `total`: 任务总数
/// - `shape`: 题型
/// - `url`: 页面地址
pub fn log_job_start(index: usize, total: usize, shape: &str, url: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📄 [{}/{}] 开始抽取 {} 题: {}", index, total, shape, truncate_text(url, 80));
}

/// 记录任务完成
///
/// # 参数
/// - `index`: 任务编号（1-based）
/// - `output_path`: 输出文件路径
/// - `attempts`: 实际尝试次数
pub fn log_job_complete(index: usize, output_path: &str, attempts: usize) {
    if attempts > 1 {
        info!("✓ [{}] 完成（第 {} 次尝试）→ {}", index, attempts, output_path);
    } else {
        info!("✓ [{}] 完成 → {}", index, output_path);
    }
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `total`: 总数
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(success: usize, failed: usize, total: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
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
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("题目抽取日志", 2), "题目...");
    }

    #[test]
    fn test_init_log_file_writes_header() {
        let path = std::env::temp_dir().join(format!("question_extract_log_{}.txt", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        init_log_file(&path_str).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("题目抽取日志"));
        let _ = fs::remove_file(&path);
    }
}
