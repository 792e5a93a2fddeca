use crate::models::job::{Job, JobFile};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 解析任务文件内容
pub fn parse_jobs(content: &str) -> Result<Vec<Job>> {
    let file: JobFile = toml::from_str(content).context("无法解析任务文件")?;
    Ok(file.jobs)
}

/// 从 TOML 文件加载任务列表
pub async fn load_jobs(path: &Path) -> Result<Vec<Job>> {
    if !path.exists() {
        anyhow::bail!("任务文件不存在: {}", path.display());
    }

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取任务文件: {}", path.display()))?;

    let jobs = parse_jobs(&content)
        .with_context(|| format!("任务文件格式错误: {}", path.display()))?;

    tracing::info!("从 {} 加载了 {} 个任务", path.display(), jobs.len());
    Ok(jobs)
}
