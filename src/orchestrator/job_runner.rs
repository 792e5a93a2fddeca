//! 单个任务执行器 - 编排层
//!
//! 导航 → 解析 → 写出 JSON。只有瞬时失败会重试，结构性失败立即返回。

use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::error::ExtractResult;
use crate::infrastructure::JsExecutor;
use crate::models::{Job, QuestionRecord, QuestionShape};
use crate::page::BrowserPage;
use crate::parsers::Extractor;

/// 按瞬时失败重试
///
/// # 参数
/// - `max_retries`: 首次之外最多再试几次
/// - `op`: 每次尝试调用一次，参数为尝试序号（1-based）
///
/// # 返回
/// 最后一次的结果和实际尝试次数
pub async fn retry_transient<T, F, Fut>(max_retries: usize, mut op: F) -> (ExtractResult<T>, usize)
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = ExtractResult<T>>,
{
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Err(e) if e.is_transient() && attempt <= max_retries => {
                warn!("⚠️ 第 {} 次尝试失败（可重试）: {}", attempt, e);
                attempt += 1;
            }
            result => return (result, attempt),
        }
    }
}

/// 执行一个任务，返回记录和尝试次数
pub async fn run_job(
    executor: &JsExecutor,
    extractor: &Extractor,
    job: &Job,
    max_retries: usize,
    reveal_settle: std::time::Duration,
) -> (ExtractResult<QuestionRecord>, usize) {
    retry_transient(max_retries, |_| async move {
        executor.goto(&job.url).await?;
        let page = BrowserPage::new(executor, job.url.as_str(), reveal_settle);
        extractor.extract(&page, job.shape, job.polish).await
    })
    .await
}

/// 输出文件名：`<两位序号>_<题型>.json`
pub fn output_file_name(index: usize, shape: QuestionShape) -> String {
    format!("{:02}_{}.json", index, shape.id())
}

/// 把记录写成格式化 JSON
pub async fn write_record(
    output_dir: &Path,
    index: usize,
    shape: QuestionShape,
    record: &QuestionRecord,
) -> Result<PathBuf> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("无法创建输出目录: {}", output_dir.display()))?;

    let path = output_dir.join(output_file_name(index, shape));
    let json = serde_json::to_string_pretty(record).context("序列化记录失败")?;
    tokio::fs::write(&path, json)
        .await
        .with_context(|| format!("无法写入: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;
    use crate::models::TwoPartAnalysis;

    fn timeout() -> ExtractError {
        ExtractError::Timeout {
            what: "test".into(),
            timeout_ms: 1,
        }
    }

    #[tokio::test]
    async fn test_retry_transient_then_success() {
        let (result, attempts) = retry_transient(2, |attempt| async move {
            if attempt < 2 {
                Err(timeout())
            } else {
                Ok(attempt)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 2);
        assert_eq!(attempts, 2);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_limit() {
        let (result, attempts) = retry_transient(1, |_| async { Err::<(), _>(timeout()) }).await;
        assert!(result.is_err());
        assert_eq!(attempts, 2);
    }

    #[tokio::test]
    async fn test_structural_failure_is_not_retried() {
        let (result, attempts) = retry_transient(3, |_| async {
            Err::<(), _>(ExtractError::missing_region(QuestionShape::Rc, ".bbcodeBoxOut", "test"))
        })
        .await;
        assert!(matches!(result, Err(ExtractError::MissingRegion { .. })));
        assert_eq!(attempts, 1);
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(3, QuestionShape::Msr), "03_msr.json");
        assert_eq!(output_file_name(12, QuestionShape::Cr), "12_cr.json");
    }

    #[tokio::test]
    async fn test_write_record() {
        let dir = std::env::temp_dir().join(format!("question_extract_out_{}", std::process::id()));
        let record = QuestionRecord::TwoPartAnalysis(TwoPartAnalysis {
            passage: "p".into(),
            ..Default::default()
        });
        let path = write_record(&dir, 1, QuestionShape::Tpa, &record).await.unwrap();
        assert!(path.ends_with("01_tpa.json"));

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let back: QuestionRecord = serde_json::from_str(&content).unwrap();
        assert_eq!(back, record);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
