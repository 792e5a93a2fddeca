//! 抽取错误类型
//!
//! 区分两类失败：
//! - 结构性失败（缺少必需区域、未知题型）：重试无意义
//! - 瞬时失败（超时、浏览器通信、脚本返回异常）：调用方可以重试
//!
//! "字段未解析"不是错误，由 `Answer::Unresolved` 等显式值表达。

use thiserror::Error;

use crate::models::QuestionShape;

/// 抽取引擎错误
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 缺少必需的结构区域
    #[error("[{shape}] 缺少必需区域 `{anchor}` ({context})")]
    MissingRegion {
        shape: QuestionShape,
        anchor: String,
        context: String,
    },

    /// 未知题型标识
    #[error("未知题型: {0}")]
    UnknownShape(String),

    /// CSS 选择器无法解析
    #[error("选择器 `{selector}` 无法解析: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// 等待超时
    #[error("等待 {what} 超时 ({timeout_ms} ms)")]
    Timeout { what: String, timeout_ms: u64 },

    /// 浏览器通信失败
    #[error("浏览器操作失败: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    /// 脚本返回值无法解析
    #[error("脚本返回值解析失败: {0}")]
    Script(#[from] serde_json::Error),
}

impl ExtractError {
    /// 创建缺少必需区域错误
    pub fn missing_region(
        shape: QuestionShape,
        anchor: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        ExtractError::MissingRegion {
            shape,
            anchor: anchor.into(),
            context: context.into(),
        }
    }

    /// 是否为瞬时失败（值得重试）
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ExtractError::Timeout { .. } | ExtractError::Browser(_) | ExtractError::Script(_)
        )
    }
}

/// 抽取结果类型
pub type ExtractResult<T> = Result<T, ExtractError>;
