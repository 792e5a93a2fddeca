//! JS 执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"导航"和"执行 JS"的能力

use std::time::Duration;

use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 每次执行都有超时上限，超时返回 `ExtractError::Timeout`
/// - 不认识题型，不解析页面内容
pub struct JsExecutor {
    page: Page,
    eval_timeout: Duration,
}

impl JsExecutor {
    /// 创建新的 JS 执行器
    pub fn new(page: Page, eval_timeout: Duration) -> Self {
        Self { page, eval_timeout }
    }

    /// 获取 page 的引用
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 导航到指定 URL 并等待加载完成
    pub async fn goto(&self, url: &str) -> ExtractResult<()> {
        debug!("导航到: {}", url);
        let navigation = async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<(), ExtractError>(())
        };
        tokio::time::timeout(self.eval_timeout * 3, navigation)
            .await
            .map_err(|_| ExtractError::Timeout {
                what: format!("页面加载 {}", url),
                timeout_ms: (self.eval_timeout * 3).as_millis() as u64,
            })?
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> ExtractResult<JsonValue> {
        let js_code = js_code.into();
        let result = tokio::time::timeout(self.eval_timeout, self.page.evaluate(js_code))
            .await
            .map_err(|_| ExtractError::Timeout {
                what: "脚本执行".to_string(),
                timeout_ms: self.eval_timeout.as_millis() as u64,
            })??;
        Ok(result.into_value()?)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> ExtractResult<T> {
        let json_value = self.eval(js_code).await?;
        Ok(serde_json::from_value(json_value)?)
    }
}
