//! 页面边界
//!
//! 解析器只通过 `PageSource` 读取页面：区域文本、区域标记、展开答案、难度标签。
//! 可选区域的缺失用 `Ok(None)` / 空值表达，真正的通信失败才返回 `Err`。

pub mod browser_page;
pub mod static_page;

use std::time::Duration;

use tracing::debug;

use crate::error::ExtractResult;

pub use browser_page::BrowserPage;
pub use static_page::StaticPage;

/// 难度标签的选择器
pub const DIFFICULTY_SELECTOR: &str = ".tag_css_link";

/// 解析器所依赖的页面能力
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// 页面上下文（用于错误信息）
    fn location(&self) -> String;

    /// 第一个匹配元素的渲染文本，`wait` 内未出现则为 `None`
    async fn region_text(&self, selector: &str, wait: Duration) -> ExtractResult<Option<String>>;

    /// 第一个匹配元素的外层标记，`wait` 内未出现则为 `None`
    async fn region_html(&self, selector: &str, wait: Duration) -> ExtractResult<Option<String>>;

    /// 对每个 `outer` 匹配，取其内第一个 `inner` 的渲染文本，没有则为空串
    async fn scoped_texts(&self, outer: &str, inner: &str) -> ExtractResult<Vec<String>>;

    /// 点击所有匹配元素，返回点击数量；没有匹配不算错误
    async fn reveal_all(&self, selector: &str) -> ExtractResult<usize>;

    /// 只点击第一个匹配元素，返回是否点到
    async fn reveal_first(&self, selector: &str) -> ExtractResult<bool>;

    /// 难度标签，任何失败都返回空串
    async fn difficulty(&self) -> String {
        match self.region_text(DIFFICULTY_SELECTOR, Duration::ZERO).await {
            Ok(Some(text)) => text.trim().to_string(),
            Ok(None) => String::new(),
            Err(e) => {
                debug!("读取难度失败: {}", e);
                String::new()
            }
        }
    }
}
