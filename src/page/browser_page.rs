//! 浏览器页面
//!
//! 每次读取都是一段 JS，选择器经 serde_json 转义后嵌入脚本。

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::ExtractResult;
use crate::infrastructure::JsExecutor;
use crate::page::PageSource;

/// 等待区域出现时的轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct BrowserPage<'a> {
    executor: &'a JsExecutor,
    url: String,
    reveal_settle: Duration,
}

impl<'a> BrowserPage<'a> {
    pub fn new(executor: &'a JsExecutor, url: impl Into<String>, reveal_settle: Duration) -> Self {
        Self {
            executor,
            url: url.into(),
            reveal_settle,
        }
    }

    /// 轮询直到脚本返回非 null 或超过 `wait`
    async fn poll_first(&self, js_code: &str, wait: Duration) -> ExtractResult<Option<String>> {
        let deadline = Instant::now() + wait;
        loop {
            let value: Option<String> = self.executor.eval_as(js_code).await?;
            if value.is_some() || Instant::now() >= deadline {
                return Ok(value);
            }
            sleep(POLL_INTERVAL).await;
        }
    }
}

fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

impl PageSource for BrowserPage<'_> {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn region_text(&self, selector: &str, wait: Duration) -> ExtractResult<Option<String>> {
        debug!("读取区域文本: {}", selector);
        let js_code = format!(
            "(() => {{ const el = document.querySelector({}); return el ? el.innerText : null; }})()",
            js_string(selector)
        );
        self.poll_first(&js_code, wait).await
    }

    async fn region_html(&self, selector: &str, wait: Duration) -> ExtractResult<Option<String>> {
        debug!("读取区域标记: {}", selector);
        let js_code = format!(
            "(() => {{ const el = document.querySelector({}); return el ? el.outerHTML : null; }})()",
            js_string(selector)
        );
        self.poll_first(&js_code, wait).await
    }

    async fn scoped_texts(&self, outer: &str, inner: &str) -> ExtractResult<Vec<String>> {
        let js_code = format!(
            r#"(() => Array.from(document.querySelectorAll({})).map(block => {{
                const el = block.querySelector({});
                return el ? el.innerText.trim() : "";
            }}))()"#,
            js_string(outer),
            js_string(inner)
        );
        self.executor.eval_as(js_code).await
    }

    async fn reveal_all(&self, selector: &str) -> ExtractResult<usize> {
        let js_code = format!(
            r#"(() => {{
                const els = Array.from(document.querySelectorAll({}));
                els.forEach(el => {{ try {{ el.click(); }} catch (e) {{}} }});
                return els.length;
            }})()"#,
            js_string(selector)
        );
        let clicked: usize = self.executor.eval_as(js_code).await?;
        debug!("展开 {}: 点击了 {} 个元素", selector, clicked);
        if clicked > 0 {
            sleep(self.reveal_settle).await;
        }
        Ok(clicked)
    }

    async fn reveal_first(&self, selector: &str) -> ExtractResult<bool> {
        let js_code = format!(
            r#"(() => {{
                const el = document.querySelector({});
                if (!el) return false;
                try {{ el.click(); }} catch (e) {{}}
                return true;
            }})()"#,
            js_string(selector)
        );
        let clicked: bool = self.executor.eval_as(js_code).await?;
        debug!("展开 {}: {}", selector, if clicked { "已点击" } else { "未找到" });
        if clicked {
            sleep(self.reveal_settle).await;
        }
        Ok(clicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes_quotes() {
        assert_eq!(js_string(r#"a[href="x"]"#), r#""a[href=\"x\"]""#);
        assert_eq!(js_string(".item.text"), "\".item.text\"");
    }
}
