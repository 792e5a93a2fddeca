//! 静态页面快照
//!
//! 用保存下来的标记代替浏览器。可以额外提供一份"展开后"的快照，
//! 第一次成功的 `reveal_all` / `reveal_first` 之后读取都会落到这份快照上。

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use scraper::Html;

use crate::error::ExtractResult;
use crate::extract::markup::{rendered_text, selector};
use crate::page::PageSource;

pub struct StaticPage {
    location: String,
    html: String,
    revealed_html: Option<String>,
    revealed: AtomicBool,
    clicks: AtomicUsize,
}

impl StaticPage {
    pub fn new(location: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            html: html.into(),
            revealed_html: None,
            revealed: AtomicBool::new(false),
            clicks: AtomicUsize::new(0),
        }
    }

    /// 设置展开答案后的页面快照
    pub fn with_revealed(mut self, html: impl Into<String>) -> Self {
        self.revealed_html = Some(html.into());
        self
    }

    /// 是否已经展开过
    pub fn is_revealed(&self) -> bool {
        self.revealed.load(Ordering::SeqCst)
    }

    /// 累计"点击"过的元素数
    pub fn click_count(&self) -> usize {
        self.clicks.load(Ordering::SeqCst)
    }

    fn record_clicks(&self, count: usize) {
        if count > 0 {
            self.clicks.fetch_add(count, Ordering::SeqCst);
            self.revealed.store(true, Ordering::SeqCst);
        }
    }

    fn document(&self) -> Html {
        let current = match (&self.revealed_html, self.is_revealed()) {
            (Some(revealed), true) => revealed,
            _ => &self.html,
        };
        Html::parse_document(current)
    }
}

impl PageSource for StaticPage {
    fn location(&self) -> String {
        self.location.clone()
    }

    async fn region_text(&self, css: &str, _wait: Duration) -> ExtractResult<Option<String>> {
        let sel = selector(css)?;
        let doc = self.document();
        let text = doc.select(&sel).next().map(rendered_text);
        Ok(text)
    }

    async fn region_html(&self, css: &str, _wait: Duration) -> ExtractResult<Option<String>> {
        let sel = selector(css)?;
        let doc = self.document();
        let html = doc.select(&sel).next().map(|el| el.html());
        Ok(html)
    }

    async fn scoped_texts(&self, outer: &str, inner: &str) -> ExtractResult<Vec<String>> {
        let outer_sel = selector(outer)?;
        let inner_sel = selector(inner)?;
        let doc = self.document();
        let texts = doc
            .select(&outer_sel)
            .map(|block| {
                block
                    .select(&inner_sel)
                    .next()
                    .map(rendered_text)
                    .unwrap_or_default()
            })
            .collect();
        Ok(texts)
    }

    async fn reveal_all(&self, css: &str) -> ExtractResult<usize> {
        let sel = selector(css)?;
        let count = self.document().select(&sel).count();
        self.record_clicks(count);
        Ok(count)
    }

    async fn reveal_first(&self, css: &str) -> ExtractResult<bool> {
        let sel = selector(css)?;
        let found = self.document().select(&sel).next().is_some();
        self.record_clicks(usize::from(found));
        Ok(found)
    }
}
