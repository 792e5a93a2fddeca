//! 题型解析器与分发
//!
//! 每个题型一个解析器，组合 `extract` 里的原语，产出一条 `QuestionRecord`。
//! 题型集合是封闭的，分发就是一个 `match`。
//!
//! 失败语义：
//! - 可选元素缺失（图片、某类表格、答案）→ 空值/未解析，不中断
//! - 必需的结构锚点缺失 → `ExtractError::MissingRegion`

pub mod graphs;
pub mod multi_source;
pub mod reading;
pub mod single_choice;
pub mod tables;
pub mod two_part;

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{ExtractError, ExtractResult};
use crate::models::{QuestionRecord, QuestionShape};
use crate::page::PageSource;
use crate::services::PolishService;

/// 站点选择器
pub mod selectors {
    pub const POST_BODY: &str = "div.item.text";
    pub const SPOILER_TOGGLE: &str = ".upRow a";
    pub const ANSWER_BLOCK: &str = ".answer-block";
    pub const ANSWER_BUTTON: &str = ".answer-block .btn-show-answer";
    pub const ANSWER_TEXT: &str = ".downRow";
    pub const IMAGE: &str = "img.reimg";
    pub const DI_GRID: &str = "table.stoker.di";
}

/// 解析器的等待参数
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// 等待题干区域
    pub body_wait: Duration,
    /// Critical Reasoning 的题干等待
    pub cr_wait: Duration,
    /// MSR 标签页容器等待
    pub msr_wait: Duration,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            body_wait: Duration::from_secs(20),
            cr_wait: Duration::from_secs(15),
            msr_wait: Duration::from_secs(25),
        }
    }
}

/// 按题型分发到对应解析器
pub async fn parse_shape<P: PageSource>(
    page: &P,
    shape: QuestionShape,
    options: &ExtractOptions,
) -> ExtractResult<QuestionRecord> {
    debug!("解析 {} 题型: {}", shape, page.location());
    match shape {
        QuestionShape::Cr => single_choice::parse_critical_reasoning(page, options).await,
        QuestionShape::Ds | QuestionShape::Ps => {
            single_choice::parse_bracketed(page, shape, options).await
        }
        QuestionShape::Rc => reading::parse_reading_comprehension(page, options).await,
        QuestionShape::Graphs => graphs::parse_graphs(page, options).await,
        QuestionShape::Tables => tables::parse_tables(page, options).await,
        QuestionShape::Tpa => two_part::parse_two_part(page, options).await,
        QuestionShape::Msr => multi_source::parse_multi_source(page, options).await,
    }
}

/// 抽取引擎：解析 + 可选润色
///
/// 润色服务在构造时注入，没有则跳过润色。
pub struct Extractor {
    options: ExtractOptions,
    polisher: Option<PolishService>,
}

impl Extractor {
    pub fn new(options: ExtractOptions, polisher: Option<PolishService>) -> Self {
        Self { options, polisher }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// 解析一个页面；`polish` 为真且配置了润色服务时做一次润色
    pub async fn extract<P: PageSource>(
        &self,
        page: &P,
        shape: QuestionShape,
        polish: bool,
    ) -> ExtractResult<QuestionRecord> {
        let record = parse_shape(page, shape, &self.options).await?;
        match (&self.polisher, polish) {
            (Some(polisher), true) => Ok(polisher.polish(record, shape).await),
            (None, true) => {
                warn!("未配置润色服务，跳过润色");
                Ok(record)
            }
            _ => Ok(record),
        }
    }
}

/// 读取必需区域的文本
pub(crate) async fn required_text<P: PageSource>(
    page: &P,
    shape: QuestionShape,
    selector: &str,
    wait: Duration,
) -> ExtractResult<String> {
    page.region_text(selector, wait)
        .await?
        .ok_or_else(|| ExtractError::missing_region(shape, selector, page.location()))
}

/// 读取必需区域的标记
pub(crate) async fn required_html<P: PageSource>(
    page: &P,
    shape: QuestionShape,
    selector: &str,
    wait: Duration,
) -> ExtractResult<String> {
    page.region_html(selector, wait)
        .await?
        .ok_or_else(|| ExtractError::missing_region(shape, selector, page.location()))
}

/// 读取可选区域的标记，失败时记录并视为缺失
pub(crate) async fn optional_html<P: PageSource>(page: &P, selector: &str) -> Option<String> {
    match page.region_html(selector, Duration::ZERO).await {
        Ok(html) => html,
        Err(e) => {
            warn!("读取可选区域 {} 失败: {}", selector, e);
            None
        }
    }
}

/// 展开剧透和所有答案块，按块读取答案文本
///
/// 展开或读取失败都在本地吸收，返回空列表（答案视为未解析）。
pub(crate) async fn reveal_answers<P: PageSource>(page: &P) -> Vec<String> {
    for control in [selectors::SPOILER_TOGGLE, selectors::ANSWER_BUTTON] {
        if let Err(e) = page.reveal_all(control).await {
            warn!("展开 {} 失败: {}", control, e);
        }
    }
    match page
        .scoped_texts(selectors::ANSWER_BLOCK, selectors::ANSWER_TEXT)
        .await
    {
        Ok(texts) => texts,
        Err(e) => {
            warn!("读取答案失败: {}", e);
            Vec::new()
        }
    }
}
