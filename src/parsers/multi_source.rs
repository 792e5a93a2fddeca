//! Multi-Source Reasoning
//!
//! 左侧若干材料标签页，右侧若干 `table.stoker.di` 表格：
//! - 二元表格且表头第一列含 "positive" → 影响因素（后出现的整体替换先出现的）
//! - 其它二元表格 → 支持/不支持陈述（累加）
//! - 非二元表格 → 选择题（取第一个）

use tracing::{debug, warn};

use crate::error::{ExtractError, ExtractResult};
use crate::extract::markup::{parse_region, select_all, select_first, text_content};
use crate::extract::{parse_di_grid, parse_multi_choice_grid, scan_grid};
use crate::models::{
    Impact, ImpactFactor, MultiSourceReasoning, QuestionRecord, QuestionShape, Source, Support,
    SupportStatement,
};
use crate::page::PageSource;
use crate::parsers::{optional_html, selectors, ExtractOptions};

const WRAPPER: &str = ".tab_di_ms_wrapper";
const TAB_TITLE: &str = ".tablinks_di_ms";
const TAB_PANE: &str = ".tabcontent_di_ms";
const RIGHT_COLUMN: &str = ".tabcontent_di_ms_right";

pub async fn parse_multi_source<P: PageSource>(
    page: &P,
    options: &ExtractOptions,
) -> ExtractResult<QuestionRecord> {
    let wrapper = page
        .region_html(WRAPPER, options.msr_wait)
        .await?
        .ok_or_else(|| ExtractError::missing_region(QuestionShape::Msr, WRAPPER, page.location()))?;

    // 右侧题目不一定在标签页容器里，优先读整页
    let html = optional_html(page, "body").await.unwrap_or(wrapper);

    let mut record = parse_multi_source_html(&html)?;
    if record.support_statements.is_empty()
        && record.impact_factors.is_empty()
        && record.multiple_choice.is_none()
    {
        warn!("MSR 页面没有可解析的题目表格: {}", page.location());
    }
    record.difficulty = page.difficulty().await;
    Ok(QuestionRecord::MultiSourceReasoning(record))
}

/// 从页面标记中解析材料与题目（不含难度）
pub fn parse_multi_source_html(html: &str) -> ExtractResult<MultiSourceReasoning> {
    let doc = parse_region(html);
    let root = doc.root_element();

    let titles = select_all(root, TAB_TITLE)?;
    let panes = select_all(root, TAB_PANE)?;
    let mut sources = Vec::with_capacity(titles.len().min(panes.len()));
    for (title, pane) in titles.into_iter().zip(panes) {
        let block = select_first(pane, selectors::POST_BODY)?.unwrap_or(pane);
        let image_url = select_first(block, selectors::IMAGE)?
            .and_then(|img| img.value().attr("src").map(str::to_string));
        sources.push(Source {
            title: text_content(title),
            text: text_content(block),
            image_url,
        });
    }

    let mut record = MultiSourceReasoning {
        sources,
        ..Default::default()
    };

    let Some(right) = select_first(root, RIGHT_COLUMN)? else {
        debug!("没有右侧题目栏");
        return Ok(record);
    };

    for table in select_all(right, selectors::DI_GRID)? {
        let grid = scan_grid(table)?;
        if grid.is_binary() {
            let labels = grid.header_labels();
            if labels.first().is_some_and(|first| first.contains("positive")) {
                record.impact_factors =
                    parse_di_grid(&grid.rows, true, (Impact::PositiveImpact, Impact::NoClearImpact))
                        .into_iter()
                        .map(|(factor, official)| ImpactFactor { factor, official })
                        .collect();
            } else {
                record.support_statements.extend(
                    parse_di_grid(&grid.rows, true, (Support::Supported, Support::NotSupported))
                        .into_iter()
                        .map(|(statement, official)| SupportStatement { statement, official }),
                );
            }
        } else if record.multiple_choice.is_none() {
            record.multiple_choice = Some(parse_multi_choice_grid(&grid));
        } else {
            debug!("忽略多余的选择题表格");
        }
    }

    Ok(record)
}
