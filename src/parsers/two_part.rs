//! Two-Part Analysis
//!
//! 表格第三列是各行的选项文本；答案以 `1 : <行文本>`、`2 : <行文本>` 给出。

use std::time::Duration;

use tracing::warn;

use crate::error::ExtractResult;
use crate::extract::markup::{parse_region, select_first};
use crate::extract::{normalize, parse_two_part_answers, scan_grid_with_header};
use crate::models::{QuestionRecord, QuestionShape, TwoPartAnalysis};
use crate::page::PageSource;
use crate::parsers::{optional_html, required_text, selectors, ExtractOptions};

const ANSWER_LINK: &str = ".answer-block a";
const ANSWER_TEXT: &str = ".answer-block .downRow";

pub async fn parse_two_part<P: PageSource>(
    page: &P,
    options: &ExtractOptions,
) -> ExtractResult<QuestionRecord> {
    let raw = required_text(page, QuestionShape::Tpa, selectors::POST_BODY, options.body_wait).await?;

    let row_choices = match optional_html(page, selectors::DI_GRID).await {
        Some(html) => read_row_choices(&html)?,
        None => Vec::new(),
    };

    let (official_column1, official_column2) = read_answers(page).await;

    Ok(QuestionRecord::TwoPartAnalysis(TwoPartAnalysis {
        passage: normalize(&raw),
        row_choices,
        official_column1,
        official_column2,
        difficulty: page.difficulty().await,
    }))
}

/// 第一行是列标题，其后每行第三个单元格的文本
pub fn read_row_choices(html: &str) -> ExtractResult<Vec<String>> {
    let doc = parse_region(html);
    let Some(table) = select_first(doc.root_element(), "table")? else {
        return Ok(Vec::new());
    };
    let grid = scan_grid_with_header(table)?;
    Ok(grid
        .rows
        .iter()
        .filter_map(|row| row.cells.get(2))
        .map(|cell| cell.text.clone())
        .collect())
}

/// 只点答案块里的第一个链接，其余链接（作者主页、点赞等）不碰
async fn read_answers<P: PageSource>(page: &P) -> (Option<String>, Option<String>) {
    if let Err(e) = page.reveal_first(ANSWER_LINK).await {
        warn!("展开答案失败: {}", e);
        return (None, None);
    }
    match page.region_text(ANSWER_TEXT, Duration::ZERO).await {
        Ok(Some(text)) => parse_two_part_answers(text.trim()),
        Ok(None) => (None, None),
        Err(e) => {
            warn!("读取答案失败: {}", e);
            (None, None)
        }
    }
}
