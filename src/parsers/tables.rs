//! Table Analysis：可排序的数据表 + Yes/No 陈述表
//!
//! 两张表都是可选的，缺哪张就留空，只有题干是必需的。

use scraper::ElementRef;
use tracing::debug;

use crate::error::ExtractResult;
use crate::extract::markup::{parse_region, rendered_text, select_all, select_first};
use crate::extract::{normalize, parse_tristate_grid, scan_grid_with_header};
use crate::models::{
    QuestionRecord, QuestionShape, StatementVerdict, TableRow, TableStatement, TableWithStatements,
    YesNo,
};
use crate::page::PageSource;
use crate::parsers::{optional_html, required_text, selectors, ExtractOptions};

const SORTABLE_TABLE: &str = "table.stoker.table-sortable";

pub async fn parse_tables<P: PageSource>(
    page: &P,
    options: &ExtractOptions,
) -> ExtractResult<QuestionRecord> {
    let raw = required_text(page, QuestionShape::Tables, selectors::POST_BODY, options.body_wait).await?;

    let (column_headers, rows) = match optional_html(page, SORTABLE_TABLE).await {
        Some(html) => read_sortable_table(&html)?,
        None => {
            debug!("没有数据表: {}", page.location());
            (Vec::new(), Vec::new())
        }
    };

    let statements = match optional_html(page, selectors::DI_GRID).await {
        Some(html) => read_statements(&html)?,
        None => Vec::new(),
    };

    Ok(QuestionRecord::TableWithStatements(TableWithStatements {
        passage: normalize(&raw),
        column_headers,
        rows,
        statements,
        difficulty: page.difficulty().await,
    }))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    normalize(&rendered_text(cell))
}

/// 表头取所有 `<th>`，数据行跳过第一行；每行按位置和表头配对，多余的单元格丢弃
pub fn read_sortable_table(html: &str) -> ExtractResult<(Vec<String>, Vec<TableRow>)> {
    let doc = parse_region(html);
    let Some(table) = select_first(doc.root_element(), "table")? else {
        return Ok((Vec::new(), Vec::new()));
    };

    let headers: Vec<String> = select_all(table, "th")?.into_iter().map(cell_text).collect();

    let mut rows = Vec::new();
    for tr in select_all(table, "tr")?.into_iter().skip(1) {
        let cells: Vec<String> = select_all(tr, "td")?.into_iter().map(cell_text).collect();
        if cells.is_empty() {
            continue;
        }
        rows.push(headers.iter().cloned().zip(cells).collect::<TableRow>());
    }
    Ok((headers, rows))
}

/// 陈述表：第一行是表头，其后每行恰好 3 个单元格，未标记的行记为未解析
pub fn read_statements(html: &str) -> ExtractResult<Vec<TableStatement>> {
    let doc = parse_region(html);
    let Some(table) = select_first(doc.root_element(), "table")? else {
        return Ok(Vec::new());
    };
    let grid = scan_grid_with_header(table)?;
    Ok(parse_tristate_grid(&grid)
        .into_iter()
        .map(|(prompt, verdict)| TableStatement {
            prompt,
            official_answer: match verdict {
                Some(YesNo::Yes) => StatementVerdict::Yes,
                Some(YesNo::No) => StatementVerdict::No,
                None => StatementVerdict::Unresolved,
            },
        })
        .collect())
}
