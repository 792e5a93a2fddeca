//! 表格选择题解析
//!
//! 站点把所有 Yes/No、Supported/Not Supported、单选列表都画成同一种物理布局：
//! 每行若干标记单元格（单选按钮）+ 最后一个陈述单元格，被选中的官方答案单元格带
//! `official_answer` class。这里只认物理布局，语义标签由各题型解析器决定。

use scraper::ElementRef;

use crate::error::ExtractResult;
use crate::extract::markup::{has_class, rendered_text, select_all};
use crate::extract::normalize::normalize;
use crate::models::{MultipleChoice, YesNo};

const OFFICIAL_CLASS: &str = "official_answer";

/// 单元格
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridCell {
    pub text: String,
    /// 带官方答案标记
    pub official: bool,
    /// 含可选择的 input
    pub selectable: bool,
    pub is_header: bool,
}

/// 一行
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridRow {
    pub cells: Vec<GridCell>,
}

impl GridRow {
    /// 陈述文本（最后一个单元格）
    pub fn statement(&self) -> &str {
        self.cells.last().map(|c| c.text.as_str()).unwrap_or("")
    }

    /// 前两个单元格中带官方标记的那一列
    pub fn marked_column(&self) -> Option<usize> {
        self.cells
            .iter()
            .take(2)
            .position(|cell| cell.official)
    }

    /// 前两个单元格都是可选择的标记
    pub fn has_two_markers(&self) -> bool {
        self.cells.len() >= 3 && self.cells.iter().take(2).all(|cell| cell.selectable)
    }

    fn has_selectable(&self) -> bool {
        self.cells.iter().any(|cell| cell.selectable)
    }

    /// 前两个单元格文本同时包含 Yes 和 No
    fn is_yes_no_header(&self) -> bool {
        let joined: String = self
            .cells
            .iter()
            .take(2)
            .map(|cell| cell.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        joined.contains("Yes") && joined.contains("No")
    }
}

/// 扫描后的表格
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    pub header: Option<GridRow>,
    pub rows: Vec<GridRow>,
}

impl Grid {
    /// 表头前两个单元格的小写文本
    pub fn header_labels(&self) -> Vec<String> {
        self.header
            .as_ref()
            .map(|row| {
                row.cells
                    .iter()
                    .take(2)
                    .map(|cell| cell.text.to_lowercase())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 第一条数据行的前两列都有单选按钮 → 二元表格
    pub fn is_binary(&self) -> bool {
        self.rows.first().is_some_and(GridRow::has_two_markers)
    }
}

/// 扫描表格，一次读完所有单元格
///
/// 第一行满足以下任一条件即视为表头：全是 `<th>`；前两格含 Yes 和 No；
/// 本行没有单选按钮而后续行有。
pub fn scan_grid(table: ElementRef<'_>) -> ExtractResult<Grid> {
    let mut rows = scan_rows(table)?;

    let header_first = rows.first().is_some_and(|first| {
        let all_th = !first.cells.is_empty() && first.cells.iter().all(|c| c.is_header);
        let unmarked_above_marked =
            !first.has_selectable() && rows.iter().skip(1).any(GridRow::has_selectable);
        all_th || first.is_yes_no_header() || unmarked_above_marked
    });

    let header = if header_first { Some(rows.remove(0)) } else { None };
    Ok(Grid { header, rows })
}

/// 第一行无条件作为表头（Two-Part 与 Table Analysis 的陈述表）
pub fn scan_grid_with_header(table: ElementRef<'_>) -> ExtractResult<Grid> {
    let mut rows = scan_rows(table)?;
    let header = (!rows.is_empty()).then(|| rows.remove(0));
    Ok(Grid { header, rows })
}

fn scan_rows(table: ElementRef<'_>) -> ExtractResult<Vec<GridRow>> {
    select_all(table, "tr")?
        .into_iter()
        .map(|tr| {
            let cells = tr
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|cell| matches!(cell.value().name(), "td" | "th"))
                .map(scan_cell)
                .collect::<ExtractResult<Vec<_>>>()?;
            Ok(GridRow { cells })
        })
        .collect()
}

fn scan_cell(cell: ElementRef<'_>) -> ExtractResult<GridCell> {
    Ok(GridCell {
        text: normalize(&rendered_text(cell)),
        official: has_class(&cell, OFFICIAL_CLASS),
        selectable: !select_all(cell, "input")?.is_empty(),
        is_header: cell.value().name() == "th",
    })
}

/// 按调用方给的语义标签解读二元表格
///
/// `yes_is_first` 表示哪一列代表"真"；该列带官方标记得 `labels.0`，否则 `labels.1`。
/// 少于 3 个单元格的行跳过。
pub fn parse_di_grid<L: Copy>(rows: &[GridRow], yes_is_first: bool, labels: (L, L)) -> Vec<(String, L)> {
    let (yes_label, no_label) = labels;
    let yes_column = if yes_is_first { 0 } else { 1 };
    rows.iter()
        .filter(|row| row.cells.len() >= 3)
        .map(|row| {
            let official = if row.cells[yes_column].official {
                yes_label
            } else {
                no_label
            };
            (row.statement().to_string(), official)
        })
        .collect()
}

/// Yes/No 表格的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryStatement {
    pub statement: String,
    pub official: YesNo,
}

/// Yes 在第一列、No 在第二列
pub fn parse_binary_grid(grid: &Grid) -> Vec<BinaryStatement> {
    parse_di_grid(&grid.rows, true, (YesNo::Yes, YesNo::No))
        .into_iter()
        .map(|(statement, official)| BinaryStatement { statement, official })
        .collect()
}

/// 三态版本：两列都没有标记时为 `None`
pub fn parse_tristate_grid(grid: &Grid) -> Vec<(String, Option<YesNo>)> {
    grid.rows
        .iter()
        .filter(|row| row.cells.len() == 3)
        .map(|row| {
            let verdict = match row.marked_column() {
                Some(0) => Some(YesNo::Yes),
                Some(_) => Some(YesNo::No),
                None => None,
            };
            (row.statement().to_string(), verdict)
        })
        .collect()
}

/// 单列标记的选择题表格：收集每行文本，记录带官方标记的那一行
pub fn parse_multi_choice_grid(grid: &Grid) -> MultipleChoice {
    let mut choices = Vec::new();
    let mut official = None;
    for row in grid.rows.iter().filter(|row| row.cells.len() >= 2) {
        let text = row.statement().to_string();
        if row.cells[0].official {
            official = Some(text.clone());
        }
        choices.push(text);
    }
    MultipleChoice { choices, official }
}
