//! Graphics Interpretation：文章 + 若干下拉框

use scraper::ElementRef;
use tracing::{debug, warn};

use crate::error::ExtractResult;
use crate::extract::markup::{parse_region, preceding_text, select_all, select_first, text_content};
use crate::extract::{normalize, parse_dropdown_answers};
use crate::models::{Dropdown, DropdownSet, QuestionRecord, QuestionShape};
use crate::page::PageSource;
use crate::parsers::{optional_html, required_text, reveal_answers, selectors, ExtractOptions};

const DROPDOWN: &str = "select.di_graph_dropdown";

pub async fn parse_graphs<P: PageSource>(
    page: &P,
    options: &ExtractOptions,
) -> ExtractResult<QuestionRecord> {
    let raw = required_text(page, QuestionShape::Graphs, selectors::POST_BODY, options.body_wait).await?;
    let passage = normalize(&raw);
    let image_url = image_src(page, selectors::IMAGE).await;

    let dropdowns = match optional_html(page, "body").await {
        Some(html) => collect_dropdowns(&html)?,
        None => Vec::new(),
    };
    debug!("找到 {} 个下拉框", dropdowns.len());

    let mut set = DropdownSet {
        passage,
        image_url,
        difficulty: page.difficulty().await,
        dropdowns,
    };

    // 所有下拉框的答案都在第一个答案块里
    let answers = reveal_answers(page).await;
    let blob = answers.first().map(String::as_str).unwrap_or("");
    let parsed = parse_dropdown_answers(blob);
    if parsed.is_empty() && !set.dropdowns.is_empty() {
        warn!("下拉框官方答案未解析: {}", page.location());
    }
    set.fill_answers(parsed);

    Ok(QuestionRecord::DropdownSet(set))
}

/// 第一个匹配图片的 `src`
pub(crate) async fn image_src<P: PageSource>(page: &P, css: &str) -> Option<String> {
    let html = optional_html(page, css).await?;
    let doc = parse_region(&html);
    let img = select_first(doc.root_element(), "img").ok()??;
    img.value().attr("src").map(str::to_string)
}

/// 按文档顺序收集下拉框：提示语 + 有 value 的选项（跳过空白默认项）
pub fn collect_dropdowns(html: &str) -> ExtractResult<Vec<Dropdown>> {
    let doc = parse_region(html);
    let selects = select_all(doc.root_element(), DROPDOWN)?;
    selects.into_iter().map(read_dropdown).collect()
}

fn read_dropdown(select: ElementRef<'_>) -> ExtractResult<Dropdown> {
    let options = select_all(select, "option")?
        .into_iter()
        .filter(|opt| opt.value().attr("value").is_some_and(|v| !v.is_empty()))
        .map(text_content)
        .collect();

    Ok(Dropdown {
        prompt: preceding_text(select),
        options,
        official_answer: String::new(),
    })
}
