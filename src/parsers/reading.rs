//! Reading Comprehension
//!
//! 页面结构：一个 `.bbcodeBoxOut` 包着两个直接子元素 `.bbcodeBoxIn`，
//! 第一个是文章，第二个是所有小题。缺少这个结构直接报错。
//!
//! 小题切分有两种策略，按输入确定性地二选一：
//! - 第二个盒子里存在形如 "Question 1" 的粗体标记 → 按粗体标记切分
//! - 否则 → 按纯文本 "Question " 切分

use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::extract::markup::{
    children_with_class, is_bold, parse_region, rendered_text, rendered_text_with_markers,
    select_all, select_first, text_content,
};
use crate::extract::{
    explode_answer_blob, first_choice, normalize, split_options, strip_noise,
    strip_trailing_boilerplate,
};
use crate::models::{Answer, QuestionRecord, QuestionShape, RcQuestion, ReadingComprehension};
use crate::page::PageSource;
use crate::parsers::{required_html, reveal_answers, ExtractOptions};

const WRAPPER: &str = ".bbcodeBoxOut";
const BOX_CLASS: &str = "bbcodeBoxIn";
const QUESTION_DELIMITER: &str = "Question ";
const MARKER: char = '\u{1e}';

static QUESTION_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:q(?:uestion)?\s*)?#?\d+\s*[.):]?$").expect("Invalid question marker regex")
});

static SPOILER_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:Show|Hide) Spoiler").expect("Invalid spoiler line regex"));

static NUMBER_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#?\d+\s*[.):]?\s*$").expect("Invalid number line regex"));

/// 小题切分策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segmentation {
    /// 粗体题号标记
    BoldMarkers,
    /// 纯文本 "Question " 分隔
    QuestionDelimiter,
}

pub async fn parse_reading_comprehension<P: PageSource>(
    page: &P,
    options: &ExtractOptions,
) -> ExtractResult<QuestionRecord> {
    let html = required_html(page, QuestionShape::Rc, WRAPPER, options.body_wait).await?;
    let doc = parse_region(&html);
    let wrapper = select_first(doc.root_element(), WRAPPER)?
        .ok_or_else(|| ExtractError::missing_region(QuestionShape::Rc, WRAPPER, page.location()))?;

    let boxes = children_with_class(wrapper, BOX_CLASS);
    if boxes.len() < 2 {
        return Err(ExtractError::missing_region(
            QuestionShape::Rc,
            format!("{} > .{}", WRAPPER, BOX_CLASS),
            format!("{} (只找到 {} 个)", page.location(), boxes.len()),
        ));
    }

    let passage = normalize(&rendered_text(boxes[0]));
    let (strategy, chunks) = segment_questions(boxes[1])?;
    debug!("阅读题切分策略 {:?}, 共 {} 道小题", strategy, chunks.len());

    let difficulty = page.difficulty().await;
    let answers = align_answers(&reveal_answers(page).await, chunks.len());

    let questions = chunks
        .iter()
        .zip(answers)
        .map(|(chunk, official_answer)| parse_chunk(chunk, official_answer))
        .collect();

    Ok(QuestionRecord::ReadingComprehension(ReadingComprehension {
        passage,
        difficulty,
        questions,
    }))
}

fn is_question_marker(el: &ElementRef<'_>) -> bool {
    is_bold(el) && QUESTION_MARKER_RE.is_match(&normalize(&text_content(*el)))
}

/// 把题目盒子切成每道小题一段文本（丢弃第一个标记之前的内容）
pub fn segment_questions(questions_box: ElementRef<'_>) -> ExtractResult<(Segmentation, Vec<String>)> {
    let has_markers = select_all(questions_box, "*")?
        .iter()
        .any(is_question_marker);

    if has_markers {
        let text = rendered_text_with_markers(questions_box, is_question_marker, MARKER);
        let chunks = text.split(MARKER).skip(1).map(str::to_string).collect();
        Ok((Segmentation::BoldMarkers, chunks))
    } else {
        let text = rendered_text(questions_box);
        let chunks = text
            .split(QUESTION_DELIMITER)
            .skip(1)
            .map(str::to_string)
            .collect();
        Ok((Segmentation::QuestionDelimiter, chunks))
    }
}

/// 一段小题文本 → 题干 + 选项
///
/// 站点把剧透按钮放在题干上方，存在时只保留按钮之后的行；
/// 否则丢掉开头残留的题号行。
pub fn parse_chunk(chunk: &str, official_answer: Answer) -> RcQuestion {
    let lines: Vec<&str> = chunk.lines().collect();
    let body_lines = match lines.iter().position(|line| SPOILER_LINE_RE.is_match(line)) {
        Some(idx) => &lines[idx + 1..],
        None => match lines.first() {
            Some(first) if NUMBER_LINE_RE.is_match(first) => &lines[1..],
            _ => &lines[..],
        },
    };

    let cleaned = strip_noise(&body_lines.join("\n"));
    let cleaned = cleaned
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let (stem, options) = split_options(&cleaned);
    RcQuestion {
        stem: normalize(&stem),
        options: options
            .into_iter()
            .map(|(label, text)| (label, normalize(&strip_trailing_boilerplate(&text))))
            .collect(),
        official_answer,
    }
}

/// 把按答案块读到的文本对齐到 `count` 道小题
///
/// 只有一个答案块而小题不止一道时，认为这个块包含所有题号的答案。
pub fn align_answers(blocks: &[String], count: usize) -> Vec<Answer> {
    if blocks.len() == 1 && count > 1 {
        return explode_answer_blob(&blocks[0], count);
    }
    (0..count)
        .map(|i| blocks.get(i).map(|text| first_choice(text)).unwrap_or_default())
        .collect()
}
