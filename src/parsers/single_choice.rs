//! 单选题：Critical Reasoning / Data Sufficiency / Problem Solving

use crate::error::ExtractResult;
use crate::extract::{
    cut_at_spoiler, first_choice, normalize, split_dashed_options, split_options,
    strip_trailing_boilerplate,
};
use crate::models::{Answer, OptionMap, QuestionRecord, QuestionShape, SingleChoiceQuestion};
use crate::page::PageSource;
use crate::parsers::{required_text, reveal_answers, selectors, ExtractOptions};

/// Critical Reasoning：先试 `A-` 风格，拆不出来再用通用拆分并清理选项尾部
pub async fn parse_critical_reasoning<P: PageSource>(
    page: &P,
    options: &ExtractOptions,
) -> ExtractResult<QuestionRecord> {
    let raw = required_text(page, QuestionShape::Cr, selectors::POST_BODY, options.cr_wait).await?;
    let (stem, opts) = split_critical_reasoning(&raw);
    finish(page, stem, opts).await
}

/// Data Sufficiency / Problem Solving：总是通用拆分并清理选项尾部
pub async fn parse_bracketed<P: PageSource>(
    page: &P,
    shape: QuestionShape,
    options: &ExtractOptions,
) -> ExtractResult<QuestionRecord> {
    let raw = required_text(page, shape, selectors::POST_BODY, options.body_wait).await?;
    let (stem, opts) = split_bracketed(&raw);
    finish(page, stem, opts).await
}

/// 题干与选项拆分（CR）
pub fn split_critical_reasoning(raw: &str) -> (String, OptionMap) {
    let body = cut_at_spoiler(raw);
    let (stem, opts) = split_dashed_options(body);
    if !opts.is_empty() {
        let opts = opts
            .into_iter()
            .map(|(label, text)| (label, normalize(&text)))
            .collect();
        return (normalize(&stem), opts);
    }
    split_bracketed(body)
}

/// 题干与选项拆分（DS / PS）
pub fn split_bracketed(raw: &str) -> (String, OptionMap) {
    let (stem, opts) = split_options(cut_at_spoiler(raw));
    (
        normalize(&stem),
        opts.into_iter()
            .map(|(label, text)| (label, normalize(&strip_trailing_boilerplate(&text))))
            .collect(),
    )
}

async fn finish<P: PageSource>(
    page: &P,
    stem: String,
    options: OptionMap,
) -> ExtractResult<QuestionRecord> {
    let answers = reveal_answers(page).await;
    let official_answer = answers
        .first()
        .map(|text| first_choice(text))
        .unwrap_or(Answer::Unresolved);

    Ok(QuestionRecord::SingleChoice(SingleChoiceQuestion {
        stem,
        options,
        official_answer,
        difficulty: page.difficulty().await,
        explanation: String::new(),
    }))
}
