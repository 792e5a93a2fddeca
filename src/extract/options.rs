//! 选项拆分
//!
//! 从"题干 + 选项"的一整段文本中恢复有序的 字母 → 选项文本 映射。
//! 找不到任何选项标记时整段都是题干，映射为空，这不是错误。

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::models::{OptionLabel, OptionMap};

/// `A- text` 风格，只认行首
static DASHED_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[^\S\r\n]*(?P<lbl>[A-Ea-e])-\s*").expect("Invalid dashed label regex")
});

/// 通用风格：
/// - 行首：`(A) text`、`A) text`、`A. text`、`[A] text`、`A: text`、`A– text`
/// - 行内：前面有空白且左右括号完整的大写字母，`... (B) text`
///
/// 标记后必须至少有一个空格，以区分句子里出现的字母。
static GENERIC_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?mx)
          (?: ^[^\S\r\n]*[(\[]?(?P<lbl>[A-Ea-e])[)\].\-–:]?[^\S\r\n]+ )
        | (?: (?:^|[^\S\r\n])[(\[](?P<inline>[A-E])[)\]][^\S\r\n]+ )",
    )
    .expect("Invalid generic label regex")
});

/// 通用拆分
pub fn split_options(raw: &str) -> (String, OptionMap) {
    split_with(&GENERIC_LABEL_RE, raw)
}

/// `A-` 风格拆分
pub fn split_dashed_options(raw: &str) -> (String, OptionMap) {
    split_with(&DASHED_LABEL_RE, raw)
}

fn split_with(re: &Regex, raw: &str) -> (String, OptionMap) {
    let matches: Vec<(usize, usize, OptionLabel)> = re
        .captures_iter(raw)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            label_of(&caps).map(|label| (whole.start(), whole.end(), label))
        })
        .collect();

    let Some(&(first_start, _, _)) = matches.first() else {
        return (raw.trim().to_string(), OptionMap::new());
    };

    let stem = raw[..first_start].trim().to_string();
    let mut options = OptionMap::new();

    for (i, &(_, end, label)) in matches.iter().enumerate() {
        let next_start = matches
            .get(i + 1)
            .map(|&(start, _, _)| start)
            .unwrap_or(raw.len());
        options.insert(label, raw[end..next_start].trim().to_string());
    }

    (stem, options)
}

fn label_of(caps: &Captures<'_>) -> Option<OptionLabel> {
    caps.name("lbl")
        .or_else(|| caps.name("inline"))
        .and_then(|m| m.as_str().chars().next())
        .and_then(OptionLabel::from_char)
}
