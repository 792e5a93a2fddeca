//! 文本规整与噪音清理

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// 整行匹配才算噪音（计时器、展开/收起按钮、元数据标签、统计行）
static NOISE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^(?:
            \d{1,2}:\d{2}(?::\d{2})?
          | show\s*/\s*hide\s+answer
          | (?:show|hide)\s+answer
          | (?:show|hide)\s+spoiler
          | difficulty:
          | question\s+stats:
          | not\s+attempted\s+yet
          | \d+%\s*\(\d{1,2}:\d{2}\)\s*correct\s+\d+%\s*\(\d{1,2}:\d{2}\)\s*wrong\s+based\s+on\s+\d+\s+sessions
        )$",
    )
    .expect("Invalid noise regex")
});

/// 选项末尾常被拼接的站点模板：答案按钮、分隔线、推广语，只认行首
static TRAILING_BOILERPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[^\S\r\n]*(?:show\s*answer|_{5,}|new to the gmat club\?)")
        .expect("Invalid boilerplate regex")
});

static SPOILER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Show\s+Spoiler").expect("Invalid spoiler regex"));

/// 所有空白（含换行、回车）折叠为单个空格并去掉首尾空白
pub fn normalize(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// 逐行删除噪音行，其余行保持原顺序
pub fn strip_noise(block: &str) -> String {
    block
        .lines()
        .filter(|line| !NOISE_LINE_RE.is_match(line.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 在第一处模板标记处截断选项文本
pub fn strip_trailing_boilerplate(option_text: &str) -> String {
    match TRAILING_BOILERPLATE_RE.find(option_text) {
        Some(m) => option_text[..m.start()].trim().to_string(),
        None => option_text.trim().to_string(),
    }
}

/// 截掉第一个 "Show Spoiler" 及其之后的内容
pub fn cut_at_spoiler(raw: &str) -> &str {
    match SPOILER_RE.find(raw) {
        Some(m) => &raw[..m.start()],
        None => raw,
    }
}
