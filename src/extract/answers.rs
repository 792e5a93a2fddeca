//! 官方答案解析
//!
//! 输入是展开答案后读到的原始文本。没找到答案时返回显式的未解析值，不报错。

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::{Answer, OptionLabel};

/// `OA: C`、`Answer - (B)`、`Correct: E`
static KEYWORD_ANSWER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:OA|Official\s+Answer|Answer|Correct)\b[^\S\r\n]*[:=\-–.]*[^\S\r\n]*\(?([A-E])\b")
        .expect("Invalid keyword answer regex")
});

/// 兜底：第一个独立的大写字母 A-E
static BARE_LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-E])\b").expect("Invalid bare letter regex"));

/// `1. A`、`2) C`、`3: B`、`4 - D`、`5 E`，题号前可带 `Q` / `Question`
static NUMBERED_ANSWER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\b(?i:q(?:uestion)?)[^\S\r\n]*#?|\b)(\d+)(?:[^\S\r\n]*[.):\-–][^\S\r\n]*|[^\S\r\n]+)\(?([A-E])\b")
        .expect("Invalid numbered answer regex")
});

static DROPDOWN_ANSWER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*Drop[- ]?down\s+(\d+)\s*:\s*([A-Z])").expect("Invalid dropdown regex")
});

/// 从展开的答案文本中取一个选项字母
pub fn first_choice(revealed: &str) -> Answer {
    KEYWORD_ANSWER_RE
        .captures(revealed)
        .or_else(|| BARE_LETTER_RE.captures(revealed))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .and_then(OptionLabel::from_char)
        .into()
}

/// 一段答案文本对应多道小题时按题号拆开
///
/// 总是返回 `expected` 个元素：
/// - 编号匹配数 >= `expected`：按 1-based 题号落位，越界题号忽略，重复题号后者覆盖
/// - 否则：整段按单个答案解析填入第 0 位，其余保持未解析
pub fn explode_answer_blob(revealed: &str, expected: usize) -> Vec<Answer> {
    let mut answers = vec![Answer::Unresolved; expected];
    if expected == 0 {
        return answers;
    }

    let numbered: Vec<(usize, OptionLabel)> = NUMBERED_ANSWER_RE
        .captures_iter(revealed)
        .filter_map(|caps| {
            let number = caps.get(1)?.as_str().parse::<usize>().ok()?;
            let label = caps.get(2)?.as_str().chars().next().and_then(OptionLabel::from_char)?;
            Some((number, label))
        })
        .collect();

    if numbered.len() >= expected {
        for (number, label) in numbered {
            if (1..=expected).contains(&number) {
                answers[number - 1] = Answer::Resolved(label);
            }
        }
    } else {
        answers[0] = first_choice(revealed);
    }

    answers
}

/// 解析 `Drop-down 1: D` 行，返回 (1-based 序号, 大写字母)
pub fn parse_dropdown_answers(revealed: &str) -> Vec<(usize, String)> {
    revealed
        .lines()
        .filter_map(|line| {
            let caps = DROPDOWN_ANSWER_RE.captures(line)?;
            let number = caps.get(1)?.as_str().parse::<usize>().ok()?;
            let letter = caps.get(2)?.as_str().to_ascii_uppercase();
            Some((number, letter))
        })
        .collect()
}

/// 解析 Two-Part 答案 `1 : <行文本>` / `2 : <行文本>`
///
/// 任何一行的序号无法解析时两栏都视为未解析。
pub fn parse_two_part_answers(revealed: &str) -> (Option<String>, Option<String>) {
    let mut mapping = HashMap::new();
    for line in revealed.lines().filter(|l| l.contains(':')) {
        let Some((index, label)) = line.split_once(':') else {
            continue;
        };
        match index.trim().parse::<usize>() {
            Ok(index) => {
                mapping.insert(index, label.trim().to_string());
            }
            Err(_) => return (None, None),
        }
    }
    (mapping.remove(&1), mapping.remove(&2))
}
