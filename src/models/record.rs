//! 题目记录数据结构
//!
//! 每次解析产出一个 `QuestionRecord`。所有"官方答案"字段都有显式的未解析值，
//! 有序集合一律保持页面文档顺序。

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 选项字母（A-E）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
    E,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 5] = [
        OptionLabel::A,
        OptionLabel::B,
        OptionLabel::C,
        OptionLabel::D,
        OptionLabel::E,
    ];

    /// 从字符解析（不区分大小写）
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(OptionLabel::A),
            'B' => Some(OptionLabel::B),
            'C' => Some(OptionLabel::C),
            'D' => Some(OptionLabel::D),
            'E' => Some(OptionLabel::E),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
            OptionLabel::E => "E",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OptionLabel> for String {
    fn from(label: OptionLabel) -> Self {
        label.as_str().to_string()
    }
}

impl TryFrom<String> for OptionLabel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut chars = value.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                OptionLabel::from_char(c).ok_or_else(|| format!("非法选项字母: {}", value))
            }
            _ => Err(format!("非法选项字母: {}", value)),
        }
    }
}

/// 单个官方答案：一个选项字母，或未解析
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Answer {
    Resolved(OptionLabel),
    #[default]
    Unresolved,
}

impl Answer {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Answer::Resolved(_))
    }

    pub fn label(&self) -> Option<OptionLabel> {
        match self {
            Answer::Resolved(label) => Some(*label),
            Answer::Unresolved => None,
        }
    }
}

impl From<Option<OptionLabel>> for Answer {
    fn from(label: Option<OptionLabel>) -> Self {
        label.map(Answer::Resolved).unwrap_or_default()
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Resolved(label) => f.write_str(label.as_str()),
            Answer::Unresolved => Ok(()),
        }
    }
}

impl From<Answer> for String {
    fn from(answer: Answer) -> Self {
        answer.to_string()
    }
}

impl TryFrom<String> for Answer {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            Ok(Answer::Unresolved)
        } else {
            OptionLabel::try_from(value).map(Answer::Resolved)
        }
    }
}

/// 选项字母 → 选项文本
pub type OptionMap = IndexMap<OptionLabel, String>;

/// 表头 → 单元格文本
pub type TableRow = IndexMap<String, String>;

/// 二元表格的判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

/// Table Analysis 陈述的判定（可能两列都没有标记）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatementVerdict {
    Yes,
    No,
    #[default]
    #[serde(rename = "")]
    Unresolved,
}

/// MSR 陈述是否被材料支持
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Support {
    Supported,
    #[serde(rename = "Not Supported")]
    NotSupported,
}

/// MSR 因素的影响
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    #[serde(rename = "Positive Impact")]
    PositiveImpact,
    #[serde(rename = "No Clear Impact")]
    NoClearImpact,
}

/// CR / DS / PS 单选题
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SingleChoiceQuestion {
    pub stem: String,
    pub options: OptionMap,
    pub official_answer: Answer,
    pub difficulty: String,
    #[serde(default)]
    pub explanation: String,
}

/// 阅读理解中的一道小题
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RcQuestion {
    pub stem: String,
    pub options: OptionMap,
    pub official_answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReadingComprehension {
    pub passage: String,
    pub difficulty: String,
    pub questions: Vec<RcQuestion>,
}

/// 一个下拉框
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dropdown {
    pub prompt: String,
    pub options: Vec<String>,
    /// 官方答案字母，空串表示未解析
    pub official_answer: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DropdownSet {
    pub passage: String,
    pub image_url: Option<String>,
    pub difficulty: String,
    pub dropdowns: Vec<Dropdown>,
}

impl DropdownSet {
    /// 第二遍：按 1-based 序号回填官方答案，越界的序号忽略
    pub fn fill_answers<I>(&mut self, answers: I)
    where
        I: IntoIterator<Item = (usize, String)>,
    {
        for (number, letter) in answers {
            if number == 0 {
                continue;
            }
            if let Some(dropdown) = self.dropdowns.get_mut(number - 1) {
                dropdown.official_answer = letter;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableStatement {
    pub prompt: String,
    pub official_answer: StatementVerdict,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableWithStatements {
    pub passage: String,
    pub column_headers: Vec<String>,
    pub rows: Vec<TableRow>,
    pub statements: Vec<TableStatement>,
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TwoPartAnalysis {
    pub passage: String,
    pub row_choices: Vec<String>,
    pub official_column1: Option<String>,
    pub official_column2: Option<String>,
    pub difficulty: String,
}

/// MSR 的一个材料标签页
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub text: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportStatement {
    pub statement: String,
    pub official: Support,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactFactor {
    pub factor: String,
    pub official: Impact,
}

/// 单列标记的选择题表格
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultipleChoice {
    pub choices: Vec<String>,
    pub official: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiSourceReasoning {
    pub sources: Vec<Source>,
    pub support_statements: Vec<SupportStatement>,
    pub impact_factors: Vec<ImpactFactor>,
    pub multiple_choice: Option<MultipleChoice>,
    pub difficulty: String,
}

/// 解析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionRecord {
    SingleChoice(SingleChoiceQuestion),
    ReadingComprehension(ReadingComprehension),
    DropdownSet(DropdownSet),
    TableWithStatements(TableWithStatements),
    TwoPartAnalysis(TwoPartAnalysis),
    MultiSourceReasoning(MultiSourceReasoning),
}

impl QuestionRecord {
    /// 记录种类名（与序列化的 `kind` 字段一致）
    pub fn kind(&self) -> &'static str {
        match self {
            QuestionRecord::SingleChoice(_) => "single_choice",
            QuestionRecord::ReadingComprehension(_) => "reading_comprehension",
            QuestionRecord::DropdownSet(_) => "dropdown_set",
            QuestionRecord::TableWithStatements(_) => "table_with_statements",
            QuestionRecord::TwoPartAnalysis(_) => "two_part_analysis",
            QuestionRecord::MultiSourceReasoning(_) => "multi_source_reasoning",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_serializes_as_letter_or_empty() {
        assert_eq!(
            serde_json::to_string(&Answer::Resolved(OptionLabel::C)).unwrap(),
            "\"C\""
        );
        assert_eq!(serde_json::to_string(&Answer::Unresolved).unwrap(), "\"\"");
        let parsed: Answer = serde_json::from_str("\"\"").unwrap();
        assert_eq!(parsed, Answer::Unresolved);
        assert!(serde_json::from_str::<Answer>("\"Z\"").is_err());
    }

    #[test]
    fn test_option_map_keeps_document_order() {
        let mut map = OptionMap::new();
        map.insert(OptionLabel::C, "third".into());
        map.insert(OptionLabel::A, "first".into());
        map.insert(OptionLabel::C, "replaced".into());

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&OptionLabel::C).map(String::as_str), Some("replaced"));

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"C":"replaced","A":"first"}"#);

        let back: OptionMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back.keys().copied().collect::<Vec<_>>(), vec![OptionLabel::C, OptionLabel::A]);
    }

    #[test]
    fn test_record_is_tagged_by_kind() {
        let record = QuestionRecord::TwoPartAnalysis(TwoPartAnalysis::default());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["kind"], "two_part_analysis");
        assert_eq!(record.kind(), "two_part_analysis");
    }

    #[test]
    fn test_verdict_display_words() {
        assert_eq!(serde_json::to_string(&Support::NotSupported).unwrap(), "\"Not Supported\"");
        assert_eq!(serde_json::to_string(&Impact::PositiveImpact).unwrap(), "\"Positive Impact\"");
        assert_eq!(serde_json::to_string(&StatementVerdict::Unresolved).unwrap(), "\"\"");
    }

    #[test]
    fn test_fill_answers_ignores_out_of_range() {
        let mut set = DropdownSet {
            dropdowns: vec![Dropdown::default(), Dropdown::default()],
            ..Default::default()
        };
        set.fill_answers(vec![(2, "B".to_string()), (0, "A".to_string()), (5, "C".to_string())]);
        assert_eq!(set.dropdowns[0].official_answer, "");
        assert_eq!(set.dropdowns[1].official_answer, "B");
    }
}
