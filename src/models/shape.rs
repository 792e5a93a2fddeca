use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// 题型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionShape {
    /// Critical Reasoning（A- / B- 选项）
    Cr,
    /// Data Sufficiency
    Ds,
    /// Problem Solving
    Ps,
    /// Reading Comprehension（文章 + 多道小题）
    Rc,
    /// Graphics Interpretation（下拉框）
    Graphs,
    /// Table Analysis（可排序表格 + Yes/No 陈述）
    Tables,
    /// Two-Part Analysis
    Tpa,
    /// Multi-Source Reasoning
    Msr,
}

/// 题型标识 → 枚举（含长名称别名）
static SHAPE_IDS: phf::Map<&'static str, QuestionShape> = phf::phf_map! {
    "cr" => QuestionShape::Cr,
    "critical-reasoning" => QuestionShape::Cr,
    "ds" => QuestionShape::Ds,
    "data-sufficiency" => QuestionShape::Ds,
    "ps" => QuestionShape::Ps,
    "problem-solving" => QuestionShape::Ps,
    "rc" => QuestionShape::Rc,
    "reading-comprehension" => QuestionShape::Rc,
    "graphs" => QuestionShape::Graphs,
    "graphics" => QuestionShape::Graphs,
    "tables" => QuestionShape::Tables,
    "table-analysis" => QuestionShape::Tables,
    "tpa" => QuestionShape::Tpa,
    "two-part-analysis" => QuestionShape::Tpa,
    "msr" => QuestionShape::Msr,
    "multi-source-reasoning" => QuestionShape::Msr,
};

impl QuestionShape {
    /// 全部题型，按固定顺序
    pub const ALL: [QuestionShape; 8] = [
        QuestionShape::Cr,
        QuestionShape::Ds,
        QuestionShape::Ps,
        QuestionShape::Rc,
        QuestionShape::Graphs,
        QuestionShape::Tables,
        QuestionShape::Tpa,
        QuestionShape::Msr,
    ];

    /// 获取短标识
    pub fn id(self) -> &'static str {
        match self {
            QuestionShape::Cr => "cr",
            QuestionShape::Ds => "ds",
            QuestionShape::Ps => "ps",
            QuestionShape::Rc => "rc",
            QuestionShape::Graphs => "graphs",
            QuestionShape::Tables => "tables",
            QuestionShape::Tpa => "tpa",
            QuestionShape::Msr => "msr",
        }
    }
}

impl fmt::Display for QuestionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for QuestionShape {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        SHAPE_IDS
            .get(key.as_str())
            .copied()
            .ok_or_else(|| ExtractError::UnknownShape(s.to_string()))
    }
}
