use serde::{Deserialize, Serialize};

use crate::models::QuestionShape;

/// 一个抓取任务：页面地址 + 题型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub url: String,
    pub shape: QuestionShape,
    /// 是否对结果做润色
    #[serde(default)]
    pub polish: bool,
}

/// 任务文件（TOML）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobFile {
    #[serde(default)]
    pub jobs: Vec<Job>,
}
