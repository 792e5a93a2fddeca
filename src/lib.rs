//! # Question Extract
//!
//! 从 GMAT 论坛帖子页面抽取结构化题目记录
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 goto() / eval() 能力
//! - `browser/` - 附加到调试端口或启动无头浏览器
//!
//! ### ② 页面边界（Page）
//! - `page/` - `PageSource` trait：区域文本、区域标记、展开答案、难度
//! - `BrowserPage` - 基于 JsExecutor 的真实页面
//! - `StaticPage` - 基于保存下来的标记，离线解析与测试使用
//!
//! ### ③ 抽取核心（Extract / Parsers）
//! - `extract/` - 文本规整、选项拆分、答案解析、表格解析
//! - `parsers/` - 八种题型的解析器与 `Extractor`
//!
//! ### ④ 业务能力层（Services）
//! - `PolishService` - 可选的 LLM 空格修正
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 读取任务文件，逐个执行并统计
//! - `orchestrator/job_runner` - 单个任务：导航、解析、重试、写出
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod extract;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod page;
pub mod parsers;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{ExtractError, ExtractResult};
pub use infrastructure::JsExecutor;
pub use models::{Job, QuestionRecord, QuestionShape};
pub use orchestrator::App;
pub use page::{BrowserPage, PageSource, StaticPage};
pub use parsers::{parse_shape, ExtractOptions, Extractor};
pub use services::PolishService;
