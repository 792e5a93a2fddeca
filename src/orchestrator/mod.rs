//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量任务处理器
//! - 管理应用生命周期（初始化、运行）
//! - 加载任务文件（Vec<Job>）
//! - 持有浏览器资源（Browser、JsExecutor）和 Extractor
//! - 输出全局统计信息
//!
//! ### `job_runner` - 单个任务执行器
//! - 导航、解析、按瞬时失败重试
//! - 写出 `<序号>_<题型>.json`
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Job>)
//!     ↓
//! job_runner (处理单个 Job)
//!     ↓
//! parsers::Extractor (解析 + 润色)
//!     ↓
//! page::BrowserPage → infrastructure::JsExecutor
//! ```

pub mod batch_processor;
pub mod job_runner;

// 重新导出主要类型
pub use batch_processor::{App, ProcessingStats};
pub use job_runner::{output_file_name, retry_transient, run_job, write_record};
