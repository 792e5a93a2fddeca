//! 批量任务处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量任务的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：日志文件、连接或启动浏览器、创建 JsExecutor 和 Extractor
//! 2. **任务加载**：读取 TOML 任务文件（`Vec<Job>`）
//! 3. **顺序处理**：同一个页面上逐个执行，不并发
//! 4. **全局统计**：汇总所有任务的处理结果
//!
//! 单个任务的失败只记录，不中断整个批次。

use std::path::Path;

use anyhow::Result;
use chromiumoxide::Browser;
use tracing::{error, warn};

use crate::browser;
use crate::config::Config;
use crate::infrastructure::JsExecutor;
use crate::models::{load_jobs, Job};
use crate::orchestrator::job_runner;
use crate::parsers::Extractor;
use crate::services::PolishService;
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Browser,
    executor: JsExecutor,
    extractor: Extractor,
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(&config);

        let (browser, page) = browser::open_browser(&config).await?;
        let executor = JsExecutor::new(page, config.eval_timeout());

        let polisher = PolishService::from_config(&config);
        let extractor = Extractor::new(config.extract_options(), polisher);

        Ok(Self {
            config,
            _browser: browser,
            executor,
            extractor,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        let jobs = load_jobs(Path::new(&self.config.jobs_file)).await?;

        if jobs.is_empty() {
            warn!("⚠️ 任务文件中没有任务，程序结束");
            return Ok(ProcessingStats::default());
        }

        let stats = self.process_all_jobs(&jobs).await;

        logging::print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 依次处理所有任务
    async fn process_all_jobs(&self, jobs: &[Job]) -> ProcessingStats {
        let mut stats = ProcessingStats {
            total: jobs.len(),
            ..Default::default()
        };

        for (idx, job) in jobs.iter().enumerate() {
            let index = idx + 1;
            if self.process_job(index, jobs.len(), job).await {
                stats.success += 1;
            } else {
                stats.failed += 1;
            }
        }

        stats
    }

    /// 处理单个任务，返回是否成功
    async fn process_job(&self, index: usize, total: usize, job: &Job) -> bool {
        logging::log_job_start(index, total, job.shape.id(), &job.url);

        let (result, attempts) = job_runner::run_job(
            &self.executor,
            &self.extractor,
            job,
            self.config.max_retries,
            self.config.reveal_settle(),
        )
        .await;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                error!("[任务 {}] ❌ 抽取失败（尝试 {} 次）: {}", index, attempts, e);
                return false;
            }
        };

        let output_dir = Path::new(&self.config.output_dir);
        match job_runner::write_record(output_dir, index, job.shape, &record).await {
            Ok(path) => {
                logging::log_job_complete(index, &path.display().to_string(), attempts);
                true
            }
            Err(e) => {
                error!("[任务 {}] ❌ 写出结果失败: {:#}", index, e);
                false
            }
        }
    }
}
