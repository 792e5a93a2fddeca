use std::str::FromStr;
use std::time::Duration;

use crate::parsers::ExtractOptions;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 浏览器调试端口（附加到已登录的浏览器）
    pub browser_debug_port: u16,
    /// 为真时不附加，直接启动无头浏览器
    pub launch_headless: bool,
    /// 无头模式下使用的浏览器可执行文件，空则由 chromiumoxide 自动查找
    pub chrome_executable: Option<String>,
    /// 任务文件
    pub jobs_file: String,
    /// JSON 输出目录
    pub output_dir: String,
    /// 输出日志文件
    pub output_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 瞬时错误的最大重试次数
    pub max_retries: usize,
    // --- 等待时间 ---
    pub body_wait_secs: u64,
    pub cr_wait_secs: u64,
    pub msr_wait_secs: u64,
    /// 点击展开后的等待
    pub reveal_settle_ms: u64,
    // --- 润色配置 ---
    pub openai_api_key: Option<String>,
    pub polish_api_base_url: String,
    pub polish_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: 9222,
            launch_headless: false,
            chrome_executable: None,
            jobs_file: "jobs.toml".to_string(),
            output_dir: "output_json".to_string(),
            output_log_file: "output.txt".to_string(),
            verbose_logging: false,
            max_retries: 1,
            body_wait_secs: 20,
            cr_wait_secs: 15,
            msr_wait_secs: 25,
            reveal_settle_ms: 600,
            openai_api_key: None,
            polish_api_base_url: "https://api.openai.com/v1".to_string(),
            polish_model_name: "gpt-4o-mini".to_string(),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            browser_debug_port: env_or("BROWSER_DEBUG_PORT", default.browser_debug_port),
            launch_headless: env_or("LAUNCH_HEADLESS", default.launch_headless),
            chrome_executable: env_string("CHROME_EXECUTABLE").or(default.chrome_executable),
            jobs_file: env_string("JOBS_FILE").unwrap_or(default.jobs_file),
            output_dir: env_string("OUTPUT_DIR").unwrap_or(default.output_dir),
            output_log_file: env_string("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            verbose_logging: env_or("VERBOSE_LOGGING", default.verbose_logging),
            max_retries: env_or("MAX_RETRIES", default.max_retries),
            body_wait_secs: env_or("BODY_WAIT_SECS", default.body_wait_secs),
            cr_wait_secs: env_or("CR_WAIT_SECS", default.cr_wait_secs),
            msr_wait_secs: env_or("MSR_WAIT_SECS", default.msr_wait_secs),
            reveal_settle_ms: env_or("REVEAL_SETTLE_MS", default.reveal_settle_ms),
            openai_api_key: env_string("OPENAI_API_KEY").or(default.openai_api_key),
            polish_api_base_url: env_string("POLISH_API_BASE_URL").unwrap_or(default.polish_api_base_url),
            polish_model_name: env_string("GPT_POLISH_MODEL").unwrap_or(default.polish_model_name),
        }
    }

    /// 解析器使用的等待参数
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            body_wait: Duration::from_secs(self.body_wait_secs),
            cr_wait: Duration::from_secs(self.cr_wait_secs),
            msr_wait: Duration::from_secs(self.msr_wait_secs),
        }
    }

    pub fn reveal_settle(&self) -> Duration {
        Duration::from_millis(self.reveal_settle_ms)
    }

    /// 单次脚本执行的超时，取最长的区域等待
    pub fn eval_timeout(&self) -> Duration {
        let longest = self.body_wait_secs.max(self.cr_wait_secs).max(self.msr_wait_secs);
        Duration::from_secs(longest.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site_waits() {
        let config = Config::default();
        let options = config.extract_options();
        assert_eq!(options.body_wait, Duration::from_secs(20));
        assert_eq!(options.cr_wait, Duration::from_secs(15));
        assert_eq!(options.msr_wait, Duration::from_secs(25));
        assert_eq!(config.reveal_settle(), Duration::from_millis(600));
        assert_eq!(config.eval_timeout(), Duration::from_secs(25));
        assert_eq!(config.max_retries, 1);
        assert!(config.openai_api_key.is_none());
    }
}
