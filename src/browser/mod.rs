//! 浏览器接入：附加到调试端口，或启动无头浏览器

pub mod connection;
pub mod headless;

use anyhow::Result;
use chromiumoxide::{Browser, Page};

use crate::config::Config;

pub use connection::connect_to_browser;
pub use headless::launch_headless_browser;

/// 按配置打开浏览器
pub async fn open_browser(config: &Config) -> Result<(Browser, Page)> {
    if config.launch_headless {
        launch_headless_browser(config.chrome_executable.as_deref()).await
    } else {
        connect_to_browser(config.browser_debug_port, None).await
    }
}
