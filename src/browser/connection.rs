use anyhow::{Context, Result};
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// 附加到已打开调试端口的浏览器，并取得一个工作页面
///
/// 已登录的会话里通常已有标签页；`reuse_title` 命中的页面优先复用，
/// 否则新开一个空白页。
pub async fn connect_to_browser(port: u16, reuse_title: Option<&str>) -> Result<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url)
        .await
        .map_err(|e| {
            error!("连接浏览器失败: {}", e);
            e
        })
        .with_context(|| format!("无法连接调试端口 {}，请先用 --remote-debugging-port 启动浏览器", port))?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    if let Some(title) = reuse_title {
        let pages = browser.pages().await?;
        debug!("获取到 {} 个页面，查找标题包含 '{}' 的页面", pages.len(), title);
        for p in pages.iter() {
            if let Ok(Some(page_title)) = p.get_title().await {
                if page_title.contains(title) {
                    info!("✓ 复用页面: {}", page_title);
                    return Ok((browser, p.clone()));
                }
            }
        }
    }

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建空白页面失败: {}", e);
        e
    })?;
    debug!("已创建空白工作页面");

    Ok((browser, page))
}
