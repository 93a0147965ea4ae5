//! 浏览器会话
//!
//! 一次运行独占一个浏览器会话：启动、创建页面、首次导航都在这里完成，
//! 任何一步失败都是致命错误（运行在第一轮之前就中止）。
//! 会话在每条退出路径上都会被释放一次。

use std::path::Path;

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppResult, SessionError};

/// 浏览器会话
///
/// 独占持有 Browser、Page 和后台事件处理任务
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

/// 启动浏览器并导航到问卷页面
pub async fn launch_session(config: &Config, url: &str) -> AppResult<BrowserSession> {
    info!("🚀 启动浏览器...");
    debug!("目标 URL: {}", url);

    let mut builder = BrowserConfig::builder();
    if !config.headless {
        builder = builder.with_head();
    }
    if let Some(executable) = &config.chrome_executable {
        builder = builder.chrome_executable(Path::new(executable));
    }

    // 关闭自动化特征标志，窗口最大化（与原始脚本一致）
    let browser_config = builder
        .args(vec![
            "--start-maximized",
            "--disable-blink-features=AutomationControlled",
            "--disable-infobars",
            "--no-first-run",
        ])
        .build()
        .map_err(|message| SessionError::ConfigurationFailed { message })?;

    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .map_err(|e| SessionError::LaunchFailed {
            source: Box::new(e),
        })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(Duration::from_millis(300)).await;

    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| SessionError::PageCreationFailed {
            source: Box::new(e),
        })?;

    page.goto(url).await.map_err(|e| SessionError::NavigationFailed {
        url: url.to_string(),
        source: Box::new(e),
    })?;

    info!("✅ 浏览器已导航到: {}", url);

    Ok(BrowserSession {
        browser,
        page,
        handler_task,
    })
}

impl BrowserSession {
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 关闭浏览器并释放会话
    pub async fn close(mut self) {
        info!("🔚 关闭浏览器会话...");
        if let Err(e) = self.browser.close().await {
            warn!("关闭浏览器失败: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("等待浏览器进程退出失败: {}", e);
        }
        // Drop 负责中止后台事件任务
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}
