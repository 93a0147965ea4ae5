//! Naver 表单驱动
//!
//! `FormDriver` 契约在 Naver 问卷页面上的实现。
//! 持有唯一的 Page 资源，所有 DOM 操作都通过执行 JS 完成，
//! 查找失败一律转换为显式的 NotFound / Timeout 结果。

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::form_driver::{ClickOutcome, FillOutcome, FormDriver, WaitOutcome};

/// 标志元素轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(250);
/// 单个控件点击 / 输入后的短暂稳定等待
const CLICK_SETTLE: Duration = Duration::from_millis(300);
/// 滚动到底部后的稳定等待
const SCROLL_SETTLE: Duration = Duration::from_secs(2);
/// 按钮点击生效的等待
const POST_CLICK_WAIT: Duration = Duration::from_secs(3);

/// "追加参与"入口的候选文字（按钮或链接）
const CONTINUE_LABELS: [&str; 2] = ["추가 참여", "추가참여"];

/// Naver 表单驱动
pub struct NaverFormDriver {
    page: Page,
    marker_id: String,
}

impl NaverFormDriver {
    pub fn new(page: Page, marker_id: impl Into<String>) -> Self {
        Self {
            page,
            marker_id: marker_id.into(),
        }
    }

    /// Naver 问卷选项 checkbox 的 id 规则
    fn checkbox_id(question_id: &str, option_id: &str) -> String {
        format!("nsv-survey-question-{}-item-{}", question_id, option_id)
    }

    /// 执行返回布尔值的 JS，任何底层失败都记录日志并按 false 处理
    async fn eval_bool(&self, js_code: String) -> bool {
        match self.page.evaluate(js_code).await {
            Ok(result) => match result.into_value::<bool>() {
                Ok(value) => value,
                Err(e) => {
                    warn!("页面脚本返回值解析失败: {}", e);
                    false
                }
            },
            Err(e) => {
                warn!("执行页面脚本失败: {}", e);
                false
            }
        }
    }

    /// 元素是否存在于当前 DOM
    async fn element_exists(&self, element_id: &str) -> bool {
        let js_code = format!(
            "document.getElementById({}) !== null",
            json_string(element_id)
        );
        self.eval_bool(js_code).await
    }
}

#[async_trait]
impl FormDriver for NaverFormDriver {
    async fn wait_for_marker(&self, timeout: Duration) -> WaitOutcome {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.element_exists(&self.marker_id).await {
                debug!("✓ 问卷标志元素已出现: {}", self.marker_id);
                return WaitOutcome::Ready;
            }
            if tokio::time::Instant::now() >= deadline {
                return WaitOutcome::Timeout;
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    async fn select_option(&self, question_id: &str, option_id: &str) -> FillOutcome {
        let checkbox_id = Self::checkbox_id(question_id, option_id);
        let js_code = format!(
            r#"
            (() => {{
                const el = document.getElementById({});
                if (!el) {{ return false; }}
                el.scrollIntoView({{ block: 'center' }});
                el.click();
                return true;
            }})()
            "#,
            json_string(&checkbox_id)
        );

        if self.eval_bool(js_code).await {
            debug!("✓ 已选中: {}", checkbox_id);
            sleep(CLICK_SETTLE).await;
            FillOutcome::Applied
        } else {
            FillOutcome::NotFound
        }
    }

    async fn enter_text(&self, text: &str) -> FillOutcome {
        let js_code = format!(
            r#"
            (() => {{
                const el = document.querySelector('textarea');
                if (!el) {{ return false; }}
                el.scrollIntoView({{ block: 'center' }});
                el.value = {};
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                return true;
            }})()
            "#,
            json_string(text)
        );

        if self.eval_bool(js_code).await {
            debug!("✓ 已填入文本");
            sleep(CLICK_SETTLE).await;
            FillOutcome::Applied
        } else {
            FillOutcome::NotFound
        }
    }

    async fn scroll_to_bottom(&self) {
        let js_code = "window.scrollTo(0, document.body.scrollHeight);".to_string();
        if let Err(e) = self.page.evaluate(js_code).await {
            warn!("滚动到页面底部失败: {}", e);
        }
        sleep(SCROLL_SETTLE).await;
    }

    async fn click_button_by_label(&self, label: &str) -> ClickOutcome {
        let js_code = format!(
            r#"
            (() => {{
                for (const btn of document.querySelectorAll('button')) {{
                    if ((btn.textContent || '').includes({})) {{
                        btn.click();
                        return true;
                    }}
                }}
                return false;
            }})()
            "#,
            json_string(label)
        );

        if self.eval_bool(js_code).await {
            debug!("✓ 已点击按钮: {}", label);
            sleep(POST_CLICK_WAIT).await;
            ClickOutcome::Clicked
        } else {
            ClickOutcome::NotFound
        }
    }

    async fn click_continue_affordance(&self) -> ClickOutcome {
        let labels = serde_json::to_string(&CONTINUE_LABELS).unwrap_or_else(|_| "[]".to_string());
        let js_code = format!(
            r#"
            (() => {{
                const labels = {};
                for (const el of document.querySelectorAll('button, a')) {{
                    const text = el.textContent || '';
                    if (labels.some((label) => text.includes(label))) {{
                        el.click();
                        return true;
                    }}
                }}
                return false;
            }})()
            "#,
            labels
        );

        if self.eval_bool(js_code).await {
            debug!("✓ 已点击追加参与入口");
            sleep(POST_CLICK_WAIT).await;
            ClickOutcome::Clicked
        } else {
            ClickOutcome::NotFound
        }
    }

    async fn reload(&self) {
        if let Err(e) = self.page.reload().await {
            warn!("刷新页面失败: {}", e);
        }
    }

    async fn navigate(&self, url: &str) {
        if let Err(e) = self.page.goto(url).await {
            warn!("导航到 {} 失败: {}", url, e);
        }
    }
}

/// 把 Rust 字符串安全地嵌入 JS 代码（JSON 字符串字面量是合法的 JS 字面量）
fn json_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}
