//! 测试用的脚本化表单驱动
//!
//! 不依赖真实浏览器：行为由字段预先设定，所有调用记录在调用日志里，
//! 供状态机和循环测试断言调用顺序。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::form_driver::{ClickOutcome, FillOutcome, FormDriver, WaitOutcome};

type SubmitHook = Box<dyn Fn(u64) + Send + Sync>;

pub(crate) struct ScriptedDriver {
    /// 标志元素是否会出现
    pub marker_ready: bool,
    /// 填写控件是否存在
    pub fill_found: bool,
    /// 提交按钮是否存在
    pub submit_found: bool,
    /// 追加参与入口是否存在
    pub continue_found: bool,
    /// 每次点击提交按钮后回调（参数为累计提交次数）
    pub on_submit: Option<SubmitHook>,
    submit_count: AtomicU64,
    calls: Mutex<Vec<String>>,
}

impl ScriptedDriver {
    /// 一切顺利的驱动：表单就绪、控件齐全、没有追加参与入口
    pub fn new() -> Self {
        Self {
            marker_ready: true,
            fill_found: true,
            submit_found: true,
            continue_found: false,
            on_submit: None,
            submit_count: AtomicU64::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("调用日志锁中毒").clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().expect("调用日志锁中毒").push(call.into());
    }
}

#[async_trait]
impl FormDriver for ScriptedDriver {
    async fn wait_for_marker(&self, _timeout: Duration) -> WaitOutcome {
        self.record("wait_for_marker");
        if self.marker_ready {
            WaitOutcome::Ready
        } else {
            WaitOutcome::Timeout
        }
    }

    async fn select_option(&self, question_id: &str, option_id: &str) -> FillOutcome {
        self.record(format!("select_option:{}:{}", question_id, option_id));
        if self.fill_found {
            FillOutcome::Applied
        } else {
            FillOutcome::NotFound
        }
    }

    async fn enter_text(&self, text: &str) -> FillOutcome {
        self.record(format!("enter_text:{}", text));
        if self.fill_found {
            FillOutcome::Applied
        } else {
            FillOutcome::NotFound
        }
    }

    async fn scroll_to_bottom(&self) {
        self.record("scroll_to_bottom");
    }

    async fn click_button_by_label(&self, label: &str) -> ClickOutcome {
        self.record(format!("click_button:{}", label));
        let count = self.submit_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(hook) = &self.on_submit {
            hook(count);
        }
        if self.submit_found {
            ClickOutcome::Clicked
        } else {
            ClickOutcome::NotFound
        }
    }

    async fn click_continue_affordance(&self) -> ClickOutcome {
        self.record("click_continue");
        if self.continue_found {
            ClickOutcome::Clicked
        } else {
            ClickOutcome::NotFound
        }
    }

    async fn reload(&self) {
        self.record("reload");
    }

    async fn navigate(&self, url: &str) {
        self.record(format!("navigate:{}", url));
    }
}
