//! 单轮提交流程 - 流程层
//!
//! 状态机：AwaitingForm → Filling → Scrolling → Submitting → Success / Failure
//!
//! - 等待超时 → Failure(Timeout)
//! - 单个问题控件未找到：容忍（尽力填写，记日志，不中断本轮）——
//!   可选 / 隐藏问题可能不渲染
//! - 提交按钮未找到 → Failure(SubmitButtonMissing)
//!
//! 续作路径（`prepare_next`）：
//! - 成功且点到"追加参与"：留在同一问卷实例，下一轮直接从 AwaitingForm 开始
//! - 其余情况（成功但没有入口，或任何失败）：刷新 + 重新导航，失败从不原地重试

use std::fmt;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::Pacing;
use crate::infrastructure::{ClickOutcome, FillOutcome, FormDriver, WaitOutcome};
use crate::services::{Answer, ResponseGenerator};

/// 单轮失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// 等待问卷加载超时
    Timeout,
    /// 提交按钮未找到
    SubmitButtonMissing,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Timeout => write!(f, "等待问卷加载超时"),
            FailureReason::SubmitButtonMissing => write!(f, "未找到提交按钮"),
        }
    }
}

/// 单轮迭代结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    Success,
    Failure(FailureReason),
}

impl IterationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, IterationOutcome::Success)
    }
}

/// 状态机内部状态
enum SubmitState {
    AwaitingForm,
    Filling,
    Scrolling,
    Submitting,
}

/// 单轮提交控制器
///
/// 只依赖 `FormDriver` 能力契约，不持有页面资源
pub struct SubmissionController<'a> {
    driver: &'a dyn FormDriver,
    generator: &'a ResponseGenerator,
    url: &'a str,
    submit_label: &'a str,
    pacing: &'a Pacing,
}

impl<'a> SubmissionController<'a> {
    pub fn new(
        driver: &'a dyn FormDriver,
        generator: &'a ResponseGenerator,
        url: &'a str,
        submit_label: &'a str,
        pacing: &'a Pacing,
    ) -> Self {
        Self {
            driver,
            generator,
            url,
            submit_label,
            pacing,
        }
    }

    /// 执行一轮提交：填写 → 滚动 → 提交 → 结果分类
    pub async fn run_once(&self) -> IterationOutcome {
        let mut state = SubmitState::AwaitingForm;
        loop {
            state = match state {
                SubmitState::AwaitingForm => {
                    match self.driver.wait_for_marker(self.pacing.wait_timeout).await {
                        WaitOutcome::Timeout => {
                            warn!("⚠️ 等待问卷加载超时");
                            return IterationOutcome::Failure(FailureReason::Timeout);
                        }
                        WaitOutcome::Ready => {
                            sleep(self.pacing.page_load_wait).await;
                            SubmitState::Filling
                        }
                    }
                }
                SubmitState::Filling => {
                    let answers = self.generator.generate();
                    for (question_id, answer) in &answers {
                        let outcome = match answer {
                            Answer::Choice(option_id) => {
                                self.driver.select_option(question_id, option_id).await
                            }
                            Answer::Text(text) => self.driver.enter_text(text).await,
                        };
                        // 尽力填写：单个问题找不到控件不中断本轮
                        if outcome == FillOutcome::NotFound {
                            warn!("⚠️ 问题 {} 的作答控件未找到，跳过", question_id);
                        }
                    }
                    SubmitState::Scrolling
                }
                SubmitState::Scrolling => {
                    self.driver.scroll_to_bottom().await;
                    SubmitState::Submitting
                }
                SubmitState::Submitting => {
                    match self.driver.click_button_by_label(self.submit_label).await {
                        ClickOutcome::Clicked => return IterationOutcome::Success,
                        ClickOutcome::NotFound => {
                            warn!("⚠️ 未找到提交按钮");
                            return IterationOutcome::Failure(FailureReason::SubmitButtonMissing);
                        }
                    }
                }
            };
        }
    }

    /// 为下一轮重置页面
    ///
    /// 成功时先尝试"追加参与"入口；点到则留在同一问卷实例。
    /// 其余情况一律刷新 + 重新导航
    pub async fn prepare_next(&self, outcome: &IterationOutcome) {
        if outcome.is_success() {
            if self.driver.click_continue_affordance().await == ClickOutcome::Clicked {
                debug!("继续停留在当前问卷实例");
                sleep(self.random_next_wait()).await;
                return;
            }
            debug!("未找到追加参与入口，重新加载问卷");
        }
        self.driver.reload().await;
        self.driver.navigate(self.url).await;
        sleep(self.pacing.reload_wait).await;
    }

    /// 追加参与后的随机等待，模拟原始脚本的提交间隔
    fn random_next_wait(&self) -> Duration {
        let lo = self.pacing.next_wait_min.as_millis() as u64;
        let hi = self.pacing.next_wait_max.as_millis() as u64;
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        Duration::from_millis(rand::rng().random_range(lo..=hi))
    }
}
