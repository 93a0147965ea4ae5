//! 提交循环
//!
//! 重复调用 `SubmissionController::run_once`，维护轮次 / 成功计数，
//! 每轮向 `ProgressReporter` 上报一次事件。
//!
//! 取消是协作式的：只在轮次边界检查，进行中的一轮总是自然完成并计入，
//! 取消后不再执行续作 / 刷新。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::services::{IterationEvent, ProgressReporter, RunSummary};
use crate::workflow::SubmissionController;

/// 协作式取消令牌
///
/// 可以克隆后交给信号处理任务或前端，`request` 之后循环在当前轮结束时退出
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求停止
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// 运行状态
///
/// 由 `LoopRunner` 独占持有，只在轮次边界更新；
/// 计数器在一次运行内单调不减
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    /// 已执行轮次
    pub iterations: u64,
    /// 成功次数
    pub successes: u64,
}

/// 提交循环执行器
pub struct LoopRunner<'a> {
    controller: SubmissionController<'a>,
    reporter: &'a dyn ProgressReporter,
    cancel: CancelToken,
    /// 目标成功次数（0 表示无限循环，只能靠取消停止）
    max_count: u64,
}

impl<'a> LoopRunner<'a> {
    pub fn new(
        controller: SubmissionController<'a>,
        reporter: &'a dyn ProgressReporter,
        cancel: CancelToken,
        max_count: u64,
    ) -> Self {
        Self {
            controller,
            reporter,
            cancel,
            max_count,
        }
    }

    /// 运行提交循环直到达成目标或请求取消
    pub async fn run(&self) -> RunState {
        let mut state = RunState::default();

        loop {
            let outcome = self.controller.run_once().await;

            state.iterations += 1;
            if outcome.is_success() {
                state.successes += 1;
            }

            self.reporter.on_iteration(&IterationEvent {
                iteration: state.iterations,
                outcome,
                cumulative_success: state.successes,
            });

            if self.max_count > 0 && state.successes >= self.max_count {
                info!("🎉 目标 {} 次已达成!", self.max_count);
                break;
            }
            if self.cancel.is_requested() {
                info!("⚠️ 已请求停止，当前轮次已完成，退出循环");
                break;
            }

            self.controller.prepare_next(&outcome).await;
        }

        self.reporter.on_finished(&RunSummary {
            success_count: state.successes,
            total_iterations: state.iterations,
        });

        state
    }
}
