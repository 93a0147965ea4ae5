//! 进度上报契约
//!
//! 循环在工作任务里运行，外层界面（CLI / GUI）通过这个契约接收每轮事件，
//! 核心逻辑不依赖任何具体实现。`ChannelReporter` 用显式事件通道取代了
//! 原来"线程 + 信号回调"的耦合方式。

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::workflow::IterationOutcome;

/// 单轮迭代事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationEvent {
    /// 第几轮（从 1 开始）
    pub iteration: u64,
    /// 本轮结果
    pub outcome: IterationOutcome,
    /// 累计成功次数
    pub cumulative_success: u64,
}

/// 运行结束汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub success_count: u64,
    pub total_iterations: u64,
}

/// 进度上报契约
///
/// 实现必须可以从工作任务上下文安全调用
pub trait ProgressReporter: Send + Sync {
    /// 每轮迭代结束后调用一次
    fn on_iteration(&self, event: &IterationEvent);
    /// 运行结束时调用一次（正常完成或取消）
    fn on_finished(&self, summary: &RunSummary);
    /// 致命错误（会话无法建立）时调用
    fn on_fatal_error(&self, message: &str);
}

/// 日志上报器：把进度写到 tracing 日志（CLI 模式）
#[derive(Debug, Default)]
pub struct LogReporter;

impl LogReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for LogReporter {
    fn on_iteration(&self, event: &IterationEvent) {
        match event.outcome {
            IterationOutcome::Success => info!(
                "📋 [第 {} 轮] ✅ 提交成功 (累计成功: {})",
                event.iteration, event.cumulative_success
            ),
            IterationOutcome::Failure(reason) => warn!(
                "📋 [第 {} 轮] ✗ 提交失败: {} (累计成功: {})",
                event.iteration, reason, event.cumulative_success
            ),
        }
    }

    fn on_finished(&self, summary: &RunSummary) {
        info!(
            "🏁 运行结束 - 成功: {}/{} 轮",
            summary.success_count, summary.total_iterations
        );
    }

    fn on_fatal_error(&self, message: &str) {
        error!("❌ 致命错误: {}", message);
    }
}

/// 进度事件（通道消息）
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Iteration(IterationEvent),
    Finished(RunSummary),
    FatalError(String),
}

/// 通道上报器：把事件转发到 mpsc 通道，供前端在另一个任务里消费
pub struct ChannelReporter {
    sender: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelReporter {
    /// 创建上报器和对应的接收端
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// 接收端已关闭时丢弃事件（前端先退出不算错误）
    fn send(&self, event: ProgressEvent) {
        let _ = self.sender.send(event);
    }
}

impl ProgressReporter for ChannelReporter {
    fn on_iteration(&self, event: &IterationEvent) {
        self.send(ProgressEvent::Iteration(*event));
    }

    fn on_finished(&self, summary: &RunSummary) {
        self.send(ProgressEvent::Finished(*summary));
    }

    fn on_fatal_error(&self, message: &str) {
        self.send(ProgressEvent::FatalError(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::FailureReason;

    #[tokio::test]
    async fn test_channel_reporter_forwards_events() {
        let (reporter, mut receiver) = ChannelReporter::new();

        reporter.on_iteration(&IterationEvent {
            iteration: 1,
            outcome: IterationOutcome::Success,
            cumulative_success: 1,
        });
        reporter.on_iteration(&IterationEvent {
            iteration: 2,
            outcome: IterationOutcome::Failure(FailureReason::Timeout),
            cumulative_success: 1,
        });
        reporter.on_finished(&RunSummary {
            success_count: 1,
            total_iterations: 2,
        });

        match receiver.recv().await {
            Some(ProgressEvent::Iteration(event)) => {
                assert_eq!(event.iteration, 1);
                assert_eq!(event.outcome, IterationOutcome::Success);
            }
            other => panic!("意外的事件: {:?}", other),
        }
        match receiver.recv().await {
            Some(ProgressEvent::Iteration(event)) => {
                assert_eq!(
                    event.outcome,
                    IterationOutcome::Failure(FailureReason::Timeout)
                );
            }
            other => panic!("意外的事件: {:?}", other),
        }
        match receiver.recv().await {
            Some(ProgressEvent::Finished(summary)) => {
                assert_eq!(summary.success_count, 1);
                assert_eq!(summary.total_iterations, 2);
            }
            other => panic!("意外的事件: {:?}", other),
        }
    }

    #[test]
    fn test_channel_reporter_tolerates_closed_receiver() {
        let (reporter, receiver) = ChannelReporter::new();
        drop(receiver);

        // 前端先退出时不应 panic
        reporter.on_fatal_error("测试消息");
    }
}
