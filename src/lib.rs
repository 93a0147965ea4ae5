//! # Survey Submit
//!
//! 一个用于自动化问卷提交的 Rust 应用程序：按配置的概率分布随机作答，
//! 反复提交同一份问卷，直到累计达到目标成功次数。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 浏览器会话的启动与释放
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `FormDriver` - 表单操作能力契约（有界等待 + 显式结果）
//! - `NaverFormDriver` - 唯一的 page owner，Naver 表单实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不持有页面资源
//! - `ResponseGenerator` - 按权重分布生成随机答案的能力
//! - `ProgressReporter` - 向外层上报进度的能力契约
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一轮提交"的完整流程
//! - `SubmissionController` - 状态机编排（等待 → 填写 → 滚动 → 提交 → 续作）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/loop_runner` - 提交循环，管理计数与协作式取消
//! - `orchestrator/app` - 组装全部组件，管理会话生命周期
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, Pacing, QuestionConfig, SurveyConfig};
pub use error::{AppError, AppResult, ConfigError, SessionError};
pub use infrastructure::{ClickOutcome, FillOutcome, FormDriver, NaverFormDriver, WaitOutcome};
pub use orchestrator::{App, CancelToken, LoopRunner, RunState};
pub use services::{
    Answer, ChannelReporter, IterationEvent, LogReporter, ProgressEvent, ProgressReporter,
    ResponseGenerator, RunSummary, DEFAULT_TEXT_RESPONSE,
};
pub use workflow::{FailureReason, IterationOutcome, SubmissionController};
