//! 流程层
//!
//! 定义"一轮提交"的完整流程：
//! - `SubmissionController`: 填写 → 滚动 → 提交 → 结果分类 → 续作路径
//! - `IterationOutcome` / `FailureReason`: 单轮结果的显式分类

pub mod submission;

pub use submission::{FailureReason, IterationOutcome, SubmissionController};
