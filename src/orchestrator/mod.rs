//! 编排层
//!
//! - `LoopRunner`: 重复执行单轮提交直到达成目标或请求取消，维护计数器
//! - `App`: 组装全部组件，管理浏览器会话的生命周期

pub mod app;
pub mod loop_runner;

pub use app::App;
pub use loop_runner::{CancelToken, LoopRunner, RunState};
