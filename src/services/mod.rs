//! 业务能力层
//!
//! 描述"我能做什么"，不持有页面资源：
//! - `ResponseGenerator`: 按配置分布生成一套随机答案
//! - `ProgressReporter`: 向外层上报每轮进度的契约

pub mod reporter;
pub mod response_generator;

pub use reporter::{
    ChannelReporter, IterationEvent, LogReporter, ProgressEvent, ProgressReporter, RunSummary,
};
pub use response_generator::{Answer, ResponseGenerator, DEFAULT_TEXT_RESPONSE};
