//! 基础设施层
//!
//! 持有稀缺资源（Page），只向上层暴露能力：
//! - `FormDriver`: 表单操作能力契约（有界等待 + 显式结果）
//! - `NaverFormDriver`: 基于 chromiumoxide 的 Naver 表单实现

pub mod form_driver;
pub mod naver_driver;

#[cfg(test)]
pub(crate) mod testing;

pub use form_driver::{ClickOutcome, FillOutcome, FormDriver, WaitOutcome};
pub use naver_driver::NaverFormDriver;
