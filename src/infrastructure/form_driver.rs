//! 表单驱动能力契约
//!
//! 核心逻辑只依赖这个契约，不直接接触页面结构，
//! 因此底层自动化引擎可以整体替换（测试里用脚本化驱动代替真实浏览器）。
//!
//! 每个查找类操作都是有界等待，并以显式结果返回成功 / 超时 / 未找到，
//! 而不是靠隐式延迟或吞掉异常。

use std::time::Duration;

use async_trait::async_trait;

/// 等待结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// 标志元素已出现
    Ready,
    /// 超出有界等待时间
    Timeout,
}

/// 填写结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// 已应用（选项已点击 / 文本已输入）
    Applied,
    /// 目标控件未找到
    NotFound,
}

/// 点击结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// 已点击
    Clicked,
    /// 目标控件未找到
    NotFound,
}

/// 表单驱动能力契约
#[async_trait]
pub trait FormDriver: Send + Sync {
    /// 等待问卷加载标志元素出现，最多等待 `timeout`
    async fn wait_for_marker(&self, timeout: Duration) -> WaitOutcome;

    /// 选中指定问题的指定选项
    async fn select_option(&self, question_id: &str, option_id: &str) -> FillOutcome;

    /// 在主观题输入框填入文本
    async fn enter_text(&self, text: &str) -> FillOutcome;

    /// 滚动到页面底部并等待稳定
    async fn scroll_to_bottom(&self);

    /// 点击文字包含 `label` 的按钮
    async fn click_button_by_label(&self, label: &str) -> ClickOutcome;

    /// 定位并点击"追加参与"入口
    async fn click_continue_affordance(&self) -> ClickOutcome;

    /// 刷新当前页面
    async fn reload(&self);

    /// 导航到指定 URL
    async fn navigate(&self, url: &str);
}
