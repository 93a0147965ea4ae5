//! 应用编排
//!
//! 组装配置、会话、驱动、生成器和循环，管理整个运行的生命周期

use tracing::{info, warn};

use crate::browser;
use crate::config::{Config, SurveyConfig};
use crate::error::AppResult;
use crate::infrastructure::NaverFormDriver;
use crate::orchestrator::loop_runner::{CancelToken, LoopRunner, RunState};
use crate::services::{LogReporter, ProgressReporter, ResponseGenerator};
use crate::workflow::SubmissionController;

/// 应用主结构
pub struct App {
    config: Config,
    survey: SurveyConfig,
}

impl App {
    /// 初始化应用：加载并校验问卷配置
    pub fn initialize(config: Config) -> AppResult<Self> {
        let survey = SurveyConfig::load(&config.survey_config_file)?;
        info!("✓ 问卷配置已加载: {} 个问题", survey.questions.len());
        Ok(Self { config, survey })
    }

    /// 运行提交循环
    ///
    /// 浏览器会话在每条退出路径（正常完成、取消、致命错误）上都恰好释放一次
    pub async fn run(&self) -> AppResult<RunState> {
        let reporter = LogReporter::new();
        let generator = ResponseGenerator::new(&self.survey)?;

        log_startup(&self.survey);

        // 会话获取失败是唯一的致命错误：零轮次即中止
        let session = match browser::launch_session(&self.config, &self.survey.url).await {
            Ok(session) => session,
            Err(e) => {
                reporter.on_fatal_error(&e.to_string());
                return Err(e);
            }
        };

        let driver =
            NaverFormDriver::new(session.page().clone(), self.config.form_marker_id.clone());

        // Ctrl+C → 协作式停止，当前轮次自然完成后退出
        let cancel = CancelToken::new();
        let signal_cancel = cancel.clone();
        let signal_task = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("\n⚠️ 收到中断信号，当前轮次结束后停止...");
                signal_cancel.request();
            }
        });

        let pacing = self.config.pacing();
        let controller = SubmissionController::new(
            &driver,
            &generator,
            &self.survey.url,
            &self.config.submit_button_label,
            &pacing,
        );
        let runner = LoopRunner::new(controller, &reporter, cancel, self.survey.max_count);

        let state = runner.run().await;

        signal_task.abort();
        session.close().await;

        print_final_stats(&state);

        Ok(state)
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(survey: &SurveyConfig) {
    info!("{}", "━".repeat(40));
    info!("🔄 问卷自动提交启动 (随机比例作答)");
    if survey.max_count > 0 {
        info!("   🎯 目标: {} 次", survey.max_count);
    } else {
        info!("   ♾️ 无限循环 (Ctrl+C 停止)");
    }
    info!("{}", "━".repeat(40));
}

fn print_final_stats(state: &RunState) {
    let rate = if state.iterations > 0 {
        state.successes as f64 / state.iterations as f64 * 100.0
    } else {
        0.0
    };
    info!("\n{}", "━".repeat(40));
    info!(
        "🏁 结束 - 成功: {}/{} 轮 ({:.1}%)",
        state.successes, state.iterations, rate
    );
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "━".repeat(40));
}
