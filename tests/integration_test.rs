use std::time::Duration;

use survey_submit::utils::logging;
use survey_submit::{
    browser, Config, FormDriver, NaverFormDriver, ResponseGenerator, SubmissionController,
    SurveyConfig, WaitOutcome,
};

#[tokio::test]
#[ignore] // 默认忽略，需要真实浏览器环境：cargo test -- --ignored
async fn test_launch_browser_session() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();
    let survey = SurveyConfig::load(&config.survey_config_file).expect("加载问卷配置失败");

    // 测试浏览器启动与释放
    let session = browser::launch_session(&config, &survey.url)
        .await
        .expect("启动浏览器会话失败");

    session.close().await;
}

#[tokio::test]
#[ignore]
async fn test_wait_for_marker_on_live_form() {
    logging::init();

    let config = Config::from_env();
    let survey = SurveyConfig::load(&config.survey_config_file).expect("加载问卷配置失败");

    let session = browser::launch_session(&config, &survey.url)
        .await
        .expect("启动浏览器会话失败");
    let driver = NaverFormDriver::new(session.page().clone(), config.form_marker_id.clone());

    let outcome = driver.wait_for_marker(Duration::from_secs(30)).await;
    assert_eq!(outcome, WaitOutcome::Ready, "问卷标志元素应该出现");

    session.close().await;
}

#[tokio::test]
#[ignore]
async fn test_single_submission() {
    logging::init();

    let config = Config::from_env();
    let survey = SurveyConfig::load(&config.survey_config_file).expect("加载问卷配置失败");

    let session = browser::launch_session(&config, &survey.url)
        .await
        .expect("启动浏览器会话失败");
    let driver = NaverFormDriver::new(session.page().clone(), config.form_marker_id.clone());
    let generator = ResponseGenerator::new(&survey).expect("构造生成器失败");
    let pacing = config.pacing();

    let controller = SubmissionController::new(
        &driver,
        &generator,
        &survey.url,
        &config.submit_button_label,
        &pacing,
    );

    let outcome = controller.run_once().await;
    assert!(outcome.is_success(), "单轮提交应该成功: {:?}", outcome);

    session.close().await;
}
