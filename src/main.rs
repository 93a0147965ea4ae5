use anyhow::Result;
use survey_submit::utils::logging;
use survey_submit::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    let app = App::initialize(config)?;
    app.run().await?;

    Ok(())
}
