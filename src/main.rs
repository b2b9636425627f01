use anyhow::Result;
use beat_batch::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置（环境变量 + 可选的批次清单）
    let config = Config::load().await?;

    // 初始化并运行应用
    App::initialize(config)?.run().await?;

    Ok(())
}
