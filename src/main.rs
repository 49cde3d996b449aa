use anyhow::Result;
use clap::Parser;

use claim_inventory::utils::logging;
use claim_inventory::{App, Cli, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::load()?;
    if let Some(base_url) = cli.base_url.clone() {
        config.base_url = base_url;
    }

    // 初始化日志
    logging::init(cli.verbose || config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config, cli.wait)?.run(cli.command).await?;

    Ok(())
}
