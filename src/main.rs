use anyhow::Context;
use clap::Parser;
use product_console::app::product::HttpProductApi;
use product_console::config::load_config;
use product_console::console::Console;
use product_console::infrastructure::{http::HttpClientManager, logger::Logger};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info};

/// Products 服务的终端表单
#[derive(Debug, Parser)]
#[command(name = "product_console", version, about)]
struct Cli {
    /// 配置文件路径（默认查找 config.toml 与 ./config/config.toml）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 服务基础地址，优先于配置文件与 BASE_URL
    #[arg(short, long)]
    base_url: Option<String>,

    /// 从文件读取命令而不是标准输入
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// 日志级别，优先于配置文件
    #[arg(long)]
    log_level: Option<String>,

    /// 每个动作后不打印表单
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_app(cli).await {
        error!("Application error: {e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run_app(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    config.apply_cli_overrides(cli.base_url.as_deref(), cli.log_level.as_deref());
    config.validate().context("Invalid configuration")?;

    let _guard = Logger::init(&config.logging).context("Failed to initialise logging")?;

    let http = HttpClientManager::new(&config.api).context("Failed to build HTTP client")?;
    let api = HttpProductApi::new(http.get_client().clone(), &config.api.base_url)?;
    info!("Products service: {}", api.base_url());

    let echo_form = config.console.echo_form && !cli.quiet;
    let mut console = Console::new(Arc::new(api), echo_form, io::stdout())?;

    match &cli.script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            console.run(BufReader::new(file), None).await?;
        }
        None => {
            let prompt = io::stdin()
                .is_terminal()
                .then_some(config.console.prompt.as_str());
            console.run(BufReader::new(tokio::io::stdin()), prompt).await?;
        }
    }

    Ok(())
}
