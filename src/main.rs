use anyhow::Result;
use clap::Parser;
use doc_inspect_client::app::{App, OutputMode};
use doc_inspect_client::config::Config;
use doc_inspect_client::logger;
use std::path::PathBuf;

/// 上传 PDF 或 ZIP 到文档检测服务并查看检测结果
#[derive(Debug, Parser)]
#[command(name = "doc-inspect", version)]
struct Cli {
    /// 待提交的文件（PDF 或 ZIP），按顺序逐个提交
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// TOML 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 覆盖分析服务地址
    #[arg(long)]
    base_url: Option<String>,

    /// 输出原始 JSON 而不是文本报告
    #[arg(long)]
    json: bool,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置：配置文件 → 环境变量 → 命令行
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logger::init(config.verbose_logging);

    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Report
    };

    // 初始化并运行应用
    let app = App::initialize(config)?;
    let stats = app.run(&cli.files, mode).await;

    if stats.failed > 0 {
        anyhow::bail!("{}/{} 个文件分析失败", stats.failed, stats.total);
    }

    Ok(())
}
