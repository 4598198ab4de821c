use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use teatime::plugin::export_metadata;
use teatime::plugins::catalogue;
use teatime::ScanConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "teatime")]
#[command(about = "Security scanner for Ethereum and IPFS nodes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 按配置文件扫描一个节点
    Scan {
        #[arg(short, long)]
        config: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,

        /// 报告包含严重问题时以非零状态退出
        #[arg(long)]
        fail_on_severe: bool,
    },

    /// 列出无需设置即可使用的检查
    List,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan {
            config,
            output,
            pretty,
            fail_on_severe,
        } => run_scan(config, output, pretty, fail_on_severe),
        Commands::List => {
            println!("{}", export_metadata(&catalogue())?);
            Ok(())
        }
    }
}

fn run_scan(
    config: PathBuf,
    output: Option<PathBuf>,
    pretty: bool,
    fail_on_severe: bool,
) -> Result<()> {
    let scanner = ScanConfig::load(&config)?.build()?;
    info!("{}", scanner);

    let report = scanner.run()?;
    let json = if pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };

    match output {
        Some(path) => {
            fs::write(&path, json)?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    if fail_on_severe && !report.ok() {
        bail!("{} contains severe issues", report);
    }
    Ok(())
}
