//! # Rover CLI
//!
//! 轮式车辆远程控制的命令行工具。
//!
//! ## 双模式架构
//!
//! ### One-shot 模式（推荐用于脚本）
//!
//! ```bash
//! # 配置对端地址
//! rover-cli config set --host 192.168.137.75 --port 8080
//!
//! # 执行操作（内部：连接 -> 发送 -> 断开）
//! rover-cli drive forward
//! rover-cli speed
//! ```
//!
//! ### Monitor / REPL 模式（推荐用于手动驾驶）
//!
//! ```bash
//! # 持续轮询速度并执行安全策略，Ctrl-C 退出
//! rover-cli monitor
//!
//! $ rover-cli shell
//! rover> forward
//! rover> speed
//! rover> watch
//! rover> stop
//! rover> exit
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod repl;

use commands::{ConfigCommand, DriveCommand, MonitorCommand};
use config::CliConfig;

/// Rover CLI - 车辆远程控制命令行工具
#[derive(Parser, Debug)]
#[command(name = "rover-cli")]
#[command(about = "Command-line interface for rover remote control", long_about = None)]
#[command(version)]
struct Cli {
    /// 对端主机，覆盖配置文件
    #[arg(long, global = true)]
    host: Option<String>,

    /// 对端端口，覆盖配置文件
    #[arg(long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 发送一条运动/调速指令
    Drive(DriveCommand),

    /// 查询一次当前速度
    Speed,

    /// 查询一次前方障碍距离
    Distance,

    /// 持续轮询速度并执行安全策略（Ctrl-C 退出）
    Monitor(MonitorCommand),

    /// 交互式 Shell
    Shell,

    /// 查看或修改默认配置
    Config(ConfigCommand),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = CliConfig::load()?;
    if let Some(host) = cli.host {
        settings.host = host;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }

    match cli.command {
        Commands::Drive(cmd) => cmd.run(&settings),
        Commands::Speed => commands::run_speed(&settings),
        Commands::Distance => commands::run_distance(&settings),
        Commands::Monitor(cmd) => cmd.run(&settings),
        Commands::Shell => repl::run_repl(&settings),
        Commands::Config(cmd) => cmd.run(settings),
    }
}
