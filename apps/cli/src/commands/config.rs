//! Config 子命令：查看/修改持久化配置

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::CliConfig;

/// 查看或修改默认配置
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// 打印当前配置和文件路径
    Show,

    /// 修改并保存配置
    Set {
        /// 对端主机
        #[arg(long)]
        host: Option<String>,

        /// 对端端口
        #[arg(long)]
        port: Option<u16>,

        /// 限速
        #[arg(long)]
        limit: Option<f64>,

        /// 警告宽限期（秒）
        #[arg(long)]
        grace: Option<u64>,

        /// 轮询间隔（毫秒）
        #[arg(long)]
        interval: Option<u64>,
    },
}

impl ConfigCommand {
    pub fn run(&self, mut settings: CliConfig) -> Result<()> {
        match &self.action {
            ConfigAction::Show => {
                match CliConfig::path() {
                    Some(path) => println!("# {}", path.display()),
                    None => println!("# 当前平台没有配置目录，使用内置默认值"),
                }
                print!("{}", toml::to_string_pretty(&settings)?);
                Ok(())
            },
            ConfigAction::Set {
                host,
                port,
                limit,
                grace,
                interval,
            } => {
                if let Some(host) = host {
                    settings.host = host.clone();
                }
                if let Some(port) = port {
                    settings.port = *port;
                }
                if let Some(limit) = limit {
                    settings.speed_limit = *limit;
                }
                if let Some(grace) = grace {
                    settings.grace_period_secs = *grace;
                }
                if let Some(interval) = interval {
                    settings.poll_interval_ms = *interval;
                }

                // 保存前借 SDK 的配置校验挡掉无效值
                rover_client::RoverConfig {
                    host: settings.host.clone(),
                    port: settings.port,
                    speed_limit: settings.speed_limit,
                    grace_period: std::time::Duration::from_secs(settings.grace_period_secs),
                    poll_interval: std::time::Duration::from_millis(settings.poll_interval_ms),
                    ..Default::default()
                }
                .validate()?;

                settings.save()?;
                println!("✅ 已保存");
                Ok(())
            },
        }
    }
}
