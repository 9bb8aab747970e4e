//! Monitor 模式：持续轮询速度并执行安全策略

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use crossbeam_channel::RecvTimeoutError;
use rover_client::SafetyEvent;

use crate::config::CliConfig;

/// 持续轮询速度并打印安全事件
#[derive(Args, Debug)]
pub struct MonitorCommand {
    /// 覆盖配置文件中的限速
    #[arg(long)]
    pub limit: Option<f64>,

    /// 覆盖配置文件中的宽限期（秒）
    #[arg(long)]
    pub grace: Option<u64>,

    /// 覆盖配置文件中的轮询间隔（毫秒）
    #[arg(long)]
    pub interval: Option<u64>,
}

impl MonitorCommand {
    pub fn run(&self, settings: &CliConfig) -> Result<()> {
        let mut settings = settings.clone();
        if let Some(limit) = self.limit {
            settings.speed_limit = limit;
        }
        if let Some(grace) = self.grace {
            settings.grace_period_secs = grace;
        }
        if let Some(interval) = self.interval {
            settings.poll_interval_ms = interval;
        }

        let mut rover = settings.builder().build()?;
        let events = rover.events();
        rover.start_polling()?;

        println!(
            "⏳ 监控 {}:{}（限速 {}，宽限 {}s），Ctrl-C 退出",
            settings.host, settings.port, settings.speed_limit, settings.grace_period_secs
        );

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        ctrlc::set_handler(move || {
            running_clone.store(false, Ordering::Relaxed);
        })?;

        let mut last_display = String::new();
        while running.load(Ordering::Relaxed) {
            match events.recv_timeout(Duration::from_millis(250)) {
                Ok(SafetyEvent::Warning { speed, limit }) => {
                    println!("⚠️  超速警告: {} > {}，请减速", speed, limit);
                },
                Ok(SafetyEvent::Violation { speed, limit }) => {
                    println!("⛔ 超速持续未缓解: {} > {}，已下发停车", speed, limit);
                },
                Ok(SafetyEvent::StopFailed { reason, .. }) => {
                    println!("❌ 停车指令发送失败: {}", reason);
                },
                Err(RecvTimeoutError::Timeout) => {
                    let display = rover.speed_display();
                    if display != last_display {
                        println!("速度: {}", display);
                        last_display = display;
                    }
                },
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        println!("⏳ 停止监控...");
        rover.stop_polling();
        println!("✅ 已停止");
        Ok(())
    }
}
