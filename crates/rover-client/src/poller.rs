//! 遥测轮询
//!
//! 后台线程按固定节拍向对端查询速度：解析成功的读数交给安全
//! 监控并发布给展示层；解析失败只丢弃本拍；传输失败记日志后
//! 继续下一拍。对端临时不可达绝不会终止轮询。
//!
//! # 生命周期
//!
//! - 协作式取消：共享的关闭标志在每一拍检查，置位后最多一个
//!   轮询间隔内退出
//! - `shutdown` / `Drop` 都会置位标志并 join 线程，不做强制终止

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use arc_swap::ArcSwapOption;
use crossbeam_channel::Sender;
use parking_lot::Mutex;
use rover_protocol::SpeedReading;
use tracing::{error, warn};

use crate::commander::Commander;
use crate::events::SafetyEvent;
use crate::safety::{SafetyMonitor, Verdict};

/// 最近一次成功的速度采样
///
/// 轮询线程是唯一写者，展示层通过 ArcSwap 无等待读取。
#[derive(Debug, Clone)]
pub struct SpeedSample {
    /// 解析后的读数
    pub reading: SpeedReading,
    /// 对端应答的原始文本（已去除首尾空白），用于展示
    pub raw: String,
    /// 读取时刻
    pub at: Instant,
}

/// 遥测轮询器
pub struct TelemetryPoller {
    handle: Option<thread::JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl TelemetryPoller {
    /// 启动轮询线程
    pub(crate) fn start(
        commander: Commander,
        monitor: Arc<Mutex<SafetyMonitor>>,
        latest: Arc<ArcSwapOption<SpeedSample>>,
        events: Sender<SafetyEvent>,
        poll_interval: Duration,
    ) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::spawn(move || {
            Self::poll_loop(
                commander,
                monitor,
                latest,
                events,
                poll_interval,
                shutdown_clone,
            );
        });

        TelemetryPoller {
            handle: Some(handle),
            shutdown,
        }
    }

    /// 轮询循环
    fn poll_loop(
        commander: Commander,
        monitor: Arc<Mutex<SafetyMonitor>>,
        latest: Arc<ArcSwapOption<SpeedSample>>,
        events: Sender<SafetyEvent>,
        poll_interval: Duration,
        shutdown: Arc<AtomicBool>,
    ) {
        while !shutdown.load(Ordering::Relaxed) {
            match commander.query_speed() {
                Ok(reply) => {
                    Self::handle_reply(&reply, &commander, &monitor, &latest, &events);
                },
                Err(e) => {
                    // 错过一拍不致命，下一拍继续
                    warn!("Speed query failed: {}", e);
                },
            }

            // 发查询期间收到关闭信号时不再睡眠
            if shutdown.load(Ordering::Relaxed) {
                break;
            }
            thread::sleep(poll_interval);
        }
    }

    /// 处理一条查询应答
    fn handle_reply(
        reply: &str,
        commander: &Commander,
        monitor: &Mutex<SafetyMonitor>,
        latest: &ArcSwapOption<SpeedSample>,
        events: &Sender<SafetyEvent>,
    ) {
        let reading = match SpeedReading::parse(reply) {
            Ok(reading) => reading,
            Err(e) => {
                // 本拍丢弃，展示值和安全状态都保持不变
                warn!("Discarding malformed speed reply {:?}: {}", reply, e);
                return;
            },
        };

        let speed = reading.value;
        latest.store(Some(Arc::new(SpeedSample {
            reading,
            raw: reply.to_string(),
            at: Instant::now(),
        })));

        let (verdict, limit) = {
            let mut monitor = monitor.lock();
            (monitor.process(speed, Instant::now()), monitor.limit())
        };

        match verdict {
            Verdict::Compliant | Verdict::StillWarned => {},
            Verdict::Warn => {
                warn!(speed, limit, "speed limit exceeded, warning issued");
                let _ = events.send(SafetyEvent::Warning { speed, limit });
            },
            Verdict::ForceStop => {
                error!(speed, limit, "speed stayed above limit, forcing stop");
                let stop_result = commander.stop();
                let _ = events.send(SafetyEvent::Violation { speed, limit });
                if let Err(e) = stop_result {
                    // 违规已上报，这里单独上报停车指令本身的失败
                    error!("Forced stop could not be delivered: {}", e);
                    let _ = events.send(SafetyEvent::StopFailed {
                        speed,
                        reason: e.to_string(),
                    });
                }
            },
        }
    }

    /// 轮询线程是否在运行
    pub fn is_running(&self) -> bool {
        !self.shutdown.load(Ordering::Relaxed)
    }

    /// 优雅停止：置位关闭标志并等待线程退出
    pub fn shutdown(mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for TelemetryPoller {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
