//! Rover 外观
//!
//! 面向调用方（UI 层）的统一入口：离散控制操作、遥测轮询的
//! 生命周期管理、当前速度与安全状态的只读访问，以及安全事件
//! 通道。展示方式完全由调用方决定。

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::Mutex;
use rover_protocol::SpeedReading;
use rover_transport::Transport;
use tracing::info;

use crate::commander::Commander;
use crate::config::RoverConfig;
use crate::error::{ClientError, Result};
use crate::events::SafetyEvent;
use crate::poller::{SpeedSample, TelemetryPoller};
use crate::safety::{SafetyMonitor, SafetyState};

/// Rover 客户端
///
/// 两条控制流共享本实例：调用方线程发离散指令，轮询线程持续
/// 查询速度。两者各自按请求开连接，互不加锁；共享的速度采样
/// 和安全状态分别由 ArcSwap 和互斥锁保护。
pub struct Rover {
    config: RoverConfig,
    commander: Commander,
    monitor: Arc<Mutex<SafetyMonitor>>,
    latest: Arc<ArcSwapOption<SpeedSample>>,
    events_tx: Sender<SafetyEvent>,
    events_rx: Receiver<SafetyEvent>,
    poller: Option<TelemetryPoller>,
}

impl Rover {
    /// 创建实例（经由 [`RoverBuilder`](crate::builder::RoverBuilder)）
    pub(crate) fn new(config: RoverConfig, transport: Arc<dyn Transport>) -> Self {
        let (events_tx, events_rx) = unbounded();
        let monitor = Arc::new(Mutex::new(SafetyMonitor::new(
            config.speed_limit,
            config.grace_period,
        )));

        Rover {
            commander: Commander::new(transport),
            monitor,
            latest: Arc::new(ArcSwapOption::empty()),
            events_tx,
            events_rx,
            poller: None,
            config,
        }
    }

    /// 会话配置
    pub fn config(&self) -> &RoverConfig {
        &self.config
    }

    // ============================================================
    // 离散控制操作（同步，失败原样上报）
    // ============================================================

    /// 前进
    pub fn move_forward(&self) -> Result<()> {
        self.commander.move_forward()
    }

    /// 后退
    pub fn move_backward(&self) -> Result<()> {
        self.commander.move_backward()
    }

    /// 左转
    pub fn turn_left(&self) -> Result<()> {
        self.commander.turn_left()
    }

    /// 右转
    pub fn turn_right(&self) -> Result<()> {
        self.commander.turn_right()
    }

    /// 停车
    pub fn stop(&self) -> Result<()> {
        self.commander.stop()
    }

    /// 提高速度挡位
    pub fn increase_speed(&self) -> Result<()> {
        self.commander.increase_speed()
    }

    /// 降低速度挡位
    pub fn decrease_speed(&self) -> Result<()> {
        self.commander.decrease_speed()
    }

    // ============================================================
    // 一次性查询
    // ============================================================

    /// 查询一次当前速度（不经过轮询线程，不影响安全状态）
    pub fn query_speed(&self) -> Result<SpeedReading> {
        let reply = self.commander.query_speed()?;
        Ok(SpeedReading::parse(&reply)?)
    }

    /// 查询前方障碍距离（固件以 cm 上报）
    pub fn query_distance(&self) -> Result<f64> {
        self.commander.query_distance()
    }

    // ============================================================
    // 遥测轮询生命周期
    // ============================================================

    /// 启动后台遥测轮询
    pub fn start_polling(&mut self) -> Result<()> {
        if self.poller.as_ref().is_some_and(TelemetryPoller::is_running) {
            return Err(ClientError::PollerAlreadyRunning);
        }

        info!(
            interval_ms = self.config.poll_interval.as_millis() as u64,
            limit = self.config.speed_limit,
            "starting telemetry poller"
        );
        self.poller = Some(TelemetryPoller::start(
            self.commander.clone(),
            self.monitor.clone(),
            self.latest.clone(),
            self.events_tx.clone(),
            self.config.poll_interval,
        ));
        Ok(())
    }

    /// 停止后台遥测轮询（置位关闭标志并 join，最多阻塞约一个
    /// 轮询间隔加一次查询的超时）
    pub fn stop_polling(&mut self) {
        if let Some(poller) = self.poller.take() {
            info!("stopping telemetry poller");
            poller.shutdown();
        }
    }

    /// 轮询是否在运行
    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(TelemetryPoller::is_running)
    }

    // ============================================================
    // 只读状态访问
    // ============================================================

    /// 最近一次成功的速度采样
    pub fn last_speed(&self) -> Option<SpeedSample> {
        self.latest.load_full().map(|sample| (*sample).clone())
    }

    /// 用于展示的速度文本（对端应答原文；尚无读数时为 `"N/A"`）
    pub fn speed_display(&self) -> String {
        match self.latest.load_full() {
            Some(sample) => sample.raw.clone(),
            None => "N/A".to_string(),
        }
    }

    /// 当前安全状态
    pub fn safety_state(&self) -> SafetyState {
        self.monitor.lock().state()
    }

    /// 安全事件接收端
    ///
    /// 可多次调用，每个接收端竞争消费同一队列；通常由 UI 层
    /// 持有一个接收端轮流取事件。
    pub fn events(&self) -> Receiver<SafetyEvent> {
        self.events_rx.clone()
    }
}
