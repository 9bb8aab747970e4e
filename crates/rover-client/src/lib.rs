//! # Rover 客户端 SDK
//!
//! 轮式车辆的远程控制客户端，核心是指令/遥测协议客户端和速度
//! 安全状态机：
//!
//! - [`Commander`]：离散控制意图到传输调用的映射（fire-and-forget）
//! - [`TelemetryPoller`](poller::TelemetryPoller)：按固定节拍查询
//!   速度的后台线程，支持协作式取消
//! - [`SafetyMonitor`]：超限警告 + 宽限期 + 强制停车的状态机
//! - [`Rover`]：面向调用方的外观，由 [`RoverBuilder`] 构建
//!
//! # 使用示例
//!
//! ```rust,no_run
//! use rover_client::{RoverBuilder, SafetyEvent};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut rover = RoverBuilder::new().host("192.168.137.75").build()?;
//!
//! rover.move_forward()?;
//!
//! rover.start_polling()?;
//! let events = rover.events();
//! if let Ok(event) = events.recv() {
//!     match event {
//!         SafetyEvent::Warning { speed, limit } => {
//!             eprintln!("over limit: {} > {}", speed, limit);
//!         },
//!         SafetyEvent::Violation { .. } => eprintln!("forced stop issued"),
//!         SafetyEvent::StopFailed { reason, .. } => eprintln!("stop failed: {}", reason),
//!     }
//! }
//! rover.stop_polling();
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod commander;
pub mod config;
pub mod error;
pub mod events;
pub mod poller;
pub mod rover;
pub mod safety;

// 重新导出常用类型
pub use builder::RoverBuilder;
pub use commander::Commander;
pub use config::RoverConfig;
pub use error::{ClientError, Result};
pub use events::SafetyEvent;
pub use poller::SpeedSample;
pub use rover::Rover;
pub use safety::{SafetyMonitor, SafetyState, Verdict};

// 底层类型按层导出，调用方一般不需要直接使用
pub use rover_protocol::{Command, ProtocolError, SpeedReading};
pub use rover_transport::{TcpTransport, Transport, TransportError};
