//! 客户端配置
//!
//! 所有参数在构造时固定，会话期间不可变。

use std::time::Duration;

use crate::error::{ClientError, Result};

/// 客户端配置
#[derive(Debug, Clone)]
pub struct RoverConfig {
    /// 对端主机（IP 或主机名）
    pub host: String,
    /// 对端端口
    pub port: u16,
    /// 限速，读数严格大于该值视为超限（等于限速是合规的）
    pub speed_limit: f64,
    /// 警告宽限期：超限持续超过该时长后强制停车
    pub grace_period: Duration,
    /// 遥测轮询间隔
    pub poll_interval: Duration,
    /// 建立连接的超时
    pub connect_timeout: Duration,
    /// 单次读写的超时
    pub io_timeout: Duration,
}

impl Default for RoverConfig {
    fn default() -> Self {
        RoverConfig {
            // ESP32 SoftAP 的默认网关地址，实际部署时按固件上报的 IP 覆盖
            host: "192.168.4.1".to_string(),
            port: 8080,
            speed_limit: 30.0,
            grace_period: Duration::from_secs(5),
            poll_interval: Duration::from_secs(1),
            connect_timeout: Duration::from_secs(3),
            io_timeout: Duration::from_secs(2),
        }
    }
}

impl RoverConfig {
    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(ClientError::Config("host must not be empty".to_string()));
        }
        if !self.speed_limit.is_finite() || self.speed_limit <= 0.0 {
            return Err(ClientError::Config(format!(
                "speed limit must be a positive number, got {}",
                self.speed_limit
            )));
        }
        if self.poll_interval.is_zero() {
            return Err(ClientError::Config(
                "poll interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
