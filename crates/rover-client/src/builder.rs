//! Rover Builder
//!
//! 提供链式 API 创建 [`Rover`] 实例，默认使用每请求一连的
//! TCP 传输，测试或自定义后端可以注入自己的 [`Transport`]。

use std::sync::Arc;
use std::time::Duration;

use rover_transport::{TcpTransport, Transport};

use crate::config::RoverConfig;
use crate::error::Result;
use crate::rover::Rover;

/// Rover Builder
///
/// # 示例
///
/// ```rust,no_run
/// use rover_client::RoverBuilder;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let rover = RoverBuilder::new()
///     .host("192.168.137.75")
///     .port(8080)
///     .speed_limit(30.0)
///     .grace_period(Duration::from_secs(5))
///     .poll_interval(Duration::from_secs(1))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct RoverBuilder {
    config: RoverConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl RoverBuilder {
    /// 创建新的 Builder
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置对端主机（IP 或主机名）
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// 设置对端端口（默认: 8080）
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// 设置限速（默认: 30.0）
    pub fn speed_limit(mut self, limit: f64) -> Self {
        self.config.speed_limit = limit;
        self
    }

    /// 设置警告宽限期（默认: 5 秒）
    pub fn grace_period(mut self, grace: Duration) -> Self {
        self.config.grace_period = grace;
        self
    }

    /// 设置轮询间隔（默认: 1 秒）
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// 设置连接超时（默认: 3 秒）
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// 设置单次读写超时（默认: 2 秒）
    pub fn io_timeout(mut self, timeout: Duration) -> Self {
        self.config.io_timeout = timeout;
        self
    }

    /// 注入自定义传输（替代默认的 TCP 传输）
    ///
    /// 注入后 `host` / `port` / 超时参数不再参与传输构造。
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// 构建 [`Rover`] 实例
    pub fn build(self) -> Result<Rover> {
        self.config.validate()?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(TcpTransport::new(
                &self.config.host,
                self.config.port,
                self.config.connect_timeout,
                self.config.io_timeout,
            )?),
        };

        Ok(Rover::new(self.config, transport))
    }
}

impl Default for RoverBuilder {
    fn default() -> Self {
        RoverBuilder {
            config: RoverConfig::default(),
            transport: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_builder_defaults() {
        let builder = RoverBuilder::new();
        assert_eq!(builder.config.port, 8080);
        assert_eq!(builder.config.speed_limit, 30.0);
        assert_eq!(builder.config.grace_period, Duration::from_secs(5));
        assert_eq!(builder.config.poll_interval, Duration::from_secs(1));
        assert!(builder.transport.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let builder = RoverBuilder::new()
            .host("10.0.0.2")
            .port(9000)
            .speed_limit(25.0)
            .grace_period(Duration::from_secs(3));

        assert_eq!(builder.config.host, "10.0.0.2");
        assert_eq!(builder.config.port, 9000);
        assert_eq!(builder.config.speed_limit, 25.0);
        assert_eq!(builder.config.grace_period, Duration::from_secs(3));
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let result = RoverBuilder::new().speed_limit(-1.0).build();
        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}
