//! # Rover 传输层
//!
//! 车辆控制器的传输抽象：每次请求打开一条新连接，写入一条指令，
//! 查询类指令再读取一条应答，然后关闭连接。对端固件的 accept
//! 循环一次只服务一个客户端，因此不做连接复用或管线化。
//!
//! [`Transport`] trait 是客户端层与具体后端之间的接缝，
//! 测试可以注入内存实现替代真实 TCP。

use std::io;

use rover_protocol::Command;
use thiserror::Error;

pub mod tcp;

pub use tcp::TcpTransport;

/// 传输层统一错误类型
#[derive(Error, Debug)]
pub enum TransportError {
    /// 对端不可达、拒绝连接或连接中途断开
    #[error("Connection error: {0}")]
    Connection(#[source] io::Error),

    /// 连接或读写在配置的时限内未完成
    #[error("Operation timed out")]
    Timeout,

    /// 对端地址无法解析
    #[error("Invalid peer address {addr:?}: {reason}")]
    InvalidAddress {
        /// 原始的 host:port 文本
        addr: String,
        /// 失败原因
        reason: String,
    },
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TransportError::Timeout,
            _ => TransportError::Connection(err),
        }
    }
}

/// 传输接口
///
/// 契约：发送一条指令；查询类指令返回 `Some(应答文本)`（已去除
/// 首尾空白），其余指令返回 `None`。每次调用都是独立的单次尝试，
/// 失败直接上报，不在内部重试。
pub trait Transport: Send + Sync {
    fn send(&self, command: Command) -> Result<Option<String>, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mapping() {
        let timed_out = io::Error::new(io::ErrorKind::TimedOut, "read timed out");
        assert!(matches!(
            TransportError::from(timed_out),
            TransportError::Timeout
        ));

        // Linux 上 SO_RCVTIMEO 到期返回 WouldBlock
        let would_block = io::Error::new(io::ErrorKind::WouldBlock, "resource unavailable");
        assert!(matches!(
            TransportError::from(would_block),
            TransportError::Timeout
        ));

        let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            TransportError::from(refused),
            TransportError::Connection(_)
        ));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransportError>();
    }
}
