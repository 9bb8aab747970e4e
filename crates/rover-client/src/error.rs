//! 客户端层错误类型定义

use rover_protocol::ProtocolError;
use rover_transport::TransportError;
use thiserror::Error;

/// 客户端层错误类型
#[derive(Error, Debug)]
pub enum ClientError {
    /// 传输层错误（连接失败或超时）
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// 协议解析错误
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// 遥测轮询已在运行
    #[error("Telemetry poller is already running")]
    PollerAlreadyRunning,

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err: ClientError = TransportError::Timeout.into();
        assert!(matches!(err, ClientError::Transport(TransportError::Timeout)));
    }

    #[test]
    fn test_from_protocol_error() {
        let err: ClientError = ProtocolError::EmptyReply.into();
        let msg = format!("{}", err);
        assert!(msg.contains("Empty reply"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClientError>();
    }
}
