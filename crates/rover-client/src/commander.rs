//! 指令派发器
//!
//! 把离散的控制意图映射为传输调用。除查询外都是 fire-and-forget：
//! 不排队、不重试、不回滚，失败原样上报给调用方。

use std::sync::Arc;

use rover_protocol::{Command, ProtocolError, parse_scalar_reply};
use rover_transport::Transport;
use tracing::trace;

use crate::error::Result;

/// 指令派发器
///
/// 只负责纯指令发送，不持有任何车辆状态。克隆共享同一个传输。
#[derive(Clone)]
pub struct Commander {
    transport: Arc<dyn Transport>,
}

impl Commander {
    /// 创建派发器
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Commander { transport }
    }

    fn dispatch(&self, command: Command) -> Result<()> {
        trace!(%command, "dispatching command");
        self.transport.send(command)?;
        Ok(())
    }

    /// 前进
    pub fn move_forward(&self) -> Result<()> {
        self.dispatch(Command::Forward)
    }

    /// 后退
    pub fn move_backward(&self) -> Result<()> {
        self.dispatch(Command::Backward)
    }

    /// 左转
    pub fn turn_left(&self) -> Result<()> {
        self.dispatch(Command::TurnLeft)
    }

    /// 右转
    pub fn turn_right(&self) -> Result<()> {
        self.dispatch(Command::TurnRight)
    }

    /// 停车
    pub fn stop(&self) -> Result<()> {
        self.dispatch(Command::Stop)
    }

    /// 提高速度挡位
    pub fn increase_speed(&self) -> Result<()> {
        self.dispatch(Command::IncreaseSpeed)
    }

    /// 降低速度挡位
    pub fn decrease_speed(&self) -> Result<()> {
        self.dispatch(Command::DecreaseSpeed)
    }

    /// 查询速度，返回原始应答文本（解析交给调用方）
    pub fn query_speed(&self) -> Result<String> {
        match self.transport.send(Command::QuerySpeed)? {
            Some(reply) => Ok(reply),
            None => Err(ProtocolError::EmptyReply.into()),
        }
    }

    /// 查询前方障碍距离（固件以 cm 上报）
    pub fn query_distance(&self) -> Result<f64> {
        match self.transport.send(Command::QueryDistance)? {
            Some(reply) => Ok(parse_scalar_reply(&reply)?),
            None => Err(ProtocolError::EmptyReply.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use rover_transport::TransportError;
    use std::sync::Mutex;

    /// Mock 传输：记录发送的指令，按脚本应答查询
    struct MockTransport {
        sent: Mutex<Vec<Command>>,
        reply: Option<&'static str>,
        fail: bool,
    }

    impl MockTransport {
        fn new(reply: Option<&'static str>) -> Self {
            MockTransport {
                sent: Mutex::new(Vec::new()),
                reply,
                fail: false,
            }
        }

        fn failing() -> Self {
            MockTransport {
                sent: Mutex::new(Vec::new()),
                reply: None,
                fail: true,
            }
        }
    }

    impl Transport for MockTransport {
        fn send(&self, command: Command) -> std::result::Result<Option<String>, TransportError> {
            if self.fail {
                return Err(TransportError::Timeout);
            }
            self.sent.lock().unwrap().push(command);
            if command.expects_reply() {
                Ok(self.reply.map(str::to_string))
            } else {
                Ok(None)
            }
        }
    }

    #[test]
    fn test_motion_commands_map_to_intents() {
        let transport = Arc::new(MockTransport::new(None));
        let commander = Commander::new(transport.clone());

        commander.move_forward().unwrap();
        commander.move_backward().unwrap();
        commander.turn_left().unwrap();
        commander.turn_right().unwrap();
        commander.stop().unwrap();
        commander.increase_speed().unwrap();
        commander.decrease_speed().unwrap();

        assert_eq!(
            transport.sent.lock().unwrap().as_slice(),
            [
                Command::Forward,
                Command::Backward,
                Command::TurnLeft,
                Command::TurnRight,
                Command::Stop,
                Command::IncreaseSpeed,
                Command::DecreaseSpeed,
            ]
        );
    }

    #[test]
    fn test_query_speed_returns_raw_reply() {
        let transport = Arc::new(MockTransport::new(Some("12.5 cm/s")));
        let commander = Commander::new(transport);
        assert_eq!(commander.query_speed().unwrap(), "12.5 cm/s");
    }

    #[test]
    fn test_query_distance_parses_value() {
        let transport = Arc::new(MockTransport::new(Some("42.5")));
        let commander = Commander::new(transport);
        assert_eq!(commander.query_distance().unwrap(), 42.5);
    }

    #[test]
    fn test_transport_failure_surfaces_to_caller() {
        let commander = Commander::new(Arc::new(MockTransport::failing()));
        assert!(matches!(
            commander.move_forward().unwrap_err(),
            ClientError::Transport(TransportError::Timeout)
        ));
        assert!(commander.query_speed().is_err());
    }
}
