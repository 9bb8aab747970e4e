//! # Rover 协议层
//!
//! 车辆控制器使用基于行的 ASCII 协议：每条指令是一个固定的命令字
//! 加 `\n` 终止符。只有查询类指令（`get_speed` / `get_distance`）
//! 会产生应答，应答是一个十进制数值，后面可能跟单位后缀。
//!
//! 本 crate 只负责指令字和应答文本的编解码，不涉及任何 IO。

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// 查询应答的最大长度（字节）
///
/// 与固件的单次 `println` 应答匹配，超出部分不读取。
pub const MAX_REPLY_LEN: usize = 1024;

/// 协议层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// 应答为空（对端关闭连接或只发送了空白字符）
    #[error("Empty reply from peer")]
    EmptyReply,

    /// 应答的首个字段不是十进制数值
    #[error("Invalid numeric token in reply: {token:?}")]
    InvalidNumber {
        /// 无法解析的字段
        token: String,
    },

    /// 未知的命令字
    #[error("Unknown command token: {token:?}")]
    UnknownCommand {
        /// 输入的命令字
        token: String,
    },
}

// ============================================================================
// 控制指令
// ============================================================================

/// 控制指令
///
/// 每个变体对应一个固定的命令字，按原样发送给车辆控制器。
/// 指令本身不携带参数，也没有超出命令字之外的标识。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// 前进
    Forward,
    /// 后退
    Backward,
    /// 左转
    TurnLeft,
    /// 右转
    TurnRight,
    /// 停车
    Stop,
    /// 提高速度挡位
    IncreaseSpeed,
    /// 降低速度挡位
    DecreaseSpeed,
    /// 查询当前速度（期待应答）
    QuerySpeed,
    /// 查询前方障碍距离（期待应答）
    QueryDistance,
}

impl Command {
    /// 固定的命令字
    pub fn token(self) -> &'static str {
        match self {
            Command::Forward => "forward",
            Command::Backward => "backward",
            Command::TurnLeft => "left",
            Command::TurnRight => "right",
            Command::Stop => "stop",
            Command::IncreaseSpeed => "increase_speed",
            Command::DecreaseSpeed => "decrease_speed",
            Command::QuerySpeed => "get_speed",
            Command::QueryDistance => "get_distance",
        }
    }

    /// 完整的指令行（命令字 + `\n`），可直接写入 socket
    pub fn wire_line(self) -> String {
        format!("{}\n", self.token())
    }

    /// 是否为查询类指令（需要读取一条应答）
    pub fn expects_reply(self) -> bool {
        matches!(self, Command::QuerySpeed | Command::QueryDistance)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Command::Forward),
            "backward" => Ok(Command::Backward),
            "left" => Ok(Command::TurnLeft),
            "right" => Ok(Command::TurnRight),
            "stop" => Ok(Command::Stop),
            "increase_speed" => Ok(Command::IncreaseSpeed),
            "decrease_speed" => Ok(Command::DecreaseSpeed),
            "get_speed" => Ok(Command::QuerySpeed),
            "get_distance" => Ok(Command::QueryDistance),
            _ => Err(ProtocolError::UnknownCommand {
                token: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// 查询应答解析
// ============================================================================

/// 速度读数
///
/// 从 `get_speed` 应答解析：首个空白分隔字段是十进制数值，
/// 其余部分（如果有）作为单位后缀保留，仅用于显示。
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedReading {
    /// 数值部分
    pub value: f64,
    /// 单位后缀（如 "cm/s"），固件可能不发送
    pub unit: Option<String>,
}

impl SpeedReading {
    /// 解析一条查询应答
    ///
    /// 应答已由传输层去除首尾空白。固件对未知指令会应答
    /// `"Unknown command."` 之类的文本，此处作为解析失败返回，
    /// 不会被误认为读数。
    pub fn parse(reply: &str) -> Result<Self, ProtocolError> {
        let mut fields = reply.split_whitespace();
        let token = fields.next().ok_or(ProtocolError::EmptyReply)?;
        let value = token
            .parse::<f64>()
            .map_err(|_| ProtocolError::InvalidNumber {
                token: token.to_string(),
            })?;

        let unit = {
            let rest: Vec<&str> = fields.collect();
            if rest.is_empty() {
                None
            } else {
                Some(rest.join(" "))
            }
        };

        Ok(SpeedReading { value, unit })
    }
}

impl fmt::Display for SpeedReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{} {}", self.value, unit),
            None => write!(f, "{}", self.value),
        }
    }
}

/// 解析只关心数值的查询应答（如 `get_distance`）
pub fn parse_scalar_reply(reply: &str) -> Result<f64, ProtocolError> {
    SpeedReading::parse(reply).map(|reading| reading.value)
}
