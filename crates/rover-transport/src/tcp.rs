//! TCP 传输实现
//!
//! 每次 `send` 打开一条到对端的新连接（原始固件按连接逐条处理
//! 指令），连接、读、写都有超时上界，任何退出路径都会关闭连接。

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use rover_protocol::{Command, MAX_REPLY_LEN};
use tracing::trace;

use crate::{Transport, TransportError};

/// 基于 TCP 的传输
///
/// 地址在构造时解析一次，之后每次请求直接使用。
#[derive(Debug, Clone)]
pub struct TcpTransport {
    addr: SocketAddr,
    connect_timeout: Duration,
    io_timeout: Duration,
}

impl TcpTransport {
    /// 创建传输
    ///
    /// # 参数
    ///
    /// - `host` / `port`: 对端地址（IP 或主机名）
    /// - `connect_timeout`: 建立连接的时限
    /// - `io_timeout`: 单次读或写的时限
    pub fn new(
        host: &str,
        port: u16,
        connect_timeout: Duration,
        io_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let addr_text = format!("{}:{}", host, port);
        let addr = (host, port)
            .to_socket_addrs()
            .map_err(|e| TransportError::InvalidAddress {
                addr: addr_text.clone(),
                reason: e.to_string(),
            })?
            .next()
            .ok_or(TransportError::InvalidAddress {
                addr: addr_text,
                reason: "no address resolved".to_string(),
            })?;

        Ok(TcpTransport {
            addr,
            connect_timeout,
            io_timeout,
        })
    }

    /// 对端地址
    pub fn peer_addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Transport for TcpTransport {
    fn send(&self, command: Command) -> Result<Option<String>, TransportError> {
        trace!(%command, peer = %self.addr, "opening connection");

        let mut stream = TcpStream::connect_timeout(&self.addr, self.connect_timeout)?;
        stream.set_write_timeout(Some(self.io_timeout))?;
        stream.set_read_timeout(Some(self.io_timeout))?;

        stream.write_all(command.wire_line().as_bytes())?;

        if !command.expects_reply() {
            // stream 在此处 drop，连接关闭
            return Ok(None);
        }

        // 单次有界读取，应答不会超过一个缓冲区
        let mut buf = [0u8; MAX_REPLY_LEN];
        let n = stream.read(&mut buf)?;
        if n == 0 {
            return Err(TransportError::Connection(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "peer closed connection without reply",
            )));
        }

        let reply = String::from_utf8_lossy(&buf[..n]).trim().to_string();
        trace!(%command, %reply, "received reply");
        Ok(Some(reply))
    }
}
