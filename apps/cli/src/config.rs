//! CLI 配置文件
//!
//! TOML 格式，存放在用户配置目录（`rover-cli/config.toml`）。
//! 缺省文件时使用内置默认值，命令行参数优先于文件。

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use rover_client::RoverBuilder;
use serde::{Deserialize, Serialize};

/// CLI 持久化配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// 对端主机
    pub host: String,
    /// 对端端口
    pub port: u16,
    /// 限速
    pub speed_limit: f64,
    /// 警告宽限期（秒）
    pub grace_period_secs: u64,
    /// 轮询间隔（毫秒）
    pub poll_interval_ms: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            host: "192.168.4.1".to_string(),
            port: 8080,
            speed_limit: 30.0,
            grace_period_secs: 5,
            poll_interval_ms: 1000,
        }
    }
}

impl CliConfig {
    /// 配置文件路径
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rover-cli").join("config.toml"))
    }

    /// 读取配置，文件不存在时返回默认值
    pub fn load() -> Result<Self> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// 写回配置文件
    pub fn save(&self) -> Result<()> {
        let path = Self::path().context("no config directory on this platform")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let text = toml::to_string_pretty(self)?;
        fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// 构造对应的 RoverBuilder
    pub fn builder(&self) -> RoverBuilder {
        RoverBuilder::new()
            .host(self.host.clone())
            .port(self.port)
            .speed_limit(self.speed_limit)
            .grace_period(Duration::from_secs(self.grace_period_secs))
            .poll_interval(Duration::from_millis(self.poll_interval_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = CliConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: CliConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.host, config.host);
        assert_eq!(parsed.port, config.port);
        assert_eq!(parsed.speed_limit, config.speed_limit);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: CliConfig = toml::from_str("host = \"10.1.2.3\"").unwrap();
        assert_eq!(parsed.host, "10.1.2.3");
        assert_eq!(parsed.port, 8080);
        assert_eq!(parsed.poll_interval_ms, 1000);
    }
}
