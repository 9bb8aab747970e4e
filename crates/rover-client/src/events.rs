//! 安全事件
//!
//! 安全监控产生的通知通过 crossbeam 通道交给调用方，核心不假设
//! 任何展示方式（弹窗、日志、指示灯都由上层决定）。

/// 安全事件
#[derive(Debug, Clone, PartialEq)]
pub enum SafetyEvent {
    /// 首次超限警告（每个超限片段只发一次）
    Warning {
        /// 触发警告的读数
        speed: f64,
        /// 配置的限速
        limit: f64,
    },

    /// 宽限期耗尽，已下发强制停车
    Violation {
        /// 触发停车的读数
        speed: f64,
        /// 配置的限速
        limit: f64,
    },

    /// 强制停车指令本身发送失败（对端不可达）
    ///
    /// 与 [`SafetyEvent::Violation`] 分开上报：监控已经尝试停车，
    /// 但指令没有到达对端。
    StopFailed {
        /// 触发停车的读数
        speed: f64,
        /// 失败原因
        reason: String,
    },
}
