//! 速度安全监控
//!
//! 由速度读数驱动的状态机：首次超限发出警告并启动宽限计时，
//! 超限持续到宽限耗尽则强制停车；任何合规读数（不大于限速）
//! 立即回到正常状态并清除警告。
//!
//! # 设计说明
//!
//! - 状态机本身不做任何 IO：`process` 只返回 [`Verdict`]，
//!   停车指令和事件通知由轮询线程根据裁决执行。
//! - 时刻由调用方注入（`now: Instant`），时间逻辑可以用
//!   合成时钟确定性地测试。
//! - 宽限计时锚定在本片段**第一个**超限读数，片段内后续的
//!   超限读数不会重置计时。
//! - `Stopped` 不是驻留状态：强制停车在一次评估内完成并立即
//!   回到 `Normal`，持续超限的车辆会在下一个读数重新触发警告。
//!   这保留了观察到的原始行为（实际效果只是一拍延迟，而非
//!   刻意的冷却期），是否改成驻留的停车模式留给产品侧评审。

use std::time::{Duration, Instant};

/// 安全状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyState {
    /// 正常：最近一个有效读数不超限
    Normal,
    /// 已警告：处于超限片段中，宽限计时进行中
    Warned {
        /// 本片段第一个超限读数的时刻
        since: Instant,
    },
    /// 已停车：仅在强制停车的那次评估内出现，随即回到 Normal
    Stopped,
}

/// 单个读数的处理裁决
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// 读数合规，状态回到（或保持）Normal
    Compliant,
    /// 本片段首次超限，需要发出警告
    Warn,
    /// 仍在超限片段内，宽限未耗尽，无需动作
    StillWarned,
    /// 宽限已耗尽，需要下发停车并上报违规
    ForceStop,
}

/// 速度安全监控器
///
/// 独占持有 [`SafetyState`]，状态只会被 `process` 修改。
#[derive(Debug)]
pub struct SafetyMonitor {
    limit: f64,
    grace_period: Duration,
    state: SafetyState,
}

impl SafetyMonitor {
    /// 创建监控器，初始状态为 Normal
    pub fn new(limit: f64, grace_period: Duration) -> Self {
        SafetyMonitor {
            limit,
            grace_period,
            state: SafetyState::Normal,
        }
    }

    /// 配置的限速
    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// 配置的宽限期
    pub fn grace_period(&self) -> Duration {
        self.grace_period
    }

    /// 当前状态
    pub fn state(&self) -> SafetyState {
        self.state
    }

    /// 处理一个速度读数
    ///
    /// 等于限速按合规处理，只有严格大于限速才触发警告。
    /// 无法解析的应答不会到达这里，不影响状态。
    pub fn process(&mut self, speed: f64, now: Instant) -> Verdict {
        if speed <= self.limit {
            self.state = SafetyState::Normal;
            return Verdict::Compliant;
        }

        match self.state {
            SafetyState::Normal | SafetyState::Stopped => {
                self.state = SafetyState::Warned { since: now };
                Verdict::Warn
            },
            SafetyState::Warned { since } => {
                if now.duration_since(since) >= self.grace_period {
                    // Stopped 在同一次评估内进入又退出：警告标志清除，
                    // 下一个超限读数将作为新片段重新警告
                    self.state = SafetyState::Normal;
                    Verdict::ForceStop
                } else {
                    Verdict::StillWarned
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: f64 = 30.0;
    const GRACE: Duration = Duration::from_secs(5);

    /// 合成时钟：t0 + 秒偏移
    fn clock() -> impl Fn(u64) -> Instant {
        let t0 = Instant::now();
        move |secs| t0 + Duration::from_secs(secs)
    }

    #[test]
    fn test_compliant_reading_is_normal_from_any_state() {
        let at = clock();

        // 从 Normal
        let mut monitor = SafetyMonitor::new(LIMIT, GRACE);
        assert_eq!(monitor.process(29.0, at(0)), Verdict::Compliant);
        assert_eq!(monitor.state(), SafetyState::Normal);

        // 从 Warned
        let mut monitor = SafetyMonitor::new(LIMIT, GRACE);
        monitor.process(35.0, at(0));
        assert_eq!(monitor.process(28.0, at(1)), Verdict::Compliant);
        assert_eq!(monitor.state(), SafetyState::Normal);
    }

    #[test]
    fn test_equal_to_limit_is_compliant() {
        let at = clock();
        let mut monitor = SafetyMonitor::new(LIMIT, GRACE);
        assert_eq!(monitor.process(30.0, at(0)), Verdict::Compliant);
        assert_eq!(monitor.state(), SafetyState::Normal);
    }

    #[test]
    fn test_first_over_limit_warns_exactly_once() {
        let at = clock();
        let mut monitor = SafetyMonitor::new(LIMIT, GRACE);

        assert_eq!(monitor.process(32.0, at(0)), Verdict::Warn);
        assert_eq!(monitor.state(), SafetyState::Warned { since: at(0) });

        // 宽限内的后续超限读数不再产生警告
        assert_eq!(monitor.process(33.0, at(1)), Verdict::StillWarned);
        assert_eq!(monitor.process(40.0, at(2)), Verdict::StillWarned);
    }

    #[test]
    fn test_grace_clock_anchored_at_first_over_limit_reading() {
        let at = clock();
        let mut monitor = SafetyMonitor::new(LIMIT, GRACE);

        monitor.process(32.0, at(0));
        // 中间的超限读数不重置计时
        monitor.process(45.0, at(3));
        assert_eq!(monitor.state(), SafetyState::Warned { since: at(0) });

        // 距第一个超限读数满 5 秒即停车
        assert_eq!(monitor.process(32.0, at(5)), Verdict::ForceStop);
    }

    #[test]
    fn test_continuous_over_limit_stops_when_grace_elapses() {
        // 持续超限 [32,32,32,32,32,32]，t=0..5：t=5 停车
        let at = clock();
        let mut monitor = SafetyMonitor::new(LIMIT, GRACE);

        assert_eq!(monitor.process(32.0, at(0)), Verdict::Warn);
        for t in 1..=4 {
            assert_eq!(monitor.process(32.0, at(t)), Verdict::StillWarned);
        }
        assert_eq!(monitor.process(32.0, at(5)), Verdict::ForceStop);

        // 停车后立即回到 Normal
        assert_eq!(monitor.state(), SafetyState::Normal);
    }

    #[test]
    fn test_compliant_reading_resets_episode() {
        // [32,33,31,34,29,35,36]，t=0..6：
        // t=0 警告；t=4 的 29 清除警告；t=5 的 35 开启新片段；
        // t=6 距新片段只过了 1 秒，不停车
        let at = clock();
        let mut monitor = SafetyMonitor::new(LIMIT, GRACE);

        assert_eq!(monitor.process(32.0, at(0)), Verdict::Warn);
        assert_eq!(monitor.process(33.0, at(1)), Verdict::StillWarned);
        assert_eq!(monitor.process(31.0, at(2)), Verdict::StillWarned);
        assert_eq!(monitor.process(34.0, at(3)), Verdict::StillWarned);
        assert_eq!(monitor.process(29.0, at(4)), Verdict::Compliant);
        assert_eq!(monitor.process(35.0, at(5)), Verdict::Warn);
        assert_eq!(monitor.state(), SafetyState::Warned { since: at(5) });
        assert_eq!(monitor.process(36.0, at(6)), Verdict::StillWarned);
    }

    #[test]
    fn test_new_episode_detected_after_forced_stop() {
        let at = clock();
        let mut monitor = SafetyMonitor::new(LIMIT, GRACE);

        monitor.process(32.0, at(0));
        for t in 1..=4 {
            monitor.process(32.0, at(t));
        }
        assert_eq!(monitor.process(32.0, at(5)), Verdict::ForceStop);

        // 车辆若仍然超限，下一个读数重新警告（新片段，新的计时起点）
        assert_eq!(monitor.process(36.0, at(6)), Verdict::Warn);
        assert_eq!(monitor.state(), SafetyState::Warned { since: at(6) });
        for t in 7..=10 {
            assert_eq!(monitor.process(36.0, at(t)), Verdict::StillWarned);
        }
        assert_eq!(monitor.process(36.0, at(11)), Verdict::ForceStop);
    }

    #[test]
    fn test_transient_stopped_state_resumes_from_normal() {
        // 正常流程不会驻留在 Stopped，这里直接构造该状态以覆盖
        // 对应分支：超限读数按新片段处理
        let at = clock();
        let mut monitor = SafetyMonitor::new(LIMIT, GRACE);
        monitor.state = SafetyState::Stopped;

        assert_eq!(monitor.process(35.0, at(0)), Verdict::Warn);
        assert_eq!(monitor.state(), SafetyState::Warned { since: at(0) });
    }
}
