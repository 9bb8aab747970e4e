//! REPL 模式（交互式 Shell）
//!
//! rustyline 读取指令行，会话内保持一个 Rover 实例；`watch` 开启
//! 后台遥测轮询，安全事件在每次回到提示符时排空打印。

use anyhow::Result;
use crossbeam_channel::Receiver;
use rover_client::{Rover, SafetyEvent};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::commands::{Direction, dispatch};
use crate::config::CliConfig;

/// REPL 会话（保持车辆连接配置与轮询状态）
struct ReplSession {
    rover: Rover,
    events: Receiver<SafetyEvent>,
}

impl ReplSession {
    fn new(settings: &CliConfig) -> Result<Self> {
        let rover = settings.builder().build()?;
        let events = rover.events();
        Ok(ReplSession { rover, events })
    }

    /// 排空并打印积压的安全事件
    fn drain_events(&self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                SafetyEvent::Warning { speed, limit } => {
                    println!("⚠️  超速警告: {} > {}，请减速", speed, limit);
                },
                SafetyEvent::Violation { speed, limit } => {
                    println!("⛔ 超速持续未缓解: {} > {}，已下发停车", speed, limit);
                },
                SafetyEvent::StopFailed { reason, .. } => {
                    println!("❌ 停车指令发送失败: {}", reason);
                },
            }
        }
    }

    fn handle_line(&mut self, line: &str) -> Result<bool> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(true);
        };

        match word {
            "forward" => self.drive(Direction::Forward),
            "backward" => self.drive(Direction::Backward),
            "left" => self.drive(Direction::Left),
            "right" => self.drive(Direction::Right),
            "stop" => self.drive(Direction::Stop),
            "faster" => self.drive(Direction::Faster),
            "slower" => self.drive(Direction::Slower),
            "speed" => {
                match self.rover.query_speed() {
                    Ok(reading) => println!("速度: {}", reading),
                    Err(e) => println!("❌ 查询失败: {}", e),
                }
            },
            "distance" => {
                match self.rover.query_distance() {
                    Ok(distance) => println!("障碍距离: {} cm", distance),
                    Err(e) => println!("❌ 查询失败: {}", e),
                }
            },
            "watch" => {
                match self.rover.start_polling() {
                    Ok(()) => println!("✅ 遥测轮询已开启"),
                    Err(e) => println!("⚠️  {}", e),
                }
            },
            "unwatch" => {
                self.rover.stop_polling();
                println!("✅ 遥测轮询已停止");
            },
            "status" => {
                println!(
                    "速度: {}  安全状态: {:?}  轮询: {}",
                    self.rover.speed_display(),
                    self.rover.safety_state(),
                    if self.rover.is_polling() { "开" } else { "关" }
                );
            },
            "help" => Self::print_help(),
            "exit" | "quit" => return Ok(false),
            other => println!("⚠️  未知指令 {:?}，输入 help 查看帮助", other),
        }
        Ok(true)
    }

    fn drive(&self, direction: Direction) {
        match dispatch(&self.rover, direction) {
            Ok(()) => println!("✅ 已发送: {:?}", direction),
            Err(e) => println!("❌ 发送失败: {}", e),
        }
    }

    fn print_help() {
        println!("可用指令:");
        println!("  forward / backward / left / right / stop   运动控制");
        println!("  faster / slower                            调整速度挡位");
        println!("  speed / distance                           单次查询");
        println!("  watch / unwatch                            开关遥测轮询");
        println!("  status                                     当前速度与安全状态");
        println!("  exit                                       退出");
    }
}

/// 运行交互式 Shell
pub fn run_repl(settings: &CliConfig) -> Result<()> {
    let mut session = ReplSession::new(settings)?;
    let mut editor = DefaultEditor::new()?;

    println!(
        "Rover Shell - 对端 {}:{}，输入 help 查看指令",
        settings.host, settings.port
    );

    loop {
        session.drain_events();
        match editor.readline("rover> ") {
            Ok(line) => {
                let line = line.trim();
                if !line.is_empty() {
                    let _ = editor.add_history_entry(line);
                }
                if !session.handle_line(line)? {
                    break;
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    session.rover.stop_polling();
    println!("✅ 再见");
    Ok(())
}
