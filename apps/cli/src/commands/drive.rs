//! One-shot 指令：运动、调速和单次查询

use anyhow::Result;
use clap::{Args, ValueEnum};
use rover_client::Rover;

use crate::config::CliConfig;

/// 运动/调速指令
#[derive(Args, Debug)]
pub struct DriveCommand {
    /// 要发送的指令
    #[arg(value_enum)]
    pub direction: Direction,
}

/// 可用的驾驶指令
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Direction {
    /// 前进
    Forward,
    /// 后退
    Backward,
    /// 左转
    Left,
    /// 右转
    Right,
    /// 停车
    Stop,
    /// 提高速度挡位
    Faster,
    /// 降低速度挡位
    Slower,
}

impl DriveCommand {
    pub fn run(&self, settings: &CliConfig) -> Result<()> {
        let rover = settings.builder().build()?;
        dispatch(&rover, self.direction)?;
        println!("✅ 已发送: {:?}", self.direction);
        Ok(())
    }
}

/// 查询一次当前速度
pub fn run_speed(settings: &CliConfig) -> Result<()> {
    let rover = settings.builder().build()?;
    let reading = rover.query_speed()?;
    println!("速度: {}", reading);
    Ok(())
}

/// 查询一次前方障碍距离
pub fn run_distance(settings: &CliConfig) -> Result<()> {
    let rover = settings.builder().build()?;
    let distance = rover.query_distance()?;
    println!("障碍距离: {} cm", distance);
    Ok(())
}

/// 共享的指令解发逻辑，REPL 也走这里
pub fn dispatch(rover: &Rover, direction: Direction) -> rover_client::Result<()> {
    match direction {
        Direction::Forward => rover.move_forward(),
        Direction::Backward => rover.move_backward(),
        Direction::Left => rover.turn_left(),
        Direction::Right => rover.turn_right(),
        Direction::Stop => rover.stop(),
        Direction::Faster => rover.increase_speed(),
        Direction::Slower => rover.decrease_speed(),
    }
}
