//! # action-demo
//!
//! 以固定帧率运行动作演示场景，输出每个场景结束时的精灵状态。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p host-cli -- intro
//! cargo run -p host-cli -- --all --speed 2 --curve bounce_ease_out
//! cargo run -p host-cli -- fade-out --pause-at 10 --resume-at 40 --log-level debug
//! cargo run -p host-cli -- --list
//! ```

use std::path::PathBuf;

use action_runtime::TimingCurve;
use anyhow::{Context, Result};
use clap::Parser;
use host_cli::{Control, DemoRunner, HostConfig, Scene};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "action-demo")]
#[command(about = "动作调度演示：以固定帧率驱动 ActionPlayer")]
#[command(version)]
struct Cli {
    /// 要运行的场景（默认：intro）
    #[arg(value_enum)]
    scenes: Vec<Scene>,

    /// 运行全部场景
    #[arg(long)]
    all: bool,

    /// 列出全部场景后退出
    #[arg(long)]
    list: bool,

    /// 配置文件路径
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// 把最终生效的配置写入文件
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// 帧率
    #[arg(long)]
    frame_rate: Option<u32>,

    /// 单个场景的最大帧数
    #[arg(long)]
    max_frames: Option<u32>,

    /// 速度倍率
    #[arg(long)]
    speed: Option<f32>,

    /// 缓动曲线（如 quad_ease_out）
    #[arg(long, value_parser = parse_curve)]
    curve: Option<TimingCurve>,

    /// 日志级别（trace/debug/info/warn/error）
    #[arg(long)]
    log_level: Option<String>,

    /// 在指定帧暂停
    #[arg(long)]
    pause_at: Option<u32>,

    /// 在指定帧恢复
    #[arg(long)]
    resume_at: Option<u32>,

    /// 在指定帧停止（倒带）
    #[arg(long)]
    stop_at: Option<u32>,

    /// 在指定帧取消
    #[arg(long)]
    cancel_at: Option<u32>,
}

fn parse_curve(s: &str) -> std::result::Result<TimingCurve, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|_| format!("未知的缓动曲线: {s}"))
}

impl Cli {
    /// 命令行覆盖配置文件
    fn apply(&self, config: &mut HostConfig) {
        if let Some(frame_rate) = self.frame_rate {
            config.frame_rate = frame_rate;
        }
        if let Some(max_frames) = self.max_frames {
            config.max_frames = max_frames;
        }
        if let Some(speed) = self.speed {
            config.player.speed = speed;
        }
        if let Some(curve) = self.curve {
            config.player.timing_curve = curve;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
    }

    fn controls(&self) -> Vec<(u32, Control)> {
        [
            (self.pause_at, Control::Pause),
            (self.resume_at, Control::Resume),
            (self.stop_at, Control::Stop),
            (self.cancel_at, Control::Cancel),
        ]
        .into_iter()
        .filter_map(|(frame, control)| frame.map(|frame| (frame, control)))
        .collect()
    }

    fn selected_scenes(&self) -> Vec<Scene> {
        if self.all {
            Scene::ALL.to_vec()
        } else if self.scenes.is_empty() {
            vec![Scene::Intro]
        } else {
            self.scenes.clone()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list {
        for scene in Scene::ALL {
            println!("{scene}");
        }
        return Ok(());
    }

    let config_exists = cli.config.exists();
    let mut config = HostConfig::load(&cli.config);
    cli.apply(&mut config);
    config.validate().context("配置无效")?;

    let level: tracing::Level = config
        .log_level
        .parse()
        .with_context(|| format!("无法解析日志级别: {}", config.log_level))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    if !config_exists {
        warn!(path = %cli.config.display(), "配置文件不存在，使用默认配置");
    }
    if let Some(path) = &cli.save_config {
        config
            .save(path)
            .with_context(|| format!("无法保存配置到 {}", path.display()))?;
        info!(path = %path.display(), "配置已保存");
    }

    let runner = cli
        .controls()
        .into_iter()
        .fold(DemoRunner::new(config), |runner, (frame, control)| {
            runner.with_control(frame, control)
        });

    for scene in cli.selected_scenes() {
        let report = runner
            .run(scene)
            .with_context(|| format!("场景 {scene} 运行失败"))?;
        println!("{report}");
    }

    Ok(())
}
