//! # Config 模块
//!
//! 演示宿主的配置。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use std::fs;
use std::path::Path;

use action_runtime::{PlayerState, Point, Size, TimingCurve};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// 允许的日志级别
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 宿主配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// 固定帧率，`dt = 1 / frame_rate`
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// 单次演示的最大帧数
    #[serde(default = "default_max_frames")]
    pub max_frames: u32,

    /// 日志级别（trace/debug/info/warn/error）
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// 播放器配置
    #[serde(default)]
    pub player: PlayerConfig,

    /// 演示精灵的初始状态
    #[serde(default)]
    pub sprite: SpriteConfig,
}

/// 播放器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// 应用到每个演示动作的速度倍率
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// 应用到每个演示动作的缓动曲线
    #[serde(default)]
    pub timing_curve: TimingCurve,

    /// 播放器初始状态
    #[serde(default)]
    pub initial_state: PlayerState,
}

/// 精灵配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteConfig {
    #[serde(default)]
    pub position: Point,

    #[serde(default = "default_sprite_size")]
    pub size: Size,

    #[serde(default = "default_alpha")]
    pub alpha: u8,
}

// 默认值函数
fn default_frame_rate() -> u32 {
    60
}

fn default_max_frames() -> u32 {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_speed() -> f32 {
    1.0
}

fn default_sprite_size() -> Size {
    Size::new(64, 64)
}

fn default_alpha() -> u8 {
    255
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            max_frames: default_max_frames(),
            log_level: default_log_level(),
            player: PlayerConfig::default(),
            sprite: SpriteConfig::default(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            timing_curve: TimingCurve::default(),
            initial_state: PlayerState::default(),
        }
    }
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            position: Point::zero(),
            size: default_sprite_size(),
            alpha: default_alpha(),
        }
    }
}

impl HostConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!(path = %path.display(), "配置文件加载成功");
                    config
                }
                Err(e) => {
                    warn!(error = %e, "配置文件解析失败，使用默认配置");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(error = %e, "配置文件读取失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// 每帧时长（秒）
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 {
            return Err(ConfigError::ValidationFailed(
                "frame_rate 必须大于 0".to_string(),
            ));
        }

        if self.max_frames == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_frames 必须大于 0".to_string(),
            ));
        }

        if !(self.player.speed > 0.0 && self.player.speed.is_finite()) {
            return Err(ConfigError::ValidationFailed(format!(
                "播放速度必须为正数: {}",
                self.player.speed
            )));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::ValidationFailed(format!(
                "未知的日志级别: {}",
                self.log_level
            )));
        }

        Ok(())
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HostConfig::default();
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.max_frames, 3600);
        assert_eq!(config.player.speed, 1.0);
        assert_eq!(config.player.initial_state, PlayerState::Running);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "frame_rate": 30, "player": { "timing_curve": "quad_ease_out" } }"#;
        let config: HostConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.max_frames, 3600);
        assert_eq!(config.player.timing_curve, TimingCurve::QuadEaseOut);
        assert_eq!(config.sprite.alpha, 255);
        assert!((config.frame_dt() - 1.0 / 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_validation() {
        let mut config = HostConfig::default();

        config.frame_rate = 0;
        assert!(config.validate().is_err());
        config.frame_rate = 60;

        config.max_frames = 0;
        assert!(config.validate().is_err());
        config.max_frames = 10;

        config.player.speed = 0.0;
        assert!(config.validate().is_err());
        config.player.speed = 2.0;

        config.log_level = "verbose".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));
        config.log_level = "DEBUG".to_string();
        assert!(config.validate().is_ok());
    }
}
