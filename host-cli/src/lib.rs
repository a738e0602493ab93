//! # Host CLI
//!
//! 无窗口宿主：以固定帧率驱动 [`action_runtime::ActionPlayer`]，
//! 把演示场景作用于内存中的精灵并输出结果。
//!
//! - [`config`]：配置文件与默认值
//! - [`scenes`]：演示场景
//! - [`runner`]：固定帧率循环

pub mod config;
pub mod runner;
pub mod scenes;

pub use config::{ConfigError, HostConfig, PlayerConfig, SpriteConfig};
pub use runner::{Control, DemoRunner, RunReport};
pub use scenes::Scene;
