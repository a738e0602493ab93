//! # Error 模块
//!
//! 定义 action-runtime 中使用的错误类型。
//!
//! 找不到动作（`cancel_action` / `action_running`）属于正常控制流，
//! 以 `bool` 返回，不在此处建模。

use thiserror::Error;

/// 动作错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    /// 尝试运行或入队空动作
    #[error("无法入队：动作为空（NullAction）")]
    NullAction,

    /// 纹理动画没有任何帧
    #[error("纹理动画至少需要一帧")]
    EmptyFrames,

    /// 无效的帧间隔
    #[error("无效的帧间隔 {interval}，必须为有限正数")]
    InvalidInterval { interval: f32 },
}

/// Result 类型别名
pub type ActionResult<T> = Result<T, ActionError>;
