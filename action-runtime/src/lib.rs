//! # Action Runtime
//!
//! 逐帧驱动的动作调度库。
//!
//! ## 架构概述
//!
//! `action-runtime` 不依赖任何渲染引擎。宿主每帧调用一次
//! [`ActionPlayer::update`]，动作通过 [`Drawable`] 把计算结果写回渲染对象：
//!
//! ```text
//! Host game loop
//!   │ update(dt)
//!   ▼
//! ActionPlayer ──(PlayerState, dt)──► ActionQueue ──► Action::next_frame / pause / rewind
//!   │                                      │                    │
//!   │◄──── 空队列进入待移除列表 ───────────┘                    ▼
//!   │                                                  Drawable（alpha / 位置 / 纹理）
//! ```
//!
//! ## 核心类型
//!
//! - [`Action`]：封闭的动作集合（叶子动作与组合动作）
//! - [`ActionObject`]：动作的统一接口
//! - [`ActionQueue`]：入队动作与完成回调
//! - [`ActionPlayer`]：按名称管理队列，处理取消与延迟移除
//! - [`TimingCurve`]：缓动曲线
//!
//! ## 使用示例
//!
//! ```ignore
//! use action_runtime::{Action, ActionPlayer, FadeAlphaAction, MoveByAction, Point};
//!
//! let slide_in = Action::group(vec![
//!     MoveByAction::new(sprite.clone(), Point::new(200, 0), 0.5).into(),
//!     FadeAlphaAction::fade_in(sprite.clone(), 0.5).into(),
//! ]);
//!
//! let mut player = ActionPlayer::new();
//! player.run_action_named(&slide_in, "slide_in")?;
//!
//! while player.update(1.0 / 60.0) {
//!     render(&sprite);
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`action`]：动作定义
//! - [`queue`]：动作队列
//! - [`player`]：播放器
//! - [`timing`]：缓动曲线
//! - [`timer`]：逻辑时钟
//! - [`target`]：渲染对象抽象
//! - [`geometry`]：坐标与尺寸
//! - [`error`]：错误类型

pub mod action;
pub mod error;
pub mod geometry;
pub mod player;
pub mod queue;
pub mod target;
pub mod timer;
pub mod timing;

// 重导出核心类型
pub use action::{
    Action, ActionBase, ActionObject, AnimateTexturesAction, CallbackAction, CallbackFn,
    FadeAlphaAction, FadeMode, FrameState, GroupAction, MoveByAction, NullAction,
    RepeatForAction, RepeatForeverAction, ReversedAction, ScaleByAction, SequenceAction,
    WaitForDurationAction,
};
pub use error::{ActionError, ActionResult};
pub use geometry::{Point, Size};
pub use player::{ActionPlayer, PlayerState};
pub use queue::{ActionQueue, CompletionFn};
pub use target::{ALPHA_OPAQUE, ALPHA_TRANSPARENT, Drawable, DrawableRef, Sprite, SpriteState, Texture};
pub use timer::Timer;
pub use timing::{TimingCurve, TimingCurveFn};
