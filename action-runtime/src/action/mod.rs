//! # Action 模块
//!
//! 可调度的动作：随时间修改渲染对象的最小工作单元。
//!
//! ## 状态机
//!
//! ```text
//! Playing ──next_frame/prev_frame──► Completed
//!    ▲ │
//!    │ pause()/resume()  （冻结内部时钟，不经过步进函数）
//!    └─┘
//! rewind() ──► 回到首帧之前，并把目标恢复为快照值
//! ```
//!
//! ## 核心类型
//!
//! - [`FrameState`]：每次步进的结果
//! - [`ActionBase`]：所有动作共有的属性（名称、时长、速度、曲线）
//! - [`ActionObject`]：统一接口
//! - [`Action`]：封闭的动作集合，组合动作以 `Vec<Action>` 持有子动作
//!
//! 调度器入队时调用 [`ActionObject::duplicate`] 复制动作，
//! 调用方手里的原动作不会被队列修改，可以反复入队。

mod animate_textures;
mod callback;
mod fade;
mod group;
mod move_by;
mod null;
mod repeat;
mod reversed;
mod scale_by;
mod sequence;
mod wait;

pub use animate_textures::AnimateTexturesAction;
pub use callback::{CallbackAction, CallbackFn};
pub use fade::{FadeAlphaAction, FadeMode};
pub use group::GroupAction;
pub use move_by::MoveByAction;
pub use null::NullAction;
pub use repeat::{RepeatForAction, RepeatForeverAction};
pub use reversed::ReversedAction;
pub use scale_by::ScaleByAction;
pub use sequence::SequenceAction;
pub use wait::WaitForDurationAction;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::timer::Timer;
use crate::timing::TimingCurve;

/// 单次步进的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrameState {
    /// 继续步进
    #[default]
    Playing,
    /// 冻结
    Paused,
    /// 结束，不应再被步进
    Completed,
}

impl FrameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Playing => "PLAYING",
            Self::Paused => "PAUSED",
            Self::Completed => "COMPLETED",
        }
    }

    pub fn is_completed(&self) -> bool {
        *self == Self::Completed
    }
}

impl std::fmt::Display for FrameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 步进方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

/// 叶子动作一次步进的时间量
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FrameTime {
    /// 限制在 `[0, duration / speed]` 内的实际经过时间
    pub delta: f32,
    /// 乘以速度后的曲线时间，最后一帧恰好等于 `duration`
    pub frame: f32,
    /// 是否已经到达（或越过）终点
    pub finished: bool,
}

/// 推进叶子动作的时钟
///
/// 返回是否为首帧，以及本帧的时间量。首帧启动时钟后同样计入 `dt`。
pub(crate) fn advance_clock(timer: &mut Timer, base: &mut ActionBase, dt: f32) -> (bool, FrameTime) {
    let first = !timer.started();
    if first {
        timer.start();
    }
    timer.advance(dt);
    base.count_frame();
    (first, base.frame_time(timer.elapsed()))
}

/// 所有动作共有的属性
#[derive(Debug, Clone, PartialEq)]
pub struct ActionBase {
    name: String,
    duration: f32,
    speed: f32,
    timing_curve: TimingCurve,
    status: FrameState,
    /// 诊断用的步进计数
    elapsed_frames: f32,
}

impl ActionBase {
    /// 创建基础属性
    ///
    /// 负数或 NaN 时长按 0 处理。
    pub fn new(duration: f32) -> Self {
        if duration.is_nan() || duration < 0.0 {
            warn!(duration, "invalid duration, using 0");
        }
        Self {
            name: String::new(),
            duration: duration.max(0.0),
            speed: 1.0,
            timing_curve: TimingCurve::default(),
            status: FrameState::Playing,
            elapsed_frames: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// 设置速度倍率
    ///
    /// 非正数或非有限值被拒绝，返回 `false`。
    pub fn set_speed(&mut self, speed: f32) -> bool {
        if !(speed > 0.0 && speed.is_finite()) {
            warn!(action = %self.name, speed, "rejecting non-positive speed");
            return false;
        }
        self.speed = speed;
        true
    }

    pub fn timing_curve(&self) -> TimingCurve {
        self.timing_curve
    }

    pub fn set_timing_curve(&mut self, curve: TimingCurve) {
        self.timing_curve = curve;
    }

    pub fn status(&self) -> FrameState {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: FrameState) -> FrameState {
        self.status = status;
        status
    }

    pub fn elapsed_frames(&self) -> f32 {
        self.elapsed_frames
    }

    pub(crate) fn count_frame(&mut self) {
        self.elapsed_frames += 1.0;
    }

    /// 以当前速度播放完所需的实际时间
    pub fn scaled_duration(&self) -> f32 {
        self.duration / self.speed
    }

    /// 把时钟读数换算为本帧的时间量
    pub(crate) fn frame_time(&self, elapsed: f32) -> FrameTime {
        let limit = self.scaled_duration();
        let delta = elapsed.clamp(0.0, limit);
        let finished = delta >= limit;
        let frame = if finished {
            self.duration
        } else {
            delta * self.speed
        };
        FrameTime {
            delta,
            frame,
            finished,
        }
    }

    /// 复制配置并清空运行时状态
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            status: FrameState::Playing,
            elapsed_frames: 0.0,
            ..self.clone()
        }
    }

    /// 回到首帧之前
    pub(crate) fn reset(&mut self) {
        self.status = FrameState::Playing;
        self.elapsed_frames = 0.0;
    }
}

/// 动作统一接口
///
/// 叶子动作直接实现全部方法；组合动作把暂停、恢复、倒带、
/// 速度与曲线的修改转发给子动作。
pub trait ActionObject {
    fn base(&self) -> &ActionBase;

    fn base_mut(&mut self) -> &mut ActionBase;

    fn name(&self) -> &str {
        self.base().name()
    }

    fn set_name(&mut self, name: &str) {
        self.base_mut().set_name(name);
    }

    /// 时长（秒，未计入速度倍率）
    fn duration(&self) -> f32 {
        self.base().duration()
    }

    fn speed(&self) -> f32 {
        self.base().speed()
    }

    fn timing_curve(&self) -> TimingCurve {
        self.base().timing_curve()
    }

    fn set_speed(&mut self, speed: f32) {
        self.base_mut().set_speed(speed);
    }

    fn set_timing_curve(&mut self, curve: TimingCurve) {
        self.base_mut().set_timing_curve(curve);
    }

    /// 正向推进 `dt` 秒
    ///
    /// 首次调用完成首帧准备（快照初始值、启动时钟）。
    /// 跨越终点的那一次调用会先写入终点值，再返回 `Completed`。
    fn next_frame(&mut self, dt: f32) -> FrameState;

    /// 反向推进 `dt` 秒
    fn prev_frame(&mut self, dt: f32) -> FrameState;

    /// 冻结内部时钟，不重置进度
    fn pause(&mut self, dt: f32);

    /// 解除冻结
    fn resume(&mut self, dt: f32);

    /// 重置到首帧之前，并把目标恢复为快照值
    fn rewind(&mut self, dt: f32);

    /// 释放对目标对象的强引用
    fn release(&mut self);

    /// 复制配置，运行时游标全部重置
    fn duplicate(&self) -> Action;
}

/// 封闭的动作集合
pub enum Action {
    Null(NullAction),
    Wait(WaitForDurationAction),
    AnimateTextures(AnimateTexturesAction),
    FadeAlpha(FadeAlphaAction),
    MoveBy(MoveByAction),
    ScaleBy(ScaleByAction),
    Callback(CallbackAction),
    Sequence(SequenceAction),
    Group(GroupAction),
    RepeatFor(RepeatForAction),
    RepeatForever(RepeatForeverAction),
    Reversed(ReversedAction),
}

impl Action {
    /// 空动作
    pub fn null() -> Self {
        Self::Null(NullAction::new())
    }

    /// 纯等待
    pub fn wait(seconds: f32) -> Self {
        Self::Wait(WaitForDurationAction::new(seconds))
    }

    /// 顺序执行
    pub fn sequence(actions: Vec<Action>) -> Self {
        Self::Sequence(SequenceAction::new(actions))
    }

    /// 并行执行
    pub fn group(actions: Vec<Action>) -> Self {
        Self::Group(GroupAction::new(actions))
    }

    /// 重复 `times` 次
    pub fn repeat(action: Action, times: usize) -> Self {
        Self::RepeatFor(RepeatForAction::new(action, times))
    }

    /// 无限重复
    pub fn repeat_forever(action: Action) -> Self {
        Self::RepeatForever(RepeatForeverAction::new(action))
    }

    /// 反向播放
    pub fn reversed(action: Action) -> Self {
        Self::Reversed(ReversedAction::new(action))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }

    /// 动作种类名（用于日志）
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null(_) => "NullAction",
            Self::Wait(_) => "WaitForDurationAction",
            Self::AnimateTextures(_) => "AnimateTexturesAction",
            Self::FadeAlpha(_) => "FadeAlphaAction",
            Self::MoveBy(_) => "MoveByAction",
            Self::ScaleBy(_) => "ScaleByAction",
            Self::Callback(_) => "CallbackAction",
            Self::Sequence(_) => "SequenceAction",
            Self::Group(_) => "GroupAction",
            Self::RepeatFor(_) => "RepeatForAction",
            Self::RepeatForever(_) => "RepeatForeverAction",
            Self::Reversed(_) => "ReversedAction",
        }
    }

    /// 设置名称
    pub fn with_name(mut self, name: &str) -> Self {
        self.set_name(name);
        self
    }

    /// 设置速度倍率
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.set_speed(speed);
        self
    }

    /// 设置缓动曲线
    pub fn with_timing_curve(mut self, curve: TimingCurve) -> Self {
        self.set_timing_curve(curve);
        self
    }

    fn inner(&self) -> &dyn ActionObject {
        match self {
            Self::Null(a) => a,
            Self::Wait(a) => a,
            Self::AnimateTextures(a) => a,
            Self::FadeAlpha(a) => a,
            Self::MoveBy(a) => a,
            Self::ScaleBy(a) => a,
            Self::Callback(a) => a,
            Self::Sequence(a) => a,
            Self::Group(a) => a,
            Self::RepeatFor(a) => a,
            Self::RepeatForever(a) => a,
            Self::Reversed(a) => a,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ActionObject {
        match self {
            Self::Null(a) => a,
            Self::Wait(a) => a,
            Self::AnimateTextures(a) => a,
            Self::FadeAlpha(a) => a,
            Self::MoveBy(a) => a,
            Self::ScaleBy(a) => a,
            Self::Callback(a) => a,
            Self::Sequence(a) => a,
            Self::Group(a) => a,
            Self::RepeatFor(a) => a,
            Self::RepeatForever(a) => a,
            Self::Reversed(a) => a,
        }
    }
}

impl ActionObject for Action {
    fn base(&self) -> &ActionBase {
        self.inner().base()
    }

    fn base_mut(&mut self) -> &mut ActionBase {
        self.inner_mut().base_mut()
    }

    fn set_speed(&mut self, speed: f32) {
        self.inner_mut().set_speed(speed);
    }

    fn set_timing_curve(&mut self, curve: TimingCurve) {
        self.inner_mut().set_timing_curve(curve);
    }

    fn next_frame(&mut self, dt: f32) -> FrameState {
        self.inner_mut().next_frame(dt)
    }

    fn prev_frame(&mut self, dt: f32) -> FrameState {
        self.inner_mut().prev_frame(dt)
    }

    fn pause(&mut self, dt: f32) {
        self.inner_mut().pause(dt);
    }

    fn resume(&mut self, dt: f32) {
        self.inner_mut().resume(dt);
    }

    fn rewind(&mut self, dt: f32) {
        self.inner_mut().rewind(dt);
    }

    fn release(&mut self) {
        self.inner_mut().release();
    }

    fn duplicate(&self) -> Action {
        self.inner().duplicate()
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(self.kind())
            .field("name", &self.name())
            .field("duration", &self.duration())
            .field("speed", &self.speed())
            .field("status", &self.base().status())
            .finish()
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Action {
                fn from(action: $ty) -> Self {
                    Self::$variant(action)
                }
            }
        )*
    };
}

impl_from_variant!(
    Null(NullAction),
    Wait(WaitForDurationAction),
    AnimateTextures(AnimateTexturesAction),
    FadeAlpha(FadeAlphaAction),
    MoveBy(MoveByAction),
    ScaleBy(ScaleByAction),
    Callback(CallbackAction),
    Sequence(SequenceAction),
    Group(GroupAction),
    RepeatFor(RepeatForAction),
    RepeatForever(RepeatForeverAction),
    Reversed(ReversedAction),
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_time_clamps_to_scaled_duration() {
        let mut base = ActionBase::new(2.0);
        base.set_speed(2.0);

        let ft = base.frame_time(0.5);
        assert!(!ft.finished);
        assert_eq!(ft.delta, 0.5);
        assert_eq!(ft.frame, 1.0);

        // 超过 duration / speed 的部分被截掉，曲线时间恰为 duration
        let ft = base.frame_time(7.0);
        assert!(ft.finished);
        assert_eq!(ft.delta, 1.0);
        assert_eq!(ft.frame, 2.0);
    }

    #[test]
    fn test_invalid_duration_becomes_zero() {
        assert_eq!(ActionBase::new(-1.0).duration(), 0.0);
        assert_eq!(ActionBase::new(f32::NAN).duration(), 0.0);
        assert_eq!(ActionBase::new(f32::INFINITY).duration(), f32::INFINITY);
    }

    #[test]
    fn test_speed_rejects_non_positive() {
        let mut base = ActionBase::new(1.0);
        assert!(!base.set_speed(0.0));
        assert!(!base.set_speed(-1.0));
        assert!(!base.set_speed(f32::NAN));
        assert_eq!(base.speed(), 1.0);
        assert!(base.set_speed(0.5));
        assert_eq!(base.scaled_duration(), 2.0);
    }

    #[test]
    fn test_duplicate_resets_runtime_state() {
        let mut base = ActionBase::new(1.0);
        base.set_name("spin");
        base.set_status(FrameState::Completed);
        base.count_frame();

        let copy = base.duplicate();
        assert_eq!(copy.name(), "spin");
        assert_eq!(copy.status(), FrameState::Playing);
        assert_eq!(copy.elapsed_frames(), 0.0);
    }

    #[test]
    fn test_builders_and_kind() {
        let action = Action::wait(1.0)
            .with_name("pause")
            .with_speed(2.0)
            .with_timing_curve(TimingCurve::QuadEaseIn);

        assert_eq!(action.kind(), "WaitForDurationAction");
        assert_eq!(action.name(), "pause");
        assert_eq!(action.speed(), 2.0);
        assert_eq!(action.timing_curve(), TimingCurve::QuadEaseIn);
        assert!(Action::null().is_null());
        assert_eq!(FrameState::Completed.to_string(), "COMPLETED");
    }
}
