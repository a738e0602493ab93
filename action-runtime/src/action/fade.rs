use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{advance_clock, Action, ActionBase, ActionObject, Direction, FrameState};
use crate::target::{DrawableRef, ALPHA_OPAQUE, ALPHA_TRANSPARENT};
use crate::timer::Timer;

/// 透明度变化方式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeMode {
    /// 相对变化
    By(f32),
    /// 变为不透明
    In,
    /// 变为透明
    Out,
}

/// 透明度渐变
///
/// 首帧记录目标当前透明度作为起点；倒带时恢复首帧前的透明度。
#[derive(Clone)]
pub struct FadeAlphaAction {
    base: ActionBase,
    target: Option<DrawableRef>,
    mode: FadeMode,
    timer: Timer,
    start: f32,
    change: f32,
    snapshot: Option<u8>,
}

impl FadeAlphaAction {
    pub fn new(target: DrawableRef, mode: FadeMode, duration: f32) -> Self {
        Self {
            base: ActionBase::new(duration),
            target: Some(target),
            mode,
            timer: Timer::new(),
            start: 0.0,
            change: 0.0,
            snapshot: None,
        }
    }

    /// 透明度相对变化 `delta`
    pub fn fade_by(target: DrawableRef, delta: f32, duration: f32) -> Self {
        Self::new(target, FadeMode::By(delta), duration)
    }

    /// 渐变到完全不透明
    pub fn fade_in(target: DrawableRef, duration: f32) -> Self {
        Self::new(target, FadeMode::In, duration)
    }

    /// 渐变到完全透明
    pub fn fade_out(target: DrawableRef, duration: f32) -> Self {
        Self::new(target, FadeMode::Out, duration)
    }

    pub fn mode(&self) -> FadeMode {
        self.mode
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    fn first_frame(&mut self, target: &DrawableRef, direction: Direction) {
        let current = target.alpha();
        if self.snapshot.is_none() {
            self.snapshot = Some(current);
        }
        self.start = f32::from(current);

        let change = match self.mode {
            FadeMode::By(delta) => delta,
            FadeMode::In => f32::from(ALPHA_OPAQUE) - self.start,
            FadeMode::Out => f32::from(ALPHA_TRANSPARENT) - self.start,
        };
        self.change = match direction {
            Direction::Forward => change,
            Direction::Backward => -change,
        };
        debug!(
            action = %self.base.name(),
            start = self.start,
            change = self.change,
            "fade started"
        );
    }

    fn step(&mut self, direction: Direction, dt: f32) -> FrameState {
        if self.base.status().is_completed() {
            return FrameState::Completed;
        }

        let (first, ft) = advance_clock(&mut self.timer, &mut self.base, dt);

        if let Some(target) = self.target.clone() {
            if first {
                self.first_frame(&target, direction);
            }
            let value = self.base.timing_curve().apply(
                ft.frame,
                self.start,
                self.change,
                self.base.duration(),
            );
            let alpha = value
                .round()
                .clamp(f32::from(ALPHA_TRANSPARENT), f32::from(ALPHA_OPAQUE)) as u8;
            trace!(action = %self.base.name(), t = ft.frame, alpha, "fade frame");
            target.set_alpha(alpha);
        }

        if ft.finished {
            self.timer.stop();
            self.base.set_status(FrameState::Completed)
        } else {
            FrameState::Playing
        }
    }
}

impl ActionObject for FadeAlphaAction {
    fn base(&self) -> &ActionBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase {
        &mut self.base
    }

    fn next_frame(&mut self, dt: f32) -> FrameState {
        self.step(Direction::Forward, dt)
    }

    fn prev_frame(&mut self, dt: f32) -> FrameState {
        self.step(Direction::Backward, dt)
    }

    fn pause(&mut self, _dt: f32) {
        self.timer.pause();
    }

    fn resume(&mut self, _dt: f32) {
        self.timer.unpause();
    }

    fn rewind(&mut self, _dt: f32) {
        self.timer.stop();
        self.base.reset();
        if let (Some(target), Some(alpha)) = (&self.target, self.snapshot) {
            target.set_alpha(alpha);
        }
    }

    fn release(&mut self) {
        self.target = None;
    }

    fn duplicate(&self) -> Action {
        Action::FadeAlpha(Self {
            base: self.base.duplicate(),
            target: self.target.clone(),
            mode: self.mode,
            timer: Timer::new(),
            start: 0.0,
            change: 0.0,
            snapshot: None,
        })
    }
}

impl std::fmt::Debug for FadeAlphaAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FadeAlphaAction")
            .field("base", &self.base)
            .field("mode", &self.mode)
            .field("has_target", &self.target.is_some())
            .field("snapshot", &self.snapshot)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::geometry::{Point, Size};
    use crate::target::{Drawable, Sprite};
    use crate::timing::TimingCurve;

    fn sprite() -> Rc<Sprite> {
        Rc::new(Sprite::new(Point::zero(), Size::new(16, 16)))
    }

    #[test]
    fn test_fade_out_linear() {
        let s = sprite();
        let mut fade = FadeAlphaAction::fade_out(s.clone(), 1.0);
        fade.set_timing_curve(TimingCurve::LinearEaseIn);

        assert_eq!(fade.next_frame(0.5), FrameState::Playing);
        assert_eq!(s.alpha(), 128);
        assert_eq!(fade.next_frame(0.5), FrameState::Completed);
        assert_eq!(s.alpha(), 0);
    }

    #[test]
    fn test_fade_in_from_current_alpha() {
        let s = sprite();
        s.set_alpha(55);
        let mut fade = FadeAlphaAction::fade_in(s.clone(), 2.0);

        assert_eq!(fade.next_frame(3.0), FrameState::Completed);
        assert_eq!(s.alpha(), 255);
    }

    #[test]
    fn test_fade_by_clamps_to_valid_range() {
        let s = sprite();
        s.set_alpha(200);
        let mut fade = FadeAlphaAction::fade_by(s.clone(), 100.0, 1.0);
        fade.next_frame(1.0);
        assert_eq!(s.alpha(), 255);
    }

    #[test]
    fn test_prev_frame_negates_change() {
        let s = sprite();
        s.set_alpha(100);
        let mut fade = FadeAlphaAction::fade_by(s.clone(), 50.0, 1.0);
        assert_eq!(fade.prev_frame(1.0), FrameState::Completed);
        assert_eq!(s.alpha(), 50);
    }

    #[test]
    fn test_rewind_restores_snapshot_and_is_idempotent() {
        let s = sprite();
        s.set_alpha(200);
        let mut fade = FadeAlphaAction::fade_out(s.clone(), 1.0);

        fade.next_frame(0.5);
        assert_ne!(s.alpha(), 200);
        fade.rewind(0.0);
        assert_eq!(s.alpha(), 200);
        fade.rewind(0.0);
        assert_eq!(s.alpha(), 200);

        // 倒带后重新播放仍以原值为起点
        fade.next_frame(1.0);
        assert_eq!(s.alpha(), 0);
        fade.rewind(0.0);
        assert_eq!(s.alpha(), 200);
    }

    #[test]
    fn test_release_drops_target() {
        let s = sprite();
        let mut fade = FadeAlphaAction::fade_out(s.clone(), 1.0);
        assert_eq!(Rc::strong_count(&s), 2);
        fade.release();
        assert_eq!(Rc::strong_count(&s), 1);
        assert!(!fade.has_target());
        // 没有目标时仍按时间完成
        assert_eq!(fade.next_frame(1.0), FrameState::Completed);
    }
}
