use tracing::debug;

use super::{Action, ActionBase, ActionObject, Direction, FrameState};
use crate::timing::TimingCurve;

fn step_child(action: &mut Action, direction: Direction, dt: f32) -> FrameState {
    match direction {
        Direction::Forward => action.next_frame(dt),
        Direction::Backward => action.prev_frame(dt),
    }
}

/// 重复执行子动作 `times` 次
///
/// 每次子动作完成后先倒带再开始下一轮。`times == 0` 时立即完成。
pub struct RepeatForAction {
    base: ActionBase,
    action: Box<Action>,
    times: usize,
    count: usize,
}

impl RepeatForAction {
    pub fn new(action: Action, times: usize) -> Self {
        // 零次重复时不参与乘法，无限时长乘 0 会得到 NaN
        let duration = if times == 0 {
            0.0
        } else {
            action.duration() * times as f32
        };
        Self {
            base: ActionBase::new(duration),
            action: Box::new(action),
            times,
            count: 0,
        }
    }

    pub fn times(&self) -> usize {
        self.times
    }

    /// 已完成的轮数
    pub fn count(&self) -> usize {
        self.count
    }

    fn step(&mut self, direction: Direction, dt: f32) -> FrameState {
        if self.base.status().is_completed() {
            return FrameState::Completed;
        }
        if self.count >= self.times {
            return self.base.set_status(FrameState::Completed);
        }

        self.base.count_frame();
        if step_child(&mut self.action, direction, dt).is_completed() {
            self.count += 1;
            debug!(action = %self.base.name(), "[{}/{}] repetition finished", self.count, self.times);
            if self.count >= self.times {
                return self.base.set_status(FrameState::Completed);
            }
            self.action.rewind(dt);
        }
        FrameState::Playing
    }
}

impl ActionObject for RepeatForAction {
    fn base(&self) -> &ActionBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase {
        &mut self.base
    }

    fn set_speed(&mut self, speed: f32) {
        if self.base.set_speed(speed) {
            self.action.set_speed(speed);
        }
    }

    fn set_timing_curve(&mut self, curve: TimingCurve) {
        self.base.set_timing_curve(curve);
        self.action.set_timing_curve(curve);
    }

    fn next_frame(&mut self, dt: f32) -> FrameState {
        self.step(Direction::Forward, dt)
    }

    fn prev_frame(&mut self, dt: f32) -> FrameState {
        self.step(Direction::Backward, dt)
    }

    fn pause(&mut self, dt: f32) {
        self.action.pause(dt);
    }

    fn resume(&mut self, dt: f32) {
        self.action.resume(dt);
    }

    fn rewind(&mut self, dt: f32) {
        self.action.rewind(dt);
        self.count = 0;
        self.base.reset();
    }

    fn release(&mut self) {
        self.action.release();
    }

    fn duplicate(&self) -> Action {
        Action::RepeatFor(Self {
            base: self.base.duplicate(),
            action: Box::new(self.action.duplicate()),
            times: self.times,
            count: 0,
        })
    }
}

/// 无限重复子动作
///
/// 永远不会报告 `Completed`，只能通过取消结束。
pub struct RepeatForeverAction {
    base: ActionBase,
    action: Box<Action>,
    count: usize,
}

impl RepeatForeverAction {
    pub fn new(action: Action) -> Self {
        Self {
            base: ActionBase::new(f32::INFINITY),
            action: Box::new(action),
            count: 0,
        }
    }

    /// 已完成的轮数
    pub fn count(&self) -> usize {
        self.count
    }

    fn step(&mut self, direction: Direction, dt: f32) -> FrameState {
        self.base.count_frame();
        if step_child(&mut self.action, direction, dt).is_completed() {
            self.count += 1;
            debug!(action = %self.base.name(), repetition = self.count, "repetition finished");
            self.action.rewind(dt);
        }
        FrameState::Playing
    }
}

impl ActionObject for RepeatForeverAction {
    fn base(&self) -> &ActionBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase {
        &mut self.base
    }

    fn set_speed(&mut self, speed: f32) {
        if self.base.set_speed(speed) {
            self.action.set_speed(speed);
        }
    }

    fn set_timing_curve(&mut self, curve: TimingCurve) {
        self.base.set_timing_curve(curve);
        self.action.set_timing_curve(curve);
    }

    fn next_frame(&mut self, dt: f32) -> FrameState {
        self.step(Direction::Forward, dt)
    }

    fn prev_frame(&mut self, dt: f32) -> FrameState {
        self.step(Direction::Backward, dt)
    }

    fn pause(&mut self, dt: f32) {
        self.action.pause(dt);
    }

    fn resume(&mut self, dt: f32) {
        self.action.resume(dt);
    }

    fn rewind(&mut self, dt: f32) {
        self.action.rewind(dt);
        self.count = 0;
        self.base.reset();
    }

    fn release(&mut self) {
        self.action.release();
    }

    fn duplicate(&self) -> Action {
        Action::RepeatForever(Self {
            base: self.base.duplicate(),
            action: Box::new(self.action.duplicate()),
            count: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::action::{CallbackAction, FadeAlphaAction};
    use crate::geometry::{Point, Size};
    use crate::target::{Drawable, Sprite};

    #[test]
    fn test_repeat_runs_child_n_times() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let mut action = Action::repeat(
            CallbackAction::once(move || counter.set(counter.get() + 1)).into(),
            3,
        );

        assert_eq!(action.next_frame(0.1), FrameState::Playing);
        assert_eq!(action.next_frame(0.1), FrameState::Playing);
        assert_eq!(action.next_frame(0.1), FrameState::Completed);
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn test_repeat_zero_times_completes_immediately() {
        let mut action = Action::repeat(Action::wait(1.0), 0);
        assert_eq!(action.duration(), 0.0);
        assert_eq!(action.next_frame(0.0), FrameState::Completed);
    }

    #[test]
    fn test_repeat_forever_zero_times_has_zero_duration() {
        let mut action = Action::repeat(Action::repeat_forever(Action::wait(1.0)), 0);
        assert_eq!(action.duration(), 0.0);
        assert_eq!(action.next_frame(0.1), FrameState::Completed);

        let twice = Action::repeat(Action::repeat_forever(Action::wait(1.0)), 2);
        assert_eq!(twice.duration(), f32::INFINITY);
    }

    #[test]
    fn test_repeat_duration_is_multiplied() {
        let action = RepeatForAction::new(Action::wait(0.5), 4);
        assert_eq!(action.duration(), 2.0);
        assert_eq!(action.times(), 4);
    }

    #[test]
    fn test_pulse_restarts_from_snapshot() {
        let s = Rc::new(Sprite::new(Point::zero(), Size::new(4, 4)));
        let mut pulse = Action::repeat(FadeAlphaAction::fade_out(s.clone(), 1.0).into(), 2);

        assert_eq!(pulse.next_frame(1.0), FrameState::Playing);
        // 第一轮结束后倒带，透明度回到起点
        assert_eq!(s.alpha(), 255);
        assert_eq!(pulse.next_frame(1.0), FrameState::Completed);
        assert_eq!(s.alpha(), 0);
    }

    #[test]
    fn test_forever_never_completes() {
        let mut action = Action::repeat_forever(Action::wait(0.5));
        for _ in 0..20 {
            assert_eq!(action.next_frame(0.5), FrameState::Playing);
        }
        let Action::RepeatForever(inner) = &action else {
            panic!("expected repeat forever");
        };
        assert_eq!(inner.count(), 20);
    }
}
