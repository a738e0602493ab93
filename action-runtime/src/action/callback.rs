use std::rc::Rc;

use tracing::trace;

use super::{advance_clock, Action, ActionBase, ActionObject, FrameState};
use crate::timer::Timer;

/// 回调函数类型
pub type CallbackFn = Rc<dyn Fn()>;

/// 在持续时间内每次步进都调用一次闭包
///
/// 时长为 0 时恰好调用一次。不可逆：`prev_frame` 与 `next_frame` 相同。
#[derive(Clone)]
pub struct CallbackAction {
    base: ActionBase,
    callback: CallbackFn,
    timer: Timer,
}

impl CallbackAction {
    pub fn new(callback: impl Fn() + 'static, duration: f32) -> Self {
        Self::from_shared(Rc::new(callback), duration)
    }

    /// 立即执行一次
    pub fn once(callback: impl Fn() + 'static) -> Self {
        Self::new(callback, 0.0)
    }

    pub fn from_shared(callback: CallbackFn, duration: f32) -> Self {
        Self {
            base: ActionBase::new(duration),
            callback,
            timer: Timer::new(),
        }
    }

    fn step(&mut self, dt: f32) -> FrameState {
        if self.base.status().is_completed() {
            return FrameState::Completed;
        }

        let (_, ft) = advance_clock(&mut self.timer, &mut self.base, dt);
        trace!(action = %self.base.name(), elapsed = ft.delta, "callback frame");
        (self.callback)();

        if ft.finished {
            self.timer.stop();
            self.base.set_status(FrameState::Completed)
        } else {
            FrameState::Playing
        }
    }
}

impl ActionObject for CallbackAction {
    fn base(&self) -> &ActionBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase {
        &mut self.base
    }

    fn next_frame(&mut self, dt: f32) -> FrameState {
        self.step(dt)
    }

    fn prev_frame(&mut self, dt: f32) -> FrameState {
        self.step(dt)
    }

    fn pause(&mut self, _dt: f32) {}

    fn resume(&mut self, _dt: f32) {}

    /// 只重置进度，已经执行过的回调无法撤销
    fn rewind(&mut self, _dt: f32) {
        self.timer.stop();
        self.base.reset();
    }

    fn release(&mut self) {}

    fn duplicate(&self) -> Action {
        Action::Callback(Self {
            base: self.base.duplicate(),
            callback: Rc::clone(&self.callback),
            timer: Timer::new(),
        })
    }
}

impl std::fmt::Debug for CallbackAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackAction")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_zero_duration_runs_once() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let mut action = CallbackAction::once(move || counter.set(counter.get() + 1));

        assert_eq!(action.next_frame(0.016), FrameState::Completed);
        assert_eq!(action.next_frame(0.016), FrameState::Completed);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_invoked_every_step_until_done() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let mut action = CallbackAction::new(move || counter.set(counter.get() + 1), 1.0);

        assert_eq!(action.next_frame(0.25), FrameState::Playing);
        assert_eq!(action.prev_frame(0.25), FrameState::Playing);
        assert_eq!(action.next_frame(0.25), FrameState::Playing);
        assert_eq!(action.next_frame(0.25), FrameState::Completed);
        assert_eq!(hits.get(), 4);
    }

    #[test]
    fn test_duplicate_shares_closure() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let action = CallbackAction::once(move || counter.set(counter.get() + 1));

        let mut a = action.duplicate();
        let mut b = action.duplicate();
        a.next_frame(0.0);
        b.next_frame(0.0);
        assert_eq!(hits.get(), 2);
    }
}
