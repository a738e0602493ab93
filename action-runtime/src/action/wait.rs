use tracing::{debug, trace};

use super::{advance_clock, Action, ActionBase, ActionObject, FrameState};
use crate::timer::Timer;

/// 纯等待，不修改任何目标
///
/// 常用于序列中的停顿。
#[derive(Debug, Clone, PartialEq)]
pub struct WaitForDurationAction {
    base: ActionBase,
    timer: Timer,
}

impl WaitForDurationAction {
    pub fn new(seconds: f32) -> Self {
        Self {
            base: ActionBase::new(seconds),
            timer: Timer::new(),
        }
    }

    fn step(&mut self, dt: f32) -> FrameState {
        if self.base.status().is_completed() {
            return FrameState::Completed;
        }

        let (first, ft) = advance_clock(&mut self.timer, &mut self.base, dt);
        if first {
            debug!(action = %self.base.name(), duration = self.base.duration(), "wait started");
        }
        trace!(action = %self.base.name(), elapsed = ft.delta, "wait frame");

        if ft.finished {
            self.timer.stop();
            self.base.set_status(FrameState::Completed)
        } else {
            FrameState::Playing
        }
    }
}

impl ActionObject for WaitForDurationAction {
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

    fn pause(&mut self, _dt: f32) {
        self.timer.pause();
    }

    fn resume(&mut self, _dt: f32) {
        self.timer.unpause();
    }

    fn rewind(&mut self, _dt: f32) {
        self.timer.stop();
        self.base.reset();
    }

    fn release(&mut self) {}

    fn duplicate(&self) -> Action {
        Action::Wait(Self {
            base: self.base.duplicate(),
            timer: Timer::new(),
        })
    }
}
