use super::{Action, ActionBase, ActionObject, FrameState};
use crate::timing::TimingCurve;

/// 反向播放子动作：交换 `next_frame` 与 `prev_frame`
pub struct ReversedAction {
    base: ActionBase,
    action: Box<Action>,
}

impl ReversedAction {
    pub fn new(action: Action) -> Self {
        Self {
            base: ActionBase::new(action.duration()),
            action: Box::new(action),
        }
    }

    pub fn inner(&self) -> &Action {
        &self.action
    }
}

impl ActionObject for ReversedAction {
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
        let state = self.action.prev_frame(dt);
        self.base.set_status(state)
    }

    fn prev_frame(&mut self, dt: f32) -> FrameState {
        let state = self.action.next_frame(dt);
        self.base.set_status(state)
    }

    fn pause(&mut self, dt: f32) {
        self.action.pause(dt);
    }

    fn resume(&mut self, dt: f32) {
        self.action.resume(dt);
    }

    fn rewind(&mut self, dt: f32) {
        self.action.rewind(dt);
        self.base.reset();
    }

    fn release(&mut self) {
        self.action.release();
    }

    fn duplicate(&self) -> Action {
        Action::Reversed(Self {
            base: self.base.duplicate(),
            action: Box::new(self.action.duplicate()),
        })
    }
}
