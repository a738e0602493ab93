use tracing::{debug, trace};

use super::{Action, ActionBase, ActionObject, Direction, FrameState};
use crate::timing::TimingCurve;

/// 顺序执行子动作
///
/// 每次步进只推进游标处的子动作；子动作完成后游标在下一次步进时
/// 指向下一个子动作。全部子动作完成后报告 `Completed`。
///
/// 反向步进时按从后到前的顺序执行子动作的 `prev_frame`。
/// 时长为子动作时长之和，仅供参考，完成与否由子动作决定。
pub struct SequenceAction {
    base: ActionBase,
    actions: Vec<Action>,
    cursor: usize,
    num_completed: usize,
}

impl SequenceAction {
    pub fn new(actions: Vec<Action>) -> Self {
        let duration = actions.iter().map(|a| a.duration()).sum();
        Self {
            base: ActionBase::new(duration),
            actions,
            cursor: 0,
            num_completed: 0,
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// 已完成的子动作数量
    pub fn num_completed(&self) -> usize {
        self.num_completed
    }

    fn step(&mut self, direction: Direction, dt: f32) -> FrameState {
        if self.base.status().is_completed() {
            return FrameState::Completed;
        }

        let n = self.actions.len();
        if self.num_completed >= n {
            debug!(action = %self.base.name(), "empty sequence completed");
            return self.base.set_status(FrameState::Completed);
        }

        self.base.count_frame();
        let index = match direction {
            Direction::Forward => self.cursor,
            Direction::Backward => n - 1 - self.cursor,
        };
        let child = &mut self.actions[index];
        let state = match direction {
            Direction::Forward => child.next_frame(dt),
            Direction::Backward => child.prev_frame(dt),
        };
        trace!(action = %self.base.name(), child = index, state = %state, "sequence frame");

        if state.is_completed() {
            self.cursor += 1;
            self.num_completed += 1;
            debug!(
                action = %self.base.name(),
                "[{}/{}] child finished",
                self.num_completed,
                n
            );
        }

        if self.num_completed == n {
            self.base.set_status(FrameState::Completed)
        } else {
            FrameState::Playing
        }
    }
}

impl ActionObject for SequenceAction {
    fn base(&self) -> &ActionBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase {
        &mut self.base
    }

    fn set_speed(&mut self, speed: f32) {
        if self.base.set_speed(speed) {
            for action in &mut self.actions {
                action.set_speed(speed);
            }
        }
    }

    fn set_timing_curve(&mut self, curve: TimingCurve) {
        self.base.set_timing_curve(curve);
        for action in &mut self.actions {
            action.set_timing_curve(curve);
        }
    }

    fn next_frame(&mut self, dt: f32) -> FrameState {
        self.step(Direction::Forward, dt)
    }

    fn prev_frame(&mut self, dt: f32) -> FrameState {
        self.step(Direction::Backward, dt)
    }

    fn pause(&mut self, dt: f32) {
        for action in &mut self.actions {
            action.pause(dt);
        }
    }

    fn resume(&mut self, dt: f32) {
        for action in &mut self.actions {
            action.resume(dt);
        }
    }

    fn rewind(&mut self, dt: f32) {
        // 从后往前倒带，最早的快照最后写回
        for action in self.actions.iter_mut().rev() {
            action.rewind(dt);
        }
        self.cursor = 0;
        self.num_completed = 0;
        self.base.reset();
    }

    fn release(&mut self) {
        for action in &mut self.actions {
            action.release();
        }
    }

    fn duplicate(&self) -> Action {
        Action::Sequence(Self {
            base: self.base.duplicate(),
            actions: self.actions.iter().map(|a| a.duplicate()).collect(),
            cursor: 0,
            num_completed: 0,
        })
    }
}
