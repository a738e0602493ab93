use tracing::{debug, trace};

use super::{Action, ActionBase, ActionObject, Direction, FrameState};
use crate::timing::TimingCurve;

/// 并行执行子动作
///
/// 每次步进推进所有尚未完成的子动作，全部完成后报告 `Completed`。
/// 时长为子动作时长的最大值。
pub struct GroupAction {
    base: ActionBase,
    actions: Vec<Action>,
    completed: Vec<bool>,
    num_completed: usize,
}

impl GroupAction {
    pub fn new(actions: Vec<Action>) -> Self {
        let duration = actions.iter().map(|a| a.duration()).fold(0.0, f32::max);
        let completed = vec![false; actions.len()];
        Self {
            base: ActionBase::new(duration),
            actions,
            completed,
            num_completed: 0,
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn num_completed(&self) -> usize {
        self.num_completed
    }

    fn step(&mut self, direction: Direction, dt: f32) -> FrameState {
        if self.base.status().is_completed() {
            return FrameState::Completed;
        }

        let n = self.actions.len();
        self.base.count_frame();

        for (index, (action, done)) in self
            .actions
            .iter_mut()
            .zip(self.completed.iter_mut())
            .enumerate()
        {
            if *done {
                continue;
            }
            let state = match direction {
                Direction::Forward => action.next_frame(dt),
                Direction::Backward => action.prev_frame(dt),
            };
            trace!(action = %self.base.name(), child = index, state = %state, "group frame");
            if state.is_completed() {
                *done = true;
                self.num_completed += 1;
                debug!(
                    action = %self.base.name(),
                    "[{}/{}] child finished",
                    self.num_completed,
                    n
                );
            }
        }

        if self.num_completed == n {
            self.base.set_status(FrameState::Completed)
        } else {
            FrameState::Playing
        }
    }
}

impl ActionObject for GroupAction {
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
        for action in self.actions.iter_mut().rev() {
            action.rewind(dt);
        }
        self.completed.fill(false);
        self.num_completed = 0;
        self.base.reset();
    }

    fn release(&mut self) {
        for action in &mut self.actions {
            action.release();
        }
    }

    fn duplicate(&self) -> Action {
        Action::Group(Self {
            base: self.base.duplicate(),
            actions: self.actions.iter().map(|a| a.duplicate()).collect(),
            completed: vec![false; self.actions.len()],
            num_completed: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::action::{FadeAlphaAction, MoveByAction};
    use crate::geometry::{Point, Size};
    use crate::target::{Drawable, Sprite};

    #[test]
    fn test_completes_when_longest_child_finishes() {
        let mut group = Action::group(vec![Action::wait(1.0), Action::wait(3.0)]);
        assert_eq!(group.duration(), 3.0);

        let mut trace = Vec::new();
        for _ in 0..5 {
            let state = group.next_frame(1.0);
            trace.push(state);
            if state.is_completed() {
                break;
            }
        }
        insta::assert_debug_snapshot!(trace, @r"
        [
            Playing,
            Playing,
            Completed,
        ]
        ");
    }

    #[test]
    fn test_finished_children_are_not_stepped_again() {
        let s = Rc::new(Sprite::new(Point::zero(), Size::new(4, 4)));
        let mut group = Action::group(vec![
            MoveByAction::new(s.clone(), Point::new(5, 0), 1.0).into(),
            Action::wait(2.0),
        ]);

        group.next_frame(1.0);
        assert_eq!(s.position(), Point::new(5, 0));
        // 外部修改不会被已完成的子动作覆盖
        s.set_position(Point::new(0, 0));
        assert_eq!(group.next_frame(1.0), FrameState::Completed);
        assert_eq!(s.position(), Point::new(0, 0));
    }

    #[test]
    fn test_children_run_concurrently() {
        let s = Rc::new(Sprite::new(Point::zero(), Size::new(4, 4)));
        let mut group = Action::group(vec![
            MoveByAction::new(s.clone(), Point::new(100, 0), 2.0).into(),
            FadeAlphaAction::fade_out(s.clone(), 2.0).into(),
        ]);
        group.set_timing_curve(TimingCurve::LinearEaseIn);

        assert_eq!(group.next_frame(1.0), FrameState::Playing);
        assert_eq!(s.position(), Point::new(50, 0));
        assert_eq!(s.alpha(), 128);
    }

    #[test]
    fn test_empty_and_null_children() {
        let mut empty = Action::group(Vec::new());
        assert_eq!(empty.next_frame(0.0), FrameState::Completed);

        let mut nulls = Action::group(vec![Action::null(), Action::null()]);
        assert_eq!(nulls.next_frame(0.0), FrameState::Completed);
    }

    #[test]
    fn test_rewind_allows_replay() {
        let mut group = Action::group(vec![Action::wait(1.0), Action::wait(1.0)]);
        assert_eq!(group.next_frame(1.0), FrameState::Completed);
        group.rewind(0.0);
        assert_eq!(group.next_frame(0.5), FrameState::Playing);
        assert_eq!(group.next_frame(0.5), FrameState::Completed);
    }
}
