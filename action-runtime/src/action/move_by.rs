use tracing::{debug, trace};

use super::{advance_clock, Action, ActionBase, ActionObject, Direction, FrameState};
use crate::geometry::Point;
use crate::target::DrawableRef;
use crate::timer::Timer;

/// 相对位移
#[derive(Clone)]
pub struct MoveByAction {
    base: ActionBase,
    target: Option<DrawableRef>,
    delta: Point,
    timer: Timer,
    start: Point,
    change: Point,
    snapshot: Option<Point>,
}

impl MoveByAction {
    pub fn new(target: DrawableRef, delta: Point, duration: f32) -> Self {
        Self {
            base: ActionBase::new(duration),
            target: Some(target),
            delta,
            timer: Timer::new(),
            start: Point::zero(),
            change: Point::zero(),
            snapshot: None,
        }
    }

    pub fn delta(&self) -> Point {
        self.delta
    }

    fn step(&mut self, direction: Direction, dt: f32) -> FrameState {
        if self.base.status().is_completed() {
            return FrameState::Completed;
        }

        let (first, ft) = advance_clock(&mut self.timer, &mut self.base, dt);

        if let Some(target) = &self.target {
            if first {
                self.start = target.position();
                self.snapshot.get_or_insert(self.start);
                self.change = match direction {
                    Direction::Forward => self.delta,
                    Direction::Backward => -self.delta,
                };
                debug!(action = %self.base.name(), from = %self.start, by = %self.change, "move started");
            }

            let curve = self.base.timing_curve();
            let d = self.base.duration();
            let position = Point::from_rounded(
                curve.apply(ft.frame, self.start.x as f32, self.change.x as f32, d),
                curve.apply(ft.frame, self.start.y as f32, self.change.y as f32, d),
            );
            trace!(action = %self.base.name(), t = ft.frame, %position, "move frame");
            target.set_position(position);
        }

        if ft.finished {
            self.timer.stop();
            self.base.set_status(FrameState::Completed)
        } else {
            FrameState::Playing
        }
    }
}

impl ActionObject for MoveByAction {
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
        if let (Some(target), Some(position)) = (&self.target, self.snapshot) {
            target.set_position(position);
        }
    }

    fn release(&mut self) {
        self.target = None;
    }

    fn duplicate(&self) -> Action {
        Action::MoveBy(Self {
            base: self.base.duplicate(),
            target: self.target.clone(),
            delta: self.delta,
            timer: Timer::new(),
            start: Point::zero(),
            change: Point::zero(),
            snapshot: None,
        })
    }
}

impl std::fmt::Debug for MoveByAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveByAction")
            .field("base", &self.base)
            .field("delta", &self.delta)
            .field("has_target", &self.target.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::geometry::Size;
    use crate::target::{Drawable, Sprite};
    use crate::timing::TimingCurve;

    #[test]
    fn test_move_reaches_exact_destination() {
        let s = Rc::new(Sprite::new(Point::new(10, 20), Size::new(4, 4)));
        let mut action = MoveByAction::new(s.clone(), Point::new(100, -40), 1.0);
        action.set_timing_curve(TimingCurve::LinearEaseIn);

        assert_eq!(action.next_frame(0.25), FrameState::Playing);
        assert_eq!(s.position(), Point::new(35, 10));
        assert_eq!(action.next_frame(5.0), FrameState::Completed);
        assert_eq!(s.position(), Point::new(110, -20));
    }

    #[test]
    fn test_backward_moves_opposite() {
        let s = Rc::new(Sprite::new(Point::new(0, 0), Size::new(4, 4)));
        let mut action = MoveByAction::new(s.clone(), Point::new(8, 8), 1.0);
        action.prev_frame(1.0);
        assert_eq!(s.position(), Point::new(-8, -8));
    }

    #[test]
    fn test_rewind_restores_position() {
        let s = Rc::new(Sprite::new(Point::new(3, 3), Size::new(4, 4)));
        let mut action = MoveByAction::new(s.clone(), Point::new(10, 0), 2.0);
        action.next_frame(1.0);
        action.rewind(0.0);
        assert_eq!(s.position(), Point::new(3, 3));
        assert_eq!(action.next_frame(0.0), FrameState::Playing);
    }
}
