use tracing::{debug, trace};

use super::{advance_clock, Action, ActionBase, ActionObject, Direction, FrameState};
use crate::geometry::Size;
use crate::target::DrawableRef;
use crate::timer::Timer;

/// 按比例缩放尺寸
///
/// 正系数表示乘，负系数表示除以其绝对值（`-2.0` 即缩小一半）。
#[derive(Clone)]
pub struct ScaleByAction {
    base: ActionBase,
    target: Option<DrawableRef>,
    factor_x: f32,
    factor_y: f32,
    timer: Timer,
    start: (f32, f32),
    change: (f32, f32),
    snapshot: Option<Size>,
}

impl ScaleByAction {
    pub fn new(target: DrawableRef, factor_x: f32, factor_y: f32, duration: f32) -> Self {
        Self {
            base: ActionBase::new(duration),
            target: Some(target),
            factor_x,
            factor_y,
            timer: Timer::new(),
            start: (0.0, 0.0),
            change: (0.0, 0.0),
            snapshot: None,
        }
    }

    /// 两个方向使用同一系数
    pub fn uniform(target: DrawableRef, factor: f32, duration: f32) -> Self {
        Self::new(target, factor, factor, duration)
    }

    pub fn factors(&self) -> (f32, f32) {
        (self.factor_x, self.factor_y)
    }

    fn step(&mut self, direction: Direction, dt: f32) -> FrameState {
        if self.base.status().is_completed() {
            return FrameState::Completed;
        }

        let (first, ft) = advance_clock(&mut self.timer, &mut self.base, dt);

        if let Some(target) = &self.target {
            if first {
                let size = target.size();
                self.snapshot.get_or_insert(size);
                self.start = (size.w as f32, size.h as f32);
                self.change = (
                    scaled(self.start.0, self.factor_x, direction) - self.start.0,
                    scaled(self.start.1, self.factor_y, direction) - self.start.1,
                );
                debug!(action = %self.base.name(), from = %size, "scale started");
            }

            let curve = self.base.timing_curve();
            let d = self.base.duration();
            let size = Size::from_rounded(
                curve.apply(ft.frame, self.start.0, self.change.0, d),
                curve.apply(ft.frame, self.start.1, self.change.1, d),
            );
            trace!(action = %self.base.name(), t = ft.frame, %size, "scale frame");
            target.set_size(size);
        }

        if ft.finished {
            self.timer.stop();
            self.base.set_status(FrameState::Completed)
        } else {
            FrameState::Playing
        }
    }
}

fn scaled(value: f32, factor: f32, direction: Direction) -> f32 {
    let multiply = (factor >= 0.0) == (direction == Direction::Forward);
    if multiply {
        value * factor.abs()
    } else if factor != 0.0 {
        value / factor.abs()
    } else {
        value
    }
}

impl ActionObject for ScaleByAction {
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
        if let (Some(target), Some(size)) = (&self.target, self.snapshot) {
            target.set_size(size);
        }
    }

    fn release(&mut self) {
        self.target = None;
    }

    fn duplicate(&self) -> Action {
        Action::ScaleBy(Self {
            base: self.base.duplicate(),
            target: self.target.clone(),
            factor_x: self.factor_x,
            factor_y: self.factor_y,
            timer: Timer::new(),
            start: (0.0, 0.0),
            change: (0.0, 0.0),
            snapshot: None,
        })
    }
}

impl std::fmt::Debug for ScaleByAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScaleByAction")
            .field("base", &self.base)
            .field("factor_x", &self.factor_x)
            .field("factor_y", &self.factor_y)
            .field("has_target", &self.target.is_some())
            .finish()
    }
}
