use tracing::{debug, trace, warn};

use super::{advance_clock, Action, ActionBase, ActionObject, Direction, FrameState};
use crate::error::{ActionError, ActionResult};
use crate::target::{DrawableRef, Texture};
use crate::timer::Timer;

/// 逐帧切换纹理
///
/// 缓动曲线把时间映射为 `[0, frame_count]` 内的位移，只作为进度值；
/// 纹理切换只看时间：距上次切换满 `interval / speed` 秒才换下一帧，
/// 因此曲线的求值频率与纹理切换频率互不相关。
/// 无效纹理（空 id 或零尺寸）不会写入目标。
///
/// 完成时正向停在最后一帧，反向停在第一帧。
#[derive(Clone)]
pub struct AnimateTexturesAction {
    base: ActionBase,
    target: Option<DrawableRef>,
    frames: Vec<Texture>,
    interval: f32,
    timer: Timer,
    cursor: usize,
    /// 上次切换纹理时的实际经过时间
    last_switch_time: f32,
    displacement: f32,
    snapshot: Option<Texture>,
    snapshot_taken: bool,
}

impl AnimateTexturesAction {
    /// 创建纹理动画
    ///
    /// 帧列表不能为空，间隔必须为正的有限值。
    pub fn new(target: DrawableRef, frames: Vec<Texture>, interval: f32) -> ActionResult<Self> {
        if frames.is_empty() {
            return Err(ActionError::EmptyFrames);
        }
        if !(interval > 0.0 && interval.is_finite()) {
            return Err(ActionError::InvalidInterval { interval });
        }

        let duration = interval * frames.len() as f32;
        Ok(Self {
            base: ActionBase::new(duration),
            target: Some(target),
            frames,
            interval,
            timer: Timer::new(),
            cursor: 0,
            last_switch_time: 0.0,
            displacement: 0.0,
            snapshot: None,
            snapshot_taken: false,
        })
    }

    pub fn frames(&self) -> &[Texture] {
        &self.frames
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// 当前显示的帧序号
    pub fn current_frame(&self) -> usize {
        self.cursor
    }

    /// 最近一次计算出的位移
    pub fn displacement(&self) -> f32 {
        self.displacement
    }

    fn show(&self, target: &DrawableRef) {
        match self.frames.get(self.cursor) {
            Some(texture) if texture.is_valid() => target.set_texture(texture),
            Some(texture) => {
                warn!(action = %self.base.name(), texture = texture.id(), "skipping invalid texture frame");
            }
            None => {}
        }
    }

    fn advance_cursor(&mut self, direction: Direction) {
        let n = self.frames.len();
        self.cursor = match direction {
            Direction::Forward => (self.cursor + 1) % n,
            Direction::Backward => (self.cursor + n - 1) % n,
        };
    }

    fn step(&mut self, direction: Direction, dt: f32) -> FrameState {
        if self.base.status().is_completed() {
            return FrameState::Completed;
        }

        let n = self.frames.len();
        let (first, ft) = advance_clock(&mut self.timer, &mut self.base, dt);

        if first {
            if let Some(target) = &self.target {
                if !self.snapshot_taken {
                    self.snapshot = target.texture();
                    self.snapshot_taken = true;
                }
            }
            self.cursor = match direction {
                Direction::Forward => 0,
                Direction::Backward => n - 1,
            };
            self.last_switch_time = 0.0;
            debug!(action = %self.base.name(), frames = n, interval = self.interval, "BEGIN");
        }

        let raw = self
            .base
            .timing_curve()
            .apply(ft.frame, 0.0, n as f32, self.base.duration());
        self.displacement = raw.clamp(0.0, n as f32);
        if self.displacement != raw {
            warn!(action = %self.base.name(), displacement = raw, "displacement clamped into frame range");
        }

        if !ft.finished && ft.delta >= self.last_switch_time + self.interval / self.base.speed() {
            self.last_switch_time = ft.delta;
            self.advance_cursor(direction);
        }

        if ft.finished {
            self.cursor = match direction {
                Direction::Forward => n - 1,
                Direction::Backward => 0,
            };
        }

        trace!(
            action = %self.base.name(),
            t = ft.frame,
            displacement = self.displacement,
            frame = self.cursor,
            "texture frame"
        );
        if let Some(target) = &self.target {
            self.show(target);
        }

        if ft.finished {
            self.timer.stop();
            self.base.set_status(FrameState::Completed)
        } else {
            FrameState::Playing
        }
    }
}

impl ActionObject for AnimateTexturesAction {
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
        self.cursor = 0;
        self.last_switch_time = 0.0;
        self.displacement = 0.0;
        if let (Some(target), Some(texture)) = (&self.target, &self.snapshot) {
            target.set_texture(texture);
        }
    }

    fn release(&mut self) {
        self.target = None;
    }

    fn duplicate(&self) -> Action {
        Action::AnimateTextures(Self {
            base: self.base.duplicate(),
            target: self.target.clone(),
            frames: self.frames.clone(),
            interval: self.interval,
            timer: Timer::new(),
            cursor: 0,
            last_switch_time: 0.0,
            displacement: 0.0,
            snapshot: None,
            snapshot_taken: false,
        })
    }
}

impl std::fmt::Debug for AnimateTexturesAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimateTexturesAction")
            .field("base", &self.base)
            .field("frames", &self.frames.len())
            .field("interval", &self.interval)
            .field("cursor", &self.cursor)
            .field("has_target", &self.target.is_some())
            .finish()
    }
}
