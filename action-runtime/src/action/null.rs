use super::{Action, ActionBase, ActionObject, FrameState};

/// 空动作
///
/// 任何步进都立即完成。调度器拒绝运行空动作，
/// 它只用作"无动作"的占位值。
#[derive(Debug, Clone, PartialEq)]
pub struct NullAction {
    base: ActionBase,
}

impl NullAction {
    pub fn new() -> Self {
        Self {
            base: ActionBase::new(0.0),
        }
    }
}

impl Default for NullAction {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionObject for NullAction {
    fn base(&self) -> &ActionBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase {
        &mut self.base
    }

    fn next_frame(&mut self, _dt: f32) -> FrameState {
        self.base.set_status(FrameState::Completed)
    }

    fn prev_frame(&mut self, _dt: f32) -> FrameState {
        self.base.set_status(FrameState::Completed)
    }

    fn pause(&mut self, _dt: f32) {}

    fn resume(&mut self, _dt: f32) {}

    fn rewind(&mut self, _dt: f32) {
        self.base.reset();
    }

    fn release(&mut self) {}

    fn duplicate(&self) -> Action {
        Action::Null(Self {
            base: self.base.duplicate(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_completes_immediately() {
        let mut action = NullAction::new();
        assert_eq!(action.next_frame(0.0), FrameState::Completed);
        assert_eq!(action.prev_frame(1.0), FrameState::Completed);
        assert!(action.duplicate().is_null());
    }
}
