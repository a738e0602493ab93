//! # Queue 模块
//!
//! 动作队列：持有若干入队动作及其完成回调，每帧统一推进。
//!
//! 入队时复制动作，队列只操作副本。播放器状态按如下方式转换为动作调用：
//!
//! | 播放器状态 | 动作调用 |
//! |-----------|---------|
//! | `Running` | `next_frame(dt)`（从其他状态回到运行时先 `resume`） |
//! | `Paused`  | `pause(dt)` |
//! | `Stopped` | `rewind(dt)` |
//!
//! 完成的条目先触发回调、再 `release()`，遍历结束后统一移除。

use tracing::{debug, trace, warn};

use crate::action::{Action, ActionObject, FrameState};
use crate::error::{ActionError, ActionResult};
use crate::player::PlayerState;

/// 完成回调
pub type CompletionFn = Box<dyn FnOnce()>;

/// 队列中的一项
struct EnqueuedAction {
    action: Action,
    completion: Option<CompletionFn>,
    /// 上一次更新时观察到的播放器状态
    last_state: PlayerState,
    completed: bool,
}

/// 动作队列
#[derive(Default)]
pub struct ActionQueue {
    /// 所属播放器中的名称（仅用于日志）
    name: String,
    actions: Vec<EnqueuedAction>,
}

impl std::fmt::Debug for ActionQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionQueue")
            .field("name", &self.name)
            .field("actions", &self.actions.len())
            .finish()
    }
}

impl ActionQueue {
    /// 创建空队列
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// 入队动作的副本
    ///
    /// 调用方保留原动作，可以再次入队。空动作被拒绝，队列不变。
    pub fn enqueue_action(
        &mut self,
        action: &Action,
        completion: Option<CompletionFn>,
    ) -> ActionResult<()> {
        if action.is_null() {
            warn!(queue = %self.name, "refusing to enqueue null action");
            return Err(ActionError::NullAction);
        }

        self.actions.push(EnqueuedAction {
            action: action.duplicate(),
            completion,
            last_state: PlayerState::Running,
            completed: false,
        });
        debug!(
            queue = %self.name,
            kind = action.kind(),
            action = %action.name(),
            remaining = self.actions.len(),
            "action enqueued"
        );
        Ok(())
    }

    /// 按播放器状态推进所有条目
    ///
    /// 返回队列中是否还有条目。
    pub fn update(&mut self, player_state: PlayerState, dt: f32) -> bool {
        for entry in &mut self.actions {
            let state = match player_state {
                PlayerState::Running => {
                    if entry.last_state != PlayerState::Running {
                        entry.action.resume(dt);
                    }
                    entry.action.next_frame(dt)
                }
                PlayerState::Paused => {
                    entry.action.pause(dt);
                    FrameState::Paused
                }
                PlayerState::Stopped => {
                    entry.action.rewind(dt);
                    FrameState::Playing
                }
            };
            entry.last_state = player_state;
            trace!(queue = %self.name, action = %entry.action.name(), state = %state, dt);

            if state.is_completed() {
                if let Some(completion) = entry.completion.take() {
                    completion();
                }
                entry.action.release();
                entry.completed = true;
                debug!(queue = %self.name, action = %entry.action.name(), "queue entry erased");
            }
        }

        self.actions.retain(|entry| !entry.completed);
        !self.actions.is_empty()
    }

    /// 立即清空，不触发任何回调
    pub fn remove_actions(&mut self) {
        if !self.actions.is_empty() {
            debug!(queue = %self.name, removed = self.actions.len(), "queue cleared");
        }
        self.actions.clear();
    }

    /// 第一个尚在运行的动作
    pub fn front(&self) -> Option<&Action> {
        self.actions.first().map(|entry| &entry.action)
    }

    /// 所有尚在运行的动作
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().map(|entry| &entry.action)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::action::FadeAlphaAction;
    use crate::geometry::{Point, Size};
    use crate::target::{Drawable, Sprite};

    fn counter() -> (Rc<Cell<u32>>, CompletionFn) {
        let hits = Rc::new(Cell::new(0));
        let inner = hits.clone();
        (hits, Box::new(move || inner.set(inner.get() + 1)))
    }

    #[test]
    fn test_null_action_is_rejected() {
        let mut queue = ActionQueue::new();
        assert_eq!(
            queue.enqueue_action(&Action::null(), None),
            Err(ActionError::NullAction)
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_callback_fires_once_on_completion() {
        let (hits, completion) = counter();
        let mut queue = ActionQueue::new();
        queue.enqueue_action(&Action::wait(1.0), Some(completion)).unwrap();

        assert!(queue.update(PlayerState::Running, 0.5));
        assert_eq!(hits.get(), 0);
        assert!(!queue.update(PlayerState::Running, 0.5));
        assert_eq!(hits.get(), 1);
        assert!(!queue.update(PlayerState::Running, 0.5));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_original_action_is_untouched() {
        let original = Action::wait(1.0);
        let mut queue = ActionQueue::new();
        queue.enqueue_action(&original, None).unwrap();
        queue.enqueue_action(&original, None).unwrap();
        assert_eq!(queue.len(), 2);

        queue.update(PlayerState::Running, 1.0);
        assert!(queue.is_empty());
        assert_eq!(original.base().status(), FrameState::Playing);
    }

    #[test]
    fn test_paused_freezes_and_resume_continues() {
        let mut queue = ActionQueue::new();
        queue.enqueue_action(&Action::wait(1.0), None).unwrap();

        queue.update(PlayerState::Running, 0.5);
        for _ in 0..10 {
            assert!(queue.update(PlayerState::Paused, 1.0));
        }
        assert!(queue.update(PlayerState::Running, 0.25));
        assert!(!queue.update(PlayerState::Running, 0.25));
    }

    #[test]
    fn test_stopped_rewinds_target() {
        let sprite = Rc::new(Sprite::new(Point::zero(), Size::new(4, 4)));
        let mut queue = ActionQueue::new();
        let fade: Action = FadeAlphaAction::fade_out(sprite.clone(), 1.0).into();
        queue.enqueue_action(&fade, None).unwrap();

        queue.update(PlayerState::Running, 0.5);
        assert_ne!(sprite.alpha(), 255);
        assert!(queue.update(PlayerState::Stopped, 0.0));
        assert_eq!(sprite.alpha(), 255);
    }

    #[test]
    fn test_completed_entry_releases_target() {
        let sprite = Rc::new(Sprite::new(Point::zero(), Size::new(4, 4)));
        let fade: Action = FadeAlphaAction::fade_out(sprite.clone(), 1.0).into();
        let mut queue = ActionQueue::new();
        queue.enqueue_action(&fade, None).unwrap();
        // sprite、fade、队列中的副本
        assert_eq!(Rc::strong_count(&sprite), 3);

        queue.update(PlayerState::Running, 1.0);
        assert_eq!(Rc::strong_count(&sprite), 2);
    }

    #[test]
    fn test_remove_actions_skips_callbacks() {
        let (hits, completion) = counter();
        let mut queue = ActionQueue::new();
        queue.enqueue_action(&Action::wait(1.0), Some(completion)).unwrap();

        queue.remove_actions();
        assert!(queue.is_empty());
        assert!(!queue.update(PlayerState::Running, 5.0));
        assert_eq!(hits.get(), 0);
    }
}
