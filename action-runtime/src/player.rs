//! # Player 模块
//!
//! 动作播放器：按名称管理动作队列，宿主每帧调用一次 [`ActionPlayer::update`]。
//!
//! ## 延迟移除
//!
//! 取消与清理不会在遍历中直接修改映射，而是先把名称放入待移除列表，
//! 遍历结束后统一删除。被取消的队列在下一次 `update` 中不再被推进，
//! 其回调也不会触发。
//!
//! ```rust,ignore
//! let mut player = ActionPlayer::new();
//! player.run_action_named(&fade, "fade")?;
//! while player.update(1.0 / 60.0) {}
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::action::{Action, ActionObject};
use crate::error::{ActionError, ActionResult};
use crate::queue::{ActionQueue, CompletionFn};

/// 播放器全局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    /// 正常推进
    #[default]
    Running,
    /// 冻结所有动作
    Paused,
    /// 每帧把所有动作倒带到起点
    Stopped,
}

impl PlayerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Paused => "PAUSED",
            Self::Stopped => "STOPPED",
        }
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 动作播放器
pub struct ActionPlayer {
    /// 名称 -> 队列
    queues: HashMap<String, ActionQueue>,
    /// 等待在本轮更新结束后移除的队列名
    free_list: Vec<String>,
    player_state: PlayerState,
    /// 未命名动作的编号
    next_id: u64,
}

impl Default for ActionPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ActionPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionPlayer")
            .field("queues", &self.queues.len())
            .field("pending_removal", &self.free_list.len())
            .field("player_state", &self.player_state)
            .finish()
    }
}

impl ActionPlayer {
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
            free_list: Vec::new(),
            player_state: PlayerState::Running,
            next_id: 1,
        }
    }

    /// 以指定初始状态创建
    pub fn with_state(player_state: PlayerState) -> Self {
        Self {
            player_state,
            ..Self::new()
        }
    }

    // ========== 运行 ==========

    /// 运行动作
    ///
    /// 名称取动作自身的名称；动作未命名时自动生成。
    pub fn run_action(&mut self, action: &Action) -> ActionResult<()> {
        self.run_action_in(action, None, None, ActionQueue::new())
    }

    /// 以指定名称运行动作
    ///
    /// 同名队列已存在时直接替换，旧队列中的动作被丢弃且不触发回调。
    pub fn run_action_named(&mut self, action: &Action, name: &str) -> ActionResult<()> {
        self.run_action_in(action, Some(name), None, ActionQueue::new())
    }

    /// 运行动作，完成时调用 `completion`
    pub fn run_action_with(
        &mut self,
        action: &Action,
        completion: impl FnOnce() + 'static,
    ) -> ActionResult<()> {
        self.run_action_in(action, None, Some(Box::new(completion)), ActionQueue::new())
    }

    /// 以指定名称运行动作，完成时调用 `completion`
    pub fn run_action_named_with(
        &mut self,
        action: &Action,
        name: &str,
        completion: impl FnOnce() + 'static,
    ) -> ActionResult<()> {
        self.run_action_in(
            action,
            Some(name),
            Some(Box::new(completion)),
            ActionQueue::new(),
        )
    }

    /// 把动作放入调用方提供的队列并登记
    ///
    /// 其余 `run_action*` 方法都经由这里。空动作返回
    /// [`ActionError::NullAction`]，播放器状态不变。
    pub fn run_action_in(
        &mut self,
        action: &Action,
        name: Option<&str>,
        completion: Option<CompletionFn>,
        mut queue: ActionQueue,
    ) -> ActionResult<()> {
        if action.is_null() {
            warn!("refusing to run null action");
            return Err(ActionError::NullAction);
        }

        let name = self.resolve_name(name, action);
        queue.set_name(&name);
        queue.enqueue_action(action, completion)?;

        // 本帧刚取消又重新运行的名称不再移除
        self.free_list.retain(|pending| pending != &name);

        if let Some(replaced) = self.queues.insert(name.clone(), queue) {
            warn!(
                queue = %name,
                abandoned = replaced.len(),
                "name already running, replacing queue"
            );
        }
        debug!(queue = %name, kind = action.kind(), "action running");
        Ok(())
    }

    fn resolve_name(&mut self, name: Option<&str>, action: &Action) -> String {
        match name {
            Some(name) => name.to_string(),
            None if !action.name().is_empty() => action.name().to_string(),
            None => {
                let id = self.next_id;
                self.next_id += 1;
                format!("__action_{id}")
            }
        }
    }

    // ========== 取消 ==========

    /// 取消指定名称的队列
    ///
    /// 队列在下一次 `update` 结束时移除，不触发回调。返回名称是否存在。
    pub fn cancel_action(&mut self, name: &str) -> bool {
        if !self.queues.contains_key(name) {
            return false;
        }
        if !self.free_list.iter().any(|pending| pending == name) {
            self.free_list.push(name.to_string());
            debug!(queue = %name, "action cancelled");
        }
        true
    }

    /// 取消所有队列
    pub fn cancel_actions(&mut self) {
        for name in self.queues.keys() {
            if !self.free_list.contains(name) {
                self.free_list.push(name.clone());
            }
        }
        debug!(pending = self.free_list.len(), "all actions cancelled");
    }

    // ========== 更新 ==========

    /// 推进所有队列
    ///
    /// 返回是否仍有队列存在。
    pub fn update(&mut self, dt: f32) -> bool {
        for (name, queue) in &mut self.queues {
            if self.free_list.contains(name) {
                continue;
            }
            if !queue.update(self.player_state, dt) {
                self.free_list.push(name.clone());
            }
        }

        for name in self.free_list.drain(..) {
            if self.queues.remove(&name).is_some() {
                debug!(queue = %name, "queue erased");
            }
        }

        !self.queues.is_empty()
    }

    // ========== 查询 ==========

    /// 指定名称的队列是否在运行（已取消的不算）
    pub fn action_running(&self, name: &str) -> bool {
        self.queues.contains_key(name) && !self.is_pending_removal(name)
    }

    /// 指定名称队列中的第一个动作
    pub fn action(&self, name: &str) -> Option<&Action> {
        if self.is_pending_removal(name) {
            return None;
        }
        self.queues.get(name)?.front()
    }

    /// 运行中的队列数量（已取消的不算）
    pub fn num_actions(&self) -> usize {
        self.queues
            .keys()
            .filter(|name| !self.is_pending_removal(name))
            .count()
    }

    /// 没有队列，也没有待移除的名称
    pub fn idle(&self) -> bool {
        self.queues.is_empty() && self.free_list.is_empty()
    }

    fn is_pending_removal(&self, name: &str) -> bool {
        self.free_list.iter().any(|pending| pending == name)
    }

    // ========== 状态 ==========

    pub fn player_state(&self) -> PlayerState {
        self.player_state
    }

    pub fn set_player_state(&mut self, player_state: PlayerState) {
        if self.player_state != player_state {
            debug!(from = %self.player_state, to = %player_state, "player state changed");
        }
        self.player_state = player_state;
    }

    pub fn pause(&mut self) {
        self.set_player_state(PlayerState::Paused);
    }

    pub fn resume(&mut self) {
        self.set_player_state(PlayerState::Running);
    }

    pub fn stop(&mut self) {
        self.set_player_state(PlayerState::Stopped);
    }
}
