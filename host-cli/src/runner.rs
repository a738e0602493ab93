//! # Runner 模块
//!
//! 无窗口的固定帧率循环：每帧调用一次 `ActionPlayer::update`，
//! 并按帧号执行暂停、恢复、停止、取消等控制指令。

use std::cell::Cell;
use std::rc::Rc;

use action_runtime::{ActionPlayer, ActionResult, DrawableRef, Sprite, SpriteState};
use tracing::{debug, info};

use crate::config::HostConfig;
use crate::scenes::Scene;

/// 按帧号触发的播放器控制
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Pause,
    Resume,
    Stop,
    Cancel,
}

/// 一次演示的结果
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub scene: Scene,
    /// 实际执行的帧数
    pub frames: u32,
    /// 播放器在帧数上限之前变为空闲
    pub finished: bool,
    /// 完成回调是否触发
    pub completion_fired: bool,
    /// 结束时的精灵状态
    pub sprite: SpriteState,
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let texture = self
            .sprite
            .texture
            .as_ref()
            .map(|t| t.id().to_string())
            .unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{:<11} frames={:<5} finished={:<5} callback={:<5} pos={} size={} alpha={} texture={}",
            self.scene.name(),
            self.frames,
            self.finished,
            self.completion_fired,
            self.sprite.position,
            self.sprite.size,
            self.sprite.alpha,
            texture
        )
    }
}

/// 演示运行器
pub struct DemoRunner {
    config: HostConfig,
    controls: Vec<(u32, Control)>,
}

impl DemoRunner {
    pub fn new(config: HostConfig) -> Self {
        Self {
            config,
            controls: Vec::new(),
        }
    }

    /// 在第 `frame` 帧（从 1 开始）更新之前执行控制
    pub fn with_control(mut self, frame: u32, control: Control) -> Self {
        self.controls.push((frame, control));
        self
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// 运行一个场景直到播放器空闲或达到帧数上限
    pub fn run(&self, scene: Scene) -> ActionResult<RunReport> {
        let sprite = Rc::new(Sprite::from_state(SpriteState {
            texture: None,
            alpha: self.config.sprite.alpha,
            position: self.config.sprite.position,
            size: self.config.sprite.size,
        }));
        let target: DrawableRef = sprite.clone();

        let action = scene.build(&target, &self.config.player)?;
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);

        let mut player = ActionPlayer::with_state(self.config.player.initial_state);
        player.run_action_named_with(&action, scene.name(), move || flag.set(true))?;
        // 场景动作树与队列中的副本都持有目标，这里只保留队列中的那份
        drop(action);
        drop(target);

        let dt = self.config.frame_dt();
        info!(%scene, dt, max_frames = self.config.max_frames, "scene started");

        let mut frames = 0;
        let mut finished = false;
        while frames < self.config.max_frames {
            frames += 1;
            self.apply_controls(&mut player, scene, frames);

            if !player.update(dt) {
                finished = true;
                break;
            }
            if frames % self.config.frame_rate.max(1) == 0 {
                let state = sprite.snapshot();
                debug!(
                    %scene,
                    frames,
                    position = %state.position,
                    alpha = state.alpha,
                    "scene progress"
                );
            }
        }

        let report = RunReport {
            scene,
            frames,
            finished,
            completion_fired: fired.get(),
            sprite: sprite.snapshot(),
        };
        info!(%scene, frames, finished, "scene ended");
        Ok(report)
    }

    fn apply_controls(&self, player: &mut ActionPlayer, scene: Scene, frame: u32) {
        for &(at, control) in &self.controls {
            if at != frame {
                continue;
            }
            debug!(%scene, frame, ?control, "control");
            match control {
                Control::Pause => player.pause(),
                Control::Resume => player.resume(),
                Control::Stop => player.stop(),
                Control::Cancel => {
                    player.cancel_action(scene.name());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(frame_rate: u32) -> HostConfig {
        HostConfig {
            frame_rate,
            ..HostConfig::default()
        }
    }

    #[test]
    fn test_fade_out_finishes() {
        let report = DemoRunner::new(config(4)).run(Scene::FadeOut).unwrap();
        assert!(report.finished);
        assert!(report.completion_fired);
        assert_eq!(report.frames, 4);
        assert_eq!(report.sprite.alpha, 0);
    }

    #[test]
    fn test_frame_cap_stops_endless_run() {
        let config = HostConfig {
            max_frames: 3,
            ..config(4)
        };
        let report = DemoRunner::new(config).run(Scene::FadeOut).unwrap();
        assert!(!report.finished);
        assert!(!report.completion_fired);
        assert_eq!(report.frames, 3);
    }

    #[test]
    fn test_cancel_control() {
        let report = DemoRunner::new(config(4))
            .with_control(2, Control::Cancel)
            .run(Scene::FadeOut)
            .unwrap();
        assert!(report.finished);
        assert!(!report.completion_fired);
        assert_eq!(report.frames, 2);
        // 只推进了第 1 帧
        assert_eq!(report.sprite.alpha, 191);
    }
}
