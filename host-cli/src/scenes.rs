//! # Scenes 模块
//!
//! 演示场景：每个场景把若干动作组合成一个顶层动作，作用于同一个精灵。

use std::rc::Rc;

use action_runtime::{
    Action, ActionResult, AnimateTexturesAction, CallbackAction, Drawable, DrawableRef,
    FadeAlphaAction, MoveByAction, Point, ScaleByAction, Size, Texture,
};
use clap::ValueEnum;
use tracing::info;

use crate::config::PlayerConfig;

/// 走路循环的帧数
const WALK_FRAMES: usize = 8;
/// 走路循环的帧间隔（秒）
const WALK_INTERVAL: f32 = 0.1;

/// 演示场景
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scene {
    /// 淡出
    FadeOut,
    /// 边移动边淡入
    SlideIn,
    /// 逐帧纹理循环三次
    WalkCycle,
    /// 淡入、停顿、上移，最后执行回调
    Intro,
    /// 透明度呼吸三次
    Pulse,
    /// 放大再缩回
    Breathe,
    /// 反向播放位移
    Rewind,
}

impl Scene {
    pub const ALL: [Scene; 7] = [
        Scene::FadeOut,
        Scene::SlideIn,
        Scene::WalkCycle,
        Scene::Intro,
        Scene::Pulse,
        Scene::Breathe,
        Scene::Rewind,
    ];

    /// 场景名，同时用作播放器中的队列名
    pub fn name(&self) -> &'static str {
        match self {
            Scene::FadeOut => "fade-out",
            Scene::SlideIn => "slide-in",
            Scene::WalkCycle => "walk-cycle",
            Scene::Intro => "intro",
            Scene::Pulse => "pulse",
            Scene::Breathe => "breathe",
            Scene::Rewind => "rewind",
        }
    }

    /// 构建场景的顶层动作
    ///
    /// 播放器配置中的速度与缓动曲线应用到整棵动作树。
    pub fn build(&self, target: &DrawableRef, player: &PlayerConfig) -> ActionResult<Action> {
        let action: Action = match self {
            Scene::FadeOut => FadeAlphaAction::fade_out(target.clone(), 1.0).into(),
            Scene::SlideIn => Action::group(vec![
                MoveByAction::new(target.clone(), Point::new(200, 0), 0.75).into(),
                FadeAlphaAction::fade_in(target.clone(), 0.75).into(),
            ]),
            Scene::WalkCycle => {
                let frames = (0..WALK_FRAMES)
                    .map(|i| Texture::new(format!("walk_{i}"), Size::new(32, 48)))
                    .collect();
                let walk = AnimateTexturesAction::new(target.clone(), frames, WALK_INTERVAL)?;
                Action::repeat(walk.into(), 3)
            }
            Scene::Intro => Action::sequence(vec![
                FadeAlphaAction::fade_in(target.clone(), 0.5).into(),
                Action::wait(0.25),
                MoveByAction::new(target.clone(), Point::new(0, -40), 0.5).into(),
                intro_banner(target).into(),
            ]),
            Scene::Pulse => Action::repeat(
                Action::sequence(vec![
                    FadeAlphaAction::fade_by(target.clone(), -128.0, 0.3).into(),
                    FadeAlphaAction::fade_by(target.clone(), 128.0, 0.3).into(),
                ]),
                3,
            ),
            Scene::Breathe => Action::repeat(
                Action::sequence(vec![
                    ScaleByAction::uniform(target.clone(), 1.25, 0.4).into(),
                    ScaleByAction::uniform(target.clone(), -1.25, 0.4).into(),
                ]),
                2,
            ),
            Scene::Rewind => {
                Action::reversed(MoveByAction::new(target.clone(), Point::new(120, 0), 0.5).into())
            }
        };

        Ok(action
            .with_name(self.name())
            .with_speed(player.speed)
            .with_timing_curve(player.timing_curve))
    }
}

fn intro_banner(target: &DrawableRef) -> CallbackAction {
    let target = Rc::clone(target);
    CallbackAction::once(move || {
        info!(position = %target.position(), alpha = target.alpha(), "intro finished");
    })
}

impl std::fmt::Display for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
