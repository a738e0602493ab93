//! # Timer 模块
//!
//! 动作内部使用的逻辑时钟。
//!
//! 时钟只由 `advance(dt)` 推进，累计值使用 f64 保存，
//! 长时间运行时不会出现 f32 累加误差；暂停期间推进无效。

/// 逻辑时钟
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timer {
    started: bool,
    paused: bool,
    elapsed: f64,
}

impl Timer {
    /// 创建未启动的时钟
    pub fn new() -> Self {
        Self::default()
    }

    /// 启动（从 0 开始计时）
    pub fn start(&mut self) {
        self.started = true;
        self.paused = false;
        self.elapsed = 0.0;
    }

    /// 停止并清零
    pub fn stop(&mut self) {
        self.started = false;
        self.paused = false;
        self.elapsed = 0.0;
    }

    /// 冻结计时
    pub fn pause(&mut self) {
        if self.started {
            self.paused = true;
        }
    }

    /// 解除冻结
    pub fn unpause(&mut self) {
        self.paused = false;
    }

    /// 推进时钟
    pub fn advance(&mut self, dt: f32) {
        if self.started && !self.paused && dt > 0.0 {
            self.elapsed += f64::from(dt);
        }
    }

    /// 已经过的秒数
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    /// 已经过的毫秒数
    pub fn ticks(&self) -> u64 {
        (self.elapsed * 1000.0) as u64
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }
}
