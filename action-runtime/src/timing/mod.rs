//! # Timing 模块
//!
//! 缓动曲线库，供叶子动作计算插值。
//!
//! - [`functions`]：按族划分的 Penner 公式（纯函数）
//! - [`TimingCurve`]：具名曲线，可序列化，也可包装自定义函数
//!
//! 曲线无状态，同一个 `TimingCurve` 可以被任意多个动作共享。

pub mod functions;

use serde::{Deserialize, Serialize};

use functions::{back, bounce, circ, cubic, elastic, expo, linear, quad, quart, quint, sine};

/// 缓动函数签名 `f(t, b, c, d)`
pub type TimingCurveFn = fn(f32, f32, f32, f32) -> f32;

/// 具名缓动曲线
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingCurve {
    LinearEaseIn,
    LinearEaseOut,
    #[default]
    LinearEaseInOut,
    QuadEaseIn,
    QuadEaseOut,
    QuadEaseInOut,
    CubicEaseIn,
    CubicEaseOut,
    CubicEaseInOut,
    QuartEaseIn,
    QuartEaseOut,
    QuartEaseInOut,
    QuintEaseIn,
    QuintEaseOut,
    QuintEaseInOut,
    SineEaseIn,
    SineEaseOut,
    SineEaseInOut,
    CircEaseIn,
    CircEaseOut,
    CircEaseInOut,
    ExpoEaseIn,
    ExpoEaseOut,
    ExpoEaseInOut,
    BackEaseIn,
    BackEaseOut,
    BackEaseInOut,
    BounceEaseIn,
    BounceEaseOut,
    BounceEaseInOut,
    ElasticEaseIn,
    ElasticEaseOut,
    ElasticEaseInOut,
    /// 用户提供的函数（不参与序列化）
    #[serde(skip)]
    Custom(TimingCurveFn),
}

impl TimingCurve {
    /// 所有具名曲线
    pub const NAMED: [TimingCurve; 33] = [
        Self::LinearEaseIn,
        Self::LinearEaseOut,
        Self::LinearEaseInOut,
        Self::QuadEaseIn,
        Self::QuadEaseOut,
        Self::QuadEaseInOut,
        Self::CubicEaseIn,
        Self::CubicEaseOut,
        Self::CubicEaseInOut,
        Self::QuartEaseIn,
        Self::QuartEaseOut,
        Self::QuartEaseInOut,
        Self::QuintEaseIn,
        Self::QuintEaseOut,
        Self::QuintEaseInOut,
        Self::SineEaseIn,
        Self::SineEaseOut,
        Self::SineEaseInOut,
        Self::CircEaseIn,
        Self::CircEaseOut,
        Self::CircEaseInOut,
        Self::ExpoEaseIn,
        Self::ExpoEaseOut,
        Self::ExpoEaseInOut,
        Self::BackEaseIn,
        Self::BackEaseOut,
        Self::BackEaseInOut,
        Self::BounceEaseIn,
        Self::BounceEaseOut,
        Self::BounceEaseInOut,
        Self::ElasticEaseIn,
        Self::ElasticEaseOut,
        Self::ElasticEaseInOut,
    ];

    /// 取得底层函数
    pub fn as_fn(&self) -> TimingCurveFn {
        match self {
            Self::LinearEaseIn => linear::ease_in,
            Self::LinearEaseOut => linear::ease_out,
            Self::LinearEaseInOut => linear::ease_in_out,
            Self::QuadEaseIn => quad::ease_in,
            Self::QuadEaseOut => quad::ease_out,
            Self::QuadEaseInOut => quad::ease_in_out,
            Self::CubicEaseIn => cubic::ease_in,
            Self::CubicEaseOut => cubic::ease_out,
            Self::CubicEaseInOut => cubic::ease_in_out,
            Self::QuartEaseIn => quart::ease_in,
            Self::QuartEaseOut => quart::ease_out,
            Self::QuartEaseInOut => quart::ease_in_out,
            Self::QuintEaseIn => quint::ease_in,
            Self::QuintEaseOut => quint::ease_out,
            Self::QuintEaseInOut => quint::ease_in_out,
            Self::SineEaseIn => sine::ease_in,
            Self::SineEaseOut => sine::ease_out,
            Self::SineEaseInOut => sine::ease_in_out,
            Self::CircEaseIn => circ::ease_in,
            Self::CircEaseOut => circ::ease_out,
            Self::CircEaseInOut => circ::ease_in_out,
            Self::ExpoEaseIn => expo::ease_in,
            Self::ExpoEaseOut => expo::ease_out,
            Self::ExpoEaseInOut => expo::ease_in_out,
            Self::BackEaseIn => back::ease_in,
            Self::BackEaseOut => back::ease_out,
            Self::BackEaseInOut => back::ease_in_out,
            Self::BounceEaseIn => bounce::ease_in,
            Self::BounceEaseOut => bounce::ease_out,
            Self::BounceEaseInOut => bounce::ease_in_out,
            Self::ElasticEaseIn => elastic::ease_in,
            Self::ElasticEaseOut => elastic::ease_out,
            Self::ElasticEaseInOut => elastic::ease_in_out,
            Self::Custom(f) => *f,
        }
    }

    /// 计算插值
    ///
    /// `t` 会被限制在 `[0, d]`；`d <= 0` 时直接返回终点值 `b + c`。
    pub fn apply(&self, t: f32, b: f32, c: f32, d: f32) -> f32 {
        if d <= 0.0 {
            return b + c;
        }
        let t = t.clamp(0.0, d);
        (self.as_fn())(t, b, c, d)
    }

    /// 是否为会过冲或振荡的曲线族
    pub fn is_oscillating(&self) -> bool {
        matches!(
            self,
            Self::BackEaseIn
                | Self::BackEaseOut
                | Self::BackEaseInOut
                | Self::BounceEaseIn
                | Self::BounceEaseOut
                | Self::BounceEaseInOut
                | Self::ElasticEaseIn
                | Self::ElasticEaseOut
                | Self::ElasticEaseInOut
        )
    }
}

impl PartialEq for TimingCurve {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => std::ptr::fn_addr_eq(*a, *b),
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

impl From<TimingCurveFn> for TimingCurve {
    fn from(f: TimingCurveFn) -> Self {
        Self::Custom(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_of_every_named_curve() {
        let (b, c, d) = (100.0_f32, 200.0_f32, 2.5_f32);
        for curve in TimingCurve::NAMED {
            let start = curve.apply(0.0, b, c, d);
            let end = curve.apply(d, b, c, d);
            assert!((start - b).abs() < 1e-3, "{curve:?} start = {start}");
            assert!((end - (b + c)).abs() < 1e-3, "{curve:?} end = {end}");
        }
    }

    #[test]
    fn test_negative_delta_endpoints() {
        for curve in TimingCurve::NAMED {
            let end = curve.apply(1.0, 255.0, -255.0, 1.0);
            assert!(end.abs() < 1e-3, "{curve:?} end = {end}");
        }
    }

    #[test]
    fn test_clamp_out_of_domain() {
        let curve = TimingCurve::QuadEaseOut;
        assert_eq!(curve.apply(-1.0, 0.0, 10.0, 2.0), 0.0);
        assert!((curve.apply(5.0, 0.0, 10.0, 2.0) - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_duration_jumps_to_end() {
        assert_eq!(TimingCurve::CubicEaseIn.apply(0.0, 3.0, 4.0, 0.0), 7.0);
    }

    #[test]
    fn test_custom_curve() {
        fn step(t: f32, b: f32, c: f32, d: f32) -> f32 {
            if t < d { b } else { b + c }
        }
        let curve = TimingCurve::from(step as TimingCurveFn);
        assert_eq!(curve.apply(0.5, 1.0, 1.0, 1.0), 1.0);
        assert_eq!(curve.apply(1.0, 1.0, 1.0, 1.0), 2.0);
        assert!(matches!(curve, TimingCurve::Custom(_)));
        assert_ne!(curve, TimingCurve::LinearEaseIn);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&TimingCurve::BounceEaseInOut).unwrap();
        assert_eq!(json, "\"bounce_ease_in_out\"");
        let curve: TimingCurve = serde_json::from_str("\"elastic_ease_out\"").unwrap();
        assert_eq!(curve, TimingCurve::ElasticEaseOut);
    }

    #[test]
    fn test_oscillating_families() {
        assert!(TimingCurve::ElasticEaseIn.is_oscillating());
        assert!(!TimingCurve::SineEaseInOut.is_oscillating());
        assert_eq!(TimingCurve::default(), TimingCurve::LinearEaseInOut);
    }
}
