//! # Functions 模块
//!
//! Robert Penner 缓动公式。
//!
//! 所有函数签名一致：`f(t, b, c, d)`
//! - `t`: 已经过的时间（调用方负责限制在 `[0, d]`）
//! - `b`: 起始值
//! - `c`: 总变化量
//! - `d`: 总时长（与 `t` 单位一致，必须大于 0）
//!
//! 除 Back / Bounce / Elastic 外均单调；这三族会过冲或振荡，
//! 但端点仍满足 `f(0) == b`、`f(d) == b + c`。

use std::f32::consts::PI;

/// 一次幂（匀速）
pub mod linear {
    pub fn ease_in(t: f32, b: f32, c: f32, d: f32) -> f32 {
        c * t / d + b
    }

    pub fn ease_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        c * t / d + b
    }

    pub fn ease_in_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        c * t / d + b
    }
}

/// 二次幂
pub mod quad {
    pub fn ease_in(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let t = t / d;
        c * t * t + b
    }

    pub fn ease_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let t = t / d;
        -c * t * (t - 2.0) + b
    }

    pub fn ease_in_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let t = t / (d / 2.0);
        if t < 1.0 {
            c / 2.0 * t * t + b
        } else {
            let t = t - 1.0;
            -c / 2.0 * (t * (t - 2.0) - 1.0) + b
        }
    }
}

/// 三次幂
pub mod cubic {
    pub fn ease_in(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let t = t / d;
        c * t * t * t + b
    }

    pub fn ease_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let t = t / d - 1.0;
        c * (t * t * t + 1.0) + b
    }

    pub fn ease_in_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let t = t / (d / 2.0);
        if t < 1.0 {
            c / 2.0 * t * t * t + b
        } else {
            let t = t - 2.0;
            c / 2.0 * (t * t * t + 2.0) + b
        }
    }
}

/// 四次幂
pub mod quart {
    pub fn ease_in(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let t = t / d;
        c * t.powi(4) + b
    }

    pub fn ease_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let t = t / d - 1.0;
        -c * (t.powi(4) - 1.0) + b
    }

    pub fn ease_in_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let t = t / (d / 2.0);
        if t < 1.0 {
            c / 2.0 * t.powi(4) + b
        } else {
            let t = t - 2.0;
            -c / 2.0 * (t.powi(4) - 2.0) + b
        }
    }
}

/// 五次幂（也称 Strong）
pub mod quint {
    pub fn ease_in(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let t = t / d;
        c * t.powi(5) + b
    }

    pub fn ease_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let t = t / d - 1.0;
        c * (t.powi(5) + 1.0) + b
    }

    pub fn ease_in_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let t = t / (d / 2.0);
        if t < 1.0 {
            c / 2.0 * t.powi(5) + b
        } else {
            let t = t - 2.0;
            c / 2.0 * (t.powi(5) + 2.0) + b
        }
    }
}

/// 正弦
pub mod sine {
    use super::PI;

    pub fn ease_in(t: f32, b: f32, c: f32, d: f32) -> f32 {
        -c * (t / d * (PI / 2.0)).cos() + c + b
    }

    pub fn ease_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        c * (t / d * (PI / 2.0)).sin() + b
    }

    pub fn ease_in_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        -c / 2.0 * ((PI * t / d).cos() - 1.0) + b
    }
}

/// 圆弧
pub mod circ {
    /// 浮点误差可能让根号下出现极小负数
    fn root(x: f32) -> f32 {
        x.max(0.0).sqrt()
    }

    pub fn ease_in(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let t = t / d;
        -c * (root(1.0 - t * t) - 1.0) + b
    }

    pub fn ease_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let t = t / d - 1.0;
        c * root(1.0 - t * t) + b
    }

    pub fn ease_in_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let t = t / (d / 2.0);
        if t < 1.0 {
            -c / 2.0 * (root(1.0 - t * t) - 1.0) + b
        } else {
            let t = t - 2.0;
            c / 2.0 * (root(1.0 - t * t) + 1.0) + b
        }
    }
}

/// 指数
///
/// 端点单独处理：公式本身在 `t == 0` 时只逼近 `b`。
pub mod expo {
    pub fn ease_in(t: f32, b: f32, c: f32, d: f32) -> f32 {
        if t == 0.0 {
            b
        } else {
            c * 2f32.powf(10.0 * (t / d - 1.0)) + b
        }
    }

    pub fn ease_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        if t == d {
            b + c
        } else {
            c * (-(2f32.powf(-10.0 * t / d)) + 1.0) + b
        }
    }

    pub fn ease_in_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        if t == 0.0 {
            return b;
        }
        if t == d {
            return b + c;
        }
        let t = t / (d / 2.0);
        if t < 1.0 {
            c / 2.0 * 2f32.powf(10.0 * (t - 1.0)) + b
        } else {
            c / 2.0 * (-(2f32.powf(-10.0 * (t - 1.0))) + 2.0) + b
        }
    }
}

/// 回退（先反向过冲再前进）
pub mod back {
    /// 约 10% 的过冲量
    const OVERSHOOT: f32 = 1.70158;

    pub fn ease_in(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let s = OVERSHOOT;
        let t = t / d;
        c * t * t * ((s + 1.0) * t - s) + b
    }

    pub fn ease_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let s = OVERSHOOT;
        let t = t / d - 1.0;
        c * (t * t * ((s + 1.0) * t + s) + 1.0) + b
    }

    pub fn ease_in_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let s = OVERSHOOT * 1.525;
        let t = t / (d / 2.0);
        if t < 1.0 {
            c / 2.0 * (t * t * ((s + 1.0) * t - s)) + b
        } else {
            let t = t - 2.0;
            c / 2.0 * (t * t * ((s + 1.0) * t + s) + 2.0) + b
        }
    }
}

/// 弹跳
pub mod bounce {
    pub fn ease_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        let n1 = 7.5625;
        let d1 = 2.75;
        let t = t / d;

        if t < 1.0 / d1 {
            c * (n1 * t * t) + b
        } else if t < 2.0 / d1 {
            let t = t - 1.5 / d1;
            c * (n1 * t * t + 0.75) + b
        } else if t < 2.5 / d1 {
            let t = t - 2.25 / d1;
            c * (n1 * t * t + 0.9375) + b
        } else {
            let t = t - 2.625 / d1;
            c * (n1 * t * t + 0.984375) + b
        }
    }

    pub fn ease_in(t: f32, b: f32, c: f32, d: f32) -> f32 {
        c - ease_out(d - t, 0.0, c, d) + b
    }

    pub fn ease_in_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        if t < d / 2.0 {
            ease_in(t * 2.0, 0.0, c, d) * 0.5 + b
        } else {
            ease_out(t * 2.0 - d, 0.0, c, d) * 0.5 + c * 0.5 + b
        }
    }
}

/// 弹性（正弦振荡并指数衰减）
pub mod elastic {
    use super::PI;

    pub fn ease_in(t: f32, b: f32, c: f32, d: f32) -> f32 {
        if t == 0.0 {
            return b;
        }
        let t = t / d;
        if t == 1.0 {
            return b + c;
        }
        let p = d * 0.3;
        let s = p / 4.0;
        let t = t - 1.0;
        let post_fix = c * 2f32.powf(10.0 * t);
        -(post_fix * ((t * d - s) * (2.0 * PI) / p).sin()) + b
    }

    pub fn ease_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        if t == 0.0 {
            return b;
        }
        let t = t / d;
        if t == 1.0 {
            return b + c;
        }
        let p = d * 0.3;
        let s = p / 4.0;
        c * 2f32.powf(-10.0 * t) * ((t * d - s) * (2.0 * PI) / p).sin() + c + b
    }

    pub fn ease_in_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
        if t == 0.0 {
            return b;
        }
        let t = t / (d / 2.0);
        if t == 2.0 {
            return b + c;
        }
        let p = d * (0.3 * 1.5);
        let s = p / 4.0;
        let t = t - 1.0;
        if t < 0.0 {
            -0.5 * (c * 2f32.powf(10.0 * t) * ((t * d - s) * (2.0 * PI) / p).sin()) + b
        } else {
            c * 2f32.powf(-10.0 * t) * ((t * d - s) * (2.0 * PI) / p).sin() * 0.5 + c + b
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 与经典 Penner 测试表一致：d = 2500ms, b = 100, c = 200
    const D: f32 = 2500.0;
    const B: f32 = 100.0;
    const C: f32 = 200.0;

    fn approx(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-2,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_linear_table() {
        approx(linear::ease_in(10.0, B, C, D), 100.8);
        approx(linear::ease_out(250.0, B, C, D), 120.0);
        approx(linear::ease_in_out(1000.0, B, C, D), 180.0);
    }

    #[test]
    fn test_quad_table() {
        approx(quad::ease_in(10.0, B, C, D), 100.0032);
        approx(quad::ease_in(50.0, B, C, D), 100.08);
        approx(quad::ease_in(1000.0, B, C, D), 132.0);
        approx(quad::ease_out(1000.0, B, C, D), 228.0);
        approx(quad::ease_in_out(500.0, B, C, D), 116.0);
        approx(quad::ease_in_out(2000.0, B, C, D), 284.0);
    }

    #[test]
    fn test_cubic_and_quart_midpoint() {
        // 缓入缓出在中点经过一半的变化量
        approx(cubic::ease_in_out(D / 2.0, B, C, D), 200.0);
        approx(quart::ease_in_out(D / 2.0, B, C, D), 200.0);
        approx(quint::ease_in_out(D / 2.0, B, C, D), 200.0);
        approx(cubic::ease_in(1250.0, B, C, D), 125.0);
        approx(cubic::ease_out(1250.0, B, C, D), 275.0);
    }

    #[test]
    fn test_sine_table() {
        approx(sine::ease_in_out(1250.0, B, C, D), 200.0);
        approx(sine::ease_out(1250.0, B, C, D), 100.0 + 200.0 * (PI / 4.0).sin());
    }

    #[test]
    fn test_back_overshoots_below_start() {
        // Back 缓入开始阶段会先向反方向移动
        assert!(back::ease_in(500.0, B, C, D) < B);
        // Back 缓出结束前会越过终点
        assert!(back::ease_out(2000.0, B, C, D) > B + C);
    }

    #[test]
    fn test_elastic_oscillates() {
        let samples: Vec<f32> = (1..25)
            .map(|i| elastic::ease_out(i as f32 * 100.0, B, C, D))
            .collect();
        assert!(samples.iter().any(|v| *v > B + C));
    }

    #[test]
    fn test_bounce_is_non_monotonic() {
        let samples: Vec<f32> = (0..=100)
            .map(|i| bounce::ease_out(i as f32 * 25.0, B, C, D))
            .collect();
        let decreasing = samples.windows(2).any(|w| w[1] < w[0]);
        assert!(decreasing);
    }
}
