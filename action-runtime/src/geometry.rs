//! # Geometry 模块
//!
//! 渲染空间的整数坐标与尺寸。
//!
//! 动作内部以 f32 插值，写回目标时四舍五入为整数，
//! 避免 254.99998 这类值被截断成 254。

use serde::{Deserialize, Serialize};

/// 二维整数坐标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// 创建新的坐标
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// 原点
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// 由浮点分量四舍五入得到坐标
    pub fn from_rounded(x: f32, y: f32) -> Self {
        Self {
            x: x.round() as i32,
            y: y.round() as i32,
        }
    }
}

impl std::ops::Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 二维整数尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    /// 创建新的尺寸
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// 零尺寸
    pub const fn zero() -> Self {
        Self { w: 0, h: 0 }
    }

    /// 是否为空（任一边小于等于 0）
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// 由浮点分量四舍五入得到尺寸（取绝对值）
    pub fn from_rounded(w: f32, h: f32) -> Self {
        Self {
            w: (w.round() as i32).abs(),
            h: (h.round() as i32).abs(),
        }
    }
}

impl From<(i32, i32)> for Size {
    fn from((w, h): (i32, i32)) -> Self {
        Self { w, h }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_rounding() {
        // 254.99998 应该变成 255 而不是 254
        let p = Point::from_rounded(254.99998, -10.4);
        assert_eq!(p, Point::new(255, -10));
    }

    #[test]
    fn test_point_ops() {
        let p = Point::new(3, -4);
        assert_eq!(-p, Point::new(-3, 4));
        assert_eq!(p + Point::new(1, 1), Point::new(4, -3));
    }

    #[test]
    fn test_size_rounding_is_non_negative() {
        let s = Size::from_rounded(-63.6, 31.5);
        assert_eq!(s, Size::new(64, 32));
        assert!(Size::zero().is_empty());
        assert!(!s.is_empty());
    }
}
