//! # Target 模块
//!
//! 动作作用的渲染对象抽象。
//!
//! 动作只负责计算值并写回目标，不负责绘制。渲染层实现 [`Drawable`]，
//! 以 [`DrawableRef`]（`Rc<dyn Drawable>`）的形式交给动作持有。
//!
//! ## 设计说明
//!
//! 与 `Animatable` 一样，`Drawable` 的写方法接收 `&self`，
//! 由实现者通过 `RefCell` 提供内部可变性。多个动作同时作用于
//! 同一目标时以最后一次写入为准，系统不做仲裁。

use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::{Point, Size};

/// 完全透明
pub const ALPHA_TRANSPARENT: u8 = 0;
/// 完全不透明
pub const ALPHA_OPAQUE: u8 = 255;

/// 纹理句柄
///
/// 只描述纹理身份与尺寸，像素数据由渲染层管理。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Texture {
    id: String,
    size: Size,
}

impl Texture {
    pub fn new(id: impl Into<String>, size: Size) -> Self {
        Self { id: id.into(), size }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// 是否可用于渲染
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.size.is_empty()
    }
}

/// 可被动作修改的渲染对象
pub trait Drawable {
    /// 当前纹理
    fn texture(&self) -> Option<Texture>;

    /// 替换纹理
    fn set_texture(&self, texture: &Texture);

    /// 当前透明度 (0 - 255)
    fn alpha(&self) -> u8;

    fn set_alpha(&self, alpha: u8);

    fn position(&self) -> Point;

    fn set_position(&self, position: Point);

    fn size(&self) -> Size;

    fn set_size(&self, size: Size);
}

/// 动作持有的目标引用
pub type DrawableRef = Rc<dyn Drawable>;

/// 精灵的内部数据
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteState {
    pub texture: Option<Texture>,
    pub alpha: u8,
    pub position: Point,
    pub size: Size,
}

impl Default for SpriteState {
    fn default() -> Self {
        Self {
            texture: None,
            alpha: ALPHA_OPAQUE,
            position: Point::zero(),
            size: Size::zero(),
        }
    }
}

/// 内存中的精灵
///
/// 无窗口宿主与测试使用的 [`Drawable`] 实现。
///
/// ```rust,ignore
/// let sprite = Rc::new(Sprite::new(Point::new(10, 10), Size::new(64, 64)));
/// let fade = FadeAlphaAction::fade_out(sprite.clone(), 1.0);
/// ```
#[derive(Debug, Default)]
pub struct Sprite {
    state: RefCell<SpriteState>,
}

impl Sprite {
    pub fn new(position: Point, size: Size) -> Self {
        Self {
            state: RefCell::new(SpriteState {
                position,
                size,
                ..SpriteState::default()
            }),
        }
    }

    /// 从现有数据创建
    pub fn from_state(state: SpriteState) -> Self {
        Self {
            state: RefCell::new(state),
        }
    }

    /// 当前状态的快照
    pub fn snapshot(&self) -> SpriteState {
        self.state.borrow().clone()
    }
}

impl Drawable for Sprite {
    fn texture(&self) -> Option<Texture> {
        self.state.borrow().texture.clone()
    }

    fn set_texture(&self, texture: &Texture) {
        self.state.borrow_mut().texture = Some(texture.clone());
    }

    fn alpha(&self) -> u8 {
        self.state.borrow().alpha
    }

    fn set_alpha(&self, alpha: u8) {
        self.state.borrow_mut().alpha = alpha;
    }

    fn position(&self) -> Point {
        self.state.borrow().position
    }

    fn set_position(&self, position: Point) {
        self.state.borrow_mut().position = position;
    }

    fn size(&self) -> Size {
        self.state.borrow().size
    }

    fn set_size(&self, size: Size) {
        self.state.borrow_mut().size = size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_validity() {
        assert!(Texture::new("walk_0", Size::new(32, 32)).is_valid());
        assert!(!Texture::new("", Size::new(32, 32)).is_valid());
        assert!(!Texture::new("walk_0", Size::zero()).is_valid());
    }

    #[test]
    fn test_sprite_shared_through_drawable_ref() {
        let sprite = Rc::new(Sprite::new(Point::new(1, 2), Size::new(8, 8)));
        let target: DrawableRef = sprite.clone();

        target.set_alpha(128);
        target.set_position(Point::new(5, 6));
        target.set_texture(&Texture::new("a", Size::new(8, 8)));

        let state = sprite.snapshot();
        assert_eq!(state.alpha, 128);
        assert_eq!(state.position, Point::new(5, 6));
        assert_eq!(state.texture.map(|t| t.id().to_string()), Some("a".to_string()));
        // 两个强引用：测试持有一个，target 持有一个
        assert_eq!(Rc::strong_count(&sprite), 2);
    }

    #[test]
    fn test_default_sprite_is_opaque() {
        let sprite = Sprite::default();
        assert_eq!(sprite.alpha(), ALPHA_OPAQUE);
        assert!(sprite.texture().is_none());
    }
}
