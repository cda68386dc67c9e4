use std::any::Any;

use egui::{Pos2, Rect, TextureId, TextureHandle, Vec2};

use super::frame::{Frame, Primitive};
use super::sprite::Sprite;
use super::Stage;

/// An uploaded bitmap: texture reference plus its pixel size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Texture {
    pub id: TextureId,
    pub size: Vec2,
}

impl From<&TextureHandle> for Texture {
    fn from(handle: &TextureHandle) -> Self {
        Texture {
            id: handle.id(),
            size: handle.size_vec2(),
        }
    }
}

/// Rectangular bitmap moving linearly by its velocity.
///
/// The extent follows the texture; it is re-derived in `init` whenever `image` was replaced.
#[derive(Clone, Debug, Default)]
pub struct ImageSprite {
    pub hidden: bool,
    pub pos: Pos2,
    pub vel: Vec2,
    pub image: Option<Texture>,
    size: Vec2,
    derived_from: Option<Texture>,
    deleted: bool,
}

impl ImageSprite {
    pub fn new(pos: Pos2, image: Texture) -> Self {
        let mut sprite = ImageSprite {
            pos,
            image: Some(image),
            ..Default::default()
        };
        sprite.refresh();
        sprite
    }

    /// sprite without a bitmap; zero sized until an image is assigned
    pub fn at(pos: Pos2) -> Self {
        ImageSprite {
            pos,
            ..Default::default()
        }
    }

    pub fn refresh(&mut self) {
        if self.derived_from != self.image {
            self.derived_from = self.image;
            self.size = self.image.map(|i| i.size).unwrap_or(Vec2::ZERO);
        }
    }

    /// Moves by one velocity step. A resting sprite reports no movement.
    pub fn advance(&mut self) -> bool {
        if self.vel == Vec2::ZERO {
            return false;
        }
        self.pos += self.vel;
        true
    }

    pub fn corner(&self) -> Pos2 {
        self.pos
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn paint(&self, frame: &mut Frame) {
        if self.hidden {
            return;
        }
        if let Some(image) = self.image {
            frame.push(Primitive::Image {
                texture: image.id,
                rect: Rect::from_min_size(self.pos, self.size),
            });
        }
    }

    pub fn deleted(&self) -> bool {
        self.deleted
    }

    pub fn delete(&mut self) {
        self.deleted = true;
    }
}

impl<G: Stage> Sprite<G> for ImageSprite {
    fn init(&mut self, _game: &G) {
        self.refresh();
    }

    fn update(&mut self, _game: &mut G) -> bool {
        self.advance()
    }

    fn visible(&self) -> bool {
        !self.hidden
    }

    fn corner(&self) -> Pos2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn draw(&self, _game: &G, frame: &mut Frame) {
        self.paint(frame);
    }

    fn deleted(&self) -> bool {
        self.deleted
    }

    fn delete(&mut self) {
        self.deleted = true;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
