use std::any::Any;

use egui::{Color32, Pos2, Rect, Vec2};

use super::frame::Frame;
use super::sprite::Sprite;
use super::Stage;

/// Solid color filled rectangle.
///
/// The fill is rasterized lazily in `init`, only when size or color changed since the last call.
#[derive(Clone, Debug)]
pub struct RectSprite {
    pub hidden: bool,
    pub pos: Pos2,
    pub size: Vec2,
    pub color: Color32,
    raster: Raster,
    deleted: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct Raster {
    size: Vec2,
    color: Color32,
    /// fill rect relative to the sprite corner; none for empty sizes
    fill: Option<Rect>,
}

impl RectSprite {
    pub fn new(pos: Pos2, size: Vec2, color: Color32) -> Self {
        let mut sprite = RectSprite {
            hidden: false,
            pos,
            size,
            color,
            raster: Raster {
                size: Vec2::ZERO,
                color: Color32::TRANSPARENT,
                fill: None,
            },
            deleted: false,
        };
        sprite.refresh();
        sprite
    }

    pub fn refresh(&mut self) {
        if self.raster.size != self.size || self.raster.color != self.color {
            let fill = (self.size.x > 0.0 && self.size.y > 0.0).then(|| Rect::from_min_size(Pos2::ZERO, self.size));
            self.raster = Raster {
                size: self.size,
                color: self.color,
                fill,
            };
        }
    }

    /// Extent as of the last `refresh`
    pub fn corner(&self) -> Pos2 {
        self.pos
    }

    pub fn extent(&self) -> Vec2 {
        self.raster.size
    }

    pub fn paint(&self, frame: &mut Frame) {
        if self.hidden || self.raster.color == Color32::TRANSPARENT {
            return;
        }
        if let Some(fill) = self.raster.fill {
            frame.fill(fill.translate(self.pos.to_vec2()), self.raster.color);
        }
    }

    pub fn deleted(&self) -> bool {
        self.deleted
    }

    pub fn delete(&mut self) {
        self.deleted = true;
    }
}

impl<G: Stage> Sprite<G> for RectSprite {
    fn init(&mut self, _game: &G) {
        self.refresh();
    }

    fn update(&mut self, _game: &mut G) -> bool {
        false
    }

    fn visible(&self) -> bool {
        !self.hidden
    }

    fn corner(&self) -> Pos2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.raster.size
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
