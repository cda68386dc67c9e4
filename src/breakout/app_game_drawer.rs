use egui::{pos2, Align2, Color32, Painter, Pos2, Rect, Rounding, Vec2};

use crate::engine::{Frame, Primitive};

/// Replays a playfield `Frame` onto an egui painter.
///
/// The playfield is scaled uniformly to fit the canvas and centered in it.
pub struct AppGameDrawer {
    canvas: Rect,
    scale: f32,
    offset: Vec2,
}

impl AppGameDrawer {
    pub fn new(canvas: Rect, field_size: Vec2) -> Self {
        let scale = (canvas.width() / field_size.x).min(canvas.height() / field_size.y);
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        let offset = canvas.min.to_vec2() + (canvas.size() - field_size * scale) / 2.0;
        Self { canvas, scale, offset }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// field position => canvas position
    pub fn scale_pos(&self, pos: Pos2) -> Pos2 {
        (pos.to_vec2() * self.scale + self.offset).to_pos2()
    }

    pub fn scale_rect(&self, rect: Rect) -> Rect {
        Rect::from_two_pos(self.scale_pos(rect.min), self.scale_pos(rect.max))
    }

    /// canvas position => field position
    pub fn to_field(&self, pos: Pos2) -> Pos2 {
        ((pos.to_vec2() - self.offset) / self.scale).to_pos2()
    }

    /// the playfield area on the canvas
    pub fn field_rect(&self, field_size: Vec2) -> Rect {
        self.scale_rect(Rect::from_min_size(Pos2::ZERO, field_size))
    }

    pub fn paint(&self, painter: &Painter, frame: &Frame) {
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        for primitive in frame.primitives() {
            match primitive {
                Primitive::Fill { rect, color } => {
                    painter.rect_filled(self.scale_rect(*rect), Rounding::none(), *color);
                }
                Primitive::Image { texture, rect } => {
                    painter.image(*texture, self.scale_rect(*rect), uv, Color32::WHITE);
                }
                Primitive::Text { pos, text, font, color } => {
                    let mut font = font.clone();
                    font.size *= self.scale;
                    painter.text(self.scale_pos(*pos), Align2::LEFT_TOP, text, font, *color);
                }
            }
        }
        log::trace!("painted {} primitives onto {:?}", frame.len(), self.canvas);
    }
}
