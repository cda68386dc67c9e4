use std::any::Any;

use egui::{Color32, Pos2, Vec2};
use itertools::iproduct;

use crate::engine::{AaBB, CollideDirection, Frame, RectSprite, Sprite};

use super::ball::Ball;
use super::config::GameConfig;
use super::session::Session;

/// block color per row, from top to bottom; repeats for more rows
pub const ROW_COLORS: [Color32; 5] = [
    Color32::from_rgb(0xD0, 0x40, 0x40),
    Color32::from_rgb(0xD8, 0x80, 0x30),
    Color32::from_rgb(0xC8, 0xB8, 0x30),
    Color32::from_rgb(0x50, 0xB0, 0x50),
    Color32::from_rgb(0x40, 0x80, 0xD0),
];

/// Stationary target. Vanishes on the first ball hit.
pub struct Block {
    rect: RectSprite,
}

impl Block {
    pub fn new(pos: Pos2, size: Vec2, color: Color32) -> Self {
        Block {
            rect: RectSprite::new(pos, size, color),
        }
    }

    pub fn bounds(&self) -> AaBB {
        AaBB::from_corner_size(self.rect.corner(), self.rect.extent())
    }

    /// Removes the block and scores the hit.
    /// Returns the side of the block the ball came from, which decides the axis the ball bounces on.
    pub fn strike(&mut self, ball: &AaBB, session: &mut Session) -> CollideDirection {
        let direction = CollideDirection::of(ball, &self.bounds());
        if !self.rect.deleted() {
            self.rect.delete();
            session.score += 1;
            session.blocks_left = session.blocks_left.saturating_sub(1);
            log::debug!("block hit from {direction:?}, {} left", session.blocks_left);
        }
        direction
    }
}

/// Lays out a full wall of blocks, horizontally centered in the field.
pub fn block_wall(config: &GameConfig) -> Vec<Block> {
    let columns = config.block_columns;
    let width = columns as f32 * config.block_size.x + columns.saturating_sub(1) as f32 * config.block_spacing;
    let left = (config.field_size.x - width) / 2.0;
    let pitch = config.block_size + Vec2::splat(config.block_spacing);

    iproduct!(0..config.block_rows, 0..columns)
        .map(|(row, column)| {
            let pos = Pos2::new(
                left + column as f32 * pitch.x,
                config.blocks_top_y + row as f32 * pitch.y,
            );
            Block::new(pos, config.block_size, ROW_COLORS[row % ROW_COLORS.len()])
        })
        .collect()
}

impl Sprite<Session> for Block {
    fn init(&mut self, _game: &Session) {
        self.rect.refresh();
    }

    fn update(&mut self, _game: &mut Session) -> bool {
        false
    }

    fn visible(&self) -> bool {
        !self.rect.hidden
    }

    fn collision(&mut self, other: &mut dyn Sprite<Session>, session: &mut Session) {
        if let Some(ball) = other.as_any_mut().downcast_mut::<Ball>() {
            let direction = self.strike(&ball.bounds(), session);
            ball.flip(direction);
        }
    }

    fn corner(&self) -> Pos2 {
        self.rect.corner()
    }

    fn size(&self) -> Vec2 {
        self.rect.extent()
    }

    fn draw(&self, _game: &Session, frame: &mut Frame) {
        self.rect.paint(frame);
    }

    fn deleted(&self) -> bool {
        self.rect.deleted()
    }

    fn delete(&mut self) {
        self.rect.delete();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
