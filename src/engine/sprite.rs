use std::any::Any;

use egui::{Pos2, Vec2};

use super::algebra_2d::AaBB;
use super::frame::Frame;
use super::Stage;

/// Capability set every game object provides.
///
/// Domain sprites wrap one of the engine sprites and delegate to it explicitly.
/// `as_any`/`as_any_mut` exist so a collision handler can switch on the concrete type of `other`.
pub trait Sprite<G: Stage>: Any {
    /// Recomputes derived state if its inputs changed. Called every tick before `update`.
    fn init(&mut self, _game: &G) {}

    /// Advances one tick. Returns whether the extent of the sprite could have changed,
    /// which makes it initiate collision checks this tick.
    fn update(&mut self, game: &mut G) -> bool;

    fn visible(&self) -> bool;

    /// Reaction to an overlap with `other`.
    fn collision(&mut self, _other: &mut dyn Sprite<G>, _game: &mut G) {}

    fn corner(&self) -> Pos2;

    fn size(&self) -> Vec2;

    /// Renders into `frame`; draws nothing while hidden.
    fn draw(&self, game: &G, frame: &mut Frame);

    fn deleted(&self) -> bool;

    /// Marks the sprite as deleted. There is no way back.
    fn delete(&mut self);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn bounds(&self) -> AaBB {
        AaBB::from_corner_size(self.corner(), self.size())
    }

    fn center(&self) -> Pos2 {
        self.corner() + self.size() / 2.0
    }
}
