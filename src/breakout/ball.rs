use std::any::Any;

use egui::{Pos2, Vec2};

use crate::engine::{AaBB, CollideDirection, Frame, ImageSprite, Sprite};

use super::block::Block;
use super::paddle::Paddle;
use super::session::{Serve, Session};

/// Ball moving with a constant speed. Only the direction ever changes.
pub struct Ball {
    image: ImageSprite,
    speed: f32,
    min_dy: f32,
}

impl Ball {
    /// New ball at `pos`, heading upwards with horizontal component `dx`
    pub fn launch(pos: Pos2, dx: f32, session: &Session) -> Self {
        let mut ball = Ball {
            image: ImageSprite::new(pos, session.ball_texture),
            speed: session.config.ball_speed,
            min_dy: session.config.ball_min_dy(),
        };
        ball.aim(dx, true);
        ball
    }

    pub fn velocity(&self) -> Vec2 {
        self.image.vel
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn bounds(&self) -> AaBB {
        AaBB::from_corner_size(self.image.corner(), self.image.size())
    }

    /// Derives dy from `dx` and the speed, keeping the current vertical heading.
    pub fn set_direction(&mut self, dx: f32) {
        let upward = self.image.vel.y < 0.0;
        self.aim(dx, upward);
    }

    /// Sends the ball upwards at `angle` radians off the vertical; positive is to the right.
    pub fn deflect(&mut self, angle: f32) {
        self.aim(self.speed * angle.sin(), true);
    }

    /// Reverses the velocity component belonging to the axis of `direction`.
    pub fn flip(&mut self, direction: CollideDirection) {
        if direction.is_horizontal() {
            self.image.vel.x = -self.image.vel.x;
        } else {
            self.image.vel.y = -self.image.vel.y;
        }
    }

    /// |dy| is kept at or above `min_dy` so the ball never gets stuck in a flat trajectory.
    fn aim(&mut self, dx: f32, upward: bool) {
        let speed = self.speed;
        let mut dx = dx;
        let mut dy = if dx.abs() < speed {
            (speed * speed - dx * dx).sqrt()
        } else {
            0.0
        };
        if dy < self.min_dy {
            dy = self.min_dy;
            let len_x = (speed * speed - dy * dy).sqrt();
            dx = if dx < 0.0 { -len_x } else { len_x };
        }
        self.image.vel = Vec2::new(dx, if upward { -dy } else { dy });
    }

    fn miss(&mut self, session: &mut Session) {
        self.image.delete();
        session.ball_center = None;
        session.serve = Serve::Start;
        session.misses += 1;
        log::info!("ball missed ({} so far)", session.misses);
    }

    fn bounce_off_walls(&mut self, session: &mut Session) {
        let field = session.config.field_size;
        let size = self.image.size();
        let image = &mut self.image;
        if image.pos.x < 0.0 {
            image.pos.x = 0.0;
            image.vel.x = -image.vel.x;
        } else if image.pos.y < 0.0 {
            image.pos.y = 0.0;
            image.vel.y = -image.vel.y;
        } else if image.pos.x + size.x > field.x {
            image.pos.x = field.x - size.x;
            image.vel.x = -image.vel.x;
        } else if image.pos.y + size.y > field.y {
            self.miss(session);
        }
    }
}

impl Sprite<Session> for Ball {
    fn init(&mut self, _game: &Session) {
        self.image.refresh();
    }

    fn update(&mut self, session: &mut Session) -> bool {
        let moved = self.image.advance();
        session.ball_center = Some(self.bounds().center());
        moved
    }

    fn visible(&self) -> bool {
        !self.image.hidden
    }

    fn collision(&mut self, other: &mut dyn Sprite<Session>, session: &mut Session) {
        if let Some(block) = other.as_any_mut().downcast_mut::<Block>() {
            let direction = block.strike(&self.bounds(), session);
            self.flip(direction);
        } else if other.as_any().is::<Paddle>() {
            // the paddle redirects the ball from its own collision handler
        } else {
            self.bounce_off_walls(session);
        }
    }

    fn corner(&self) -> Pos2 {
        self.image.corner()
    }

    fn size(&self) -> Vec2 {
        self.image.size()
    }

    fn draw(&self, _game: &Session, frame: &mut Frame) {
        self.image.paint(frame);
    }

    fn deleted(&self) -> bool {
        self.image.deleted()
    }

    fn delete(&mut self) {
        self.image.delete();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
