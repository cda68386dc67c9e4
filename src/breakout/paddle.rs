use std::any::Any;

use egui::{Color32, Pos2, Rect, Vec2};

use crate::engine::{AaBB, Frame, Primitive, RectSprite, Sprite};

use super::ball::Ball;
use super::session::{PanelControl, Serve, Session};

pub const PADDLE_COLOR: Color32 = Color32::from_rgb(0xE0, 0xE0, 0xE0);

/// Player controlled paddle at the bottom of the field
pub struct Paddle {
    rect: RectSprite,
    /// horizontal speed per tick
    dx: f32,
}

impl Paddle {
    /// centered paddle at its configured height
    pub fn new(session: &Session) -> Self {
        let config = &session.config;
        let pos = Pos2::new((config.field_size.x - config.paddle_size.x) / 2.0, config.paddle_y());
        Paddle {
            rect: RectSprite::new(pos, config.paddle_size, PADDLE_COLOR),
            dx: 0.0,
        }
    }

    pub fn dx(&self) -> f32 {
        self.dx
    }

    pub fn bounds(&self) -> AaBB {
        AaBB::from_corner_size(self.rect.corner(), self.rect.extent())
    }

    /// corner of a ball resting centered on top of the paddle
    fn resting_ball_corner(&self, ball_size: Vec2) -> Pos2 {
        let bounds = self.bounds();
        Pos2::new(bounds.center().x - ball_size.x / 2.0, bounds.min.y - ball_size.y)
    }

    fn steer(&mut self, session: &Session) {
        let config = &session.config;
        self.dx = match session.control {
            PanelControl::None => decrease_speed(self.dx, config.paddle_decel),
            PanelControl::AccelerateLeft => accelerate(self.dx, -config.paddle_accel, config.paddle_max_speed),
            PanelControl::AccelerateRight => accelerate(self.dx, config.paddle_accel, config.paddle_max_speed),
        };
    }

    fn launch(&mut self, session: &mut Session) {
        let pos = self.resting_ball_corner(session.ball_texture.size);
        let jitter = session.config.launch_jitter;
        let mut dx = self.dx * session.config.launch_english;
        if jitter > 0.0 {
            dx += session.jitter(-jitter..jitter);
        }
        let ball = Ball::launch(pos, dx, session);
        log::info!("ball launched with velocity {:?}", ball.velocity());
        session.spawn(Box::new(ball));
        session.serve = Serve::Play;
    }

    /// Keeps the paddle inside the field; hitting a side halves and reverses its speed.
    fn bounce_off_walls(&mut self, session: &Session) {
        let max_x = session.config.field_size.x - self.rect.extent().x;
        if self.rect.pos.x < 0.0 {
            self.rect.pos.x = 0.0;
            self.dx = -self.dx / 2.0;
        } else if self.rect.pos.x > max_x {
            self.rect.pos.x = max_x;
            self.dx = -self.dx / 2.0;
        }
    }
}

/// Outgoing ball angle off the vertical, in radians.
///
/// Grows with the distance of the ball center to the paddle center and is clamped to
/// `max_deflection` at the paddle edges. A centered hit goes straight up.
pub fn deflection_angle(ball_center_x: f32, paddle: &AaBB, max_deflection: f32) -> f32 {
    let half_width = paddle.size().x / 2.0;
    if half_width <= 0.0 {
        return 0.0;
    }
    let offset = (ball_center_x - paddle.center().x) / half_width;
    offset.clamp(-1.0, 1.0) * max_deflection
}

/// positive or negative speed and acceleration
fn accelerate(speed: f32, acceleration: f32, speed_limit_abs: f32) -> f32 {
    debug_assert!(!speed_limit_abs.is_sign_negative());
    (speed + acceleration).clamp(-speed_limit_abs, speed_limit_abs)
}

/// decays towards zero without crossing it
fn decrease_speed(speed: f32, break_acceleration: f32) -> f32 {
    debug_assert!(break_acceleration >= 0.0);
    if speed > 0.0 {
        (speed - break_acceleration).max(0.0)
    } else if speed < 0.0 {
        (speed + break_acceleration).min(0.0)
    } else {
        0.0
    }
}

impl Sprite<Session> for Paddle {
    fn init(&mut self, _game: &Session) {
        self.rect.refresh();
    }

    fn update(&mut self, session: &mut Session) -> bool {
        self.steer(session);
        self.rect.pos.x += self.dx;
        session.paddle_bounds = self.bounds();
        if session.launch && session.serve == Serve::Start {
            self.launch(session);
        }
        // always checked, so a resting paddle still catches the ball
        true
    }

    fn visible(&self) -> bool {
        !self.rect.hidden
    }

    fn collision(&mut self, other: &mut dyn Sprite<Session>, session: &mut Session) {
        if let Some(ball) = other.as_any_mut().downcast_mut::<Ball>() {
            if ball.velocity().y > 0.0 {
                let angle = deflection_angle(
                    ball.bounds().center().x,
                    &self.bounds(),
                    session.config.paddle_max_deflection,
                );
                log::debug!("paddle deflects ball by {:.1}°", angle.to_degrees());
                ball.deflect(angle);
            }
        } else {
            self.bounce_off_walls(session);
            session.paddle_bounds = self.bounds();
        }
    }

    fn corner(&self) -> Pos2 {
        self.rect.corner()
    }

    fn size(&self) -> Vec2 {
        self.rect.extent()
    }

    fn draw(&self, session: &Session, frame: &mut Frame) {
        self.rect.paint(frame);
        if session.serve == Serve::Start && !self.rect.hidden {
            let ball = session.ball_texture;
            frame.push(Primitive::Image {
                texture: ball.id,
                rect: Rect::from_min_size(self.resting_ball_corner(ball.size), ball.size),
            });
        }
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

#[cfg(test)]
mod tests {
    use egui::{Pos2, TextureId, Vec2};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    use super::*;
    use crate::breakout::config::GameConfig;
    use crate::engine::{RectSprite, Texture};

    const MAX: f32 = std::f32::consts::FRAC_PI_3;

    fn session() -> Session {
        let texture = Texture {
            id: TextureId::User(1),
            size: Vec2::splat(10.0),
        };
        Session::new(GameConfig::default(), texture, StdRng::seed_from_u64(3))
    }

    fn paddle_box() -> AaBB {
        AaBB::from_corner_size(Pos2::new(100.0, 388.0), Vec2::new(80.0, 10.0))
    }

    #[test]
    fn centered_hit_goes_straight_up() {
        assert_eq!(deflection_angle(140.0, &paddle_box(), MAX), 0.0);
    }

    #[rstest]
    #[case(180.0, MAX)]
    #[case(100.0, -MAX)]
    #[case(250.0, MAX)]
    #[case(20.0, -MAX)]
    #[case(160.0, MAX / 2.0)]
    fn deflection_is_clamped(#[case] ball_x: f32, #[case] expected: f32) {
        let angle = deflection_angle(ball_x, &paddle_box(), MAX);
        assert!((angle - expected).abs() < 1e-6, "{angle} != {expected}");
    }

    #[test]
    fn deflection_is_monotonic() {
        let paddle = paddle_box();
        let mut last = f32::NEG_INFINITY;
        let mut x = 80.0;
        while x <= 200.0 {
            let angle = deflection_angle(x, &paddle, MAX);
            assert!(angle >= last);
            assert!(angle.abs() <= MAX);
            last = angle;
            x += 0.5;
        }
    }

    #[rstest]
    #[case(0.0, 0.5, 20.0, 0.5)]
    #[case(19.8, 0.5, 20.0, 20.0)]
    #[case(-19.8, -0.5, 20.0, -20.0)]
    #[case(-3.0, 0.5, 20.0, -2.5)]
    fn accelerates_up_to_the_limit(#[case] speed: f32, #[case] accel: f32, #[case] limit: f32, #[case] expected: f32) {
        assert_eq!(accelerate(speed, accel, limit), expected);
    }

    #[rstest]
    #[case(3.0, 1.0, 2.0)]
    #[case(0.5, 1.0, 0.0)]
    #[case(-0.5, 1.0, 0.0)]
    #[case(-3.0, 1.0, -2.0)]
    #[case(0.0, 1.0, 0.0)]
    fn speed_decays_towards_zero(#[case] speed: f32, #[case] decel: f32, #[case] expected: f32) {
        assert_eq!(decrease_speed(speed, decel), expected);
    }

    #[test]
    fn launch_spawns_one_ball_upwards() {
        let mut session = session();
        let mut paddle = Paddle::new(&session);
        session.launch = true;

        assert!(paddle.update(&mut session));
        assert_eq!(session.serve, Serve::Play);
        let spawned = session.take_spawned();
        assert_eq!(spawned.len(), 1);
        let ball = spawned[0].as_any().downcast_ref::<Ball>().unwrap();
        assert!(ball.velocity().y < 0.0);
        assert_eq!(ball.bounds().max.y, paddle.bounds().min.y);

        // a second launch request does nothing while the ball is in play
        paddle.update(&mut session);
        assert!(session.take_spawned().is_empty());
    }

    #[test]
    fn side_wall_reverses_and_halves_speed() {
        let mut session = session();
        let mut paddle = Paddle::new(&session);
        paddle.rect.pos.x = -3.0;
        paddle.dx = -8.0;
        let mut wall = RectSprite::new(Pos2::new(-1.0, -1.0), Vec2::new(1.0, 402.0), Color32::TRANSPARENT);

        paddle.collision(&mut wall, &mut session);
        assert_eq!(paddle.rect.pos.x, 0.0);
        assert_eq!(paddle.dx(), 4.0);
        assert_eq!(session.paddle_bounds, paddle.bounds());
    }

    #[test]
    fn only_a_falling_ball_is_deflected() {
        let mut session = session();
        let mut paddle = Paddle::new(&session);
        session.paddle_bounds = paddle.bounds();
        let center_x = paddle.bounds().center().x;

        let mut rising = Ball::launch(Pos2::new(center_x + 20.0, 385.0), 1.0, &session);
        let before = rising.velocity();
        paddle.collision(&mut rising, &mut session);
        assert_eq!(rising.velocity(), before);

        let mut falling = Ball::launch(Pos2::new(center_x - 5.0, 385.0), 1.0, &session);
        falling.flip(crate::engine::CollideDirection::YGreater);
        paddle.collision(&mut falling, &mut session);
        assert!(falling.velocity().y < 0.0);
        assert!(falling.velocity().x.abs() < 1e-6);
    }

    #[test]
    fn resting_ball_is_drawn_before_launch() {
        let session = session();
        let paddle = Paddle::new(&session);
        let mut frame = Frame::new();
        paddle.draw(&session, &mut frame);
        assert_eq!(frame.len(), 2);
        assert!(matches!(frame.primitives()[1], Primitive::Image { .. }));
    }
}
