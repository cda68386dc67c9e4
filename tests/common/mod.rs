use std::rc::Rc;

use egui::{FontId, Pos2, TextureId, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;

use breakout::breakout::{Breakout, GameConfig, GameInput, Resources};
use breakout::engine::{Frame, Texture, Typesetter};

/// every glyph is half as wide as the font is high
#[allow(dead_code)]
pub struct FixedPitch;

impl Typesetter for FixedPitch {
    fn line_width(&self, line: &str, font: &FontId) -> f32 {
        line.chars().count() as f32 * font.size / 2.0
    }

    fn line_height(&self, font: &FontId) -> f32 {
        font.size
    }
}

pub fn texture(id: u64, size: Vec2) -> Texture {
    Texture {
        id: TextureId::User(id),
        size,
    }
}

#[allow(dead_code)]
pub fn new_game(config: GameConfig, seed: u64) -> Breakout {
    let resources = Resources {
        ball: texture(1, Vec2::splat(config.ball_size)),
        background: None,
        typesetter: Rc::new(FixedPitch),
    };
    Breakout::with_rng(config, resources, StdRng::seed_from_u64(seed))
}

/// one update plus one draw, returning what was drawn
#[allow(dead_code)]
pub fn tick(game: &mut Breakout, input: GameInput) -> Frame {
    game.update(&input).expect("no quit requested");
    let mut frame = Frame::new();
    game.draw(&mut frame);
    frame
}

#[allow(dead_code)]
pub fn pos(x: f32, y: f32) -> Pos2 {
    Pos2::new(x, y)
}
