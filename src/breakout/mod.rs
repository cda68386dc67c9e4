//! Breakout on top of the sprite engine: configuration, the shared session,
//! the game sprites and the per-tick driver.

use std::fmt::{Display, Formatter};
use std::rc::Rc;

use egui::{Color32, FontId, Pos2, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::{Frame, ImageSprite, Layer, Level, Mode, ModeTable, RectSprite, Sprite, Texture, Typesetter};

pub mod app_game_drawer;
pub mod ball;
pub mod bitmaps;
pub mod block;
pub mod config;
pub mod egui_typesetter;
pub mod hud;
pub mod paddle;
pub mod session;

pub use ball::Ball;
pub use block::{block_wall, Block};
pub use config::{GameConfig, TIME_GRANULARITY};
pub use hud::{Banner, Scoreboard};
pub use paddle::Paddle;
pub use session::{GameInput, PanelControl, Serve, Session};

pub const BACKGROUND_LAYER: usize = 0;
pub const GAME_LAYER: usize = 1;
pub const HUD_LAYER: usize = 2;
pub const PAUSE_LAYER: usize = 3;

pub const FIELD_COLOR: Color32 = Color32::from_rgb(0x10, 0x10, 0x18);
pub const BALL_COLOR: [u8; 3] = [0xF0, 0xD0, 0x40];

/// Bitmaps and services the host provides to a game
#[derive(Clone)]
pub struct Resources {
    pub ball: Texture,
    /// stretched over the whole field
    pub background: Option<Texture>,
    pub typesetter: Rc<dyn Typesetter>,
}

/// The player asked to end the game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuitRequested;

impl Display for QuitRequested {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "quit requested")
    }
}

impl std::error::Error for QuitRequested {}

/// One running game: the level with its layers plus the session all sprites share.
pub struct Breakout {
    level: Level<Session>,
    session: Session,
}

impl Breakout {
    pub fn new(config: GameConfig, resources: Resources) -> Self {
        Self::with_rng(config, resources, StdRng::from_entropy())
    }

    pub fn with_rng(config: GameConfig, resources: Resources, rng: StdRng) -> Self {
        let mut session = Session::new(config, resources.ball, rng);
        let level = Level::new(vec![
            background_layer(&session.config, resources.background),
            game_layer(&mut session),
            hud_layer(&session.config, &resources.typesetter),
            pause_layer(&session.config, &resources.typesetter),
        ]);
        log::info!("game set up with {} blocks", session.blocks_left);
        Breakout { level, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn level(&self) -> &Level<Session> {
        &self.level
    }

    /// the ball in play, if any
    pub fn ball(&self) -> Option<&Ball> {
        self.level
            .layer(GAME_LAYER)
            .sprites()
            .iter()
            .filter(|s| !s.deleted())
            .find_map(|s| s.as_any().downcast_ref::<Ball>())
    }

    /// One game tick
    pub fn update(&mut self, input: &GameInput) -> Result<(), QuitRequested> {
        if input.exit {
            log::info!("quit with score {}", self.session.score);
            return Err(QuitRequested);
        }
        if input.toggle_pause {
            self.session.toggle_pause();
        }
        if input.toggle_demo {
            self.session.toggle_demo();
        }
        self.apply_input(input);

        self.level.update(&mut self.session);

        let spawned = self.session.take_spawned();
        if !spawned.is_empty() {
            log::debug!("adding {} spawned sprite(s)", spawned.len());
            let layer = self.level.layer_mut(GAME_LAYER);
            for sprite in spawned {
                layer.push(sprite);
            }
        }

        if self.session.blocks_left == 0 {
            self.next_wave();
        }
        Ok(())
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        self.level.draw(&self.session, frame);
    }

    /// Translates the tick's input into paddle control. In demo mode the paddle plays by itself.
    fn apply_input(&mut self, input: &GameInput) {
        let session = &mut self.session;
        let paddle_x = session.paddle_bounds.center().x;
        let dead_zone = session.config.paddle_size.x / 4.0;
        match session.mode {
            Mode::Demo => {
                let target_x = session
                    .ball_center
                    .map_or(session.config.field_size.x / 2.0, |c| c.x);
                session.control = steer(paddle_x, target_x, dead_zone);
                session.launch = session.serve == Serve::Start;
            }
            Mode::Play | Mode::Pause => {
                session.control = match input.pointer {
                    Some(pointer) => steer(paddle_x, pointer.x, dead_zone),
                    None => input.control,
                };
                session.launch = input.launch;
            }
        }
    }

    fn next_wave(&mut self) {
        let blocks = block_wall(&self.session.config);
        self.session.wave += 1;
        self.session.blocks_left = blocks.len();
        log::info!("wave {} with {} blocks", self.session.wave, blocks.len());
        let layer = self.level.layer_mut(GAME_LAYER);
        for block in blocks {
            layer.push(Box::new(block));
        }
    }
}

/// Accelerates from `from_x` towards `to_x`; within the dead zone the paddle coasts.
pub fn steer(from_x: f32, to_x: f32, dead_zone: f32) -> PanelControl {
    if to_x < from_x - dead_zone {
        PanelControl::AccelerateLeft
    } else if to_x > from_x + dead_zone {
        PanelControl::AccelerateRight
    } else {
        PanelControl::None
    }
}

fn background_layer(config: &GameConfig, background: Option<Texture>) -> Layer<Session> {
    let mut layer: Layer<Session> = Layer::new();
    layer.push(Box::new(RectSprite::new(Pos2::ZERO, config.field_size, FIELD_COLOR)));
    if let Some(texture) = background {
        let stretched = Texture {
            size: config.field_size,
            ..texture
        };
        layer.push(Box::new(ImageSprite::new(Pos2::ZERO, stretched)));
    }
    layer
}

/// invisible frame around the field, one pixel thick
fn walls(field: Vec2) -> Vec<RectSprite> {
    vec![
        RectSprite::new(Pos2::new(-1.0, -1.0), Vec2::new(1.0, field.y + 2.0), Color32::TRANSPARENT),
        RectSprite::new(Pos2::new(field.x, -1.0), Vec2::new(1.0, field.y + 2.0), Color32::TRANSPARENT),
        RectSprite::new(Pos2::new(0.0, -1.0), Vec2::new(field.x, 1.0), Color32::TRANSPARENT),
        RectSprite::new(Pos2::new(0.0, field.y), Vec2::new(field.x, 1.0), Color32::TRANSPARENT),
    ]
}

fn game_layer(session: &mut Session) -> Layer<Session> {
    let mut sprites: Vec<Box<dyn Sprite<Session>>> = vec![];
    for wall in walls(session.config.field_size) {
        sprites.push(Box::new(wall));
    }
    let blocks = block_wall(&session.config);
    session.blocks_left = blocks.len();
    for block in blocks {
        sprites.push(Box::new(block));
    }
    let paddle = Paddle::new(session);
    session.paddle_bounds = paddle.bounds();
    sprites.push(Box::new(paddle));
    Layer::with_sprites(sprites).with_active(ModeTable::only(&[Mode::Play, Mode::Demo]))
}

fn hud_layer(config: &GameConfig, typesetter: &Rc<dyn Typesetter>) -> Layer<Session> {
    let font = FontId::proportional(config.font_size);
    let hint_center = Pos2::new(config.field_size.x / 2.0, config.field_size.y * 0.65);
    let mut layer: Layer<Session> = Layer::new();
    layer.push(Box::new(Scoreboard::new(Pos2::new(4.0, 4.0), font.clone(), typesetter.clone())));
    layer.push(Box::new(Banner::serve_hint(hint_center, font.clone(), typesetter.clone())));
    layer.push(Box::new(Banner::demo(hint_center, font, typesetter.clone())));
    layer
}

fn pause_layer(config: &GameConfig, typesetter: &Rc<dyn Typesetter>) -> Layer<Session> {
    let font = FontId::proportional(config.font_size * 1.5);
    let center = (config.field_size / 2.0).to_pos2();
    let mut layer: Layer<Session> = Layer::new().with_visible(ModeTable::only(&[Mode::Pause]));
    layer.push(Box::new(Banner::pause(center, font, typesetter.clone())));
    layer
}
