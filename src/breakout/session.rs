use std::ops::Range;

use egui::Pos2;
use rand::rngs::StdRng;
use rand::Rng;

use crate::engine::{AaBB, Mode, Sprite, Stage, Texture};

use super::config::GameConfig;

/// Ball state of the running game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Serve {
    /// ball not launched yet; it rests on the paddle
    Start,
    /// ball in the field
    Play,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PanelControl {
    #[default]
    None,
    AccelerateLeft,
    AccelerateRight,
}

/// Input snapshot of one tick, sampled by the host
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GameInput {
    pub control: PanelControl,
    pub launch: bool,
    pub toggle_pause: bool,
    pub toggle_demo: bool,
    /// pointer position in playfield coordinates while the primary button is held
    pub pointer: Option<Pos2>,
    pub exit: bool,
}

impl GameInput {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn action(control: PanelControl) -> Self {
        Self {
            control,
            ..Self::default()
        }
    }

    pub fn launch() -> Self {
        Self {
            launch: true,
            ..Self::default()
        }
    }
}

/// Everything a game session shares between its sprites
pub struct Session {
    pub config: GameConfig,
    pub mode: Mode,
    /// mode to go back to when leaving the pause
    resume_mode: Mode,
    pub serve: Serve,
    /// paddle control of the current tick
    pub control: PanelControl,
    /// launch request of the current tick
    pub launch: bool,
    pub score: u32,
    pub misses: u32,
    pub wave: u32,
    pub blocks_left: usize,
    /// center of the ball in the field; none while serving
    pub ball_center: Option<Pos2>,
    pub paddle_bounds: AaBB,
    pub ball_texture: Texture,
    rng: StdRng,
    spawned: Vec<Box<dyn Sprite<Session>>>,
}

impl Stage for Session {
    fn mode(&self) -> Mode {
        self.mode
    }
}

impl Session {
    pub fn new(config: GameConfig, ball_texture: Texture, rng: StdRng) -> Self {
        Self {
            config,
            mode: Mode::Play,
            resume_mode: Mode::Play,
            serve: Serve::Start,
            control: PanelControl::None,
            launch: false,
            score: 0,
            misses: 0,
            wave: 1,
            blocks_left: 0,
            ball_center: None,
            paddle_bounds: AaBB {
                min: Pos2::ZERO,
                max: Pos2::ZERO,
            },
            ball_texture,
            rng,
            spawned: vec![],
        }
    }

    pub fn toggle_pause(&mut self) {
        self.mode = match self.mode {
            Mode::Pause => self.resume_mode,
            running => {
                self.resume_mode = running;
                Mode::Pause
            }
        };
        log::info!("mode: {:?}", self.mode);
    }

    /// Switches between Play and Demo. Ignored while paused.
    pub fn toggle_demo(&mut self) {
        self.mode = match self.mode {
            Mode::Play => Mode::Demo,
            Mode::Demo => Mode::Play,
            Mode::Pause => return,
        };
        log::info!("mode: {:?}", self.mode);
    }

    /// Queues a sprite for the game layer. It is added after the current update pass.
    pub fn spawn(&mut self, sprite: Box<dyn Sprite<Session>>) {
        self.spawned.push(sprite);
    }

    pub fn take_spawned(&mut self) -> Vec<Box<dyn Sprite<Session>>> {
        std::mem::take(&mut self.spawned)
    }

    pub fn jitter(&mut self, range: Range<f32>) -> f32 {
        self.rng.gen_range(range)
    }
}
