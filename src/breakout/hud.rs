use std::any::Any;
use std::rc::Rc;

use egui::{Color32, FontId, Pos2, Vec2};

use crate::engine::{Align, Frame, Mode, Sprite, TextSprite, Typesetter};
use crate::util::format::grouped;

use super::session::{Serve, Session};

pub const TEXT_COLOR: Color32 = Color32::from_rgb(0xF0, 0xF0, 0xF0);
const BANNER_BACKGROUND: Color32 = Color32::from_rgba_premultiplied(0x10, 0x10, 0x30, 0xD0);
const BANNER_MARGIN: f32 = 8.0;

/// Score line at the top of the field
pub struct Scoreboard {
    text: TextSprite,
}

impl Scoreboard {
    pub fn new(pos: Pos2, font: FontId, typesetter: Rc<dyn Typesetter>) -> Self {
        Scoreboard {
            text: TextSprite::new(pos, "", font, TEXT_COLOR, typesetter),
        }
    }

    pub fn text(&self) -> &str {
        &self.text.text
    }
}

pub fn score_line(session: &Session) -> String {
    format!(
        "Score {}   Wave {}   Misses {}",
        grouped(session.score),
        session.wave,
        session.misses
    )
}

impl Sprite<Session> for Scoreboard {
    fn init(&mut self, session: &Session) {
        self.text.text = score_line(session);
        self.text.refresh();
    }

    fn update(&mut self, _game: &mut Session) -> bool {
        false
    }

    fn visible(&self) -> bool {
        !self.text.hidden
    }

    fn corner(&self) -> Pos2 {
        self.text.corner()
    }

    fn size(&self) -> Vec2 {
        self.text.extent()
    }

    fn draw(&self, _game: &Session, frame: &mut Frame) {
        self.text.paint(frame);
    }

    fn deleted(&self) -> bool {
        self.text.deleted()
    }

    fn delete(&mut self) {
        self.text.delete();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Centered text block, shown only while its condition holds for the session
pub struct Banner {
    text: TextSprite,
    condition: fn(&Session) -> bool,
    shown: bool,
}

impl Banner {
    /// `center` is the center of the banner; the corner is derived from the measured text.
    pub fn new(
        center: Pos2,
        text: &str,
        font: FontId,
        typesetter: Rc<dyn Typesetter>,
        condition: fn(&Session) -> bool,
    ) -> Self {
        let mut text = TextSprite::new(center, text, font, TEXT_COLOR, typesetter)
            .with_align(Align::Center)
            .with_background(BANNER_BACKGROUND, BANNER_MARGIN);
        text.pos = center - text.extent() / 2.0;
        Banner {
            text,
            condition,
            shown: false,
        }
    }

    /// "launch" hint, shown while the ball rests on the paddle
    pub fn serve_hint(center: Pos2, font: FontId, typesetter: Rc<dyn Typesetter>) -> Self {
        Banner::new(center, "Press SPACE to launch", font, typesetter, |s| {
            s.serve == Serve::Start && s.mode != Mode::Demo
        })
    }

    pub fn demo(center: Pos2, font: FontId, typesetter: Rc<dyn Typesetter>) -> Self {
        Banner::new(center, "DEMO\nD to take over", font, typesetter, |s| {
            s.mode == Mode::Demo
        })
    }

    /// lives in a layer which is only visible in pause mode
    pub fn pause(center: Pos2, font: FontId, typesetter: Rc<dyn Typesetter>) -> Self {
        Banner::new(center, "PAUSED\nP to resume, Q to quit", font, typesetter, |_| true)
    }
}

impl Sprite<Session> for Banner {
    fn init(&mut self, session: &Session) {
        self.shown = (self.condition)(session);
        self.text.refresh();
    }

    fn update(&mut self, _game: &mut Session) -> bool {
        false
    }

    fn visible(&self) -> bool {
        self.shown && !self.text.hidden
    }

    fn corner(&self) -> Pos2 {
        self.text.corner()
    }

    fn size(&self) -> Vec2 {
        self.text.extent()
    }

    fn draw(&self, _game: &Session, frame: &mut Frame) {
        if self.shown {
            self.text.paint(frame);
        }
    }

    fn deleted(&self) -> bool {
        self.text.deleted()
    }

    fn delete(&mut self) {
        self.text.delete();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
