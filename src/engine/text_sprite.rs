use std::any::Any;
use std::rc::Rc;

use egui::{Color32, FontId, Pos2, Rect, Vec2};
use itertools::Itertools;

use super::frame::{Frame, Primitive};
use super::sprite::Sprite;
use super::Stage;

/// Text measuring service provided by the host
pub trait Typesetter {
    fn line_width(&self, line: &str, font: &FontId) -> f32;
    fn line_height(&self, font: &FontId) -> f32;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Multi-line text block with alignment and an optional background.
///
/// Lines are re-measured in `init` only when text, font, background or margin changed.
#[derive(Clone)]
pub struct TextSprite {
    pub hidden: bool,
    pub pos: Pos2,
    pub text: String,
    pub align: Align,
    pub font: FontId,
    pub color: Color32,
    pub background: Option<Color32>,
    pub margin: f32,
    typesetter: Rc<dyn Typesetter>,
    layout: Option<TextLayout>,
    deleted: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct TextLayout {
    text: String,
    font: FontId,
    background: Option<Color32>,
    margin: f32,
    lines: Vec<String>,
    widths: Vec<f32>,
    max_width: f32,
    line_height: f32,
}

impl TextSprite {
    pub fn new(
        pos: Pos2,
        text: impl Into<String>,
        font: FontId,
        color: Color32,
        typesetter: Rc<dyn Typesetter>,
    ) -> Self {
        let mut sprite = TextSprite {
            hidden: false,
            pos,
            text: text.into(),
            align: Align::Left,
            font,
            color,
            background: None,
            margin: 0.0,
            typesetter,
            layout: None,
            deleted: false,
        };
        sprite.refresh();
        sprite
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_background(mut self, background: Color32, margin: f32) -> Self {
        self.background = Some(background);
        self.margin = margin;
        self.refresh();
        self
    }

    fn stale(&self) -> bool {
        match &self.layout {
            None => true,
            Some(l) => {
                l.text != self.text || l.font != self.font || l.background != self.background || l.margin != self.margin
            }
        }
    }

    pub fn refresh(&mut self) {
        if !self.stale() {
            return;
        }
        let lines = self.text.split('\n').map(str::to_owned).collect_vec();
        let widths = lines
            .iter()
            .map(|line| self.typesetter.line_width(line, &self.font))
            .collect_vec();
        let max_width = widths.iter().copied().fold(0.0, f32::max);
        self.layout = Some(TextLayout {
            text: self.text.clone(),
            font: self.font.clone(),
            background: self.background,
            margin: self.margin,
            lines,
            widths,
            max_width,
            line_height: self.typesetter.line_height(&self.font),
        });
    }

    pub fn corner(&self) -> Pos2 {
        self.pos
    }

    /// Extent as of the last `refresh`, margins included
    pub fn extent(&self) -> Vec2 {
        match &self.layout {
            None => Vec2::ZERO,
            Some(l) => Vec2::new(
                l.max_width + l.margin * 2.0,
                l.line_height * l.lines.len() as f32 + l.margin * 2.0,
            ),
        }
    }

    pub fn paint(&self, frame: &mut Frame) {
        if self.hidden {
            return;
        }
        let Some(layout) = &self.layout else {
            return;
        };
        if let Some(background) = layout.background {
            frame.fill(Rect::from_min_size(self.pos, self.extent()), background);
        }
        let origin = self.pos + Vec2::splat(layout.margin);
        for (cnt, (line, width)) in layout.lines.iter().zip(&layout.widths).enumerate() {
            let indent = match self.align {
                Align::Left => 0.0,
                Align::Center => (layout.max_width - width) / 2.0,
                Align::Right => layout.max_width - width,
            };
            frame.push(Primitive::Text {
                pos: origin + Vec2::new(indent, cnt as f32 * layout.line_height),
                text: line.clone(),
                font: layout.font.clone(),
                color: self.color,
            });
        }
    }

    pub fn deleted(&self) -> bool {
        self.deleted
    }

    pub fn delete(&mut self) {
        self.deleted = true;
    }
}

impl<G: Stage> Sprite<G> for TextSprite {
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
        self.extent()
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
