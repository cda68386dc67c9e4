use egui::{Color32, FontId, Pos2, Rect, TextureId};

/// A single draw instruction, in playfield coordinates
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Fill { rect: Rect, color: Color32 },
    Image { texture: TextureId, rect: Rect },
    /// `pos` is the top left corner of the text line
    Text { pos: Pos2, text: String, font: FontId, color: Color32 },
}

/// Back-buffer the sprites draw into. Painted back to front.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    primitives: Vec<Primitive>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn fill(&mut self, rect: Rect, color: Color32) {
        self.push(Primitive::Fill { rect, color });
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Starts a new frame while keeping the allocation.
    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
