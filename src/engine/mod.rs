//! Layered sprite engine: sprites live in layers, layers form a level.
//!
//! One `Level::update` followed by one `Level::draw` per tick. Deleted sprites are
//! dropped from their layer during the draw pass.

use rustc_hash::FxHashMap;

pub mod algebra_2d;
pub mod frame;
pub mod image_sprite;
pub mod layer;
pub mod level;
pub mod rect_sprite;
pub mod sprite;
pub mod text_sprite;

pub use algebra_2d::{AaBB, CollideDirection};
pub use frame::{Frame, Primitive};
pub use image_sprite::{ImageSprite, Texture};
pub use layer::Layer;
pub use level::Level;
pub use rect_sprite::RectSprite;
pub use sprite::Sprite;
pub use text_sprite::{Align, TextSprite, Typesetter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Play,
    Pause,
    Demo,
}

/// Per-mode on/off switches of a layer. A mode without an entry counts as off.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModeTable(FxHashMap<Mode, bool>);

impl ModeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, mode: Mode, on: bool) -> Self {
        self.0.insert(mode, on);
        self
    }

    /// table which is on for exactly the given modes
    pub fn only(modes: &[Mode]) -> Self {
        ModeTable(modes.iter().map(|&m| (m, true)).collect())
    }

    pub fn get(&self, mode: Mode) -> bool {
        self.0.get(&mode).copied().unwrap_or(false)
    }
}

/// Per-session context handed to every sprite callback.
pub trait Stage: 'static {
    fn mode(&self) -> Mode;
}

impl Stage for Mode {
    fn mode(&self) -> Mode {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_table_defaults_to_off() {
        let table = ModeTable::only(&[Mode::Play, Mode::Demo]);
        assert!(table.get(Mode::Play));
        assert!(table.get(Mode::Demo));
        assert!(!table.get(Mode::Pause));

        let table = ModeTable::new().with(Mode::Pause, true).with(Mode::Play, false);
        assert!(table.get(Mode::Pause));
        assert!(!table.get(Mode::Play));
        assert!(!table.get(Mode::Demo));
    }
}
