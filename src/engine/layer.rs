use super::frame::Frame;
use super::sprite::Sprite;
use super::{ModeTable, Stage};

/// Ordered sprite collection. Order is draw order.
///
/// Without an `active` table the layer updates in every mode; without a `visible` table it
/// draws in every mode.
pub struct Layer<G: Stage> {
    sprites: Vec<Box<dyn Sprite<G>>>,
    active: Option<ModeTable>,
    visible: Option<ModeTable>,
    /// indices of sprites which moved this tick; kept across ticks for its allocation
    moved: Vec<usize>,
}

impl<G: Stage> Default for Layer<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Stage> Layer<G> {
    pub fn new() -> Self {
        Self {
            sprites: vec![],
            active: None,
            visible: None,
            moved: vec![],
        }
    }

    pub fn with_sprites(sprites: Vec<Box<dyn Sprite<G>>>) -> Self {
        Self {
            moved: Vec::with_capacity(sprites.len()),
            sprites,
            ..Self::new()
        }
    }

    pub fn with_active(mut self, active: ModeTable) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_visible(mut self, visible: ModeTable) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn push(&mut self, sprite: Box<dyn Sprite<G>>) {
        self.sprites.push(sprite);
    }

    pub fn sprites(&self) -> &[Box<dyn Sprite<G>>] {
        &self.sprites
    }

    /// Sprites may be changed, but not added or removed, through this slice.
    pub fn sprites_mut(&mut self) -> &mut [Box<dyn Sprite<G>>] {
        &mut self.sprites
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn is_active(&self, game: &G) -> bool {
        self.active.as_ref().map_or(true, |t| t.get(game.mode()))
    }

    pub fn is_visible(&self, game: &G) -> bool {
        self.visible.as_ref().map_or(true, |t| t.get(game.mode()))
    }

    /// One tick: init everything, then (if active) update and run collision checks
    /// for every sprite that moved against all other live, visible sprites.
    pub fn update(&mut self, game: &mut G) {
        for sprite in self.sprites.iter_mut().filter(|s| !s.deleted()) {
            sprite.init(game);
        }

        if !self.is_active(game) {
            return;
        }

        let Layer { sprites, moved, .. } = self;
        moved.clear();
        for (idx, sprite) in sprites.iter_mut().enumerate() {
            if sprite.deleted() {
                continue;
            }
            if sprite.update(game) {
                moved.push(idx);
            }
        }

        for &idx in moved.iter() {
            if sprites[idx].deleted() || !sprites[idx].visible() {
                continue;
            }
            let bounds = sprites[idx].bounds();
            for with in 0..sprites.len() {
                if with == idx || sprites[with].deleted() || !sprites[with].visible() {
                    continue;
                }
                if bounds.overlaps(&sprites[with].bounds()) {
                    let (sprite, other) = pair_mut(sprites, idx, with);
                    sprite.collision(other, game);
                    if sprite.deleted() {
                        break;
                    }
                }
            }
        }
        log::trace!("layer update: {} sprites, {} moved", sprites.len(), moved.len());
    }

    /// Drops deleted sprites (keeping the order of the survivors) and draws the rest if visible.
    pub fn draw(&mut self, game: &G, frame: &mut Frame) {
        self.sprites.retain(|s| !s.deleted());
        if !self.is_visible(game) {
            return;
        }
        for sprite in &self.sprites {
            sprite.draw(game, frame);
        }
    }
}

/// two distinct mutable sprites out of one slice
fn pair_mut<G: Stage>(
    sprites: &mut [Box<dyn Sprite<G>>],
    a: usize,
    b: usize,
) -> (&mut dyn Sprite<G>, &mut dyn Sprite<G>) {
    assert_ne!(a, b);
    if a < b {
        let (left, right) = sprites.split_at_mut(b);
        (left[a].as_mut(), right[0].as_mut())
    } else {
        let (left, right) = sprites.split_at_mut(a);
        (right[0].as_mut(), left[b].as_mut())
    }
}
