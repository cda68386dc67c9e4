use egui::{Pos2, Vec2};

/// Axis-aligned Bounding Box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AaBB {
    pub min: Pos2,
    pub max: Pos2,
}

impl AaBB {
    pub fn from_corner_size(corner: Pos2, size: Vec2) -> Self {
        AaBB {
            min: corner,
            max: corner + size,
        }
    }

    pub fn center(&self) -> Pos2 {
        Pos2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// negative extent on either axis
    pub fn is_malformed(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y
    }

    /// Half-open overlap test: boxes sharing only an edge do not overlap.
    /// Malformed boxes never overlap anything.
    pub fn overlaps(&self, other: &AaBB) -> bool {
        if self.is_malformed() || other.is_malformed() {
            return false;
        }
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Where a sprite sits relative to another one, judged from their centers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollideDirection {
    XGreater,
    XLess,
    YGreater,
    YLess,
}

impl CollideDirection {
    /// Classifies `sprite` relative to `with`.
    ///
    /// The dominating axis of the center distance wins; on a tie the vertical axis is used.
    /// This is a cheap heuristic, not a penetration-depth resolution.
    pub fn of(sprite: &AaBB, with: &AaBB) -> Self {
        let c1 = sprite.center();
        let c2 = with.center();
        if (c1.x - c2.x).abs() > (c1.y - c2.y).abs() {
            if c1.x > c2.x {
                CollideDirection::XGreater
            } else {
                CollideDirection::XLess
            }
        } else if c1.y > c2.y {
            CollideDirection::YGreater
        } else {
            CollideDirection::YLess
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            CollideDirection::XGreater => CollideDirection::XLess,
            CollideDirection::XLess => CollideDirection::XGreater,
            CollideDirection::YGreater => CollideDirection::YLess,
            CollideDirection::YLess => CollideDirection::YGreater,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, CollideDirection::XGreater | CollideDirection::XLess)
    }
}
