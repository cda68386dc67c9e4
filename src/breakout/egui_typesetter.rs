use egui::{Color32, Context, FontId};

use crate::engine::Typesetter;

/// Measures text with the fonts of an egui context
pub struct EguiTypesetter {
    ctx: Context,
}

impl EguiTypesetter {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

impl Typesetter for EguiTypesetter {
    fn line_width(&self, line: &str, font: &FontId) -> f32 {
        self.ctx
            .fonts(|f| f.layout_no_wrap(line.to_owned(), font.clone(), Color32::WHITE).size().x)
    }

    fn line_height(&self, font: &FontId) -> f32 {
        self.ctx.fonts(|f| f.row_height(font))
    }
}
