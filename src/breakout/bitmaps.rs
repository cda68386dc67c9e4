use std::path::Path;

use anyhow::Context;
use egui::ColorImage;
use image::{ImageBuffer, Rgba, RgbaImage};

/// Round ball bitmap with a one pixel wide anti-aliased edge
pub fn ball_bitmap(diameter: u32, color: [u8; 3]) -> RgbaImage {
    let radius = diameter as f32 / 2.0;
    ImageBuffer::from_fn(diameter, diameter, |x, y| {
        let dx = x as f32 + 0.5 - radius;
        let dy = y as f32 + 0.5 - radius;
        let distance = (dx * dx + dy * dy).sqrt();
        let coverage = (radius - distance + 0.5).clamp(0.0, 1.0);
        let [r, g, b] = color;
        Rgba([r, g, b, (coverage * 255.0).round() as u8])
    })
}

pub fn to_color_image(image: &RgbaImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

/// Decodes an image file of any format the `image` crate knows
pub fn load_image(path: &Path) -> anyhow::Result<RgbaImage> {
    let image = image::open(path)
        .with_context(|| format!("failed to load image '{}'", path.display()))?
        .into_rgba8();
    log::debug!("loaded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn ball_is_round() {
        let ball = ball_bitmap(10, [255, 255, 0]);
        assert_eq!(ball.dimensions(), (10, 10));
        assert_eq!(ball.get_pixel(5, 5).0, [255, 255, 0, 255]);
        assert_eq!(ball.get_pixel(0, 0).0[3], 0);
        assert_eq!(ball.get_pixel(9, 9).0[3], 0);
        // edge pixels are partially covered
        let edge = ball.get_pixel(0, 5).0[3];
        assert!(edge > 0 && edge < 255, "edge alpha {edge}");
    }

    #[test]
    fn converts_to_egui_image() {
        let image = to_color_image(&ball_bitmap(6, [0, 0, 255]));
        assert_eq!(image.size, [6, 6]);
        assert_eq!(image.pixels.len(), 36);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_image(Path::new("/nonexistent/background.png")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/background.png"));
    }
}
