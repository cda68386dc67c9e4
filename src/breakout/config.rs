use std::time::Duration;

use anyhow::ensure;
use egui::Vec2;

/// fixed duration of one game tick
pub const TIME_GRANULARITY: Duration = Duration::from_millis(16);

/// Game constants. TOP / LEFT corner of the playfield is 0/0.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub title: String,
    pub window_size: Vec2,
    pub resizable: bool,

    pub field_size: Vec2,

    pub paddle_size: Vec2,
    /// gap between paddle and the bottom of the field
    pub paddle_bottom_gap: f32,
    pub paddle_accel: f32,
    /// slow down if not accelerated
    pub paddle_decel: f32,
    pub paddle_max_speed: f32,

    pub ball_size: f32,
    pub ball_speed: f32,
    /// |dy| never drops below this fraction of the ball speed
    pub ball_min_vertical_fraction: f32,
    /// max deflection off the vertical when bouncing off the paddle; radians
    pub paddle_max_deflection: f32,
    /// share of the paddle velocity passed on to a launched ball
    pub launch_english: f32,
    /// random horizontal launch component is drawn from `-launch_jitter..launch_jitter`
    pub launch_jitter: f32,

    pub block_size: Vec2,
    pub block_spacing: f32,
    pub block_columns: usize,
    pub block_rows: usize,
    pub blocks_top_y: f32,

    pub font_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Breakout".to_string(),
            window_size: Vec2::new(500.0, 500.0),
            resizable: true,

            field_size: Vec2::new(400.0, 400.0),

            paddle_size: Vec2::new(80.0, 10.0),
            paddle_bottom_gap: 2.0,
            paddle_accel: 0.5,
            paddle_decel: 1.0,
            paddle_max_speed: 20.0,

            ball_size: 10.0,
            ball_speed: 4.0,
            ball_min_vertical_fraction: 0.25,
            paddle_max_deflection: 60_f32.to_radians(),
            launch_english: 0.25,
            launch_jitter: 0.5,

            block_size: Vec2::new(40.0, 12.0),
            block_spacing: 4.0,
            block_columns: 8,
            block_rows: 5,
            blocks_top_y: 40.0,

            font_size: 16.0,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.field_size.x > 0.0 && self.field_size.y > 0.0,
            "field size must be positive, got {:?}",
            self.field_size
        );
        ensure!(
            self.paddle_size.x > 0.0 && self.paddle_size.y > 0.0,
            "paddle size must be positive, got {:?}",
            self.paddle_size
        );
        ensure!(
            self.paddle_size.x < self.field_size.x,
            "paddle ({}) must be narrower than the field ({})",
            self.paddle_size.x,
            self.field_size.x
        );
        ensure!(self.ball_size > 0.0 && self.ball_speed > 0.0, "ball size and speed must be positive");
        ensure!(
            (0.0..1.0).contains(&self.ball_min_vertical_fraction),
            "min vertical fraction must be in [0, 1)"
        );
        ensure!(self.launch_jitter >= 0.0, "launch jitter must not be negative");
        Ok(())
    }

    /// y coordinate of the paddle's top edge
    pub fn paddle_y(&self) -> f32 {
        self.field_size.y - (self.paddle_size.y + self.paddle_bottom_gap)
    }

    /// smallest allowed |dy| of the ball
    pub fn ball_min_dy(&self) -> f32 {
        self.ball_speed * self.ball_min_vertical_fraction
    }
}

#[cfg(test)]
mod tests {
    use egui::Vec2;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.paddle_y(), 388.0);
        assert_eq!(config.ball_min_dy(), 1.0);
    }

    #[test]
    fn rejects_paddle_wider_than_field() {
        let config = GameConfig {
            paddle_size: Vec2::new(500.0, 10.0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
