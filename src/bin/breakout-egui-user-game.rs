use std::ops::Add;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use egui::{Context, Id, Key, LayerId, Modifiers, Order, TextureHandle, TextureOptions};
use image::RgbaImage;

use breakout::breakout::app_game_drawer::AppGameDrawer;
use breakout::breakout::bitmaps::{ball_bitmap, load_image, to_color_image};
use breakout::breakout::egui_typesetter::EguiTypesetter;
use breakout::breakout::{Breakout, GameConfig, GameInput, PanelControl, Resources, BALL_COLOR, TIME_GRANULARITY};
use breakout::engine::{Frame, Texture};
use breakout::util::init_logging;

/// falling further behind than this skips the missed ticks
const MAX_LAG: Duration = Duration::from_millis(250);

/// Key presses seen since the last tick
#[derive(Default)]
struct LatchedKeys {
    launch: bool,
    toggle_pause: bool,
    toggle_demo: bool,
    exit: bool,
}

pub struct BreakoutApp {
    config: GameConfig,
    ball_texture: TextureHandle,
    background_texture: Option<TextureHandle>,
    /// built with the first frame; text measuring needs the fonts of a running context
    game: Option<Breakout>,
    frame: Frame,
    latched: LatchedKeys,
    next_step_time: Instant,
}

impl BreakoutApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: GameConfig,
        ball: &RgbaImage,
        background: Option<&RgbaImage>,
    ) -> Self {
        let ball_texture = cc.egui_ctx.load_texture("ball", to_color_image(ball), TextureOptions::LINEAR);
        let background_texture =
            background.map(|image| cc.egui_ctx.load_texture("background", to_color_image(image), TextureOptions::LINEAR));
        Self {
            config,
            ball_texture,
            background_texture,
            game: None,
            frame: Frame::new(),
            latched: LatchedKeys::default(),
            next_step_time: Instant::now().add(TIME_GRANULARITY),
        }
    }

    fn latch_keys(&mut self, ctx: &Context) {
        ctx.input(|i| {
            self.latched.launch |= i.key_pressed(Key::Space);
            self.latched.toggle_pause |= i.key_pressed(Key::P);
            self.latched.toggle_demo |= i.key_pressed(Key::D);
            self.latched.exit |= exit_requested(i.key_pressed(Key::Escape), i.key_pressed(Key::Q), i.modifiers);
        });
    }

    fn read_ui_control(&mut self, ctx: &Context, drawer: &AppGameDrawer) -> GameInput {
        let control = if ctx.input(|i| i.key_down(Key::ArrowLeft) && !i.key_down(Key::ArrowRight)) {
            PanelControl::AccelerateLeft
        } else if ctx.input(|i| i.key_down(Key::ArrowRight) && !i.key_down(Key::ArrowLeft)) {
            PanelControl::AccelerateRight
        } else {
            PanelControl::None
        };
        let pointer = ctx
            .input(|i| i.pointer.primary_down().then(|| i.pointer.interact_pos()).flatten())
            .map(|pos| drawer.to_field(pos));
        let latched = std::mem::take(&mut self.latched);
        GameInput {
            control,
            launch: latched.launch,
            toggle_pause: latched.toggle_pause,
            toggle_demo: latched.toggle_demo,
            pointer,
            exit: latched.exit,
        }
    }

    fn resources(&self, ctx: &Context) -> Resources {
        Resources {
            ball: Texture::from(&self.ball_texture),
            background: self.background_texture.as_ref().map(Texture::from),
            typesetter: Rc::new(EguiTypesetter::new(ctx.clone())),
        }
    }
}

impl eframe::App for BreakoutApp {
    fn update(&mut self, ctx: &Context, frame: &mut eframe::Frame) {
        if self.game.is_none() {
            let resources = self.resources(ctx);
            self.game = Some(Breakout::new(self.config.clone(), resources));
        }
        self.latch_keys(ctx);

        let drawer = AppGameDrawer::new(ctx.screen_rect(), self.config.field_size);
        let now = Instant::now();
        if now.duration_since(self.next_step_time) > MAX_LAG {
            log::debug!("skipping ticks after a lag of {:?}", now.duration_since(self.next_step_time));
            self.next_step_time = now;
        }
        while now >= self.next_step_time {
            self.next_step_time = self.next_step_time.add(TIME_GRANULARITY);
            let input = self.read_ui_control(ctx, &drawer);
            let Some(game) = self.game.as_mut() else {
                return;
            };
            if let Err(quit) = game.update(&input) {
                log::info!("{quit}");
                frame.close();
                return;
            }
        }

        if let Some(game) = self.game.as_mut() {
            self.frame.clear();
            game.draw(&mut self.frame);
            let painter = ctx
                .layer_painter(LayerId::new(Order::Foreground, Id::new("game")))
                .with_clip_rect(drawer.field_rect(self.config.field_size));
            drawer.paint(&painter, &self.frame);
        }
        ctx.request_repaint();
    }
}

/// Escape, or Q together with Alt
fn exit_requested(escape: bool, q: bool, modifiers: Modifiers) -> bool {
    escape || (q && modifiers.alt)
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = GameConfig::default();
    config.validate()?;

    let background = match std::env::args().nth(1) {
        Some(path) => Some(load_image(Path::new(&path))?),
        None => None,
    };
    let ball = ball_bitmap(config.ball_size.round() as u32, BALL_COLOR);

    let native_options = eframe::NativeOptions {
        initial_window_size: Some(config.window_size),
        resizable: config.resizable,
        default_theme: eframe::Theme::Dark,
        ..Default::default()
    };
    let title = config.title.clone();
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| Box::new(BreakoutApp::new(cc, config, &ball, background.as_ref()))),
    )
    .map_err(|e| anyhow!("game window failed: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use egui::Modifiers;
    use rstest::rstest;

    use super::exit_requested;

    #[rstest]
    #[case(true, false, Modifiers::NONE, true)]
    #[case(false, true, Modifiers::ALT, true)]
    #[case(false, true, Modifiers::NONE, false)]
    #[case(false, true, Modifiers::SHIFT, false)]
    #[case(false, false, Modifiers::ALT, false)]
    fn quits_on_escape_or_alt_q(#[case] escape: bool, #[case] q: bool, #[case] modifiers: Modifiers, #[case] expected: bool) {
        assert_eq!(exit_requested(escape, q, modifiers), expected);
    }
}
