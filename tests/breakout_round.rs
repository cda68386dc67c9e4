use egui::Vec2;

use breakout::breakout::{GameConfig, GameInput, PanelControl, QuitRequested, Serve, GAME_LAYER};
use breakout::engine::Primitive;

use common::{new_game, tick};

mod common;

/// odd column count puts a block right above the paddle center; no random launch component
fn straight_config() -> GameConfig {
    GameConfig {
        block_columns: 7,
        launch_jitter: 0.0,
        ..GameConfig::default()
    }
}

#[test]
fn launch_hit_miss_and_serve_again() {
    let mut game = new_game(straight_config(), 1);
    assert_eq!(game.session().blocks_left, 35);
    assert_eq!(game.session().serve, Serve::Start);

    tick(&mut game, GameInput::launch());
    assert_eq!(game.session().serve, Serve::Play);
    assert_eq!(game.ball().expect("ball").velocity(), Vec2::new(0.0, -4.0));
    // walls, blocks, paddle and ball
    assert_eq!(game.level().layer(GAME_LAYER).len(), 41);

    let mut ticks = 0;
    while game.session().score == 0 {
        tick(&mut game, GameInput::none());
        ticks += 1;
        assert!(ticks < 100, "ball never reached the blocks");
    }
    assert_eq!(game.session().score, 1);
    assert_eq!(game.session().blocks_left, 34);
    // hit from below: only the vertical component flips
    assert_eq!(game.ball().expect("ball").velocity(), Vec2::new(0.0, 4.0));
    assert_eq!(game.level().layer(GAME_LAYER).len(), 40);

    // pull the paddle away and let the ball drop out
    let mut ticks = 0;
    while game.session().serve == Serve::Play {
        tick(&mut game, GameInput::action(PanelControl::AccelerateLeft));
        ticks += 1;
        assert!(ticks < 300, "ball never left the field");
    }
    assert_eq!(game.session().misses, 1);
    assert_eq!(game.session().ball_center, None);
    assert!(game.ball().is_none());

    let frame = tick(&mut game, GameInput::none());
    let texts: Vec<&str> = frame.texts().collect();
    assert!(texts.contains(&"Score 1   Wave 1   Misses 1"), "{texts:?}");
    assert!(texts.contains(&"Press SPACE to launch"), "{texts:?}");
    // the resting ball sits on the paddle again
    assert!(frame
        .primitives()
        .iter()
        .any(|p| matches!(p, Primitive::Image { rect, .. } if rect.max.y == game.session().paddle_bounds.min.y)));

    tick(&mut game, GameInput::launch());
    assert_eq!(game.session().serve, Serve::Play);
    assert!(game.ball().is_some());
}

#[test]
fn quit_ends_the_round() {
    let mut game = new_game(GameConfig::default(), 2);
    tick(&mut game, GameInput::launch());
    let quit = GameInput {
        exit: true,
        ..GameInput::none()
    };
    assert_eq!(game.update(&quit), Err(QuitRequested));
}

#[test]
fn demo_keeps_the_ball_speed_constant() {
    let mut game = new_game(GameConfig::default(), 3);
    tick(
        &mut game,
        GameInput {
            toggle_demo: true,
            ..GameInput::none()
        },
    );
    for _ in 0..2000 {
        tick(&mut game, GameInput::none());
        if let Some(ball) = game.ball() {
            let v = ball.velocity();
            assert!((v.length() - 4.0).abs() < 1e-3, "{v:?}");
            assert!(v.y.abs() >= 1.0 - 1e-3, "{v:?}");
        }
        let session = game.session();
        assert!(session.blocks_left <= 40);
    }
}
