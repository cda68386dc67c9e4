use egui::Vec2;

use breakout::engine::{Frame, ImageSprite, Layer, Level, Mode, Primitive};

use common::{pos, texture};

mod common;

/// eight sprites; the x position doubles as the sprite id
fn level() -> Level<Mode> {
    let mut layer: Layer<Mode> = Layer::new();
    for id in 0..8 {
        layer.push(Box::new(ImageSprite::new(pos(id as f32, 0.0), texture(1, Vec2::splat(1.0)))));
    }
    Level::new(vec![layer])
}

fn ids(level: &Level<Mode>) -> Vec<usize> {
    level.layer(0).sprites().iter().map(|s| s.corner().x as usize).collect()
}

fn delete_id(level: &mut Level<Mode>, id: usize) {
    let sprite = level
        .layer_mut(0)
        .sprites_mut()
        .iter_mut()
        .find(|s| s.corner().x as usize == id)
        .expect("sprite with id");
    sprite.delete();
}

/// draws one frame and returns the ids of the drawn images
fn draw(level: &mut Level<Mode>) -> Vec<usize> {
    let mut frame = Frame::new();
    level.draw(&Mode::Play, &mut frame);
    frame
        .primitives()
        .iter()
        .map(|p| match p {
            Primitive::Image { rect, .. } => rect.min.x as usize,
            other => panic!("unexpected primitive {other:?}"),
        })
        .collect()
}

#[test]
fn compaction_keeps_the_order_of_the_survivors() {
    let mut level = level();

    delete_id(&mut level, 3);
    assert_eq!(ids(&level).len(), 8, "removal happens during draw only");
    assert_eq!(draw(&mut level), vec![0, 1, 2, 4, 5, 6, 7]);
    assert_eq!(ids(&level), vec![0, 1, 2, 4, 5, 6, 7]);

    delete_id(&mut level, 7);
    assert_eq!(draw(&mut level), vec![0, 1, 2, 4, 5, 6]);

    delete_id(&mut level, 0);
    assert_eq!(draw(&mut level), vec![1, 2, 4, 5, 6]);

    level
        .layer_mut(0)
        .push(Box::new(ImageSprite::new(pos(8.0, 0.0), texture(1, Vec2::splat(1.0)))));
    assert_eq!(draw(&mut level), vec![1, 2, 4, 5, 6, 8]);

    delete_id(&mut level, 4);
    assert_eq!(draw(&mut level), vec![1, 2, 5, 6, 8]);
    assert_eq!(ids(&level), vec![1, 2, 5, 6, 8]);
}

#[test]
fn deleted_sprites_are_not_updated_anymore() {
    let mut level = level();
    level.layer_mut(0).sprites_mut()[2].delete();
    for sprite in level.layer_mut(0).sprites_mut() {
        if let Some(image) = sprite.as_any_mut().downcast_mut::<ImageSprite>() {
            image.vel = Vec2::new(0.0, 1.0);
        }
    }

    level.update(&mut Mode::Play);
    let ys: Vec<f32> = level.layer(0).sprites().iter().map(|s| s.corner().y).collect();
    assert_eq!(ys, vec![1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
}
