use super::frame::Frame;
use super::layer::Layer;
use super::Stage;

/// Ordered layers; the first one is painted first.
pub struct Level<G: Stage> {
    layers: Vec<Layer<G>>,
}

impl<G: Stage> Default for Level<G> {
    fn default() -> Self {
        Self { layers: vec![] }
    }
}

impl<G: Stage> Level<G> {
    pub fn new(layers: Vec<Layer<G>>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[Layer<G>] {
        &self.layers
    }

    pub fn layer(&self, idx: usize) -> &Layer<G> {
        &self.layers[idx]
    }

    pub fn layer_mut(&mut self, idx: usize) -> &mut Layer<G> {
        &mut self.layers[idx]
    }

    pub fn update(&mut self, game: &mut G) {
        for layer in self.layers.iter_mut() {
            layer.update(game);
        }
    }

    pub fn draw(&mut self, game: &G, frame: &mut Frame) {
        for layer in self.layers.iter_mut() {
            layer.draw(game, frame);
        }
    }
}
