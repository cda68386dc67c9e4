pub mod breakout;
pub mod engine;
pub mod util;
