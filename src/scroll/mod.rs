pub mod autoplay;
pub mod engine;
pub mod snaps;

pub use engine::{ScrollEngine, Viewport};
