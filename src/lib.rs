pub mod catalog;
pub mod config;
pub mod constants;
pub mod controller;
pub mod engine;
pub mod error;
pub mod events;
pub mod options;
pub mod scroll;
pub mod slide;
pub mod state;
pub mod texture_loader;
pub mod theme;
pub mod view;

pub use catalog::CarouselImage;
pub use controller::CarouselController;
pub use engine::{AutoplayControl, Engine};
pub use error::EngineInitError;
pub use options::CarouselOptions;
pub use state::SelectionState;
