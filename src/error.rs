use thiserror::Error;

/// Raised when the carousel engine cannot attach to its viewport.
///
/// This is the only fatal condition of the section: commands issued while no
/// engine is attached are dropped silently instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineInitError {
    #[error("carousel viewport is missing")]
    MissingViewport,
    #[error("carousel viewport has no area ({width}x{height})")]
    EmptyViewport { width: f32, height: f32 },
    #[error("carousel has no slides to attach to")]
    NoSlides,
    #[error("invalid carousel options: {0}")]
    InvalidOptions(String),
}
