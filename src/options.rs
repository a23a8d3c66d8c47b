use std::time::Duration;
use clap::ValueEnum;
use crate::constants::*;
use crate::error::EngineInitError;

/// Where a snap point sits inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Align {
    Start,
    Center,
    End,
}

/// How snaps are treated near the edges of a non-looping strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContainScroll {
    None,       // Snaps may leave empty space before the first / after the last slide
    TrimSnaps,  // Snaps are clamped to the scrollable range and duplicates merged
    KeepSnaps,  // Snaps are clamped but every slide keeps its own snap
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselOptions {
    pub looping: bool,
    pub align: Align,
    pub contain_scroll: ContainScroll,
    pub slide_size: f32,
    pub autoplay_delay: Duration,
    pub stop_on_interaction: bool,
    pub play_on_init: bool,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            looping: true,
            align: Align::Center,
            contain_scroll: ContainScroll::TrimSnaps,
            slide_size: SLIDE_SIZE,
            autoplay_delay: Duration::from_millis(AUTOPLAY_DELAY_MS),
            stop_on_interaction: false,
            play_on_init: true,
        }
    }
}

impl CarouselOptions {
    pub fn validate(&self) -> Result<(), EngineInitError> {
        if !(self.slide_size > 0.0 && self.slide_size <= 1.0) {
            return Err(EngineInitError::InvalidOptions(format!(
                "slide size must be in (0, 1], got {}",
                self.slide_size
            )));
        }
        if self.autoplay_delay.is_zero() {
            return Err(EngineInitError::InvalidOptions("autoplay delay must not be zero".into()));
        }
        Ok(())
    }
}
