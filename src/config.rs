use std::path::PathBuf;
use std::time::Duration;
use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use crate::catalog::{self, CarouselImage};
use crate::constants::*;
use crate::options::{Align, CarouselOptions, ContainScroll};

/// Image carousel with autoplay, arrows, dots and thumbnails.
#[derive(Debug, Parser)]
#[command(name = "carousel", version, about)]
pub struct Args {
    /// Show every picture of this directory instead of the built-in images
    #[arg(long, conflicts_with = "manifest")]
    pub images_dir: Option<PathBuf>,

    /// JSON array of {src, alt, title?, description?} records
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Autoplay delay in milliseconds
    #[arg(long, default_value_t = AUTOPLAY_DELAY_MS)]
    pub delay_ms: u64,

    /// Stop at the first and last slide instead of wrapping around
    #[arg(long)]
    pub no_loop: bool,

    #[arg(long, value_enum, default_value_t = Align::Center)]
    pub align: Align,

    #[arg(long, value_enum, default_value_t = ContainScroll::TrimSnaps)]
    pub contain_scroll: ContainScroll,

    /// Slide width as a fraction of the viewport
    #[arg(long, default_value_t = SLIDE_SIZE)]
    pub slide_size: f32,

    /// Dragging the strip stops autoplay for good
    #[arg(long)]
    pub stop_on_interaction: bool,

    /// Start with autoplay stopped
    #[arg(long)]
    pub paused: bool,

    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub width: i32,

    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub height: i32,

    /// off, error, warn, info, debug or trace (RUST_LOG overrides per module)
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Args {
    pub fn carousel_options(&self) -> CarouselOptions {
        CarouselOptions {
            looping: !self.no_loop,
            align: self.align,
            contain_scroll: self.contain_scroll,
            slide_size: self.slide_size,
            autoplay_delay: Duration::from_millis(self.delay_ms),
            stop_on_interaction: self.stop_on_interaction,
            play_on_init: !self.paused,
        }
    }

    pub fn images(&self) -> Result<Vec<CarouselImage>> {
        match (&self.images_dir, &self.manifest) {
            (Some(dir), _) => catalog::from_directory(dir),
            (None, Some(manifest)) => catalog::load_manifest(manifest),
            (None, None) => Ok(catalog::default_images()),
        }
    }
}

pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_landing_section() {
        let args = Args::try_parse_from(["carousel"]).unwrap();
        assert_eq!(args.carousel_options(), CarouselOptions::default());
        assert_eq!(args.images().unwrap(), catalog::default_images());
        assert_eq!(args.log_level, LevelFilter::Info);
    }

    #[test]
    fn flags_override_options() {
        let args = Args::try_parse_from([
            "carousel",
            "--delay-ms",
            "1500",
            "--no-loop",
            "--align",
            "start",
            "--contain-scroll",
            "keep-snaps",
            "--stop-on-interaction",
            "--paused",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let options = args.carousel_options();
        assert!(!options.looping);
        assert_eq!(options.align, Align::Start);
        assert_eq!(options.contain_scroll, ContainScroll::KeepSnaps);
        assert_eq!(options.autoplay_delay, Duration::from_millis(1500));
        assert!(options.stop_on_interaction);
        assert!(!options.play_on_init);
        assert_eq!(args.log_level, LevelFilter::Debug);
    }

    #[test]
    fn directory_and_manifest_are_exclusive() {
        let result = Args::try_parse_from(["carousel", "--images-dir", "pics", "--manifest", "pics.json"]);
        assert!(result.is_err());
    }
}
