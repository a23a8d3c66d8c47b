use std::path::Path;
use anyhow::Result;
use clap::Parser;
use raylib::prelude::*;

use carousel::catalog::CarouselImage;
use carousel::config::{Args, init_logger};
use carousel::constants::*;
use carousel::controller::CarouselController;
use carousel::scroll::ScrollEngine;
use carousel::slide::Slide;
use carousel::texture_loader::load_texture_with_exif_rotation;
use carousel::view::{CarouselView, Layout};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level);

    let images = args.images()?;
    let options = args.carousel_options();

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Captured Moments")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Load Slides ---
    let slides: Vec<Slide> = images
        .iter()
        .enumerate()
        .map(|(index, image)| Slide::new(image.clone(), load_texture(&mut rl, &thread, image), index))
        .collect();

    // --- Mount: attach the engine to the current viewport ---
    let mut controller: CarouselController<ScrollEngine> = CarouselController::new(images);
    let layout = Layout::compute(rl.get_screen_width(), rl.get_screen_height(), slides.len(), 0);
    if let Err(e) = controller.initialize(&options, |count, options| {
        ScrollEngine::attach(layout.viewport_size(), count, options)
    }) {
        // Keep the page up with a static first image
        log::error!("Carousel failed to initialize, showing a static view: {}", e);
    }

    let mut view = CarouselView::new();

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let layout = Layout::compute(
            rl.get_screen_width(),
            rl.get_screen_height(),
            slides.len(),
            controller.selected_index(),
        );

        view.update(dt);
        view.handle_input(&rl, &layout, &mut controller);

        let visible = !rl.is_window_minimized() && rl.is_window_focused();
        if let Some(engine) = controller.engine_mut() {
            engine.set_document_visible(visible);
            engine.update(dt);
        }

        let mut d = rl.begin_drawing(&thread);
        view.draw(&mut d, &layout, &controller, &slides);
    }

    controller.teardown();
    Ok(())
}

// Local files become textures; remote sources keep a placeholder
fn load_texture(rl: &mut RaylibHandle, thread: &RaylibThread, image: &CarouselImage) -> Option<Texture2D> {
    if image.is_remote() {
        log::debug!("Not fetching remote image {}", image.src);
        return None;
    }
    let path = Path::new(&image.src);
    match load_texture_with_exif_rotation(rl, thread, path) {
        Ok(texture) => Some(texture),
        Err(e) => {
            log::warn!("Error processing image {}: {:#}", path.display(), e);
            None
        }
    }
}
