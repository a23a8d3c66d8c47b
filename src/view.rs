use raylib::prelude::*;
use crate::constants::*;
use crate::controller::CarouselController;
use crate::engine::{AutoplayControl, Engine};
use crate::scroll::{ScrollEngine, Viewport};
use crate::slide::Slide;
use crate::theme::*;

const MARGIN_RATIO: f32 = 0.05;
const HEADER_HEIGHT: f32 = 120.0;
const ROW_GAP: f32 = 24.0;
const DOT_GAP: f32 = 8.0;
const THUMB_GAP: f32 = 16.0;

/// What a click or key press asks the carousel to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Previous,
    Next,
    GoTo(usize),
    ToggleAutoplay,
}

pub fn dispatch<E: Engine>(intent: Intent, controller: &mut CarouselController<E>) {
    log::debug!("Intent {:?}", intent);
    match intent {
        Intent::Previous => controller.go_to_previous(),
        Intent::Next => controller.go_to_next(),
        Intent::GoTo(index) => controller.go_to(index),
        Intent::ToggleAutoplay => controller.toggle_autoplay(),
    }
}

// --- Screen Layout (pixels), recomputed every frame ---
#[derive(Debug, Clone)]
pub struct Layout {
    pub screen_width: f32,
    pub viewport: Rectangle,
    pub toggle: Rectangle,
    pub prev: Rectangle,
    pub next: Rectangle,
    pub dots: Vec<Rectangle>,
    pub thumbs: Vec<Rectangle>,
}

impl Layout {
    pub fn compute(screen_width: i32, screen_height: i32, count: usize, selected: usize) -> Self {
        let screen_width = screen_width.max(0) as f32;
        let screen_height = screen_height.max(0) as f32;
        let show_thumbs = screen_width >= THUMBS_MIN_WIDTH as f32;

        let margin = (screen_width * MARGIN_RATIO).max(24.0);
        let content_width = (screen_width - 2.0 * margin).max(0.0);
        let below = ROW_GAP + BUTTON_SIZE + ROW_GAP + DOT_SIZE
            + if show_thumbs { 2.0 * ROW_GAP + THUMB_HEIGHT } else { 0.0 }
            + ROW_GAP;
        let available_height = (screen_height - HEADER_HEIGHT - below).max(0.0);

        // Slides are 16:9 and take SLIDE_SIZE of the viewport width
        let mut width = content_width;
        let mut height = width * SLIDE_SIZE * 9.0 / 16.0;
        if height > available_height {
            height = available_height;
            width = height * 16.0 / 9.0 / SLIDE_SIZE;
        }
        let viewport = Rectangle::new((screen_width - width) * 0.5, HEADER_HEIGHT, width, height);

        let controls_y = viewport.y + viewport.height + ROW_GAP;
        let toggle = Rectangle::new(viewport.x, controls_y, BUTTON_SIZE, BUTTON_SIZE);
        let right = viewport.x + viewport.width;
        let next = Rectangle::new(right - BUTTON_SIZE, controls_y, BUTTON_SIZE, BUTTON_SIZE);
        let prev = Rectangle::new(next.x - 1.0 - BUTTON_SIZE, controls_y, BUTTON_SIZE, BUTTON_SIZE);

        let dots_y = controls_y + BUTTON_SIZE + ROW_GAP;
        let dot_width = |i: usize| if i == selected { DOT_ACTIVE_WIDTH } else { DOT_SIZE };
        let dots_total: f32 = (0..count).map(dot_width).sum::<f32>() + DOT_GAP * count.saturating_sub(1) as f32;
        let mut x = (screen_width - dots_total) * 0.5;
        let dots = (0..count)
            .map(|i| {
                let dot = Rectangle::new(x, dots_y, dot_width(i), DOT_SIZE);
                x += dot.width + DOT_GAP;
                dot
            })
            .collect();

        let thumbs = if show_thumbs {
            let thumbs_y = dots_y + DOT_SIZE + 2.0 * ROW_GAP;
            let total = THUMB_WIDTH * count as f32 + THUMB_GAP * count.saturating_sub(1) as f32;
            let start = (screen_width - total) * 0.5;
            (0..count)
                .map(|i| Rectangle::new(start + i as f32 * (THUMB_WIDTH + THUMB_GAP), thumbs_y, THUMB_WIDTH, THUMB_HEIGHT))
                .collect()
        } else {
            Vec::new()
        };

        Self { screen_width, viewport, toggle, prev, next, dots, thumbs }
    }

    /// `None` while the window has no room for the carousel.
    pub fn viewport_size(&self) -> Option<Viewport> {
        if self.viewport.width < 1.0 || self.viewport.height < 1.0 {
            return None;
        }
        Some(Viewport { width: self.viewport.width, height: self.viewport.height })
    }

    pub fn hit_test(&self, point: Vector2) -> Option<Intent> {
        if contains(self.toggle, point) {
            return Some(Intent::ToggleAutoplay);
        }
        if contains(self.prev, point) {
            return Some(Intent::Previous);
        }
        if contains(self.next, point) {
            return Some(Intent::Next);
        }
        self.dots
            .iter()
            .chain(self.thumbs.iter())
            .position(|rec| contains(*rec, point))
            .map(|i| Intent::GoTo(i % self.dots.len().max(1)))
    }

    /// Horizontal position inside the viewport, in viewport widths.
    pub fn viewport_fraction(&self, point: Vector2) -> f32 {
        if self.viewport.width <= 0.0 {
            return 0.0;
        }
        (point.x - self.viewport.x) / self.viewport.width
    }
}

fn contains(rec: Rectangle, point: Vector2) -> bool {
    point.x >= rec.x && point.x < rec.x + rec.width && point.y >= rec.y && point.y < rec.y + rec.height
}

const DIGIT_KEYS: [KeyboardKey; 9] = [
    KeyboardKey::KEY_ONE,
    KeyboardKey::KEY_TWO,
    KeyboardKey::KEY_THREE,
    KeyboardKey::KEY_FOUR,
    KeyboardKey::KEY_FIVE,
    KeyboardKey::KEY_SIX,
    KeyboardKey::KEY_SEVEN,
    KeyboardKey::KEY_EIGHT,
    KeyboardKey::KEY_NINE,
];

// --- Presentation: header animation and input routing ---
pub struct CarouselView {
    tween_opacity: ease::Tween,
    tween_offset: ease::Tween,
    opacity: f32,
    offset: f32,
}

impl Default for CarouselView {
    fn default() -> Self {
        Self::new()
    }
}

impl CarouselView {
    pub fn new() -> Self {
        Self {
            tween_opacity: ease::Tween::new(ease::cubic_out, 0.0, 1.0, INTRO_DURATION),
            tween_offset: ease::Tween::new(ease::cubic_out, INTRO_OFFSET, 0.0, INTRO_DURATION),
            opacity: 0.0,
            offset: INTRO_OFFSET,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.opacity = self.tween_opacity.apply(dt);
        self.offset = self.tween_offset.apply(dt);
    }

    pub fn handle_input(
        &mut self,
        rl: &RaylibHandle,
        layout: &Layout,
        controller: &mut CarouselController<ScrollEngine>,
    ) {
        // Keyboard
        let mut intents = Vec::new();
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            intents.push(Intent::Previous);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            intents.push(Intent::Next);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            intents.push(Intent::ToggleAutoplay);
        }
        for (i, key) in DIGIT_KEYS.iter().enumerate() {
            if rl.is_key_pressed(*key) {
                intents.push(Intent::GoTo(i));
            }
        }

        // Mouse: controls first, then drag inside the viewport
        let mouse = rl.get_mouse_position();
        let x = layout.viewport_fraction(mouse);
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if let Some(intent) = layout.hit_test(mouse) {
                intents.push(intent);
            } else if contains(layout.viewport, mouse) {
                if let Some(engine) = controller.engine_mut() {
                    engine.pointer_down(x);
                }
            }
        }
        if let Some(engine) = controller.engine_mut() {
            if engine.is_dragging() {
                if rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT) {
                    engine.pointer_move(x);
                } else {
                    engine.pointer_up(x);
                }
            }
        }

        for intent in intents {
            // Slides sharing a trimmed snap all jump to that snap
            let intent = match (intent, controller.engine()) {
                (Intent::GoTo(slide), Some(engine)) => Intent::GoTo(engine.snap_for_slide(slide).unwrap_or(slide)),
                _ => intent,
            };
            dispatch(intent, controller);
        }
    }

    pub fn draw(
        &self,
        d: &mut RaylibDrawHandle,
        layout: &Layout,
        controller: &CarouselController<ScrollEngine>,
        slides: &[Slide],
    ) {
        d.clear_background(BACKGROUND);
        self.draw_header(d, layout);

        match controller.engine() {
            Some(engine) => {
                self.draw_strip(d, layout, engine, slides);
                self.draw_controls(d, layout, controller, slides);
            }
            None => {
                // Degraded static view: first image only, no controls
                if let Some(slide) = slides.first() {
                    let width = layout.viewport.width * SLIDE_SIZE;
                    let dest = Rectangle::new(
                        layout.viewport.x + (layout.viewport.width - width) * 0.5,
                        layout.viewport.y,
                        width,
                        layout.viewport.height,
                    );
                    slide.draw(d, dest);
                }
            }
        }
    }

    fn draw_header(&self, d: &mut RaylibDrawHandle, layout: &Layout) {
        let y = 24.0 + self.offset;
        let title_size = 40;
        let first = "Captured ";
        let second = "Moments";
        let first_width = text_width(first, title_size);
        let total = first_width + text_width(second, title_size);
        let x = ((layout.screen_width - total as f32) * 0.5) as i32;
        d.draw_text(first, x, y as i32, title_size, with_opacity(FOREGROUND, self.opacity));
        d.draw_text(second, x + first_width, y as i32, title_size, with_opacity(ACCENT, self.opacity));

        let subtitle = "A visual journey through our transformative programs and events";
        let subtitle_size = 20;
        let subtitle_width = text_width(subtitle, subtitle_size);
        d.draw_text(
            subtitle,
            ((layout.screen_width - subtitle_width as f32) * 0.5) as i32,
            (y + 56.0) as i32,
            subtitle_size,
            with_opacity(MUTED, self.opacity),
        );
    }

    fn draw_strip(&self, d: &mut RaylibDrawHandle, layout: &Layout, engine: &ScrollEngine, slides: &[Slide]) {
        let vp = layout.viewport;
        let slide_width = engine.options().slide_size * vp.width;
        let mut s = d.begin_scissor_mode(vp.x as i32, vp.y as i32, vp.width as i32, vp.height as i32);
        for (i, slide) in slides.iter().enumerate() {
            let x = vp.x + engine.slide_offset(i) * vp.width;
            if x + slide_width < vp.x || x > vp.x + vp.width {
                continue;
            }
            let dest = Rectangle::new(x + SLIDE_GAP * 0.5, vp.y, slide_width - SLIDE_GAP, vp.height);
            slide.draw(&mut s, dest);
        }
    }

    fn draw_controls(
        &self,
        d: &mut RaylibDrawHandle,
        layout: &Layout,
        controller: &CarouselController<ScrollEngine>,
        slides: &[Slide],
    ) {
        let selected = controller.selected_index();

        // Autoplay progress along the bottom edge of the viewport
        if let Some(engine) = controller.engine() {
            let autoplay = engine.autoplay_state();
            if autoplay.is_playing() {
                let vp = layout.viewport;
                let bar = Rectangle::new(vp.x, vp.y + vp.height - 3.0, vp.width * autoplay.progress(), 3.0);
                d.draw_rectangle_rec(bar, with_opacity(PRIMARY, 0.8));
            }
        }

        // Play / pause
        let toggle = layout.toggle;
        d.draw_rectangle_rec(toggle, with_opacity(Color::WHITE, 0.05));
        d.draw_rectangle_lines_ex(toggle, 1.0, with_opacity(Color::WHITE, 0.1));
        let cx = toggle.x + toggle.width * 0.5;
        let cy = toggle.y + toggle.height * 0.5;
        if controller.is_playing() {
            d.draw_rectangle_rec(Rectangle::new(cx - 7.0, cy - 9.0, 5.0, 18.0), FOREGROUND);
            d.draw_rectangle_rec(Rectangle::new(cx + 2.0, cy - 9.0, 5.0, 18.0), FOREGROUND);
        } else {
            d.draw_triangle(
                Vector2::new(cx - 6.0, cy - 9.0),
                Vector2::new(cx - 6.0, cy + 9.0),
                Vector2::new(cx + 9.0, cy),
                FOREGROUND,
            );
        }

        // Counter, e.g. "02 / 05"
        let current = format!("{:02}", selected + 1);
        let total = format!("{:02}", controller.images().len());
        let current_width = text_width(&current, 48);
        let total_width = text_width(&total, 14);
        let baseline = layout.prev.y + layout.prev.height;
        let mut x = layout.prev.x - 32.0 - total_width as f32;
        d.draw_text(&total, x as i32, (baseline - 16.0) as i32, 14, with_opacity(MUTED, 0.5));
        x -= 30.0;
        d.draw_text("/", x as i32, (baseline - 22.0) as i32, 20, MUTED);
        x -= 12.0 + current_width as f32;
        d.draw_text(&current, x as i32, (baseline - 46.0) as i32, 48, FOREGROUND);

        // Previous / next
        for (rec, pointing_left) in [(layout.prev, true), (layout.next, false)] {
            d.draw_rectangle_rec(rec, CARD);
            let cx = rec.x + rec.width * 0.5;
            let cy = rec.y + rec.height * 0.5;
            if pointing_left {
                d.draw_triangle(
                    Vector2::new(cx + 5.0, cy - 8.0),
                    Vector2::new(cx - 5.0, cy),
                    Vector2::new(cx + 5.0, cy + 8.0),
                    FOREGROUND,
                );
            } else {
                d.draw_triangle(
                    Vector2::new(cx - 5.0, cy - 8.0),
                    Vector2::new(cx - 5.0, cy + 8.0),
                    Vector2::new(cx + 5.0, cy),
                    FOREGROUND,
                );
            }
        }

        // Dots
        for (i, dot) in layout.dots.iter().enumerate() {
            let color = if i == selected { PRIMARY } else { MUTED };
            d.draw_rectangle_rounded(*dot, 1.0, 8, color);
        }

        // Thumbnails
        for (i, (thumb, slide)) in layout.thumbs.iter().zip(slides).enumerate() {
            if i == selected {
                let ring = Rectangle::new(thumb.x - 6.0, thumb.y - 6.0, thumb.width + 12.0, thumb.height + 12.0);
                d.draw_rectangle_lines_ex(ring, 2.0, PRIMARY);
                slide.draw_picture(d, *thumb);
            } else {
                slide.draw_picture(d, *thumb);
                d.draw_rectangle_rec(*thumb, with_opacity(BACKGROUND, 0.4));
            }
        }
    }
}
