use crate::constants::*;
use crate::engine::{AutoplayControl, Engine};
use crate::error::EngineInitError;
use crate::events::{EngineEvent, EventEmitter, EventKind, Listener, ListenerId, Subscription};
use crate::options::CarouselOptions;
use crate::scroll::autoplay::Autoplay;
use crate::scroll::snaps::ScrollSnaps;

/// Pixel size of the node the engine scrolls inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Direction {
    Forward,
    Backward,
    Shortest,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    start_x: f32,
    current_x: f32,
    start_location: f32,
}

/// Scroll engine for one strip of slides. Positions are measured in
/// viewport widths; `location` is the current scroll offset and eases
/// toward `target`, the offset of the selected snap.
pub struct ScrollEngine {
    options: CarouselOptions,
    snaps: ScrollSnaps,
    emitter: EventEmitter,
    autoplay: Autoplay,

    selected: usize,
    previous: usize,

    location: f32,
    target: f32,
    settled: bool,

    drag: Option<Drag>,
    destroyed: bool,
}

impl ScrollEngine {
    pub fn attach(
        viewport: Option<Viewport>,
        slide_count: usize,
        options: &CarouselOptions,
    ) -> Result<Self, EngineInitError> {
        let viewport = viewport.ok_or(EngineInitError::MissingViewport)?;
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Err(EngineInitError::EmptyViewport { width: viewport.width, height: viewport.height });
        }
        if slide_count == 0 {
            return Err(EngineInitError::NoSlides);
        }
        options.validate()?;

        let snaps = ScrollSnaps::compute(
            slide_count,
            options.slide_size,
            options.align,
            options.contain_scroll,
            options.looping,
        );
        let emitter = EventEmitter::new();
        let autoplay = Autoplay::new(
            options.autoplay_delay,
            options.stop_on_interaction,
            options.play_on_init,
            emitter.clone(),
        );
        let start = snaps.get(0).unwrap_or(0.0);

        log::info!(
            "Carousel engine attached: {} slides, {} snaps, viewport {}x{}, loop={}",
            slide_count,
            snaps.len(),
            viewport.width,
            viewport.height,
            options.looping
        );

        Ok(Self {
            options: options.clone(),
            snaps,
            emitter,
            autoplay,
            selected: 0,
            previous: 0,
            location: start,
            target: start,
            settled: true,
            drag: None,
            destroyed: false,
        })
    }

    // --- Frame Update: autoplay timer, then scroll location ---
    pub fn update(&mut self, dt: f32) {
        if self.destroyed {
            return;
        }

        if self.autoplay.tick(dt) {
            // Autoplay jumps back to the start of a strip without loop
            if self.can_scroll_next() {
                self.scroll_next();
            } else {
                self.scroll_to(0);
            }
        }

        if let Some(drag) = self.drag {
            self.location = drag.start_location + (drag.start_x - drag.current_x);
            return;
        }

        let distance = self.target - self.location;
        if distance.abs() < SETTLE_EPSILON {
            self.location = self.target;
            if !self.settled {
                self.settled = true;
                self.normalize_location();
                self.emitter.emit(&EngineEvent::Settle { index: self.selected });
            }
        } else {
            self.location += distance * (1.0 - (-SCROLL_SPEED * dt).exp());
        }
    }

    // --- Pointer Drag (x in viewport widths) ---
    pub fn pointer_down(&mut self, x: f32) {
        if self.destroyed || self.drag.is_some() {
            return;
        }
        self.drag = Some(Drag { start_x: x, current_x: x, start_location: self.location });
        self.autoplay.on_pointer_down();
        self.emitter.emit(&EngineEvent::PointerDown);
    }

    pub fn pointer_move(&mut self, x: f32) {
        if let Some(drag) = self.drag.as_mut() {
            drag.current_x = x;
        }
    }

    pub fn pointer_up(&mut self, x: f32) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let moved = drag.start_x - x;
        self.location = drag.start_location + moved;
        self.settled = false;

        let threshold = DRAG_THRESHOLD * self.snaps.slide_size();
        if moved > threshold {
            self.scroll_next();
        } else if moved < -threshold {
            self.scroll_prev();
        }

        self.autoplay.on_pointer_up();
        self.emitter.emit(&EngineEvent::PointerUp);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn set_document_visible(&mut self, visible: bool) {
        self.autoplay.set_document_visible(visible);
    }

    pub fn location(&self) -> f32 {
        self.location
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn previous_scroll_snap(&self) -> usize {
        self.previous
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    pub fn autoplay_state(&self) -> &Autoplay {
        &self.autoplay
    }

    /// Snap that shows `slide`; several slides share a snap once trimmed.
    pub fn snap_for_slide(&self, slide: usize) -> Option<usize> {
        self.snaps.snap_for_slide(slide)
    }

    pub fn listener_count(&self) -> usize {
        self.emitter.listener_count()
    }

    /// Left edge of `slide` relative to the viewport's left edge, in viewport
    /// widths. Looping strips wrap so that visible slides land in `[-slide_size, 1)`.
    pub fn slide_offset(&self, slide: usize) -> f32 {
        let raw = slide as f32 * self.snaps.slide_size() - self.location;
        if !self.options.looping {
            return raw;
        }
        let period = self.snaps.content_size();
        let offset = raw.rem_euclid(period);
        if offset >= 1.0 { offset - period } else { offset }
    }

    fn select(&mut self, index: usize, direction: Direction) {
        if self.destroyed {
            return;
        }
        let Some(snap) = self.snaps.get(index) else {
            log::warn!("Ignoring scroll to snap {} of {}", index, self.snaps.len());
            return;
        };

        self.target = if self.options.looping {
            let period = self.snaps.content_size();
            let direction = if index == self.selected { Direction::Shortest } else { direction };
            let mut delta = (snap - self.target).rem_euclid(period);
            match direction {
                Direction::Forward => {}
                Direction::Backward => {
                    if delta > 0.0 {
                        delta -= period;
                    }
                }
                Direction::Shortest => {
                    if delta > period * 0.5 {
                        delta -= period;
                    }
                }
            }
            self.target + delta
        } else {
            snap
        };
        self.settled = false;

        if index != self.selected {
            self.previous = self.selected;
            self.selected = index;
            self.autoplay.reset();
            log::debug!("Selected snap {} (was {})", index, self.previous);
            self.emitter.emit(&EngineEvent::Select { index, previous: self.previous });
        }
    }

    // Shifts a settled looping strip back into its first period
    fn normalize_location(&mut self) {
        if !self.options.looping {
            return;
        }
        let period = self.snaps.content_size();
        let base = self.snaps.get(0).unwrap_or(0.0);
        let shift = ((self.location - base + SETTLE_EPSILON) / period).floor() * period;
        self.location -= shift;
        self.target -= shift;
    }
}

impl Engine for ScrollEngine {
    fn on(&mut self, kind: EventKind, listener: Listener) -> Subscription {
        self.emitter.on(kind, listener)
    }

    fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        self.emitter.off(kind, id)
    }

    fn scroll_prev(&mut self) {
        let count = self.snaps.len();
        if self.options.looping {
            self.select((self.selected + count - 1) % count, Direction::Backward);
        } else if self.selected > 0 {
            self.select(self.selected - 1, Direction::Backward);
        }
    }

    fn scroll_next(&mut self) {
        let count = self.snaps.len();
        if self.options.looping {
            self.select((self.selected + 1) % count, Direction::Forward);
        } else if self.selected + 1 < count {
            self.select(self.selected + 1, Direction::Forward);
        }
    }

    fn scroll_to(&mut self, index: usize) {
        self.select(index, Direction::Shortest);
    }

    fn selected_scroll_snap(&self) -> usize {
        self.selected
    }

    fn snap_count(&self) -> usize {
        self.snaps.len()
    }

    fn can_scroll_prev(&self) -> bool {
        self.snaps.len() > 1 && (self.options.looping || self.selected > 0)
    }

    fn can_scroll_next(&self) -> bool {
        self.snaps.len() > 1 && (self.options.looping || self.selected + 1 < self.snaps.len())
    }

    fn autoplay(&mut self) -> Option<&mut dyn AutoplayControl> {
        if self.destroyed {
            return None;
        }
        Some(&mut self.autoplay)
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.emitter.emit(&EngineEvent::Destroy);
        self.emitter.clear();
        self.autoplay.stop();
        self.drag = None;
        self.destroyed = true;
        log::info!("Carousel engine destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    const VIEWPORT: Option<Viewport> = Some(Viewport { width: 1152.0, height: 648.0 });

    fn engine(options: CarouselOptions) -> ScrollEngine {
        ScrollEngine::attach(VIEWPORT, 5, &options).unwrap()
    }

    fn record_selects(engine: &mut ScrollEngine) -> (Rc<RefCell<Vec<usize>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sub = {
            let seen = Rc::clone(&seen);
            engine.on(
                EventKind::Select,
                Rc::new(move |event: &EngineEvent| {
                    if let EngineEvent::Select { index, .. } = event {
                        seen.borrow_mut().push(*index);
                    }
                }),
            )
        };
        (seen, sub)
    }

    fn settle(engine: &mut ScrollEngine) {
        for _ in 0..600 {
            engine.update(1.0 / 60.0);
            if engine.is_settled() {
                return;
            }
        }
        panic!("engine never settled");
    }

    #[test]
    fn attach_requires_viewport_and_slides() {
        let options = CarouselOptions::default();
        assert_eq!(
            ScrollEngine::attach(None, 5, &options).err(),
            Some(EngineInitError::MissingViewport)
        );
        assert!(matches!(
            ScrollEngine::attach(Some(Viewport { width: 0.0, height: 300.0 }), 5, &options),
            Err(EngineInitError::EmptyViewport { .. })
        ));
        assert_eq!(ScrollEngine::attach(VIEWPORT, 0, &options).err(), Some(EngineInitError::NoSlides));

        let bad = CarouselOptions { slide_size: 2.0, ..Default::default() };
        assert!(matches!(ScrollEngine::attach(VIEWPORT, 5, &bad), Err(EngineInitError::InvalidOptions(_))));
    }

    #[test]
    fn next_and_prev_wrap_around_when_looping() {
        let mut engine = engine(CarouselOptions::default());
        let (seen, _sub) = record_selects(&mut engine);

        for _ in 0..5 {
            engine.scroll_next();
        }
        engine.scroll_prev();

        assert_eq!(*seen.borrow(), [1, 2, 3, 4, 0, 4]);
        assert_eq!(engine.selected_scroll_snap(), 4);
        assert_eq!(engine.previous_scroll_snap(), 0);
    }

    #[test]
    fn edges_stop_scrolling_without_loop() {
        let mut engine = engine(CarouselOptions { looping: false, ..Default::default() });
        assert!(!engine.can_scroll_prev());
        engine.scroll_prev();
        assert_eq!(engine.selected_scroll_snap(), 0);

        engine.scroll_to(4);
        assert!(!engine.can_scroll_next());
        engine.scroll_next();
        assert_eq!(engine.selected_scroll_snap(), 4);
    }

    #[test]
    fn out_of_range_scroll_is_ignored() {
        let mut engine = engine(CarouselOptions::default());
        let (seen, _sub) = record_selects(&mut engine);
        engine.scroll_to(5);
        engine.scroll_to(usize::MAX);
        assert!(seen.borrow().is_empty());
        assert_eq!(engine.selected_scroll_snap(), 0);
    }

    #[test]
    fn wrapping_forward_settles_on_the_first_slide() {
        let mut engine = engine(CarouselOptions::default());
        engine.scroll_to(4);
        settle(&mut engine);
        engine.scroll_next();
        settle(&mut engine);

        assert_eq!(engine.selected_scroll_snap(), 0);
        // Centered 90% slide leaves 5% on each side
        assert!((engine.slide_offset(0) - 0.05).abs() < 1e-3);
        assert!((engine.slide_offset(4) + 0.85).abs() < 1e-3);
    }

    #[test]
    fn wrap_takes_the_short_way_round() {
        let mut engine = engine(CarouselOptions::default());
        let start = engine.location();
        engine.scroll_prev();
        engine.update(1.0 / 60.0);
        // Moving back from the first slide to the last scrolls backward
        assert!(engine.location() < start);
    }

    #[test]
    fn settle_is_emitted_once_per_move() {
        let mut engine = engine(CarouselOptions::default());
        let settles = Rc::new(RefCell::new(0));
        let _sub = {
            let settles = Rc::clone(&settles);
            engine.on(EventKind::Settle, Rc::new(move |_: &EngineEvent| *settles.borrow_mut() += 1))
        };
        engine.scroll_next();
        settle(&mut engine);
        engine.update(1.0 / 60.0);
        assert_eq!(*settles.borrow(), 1);
    }

    #[test]
    fn autoplay_advances_and_manual_moves_reset_it() {
        let mut engine = engine(CarouselOptions::default());
        for _ in 0..4 {
            engine.update(1.0);
        }
        engine.scroll_next(); // Manual move at 4s restarts the countdown
        for _ in 0..4 {
            engine.update(1.0);
        }
        assert_eq!(engine.selected_scroll_snap(), 1);
        engine.update(1.0);
        assert_eq!(engine.selected_scroll_snap(), 2);
    }

    #[test]
    fn autoplay_jumps_back_to_start_without_loop() {
        let options = CarouselOptions {
            looping: false,
            autoplay_delay: Duration::from_secs(1),
            ..Default::default()
        };
        let mut engine = engine(options);
        engine.scroll_to(4);
        engine.update(1.0);
        assert_eq!(engine.selected_scroll_snap(), 0);
    }

    #[test]
    fn paused_engine_does_not_advance() {
        let mut engine = engine(CarouselOptions { play_on_init: false, ..Default::default() });
        for _ in 0..20 {
            engine.update(1.0);
        }
        assert_eq!(engine.selected_scroll_snap(), 0);
        assert!(!engine.autoplay_state().is_playing());
    }

    #[test]
    fn long_drag_moves_one_slide_short_drag_snaps_back() {
        let mut engine = engine(CarouselOptions::default());
        engine.pointer_down(0.8);
        engine.pointer_move(0.5);
        engine.update(1.0 / 60.0);
        assert!(engine.is_dragging());
        engine.pointer_up(0.3);
        assert_eq!(engine.selected_scroll_snap(), 1);

        engine.pointer_down(0.5);
        engine.pointer_up(0.6);
        assert_eq!(engine.selected_scroll_snap(), 1);

        engine.pointer_down(0.2);
        engine.pointer_up(0.7);
        assert_eq!(engine.selected_scroll_snap(), 0);
    }

    #[test]
    fn held_pointer_suspends_autoplay() {
        let mut engine = engine(CarouselOptions::default());
        engine.pointer_down(0.5);
        for _ in 0..10 {
            engine.update(1.0);
        }
        assert_eq!(engine.selected_scroll_snap(), 0);
        engine.pointer_up(0.5);
        assert!(engine.autoplay_state().is_playing());
    }

    #[test]
    fn hidden_document_suspends_autoplay() {
        let mut engine = engine(CarouselOptions::default());
        engine.set_document_visible(false);
        for _ in 0..10 {
            engine.update(1.0);
        }
        assert_eq!(engine.selected_scroll_snap(), 0);
        engine.set_document_visible(true);
        engine.update(5.0);
        assert_eq!(engine.selected_scroll_snap(), 1);
    }

    #[test]
    fn destroy_notifies_then_drops_listeners() {
        let mut engine = engine(CarouselOptions::default());
        let destroyed = Rc::new(RefCell::new(false));
        let _sub = {
            let destroyed = Rc::clone(&destroyed);
            engine.on(EventKind::Destroy, Rc::new(move |_: &EngineEvent| *destroyed.borrow_mut() = true))
        };
        let (seen, _select) = record_selects(&mut engine);

        engine.destroy();
        engine.scroll_next();
        engine.update(10.0);

        assert!(*destroyed.borrow());
        assert!(seen.borrow().is_empty());
        assert_eq!(engine.listener_count(), 0);
        assert!(engine.autoplay().is_none());
        assert!(engine.is_destroyed());
    }
}
