use std::cell::RefCell;
use std::rc::Rc;
use crate::catalog::CarouselImage;
use crate::engine::Engine;
use crate::error::EngineInitError;
use crate::events::{EngineEvent, EventKind, Subscription};
use crate::options::CarouselOptions;
use crate::state::SelectionState;

/// Bridges clicks to the carousel engine and keeps a local copy of the
/// selection and playback state for rendering.
///
/// The selected index is only ever written from the engine's selection
/// notifications. Commands issued while no engine is attached are dropped.
pub struct CarouselController<E: Engine> {
    images: Vec<CarouselImage>,
    state: Rc<RefCell<SelectionState>>,
    engine: Option<E>,
    subscriptions: Vec<Subscription>,
}

impl<E: Engine> CarouselController<E> {
    pub fn new(images: Vec<CarouselImage>) -> Self {
        Self {
            images,
            state: Rc::new(RefCell::new(SelectionState::default())),
            engine: None,
            subscriptions: Vec::new(),
        }
    }

    /// Attaches an engine built by `attach` and subscribes to its notifications.
    /// An attach failure is returned untouched and leaves the controller detached.
    pub fn initialize<F>(&mut self, options: &CarouselOptions, attach: F) -> Result<(), EngineInitError>
    where
        F: FnOnce(usize, &CarouselOptions) -> Result<E, EngineInitError>,
    {
        if self.engine.is_some() {
            log::warn!("Carousel initialized twice, tearing down the previous engine");
            self.teardown();
        }

        let mut engine = attach(self.images.len(), options)?;

        let select = {
            let state = Rc::downgrade(&self.state);
            engine.on(
                EventKind::Select,
                Rc::new(move |event: &EngineEvent| {
                    if let (EngineEvent::Select { index, .. }, Some(state)) = (event, state.upgrade()) {
                        apply_selection(&state, *index);
                    }
                }),
            )
        };
        let playback: Vec<Subscription> = [(EventKind::AutoplayPlay, true), (EventKind::AutoplayStop, false)]
            .into_iter()
            .map(|(kind, playing)| {
                let state = Rc::downgrade(&self.state);
                engine.on(
                    kind,
                    Rc::new(move |_: &EngineEvent| {
                        if let Some(state) = state.upgrade() {
                            state.borrow_mut().is_playing = playing;
                        }
                    }),
                )
            })
            .collect();

        // Pick up whatever the engine already shows
        let selected = engine.selected_scroll_snap();
        let playing = engine.autoplay().map(|autoplay| autoplay.is_playing());
        {
            let mut state = self.state.borrow_mut();
            state.selected_index = selected;
            if let Some(playing) = playing {
                state.is_playing = playing;
            }
        }

        self.subscriptions.push(select);
        self.subscriptions.extend(playback);
        self.engine = Some(engine);
        log::info!("Carousel initialized with {} images", self.images.len());
        Ok(())
    }

    pub fn on_selection_changed(&self, index: usize) {
        if self.engine.is_none() {
            log::trace!("Ignoring selection {} without an attached engine", index);
            return;
        }
        apply_selection(&self.state, index);
    }

    pub fn go_to_previous(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.scroll_prev();
        }
    }

    pub fn go_to_next(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.scroll_next();
        }
    }

    pub fn go_to(&mut self, index: usize) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if index >= engine.snap_count() {
            log::warn!("Ignoring jump to slide {} of {}", index, engine.snap_count());
            return;
        }
        engine.scroll_to(index);
    }

    pub fn toggle_autoplay(&mut self) {
        let Some(autoplay) = self.engine.as_mut().and_then(|engine| engine.autoplay()) else {
            return;
        };
        let was_playing = self.state.borrow().is_playing;
        if was_playing {
            autoplay.stop();
        } else {
            autoplay.play();
        }
        self.state.borrow_mut().is_playing = !was_playing;
    }

    /// Unsubscribes from the engine, then destroys it.
    pub fn teardown(&mut self) {
        let Some(mut engine) = self.engine.take() else {
            log::debug!("Carousel teardown without an attached engine");
            return;
        };
        self.subscriptions.clear();
        engine.destroy();
        log::info!("Carousel torn down");
    }

    pub fn images(&self) -> &[CarouselImage] {
        &self.images
    }

    pub fn selected_index(&self) -> usize {
        self.state.borrow().selected_index
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().is_playing
    }

    pub fn state(&self) -> SelectionState {
        *self.state.borrow()
    }

    pub fn selected_image(&self) -> Option<&CarouselImage> {
        self.images.get(self.selected_index())
    }

    pub fn is_attached(&self) -> bool {
        self.engine.is_some()
    }

    /// Number of positions `go_to` accepts.
    pub fn snap_count(&self) -> usize {
        self.engine.as_ref().map_or(self.images.len(), |engine| engine.snap_count())
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }
}

impl<E: Engine> Drop for CarouselController<E> {
    fn drop(&mut self) {
        if self.engine.is_some() {
            self.teardown();
        }
    }
}

fn apply_selection(state: &RefCell<SelectionState>, index: usize) {
    let mut state = state.borrow_mut();
    if state.selected_index != index {
        log::debug!("Carousel selection {} -> {}", state.selected_index, index);
        state.selected_index = index;
    }
}
