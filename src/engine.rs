use crate::events::{EventKind, Listener, ListenerId, Subscription};

/// Timer plugin that advances a carousel on its own.
pub trait AutoplayControl {
    fn play(&mut self);
    fn stop(&mut self);
    /// Restarts the countdown to the next advance.
    fn reset(&mut self);
    fn is_playing(&self) -> bool;
}

/// Carousel engine as seen by the controller: it owns scroll position, looping
/// and snapping, and reports every selection change through `on`.
pub trait Engine {
    fn on(&mut self, kind: EventKind, listener: Listener) -> Subscription;
    fn off(&mut self, kind: EventKind, id: ListenerId) -> bool;

    fn scroll_prev(&mut self);
    fn scroll_next(&mut self);
    fn scroll_to(&mut self, index: usize);

    fn selected_scroll_snap(&self) -> usize;
    fn snap_count(&self) -> usize;
    fn can_scroll_prev(&self) -> bool;
    fn can_scroll_next(&self) -> bool;

    /// `None` when the engine runs without an autoplay plugin.
    fn autoplay(&mut self) -> Option<&mut dyn AutoplayControl>;

    fn destroy(&mut self);
}
