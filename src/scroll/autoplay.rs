use std::time::Duration;
use crate::engine::AutoplayControl;
use crate::events::{EngineEvent, EventEmitter};

pub struct Autoplay {
    delay: f32,
    stop_on_interaction: bool,

    playing: bool,
    timer: f32,

    // Transient suspensions that keep `playing` untouched
    pointer_held: bool,
    document_hidden: bool,

    emitter: EventEmitter,
}

impl Autoplay {
    pub fn new(delay: Duration, stop_on_interaction: bool, playing: bool, emitter: EventEmitter) -> Self {
        Self {
            delay: delay.as_secs_f32(),
            stop_on_interaction,
            playing,
            timer: 0.0,
            pointer_held: false,
            document_hidden: false,
            emitter,
        }
    }

    /// Advances the countdown. Returns true when the carousel should move on.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.playing || self.pointer_held || self.document_hidden {
            return false;
        }
        self.timer += dt;
        if self.timer >= self.delay {
            self.timer = 0.0;
            return true;
        }
        false
    }

    pub fn on_pointer_down(&mut self) {
        if self.stop_on_interaction {
            self.stop();
        } else {
            self.pointer_held = true;
        }
    }

    pub fn on_pointer_up(&mut self) {
        if self.pointer_held {
            self.pointer_held = false;
            self.timer = 0.0;
        }
    }

    pub fn set_document_visible(&mut self, visible: bool) {
        if self.document_hidden == visible {
            self.document_hidden = !visible;
            if visible {
                self.timer = 0.0;
            }
            log::debug!("Autoplay timer {}", if visible { "resumed" } else { "suspended" });
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.pointer_held || self.document_hidden
    }

    /// Share of the delay already elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.timer / self.delay).clamp(0.0, 1.0)
    }
}

impl AutoplayControl for Autoplay {
    fn play(&mut self) {
        if !self.playing {
            self.playing = true;
            self.timer = 0.0;
            log::info!("Autoplay started");
            self.emitter.emit(&EngineEvent::AutoplayPlay);
        }
    }

    fn stop(&mut self) {
        if self.playing {
            self.playing = false;
            log::info!("Autoplay stopped");
            self.emitter.emit(&EngineEvent::AutoplayStop);
        }
    }

    fn reset(&mut self) {
        self.timer = 0.0;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use crate::events::EventKind;

    fn autoplay(stop_on_interaction: bool) -> Autoplay {
        Autoplay::new(Duration::from_millis(5000), stop_on_interaction, true, EventEmitter::new())
    }

    #[test]
    fn advances_once_per_delay() {
        let mut autoplay = autoplay(false);
        let advances = (0..240).filter(|_| autoplay.tick(0.25)).count(); // 60 seconds
        assert_eq!(advances, 12);
    }

    #[test]
    fn reset_restarts_the_countdown() {
        let mut autoplay = autoplay(false);
        assert!(!autoplay.tick(4.0));
        assert!((autoplay.progress() - 0.8).abs() < 1e-6);
        autoplay.reset();
        assert_eq!(autoplay.progress(), 0.0);
        assert!(!autoplay.tick(4.0));
        assert!(autoplay.tick(1.0));
    }

    #[test]
    fn held_pointer_suspends_without_stopping() {
        let mut autoplay = autoplay(false);
        autoplay.on_pointer_down();
        assert!(!autoplay.tick(10.0));
        assert!(autoplay.is_playing());
        assert!(autoplay.is_suspended());

        autoplay.on_pointer_up();
        assert!(!autoplay.is_suspended());
        assert!(autoplay.tick(5.0));
    }

    #[test]
    fn pointer_stops_when_interaction_stops_autoplay() {
        let mut autoplay = autoplay(true);
        autoplay.on_pointer_down();
        autoplay.on_pointer_up();
        assert!(!autoplay.is_playing());
        assert!(!autoplay.tick(10.0));
    }

    #[test]
    fn hidden_document_keeps_playing_flag() {
        let mut autoplay = autoplay(false);
        autoplay.set_document_visible(false);
        assert!(!autoplay.tick(10.0));
        assert!(autoplay.is_playing());
        autoplay.set_document_visible(true);
        assert!(autoplay.tick(5.0));
    }

    #[test]
    fn play_and_stop_emit_only_on_change() {
        let emitter = EventEmitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let record = {
            let seen = Rc::clone(&seen);
            Rc::new(move |event: &EngineEvent| seen.borrow_mut().push(*event))
        };
        let _play = emitter.on(EventKind::AutoplayPlay, record.clone());
        let _stop = emitter.on(EventKind::AutoplayStop, record);

        let mut autoplay = Autoplay::new(Duration::from_secs(1), false, true, emitter);
        autoplay.play();
        autoplay.stop();
        autoplay.stop();
        autoplay.play();

        assert_eq!(*seen.borrow(), [EngineEvent::AutoplayStop, EngineEvent::AutoplayPlay]);
    }
}
