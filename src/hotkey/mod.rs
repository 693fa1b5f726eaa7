//! Global capture hotkey
//!
//! Listens for Alt+1 on a background thread using a raw keyboard hook
//! and reports each trigger over a channel.

use rdev::{Event, EventType, Key};
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Tracks modifier state across raw key events
///
/// The hook reports every press and release individually, including
/// auto-repeat, so the combo fires once per physical press.
#[derive(Debug, Default)]
struct ComboTracker {
    alt_down: bool,
    triggered: bool,
}

impl ComboTracker {
    /// Process one raw event, returning true when the shortcut fires
    fn on_event(&mut self, event: &EventType) -> bool {
        match event {
            EventType::KeyPress(Key::Alt) | EventType::KeyPress(Key::AltGr) => {
                self.alt_down = true;
                false
            }
            EventType::KeyRelease(Key::Alt) | EventType::KeyRelease(Key::AltGr) => {
                self.alt_down = false;
                self.triggered = false;
                false
            }
            EventType::KeyPress(Key::Num1) => {
                if self.alt_down && !self.triggered {
                    self.triggered = true;
                    true
                } else {
                    false
                }
            }
            EventType::KeyRelease(Key::Num1) => {
                self.triggered = false;
                false
            }
            _ => false,
        }
    }
}

/// Start the global hotkey listener
///
/// Returns a receiver that yields once per Alt+1 press. The hook thread
/// runs for the life of the process.
pub fn start_listener() -> UnboundedReceiver<()> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let mut tracker = ComboTracker::default();

        let result = rdev::listen(move |event: Event| {
            if tracker.on_event(&event.event_type) && tx.send(()).is_err() {
                tracing::debug!("Hotkey receiver dropped, ignoring trigger");
            }
        });

        if let Err(e) = result {
            tracing::error!("Global hotkey listener failed: {:?}", e);
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_fires_on_alt_one() {
        let mut tracker = ComboTracker::default();
        assert!(!tracker.on_event(&EventType::KeyPress(Key::Alt)));
        assert!(tracker.on_event(&EventType::KeyPress(Key::Num1)));
    }

    #[test]
    fn test_one_without_alt_does_not_fire() {
        let mut tracker = ComboTracker::default();
        assert!(!tracker.on_event(&EventType::KeyPress(Key::Num1)));
    }

    #[test]
    fn test_auto_repeat_fires_once() {
        let mut tracker = ComboTracker::default();
        tracker.on_event(&EventType::KeyPress(Key::Alt));
        assert!(tracker.on_event(&EventType::KeyPress(Key::Num1)));
        assert!(!tracker.on_event(&EventType::KeyPress(Key::Num1)));
        assert!(!tracker.on_event(&EventType::KeyPress(Key::Num1)));
    }

    #[test]
    fn test_releasing_one_rearms_the_combo() {
        let mut tracker = ComboTracker::default();
        tracker.on_event(&EventType::KeyPress(Key::Alt));
        assert!(tracker.on_event(&EventType::KeyPress(Key::Num1)));
        tracker.on_event(&EventType::KeyRelease(Key::Num1));
        assert!(tracker.on_event(&EventType::KeyPress(Key::Num1)));
    }

    #[test]
    fn test_releasing_alt_disarms_the_combo() {
        let mut tracker = ComboTracker::default();
        tracker.on_event(&EventType::KeyPress(Key::Alt));
        tracker.on_event(&EventType::KeyRelease(Key::Alt));
        assert!(!tracker.on_event(&EventType::KeyPress(Key::Num1)));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut tracker = ComboTracker::default();
        tracker.on_event(&EventType::KeyPress(Key::Alt));
        assert!(!tracker.on_event(&EventType::KeyPress(Key::Num2)));
        assert!(!tracker.on_event(&EventType::KeyPress(Key::KeyA)));
        // Alt is still held, so the combo still works
        assert!(tracker.on_event(&EventType::KeyPress(Key::Num1)));
    }
}
