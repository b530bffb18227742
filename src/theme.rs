use crate::{logging::EventLog, storage::PreferenceStore};
use serde::Serialize;
use serde_json::json;
use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} mode")
    }

    pub fn pressed(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }
}

/// Where the initial theme came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSource {
    Stored,
    Device,
    Default,
}

pub fn resolve_theme(stored: Option<&str>, device_prefers_dark: bool) -> (Theme, ThemeSource) {
    if let Some(theme) = stored.and_then(Theme::from_str) {
        return (theme, ThemeSource::Stored);
    }

    if device_prefers_dark {
        (Theme::Dark, ThemeSource::Device)
    } else {
        (Theme::Light, ThemeSource::Default)
    }
}

type ThemeSubscriber = Rc<dyn Fn(Theme)>;
type SubscriberList = RefCell<Vec<(u64, ThemeSubscriber)>>;

/// Process-wide theme state.
///
/// Owned by the composition root and handed to views by reference. Every
/// toggle is written back to the preference store and broadcast to all
/// live subscribers before `toggle` returns.
pub struct ThemeController {
    current: Cell<Theme>,
    source: ThemeSource,
    store: Rc<dyn PreferenceStore>,
    key: String,
    subscribers: Rc<SubscriberList>,
    next_subscriber_id: Cell<u64>,
    log: EventLog,
}

impl ThemeController {
    /// `device_prefers_dark` is the environment's colour-scheme preference,
    /// read once by the caller. It is never consulted again.
    pub fn new(
        store: Rc<dyn PreferenceStore>,
        key: impl Into<String>,
        device_prefers_dark: bool,
        log: EventLog,
    ) -> Self {
        let key = key.into();
        let stored = store.get(&key);
        let (theme, source) = resolve_theme(stored.as_deref(), device_prefers_dark);

        if source != ThemeSource::Stored && stored.is_some() {
            log.debug("theme_stored_value_ignored", json!({ "key": key }));
        }
        log.info("theme_resolved", json!({ "theme": theme, "source": source }));

        Self {
            current: Cell::new(theme),
            source,
            store,
            key,
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_subscriber_id: Cell::new(0),
            log,
        }
    }

    pub fn current(&self) -> Theme {
        self.current.get()
    }

    pub fn source(&self) -> ThemeSource {
        self.source
    }

    /// Flips the theme, persists it, and notifies subscribers. A failed
    /// write leaves the in-memory flip in place.
    pub fn toggle(&self) -> Theme {
        let next = self.current.get().toggled();
        self.current.set(next);

        if let Err(error) = self.store.set(&self.key, next.as_str()) {
            self.log.warn(
                "storage_write_failed",
                json!({ "key": self.key, "error": error.to_string() }),
            );
        }
        self.log.info("theme_toggled", json!({ "theme": next }));

        self.broadcast(next);
        next
    }

    pub fn subscribe(&self, subscriber: impl Fn(Theme) + 'static) -> ThemeSubscription {
        let id = self.next_subscriber_id.get();
        self.next_subscriber_id.set(id + 1);
        self.subscribers
            .borrow_mut()
            .push((id, Rc::new(subscriber)));

        ThemeSubscription {
            subscribers: Rc::downgrade(&self.subscribers),
            id,
        }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn broadcast(&self, theme: Theme) {
        // Snapshot so subscribers may subscribe or drop handles while notified.
        let subscribers: Vec<ThemeSubscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect();

        for subscriber in subscribers {
            subscriber(theme);
        }
    }
}

/// Live registration with a [`ThemeController`]; dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct ThemeSubscription {
    subscribers: Weak<SubscriberList>,
    id: u64,
}

impl Drop for ThemeSubscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::{FullStore, MemoryStore};

    const KEY: &str = "portfolio-theme";

    fn controller_with(store: Rc<dyn PreferenceStore>, prefers_dark: bool) -> ThemeController {
        ThemeController::new(store, KEY, prefers_dark, EventLog::default())
    }

    #[test]
    fn toggles_alternate_and_persist_after_every_call() {
        let store = Rc::new(MemoryStore::new());
        let controller = controller_with(store.clone(), false);
        assert_eq!(controller.current(), Theme::Light);

        for call in 1..=6 {
            let theme = controller.toggle();
            let expected = if call % 2 == 1 { Theme::Dark } else { Theme::Light };

            assert_eq!(theme, expected);
            assert_eq!(controller.current(), expected);
            assert_eq!(store.get(KEY).as_deref(), Some(expected.as_str()));
        }
    }

    #[test]
    fn device_preference_applies_without_stored_value() {
        let controller = controller_with(Rc::new(MemoryStore::new()), true);

        assert_eq!(controller.current(), Theme::Dark);
        assert_eq!(controller.source(), ThemeSource::Device);
    }

    #[test]
    fn stored_value_beats_device_preference() {
        let store = Rc::new(MemoryStore::with_entries([(KEY, "light")]));
        let controller = controller_with(store, true);

        assert_eq!(controller.current(), Theme::Light);
        assert_eq!(controller.source(), ThemeSource::Stored);
    }

    #[test]
    fn invalid_stored_value_falls_through() {
        let dark_device = controller_with(Rc::new(MemoryStore::with_entries([(KEY, "purple")])), true);
        assert_eq!(dark_device.current(), Theme::Dark);
        assert_eq!(dark_device.source(), ThemeSource::Device);

        let light_device = controller_with(Rc::new(MemoryStore::with_entries([(KEY, "purple")])), false);
        assert_eq!(light_device.current(), Theme::Light);
        assert_eq!(light_device.source(), ThemeSource::Default);
    }

    #[test]
    fn initialization_does_not_write() {
        let store = Rc::new(MemoryStore::new());
        let _controller = controller_with(store.clone(), true);

        assert_eq!(store.get(KEY), None);
    }

    #[test]
    fn failed_persist_still_flips_in_memory() {
        let controller = controller_with(Rc::new(FullStore::default()), false);

        assert_eq!(controller.toggle(), Theme::Dark);
        assert_eq!(controller.current(), Theme::Dark);
    }

    #[test]
    fn every_subscriber_sees_the_change_before_toggle_returns() {
        let controller = controller_with(Rc::new(MemoryStore::new()), false);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let seen = seen.clone();
            controller.subscribe(move |theme| seen.borrow_mut().push(("first", theme)))
        };
        let second = {
            let seen = seen.clone();
            controller.subscribe(move |theme| seen.borrow_mut().push(("second", theme)))
        };

        controller.toggle();
        assert_eq!(
            *seen.borrow(),
            vec![("first", Theme::Dark), ("second", Theme::Dark)]
        );

        drop(first);
        controller.toggle();
        assert_eq!(seen.borrow().last(), Some(&("second", Theme::Light)));
        assert_eq!(seen.borrow().len(), 3);

        drop(second);
        assert_eq!(controller.subscriber_count(), 0);
    }

    #[test]
    fn subscription_outliving_controller_drops_cleanly() {
        let controller = controller_with(Rc::new(MemoryStore::new()), false);
        let subscription = controller.subscribe(|_| {});

        drop(controller);
        drop(subscription);
    }

    #[test]
    fn subscriber_may_unsubscribe_during_broadcast() {
        let controller = controller_with(Rc::new(MemoryStore::new()), false);
        let slot: Rc<RefCell<Option<ThemeSubscription>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));

        let subscription = {
            let slot = slot.clone();
            let hits = hits.clone();
            controller.subscribe(move |_| {
                hits.set(hits.get() + 1);
                slot.borrow_mut().take();
            })
        };
        *slot.borrow_mut() = Some(subscription);

        controller.toggle();
        controller.toggle();
        assert_eq!(hits.get(), 1);
        assert_eq!(controller.subscriber_count(), 0);
    }

    #[test]
    fn toggle_label_names_the_next_theme() {
        assert_eq!(Theme::Light.toggle_label(), "Switch to dark mode");
        assert_eq!(Theme::Dark.toggle_label(), "Switch to light mode");
    }
}
