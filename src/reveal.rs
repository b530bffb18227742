use crate::logging::EventLog;
use serde::Serialize;
use serde_json::json;
use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

const CHILD_RISE_PX: f64 = 20.0;
const CHILD_DURATION_SECONDS: f64 = 0.5;

/// Per-section tuning for the scroll reveal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RevealConfig {
    /// Fraction of the section that must be visible, in `0.0..=1.0`.
    pub threshold: f64,
    /// Seconds added to each successive child's entrance.
    pub stagger_interval: f64,
    pub trigger_once: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::once(0.1, 0.1)
    }
}

impl RevealConfig {
    pub const fn once(threshold: f64, stagger_interval: f64) -> Self {
        Self {
            threshold,
            stagger_interval,
            trigger_once: true,
        }
    }

    pub fn threshold_clamped(&self) -> f64 {
        self.threshold.clamp(0.0, 1.0)
    }

    /// Entrance delay for the child at `index` (zero-based, document order).
    pub fn child_delay(&self, index: usize) -> f64 {
        index as f64 * self.stagger_interval.max(0.0)
    }

    pub fn child_delays(&self, count: usize) -> Vec<f64> {
        (0..count).map(|index| self.child_delay(index)).collect()
    }

    pub fn child_style(&self, revealed: bool, index: usize) -> String {
        if revealed {
            let delay = self.child_delay(index);
            format!(
                "opacity: 1; transform: none; transition: opacity {CHILD_DURATION_SECONDS}s ease-out {delay:.2}s, transform {CHILD_DURATION_SECONDS}s ease-out {delay:.2}s;"
            )
        } else {
            format!("opacity: 0; transform: translateY({CHILD_RISE_PX}px);")
        }
    }

    fn is_met_by(&self, intersection: Intersection) -> bool {
        intersection.intersecting && intersection.ratio >= self.threshold_clamped()
    }
}

/// Content sections that reveal on scroll, with their tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Skills,
    Projects,
    Experience,
    Certificates,
    Leadership,
    Contact,
}

impl Section {
    pub fn id(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Experience => "experience",
            Self::Certificates => "certificates",
            Self::Leadership => "leadership",
            Self::Contact => "contact",
        }
    }

    pub fn reveal_config(self) -> RevealConfig {
        match self {
            Self::About | Self::Contact => RevealConfig::once(0.2, 0.2),
            Self::Skills | Self::Projects | Self::Certificates => RevealConfig::once(0.1, 0.1),
            Self::Experience | Self::Leadership => RevealConfig::once(0.1, 0.2),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub ratio: f64,
    pub intersecting: bool,
}

pub trait Observation {
    /// Stops delivering intersection changes. Idempotent. Dropping the
    /// observation must disconnect it as well.
    fn disconnect(&self);
}

/// Watches one element's intersection with the viewport.
pub trait VisibilityHost {
    type Observation: Observation + 'static;

    /// `None` when intersection observation is unavailable. The handler
    /// must not be invoked synchronously from `observe`.
    fn observe(&self, threshold: f64, handler: Rc<dyn Fn(Intersection)>) -> Option<Self::Observation>;
}

struct RevealInner<O> {
    revealed: bool,
    observation: Option<O>,
}

/// One section's reveal flag.
///
/// With `trigger_once`, `revealed` flips to `true` the first time the
/// threshold is met and never changes again; observation is disconnected
/// right after. Without it, `revealed` follows visibility.
pub struct RevealController<H: VisibilityHost> {
    inner: Rc<RefCell<RevealInner<H::Observation>>>,
}

impl<H: VisibilityHost> RevealController<H> {
    /// `on_change` fires on transitions after mount; read [`Self::revealed`]
    /// for the initial value.
    pub fn mount(
        host: &H,
        section: &'static str,
        config: RevealConfig,
        on_change: impl Fn(bool) + 'static,
        log: EventLog,
    ) -> Self {
        let inner = Rc::new(RefCell::new(RevealInner {
            revealed: false,
            observation: None,
        }));

        let handler = intersection_handler(Rc::downgrade(&inner), section, config, Rc::new(on_change), log);

        match host.observe(config.threshold_clamped(), handler) {
            Some(observation) => inner.borrow_mut().observation = Some(observation),
            None => {
                log.warn("reveal_observer_unavailable", json!({ "section": section }));
                inner.borrow_mut().revealed = true;
            }
        }

        Self { inner }
    }

    pub fn revealed(&self) -> bool {
        self.inner.borrow().revealed
    }

    #[cfg(test)]
    pub fn is_observing(&self) -> bool {
        self.inner.borrow().observation.is_some()
    }
}

fn intersection_handler<O: Observation + 'static>(
    inner: Weak<RefCell<RevealInner<O>>>,
    section: &'static str,
    config: RevealConfig,
    on_change: Rc<dyn Fn(bool)>,
    log: EventLog,
) -> Rc<dyn Fn(Intersection)> {
    // Guards against a queued callback delivered after disconnect.
    let fired = Rc::new(Cell::new(false));

    Rc::new(move |intersection| {
        let Some(strong) = inner.upgrade() else {
            return;
        };

        let transition = {
            let mut reveal = strong.borrow_mut();
            let visible = config.is_met_by(intersection);

            if config.trigger_once {
                if fired.get() || !visible {
                    None
                } else {
                    fired.set(true);
                    reveal.revealed = true;
                    if let Some(observation) = reveal.observation.as_ref() {
                        observation.disconnect();
                    }
                    log.info(
                        "reveal_triggered",
                        json!({ "section": section, "ratio": intersection.ratio }),
                    );
                    Some(true)
                }
            } else if reveal.revealed != visible {
                reveal.revealed = visible;
                Some(visible)
            } else {
                None
            }
        };

        if let Some(revealed) = transition {
            on_change(revealed);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeObservation {
        connected: Rc<Cell<bool>>,
    }

    impl Observation for FakeObservation {
        fn disconnect(&self) {
            self.connected.set(false);
        }
    }

    impl Drop for FakeObservation {
        fn drop(&mut self) {
            self.disconnect();
        }
    }

    #[derive(Default)]
    struct FakeViewport {
        unavailable: bool,
        handler: RefCell<Option<Rc<dyn Fn(Intersection)>>>,
        threshold: Cell<Option<f64>>,
        connected: Rc<Cell<bool>>,
    }

    impl FakeViewport {
        fn report(&self, ratio: f64) {
            let handler = self.handler.borrow().clone();
            if let Some(handler) = handler {
                handler(Intersection {
                    ratio,
                    intersecting: ratio > 0.0,
                });
            }
        }
    }

    impl VisibilityHost for FakeViewport {
        type Observation = FakeObservation;

        fn observe(&self, threshold: f64, handler: Rc<dyn Fn(Intersection)>) -> Option<FakeObservation> {
            if self.unavailable {
                return None;
            }
            self.threshold.set(Some(threshold));
            *self.handler.borrow_mut() = Some(handler);
            self.connected.set(true);
            Some(FakeObservation {
                connected: Rc::clone(&self.connected),
            })
        }
    }

    fn mount(
        viewport: &FakeViewport,
        config: RevealConfig,
    ) -> (RevealController<FakeViewport>, Rc<RefCell<Vec<bool>>>) {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        let controller = RevealController::mount(
            viewport,
            "skills",
            config,
            move |revealed| sink.borrow_mut().push(revealed),
            EventLog::default(),
        );
        (controller, changes)
    }

    #[test]
    fn stagger_offsets_follow_document_order() {
        let config = RevealConfig::once(0.1, 0.1);
        let delays = config.child_delays(5);

        assert_eq!(delays.len(), 5);
        for (index, delay) in delays.iter().enumerate() {
            let expected = index as f64 * 0.1;
            assert!((delay - expected).abs() < 1e-9, "child {} delay {delay}", index + 1);
        }
    }

    #[test]
    fn below_threshold_keeps_section_hidden() {
        let viewport = FakeViewport::default();
        let (controller, changes) = mount(&viewport, RevealConfig::once(0.2, 0.1));

        assert_eq!(viewport.threshold.get(), Some(0.2));
        viewport.report(0.05);
        viewport.report(0.19);

        assert!(!controller.revealed());
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn reveal_fires_once_and_survives_scrolling_away() {
        let viewport = FakeViewport::default();
        let (controller, changes) = mount(&viewport, RevealConfig::default());

        viewport.report(0.5);
        assert!(controller.revealed());
        assert!(!viewport.connected.get());

        viewport.report(0.0);
        viewport.report(0.8);
        assert!(controller.revealed());
        assert_eq!(*changes.borrow(), vec![true]);
    }

    #[test]
    fn missing_observer_fails_open() {
        let viewport = FakeViewport {
            unavailable: true,
            ..FakeViewport::default()
        };
        let (controller, changes) = mount(&viewport, RevealConfig::default());

        assert!(controller.revealed());
        assert!(!controller.is_observing());
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn repeatable_reveal_follows_visibility() {
        let viewport = FakeViewport::default();
        let config = RevealConfig {
            trigger_once: false,
            ..RevealConfig::default()
        };
        let (controller, changes) = mount(&viewport, config);

        viewport.report(0.3);
        viewport.report(0.4);
        viewport.report(0.0);
        assert!(!controller.revealed());
        assert!(viewport.connected.get());
        assert_eq!(*changes.borrow(), vec![true, false]);
    }

    #[test]
    fn unmount_disconnects_and_ignores_late_reports() {
        let viewport = FakeViewport::default();
        let (controller, changes) = mount(&viewport, RevealConfig::default());
        assert!(viewport.connected.get());

        drop(controller);
        assert!(!viewport.connected.get());

        viewport.report(1.0);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn hidden_children_wait_below_their_resting_place() {
        let config = RevealConfig::once(0.2, 0.2);

        assert_eq!(config.child_style(false, 3), "opacity: 0; transform: translateY(20px);");
        assert!(config.child_style(true, 3).contains("ease-out 0.60s"));
    }

    #[test]
    fn section_presets_differ_per_section() {
        assert_eq!(Section::About.reveal_config(), RevealConfig::once(0.2, 0.2));
        assert_eq!(Section::Skills.reveal_config(), RevealConfig::once(0.1, 0.1));
        assert_eq!(Section::Experience.reveal_config(), RevealConfig::once(0.1, 0.2));
        assert!(Section::Contact.reveal_config().trigger_once);
    }
}
