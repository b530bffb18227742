use crate::logging::EventLog;
use serde::Serialize;
use serde_json::json;
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

/// Elements that enlarge the cursor ring while hovered.
pub const INTERACTIVE_SELECTOR: &str = "a, button, .btn-primary, .btn-secondary, .social-link";

const RING_RADIUS: f64 = 12.0;
const DOT_RADIUS: f64 = 4.0;
const RING_EASE_SECONDS: f64 = 0.10;
const DOT_EASE_SECONDS: f64 = 0.08;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Move,
    Enter,
    Leave,
    Down,
    Up,
    Over,
}

impl PointerEventKind {
    pub const ALL: [Self; 6] = [
        Self::Move,
        Self::Enter,
        Self::Leave,
        Self::Down,
        Self::Up,
        Self::Over,
    ];

    pub fn dom_name(self) -> &'static str {
        match self {
            Self::Move => "mousemove",
            Self::Enter => "mouseenter",
            Self::Leave => "mouseleave",
            Self::Down => "mousedown",
            Self::Up => "mouseup",
            Self::Over => "mouseover",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    Moved { x: f64, y: f64 },
    Entered,
    Left,
    Pressed,
    Released,
    Hovered { interactive: bool },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub pressed: bool,
    pub hovering_interactive: bool,
    pub suppressed: bool,
}

/// The environment a [`PointerTracker`] listens to.
///
/// `Listener` and `Frame` are guards: dropping one must release the
/// underlying subscription or cancel the pending frame. Neither `listen`
/// nor `request_frame` may invoke the handler synchronously.
pub trait PointerHost {
    type Listener: 'static;
    type Frame: 'static;

    fn touch_capable(&self) -> bool;

    /// `None` when the environment cannot install the listener.
    fn listen(&self, kind: PointerEventKind, handler: Rc<dyn Fn(PointerInput)>) -> Option<Self::Listener>;

    /// Runs `flush` once before the next paint. `None` when frame callbacks
    /// are unavailable; the tracker then applies moves immediately.
    fn request_frame(&self, flush: Rc<dyn Fn()>) -> Option<Self::Frame>;
}

type ChangeHandler = Rc<dyn Fn(PointerState)>;

struct TrackerInner<F> {
    state: PointerState,
    pending_move: Option<(f64, f64)>,
    frame_pending: bool,
    // The last frame guard is kept until the next request so that it is
    // never dropped from inside its own callback.
    frame: Option<F>,
}

impl<F> TrackerInner<F> {
    fn new() -> Self {
        Self {
            state: PointerState::default(),
            pending_move: None,
            frame_pending: false,
            frame: None,
        }
    }

    fn flush_pending_move(&mut self) -> bool {
        let Some((x, y)) = self.pending_move.take() else {
            return false;
        };
        let changed = self.state.x != x || self.state.y != y;
        self.state.x = x;
        self.state.y = y;
        changed
    }

    fn apply_flag(&mut self, input: PointerInput) -> bool {
        let before = self.state;
        match input {
            PointerInput::Entered => self.state.suppressed = false,
            PointerInput::Left => self.state.suppressed = true,
            PointerInput::Pressed => self.state.pressed = true,
            PointerInput::Released => self.state.pressed = false,
            PointerInput::Hovered { interactive } => self.state.hovering_interactive = interactive,
            PointerInput::Moved { .. } => {}
        }
        before != self.state
    }
}

/// Tracks the mouse for the custom cursor overlay.
///
/// On touch-capable devices the tracker is suppressed for its whole
/// lifetime and installs nothing. Dropping the tracker releases every
/// listener and pending frame; handlers still queued by the environment
/// find the state gone and do nothing.
pub struct PointerTracker<H: PointerHost> {
    listeners: Vec<H::Listener>,
    inner: Rc<RefCell<TrackerInner<H::Frame>>>,
}

impl<H: PointerHost + 'static> PointerTracker<H> {
    pub fn mount(host: Rc<H>, on_change: impl Fn(PointerState) + 'static, log: EventLog) -> Self {
        let inner = Rc::new(RefCell::new(TrackerInner::new()));

        if host.touch_capable() {
            log.info("pointer_tracker_suppressed", json!({ "reason": "touch_capable" }));
            return Self::suppressed(inner);
        }

        let on_change: ChangeHandler = Rc::new(on_change);
        let mut listeners = Vec::with_capacity(PointerEventKind::ALL.len());

        for kind in PointerEventKind::ALL {
            let handler = input_handler(Rc::downgrade(&inner), Rc::clone(&host), Rc::clone(&on_change));

            match host.listen(kind, handler) {
                Some(listener) => listeners.push(listener),
                None => {
                    log.warn(
                        "pointer_listener_unavailable",
                        json!({ "event": kind.dom_name() }),
                    );
                    drop(listeners);
                    return Self::suppressed(inner);
                }
            }
        }

        log.debug(
            "pointer_tracker_mounted",
            json!({ "listeners": listeners.len(), "state": inner.borrow().state }),
        );

        Self { listeners, inner }
    }

    fn suppressed(inner: Rc<RefCell<TrackerInner<H::Frame>>>) -> Self {
        inner.borrow_mut().state.suppressed = true;
        Self {
            listeners: Vec::new(),
            inner,
        }
    }
}

impl<H: PointerHost> PointerTracker<H> {
    pub fn state(&self) -> PointerState {
        self.inner.borrow().state
    }

    #[cfg(test)]
    pub fn is_permanently_suppressed(&self) -> bool {
        self.listeners.is_empty()
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

fn input_handler<H: PointerHost + 'static>(
    inner: Weak<RefCell<TrackerInner<H::Frame>>>,
    host: Rc<H>,
    on_change: ChangeHandler,
) -> Rc<dyn Fn(PointerInput)> {
    Rc::new(move |input| {
        let Some(strong) = inner.upgrade() else {
            return;
        };

        let changed = {
            let mut tracker = strong.borrow_mut();

            let dirty = match input {
                PointerInput::Moved { x, y } => {
                    tracker.pending_move = Some((x, y));

                    if tracker.frame_pending {
                        false
                    } else {
                        let flush = frame_flush(inner.clone(), Rc::clone(&on_change));
                        match host.request_frame(flush) {
                            Some(frame) => {
                                tracker.frame = Some(frame);
                                tracker.frame_pending = true;
                                false
                            }
                            None => tracker.flush_pending_move(),
                        }
                    }
                }
                other => tracker.apply_flag(other),
            };
            dirty.then_some(tracker.state)
        };

        if let Some(state) = changed {
            on_change(state);
        }
    })
}

fn frame_flush<F: 'static>(
    inner: Weak<RefCell<TrackerInner<F>>>,
    on_change: ChangeHandler,
) -> Rc<dyn Fn()> {
    Rc::new(move || {
        let Some(strong) = inner.upgrade() else {
            return;
        };

        let changed = {
            let mut tracker = strong.borrow_mut();
            tracker.frame_pending = false;
            tracker.flush_pending_move().then_some(tracker.state)
        };

        if let Some(state) = changed {
            on_change(state);
        }
    })
}

/// Position and animation target for one cursor indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorStyle {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    pub opacity: f64,
    pub ease_seconds: f64,
}

impl IndicatorStyle {
    /// Outer ring: shrinks on press, grows over interactive elements.
    pub fn ring(state: &PointerState) -> Self {
        let scale = if state.pressed {
            0.8
        } else if state.hovering_interactive {
            1.5
        } else {
            1.0
        };

        Self {
            translate_x: state.x - RING_RADIUS,
            translate_y: state.y - RING_RADIUS,
            scale,
            opacity: if state.suppressed { 0.0 } else { 1.0 },
            ease_seconds: RING_EASE_SECONDS,
        }
    }

    /// Inner dot: grows on press, fades out over interactive elements.
    pub fn dot(state: &PointerState) -> Self {
        Self {
            translate_x: state.x - DOT_RADIUS,
            translate_y: state.y - DOT_RADIUS,
            scale: if state.pressed { 1.2 } else { 1.0 },
            opacity: if state.suppressed || state.hovering_interactive {
                0.0
            } else {
                1.0
            },
            ease_seconds: DOT_EASE_SECONDS,
        }
    }

    pub fn css(&self) -> String {
        format!(
            "transform: translate3d({:.2}px, {:.2}px, 0) scale({:.2}); opacity: {:.2}; transition: transform {secs:.2}s ease-out, opacity {secs:.2}s ease-out;",
            self.translate_x,
            self.translate_y,
            self.scale,
            self.opacity,
            secs = self.ease_seconds,
        )
    }
}
