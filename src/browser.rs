use crate::{
    pointer::{PointerEventKind, PointerHost, PointerInput, INTERACTIVE_SELECTOR},
    reveal::{Intersection, Observation, VisibilityHost},
    storage::{PreferenceStore, StorageError},
    theme::Theme,
};
use js_sys::{Array, Function, Reflect};
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent, ScrollBehavior, ScrollToOptions, Storage, Window,
};

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn js_error_text(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            Reflect::get(value, &JsValue::from_str("name"))
                .ok()
                .and_then(|name| name.as_string())
        })
        .unwrap_or_else(|| "unknown error".to_string())
}

/// `localStorage`, looked up per call so a storage disabled mid-session
/// reports failures instead of panicking.
#[derive(Clone, Copy, Default)]
pub struct BrowserStore;

impl PreferenceStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|error| StorageError::Rejected {
                key: key.to_string(),
                reason: js_error_text(&error),
            })
    }
}

fn media_matches(query: &str) -> bool {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn system_prefers_dark() -> bool {
    media_matches("(prefers-color-scheme: dark)")
}

fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)")
}

fn touch_capable(win: &Window) -> bool {
    Reflect::has(win, &JsValue::from_str("ontouchstart")).unwrap_or(false)
        || win.navigator().max_touch_points() > 0
}

pub fn apply_theme(theme: Theme) {
    if let Some(document) = window().and_then(|w| w.document()) {
        if let Some(root) = document.document_element() {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    }
}

pub fn apply_theme_with_transition(theme: Theme) {
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme);
        return;
    };

    // The browser calls this once, later; hand ownership to JS.
    let callback = Closure::once_into_js(move || apply_theme(theme));

    if start_view_transition.call1(&document_js, &callback).is_err() {
        apply_theme(theme);
    }
}

pub fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn scroll_to_top() {
    if let Some(win) = window() {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&options);
    }
}

pub fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}

/// A DOM event subscription that is removed when dropped.
pub struct ListenerGuard {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl ListenerGuard {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .ok()?;

        Some(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// A pending `requestAnimationFrame`, cancelled when dropped.
pub struct FrameRequest {
    window: Window,
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Drop for FrameRequest {
    fn drop(&mut self) {
        let _ = self.window.cancel_animation_frame(self.id);
    }
}

pub struct BrowserPointerHost {
    window: Window,
    document: Document,
}

impl BrowserPointerHost {
    pub fn new() -> Option<Self> {
        let window = window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    fn target_for(&self, kind: PointerEventKind) -> Option<EventTarget> {
        match kind {
            PointerEventKind::Enter | PointerEventKind::Leave => {
                self.document.document_element().map(Into::into)
            }
            _ => Some(self.document.clone().into()),
        }
    }
}

fn pointer_input(kind: PointerEventKind, event: &Event) -> Option<PointerInput> {
    match kind {
        PointerEventKind::Move => {
            let event = event.dyn_ref::<MouseEvent>()?;
            Some(PointerInput::Moved {
                x: f64::from(event.client_x()),
                y: f64::from(event.client_y()),
            })
        }
        PointerEventKind::Enter => Some(PointerInput::Entered),
        PointerEventKind::Leave => Some(PointerInput::Left),
        PointerEventKind::Down => Some(PointerInput::Pressed),
        PointerEventKind::Up => Some(PointerInput::Released),
        PointerEventKind::Over => {
            let interactive = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.closest(INTERACTIVE_SELECTOR).ok().flatten())
                .is_some();
            Some(PointerInput::Hovered { interactive })
        }
    }
}

impl PointerHost for BrowserPointerHost {
    type Listener = ListenerGuard;
    type Frame = FrameRequest;

    fn touch_capable(&self) -> bool {
        touch_capable(&self.window)
    }

    fn listen(&self, kind: PointerEventKind, handler: Rc<dyn Fn(PointerInput)>) -> Option<ListenerGuard> {
        let target = self.target_for(kind)?;
        ListenerGuard::new(&target, kind.dom_name(), move |event: Event| {
            if let Some(input) = pointer_input(kind, &event) {
                handler(input);
            }
        })
    }

    fn request_frame(&self, flush: Rc<dyn Fn()>) -> Option<FrameRequest> {
        let callback = Closure::<dyn FnMut()>::new(move || flush());
        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()?;

        Some(FrameRequest {
            window: self.window.clone(),
            id,
            _callback: callback,
        })
    }
}

pub struct ObserverGuard {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Observation for ObserverGuard {
    fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub struct BrowserVisibilityHost {
    element: Element,
}

impl BrowserVisibilityHost {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl VisibilityHost for BrowserVisibilityHost {
    type Observation = ObserverGuard;

    fn observe(&self, threshold: f64, handler: Rc<dyn Fn(Intersection)>) -> Option<ObserverGuard> {
        let win = window()?;
        if !Reflect::has(&win, &JsValue::from_str("IntersectionObserver")).unwrap_or(false) {
            return None;
        }

        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    handler(Intersection {
                        ratio: entry.intersection_ratio(),
                        intersecting: entry.is_intersecting(),
                    });
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
        observer.observe(&self.element);

        Some(ObserverGuard {
            observer,
            _callback: callback,
        })
    }
}
