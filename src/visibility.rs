//! Viewport-visibility primitive over `IntersectionObserver`.
//!
//! Each consumer picks a disconnect policy: the counter trigger tears the
//! whole observer down after one firing, lazy images stop watching each
//! element individually, and card reveals keep watching forever.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Disconnect the whole observer after the first visible entry.
    OnceAll,
    /// Stop watching each element after it first becomes visible.
    OncePer,
    /// Keep watching; fires again on every re-entry.
    Persistent,
}

pub struct VisibilityObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl VisibilityObserver {
    /// Whether the host exposes `IntersectionObserver` at all. Callers fail
    /// open when it does not.
    pub fn supported() -> bool {
        window()
            .map(|win| {
                js_sys::Reflect::has(win.as_ref(), &JsValue::from_str("IntersectionObserver"))
                    .unwrap_or(false)
            })
            .unwrap_or(false)
    }

    pub fn new(
        policy: Policy,
        threshold: f64,
        root_margin: Option<&str>,
        mut on_visible: impl FnMut(Element) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    match policy {
                        Policy::OnceAll => {
                            observer.disconnect();
                            on_visible(target);
                            return;
                        }
                        Policy::OncePer => {
                            observer.unobserve(&target);
                            on_visible(target);
                        }
                        Policy::Persistent => on_visible(target),
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        if let Some(margin) = root_margin {
            options.set_root_margin(margin);
        }

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
