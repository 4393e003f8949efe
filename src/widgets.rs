//! Cosmetic UI widgets: notifications, back-to-top, lazy images, reveal-on-
//! scroll wrappers, and the animated stat counters.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, Element, MouseEvent, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;

use crate::counter::{CounterAnim, STEP_INTERVAL_MS};
use crate::notice::{Notice, AUTO_DISMISS_MS, EXIT_ANIMATION_MS};
use crate::visibility::{Policy, VisibilityObserver};

/// Vertical offset past which the back-to-top button shows.
const BACK_TO_TOP_THRESHOLD: f64 = 500.0;
/// Card reveals start observing this long after mount, once layout settles.
const REVEAL_DEFER_MS: u32 = 500;
const CARD_THRESHOLD: f64 = 0.1;

/// Smooth-scroll the window to a vertical offset.
pub fn scroll_window_to(top: f64) {
    let Some(win) = window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
}

#[derive(Properties, PartialEq)]
pub struct NotificationHostProps {
    pub notice: Option<Notice>,
    pub on_dismissed: Callback<u64>,
}

/// Renders the live notice, if any. Entrance is a CSS animation; dismissal
/// (auto after five seconds, or manual) flips a `leaving` class and removes
/// the notice once the exit animation has played.
#[function_component(NotificationHost)]
pub fn notification_host(props: &NotificationHostProps) -> Html {
    let leaving = use_state_eq(|| false);
    let manual_exit = use_mut_ref(|| None::<Timeout>);
    let notice_id = props.notice.as_ref().map(|notice| notice.id);

    {
        let leaving = leaving.clone();
        let on_dismissed = props.on_dismissed.clone();
        use_effect_with(notice_id, move |id| {
            let mut timers = None;
            if let Some(id) = *id {
                leaving.set(false);
                let exit_slot: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
                let exit_handle = exit_slot.clone();
                let auto = Timeout::new(AUTO_DISMISS_MS, move || {
                    leaving.set(true);
                    let on_dismissed = on_dismissed.clone();
                    *exit_handle.borrow_mut() = Some(Timeout::new(EXIT_ANIMATION_MS, move || {
                        on_dismissed.emit(id);
                    }));
                });
                timers = Some((auto, exit_slot));
            }
            move || drop(timers)
        });
    }

    let on_close = {
        let leaving = leaving.clone();
        let on_dismissed = props.on_dismissed.clone();
        let manual_exit = manual_exit.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(id) = notice_id else {
                return;
            };
            leaving.set(true);
            let on_dismissed = on_dismissed.clone();
            *manual_exit.borrow_mut() = Some(Timeout::new(EXIT_ANIMATION_MS, move || {
                on_dismissed.emit(id);
            }));
        })
    };

    let Some(notice) = props.notice.as_ref() else {
        return html! {};
    };

    html! {
        <div
            key={notice.id.to_string()}
            class={classes!(
                "custom-notification",
                notice.severity.css_class(),
                (*leaving).then_some("leaving"),
            )}
            role="status"
        >
            <div class="notification-content">
                <span class="notification-icon" aria-hidden="true">{notice.severity.icon()}</span>
                <span class="notification-text">
                    { for notice.message.lines().map(|line| html! {
                        <span class="notification-line">{line.to_string()}</span>
                    }) }
                </span>
            </div>
            <button class="notification-close" aria-label="Dismiss" onclick={on_close}>
                {"✕"}
            </button>
        </div>
    }
}

/// Floating button that appears past a scroll threshold and scrolls back to
/// the top. Visibility is recomputed on every scroll event, never stored
/// anywhere else.
#[function_component(BackToTop)]
pub fn back_to_top() -> Html {
    let visible = use_state_eq(|| false);

    {
        let visible = visible.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|win| {
                let on_scroll = Closure::<dyn FnMut()>::new(move || {
                    let past_threshold = window()
                        .and_then(|w| w.scroll_y().ok())
                        .map(|y| y > BACK_TO_TOP_THRESHOLD)
                        .unwrap_or(false);
                    visible.set(past_threshold);
                });
                let _ = win
                    .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
                (win, on_scroll)
            });
            move || {
                if let Some((win, on_scroll)) = listener {
                    let _ = win.remove_event_listener_with_callback(
                        "scroll",
                        on_scroll.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let onclick = Callback::from(|_: MouseEvent| scroll_window_to(0.0));

    html! {
        <button
            class={classes!("back-to-top", (*visible).then_some("is-visible"))}
            aria-label="Back to top"
            onclick={onclick}
        >
            {"↑"}
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct LazyImageProps {
    /// The deferred source; only applied once the image nears the viewport.
    pub src: AttrValue,
    pub alt: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

/// Image that resolves its source when scrolled into view. If the host has
/// no `IntersectionObserver`, every image loads eagerly instead.
#[function_component(LazyImage)]
pub fn lazy_image(props: &LazyImageProps) -> Html {
    let loaded = use_state_eq(|| false);
    let img_ref = use_node_ref();

    {
        let loaded = loaded.clone();
        let img_ref = img_ref.clone();
        use_effect_with((), move |_| {
            let mut keep = None;
            if !VisibilityObserver::supported() {
                loaded.set(true);
            } else if let Some(element) = img_ref.cast::<Element>() {
                let on_visible = {
                    let loaded = loaded.clone();
                    move |_| loaded.set(true)
                };
                match VisibilityObserver::new(Policy::OncePer, 0.0, None, on_visible) {
                    Ok(observer) => {
                        observer.observe(&element);
                        keep = Some(observer);
                    }
                    Err(err) => {
                        log::warn!("lazy image observer unavailable: {err:?}");
                        loaded.set(true);
                    }
                }
            }
            move || drop(keep)
        });
    }

    html! {
        <img
            ref={img_ref}
            data-src={props.src.clone()}
            src={(*loaded).then(|| props.src.clone())}
            alt={props.alt.clone()}
            class={classes!(props.class.clone(), (*loaded).then_some("loaded"))}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub class: Classes,
    pub children: Html,
}

/// Wrapper that fades its content in the first time it scrolls into view.
/// The observer stays attached; re-entries are no-ops because the class
/// persists.
#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let revealed = use_state_eq(|| false);
    let node_ref = use_node_ref();

    {
        let revealed = revealed.clone();
        let node_ref = node_ref.clone();
        use_effect_with((), move |_| {
            let mut keep = None;
            if !VisibilityObserver::supported() {
                revealed.set(true);
            } else if let Some(element) = node_ref.cast::<Element>() {
                let on_visible = {
                    let revealed = revealed.clone();
                    move |_| revealed.set(true)
                };
                match VisibilityObserver::new(Policy::Persistent, CARD_THRESHOLD, None, on_visible)
                {
                    Ok(observer) => {
                        let observer = Rc::new(observer);
                        let deferred = observer.clone();
                        let defer = Timeout::new(REVEAL_DEFER_MS, move || {
                            deferred.observe(&element);
                        });
                        keep = Some((defer, observer));
                    }
                    Err(err) => {
                        log::warn!("reveal observer unavailable: {err:?}");
                        revealed.set(true);
                    }
                }
            }
            move || drop(keep)
        });
    }

    html! {
        <div
            ref={node_ref}
            class={classes!("reveal", props.class.clone(), (*revealed).then_some("animate-in"))}
        >
            { props.children.clone() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatCounterProps {
    pub target: u32,
    pub label: AttrValue,
    /// Flips to true once the stats container has been seen; the animation
    /// runs at most once regardless of later prop changes.
    pub start: bool,
}

#[function_component(StatCounter)]
pub fn stat_counter(props: &StatCounterProps) -> Html {
    let display = use_state(|| "0".to_string());
    let interval = use_mut_ref(|| None::<Interval>);
    let ran = use_mut_ref(|| false);

    {
        let display = display.clone();
        let interval = interval.clone();
        let target = props.target;
        use_effect_with(props.start, move |start| {
            if *start && !*ran.borrow() {
                *ran.borrow_mut() = true;
                let mut anim = CounterAnim::new(target);
                let self_cancel = interval.clone();
                *interval.borrow_mut() = Some(Interval::new(STEP_INTERVAL_MS, move || {
                    display.set(anim.tick());
                    if anim.finished() {
                        drop(self_cancel.borrow_mut().take());
                    }
                }));
            }
            let on_unmount = interval.clone();
            move || drop(on_unmount.borrow_mut().take())
        });
    }

    html! {
        <div class="stat">
            <span class="stat-number">{(*display).clone()}</span>
            <span class="stat-label">{props.label.clone()}</span>
        </div>
    }
}
