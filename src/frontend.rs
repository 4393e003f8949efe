use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::Level;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Document, Element, HtmlElement, MouseEvent, Node};
use yew::prelude::*;

use crate::contact::ContactSection;
use crate::menu::{self, MenuEvent, MenuState, RESIZE_DEBOUNCE_MS};
use crate::notice::{NoticeSlot, Severity};
use crate::visibility::{Policy, VisibilityObserver};
use crate::widgets::{
    scroll_window_to, BackToTop, LazyImage, NotificationHost, Reveal, StatCounter,
};

/// Offset compensation when the `.navbar` element cannot be measured.
const NAVBAR_FALLBACK_HEIGHT: i32 = 70;
const PRELOADER_FADE_MS: u32 = 500;
const STATS_THRESHOLD: f64 = 0.5;
/// Shrinks the stats trigger zone by 100px at the bottom of the viewport.
const STATS_ROOT_MARGIN: &str = "0px 0px -100px 0px";

fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}

fn current_pathname() -> String {
    window()
        .and_then(|win| win.location().pathname().ok())
        .unwrap_or_default()
}

fn navbar_height() -> i32 {
    document()
        .and_then(|doc| doc.query_selector(".navbar").ok().flatten())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| el.offset_height())
        .unwrap_or(NAVBAR_FALLBACK_HEIGHT)
}

/// Smooth-scroll to a same-page fragment, compensating for the fixed navbar,
/// and record the fragment in the URL without navigating. A bare `#` is
/// ignored.
fn scroll_to_fragment(href: &str) {
    let Some(id) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
        return;
    };
    let Some(doc) = document() else {
        return;
    };
    let Some(target) = doc.get_element_by_id(id) else {
        return;
    };
    let Ok(target) = target.dyn_into::<HtmlElement>() else {
        return;
    };

    scroll_window_to(f64::from(target.offset_top() - navbar_height()));

    if let Some(history) = window().and_then(|win| win.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(href));
    }
}

fn fragment_onclick(href: &'static str) -> Callback<MouseEvent> {
    Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        scroll_to_fragment(href);
    })
}

fn set_body_scroll_locked(locked: bool) {
    let Some(body) = document().and_then(|doc| doc.body()) else {
        return;
    };
    let value = if locked { "hidden" } else { "" };
    let _ = body.style().set_property("overflow", value);
}

/// Run `f` once all resources have loaded, or immediately when the load
/// event has already fired.
fn run_after_full_load(f: impl FnOnce() + 'static) {
    let Some(win) = window() else {
        return;
    };
    let complete = win
        .document()
        .map(|doc| doc.ready_state() == "complete")
        .unwrap_or(false);
    if complete {
        f();
        return;
    }
    let once = Closure::once(f);
    let _ = win.add_event_listener_with_callback("load", once.as_ref().unchecked_ref());
    once.forget();
}

fn mark_page_loaded() {
    let Some(doc) = document() else {
        return;
    };
    if let Some(body) = doc.body() {
        let _ = body.class_list().add_1("loaded");
    }

    let preloader = doc
        .query_selector(".preloader")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if let Some(preloader) = preloader {
        let _ = preloader.style().set_property("opacity", "0");
        Timeout::new(PRELOADER_FADE_MS, move || {
            let _ = preloader.style().set_property("display", "none");
        })
        .forget();
    }
}

#[derive(PartialEq, Default)]
struct Menu(MenuState);

impl Reducible for Menu {
    type Action = MenuEvent;

    fn reduce(self: Rc<Self>, action: MenuEvent) -> Rc<Self> {
        Rc::new(Menu(self.0.apply(action)))
    }
}

struct NavLinkSpec {
    label: &'static str,
    href: &'static str,
    /// Page-style target for active marking; fragment links have none.
    page: Option<&'static str>,
}

const NAV_LINKS: &[NavLinkSpec] = &[
    NavLinkSpec {
        label: "Home",
        href: "#home",
        page: Some("index.html"),
    },
    NavLinkSpec {
        label: "Services",
        href: "#services",
        page: None,
    },
    NavLinkSpec {
        label: "About",
        href: "#about",
        page: None,
    },
    NavLinkSpec {
        label: "Team",
        href: "#team",
        page: None,
    },
    NavLinkSpec {
        label: "Contact",
        href: "#contact",
        page: None,
    },
];

#[function_component(Navbar)]
fn navbar() -> Html {
    let menu = use_reducer(Menu::default);
    let links_ref = use_node_ref();
    let toggle_ref = use_node_ref();

    // Scroll lock tracks every transition.
    use_effect_with(menu.0, |state| {
        set_body_scroll_locked(state.locks_scroll());
        || ()
    });

    // A pointer interaction outside both the menu and the toggle closes it.
    {
        let menu = menu.clone();
        let links_ref = links_ref.clone();
        let toggle_ref = toggle_ref.clone();
        use_effect_with((), move |_| {
            let listener = document().map(|doc| {
                let on_click =
                    Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
                        let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok())
                        else {
                            return;
                        };
                        let inside = [&links_ref, &toggle_ref].iter().any(|handle| {
                            handle
                                .cast::<Node>()
                                .map(|node| node.contains(Some(&target)))
                                .unwrap_or(false)
                        });
                        if !inside {
                            menu.dispatch(MenuEvent::OutsidePointer);
                        }
                    });
                let _ = doc
                    .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
                (doc, on_click)
            });
            move || {
                if let Some((doc, on_click)) = listener {
                    let _ = doc.remove_event_listener_with_callback(
                        "click",
                        on_click.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    // Resizing to desktop closes the menu, after the resize stream has been
    // quiet for the debounce window. A newer resize replaces the pending
    // timer, cancelling it.
    {
        let menu = menu.clone();
        use_effect_with((), move |_| {
            let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
            let listener = window().map(|win| {
                let on_resize = Closure::<dyn FnMut()>::new(move || {
                    let menu = menu.clone();
                    *pending.borrow_mut() = Some(Timeout::new(RESIZE_DEBOUNCE_MS, move || {
                        let width = window()
                            .and_then(|w| w.inner_width().ok())
                            .and_then(|value| value.as_f64())
                            .unwrap_or(0.0);
                        menu.dispatch(MenuEvent::ResizeSettled { width });
                    }));
                });
                let _ = win
                    .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
                (win, on_resize)
            });
            move || {
                if let Some((win, on_resize)) = listener {
                    let _ = win.remove_event_listener_with_callback(
                        "resize",
                        on_resize.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let on_toggle = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.dispatch(MenuEvent::ToggleActivated))
    };

    let path = current_pathname();
    let state = menu.0;

    html! {
        <nav class="navbar">
            <a class="nav-brand" href="#home" onclick={fragment_onclick("#home")}>
                {"Harborlight Studio"}
            </a>
            <button
                id="menuToggle"
                ref={toggle_ref}
                class="menu-toggle"
                aria-label="Toggle navigation"
                aria-expanded={state.is_open().to_string()}
                onclick={on_toggle}
            >
                { state.toggle_glyph() }
            </button>
            <ul
                id="navLinks"
                ref={links_ref}
                class={classes!("nav-links", state.is_open().then_some("open"))}
            >
                { for NAV_LINKS.iter().map(|link| {
                    let active = link
                        .page
                        .map(|page| menu::link_is_active(&path, page))
                        .unwrap_or(false);
                    let onclick = {
                        let menu = menu.clone();
                        let href = link.href;
                        Callback::from(move |event: MouseEvent| {
                            event.prevent_default();
                            scroll_to_fragment(href);
                            menu.dispatch(MenuEvent::LinkActivated);
                        })
                    };
                    html! {
                        <li>
                            <a
                                href={link.href}
                                class={classes!(active.then_some("active"))}
                                onclick={onclick}
                            >
                                {link.label}
                            </a>
                        </li>
                    }
                }) }
            </ul>
        </nav>
    }
}

#[function_component(Hero)]
fn hero() -> Html {
    let stats_started = use_state_eq(|| false);
    let stats_ref = use_node_ref();

    // One observer on the stats container; its first firing starts every
    // counter on the page and tears the observer down.
    {
        let stats_started = stats_started.clone();
        let stats_ref = stats_ref.clone();
        use_effect_with((), move |_| {
            let mut keep = None;
            if !VisibilityObserver::supported() {
                stats_started.set(true);
            } else if let Some(element) = stats_ref.cast::<Element>() {
                let on_visible = {
                    let stats_started = stats_started.clone();
                    move |_| stats_started.set(true)
                };
                match VisibilityObserver::new(
                    Policy::OnceAll,
                    STATS_THRESHOLD,
                    Some(STATS_ROOT_MARGIN),
                    on_visible,
                ) {
                    Ok(observer) => {
                        observer.observe(&element);
                        keep = Some(observer);
                    }
                    Err(err) => {
                        log::warn!("stats observer unavailable: {err:?}");
                        stats_started.set(true);
                    }
                }
            }
            move || drop(keep)
        });
    }

    html! {
        <section id="home" class="hero">
            <h1>{"Software that ships, for teams that care"}</h1>
            <p class="hero-lead">
                {"Harborlight Studio designs and builds dependable web products \
                  for companies of every size."}
            </p>
            <a class="cta-button" href="#contact" onclick={fragment_onclick("#contact")}>
                {"Start a project"}
            </a>
            <div class="hero-stats" ref={stats_ref}>
                <StatCounter target={120} label="Projects delivered" start={*stats_started} />
                <StatCounter target={45} label="Happy clients" start={*stats_started} />
                <StatCounter target={12} label="Specialists on staff" start={*stats_started} />
            </div>
        </section>
    }
}

#[function_component(ServicesSection)]
fn services_section() -> Html {
    let services = [
        (
            "Product engineering",
            "Full-stack builds from prototype to production, with the boring \
             reliability work done up front.",
        ),
        (
            "Design systems",
            "Component libraries and interface guidelines your whole team can \
             actually maintain.",
        ),
        (
            "Performance audits",
            "We find where your site spends its time and give you a concrete \
             plan to win it back.",
        ),
    ];

    html! {
        <section id="services" class="card-grid-section">
            <h2>{"What we do"}</h2>
            <div class="card-grid">
                { for services.iter().map(|(title, copy)| html! {
                    <Reveal class="service-card">
                        <h3>{*title}</h3>
                        <p>{*copy}</p>
                    </Reveal>
                }) }
            </div>
        </section>
    }
}

#[function_component(ValuesSection)]
fn values_section() -> Html {
    let values = [
        (
            "Plain speech",
            "Estimates, trade-offs, and bad news delivered straight, in \
             writing, on time.",
        ),
        (
            "Small teams",
            "Two or three people who know your codebase beats ten who are \
             reading it for the first time.",
        ),
        (
            "Long maintenance",
            "We stay reachable after launch; most of our work is for \
             returning clients.",
        ),
    ];

    html! {
        <section id="about" class="card-grid-section">
            <h2>{"How we work"}</h2>
            <div class="card-grid">
                { for values.iter().map(|(title, copy)| html! {
                    <Reveal class="value-card">
                        <h3>{*title}</h3>
                        <p>{*copy}</p>
                    </Reveal>
                }) }
            </div>
        </section>
    }
}

#[function_component(TeamSection)]
fn team_section() -> Html {
    let team = [
        ("Mara Ellison", "Engineering lead", "/images/team-mara.jpg"),
        ("Jon Okafor", "Product designer", "/images/team-jon.jpg"),
        ("Priya Raman", "Delivery manager", "/images/team-priya.jpg"),
    ];

    html! {
        <section id="team" class="card-grid-section">
            <h2>{"The team"}</h2>
            <div class="card-grid">
                { for team.iter().map(|(name, role, photo)| html! {
                    <Reveal class="team-card">
                        <LazyImage
                            src={AttrValue::from(*photo)}
                            alt={AttrValue::from(format!("Portrait of {name}"))}
                            class="team-photo"
                        />
                        <h3>{*name}</h3>
                        <p>{*role}</p>
                    </Reveal>
                }) }
            </div>
        </section>
    }
}

#[function_component(SiteFooter)]
fn site_footer() -> Html {
    html! {
        <footer class="site-footer">
            <div class="footer-links">
                <a href="#services" onclick={fragment_onclick("#services")}>{"Services"}</a>
                <a href="#about" onclick={fragment_onclick("#about")}>{"About"}</a>
                <a href="#contact" onclick={fragment_onclick("#contact")}>{"Contact"}</a>
            </div>
            <p class="copyright">
                {"© "}
                <span id="currentYear" class="current-year">{current_year()}</span>
                {" Harborlight Studio. All rights reserved."}
            </p>
        </footer>
    }
}

#[function_component(App)]
fn app() -> Html {
    let notices = use_state(NoticeSlot::default);

    use_effect_with((), |_| {
        run_after_full_load(mark_page_loaded);
        || ()
    });

    let notify = {
        let notices = notices.clone();
        Callback::from(move |(message, severity): (String, Severity)| {
            let mut slot = (*notices).clone();
            slot.show(message, severity);
            notices.set(slot);
        })
    };

    let on_dismissed = {
        let notices = notices.clone();
        Callback::from(move |id: u64| {
            let mut slot = (*notices).clone();
            slot.dismiss(id);
            notices.set(slot);
        })
    };

    html! {
        <>
            <Navbar />
            <main>
                <Hero />
                <ServicesSection />
                <ValuesSection />
                <TeamSection />
                <ContactSection notify={notify} />
            </main>
            <SiteFooter />
            <BackToTop />
            <NotificationHost notice={notices.current().cloned()} on_dismissed={on_dismissed} />
            <SiteStyles />
        </>
    }
}

/// Behavioral styles for the classes the components toggle. Layout and
/// branding stay in the host stylesheet; `--primary`/`--secondary` come from
/// there too, with literal fallbacks.
#[function_component(SiteStyles)]
fn site_styles() -> Html {
    html! {
        <style>
            {r#"
            body { margin: 0; }

            .preloader {
                position: fixed;
                inset: 0;
                background: #fff;
                display: flex;
                align-items: center;
                justify-content: center;
                z-index: 10001;
                transition: opacity 0.5s ease;
            }

            .navbar {
                position: fixed;
                top: 0;
                left: 0;
                right: 0;
                height: 70px;
                display: flex;
                align-items: center;
                justify-content: space-between;
                padding: 0 1.5rem;
                background: #fff;
                box-shadow: 0 1px 4px rgba(0, 0, 0, 0.08);
                z-index: 1000;
            }

            .menu-toggle {
                display: none;
                background: none;
                border: none;
                font-size: 1.4rem;
                cursor: pointer;
            }

            .nav-links {
                display: flex;
                gap: 1.5rem;
                list-style: none;
                margin: 0;
                padding: 0;
            }

            .nav-links a { text-decoration: none; color: inherit; }
            .nav-links a.active { color: var(--primary, #2563eb); font-weight: 600; }

            @media (max-width: 768px) {
                .menu-toggle { display: block; }
                .nav-links {
                    position: fixed;
                    top: 70px;
                    left: 0;
                    right: 0;
                    bottom: 0;
                    flex-direction: column;
                    padding: 2rem;
                    background: #fff;
                    transform: translateX(100%);
                    transition: transform 0.3s ease;
                }
                .nav-links.open { transform: translateX(0); }
            }

            .hero { padding: 8rem 1.5rem 4rem; text-align: center; }
            .hero-stats {
                display: flex;
                justify-content: center;
                gap: 3rem;
                margin-top: 3rem;
            }
            .stat { display: flex; flex-direction: column; }
            .stat-number { font-size: 2.2rem; font-weight: 700; color: var(--primary, #2563eb); }

            .card-grid-section { padding: 4rem 1.5rem; }
            .card-grid {
                display: grid;
                grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
                gap: 1.5rem;
            }

            @keyframes fadeInUp {
                from { opacity: 0; transform: translateY(20px); }
                to { opacity: 1; transform: translateY(0); }
            }

            .reveal { opacity: 0; }
            .reveal.animate-in { animation: fadeInUp 0.6s ease forwards; }

            @keyframes fadeIn {
                from { opacity: 0; }
                to { opacity: 1; }
            }

            img.loaded { animation: fadeIn 0.5s ease; }
            .team-photo { width: 100%; border-radius: 8px; min-height: 180px; background: #f1f5f9; }

            .contact-section { padding: 4rem 1.5rem; max-width: 560px; margin: 0 auto; }
            .contact-section form { display: flex; flex-direction: column; gap: 0.5rem; }
            .contact-section input,
            .contact-section textarea {
                padding: 0.75rem;
                border: 1px solid #cbd5e1;
                border-radius: 6px;
                font: inherit;
            }
            .contact-section button {
                margin-top: 0.75rem;
                padding: 0.75rem 1.5rem;
                border: none;
                border-radius: 6px;
                background: var(--primary, #2563eb);
                color: #fff;
                cursor: pointer;
            }
            .contact-section button:disabled { opacity: 0.7; cursor: wait; }

            .form-success {
                padding: 1rem;
                margin-bottom: 1rem;
                border-radius: 8px;
                background: #d1fae5;
                color: #065f46;
            }

            .back-to-top {
                position: fixed;
                bottom: 30px;
                right: 30px;
                width: 50px;
                height: 50px;
                background: var(--primary, #2563eb);
                color: #fff;
                border: none;
                border-radius: 50%;
                cursor: pointer;
                display: none;
                align-items: center;
                justify-content: center;
                font-size: 1.2rem;
                box-shadow: 0 4px 12px rgba(37, 99, 235, 0.3);
                transition: all 0.3s;
                z-index: 999;
            }
            .back-to-top.is-visible { display: flex; }
            .back-to-top:hover {
                background: var(--secondary, #7c3aed);
                transform: translateY(-3px);
            }

            @keyframes slideIn {
                from { transform: translateX(100%); opacity: 0; }
                to { transform: translateX(0); opacity: 1; }
            }

            @keyframes slideOut {
                from { transform: translateX(0); opacity: 1; }
                to { transform: translateX(100%); opacity: 0; }
            }

            .custom-notification {
                position: fixed;
                top: 100px;
                right: 20px;
                display: flex;
                align-items: center;
                justify-content: space-between;
                gap: 1rem;
                max-width: 400px;
                padding: 1rem 1.5rem;
                border-radius: 8px;
                background: #d1fae5;
                color: #065f46;
                box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
                z-index: 10000;
                animation: slideIn 0.3s ease;
            }
            .custom-notification.error { background: #fee; color: #dc2626; }
            .custom-notification.leaving { animation: slideOut 0.3s ease forwards; }
            .notification-content { display: flex; align-items: flex-start; gap: 0.6rem; }
            .notification-line { display: block; }
            .notification-close {
                background: none;
                border: none;
                color: inherit;
                cursor: pointer;
            }

            .site-footer { padding: 3rem 1.5rem; text-align: center; }
            .footer-links { display: flex; justify-content: center; gap: 1.5rem; margin-bottom: 1rem; }
            .footer-links a { color: inherit; }
            "#}
        </style>
    }
}

pub fn run() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(Level::Info);
    log::info!("mounting Harborlight site");

    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
