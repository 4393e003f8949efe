//! Contact section: validation, pseudo-submission, and the success panel.
//!
//! Delivery goes through [`deliver`]: a JSON POST when a `CONTACT_ENDPOINT`
//! is baked in at compile time, otherwise a fixed-delay simulation that
//! always succeeds. Only the real transport has a failure branch.

use std::fmt;

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, HtmlInputElement, HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};
use yew::prelude::*;

use crate::notice::Severity;
use crate::validate::{validate, ContactInput, Field};

/// Latency of the simulated transport.
const SIMULATED_LATENCY_MS: u32 = 1_500;
/// How long the success panel stays up.
const SUCCESS_PANEL_MS: u32 = 5_000;
const ERROR_BORDER: &str = "border-color: #ef4444";

fn contact_endpoint() -> Option<&'static str> {
    option_env!("CONTACT_ENDPOINT").filter(|endpoint| !endpoint.is_empty())
}

#[derive(Serialize, Clone, PartialEq)]
struct ContactMessage {
    name: String,
    email: String,
    message: String,
}

enum DeliveryError {
    Request(String),
    Status(u16),
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(reason) => write!(f, "request failed: {reason}"),
            Self::Status(status) => write!(f, "server responded with status {status}"),
        }
    }
}

async fn deliver(message: &ContactMessage) -> Result<(), DeliveryError> {
    let Some(endpoint) = contact_endpoint() else {
        log::info!("no contact endpoint configured; simulating delivery");
        TimeoutFuture::new(SIMULATED_LATENCY_MS).await;
        return Ok(());
    };

    let response = Request::post(endpoint)
        .json(message)
        .map_err(|err| DeliveryError::Request(err.to_string()))?
        .send()
        .await
        .map_err(|err| DeliveryError::Request(err.to_string()))?;

    if response.ok() {
        Ok(())
    } else {
        Err(DeliveryError::Status(response.status()))
    }
}

/// Per-field error-border flags, cleared individually as the user types.
#[derive(Clone, Copy, PartialEq, Default)]
struct FieldFlags {
    name: bool,
    email: bool,
    message: bool,
}

impl FieldFlags {
    fn with(mut self, field: Field) -> Self {
        match field {
            Field::Name => self.name = true,
            Field::Email => self.email = true,
            Field::Message => self.message = true,
        }
        self
    }

    fn without(mut self, field: Field) -> Self {
        match field {
            Field::Name => self.name = false,
            Field::Email => self.email = false,
            Field::Message => self.message = false,
        }
        self
    }

    fn style(self, field: Field) -> Option<&'static str> {
        let flagged = match field {
            Field::Name => self.name,
            Field::Email => self.email,
            Field::Message => self.message,
        };
        flagged.then_some(ERROR_BORDER)
    }
}

#[derive(Properties, PartialEq)]
pub struct ContactSectionProps {
    pub notify: Callback<(String, Severity)>,
}

#[function_component(ContactSection)]
pub fn contact_section(props: &ContactSectionProps) -> Html {
    let name = use_state(String::new);
    let email = use_state(String::new);
    let message = use_state(String::new);
    let flags = use_state_eq(FieldFlags::default);
    let sending = use_state_eq(|| false);
    let success_visible = use_state_eq(|| false);
    let form_ref = use_node_ref();

    // The success panel hides itself after a while.
    {
        let success_visible = success_visible.clone();
        use_effect_with(*success_visible, move |shown| {
            let timer = shown.then(|| {
                let success_visible = success_visible.clone();
                Timeout::new(SUCCESS_PANEL_MS, move || success_visible.set(false))
            });
            move || drop(timer)
        });
    }

    let on_name_input = {
        let name = name.clone();
        let flags = flags.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
            flags.set(flags.without(Field::Name));
        })
    };

    let on_email_input = {
        let email = email.clone();
        let flags = flags.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
            flags.set(flags.without(Field::Email));
        })
    };

    let on_message_input = {
        let message = message.clone();
        let flags = flags.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            message.set(input.value());
            flags.set(flags.without(Field::Message));
        })
    };

    let onsubmit = {
        let name = name.clone();
        let email = email.clone();
        let message = message.clone();
        let flags = flags.clone();
        let sending = sending.clone();
        let success_visible = success_visible.clone();
        let form_ref = form_ref.clone();
        let notify = props.notify.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let input = ContactInput {
                name: (*name).clone(),
                email: (*email).clone(),
                message: (*message).clone(),
            };

            let issues = validate(&input);
            if !issues.is_empty() {
                let mut flagged = FieldFlags::default();
                for issue in &issues {
                    flagged = flagged.with(issue.field);
                }
                flags.set(flagged);

                let joined = issues
                    .iter()
                    .map(|issue| issue.message())
                    .collect::<Vec<_>>()
                    .join("\n");
                notify.emit((joined, Severity::Error));
                return;
            }
            flags.set(FieldFlags::default());
            sending.set(true);

            let payload = ContactMessage {
                name: input.name,
                email: input.email,
                message: input.message,
            };
            let name = name.clone();
            let email = email.clone();
            let message = message.clone();
            let sending = sending.clone();
            let success_visible = success_visible.clone();
            let form_ref = form_ref.clone();
            let notify = notify.clone();

            spawn_local(async move {
                match deliver(&payload).await {
                    Ok(()) => {
                        name.set(String::new());
                        email.set(String::new());
                        message.set(String::new());
                        sending.set(false);

                        if let Some(form) = form_ref.cast::<Element>() {
                            success_visible.set(true);
                            let options = ScrollIntoViewOptions::new();
                            options.set_behavior(ScrollBehavior::Smooth);
                            options.set_block(ScrollLogicalPosition::Start);
                            form.scroll_into_view_with_scroll_into_view_options(&options);
                        } else {
                            notify.emit((
                                "Message sent successfully! We'll get back to you soon."
                                    .to_string(),
                                Severity::Success,
                            ));
                        }
                    }
                    Err(err) => {
                        log::warn!("contact delivery failed: {err}");
                        sending.set(false);
                        notify.emit((
                            "We couldn't send your message. Please try again.".to_string(),
                            Severity::Error,
                        ));
                    }
                }
            });
        })
    };

    html! {
        <section id="contact" class="contact-section">
            <h2>{"Get in touch"}</h2>
            <p class="section-lead">{"Tell us about your project and we'll reply within a day."}</p>

            if *success_visible {
                <div id="successMessage" class="form-success" role="status">
                    <span aria-hidden="true">{"✓ "}</span>
                    {"Thank you for your message! We'll get back to you within 24 hours."}
                </div>
            }

            <form id="contactForm" ref={form_ref.clone()} onsubmit={onsubmit} novalidate="novalidate">
                <label for="name">{"Name"}</label>
                <input
                    id="name"
                    type="text"
                    value={(*name).clone()}
                    oninput={on_name_input}
                    style={flags.style(Field::Name)}
                    placeholder="Your name"
                />

                <label for="email">{"Email"}</label>
                <input
                    id="email"
                    type="email"
                    value={(*email).clone()}
                    oninput={on_email_input}
                    style={flags.style(Field::Email)}
                    placeholder="you@example.com"
                />

                <label for="message">{"Message"}</label>
                <textarea
                    id="message"
                    rows="5"
                    value={(*message).clone()}
                    oninput={on_message_input}
                    style={flags.style(Field::Message)}
                    placeholder="What are you building?"
                />

                <button type="submit" disabled={*sending}>
                    if *sending {
                        <span class="sending-spinner" aria-hidden="true">{"⟳ "}</span>
                        {"Sending..."}
                    } else {
                        {"Send message"}
                    }
                </button>
            </form>
        </section>
    }
}
