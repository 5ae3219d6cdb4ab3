//! Modal dialog.

use dioxus::prelude::*;

const LOCK_SCROLL: &str = "document.body.style.overflow = 'hidden';";
const UNLOCK_SCROLL: &str = "document.body.style.overflow = '';";

/// Props for Modal component.
#[derive(Props, Clone, PartialEq)]
pub struct ModalProps {
    pub open: bool,
    pub title: String,
    pub on_close: EventHandler<()>,
    #[props(default = true)]
    pub close_on_escape: bool,
    #[props(default = true)]
    pub close_on_backdrop: bool,
    /// Buttons rendered under the body.
    #[props(default)]
    pub footer: Option<Element>,
    /// Extra class on the dialog, e.g. `modal-wide`.
    #[props(default)]
    pub class: Option<String>,
    pub children: Element,
}

/// Dialog over a backdrop. Page scrolling is disabled while it is open.
#[component]
pub fn Modal(props: ModalProps) -> Element {
    let on_close = props.on_close;
    let close_on_escape = props.close_on_escape;
    let close_on_backdrop = props.close_on_backdrop;

    let open = props.open;
    use_effect(use_reactive!(|(open,)| {
        let _ = document::eval(if open { LOCK_SCROLL } else { UNLOCK_SCROLL });
    }));

    use_drop(|| {
        let _ = document::eval(UNLOCK_SCROLL);
    });

    if !open {
        return rsx! {};
    }

    let dialog_class = match &props.class {
        Some(extra) => format!("modal {extra}"),
        None => "modal".to_string(),
    };

    rsx! {
        div {
            class: "modal-backdrop",
            tabindex: "-1",
            onmounted: move |e| async move {
                let _ = e.set_focus(true).await;
            },
            onkeydown: move |e| {
                if close_on_escape && e.key() == Key::Escape {
                    on_close.call(());
                }
            },
            onclick: move |_| {
                if close_on_backdrop {
                    on_close.call(());
                }
            },
            div {
                class: "{dialog_class}",
                role: "dialog",
                "aria-modal": "true",
                "aria-label": "{props.title}",
                onclick: move |e| e.stop_propagation(),
                div { class: "modal-header",
                    h2 { class: "modal-title", "{props.title}" }
                    button {
                        class: "modal-close",
                        "aria-label": "Close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                div { class: "modal-body", {props.children} }
                if let Some(footer) = props.footer {
                    div { class: "modal-footer", {footer} }
                }
            }
        }
    }
}
