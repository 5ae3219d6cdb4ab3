//! Page header with title and actions.

use dioxus::prelude::*;

/// Props for ActionBar component.
#[derive(Props, Clone, PartialEq)]
pub struct ActionBarProps {
    pub title: String,
    #[props(default)]
    pub subtitle: Option<String>,
    #[props(default)]
    pub on_back: Option<EventHandler<()>>,
    #[props(default)]
    pub primary_label: Option<String>,
    #[props(default)]
    pub on_primary: Option<EventHandler<()>>,
    #[props(default)]
    pub secondary_label: Option<String>,
    #[props(default)]
    pub on_secondary: Option<EventHandler<()>>,
    /// Extra controls placed before the buttons.
    #[props(default)]
    pub extra: Option<Element>,
}

#[component]
pub fn ActionBar(props: ActionBarProps) -> Element {
    rsx! {
        div { class: "page-header",
            div { class: "page-header-content",
                if let Some(back) = props.on_back {
                    button {
                        class: "btn btn-link back-button",
                        onclick: move |_| back.call(()),
                        "← Back"
                    }
                }
                h1 { class: "page-title", "{props.title}" }
                if let Some(subtitle) = props.subtitle.clone() {
                    p { class: "page-description", "{subtitle}" }
                }
            }
            div { class: "page-header-actions",
                if let Some(extra) = props.extra {
                    {extra}
                }
                if let (Some(label), Some(handler)) = (props.secondary_label.clone(), props.on_secondary) {
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| handler.call(()),
                        "{label}"
                    }
                }
                if let (Some(label), Some(handler)) = (props.primary_label.clone(), props.on_primary) {
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| handler.call(()),
                        "{label}"
                    }
                }
            }
        }
    }
}
