//! Tab strip with a single visible panel.

use dioxus::prelude::*;

/// Props for Tabs component.
#[derive(Props, Clone, PartialEq)]
pub struct TabsProps {
    pub labels: Vec<String>,
    #[props(default = 0)]
    pub initial: usize,
    #[props(default)]
    pub on_change: Option<EventHandler<usize>>,
    /// Renders the panel for the active tab index.
    pub panel: Callback<usize, Element>,
}

#[component]
pub fn Tabs(props: TabsProps) -> Element {
    let last = props.labels.len().saturating_sub(1);
    let mut active = use_signal(|| props.initial.min(last));
    let on_change = props.on_change;
    let current = active().min(last);

    rsx! {
        div { class: "tabs",
            div { class: "tab-list", role: "tablist",
                for (index, label) in props.labels.iter().enumerate() {
                    button {
                        key: "{index}",
                        class: if index == current { "tab active" } else { "tab" },
                        role: "tab",
                        "aria-selected": if index == current { "true" } else { "false" },
                        onclick: move |_| {
                            if active() != index {
                                active.set(index);
                                if let Some(handler) = on_change {
                                    handler.call(index);
                                }
                            }
                        },
                        "{label}"
                    }
                }
            }
            div { class: "tab-panel", role: "tabpanel",
                {props.panel.call(current)}
            }
        }
    }
}
