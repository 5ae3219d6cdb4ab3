//! Search, filter and paging controls placed around tables.

use dioxus::prelude::*;
use school_core::PageMeta;
use school_core::list_query::ALL_SENTINEL;

use super::{Modal, page_window};

#[component]
pub fn SearchInput(
    value: String,
    #[props(default = "Search...".to_string())] placeholder: String,
    on_search: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "search-input",
            input {
                r#type: "search",
                "aria-label": "{placeholder}",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |e| on_search.call(e.value()),
            }
        }
    }
}

/// Select with an "All" entry that clears the filter.
#[component]
pub fn FilterSelect(
    label: String,
    value: String,
    options: Vec<(String, String)>,
    on_change: EventHandler<String>,
) -> Element {
    let current = if value.is_empty() { ALL_SENTINEL.to_string() } else { value };

    rsx! {
        label { class: "filter-select",
            span { class: "filter-label", "{label}" }
            select {
                value: "{current}",
                onchange: move |e| on_change.call(e.value()),
                option { value: ALL_SENTINEL, selected: current == ALL_SENTINEL, "All" }
                for (value, text) in options.iter() {
                    option { key: "{value}", value: "{value}", selected: *value == current, "{text}" }
                }
            }
        }
    }
}

/// Pager for server-paginated lists.
#[component]
pub fn Pager(meta: PageMeta, on_page: EventHandler<usize>) -> Element {
    let page = meta.current_page;
    let total = meta.total_pages.max(1);

    rsx! {
        div { class: "pagination",
            span { class: "pagination-label",
                "Page {page} of {total} · {meta.total_items} items"
            }
            div { class: "pagination-controls",
                button {
                    class: "btn btn-small",
                    disabled: !meta.has_prev_page,
                    onclick: move |_| on_page.call(page.saturating_sub(1).max(1)),
                    "Previous"
                }
                for n in page_window(page, total, 5) {
                    button {
                        key: "{n}",
                        class: if n == page { "btn btn-small btn-page active" } else { "btn btn-small btn-page" },
                        onclick: move |_| on_page.call(n),
                        "{n}"
                    }
                }
                button {
                    class: "btn btn-small",
                    disabled: !meta.has_next_page,
                    onclick: move |_| on_page.call(page + 1),
                    "Next"
                }
            }
        }
    }
}

/// Yes/no confirmation built on [`Modal`].
#[component]
pub fn ConfirmDialog(
    open: bool,
    title: String,
    message: String,
    #[props(default = "Delete".to_string())] confirm_label: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        Modal {
            open,
            title,
            on_close: move |_| on_cancel.call(()),
            footer: rsx! {
                button { class: "btn btn-secondary", onclick: move |_| on_cancel.call(()), "Cancel" }
                button { class: "btn btn-danger", onclick: move |_| on_confirm.call(()), "{confirm_label}" }
            },
            p { "{message}" }
        }
    }
}
