#![allow(clippy::disallowed_methods)]

use dioxus::prelude::*;
use school_core::{FieldValue, Record, SortDirection};
use ui::components::{Column, DataTable, FormField, InputKind, SortState};

#[derive(Debug, Clone, PartialEq)]
struct Tree {
    name: String,
    height: f64,
}

impl Record for Tree {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(self.name.clone().into()),
            "height" => Some(self.height.into()),
            _ => None,
        }
    }
}

fn tree(name: &str, height: f64) -> Tree {
    Tree {
        name: name.to_string(),
        height,
    }
}

fn grove() -> Vec<Tree> {
    vec![tree("Cedar", 30.0), tree("Alder", 12.0), tree("Birch", 18.0)]
}

fn columns() -> Vec<Column<Tree>> {
    vec![
        Column::new("name", "Name").sortable(),
        Column::new("height", "Height").sortable(),
    ]
}

fn data_rows(html: &str) -> usize {
    html.matches("class=\"data-row").count()
}

fn position(html: &str, needle: &str) -> usize {
    match html.find(needle) {
        Some(at) => at,
        None => panic!("{needle} not rendered in {html}"),
    }
}

#[test]
fn loading_shows_skeletons_instead_of_rows() {
    let html = dioxus_ssr::render_element(rsx! {
        DataTable::<Tree> { columns: columns(), data: grove(), loading: true, error: "stale".to_string() }
    });

    assert_eq!(data_rows(&html), 0);
    assert_eq!(html.matches("skeleton-row").count(), 5);
    assert!(!html.contains("Cedar"));
    assert!(!html.contains("stale"));
    assert!(!html.contains("Page 1 of"));
}

#[test]
fn empty_data_shows_one_empty_row() {
    let html = dioxus_ssr::render_element(rsx! {
        DataTable::<Tree> { columns: columns(), data: Vec::new(), empty_message: "No trees planted" }
    });

    assert_eq!(html.matches("No trees planted").count(), 1);
    assert_eq!(html.matches("empty-row").count(), 1);
    assert_eq!(data_rows(&html), 0);
}

#[test]
fn error_row_replaces_empty_row() {
    let html = dioxus_ssr::render_element(rsx! {
        DataTable::<Tree> { columns: columns(), data: Vec::new(), error: "Store unavailable".to_string() }
    });

    assert_eq!(html.matches("Store unavailable").count(), 1);
    assert!(!html.contains("No data available"));
}

#[test]
fn three_rows_fit_the_default_page() {
    let html = dioxus_ssr::render_element(rsx! {
        DataTable::<Tree> { columns: columns(), data: grove() }
    });

    assert_eq!(data_rows(&html), 3);
    assert!(html.contains("Page 1 of 1"));
}

#[test]
fn long_data_is_split_into_pages() {
    let forest: Vec<Tree> = (1..=12).map(|n| tree(&format!("Oak {n:02}"), f64::from(n))).collect();
    let html = dioxus_ssr::render_element(rsx! {
        DataTable::<Tree> { columns: columns(), data: forest }
    });

    assert_eq!(data_rows(&html), 10);
    assert!(html.contains("Page 1 of 2"));
    assert!(html.contains("Oak 10"));
    assert!(!html.contains("Oak 11"));
}

#[test]
fn rows_keep_data_order_until_sorted() {
    let html = dioxus_ssr::render_element(rsx! {
        DataTable::<Tree> { columns: columns(), data: grove() }
    });

    assert!(position(&html, "Cedar") < position(&html, "Alder"));
    assert!(position(&html, "Alder") < position(&html, "Birch"));
    assert!(!html.contains("aria-sort=\"ascending\""));
}

#[test]
fn sorted_column_orders_rows_without_touching_data() {
    let data = grove();
    let html = dioxus_ssr::render_element(rsx! {
        DataTable::<Tree> {
            columns: columns(),
            data: data.clone(),
            initial_sort: SortState::by("height", SortDirection::Desc),
        }
    });

    assert!(position(&html, "Cedar") < position(&html, "Birch"));
    assert!(position(&html, "Birch") < position(&html, "Alder"));
    assert_eq!(html.matches("aria-sort=\"descending\"").count(), 1);
    assert_eq!(data, grove());
}

#[component]
fn PrunableGrove() -> Element {
    rsx! {
        DataTable::<Tree> {
            columns: columns(),
            data: grove(),
            on_row_click: move |_: Tree| {},
            row_actions: move |tree: Tree| rsx! {
                button { class: "btn prune", "Prune {tree.name}" }
            },
        }
    }
}

#[test]
fn row_actions_render_in_their_own_cell() {
    let html = dioxus_ssr::render_element(rsx! { PrunableGrove {} });

    assert_eq!(html.matches("class=\"data-row clickable\"").count(), 3);
    assert_eq!(html.matches("actions-cell").count(), 3);
    assert!(html.contains(">Actions<"));
    assert!(position(&html, "actions-cell") < position(&html, "Prune Cedar"));
}

#[component]
fn StatusSelect(extra_options: bool, multiple: bool) -> Element {
    if extra_options {
        rsx! {
            FormField {
                label: "Status",
                kind: InputKind::Select,
                required: true,
                value: "active",
                on_change: move |_: String| {},
                option { value: "active", "Active" }
                option { value: "suspended", "Suspended" }
            }
        }
    } else {
        rsx! {
            FormField {
                label: "Status",
                kind: InputKind::Select,
                required: true,
                multiple,
                value: "active",
                options: vec![("active".to_string(), "Active".to_string())],
                on_change: move |_: String| {},
            }
        }
    }
}

#[test]
fn select_placeholder_option_rules() {
    let plain = dioxus_ssr::render_element(rsx! { StatusSelect { extra_options: false, multiple: false } });
    assert_eq!(plain.matches("Select...").count(), 1);
    assert!(plain.contains("aria-invalid=\"false\""));

    let multiple = dioxus_ssr::render_element(rsx! { StatusSelect { extra_options: false, multiple: true } });
    assert!(!multiple.contains("Select..."));

    let supplied = dioxus_ssr::render_element(rsx! { StatusSelect { extra_options: true, multiple: false } });
    assert!(!supplied.contains("Select..."));
    assert!(supplied.contains("Suspended"));
}
