//! Generic data table with client-side sorting and pagination.

use dioxus::prelude::*;
use school_core::list_query::sort_order;
use school_core::{Record, SortDirection};

/// Rows-per-page choices offered under the table.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];

/// One table column.
#[derive(Clone, PartialEq)]
pub struct Column<T> {
    /// Record field shown in the cell and used for sorting.
    pub field: &'static str,
    pub header: String,
    pub sortable: bool,
    /// Custom cell renderer; the field's display text is used otherwise.
    pub render: Option<fn(&T) -> Element>,
}

impl<T> Column<T> {
    pub fn new(field: &'static str, header: impl Into<String>) -> Self {
        Self {
            field,
            header: header.into(),
            sortable: false,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn render(mut self, render: fn(&T) -> Element) -> Self {
        self.render = Some(render);
        self
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub field: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn by(field: &str, direction: SortDirection) -> SortState {
        SortState {
            field: Some(field.to_string()),
            direction,
        }
    }

    /// Header click: a new field sorts ascending, the same field flips direction.
    pub fn toggle(&self, field: &str) -> SortState {
        match &self.field {
            Some(current) if current == field => SortState {
                field: Some(field.to_string()),
                direction: self.direction.toggled(),
            },
            _ => SortState {
                field: Some(field.to_string()),
                direction: SortDirection::Asc,
            },
        }
    }

    pub fn aria_sort(&self, field: &str) -> &'static str {
        match (&self.field, self.direction) {
            (Some(current), SortDirection::Asc) if current == field => "ascending",
            (Some(current), SortDirection::Desc) if current == field => "descending",
            _ => "none",
        }
    }

    /// Arrow shown next to a header.
    pub fn indicator(&self, field: &str) -> &'static str {
        match (&self.field, self.direction) {
            (Some(current), SortDirection::Asc) if current == field => "▲",
            (Some(current), SortDirection::Desc) if current == field => "▼",
            _ => "",
        }
    }
}

/// Current page, remembered together with the data length it was chosen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    len: usize,
    page: usize,
}

impl PageCursor {
    pub fn new(len: usize) -> Self {
        Self { len, page: 1 }
    }

    /// Page to show for data of length `len`; a different length means page 1.
    pub fn page_for(&self, len: usize) -> usize {
        if self.len == len { self.page } else { 1 }
    }

    pub fn goto(len: usize, page: usize) -> Self {
        Self {
            len,
            page: page.max(1),
        }
    }
}

/// Rows per page picked from the size select, tied to the prop value it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize {
    prop: usize,
    chosen: usize,
}

impl PageSize {
    pub fn new(prop: usize) -> Self {
        Self {
            prop,
            chosen: prop.max(1),
        }
    }

    /// Rows per page for the current prop; a changed prop replaces the choice.
    pub fn rows_for(&self, prop: usize) -> usize {
        if self.prop == prop { self.chosen } else { prop.max(1) }
    }

    pub fn choose(prop: usize, rows: usize) -> Self {
        Self {
            prop,
            chosen: rows.max(1),
        }
    }
}

/// Number of pages for `len` rows, never less than one.
pub fn page_count(len: usize, rows_per_page: usize) -> usize {
    len.div_ceil(rows_per_page.max(1)).max(1)
}

/// Up to `width` page numbers centred on `current`.
pub fn page_window(current: usize, total: usize, width: usize) -> Vec<usize> {
    let total = total.max(1);
    let width = width.clamp(1, total);
    let current = current.clamp(1, total);
    let start = current.saturating_sub(width / 2).max(1).min(total - width + 1);
    (start..start + width).collect()
}

/// What the table body shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableBody {
    Loading,
    Error,
    Empty,
    Rows,
}

impl TableBody {
    /// Loading wins over error, error over empty.
    pub fn resolve(loading: bool, has_error: bool, is_empty: bool) -> TableBody {
        if loading {
            TableBody::Loading
        } else if has_error {
            TableBody::Error
        } else if is_empty {
            TableBody::Empty
        } else {
            TableBody::Rows
        }
    }
}

/// Props for DataTable component.
#[derive(Props, Clone, PartialEq)]
pub struct DataTableProps<T: Record + Clone + PartialEq + 'static> {
    pub columns: Vec<Column<T>>,
    pub data: Vec<T>,
    #[props(default = false)]
    pub loading: bool,
    #[props(default)]
    pub error: Option<String>,
    /// Shown as a retry button in the error row.
    #[props(default)]
    pub on_retry: Option<EventHandler<()>>,
    #[props(default = true)]
    pub pagination: bool,
    #[props(default = 10)]
    pub rows_per_page: usize,
    /// Column and direction shown before any header is clicked.
    #[props(default)]
    pub initial_sort: SortState,
    #[props(default = 5)]
    pub skeleton_rows: usize,
    /// Renders the trailing actions cell of each row.
    #[props(default)]
    pub row_actions: Option<Callback<T, Element>>,
    #[props(default)]
    pub on_row_click: Option<EventHandler<T>>,
    /// When set, sorting is left to the caller and rows are shown as given.
    #[props(default)]
    pub on_sort: Option<EventHandler<SortState>>,
    #[props(default = "No data available".to_string())]
    pub empty_message: String,
}

/// Table over any [`Record`] type.
#[allow(non_snake_case)]
pub fn DataTable<T: Record + Clone + PartialEq + 'static>(props: DataTableProps<T>) -> Element {
    let initial_sort = props.initial_sort.clone();
    let mut sort = use_signal(move || initial_sort);
    let mut cursor = use_signal(|| PageCursor::new(props.data.len()));
    let mut page_size = use_signal(|| PageSize::new(props.rows_per_page));
    let rows_prop = props.rows_per_page;

    let column_count = props.columns.len() + usize::from(props.row_actions.is_some());
    let body = TableBody::resolve(props.loading, props.error.is_some(), props.data.is_empty());

    let external_sort = props.on_sort;
    let current_sort = sort();

    // Client-side sort leaves `props.data` untouched and orders row indices instead.
    let order: Vec<usize> = match (&current_sort.field, external_sort) {
        (Some(field), None) => sort_order(&props.data, field, current_sort.direction),
        _ => (0..props.data.len()).collect(),
    };

    let len = props.data.len();
    let per_page = page_size.read().rows_for(rows_prop);
    let total_pages = page_count(len, per_page);
    let page = cursor.read().page_for(len).min(total_pages);
    let visible: Vec<usize> = if props.pagination {
        order.into_iter().skip((page - 1) * per_page).take(per_page).collect()
    } else {
        order
    };

    let on_row_click = props.on_row_click;
    let row_actions = props.row_actions;

    rsx! {
        div { class: "data-table-wrapper",
            div { class: "table-container",
                table { class: "data-table",
                    thead {
                        tr {
                            for column in props.columns.iter() {
                                {
                                    let field = column.field;
                                    let indicator = current_sort.indicator(field);
                                    if column.sortable {
                                        rsx! {
                                            th {
                                                key: "{field}",
                                                class: "sortable",
                                                "aria-sort": current_sort.aria_sort(field),
                                                onclick: move |_| {
                                                    let next = sort.read().toggle(field);
                                                    sort.set(next.clone());
                                                    if let Some(handler) = external_sort {
                                                        handler.call(next);
                                                    }
                                                },
                                                "{column.header}"
                                                span { class: "sort-indicator", "{indicator}" }
                                            }
                                        }
                                    } else {
                                        rsx! {
                                            th { key: "{field}", "{column.header}" }
                                        }
                                    }
                                }
                            }
                            if row_actions.is_some() {
                                th { class: "text-right", "Actions" }
                            }
                        }
                    }
                    tbody {
                        {match body {
                            TableBody::Loading => rsx! {
                                for i in 0..props.skeleton_rows {
                                    tr { key: "skeleton-{i}", class: "skeleton-row",
                                        for j in 0..column_count {
                                            td { key: "{j}", div { class: "skeleton-bar" } }
                                        }
                                    }
                                }
                            },
                            TableBody::Error => rsx! {
                                tr { class: "message-row error-row",
                                    td { colspan: "{column_count}",
                                        span { {props.error.clone().unwrap_or_default()} }
                                        if let Some(retry) = props.on_retry {
                                            button {
                                                class: "btn btn-small btn-secondary",
                                                onclick: move |_| retry.call(()),
                                                "Retry"
                                            }
                                        }
                                    }
                                }
                            },
                            TableBody::Empty => rsx! {
                                tr { class: "message-row empty-row",
                                    td { colspan: "{column_count}", "{props.empty_message}" }
                                }
                            },
                            TableBody::Rows => rsx! {
                                for index in visible {
                                    {
                                        let row = props.data[index].clone();
                                        let clicked = row.clone();
                                        rsx! {
                                            tr {
                                                key: "{index}",
                                                class: if on_row_click.is_some() { "data-row clickable" } else { "data-row" },
                                                onclick: move |_| {
                                                    if let Some(handler) = on_row_click {
                                                        handler.call(clicked.clone());
                                                    }
                                                },
                                                for column in props.columns.iter() {
                                                    td { key: "{column.field}",
                                                        {render_cell(column, &row)}
                                                    }
                                                }
                                                if let Some(actions) = row_actions {
                                                    td {
                                                        class: "actions-cell text-right",
                                                        onclick: move |e| e.stop_propagation(),
                                                        {actions.call(row.clone())}
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            },
                        }}
                    }
                }
            }

            if props.pagination && body == TableBody::Rows {
                div { class: "pagination",
                    div { class: "pagination-size",
                        label { r#for: "rows-per-page", "Rows per page" }
                        select {
                            id: "rows-per-page",
                            value: "{per_page}",
                            onchange: move |e| {
                                if let Ok(n) = e.value().parse::<usize>() {
                                    page_size.set(PageSize::choose(rows_prop, n));
                                    cursor.set(PageCursor::new(len));
                                }
                            },
                            for option in ROWS_PER_PAGE_OPTIONS {
                                option { key: "{option}", value: "{option}", selected: option == per_page, "{option}" }
                            }
                        }
                    }
                    span { class: "pagination-label", "Page {page} of {total_pages}" }
                    div { class: "pagination-controls",
                        button {
                            class: "btn btn-small",
                            disabled: page <= 1,
                            onclick: move |_| cursor.set(PageCursor::goto(len, page - 1)),
                            "Previous"
                        }
                        for n in page_window(page, total_pages, 5) {
                            button {
                                key: "{n}",
                                class: if n == page { "btn btn-small btn-page active" } else { "btn btn-small btn-page" },
                                onclick: move |_| cursor.set(PageCursor::goto(len, n)),
                                "{n}"
                            }
                        }
                        button {
                            class: "btn btn-small",
                            disabled: page >= total_pages,
                            onclick: move |_| cursor.set(PageCursor::goto(len, page + 1)),
                            "Next"
                        }
                    }
                }
            }
        }
    }
}

fn render_cell<T: Record>(column: &Column<T>, row: &T) -> Element {
    match column.render {
        Some(render) => render(row),
        None => {
            let text = row.field(column.field).map(|v| v.to_string()).unwrap_or_default();
            rsx! { "{text}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_click_cycles_direction() {
        let sort = SortState::default().toggle("name");
        assert_eq!(sort.field.as_deref(), Some("name"));
        assert_eq!(sort.direction, SortDirection::Asc);

        let sort = sort.toggle("name");
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(sort.indicator("name"), "▼");
        assert_eq!(sort.indicator("status"), "");

        let sort = sort.toggle("status");
        assert_eq!(sort.field.as_deref(), Some("status"));
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn page_resets_when_data_length_changes() {
        let cursor = PageCursor::goto(42, 3);
        assert_eq!(cursor.page_for(42), 3);
        assert_eq!(cursor.page_for(41), 1);
        assert_eq!(PageCursor::goto(10, 0).page_for(10), 1);
    }

    #[test]
    fn page_size_follows_a_changed_prop() {
        let size = PageSize::new(10);
        assert_eq!(size.rows_for(10), 10);

        let picked = PageSize::choose(10, 25);
        assert_eq!(picked.rows_for(10), 25);
        assert_eq!(picked.rows_for(5), 5);
        assert_eq!(PageSize::new(0).rows_for(0), 1);
    }

    #[test]
    fn three_rows_fit_on_one_page() {
        assert_eq!(page_count(3, 10), 1);
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(100, 25), 4);
    }

    #[test]
    fn body_state_precedence() {
        assert_eq!(TableBody::resolve(true, true, true), TableBody::Loading);
        assert_eq!(TableBody::resolve(true, false, false), TableBody::Loading);
        assert_eq!(TableBody::resolve(false, true, true), TableBody::Error);
        assert_eq!(TableBody::resolve(false, false, true), TableBody::Empty);
        assert_eq!(TableBody::resolve(false, false, false), TableBody::Rows);
    }

    #[test]
    fn page_window_stays_in_range() {
        assert_eq!(page_window(1, 1, 5), vec![1]);
        assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(6, 10, 5), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(2, 3, 5), vec![1, 2, 3]);
    }
}
