//! Reusable building blocks for the admin screens.

mod action_bar;
mod data_table;
mod form_field;
mod modal;
mod status_badge;
mod tabs;
mod toast;
mod toolbar;

pub use action_bar::ActionBar;
pub use data_table::{
    Column, DataTable, PageCursor, PageSize, ROWS_PER_PAGE_OPTIONS, SortState, TableBody, page_count, page_window,
};
pub use form_field::{FieldIds, FormField, InputKind, next_field_id};
pub use modal::Modal;
pub use status_badge::{StatusBadge, badge_style, title_case};
pub use tabs::Tabs;
pub use toolbar::{ConfirmDialog, FilterSelect, Pager, SearchInput};
pub use toast::{Toast, ToastKind, ToastViewport, Toasts, use_toast_provider, use_toasts};
