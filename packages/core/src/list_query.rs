//! Search, filter, sort and paginate over in-memory record collections.
//!
//! The pipeline always runs in the same order: exact-match filters, then
//! free-text search, then a stable sort, then pagination.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::envelope::{PageMeta, Paginated};
use crate::record::{Record, compare_fields};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// Filter value meaning "do not filter on this field".
pub const ALL_SENTINEL: &str = "all";

/// Sort direction for a single-field sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Parameters for a list query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Free-text search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Exact-match filters keyed by field name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    pub sort_direction: SortDirection,
    /// 1-indexed page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    pub fn sorted_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = Some(field.into());
        self.sort_direction = direction;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Effective filter value for a field, ignoring the `all` sentinel.
    pub fn filter(&self, field: &str) -> Option<&str> {
        self.filters
            .get(field)
            .map(String::as_str)
            .filter(|v| is_active_filter(v))
    }

    pub fn page_or_default(&self) -> usize {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    pub fn limit_or_default(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT).max(1)
    }
}

fn is_active_filter(value: &str) -> bool {
    !value.is_empty() && value != ALL_SENTINEL
}

/// Keep records whose fields equal every active filter value.
pub fn apply_filters<T: Record>(mut items: Vec<T>, filters: &BTreeMap<String, String>) -> Vec<T> {
    let active: Vec<(&String, &String)> =
        filters.iter().filter(|(_, v)| is_active_filter(v)).collect();
    if active.is_empty() {
        return items;
    }

    items.retain(|item| {
        active.iter().all(|(field, expected)| {
            item.field(field)
                .is_some_and(|value| value.to_string() == **expected)
        })
    });
    items
}

/// Keep records where any of `fields` contains `term`, ignoring case.
///
/// A blank term keeps everything.
pub fn filter_by_search_term<T: Record>(mut items: Vec<T>, term: &str, fields: &[&str]) -> Vec<T> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return items;
    }

    items.retain(|item| {
        fields.iter().any(|field| {
            item.field(field)
                .is_some_and(|value| value.to_string().to_lowercase().contains(&needle))
        })
    });
    items
}

/// Stable permutation of indices ordering `items` by `field`.
pub fn sort_order<T: Record>(items: &[T], field: &str, direction: SortDirection) -> Vec<usize> {
    let keys: Vec<_> = items.iter().map(|item| item.field(field)).collect();
    let mut order: Vec<usize> = (0..items.len()).collect();

    order.sort_by(|&a, &b| {
        let ord = compare_fields(keys[a].as_ref(), keys[b].as_ref());
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    order
}

/// Sort records by one field. Without a field the original order is kept.
pub fn sort_items<T: Record>(items: Vec<T>, field: Option<&str>, direction: SortDirection) -> Vec<T> {
    let Some(field) = field else {
        return items;
    };

    let order = sort_order(&items, field, direction);
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

/// Slice one page out of `items`.
pub fn paginate_items<T>(items: Vec<T>, page: usize, limit: usize) -> Paginated<T> {
    let meta = PageMeta::new(page, limit, items.len());
    let start = (meta.current_page - 1).saturating_mul(meta.per_page);

    let items = items
        .into_iter()
        .skip(start)
        .take(meta.per_page)
        .collect();

    Paginated { items, meta }
}

/// Run the full pipeline: filters, search, sort, paginate.
pub fn run_list_query<T: Record>(items: Vec<T>, params: &ListParams, search_fields: &[&str]) -> Paginated<T> {
    let items = apply_filters(items, &params.filters);
    let items = match params.search.as_deref() {
        Some(term) => filter_by_search_term(items, term, search_fields),
        None => items,
    };
    let items = sort_items(items, params.sort_field.as_deref(), params.sort_direction);
    paginate_items(items, params.page_or_default(), params.limit_or_default())
}

/// Compare two records by a field, for callers that sort themselves.
pub fn compare_by<T: Record>(a: &T, b: &T, field: &str) -> Ordering {
    compare_fields(a.field(field).as_ref(), b.field(field).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        name: &'static str,
        city: &'static str,
        status: &'static str,
        score: Option<f64>,
    }

    impl Record for Row {
        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "id" => Some(self.id.into()),
                "name" => Some(self.name.into()),
                "city" => Some(self.city.into()),
                "status" => Some(self.status.into()),
                "score" => self.score.map(FieldValue::from),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, name: "Maple Leaf Academy", city: "Toronto", status: "active", score: Some(7.5) },
            Row { id: 2, name: "Riverside High", city: "Ottawa", status: "pending", score: Some(3.0) },
            Row { id: 3, name: "Hillcrest School", city: "Toronto", status: "active", score: None },
            Row { id: 4, name: "Oakridge Primary", city: "Calgary", status: "suspended", score: Some(9.25) },
            Row { id: 5, name: "Lakeview College", city: "Riverton", status: "active", score: Some(1.0) },
        ]
    }

    fn ids(items: &[Row]) -> Vec<u32> {
        items.iter().map(|r| r.id).collect()
    }

    #[test]
    fn search_matches_any_field_case_insensitively() {
        let found = filter_by_search_term(rows(), "RIVER", &["name", "city"]);
        assert_eq!(ids(&found), vec![2, 5]);

        let none = filter_by_search_term(rows(), "zzz", &["name", "city"]);
        assert!(none.is_empty());
    }

    #[test]
    fn blank_search_keeps_everything() {
        assert_eq!(filter_by_search_term(rows(), "   ", &["name"]).len(), 5);
    }

    #[test]
    fn search_is_idempotent() {
        let once = filter_by_search_term(rows(), "to", &["name", "city"]);
        let twice = filter_by_search_term(once.clone(), "to", &["name", "city"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn exact_filters_ignore_all_sentinel() {
        let mut filters = BTreeMap::new();
        filters.insert("status".to_string(), "active".to_string());
        assert_eq!(ids(&apply_filters(rows(), &filters)), vec![1, 3, 5]);

        filters.insert("status".to_string(), ALL_SENTINEL.to_string());
        assert_eq!(apply_filters(rows(), &filters).len(), 5);
    }

    #[test]
    fn exact_filters_do_not_match_substrings() {
        let mut filters = BTreeMap::new();
        filters.insert("status".to_string(), "activ".to_string());
        assert!(apply_filters(rows(), &filters).is_empty());
    }

    #[test]
    fn sort_is_a_permutation_in_field_order() {
        let sorted = sort_items(rows(), Some("name"), SortDirection::Asc);
        assert_eq!(sorted.len(), 5);
        assert_eq!(ids(&sorted), vec![3, 5, 1, 4, 2]);
    }

    #[test]
    fn descending_is_reversed_ascending_for_distinct_keys() {
        let mut asc = sort_items(rows(), Some("city"), SortDirection::Asc);
        // Two rows share "Toronto"; restrict to distinct keys for the property.
        asc.retain(|r| r.city != "Toronto");
        let mut desc = sort_items(rows(), Some("city"), SortDirection::Desc);
        desc.retain(|r| r.city != "Toronto");

        asc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let sorted = sort_items(rows(), Some("city"), SortDirection::Asc);
        let toronto: Vec<u32> = sorted.iter().filter(|r| r.city == "Toronto").map(|r| r.id).collect();
        assert_eq!(toronto, vec![1, 3]);

        let sorted = sort_items(rows(), Some("city"), SortDirection::Desc);
        let toronto: Vec<u32> = sorted.iter().filter(|r| r.city == "Toronto").map(|r| r.id).collect();
        assert_eq!(toronto, vec![1, 3]);
    }

    #[test]
    fn missing_values_sort_first() {
        let sorted = sort_items(rows(), Some("score"), SortDirection::Asc);
        assert_eq!(ids(&sorted), vec![3, 5, 2, 1, 4]);
    }

    #[test]
    fn no_sort_field_keeps_insertion_order() {
        let sorted = sort_items(rows(), None, SortDirection::Desc);
        assert_eq!(ids(&sorted), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn pages_cover_every_item_exactly_once() {
        for limit in 1..=6 {
            let first = paginate_items(rows(), 1, limit);
            let mut seen = Vec::new();
            for page in 1..=first.meta.total_pages {
                let chunk = paginate_items(rows(), page, limit);
                assert!(chunk.items.len() <= limit);
                seen.extend(ids(&chunk.items));
            }
            assert_eq!(seen, vec![1, 2, 3, 4, 5], "limit {limit}");
        }
    }

    #[test]
    fn page_meta_flags() {
        let page = paginate_items(rows(), 2, 2);
        assert_eq!(ids(&page.items), vec![3, 4]);
        assert_eq!(page.meta.total_items, 5);
        assert_eq!(page.meta.total_pages, 3);
        assert!(page.meta.has_next_page);
        assert!(page.meta.has_prev_page);

        let last = paginate_items(rows(), 3, 2);
        assert!(!last.meta.has_next_page);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = paginate_items(rows(), 9, 2);
        assert!(page.items.is_empty());
        assert_eq!(page.meta.total_items, 5);
        assert!(!page.meta.has_next_page);
    }

    #[test]
    fn zero_page_and_limit_are_clamped() {
        let page = paginate_items(rows(), 0, 0);
        assert_eq!(page.meta.current_page, 1);
        assert_eq!(page.meta.per_page, 1);
        assert_eq!(ids(&page.items), vec![1]);
    }

    #[test]
    fn empty_collection_has_no_pages() {
        let page = paginate_items(Vec::<Row>::new(), 1, 10);
        assert_eq!(page.meta.total_pages, 0);
        assert!(!page.meta.has_next_page);
        assert!(!page.meta.has_prev_page);
    }

    #[test]
    fn full_pipeline_filters_before_searching() {
        let params = ListParams::new()
            .with_filter("status", "active")
            .with_search("toronto")
            .sorted_by("name", SortDirection::Desc)
            .with_limit(10);

        let page = run_list_query(rows(), &params, &["name", "city"]);
        assert_eq!(ids(&page.items), vec![1, 3]);
        assert_eq!(page.meta.total_items, 2);
    }

    #[test]
    fn params_round_trip_through_json_with_defaults() {
        let params: ListParams = serde_json::from_str(r#"{"search":"x"}"#).unwrap();
        assert_eq!(params.page_or_default(), 1);
        assert_eq!(params.limit_or_default(), DEFAULT_LIMIT);
        assert_eq!(params.sort_direction, SortDirection::Asc);
    }
}
