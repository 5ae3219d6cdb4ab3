//! Data hooks wrapping the server functions.

use std::future::Future;

use dioxus::prelude::*;
use school_core::{ApiError, ApiResult, ListParams, PageMeta, Paginated, SortDirection};

use crate::components::SortState;

/// Collapse a transport failure into the admin API's error envelope.
pub fn settle<T>(result: Result<ApiResult<T>, ServerFnError>) -> ApiResult<T> {
    result.unwrap_or_else(|e| Err(ApiError::internal(e.to_string())))
}

/// A list endpoint bound to reactive query parameters.
///
/// Changing the parameters re-runs the request; `refresh` re-runs it with
/// the same parameters after a mutation.
pub struct ListQuery<T: 'static> {
    params: Signal<ListParams>,
    resource: Resource<ApiResult<Paginated<T>>>,
}

impl<T: 'static> Clone for ListQuery<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for ListQuery<T> {}

impl<T: Clone + 'static> ListQuery<T> {
    pub fn params(&self) -> ListParams {
        self.params.read().clone()
    }

    pub fn loading(&self) -> bool {
        !self.resource.finished()
    }

    pub fn items(&self) -> Vec<T> {
        match &*self.resource.read() {
            Some(Ok(page)) => page.items.clone(),
            _ => Vec::new(),
        }
    }

    pub fn meta(&self) -> Option<PageMeta> {
        match &*self.resource.read() {
            Some(Ok(page)) => Some(page.meta.clone()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<String> {
        match &*self.resource.read() {
            Some(Err(err)) => Some(err.error.clone()),
            _ => None,
        }
    }

    pub fn refresh(&self) {
        let mut resource = self.resource;
        resource.restart();
    }

    /// New search term; goes back to the first page.
    pub fn set_search(&self, term: String) {
        let mut params = self.params;
        let mut p = params.write();
        p.search = (!term.trim().is_empty()).then_some(term);
        p.page = None;
    }

    /// New filter value (`all` clears it); goes back to the first page.
    pub fn set_filter(&self, field: &str, value: String) {
        let mut params = self.params;
        let mut p = params.write();
        p.filters.insert(field.to_string(), value);
        p.page = None;
    }

    pub fn set_page(&self, page: usize) {
        let mut params = self.params;
        params.write().page = Some(page.max(1));
    }

    pub fn set_limit(&self, limit: usize) {
        let mut params = self.params;
        let mut p = params.write();
        p.limit = Some(limit.max(1));
        p.page = None;
    }

    pub fn set_sort(&self, sort: SortState) {
        let mut params = self.params;
        let mut p = params.write();
        p.sort_field = sort.field;
        p.sort_direction = sort.direction;
    }
}

/// Last page to fall back to when an empty page came back past the end,
/// as after deleting the only row of the last page.
pub fn page_past_end(meta: &PageMeta, returned: usize) -> Option<usize> {
    let last = meta.total_pages.max(1);
    (returned == 0 && meta.has_prev_page && meta.current_page > last).then_some(last)
}

/// Run a list endpoint with reactive parameters.
pub fn use_list_query<T, F, Fut>(initial: ListParams, fetch: F) -> ListQuery<T>
where
    T: Clone + 'static,
    F: Fn(ListParams) -> Fut + 'static,
    Fut: Future<Output = Result<ApiResult<Paginated<T>>, ServerFnError>> + 'static,
{
    let mut params = use_signal(|| initial);
    let resource = use_resource(move || {
        let request = fetch(params());
        async move { settle(request.await) }
    });
    use_effect(move || {
        let last = match &*resource.read() {
            Some(Ok(page)) => page_past_end(&page.meta, page.items.len()),
            _ => None,
        };
        if let Some(last) = last {
            params.write().page = Some(last);
        }
    });
    ListQuery { params, resource }
}

/// Everything of one kind, for select options; small tables only.
pub fn all_rows() -> ListParams {
    ListParams::new().with_limit(1000).sorted_by("name", SortDirection::Asc)
}

/// `(id, name)` options for every school.
pub fn use_school_options() -> Memo<Vec<(String, String)>> {
    let schools = use_resource(|| async move { settle(api::get_schools(all_rows()).await) });
    use_memo(move || match &*schools.read() {
        Some(Ok(page)) => page
            .items
            .iter()
            .map(|s| (s.id.to_string(), s.name.clone()))
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_past_the_end_falls_back_to_the_last_page() {
        assert_eq!(page_past_end(&PageMeta::new(3, 10, 20), 0), Some(2));
        assert_eq!(page_past_end(&PageMeta::new(2, 10, 0), 0), Some(1));
        assert_eq!(page_past_end(&PageMeta::new(2, 10, 20), 10), None);
        assert_eq!(page_past_end(&PageMeta::new(1, 10, 0), 0), None);
    }

    #[test]
    fn transport_errors_become_500s() {
        let ok: Result<ApiResult<u8>, ServerFnError> = Ok(Ok(7));
        assert_eq!(settle(ok), Ok(7));

        let rejected: Result<ApiResult<u8>, ServerFnError> = Ok(Err(ApiError::bad_request("Name is required")));
        assert_eq!(settle(rejected).map_err(|e| e.status), Err(400));

        let failed: Result<ApiResult<u8>, ServerFnError> = Err(ServerFnError::new("connection reset"));
        let err = settle(failed).err();
        assert_eq!(err.as_ref().map(|e| e.status), Some(500));
        assert!(err.is_some_and(|e| e.error.contains("connection reset")));
    }
}
