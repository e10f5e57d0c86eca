//! Query parameters for list and read operations.

use serde::Serialize;

/// Paging, sorting, filtering and projection options.
///
/// Unset fields are left out of the query string so the server defaults apply.
///
/// # Example
///
/// ```
/// use pocketbase::ListParams;
///
/// let params = ListParams::new()
///     .per_page(50)
///     .sort("-created")
///     .filter("published = true");
/// assert_eq!(params.per_page, Some(50));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Sort expression, e.g. `-created,title`.
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Filter expression, e.g. `status = "active"`.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Relations to expand, comma separated.
    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    /// Fields to return, comma separated.
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Only the projection options; used for single record reads.
    pub(crate) fn projection(&self) -> Self {
        Self {
            expand: self.expand.clone(),
            fields: self.fields.clone(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_are_skipped() {
        let json = serde_json::to_value(ListParams::new()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn uses_server_parameter_names() {
        let params = ListParams::new()
            .page(2)
            .per_page(30)
            .sort("-created")
            .filter("a = 1");
        let json = serde_json::to_value(params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"page": 2, "perPage": 30, "sort": "-created", "filter": "a = 1"})
        );
    }

    #[test]
    fn projection_keeps_only_fields_and_expand() {
        let params = ListParams::new()
            .page(3)
            .sort("title")
            .expand("author")
            .fields("id,title");
        assert_eq!(
            params.projection(),
            ListParams::new().expand("author").fields("id,title")
        );
    }
}
