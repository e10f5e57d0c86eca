//! Generic typed collection accessor: record CRUD and paging.

use std::fmt;
use std::marker::PhantomData;

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::Result;
use crate::api::{collection_path, json_body};
use crate::client::Client;
use crate::types::encode_segment;

use super::models::{ListResult, RecordMeta};
use super::params::ListParams;

/// Page size used by [`Collection::full_list`] when none is given.
pub const FULL_LIST_BATCH: u32 = 500;

/// Typed accessor for one collection.
///
/// `T` is the caller's record shape; the accessor serializes it for writes and
/// deserializes it for reads without looking at its fields. Accessors are cheap
/// and share the session of the [`Client`] they came from.
pub struct Collection<T> {
    client: Client,
    name: String,
    base_path: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub(crate) fn new(client: Client, name: String) -> Self {
        let base_path = collection_path(&name);
        Self {
            client,
            name,
            base_path,
            _record: PhantomData,
        }
    }

    /// Returns the collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the client this accessor shares its session with.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Create a record; returns the server-assigned id and timestamps.
    #[instrument(skip(self, record), fields(collection = %self.name))]
    pub async fn create(&self, record: &T) -> Result<RecordMeta> {
        debug!("Creating record");
        let request = self
            .client
            .authorized(Method::POST, &self.records_path())
            .await?;
        let request = json_body(request, record)?;
        self.client.api().send_json("records.create", request).await
    }

    /// Update the record with the given id.
    #[instrument(skip(self, record), fields(collection = %self.name))]
    pub async fn update(&self, id: &str, record: &T) -> Result<()> {
        debug!("Updating record");
        let request = self
            .client
            .authorized(Method::PATCH, &self.record_path(id))
            .await?;
        let request = json_body(request, record)?;
        self.client.api().send_empty("records.update", request).await
    }

    /// Delete the record with the given id.
    #[instrument(skip(self), fields(collection = %self.name))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        debug!("Deleting record");
        let request = self
            .client
            .authorized(Method::DELETE, &self.record_path(id))
            .await?;
        self.client.api().send_empty("records.delete", request).await
    }

    /// Fetch one record by id.
    #[instrument(skip(self), fields(collection = %self.name))]
    pub async fn one(&self, id: &str) -> Result<T> {
        debug!("Getting record");
        let request = self
            .client
            .authorized(Method::GET, &self.record_path(id))
            .await?;
        self.client.api().send_json("records.one", request).await
    }

    /// Fetch one record by id, forwarding only `fields` and `expand` from `params`.
    #[instrument(skip(self), fields(collection = %self.name))]
    pub async fn one_with_params(&self, id: &str, params: &ListParams) -> Result<T> {
        debug!("Getting record with params");
        let request = self
            .client
            .authorized(Method::GET, &self.record_path(id))
            .await?
            .query(&params.projection());
        self.client.api().send_json("records.one", request).await
    }

    /// Fetch one page of records.
    #[instrument(skip(self), fields(collection = %self.name))]
    pub async fn list(&self, params: &ListParams) -> Result<ListResult<T>> {
        debug!("Listing records");
        self.fetch_page("records.list", params).await
    }

    /// Fetch every record matching `params`, page by page, in server order.
    ///
    /// Paging starts at page 1 with `params.per_page` (or [`FULL_LIST_BATCH`])
    /// items per page. It stops once the server-reported total has been
    /// collected, or at the first empty page or page shorter than the page size
    /// the server answered with.
    #[instrument(skip(self), fields(collection = %self.name))]
    pub async fn full_list(&self, params: &ListParams) -> Result<Vec<T>> {
        let per_page = params
            .per_page
            .filter(|&n| n > 0)
            .unwrap_or(FULL_LIST_BATCH);

        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let query = ListParams {
                page: Some(page),
                per_page: Some(per_page),
                ..params.clone()
            };
            let result = self.fetch_page("records.full_list", &query).await?;

            // The server may cap the page size below what was asked for.
            let page_size = if result.per_page > 0 {
                result.per_page
            } else {
                per_page
            };
            let fetched = result.items.len();
            items.extend(result.items);
            debug!(page, fetched, page_size, total = result.total_items, "Fetched page");

            let collected_all = result.total_items >= 0 && items.len() as i64 >= result.total_items;
            if collected_all || fetched == 0 || fetched < page_size as usize {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    async fn fetch_page(&self, operation: &'static str, params: &ListParams) -> Result<ListResult<T>> {
        let request = self
            .client
            .authorized(Method::GET, &self.records_path())
            .await?
            .query(params);
        self.client.api().send_json(operation, request).await
    }

    /// `/collections/{name}`
    pub(crate) fn base_path(&self) -> &str {
        &self.base_path
    }

    /// `/collections/{name}/records`
    pub(crate) fn records_path(&self) -> String {
        format!("{}/records", self.base_path)
    }

    /// `/collections/{name}/records/{id}`
    pub(crate) fn record_path(&self, id: &str) -> String {
        format!("{}/records/{}", self.base_path, encode_segment(id))
    }
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            name: self.name.clone(),
            base_path: self.base_path.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .field("client", &self.client)
            .finish()
    }
}
