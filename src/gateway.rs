//! HTTP List Gateway
//!
//! `RemoteListGateway` over the REST API:
//! - `GET  {base}/items?search=|min=&max=&offset=`
//! - `GET  {base}/state`
//! - `POST {base}/state` with a partial state body

use async_trait::async_trait;
use list_sync::{Filter, Page, PersistedSnapshot, RemoteListGateway, Result, StatePatch, SyncError};

/// Path appended to the page origin when no base URL is configured
const API_PATH: &str = "/api";

pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// API served by the same origin as the page
    pub fn same_origin() -> Self {
        let origin = web_sys::window()
            .and_then(|win| win.location().origin().ok())
            .unwrap_or_default();
        Self::new(format!("{}{}", origin, API_PATH))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn fetch_error(err: reqwest::Error) -> SyncError {
    SyncError::Fetch(err.to_string())
}

fn decode_error(err: reqwest::Error) -> SyncError {
    SyncError::Decode(err.to_string())
}

#[async_trait(?Send)]
impl RemoteListGateway for HttpGateway {
    async fn fetch_items(&self, filter: &Filter, offset: usize) -> Result<Page> {
        let response = self
            .client
            .get(self.url("items"))
            .query(&filter.query_params(offset))
            .send()
            .await
            .map_err(fetch_error)?
            .error_for_status()
            .map_err(fetch_error)?;
        response.json::<Page>().await.map_err(decode_error)
    }

    async fn fetch_state(&self) -> Result<Option<PersistedSnapshot>> {
        let response = self
            .client
            .get(self.url("state"))
            .send()
            .await
            .map_err(fetch_error)?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status().map_err(fetch_error)?;
        response
            .json::<Option<PersistedSnapshot>>()
            .await
            .map_err(decode_error)
    }

    async fn persist_state(&self, patch: &StatePatch) -> Result<()> {
        self.client
            .post(self.url("state"))
            .json(patch)
            .send()
            .await
            .map_err(|err| SyncError::Persist(err.to_string()))?
            .error_for_status()
            .map_err(|err| SyncError::Persist(err.to_string()))?;
        Ok(())
    }
}
