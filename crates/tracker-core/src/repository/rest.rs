//! PostgREST client for the hosted store

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::Value;

use super::query::Query;
use super::traits::{RemoteStore, StoreResult};
use crate::config::{ConfigError, RemoteConfig};
use crate::domain::{Collection, RowId};
use crate::error::StoreError;

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

pub struct RestStore {
    client: Client,
    base: Url,
    anon_key: String,
    schema: String,
}

impl RestStore {
    pub fn new(config: &RemoteConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: Client::new(),
            base: config.base_url()?,
            anon_key: config.anon_key.clone(),
            schema: config.schema.clone(),
        })
    }

    /// `{base}/rest/v1/{table}` with the query's parameters
    pub fn table_url(&self, collection: Collection, query: &Query) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["rest", "v1", collection.as_str()]);
        }
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.to_params() {
                pairs.append_pair(&key, &value);
            }
        }
        url
    }

    fn row_url(&self, collection: Collection, id: RowId) -> Url {
        let mut url = self.table_url(collection, &Query::all());
        url.set_query(Some(&format!("id=eq.{}", id)));
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let profile_header = if method == Method::GET {
            "Accept-Profile"
        } else {
            "Content-Profile"
        };
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .header(profile_header, &self.schema)
    }

    async fn send(&self, builder: RequestBuilder) -> StoreResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => describe(body),
            Err(_) if !text.is_empty() => text,
            Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
        };
        log::warn!("store request failed with {}: {}", status.as_u16(), message);
        Err(StoreError::Remote {
            status: status.as_u16(),
            message,
        })
    }
}

fn describe(body: ErrorBody) -> String {
    let mut message = body.message.unwrap_or_else(|| "request failed".to_string());
    if let Some(code) = body.code {
        message = format!("{} [{}]", message, code);
    }
    if let Some(details) = body.details {
        message = format!("{} ({})", message, details);
    }
    if let Some(hint) = body.hint {
        message = format!("{}; hint: {}", message, hint);
    }
    message
}

#[async_trait(?Send)]
impl RemoteStore for RestStore {
    async fn select(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Value>> {
        let url = self.table_url(collection, query);
        let response = self.send(self.request(Method::GET, url)).await?;
        Ok(response.json::<Vec<Value>>().await?)
    }

    async fn insert(&self, collection: Collection, row: Value) -> StoreResult<Value> {
        let url = self.table_url(collection, &Query::all());
        let builder = self
            .request(Method::POST, url)
            .header("Prefer", "return=representation")
            .json(&row);
        let response = self.send(builder).await?;
        let mut rows = response.json::<Vec<Value>>().await?;
        if rows.is_empty() {
            return Err(StoreError::Decode(format!(
                "insert into {} returned no rows",
                collection
            )));
        }
        Ok(rows.swap_remove(0))
    }

    async fn update(&self, collection: Collection, id: RowId, patch: Value) -> StoreResult<()> {
        let url = self.row_url(collection, id);
        self.send(self.request(Method::PATCH, url).json(&patch)).await?;
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: RowId) -> StoreResult<()> {
        let url = self.row_url(collection, id);
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Topic;

    fn store() -> RestStore {
        RestStore::new(&RemoteConfig::new("https://demo.example.co", "anon-key")).unwrap()
    }

    #[test]
    fn test_table_url_carries_filters_and_order() {
        let url = store().table_url(Collection::Topics, &Query::for_record::<Topic>().eq("subject_id", 7));
        assert_eq!(
            url.as_str(),
            "https://demo.example.co/rest/v1/topics?select=*&subject_id=eq.7&order=created_at.desc"
        );
    }

    #[test]
    fn test_row_url_targets_single_id() {
        let url = store().row_url(Collection::Subjects, 12);
        assert_eq!(url.as_str(), "https://demo.example.co/rest/v1/subjects?id=eq.12");
    }

    #[test]
    fn test_error_body_description() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"message":"permission denied","code":"42501","details":null,"hint":null}"#,
        )
        .unwrap();
        assert_eq!(describe(body), "permission denied [42501]");
    }
}
