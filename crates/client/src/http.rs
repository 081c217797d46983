//! Shared HTTP plumbing: URL resolution, auth headers, response decoding.

use std::sync::Arc;

use reqwest::{multipart::Form, Method, RequestBuilder, Response, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use tradedesk_auth::SessionContext;

use crate::config::ApiConfig;
use crate::endpoint::{Access, Backend, Endpoint};
use crate::error::ApiError;

/// Error body shape used by both backends (`{"message": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// HTTP client bound to the configured backends and one session.
///
/// Cheap to clone; clones share the connection pool and session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<ApiConfig>,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(config: ApiConfig, session: SessionContext) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            http,
            config: Arc::new(config),
            session,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Resolve `path` (and an optional trailing segment, percent-encoded)
    /// against the endpoint's backend root.
    pub fn url(&self, backend: Backend, path: &str, segment: Option<&str>) -> Result<Url, ApiError> {
        let root = match backend {
            Backend::Erp => &self.config.erp_url,
            Backend::Portal => &self.config.portal_url,
        };
        let raw = format!("{}/{}", root.trim_end_matches('/'), path.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
        if let Some(segment) = segment {
            url.path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(raw.clone()))?
                .push(segment);
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        endpoint: &Endpoint,
        path: &str,
        segment: Option<&str>,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.url(endpoint.backend, path, segment)?;
        let request_id = Uuid::now_v7();
        tracing::debug!(%method, %url, %request_id, "Sending request");

        let mut req = self
            .http
            .request(method, url)
            .header("x-request-id", request_id.to_string());

        if endpoint.access == Access::Bearer {
            let token = self.session.token().ok_or(ApiError::Unauthenticated)?;
            req = req.bearer_auth(token);
        }
        Ok(req)
    }

    async fn send(req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(Self::error_from(resp).await)
        }
    }

    async fn error_from(resp: Response) -> ApiError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .or_else(|| {
                let text = body.trim();
                (!text.is_empty() && !text.starts_with('<') && text.len() <= 200)
                    .then(|| text.to_string())
            });
        tracing::warn!("API request failed with status {}: {:?}", status, message);
        ApiError::Api { status, message }
    }

    /// Decode a body that may legitimately be empty (`null` then).
    async fn read_value(resp: Response) -> Result<serde_json::Value, ApiError> {
        let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        path: &str,
        segment: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut req = self.request(Method::GET, endpoint, path, segment)?;
        if !query.is_empty() {
            req = req.query(query);
        }
        let resp = Self::send(req).await?;
        resp.json::<T>().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Send a JSON body and return the raw JSON response.
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &Endpoint,
        path: &str,
        segment: Option<&str>,
        body: &B,
    ) -> Result<serde_json::Value, ApiError> {
        let req = self.request(method, endpoint, path, segment)?.json(body);
        let resp = Self::send(req).await?;
        Self::read_value(resp).await
    }

    /// Send a multipart form and return the raw JSON response.
    pub async fn send_multipart(
        &self,
        method: Method,
        endpoint: &Endpoint,
        path: &str,
        segment: Option<&str>,
        form: Form,
    ) -> Result<serde_json::Value, ApiError> {
        let req = self.request(method, endpoint, path, segment)?.multipart(form);
        let resp = Self::send(req).await?;
        Self::read_value(resp).await
    }

    pub async fn delete(
        &self,
        endpoint: &Endpoint,
        path: &str,
        segment: Option<&str>,
    ) -> Result<(), ApiError> {
        let req = self.request(Method::DELETE, endpoint, path, segment)?;
        Self::send(req).await.map(|_| ())
    }
}

impl core::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish()
    }
}

/// Interpret a mutation response as a record.
///
/// Accepts the record itself or a `{ "data": record }` envelope; anything
/// else yields `None` so the caller can re-fetch.
pub(crate) fn decode_record<R: DeserializeOwned>(value: serde_json::Value) -> Option<R> {
    let candidate = match value {
        serde_json::Value::Object(mut map) if map.contains_key("data") && !map.contains_key("_id") => {
            map.remove("data")?
        }
        other => other,
    };
    match serde_json::from_value::<R>(candidate) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::debug!("Mutation response is not a record: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> ApiClient {
        ApiClient::new(ApiConfig::default(), SessionContext::in_memory()).unwrap()
    }

    #[test]
    fn urls_join_root_path_and_encoded_segment() {
        let c = client();
        let url = c.url(Backend::Erp, "report/name", Some("Ali & Sons/Co")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://back-8.onrender.com/api/report/name/Ali%20&%20Sons%2FCo"
        );
        let url = c.url(Backend::Portal, "/orders", None).unwrap();
        assert_eq!(url.as_str(), "https://back-7-9sog.onrender.com/api/orders");
    }

    #[test]
    fn bearer_endpoints_need_a_session() {
        let c = client();
        let err = c
            .request(Method::GET, &crate::endpoints::ORDERS, "orders", None)
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
        assert!(c.request(Method::GET, &crate::endpoints::CLIENTS, "clients", None).is_ok());
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        #[serde(rename = "_id")]
        id: String,
    }

    #[test]
    fn decodes_bare_and_enveloped_records() {
        assert_eq!(decode_record::<Row>(json!({"_id": "a"})), Some(Row { id: "a".into() }));
        assert_eq!(
            decode_record::<Row>(json!({"message": "ok", "data": {"_id": "b"}})),
            Some(Row { id: "b".into() })
        );
        assert_eq!(decode_record::<Row>(json!({"message": "Created"})), None);
        assert_eq!(decode_record::<Row>(serde_json::Value::Null), None);
    }
}
