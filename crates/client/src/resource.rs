//! Generic CRUD access to one collection endpoint.

use std::marker::PhantomData;

use reqwest::Method;

use tradedesk_core::{Record, RecordId};

use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{decode_record, ApiClient};

/// List/create/update/delete for records of type `R` at one [`Endpoint`].
///
/// Create and update return `Ok(None)` when the backend answered with
/// something other than the stored record; callers re-fetch in that case.
pub struct ResourceService<R> {
    client: ApiClient,
    endpoint: Endpoint,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            endpoint: self.endpoint,
            _record: PhantomData,
        }
    }
}

impl<R: Record> ResourceService<R> {
    pub fn new(client: ApiClient, endpoint: Endpoint) -> Self {
        Self {
            client,
            endpoint,
            _record: PhantomData,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn list(&self, query: &[(&str, String)]) -> Result<Vec<R>, ApiError> {
        let records: Vec<R> = self
            .client
            .get_json(&self.endpoint, self.endpoint.collection_path(), None, query)
            .await?;
        tracing::info!("Fetched {} {} records", records.len(), R::KIND);
        Ok(records)
    }

    pub async fn create(&self, record: &R) -> Result<Option<R>, ApiError> {
        record.validate()?;
        let value = self
            .client
            .send_json(Method::POST, &self.endpoint, self.endpoint.path, None, record)
            .await?;
        tracing::info!("Created {}", R::KIND);
        Ok(decode_record(value))
    }

    pub async fn update(&self, id: &RecordId, record: &R) -> Result<Option<R>, ApiError> {
        record.validate()?;
        let value = self
            .client
            .send_json(
                Method::PUT,
                &self.endpoint,
                self.endpoint.path,
                Some(id.as_str()),
                record,
            )
            .await?;
        tracing::info!("Updated {} {}", R::KIND, id);
        Ok(decode_record(value))
    }

    pub async fn delete(&self, id: &RecordId) -> Result<(), ApiError> {
        self.client
            .delete(&self.endpoint, self.endpoint.path, Some(id.as_str()))
            .await?;
        tracing::info!("Deleted {} {}", R::KIND, id);
        Ok(())
    }
}
