use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use uuid::Uuid;

use super::{read_json, BackendError, SupabaseClient};
use crate::models::chamado::TABLE;
use crate::models::{Chamado, NewChamado};

/// Record store operations on the chamados collection
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one record and return it as stored
    async fn insert(&self, new: NewChamado) -> Result<Chamado, BackendError>;

    /// Records owned by `owner`, newest first
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Chamado>, BackendError>;

    /// Every record regardless of owner, newest first
    async fn list_all(&self) -> Result<Vec<Chamado>, BackendError>;

    /// Delete the record `id` only if it belongs to `owner`.
    /// Returns the number of rows removed.
    async fn delete_owned(&self, id: &str, owner: Uuid) -> Result<usize, BackendError>;
}

/// PostgREST client (`/rest/v1/chamados`)
#[derive(Debug, Clone)]
pub struct SupabaseRecords {
    client: SupabaseClient,
}

impl SupabaseRecords {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn table_url(&self) -> Result<url::Url, BackendError> {
        self.client.endpoint(&format!("rest/v1/{}", TABLE))
    }

    async fn select(&self, owner: Option<Uuid>) -> Result<Vec<Chamado>, BackendError> {
        let mut url = self.table_url()?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("select", "*");
            if let Some(owner) = owner {
                query.append_pair("usuario_id", &format!("eq.{}", owner));
            }
            query.append_pair("order", "created_at.desc");
        }

        let response = self.client.request(Method::GET, url).send().await?;
        decode_rows(read_json(response).await?)
    }
}

#[async_trait]
impl RecordStore for SupabaseRecords {
    async fn insert(&self, new: NewChamado) -> Result<Chamado, BackendError> {
        let url = self.table_url()?;

        let response = self
            .client
            .request(Method::POST, url)
            .header("Prefer", "return=representation")
            .json(&[&new])
            .send()
            .await?;

        decode_rows(read_json(response).await?)?
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::InvalidResponse("insert returned no rows".to_string()))
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Chamado>, BackendError> {
        self.select(Some(owner)).await
    }

    async fn list_all(&self) -> Result<Vec<Chamado>, BackendError> {
        self.select(None).await
    }

    async fn delete_owned(&self, id: &str, owner: Uuid) -> Result<usize, BackendError> {
        let mut url = self.table_url()?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{}", id))
            .append_pair("usuario_id", &format!("eq.{}", owner));

        let response = self
            .client
            .request(Method::DELETE, url)
            .header("Prefer", "return=representation")
            .send()
            .await?;

        match read_json(response).await? {
            Value::Array(rows) => Ok(rows.len()),
            Value::Null => Ok(0),
            other => Err(BackendError::InvalidResponse(format!(
                "expected deleted rows, got {}",
                other
            ))),
        }
    }
}

fn decode_rows(payload: Value) -> Result<Vec<Chamado>, BackendError> {
    serde_json::from_value(payload).map_err(|e| BackendError::InvalidResponse(e.to_string()))
}
