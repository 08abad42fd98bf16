use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Table holding service requests in the record store
pub const TABLE: &str = "chamados";

/// A service request row exactly as the record store returned it.
///
/// The row is kept as a JSON object and serialized back unchanged, so column
/// types (timestamps with or without offset, nullable owners, extra columns)
/// are the store's business. The accessors only read the columns the API
/// itself cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chamado(pub Map<String, Value>);

impl Chamado {
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    pub fn titulo(&self) -> Option<&Value> {
        self.0.get("titulo")
    }

    pub fn descricao(&self) -> Option<&Value> {
        self.0.get("descricao")
    }

    /// Owner column as text; `None` when absent or not a string
    pub fn usuario_id(&self) -> Option<&str> {
        self.0.get("usuario_id").and_then(Value::as_str)
    }

    pub fn created_at(&self) -> Option<&str> {
        self.0.get("created_at").and_then(Value::as_str)
    }

    pub fn is_owned_by(&self, owner: Uuid) -> bool {
        self.usuario_id()
            .and_then(|id| Uuid::parse_str(id).ok())
            .map_or(false, |id| id == owner)
    }
}

impl From<Map<String, Value>> for Chamado {
    fn from(row: Map<String, Value>) -> Self {
        Chamado(row)
    }
}

/// Insert payload. Title and description are forwarded exactly as received;
/// an absent field is left out of the insert body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewChamado {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<Value>,
    pub usuario_id: Uuid,
}
