use std::sync::Arc;

use crate::auth::PrivilegePolicy;
use crate::backend::{
    BackendError, IdentityGateway, RecordStore, SupabaseClient, SupabaseIdentity, SupabaseRecords,
};
use crate::config::AppConfig;

/// Process-wide state shared by every request. Built once at startup and
/// never mutated.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityGateway>,
    pub records: Arc<dyn RecordStore>,
    pub privileges: Arc<PrivilegePolicy>,
    pub strict_validation: bool,
}

impl AppState {
    pub fn new(
        identity: Arc<dyn IdentityGateway>,
        records: Arc<dyn RecordStore>,
        privileges: PrivilegePolicy,
    ) -> Self {
        Self {
            identity,
            records,
            privileges: Arc::new(privileges),
            strict_validation: false,
        }
    }

    pub fn with_strict_validation(mut self, enabled: bool) -> Self {
        self.strict_validation = enabled;
        self
    }

    /// Wire the Supabase clients; both share one connection pool
    pub fn from_config(config: &AppConfig) -> Result<Self, BackendError> {
        let client = SupabaseClient::new(&config.backend)?;

        Ok(Self::new(
            Arc::new(SupabaseIdentity::new(client.clone())),
            Arc::new(SupabaseRecords::new(client)),
            PrivilegePolicy::from_config(&config.security),
        )
        .with_strict_validation(config.api.strict_validation))
    }
}
