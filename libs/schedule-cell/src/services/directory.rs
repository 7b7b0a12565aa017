use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, error};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::error::ScheduleError;

/// Read-only view of which dentists are currently practising.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DentistDirectory: Send + Sync {
    async fn active_dentists(&self) -> Result<Vec<Uuid>, ScheduleError>;
}

#[derive(Debug, Deserialize)]
struct DentistRow {
    id: Uuid,
}

pub struct SupabaseDentistDirectory {
    supabase: SupabaseClient,
}

impl SupabaseDentistDirectory {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

#[async_trait]
impl DentistDirectory for SupabaseDentistDirectory {
    async fn active_dentists(&self) -> Result<Vec<Uuid>, ScheduleError> {
        let rows: Vec<DentistRow> = self.supabase
            .request(Method::GET, "/rest/v1/dentists?is_active=eq.true&select=id", None)
            .await
            .map_err(|e| {
                error!("Failed to load active dentists: {}", e);
                ScheduleError::DirectoryError(e.to_string())
            })?;

        debug!("Loaded {} active dentists", rows.len());
        Ok(rows.into_iter().map(|row| row.id).collect())
    }
}

/// Fixed dentist list, for tests and local development.
pub struct StaticDentistDirectory {
    dentists: Vec<Uuid>,
}

impl StaticDentistDirectory {
    pub fn new(dentists: Vec<Uuid>) -> Self {
        Self { dentists }
    }
}

#[async_trait]
impl DentistDirectory for StaticDentistDirectory {
    async fn active_dentists(&self) -> Result<Vec<Uuid>, ScheduleError> {
        Ok(self.dentists.clone())
    }
}
