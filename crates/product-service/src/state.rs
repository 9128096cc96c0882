use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;

use crate::{authz::RoleCheckClient, config::AppConfig};

#[derive(Clone)]
pub struct AppState {
    pub authz: RoleCheckClient,
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(cfg: &AppConfig, db: DatabaseConnection) -> anyhow::Result<Arc<Self>> {
        let authz = RoleCheckClient::new(
            cfg.user_service_url.clone(),
            Duration::from_secs(cfg.user_service_timeout_secs),
        )?;

        Ok(Arc::new(Self { authz, db }))
    }

    pub fn with_authz(authz: RoleCheckClient, db: DatabaseConnection) -> Arc<Self> {
        Arc::new(Self { authz, db })
    }
}
