use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    auth::{Authenticator, JwtKeys, RoleVerifier, TokenTtl},
    config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub authenticator: Authenticator,
    pub verifier: RoleVerifier,
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(cfg: &AppConfig, db: DatabaseConnection) -> Arc<Self> {
        let jwt = JwtKeys::from_secret(cfg.jwt_secret.as_bytes());
        let ttl = TokenTtl::new(cfg.access_ttl_minutes, cfg.refresh_ttl_days);

        Arc::new(Self {
            authenticator: Authenticator::new(db.clone(), jwt.clone(), ttl, cfg.admin.clone()),
            verifier: RoleVerifier::new(db.clone(), jwt),
            db,
        })
    }
}
