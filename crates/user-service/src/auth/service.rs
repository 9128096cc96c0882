use sea_orm::DatabaseConnection;

use crate::{config::AdminCredentials, db::user_repo, error::AppError};

use super::{
    BUILTIN_ADMIN_ID, JwtKeys, Role, TokenKind,
    password::{hash_password, verify_password},
    token::{encode_token, make_claims},
};

/// Token lifetimes in seconds, fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct TokenTtl {
    pub access_secs: usize,
    pub refresh_secs: usize,
}

impl TokenTtl {
    pub fn new(access_minutes: u64, refresh_days: u64) -> Self {
        Self {
            access_secs: (access_minutes * 60) as usize,
            refresh_secs: (refresh_days * 24 * 60 * 60) as usize,
        }
    }
}

#[derive(Debug)]
pub struct LoginTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: i64,
}

#[derive(Clone)]
pub struct Authenticator {
    db: DatabaseConnection,
    jwt: JwtKeys,
    ttl: TokenTtl,
    admin: AdminCredentials,
}

impl Authenticator {
    pub fn new(
        db: DatabaseConnection,
        jwt: JwtKeys,
        ttl: TokenTtl,
        admin: AdminCredentials,
    ) -> Self {
        Self {
            db,
            jwt,
            ttl,
            admin,
        }
    }

    /// Issues an access/refresh pair. The built-in administrator is matched
    /// by exact string comparison before any store lookup and short-circuits
    /// it; only its tokens carry an explicit `role` claim.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginTokens, AppError> {
        if username == self.admin.username && password == self.admin.password {
            return self.issue(BUILTIN_ADMIN_ID, Some(Role::Admin.as_str().to_string()));
        }

        let user = user_repo::find_by_username(&self.db, username)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        if !verify_password(password, &user.password_hash) {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        self.issue(user.id, None)
    }

    /// Creates an identity record with role `"user"`. Check order is an
    /// invariant: reserved username, then duplicate username, then duplicate
    /// email.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<i64, AppError> {
        if username == self.admin.username {
            return Err(AppError::bad_request("Cannot register with reserved username"));
        }

        if user_repo::find_by_username(&self.db, username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Username already exists"));
        }

        if user_repo::find_by_email(&self.db, email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let password_hash = hash_password(password)?;
        let user =
            user_repo::create_user(&self.db, username, email, &password_hash, Role::User.as_str())
                .await?;

        tracing::info!(user_id = user.id, "registered user {}", user.username);
        Ok(user.id)
    }

    fn issue(&self, sub: i64, role: Option<String>) -> Result<LoginTokens, AppError> {
        let access = make_claims(sub, TokenKind::Access, self.ttl.access_secs, role.clone());
        let refresh = make_claims(sub, TokenKind::Refresh, self.ttl.refresh_secs, role);

        let access_token = encode_token(&self.jwt, &access)
            .map_err(|err| AppError::internal(format!("Token encoding failed: {err}")))?;
        let refresh_token = encode_token(&self.jwt, &refresh)
            .map_err(|err| AppError::internal(format!("Token encoding failed: {err}")))?;

        Ok(LoginTokens {
            access_token,
            refresh_token,
            user_id: sub,
        })
    }
}
