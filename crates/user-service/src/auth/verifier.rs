use sea_orm::DatabaseConnection;

use crate::db::user_repo;

use super::{
    BUILTIN_ADMIN_ID, JwtKeys, Role, TokenKind,
    token::{TokenError, decode_token},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Authorized,
    Denied,
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("Token expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
    #[error("User not found")]
    SubjectNotFound,
    #[error("Database error: {0}")]
    Db(#[from] sea_orm::DbErr),
}

impl From<TokenError> for VerifyError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => VerifyError::Expired,
            TokenError::Invalid => VerifyError::Invalid,
        }
    }
}

#[derive(Clone)]
pub struct RoleVerifier {
    db: DatabaseConnection,
    jwt: JwtKeys,
}

impl RoleVerifier {
    pub fn new(db: DatabaseConnection, jwt: JwtKeys) -> Self {
        Self { db, jwt }
    }

    /// Decides whether `token` satisfies `requested_role`.
    ///
    /// The built-in administrator (subject 0 with an `admin` role claim) gets
    /// special policy: an `admin` check always passes, a `user` check passes
    /// only for access tokens. Every other subject is resolved against the
    /// store and compared by plain string equality, with no role hierarchy
    /// and no token-kind check (that asymmetry is inherited behavior, pinned
    /// by tests).
    pub async fn verify(
        &self,
        token: &str,
        requested_role: &str,
    ) -> Result<Decision, VerifyError> {
        let claims = decode_token(&self.jwt, token)?;

        if claims.sub == BUILTIN_ADMIN_ID && claims.role.as_deref() == Some(Role::Admin.as_str()) {
            let authorized = match Role::try_from(requested_role) {
                Ok(Role::Admin) => true,
                Ok(Role::User) => claims.kind == TokenKind::Access,
                Err(()) => false,
            };
            return Ok(if authorized {
                Decision::Authorized
            } else {
                Decision::Denied
            });
        }

        let user = user_repo::find_by_id(&self.db, claims.sub)
            .await?
            .ok_or(VerifyError::SubjectNotFound)?;

        Ok(if user.role == requested_role {
            Decision::Authorized
        } else {
            Decision::Denied
        })
    }
}
