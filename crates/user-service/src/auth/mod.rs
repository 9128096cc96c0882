pub mod password;
pub mod service;
pub mod token;
pub mod verifier;

pub use service::{Authenticator, LoginTokens, TokenTtl};
pub use token::{JwtKeys, TokenClaims, TokenError, TokenKind};
pub use verifier::{Decision, RoleVerifier, VerifyError};

/// Subject id of the configuration-defined administrator. Never present in
/// the users table; handled by explicit branches in the authenticator and
/// the role verifier.
pub const BUILTIN_ADMIN_ID: i64 = 0;

/// Role names only cross the wire as plain strings (the `role` claim and the
/// stored column), so this enum stays off serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}
