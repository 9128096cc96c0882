use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct JwtKeys {
    pub enc: EncodingKey,
    pub dec: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            enc: EncodingKey::from_secret(secret),
            dec: DecodingKey::from_secret(secret),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Signed claim set. `role` is present only on tokens issued for the
/// built-in administrator; ordinary user tokens omit it and verification
/// falls back to a store lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: i64,
    pub iat: usize,
    pub exp: usize,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
}

pub fn now_unix() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

pub fn make_claims(sub: i64, kind: TokenKind, ttl_secs: usize, role: Option<String>) -> TokenClaims {
    let iat = now_unix();
    TokenClaims {
        sub,
        iat,
        exp: iat + ttl_secs,
        kind,
        role,
    }
}

pub fn encode_token(
    keys: &JwtKeys,
    claims: &TokenClaims,
) -> Result<String, jsonwebtoken::errors::Error> {
    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".into());
    encode(&header, claims, &keys.enc)
}

/// Pure decode; the only failure kinds are `Expired` and `Invalid`.
pub fn decode_token(keys: &JwtKeys, token: &str) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    match decode::<TokenClaims>(token, &keys.dec, &validation) {
        Ok(data) => Ok(data.claims),
        Err(err) => match err.kind() {
            ErrorKind::ExpiredSignature => Err(TokenError::Expired),
            _ => Err(TokenError::Invalid),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{
        JwtKeys, TokenClaims, TokenError, TokenKind, decode_token, encode_token, make_claims,
        now_unix,
    };

    fn keys() -> JwtKeys {
        JwtKeys::from_secret(b"unit-test-secret")
    }

    #[test]
    fn makes_claims_with_expected_subject_kind_and_ttl() {
        let claims = make_claims(42, TokenKind::Access, 900, None);

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.exp.saturating_sub(claims.iat), 900);
        assert!(claims.role.is_none());
    }

    #[test]
    fn encodes_token_that_decodes_with_same_secret() {
        let claims = make_claims(7, TokenKind::Refresh, 600, Some("admin".to_string()));
        let token = encode_token(&keys(), &claims).expect("token should encode");

        let decoded = decode_token(&keys(), &token).expect("token should decode");

        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.iat, claims.iat);
        assert_eq!(decoded.exp, claims.exp);
        assert_eq!(decoded.kind, TokenKind::Refresh);
        assert_eq!(decoded.role.as_deref(), Some("admin"));
    }

    #[test]
    fn role_claim_is_omitted_when_absent() {
        let claims = make_claims(7, TokenKind::Access, 600, None);
        let value = serde_json::to_value(&claims).expect("claims should serialize");

        assert!(value.get("role").is_none());
        assert_eq!(value["type"], "access");
    }

    #[test]
    fn expired_token_decodes_to_expired() {
        let now = now_unix();
        let claims = TokenClaims {
            sub: 7,
            iat: now - 120,
            exp: now - 60,
            kind: TokenKind::Access,
            role: None,
        };
        let token = encode_token(&keys(), &claims).expect("token should encode");

        assert_eq!(decode_token(&keys(), &token), Err(TokenError::Expired));
    }

    #[test]
    fn tampered_signature_decodes_to_invalid() {
        let claims = make_claims(7, TokenKind::Access, 600, None);
        let mut token = encode_token(&keys(), &claims).expect("token should encode");

        // Flip one byte of the signature segment.
        let last = token.pop().expect("token should not be empty");
        token.push(if last == 'A' { 'B' } else { 'A' });

        assert_eq!(decode_token(&keys(), &token), Err(TokenError::Invalid));
    }

    #[test]
    fn token_signed_with_different_secret_is_invalid() {
        let claims = make_claims(7, TokenKind::Access, 600, None);
        let token =
            encode_token(&JwtKeys::from_secret(b"other-secret"), &claims).expect("should encode");

        assert_eq!(decode_token(&keys(), &token), Err(TokenError::Invalid));
    }

    #[test]
    fn malformed_token_is_invalid() {
        assert_eq!(decode_token(&keys(), "not-a-jwt"), Err(TokenError::Invalid));
    }
}
