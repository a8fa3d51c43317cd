use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{config::JwtConfig, error::ApiError, state::AppState};

/// Principal space the token belongs to. End users and administrators are
/// authenticated against separate tables and never share tokens.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    User,
    Admin,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
    pub kind: TokenKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub user_ttl: Duration,
    pub admin_ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            issuer,
            audience,
            user_ttl_minutes,
            admin_ttl_minutes,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            user_ttl: Duration::from_secs((user_ttl_minutes as u64) * 60),
            admin_ttl: Duration::from_secs((admin_ttl_minutes as u64) * 60),
        }
    }
}

impl JwtKeys {
    fn sign_with_kind(
        &self,
        subject: Uuid,
        kind: TokenKind,
        role: Option<String>,
    ) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let ttl = match kind {
            TokenKind::User => self.user_ttl,
            TokenKind::Admin => self.admin_ttl,
        };
        let exp = now + TimeDuration::seconds(ttl.as_secs() as i64);
        let claims = Claims {
            sub: subject,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            kind,
            role,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(subject = %subject, kind = ?kind, "jwt signed");
        Ok(token)
    }

    pub fn sign_user(&self, user_id: Uuid) -> anyhow::Result<String> {
        self.sign_with_kind(user_id, TokenKind::User, None)
    }

    pub fn sign_admin(&self, admin_id: Uuid, role: &str) -> anyhow::Result<String> {
        self.sign_with_kind(admin_id, TokenKind::Admin, Some(role.to_string()))
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(subject = %data.claims.sub, kind = ?data.claims.kind, "jwt verified");
        Ok(data.claims)
    }
}

fn bearer_claims<S>(parts: &mut Parts, state: &S) -> Result<Claims, ApiError>
where
    JwtKeys: FromRef<S>,
{
    let keys = JwtKeys::from_ref(state);
    let auth_header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized("Invalid Authorization header"))?;

    keys.verify(token).map_err(|_| {
        warn!("invalid or expired token");
        ApiError::unauthorized("Invalid or expired token")
    })
}

/// Request-scoped end-user principal.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state)?;
        if claims.kind != TokenKind::User {
            return Err(ApiError::unauthorized("Please login first"));
        }
        Ok(AuthUser(claims.sub))
    }
}

/// Request-scoped admin principal carrying the role claim.
#[derive(Debug)]
pub struct AdminSession {
    pub admin_id: Uuid,
    pub role: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state)?;
        if claims.kind != TokenKind::Admin {
            return Err(ApiError::unauthorized("Not authorized"));
        }
        Ok(AdminSession {
            admin_id: claims.sub,
            role: claims.role.unwrap_or_else(|| "admin".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        let state = AppState::fake();
        JwtKeys::from_ref(&state)
    }

    #[tokio::test]
    async fn sign_and_verify_user_token() {
        let keys = make_keys();
        let user_id = Uuid::new_v4();
        let token = keys.sign_user(user_id).expect("sign user");
        let claims = keys.verify(&token).expect("verify token");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert_eq!(claims.kind, TokenKind::User);
        assert!(claims.role.is_none());
    }

    #[tokio::test]
    async fn sign_and_verify_admin_token_carries_role() {
        let keys = make_keys();
        let admin_id = Uuid::new_v4();
        let token = keys.sign_admin(admin_id, "superadmin").expect("sign admin");
        let claims = keys.verify(&token).expect("verify token");
        assert_eq!(claims.sub, admin_id);
        assert_eq!(claims.kind, TokenKind::Admin);
        assert_eq!(claims.role.as_deref(), Some("superadmin"));
    }

    #[tokio::test]
    async fn user_and_admin_kinds_are_distinct() {
        let keys = make_keys();
        let user_token = keys.sign_user(Uuid::new_v4()).expect("sign user");
        let claims = keys.verify(&user_token).expect("verify token");
        assert_ne!(claims.kind, TokenKind::Admin);
    }

    #[tokio::test]
    async fn verify_rejects_garbage() {
        let keys = make_keys();
        assert!(keys.verify("not-a-token").is_err());
    }
}
