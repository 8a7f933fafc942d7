use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{Request, StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access-token claims. Tokens are issued by the identity service; this
/// backend only verifies them and trusts the tenant they carry.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,        // user id
    pub company_id: Uuid, // tenant
    pub exp: u64,
    pub iat: u64,
    pub jti: String,
}

pub struct AuthConfig {
    pub jwt_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key".to_string()),
        }
    }
}

pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_ref()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

/// Authenticated caller identity, inserted by `auth_middleware` and handed
/// to handlers through the extractor below.
#[derive(Clone, Debug)]
pub struct AuthUserInfo {
    pub user_id: Uuid,
    pub company_id: Uuid,
}

impl From<&AuthUserInfo> for crate::services::context::RequestContext {
    fn from(auth_info: &AuthUserInfo) -> Self {
        Self {
            user_id: auth_info.user_id,
            company_id: auth_info.company_id,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUserInfo
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUserInfo>()
            .cloned()
            .ok_or((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()))
    }
}

pub async fn auth_middleware(
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_str| {
            auth_str
                .starts_with("Bearer ")
                .then(|| auth_str[7..].to_string())
        })
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let auth_service = AuthService::new(AuthConfig::default());
    let claims = auth_service
        .verify_token(&token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(AuthUserInfo {
        user_id: claims.sub,
        company_id: claims.company_id,
    });

    Ok(next.run(request).await)
}
