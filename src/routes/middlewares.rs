use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::models::{Error, TokenClaim};
use crate::AppState;

/// Verifies the bearer token and attaches the decoded claim to the request.
/// Presence and signature (plus expiry) are all that is checked; resource
/// ownership is decided by the handlers.
pub async fn auth_guard(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Error> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| Error::auth("No token provided"))?;

    let claim = decode::<TokenClaim>(
        token,
        &DecodingKey::from_secret(state.config.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| Error::auth("Invalid token"))?
    .claims;

    req.extensions_mut().insert(claim);
    Ok(next.run(req).await)
}
