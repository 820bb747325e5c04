use axum::{
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::{
    models::{
        dto::{AuthResponse, LoginInfo, SignupInfo},
        Error, Session, SessionUser, TokenClaim, User,
    },
    repository::generate_id,
    AppState, Config,
};

use super::middlewares::auth_guard;

#[derive(OpenApi)]
#[openapi(paths(
    register_user_handler,
    login_handler,
    get_session_handler,
    logout_handler
))]
/// Defines the OpenAPI spec for auth endpoints
pub struct AuthApi;

/// Used to group auth endpoints together in the OpenAPI documentation
pub const AUTH_API_GROUP: &str = "AUTH";

/// Builds a router for all the auth routes
pub fn auth_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(register_user_handler))
        .route("/login", post(login_handler))
        .route("/session", get(get_session_handler))
        .route(
            "/logout",
            post(logout_handler)
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard)),
        )
}

/// Signs a token for the given identity, valid for the configured number
/// of days (nominally 7).
fn issue_token(user: &SessionUser, config: &Config) -> Result<String, Error> {
    let now = Utc::now();
    let iat = now.timestamp() as usize;
    let exp = (now + Duration::days(config.token_days)).timestamp() as usize;

    let claims = TokenClaim {
        sub: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
        iat,
        exp,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )?;
    Ok(token)
}

/// Lightweight shape check: something@something.tld, no whitespace.
fn plausible_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

// Register handler function
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = AUTH_API_GROUP,
    request_body = SignupInfo,
    responses(
        (status = 200, description = "Account created and token issued", body = AuthResponse),
        (status = 400, description = "Missing or malformed fields"),
        (status = 409, description = "Email already registered"),
    )
)]
pub async fn register_user_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignupInfo>,
) -> Result<impl IntoResponse, Error> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(Error::validation("Name is required"));
    }
    if !plausible_email(&body.email) {
        return Err(Error::validation("Invalid email format"));
    }
    if body.password.len() < 6 {
        return Err(Error::validation("Password must be at least 6 characters"));
    }
    if state.repo.find_user_by_email(&body.email).is_some() {
        return Err(Error::conflict("This email is already registered"));
    }

    let user = state.repo.create_user(User {
        id: generate_id("user"),
        name: name.to_string(),
        email: body.email.to_ascii_lowercase(),
        password: body.password,
        role: body.role,
        created_at: Utc::now(),
    });

    let public = SessionUser::from(&user);
    let token = issue_token(&public, &state.config)?;
    state.repo.save_session(&Session {
        user: public.clone(),
        token: token.clone(),
    });

    Ok(Json(AuthResponse {
        token,
        user: public,
        message: "Signup successful".to_string(),
    }))
}

// Login handler function
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_API_GROUP,
    request_body = LoginInfo,
    responses(
        (status = 200, description = "Credentials accepted, token issued", body = AuthResponse),
        (status = 401, description = "Unknown email or wrong password"),
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginInfo>,
) -> Result<impl IntoResponse, Error> {
    if !plausible_email(&body.email) {
        return Err(Error::validation("Invalid email format"));
    }
    let user = state
        .repo
        .find_user_by_email(&body.email)
        .filter(|u| u.password == body.password)
        .ok_or_else(|| Error::auth("Invalid email or password"))?;

    let public = SessionUser::from(&user);
    let token = issue_token(&public, &state.config)?;
    state.repo.save_session(&Session {
        user: public.clone(),
        token: token.clone(),
    });

    Ok(Json(AuthResponse {
        token,
        user: public,
        message: "Login successful".to_string(),
    }))
}

// Session restore handler function
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = AUTH_API_GROUP,
    responses(
        (status = 200, description = "Current session", body = Session),
        (status = 401, description = "No active session"),
    )
)]
pub async fn get_session_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, Error> {
    let session = state
        .repo
        .get_session()
        .ok_or_else(|| Error::auth("No active session"))?;
    Ok(Json(session))
}

// Logout handler function
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_API_GROUP,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Session cleared"),
    )
)]
pub async fn logout_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.repo.clear_session();
    Json(crate::models::dto::Message::new("Logged out"))
}
