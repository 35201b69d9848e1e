use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::jwt::{verify_token, TokenType};
use crate::error::AppError;
use crate::models::tracker::OwnerId;
use crate::AppState;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub owner_id: OwnerId,
    #[allow(dead_code)]
    pub email: Option<String>,
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?;

    let token_data = verify_token(token, &state.config)?;

    if token_data.claims.token_type != TokenType::Access {
        return Err(AppError::Unauthorized);
    }

    if token_data.claims.sub.is_empty() {
        return Err(AppError::Unauthorized);
    }

    let auth_user = AuthUser {
        owner_id: OwnerId::new(token_data.claims.sub),
        email: token_data.claims.email.filter(|e| !e.is_empty()),
    };

    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}
