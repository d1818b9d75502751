use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use uuid::Uuid;

use crate::{dto::auth::Claims, error::AppError, models::StaffRole};

/// Staff member behind a request, taken from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthStaff {
    pub staff_id: Uuid,
    pub role: StaffRole,
}

/// Admins pass every role check.
pub fn ensure_any_role(staff: &AuthStaff, roles: &[StaffRole]) -> Result<(), AppError> {
    if staff.role == StaffRole::Admin || roles.contains(&staff.role) {
        return Ok(());
    }
    tracing::debug!(staff_id = %staff.staff_id, role = %staff.role, "role check failed");
    Err(AppError::Forbidden)
}

pub fn ensure_admin(staff: &AuthStaff) -> Result<(), AppError> {
    ensure_any_role(staff, &[])
}

pub fn jwt_secret() -> Result<String, AppError> {
    std::env::var("JWT_SECRET")
        .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))
}

impl<S> FromRequestParts<S> for AuthStaff
where
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?
            .trim();

        let secret = jwt_secret()?;
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        let staff_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid staff id in token".into()))?;
        let role = decoded
            .claims
            .role
            .parse::<StaffRole>()
            .map_err(|_| AppError::Unauthorized("Invalid role in token".into()))?;

        Ok(AuthStaff { staff_id, role })
    }
}
