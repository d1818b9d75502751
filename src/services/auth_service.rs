use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::{
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterStaffRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthStaff, ensure_admin, jwt_secret},
    models::{Staff, StaffRole},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string())
}

fn new_staff(email: &str, name: &str, password: &str, role: StaffRole) -> AppResult<Staff> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("A valid email is required".into()));
    }
    if password.len() < 6 {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters".into(),
        ));
    }
    Ok(Staff {
        id: Uuid::new_v4(),
        email,
        name: name.trim().to_string(),
        password_hash: hash_password(password)?,
        role,
        created_at: Utc::now(),
    })
}

pub async fn register_staff(
    state: &AppState,
    staff: &AuthStaff,
    payload: RegisterStaffRequest,
) -> AppResult<ApiResponse<Staff>> {
    ensure_admin(staff)?;
    let RegisterStaffRequest {
        email,
        name,
        password,
        role,
    } = payload;

    let member = new_staff(&email, &name, &password, role)?;
    state.store.insert_staff(&member).await?;

    tracing::info!(staff_id = %member.id, role = %member.role, "staff registered");
    Ok(ApiResponse::success("Staff created", member, None))
}

/// Returns the staff member with `email`, creating it when missing.
pub async fn ensure_staff(
    state: &AppState,
    email: &str,
    name: &str,
    password: &str,
    role: StaffRole,
) -> AppResult<Staff> {
    if let Some(existing) = state.store.find_staff_by_email(email).await? {
        return Ok(existing);
    }
    let member = new_staff(email, name, password, role)?;
    state.store.insert_staff(&member).await?;
    Ok(member)
}

pub fn issue_token(staff: &Staff) -> AppResult<String> {
    let secret = jwt_secret()?;
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(12))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: staff.id.to_string(),
        role: staff.role.as_str().to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let invalid = || AppError::BadRequest("Invalid email or password".into());

    let staff = state
        .store
        .find_staff_by_email(&email.trim().to_lowercase())
        .await?
        .ok_or_else(invalid)?;

    let parsed_hash = PasswordHash::new(&staff.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        tracing::debug!(staff_id = %staff.id, "login rejected");
        return Err(invalid());
    }

    let token = issue_token(&staff)?;
    tracing::info!(staff_id = %staff.id, role = %staff.role, "staff logged in");

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {}", token),
            staff,
        },
        Some(Meta::empty()),
    ))
}
