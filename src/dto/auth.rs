use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Staff, StaffRole};

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterStaffRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: StaffRole,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub staff: Staff,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}
