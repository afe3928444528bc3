use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::auth::model::{Role, UserStatus};
use crate::modules::auth::schema::UserResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: UserStatus,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub message: &'static str,
}
