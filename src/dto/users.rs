use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::enums::{UserRole, UserStatus},
    models::User,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertProfileRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserList {
    #[schema(value_type = Vec<User>)]
    pub items: Vec<User>,
}
