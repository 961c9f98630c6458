use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::users::{UpdateUserRequest, UpsertProfileRequest, UserList},
    entity::{
        enums::{UserRole, UserStatus},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::User,
    response::{ApiResponse, Meta},
    routes::params::UserQuery,
    services::{optional_text, require_text},
    state::AppState,
};

/// Creates or refreshes the caller's own profile. New profiles start as
/// active customers; role and status are only changed by an admin.
pub async fn upsert_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpsertProfileRequest,
) -> AppResult<ApiResponse<User>> {
    let name = require_text(&payload.name, "name")?;
    let email = normalize_email(&payload.email)?;

    let owner = Users::find()
        .filter(UserCol::Email.eq(email.clone()))
        .one(state.db())
        .await?;
    if owner.is_some_and(|u| u.id != user.user_id) {
        return Err(AppError::Conflict("Email is already taken".to_string()));
    }

    let now = Utc::now();
    let existing = Users::find_by_id(user.user_id).one(state.db()).await?;
    let (profile, message) = match existing {
        Some(existing) => {
            let mut active: UserActive = existing.into();
            active.name = Set(name);
            active.email = Set(email);
            active.phone = Set(optional_text(payload.phone));
            active.updated_at = Set(now.into());
            (active.update(state.db()).await?, "Profile updated")
        }
        None => {
            let created = UserActive {
                id: Set(user.user_id),
                name: Set(name),
                email: Set(email),
                phone: Set(optional_text(payload.phone)),
                role: Set(UserRole::Customer),
                status: Set(UserStatus::Active),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            }
            .insert(state.db())
            .await?;
            audit::record(
                state.db(),
                Some(created.id),
                "user_register",
                "users",
                serde_json::json!({ "user_id": created.id }),
            )
            .await;
            (created, "Profile created")
        }
    };

    Ok(ApiResponse::success(
        message,
        user_from_entity(profile),
        Some(Meta::empty()),
    ))
}

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let profile = Users::find_by_id(user.user_id)
        .one(state.db())
        .await?
        .map(user_from_entity)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Profile", profile, None))
}

pub async fn list_users(
    state: &AppState,
    user: &AuthUser,
    query: UserQuery,
) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(role) = query.role {
        condition = condition.add(UserCol::Role.eq(role));
    }
    if let Some(status) = query.status {
        condition = condition.add(UserCol::Status.eq(status));
    }
    if let Some(search) = query.q.as_ref().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(UserCol::Name).ilike(pattern.clone()))
                .add(Expr::col(UserCol::Email).ilike(pattern)),
        );
    }

    let finder = Users::find()
        .filter(condition)
        .order_by_desc(UserCol::CreatedAt);
    let total = finder.clone().count(state.db()).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(state.db())
        .await?
        .into_iter()
        .map(user_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

pub async fn update_user(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    if payload.role.is_none() && payload.status.is_none() {
        return Err(AppError::BadRequest("nothing to update".into()));
    }

    let existing = Users::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: UserActive = existing.into();
    if let Some(role) = payload.role {
        active.role = Set(role);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(state.db()).await?;

    audit::record(
        state.db(),
        Some(user.user_id),
        "user_update",
        "users",
        serde_json::json!({ "user_id": updated.id, "role": updated.role, "status": updated.status }),
    )
    .await;

    Ok(ApiResponse::success(
        "User updated",
        user_from_entity(updated),
        Some(Meta::empty()),
    ))
}

pub async fn delete_user(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    if id == user.user_id {
        return Err(AppError::BadRequest("cannot delete your own account".into()));
    }

    let result = Users::delete_by_id(id).exec(state.db()).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state.db(),
        Some(user.user_id),
        "user_delete",
        "users",
        serde_json::json!({ "user_id": id }),
    )
    .await;

    Ok(ApiResponse::done("Deleted"))
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AppError::BadRequest("invalid email".into())),
    }
}

fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        role: model.role,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_email;

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Ann@Example.COM ").unwrap(), "ann@example.com");
        assert!(normalize_email("ann").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("ann@localhost").is_err());
    }
}
