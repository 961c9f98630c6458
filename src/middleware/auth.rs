use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::EntityTrait;

use crate::{
    entity::{
        enums::{UserRole, UserStatus},
        users::{Entity as Users, Model as UserModel},
    },
    error::AppError,
    state::AppState,
};

/// Claims of the bearer tokens issued by the identity provider.
#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    pub role: UserRole,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Staff and admins run the floor: tables, bookings and orders.
    pub fn is_staff(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::Staff)
    }
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_staff(user: &AuthUser) -> Result<(), AppError> {
    if !user.is_staff() {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn decode_token(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

    let user_id = Uuid::parse_str(&decoded.claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

    Ok(AuthUser {
        user_id,
        role: decoded.claims.role,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
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

        let user = decode_token(token, &state.jwt_secret)?;
        let profile = Users::find_by_id(user.user_id).one(state.db()).await?;
        apply_profile(user, profile)
    }
}

/// A stored profile overrides the token: its role wins and an inactive
/// account is refused. Callers without a profile keep the token's role.
pub fn apply_profile(user: AuthUser, profile: Option<UserModel>) -> Result<AuthUser, AppError> {
    match profile {
        Some(profile) if profile.status == UserStatus::Inactive => {
            Err(AppError::Unauthorized("Account is inactive".into()))
        }
        Some(profile) => Ok(AuthUser {
            user_id: user.user_id,
            role: profile.role,
        }),
        None => Ok(user),
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::*;

    fn token(sub: &str, role: UserRole, secret: &str) -> String {
        let exp = (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize;
        let claims = Claims {
            sub: sub.to_string(),
            role,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn decodes_valid_token() {
        let id = Uuid::new_v4();
        let user = decode_token(&token(&id.to_string(), UserRole::Staff, "s3cret"), "s3cret").unwrap();
        assert_eq!(user.user_id, id);
        assert!(user.is_staff());
        assert!(!user.is_admin());
        assert!(ensure_admin(&user).is_err());
    }

    #[test]
    fn rejects_wrong_secret_and_bad_subject() {
        let id = Uuid::new_v4();
        let err = decode_token(&token(&id.to_string(), UserRole::Admin, "a"), "b").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err = decode_token(&token("not-a-uuid", UserRole::Admin, "a"), "a").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn customers_are_not_staff() {
        let user = AuthUser {
            user_id: Uuid::new_v4(),
            role: UserRole::Customer,
        };
        assert!(ensure_staff(&user).is_err());
    }

    fn profile(id: Uuid, role: UserRole, status: UserStatus) -> UserModel {
        let now = chrono::Utc::now();
        UserModel {
            id,
            name: "Dana".into(),
            email: "dana@example.com".into(),
            phone: None,
            role,
            status,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[test]
    fn stored_role_and_status_override_the_token() {
        let id = Uuid::new_v4();
        let from_token = AuthUser {
            user_id: id,
            role: UserRole::Admin,
        };

        let demoted = apply_profile(
            from_token.clone(),
            Some(profile(id, UserRole::Customer, UserStatus::Active)),
        )
        .unwrap();
        assert_eq!(demoted.role, UserRole::Customer);
        assert!(ensure_staff(&demoted).is_err());

        let err = apply_profile(
            from_token.clone(),
            Some(profile(id, UserRole::Admin, UserStatus::Inactive)),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let no_profile = apply_profile(from_token, None).unwrap();
        assert!(no_profile.is_admin());
    }
}
